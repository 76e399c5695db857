//! Content graph fixtures shared by tests.

use mosaic_model::{Entity, Snapshot};
use serde_json::{Value, json};

pub(crate) fn entry(id: &str, content_type: &str, fields: Value) -> Value {
    json!({
        "sys": {"id": id, "type": "Entry", "contentType": {"sys": {"id": content_type}}},
        "fields": fields
    })
}

pub(crate) fn asset(id: &str, title: &str, content_type: &str) -> Value {
    json!({
        "sys": {"id": id, "type": "Asset"},
        "fields": {
            "title": title,
            "file": {
                "url": format!("//img.example.net/{id}/{id}.png"),
                "fileName": format!("{id}.png"),
                "contentType": content_type
            }
        }
    })
}

pub(crate) fn stub(link_type: &str, id: &str) -> Value {
    json!({"sys": {"type": "Link", "linkType": link_type, "id": id}})
}

pub(crate) fn document(blocks: Vec<Value>) -> Value {
    json!({"nodeType": "document", "data": {}, "content": blocks})
}

pub(crate) fn entry_block(target: Value) -> Value {
    json!({"nodeType": "embedded-entry-block", "data": {"target": target}, "content": []})
}

pub(crate) fn asset_block(target: Value) -> Value {
    json!({"nodeType": "embedded-asset-block", "data": {"target": target}, "content": []})
}

pub(crate) fn paragraph(text: &str) -> Value {
    json!({
        "nodeType": "paragraph",
        "data": {},
        "content": [{"nodeType": "text", "value": text, "marks": [], "data": {}}]
    })
}

pub(crate) fn static_page(id: &str, slug: &str, title: &str, blocks: Vec<Value>) -> Value {
    entry(
        id,
        "staticPage",
        json!({"title": title, "slug": slug, "content": document(blocks)}),
    )
}

pub(crate) fn all_news_page(id: &str, slug: &str, title: &str) -> Value {
    entry(id, "allNewsPage", json!({"title": title, "slug": slug}))
}

pub(crate) fn project(id: &str, slug: &str, name: &str) -> Value {
    entry(id, "project", json!({"name": name, "slug": slug}))
}

pub(crate) fn activity(id: &str, slug: &str, name: &str, logo: Option<Value>) -> Value {
    let mut fields = json!({"name": name, "slug": slug, "description": document(vec![paragraph(name)])});
    if let Some(logo) = logo {
        fields["logo"] = logo;
    }
    entry(id, "activity", fields)
}

pub(crate) fn post(
    id: &str,
    slug: &str,
    title: &str,
    published_on: Option<&str>,
    project: Option<&str>,
    activities: &[&str],
) -> Value {
    let mut fields = json!({
        "title": title,
        "slug": slug,
        "activities": activities.iter().map(|id| stub("Entry", id)).collect::<Vec<_>>(),
        "content": document(vec![paragraph(title)])
    });
    if let Some(date) = published_on {
        fields["publishedOn"] = json!(date);
    }
    if let Some(project) = project {
        fields["project"] = stub("Entry", project);
    }
    entry(id, "post", fields)
}

pub(crate) fn contact(
    id: &str,
    slug: &str,
    link: &str,
    small_icon: Value,
    color: Option<&str>,
) -> Value {
    let mut fields = json!({"slug": slug, "link": link, "smallIcon": small_icon});
    if let Some(color) = color {
        fields["color"] = json!(color);
    }
    entry(id, "contactMethod", fields)
}

pub(crate) fn entity(value: Value) -> Entity {
    Entity::from_value(value).unwrap()
}

/// A complete small site: home with logo and index links, activity and
/// project indexes, a contact page, an all-news page and three posts.
pub(crate) fn site_snapshot() -> Snapshot {
    let logo = asset("logo", "Logo", "image/png");
    let activities_index = static_page(
        "idx-a",
        "nasze-aktywnosci",
        "Nasze aktywności",
        vec![entry_block(activity("a1", "biegi", "Biegi", None))],
    );
    let projects_index = static_page(
        "idx-p",
        "nasze-projekty",
        "Nasze projekty",
        vec![entry_block(project("p1", "oboz", "Obóz"))],
    );
    let contact_page = static_page(
        "kontakt",
        "kontakt-2",
        "Kontakt",
        vec![
            entry_block(contact(
                "c1",
                "facebook",
                "https://facebook.com/unicorns",
                asset("fb", "Facebook", "image/png"),
                Some("#3b5998"),
            )),
            entry_block(contact(
                "c2",
                "email",
                "mailto:biuro@example.org",
                stub("Asset", "mail"),
                None,
            )),
            entry_block(contact(
                "c3",
                "phone",
                "tel:123",
                asset("tel", "Telefon", "image/png"),
                None,
            )),
        ],
    );
    let news = all_news_page("news", "aktualnosci", "Aktualności");
    let home = static_page(
        "home",
        "indeks",
        "Strona główna",
        vec![
            asset_block(logo.clone()),
            entry_block(activities_index.clone()),
            entry_block(projects_index.clone()),
            entry_block(news.clone()),
            entry_block(stub("Entry", "gone")),
        ],
    );

    let entities = vec![
        home,
        activities_index,
        projects_index,
        contact_page,
        news,
        project("p1", "oboz", "Obóz"),
        activity(
            "a1",
            "biegi",
            "Biegi",
            Some(asset("a1-logo", "Biegi logo", "image/png")),
        ),
        post("post1", "relacja", "Relacja", Some("2024-03-01"), Some("p1"), &[]),
        post("post2", "wyniki", "Wyniki", Some("2025-06-01"), Some("p1"), &["a1"]),
        post("post3", "zapowiedz", "Zapowiedź", None, None, &["a1"]),
    ];

    Snapshot::new(
        entities.into_iter().map(entity).collect(),
        vec![entity(logo)],
    )
}
