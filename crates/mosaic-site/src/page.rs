//! Page composition.
//!
//! Turns a request path into page markup: the home page is assembled from
//! well-known entities, every other path renders the addressed entity as an
//! article followed by its related posts.

use chrono::{Datelike, NaiveDate};
use mosaic_model::{ContactMethodFields, Entity, Link};
use mosaic_renderer::{DocumentRenderer, Element, Markup};

use crate::error::SiteError;
use crate::resolver::{
    WellKnownSlugs, embedded_assets, embedded_entries, find_singleton, related_posts,
};
use crate::site::SiteInfo;
use crate::site_state::SiteState;

/// Background of contact icons without a configured color.
const DEFAULT_CONTACT_COLOR: &str = "#f0f0f0";

/// Result of rendering a page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageRenderResult {
    /// Document title, upper-cased.
    pub title: String,
    /// Rendered page content, without the site shell.
    pub html: String,
}

/// Format a date the way Polish long dates read, e.g. `1 marca 2024`.
#[must_use]
pub fn format_polish_date(date: NaiveDate) -> String {
    format!("{} {} {}", date.day(), month_genitive(date.month()), date.year())
}

fn month_genitive(month: u32) -> &'static str {
    match month {
        1 => "stycznia",
        2 => "lutego",
        3 => "marca",
        4 => "kwietnia",
        5 => "maja",
        6 => "czerwca",
        7 => "lipca",
        8 => "sierpnia",
        9 => "września",
        10 => "października",
        11 => "listopada",
        _ => "grudnia",
    }
}

/// Page composition over one site state.
pub(crate) struct PageComposer<'a> {
    pub(crate) state: &'a SiteState,
    pub(crate) renderer: &'a DocumentRenderer,
    pub(crate) slugs: &'a WellKnownSlugs,
    pub(crate) info: &'a SiteInfo,
}

impl PageComposer<'_> {
    /// Render the page addressed by `path`.
    pub(crate) fn render(&self, path: &str) -> Result<PageRenderResult, SiteError> {
        if path == "/" {
            return self.home_page();
        }

        let entity = self
            .state
            .get(path)
            .ok_or_else(|| SiteError::PageNotFound(path.to_owned()))?;
        Ok(self.entity_page(entity))
    }

    /// Primary article followed by every related post.
    pub(crate) fn entity_page(&self, entity: &Entity) -> PageRenderResult {
        let mut parts = vec![self.article(entity, Some("primary"))];
        for post in related_posts(entity, self.state.entities(), &self.slugs.all_news) {
            parts.push(self.article(post, None));
            parts.push(
                Element::new("hr")
                    .attr("class", "post-separator")
                    .attr("aria-hidden", "true")
                    .into(),
            );
        }

        PageRenderResult {
            title: entity.title().unwrap_or_default().to_uppercase(),
            html: Markup::Fragment(parts).to_html(),
        }
    }

    fn article(&self, entity: &Entity, class: Option<&str>) -> Markup {
        let media = self.renderer.media();

        let mut article = Element::new("article").attr_opt("class", class).child(
            Element::new("h1")
                .attr("class", "entry-title")
                .children(entity.title().map(Markup::from)),
        );

        if let Some(date) = entity.published_on() {
            article = article.child(
                Element::new("p")
                    .attr("style", "width: auto; color: #7c7c7c")
                    .child(
                        Element::new("a")
                            .attr_opt("href", entity.href(media))
                            .attr("style", "color: inherit")
                            .child(format_polish_date(date)),
                    ),
            );
        }

        if matches!(
            entity,
            Entity::StaticPage(_) | Entity::Activity(_) | Entity::Post(_)
        ) {
            article = article.child(Element::new("hr"));
        }

        if let Entity::Activity(activity) = entity {
            let logo_src = activity
                .fields
                .logo
                .as_ref()
                .and_then(Link::entity)
                .and_then(|logo| logo.media_src(media));
            article = article.child(Element::new("img").attr_opt("src", logo_src));
        }

        if let Some(body) = entity.body() {
            article = article.child(self.renderer.render(body));
        }

        article.into()
    }

    /// Home page: heading, logo, index links and contact icons.
    pub(crate) fn home_page(&self) -> Result<PageRenderResult, SiteError> {
        let entities = self.state.entities();
        let home = find_singleton(entities, &self.slugs.home)?;
        let contact = find_singleton(entities, &self.slugs.contact)?;

        let logo_src = home
            .body()
            .map(embedded_assets)
            .unwrap_or_default()
            .into_iter()
            .next()
            .and_then(Link::entity)
            .and_then(|logo| logo.media_src(self.renderer.media()));

        let index_links: Vec<Markup> = home
            .body()
            .map(embedded_entries)
            .unwrap_or_default()
            .into_iter()
            .map(|link| self.renderer.render_embedded_block(link))
            .collect();

        let contact_icons: Vec<Markup> = contact
            .body()
            .map(embedded_entries)
            .unwrap_or_default()
            .into_iter()
            .filter_map(|link| match link.entity() {
                Some(Entity::ContactMethod(method)) => self.contact_icon(&method.fields),
                _ => None,
            })
            .collect();

        let article = Element::new("article")
            .attr("class", "primary")
            .child(
                Element::new("h1")
                    .attr("class", "entry-title")
                    .child(self.info.home_heading.as_str()),
            )
            .child(Element::new("hr"))
            .child(
                Element::new("img")
                    .attr_opt("src", logo_src)
                    .attr("alt", self.info.name.as_str()),
            )
            .child(Element::new("hr"))
            .child(
                Element::new("div")
                    .attr("style", "flex-flow: row wrap; justify-content: center")
                    .children(index_links),
            )
            .child(Element::new("hr"))
            .child(
                Element::new("div")
                    .attr(
                        "style",
                        "flex-flow: row wrap; justify-content: center; gap: 16px",
                    )
                    .children(contact_icons),
            );

        Ok(PageRenderResult {
            title: self.info.name.to_uppercase(),
            html: Markup::from(article).to_html(),
        })
    }

    /// Round icon link for a contact method; skipped if the icon is unresolved.
    fn contact_icon(&self, fields: &ContactMethodFields) -> Option<Markup> {
        let icon = fields.small_icon.as_ref()?.entity()?;
        let color = fields.color.as_deref().unwrap_or(DEFAULT_CONTACT_COLOR);

        Some(
            Element::new("a")
                .attr_opt("href", fields.link.as_deref())
                .attr(
                    "style",
                    format!(
                        "background-color: {color}; border-radius: 9999px; height: 54px; width: 54px; padding: 10px"
                    ),
                )
                .child(Element::new("img").attr_opt("src", icon.media_src(self.renderer.media())))
                .child(
                    Element::new("span")
                        .attr("class", "screen-reader-text")
                        .child(fields.slug.as_str()),
                )
                .into(),
        )
    }
}
