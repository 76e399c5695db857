//! Entity classification and derived attributes.
//!
//! Records arrive as untyped JSON. [`classify`] looks only at the `sys`
//! discriminator; [`Entity::from_value`] then parses the kind-specific
//! fields. Both are total: a record outside the known kind set, or one whose
//! fields do not match its kind, is a miss rather than an error.

use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::document::Document;
use crate::link::Link;
use crate::media::MediaMode;

/// Closed set of entity kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EntityKind {
    StaticPage,
    AllNewsIndex,
    Activity,
    Project,
    ContactMethod,
    Post,
    MediaAsset,
}

impl EntityKind {
    /// Map a content type identifier to an entry kind.
    #[must_use]
    pub fn from_content_type(content_type: &str) -> Option<Self> {
        match content_type {
            "staticPage" => Some(Self::StaticPage),
            "allNewsPage" => Some(Self::AllNewsIndex),
            "activity" => Some(Self::Activity),
            "project" => Some(Self::Project),
            "contactMethod" => Some(Self::ContactMethod),
            "post" => Some(Self::Post),
            _ => None,
        }
    }
}

/// Classify a raw record by its `sys` discriminator.
///
/// Assets are recognized by `sys.type == "Asset"`, entries by
/// `sys.contentType.sys.id`. Link stubs and unknown content types yield `None`.
#[must_use]
pub fn classify(record: &Value) -> Option<EntityKind> {
    let sys = record.get("sys")?;
    match sys.get("type")?.as_str()? {
        "Asset" => Some(EntityKind::MediaAsset),
        "Entry" => {
            let content_type = sys.pointer("/contentType/sys/id")?.as_str()?;
            EntityKind::from_content_type(content_type)
        }
        _ => None,
    }
}

/// A classified record: identifier plus kind-specific fields.
#[derive(Clone, Debug, PartialEq)]
pub struct Record<F> {
    /// Stable identifier (`sys.id`).
    pub id: String,
    /// Kind-specific fields.
    pub fields: F,
}

#[derive(Deserialize)]
struct RawRecord<F> {
    sys: RawSys,
    fields: F,
}

#[derive(Deserialize)]
struct RawSys {
    id: String,
}

impl<F: DeserializeOwned> Record<F> {
    fn from_value(value: Value) -> Result<Self, serde_json::Error> {
        let raw: RawRecord<F> = serde_json::from_value(value)?;
        Ok(Self {
            id: raw.sys.id,
            fields: raw.fields,
        })
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct StaticPageFields {
    pub title: String,
    pub slug: String,
    #[serde(default)]
    pub content: Document,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct AllNewsIndexFields {
    pub title: String,
    pub slug: String,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ActivityFields {
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub logo: Option<Link>,
    #[serde(default)]
    pub description: Document,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ProjectFields {
    pub name: String,
    pub slug: String,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactMethodFields {
    /// List key only; contact methods have no page of their own.
    pub slug: String,
    #[serde(default)]
    pub small_icon: Option<Link>,
    #[serde(default)]
    pub big_icon: Option<Link>,
    #[serde(default)]
    pub qr_code: Option<Link>,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostFields {
    pub title: String,
    pub slug: String,
    #[serde(default, deserialize_with = "deserialize_date")]
    pub published_on: Option<NaiveDate>,
    #[serde(default)]
    pub project: Option<Link>,
    #[serde(default)]
    pub activities: Vec<Link>,
    #[serde(default)]
    pub content: Document,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct MediaAssetFields {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub file: Option<AssetFile>,
}

impl MediaAssetFields {
    /// Returns true if the asset's content type is an image type.
    #[must_use]
    pub fn is_image(&self) -> bool {
        self.file
            .as_ref()
            .is_some_and(|file| file.content_type.starts_with("image"))
    }
}

/// Binary resource description of a media asset.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetFile {
    /// Remote URL (often protocol-relative, e.g. `//images.example.net/...`).
    pub url: String,
    pub file_name: String,
    pub content_type: String,
}

/// Dates may carry a time component (`2024-03-01T00:00+01:00`); only the
/// calendar day is kept. Unparseable values become `None`.
fn deserialize_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(parse_date))
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    let day = raw.get(..10)?;
    NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
}

/// A classified content record.
#[derive(Clone, Debug, PartialEq)]
pub enum Entity {
    StaticPage(Record<StaticPageFields>),
    AllNewsIndex(Record<AllNewsIndexFields>),
    Activity(Record<ActivityFields>),
    Project(Record<ProjectFields>),
    ContactMethod(Record<ContactMethodFields>),
    Post(Record<PostFields>),
    MediaAsset(Record<MediaAssetFields>),
}

impl Entity {
    /// Classify and parse a raw record.
    ///
    /// Returns `None` for records outside the known kind set and for records
    /// whose fields do not match their kind.
    #[must_use]
    pub fn from_value(value: Value) -> Option<Self> {
        let kind = classify(&value)?;
        let parsed = match kind {
            EntityKind::StaticPage => Record::from_value(value).map(Self::StaticPage),
            EntityKind::AllNewsIndex => Record::from_value(value).map(Self::AllNewsIndex),
            EntityKind::Activity => Record::from_value(value).map(Self::Activity),
            EntityKind::Project => Record::from_value(value).map(Self::Project),
            EntityKind::ContactMethod => Record::from_value(value).map(Self::ContactMethod),
            EntityKind::Post => Record::from_value(value).map(Self::Post),
            EntityKind::MediaAsset => Record::from_value(value).map(Self::MediaAsset),
        };

        match parsed {
            Ok(entity) => Some(entity),
            Err(e) => {
                tracing::debug!(kind = ?kind, error = %e, "Skipping record with malformed fields");
                None
            }
        }
    }

    #[must_use]
    pub fn kind(&self) -> EntityKind {
        match self {
            Self::StaticPage(_) => EntityKind::StaticPage,
            Self::AllNewsIndex(_) => EntityKind::AllNewsIndex,
            Self::Activity(_) => EntityKind::Activity,
            Self::Project(_) => EntityKind::Project,
            Self::ContactMethod(_) => EntityKind::ContactMethod,
            Self::Post(_) => EntityKind::Post,
            Self::MediaAsset(_) => EntityKind::MediaAsset,
        }
    }

    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::StaticPage(r) => &r.id,
            Self::AllNewsIndex(r) => &r.id,
            Self::Activity(r) => &r.id,
            Self::Project(r) => &r.id,
            Self::ContactMethod(r) => &r.id,
            Self::Post(r) => &r.id,
            Self::MediaAsset(r) => &r.id,
        }
    }

    /// Slug of the entity. Media assets have none.
    #[must_use]
    pub fn slug(&self) -> Option<&str> {
        match self {
            Self::StaticPage(r) => Some(&r.fields.slug),
            Self::AllNewsIndex(r) => Some(&r.fields.slug),
            Self::Activity(r) => Some(&r.fields.slug),
            Self::Project(r) => Some(&r.fields.slug),
            Self::ContactMethod(r) => Some(&r.fields.slug),
            Self::Post(r) => Some(&r.fields.slug),
            Self::MediaAsset(_) => None,
        }
    }

    /// Display title: `name` for activities and projects, `title` otherwise.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        match self {
            Self::Activity(r) => Some(&r.fields.name),
            Self::Project(r) => Some(&r.fields.name),
            Self::StaticPage(r) => Some(&r.fields.title),
            Self::AllNewsIndex(r) => Some(&r.fields.title),
            Self::Post(r) => Some(&r.fields.title),
            Self::MediaAsset(r) => r.fields.title.as_deref(),
            Self::ContactMethod(_) => None,
        }
    }

    /// Canonical path of the entity.
    ///
    /// - `Activity`, `StaticPage`, `Post`: `/{slug}/`
    /// - `Project`, `AllNewsIndex`: `/category/{slug}/`
    /// - `MediaAsset`: remote URL, or `/assets/{id}/{file_name}` in local mode
    /// - `ContactMethod`: not addressable
    #[must_use]
    pub fn href(&self, media: &MediaMode) -> Option<String> {
        match self {
            Self::Activity(r) => Some(format!("/{}/", r.fields.slug)),
            Self::StaticPage(r) => Some(format!("/{}/", r.fields.slug)),
            Self::Post(r) => Some(format!("/{}/", r.fields.slug)),
            Self::Project(r) => Some(format!("/category/{}/", r.fields.slug)),
            Self::AllNewsIndex(r) => Some(format!("/category/{}/", r.fields.slug)),
            Self::MediaAsset(r) => {
                let file = r.fields.file.as_ref()?;
                if media.is_local() {
                    Some(format!("/assets/{}/{}", r.id, file.file_name))
                } else {
                    Some(file.url.clone())
                }
            }
            Self::ContactMethod(_) => None,
        }
    }

    /// Source usable in `src`/`href` attributes of rendered output.
    ///
    /// Same as [`href`](Self::href), except local asset paths are placed
    /// under the media mode's output prefix.
    #[must_use]
    pub fn media_src(&self, media: &MediaMode) -> Option<String> {
        self.href(media).map(|href| media.rewrite_src(href))
    }

    /// Publication date. Only posts have one.
    #[must_use]
    pub fn published_on(&self) -> Option<NaiveDate> {
        match self {
            Self::Post(r) => r.fields.published_on,
            _ => None,
        }
    }

    /// Visit every outgoing link: reference fields first, then the body.
    pub(crate) fn for_each_link_mut(&mut self, f: &mut dyn FnMut(&mut Link)) {
        match self {
            Self::StaticPage(r) => r.fields.content.for_each_link_mut(f),
            Self::Activity(r) => {
                if let Some(logo) = &mut r.fields.logo {
                    f(logo);
                }
                r.fields.description.for_each_link_mut(f);
            }
            Self::ContactMethod(r) => {
                let fields = &mut r.fields;
                for link in [&mut fields.small_icon, &mut fields.big_icon, &mut fields.qr_code]
                    .into_iter()
                    .flatten()
                {
                    f(link);
                }
            }
            Self::Post(r) => {
                if let Some(project) = &mut r.fields.project {
                    f(project);
                }
                for activity in &mut r.fields.activities {
                    f(activity);
                }
                r.fields.content.for_each_link_mut(f);
            }
            Self::AllNewsIndex(_) | Self::Project(_) | Self::MediaAsset(_) => {}
        }
    }

    /// Rich-text body of content-bearing entities.
    #[must_use]
    pub fn body(&self) -> Option<&Document> {
        match self {
            Self::StaticPage(r) => Some(&r.fields.content),
            Self::Activity(r) => Some(&r.fields.description),
            Self::Post(r) => Some(&r.fields.content),
            _ => None,
        }
    }
}
