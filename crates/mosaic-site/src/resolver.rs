//! Relationship resolution over the entity collection.
//!
//! Everything here is a pure function of the collection: singleton lookup by
//! reserved slug, references embedded at the top level of a document, and
//! posts related to a page.

use std::cmp::Ordering;

use chrono::NaiveDate;
use mosaic_model::{Document, Entity, Link, Node, PostFields};

use crate::error::SiteError;

/// Reserved slugs locating the site's singleton pages.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WellKnownSlugs {
    /// Home page; its body lists the logo and the index links.
    pub home: String,
    /// Activities index; its body lists the activities sub-menu.
    pub activities: String,
    /// Projects index; its body lists the projects sub-menu.
    pub projects: String,
    /// Contact page; its body lists the contact methods.
    pub contact: String,
    /// All-news page; relates to every post.
    pub all_news: String,
}

impl Default for WellKnownSlugs {
    fn default() -> Self {
        Self {
            home: "indeks".to_owned(),
            activities: "nasze-aktywnosci".to_owned(),
            projects: "nasze-projekty".to_owned(),
            contact: "kontakt-2".to_owned(),
            all_news: "aktualnosci".to_owned(),
        }
    }
}

/// Find the single entity carrying `slug`, whatever its kind.
///
/// # Errors
///
/// Returns `SiteError::MissingWellKnownEntity` if no entity matches and
/// `SiteError::DuplicateWellKnownEntity` if several do.
pub fn find_singleton<'a>(entities: &'a [Entity], slug: &str) -> Result<&'a Entity, SiteError> {
    let mut matches = entities.iter().filter(|entity| entity.slug() == Some(slug));
    let first = matches
        .next()
        .ok_or_else(|| SiteError::MissingWellKnownEntity(slug.to_owned()))?;

    let extra = matches.count();
    if extra > 0 {
        return Err(SiteError::DuplicateWellKnownEntity {
            slug: slug.to_owned(),
            count: extra + 1,
        });
    }
    Ok(first)
}

/// Targets of embedded blocks among the document's top-level children.
///
/// Entry and asset blocks are both included, in document order. Blocks
/// nested deeper are not.
#[must_use]
pub fn referenced_entries(document: &Document) -> Vec<&Link> {
    document
        .content
        .iter()
        .filter_map(|node| match node {
            Node::EmbeddedEntryBlock(target) | Node::EmbeddedAssetBlock(target) => Some(target),
            _ => None,
        })
        .collect()
}

/// Targets of top-level embedded entry blocks, in document order.
#[must_use]
pub fn embedded_entries(document: &Document) -> Vec<&Link> {
    document
        .content
        .iter()
        .filter_map(|node| match node {
            Node::EmbeddedEntryBlock(target) => Some(target),
            _ => None,
        })
        .collect()
}

/// Targets of top-level embedded asset blocks, in document order.
#[must_use]
pub fn embedded_assets(document: &Document) -> Vec<&Link> {
    document
        .content
        .iter()
        .filter_map(|node| match node {
            Node::EmbeddedAssetBlock(target) => Some(target),
            _ => None,
        })
        .collect()
}

/// Posts related to `entity`, newest first.
///
/// - project: posts whose `project` points at it
/// - activity: posts listing it among their `activities`
/// - the all-news page: every post
/// - anything else: none
///
/// The sort is stable: posts with equal dates keep collection order, and
/// undated posts come last.
#[must_use]
pub fn related_posts<'a>(
    entity: &Entity,
    entities: &'a [Entity],
    all_news_slug: &str,
) -> Vec<&'a Entity> {
    let mut related: Vec<&Entity> = match entity {
        Entity::Project(project) => posts(entities)
            .filter(|(_, post)| post.project.as_ref().is_some_and(|p| p.id() == project.id))
            .map(|(entity, _)| entity)
            .collect(),
        Entity::Activity(activity) => posts(entities)
            .filter(|(_, post)| post.activities.iter().any(|a| a.id() == activity.id))
            .map(|(entity, _)| entity)
            .collect(),
        _ if entity.slug() == Some(all_news_slug) => {
            posts(entities).map(|(entity, _)| entity).collect()
        }
        _ => Vec::new(),
    };

    related.sort_by(|a, b| newest_first(a.published_on(), b.published_on()));
    related
}

fn posts(entities: &[Entity]) -> impl Iterator<Item = (&Entity, &PostFields)> {
    entities.iter().filter_map(|entity| match entity {
        Entity::Post(post) => Some((entity, &post.fields)),
        _ => None,
    })
}

fn newest_first(a: Option<NaiveDate>, b: Option<NaiveDate>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
