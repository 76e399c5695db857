//! Site state for one content snapshot.
//!
//! [`SiteState`] is the immutable, validated view of a snapshot that a
//! render pass reads from:
//! - O(1) path lookups via the `path_index` `HashMap`
//! - the route list in collection order
//! - the header navigation menu, computed once per snapshot

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use mosaic_model::{Entity, EntityKind, Link, MediaMode, Snapshot};
use serde::Serialize;

use crate::error::SiteError;
use crate::resolver::{WellKnownSlugs, embedded_entries, find_singleton};

/// Navigation item with children for the header menu.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NavItem {
    /// Display title.
    pub title: String,
    /// Link target path.
    pub path: String,
    /// Slug of the target, used to key the menu entry.
    pub slug: String,
    /// Sub-menu items.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NavItem>,
}

/// Header navigation menu.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Navigation {
    /// Top-level items, in home page order.
    pub items: Vec<NavItem>,
}

/// A media asset served from the output root.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AssetSource {
    /// Local path (`/assets/{id}/{file_name}`).
    pub path: String,
    /// Remote URL the asset is published at.
    pub url: String,
}

/// Validated, immutable site state.
///
/// Built once per snapshot; rendering only reads from it.
#[derive(Debug)]
pub struct SiteState {
    snapshot: Snapshot,
    path_index: HashMap<String, usize>,
    routes: Vec<String>,
    navigation: Navigation,
}

impl SiteState {
    /// State with no content; only `/` is routed.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            snapshot: Snapshot::default(),
            path_index: HashMap::new(),
            routes: vec!["/".to_owned()],
            navigation: Navigation::default(),
        }
    }

    /// Build the site state for a snapshot.
    ///
    /// Every non-asset entity with a canonical path enters the path index.
    ///
    /// # Errors
    ///
    /// Returns `SiteError::InvalidPath` if a path has empty, `.` or `..`
    /// segments (an empty slug, or one containing `/`), and
    /// `SiteError::DuplicatePath` if two entities derive the same path.
    pub fn build(
        snapshot: Snapshot,
        media: &MediaMode,
        slugs: &WellKnownSlugs,
    ) -> Result<Self, SiteError> {
        let mut path_index: HashMap<String, usize> = HashMap::new();
        let mut routes = vec!["/".to_owned()];

        for (idx, entity) in snapshot.entities().iter().enumerate() {
            if entity.kind() == EntityKind::MediaAsset {
                continue;
            }
            let Some(path) = entity.href(media) else {
                continue;
            };
            if !is_page_path(&path) {
                return Err(SiteError::InvalidPath {
                    path,
                    id: entity.id().to_owned(),
                });
            }
            match path_index.entry(path) {
                Entry::Occupied(existing) => {
                    return Err(SiteError::DuplicatePath {
                        path: existing.key().clone(),
                        first: snapshot.entities()[*existing.get()].id().to_owned(),
                        second: entity.id().to_owned(),
                    });
                }
                Entry::Vacant(slot) => {
                    routes.push(slot.key().clone());
                    slot.insert(idx);
                }
            }
        }

        let navigation = build_navigation(snapshot.entities(), media, slugs);

        Ok(Self {
            snapshot,
            path_index,
            routes,
            navigation,
        })
    }

    /// Entity addressed by `path`.
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&Entity> {
        self.path_index
            .get(path)
            .map(|&idx| &self.snapshot.entities()[idx])
    }

    /// All entities in collection order.
    #[must_use]
    pub fn entities(&self) -> &[Entity] {
        self.snapshot.entities()
    }

    /// `/` followed by every indexed path, in collection order.
    #[must_use]
    pub fn routes(&self) -> &[String] {
        &self.routes
    }

    #[must_use]
    pub fn navigation(&self) -> &Navigation {
        &self.navigation
    }

    /// Media assets that a local build publishes, with their remote URLs.
    #[must_use]
    pub fn asset_sources(&self) -> Vec<AssetSource> {
        let local = MediaMode::local();
        self.snapshot
            .assets()
            .iter()
            .filter_map(|asset| {
                Some(AssetSource {
                    path: asset.href(&local)?,
                    url: asset.href(&MediaMode::Remote)?,
                })
            })
            .collect()
    }
}

/// Returns true if `path` is `/segment/.../` with only non-empty segments
/// other than `.` and `..`.
///
/// Such paths map one-to-one onto output directories, so distinct paths never
/// share an `index.html`, and none of them can stand for `/`.
fn is_page_path(path: &str) -> bool {
    let Some(inner) = path.strip_prefix('/').and_then(|p| p.strip_suffix('/')) else {
        return false;
    };
    !inner.is_empty()
        && inner.split('/').all(|segment| {
            !segment.is_empty() && segment != "." && segment != ".." && !segment.contains('\\')
        })
}

/// Build the header menu from the home page's index links.
///
/// Links to the activities or projects index get a sub-menu built from that
/// page's own embedded entries. A missing home page yields an empty menu.
fn build_navigation(entities: &[Entity], media: &MediaMode, slugs: &WellKnownSlugs) -> Navigation {
    let home = match find_singleton(entities, &slugs.home) {
        Ok(home) => home,
        Err(e) => {
            tracing::warn!(error = %e, "Navigation menu is empty");
            return Navigation::default();
        }
    };

    let items = linked_entities(home)
        .into_iter()
        .filter_map(|target| {
            let slug = target.slug()?;
            let children = if slug == slugs.activities || slug == slugs.projects {
                sub_menu(entities, slug, media)
            } else {
                Vec::new()
            };
            nav_item(target, media, children)
        })
        .collect();

    Navigation { items }
}

fn sub_menu(entities: &[Entity], slug: &str, media: &MediaMode) -> Vec<NavItem> {
    match find_singleton(entities, slug) {
        Ok(index) => linked_entities(index)
            .into_iter()
            .filter_map(|target| nav_item(target, media, Vec::new()))
            .collect(),
        Err(e) => {
            tracing::warn!(error = %e, "Sub-menu is empty");
            Vec::new()
        }
    }
}

/// Resolved targets of an entity's top-level entry blocks.
fn linked_entities(entity: &Entity) -> Vec<&Entity> {
    entity
        .body()
        .map(embedded_entries)
        .unwrap_or_default()
        .into_iter()
        .filter_map(Link::entity)
        .collect()
}

fn nav_item(target: &Entity, media: &MediaMode, children: Vec<NavItem>) -> Option<NavItem> {
    Some(NavItem {
        title: target.title().unwrap_or_default().to_owned(),
        path: target.href(media)?,
        slug: target.slug().unwrap_or_default().to_owned(),
        children,
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::fixtures::{
        activity, all_news_page, asset, contact, entity, post, project, site_snapshot, static_page,
    };

    fn build(entities: Vec<serde_json::Value>) -> Result<SiteState, SiteError> {
        let snapshot = Snapshot::new(entities.into_iter().map(entity).collect(), Vec::new());
        SiteState::build(snapshot, &MediaMode::Remote, &WellKnownSlugs::default())
    }

    #[test]
    fn test_path_index_lookup() {
        let state = build(vec![
            static_page("s1", "o-nas", "O nas", vec![]),
            project("p1", "oboz", "Obóz"),
        ])
        .unwrap();

        assert_eq!(state.get("/o-nas/").map(Entity::id), Some("s1"));
        assert_eq!(state.get("/category/oboz/").map(Entity::id), Some("p1"));
        assert!(state.get("/oboz/").is_none());
        assert!(state.get("/").is_none());
    }

    #[test]
    fn test_path_index_is_unique_and_reversible() {
        let values = vec![
            static_page("s1", "o-nas", "O nas", vec![]),
            all_news_page("n1", "aktualnosci", "Aktualności"),
            activity("a1", "biegi", "Biegi", None),
            project("p1", "oboz", "Obóz"),
            project("p2", "biegi", "Biegi projekt"),
            post("x1", "relacja", "Relacja", None, None, &[]),
        ];
        let count = values.len();

        let state = build(values).unwrap();

        assert_eq!(state.path_index.len(), count);
        for entity in state.entities() {
            let path = entity.href(&MediaMode::Remote).unwrap();
            assert_eq!(state.get(&path).map(Entity::id), Some(entity.id()));
        }
    }

    #[test]
    fn test_duplicate_path_fails() {
        let err = build(vec![
            static_page("s1", "biegi", "Biegi", vec![]),
            activity("a1", "biegi", "Biegi", None),
        ])
        .unwrap_err();

        assert!(matches!(
            err,
            SiteError::DuplicatePath { ref path, ref first, ref second }
                if path == "/biegi/" && first == "s1" && second == "a1"
        ));
    }

    #[test]
    fn test_slugs_that_alias_another_output_file_fail() {
        for slug in ["", "onas/", "/onas", "a//b", "..", "a/./b"] {
            let err = build(vec![
                static_page("s1", "onas", "O nas", vec![]),
                static_page("s2", slug, "Alias", vec![]),
            ])
            .unwrap_err();

            assert!(
                matches!(&err, SiteError::InvalidPath { id, .. } if id == "s2"),
                "slug {slug:?}: {err:?}"
            );
        }
    }

    #[test]
    fn test_nested_slug_is_a_page_path() {
        let state = build(vec![static_page("s1", "klub/historia", "Historia", vec![])]).unwrap();

        assert_eq!(state.routes(), ["/", "/klub/historia/"]);
    }

    #[test]
    fn test_contact_methods_and_assets_are_not_routed() {
        let state = build(vec![
            contact("c1", "facebook", "https://fb", asset("i", "I", "image/png"), None),
            asset("m1", "Plakat", "image/png"),
            static_page("s1", "o-nas", "O nas", vec![]),
        ])
        .unwrap();

        assert_eq!(state.routes(), ["/", "/o-nas/"]);
    }

    #[test]
    fn test_routes_in_collection_order() {
        let state = build(vec![
            post("x1", "relacja", "Relacja", None, None, &[]),
            project("p1", "oboz", "Obóz"),
            static_page("s1", "o-nas", "O nas", vec![]),
        ])
        .unwrap();

        assert_eq!(
            state.routes(),
            ["/", "/relacja/", "/category/oboz/", "/o-nas/"]
        );
    }

    #[test]
    fn test_navigation_from_home_index_links() {
        let state = SiteState::build(
            site_snapshot(),
            &MediaMode::Remote,
            &WellKnownSlugs::default(),
        )
        .unwrap();

        let leaf = |title: &str, path: &str, slug: &str| NavItem {
            title: title.to_owned(),
            path: path.to_owned(),
            slug: slug.to_owned(),
            children: Vec::new(),
        };

        assert_eq!(
            state.navigation().items,
            vec![
                NavItem {
                    children: vec![leaf("Biegi", "/biegi/", "biegi")],
                    ..leaf("Nasze aktywności", "/nasze-aktywnosci/", "nasze-aktywnosci")
                },
                NavItem {
                    children: vec![leaf("Obóz", "/category/oboz/", "oboz")],
                    ..leaf("Nasze projekty", "/nasze-projekty/", "nasze-projekty")
                },
                leaf("Aktualności", "/category/aktualnosci/", "aktualnosci"),
            ]
        );
    }

    #[test]
    fn test_navigation_empty_without_home() {
        let state = build(vec![static_page("s1", "o-nas", "O nas", vec![])]).unwrap();

        assert_eq!(state.navigation(), &Navigation::default());
    }

    #[test]
    fn test_navigation_serializes_without_empty_children() {
        let item = NavItem {
            title: "Kontakt".to_owned(),
            path: "/kontakt-2/".to_owned(),
            slug: "kontakt-2".to_owned(),
            children: Vec::new(),
        };

        let json = serde_json::to_value(&item).unwrap();

        assert_eq!(
            json,
            serde_json::json!({"title": "Kontakt", "path": "/kontakt-2/", "slug": "kontakt-2"})
        );
    }

    #[test]
    fn test_asset_sources() {
        let state = SiteState::build(
            site_snapshot(),
            &MediaMode::Remote,
            &WellKnownSlugs::default(),
        )
        .unwrap();

        assert_eq!(
            state.asset_sources(),
            vec![AssetSource {
                path: "/assets/logo/logo.png".to_owned(),
                url: "//img.example.net/logo/logo.png".to_owned(),
            }]
        );
    }
}
