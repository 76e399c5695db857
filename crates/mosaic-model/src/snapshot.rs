//! Content snapshot loading.
//!
//! A snapshot is the content store's entries response as exported to JSON:
//!
//! ```json
//! {
//!   "items": [ ...entry records... ],
//!   "includes": { "Entry": [ ... ], "Asset": [ ... ] }
//! }
//! ```
//!
//! Link stubs (`{"sys": {"type": "Link", ...}}`) in an item's reference
//! fields and document tree are resolved against the records in `items` and
//! `includes`, following at most `include_depth` links along any chain.
//! Each record is built once per remaining depth and shared between every
//! link that reaches it there, so loading stays linear in
//! `records * include_depth` however densely the graph is linked. Records
//! that arrive already inlined are kept as is. Whatever remains a stub
//! afterwards is an unresolved reference.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use serde_json::Value;

use crate::entity::{Entity, EntityKind, classify};
use crate::link::{Link, LinkStub};

/// Default number of link levels inlined while loading.
pub const DEFAULT_INCLUDE_DEPTH: usize = 3;

/// Upper bound on link levels inlined while loading.
pub const MAX_INCLUDE_DEPTH: usize = 10;

/// Error returned when a snapshot cannot be loaded.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    /// I/O error reading the snapshot file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Snapshot is not valid JSON.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    /// JSON does not have the expected shape.
    #[error("Invalid snapshot: {0}")]
    Shape(String),
}

/// Immutable entity collection for one render pass.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Snapshot {
    entities: Vec<Entity>,
    assets: Vec<Entity>,
}

type RecordKey = (String, String);

impl Snapshot {
    /// Create a snapshot from already classified entities.
    ///
    /// `assets` is the media side table; non-asset entries in it are ignored.
    #[must_use]
    pub fn new(entities: Vec<Entity>, assets: Vec<Entity>) -> Self {
        let assets = assets
            .into_iter()
            .filter(|asset| asset.kind() == EntityKind::MediaAsset)
            .collect();
        Self { entities, assets }
    }

    /// Load a snapshot file.
    pub fn from_path(path: &Path, include_depth: usize) -> Result<Self, SnapshotError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text, include_depth)
    }

    /// Parse snapshot JSON, inline links and classify every item.
    ///
    /// Items outside the known kind set are dropped.
    pub fn from_json(text: &str, include_depth: usize) -> Result<Self, SnapshotError> {
        let root: Value = serde_json::from_str(text)?;
        let include_depth = include_depth.min(MAX_INCLUDE_DEPTH);

        let items = root
            .get("items")
            .and_then(Value::as_array)
            .ok_or_else(|| SnapshotError::Shape("missing `items` array".to_owned()))?;
        let included_entries = included(&root, "Entry")?;
        let included_assets = included(&root, "Asset")?;

        let mut resolver = Resolver::new(build_index(
            items
                .iter()
                .chain(included_entries)
                .chain(included_assets),
        ));

        let entities = items
            .iter()
            .filter_map(|item| resolver.load(item, include_depth))
            .collect();
        let assets = included_assets
            .iter()
            .filter_map(|item| resolver.load(item, include_depth))
            .filter(|entity| entity.kind() == EntityKind::MediaAsset)
            .collect();

        Ok(Self { entities, assets })
    }

    /// Entities in fetch order.
    #[must_use]
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    /// Media assets referenced anywhere in the graph.
    #[must_use]
    pub fn assets(&self) -> &[Entity] {
        &self.assets
    }
}

fn included<'a>(root: &'a Value, link_type: &str) -> Result<&'a [Value], SnapshotError> {
    match root.get("includes").and_then(|includes| includes.get(link_type)) {
        None | Some(Value::Null) => Ok(&[]),
        Some(Value::Array(records)) => Ok(records),
        Some(_) => Err(SnapshotError::Shape(format!(
            "`includes.{link_type}` is not an array"
        ))),
    }
}

fn build_index<'a>(records: impl Iterator<Item = &'a Value>) -> HashMap<RecordKey, &'a Value> {
    records
        .filter_map(|record| {
            let sys = record.get("sys")?;
            let link_type = sys.get("type")?.as_str()?;
            let id = sys.get("id")?.as_str()?;
            Some(((link_type.to_owned(), id.to_owned()), record))
        })
        .collect()
}

/// Builds entities with their links resolved to a bounded depth.
struct Resolver<'a> {
    index: HashMap<RecordKey, &'a Value>,
    /// Record targets already built, by key and remaining depth.
    built: HashMap<(RecordKey, usize), Option<Arc<Entity>>>,
}

impl<'a> Resolver<'a> {
    fn new(index: HashMap<RecordKey, &'a Value>) -> Self {
        Self {
            index,
            built: HashMap::new(),
        }
    }

    /// Classify `record` and resolve links up to `depth` levels below it.
    fn load(&mut self, record: &Value, depth: usize) -> Option<Entity> {
        if classify(record).is_none() {
            let id = record
                .pointer("/sys/id")
                .and_then(Value::as_str)
                .unwrap_or_default();
            tracing::debug!(id, "Skipping record of unknown kind");
            return None;
        }

        let mut entity = Entity::from_value(record.clone())?;
        if depth > 0 {
            entity.for_each_link_mut(&mut |link: &mut Link| {
                let target = link.stub().and_then(|stub| self.target(stub, depth - 1));
                if let Some(target) = target {
                    *link = Link::Resolved(target);
                }
            });
        }
        Some(entity)
    }

    fn target(&mut self, stub: &LinkStub, depth: usize) -> Option<Arc<Entity>> {
        let key = (stub.link_type.clone(), stub.id.clone());
        if let Some(built) = self.built.get(&(key.clone(), depth)) {
            return built.clone();
        }

        let record = *self.index.get(&key)?;
        let built = self.load(record, depth).map(Arc::new);
        self.built.insert((key, depth), built.clone());
        built
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::document::Node;
    use crate::media::MediaMode;

    fn snapshot_json() -> String {
        json!({
            "items": [
                {
                    "sys": {"id": "home", "type": "Entry", "contentType": {"sys": {"id": "staticPage"}}},
                    "fields": {
                        "title": "Start",
                        "slug": "indeks",
                        "content": {
                            "nodeType": "document",
                            "data": {},
                            "content": [
                                {"nodeType": "embedded-asset-block", "data": {"target": {"sys": {"type": "Link", "linkType": "Asset", "id": "logo"}}}, "content": []},
                                {"nodeType": "embedded-entry-block", "data": {"target": {"sys": {"type": "Link", "linkType": "Entry", "id": "act"}}}, "content": []},
                                {"nodeType": "embedded-entry-block", "data": {"target": {"sys": {"type": "Link", "linkType": "Entry", "id": "missing"}}}, "content": []}
                            ]
                        }
                    }
                },
                {
                    "sys": {"id": "act", "type": "Entry", "contentType": {"sys": {"id": "activity"}}},
                    "fields": {
                        "name": "Biegi",
                        "slug": "biegi",
                        "logo": {"sys": {"type": "Link", "linkType": "Asset", "id": "logo"}}
                    }
                },
                {
                    "sys": {"id": "banner", "type": "Entry", "contentType": {"sys": {"id": "banner"}}},
                    "fields": {}
                }
            ],
            "includes": {
                "Asset": [{
                    "sys": {"id": "logo", "type": "Asset"},
                    "fields": {
                        "title": "Logo",
                        "file": {"url": "//img.example.net/logo.png", "fileName": "logo.png", "contentType": "image/png"}
                    }
                }]
            }
        })
        .to_string()
    }

    #[test]
    fn test_from_json_classifies_and_drops_unknown() {
        let snapshot = Snapshot::from_json(&snapshot_json(), DEFAULT_INCLUDE_DEPTH).unwrap();

        let ids: Vec<&str> = snapshot.entities().iter().map(Entity::id).collect();
        assert_eq!(ids, vec!["home", "act"]);
        assert_eq!(snapshot.assets().len(), 1);
        assert_eq!(snapshot.assets()[0].id(), "logo");
    }

    #[test]
    fn test_from_json_inlines_links() {
        let snapshot = Snapshot::from_json(&snapshot_json(), DEFAULT_INCLUDE_DEPTH).unwrap();
        let body = snapshot.entities()[0].body().unwrap();

        let Node::EmbeddedAssetBlock(logo) = &body.content[0] else {
            panic!("expected asset block");
        };
        assert_eq!(
            logo.entity().and_then(|e| e.href(&MediaMode::Remote)).as_deref(),
            Some("//img.example.net/logo.png")
        );

        let Node::EmbeddedEntryBlock(activity) = &body.content[1] else {
            panic!("expected entry block");
        };
        let Some(Entity::Activity(activity)) = activity.entity() else {
            panic!("expected resolved activity");
        };
        assert!(activity.fields.logo.as_ref().is_some_and(|l| l.is_resolved()));

        let Node::EmbeddedEntryBlock(missing) = &body.content[2] else {
            panic!("expected entry block");
        };
        assert!(!missing.is_resolved());
        assert_eq!(missing.id(), "missing");
    }

    #[test]
    fn test_include_depth_bounds_inlining() {
        let snapshot = Snapshot::from_json(&snapshot_json(), 1).unwrap();
        let body = snapshot.entities()[0].body().unwrap();

        let Node::EmbeddedEntryBlock(activity) = &body.content[1] else {
            panic!("expected entry block");
        };
        let Some(Entity::Activity(activity)) = activity.entity() else {
            panic!("expected resolved activity");
        };
        // Second hop (activity -> logo) is beyond depth 1.
        assert!(activity.fields.logo.as_ref().is_some_and(|l| !l.is_resolved()));
    }

    #[test]
    fn test_include_depth_zero_keeps_stubs() {
        let snapshot = Snapshot::from_json(&snapshot_json(), 0).unwrap();
        let body = snapshot.entities()[0].body().unwrap();
        assert!(body.content.iter().all(|node| match node {
            Node::EmbeddedAssetBlock(link) | Node::EmbeddedEntryBlock(link) => !link.is_resolved(),
            _ => true,
        }));
    }

    #[test]
    fn test_self_reference_terminates() {
        let text = json!({
            "items": [{
                "sys": {"id": "loop", "type": "Entry", "contentType": {"sys": {"id": "staticPage"}}},
                "fields": {
                    "title": "Loop",
                    "slug": "loop",
                    "content": {
                        "nodeType": "document",
                        "content": [{"nodeType": "embedded-entry-block", "data": {"target": {"sys": {"type": "Link", "linkType": "Entry", "id": "loop"}}}}]
                    }
                }
            }]
        })
        .to_string();

        let snapshot = Snapshot::from_json(&text, MAX_INCLUDE_DEPTH + 5).unwrap();
        assert_eq!(snapshot.entities().len(), 1);
    }

    fn page(id: &str, links: &[&str]) -> serde_json::Value {
        let blocks: Vec<serde_json::Value> = links
            .iter()
            .map(|target| {
                json!({
                    "nodeType": "embedded-entry-block",
                    "data": {"target": {"sys": {"type": "Link", "linkType": "Entry", "id": target}}},
                    "content": []
                })
            })
            .collect();
        json!({
            "sys": {"id": id, "type": "Entry", "contentType": {"sys": {"id": "staticPage"}}},
            "fields": {
                "title": id,
                "slug": id,
                "content": {"nodeType": "document", "data": {}, "content": blocks}
            }
        })
    }

    fn first_link(entity: &Entity) -> &Link {
        let Node::EmbeddedEntryBlock(link) = &entity.body().unwrap().content[0] else {
            panic!("expected entry block");
        };
        link
    }

    #[test]
    fn test_densely_linked_graph_loads_at_max_depth() {
        let ids: Vec<String> = (0..8).map(|i| format!("page{i}")).collect();
        let items: Vec<serde_json::Value> = ids
            .iter()
            .map(|id| {
                let others: Vec<&str> = ids
                    .iter()
                    .filter(|other| *other != id)
                    .map(String::as_str)
                    .collect();
                page(id, &others)
            })
            .collect();
        let text = json!({"items": items}).to_string();

        let started = std::time::Instant::now();
        let snapshot = Snapshot::from_json(&text, MAX_INCLUDE_DEPTH).unwrap();
        assert!(
            started.elapsed() < std::time::Duration::from_secs(5),
            "loading took {:?}",
            started.elapsed()
        );

        let mut link = first_link(&snapshot.entities()[0]);
        for _ in 1..MAX_INCLUDE_DEPTH {
            link = first_link(link.entity().unwrap());
        }
        assert!(link.is_resolved());
        assert!(!first_link(link.entity().unwrap()).is_resolved());
    }

    #[test]
    fn test_links_to_same_record_share_target() {
        let text = json!({"items": [page("a", &["c"]), page("b", &["c"]), page("c", &[])]}).to_string();

        let snapshot = Snapshot::from_json(&text, 1).unwrap();

        let (Link::Resolved(from_a), Link::Resolved(from_b)) = (
            first_link(&snapshot.entities()[0]),
            first_link(&snapshot.entities()[1]),
        ) else {
            panic!("expected resolved links");
        };
        assert!(Arc::ptr_eq(from_a, from_b));
    }

    #[test]
    fn test_missing_items_is_shape_error() {
        let err = Snapshot::from_json(r#"{"includes": {}}"#, 1).unwrap_err();
        assert!(matches!(err, SnapshotError::Shape(_)));
    }

    #[test]
    fn test_invalid_json_is_json_error() {
        let err = Snapshot::from_json("{", 1).unwrap_err();
        assert!(matches!(err, SnapshotError::Json(_)));
    }

    #[test]
    fn test_from_path_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("snapshot.json");
        std::fs::write(&path, snapshot_json()).unwrap();

        let snapshot = Snapshot::from_path(&path, DEFAULT_INCLUDE_DEPTH).unwrap();
        assert_eq!(snapshot.entities().len(), 2);
    }

    #[test]
    fn test_from_path_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Snapshot::from_path(&dir.path().join("nope.json"), 1).unwrap_err();
        assert!(matches!(err, SnapshotError::Io(_)));
    }

    #[test]
    fn test_new_filters_non_assets_from_side_table() {
        let snapshot = Snapshot::from_json(&snapshot_json(), DEFAULT_INCLUDE_DEPTH).unwrap();
        let rebuilt = Snapshot::new(
            snapshot.entities().to_vec(),
            snapshot.entities().to_vec(),
        );
        assert!(rebuilt.assets().is_empty());
    }
}
