//! Entity model for Mosaic content snapshots.
//!
//! This crate turns untyped content-store records into a closed set of
//! [`Entity`] kinds and exposes the attributes every other layer derives
//! from them:
//!
//! - [`classify`]: single-pass discriminator check on a raw record
//! - [`Entity::title`], [`Entity::href`], [`Entity::media_src`],
//!   [`Entity::published_on`]: per-kind derived attributes
//! - [`Document`] / [`Node`]: the typed rich-text tree attached to entity bodies
//! - [`Snapshot`]: a loaded entity collection plus its media side table
//!
//! # Example
//!
//! ```
//! use mosaic_model::{Entity, EntityKind, MediaMode};
//! use serde_json::json;
//!
//! let record = json!({
//!     "sys": {"id": "p1", "type": "Entry", "contentType": {"sys": {"id": "project"}}},
//!     "fields": {"name": "Summer Camp", "slug": "summer-camp"}
//! });
//!
//! let entity = Entity::from_value(record).unwrap();
//! assert_eq!(entity.kind(), EntityKind::Project);
//! assert_eq!(entity.href(&MediaMode::Remote).as_deref(), Some("/category/summer-camp/"));
//! ```

mod document;
mod entity;
mod link;
mod media;
mod snapshot;

pub use document::{Document, Mark, Node, Text};
pub use entity::{
    ActivityFields, AllNewsIndexFields, AssetFile, ContactMethodFields, Entity, EntityKind,
    MediaAssetFields, PostFields, ProjectFields, Record, StaticPageFields, classify,
};
pub use link::{Link, LinkStub};
pub use media::MediaMode;
pub use snapshot::{DEFAULT_INCLUDE_DEPTH, MAX_INCLUDE_DEPTH, Snapshot, SnapshotError};
