//! Content graph resolution and page composition for Mosaic.
//!
//! This crate provides:
//! - [`Site`]: current snapshot state plus page rendering
//! - [`SiteState`]: validated path index, routes and navigation menu
//! - relationship helpers: [`find_singleton`], [`referenced_entries`],
//!   [`related_posts`]
//!
//! # Quick Start
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use std::path::Path;
//! use mosaic_model::{DEFAULT_INCLUDE_DEPTH, Snapshot};
//! use mosaic_site::{Site, SiteConfig};
//!
//! let snapshot = Snapshot::from_path(Path::new("content.json"), DEFAULT_INCLUDE_DEPTH)?;
//! let site = Site::with_snapshot(SiteConfig::default(), snapshot)?;
//!
//! for path in site.routes() {
//!     let html = site.render_document(&path)?;
//!     println!("{path}: {} bytes", html.len());
//! }
//! # Ok(())
//! # }
//! ```

mod error;
#[cfg(test)]
mod fixtures;
mod page;
mod resolver;
mod shell;
mod site;
mod site_state;

pub use error::SiteError;
pub use page::{PageRenderResult, format_polish_date};
pub use resolver::{
    WellKnownSlugs, embedded_assets, embedded_entries, find_singleton, referenced_entries,
    related_posts,
};
pub use site::{Site, SiteConfig, SiteInfo};
pub use site_state::{AssetSource, NavItem, Navigation, SiteState};
