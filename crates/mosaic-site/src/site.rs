//! Site state management and page rendering.
//!
//! [`Site`] holds the current [`SiteState`] and renders pages from it.
//!
//! # Thread Safety
//!
//! `Site` is designed for concurrent access:
//! - `state()` returns `Arc<SiteState>` with minimal locking (just Arc clone)
//! - `replace()` builds and validates the new state before swapping it in;
//!   readers holding the previous `Arc` keep a consistent view
//!
//! # Example
//!
//! ```
//! use mosaic_model::Snapshot;
//! use mosaic_site::{Site, SiteConfig};
//!
//! let site = Site::new(SiteConfig::default());
//! site.replace(Snapshot::default()).unwrap();
//! assert_eq!(site.routes(), vec!["/".to_owned()]);
//! ```

use std::sync::{Arc, RwLock};

use mosaic_model::{Entity, MediaMode, Snapshot};
use mosaic_renderer::DocumentRenderer;

use crate::error::SiteError;
use crate::page::{PageComposer, PageRenderResult};
use crate::resolver::{WellKnownSlugs, related_posts};
use crate::shell;
use crate::site_state::{AssetSource, Navigation, SiteState};

/// Text shown in the site header, footer and home page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SiteInfo {
    /// Site name; upper-cased in the header, footer and home title.
    pub name: String,
    /// Line under the site name.
    pub tagline: String,
    /// Heading of the home page and label of the first menu item.
    pub home_heading: String,
    /// Copyright notice preceding the site name in the footer.
    pub copyright: String,
    /// Path of the legal notice page.
    pub legal_path: String,
    /// Label of the legal notice link.
    pub legal_label: String,
    /// Stylesheet linked from every page.
    pub stylesheet: Option<String>,
    /// Module script loaded by every page.
    pub script: Option<String>,
}

impl Default for SiteInfo {
    fn default() -> Self {
        Self {
            name: "Stowarzyszenie Unicorns".to_owned(),
            tagline: "SPORT | KULTURA | ROZRYWKA".to_owned(),
            home_heading: "witaj na stronie".to_owned(),
            copyright: "© 2025".to_owned(),
            legal_path: "/nota-prawna/".to_owned(),
            legal_label: "NOTA PRAWNA".to_owned(),
            stylesheet: None,
            script: None,
        }
    }
}

/// Configuration for [`Site`].
#[derive(Clone, Debug, Default)]
pub struct SiteConfig {
    /// How media assets are addressed.
    pub media: MediaMode,
    /// Reserved slugs of the singleton pages.
    pub slugs: WellKnownSlugs,
    /// Header, footer and home page text.
    pub info: SiteInfo,
}

/// Content site: current snapshot state plus page rendering.
///
/// # Thread Safety
///
/// Uses an internal `RwLock<Arc<SiteState>>` for the current state snapshot.
/// The lock is held only to clone or swap the `Arc`, never while rendering.
pub struct Site {
    renderer: DocumentRenderer,
    slugs: WellKnownSlugs,
    info: SiteInfo,
    /// Current site state snapshot (atomically swappable).
    current_state: RwLock<Arc<SiteState>>,
}

impl Site {
    /// Create a site with no content.
    #[must_use]
    pub fn new(config: SiteConfig) -> Self {
        Self {
            renderer: DocumentRenderer::new(config.media),
            slugs: config.slugs,
            info: config.info,
            current_state: RwLock::new(Arc::new(SiteState::empty())),
        }
    }

    /// Create a site and load `snapshot` into it.
    ///
    /// # Errors
    ///
    /// Returns `SiteError::DuplicatePath` if the snapshot's paths collide.
    pub fn with_snapshot(config: SiteConfig, snapshot: Snapshot) -> Result<Self, SiteError> {
        let site = Self::new(config);
        site.replace(snapshot)?;
        Ok(site)
    }

    /// Replace the current content.
    ///
    /// The new state is fully built before the swap. On error the previous
    /// state stays current.
    ///
    /// # Errors
    ///
    /// Returns `SiteError::DuplicatePath` if the snapshot's paths collide.
    ///
    /// # Panics
    ///
    /// Panics if the internal `RwLock` is poisoned.
    pub fn replace(&self, snapshot: Snapshot) -> Result<(), SiteError> {
        let state = SiteState::build(snapshot, self.renderer.media(), &self.slugs)?;
        tracing::info!(routes = state.routes().len(), "Loaded site content");
        *self.current_state.write().unwrap() = Arc::new(state);
        Ok(())
    }

    /// Get current site state snapshot.
    ///
    /// # Panics
    ///
    /// Panics if the internal `RwLock` is poisoned.
    #[must_use]
    pub fn state(&self) -> Arc<SiteState> {
        self.current_state.read().unwrap().clone()
    }

    #[must_use]
    pub fn media(&self) -> &MediaMode {
        self.renderer.media()
    }

    /// `/` followed by every addressable path.
    #[must_use]
    pub fn routes(&self) -> Vec<String> {
        self.state().routes().to_vec()
    }

    /// Media assets a local build publishes.
    #[must_use]
    pub fn asset_sources(&self) -> Vec<AssetSource> {
        self.state().asset_sources()
    }

    /// Header navigation menu.
    #[must_use]
    pub fn navigation(&self) -> Navigation {
        self.state().navigation().clone()
    }

    /// Posts related to `entity`, newest first.
    #[must_use]
    pub fn related_posts(&self, entity: &Entity) -> Vec<Entity> {
        let state = self.state();
        related_posts(entity, state.entities(), &self.slugs.all_news)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Render an entity's page content: its article plus related posts.
    #[must_use]
    pub fn render_entity(&self, entity: &Entity) -> PageRenderResult {
        let state = self.state();
        self.composer(&state).entity_page(entity)
    }

    /// Render the page content for a path.
    ///
    /// # Errors
    ///
    /// Returns `SiteError::PageNotFound` if no entity is addressed by `path`.
    /// Returns `SiteError::MissingWellKnownEntity` or
    /// `SiteError::DuplicateWellKnownEntity` if the home page cannot locate
    /// its singletons.
    pub fn render_page(&self, path: &str) -> Result<PageRenderResult, SiteError> {
        let state = self.state();
        self.composer(&state).render(path)
    }

    /// Render a complete HTML document for a path.
    ///
    /// # Errors
    ///
    /// Same as [`render_page`](Self::render_page).
    pub fn render_document(&self, path: &str) -> Result<String, SiteError> {
        self.render_document_in(&self.state(), path)
    }

    /// Render a complete HTML document for a path from a given state.
    ///
    /// A build pass takes [`state`](Self::state) once and renders every
    /// route from it, so all pages see the same content.
    ///
    /// # Errors
    ///
    /// Same as [`render_page`](Self::render_page).
    pub fn render_document_in(&self, state: &SiteState, path: &str) -> Result<String, SiteError> {
        let page = self.composer(state).render(path)?;
        Ok(shell::render_document(&page, state.navigation(), &self.info))
    }

    fn composer<'a>(&'a self, state: &'a SiteState) -> PageComposer<'a> {
        PageComposer {
            state,
            renderer: &self.renderer,
            slugs: &self.slugs,
            info: &self.info,
        }
    }
}
