//! CLI command implementations.

pub(crate) mod build;
pub(crate) mod routes;

use std::path::PathBuf;

use clap::Args;
use mosaic_config::{CliSettings, Config};
use mosaic_model::{MediaMode, Snapshot};
use mosaic_site::{Site, SiteConfig, SiteInfo, WellKnownSlugs};

use crate::error::CliError;

pub(crate) use build::BuildArgs;
pub(crate) use routes::RoutesArgs;

/// Arguments shared by every command.
#[derive(Args)]
pub(crate) struct CommonArgs {
    /// Path to configuration file (default: auto-discover mosaic.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Content snapshot JSON file (overrides config).
    #[arg(short, long, env = "MOSAIC_SNAPSHOT")]
    snapshot: Option<PathBuf>,

    /// Link levels inlined from the snapshot's includes (overrides config).
    #[arg(long)]
    include_depth: Option<usize>,

    /// Address media assets under the output root.
    #[arg(long)]
    local_media: bool,

    /// Address media assets at the content store.
    #[arg(long, conflicts_with = "local_media")]
    remote_media: bool,

    /// Enable verbose output (show build progress logs).
    #[arg(short, long)]
    pub verbose: bool,
}

impl CommonArgs {
    /// Load configuration with these arguments applied on top.
    pub(crate) fn load_config(&self, output_dir: Option<PathBuf>) -> Result<Config, CliError> {
        let cli_settings = CliSettings {
            snapshot: self.snapshot.clone(),
            output_dir,
            local_media: self.resolve_local_media(),
            include_depth: self.include_depth,
        };
        Ok(Config::load(self.config.as_deref(), Some(&cli_settings))?)
    }

    fn resolve_local_media(&self) -> Option<bool> {
        if self.local_media {
            Some(true)
        } else if self.remote_media {
            Some(false)
        } else {
            None
        }
    }
}

/// Load the configured snapshot into a new site.
pub(crate) fn load_site(config: &Config) -> Result<Site, CliError> {
    let content = &config.content_resolved;
    let snapshot = Snapshot::from_path(&content.snapshot, content.include_depth)?;
    tracing::info!(
        snapshot = %content.snapshot.display(),
        entities = snapshot.entities().len(),
        assets = snapshot.assets().len(),
        "Loaded snapshot"
    );
    Ok(Site::with_snapshot(site_config_from_config(config), snapshot)?)
}

/// Map loaded configuration onto site settings.
///
/// Unset text and slug fields keep the site defaults.
pub(crate) fn site_config_from_config(config: &Config) -> SiteConfig {
    let media = if config.media.local {
        MediaMode::Local {
            output_prefix: config.media.output_prefix.clone(),
        }
    } else {
        MediaMode::Remote
    };

    let defaults = SiteInfo::default();
    let text = &config.site;
    let info = SiteInfo {
        name: text.name.clone().unwrap_or(defaults.name),
        tagline: text.tagline.clone().unwrap_or(defaults.tagline),
        home_heading: text.home_heading.clone().unwrap_or(defaults.home_heading),
        copyright: text.copyright.clone().unwrap_or(defaults.copyright),
        legal_path: text.legal_path.clone().unwrap_or(defaults.legal_path),
        legal_label: text.legal_label.clone().unwrap_or(defaults.legal_label),
        stylesheet: text.stylesheet.clone().or(defaults.stylesheet),
        script: text.script.clone().or(defaults.script),
    };

    let default_slugs = WellKnownSlugs::default();
    let overrides = &config.slugs;
    let slugs = WellKnownSlugs {
        home: overrides.home.clone().unwrap_or(default_slugs.home),
        activities: overrides.activities.clone().unwrap_or(default_slugs.activities),
        projects: overrides.projects.clone().unwrap_or(default_slugs.projects),
        contact: overrides.contact.clone().unwrap_or(default_slugs.contact),
        all_news: overrides.all_news.clone().unwrap_or(default_slugs.all_news),
    };

    SiteConfig { media, slugs, info }
}
