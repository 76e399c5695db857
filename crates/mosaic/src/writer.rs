//! Static output writer.
//!
//! Renders `/` and every addressable path to `<out>/<path>/index.html`.
//! Routes render in parallel from one [`SiteState`](mosaic_site::SiteState),
//! each to its own result, so a failing page does not stop the others.

use std::fs;
use std::path::{Path, PathBuf};

use mosaic_site::{AssetSource, Site, SiteError, SiteState};
use rayon::prelude::*;

/// File written for every route.
const INDEX_FILENAME: &str = "index.html";

/// Local media manifest written next to the pages.
const ASSET_MANIFEST_FILENAME: &str = "assets.json";

/// Error writing a single route.
#[derive(Debug, thiserror::Error)]
pub(crate) enum WriteError {
    #[error("{0}")]
    Render(#[from] SiteError),

    #[error("Route escapes the output directory: {0}")]
    InvalidRoute(String),

    #[error("Failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize asset manifest: {0}")]
    Manifest(#[from] serde_json::Error),
}

/// Outcome of a build pass, in route order.
#[derive(Debug, Default)]
pub(crate) struct WriteReport {
    /// Files written.
    pub written: Vec<PathBuf>,
    /// Routes that failed, with their errors.
    pub failed: Vec<(String, WriteError)>,
}

impl WriteReport {
    /// Number of routes attempted.
    pub(crate) fn total(&self) -> usize {
        self.written.len() + self.failed.len()
    }
}

/// Map a route onto its output file.
///
/// `/` maps to `<out>/index.html`, `/a/b/` to `<out>/a/b/index.html`.
pub(crate) fn route_file(out_dir: &Path, route: &str) -> Result<PathBuf, WriteError> {
    if !route.starts_with('/') {
        return Err(WriteError::InvalidRoute(route.to_owned()));
    }

    let mut path = out_dir.to_path_buf();
    for segment in route.split('/').filter(|segment| !segment.is_empty()) {
        if segment == "." || segment == ".." || segment.contains('\\') {
            return Err(WriteError::InvalidRoute(route.to_owned()));
        }
        path.push(segment);
    }
    path.push(INDEX_FILENAME);
    Ok(path)
}

/// Render and write every route of the site's current state.
///
/// # Errors
///
/// Returns an error only if the output directory cannot be created. Route
/// failures are collected in the report.
pub(crate) fn write_site(site: &Site, out_dir: &Path) -> Result<WriteReport, std::io::Error> {
    fs::create_dir_all(out_dir)?;

    let state = site.state();
    let results: Vec<(String, Result<PathBuf, WriteError>)> = state
        .routes()
        .par_iter()
        .map(|route| (route.clone(), write_route(site, &state, out_dir, route)))
        .collect();

    let mut report = WriteReport::default();
    for (route, result) in results {
        match result {
            Ok(path) => report.written.push(path),
            Err(err) => {
                tracing::warn!(route = %route, error = %err, "Failed to build page");
                report.failed.push((route, err));
            }
        }
    }

    tracing::info!(
        written = report.written.len(),
        failed = report.failed.len(),
        "Build pass finished"
    );
    Ok(report)
}

fn write_route(
    site: &Site,
    state: &SiteState,
    out_dir: &Path,
    route: &str,
) -> Result<PathBuf, WriteError> {
    let file = route_file(out_dir, route)?;
    let html = site.render_document_in(state, route)?;

    if let Some(parent) = file.parent() {
        fs::create_dir_all(parent).map_err(|source| WriteError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    fs::write(&file, html).map_err(|source| WriteError::Io {
        path: file.clone(),
        source,
    })?;

    tracing::debug!(route, path = %file.display(), "Wrote page");
    Ok(file)
}

/// Write the local media manifest: each asset's local path and remote URL.
///
/// Downloading the files is left to external tooling.
pub(crate) fn write_asset_manifest(
    out_dir: &Path,
    assets: &[AssetSource],
) -> Result<PathBuf, WriteError> {
    let path = out_dir.join(ASSET_MANIFEST_FILENAME);
    let json = serde_json::to_string_pretty(assets)?;
    fs::write(&path, json).map_err(|source| WriteError::Io {
        path: path.clone(),
        source,
    })?;
    Ok(path)
}
