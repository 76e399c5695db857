//! CLI error types.

use mosaic_config::ConfigError;
use mosaic_model::SnapshotError;
use mosaic_site::SiteError;

use crate::writer::WriteError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Snapshot(#[from] SnapshotError),

    #[error("{0}")]
    Site(#[from] SiteError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Write(#[from] WriteError),

    #[error("{0}")]
    Json(#[from] serde_json::Error),

    #[error("{failed} of {total} pages failed to build")]
    Incomplete { failed: usize, total: usize },
}
