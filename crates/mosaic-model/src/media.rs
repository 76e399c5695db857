//! Media addressing mode.

/// Prefix under which locally served assets are published.
const DEFAULT_OUTPUT_PREFIX: &str = "/generated";

/// How media assets are addressed in rendered output.
///
/// Remote mode links straight to the content store's asset URL. Local mode
/// addresses assets as `/assets/{id}/{file_name}` and rewrites media sources
/// under `output_prefix`, so a build can serve downloaded copies while using
/// the same path scheme.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum MediaMode {
    /// Link to the content store's URL.
    #[default]
    Remote,
    /// Serve downloaded copies from the output root.
    Local {
        /// Prefix prepended to local `/assets/...` paths in media sources.
        output_prefix: String,
    },
}

impl MediaMode {
    /// Local mode with the default `/generated` output prefix.
    #[must_use]
    pub fn local() -> Self {
        Self::Local {
            output_prefix: DEFAULT_OUTPUT_PREFIX.to_owned(),
        }
    }

    /// Returns true when assets are served from the output root.
    #[must_use]
    pub fn is_local(&self) -> bool {
        matches!(self, Self::Local { .. })
    }

    /// Rewrite an href into a media source.
    ///
    /// Only local `/assets/...` paths are rewritten; anything else is
    /// returned unchanged.
    #[must_use]
    pub fn rewrite_src(&self, href: String) -> String {
        match self {
            Self::Local { output_prefix } if href.starts_with("/assets/") => {
                format!("{}{href}", output_prefix.trim_end_matches('/'))
            }
            _ => href,
        }
    }
}
