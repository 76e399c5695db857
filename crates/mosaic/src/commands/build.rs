//! `mosaic build` command implementation.

use std::path::PathBuf;

use clap::Args;

use super::{CommonArgs, load_site};
use crate::error::CliError;
use crate::output::Output;
use crate::writer;

/// Arguments for the build command.
#[derive(Args)]
pub(crate) struct BuildArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Output directory for the generated pages (overrides config).
    #[arg(short, long)]
    output_dir: Option<PathBuf>,
}

impl BuildArgs {
    /// Execute the build command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration or snapshot loading fails, or if
    /// any page fails to render or write.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let config = self.common.load_config(self.output_dir)?;
        let out_dir = &config.output_resolved.dir;

        output.heading("Building site");
        output.progress(&format!(
            "Snapshot: {}",
            config.content_resolved.snapshot.display()
        ));
        output.progress(&format!("Output: {}", out_dir.display()));

        let site = load_site(&config)?;
        let report = writer::write_site(&site, out_dir)?;

        if config.media.local {
            let assets = site.asset_sources();
            let manifest = writer::write_asset_manifest(out_dir, &assets)?;
            output.progress(&format!(
                "Media: {} local assets listed in {}",
                assets.len(),
                manifest.display()
            ));
        }

        for (route, err) in &report.failed {
            output.warn(&format!("{route}: {err}"));
        }
        if !report.failed.is_empty() {
            return Err(CliError::Incomplete {
                failed: report.failed.len(),
                total: report.total(),
            });
        }

        output.done(&format!(
            "Built {} pages to {}",
            report.written.len(),
            out_dir.display()
        ));
        Ok(())
    }
}
