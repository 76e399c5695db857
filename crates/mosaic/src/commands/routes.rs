//! `mosaic routes` command implementation.

use clap::Args;

use super::{CommonArgs, load_site};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the routes command.
#[derive(Args)]
pub(crate) struct RoutesArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// List local media paths with their remote URLs instead.
    #[arg(long)]
    assets: bool,

    /// Print the header navigation menu as JSON instead.
    #[arg(long, conflicts_with = "assets")]
    navigation: bool,
}

impl RoutesArgs {
    /// Execute the routes command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration or snapshot loading fails.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let config = self.common.load_config(None)?;
        let site = load_site(&config)?;

        if self.navigation {
            output.result(&serde_json::to_string_pretty(&site.navigation())?);
        } else if self.assets {
            for asset in site.asset_sources() {
                output.result(&format!("{}\t{}", asset.path, asset.url));
            }
        } else {
            for route in site.routes() {
                output.result(&route);
            }
        }
        Ok(())
    }
}
