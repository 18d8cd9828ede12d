//! gen-owners: generate an OWNERS file from a chart's maintainers.
//!
//! Reads `Chart.yaml`, maps each maintainer to a GitHub login, prints the
//! resulting OWNERS document, and optionally writes it next to the chart.

mod commands;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    owners_shared::init_tracing(cli.verbose, cli.log_format, env!("CARGO_CRATE_NAME"));
    commands::run(cli).await
}
