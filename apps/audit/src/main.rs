//! audit-owners: find OWNERS handles that are not repository collaborators.
//!
//! Walks a tree of OWNERS files, compares every handle against the
//! repository's collaborator list, and optionally prints a copy/paste list or
//! adds the missing handles with read-only access.

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
