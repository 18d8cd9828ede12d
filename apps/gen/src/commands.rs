//! CLI definition and the generate command.

use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::Result;
use owners_core::generate::{self, ProgressReporter};
use owners_github::GitHubClient;
use owners_shared::{
    AppConfig, EnvCredentials, GenerateConfig, LogFormat, load_config, load_config_from,
};
use tracing::info;

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// Generate an OWNERS file from Chart.yaml maintainers.
#[derive(Parser)]
#[command(
    name = "gen-owners",
    version,
    about = "Read a Chart.yaml file and generate an OWNERS file from its maintainers.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Location of the Chart.yaml file.
    #[arg(short = 'c', long, default_value = "Chart.yaml")]
    pub chart: PathBuf,

    /// Write the OWNERS file next to Chart.yaml.
    #[arg(short = 'o', long)]
    pub write_owners: bool,

    /// Append OWNERS to the chart's .helmignore.
    #[arg(short = 'i', long)]
    pub update_helmignore: bool,

    /// Handle the bitnami-bot by adding real people at Bitnami.
    #[arg(short = 'b', long)]
    pub bitnami: bool,

    /// Config file to use instead of ~/.owners-tools/owners.toml.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log format: text (default) or json.
    #[arg(long, default_value = "text")]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

// ---------------------------------------------------------------------------
// Progress
// ---------------------------------------------------------------------------

/// Prints each phase to stdout before the side effect runs.
struct PrintProgress;

impl ProgressReporter for PrintProgress {
    fn phase(&self, name: &str) {
        println!("{name}");
    }
}

// ---------------------------------------------------------------------------
// Command
// ---------------------------------------------------------------------------

/// Merge config file values with CLI flags.
fn generate_config(cli: Cli, app: &AppConfig) -> GenerateConfig {
    let mut config = GenerateConfig::from(app);
    config.chart_path = cli.chart;
    config.write_owners = cli.write_owners;
    config.update_helmignore = cli.update_helmignore;
    config.expand_alias = cli.bitnami;
    config
}

/// Generate, print, and optionally persist the OWNERS document.
pub(crate) async fn run(cli: Cli) -> Result<()> {
    let app = match &cli.config {
        Some(path) => load_config_from(path)?,
        None => load_config()?,
    };

    // The token is checked before any work is done
    let credentials = EnvCredentials::from(&app.github);
    let client = GitHubClient::new(&app.github, &credentials)?;

    let config = generate_config(cli, &app);
    info!(
        chart = %config.chart_path.display(),
        write_owners = config.write_owners,
        update_helmignore = config.update_helmignore,
        expand_alias = config.expand_alias,
        "generating OWNERS"
    );

    let generated = generate::build(&config, &client).await?;

    for resolved in &generated.resolved {
        println!("{}", resolved.describe());
    }

    println!("OWNERS file content:");
    println!("{}", generated.content);

    generate::persist(&config, &generated, &PrintProgress)?;

    Ok(())
}
