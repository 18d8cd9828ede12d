//! CLI definition and the audit command.

use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::Result;
use owners_core::audit::run_audit;
use owners_github::GitHubClient;
use owners_shared::{
    AppConfig, AuditConfig, EnvCredentials, LogFormat, load_config, load_config_from,
};
use tracing::info;

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// Report OWNERS handles that are not collaborators on the repository.
#[derive(Parser)]
#[command(
    name = "audit-owners",
    version,
    about = "Find GitHub logins used in OWNERS files that are not repository collaborators.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// The location of the repo to start inspecting.
    #[arg(short = 'r', long, default_value = ".")]
    pub root: PathBuf,

    /// Create a bulleted list of GitHub names found for easy copy/paste.
    #[arg(short = 'b', long)]
    pub bullet_list: bool,

    /// Add missing names to the repo as pull-only collaborators (requires admin token).
    #[arg(short = 'a', long)]
    pub add_collaborators: bool,

    /// Organization owning the repository (overrides config).
    #[arg(long)]
    pub org: Option<String>,

    /// Repository name (overrides config).
    #[arg(long)]
    pub repo: Option<String>,

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
// Command
// ---------------------------------------------------------------------------

/// Merge config file values with CLI flags.
fn audit_config(cli: Cli, app: &AppConfig) -> AuditConfig {
    let mut config = AuditConfig::from(app);
    config.root = cli.root;
    config.bullet_list = cli.bullet_list;
    config.add_collaborators = cli.add_collaborators;
    if let Some(org) = cli.org {
        config.repo.org = org;
    }
    if let Some(repo) = cli.repo {
        config.repo.repo = repo;
    }
    config
}

/// Run the audit and print its report.
pub(crate) async fn run(cli: Cli) -> Result<()> {
    let app = match &cli.config {
        Some(path) => load_config_from(path)?,
        None => load_config()?,
    };

    // The token is checked before any work is done
    let credentials = EnvCredentials::from(&app.github);
    let client = GitHubClient::new(&app.github, &credentials)?;

    let config = audit_config(cli, &app);
    info!(
        root = %config.root.display(),
        repo = %config.repo,
        bullet_list = config.bullet_list,
        add_collaborators = config.add_collaborators,
        "auditing OWNERS files"
    );

    let result = run_audit(&config, &client).await?;

    for line in result.missing_lines() {
        println!("{line}");
    }

    if let Some(list) = &result.bullet_list {
        println!("{list}");
    }

    if let Some(remediation) = &result.remediation {
        for failure in &remediation.failed {
            println!("{}", failure.line());
        }
        info!(
            attempted = remediation.attempted(),
            added = remediation.added.len(),
            failed = remediation.failed.len(),
            "collaborator update finished"
        );
    }

    Ok(())
}
