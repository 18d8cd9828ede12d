//! Application configuration for the OWNERS tools.
//!
//! User config lives at `~/.owners-tools/owners.toml`.
//! CLI flags override config file values, which override defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{OwnersError, Result};
use crate::types::RepoRef;

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "owners.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".owners-tools";

// ---------------------------------------------------------------------------
// Config structs (matching owners.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Collaboration platform endpoints and credentials.
    #[serde(default)]
    pub github: GithubConfig,

    /// Repository whose collaborators are audited.
    #[serde(default)]
    pub repository: RepositoryConfig,

    /// Audit report settings.
    #[serde(default)]
    pub audit: AuditSettings,

    /// Bot alias expansion used by the generator.
    #[serde(default)]
    pub alias: AliasConfig,
}

/// `[github]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GithubConfig {
    /// REST API base URL.
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Web base URL used for profile existence checks.
    #[serde(default = "default_web_url")]
    pub web_url: String,

    /// Name of the env var holding the API token (never store the token itself).
    #[serde(default = "default_token_env")]
    pub token_env: String,

    /// Per-request timeout.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Page size requested from paginated endpoints.
    #[serde(default = "default_per_page")]
    pub per_page: u32,
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            web_url: default_web_url(),
            token_env: default_token_env(),
            timeout_secs: default_timeout_secs(),
            per_page: default_per_page(),
        }
    }
}

fn default_api_url() -> String {
    "https://api.github.com".into()
}
fn default_web_url() -> String {
    "https://github.com".into()
}
fn default_token_env() -> String {
    "GITHUB_TOKEN".into()
}
fn default_timeout_secs() -> u64 {
    30
}
fn default_per_page() -> u32 {
    100
}

/// `[repository]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositoryConfig {
    #[serde(default = "default_org")]
    pub org: String,
    #[serde(default = "default_repo")]
    pub repo: String,
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        Self {
            org: default_org(),
            repo: default_repo(),
        }
    }
}

fn default_org() -> String {
    "kubernetes".into()
}
fn default_repo() -> String {
    "charts".into()
}

/// `[audit]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditSettings {
    /// Link printed in the footer of the bullet-list report.
    #[serde(default = "default_onboarding_url")]
    pub onboarding_url: String,

    /// Compare logins ignoring ASCII case.
    #[serde(default)]
    pub case_insensitive: bool,
}

impl Default for AuditSettings {
    fn default() -> Self {
        Self {
            onboarding_url: default_onboarding_url(),
            case_insensitive: false,
        }
    }
}

fn default_onboarding_url() -> String {
    "https://github.com/kubernetes/community/blob/master/community-membership.md#requirements-for-outside-collaborators".into()
}

/// `[alias]` section: a bot handle and the people it stands for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AliasConfig {
    /// Handle that triggers the expansion.
    #[serde(default = "default_bot")]
    pub bot: String,

    /// Handles appended when the bot is present.
    #[serde(default = "default_expands_to")]
    pub expands_to: Vec<String>,
}

impl Default for AliasConfig {
    fn default() -> Self {
        Self {
            bot: default_bot(),
            expands_to: default_expands_to(),
        }
    }
}

fn default_bot() -> String {
    "bitnami-bot".into()
}
fn default_expands_to() -> Vec<String> {
    vec!["prydonius".into(), "tompizmor".into(), "sameersbn".into()]
}

// ---------------------------------------------------------------------------
// Run configs (runtime, merged from config + CLI flags)
// ---------------------------------------------------------------------------

/// Runtime configuration for the audit tool.
#[derive(Debug, Clone)]
pub struct AuditConfig {
    /// Directory tree to scan for OWNERS files.
    pub root: PathBuf,
    /// Repository whose collaborators are compared.
    pub repo: RepoRef,
    /// Render the missing logins as a bullet list with the onboarding footer.
    pub bullet_list: bool,
    /// Add every missing login as a read-only collaborator.
    pub add_collaborators: bool,
    /// Compare logins ignoring ASCII case.
    pub case_insensitive: bool,
    /// Footer link for the bullet list.
    pub onboarding_url: String,
}

impl From<&AppConfig> for AuditConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            root: PathBuf::from("."),
            repo: RepoRef::new(&config.repository.org, &config.repository.repo),
            bullet_list: false,
            add_collaborators: false,
            case_insensitive: config.audit.case_insensitive,
            onboarding_url: config.audit.onboarding_url.clone(),
        }
    }
}

/// Runtime configuration for the generation tool.
#[derive(Debug, Clone)]
pub struct GenerateConfig {
    /// Path to the chart metadata file.
    pub chart_path: PathBuf,
    /// Write `OWNERS` next to the chart file.
    pub write_owners: bool,
    /// Append the OWNERS annotation to `.helmignore`.
    pub update_helmignore: bool,
    /// Expand the bot alias into its human handles.
    pub expand_alias: bool,
    pub alias: AliasConfig,
}

impl From<&AppConfig> for GenerateConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            chart_path: PathBuf::from("Chart.yaml"),
            write_owners: false,
            update_helmignore: false,
            expand_alias: false,
            alias: config.alias.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// Credentials
// ---------------------------------------------------------------------------

/// Supplies the platform API token.
pub trait CredentialProvider {
    /// Return a non-empty token or a [`OwnersError::Credential`].
    fn token(&self) -> Result<String>;
}

/// Reads the token from an environment variable.
#[derive(Debug, Clone)]
pub struct EnvCredentials {
    var: String,
}

impl EnvCredentials {
    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }
}

impl From<&GithubConfig> for EnvCredentials {
    fn from(config: &GithubConfig) -> Self {
        Self::new(&config.token_env)
    }
}

impl CredentialProvider for EnvCredentials {
    fn token(&self) -> Result<String> {
        match std::env::var(&self.var) {
            Ok(val) if !val.is_empty() => Ok(val),
            _ => Err(OwnersError::credential(format!(
                "please supply an environment variable named {} with a valid token",
                self.var
            ))),
        }
    }
}

/// A fixed token, for tests and embedding.
#[derive(Debug, Clone)]
pub struct StaticCredentials(pub String);

impl CredentialProvider for StaticCredentials {
    fn token(&self) -> Result<String> {
        if self.0.is_empty() {
            return Err(OwnersError::credential("empty token"));
        }
        Ok(self.0.clone())
    }
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.owners-tools/`).
pub fn config_dir() -> Result<PathBuf> {
    let home =
        dirs::home_dir().ok_or_else(|| OwnersError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.owners-tools/owners.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = match config_file_path() {
        Ok(path) => path,
        Err(e) => {
            tracing::debug!(error = %e, "no home directory, using defaults");
            return Ok(AppConfig::default());
        }
    };

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| OwnersError::io(path, e))?;

    toml::from_str(&content)
        .map_err(|e| OwnersError::config(format!("failed to parse {}: {e}", path.display())))
}
