//! Shared types, error model, and configuration for the OWNERS tools.
//!
//! This crate is the foundation depended on by all other crates in the workspace.
//! It provides:
//! - [`OwnersError`]: the unified error type
//! - Domain types ([`OwnersRecord`], [`Collaborator`], [`Maintainer`], [`RepoRef`])
//! - Configuration ([`AppConfig`], [`AuditConfig`], [`GenerateConfig`], credentials)
//! - Tracing setup for the binaries ([`init_tracing`])

pub mod config;
pub mod error;
pub mod logging;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AliasConfig, AppConfig, AuditConfig, AuditSettings, CredentialProvider, EnvCredentials,
    GenerateConfig, GithubConfig, RepositoryConfig, StaticCredentials, config_dir,
    config_file_path, load_config, load_config_from,
};
pub use error::{OwnersError, Result};
pub use logging::{LogFormat, default_directive, init_tracing};
pub use types::{
    ChartMetadata, Collaborator, Maintainer, OWNERS_FILE_NAME, OwnersRecord, Permission, RepoRef,
};
