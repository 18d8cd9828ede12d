//! End-to-end audit pipeline: tree → handles → collaborators → missing → report/remediation.

use owners_github::Platform;
use owners_shared::{AuditConfig, Result};
use tracing::{info, instrument};

use crate::reconcile::{self, RemediationReport};
use crate::scanner::{self, HandleSet};

/// Result of the audit pipeline.
#[derive(Debug)]
pub struct AuditResult {
    /// Every handle named in an OWNERS file.
    pub handles: HandleSet,
    /// Number of collaborators the repository has.
    pub collaborator_count: usize,
    /// Handles that are not collaborators.
    pub missing: Vec<String>,
    /// Bullet list report, when requested.
    pub bullet_list: Option<String>,
    /// Add-collaborator outcomes, when requested.
    pub remediation: Option<RemediationReport>,
}

impl AuditResult {
    /// One diagnostic line per missing handle.
    pub fn missing_lines(&self) -> impl Iterator<Item = String> + '_ {
        self.missing.iter().map(|h| reconcile::missing_line(h))
    }
}

/// Run the audit.
///
/// 1. Scan the tree for OWNERS files (fatal on any error)
/// 2. Fetch every collaborator (fatal on any error)
/// 3. Compute the missing handles
/// 4. Optionally render the bullet list
/// 5. Optionally add missing handles as pull collaborators (per-handle failures tolerated)
#[instrument(skip_all, fields(root = %config.root.display(), repo = %config.repo))]
pub async fn run_audit<P: Platform>(config: &AuditConfig, platform: &P) -> Result<AuditResult> {
    let handles = scanner::scan_tree(&config.root)?;

    let collaborators = platform.list_collaborators(&config.repo).await?;

    let missing = reconcile::find_missing(&handles, &collaborators, config.case_insensitive);
    info!(
        handles = handles.len(),
        collaborators = collaborators.len(),
        missing = missing.len(),
        "reconciled OWNERS against collaborators"
    );

    let bullet_list = config
        .bullet_list
        .then(|| reconcile::render_bullet_list(&missing, &config.onboarding_url));

    let remediation = if config.add_collaborators {
        Some(reconcile::add_missing(platform, &config.repo, &missing).await)
    } else {
        None
    };

    Ok(AuditResult {
        handles,
        collaborator_count: collaborators.len(),
        missing,
        bullet_list,
        remediation,
    })
}
