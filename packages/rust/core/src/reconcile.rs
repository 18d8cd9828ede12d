//! Compare OWNERS handles against repository collaborators and act on the gap.

use std::collections::HashSet;

use owners_github::Platform;
use owners_shared::{Collaborator, Permission, RepoRef};
use tracing::{error, info, warn};

use crate::scanner::HandleSet;

/// Footer heading printed after the bullet list.
const FOOTER_HEADING: &str = "For more details on having folks become part of the k8s GitHub org see:";

/// Handles present in `handles` with no collaborator of the same login.
///
/// Matching is exact unless `case_insensitive` is set, in which case ASCII
/// case is ignored. The result follows the iteration order of `handles`.
pub fn find_missing(
    handles: &HandleSet,
    collaborators: &[Collaborator],
    case_insensitive: bool,
) -> Vec<String> {
    let normalize = |login: &str| {
        if case_insensitive {
            login.to_ascii_lowercase()
        } else {
            login.to_string()
        }
    };

    let logins: HashSet<String> = collaborators
        .iter()
        .map(|c| normalize(c.login.as_str()))
        .collect();

    let missing: Vec<String> = handles
        .iter()
        .filter(|h| !logins.contains(&normalize(*h)))
        .map(str::to_string)
        .collect();

    for handle in &missing {
        warn!(handle = %handle, "login found in OWNERS but not a collaborator");
    }
    missing
}

/// One diagnostic line for a handle that is not a collaborator.
pub fn missing_line(handle: &str) -> String {
    format!("GitHub Login {handle:?} found in OWNERS but not a collaborator")
}

/// Render the copy/paste report: bullets plus the onboarding footer.
pub fn render_bullet_list(missing: &[String], onboarding_url: &str) -> String {
    let bullets: String = missing.iter().map(|h| format!("* {h}\n")).collect();
    format!("\nGitHub Logins as a list:\n{bullets}\n{FOOTER_HEADING}\n{onboarding_url}")
}

// ---------------------------------------------------------------------------
// Remediation
// ---------------------------------------------------------------------------

/// A single handle that could not be added.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddFailure {
    pub handle: String,
    pub reason: String,
}

impl AddFailure {
    /// Operator-facing line for this failure.
    pub fn line(&self) -> String {
        format!(
            "ERROR: Unable to add {:?} as collaborator: {}",
            self.handle, self.reason
        )
    }
}

/// Outcome of adding missing handles as collaborators.
#[derive(Debug, Clone, Default)]
pub struct RemediationReport {
    /// Handles whose add request succeeded.
    pub added: Vec<String>,
    /// Handles whose add request failed, with the reason.
    pub failed: Vec<AddFailure>,
}

impl RemediationReport {
    pub fn attempted(&self) -> usize {
        self.added.len() + self.failed.len()
    }
}

/// Add every handle in `missing` to `repo` with read-only access.
///
/// Exactly one request per handle. A failed request is recorded and the
/// remaining handles are still attempted.
pub async fn add_missing<P: Platform>(
    platform: &P,
    repo: &RepoRef,
    missing: &[String],
) -> RemediationReport {
    let mut report = RemediationReport::default();

    for handle in missing {
        match platform
            .add_collaborator(repo, handle, Permission::Pull)
            .await
        {
            Ok(()) => {
                info!(handle = %handle, %repo, "added pull collaborator");
                report.added.push(handle.clone());
            }
            Err(e) => {
                error!(handle = %handle, error = %e, "unable to add collaborator");
                report.failed.push(AddFailure {
                    handle: handle.clone(),
                    reason: e.to_string(),
                });
            }
        }
    }

    report
}
