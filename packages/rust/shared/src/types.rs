//! Core domain types shared by the audit and generation tools.

use serde::{Deserialize, Serialize};

/// File name of the marker file listing approvers and reviewers.
pub const OWNERS_FILE_NAME: &str = "OWNERS";

// ---------------------------------------------------------------------------
// OwnersRecord
// ---------------------------------------------------------------------------

/// The portions of an `OWNERS` file this tooling works with.
///
/// Duplicates are allowed; the audit pipeline deduplicates downstream.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnersRecord {
    /// Handles allowed to approve changes.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub approvers: Vec<String>,
    /// Handles asked to review changes.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub reviewers: Vec<String>,
}

impl OwnersRecord {
    /// Append `handle` as both approver and reviewer.
    pub fn push_owner(&mut self, handle: &str) {
        self.approvers.push(handle.to_string());
        self.reviewers.push(handle.to_string());
    }

    /// Iterate every handle mentioned in either list.
    pub fn handles(&self) -> impl Iterator<Item = &str> {
        self.approvers
            .iter()
            .chain(self.reviewers.iter())
            .map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.approvers.is_empty() && self.reviewers.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Platform identities
// ---------------------------------------------------------------------------

/// A repository collaborator as returned by the platform. Only the login is consulted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collaborator {
    pub login: String,
}

/// An `org/repo` pair identifying the repository being audited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoRef {
    pub org: String,
    pub repo: String,
}

impl RepoRef {
    pub fn new(org: impl Into<String>, repo: impl Into<String>) -> Self {
        Self {
            org: org.into(),
            repo: repo.into(),
        }
    }
}

impl std::fmt::Display for RepoRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.org, self.repo)
    }
}

/// Permission level granted when adding a collaborator. Only read-only
/// access is ever granted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    Pull,
}

impl Permission {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pull => "pull",
        }
    }
}

// ---------------------------------------------------------------------------
// Chart metadata
// ---------------------------------------------------------------------------

/// The subset of a `Chart.yaml` document the generator reads.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChartMetadata {
    /// Chart name.
    #[serde(default)]
    pub name: Option<String>,
    /// Maintainers, in document order.
    #[serde(default)]
    pub maintainers: Vec<Maintainer>,
}

/// One chart maintainer entry.
///
/// `name` may be a bare platform handle or a display name containing whitespace.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct Maintainer {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
}

impl Maintainer {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }

    /// Whether the name could be a handle as-is (contains no whitespace).
    pub fn looks_like_handle(&self) -> bool {
        !self.name.is_empty() && !self.name.chars().any(char::is_whitespace)
    }
}
