//! Map chart maintainers to platform handles.
//!
//! A maintainer name without whitespace is first tried as a handle via a
//! profile check. Anything else, or a failed check, goes to user search with
//! `"<name> <email>"`, and only a single unambiguous match is accepted.

use owners_github::Platform;
use owners_shared::{Maintainer, OwnersRecord};
use tracing::{debug, info, instrument, warn};

/// How a single maintainer was resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The name is itself an existing handle.
    Confirmed(String),
    /// User search returned exactly one match.
    Found(String),
    /// User search returned nothing.
    NotFound,
    /// User search returned more than one candidate.
    Ambiguous(usize),
    /// User search failed; treated as no match.
    SearchFailed(String),
}

impl Resolution {
    /// The accepted handle, if any.
    pub fn handle(&self) -> Option<&str> {
        match self {
            Self::Confirmed(h) | Self::Found(h) => Some(h.as_str()),
            _ => None,
        }
    }
}

/// A maintainer together with its resolution.
#[derive(Debug, Clone)]
pub struct ResolvedMaintainer {
    pub maintainer: Maintainer,
    pub resolution: Resolution,
}

impl ResolvedMaintainer {
    /// Operator-facing line describing the outcome.
    pub fn describe(&self) -> String {
        let name = &self.maintainer.name;
        match &self.resolution {
            Resolution::Confirmed(h) => format!("Using github id {h:?} for name {name:?}"),
            Resolution::Found(h) => format!("Found github id {h:?} for name {name:?}"),
            Resolution::NotFound => format!("WARNING: Unable to find a username for {name}"),
            Resolution::Ambiguous(n) => format!(
                "WARNING: Found {n} names for {name}, please try to manually find the names"
            ),
            Resolution::SearchFailed(e) => format!("WARNING: Unable to search for name {name}: {e}"),
        }
    }
}

/// Build the search query for a maintainer.
fn search_query(maintainer: &Maintainer) -> String {
    format!("{} {}", maintainer.name, maintainer.email)
        .trim()
        .to_string()
}

/// Resolve one maintainer. Never fails: problems become a non-accepting [`Resolution`].
#[instrument(skip_all, fields(name = %maintainer.name))]
pub async fn resolve_maintainer<P: Platform>(platform: &P, maintainer: &Maintainer) -> Resolution {
    if maintainer.looks_like_handle() {
        match platform.profile_exists(&maintainer.name).await {
            Ok(true) => {
                debug!("name is an existing handle");
                return Resolution::Confirmed(maintainer.name.clone());
            }
            Ok(false) => warn!("no profile for name, falling back to search"),
            Err(e) => warn!(error = %e, "profile check failed, falling back to search"),
        }
    }

    let query = search_query(maintainer);
    let users = match platform.search_users(&query).await {
        Ok(users) => users,
        Err(e) => {
            warn!(error = %e, "unable to search for name");
            return Resolution::SearchFailed(e.to_string());
        }
    };

    match users.as_slice() {
        [user] => {
            info!(login = %user.login, "found handle for name");
            Resolution::Found(user.login.clone())
        }
        [] => {
            warn!("unable to find a username");
            Resolution::NotFound
        }
        many => {
            warn!(
                candidates = many.len(),
                "found multiple names, please try to manually find the names"
            );
            Resolution::Ambiguous(many.len())
        }
    }
}

/// Resolve every maintainer in order, appending accepted handles as both
/// approver and reviewer.
pub async fn resolve_all<P: Platform>(
    platform: &P,
    maintainers: &[Maintainer],
) -> (OwnersRecord, Vec<ResolvedMaintainer>) {
    let mut owners = OwnersRecord::default();
    let mut resolved = Vec::with_capacity(maintainers.len());

    for maintainer in maintainers {
        let resolution = resolve_maintainer(platform, maintainer).await;
        if let Some(handle) = resolution.handle() {
            owners.push_owner(handle);
        }
        resolved.push(ResolvedMaintainer {
            maintainer: maintainer.clone(),
            resolution,
        });
    }

    (owners, resolved)
}
