//! In-memory [`Platform`] used by unit tests.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use owners_github::{Platform, UserMatch};
use owners_shared::{Collaborator, OwnersError, Permission, RepoRef, Result};

#[derive(Default)]
pub(crate) struct FakePlatform {
    collaborators: Vec<Collaborator>,
    list_error: Option<String>,
    failing_adds: HashSet<String>,
    profiles: HashSet<String>,
    broken_profiles: HashSet<String>,
    searches: HashMap<String, Vec<String>>,
    broken_searches: HashSet<String>,
    add_log: Mutex<Vec<String>>,
    search_log: Mutex<Vec<String>>,
}

impl FakePlatform {
    pub(crate) fn with_collaborators(mut self, logins: &[&str]) -> Self {
        self.collaborators = logins
            .iter()
            .map(|l| Collaborator {
                login: l.to_string(),
            })
            .collect();
        self
    }

    pub(crate) fn failing_list(mut self, reason: &str) -> Self {
        self.list_error = Some(reason.to_string());
        self
    }

    pub(crate) fn failing_add(mut self, login: &str) -> Self {
        self.failing_adds.insert(login.to_string());
        self
    }

    pub(crate) fn with_profile(mut self, login: &str) -> Self {
        self.profiles.insert(login.to_string());
        self
    }

    pub(crate) fn broken_profile(mut self, login: &str) -> Self {
        self.broken_profiles.insert(login.to_string());
        self
    }

    pub(crate) fn with_search(mut self, query: &str, logins: &[&str]) -> Self {
        self.searches.insert(
            query.to_string(),
            logins.iter().map(|l| l.to_string()).collect(),
        );
        self
    }

    pub(crate) fn broken_search(mut self, query: &str) -> Self {
        self.broken_searches.insert(query.to_string());
        self
    }

    pub(crate) fn add_requests(&self) -> Vec<String> {
        self.add_log.lock().unwrap().clone()
    }

    pub(crate) fn search_requests(&self) -> Vec<String> {
        self.search_log.lock().unwrap().clone()
    }
}

impl Platform for FakePlatform {
    async fn list_collaborators(&self, _repo: &RepoRef) -> Result<Vec<Collaborator>> {
        match &self.list_error {
            Some(reason) => Err(OwnersError::Remote(reason.clone())),
            None => Ok(self.collaborators.clone()),
        }
    }

    async fn add_collaborator(
        &self,
        _repo: &RepoRef,
        login: &str,
        _permission: Permission,
    ) -> Result<()> {
        self.add_log.lock().unwrap().push(login.to_string());
        if self.failing_adds.contains(login) {
            return Err(OwnersError::Remote(format!("{login}: HTTP 422 Unprocessable Entity")));
        }
        Ok(())
    }

    async fn search_users(&self, query: &str) -> Result<Vec<UserMatch>> {
        self.search_log.lock().unwrap().push(query.to_string());
        if self.broken_searches.contains(query) {
            return Err(OwnersError::Remote("searching users: HTTP 403 Forbidden".into()));
        }
        Ok(self
            .searches
            .get(query)
            .map(|logins| {
                logins
                    .iter()
                    .map(|l| UserMatch { login: l.clone() })
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn profile_exists(&self, login: &str) -> Result<bool> {
        if self.broken_profiles.contains(login) {
            return Err(OwnersError::Remote(format!("{login}: connection refused")));
        }
        Ok(self.profiles.contains(login))
    }
}
