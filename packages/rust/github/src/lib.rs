//! Collaboration-platform client for the OWNERS tools.
//!
//! The pipelines in `owners-core` are written against the [`Platform`] trait;
//! [`GitHubClient`] implements it over the GitHub REST API. Every call is
//! attempted exactly once and issued sequentially by the caller.

mod pagination;

use std::collections::HashSet;
use std::time::Duration;

use owners_shared::{
    Collaborator, CredentialProvider, GithubConfig, OwnersError, Permission, RepoRef, Result,
};
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderValue, LINK};
use reqwest::{Client, RequestBuilder, Response};
use serde::Deserialize;
use tracing::{debug, info, instrument};
use url::Url;

/// User-Agent string for platform requests.
const USER_AGENT: &str = concat!("owners-tools/", env!("CARGO_PKG_VERSION"));

/// Media type for REST API requests.
const API_MEDIA_TYPE: &str = "application/vnd.github+json";

// ---------------------------------------------------------------------------
// Platform trait
// ---------------------------------------------------------------------------

/// A user returned by the platform's user search.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UserMatch {
    pub login: String,
}

/// Operations the OWNERS pipelines need from the collaboration platform.
#[allow(async_fn_in_trait)]
pub trait Platform {
    /// Every current collaborator of `repo`, following pagination.
    async fn list_collaborators(&self, repo: &RepoRef) -> Result<Vec<Collaborator>>;

    /// Invite `login` to `repo` with `permission`. Any status outside
    /// `[200, 300)` is an error.
    async fn add_collaborator(
        &self,
        repo: &RepoRef,
        login: &str,
        permission: Permission,
    ) -> Result<()>;

    /// Users matching a free-text query, oldest accounts first.
    async fn search_users(&self, query: &str) -> Result<Vec<UserMatch>>;

    /// Whether a public profile page exists for `login`.
    ///
    /// `Ok(false)` for a non-success status, `Err` for transport failures.
    async fn profile_exists(&self, login: &str) -> Result<bool>;
}

// ---------------------------------------------------------------------------
// GitHubClient
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct SearchUsersResponse {
    #[serde(default)]
    total_count: u64,
    #[serde(default)]
    items: Vec<UserMatch>,
}

/// GitHub REST API client.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    client: Client,
    api_base: Url,
    web_base: Url,
    token: String,
    per_page: u32,
}

impl GitHubClient {
    /// Build a client from config, pulling the token from `credentials`.
    pub fn new(config: &GithubConfig, credentials: &dyn CredentialProvider) -> Result<Self> {
        let token = credentials.token()?;

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| OwnersError::Remote(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_base: parse_base(&config.api_url)?,
            web_base: parse_base(&config.web_url)?,
            token,
            per_page: config.per_page.max(1),
        })
    }

    /// Attach auth and media-type headers for API calls.
    fn authed(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .header(AUTHORIZATION, format!("Bearer {}", self.token))
            .header(ACCEPT, HeaderValue::from_static(API_MEDIA_TYPE))
    }

    async fn send(&self, builder: RequestBuilder, what: &str) -> Result<Response> {
        builder
            .send()
            .await
            .map_err(|e| OwnersError::Remote(format!("{what}: {e}")))
    }
}

impl Platform for GitHubClient {
    #[instrument(skip_all, fields(repo = %repo))]
    async fn list_collaborators(&self, repo: &RepoRef) -> Result<Vec<Collaborator>> {
        let mut url = endpoint(
            &self.api_base,
            &["repos", &repo.org, &repo.repo, "collaborators"],
        )?;
        url.query_pairs_mut()
            .append_pair("per_page", &self.per_page.to_string());

        let mut collaborators = Vec::new();
        let mut next = Some(url.to_string());
        let mut pages = 0usize;
        let mut visited = HashSet::new();

        while let Some(page_url) = next.take() {
            if !visited.insert(page_url.clone()) {
                return Err(OwnersError::Remote(format!(
                    "listing collaborators: pagination revisits {page_url}"
                )));
            }
            let response = self
                .send(
                    self.authed(self.client.get(&page_url)),
                    "listing collaborators",
                )
                .await?;
            let response = ensure_success(response, "listing collaborators")?;

            next = response
                .headers()
                .get(LINK)
                .and_then(|v| v.to_str().ok())
                .and_then(pagination::next_page);

            let page: Vec<Collaborator> = response
                .json()
                .await
                .map_err(|e| OwnersError::Remote(format!("listing collaborators: {e}")))?;
            pages += 1;
            debug!(page = pages, count = page.len(), "fetched collaborator page");
            collaborators.extend(page);
        }

        info!(count = collaborators.len(), pages, "fetched collaborators");
        Ok(collaborators)
    }

    #[instrument(skip(self, repo), fields(repo = %repo))]
    async fn add_collaborator(
        &self,
        repo: &RepoRef,
        login: &str,
        permission: Permission,
    ) -> Result<()> {
        let url = endpoint(
            &self.api_base,
            &["repos", &repo.org, &repo.repo, "collaborators", login],
        )?;
        let body = serde_json::json!({ "permission": permission.as_str() });

        let response = self
            .send(self.authed(self.client.put(url).json(&body)), login)
            .await?;
        ensure_success(response, login)?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn search_users(&self, query: &str) -> Result<Vec<UserMatch>> {
        let mut url = endpoint(&self.api_base, &["search", "users"])?;
        url.query_pairs_mut()
            .append_pair("q", query)
            .append_pair("sort", "created")
            .append_pair("order", "asc");

        let response = self
            .send(self.authed(self.client.get(url)), "searching users")
            .await?;
        let response = ensure_success(response, "searching users")?;
        let results: SearchUsersResponse = response
            .json()
            .await
            .map_err(|e| OwnersError::Remote(format!("searching users: {e}")))?;

        debug!(
            total_count = results.total_count,
            returned = results.items.len(),
            "user search finished"
        );
        Ok(results.items)
    }

    #[instrument(skip(self))]
    async fn profile_exists(&self, login: &str) -> Result<bool> {
        let url = endpoint(&self.web_base, &[login])?;
        let response = self.send(self.client.get(url), login).await?;
        let status = response.status();
        debug!(%status, "profile check");
        Ok(status.is_success())
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Parse a base URL, rejecting ones that cannot carry path segments.
fn parse_base(raw: &str) -> Result<Url> {
    let url = Url::parse(raw)
        .map_err(|e| OwnersError::config(format!("invalid base URL '{raw}': {e}")))?;
    if url.cannot_be_a_base() {
        return Err(OwnersError::config(format!(
            "invalid base URL '{raw}': cannot be a base"
        )));
    }
    Ok(url)
}

/// Append percent-encoded path segments to `base`, keeping any base path prefix.
fn endpoint(base: &Url, segments: &[&str]) -> Result<Url> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| OwnersError::config(format!("invalid base URL '{base}'")))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

/// Turn a non-2xx response into a [`OwnersError::Remote`].
fn ensure_success(response: Response, what: &str) -> Result<Response> {
    let status = response.status();
    if !status.is_success() {
        return Err(OwnersError::Remote(format!("{what}: HTTP {status}")));
    }
    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use owners_shared::StaticCredentials;
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> GitHubClient {
        let config = GithubConfig {
            api_url: server.uri(),
            web_url: server.uri(),
            ..GithubConfig::default()
        };
        GitHubClient::new(&config, &StaticCredentials("test-token".into())).unwrap()
    }

    fn charts() -> RepoRef {
        RepoRef::new("kubernetes", "charts")
    }

    #[test]
    fn endpoint_keeps_base_path() {
        let base = Url::parse("https://ghe.example.com/api/v3").unwrap();
        let url = endpoint(&base, &["repos", "o", "r"]).unwrap();
        assert_eq!(url.as_str(), "https://ghe.example.com/api/v3/repos/o/r");

        let base = Url::parse("https://api.github.com/").unwrap();
        let url = endpoint(&base, &["search", "users"]).unwrap();
        assert_eq!(url.as_str(), "https://api.github.com/search/users");
    }

    #[test]
    fn endpoint_escapes_segments() {
        let base = Url::parse("https://github.com").unwrap();
        let url = endpoint(&base, &["a/b"]).unwrap();
        assert_eq!(url.as_str(), "https://github.com/a%2Fb");
    }

    #[test]
    fn missing_token_is_credential_error() {
        let err = GitHubClient::new(&GithubConfig::default(), &StaticCredentials(String::new()))
            .unwrap_err();
        assert!(matches!(err, OwnersError::Credential { .. }));
    }

    #[test]
    fn invalid_base_url_is_config_error() {
        let config = GithubConfig {
            api_url: "not a url".into(),
            ..GithubConfig::default()
        };
        let err = GitHubClient::new(&config, &StaticCredentials("t".into())).unwrap_err();
        assert!(matches!(err, OwnersError::Config { .. }));
    }

    #[tokio::test]
    async fn list_collaborators_follows_pagination() {
        let server = MockServer::start().await;
        let next = format!(
            "<{}/repos/kubernetes/charts/collaborators?per_page=100&page=2>; rel=\"next\"",
            server.uri()
        );

        Mock::given(method("GET"))
            .and(path("/repos/kubernetes/charts/collaborators"))
            .and(query_param("page", "2"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!([{ "login": "carol" }])),
            )
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/repos/kubernetes/charts/collaborators"))
            .and(header("authorization", "Bearer test-token"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("link", next.as_str())
                    .set_body_json(serde_json::json!([
                        { "login": "alice", "id": 1 },
                        { "login": "bob", "id": 2 }
                    ])),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let collaborators = client.list_collaborators(&charts()).await.unwrap();
        let logins: Vec<&str> = collaborators.iter().map(|c| c.login.as_str()).collect();
        assert_eq!(logins, vec!["alice", "bob", "carol"]);
    }

    #[tokio::test]
    async fn list_collaborators_stops_on_pagination_loop() {
        let server = MockServer::start().await;
        let page2 = format!(
            "<{}/repos/kubernetes/charts/collaborators?per_page=100&page=2>; rel=\"next\"",
            server.uri()
        );

        // Page 2 names itself as the next page.
        Mock::given(method("GET"))
            .and(path("/repos/kubernetes/charts/collaborators"))
            .and(query_param("page", "2"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("link", page2.as_str())
                    .set_body_json(serde_json::json!([{ "login": "carol" }])),
            )
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/repos/kubernetes/charts/collaborators"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("link", page2.as_str())
                    .set_body_json(serde_json::json!([{ "login": "alice" }])),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let err = client.list_collaborators(&charts()).await.unwrap_err();
        assert!(matches!(err, OwnersError::Remote(_)));
    }

    #[tokio::test]
    async fn list_collaborators_fails_when_later_page_fails() {
        let server = MockServer::start().await;
        let next = format!(
            "<{}/repos/kubernetes/charts/collaborators?per_page=100&page=2>; rel=\"next\"",
            server.uri()
        );

        Mock::given(method("GET"))
            .and(path("/repos/kubernetes/charts/collaborators"))
            .and(query_param("page", "2"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/repos/kubernetes/charts/collaborators"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("link", next.as_str())
                    .set_body_json(serde_json::json!([{ "login": "alice" }])),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        let result = client.list_collaborators(&charts()).await;
        let Err(err) = result else {
            panic!("expected an error, got a partial list: {result:?}");
        };
        assert!(matches!(err, OwnersError::Remote(_)));
        assert!(err.to_string().contains("500"));
    }

    #[tokio::test]
    async fn list_collaborators_error_status() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/repos/kubernetes/charts/collaborators"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let err = client.list_collaborators(&charts()).await.unwrap_err();
        assert!(matches!(err, OwnersError::Remote(_)));
        assert!(err.to_string().contains("401"));
    }

    #[tokio::test]
    async fn add_collaborator_sends_permission() {
        let server = MockServer::start().await;

        Mock::given(method("PUT"))
            .and(path("/repos/kubernetes/charts/collaborators/bob"))
            .and(body_json(serde_json::json!({ "permission": "pull" })))
            .respond_with(ResponseTemplate::new(201))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        client
            .add_collaborator(&charts(), "bob", Permission::Pull)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn add_collaborator_rejects_non_2xx() {
        let server = MockServer::start().await;

        Mock::given(method("PUT"))
            .and(path("/repos/kubernetes/charts/collaborators/ghost"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let err = client
            .add_collaborator(&charts(), "ghost", Permission::Pull)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("404"));
    }

    #[tokio::test]
    async fn search_users_passes_query() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/search/users"))
            .and(query_param("q", "Alice Smith a@x.com"))
            .and(query_param("sort", "created"))
            .and(query_param("order", "asc"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "total_count": 1,
                "incomplete_results": false,
                "items": [{ "login": "alice123", "id": 7 }]
            })))
            .mount(&server)
            .await;

        let client = client_for(&server);
        let users = client.search_users("Alice Smith a@x.com").await.unwrap();
        assert_eq!(users, vec![UserMatch { login: "alice123".into() }]);
    }

    #[tokio::test]
    async fn profile_exists_reflects_status() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/alice"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html></html>"))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/nobody"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = client_for(&server);
        assert!(client.profile_exists("alice").await.unwrap());
        assert!(!client.profile_exists("nobody").await.unwrap());
    }
}
