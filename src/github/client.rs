use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use reqwest::header::{HeaderMap, ACCEPT, AUTHORIZATION};
use reqwest::{Response, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::de::{DeserializeOwned, IgnoredAny};
use tracing::{debug, info};

use super::payload::{RawApiError, RawContentEntry, RawRepository};
use super::{MetadataSource, RepoRef};
use crate::error::{GradeError, Result};
use crate::types::config::GithubSettings;
use crate::types::metadata::{RepositoryMetadata, COMMIT_SAMPLE_SIZE};

const GITHUB_MEDIA_TYPE: &str = "application/vnd.github+json";
const API_VERSION_HEADER: &str = "X-GitHub-Api-Version";
const API_VERSION: &str = "2022-11-28";

/// Read-only client for the public repository endpoints.
pub struct GithubClient {
    /// Optional token; never printed by `Debug`.
    token: Option<SecretString>,
    api_base: String,
    client: reqwest::Client,
}

impl std::fmt::Debug for GithubClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GithubClient")
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .field("api_base", &self.api_base)
            .finish()
    }
}

impl GithubClient {
    pub fn new(settings: GithubSettings) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(settings.timeout)
            .user_agent(concat!("repograde/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| GradeError::Network(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            token: settings.token.map(SecretString::from),
            api_base: settings.api_base,
            client,
        })
    }

    fn repo_url(&self, repo: &RepoRef) -> String {
        format!("{}/repos/{}/{}", self.api_base, repo.owner, repo.name)
    }

    async fn get(&self, url: &str) -> Result<Response> {
        let mut request = self
            .client
            .get(url)
            .header(ACCEPT, GITHUB_MEDIA_TYPE)
            .header(API_VERSION_HEADER, API_VERSION);
        if let Some(token) = &self.token {
            request = request.header(AUTHORIZATION, format!("Bearer {}", token.expose_secret()));
        }
        debug!(%url, "requesting");
        Ok(request.send().await?)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str, repo: &RepoRef) -> Result<T> {
        let response = self.get(url).await?;
        let status = response.status();
        if !status.is_success() {
            let headers = response.headers().clone();
            let message = response
                .json::<RawApiError>()
                .await
                .map(|body| body.message)
                .unwrap_or_default();
            return Err(classify_failure(status, &headers, message, repo));
        }
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| GradeError::MalformedResponse(e.to_string()))
    }

    async fn fetch_root_listing(&self, repo: &RepoRef) -> Result<Vec<RawContentEntry>> {
        let url = format!("{}/contents", self.repo_url(repo));
        match self.get_json::<Vec<RawContentEntry>>(&url, repo).await {
            Ok(entries) => Ok(entries),
            // Empty repositories answer 404 here; score them as having no files.
            Err(GradeError::NotFound(_)) => {
                debug!(repository = %repo, "root listing empty");
                Ok(Vec::new())
            }
            Err(e) => Err(e),
        }
    }

    async fn fetch_commit_count(&self, repo: &RepoRef) -> Result<u32> {
        let url = format!(
            "{}/commits?per_page={}",
            self.repo_url(repo),
            COMMIT_SAMPLE_SIZE
        );
        match self.get_json::<Vec<IgnoredAny>>(&url, repo).await {
            Ok(commits) => Ok(u32::try_from(commits.len())
                .unwrap_or(COMMIT_SAMPLE_SIZE)
                .min(COMMIT_SAMPLE_SIZE)),
            // 409 is GitHub's answer for a repository without commits.
            Err(GradeError::NotFound(_)) | Err(GradeError::Upstream { status: 409, .. }) => {
                debug!(repository = %repo, "no commit history");
                Ok(0)
            }
            Err(e) => Err(e),
        }
    }
}

#[async_trait]
impl MetadataSource for GithubClient {
    async fn fetch(&self, repo: &RepoRef) -> Result<RepositoryMetadata> {
        info!(repository = %repo, "fetching repository metadata");
        let raw: RawRepository = self.get_json(&self.repo_url(repo), repo).await?;
        let entries = self.fetch_root_listing(repo).await?;
        let recent_commits = self.fetch_commit_count(repo).await?;
        Ok(raw.into_metadata(&entries, recent_commits))
    }
}

/// Maps a non-success status to the error taxonomy.
pub fn classify_failure(
    status: StatusCode,
    headers: &HeaderMap,
    message: String,
    repo: &RepoRef,
) -> GradeError {
    let quota_exhausted = headers
        .get("x-ratelimit-remaining")
        .and_then(|value| value.to_str().ok())
        .map(|value| value.trim() == "0")
        .unwrap_or(false);

    if status == StatusCode::TOO_MANY_REQUESTS
        || (status == StatusCode::FORBIDDEN && quota_exhausted)
    {
        return GradeError::RateLimited {
            reset_at: rate_limit_reset(headers),
        };
    }

    if status == StatusCode::NOT_FOUND {
        return GradeError::NotFound(format!("{repo} does not exist or is private"));
    }

    GradeError::Upstream {
        status: status.as_u16(),
        message: if message.is_empty() {
            status
                .canonical_reason()
                .unwrap_or("unknown error")
                .to_string()
        } else {
            message
        },
    }
}

/// Reset time of the rate-limit window, if GitHub reported one.
pub fn rate_limit_reset(headers: &HeaderMap) -> Option<DateTime<Utc>> {
    headers
        .get("x-ratelimit-reset")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.trim().parse::<i64>().ok())
        .and_then(|secs| Utc.timestamp_opt(secs, 0).single())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::metadata::TestEvidence;
    use reqwest::header::HeaderValue;
    use std::time::Duration;

    fn repo() -> RepoRef {
        RepoRef {
            owner: "octo".to_string(),
            name: "demo".to_string(),
        }
    }

    fn headers(pairs: &[(&'static str, &'static str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.insert(*name, HeaderValue::from_static(*value));
        }
        map
    }

    #[test]
    fn not_found_maps_to_not_found() {
        let err = classify_failure(StatusCode::NOT_FOUND, &HeaderMap::new(), "Not Found".into(), &repo());
        assert!(matches!(err, GradeError::NotFound(message) if message.contains("octo/demo")));
    }

    #[test]
    fn exhausted_quota_maps_to_rate_limited_with_reset() {
        let map = headers(&[
            ("x-ratelimit-remaining", "0"),
            ("x-ratelimit-reset", "1780000000"),
        ]);
        let err = classify_failure(StatusCode::FORBIDDEN, &map, "API rate limit exceeded".into(), &repo());
        match err {
            GradeError::RateLimited { reset_at } => {
                assert_eq!(reset_at.map(|at| at.timestamp()), Some(1_780_000_000));
            }
            other => panic!("unexpected error: {other}"),
        }

        let err = classify_failure(StatusCode::TOO_MANY_REQUESTS, &HeaderMap::new(), String::new(), &repo());
        assert!(matches!(err, GradeError::RateLimited { reset_at: None }));
    }

    #[test]
    fn forbidden_with_quota_left_is_upstream_error() {
        let map = headers(&[("x-ratelimit-remaining", "42")]);
        let err = classify_failure(StatusCode::FORBIDDEN, &map, "Repository access blocked".into(), &repo());
        assert!(matches!(
            err,
            GradeError::Upstream { status: 403, ref message } if message == "Repository access blocked"
        ));
    }

    #[test]
    fn empty_upstream_message_falls_back_to_reason() {
        let err = classify_failure(StatusCode::BAD_GATEWAY, &HeaderMap::new(), String::new(), &repo());
        assert_eq!(err.to_string(), "GitHub returned 502: Bad Gateway");
    }

    const REPOSITORY: &str = r#"{
        "name": "demo",
        "owner": { "login": "octo" },
        "description": "A demonstration repository for scoring",
        "language": "Rust",
        "stargazers_count": 120,
        "forks_count": 8,
        "open_issues_count": 4,
        "size": 2048,
        "created_at": "2022-01-01T00:00:00Z",
        "updated_at": "2026-05-20T00:00:00Z",
        "pushed_at": null,
        "license": { "spdx_id": "MIT", "name": "MIT License" },
        "topics": ["rust"]
    }"#;

    const CONTENTS: &str = r#"[
        { "name": "README.md", "type": "file", "size": 3000 },
        { "name": "src", "type": "dir", "size": 0 },
        { "name": "unit_tests", "type": "dir", "size": 0 }
    ]"#;

    const COMMITS: &str = r#"[
        { "sha": "a1" }, { "sha": "a2" }, { "sha": "a3" }, { "sha": "a4" },
        { "sha": "a5" }, { "sha": "a6" }, { "sha": "a7" }, { "sha": "a8" },
        { "sha": "a9" }, { "sha": "b1" }, { "sha": "b2" }, { "sha": "b3" }
    ]"#;

    #[derive(Clone)]
    struct Canned {
        status: u16,
        headers: Vec<(&'static str, &'static str)>,
        body: &'static str,
    }

    impl Canned {
        fn ok(body: &'static str) -> Self {
            Self::status(200, body)
        }

        fn status(status: u16, body: &'static str) -> Self {
            Self {
                status,
                headers: Vec::new(),
                body,
            }
        }

        fn header(mut self, name: &'static str, value: &'static str) -> Self {
            self.headers.push((name, value));
            self
        }

        fn into_response(self) -> warp::http::Response<&'static str> {
            let mut builder = warp::http::Response::builder()
                .status(self.status)
                .header("content-type", "application/json");
            for (name, value) in self.headers {
                builder = builder.header(name, value);
            }
            builder.body(self.body).expect("canned response should build")
        }
    }

    fn rate_limited() -> Canned {
        Canned::status(403, r#"{ "message": "API rate limit exceeded" }"#)
            .header("x-ratelimit-remaining", "0")
            .header("x-ratelimit-reset", "1780000000")
    }

    /// Serves canned GitHub answers for `octo/demo` on an ephemeral port.
    fn mock_github(repository: Canned, contents: Canned, commits: Canned) -> GithubClient {
        use warp::Filter;

        let repository = warp::path!("repos" / "octo" / "demo")
            .map(move || repository.clone().into_response());
        let contents = warp::path!("repos" / "octo" / "demo" / "contents")
            .map(move || contents.clone().into_response());
        let commits = warp::path!("repos" / "octo" / "demo" / "commits")
            .map(move || commits.clone().into_response());

        let (addr, server) = warp::serve(repository.or(contents).or(commits))
            .bind_ephemeral(([127, 0, 0, 1], 0));
        tokio::spawn(server);

        GithubClient::new(GithubSettings {
            api_base: format!("http://{addr}"),
            timeout: Duration::from_secs(5),
            token: None,
        })
        .expect("client should build")
    }

    #[tokio::test]
    async fn fetch_combines_repository_listing_and_history() {
        let client = mock_github(
            Canned::ok(REPOSITORY),
            Canned::ok(CONTENTS),
            Canned::ok(COMMITS),
        );

        let metadata = client.fetch(&repo()).await.expect("fetch should succeed");
        assert_eq!(metadata.full_name(), "octo/demo");
        assert_eq!(metadata.stars, 120);
        assert!(metadata.has_readme);
        assert_eq!(metadata.readme_bytes, 3000);
        assert_eq!(metadata.tests, TestEvidence::Directory);
        assert_eq!(metadata.directories, vec!["src".to_string(), "unit_tests".to_string()]);
        assert_eq!(metadata.recent_commits, 12);
        assert_eq!(metadata.updated_at.to_rfc3339(), "2026-05-20T00:00:00+00:00");
    }

    #[tokio::test]
    async fn empty_repository_is_scored_without_files_or_history() {
        let client = mock_github(
            Canned::ok(REPOSITORY),
            Canned::status(404, r#"{ "message": "This repository is empty." }"#),
            Canned::status(409, r#"{ "message": "Git Repository is empty." }"#),
        );

        let metadata = client.fetch(&repo()).await.expect("fetch should succeed");
        assert!(!metadata.has_readme);
        assert_eq!(metadata.tests, TestEvidence::None);
        assert!(metadata.directories.is_empty());
        assert_eq!(metadata.recent_commits, 0);
    }

    #[tokio::test]
    async fn rate_limit_on_root_listing_is_surfaced() {
        let client = mock_github(Canned::ok(REPOSITORY), rate_limited(), Canned::ok(COMMITS));

        let err = client.fetch(&repo()).await.expect_err("rate limit should fail the fetch");
        assert!(matches!(err, GradeError::RateLimited { reset_at: Some(_) }));
    }

    #[tokio::test]
    async fn rate_limit_on_commit_history_is_surfaced() {
        let client = mock_github(Canned::ok(REPOSITORY), Canned::ok(CONTENTS), rate_limited());

        let err = client.fetch(&repo()).await.expect_err("rate limit should fail the fetch");
        assert!(matches!(err, GradeError::RateLimited { .. }));
    }

    #[tokio::test]
    async fn listing_server_error_is_not_mistaken_for_an_empty_repository() {
        let client = mock_github(
            Canned::ok(REPOSITORY),
            Canned::status(500, r#"{ "message": "Server Error" }"#),
            Canned::ok(COMMITS),
        );

        let err = client.fetch(&repo()).await.expect_err("server error should fail the fetch");
        assert!(matches!(err, GradeError::Upstream { status: 500, .. }));
    }

    #[tokio::test]
    async fn repository_level_failures_are_classified() {
        let missing = mock_github(
            Canned::status(404, r#"{ "message": "Not Found" }"#),
            Canned::ok(CONTENTS),
            Canned::ok(COMMITS),
        );
        let err = missing.fetch(&repo()).await.expect_err("missing repository should fail");
        assert!(matches!(err, GradeError::NotFound(message) if message.contains("octo/demo")));

        let limited = mock_github(rate_limited(), Canned::ok(CONTENTS), Canned::ok(COMMITS));
        let err = limited.fetch(&repo()).await.expect_err("rate limit should fail");
        match err {
            GradeError::RateLimited { reset_at } => {
                assert_eq!(reset_at.map(|at| at.timestamp()), Some(1_780_000_000));
            }
            other => panic!("unexpected error: {other}"),
        }

        let garbled = mock_github(Canned::ok("{ not json"), Canned::ok(CONTENTS), Canned::ok(COMMITS));
        let err = garbled.fetch(&repo()).await.expect_err("garbled body should fail");
        assert!(matches!(err, GradeError::MalformedResponse(_)));
    }

    #[test]
    fn debug_output_redacts_token() {
        let client = GithubClient::new(GithubSettings {
            api_base: "https://api.github.com".to_string(),
            timeout: Duration::from_secs(5),
            token: Some("ghp_secret".to_string()),
        })
        .expect("client should build");
        let rendered = format!("{client:?}");
        assert!(rendered.contains("[REDACTED]"));
        assert!(!rendered.contains("ghp_secret"));
    }
}
