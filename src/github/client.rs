//! Typed GitHub client via octocrab.
//!
//! A client is built per call from [`ApiSettings`] and an optional caller
//! supplied token. The token lives only as long as that client.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use octocrab::Octocrab;
use octocrab::service::middleware::retry::RetryConfig;
use tracing::debug;
use url::Url;

use crate::error::GitHubError;

use super::models::{
    CommitInfo, ContentsPayload, FileUpdate, RemoteContents, Repository, UpdateFileBody,
    UpdateFileResponse,
};

pub const DEFAULT_API_URL: &str = "https://api.github.com";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Where and how patiently to talk to the hosting service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiSettings {
    pub base_url: String,
    /// Upper bound applied to every individual request.
    pub request_timeout: Duration,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

/// Operations the tools need from the hosting service.
///
/// This abstraction allows mocking GitHub in tests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RepositoryHost: Send + Sync {
    /// Resolve a repository the current credential can access.
    async fn get_repository(&self, owner: &str, repo: &str) -> Result<Repository, GitHubError>;

    /// Fetch whatever `path` points at on the default branch.
    async fn get_file_contents(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
    ) -> Result<RemoteContents, GitHubError>;

    /// Replace a file's content, guarded by the sha in `update`.
    async fn update_file(
        &self,
        owner: &str,
        repo: &str,
        update: &FileUpdate,
    ) -> Result<CommitInfo, GitHubError>;

    /// First page of a user's public repositories.
    async fn list_repositories_for_user(
        &self,
        username: &str,
    ) -> Result<Vec<Repository>, GitHubError>;

    /// Repository metadata, `None` when GitHub answers 404.
    async fn get_repository_metadata(
        &self,
        owner: &str,
        repo: &str,
    ) -> Result<Option<Repository>, GitHubError>;
}

/// [`RepositoryHost`] backed by the GitHub REST API.
pub struct GitHubClient {
    octocrab: Octocrab,
    timeout: Duration,
}

impl GitHubClient {
    /// Build a client for one call.
    ///
    /// `credential` is sent as a bearer token; `None` gives an anonymous
    /// client for public endpoints.
    pub fn connect(settings: &ApiSettings, credential: Option<&str>) -> Result<Self, GitHubError> {
        // A failed write must surface to the caller instead of being replayed.
        let mut builder = Octocrab::builder()
            .add_retry_config(RetryConfig::None)
            .base_uri(settings.base_url.clone())
            .map_err(|e| GitHubError::ClientBuild(Box::new(e)))?;

        if let Some(token) = credential {
            builder = builder.personal_token(token.to_string());
        }

        let octocrab = builder
            .build()
            .map_err(|e| GitHubError::ClientBuild(Box::new(e)))?;

        Ok(Self::with_client(octocrab, settings.request_timeout))
    }

    /// Wrap a pre-configured octocrab client.
    ///
    /// This allows dependency injection for testing with mock servers.
    pub fn with_client(octocrab: Octocrab, timeout: Duration) -> Self {
        Self { octocrab, timeout }
    }

    async fn bounded<T, F>(&self, request: F) -> Result<T, GitHubError>
    where
        F: Future<Output = octocrab::Result<T>>,
    {
        match tokio::time::timeout(self.timeout, request).await {
            Ok(result) => result.map_err(GitHubError::from),
            Err(_) => Err(GitHubError::Timeout(self.timeout.as_secs())),
        }
    }
}

/// Build an API route from raw segments, percent-encoding each one.
///
/// Characters such as ` `, `#`, `?` and `/` inside a segment never change
/// which resource the route names.
fn route<'a>(segments: impl IntoIterator<Item = &'a str>) -> Result<String, GitHubError> {
    let mut url = Url::parse("http://api.invalid/")
        .map_err(|e| GitHubError::InvalidRoute(e.to_string()))?;
    url.path_segments_mut()
        .map_err(|_| GitHubError::InvalidRoute("route base cannot hold a path".to_string()))?
        .clear()
        .extend(segments);
    Ok(url.path().to_string())
}

fn repo_route(owner: &str, repo: &str) -> Result<String, GitHubError> {
    route(["repos", owner, repo])
}

/// `path` keeps its directory structure; empty segments are dropped.
fn contents_route(owner: &str, repo: &str, path: &str) -> Result<String, GitHubError> {
    let file_segments = path.split('/').filter(|s| !s.is_empty());
    route(["repos", owner, repo, "contents"].into_iter().chain(file_segments))
}

fn user_repos_route(username: &str) -> Result<String, GitHubError> {
    route(["users", username, "repos"])
}

#[async_trait]
impl RepositoryHost for GitHubClient {
    async fn get_repository(&self, owner: &str, repo: &str) -> Result<Repository, GitHubError> {
        debug!("Resolving repository {}/{}", owner, repo);
        self.bounded(
            self.octocrab
                .get::<Repository, _, ()>(repo_route(owner, repo)?, None::<&()>),
        )
        .await
    }

    async fn get_file_contents(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
    ) -> Result<RemoteContents, GitHubError> {
        debug!("Fetching contents of {} in {}/{}", path, owner, repo);
        let payload = self
            .bounded(
                self.octocrab
                    .get::<ContentsPayload, _, ()>(contents_route(owner, repo, path)?, None::<&()>),
            )
            .await?;

        payload.into_contents(path)
    }

    async fn update_file(
        &self,
        owner: &str,
        repo: &str,
        update: &FileUpdate,
    ) -> Result<CommitInfo, GitHubError> {
        debug!(
            "Updating {} in {}/{} on {}",
            update.path,
            owner,
            repo,
            update.branch.as_deref().unwrap_or("default branch")
        );
        let body = UpdateFileBody::from(update);
        let response = self
            .bounded(self.octocrab.put::<UpdateFileResponse, _, _>(
                contents_route(owner, repo, &update.path)?,
                Some(&body),
            ))
            .await?;

        Ok(response.commit)
    }

    async fn list_repositories_for_user(
        &self,
        username: &str,
    ) -> Result<Vec<Repository>, GitHubError> {
        debug!("Listing public repositories for {}", username);
        self.bounded(
            self.octocrab
                .get::<Vec<Repository>, _, ()>(user_repos_route(username)?, None::<&()>),
        )
        .await
    }

    async fn get_repository_metadata(
        &self,
        owner: &str,
        repo: &str,
    ) -> Result<Option<Repository>, GitHubError> {
        match self.get_repository(owner, repo).await {
            Ok(repository) => Ok(Some(repository)),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }
}
