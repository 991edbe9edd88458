//! Public repository listing.

use crate::error::GitHubError;
use crate::github::{ApiSettings, GitHubClient, Repository, RepositoryHost};

/// Fetch the first page of `username`'s public repositories.
///
/// Uses an anonymous client; no credential is involved.
pub async fn fetch_public_repos(
    settings: &ApiSettings,
    username: &str,
) -> Result<Vec<Repository>, GitHubError> {
    let client = GitHubClient::connect(settings, None)?;
    fetch_public_repos_with_host(&client, username).await
}

/// Fetch public repositories using any [`RepositoryHost`].
pub async fn fetch_public_repos_with_host<H>(
    host: &H,
    username: &str,
) -> Result<Vec<Repository>, GitHubError>
where
    H: RepositoryHost + ?Sized,
{
    host.list_repositories_for_user(username).await
}
