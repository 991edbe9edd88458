//! Repository ownership checks.

use tracing::{debug, warn};

use crate::github::{ApiSettings, GitHubClient, RepositoryHost};

/// Outcome of asking whether a user owns a repository.
///
/// Tool replies only report [`Ownership::is_owned`], which treats a missing
/// repository the same as one owned by somebody else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Ownership {
    Owned,
    NotOwned { owner: String },
    NotFound,
    /// The lookup failed for a reason other than 404.
    Unavailable(String),
}

impl Ownership {
    pub fn is_owned(&self) -> bool {
        matches!(self, Ownership::Owned)
    }
}

/// Check ownership with an anonymous client.
pub async fn check_ownership(settings: &ApiSettings, username: &str, repo_name: &str) -> Ownership {
    match GitHubClient::connect(settings, None) {
        Ok(client) => check_ownership_with_host(&client, username, repo_name).await,
        Err(e) => Ownership::Unavailable(e.to_string()),
    }
}

/// Check ownership using any [`RepositoryHost`].
///
/// Looks up `{username}/{repo_name}` and compares the owner login without
/// regard to case. GitHub follows renames and transfers, so the returned
/// owner can differ from `username`.
pub async fn check_ownership_with_host<H>(host: &H, username: &str, repo_name: &str) -> Ownership
where
    H: RepositoryHost + ?Sized,
{
    match host.get_repository_metadata(username, repo_name).await {
        Ok(Some(repository)) => {
            if repository.owner.login.to_lowercase() == username.to_lowercase() {
                Ownership::Owned
            } else {
                debug!(
                    "{}/{} resolved to a repository owned by {}",
                    username, repo_name, repository.owner.login
                );
                Ownership::NotOwned {
                    owner: repository.owner.login,
                }
            }
        }
        Ok(None) => Ownership::NotFound,
        Err(e) => {
            warn!("Ownership lookup for {}/{} failed: {}", username, repo_name, e);
            Ownership::Unavailable(e.to_string())
        }
    }
}
