//! Read, verify, substitute and commit a single file.
//!
//! Steps run strictly in order and the first failure ends the call:
//! 1. Resolve the repository with the caller's credential
//! 2. Fetch the file and its blob sha
//! 3. Check the search text occurs
//! 4. Substitute every occurrence and make sure something changed
//! 5. Commit to the default branch, guarded by the sha from step 2
//!
//! Only step 5 writes.

use std::fmt;

use serde::Deserialize;
use tracing::{Instrument, debug, error, info, info_span};

use crate::error::EditError;
use crate::github::{
    ApiSettings, CommitInfo, FileUpdate, GitHubClient, RemoteContents, RepositoryHost,
};
use crate::logging::redact;

use super::substitute::{Substitution, substitute_all};

pub const DEFAULT_COMMIT_MESSAGE: &str = "Automated file replacement via AI agent";

fn default_commit_message() -> String {
    DEFAULT_COMMIT_MESSAGE.to_string()
}

/// Arguments of one search-and-replace commit.
#[derive(Clone, Deserialize)]
pub struct EditRequest {
    pub owner: String,
    pub repo: String,
    pub file_path: String,
    pub search_text: String,
    pub replacement_text: String,
    /// Personal access token or app token with write access to the repository.
    pub github_token: String,
    #[serde(default = "default_commit_message")]
    pub commit_message: String,
}

impl fmt::Debug for EditRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EditRequest")
            .field("owner", &self.owner)
            .field("repo", &self.repo)
            .field("file_path", &self.file_path)
            .field("search_text", &self.search_text)
            .field("replacement_text", &self.replacement_text)
            .field("github_token", &"[REDACTED]")
            .field("commit_message", &self.commit_message)
            .finish()
    }
}

impl EditRequest {
    /// Reject arguments that cannot lead to a meaningful edit.
    pub fn validate(&self) -> Result<(), EditError> {
        for (name, value) in [
            ("owner", &self.owner),
            ("repo", &self.repo),
            ("file_path", &self.file_path),
        ] {
            if value.trim().is_empty() {
                return Err(EditError::InvalidArgument(format!("'{}' must not be empty.", name)));
            }
        }

        if self.search_text.is_empty() {
            return Err(EditError::EmptySearchText);
        }

        if self.github_token.trim().is_empty() {
            return Err(EditError::MissingCredential {
                owner: self.owner.clone(),
                repo: self.repo.clone(),
            });
        }

        Ok(())
    }

    fn redact(&self, text: &str) -> String {
        redact(text, &self.github_token)
    }
}

/// Where the workflow is, for log correlation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditStage {
    Authenticating,
    Fetching,
    Matching,
    Diffing,
    Committing,
}

/// A successful edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditOutcome {
    pub path: String,
    pub occurrences: usize,
    pub commit: CommitInfo,
}

/// Perform the edit against GitHub with a client built from the request's token.
pub async fn replace_in_file(
    settings: &ApiSettings,
    request: &EditRequest,
) -> Result<EditOutcome, EditError> {
    request.validate()?;

    let client = GitHubClient::connect(settings, Some(&request.github_token)).map_err(|e| {
        error!(
            "Authentication/Repo Access Error: {}",
            request.redact(&e.to_string())
        );
        EditError::AccessDenied {
            owner: request.owner.clone(),
            repo: request.repo.clone(),
            source: e,
        }
    })?;

    replace_in_file_with_host(&client, request).await
}

/// Perform the edit using any [`RepositoryHost`].
///
/// This allows dependency injection for testing.
pub async fn replace_in_file_with_host<H>(
    host: &H,
    request: &EditRequest,
) -> Result<EditOutcome, EditError>
where
    H: RepositoryHost + ?Sized,
{
    request.validate()?;

    let span = info_span!(
        "code_replace_in_file",
        owner = %request.owner,
        repo = %request.repo,
        path = %request.file_path
    );

    run_stages(host, request).instrument(span).await
}

async fn run_stages<H>(host: &H, request: &EditRequest) -> Result<EditOutcome, EditError>
where
    H: RepositoryHost + ?Sized,
{
    let owner = request.owner.as_str();
    let repo = request.repo.as_str();
    let path = request.file_path.as_str();

    debug!(stage = ?EditStage::Authenticating);
    let repository = host.get_repository(owner, repo).await.map_err(|e| {
        error!(
            "Authentication/Repo Access Error: {}",
            request.redact(&e.to_string())
        );
        EditError::AccessDenied {
            owner: owner.to_string(),
            repo: repo.to_string(),
            source: e,
        }
    })?;

    debug!(stage = ?EditStage::Fetching);
    let file = match host.get_file_contents(owner, repo, path).await {
        Ok(RemoteContents::File(file)) => file,
        Ok(RemoteContents::Directory { .. }) => {
            error!("File Access Error: '{}' is a directory, not a file.", path);
            return Err(EditError::IsDirectory(path.to_string()));
        }
        Ok(RemoteContents::Other { kind, .. }) => {
            error!("File Access Error: '{}' is a {}, not a file.", path, kind);
            return Err(EditError::FileUnavailable {
                path: path.to_string(),
                reason: format!("path is a {}", kind),
            });
        }
        Err(e) => {
            let reason = request.redact(&e.to_string());
            error!("File Access Error: {}", reason);
            return Err(EditError::FileUnavailable {
                path: path.to_string(),
                reason,
            });
        }
    };

    debug!(stage = ?EditStage::Matching);
    let substitution =
        substitute_all(&file.content, &request.search_text, &request.replacement_text);
    if substitution == Substitution::NotFound {
        info!("Search text not found in {}, nothing committed", path);
        return Err(EditError::SearchTextNotFound {
            search: request.search_text.clone(),
            path: path.to_string(),
        });
    }

    debug!(stage = ?EditStage::Diffing);
    let (content, occurrences) = match substitution {
        Substitution::Changed {
            content,
            occurrences,
        } => (content, occurrences),
        Substitution::NotFound | Substitution::Unchanged { .. } => {
            info!("Replacement left {} unchanged, nothing committed", path);
            return Err(EditError::NoChange);
        }
    };
    debug!(occurrences, "Substituted");

    debug!(stage = ?EditStage::Committing);
    let update = FileUpdate {
        path: path.to_string(),
        message: request.commit_message.clone(),
        content,
        sha: file.sha,
        branch: repository.default_branch.clone(),
    };

    match host.update_file(owner, repo, &update).await {
        Ok(commit) => {
            info!("Successful commit to {}/{}: {}", owner, repo, commit.html_url);
            Ok(EditOutcome {
                path: path.to_string(),
                occurrences,
                commit,
            })
        }
        Err(e) => {
            let reason = request.redact(&e.to_string());
            error!("Commit Operation Error: {}", reason);
            Err(EditError::CommitFailed(reason))
        }
    }
}
