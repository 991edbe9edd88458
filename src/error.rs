//! Error types for repo-toolkit modules using thiserror.

use thiserror::Error;

/// Errors from GitHub API operations.
#[derive(Error, Debug)]
pub enum GitHubError {
    #[error("Failed to build GitHub client: {0}")]
    ClientBuild(#[source] Box<octocrab::Error>),

    #[error("GitHub API returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("GitHub request failed: {0}")]
    Request(#[source] Box<octocrab::Error>),

    #[error("GitHub request timed out after {0} seconds")]
    Timeout(u64),

    #[error("Unexpected content from GitHub: {0}")]
    InvalidContent(String),

    #[error("Cannot build request path: {0}")]
    InvalidRoute(String),
}

impl GitHubError {
    /// Upstream HTTP status, when the API answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            GitHubError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

impl From<octocrab::Error> for GitHubError {
    fn from(err: octocrab::Error) -> Self {
        match err {
            octocrab::Error::GitHub { source, .. } => GitHubError::Api {
                status: source.status_code.as_u16(),
                message: source.message.clone(),
            },
            other => GitHubError::Request(Box::new(other)),
        }
    }
}

/// Failures of the search-and-replace commit workflow.
///
/// Each variant maps onto one status code of the tool response.
#[derive(Error, Debug)]
pub enum EditError {
    #[error("Error: {0}")]
    InvalidArgument(String),

    #[error("Error: Search text must not be empty. No changes committed.")]
    EmptySearchText,

    #[error("Error: A GitHub token is required to edit {owner}/{repo}.")]
    MissingCredential { owner: String, repo: String },

    #[error(
        "Error: Could not authenticate or access repository {owner}/{repo}. Check the provided token and permissions."
    )]
    AccessDenied {
        owner: String,
        repo: String,
        #[source]
        source: GitHubError,
    },

    #[error("Error: '{0}' is a directory, not a file.")]
    IsDirectory(String),

    #[error(
        "Error accessing file '{path}': The file may not exist or the token lacks read permission."
    )]
    FileUnavailable { path: String, reason: String },

    #[error("Warning: Search text '{search}' not found in {path}. No changes committed.")]
    SearchTextNotFound { search: String, path: String },

    #[error("Warning: Replacement resulted in no change to content. No changes committed.")]
    NoChange,

    #[error("Fatal error during commit: {0}")]
    CommitFailed(String),
}

impl EditError {
    /// Status code reported to the calling agent.
    pub fn status_code(&self) -> u16 {
        match self {
            EditError::InvalidArgument(_)
            | EditError::EmptySearchText
            | EditError::IsDirectory(_)
            | EditError::SearchTextNotFound { .. }
            | EditError::NoChange => 400,
            EditError::MissingCredential { .. } | EditError::AccessDenied { .. } => 401,
            EditError::FileUnavailable { .. } => 404,
            EditError::CommitFailed(_) => 500,
        }
    }
}

/// Errors from tool lookup and argument decoding.
#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("Tool not found: {0}")]
    UnknownTool(String),
}

/// Errors from running the MCP server.
#[derive(Error, Debug)]
pub enum ServeError {
    #[error("MCP session failed to initialize: {0}")]
    Initialize(String),

    #[error("MCP session stopped unexpectedly: {0}")]
    Stopped(String),
}

/// Errors from validating runtime configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid API URL '{url}': {reason}")]
    InvalidApiUrl { url: String, reason: String },

    #[error("Request timeout must be at least one second")]
    ZeroTimeout,

    #[error("Failed to open log file {path}: {source}")]
    LogFile {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
