//! repo-toolkit - GitHub tools for agent hosts.
//!
//! # Overview
//!
//! Three tools are exposed through a [`tools::ToolRegistry`]:
//!
//! - `fetch_all_public_repos_for_user` lists a user's public repositories
//! - `is_repo_owned_by_user` checks who owns a repository
//! - `code_replace_in_file` replaces text in one file and commits the result
//!   straight to the default branch, guarded by the file's blob sha
//!
//! Every tool replies with a JSON envelope; failures are carried inside it
//! as a status code and message. The binary serves the registry to agent
//! hosts over MCP on stdio (see [`mcp`]).

pub mod config;
pub mod edit;
pub mod error;
pub mod github;
pub mod logging;
pub mod mcp;
pub mod repos;
pub mod tools;

// Re-export commonly used types
pub use config::{ConfigArgs, LogSettings, Settings};
pub use edit::{EditOutcome, EditRequest};
pub use error::{ConfigError, EditError, GitHubError, RegistryError, ServeError};
pub use github::{ApiSettings, GitHubClient, RepositoryHost};
pub use repos::Ownership;
pub use tools::{Envelope, ToolOutput, ToolRegistry, ToolResponse};
