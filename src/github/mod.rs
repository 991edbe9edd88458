//! GitHub API operations using octocrab.

pub mod client;
pub mod models;

pub use client::{ApiSettings, GitHubClient, RepositoryHost};
pub use models::{CommitInfo, FileUpdate, Owner, RemoteContents, RemoteFile, Repository};
