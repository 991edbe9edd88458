//! Typed subsets of the GitHub REST payloads this crate reads and writes.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::GitHubError;

/// Account that owns a repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Owner {
    pub login: String,
}

/// Repository metadata as returned by `/repos/{owner}/{repo}` and the
/// user repository listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Repository {
    pub name: String,
    pub full_name: String,
    pub owner: Owner,
    pub html_url: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub private: bool,
    #[serde(default)]
    pub fork: bool,
    #[serde(default)]
    pub default_branch: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub stargazers_count: u64,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// One entry of the contents API.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ContentEntry {
    pub path: String,
    pub sha: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub encoding: Option<String>,
}

/// The contents API answers with an array for directories and an object
/// for everything else.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum ContentsPayload {
    Listing(Vec<ContentEntry>),
    Entry(ContentEntry),
}

/// What a path in a repository resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteContents {
    File(RemoteFile),
    Directory { path: String, entries: usize },
    /// Symlinks and submodules.
    Other { path: String, kind: String },
}

/// Snapshot of a file at the moment it was read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteFile {
    pub path: String,
    /// Blob sha, the revision marker required when updating the file.
    pub sha: String,
    pub content: String,
}

impl ContentsPayload {
    pub(crate) fn into_contents(self, requested: &str) -> Result<RemoteContents, GitHubError> {
        match self {
            ContentsPayload::Listing(entries) => Ok(RemoteContents::Directory {
                path: requested.to_string(),
                entries: entries.len(),
            }),
            ContentsPayload::Entry(entry) if entry.kind == "file" => {
                let content = decode_content(&entry)?;
                Ok(RemoteContents::File(RemoteFile {
                    path: entry.path,
                    sha: entry.sha,
                    content,
                }))
            }
            ContentsPayload::Entry(entry) => Ok(RemoteContents::Other {
                path: entry.path,
                kind: entry.kind,
            }),
        }
    }
}

fn decode_content(entry: &ContentEntry) -> Result<String, GitHubError> {
    // Files over 1 MB come back with encoding "none" and no inline content.
    match entry.encoding.as_deref() {
        Some("base64") => {}
        other => {
            return Err(GitHubError::InvalidContent(format!(
                "'{}' has unsupported encoding {:?}",
                entry.path, other
            )));
        }
    }

    let encoded: String = entry
        .content
        .as_deref()
        .unwrap_or_default()
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();

    let bytes = STANDARD.decode(encoded).map_err(|e| {
        GitHubError::InvalidContent(format!("'{}' is not valid base64: {}", entry.path, e))
    })?;

    String::from_utf8(bytes).map_err(|_| {
        GitHubError::InvalidContent(format!("'{}' is not valid UTF-8 text", entry.path))
    })
}

/// A request to replace a file's content in one commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileUpdate {
    pub path: String,
    pub message: String,
    pub content: String,
    /// Sha of the blob being replaced; GitHub rejects the write if it moved.
    pub sha: String,
    /// Target branch; the repository default when `None`.
    pub branch: Option<String>,
}

/// Body of `PUT /repos/{owner}/{repo}/contents/{path}`.
#[derive(Debug, Serialize)]
pub(crate) struct UpdateFileBody<'a> {
    pub message: &'a str,
    pub content: String,
    pub sha: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch: Option<&'a str>,
}

impl<'a> From<&'a FileUpdate> for UpdateFileBody<'a> {
    fn from(update: &'a FileUpdate) -> Self {
        Self {
            message: &update.message,
            content: STANDARD.encode(update.content.as_bytes()),
            sha: &update.sha,
            branch: update.branch.as_deref(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct UpdateFileResponse {
    pub commit: CommitInfo,
}

/// The commit created by a file update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitInfo {
    pub sha: String,
    pub html_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn file_entry(content: &str) -> serde_json::Value {
        json!({
            "type": "file",
            "encoding": "base64",
            "path": "src/main.rs",
            "sha": "abc123",
            "content": content
        })
    }

    #[test]
    fn test_file_entry_decodes_wrapped_base64() {
        // GitHub wraps base64 at 60 columns
        let payload: ContentsPayload =
            serde_json::from_value(file_entry("aGVsbG8g\nd29ybGQ=\n")).unwrap();

        match payload.into_contents("src/main.rs").unwrap() {
            RemoteContents::File(file) => {
                assert_eq!(file.content, "hello world");
                assert_eq!(file.sha, "abc123");
                assert_eq!(file.path, "src/main.rs");
            }
            other => panic!("Expected file, got {:?}", other),
        }
    }

    #[test]
    fn test_array_payload_is_directory() {
        let payload: ContentsPayload = serde_json::from_value(json!([
            {"type": "file", "path": "src/a.rs", "sha": "1"},
            {"type": "dir", "path": "src/b", "sha": "2"}
        ]))
        .unwrap();

        assert_eq!(
            payload.into_contents("src").unwrap(),
            RemoteContents::Directory {
                path: "src".to_string(),
                entries: 2
            }
        );
    }

    #[test]
    fn test_submodule_is_not_a_file() {
        let payload: ContentsPayload = serde_json::from_value(json!({
            "type": "submodule", "path": "vendor/lib", "sha": "9"
        }))
        .unwrap();

        assert!(matches!(
            payload.into_contents("vendor/lib").unwrap(),
            RemoteContents::Other { kind, .. } if kind == "submodule"
        ));
    }

    #[test]
    fn test_non_utf8_content_is_rejected() {
        // 0xff 0xfe is not valid UTF-8
        let payload: ContentsPayload = serde_json::from_value(file_entry("//4=")).unwrap();
        let err = payload.into_contents("src/main.rs").unwrap_err();
        assert!(matches!(err, GitHubError::InvalidContent(_)));
    }

    #[test]
    fn test_large_file_without_inline_content_is_rejected() {
        let payload: ContentsPayload = serde_json::from_value(json!({
            "type": "file", "encoding": "none", "path": "big.bin", "sha": "5", "content": ""
        }))
        .unwrap();
        assert!(payload.into_contents("big.bin").is_err());
    }

    #[test]
    fn test_update_body_encodes_content_and_omits_missing_branch() {
        let update = FileUpdate {
            path: "README.md".into(),
            message: "docs".into(),
            content: "hello there".into(),
            sha: "abc".into(),
            branch: None,
        };
        let body = serde_json::to_value(UpdateFileBody::from(&update)).unwrap();
        assert_eq!(body["content"], "aGVsbG8gdGhlcmU=");
        assert_eq!(body["sha"], "abc");
        assert!(body.get("branch").is_none());
    }
}
