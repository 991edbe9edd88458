//! Shared test utilities for integration tests.
//!
//! Not all functions are used by every test file, but they're shared across tests.
#![allow(dead_code)]

use std::time::Duration;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use repo_toolkit::{ApiSettings, ToolOutput, ToolResponse};
use serde_json::{Value, json};
use wiremock::MockServer;

pub const TOKEN: &str = "ghp_integration_token";

/// API settings pointing at a mock server.
pub fn settings_for(server: &MockServer) -> ApiSettings {
    ApiSettings {
        base_url: server.uri(),
        request_timeout: Duration::from_secs(5),
    }
}

/// A repository object with the fields the tools read.
pub fn mock_repo(owner: &str, name: &str) -> Value {
    json!({
        "id": 1,
        "name": name,
        "full_name": format!("{}/{}", owner, name),
        "owner": { "login": owner, "id": 1, "type": "User" },
        "private": false,
        "fork": false,
        "html_url": format!("https://github.com/{}/{}", owner, name),
        "description": "Test repository",
        "default_branch": "main",
        "language": "Rust",
        "stargazers_count": 12,
        "updated_at": "2024-06-15T12:00:00Z"
    })
}

/// A contents API file object, base64 encoded the way GitHub does it.
pub fn mock_file(path: &str, content: &str, sha: &str) -> Value {
    let encoded = STANDARD.encode(content.as_bytes());
    // GitHub wraps encoded content at 60 columns
    let wrapped: Vec<String> = encoded
        .as_bytes()
        .chunks(60)
        .map(|c| String::from_utf8_lossy(c).into_owned())
        .collect();

    json!({
        "type": "file",
        "encoding": "base64",
        "size": content.len(),
        "name": path.rsplit('/').next().unwrap_or(path),
        "path": path,
        "sha": sha,
        "content": format!("{}\n", wrapped.join("\n")),
    })
}

/// A contents API directory listing.
pub fn mock_directory(path: &str) -> Value {
    json!([
        { "type": "file", "name": "a.rs", "path": format!("{}/a.rs", path), "sha": "111" },
        { "type": "dir", "name": "nested", "path": format!("{}/nested", path), "sha": "222" }
    ])
}

/// Response body of a successful contents update.
pub fn mock_commit(owner: &str, repo: &str, sha: &str) -> Value {
    json!({
        "content": { "type": "file", "path": "README.md", "sha": "new-blob" },
        "commit": {
            "sha": sha,
            "html_url": format!("https://github.com/{}/{}/commit/{}", owner, repo, sha),
            "message": "Automated file replacement via AI agent"
        }
    })
}

/// GitHub's error body.
pub fn github_error(message: &str) -> Value {
    json!({
        "message": message,
        "documentation_url": "https://docs.github.com/rest"
    })
}

/// Decode the JSON payload of a single-envelope tool reply.
pub fn payload(output: &ToolOutput) -> Value {
    assert_eq!(output.len(), 1, "tools reply with exactly one envelope");
    assert_eq!(output[0].kind, "json");
    assert_eq!(output[0].mime_type, "application/json");
    output[0].payload().expect("envelope content is JSON")
}

/// Decode a status/message reply.
pub fn tool_response(output: &ToolOutput) -> ToolResponse {
    serde_json::from_value(payload(output)).expect("payload is a ToolResponse")
}

/// Decode the base64 `content` field of a captured update request body.
pub fn decoded_update_content(body: &Value) -> String {
    let encoded = body["content"].as_str().expect("content field");
    String::from_utf8(STANDARD.decode(encoded).expect("base64 content")).expect("utf-8 content")
}
