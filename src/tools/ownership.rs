use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::github::ApiSettings;
use crate::repos::check_ownership;

use super::{Tool, ToolOutput, ToolResponse, make_response, parse_args};

#[derive(Debug, Deserialize)]
struct OwnershipArgs {
    username: String,
    repo_name: String,
}

#[derive(Debug, Serialize)]
struct OwnershipReply<'a> {
    username: &'a str,
    repo_name: &'a str,
    owned: bool,
}

/// `is_repo_owned_by_user`: whether `username/repo_name` belongs to `username`.
///
/// A repository that cannot be found reports `owned: false`, exactly like
/// one owned by someone else.
pub struct RepoOwnershipTool {
    settings: ApiSettings,
}

impl RepoOwnershipTool {
    pub fn new(settings: ApiSettings) -> Self {
        Self { settings }
    }
}

#[async_trait]
impl Tool for RepoOwnershipTool {
    fn name(&self) -> &'static str {
        "is_repo_owned_by_user"
    }

    fn description(&self) -> &'static str {
        "Check if a repository is owned by a particular GitHub user. Returns owned=false when the repository does not exist."
    }

    fn parameters_schema(&self) -> JsonValue {
        serde_json::json!({
            "type": "object",
            "properties": {
                "username": {
                    "type": "string",
                    "description": "GitHub username"
                },
                "repo_name": {
                    "type": "string",
                    "description": "Repository name"
                }
            },
            "required": ["username", "repo_name"]
        })
    }

    async fn execute(&self, args: JsonValue) -> ToolOutput {
        let args: OwnershipArgs = match parse_args(self.name(), args) {
            Ok(args) => args,
            Err(reply) => return reply,
        };

        if args.username.trim().is_empty() || args.repo_name.trim().is_empty() {
            return make_response(&ToolResponse::new(
                400,
                "Error: 'username' and 'repo_name' must not be empty.",
            ));
        }

        let ownership = check_ownership(&self.settings, &args.username, &args.repo_name).await;

        make_response(&OwnershipReply {
            username: &args.username,
            repo_name: &args.repo_name,
            owned: ownership.is_owned(),
        })
    }
}
