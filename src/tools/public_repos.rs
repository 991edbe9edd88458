use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use tracing::error;

use crate::github::{ApiSettings, Repository};
use crate::repos::fetch_public_repos;

use super::{Tool, ToolOutput, ToolResponse, make_response, parse_args};

/// Status reported when GitHub could not be reached at all.
const UPSTREAM_UNAVAILABLE: u16 = 502;

#[derive(Debug, Deserialize)]
struct PublicReposArgs {
    username: String,
}

#[derive(Debug, Serialize)]
struct PublicReposReply<'a> {
    username: &'a str,
    repos: Vec<Repository>,
}

/// `fetch_all_public_repos_for_user`: first page of a user's public repositories.
pub struct PublicReposTool {
    settings: ApiSettings,
}

impl PublicReposTool {
    pub fn new(settings: ApiSettings) -> Self {
        Self { settings }
    }
}

#[async_trait]
impl Tool for PublicReposTool {
    fn name(&self) -> &'static str {
        "fetch_all_public_repos_for_user"
    }

    fn description(&self) -> &'static str {
        "Fetch the public repositories of a GitHub user (first page of results)."
    }

    fn parameters_schema(&self) -> JsonValue {
        serde_json::json!({
            "type": "object",
            "properties": {
                "username": {
                    "type": "string",
                    "description": "GitHub username"
                }
            },
            "required": ["username"]
        })
    }

    async fn execute(&self, args: JsonValue) -> ToolOutput {
        let args: PublicReposArgs = match parse_args(self.name(), args) {
            Ok(args) => args,
            Err(reply) => return reply,
        };

        if args.username.trim().is_empty() {
            return make_response(&ToolResponse::new(400, "Error: 'username' must not be empty."));
        }

        match fetch_public_repos(&self.settings, &args.username).await {
            Ok(repos) => make_response(&PublicReposReply {
                username: &args.username,
                repos,
            }),
            Err(e) => {
                error!("Repository listing for {} failed: {}", args.username, e);
                make_response(&ToolResponse::new(
                    e.status().unwrap_or(UPSTREAM_UNAVAILABLE),
                    format!(
                        "Error: Could not fetch repositories for '{}': {}",
                        args.username, e
                    ),
                ))
            }
        }
    }
}
