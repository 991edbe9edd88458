use async_trait::async_trait;
use serde_json::Value as JsonValue;

use crate::edit::{EditRequest, replace_in_file};
use crate::github::ApiSettings;

use super::{Tool, ToolOutput, ToolResponse, make_response, parse_args};

/// `code_replace_in_file`: literal search-and-replace in one file, committed
/// directly to the default branch.
pub struct ReplaceInFileTool {
    settings: ApiSettings,
}

impl ReplaceInFileTool {
    pub fn new(settings: ApiSettings) -> Self {
        Self { settings }
    }
}

#[async_trait]
impl Tool for ReplaceInFileTool {
    fn name(&self) -> &'static str {
        "code_replace_in_file"
    }

    fn description(&self) -> &'static str {
        "Finds and replaces every occurrence of text within a file in a GitHub repository, then commits the change directly to the default branch. The GitHub token must be provided to authenticate the request."
    }

    fn parameters_schema(&self) -> JsonValue {
        serde_json::json!({
            "type": "object",
            "properties": {
                "owner": {
                    "type": "string",
                    "description": "The GitHub repository owner (e.g., 'octocat')"
                },
                "repo": {
                    "type": "string",
                    "description": "The name of the repository (e.g., 'Spoon-Knife')"
                },
                "file_path": {
                    "type": "string",
                    "description": "The full path to the file to modify (e.g., 'src/main.py')"
                },
                "search_text": {
                    "type": "string",
                    "description": "The exact, non-empty text to search for"
                },
                "replacement_text": {
                    "type": "string",
                    "description": "The replacement text; empty deletes the matched text"
                },
                "github_token": {
                    "type": "string",
                    "description": "GitHub personal access token or app token with write access"
                },
                "commit_message": {
                    "type": "string",
                    "description": "The commit message for the change",
                    "default": crate::edit::DEFAULT_COMMIT_MESSAGE
                }
            },
            "required": ["owner", "repo", "file_path", "search_text", "replacement_text", "github_token"]
        })
    }

    async fn execute(&self, args: JsonValue) -> ToolOutput {
        let request: EditRequest = match parse_args(self.name(), args) {
            Ok(request) => request,
            Err(reply) => return reply,
        };

        let response = match replace_in_file(&self.settings, &request).await {
            Ok(outcome) => ToolResponse::new(
                200,
                format!(
                    "Success! File '{}' updated and committed. Commit URL: {}",
                    outcome.path, outcome.commit.html_url
                ),
            ),
            Err(e) => ToolResponse::from(&e),
        };

        make_response(&response)
    }
}
