//! Tools exposed to an agent host.
//!
//! Every tool takes a JSON argument object and answers with an envelope
//! list. Failures are reported inside the envelope, never as errors.

pub mod envelope;
pub mod ownership;
pub mod public_repos;
pub mod registry;
pub mod replace_in_file;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;

pub use envelope::{Envelope, ToolOutput, ToolResponse, make_response};
pub use ownership::RepoOwnershipTool;
pub use public_repos::PublicReposTool;
pub use registry::{ToolInfo, ToolRegistry};
pub use replace_in_file::ReplaceInFileTool;

#[async_trait]
pub trait Tool: Send + Sync {
    fn name(&self) -> &'static str;
    fn description(&self) -> &'static str;
    fn parameters_schema(&self) -> JsonValue;
    async fn execute(&self, args: JsonValue) -> ToolOutput;
}

/// Decode tool arguments, or the 400 reply to send back instead.
pub(crate) fn parse_args<T: DeserializeOwned>(tool: &str, args: JsonValue) -> Result<T, ToolOutput> {
    serde_json::from_value(args).map_err(|e| {
        make_response(&ToolResponse::new(
            400,
            format!("Error: Invalid arguments for {}: {}", tool, e),
        ))
    })
}
