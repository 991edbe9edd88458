//! Name-keyed tool lookup.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use serde::Serialize;
use serde_json::Value as JsonValue;
use tracing::info;

use crate::error::RegistryError;
use crate::github::ApiSettings;

use super::{PublicReposTool, RepoOwnershipTool, ReplaceInFileTool, Tool, ToolOutput};

/// Description of a registered tool, as advertised to the host.
#[derive(Debug, Clone, Serialize)]
pub struct ToolInfo {
    pub name: String,
    pub description: String,
    #[serde(rename = "inputSchema")]
    pub parameters: JsonValue,
}

#[derive(Default)]
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn Tool>>,
}

impl ToolRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding every tool this crate provides.
    pub fn with_defaults(settings: ApiSettings) -> Self {
        let mut registry = Self::new();
        registry.register(PublicReposTool::new(settings.clone()));
        registry.register(RepoOwnershipTool::new(settings.clone()));
        registry.register(ReplaceInFileTool::new(settings));
        registry
    }

    /// Add a tool, replacing any tool already registered under its name.
    pub fn register<T: Tool + 'static>(&mut self, tool: T) {
        self.tools.insert(tool.name().to_string(), Arc::new(tool));
    }

    pub async fn call(&self, tool_name: &str, args: JsonValue) -> Result<ToolOutput, RegistryError> {
        let tool = self
            .tools
            .get(tool_name)
            .ok_or_else(|| RegistryError::UnknownTool(tool_name.to_string()))?;

        let start = Instant::now();
        let output = tool.execute(args).await;
        info!(
            tool = tool_name,
            duration_ms = start.elapsed().as_millis() as u64,
            "Tool call finished"
        );

        Ok(output)
    }

    /// Registered tools, sorted by name.
    pub fn list_tools(&self) -> Vec<ToolInfo> {
        let mut tools: Vec<ToolInfo> = self
            .tools
            .values()
            .map(|t| ToolInfo {
                name: t.name().to_string(),
                description: t.description().to_string(),
                parameters: t.parameters_schema(),
            })
            .collect();
        tools.sort_by(|a, b| a.name.cmp(&b.name));
        tools
    }
}
