//! MCP transport setup.

use tokio::io::{AsyncRead, AsyncWrite, stdin, stdout};
use tracing::info;

use rmcp::ServiceExt;

use crate::error::ServeError;
use crate::tools::ToolRegistry;

use super::handler::ToolboxHandler;

/// Serve the registry over MCP on the given byte streams until the peer
/// disconnects.
pub async fn serve<R, W>(registry: ToolRegistry, reader: R, writer: W) -> Result<(), ServeError>
where
    R: AsyncRead + Send + Unpin + 'static,
    W: AsyncWrite + Send + Unpin + 'static,
{
    let names: Vec<String> = registry.list_tools().into_iter().map(|t| t.name).collect();
    info!("Serving tools over MCP: {}", names.join(", "));

    let server = ToolboxHandler::new(registry)
        .serve((reader, writer))
        .await
        .map_err(|e| ServeError::Initialize(e.to_string()))?;

    let quit_reason = server
        .waiting()
        .await
        .map_err(|e| ServeError::Stopped(e.to_string()))?;
    info!("MCP session finished: {:?}", quit_reason);

    Ok(())
}

/// Serve the registry on this process's stdin and stdout.
pub async fn serve_stdio(registry: ToolRegistry) -> Result<(), ServeError> {
    serve(registry, stdin(), stdout()).await
}
