//! Model Context Protocol surface for the tool registry.
//!
//! Agent hosts launch the binary, speak MCP over stdio and see the three
//! tools with their argument schemas. Each call answers with the envelope
//! list, one text content item per envelope.

pub mod handler;
pub mod server;

pub use handler::ToolboxHandler;
pub use server::{serve, serve_stdio};
