//! Builder MCP Server Library
//!
//! Turns free-text building or design instructions into a Mermaid
//! architecture diagram, AI-generated renderings, or both, and exposes those
//! operations as MCP tools and as plain HTTP routes.
//!
//! # Architecture
//!
//! - **core**: configuration, error handling, the MCP server handler and transports
//! - **domains**: business logic organized by bounded contexts
//!   - **builder**: sanitizing, diagram and image generation, upstream API clients
//!   - **tools**: MCP tools wrapping the builder operations
//!   - **resources**: read-only documents (usage examples, server info)
//!
//! # Example
//!
//! ```rust,no_run
//! use builder_mcp_server::core::{Config, McpServer, TransportService};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env();
//!     let server = McpServer::new(config.clone())?;
//!     TransportService::new(config.transport).run(server).await?;
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use core::{Config, Error, McpServer, Result};
