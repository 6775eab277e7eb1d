//! Transport layer for the MCP server.
//!
//! - **STDIO**: standard input/output for MCP clients - feature: `stdio`
//! - **HTTP**: REST routes for browser front-ends plus JSON-RPC over POST - feature: `http`
//!
//! Both transports delegate to the same `McpServer`, so the three builder
//! operations behave identically whichever way they are reached.

mod config;
mod error;
mod service;

#[cfg(feature = "http")]
pub mod http;

#[cfg(feature = "stdio")]
pub mod stdio;

pub use config::TransportConfig;
pub use error::{TransportError, TransportResult};
pub use service::TransportService;

#[cfg(feature = "http")]
pub use config::HttpConfig;
