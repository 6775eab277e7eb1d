//! Domains module containing business logic organized by bounded contexts.
//!
//! - **builder**: the diagram / image pipeline and its upstream clients
//! - **tools**: MCP tools wrapping the builder operations
//! - **resources**: read-only documents served to MCP clients

pub mod builder;
pub mod resources;
pub mod tools;
