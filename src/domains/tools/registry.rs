//! Tool Registry - central registration and dispatch for all tools.
//!
//! This module provides:
//! - A registry of all available tools
//! - Name-based dispatch for tool calls coming over HTTP

use std::sync::Arc;
#[cfg(feature = "http")]
use tracing::warn;

use crate::domains::builder::BuilderService;
#[cfg(feature = "http")]
use crate::domains::tools::ToolError;

use super::definitions::{FullBuildTool, GenerateArchitectureTool, GenerateImageTool};

/// Tool registry - maps tool names to their handlers.
#[derive(Clone)]
pub struct ToolRegistry {
    #[cfg_attr(not(feature = "http"), allow(dead_code))]
    builder: Arc<BuilderService>,
}

impl ToolRegistry {
    /// Create a new tool registry.
    pub fn new(builder: Arc<BuilderService>) -> Self {
        Self { builder }
    }

    /// Get all tool names.
    pub fn tool_names(&self) -> Vec<&'static str> {
        vec![
            GenerateArchitectureTool::NAME,
            GenerateImageTool::NAME,
            FullBuildTool::NAME,
        ]
    }

    /// Dispatch a tool call by name and return its plain JSON result.
    #[cfg(feature = "http")]
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: serde_json::Value,
    ) -> Result<serde_json::Value, ToolError> {
        let builder = self.builder.clone();
        match name {
            GenerateArchitectureTool::NAME => {
                GenerateArchitectureTool::http_handler(arguments, builder).await
            }
            GenerateImageTool::NAME => GenerateImageTool::http_handler(arguments, builder).await,
            FullBuildTool::NAME => FullBuildTool::http_handler(arguments, builder).await,
            _ => {
                warn!("Unknown tool requested: {}", name);
                Err(ToolError::not_found(name))
            }
        }
    }
}
