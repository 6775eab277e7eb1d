//! Tool Router - builds the rmcp ToolRouter for MCP clients.
//!
//! Each tool knows how to create its own route.

use std::sync::Arc;

use rmcp::handler::server::tool::ToolRouter;

use crate::domains::builder::BuilderService;

use super::definitions::{FullBuildTool, GenerateArchitectureTool, GenerateImageTool};

/// Build the tool router with all registered tools.
pub fn build_tool_router<S>(builder: Arc<BuilderService>) -> ToolRouter<S>
where
    S: Send + Sync + 'static,
{
    ToolRouter::new()
        .with_route(GenerateArchitectureTool::create_route(builder.clone()))
        .with_route(GenerateImageTool::create_route(builder.clone()))
        .with_route(FullBuildTool::create_route(builder))
}
