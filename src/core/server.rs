//! MCP server implementation and lifecycle management.
//!
//! This module contains the main server handler that implements the MCP
//! protocol by delegating to the domain services. Tools are defined in
//! `domains/tools/definitions/` and routed through `build_tool_router`.

use rmcp::{
    ErrorData as McpError, RoleServer, ServerHandler, handler::server::tool::ToolRouter, model::*,
    service::RequestContext, tool_handler,
};
use std::sync::Arc;
use tracing::{info, instrument};

use super::config::Config;
use crate::domains::{
    builder::BuilderService, resources::ResourceService, tools::build_tool_router,
};

#[cfg(feature = "http")]
use crate::domains::tools::{ToolError, ToolRegistry};

const INSTRUCTIONS: &str = "Builder server: turns building or design instructions into a Mermaid \
     architecture diagram (generate_architecture), AI renderings (generate_image), or both \
     (full_build). See mcp://examples/usage for example instructions.";

/// The main MCP server handler.
///
/// Cheap to clone: every field is reference-counted and read-only.
#[derive(Clone)]
pub struct McpServer {
    /// Server configuration.
    config: Arc<Config>,

    /// The diagram / image pipeline shared by every request.
    builder: Arc<BuilderService>,

    /// Service for handling resource-related requests.
    resource_service: Arc<ResourceService>,

    /// Tool router for handling tool calls.
    tool_router: ToolRouter<Self>,
}

impl McpServer {
    /// Create a new MCP server with the production upstream clients.
    ///
    /// Fails when the configuration is incomplete, so a misconfigured process
    /// never starts serving.
    pub fn new(config: Config) -> super::error::Result<Self> {
        config.validate()?;
        let builder = BuilderService::from_config(&config)?;
        Ok(Self::with_builder(config, Arc::new(builder)))
    }

    /// Create a server around an already-built pipeline.
    pub fn with_builder(config: Config, builder: Arc<BuilderService>) -> Self {
        let config = Arc::new(config);
        let resource_service = Arc::new(ResourceService::new(config.clone()));

        Self {
            tool_router: build_tool_router::<Self>(builder.clone()),
            config,
            builder,
            resource_service,
        }
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    /// Get the server version.
    pub fn version(&self) -> &str {
        &self.config.server.version
    }

    /// Get the server configuration.
    pub fn config(&self) -> &Arc<Config> {
        &self.config
    }

    /// Get the builder pipeline.
    pub fn builder(&self) -> &Arc<BuilderService> {
        &self.builder
    }

    /// Usage instructions reported to clients.
    pub fn instructions(&self) -> &'static str {
        INSTRUCTIONS
    }

    // ========================================================================
    // HTTP Transport Support Methods
    // ========================================================================

    /// List all available tools (for HTTP transport).
    pub fn list_tools(&self) -> Vec<serde_json::Value> {
        self.tool_router
            .list_all()
            .into_iter()
            .map(|t| {
                serde_json::json!({
                    "name": t.name,
                    "description": t.description,
                    "inputSchema": t.input_schema
                })
            })
            .collect()
    }

    /// Call a tool by name (for HTTP transport).
    #[cfg(feature = "http")]
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: serde_json::Value,
    ) -> Result<serde_json::Value, ToolError> {
        ToolRegistry::new(self.builder.clone())
            .call_tool(name, arguments)
            .await
    }

    /// List all available resources (for HTTP transport).
    pub async fn list_resources(&self) -> Vec<serde_json::Value> {
        let resources = self.resource_service.list_resources().await;

        resources
            .into_iter()
            .map(|r| {
                serde_json::json!({
                    "uri": r.uri,
                    "name": r.name,
                    "description": r.description,
                    "mimeType": r.mime_type
                })
            })
            .collect()
    }

    /// Read a resource by URI (for HTTP transport).
    pub async fn read_resource(&self, uri: &str) -> Result<serde_json::Value, String> {
        match self.resource_service.read_resource(uri).await {
            Ok(result) => Ok(serde_json::json!({
                "contents": result.contents
            })),
            Err(e) => Err(e.to_string()),
        }
    }
}

/// ServerHandler implementation with tool_handler macro for automatic tool routing.
#[tool_handler]
impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(INSTRUCTIONS.to_string()),
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_resources()
                .build(),
            ..Default::default()
        }
    }

    #[instrument(skip(self, _context))]
    async fn list_resources(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourcesResult, McpError> {
        info!("Listing resources");
        let resources = self.resource_service.list_resources().await;
        Ok(ListResourcesResult {
            resources,
            next_cursor: None,
            meta: None,
        })
    }

    #[instrument(skip(self, _context))]
    async fn read_resource(
        &self,
        request: ReadResourceRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<ReadResourceResult, McpError> {
        info!("Reading resource: {}", request.uri);
        self.resource_service
            .read_resource(&request.uri)
            .await
            .map_err(|e| McpError::resource_not_found(e.to_string(), None))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Error;
    use crate::core::config::UpstreamConfig;
    use crate::domains::builder::testing::{FakeImageModel, FakeLanguageModel, call_log};

    #[test]
    fn test_missing_credentials_prevent_startup() {
        let result = McpServer::new(Config::default());
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_invalid_environment_prevents_startup() {
        let mut config = Config::default();
        config.credentials.anthropic_api_key = Some("sk-ant".into());
        config.credentials.openai_api_key = Some("sk-oa".into());
        config
            .invalid
            .push("MCP_UPSTREAM_TIMEOUT_SECS: 'ninety' is not a whole number of seconds".into());

        let err = McpServer::new(config).err().unwrap();
        assert!(matches!(err, Error::Config(_)));
        assert!(err.to_string().contains("MCP_UPSTREAM_TIMEOUT_SECS"));
    }

    #[test]
    fn test_new_with_credentials() {
        let mut config = Config::default();
        config.credentials.anthropic_api_key = Some("sk-ant".into());
        config.credentials.openai_api_key = Some("sk-oa".into());

        let server = McpServer::new(config).unwrap();
        assert_eq!(server.name(), "builder-mcp-server");
        assert_eq!(server.list_tools().len(), 3);
    }

    #[tokio::test]
    async fn test_list_resources_json() {
        let log = call_log();
        let builder = Arc::new(BuilderService::with_models(
            Arc::new(FakeLanguageModel::replying(log.clone(), "graph TD")),
            Arc::new(FakeImageModel::new(log)),
            &UpstreamConfig::default(),
        ));
        let server = McpServer::with_builder(Config::default(), builder);

        let resources = server.list_resources().await;
        assert_eq!(resources.len(), 2);
        assert!(server.read_resource("mcp://examples/usage").await.is_ok());
        assert!(server.read_resource("mcp://nope").await.is_err());
    }
}
