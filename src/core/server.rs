//! MCP Server implementation and lifecycle management.
//!
//! [`McpServer`] is the facade every transport talks to. It owns the
//! populated [`Registry`] and routes requests through the [`Dispatcher`]
//! (resources and tools) and the [`QueryRouter`] (free-text queries).
//!
//! ## Registration
//!
//! Definitions are registered through [`McpServerBuilder`] before the
//! server starts; the registry is frozen behind an `Arc` once built.
//! `McpServer::new` registers the built-in definitions from
//! `domains/resources/definitions/` and `domains/tools/definitions/`.

use std::sync::Arc;
use tracing::info;

use super::config::Config;
use super::envelope::Metadata;
use super::error::Result;
use crate::domains::llm::{LlmProvider, create_provider};
use crate::domains::query::{QueryResponse, QueryRouter};
use crate::domains::resources::{self, ResourceError, ResourceHandler, ResourceResult};
use crate::domains::tools::{self, Params, ToolError, ToolHandler, ToolResult};
use crate::domains::{Dispatcher, Registry};

/// The main MCP server handler.
#[derive(Clone)]
pub struct McpServer {
    /// Server configuration.
    config: Arc<Config>,

    /// Catalog of resources and tools.
    registry: Arc<Registry>,

    /// Resolves resource URIs and tool names to handlers.
    dispatcher: Dispatcher,

    /// Answers free-text queries.
    query_router: QueryRouter,
}

impl McpServer {
    /// Create a server with the built-in definitions registered.
    ///
    /// Fails when the configured generator backend cannot be constructed.
    pub fn new(config: Config) -> Result<Self> {
        Self::builder(config).with_default_definitions().build()
    }

    /// Start building a server with an empty registry.
    pub fn builder(config: Config) -> McpServerBuilder {
        McpServerBuilder::new(config)
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

    /// Get the registry.
    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    /// Whether unmatched queries are forwarded to a generator.
    pub fn has_generator(&self) -> bool {
        self.query_router.has_generator()
    }

    /// Names of all registered resources, in registration order.
    pub fn list_resource_names(&self) -> Vec<String> {
        self.registry.list_resource_names()
    }

    /// Names of all registered tools, in registration order.
    pub fn list_tool_names(&self) -> Vec<String> {
        self.registry.list_tool_names()
    }

    /// Read a resource by URI.
    pub async fn read_resource(
        &self,
        uri: &str,
    ) -> std::result::Result<ResourceResult, ResourceError> {
        self.dispatcher.read_resource(uri).await
    }

    /// Call a tool by name.
    pub async fn call_tool(
        &self,
        name: &str,
        params: Option<Params>,
    ) -> std::result::Result<ToolResult, ToolError> {
        self.dispatcher.call_tool(name, params).await
    }

    /// Answer a free-text query. Never fails; see [`QueryRouter::process`].
    pub async fn process_user_query(
        &self,
        query: &str,
        context: Option<&Metadata>,
    ) -> QueryResponse {
        self.query_router.process(query, context).await
    }
}

/// Builder for [`McpServer`].
pub struct McpServerBuilder {
    config: Config,
    registry: Registry,
    generator: Option<Arc<dyn LlmProvider>>,
}

impl McpServerBuilder {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            registry: Registry::new(),
            generator: None,
        }
    }

    /// Register the built-in resources and tools.
    pub fn with_default_definitions(mut self) -> Self {
        resources::definitions::register_defaults(&mut self.registry);
        tools::definitions::register_defaults(&mut self.registry, &self.config);
        self
    }

    /// Register a resource.
    pub fn resource(
        mut self,
        name: impl Into<String>,
        uri: impl Into<String>,
        metadata: Metadata,
        handler: impl ResourceHandler + 'static,
    ) -> Self {
        self.registry.register_resource(name, uri, metadata, handler);
        self
    }

    /// Register a tool.
    pub fn tool(
        mut self,
        name: impl Into<String>,
        metadata: Metadata,
        handler: impl ToolHandler + 'static,
    ) -> Self {
        self.registry.register_tool(name, metadata, handler);
        self
    }

    /// Use `generator` instead of the backend named in the configuration.
    pub fn generator(mut self, generator: Arc<dyn LlmProvider>) -> Self {
        self.generator = Some(generator);
        self
    }

    /// Freeze the registry and assemble the server.
    pub fn build(self) -> Result<McpServer> {
        let generator = match (self.generator, &self.config.llm) {
            (Some(generator), _) => Some(generator),
            (None, Some(llm)) => Some(create_provider(llm)?),
            (None, None) => None,
        };

        let registry = Arc::new(self.registry);
        info!(
            "Registry ready: {} resource(s), {} tool(s)",
            registry.resource_count(),
            registry.tool_count()
        );

        let mut query_router = QueryRouter::new(registry.clone());
        if let Some(generator) = generator {
            query_router = query_router.with_generator(generator);
        }

        Ok(McpServer {
            config: Arc::new(self.config),
            dispatcher: Dispatcher::new(registry.clone()),
            registry,
            query_router,
        })
    }
}

#[cfg(feature = "stdio")]
mod handler {
    use rmcp::{
        ErrorData as McpError, RoleServer, ServerHandler, model::*, service::RequestContext,
    };
    use std::sync::Arc;
    use tracing::{info, instrument};

    use super::McpServer;
    use crate::domains::llm::ToolDescriptor;
    use crate::domains::resources::ResourceEntry;
    use crate::domains::tools::ToolEntry;

    fn to_mcp_resource(entry: &ResourceEntry) -> Resource {
        let mut raw = RawResource::new(entry.uri(), entry.name());
        raw.description = entry.description().map(str::to_string);
        raw.mime_type = entry
            .metadata()
            .get("mimeType")
            .and_then(|v| v.as_str())
            .map(str::to_string);
        raw.no_annotation()
    }

    fn to_mcp_tool(entry: &ToolEntry) -> Tool {
        let descriptor = ToolDescriptor::for_tool_name(entry.name());
        let input_schema = match descriptor.parameters {
            serde_json::Value::Object(map) => map,
            _ => JsonObject::new(),
        };

        Tool {
            name: entry.name().to_string().into(),
            description: Some(
                entry
                    .description()
                    .map(str::to_string)
                    .unwrap_or(descriptor.description)
                    .into(),
            ),
            input_schema: Arc::new(input_schema),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }

    impl ServerHandler for McpServer {
        fn get_info(&self) -> ServerInfo {
            ServerInfo {
                instructions: Some(
                    "Exposes registered resources and tools. Read resources by URI and call tools by name."
                        .to_string(),
                ),
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
            Ok(ListResourcesResult {
                resources: self
                    .registry
                    .resource_entries()
                    .iter()
                    .map(to_mcp_resource)
                    .collect(),
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
            let result = self
                .dispatcher
                .read_resource(&request.uri)
                .await
                .map_err(|e| {
                    if e.is_not_found() {
                        McpError::resource_not_found(e.to_string(), None)
                    } else {
                        McpError::internal_error(e.to_string(), None)
                    }
                })?;

            let content = result
                .into_result()
                .map_err(|message| McpError::internal_error(message, None))?;

            Ok(ReadResourceResult {
                contents: vec![ResourceContents::text(content.content, request.uri)],
            })
        }

        #[instrument(skip(self, _context))]
        async fn list_tools(
            &self,
            _request: Option<PaginatedRequestParam>,
            _context: RequestContext<RoleServer>,
        ) -> Result<ListToolsResult, McpError> {
            info!("Listing tools");
            Ok(ListToolsResult {
                tools: self
                    .registry
                    .tool_entries()
                    .iter()
                    .map(to_mcp_tool)
                    .collect(),
                next_cursor: None,
                meta: None,
            })
        }

        #[instrument(skip(self, _context), fields(tool = %request.name))]
        async fn call_tool(
            &self,
            request: CallToolRequestParam,
            _context: RequestContext<RoleServer>,
        ) -> Result<CallToolResult, McpError> {
            info!("Calling tool: {}", request.name);
            let result = self
                .dispatcher
                .call_tool(&request.name, request.arguments)
                .await
                .map_err(|e| {
                    if e.is_not_found() {
                        McpError::invalid_params(e.to_string(), None)
                    } else {
                        McpError::internal_error(e.to_string(), None)
                    }
                })?;

            match result.into_result() {
                Ok(output) => {
                    let text = serde_json::to_string(&output)
                        .map_err(|e| McpError::internal_error(e.to_string(), None))?;
                    Ok(CallToolResult::success(vec![Content::text(text)]))
                }
                Err(message) => Ok(CallToolResult::error(vec![Content::text(message)])),
            }
        }
    }

}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::{LlmConfig, LlmProviderKind};
    use crate::core::envelope::Envelope;
    use crate::core::error::Error;
    use crate::domains::llm::LlmError;
    use crate::domains::tools::ToolOutput;
    use serde_json::json;

    #[test]
    fn test_new_registers_defaults() {
        let server = McpServer::new(Config::default()).unwrap();
        assert_eq!(server.list_resource_names(), vec!["hello"]);
        assert_eq!(server.list_tool_names(), vec!["explore", "server-info"]);
        assert!(!server.has_generator());
        assert_eq!(server.name(), "mcp-query-server");
    }

    #[tokio::test]
    async fn test_builder_with_custom_tool() {
        let server = McpServer::builder(Config::default())
            .tool("echo", Metadata::new(), |params: Option<Params>| async move {
                anyhow::Ok(Envelope::ok(ToolOutput::new(json!(params))))
            })
            .build()
            .unwrap();

        assert_eq!(server.list_tool_names(), vec!["echo"]);
        assert!(server.list_resource_names().is_empty());

        let mut params = Params::new();
        params.insert("x".to_string(), json!(1));
        let result = server.call_tool("echo", Some(params)).await.unwrap();
        assert!(result.is_success());
        assert_eq!(result.data().unwrap().result, json!({"x": 1}));
    }

    #[tokio::test]
    async fn test_read_default_resource() {
        let server = McpServer::new(Config::default()).unwrap();
        let result = server.read_resource("file:///hello.txt").await.unwrap();
        assert!(result.is_success());

        let err = server.read_resource("file:///missing.txt").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_process_user_query() {
        let server = McpServer::builder(Config::default()).build().unwrap();

        let response = server.process_user_query("hola", None).await;
        assert!(response.is_success());

        let response = server.process_user_query("calcula ???", None).await;
        assert!(!response.is_success());
    }

    #[test]
    fn test_generator_from_config() {
        let config = Config::default().with_llm(LlmConfig::ollama("http://localhost:11434", "llama2"));
        let server = McpServer::new(config).unwrap();
        assert!(server.has_generator());
    }

    #[test]
    fn test_unsupported_generator_fails_fast() {
        let config = Config::default().with_llm(LlmConfig::new(LlmProviderKind::Anthropic));
        let result = McpServer::new(config);
        assert!(matches!(
            result,
            Err(Error::Llm(LlmError::UnsupportedProvider(LlmProviderKind::Anthropic)))
        ));
    }
}
