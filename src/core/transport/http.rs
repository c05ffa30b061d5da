//! HTTP transport implementation.
//!
//! REST endpoints over the server facade:
//!
//! | Route            | Purpose                                   |
//! |------------------|-------------------------------------------|
//! | `GET /`          | Liveness payload                          |
//! | `GET /health`    | Health check                              |
//! | `GET /resources` | Registered resource names                 |
//! | `GET /tools`     | Registered tool names                     |
//! | `GET /resource`  | Read a resource (`?uri=`)                 |
//! | `POST /tool`     | Call a tool (`{tool, params}` or `?name=`) |
//! | `POST /query`    | Free-text query (`{query, context}` or `?query=`) |
//!
//! Errors are returned as `{"error": "<message>"}`.

use axum::{
    Json, Router,
    extract::{Query, State},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use bytes::Bytes;
use http::{HeaderValue, Method, StatusCode, Uri};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::json;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, instrument, warn};

use super::{TransportError, TransportResult, config::HttpConfig};
use crate::core::McpServer;
use crate::core::envelope::{Metadata, now_millis};
use crate::domains::tools::Params;

/// HTTP transport handler.
pub struct HttpTransport {
    config: HttpConfig,
}

impl HttpTransport {
    /// Create a new HTTP transport with the given config.
    pub fn new(config: HttpConfig) -> Self {
        Self { config }
    }

    /// Run the HTTP transport.
    pub async fn run(self, server: McpServer) -> TransportResult<()> {
        let addr = self.config.address();
        let app = router(server, &self.config)?;

        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| TransportError::bind(&addr, e))?;

        let cors_status = if self.config.enable_cors {
            self.config.cors_origin.as_str()
        } else {
            "disabled"
        };
        info!("Ready - listening on http://{} (CORS {})", addr, cors_status);
        info!("  → Resources: GET /resources, GET /resource?uri=...");
        info!("  → Tools:     GET /tools, POST /tool");
        info!("  → Queries:   POST /query");

        axum::serve(listener, app)
            .await
            .map_err(|e| TransportError::http(e.to_string()))?;

        Ok(())
    }
}

/// Build the REST router for `server`.
pub fn router(server: McpServer, config: &HttpConfig) -> TransportResult<Router> {
    let mut app = Router::new()
        .route("/", get(root_handler).fallback(not_found))
        .route("/health", get(health_check).fallback(not_found))
        .route("/resources", get(list_resources).fallback(not_found))
        .route("/tools", get(list_tools).fallback(not_found))
        .route("/resource", get(read_resource).fallback(not_found))
        .route("/tool", post(call_tool).fallback(not_found))
        .route("/query", post(process_query).fallback(not_found))
        .fallback(not_found)
        .with_state(server)
        .layer(TraceLayer::new_for_http());

    if config.enable_cors {
        app = app.layer(cors_layer(&config.cors_origin)?);
    }

    Ok(app)
}

fn cors_layer(origin: &str) -> TransportResult<CorsLayer> {
    let allow_origin = if origin == "*" {
        AllowOrigin::any()
    } else {
        let value = HeaderValue::from_str(origin)
            .map_err(|e| TransportError::config(format!("invalid CORS origin {origin:?}: {e}")))?;
        AllowOrigin::exact(value)
    };

    Ok(CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any))
}

/// Error response with a `{"error": ...}` body.
#[derive(Debug)]
struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

/// Body of `POST /tool`.
#[derive(Debug, Default, Deserialize)]
struct ToolRequest {
    #[serde(default)]
    tool: Option<String>,
    #[serde(default)]
    params: Option<Params>,
}

/// Body of `POST /query`.
#[derive(Debug, Default, Deserialize)]
struct QueryRequest {
    #[serde(default)]
    query: Option<String>,
    #[serde(default)]
    context: Option<Metadata>,
}

#[derive(Debug, Deserialize)]
struct ResourceParams {
    uri: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ToolParams {
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct QueryParams {
    query: Option<String>,
}

/// Decode a JSON body; an empty body yields the default request.
fn parse_body<T: DeserializeOwned + Default>(body: &Bytes) -> Result<T, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }
    serde_json::from_slice(body)
        .map_err(|e| ApiError::bad_request(format!("Invalid JSON body: {e}")))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Root handler - liveness payload.
async fn root_handler() -> impl IntoResponse {
    Json(json!({
        "message": "MCP server is running",
        "timestamp": now_millis(),
        "test": true
    }))
}

/// Health check endpoint.
async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "timestamp": now_millis()
    }))
}

async fn list_resources(State(server): State<McpServer>) -> impl IntoResponse {
    Json(json!({ "resources": server.list_resource_names() }))
}

async fn list_tools(State(server): State<McpServer>) -> impl IntoResponse {
    Json(json!({ "tools": server.list_tool_names() }))
}

#[instrument(skip(server))]
async fn read_resource(
    State(server): State<McpServer>,
    Query(params): Query<ResourceParams>,
) -> Result<Response, ApiError> {
    let uri = non_empty(params.uri).ok_or_else(|| ApiError::bad_request("URI is required"))?;

    match server.read_resource(&uri).await {
        Ok(result) => Ok(Json(result).into_response()),
        Err(e) if e.is_not_found() => Err(ApiError::new(StatusCode::NOT_FOUND, e.to_string())),
        Err(e) => Err(ApiError::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Error reading resource: {e}"),
        )),
    }
}

#[instrument(skip(server, body))]
async fn call_tool(
    State(server): State<McpServer>,
    Query(query): Query<ToolParams>,
    body: Bytes,
) -> Result<Response, ApiError> {
    let request: ToolRequest = parse_body(&body)?;
    let name = non_empty(request.tool)
        .or_else(|| non_empty(query.name))
        .ok_or_else(|| ApiError::bad_request("Tool name is required"))?;

    match server.call_tool(&name, request.params).await {
        Ok(result) => Ok(Json(result).into_response()),
        Err(e) if e.is_not_found() => Err(ApiError::new(StatusCode::NOT_FOUND, e.to_string())),
        Err(e) => Err(ApiError::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Error executing tool: {e}"),
        )),
    }
}

#[instrument(skip(server, body))]
async fn process_query(
    State(server): State<McpServer>,
    Query(params): Query<QueryParams>,
    body: Bytes,
) -> Result<Response, ApiError> {
    let request: QueryRequest = parse_body(&body)?;
    let query = non_empty(request.query)
        .or_else(|| non_empty(params.query))
        .ok_or_else(|| ApiError::bad_request("Query is required"))?;

    let response = server
        .process_user_query(&query, request.context.as_ref())
        .await;
    Ok(Json(response).into_response())
}

async fn not_found(method: Method, uri: Uri) -> ApiError {
    warn!("Unknown endpoint: {} {}", method, uri.path());
    ApiError::new(StatusCode::NOT_FOUND, "Endpoint not found")
}
