//! MCP Server implementation
//!
//! Implements the Model Context Protocol server for stdio transport.

use std::sync::Arc;

use serde_json::Value;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};

use crate::error::Result;
use crate::mcp::policy::ToolPolicy;
use crate::mcp::tools::ToolHandler;
use crate::mcp::types::*;
use crate::zia::client::ZiaClient;

/// MCP Server info
pub const SERVER_NAME: &str = "zscaler-mcp-server";
const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");

const INSTRUCTIONS: &str = "Tools for Zscaler Internet Access (ZIA). \
Write tools are only available when the server is started with write access. \
Deletions return a confirmation request first; repeat the call with \
kwargs='{\"confirmed\": true}' once the user has agreed.";

/// MCP Server for ZIA
pub struct McpServer {
    /// Tool handler
    tool_handler: ToolHandler,

    /// Whether the client sent notifications/initialized
    initialized: bool,
}

impl McpServer {
    /// Create a new MCP server
    pub fn new(zia_client: Arc<ZiaClient>, policy: ToolPolicy) -> Self {
        Self {
            tool_handler: ToolHandler::new(zia_client, policy),
            initialized: false,
        }
    }

    /// Whether the initialization handshake has completed
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Run the server on stdio
    pub async fn run_stdio(&mut self) -> Result<()> {
        let reader = BufReader::new(tokio::io::stdin());
        let writer = tokio::io::stdout();
        self.serve(reader, writer).await
    }

    /// Serve newline-delimited JSON-RPC until the reader is exhausted
    pub async fn serve<R, W>(&mut self, reader: R, mut writer: W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = reader.lines();

        while let Some(line) = lines.next_line().await? {
            if line.trim().is_empty() {
                continue;
            }

            if let Some(response) = self.handle_message(&line).await {
                let mut response_str = serde_json::to_string(&response)?;
                response_str.push('\n');
                writer.write_all(response_str.as_bytes()).await?;
                writer.flush().await?;
            }
        }

        tracing::info!("Input closed, shutting down");
        Ok(())
    }

    /// Handle an incoming JSON-RPC message, returning the response if one is due
    pub async fn handle_message(&mut self, message: &str) -> Option<JsonRpcResponse> {
        let value: Value = match serde_json::from_str(message) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!("Unparseable message: {}", e);
                return Some(JsonRpcResponse::error(
                    RequestId::Number(0),
                    JsonRpcError::parse_error(e.to_string()),
                ));
            }
        };

        let request: JsonRpcRequest = match serde_json::from_value(value.clone()) {
            Ok(req) => req,
            Err(e) => {
                tracing::warn!("Malformed request: {}", e);
                let id = value
                    .get("id")
                    .and_then(|id| serde_json::from_value(id.clone()).ok())
                    .unwrap_or(RequestId::Number(0));
                return Some(JsonRpcResponse::error(
                    id,
                    JsonRpcError::invalid_request(e.to_string()),
                ));
            }
        };

        let Some(id) = request.id.clone() else {
            self.handle_notification(&request);
            return None;
        };

        if request.jsonrpc != JSONRPC_VERSION {
            return Some(JsonRpcResponse::error(
                id,
                JsonRpcError::invalid_request(format!(
                    "Unsupported jsonrpc version: {}",
                    request.jsonrpc
                )),
            ));
        }

        tracing::debug!("Handling {}", request.method);

        let result = match request.method.as_str() {
            methods::INITIALIZE => self.handle_initialize(&request),
            methods::PING => Ok(serde_json::json!({})),
            methods::LIST_TOOLS => self.handle_list_tools(),
            methods::CALL_TOOL => self.handle_call_tool(&request).await,
            _ => {
                return Some(JsonRpcResponse::error(
                    id,
                    JsonRpcError::method_not_found(&request.method),
                ))
            }
        };

        Some(match result {
            Ok(value) => JsonRpcResponse::success(id, value),
            Err(error) => JsonRpcResponse::error(id, error),
        })
    }

    fn handle_notification(&mut self, request: &JsonRpcRequest) {
        match request.method.as_str() {
            methods::INITIALIZED => {
                self.initialized = true;
                tracing::info!("Client initialized");
            }
            methods::CANCELLED => tracing::debug!("Client cancelled a request"),
            other => tracing::debug!("Ignoring notification {}", other),
        }
    }

    /// Handle initialize request
    fn handle_initialize(
        &self,
        request: &JsonRpcRequest,
    ) -> std::result::Result<Value, JsonRpcError> {
        let params: InitializeParams = match request.params.clone() {
            Some(p) => serde_json::from_value(p).map_err(|e| {
                JsonRpcError::invalid_request(format!("Invalid initialize params: {}", e))
            })?,
            None => InitializeParams::default(),
        };

        let protocol_version = negotiate_version(params.protocol_version.as_deref());
        if let Some(client) = &params.client_info {
            tracing::info!(
                "Initializing for {} {} (protocol {})",
                client.name,
                client.version,
                protocol_version
            );
        }

        let result = InitializeResult {
            protocol_version: protocol_version.to_string(),
            server_info: ServerInfo {
                name: SERVER_NAME.to_string(),
                version: SERVER_VERSION.to_string(),
            },
            capabilities: ServerCapabilities {
                tools: Some(ToolsCapability {
                    list_changed: false,
                }),
            },
            instructions: Some(INSTRUCTIONS.to_string()),
        };

        to_value(result)
    }

    /// Handle list tools request
    fn handle_list_tools(&self) -> std::result::Result<Value, JsonRpcError> {
        to_value(ListToolsResult {
            tools: self.tool_handler.list_tools(),
        })
    }

    /// Handle call tool request
    async fn handle_call_tool(
        &self,
        request: &JsonRpcRequest,
    ) -> std::result::Result<Value, JsonRpcError> {
        let params: CallToolParams = match request.params.clone() {
            Some(p) => match serde_json::from_value(p) {
                Ok(params) => params,
                Err(e) => {
                    return to_value(CallToolResult::error(format!(
                        "Invalid tool parameters: {}",
                        e
                    )))
                }
            },
            None => return to_value(CallToolResult::error("Missing tool parameters")),
        };

        tracing::info!("Calling tool {}", params.name);
        let result = self
            .tool_handler
            .call_tool(&params.name, params.arguments)
            .await;
        to_value(result)
    }
}

fn to_value<T: serde::Serialize>(value: T) -> std::result::Result<Value, JsonRpcError> {
    serde_json::to_value(value).map_err(|e| JsonRpcError::internal_error(e.to_string()))
}
