// SPDX-License-Identifier: MIT

//! MCP surface.
//!
//! Thin adapter between the MCP protocol and the [`ToolRouter`]: listing
//! mirrors the registry, and every call is answered with the router's
//! envelope serialized as JSON text content. Envelope failures map to MCP
//! error-flagged results, not protocol errors, so clients always receive the
//! envelope.

use crate::config::{SERVER_NAME, SERVER_VERSION};
use crate::core::router::ToolRouter;
use rmcp::model::{
    CallToolRequestParam, CallToolResult, Content, Implementation, ListToolsResult,
    PaginatedRequestParam, ProtocolVersion, ServerCapabilities, ServerInfo, Tool,
};
use rmcp::service::{RequestContext, RoleServer};
use rmcp::transport::stdio;
use rmcp::{ErrorData as McpError, ServerHandler, ServiceExt};
use serde_json::Value;
use std::borrow::Cow;
use std::sync::Arc;

#[derive(Clone)]
pub struct McpToolServer {
    router: Arc<ToolRouter>,
}

impl McpToolServer {
    pub fn new(router: Arc<ToolRouter>) -> Self {
        Self { router }
    }
}

impl ServerHandler for McpToolServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: SERVER_NAME.to_string(),
                version: SERVER_VERSION.to_string(),
                ..Default::default()
            },
            instructions: Some(
                "Vendoora tool server: AI coding assistance, analytics reporting, and \
                 visual page analysis. Every tool returns a JSON envelope with success, \
                 data, and timing metadata."
                    .to_string(),
            ),
        }
    }

    async fn list_tools(
        &self,
        _pagination: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        let mut tools = Vec::new();
        for descriptor in self.router.list_tools() {
            let schema = descriptor
                .input_schema
                .as_object()
                .cloned()
                .ok_or_else(|| {
                    McpError::internal_error(
                        format!("schema for {} is not an object", descriptor.name),
                        None,
                    )
                })?;
            tools.push(Tool::new(
                Cow::Owned(descriptor.name),
                Cow::Owned(descriptor.description),
                Arc::new(schema),
            ));
        }
        Ok(ListToolsResult::with_all_items(tools))
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        let arguments = Value::Object(request.arguments.unwrap_or_default());
        let envelope = self.router.call_tool(request.name.as_ref(), arguments).await;

        let text = serde_json::to_string_pretty(&envelope)
            .map_err(|e| McpError::internal_error(e.to_string(), None))?;
        let content = vec![Content::text(text)];

        if envelope.success {
            Ok(CallToolResult::success(content))
        } else {
            Ok(CallToolResult::error(content))
        }
    }
}

/// Serve the router over stdio until the peer disconnects.
pub async fn serve_stdio(router: Arc<ToolRouter>) -> Result<(), Box<dyn std::error::Error>> {
    let handler = McpToolServer::new(router);
    log::info!("{} v{} listening on stdio", SERVER_NAME, SERVER_VERSION);
    let service = handler.serve(stdio()).await?;
    service.waiting().await?;
    Ok(())
}
