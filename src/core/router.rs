// SPDX-License-Identifier: MIT

//! Tool dispatch and the uniform result envelope.
//!
//! Every invocation produces exactly one [`ToolResult`], whether the handler
//! completes, fails, or panics. Nothing above this boundary crashes the
//! process because of a handler fault.

use crate::core::error::ToolError;
use crate::core::metrics::MetricsSink;
use crate::core::registry::ToolRegistry;
use crate::core::tool::ToolDescriptor;
use chrono::{DateTime, Utc};
use futures::FutureExt;
use serde::Serialize;
use serde_json::Value;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Instant;

/// Fixed notice returned by model-dependent tools when no credential is set.
pub const MODEL_UNCONFIGURED_NOTICE: &str =
    "OpenAI API key is not configured. Please set OPENAI_API_KEY (or OPENAI_API_KEY_LOCAL) to enable AI features.";

/// Per-invocation metadata attached to every envelope.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultMetadata {
    pub timestamp: DateTime<Utc>,
    pub tool: String,
    pub duration_ms: u64,
    pub data_points: u64,
    pub insights: Vec<String>,
}

/// Uniform success/failure wrapper returned for every invocation.
#[derive(Debug, Clone, Serialize)]
pub struct ToolResult {
    pub success: bool,
    pub data: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub metadata: ResultMetadata,
}

impl ToolResult {
    fn ok(tool: &str, data: Value, started: Instant, timestamp: DateTime<Utc>) -> Self {
        // Auxiliary counts come from the payload when the handler provides
        // them (the analytics tools do), zero otherwise.
        let data_points = data
            .get("dataPoints")
            .and_then(Value::as_u64)
            .unwrap_or(0);
        let insights = data
            .get("insights")
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(|v| v.as_str().map(str::to_string))
                    .collect()
            })
            .unwrap_or_default();

        Self {
            success: true,
            data,
            error: None,
            metadata: ResultMetadata {
                timestamp,
                tool: tool.to_string(),
                duration_ms: started.elapsed().as_millis() as u64,
                data_points,
                insights,
            },
        }
    }

    fn fail(tool: &str, message: String, started: Instant, timestamp: DateTime<Utc>) -> Self {
        Self {
            success: false,
            data: Value::Null,
            error: Some(message),
            metadata: ResultMetadata {
                timestamp,
                tool: tool.to_string(),
                duration_ms: started.elapsed().as_millis() as u64,
                data_points: 0,
                insights: Vec::new(),
            },
        }
    }
}

/// Dispatches named invocations to exactly one handler each and guarantees
/// the envelope invariant.
///
/// The router holds no mutable state besides the append-only sink; requests
/// are handled one at a time by the stdio transport above it.
pub struct ToolRouter {
    registry: ToolRegistry,
    sink: Arc<MetricsSink>,
    model_available: bool,
}

impl ToolRouter {
    pub fn new(registry: ToolRegistry, sink: Arc<MetricsSink>, model_available: bool) -> Self {
        Self {
            registry,
            sink,
            model_available,
        }
    }

    /// The advertised capability surface, in stable registration order.
    pub fn list_tools(&self) -> Vec<ToolDescriptor> {
        self.registry.descriptors()
    }

    pub fn sink(&self) -> &Arc<MetricsSink> {
        &self.sink
    }

    /// Invoke one tool by name. Infallible at this signature: unknown names,
    /// handler errors, and handler panics all come back as failure envelopes.
    pub async fn call_tool(&self, name: &str, arguments: Value) -> ToolResult {
        let started = Instant::now();
        let timestamp = Utc::now();

        let tool = match self.registry.get(name) {
            Some(tool) => Arc::clone(tool),
            None => {
                log::warn!("Rejected call to unknown tool '{}'", name);
                let result = ToolResult::fail(
                    name,
                    ToolError::tool_not_found(name).to_string(),
                    started,
                    timestamp,
                );
                self.sink.record_invocation(name, false, result.metadata.duration_ms);
                return result;
            }
        };

        // Cross-cutting model gate: tools declaring the language-model
        // dependency degrade to a fixed notice instead of failing when no
        // credential is configured.
        if tool.needs_model() && !self.model_available {
            log::info!("Tool '{}' answered with model-unconfigured notice", name);
            let result = ToolResult::ok(
                name,
                Value::String(MODEL_UNCONFIGURED_NOTICE.to_string()),
                started,
                timestamp,
            );
            self.sink.record_invocation(name, true, result.metadata.duration_ms);
            return result;
        }

        log::info!("Executing tool: {}", name);

        let outcome = AssertUnwindSafe(tool.execute(arguments)).catch_unwind().await;

        let result = match outcome {
            Ok(Ok(payload)) => ToolResult::ok(name, payload, started, timestamp),
            Ok(Err(err)) => {
                log::error!("Tool '{}' failed: {}", name, err);
                ToolResult::fail(name, err.to_string(), started, timestamp)
            }
            Err(panic) => {
                let detail = panic
                    .downcast_ref::<&str>()
                    .map(|s| (*s).to_string())
                    .or_else(|| panic.downcast_ref::<String>().cloned())
                    .unwrap_or_else(|| "unknown panic".to_string());
                log::error!("Tool '{}' panicked: {}", name, detail);
                ToolResult::fail(
                    name,
                    format!("Tool '{}' panicked: {}", name, detail),
                    started,
                    timestamp,
                )
            }
        };

        self.sink
            .record_invocation(name, result.success, result.metadata.duration_ms);
        result
    }
}
