//! Integration tests for the tool router and registry composition.
//!
//! These tests exercise the full dispatch path end to end using the real
//! registries plus mock collaborators, without any network access.

use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::Arc;
use vendoora_mcp::browser::{PageRenderer, PageSnapshot, Viewport};
use vendoora_mcp::config::{AppConfig, OpenAiConfig};
use vendoora_mcp::core::error::ToolError;
use vendoora_mcp::core::metrics::MetricsSink;
use vendoora_mcp::core::registry::ToolRegistry;
use vendoora_mcp::core::router::{ToolRouter, MODEL_UNCONFIGURED_NOTICE};
use vendoora_mcp::core::tool::Tool;
use vendoora_mcp::llm::CompletionClient;
use vendoora_mcp::tools::{build_registry, coding, FileReader, Toolset};

// ============================================================================
// Mock Components
// ============================================================================

/// Renderer that never touches the network.
struct StaticRenderer;

#[async_trait]
impl PageRenderer for StaticRenderer {
    async fn render(&self, url: &str, viewport: Viewport) -> Result<PageSnapshot, ToolError> {
        Ok(vendoora_mcp::browser::fetch::inspect_markup(
            url,
            viewport,
            150,
            "<html><head><title>Fixture</title></head><body>\
             <img src=\"/a.png\" alt=\"a\"><p aria-label=\"copy\">hi</p></body></html>",
        ))
    }
}

/// Minimal tool with a fixed reply, for registry-level tests.
struct EchoTool {
    name: String,
    schema: Value,
}

impl EchoTool {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            schema: json!({ "type": "object", "properties": {} }),
        }
    }
}

#[async_trait]
impl Tool for EchoTool {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        "Echoes its input"
    }

    fn schema(&self) -> &Value {
        &self.schema
    }

    async fn execute(&self, input: Value) -> Result<Value, ToolError> {
        Ok(json!({ "echo": input }))
    }
}

fn unconfigured_router(toolset: Toolset) -> ToolRouter {
    let config = AppConfig::unconfigured();
    let (registry, model_available) = build_registry(toolset, &config).unwrap();
    ToolRouter::new(registry, Arc::new(MetricsSink::new()), model_available)
}

/// Coding tools wired to a client that is configured but never reached,
/// because the handlers fail before issuing a request.
fn coding_router_with_model() -> ToolRouter {
    let cfg = OpenAiConfig {
        api_key: "test-key".to_string(),
        base_url: "http://localhost:9".to_string(),
        model: "gpt-4".to_string(),
    };
    let tools = coding::create_tools(
        Some(Arc::new(CompletionClient::new(&cfg))),
        Arc::new(FileReader),
    );
    let registry = ToolRegistry::new(tools).unwrap();
    ToolRouter::new(registry, Arc::new(MetricsSink::new()), true)
}

// ============================================================================
// Dispatch
// ============================================================================

#[tokio::test]
async fn every_advertised_analytics_tool_answers_with_an_envelope() {
    let router = unconfigured_router(Toolset::Analytics);

    // Arguments valid for all six analytics tools at once.
    let args = json!({
        "dataSource": "application",
        "metricType": "system",
        "reportType": "executive",
        "chartType": "line",
        "trendType": "user",
        "dashboardName": "ops",
    });

    let names: Vec<String> = router.list_tools().into_iter().map(|d| d.name).collect();
    assert_eq!(names.len(), 6);

    for name in names {
        let result = router.call_tool(&name, args.clone()).await;
        assert!(result.success, "{} failed: {:?}", name, result.error);
        assert_eq!(result.metadata.tool, name);
        assert!(result.error.is_none());
    }
}

#[tokio::test]
async fn unknown_tool_yields_failure_envelope_naming_the_tool() {
    let router = unconfigured_router(Toolset::Analytics);
    let result = router.call_tool("nonexistentTool", json!({})).await;

    assert!(!result.success);
    assert!(result.data.is_null());
    let error = result.error.unwrap();
    assert!(error.contains("nonexistentTool"));
    assert!(error.contains("not found"));
    assert_eq!(result.metadata.tool, "nonexistentTool");
}

#[tokio::test]
async fn listing_matches_dispatch_and_is_idempotent() {
    let router = unconfigured_router(Toolset::All);

    let first = router.list_tools();
    let second = router.list_tools();
    assert_eq!(first, second);
    assert_eq!(first.len(), 17);

    // Everything listed is callable (no tool listed but unroutable).
    for descriptor in first {
        let result = router.call_tool(&descriptor.name, json!({})).await;
        assert_ne!(
            result.error.as_deref(),
            Some(&format!("Tool '{}' not found", descriptor.name)[..])
        );
    }
}

// ============================================================================
// Model gate and collaborator faults
// ============================================================================

#[tokio::test]
async fn model_dependent_tool_degrades_to_notice_when_unconfigured() {
    let router = unconfigured_router(Toolset::All);
    let result = router
        .call_tool(
            "generateCode",
            json!({
                "language": "typescript",
                "description": "x",
                "requirements": ["y"],
            }),
        )
        .await;

    assert!(result.success);
    assert_eq!(result.data, json!(MODEL_UNCONFIGURED_NOTICE));
    assert!(result.error.is_none());
}

#[tokio::test]
async fn analytics_tools_unaffected_by_missing_model() {
    let router = unconfigured_router(Toolset::All);
    let result = router
        .call_tool("analyzeUserBehavior", json!({ "dataSource": "application" }))
        .await;

    assert!(result.success);
    assert_ne!(result.data, json!(MODEL_UNCONFIGURED_NOTICE));
    assert_eq!(result.metadata.data_points, 100);
}

#[tokio::test]
async fn missing_file_surfaces_as_failure_envelope() {
    let router = coding_router_with_model();
    let result = router
        .call_tool("analyzeCode", json!({ "filePath": "/nonexistent/file.ts" }))
        .await;

    assert!(!result.success);
    let error = result.error.unwrap();
    assert!(error.contains("File not found"));
    assert!(error.contains("/nonexistent/file.ts"));
}

#[tokio::test]
async fn invalid_arguments_surface_as_failure_envelope() {
    let router = unconfigured_router(Toolset::Analytics);
    let result = router
        .call_tool("monitorPerformance", json!({ "metricType": 42 }))
        .await;

    assert!(!result.success);
    assert!(result.error.is_some());
}

// ============================================================================
// Metadata and observability
// ============================================================================

#[tokio::test]
async fn sequential_calls_carry_independent_metadata() {
    let router = unconfigured_router(Toolset::Analytics);

    let first = router
        .call_tool("analyzeTrends", json!({ "trendType": "user" }))
        .await;
    let second = router
        .call_tool("analyzeTrends", json!({ "trendType": "business" }))
        .await;

    assert!(first.success && second.success);
    assert!(second.metadata.timestamp >= first.metadata.timestamp);
    assert!(first.metadata.duration_ms < 60_000);
    assert!(second.metadata.duration_ms < 60_000);

    let records = router.sink().invocations();
    assert_eq!(records.len(), 2);
    assert_ne!(records[0].id, records[1].id);
    assert!(records.iter().all(|r| r.success));
}

#[tokio::test]
async fn failures_are_recorded_alongside_successes() {
    let router = unconfigured_router(Toolset::Analytics);

    router
        .call_tool("analyzeTrends", json!({ "trendType": "user" }))
        .await;
    router.call_tool("noSuchTool", json!({})).await;

    let records = router.sink().invocations();
    assert_eq!(records.len(), 2);
    assert!(records[0].success);
    assert!(!records[1].success);
    assert_eq!(records[1].tool, "noSuchTool");
}

// ============================================================================
// Registry construction
// ============================================================================

#[test]
fn duplicate_tool_names_rejected_at_composition_time() {
    let tools: Vec<Arc<dyn Tool>> = vec![
        Arc::new(EchoTool::new("echo")),
        Arc::new(EchoTool::new("echo")),
    ];
    let err = ToolRegistry::new(tools).unwrap_err();
    assert!(err.to_string().contains("duplicate tool name 'echo'"));
}

#[tokio::test]
async fn visual_tools_run_through_the_renderer_seam() {
    let tools = vendoora_mcp::tools::visual::create_tools(Arc::new(StaticRenderer));
    let registry = ToolRegistry::new(tools).unwrap();
    let router = ToolRouter::new(registry, Arc::new(MetricsSink::new()), false);

    let result = router
        .call_tool(
            "renderAndAnalyzePage",
            json!({ "url": "https://vendoora.example", "industry": "education" }),
        )
        .await;

    assert!(result.success, "{:?}", result.error);
    assert_eq!(result.data["title"], "Fixture");
    assert_eq!(result.data["industry"], "education");
    assert_eq!(result.data["accessibility"]["overall"], "pass");
}
