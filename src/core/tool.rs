use crate::core::error::ToolError;
use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

/// Trait for tools exposed by a router.
///
/// `name()`, `description()` and `schema()` return borrows to avoid allocation
/// on every listing; implementations keep these in struct fields or statics.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Returns the tool name (must be unique within a registry)
    fn name(&self) -> &str;

    /// Returns a human-readable description of what the tool does
    fn description(&self) -> &str;

    /// Returns the JSON schema for the tool's input parameters
    fn schema(&self) -> &Value;

    /// Whether this tool depends on the language-model client.
    ///
    /// The router answers for gated tools with a fixed notice when no model
    /// credential is configured, so handlers never duplicate that branch.
    fn needs_model(&self) -> bool {
        false
    }

    /// Execute the tool with the given input and return the result payload
    async fn execute(&self, input: Value) -> Result<Value, ToolError>;
}

/// Advertised shape of one tool: the capability surface returned by `listTools`.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ToolDescriptor {
    pub name: String,
    pub description: String,
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

impl ToolDescriptor {
    pub fn of(tool: &dyn Tool) -> Self {
        Self {
            name: tool.name().to_string(),
            description: tool.description().to_string(),
            input_schema: tool.schema().clone(),
        }
    }
}
