// SPDX-License-Identifier: MIT

use crate::core::error::ToolError;
use crate::core::tool::{Tool, ToolDescriptor};
use std::collections::HashMap;
use std::sync::Arc;

/// Static set of tools advertised and dispatched by a router.
///
/// Built once at startup and read-only afterwards. Insertion order is the
/// listing order, so `listTools` output is stable across calls.
pub struct ToolRegistry {
    tools: Vec<Arc<dyn Tool>>,
    index: HashMap<String, usize>,
}

impl std::fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolRegistry").field("tools", &self.names()).finish()
    }
}

impl ToolRegistry {
    /// Build a registry from a fixed tool set.
    ///
    /// Duplicate names are rejected here so one name always maps to exactly
    /// one handler at dispatch time.
    pub fn new(tools: Vec<Arc<dyn Tool>>) -> Result<Self, ToolError> {
        let mut index = HashMap::with_capacity(tools.len());
        for (i, tool) in tools.iter().enumerate() {
            if index.insert(tool.name().to_string(), i).is_some() {
                return Err(ToolError::config(format!(
                    "duplicate tool name '{}' in registry",
                    tool.name()
                )));
            }
        }
        Ok(Self { tools, index })
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn Tool>> {
        self.index.get(name).map(|&i| &self.tools[i])
    }

    /// Advertised descriptors, in registration order.
    pub fn descriptors(&self) -> Vec<ToolDescriptor> {
        self.tools.iter().map(|t| ToolDescriptor::of(t.as_ref())).collect()
    }

    /// Registered names, in registration order.
    pub fn names(&self) -> Vec<&str> {
        self.tools.iter().map(|t| t.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use once_cell::sync::Lazy;
    use serde_json::{json, Value};

    static MOCK_SCHEMA: Lazy<Value> = Lazy::new(|| {
        json!({
            "type": "object",
            "properties": {}
        })
    });

    /// A mock tool for testing
    struct MockTool {
        name: String,
        description: String,
    }

    impl MockTool {
        fn new(name: &str) -> Self {
            Self {
                name: name.to_string(),
                description: format!("Mock tool: {}", name),
            }
        }
    }

    #[async_trait]
    impl Tool for MockTool {
        fn name(&self) -> &str {
            &self.name
        }

        fn description(&self) -> &str {
            &self.description
        }

        fn schema(&self) -> &Value {
            &MOCK_SCHEMA
        }

        async fn execute(&self, _input: Value) -> Result<Value, ToolError> {
            Ok(json!({"result": "mock"}))
        }
    }

    #[test]
    fn test_build_and_get_tool() {
        let registry = ToolRegistry::new(vec![Arc::new(MockTool::new("test_tool"))]).unwrap();

        let retrieved = registry.get("test_tool");
        assert!(retrieved.is_some());
        assert_eq!(retrieved.unwrap().name(), "test_tool");
    }

    #[test]
    fn test_get_nonexistent_tool() {
        let registry = ToolRegistry::new(vec![]).unwrap();
        assert!(registry.get("nonexistent").is_none());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let result = ToolRegistry::new(vec![
            Arc::new(MockTool::new("same_name")),
            Arc::new(MockTool::new("same_name")),
        ]);

        let err = result.err().expect("duplicate should be rejected");
        assert!(err.to_string().contains("same_name"));
    }

    #[test]
    fn test_descriptors_follow_registration_order() {
        let registry = ToolRegistry::new(vec![
            Arc::new(MockTool::new("tool1")),
            Arc::new(MockTool::new("tool2")),
            Arc::new(MockTool::new("tool3")),
        ])
        .unwrap();

        let names: Vec<String> = registry.descriptors().into_iter().map(|d| d.name).collect();
        assert_eq!(names, vec!["tool1", "tool2", "tool3"]);
        assert_eq!(registry.names(), vec!["tool1", "tool2", "tool3"]);
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn test_descriptor_carries_schema() {
        let registry = ToolRegistry::new(vec![Arc::new(MockTool::new("tool1"))]).unwrap();
        let descriptors = registry.descriptors();
        assert_eq!(descriptors[0].input_schema["type"], "object");
        assert_eq!(descriptors[0].description, "Mock tool: tool1");
    }
}
