// SPDX-License-Identifier: MIT

//! Typed error handling for vendoora-mcp
//!
//! Every handler fault is converted to a failure-shaped result envelope at the
//! router boundary; these variants are what the envelope's error text is built
//! from.

use thiserror::Error;

/// Top-level error type for tool handlers and their collaborators
#[derive(Debug, Error)]
pub enum ToolError {
    /// Tool not found during dispatch
    #[error("Tool '{name}' not found")]
    ToolNotFound { name: String },

    /// API errors from external services (OpenAI, page fetches, etc.)
    #[error("API error from {provider}: {message}")]
    Api { provider: String, message: String },

    /// Configuration errors (missing env vars, invalid config)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Source file requested by a handler does not exist
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    /// Arguments that do not match the tool's declared input shape
    #[error("Invalid arguments: {0}")]
    InvalidArgs(String),

    /// I/O errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// HTTP request errors
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    /// Generic error wrapper
    #[error("{0}")]
    Other(String),
}

impl ToolError {
    /// Create an API error
    pub fn api(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Api {
            provider: provider.into(),
            message: message.into(),
        }
    }

    /// Create a tool not found error
    pub fn tool_not_found(name: impl Into<String>) -> Self {
        Self::ToolNotFound { name: name.into() }
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a file not found error
    pub fn file_not_found(path: impl Into<String>) -> Self {
        Self::FileNotFound { path: path.into() }
    }
}

impl From<&str> for ToolError {
    fn from(s: &str) -> Self {
        Self::Other(s.to_string())
    }
}

impl From<String> for ToolError {
    fn from(s: String) -> Self {
        Self::Other(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_not_found_message_names_tool() {
        let err = ToolError::tool_not_found("generateCode");
        assert_eq!(err.to_string(), "Tool 'generateCode' not found");
    }

    #[test]
    fn test_file_not_found_message_contains_path() {
        let err = ToolError::file_not_found("/nonexistent/file.ts");
        let msg = err.to_string();
        assert!(msg.contains("File not found"));
        assert!(msg.contains("/nonexistent/file.ts"));
    }
}
