// SPDX-License-Identifier: MIT

//! Tool families and their composition.
//!
//! [`build_registry`] is the composition root: it wires collaborators from an
//! explicit [`AppConfig`] and returns the fixed registry one server process
//! advertises.

pub mod analytics;
pub mod coding;
pub mod visual;

use crate::browser::HttpRenderer;
use crate::config::AppConfig;
use crate::core::error::ToolError;
use crate::core::registry::ToolRegistry;
use crate::core::tool::Tool;
use crate::llm::CompletionClient;
use clap::ValueEnum;
use std::sync::Arc;

/// File-system reader collaborator used by the coding tools.
///
/// Distinguishes "not found" from other I/O faults so handlers can surface an
/// actionable message.
#[derive(Debug, Default, Clone, Copy)]
pub struct FileReader;

impl FileReader {
    pub async fn read_to_string(&self, path: &str) -> Result<String, ToolError> {
        match tokio::fs::read_to_string(path).await {
            Ok(contents) => Ok(contents),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(ToolError::file_not_found(path))
            }
            Err(e) => Err(e.into()),
        }
    }
}

/// Which tool family a server process exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Toolset {
    Coding,
    Analytics,
    Visual,
    /// All three families behind one registry.
    All,
}

/// Wire up the registry for one toolset from explicit configuration.
///
/// Also reports whether the language-model client is configured, which the
/// router uses for its model gate.
pub fn build_registry(
    toolset: Toolset,
    config: &AppConfig,
) -> Result<(ToolRegistry, bool), ToolError> {
    let model = config
        .openai
        .as_ref()
        .map(|cfg| Arc::new(CompletionClient::new(cfg)));
    let model_available = model.is_some();
    let reader = Arc::new(FileReader);

    let mut tools: Vec<Arc<dyn Tool>> = Vec::new();
    match toolset {
        Toolset::Coding => tools.extend(coding::create_tools(model, reader)),
        Toolset::Analytics => tools.extend(analytics::create_tools()),
        Toolset::Visual => {
            let renderer = Arc::new(HttpRenderer::new(config.fetch_timeout)?);
            tools.extend(visual::create_tools(renderer));
        }
        Toolset::All => {
            tools.extend(coding::create_tools(model, reader));
            tools.extend(analytics::create_tools());
            let renderer = Arc::new(HttpRenderer::new(config.fetch_timeout)?);
            tools.extend(visual::create_tools(renderer));
        }
    }

    Ok((ToolRegistry::new(tools)?, model_available))
}
