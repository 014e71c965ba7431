// SPDX-License-Identifier: MIT

//! Page renderer collaborator.
//!
//! Visual-analysis tools depend on this seam, not on a concrete browser. The
//! shipped implementation ([`fetch::HttpRenderer`]) retrieves the page over
//! HTTP and derives inspection counts from the markup; a CDP-driven browser
//! can implement the same trait.

pub mod fetch;

pub use fetch::HttpRenderer;

use crate::core::error::ToolError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1920,
            height: 1080,
        }
    }
}

/// Everything a renderer observed about one page load.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageSnapshot {
    pub url: String,
    pub title: String,
    pub viewport: Viewport,
    pub load_time_ms: u64,
    pub elements: u64,
    pub images: u64,
    pub images_with_alt: u64,
    pub scripts: u64,
    pub stylesheets: u64,
    pub aria_labels: u64,
    pub html_bytes: usize,
}

#[async_trait]
pub trait PageRenderer: Send + Sync {
    /// Navigate to `url` at the given viewport and report what was found.
    async fn render(&self, url: &str, viewport: Viewport) -> Result<PageSnapshot, ToolError>;
}
