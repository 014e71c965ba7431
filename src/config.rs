// SPDX-License-Identifier: MIT

//! Process configuration.
//!
//! Read once at startup from the environment and passed down explicitly;
//! nothing here is a global singleton, so tests can construct their own.

use std::env;
use std::time::Duration;

pub const SERVER_NAME: &str = "vendoora-mcp";
pub const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");

const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_OPENAI_MODEL: &str = "gpt-4";
const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 30;

/// Credentials and endpoint for the OpenAI-compatible completion client.
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// None when no API key is configured; model-dependent tools then degrade
    /// to a fixed notice instead of failing.
    pub openai: Option<OpenAiConfig>,
    /// Timeout for page fetches performed by the visual-analysis tools.
    pub fetch_timeout: Duration,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let api_key = env::var("OPENAI_API_KEY")
            .or_else(|_| env::var("OPENAI_API_KEY_LOCAL"))
            .ok()
            .filter(|k| !k.is_empty());

        let openai = api_key.map(|api_key| OpenAiConfig {
            api_key,
            base_url: env::var("OPENAI_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_OPENAI_BASE_URL.to_string()),
            model: env::var("OPENAI_MODEL").unwrap_or_else(|_| DEFAULT_OPENAI_MODEL.to_string()),
        });

        let fetch_timeout = env::var("FETCH_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(DEFAULT_FETCH_TIMEOUT_SECS));

        Self {
            openai,
            fetch_timeout,
        }
    }

    /// A config with no model credential, for tests and offline use.
    pub fn unconfigured() -> Self {
        Self {
            openai: None,
            fetch_timeout: Duration::from_secs(DEFAULT_FETCH_TIMEOUT_SECS),
        }
    }
}
