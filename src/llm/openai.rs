// SPDX-License-Identifier: MIT

//! OpenAI-compatible chat completions client.

use crate::config::OpenAiConfig;
use crate::core::error::ToolError;
use crate::llm::GenerationParams;
use reqwest::Client;
use serde_json::{json, Value};

/// Thin client over the `/chat/completions` endpoint.
///
/// One prompt in, completion text out; retry policy, if any, belongs to the
/// caller's deployment, not here.
pub struct CompletionClient {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl CompletionClient {
    pub fn new(config: &OpenAiConfig) -> Self {
        Self {
            client: Client::new(),
            api_key: config.api_key.clone(),
            base_url: config.base_url.clone(),
            model: config.model.clone(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Send one user prompt and return the completion text.
    pub async fn complete(
        &self,
        prompt: &str,
        params: &GenerationParams,
    ) -> Result<String, ToolError> {
        let url = format!("{}/chat/completions", self.base_url);

        let body = json!({
            "model": self.model,
            "messages": [{ "role": "user", "content": prompt }],
            "temperature": params.temperature,
            "max_tokens": params.max_tokens
        });

        log::debug!("OpenAI request to {} ({} prompt bytes)", url, prompt.len());

        let resp = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await?;

        if !resp.status().is_success() {
            let text = resp.text().await?;
            return Err(ToolError::api("OpenAI", text));
        }

        let resp_json: Value = resp.json().await?;
        Self::parse_completion(&resp_json)
    }

    /// Extract the first choice's message content.
    fn parse_completion(response: &Value) -> Result<String, ToolError> {
        let content = response["choices"]
            .as_array()
            .and_then(|c| c.first())
            .and_then(|choice| choice["message"]["content"].as_str())
            .ok_or_else(|| ToolError::api("OpenAI", "no completion in response"))?;

        Ok(content.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_completion_text() {
        let response = json!({
            "choices": [{
                "message": {
                    "role": "assistant",
                    "content": "fn main() {}"
                }
            }]
        });

        let text = CompletionClient::parse_completion(&response).unwrap();
        assert_eq!(text, "fn main() {}");
    }

    #[test]
    fn test_parse_completion_empty_choices() {
        let response = json!({ "choices": [] });
        let err = CompletionClient::parse_completion(&response).unwrap_err();
        assert!(err.to_string().contains("no completion"));
    }

    #[test]
    fn test_parse_completion_missing_content() {
        let response = json!({
            "choices": [{ "message": { "role": "assistant", "content": null } }]
        });
        assert!(CompletionClient::parse_completion(&response).is_err());
    }
}
