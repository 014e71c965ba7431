// SPDX-License-Identifier: MIT

//! Language-model client.
//!
//! The only collaborator shape the handlers need: a prompt plus generation
//! parameters in, completion text out.

pub mod openai;

pub use openai::CompletionClient;

/// Sampling parameters for one completion request.
#[derive(Debug, Clone)]
pub struct GenerationParams {
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            temperature: 0.3,
            max_tokens: 3000,
        }
    }
}

impl GenerationParams {
    pub fn new(temperature: f32, max_tokens: u32) -> Self {
        Self {
            temperature,
            max_tokens,
        }
    }
}
