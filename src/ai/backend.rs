use serde::{Deserialize, Serialize};

use crate::error::StudioError;

// ============================================================================
// Text inference backends
// ============================================================================

/// Sends a prompt to a generative model and returns the raw text response.
/// One call at a time, no retry, no cancellation; timeouts are whatever the
/// transport defaults to.
pub trait TextInference {
    fn infer(&self, prompt: &str) -> Result<String, StudioError>;
}

// ============================================================================
// Ollama backend
// ============================================================================

pub struct OllamaBackend {
    pub endpoint: String,
    pub model: String,
}

impl Default for OllamaBackend {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:11434/api/generate".to_string(),
            model: "qwen2.5:1.5b".to_string(),
        }
    }
}

impl OllamaBackend {
    pub fn new(endpoint: &str, model: &str) -> Self {
        Self {
            endpoint: endpoint.to_string(),
            model: model.to_string(),
        }
    }
}

#[derive(Serialize)]
struct OllamaRequest {
    model: String,
    prompt: String,
    stream: bool,
    format: &'static str,
}

#[derive(Deserialize)]
struct OllamaResponse {
    response: String,
}

impl TextInference for OllamaBackend {
    fn infer(&self, prompt: &str) -> Result<String, StudioError> {
        let request = OllamaRequest {
            model: self.model.clone(),
            prompt: prompt.to_string(),
            stream: false,
            format: "json",
        };

        let client = reqwest::blocking::Client::new();
        let response = client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .map_err(|e| StudioError::AiBackend(e.to_string()))?;

        let body: OllamaResponse = response
            .json()
            .map_err(|e| StudioError::AiBackend(e.to_string()))?;

        Ok(body.response)
    }
}

// ============================================================================
// Mock backend (for testing without a model)
// ============================================================================

/// Returns a canned response for every prompt.
pub struct MockBackend {
    pub response: String,
}

impl TextInference for MockBackend {
    fn infer(&self, _prompt: &str) -> Result<String, StudioError> {
        Ok(self.response.clone())
    }
}
