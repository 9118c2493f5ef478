//! OpenRouter request/response payloads.

use serde::{Deserialize, Serialize};

/// Request body for OpenRouter chat completions.
#[derive(Debug, Serialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f64,
    pub top_p: f64,
    pub max_tokens: u32,
}

/// Chat message object.
#[derive(Debug, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    #[serde(default)]
    pub content: Option<String>,
}

impl ChatMessage {
    pub fn new(role: &str, content: impl Into<String>) -> Self {
        Self {
            role: role.to_string(),
            content: Some(content.into()),
        }
    }
}

/// Top-level chat completion response.
#[derive(Debug, Deserialize)]
pub struct ChatCompletionResponse {
    #[serde(default)]
    pub choices: Vec<ChatChoice>,
}

/// Single choice item returned by chat completions.
#[derive(Debug, Deserialize)]
pub struct ChatChoice {
    pub message: ChatMessage,
}

/// `GET /api/v1/models` response.
#[derive(Debug, Deserialize)]
pub struct ModelsListResponse {
    #[serde(default)]
    pub data: Vec<ModelEntry>,
}

/// One catalog entry; OpenRouter sends many more fields than these.
#[derive(Debug, Deserialize)]
pub struct ModelEntry {
    pub id: String,
    pub name: Option<String>,
    pub description: Option<String>,
}
