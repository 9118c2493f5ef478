//! Provider adapters for text generation
//!
//! Both Gemini and OpenRouter sit behind [`CompletionService`]: callers hand
//! over one provider-neutral [`CompletionRequest`] and get the raw completion
//! text back. [`ProviderFactory`] builds the right adapter for a request's
//! [`ProviderSelection`](crate::models::ProviderSelection).

pub mod factory;
pub mod gemini;
pub mod mock;
pub mod openrouter;

pub use factory::ProviderFactory;
pub use gemini::GeminiChatClient;
pub use mock::MockCompletionClient;
pub use openrouter::{OpenRouterChatClient, OpenRouterModelsClient};

use crate::Result;
use async_trait::async_trait;

/// Sampling parameters shared by every call site.
pub const TEMPERATURE: f64 = 0.7;
pub const TOP_P: f64 = 0.8;
pub const TOP_K: u32 = 40;

/// What a completion is for; decides the output-token ceiling per provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Task {
    Keywords,
    /// One prompt for one keyword.
    Prompt,
    /// One prompt per keyword in a single call.
    BatchPrompts,
}

/// Provider-neutral completion request.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub task: Task,
    /// Priming message for chat-style providers. Gemini ignores it.
    pub system: Option<String>,
    pub instruction: String,
}

impl CompletionRequest {
    pub fn new(task: Task, instruction: String) -> Self {
        Self {
            task,
            system: None,
            instruction,
        }
    }

    pub fn with_system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }
}

#[async_trait]
pub trait CompletionService: Send + Sync {
    /// Returns the raw completion text for `request`.
    ///
    /// A present-but-empty completion is returned as `Ok("")`; only a missing
    /// one is an error.
    async fn complete(&self, request: &CompletionRequest) -> Result<String>;
}
