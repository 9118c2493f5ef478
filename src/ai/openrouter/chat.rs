use super::client::OpenRouterHttpClient;
use super::types::{ChatCompletionRequest, ChatMessage};
use crate::ai::{CompletionRequest, CompletionService, Task, TEMPERATURE, TOP_P};
use crate::models::Provider;
use crate::{Error, Result};
use async_trait::async_trait;
use std::time::Duration;

pub struct OpenRouterChatClient {
    http: OpenRouterHttpClient,
    model: String,
}

impl OpenRouterChatClient {
    pub fn new(api_key: String, model: String) -> Self {
        Self {
            http: OpenRouterHttpClient::new(api_key, Duration::from_secs(30)),
            model,
        }
    }

    pub fn from_http(http: OpenRouterHttpClient, model: String) -> Self {
        Self { http, model }
    }

    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.http = self.http.with_base_url(base_url);
        self
    }

    fn max_tokens(task: Task) -> u32 {
        match task {
            Task::Keywords => 1000,
            Task::Prompt => 150,
            Task::BatchPrompts => 2000,
        }
    }

    fn build_request(&self, request: &CompletionRequest) -> ChatCompletionRequest {
        let mut messages = Vec::with_capacity(2);
        if let Some(system) = &request.system {
            messages.push(ChatMessage::new("system", system.as_str()));
        }
        messages.push(ChatMessage::new("user", request.instruction.as_str()));

        ChatCompletionRequest {
            model: self.model.clone(),
            messages,
            temperature: TEMPERATURE,
            top_p: TOP_P,
            max_tokens: Self::max_tokens(request.task),
        }
    }
}

#[async_trait]
impl CompletionService for OpenRouterChatClient {
    async fn complete(&self, request: &CompletionRequest) -> Result<String> {
        let payload = self.build_request(request);
        let response = self.http.chat_completion(&payload).await?;

        response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or(Error::NoContent(Provider::OpenRouter))
    }
}
