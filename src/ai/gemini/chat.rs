use super::client::GeminiHttpClient;
use super::types::{Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig};
use crate::ai::{CompletionRequest, CompletionService, Task, TEMPERATURE, TOP_K, TOP_P};
use crate::models::Provider;
use crate::{Error, Result};
use async_trait::async_trait;
use std::time::Duration;

pub struct GeminiChatClient {
    http: GeminiHttpClient,
}

impl GeminiChatClient {
    pub fn new(api_key: String, model: String) -> Self {
        Self::new_with_client(api_key, model, reqwest::Client::new(), Duration::from_secs(30))
    }

    pub fn new_with_client(
        api_key: String,
        model: String,
        client: reqwest::Client,
        timeout: Duration,
    ) -> Self {
        Self {
            http: GeminiHttpClient::new_with_client(api_key, model, timeout, client),
        }
    }

    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.http = self.http.with_base_url(base_url);
        self
    }

    fn max_output_tokens(task: Task) -> u32 {
        match task {
            Task::Keywords | Task::Prompt => 1000,
            Task::BatchPrompts => 2000,
        }
    }

    fn build_request(request: &CompletionRequest) -> GenerateContentRequest {
        GenerateContentRequest {
            contents: vec![Content::text(Some("user"), request.instruction.as_str())],
            generation_config: GenerationConfig {
                temperature: TEMPERATURE,
                top_p: TOP_P,
                top_k: TOP_K,
                max_output_tokens: Self::max_output_tokens(request.task),
            },
        }
    }
}

#[async_trait]
impl CompletionService for GeminiChatClient {
    async fn complete(&self, request: &CompletionRequest) -> Result<String> {
        let payload = Self::build_request(request);
        let response: GenerateContentResponse = self.http.generate_content(&payload).await?;

        response
            .first_text()
            .map(str::to_string)
            .ok_or(Error::NoContent(Provider::Gemini))
    }
}
