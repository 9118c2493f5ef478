use super::types::{ChatCompletionRequest, ChatCompletionResponse};
use crate::models::Provider;
use crate::{Error, Result};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://openrouter.ai";
pub const DEFAULT_TITLE: &str = "Prompt Generator";

pub struct OpenRouterHttpClient {
    client: Client,
    api_key: String,
    base_url: String,
    title: String,
    referer: Option<String>,
    timeout: Duration,
}

impl OpenRouterHttpClient {
    pub fn new(api_key: String, timeout: Duration) -> Self {
        Self::new_with_client(api_key, timeout, Client::new())
    }

    pub fn new_with_client(api_key: String, timeout: Duration, client: Client) -> Self {
        Self {
            client,
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            title: DEFAULT_TITLE.to_string(),
            referer: None,
            timeout,
        }
    }

    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// Sets the `X-Title` and `HTTP-Referer` attribution headers.
    pub fn with_attribution(mut self, title: String, referer: Option<String>) -> Self {
        self.title = title;
        self.referer = referer;
        self
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        let builder = builder
            .timeout(self.timeout)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("X-Title", &self.title);
        match &self.referer {
            Some(referer) => builder.header("HTTP-Referer", referer),
            None => builder,
        }
    }

    async fn send<Resp: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<Resp> {
        let response = self.authorized(builder).send().await.map_err(|e| {
            tracing::error!("Failed to send request to OpenRouter: {}", e);
            e
        })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await?;
            tracing::error!("OpenRouter API error (status {}): {}", status, error_text);
            return Err(Error::Provider {
                provider: Provider::OpenRouter,
                status: status.as_u16(),
                message: error_text,
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| {
            tracing::error!("Failed to parse OpenRouter response: {}\nBody: {}", e, body);
            Error::Serialization(e)
        })
    }

    pub async fn post<Req: Serialize, Resp: DeserializeOwned>(
        &self,
        path: &str,
        request: &Req,
    ) -> Result<Resp> {
        let url = format!("{}{}", self.base_url, path);
        self.send(self.client.post(&url).json(request)).await
    }

    pub async fn get<Resp: DeserializeOwned>(&self, path: &str) -> Result<Resp> {
        let url = format!("{}{}", self.base_url, path);
        self.send(self.client.get(&url)).await
    }

    pub async fn chat_completion(
        &self,
        request: &ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse> {
        tracing::debug!(
            "Sending chat completion request to OpenRouter (model: {})",
            request.model
        );
        self.post("/api/v1/chat/completions", request).await
    }
}
