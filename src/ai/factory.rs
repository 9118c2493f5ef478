use super::gemini::GeminiChatClient;
use super::openrouter::{OpenRouterChatClient, OpenRouterHttpClient, OpenRouterModelsClient};
use super::CompletionService;
use crate::models::{ProviderSelection, ServerConfig};
use std::time::Duration;
use tracing::debug;

/// Builds provider adapters for per-request credentials.
///
/// Holds only immutable settings and one shared connection pool, so a single
/// factory can serve any number of concurrent requests.
#[derive(Clone)]
pub struct ProviderFactory {
    http_client: reqwest::Client,
    gemini_model: String,
    gemini_base_url: Option<String>,
    openrouter_base_url: Option<String>,
    openrouter_title: String,
    openrouter_referer: Option<String>,
    timeout: Duration,
}

impl ProviderFactory {
    pub fn from_config(config: &ServerConfig) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            gemini_model: config.gemini_model.clone(),
            gemini_base_url: config.gemini_base_url.clone(),
            openrouter_base_url: config.openrouter_base_url.clone(),
            openrouter_title: config.openrouter_title.clone(),
            openrouter_referer: config.openrouter_referer.clone(),
            timeout: config.request_timeout,
        }
    }

    /// Completion adapter for the selected provider.
    pub fn completion_service(&self, selection: &ProviderSelection) -> Box<dyn CompletionService> {
        match selection {
            ProviderSelection::Gemini { api_key } => {
                debug!("Completion provider: Gemini (model: {})", self.gemini_model);
                let mut client = GeminiChatClient::new_with_client(
                    api_key.clone(),
                    self.gemini_model.clone(),
                    self.http_client.clone(),
                    self.timeout,
                );
                if let Some(base_url) = &self.gemini_base_url {
                    client = client.with_base_url(base_url.clone());
                }
                Box::new(client)
            }
            ProviderSelection::OpenRouter { api_key, model } => {
                debug!("Completion provider: OpenRouter (model: {})", model);
                Box::new(OpenRouterChatClient::from_http(
                    self.openrouter_http(api_key),
                    model.clone(),
                ))
            }
        }
    }

    pub fn models_client(&self, api_key: &str) -> OpenRouterModelsClient {
        OpenRouterModelsClient::new(self.openrouter_http(api_key))
    }

    fn openrouter_http(&self, api_key: &str) -> OpenRouterHttpClient {
        let http = OpenRouterHttpClient::new_with_client(
            api_key.to_string(),
            self.timeout,
            self.http_client.clone(),
        )
        .with_attribution(
            self.openrouter_title.clone(),
            self.openrouter_referer.clone(),
        );
        match &self.openrouter_base_url {
            Some(base_url) => http.with_base_url(base_url.clone()),
            None => http,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::{CompletionRequest, Task};
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn factory_for(server: &MockServer) -> ProviderFactory {
        ProviderFactory::from_config(&ServerConfig {
            gemini_base_url: Some(server.uri()),
            openrouter_base_url: Some(server.uri()),
            gemini_model: "gemini-test".to_string(),
            ..ServerConfig::default()
        })
    }

    #[tokio::test]
    async fn test_gemini_selection_routes_to_configured_model() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1beta/models/gemini-test:generateContent"))
            .and(header("x-goog-api-key", "g-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "candidates": [{ "content": { "parts": [{ "text": "gemini" }] } }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let selection = ProviderSelection::gemini(Some("g-key")).unwrap();
        let service = factory_for(&server).completion_service(&selection);

        let text = service
            .complete(&CompletionRequest::new(Task::Keywords, "x".to_string()))
            .await
            .unwrap();
        assert_eq!(text, "gemini");
    }

    #[tokio::test]
    async fn test_openrouter_selection_uses_bearer_key() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/v1/chat/completions"))
            .and(header("Authorization", "Bearer or-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "choices": [{ "message": { "role": "assistant", "content": "openrouter" } }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let selection = ProviderSelection::openrouter(Some("or-key"), Some("m")).unwrap();
        let service = factory_for(&server).completion_service(&selection);

        let text = service
            .complete(&CompletionRequest::new(Task::Keywords, "x".to_string()))
            .await
            .unwrap();
        assert_eq!(text, "openrouter");
    }
}
