use super::client::OpenRouterHttpClient;
use super::types::ModelsListResponse;
use crate::models::OpenRouterModel;
use crate::Result;

/// Live, uncached view of the OpenRouter model catalog.
pub struct OpenRouterModelsClient {
    http: OpenRouterHttpClient,
}

impl OpenRouterModelsClient {
    pub fn new(http: OpenRouterHttpClient) -> Self {
        Self { http }
    }

    pub async fn list_models(&self) -> Result<Vec<OpenRouterModel>> {
        let response: ModelsListResponse = self.http.get("/api/v1/models").await?;

        Ok(response
            .data
            .into_iter()
            .map(|entry| OpenRouterModel {
                name: entry.name.unwrap_or_else(|| entry.id.clone()),
                id: entry.id,
                description: entry.description,
            })
            .collect())
    }
}
