use super::headers::provider_selection;
use super::AppState;
use crate::generator;
use crate::models::{
    KeywordRequest, KeywordResponse, ModelsRequest, ModelsResponse, PromptRequest, PromptResponse,
};
use crate::{Error, Result};
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use tracing::info;

/// POST /api/keywords/generate
pub async fn generate_keywords(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: std::result::Result<Json<KeywordRequest>, JsonRejection>,
) -> Result<Json<KeywordResponse>> {
    let Json(request) = payload?;
    request.validate()?;
    let selection = provider_selection(&headers)?;

    info!(
        "Keyword request received (count: {}, provider: {})",
        request.count,
        selection.provider().as_str()
    );

    let service = state.providers.completion_service(&selection);
    let keywords = generator::generate_keywords(service.as_ref(), &request).await?;

    Ok(Json(KeywordResponse { keywords }))
}

/// POST /api/prompts/generate
pub async fn generate_prompts(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: std::result::Result<Json<PromptRequest>, JsonRejection>,
) -> Result<Json<PromptResponse>> {
    let Json(request) = payload?;
    request.validate()?;
    let selection = provider_selection(&headers)?;

    info!(
        "Prompt request received (keywords: {}, type: {}, count: {}, provider: {})",
        request.keywords.len(),
        request.style.as_str(),
        request.count,
        selection.provider().as_str()
    );

    let service = state.providers.completion_service(&selection);
    let prompts =
        generator::generate_prompts(service.as_ref(), &request, state.prompt_delay).await?;

    Ok(Json(PromptResponse { prompts }))
}

/// POST /api/openrouter/models
pub async fn list_openrouter_models(
    State(state): State<AppState>,
    payload: std::result::Result<Json<ModelsRequest>, JsonRejection>,
) -> Result<Json<ModelsResponse>> {
    let Json(request) = payload?;
    let api_key = request.api_key.trim();
    if api_key.is_empty() {
        return Err(Error::Validation("API key is required".to_string()));
    }

    let models = state.providers.models_client(api_key).list_models().await?;
    info!("Fetched {} OpenRouter models", models.len());

    Ok(Json(ModelsResponse { models }))
}
