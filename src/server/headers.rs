//! Provider selection from request headers.

use crate::models::{Provider, ProviderSelection};
use crate::Result;
use axum::http::{header, HeaderMap};

pub const X_PROVIDER: &str = "x-provider";
pub const X_API_KEY: &str = "x-api-key";
pub const X_MODEL: &str = "x-model";

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

/// Reads `X-Provider` and the credentials that provider needs.
///
/// Gemini takes its key from `X-API-Key`; OpenRouter takes a bearer token
/// from `Authorization` plus the model from `X-Model`.
pub fn provider_selection(headers: &HeaderMap) -> Result<ProviderSelection> {
    let provider: Provider = header_str(headers, X_PROVIDER).unwrap_or_default().parse()?;

    match provider {
        Provider::Gemini => ProviderSelection::gemini(header_str(headers, X_API_KEY)),
        Provider::OpenRouter => {
            let bearer = header_str(headers, header::AUTHORIZATION.as_str())
                .and_then(|value| value.strip_prefix("Bearer "));
            ProviderSelection::openrouter(bearer, header_str(headers, X_MODEL))
        }
    }
}
