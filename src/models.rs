//! Data models and structures
//!
//! Defines the request/response shapes of the relay endpoints, the provider
//! selection carried by each request, the client-side API settings and the
//! environment-driven server configuration.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Upper bound for `count` on both generation endpoints.
pub const MAX_COUNT: u32 = 200;

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";

const PROVIDER_REQUIRED: &str = "API provider must be specified. Please configure in settings.";
const GEMINI_KEY_REQUIRED: &str = "Gemini API key required. Please configure in settings.";
const OPENROUTER_KEY_REQUIRED: &str = "OpenRouter API key required. Please configure in settings.";
const OPENROUTER_MODEL_REQUIRED: &str =
    "OpenRouter model selection required. Please select a model in settings.";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    #[default]
    Gemini,
    OpenRouter,
}

impl Provider {
    /// Wire identifier, as sent in the `X-Provider` header.
    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::Gemini => "gemini",
            Provider::OpenRouter => "openrouter",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Provider::Gemini => write!(f, "Gemini"),
            Provider::OpenRouter => write!(f, "OpenRouter"),
        }
    }
}

impl FromStr for Provider {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "gemini" => Ok(Provider::Gemini),
            "openrouter" => Ok(Provider::OpenRouter),
            _ => Err(Error::Validation(PROVIDER_REQUIRED.to_string())),
        }
    }
}

/// Provider plus the credentials it needs.
///
/// Only constructible through [`ProviderSelection::gemini`] and
/// [`ProviderSelection::openrouter`], which reject blank credentials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderSelection {
    Gemini { api_key: String },
    OpenRouter { api_key: String, model: String },
}

impl ProviderSelection {
    pub fn gemini(api_key: Option<&str>) -> Result<Self> {
        let api_key = non_blank(api_key)
            .ok_or_else(|| Error::MissingCredential(GEMINI_KEY_REQUIRED.to_string()))?;
        Ok(Self::Gemini { api_key })
    }

    pub fn openrouter(api_key: Option<&str>, model: Option<&str>) -> Result<Self> {
        let api_key = non_blank(api_key)
            .ok_or_else(|| Error::Unauthorized(OPENROUTER_KEY_REQUIRED.to_string()))?;
        let model = non_blank(model)
            .ok_or_else(|| Error::MissingCredential(OPENROUTER_MODEL_REQUIRED.to_string()))?;
        Ok(Self::OpenRouter { api_key, model })
    }

    pub fn provider(&self) -> Provider {
        match self {
            Self::Gemini { .. } => Provider::Gemini,
            Self::OpenRouter { .. } => Provider::OpenRouter,
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Client-side API settings, persisted by [`crate::settings::SettingsStore`].
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApiConfig {
    #[serde(rename = "selectedProvider")]
    pub selected_provider: Provider,
    #[serde(rename = "geminiApiKey", default)]
    pub gemini_api_key: Option<String>,
    #[serde(rename = "openRouterApiKey", default)]
    pub openrouter_api_key: Option<String>,
    #[serde(rename = "openRouterModel", default)]
    pub openrouter_model: Option<String>,
}

impl ApiConfig {
    /// True when every field the selected provider needs is non-empty.
    pub fn is_configured(&self) -> bool {
        self.selection().is_ok()
    }

    pub fn selection(&self) -> Result<ProviderSelection> {
        match self.selected_provider {
            Provider::Gemini => ProviderSelection::gemini(self.gemini_api_key.as_deref()),
            Provider::OpenRouter => ProviderSelection::openrouter(
                self.openrouter_api_key.as_deref(),
                self.openrouter_model.as_deref(),
            ),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PromptStyle {
    Photography,
    Vector,
}

impl PromptStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            PromptStyle::Photography => "photography",
            PromptStyle::Vector => "vector",
        }
    }
}

impl FromStr for PromptStyle {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "photography" => Ok(PromptStyle::Photography),
            "vector" => Ok(PromptStyle::Vector),
            other => Err(Error::Validation(format!(
                "Unknown prompt type '{}'. Expected photography or vector",
                other
            ))),
        }
    }
}

fn validate_count(count: u32) -> Result<()> {
    if count == 0 || count > MAX_COUNT {
        return Err(Error::Validation(format!(
            "count must be between 1 and {}",
            MAX_COUNT
        )));
    }
    Ok(())
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeywordRequest {
    pub input: String,
    pub count: u32,
}

impl KeywordRequest {
    pub fn validate(&self) -> Result<()> {
        if self.input.trim().is_empty() {
            return Err(Error::Validation(
                "Word or category is required".to_string(),
            ));
        }
        validate_count(self.count)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptRequest {
    pub keywords: Vec<String>,
    #[serde(rename = "type")]
    pub style: PromptStyle,
    pub count: u32,
}

impl PromptRequest {
    pub fn validate(&self) -> Result<()> {
        if self.keywords.is_empty() {
            return Err(Error::Validation(
                "At least one keyword is required".to_string(),
            ));
        }
        validate_count(self.count)
    }

    /// The first `count` keywords, in input order.
    pub fn selected_keywords(&self) -> &[String] {
        let take = (self.count as usize).min(self.keywords.len());
        &self.keywords[..take]
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct KeywordResponse {
    pub keywords: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PromptResponse {
    pub prompts: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelsRequest {
    #[serde(rename = "apiKey")]
    pub api_key: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OpenRouterModel {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ModelsResponse {
    pub models: Vec<OpenRouterModel>,
}

/// Body of every non-2xx relay response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,
}

// Configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub gemini_model: String,
    pub gemini_base_url: Option<String>,
    pub openrouter_base_url: Option<String>,
    pub openrouter_title: String,
    pub openrouter_referer: Option<String>,
    /// Pause between sequential per-keyword prompt calls.
    pub prompt_delay: Duration,
    pub request_timeout: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            gemini_model: DEFAULT_GEMINI_MODEL.to_string(),
            gemini_base_url: None,
            openrouter_base_url: None,
            openrouter_title: "Prompt Generator".to_string(),
            openrouter_referer: None,
            prompt_delay: Duration::from_millis(200),
            request_timeout: Duration::from_secs(30),
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        let defaults = Self::default();

        Ok(Self {
            host: std::env::var("HOST").unwrap_or(defaults.host),
            port: parse_env("PORT")?.unwrap_or(defaults.port),
            gemini_model: std::env::var("GEMINI_MODEL").unwrap_or(defaults.gemini_model),
            gemini_base_url: std::env::var("GEMINI_BASE_URL").ok(),
            openrouter_base_url: std::env::var("OPENROUTER_BASE_URL").ok(),
            openrouter_title: std::env::var("OPENROUTER_TITLE")
                .unwrap_or(defaults.openrouter_title),
            openrouter_referer: std::env::var("OPENROUTER_REFERER").ok(),
            prompt_delay: parse_env("PROMPT_CALL_DELAY_MS")?
                .map(Duration::from_millis)
                .unwrap_or(defaults.prompt_delay),
            request_timeout: parse_env("REQUEST_TIMEOUT_SECS")?
                .map(Duration::from_secs)
                .unwrap_or(defaults.request_timeout),
        })
    }
}

fn parse_env<T: FromStr>(key: &str) -> Result<Option<T>> {
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| Error::Config(format!("{} has an invalid value '{}'", key, raw))),
        Err(_) => Ok(None),
    }
}
