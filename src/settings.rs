//! Client-side persistence of [`ApiConfig`].
//!
//! Settings are read once when the client starts and rewritten in full on
//! every change. The file is owned by a single client process; the relay
//! server never reads it.

use crate::models::{ApiConfig, Provider};
use crate::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub const DEFAULT_SETTINGS_FILE: &str = "api-config.json";

/// Partial update applied by [`SettingsStore::update`]. `None` leaves a field as is.
#[derive(Debug, Clone, Default)]
pub struct ApiConfigPatch {
    pub selected_provider: Option<Provider>,
    pub gemini_api_key: Option<String>,
    pub openrouter_api_key: Option<String>,
    pub openrouter_model: Option<String>,
}

impl ApiConfigPatch {
    pub fn apply(self, config: &mut ApiConfig) {
        if let Some(provider) = self.selected_provider {
            config.selected_provider = provider;
        }
        if let Some(key) = self.gemini_api_key {
            config.gemini_api_key = Some(key);
        }
        if let Some(key) = self.openrouter_api_key {
            config.openrouter_api_key = Some(key);
        }
        if let Some(model) = self.openrouter_model {
            config.openrouter_model = Some(model);
        }
    }
}

pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the saved config, or the default one when nothing usable is saved.
    ///
    /// A corrupt file is logged and ignored rather than treated as fatal.
    pub fn load(&self) -> Result<ApiConfig> {
        if !self.path.exists() {
            return Ok(ApiConfig::default());
        }

        let raw = fs::read_to_string(&self.path)?;
        match serde_json::from_str(&raw) {
            Ok(config) => Ok(config),
            Err(e) => {
                warn!(
                    "Failed to parse saved API config at {}: {}",
                    self.path.display(),
                    e
                );
                Ok(ApiConfig::default())
            }
        }
    }

    pub fn save(&self, config: &ApiConfig) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(config)?)?;
        info!("Saved API config to {}", self.path.display());
        Ok(())
    }

    /// Merges `patch` into the current config and saves the result.
    pub fn update(&self, current: &ApiConfig, patch: ApiConfigPatch) -> Result<ApiConfig> {
        let mut updated = current.clone();
        patch.apply(&mut updated);
        self.save(&updated)?;
        Ok(updated)
    }
}

/// Masks all but the last four characters of a secret for display.
pub fn mask_secret(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() <= 4 {
        return "*".repeat(chars.len());
    }
    let visible: String = chars[chars.len() - 4..].iter().collect();
    format!("{}{}", "*".repeat(chars.len() - 4), visible)
}
