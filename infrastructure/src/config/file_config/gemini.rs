//! Gemini provider configuration from TOML (`[gemini]` section)

use crate::gemini::gateway::DEFAULT_BASE_URL;
use dezin_domain::ApiKey;
use serde::{Deserialize, Serialize};

/// Gemini provider settings
///
/// `api_key` is normally supplied through `GEMINI_API_KEY` rather than a file.
#[derive(Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileGeminiConfig {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
}

impl FileGeminiConfig {
    pub fn api_key(&self) -> Option<ApiKey> {
        self.api_key.clone().and_then(ApiKey::new)
    }

    pub fn base_url(&self) -> &str {
        self.base_url
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(DEFAULT_BASE_URL)
    }
}

impl std::fmt::Debug for FileGeminiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileGeminiConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "***"))
            .field("base_url", &self.base_url)
            .finish()
    }
}
