use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Default Raindrop.io REST endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.raindrop.io/rest/v1";
/// Number of bookmarks requested per page.
pub const DEFAULT_PAGE_SIZE: u32 = 25;
/// Delay applied to search-text changes before a request is issued.
pub const DEFAULT_DEBOUNCE_MS: u64 = 300;

/// Top-level settings container, persisted as JSON.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchSettings {
    pub api: ApiSettings,
    pub search: SearchTuning,
    #[serde(default)]
    pub logging: LoggingSettings,
    /// Keyboard shortcut overrides, keyed by action name.
    #[serde(default)]
    pub shortcuts: HashMap<String, String>,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            api: ApiSettings::default(),
            search: SearchTuning::default(),
            logging: LoggingSettings::default(),
            shortcuts: HashMap::new(),
        }
    }
}

/// Remote service connection settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiSettings {
    pub base_url: String,
    /// Raindrop.io test token from app.raindrop.io/settings/integrations.
    #[serde(default)]
    pub token: String,
    pub timeout_secs: u64,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            token: String::new(),
            timeout_secs: 30,
        }
    }
}

/// Result list tuning.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchTuning {
    pub page_size: u32,
    pub debounce_ms: u64,
}

impl Default for SearchTuning {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            debounce_ms: DEFAULT_DEBOUNCE_MS,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct LoggingSettings {
    pub debug: bool,
}
