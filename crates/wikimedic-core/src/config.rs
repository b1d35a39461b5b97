//! Core configuration.
//!
//! The shells pass an optional JSON document at startup; every missing field
//! falls back to the production defaults below.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::api::Endpoint;

pub const DEFAULT_BASE_URL: &str = "https://wikimedic-api.onrender.com/";
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;
/// The medicine search filters locally, so it fetches one large page.
pub const DEFAULT_MEDICINE_PAGE_SIZE: u32 = 100;
pub const DEFAULT_USER_KEY: &str = "@WikiMedic:user";
pub const DEFAULT_FAVORITES_KEY: &str = "@WikiMedic:favorites";

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid configuration JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid configuration value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Remote API settings handed to the shells' HTTP clients.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_ms: u64,
    pub medicine_page_size: u32,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            medicine_page_size: DEFAULT_MEDICINE_PAGE_SIZE,
        }
    }
}

impl ApiConfig {
    /// Absolute URL for an endpoint.
    pub fn url(&self, endpoint: &Endpoint) -> String {
        let base = self.base_url.trim_end_matches('/');
        format!("{}/{}", base, endpoint.path())
    }
}

/// Keys of the on-device key-value store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StorageKeys {
    pub user: String,
    pub favorites: String,
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self {
            user: DEFAULT_USER_KEY.to_string(),
            favorites: DEFAULT_FAVORITES_KEY.to_string(),
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CoreConfig {
    pub api: ApiConfig,
    pub storage: StorageKeys,
}

impl CoreConfig {
    /// Parse from JSON, defaulting missing fields, then validate.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: CoreConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let base = &self.api.base_url;
        if !(base.starts_with("https://") || base.starts_with("http://")) {
            return Err(ConfigError::Invalid {
                field: "api.base_url",
                reason: format!("expected an http(s) URL, got {:?}", base),
            });
        }
        if self.api.timeout_ms == 0 {
            return Err(ConfigError::Invalid {
                field: "api.timeout_ms",
                reason: "must be positive".into(),
            });
        }
        if self.api.medicine_page_size == 0 {
            return Err(ConfigError::Invalid {
                field: "api.medicine_page_size",
                reason: "must be positive".into(),
            });
        }
        if self.storage.user.is_empty() || self.storage.favorites.is_empty() {
            return Err(ConfigError::Invalid {
                field: "storage",
                reason: "storage keys must not be empty".into(),
            });
        }
        if self.storage.user == self.storage.favorites {
            return Err(ConfigError::Invalid {
                field: "storage",
                reason: "user and favorites keys must differ".into(),
            });
        }
        Ok(())
    }
}
