//! # Client configuration — `family-profile.toml`
//!
//! The web bundle embeds a small TOML file describing where the REST API lives
//! and how the session is managed. A missing section or key falls back to the
//! defaults below, so an empty file is a valid configuration.
//!
//! ## Structure
//!
//! ```toml
//! [api]
//! base_url = "http://localhost:5000/api"
//! timeout_secs = 30
//!
//! [session]
//! expiry_check_interval_secs = 30   # 0 disables the periodic check
//! expiry_skew_secs = 30
//!
//! [storage]
//! namespace = ""                    # prefix for the `token` / `user` keys
//! ```
//!
//! | Struct | Purpose |
//! |--------|---------|
//! | [`ClientConfig`] | Top-level config with TOML (de)serialisation and builder helpers. |
//! | [`ApiConfig`] | REST endpoint base URL and request timeout. |
//! | [`SessionConfig`] | Periodic expiry check interval and clock skew tolerance. |
//! | [`StorageConfig`] | Optional namespace for the persisted keys. |

use serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::storage::StorageKeys;

/// Top-level client configuration.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Prefix for every request path, without a trailing slash.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Request timeout in seconds (ignored in the browser, which owns the socket).
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://localhost:5000/api".to_string()
}

fn default_timeout() -> u64 {
    30
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// How often the stored credential's expiry is re-checked. 0 disables it.
    #[serde(default = "default_check_interval")]
    pub expiry_check_interval_secs: u32,
    /// A credential expiring within this many seconds is treated as expired.
    #[serde(default = "default_skew")]
    pub expiry_skew_secs: i64,
}

fn default_check_interval() -> u32 {
    30
}

fn default_skew() -> i64 {
    30
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            expiry_check_interval_secs: default_check_interval(),
            expiry_skew_secs: default_skew(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub namespace: String,
}

impl ClientConfig {
    /// Create a config pointing at the given API base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            api: ApiConfig {
                base_url: base_url.into(),
                ..ApiConfig::default()
            },
            ..Self::default()
        }
    }

    /// Builder method to set the storage namespace.
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.storage.namespace = namespace.into();
        self
    }

    /// The well-known filename for the config file.
    pub fn filename() -> &'static str {
        "family-profile.toml"
    }

    /// Parse from a TOML string and normalise the base URL.
    pub fn from_toml(s: &str) -> Result<Self, StoreError> {
        let mut config: Self = toml::from_str(s).map_err(|e| StoreError::Config(e.to_string()))?;
        let trimmed = config.api.base_url.trim().trim_end_matches('/').to_string();
        if trimmed.is_empty() {
            return Err(StoreError::Config("api.base_url must not be empty".to_string()));
        }
        config.api.base_url = trimmed;
        Ok(config)
    }

    /// Serialize to a TOML string.
    pub fn to_toml(&self) -> Result<String, StoreError> {
        toml::to_string_pretty(self).map_err(|e| StoreError::Config(e.to_string()))
    }

    /// Storage key names derived from the configured namespace.
    pub fn storage_keys(&self) -> StorageKeys {
        StorageKeys::with_namespace(Some(&self.storage.namespace))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_is_default() {
        let config = ClientConfig::from_toml("").unwrap();
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.api.base_url, "http://localhost:5000/api");
        assert_eq!(config.session.expiry_check_interval_secs, 30);
        assert_eq!(config.storage_keys().token, "token");
    }

    #[test]
    fn test_partial_sections() {
        let config = ClientConfig::from_toml(
            r#"
            [api]
            base_url = "https://family.example.org/api/"

            [storage]
            namespace = "demo"
            "#,
        )
        .unwrap();
        assert_eq!(config.api.base_url, "https://family.example.org/api");
        assert_eq!(config.api.timeout_secs, 30);
        assert_eq!(config.storage_keys().user, "demo:user");
    }

    #[test]
    fn test_rejects_blank_base_url() {
        let err = ClientConfig::from_toml("[api]\nbase_url = \"  \"").unwrap_err();
        assert!(matches!(err, StoreError::Config(_)));
    }

    #[test]
    fn test_toml_roundtrip() {
        let config = ClientConfig::new("http://api.test").with_namespace("qa");
        let text = config.to_toml().unwrap();
        assert_eq!(ClientConfig::from_toml(&text).unwrap(), config);
    }
}
