//! Service configuration
//!
//! Configuration is read from an optional TOML file. Every key has a default,
//! so an empty file (or no file) gives a working local setup:
//!
//! ```toml
//! bind_address = "127.0.0.1:5000"
//! output_dir = "/var/lib/exosky/snapshots"
//! request_timeout_secs = 60
//!
//! [chat]
//! model = "gpt-3.5-turbo"
//! ```

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::constants::{
    CHAT_COMPLETIONS_URL, EXOPLANET_ARCHIVE_TAP_URL, GAIA_TAP_URL, REGION_HALF_WIDTH_DEG,
    REGION_STAR_LIMIT,
};
use crate::data::default_snapshot_dir;
use crate::{ExoskyError, Result};

/// Environment variable consulted when no chat API key is configured
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ExoskyConfig {
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    #[serde(default = "default_snapshot_dir")]
    pub output_dir: PathBuf,

    #[serde(default = "default_true")]
    pub persist_snapshots: bool,

    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    #[serde(default = "default_exoplanet_archive_url")]
    pub exoplanet_archive_url: String,

    #[serde(default = "default_gaia_tap_url")]
    pub gaia_tap_url: String,

    #[serde(default = "default_region_half_width_deg")]
    pub region_half_width_deg: f64,

    #[serde(default = "default_region_star_limit")]
    pub region_star_limit: usize,

    #[serde(default)]
    pub chat: ChatConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ChatConfig {
    #[serde(default = "default_chat_api_url")]
    pub api_url: String,

    #[serde(default = "default_chat_model")]
    pub model: String,

    #[serde(default = "default_chat_max_tokens")]
    pub max_tokens: u32,

    /// Falls back to `OPENAI_API_KEY` when unset
    #[serde(default)]
    pub api_key: Option<String>,
}

fn default_bind_address() -> String {
    "127.0.0.1:5000".to_string()
}
fn default_true() -> bool {
    true
}
fn default_request_timeout_secs() -> u64 {
    60
}
fn default_exoplanet_archive_url() -> String {
    EXOPLANET_ARCHIVE_TAP_URL.to_string()
}
fn default_gaia_tap_url() -> String {
    GAIA_TAP_URL.to_string()
}
fn default_region_half_width_deg() -> f64 {
    REGION_HALF_WIDTH_DEG
}
fn default_region_star_limit() -> usize {
    REGION_STAR_LIMIT
}
fn default_chat_api_url() -> String {
    CHAT_COMPLETIONS_URL.to_string()
}
fn default_chat_model() -> String {
    "gpt-3.5-turbo".to_string()
}
fn default_chat_max_tokens() -> u32 {
    150
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            api_url: default_chat_api_url(),
            model: default_chat_model(),
            max_tokens: default_chat_max_tokens(),
            api_key: None,
        }
    }
}

impl Default for ExoskyConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            output_dir: default_snapshot_dir(),
            persist_snapshots: true,
            request_timeout_secs: default_request_timeout_secs(),
            exoplanet_archive_url: default_exoplanet_archive_url(),
            gaia_tap_url: default_gaia_tap_url(),
            region_half_width_deg: default_region_half_width_deg(),
            region_star_limit: default_region_star_limit(),
            chat: ChatConfig::default(),
        }
    }
}

impl ExoskyConfig {
    /// Parse and validate a TOML document
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: ExoskyConfig = toml::from_str(content)
            .map_err(|e| ExoskyError::ConfigError(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path`, or use defaults when no path is given
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                let content = fs::read_to_string(path).map_err(|e| {
                    ExoskyError::ConfigError(format!(
                        "Failed to read config file {}: {}",
                        path.display(),
                        e
                    ))
                })?;
                Self::from_toml(&content)
            }
            None => Ok(Self::default()),
        }
    }

    /// Reject values the query pipeline cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.request_timeout_secs == 0 {
            return Err(ExoskyError::ConfigError(
                "request_timeout_secs must be positive".into(),
            ));
        }
        if !(self.region_half_width_deg.is_finite() && self.region_half_width_deg > 0.0) {
            return Err(ExoskyError::ConfigError(
                "region_half_width_deg must be a positive number".into(),
            ));
        }
        if self.region_star_limit == 0 {
            return Err(ExoskyError::ConfigError(
                "region_star_limit must be positive".into(),
            ));
        }
        Ok(())
    }

    /// Timeout applied to every outbound request
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Configured chat API key, else the `OPENAI_API_KEY` environment variable
    pub fn chat_api_key(&self) -> Option<String> {
        self.chat
            .api_key
            .clone()
            .or_else(|| env::var(API_KEY_ENV).ok())
            .filter(|k| !k.trim().is_empty())
    }
}
