//! Runtime configuration.
//!
//! Defaults match the shipped page. A JSON object with any subset of the
//! fields can be passed to `start_hunt_with_config` to override them.

use serde::Deserialize;

use crate::error::ConfigError;

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct HuntConfig {
    /// localStorage key holding the progress blob.
    pub storage_key: String,
    /// Success highlight duration before moving to the next page.
    pub advance_delay_ms: u32,
    /// Lifetime of the "wrong answer" message.
    pub message_clear_ms: u32,
    pub shake_ms: u32,
    pub focus_delay_ms: u32,
    /// Canvas background used when exporting the certificate.
    pub export_background: String,
    /// Upscaling factor for the exported image.
    pub export_scale: f64,
    pub certificate_prefix: String,
    pub log_level: String,
}

impl Default for HuntConfig {
    fn default() -> Self {
        Self {
            storage_key: "silentHuntProgress".into(),
            advance_delay_ms: 600,
            message_clear_ms: 3000,
            shake_ms: 500,
            focus_delay_ms: 500,
            export_background: "#0a0a0a".into(),
            export_scale: 2.0,
            certificate_prefix: "The-Silent-Hunt-Certificate".into(),
            log_level: "info".into(),
        }
    }
}

impl HuntConfig {
    /// Parse overrides; absent fields keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` for malformed JSON or mistyped fields.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parsed log level; `None` for an unknown name.
    pub fn log_level(&self) -> Option<log::Level> {
        self.log_level.parse().ok()
    }
}
