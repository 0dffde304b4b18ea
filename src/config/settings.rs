//! Configuration settings for serenity.
//!
//! Settings are loaded from `~/.serenity/config.yaml`.

use serde::{Deserialize, Serialize};

use crate::cli::args::OutputFormat;
use crate::error::SerenityError;

/// Environment variables checked, in order, for the Gemini API key.
pub const API_KEY_ENV: [&str; 2] = ["GEMINI_API_KEY", "API_KEY"];

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// General settings.
    pub general: GeneralConfig,
    /// Chat companion and reflection settings.
    pub companion: CompanionConfig,
    /// Guided breathing settings.
    pub breathing: BreathingConfig,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Default output format.
    #[serde(default = "default_output_format")]
    pub default_output: OutputFormat,
    /// Color output setting.
    #[serde(default = "default_color")]
    pub color: ColorSetting,
}

/// Color output setting.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ColorSetting {
    /// Auto-detect based on terminal.
    #[default]
    Auto,
    /// Always use colors.
    Always,
    /// Never use colors.
    Never,
}

impl ColorSetting {
    /// Apply the setting to the global `colored` override.
    pub fn apply(self) {
        match self {
            Self::Auto => colored::control::unset_override(),
            Self::Always => colored::control::set_override(true),
            Self::Never => colored::control::set_override(false),
        }
    }
}

/// Language model settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CompanionConfig {
    /// Gemini model name.
    #[serde(default = "default_model")]
    pub model: String,
    /// API key. Environment variables take precedence.
    #[serde(default)]
    pub api_key: Option<String>,
    /// Base URL of the models endpoint.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Opening message of every new conversation.
    #[serde(default = "default_greeting")]
    pub greeting: String,
    /// Connect timeout for requests, in seconds.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

/// Guided breathing settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BreathingConfig {
    /// Length of one session in seconds.
    #[serde(default = "default_session_seconds")]
    pub session_seconds: u32,
    /// Inhale half of the cadence, in seconds.
    #[serde(default = "default_breath_seconds")]
    pub inhale_seconds: u32,
    /// Exhale half of the cadence, in seconds.
    #[serde(default = "default_breath_seconds")]
    pub exhale_seconds: u32,
}

// Default value functions for serde
const fn default_output_format() -> OutputFormat {
    OutputFormat::Pretty
}

const fn default_color() -> ColorSetting {
    ColorSetting::Auto
}

fn default_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta/models".to_string()
}

fn default_greeting() -> String {
    "Hello. I'm Serenity. I'm here to listen without judgment. How are you feeling today?"
        .to_string()
}

const fn default_request_timeout() -> u64 {
    30
}

const fn default_session_seconds() -> u32 {
    60
}

const fn default_breath_seconds() -> u32 {
    4
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            default_output: default_output_format(),
            color: default_color(),
        }
    }
}

impl Default for CompanionConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            api_key: None,
            base_url: default_base_url(),
            greeting: default_greeting(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

impl Default for BreathingConfig {
    fn default() -> Self {
        Self {
            session_seconds: default_session_seconds(),
            inhale_seconds: default_breath_seconds(),
            exhale_seconds: default_breath_seconds(),
        }
    }
}

impl CompanionConfig {
    /// Resolve the API key from the environment or the config file.
    ///
    /// # Errors
    ///
    /// Returns an error if no key is configured anywhere.
    pub fn resolve_api_key(&self) -> Result<String, SerenityError> {
        API_KEY_ENV
            .iter()
            .find_map(|name| std::env::var(name).ok().filter(|v| !v.trim().is_empty()))
            .or_else(|| self.api_key.clone().filter(|v| !v.trim().is_empty()))
            .ok_or_else(|| {
                SerenityError::Config(
                    "No Gemini API key found. Set GEMINI_API_KEY or companion.api_key in config.yaml"
                        .to_string(),
                )
            })
    }
}

impl BreathingConfig {
    /// Check that every duration is positive.
    ///
    /// # Errors
    ///
    /// Returns an error naming the first zero duration.
    pub fn validate(&self) -> Result<(), SerenityError> {
        for (name, value) in [
            ("session_seconds", self.session_seconds),
            ("inhale_seconds", self.inhale_seconds),
            ("exhale_seconds", self.exhale_seconds),
        ] {
            if value == 0 {
                return Err(SerenityError::Config(format!(
                    "breathing.{name} must be greater than zero"
                )));
            }
        }
        Ok(())
    }
}

impl Config {
    /// Load configuration from a specific path.
    ///
    /// If the config file doesn't exist, returns default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed.
    pub fn load_from_path(path: &std::path::Path) -> Result<Self, SerenityError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path).map_err(|e| {
            SerenityError::Config(format!(
                "Failed to read config file {}: {e}",
                path.display()
            ))
        })?;

        let config: Self = serde_yaml::from_str(&contents).map_err(|e| {
            SerenityError::Config(format!(
                "Failed to parse config file {}: {e}",
                path.display()
            ))
        })?;

        config.breathing.validate()?;
        Ok(config)
    }
}
