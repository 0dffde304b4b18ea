//! Configuration management for serenity.
//!
//! This module handles loading configuration from `~/.serenity/`.

mod paths;
mod settings;

pub use paths::{Paths, HOME_ENV};
pub use settings::{
    BreathingConfig, ColorSetting, CompanionConfig, Config, GeneralConfig, API_KEY_ENV,
};
