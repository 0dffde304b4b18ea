//! serenity - A mental wellness companion for the terminal
//!
//! This crate provides a supportive chat companion backed by Gemini, a mood
//! tracker, a reflective journal and a guided breathing exercise. Mood and
//! journal entries are kept in a local `SQLite` key-value store.

#![deny(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod config;
pub mod error;
pub mod features;
pub mod llm;
pub mod output;
pub mod storage;
pub mod tui;

pub use cli::args::{Cli, Commands, OutputFormat};
pub use error::SerenityError;
