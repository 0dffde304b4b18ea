//! Feature implementations for serenity.
//!
//! - Guided breathing
//! - Companion chat
//! - Mood tracking
//! - Journal with reflections
//! - Home screen
//! - Shell completions

pub mod breathing;
pub mod chat;
pub mod completions;
pub mod home;
pub mod journal;
pub mod mood;
