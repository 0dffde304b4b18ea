//! Storage layer for serenity.
//!
//! This module provides SQLite-backed key-value persistence for:
//! - The mood log
//! - The journal log

mod database;
mod kv;
mod migrations;

pub use database::Database;
pub use kv::{KeyValueStore, MemoryStore, PersistedLog};
