//! JSON output formatting for serenity.
//!
//! Entries are emitted in the same camelCase layout they are stored in.

use serde::Serialize;
use serde_json::json;

use crate::error::SerenityError;
use crate::features::breathing::SessionSnapshot;
use crate::features::chat::ChatMessage;
use crate::features::home::HomeScreen;
use crate::features::journal::JournalEntry;
use crate::features::mood::{MoodEntry, MoodStats};

/// Format any serializable value as pretty JSON
///
/// # Errors
///
/// Returns `SerenityError::Parse` if JSON serialization fails.
pub fn format_json<T: Serialize>(value: &T) -> Result<String, SerenityError> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Format the landing screen as JSON
///
/// # Errors
///
/// Returns `SerenityError::Parse` if JSON serialization fails.
pub fn format_home_json(home: &HomeScreen) -> Result<String, SerenityError> {
    format_json(home)
}

/// Format a single mood entry as JSON
///
/// # Errors
///
/// Returns `SerenityError::Parse` if JSON serialization fails.
pub fn format_mood_entry_json(entry: &MoodEntry) -> Result<String, SerenityError> {
    format_json(entry)
}

/// Format mood entries as JSON
///
/// # Errors
///
/// Returns `SerenityError::Parse` if JSON serialization fails.
pub fn format_mood_entries_json(entries: &[&MoodEntry]) -> Result<String, SerenityError> {
    let output = json!({
        "count": entries.len(),
        "items": entries
    });
    format_json(&output)
}

/// Format mood statistics as JSON
///
/// # Errors
///
/// Returns `SerenityError::Parse` if JSON serialization fails.
pub fn format_mood_stats_json(stats: &MoodStats) -> Result<String, SerenityError> {
    let output = json!({
        "total": stats.total,
        "average": stats.average_display(),
        "trend": stats.trend
    });
    format_json(&output)
}

/// Format a single journal entry as JSON
///
/// # Errors
///
/// Returns `SerenityError::Parse` if JSON serialization fails.
pub fn format_journal_entry_json(entry: &JournalEntry) -> Result<String, SerenityError> {
    let mut value = serde_json::to_value(entry)?;
    if let Some(object) = value.as_object_mut() {
        object.insert("wordCount".to_string(), json!(entry.word_count()));
    }
    format_json(&value)
}

/// Format journal entries as JSON
///
/// # Errors
///
/// Returns `SerenityError::Parse` if JSON serialization fails.
pub fn format_journal_entries_json(entries: &[&JournalEntry]) -> Result<String, SerenityError> {
    let output = json!({
        "count": entries.len(),
        "items": entries
    });
    format_json(&output)
}

/// Format a companion reply as JSON
///
/// # Errors
///
/// Returns `SerenityError::Parse` if JSON serialization fails.
pub fn format_reply_json(reply: &ChatMessage, degraded: bool) -> Result<String, SerenityError> {
    let output = json!({
        "reply": reply,
        "degraded": degraded
    });
    format_json(&output)
}

/// Format a breathing snapshot as a single JSON line
///
/// # Errors
///
/// Returns `SerenityError::Parse` if JSON serialization fails.
pub fn format_session_json(snapshot: &SessionSnapshot) -> Result<String, SerenityError> {
    Ok(serde_json::to_string(snapshot)?)
}
