//! Output formatting for serenity.
//!
//! This module provides formatters for displaying moods, journal entries and
//! sessions in various formats.

mod json;
mod pretty;

use crate::cli::args::OutputFormat;
use crate::error::SerenityError;
use crate::features::home::HomeScreen;
use crate::features::journal::JournalEntry;
use crate::features::mood::{MoodEntry, MoodStats};

pub use json::*;
pub use pretty::*;

/// Format the landing screen based on output format
///
/// # Errors
///
/// Returns `SerenityError::Parse` if JSON serialization fails.
pub fn format_home(home: &HomeScreen, format: OutputFormat) -> Result<String, SerenityError> {
    match format {
        OutputFormat::Pretty => Ok(format_home_pretty(home)),
        OutputFormat::Json => format_home_json(home),
    }
}

/// Format a newly logged mood based on output format
///
/// # Errors
///
/// Returns `SerenityError::Parse` if JSON serialization fails.
pub fn format_mood_entry(entry: &MoodEntry, format: OutputFormat) -> Result<String, SerenityError> {
    match format {
        OutputFormat::Pretty => Ok(format_mood_entry_pretty(entry)),
        OutputFormat::Json => format_mood_entry_json(entry),
    }
}

/// Format mood entries based on output format
///
/// # Errors
///
/// Returns `SerenityError::Parse` if JSON serialization fails.
pub fn format_mood_entries(
    entries: &[&MoodEntry],
    format: OutputFormat,
) -> Result<String, SerenityError> {
    match format {
        OutputFormat::Pretty => Ok(format_mood_entries_pretty(entries)),
        OutputFormat::Json => format_mood_entries_json(entries),
    }
}

/// Format mood statistics based on output format
///
/// # Errors
///
/// Returns `SerenityError::Parse` if JSON serialization fails.
pub fn format_mood_stats(stats: &MoodStats, format: OutputFormat) -> Result<String, SerenityError> {
    match format {
        OutputFormat::Pretty => Ok(format_mood_stats_pretty(stats)),
        OutputFormat::Json => format_mood_stats_json(stats),
    }
}

/// Format a newly written journal entry based on output format
///
/// # Errors
///
/// Returns `SerenityError::Parse` if JSON serialization fails.
pub fn format_journal_saved(
    entry: &JournalEntry,
    format: OutputFormat,
) -> Result<String, SerenityError> {
    match format {
        OutputFormat::Pretty => Ok(format_journal_saved_pretty(entry)),
        OutputFormat::Json => format_journal_entry_json(entry),
    }
}

/// Format journal entries based on output format
///
/// # Errors
///
/// Returns `SerenityError::Parse` if JSON serialization fails.
pub fn format_journal_entries(
    entries: &[&JournalEntry],
    format: OutputFormat,
) -> Result<String, SerenityError> {
    match format {
        OutputFormat::Pretty => Ok(format_journal_entries_pretty(entries)),
        OutputFormat::Json => format_journal_entries_json(entries),
    }
}
