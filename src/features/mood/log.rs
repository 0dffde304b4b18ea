//! The persisted mood log.

use super::entry::MoodEntry;
use super::stats::MoodStats;
use crate::error::SerenityError;
use crate::storage::{KeyValueStore, PersistedLog};

/// Storage key of the mood log.
pub const MOOD_KEY: &str = "moodEntries";

/// Every mood the user has logged, in insertion order.
#[derive(Debug, Clone)]
pub struct MoodLog {
    log: PersistedLog<MoodEntry>,
}

impl MoodLog {
    /// Load the log from `store`. Missing or malformed data yields an empty log.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn load(store: &dyn KeyValueStore) -> Result<Self, SerenityError> {
        Ok(Self {
            log: PersistedLog::load(store, MOOD_KEY)?,
        })
    }

    /// Append an entry and persist the whole log.
    ///
    /// # Errors
    ///
    /// Returns an error if the log cannot be written.
    pub fn add(&mut self, store: &mut dyn KeyValueStore, entry: MoodEntry) -> Result<(), SerenityError> {
        tracing::debug!(id = %entry.id, score = entry.score.value(), "logging mood");
        self.log.append(store, entry)
    }

    /// Entries in insertion order.
    #[must_use]
    pub fn entries(&self) -> &[MoodEntry] {
        self.log.entries()
    }

    /// Whether anything has been logged.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.log.entries().is_empty()
    }

    /// The most recent `limit` entries, newest first.
    #[must_use]
    pub fn newest(&self, limit: usize) -> Vec<&MoodEntry> {
        let mut entries: Vec<&MoodEntry> = self.entries().iter().collect();
        entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        entries.truncate(limit);
        entries
    }

    /// Summary statistics.
    #[must_use]
    pub fn stats(&self) -> MoodStats {
        MoodStats::from_entries(self.entries())
    }
}
