//! Mood commands.

use crate::cli::args::{MoodCommands, OutputFormat};
use crate::error::SerenityError;
use crate::features::mood::{MoodEntry, MoodLog, MoodScore};
use crate::output::{format_mood_entries, format_mood_entry, format_mood_stats};
use crate::storage::KeyValueStore;

/// Execute mood subcommands.
///
/// # Errors
///
/// Returns an error if the score is out of range, the log cannot be written,
/// or output formatting fails.
pub fn mood(
    store: &mut dyn KeyValueStore,
    cmd: MoodCommands,
    format: OutputFormat,
) -> Result<String, SerenityError> {
    let mut log = MoodLog::load(store)?;

    match cmd {
        MoodCommands::Add { score, note, tags } => {
            let entry = MoodEntry::new(MoodScore::try_from(score)?, note, tags);
            log.add(store, entry.clone())?;
            format_mood_entry(&entry, format)
        }
        MoodCommands::List { limit } => format_mood_entries(&log.newest(limit), format),
        MoodCommands::Stats => format_mood_stats(&log.stats(), format),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn test_add_then_list() {
        let mut store = MemoryStore::new();
        mood(
            &mut store,
            MoodCommands::Add {
                score: 4,
                note: Some("rested".to_string()),
                tags: vec!["sleep".to_string()],
            },
            OutputFormat::Json,
        )
        .unwrap();

        let output = mood(&mut store, MoodCommands::List { limit: 10 }, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["count"], 1);
        assert_eq!(value["items"][0]["note"], "rested");
    }

    #[test]
    fn test_rejects_invalid_score() {
        let mut store = MemoryStore::new();
        let result = mood(
            &mut store,
            MoodCommands::Add {
                score: 9,
                note: None,
                tags: Vec::new(),
            },
            OutputFormat::Pretty,
        );
        assert!(matches!(result, Err(SerenityError::InvalidInput(_))));
    }

    #[test]
    fn test_stats_average() {
        let mut store = MemoryStore::new();
        for score in [3, 4] {
            mood(
                &mut store,
                MoodCommands::Add {
                    score,
                    note: None,
                    tags: Vec::new(),
                },
                OutputFormat::Json,
            )
            .unwrap();
        }

        let output = mood(&mut store, MoodCommands::Stats, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["average"], "3.5");
        assert_eq!(value["total"], 2);
    }

    /// Holds a stored log but cannot read it back.
    struct UnreadableStore {
        inner: MemoryStore,
    }

    impl KeyValueStore for UnreadableStore {
        fn get(&self, _key: &str) -> Result<Option<String>, SerenityError> {
            Err(SerenityError::Database("database is locked".to_string()))
        }

        fn set(&mut self, key: &str, value: &str) -> Result<(), SerenityError> {
            self.inner.set(key, value)
        }
    }

    #[test]
    fn test_unreadable_log_is_not_overwritten() {
        let history = r#"[{"id":"a","timestamp":1700000000000,"score":2,"tags":[]}]"#;
        let mut store = UnreadableStore {
            inner: MemoryStore::with_value(crate::features::mood::MOOD_KEY, history),
        };

        let result = mood(
            &mut store,
            MoodCommands::Add {
                score: 5,
                note: None,
                tags: Vec::new(),
            },
            OutputFormat::Json,
        );

        assert!(matches!(result, Err(SerenityError::Storage(_))));
        assert_eq!(
            store.inner.get(crate::features::mood::MOOD_KEY).unwrap().as_deref(),
            Some(history)
        );
    }
}
