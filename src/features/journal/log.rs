//! The persisted journal.

use super::entry::{Analysis, JournalEntry};
use crate::error::SerenityError;
use crate::llm::Analyzer;
use crate::storage::{KeyValueStore, PersistedLog};

/// Storage key of the journal.
pub const JOURNAL_KEY: &str = "journalEntries";

/// Every journal entry, in insertion order.
#[derive(Debug, Clone)]
pub struct JournalLog {
    log: PersistedLog<JournalEntry>,
}

impl JournalLog {
    /// Load the journal from `store`. Missing or malformed data yields an empty journal.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn load(store: &dyn KeyValueStore) -> Result<Self, SerenityError> {
        Ok(Self {
            log: PersistedLog::load(store, JOURNAL_KEY)?,
        })
    }

    /// Analyse `content`, then append it with its reflection and persist.
    ///
    /// A failed analysis is replaced by [`Analysis::fallback`]; the entry is
    /// saved either way.
    ///
    /// # Errors
    ///
    /// Returns an error if `content` is blank or the journal cannot be written.
    pub async fn write(
        &mut self,
        store: &mut dyn KeyValueStore,
        analyzer: &dyn Analyzer,
        content: &str,
    ) -> Result<JournalEntry, SerenityError> {
        ensure_not_blank(content)?;

        let analysis = match analyzer.analyze(content).await {
            Ok(analysis) => analysis,
            Err(err) => {
                tracing::warn!(error = %err, "journal analysis failed, using fallback");
                Analysis::fallback()
            }
        };

        self.save(store, content, analysis)
    }

    /// Append `content` with an analysis already in hand and persist.
    ///
    /// # Errors
    ///
    /// Returns an error if `content` is blank or the journal cannot be written.
    pub fn save(
        &mut self,
        store: &mut dyn KeyValueStore,
        content: &str,
        analysis: Analysis,
    ) -> Result<JournalEntry, SerenityError> {
        ensure_not_blank(content)?;

        let mut entry = JournalEntry::new(content);
        entry.apply_analysis(analysis);
        self.log.append(store, entry.clone())?;
        tracing::debug!(id = %entry.id, sentiment = ?entry.sentiment, "journal entry saved");
        Ok(entry)
    }

    /// Entries in insertion order.
    #[must_use]
    pub fn entries(&self) -> &[JournalEntry] {
        self.log.entries()
    }

    /// Entries, most recently written first.
    pub fn newest_first(&self) -> impl Iterator<Item = &JournalEntry> {
        self.log.entries().iter().rev()
    }

    /// Whether the journal is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.log.entries().is_empty()
    }
}

fn ensure_not_blank(content: &str) -> Result<(), SerenityError> {
    if content.trim().is_empty() {
        return Err(SerenityError::InvalidInput(
            "journal entry cannot be empty".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::journal::entry::{Sentiment, FALLBACK_REFLECTION};
    use crate::llm::MockAnalyzer;
    use crate::storage::{Database, MemoryStore};

    fn analyzer_returning(sentiment: Sentiment, reflection: &'static str) -> MockAnalyzer {
        let mut analyzer = MockAnalyzer::new();
        analyzer.expect_analyze().returning(move |_| {
            Ok(Analysis {
                sentiment,
                reflection: reflection.to_string(),
            })
        });
        analyzer
    }

    #[tokio::test]
    async fn test_write_stores_analysis() {
        let mut store = MemoryStore::new();
        let mut journal = JournalLog::load(&store).unwrap();
        let analyzer = analyzer_returning(Sentiment::Positive, "That sounds lovely.");

        let entry = journal
            .write(&mut store, &analyzer, "Walked by the sea.")
            .await
            .unwrap();

        assert_eq!(entry.sentiment, Some(Sentiment::Positive));
        assert_eq!(entry.ai_reflection.as_deref(), Some("That sounds lovely."));
        assert_eq!(journal.entries().len(), 1);
    }

    #[tokio::test]
    async fn test_failed_analysis_still_saves_entry() {
        let mut db = Database::open_in_memory().unwrap();
        let mut journal = JournalLog::load(&db).unwrap();

        let mut analyzer = MockAnalyzer::new();
        analyzer
            .expect_analyze()
            .times(1)
            .returning(|_| Err(SerenityError::Companion("503 UNAVAILABLE".into())));

        let entry = journal
            .write(&mut db, &analyzer, "Rough day at work.")
            .await
            .unwrap();
        assert_eq!(entry.sentiment, Some(Sentiment::Neutral));
        assert_eq!(entry.ai_reflection.as_deref(), Some(FALLBACK_REFLECTION));

        let reloaded = JournalLog::load(&db).unwrap();
        assert_eq!(reloaded.entries().len(), 1);
        assert_eq!(reloaded.entries()[0].content, "Rough day at work.");
        assert_eq!(reloaded.entries()[0].sentiment, Some(Sentiment::Neutral));
    }

    #[tokio::test]
    async fn test_blank_entry_rejected_without_analysis() {
        let mut store = MemoryStore::new();
        let mut journal = JournalLog::load(&store).unwrap();

        let mut analyzer = MockAnalyzer::new();
        analyzer.expect_analyze().never();

        let result = journal.write(&mut store, &analyzer, "  \n ").await;
        assert!(matches!(result, Err(SerenityError::InvalidInput(_))));
        assert!(journal.is_empty());
    }

    #[test]
    fn test_save_without_analyzer() {
        let mut store = MemoryStore::new();
        let mut journal = JournalLog::load(&store).unwrap();

        let entry = journal
            .save(&mut store, "Offline today.", Analysis::fallback())
            .unwrap();
        assert_eq!(entry.ai_reflection.as_deref(), Some(FALLBACK_REFLECTION));
        assert_eq!(JournalLog::load(&store).unwrap().entries().len(), 1);
    }

    #[tokio::test]
    async fn test_newest_first() {
        let mut store = MemoryStore::new();
        let mut journal = JournalLog::load(&store).unwrap();
        let analyzer = analyzer_returning(Sentiment::Neutral, "Noted.");

        for text in ["first", "second", "third"] {
            journal.write(&mut store, &analyzer, text).await.unwrap();
        }

        let order: Vec<&str> = journal.newest_first().map(|e| e.content.as_str()).collect();
        assert_eq!(order, vec!["third", "second", "first"]);
    }
}
