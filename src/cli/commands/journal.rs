//! Journal commands.

use std::io::Read;

use crate::cli::args::{JournalCommands, OutputFormat};
use crate::config::CompanionConfig;
use crate::error::SerenityError;
use crate::features::journal::{Analysis, JournalLog};
use crate::llm::GeminiClient;
use crate::output::{format_journal_entries, format_journal_saved};
use crate::storage::KeyValueStore;

/// Execute journal subcommands.
///
/// # Errors
///
/// Returns an error if the entry is empty, stdin cannot be read, the journal
/// cannot be written, or output formatting fails.
pub async fn journal(
    store: &mut dyn KeyValueStore,
    companion: &CompanionConfig,
    cmd: JournalCommands,
    format: OutputFormat,
) -> Result<String, SerenityError> {
    let mut log = JournalLog::load(store)?;

    match cmd {
        JournalCommands::Write { text } => {
            let content = match text {
                Some(text) => text,
                None => read_stdin()?,
            };

            let entry = match GeminiClient::from_config(companion) {
                Ok(client) => log.write(store, &client, &content).await?,
                Err(err) => {
                    tracing::warn!(error = %err, "companion unavailable, saving without analysis");
                    log.save(store, &content, Analysis::fallback())?
                }
            };
            format_journal_saved(&entry, format)
        }
        JournalCommands::List { limit } => {
            let entries: Vec<_> = log
                .newest_first()
                .take(limit.unwrap_or(usize::MAX))
                .collect();
            format_journal_entries(&entries, format)
        }
    }
}

fn read_stdin() -> Result<String, SerenityError> {
    let mut content = String::new();
    std::io::stdin().read_to_string(&mut content)?;
    Ok(content.trim_end().to_string())
}
