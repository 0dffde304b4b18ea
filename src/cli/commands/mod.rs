//! Command implementations for serenity.
//!
//! Every command returns the text to print; `main` writes it to stdout.

mod breathe;
mod chat;
mod journal;
mod mood;

pub use breathe::breathe;
pub use chat::{chat, ReplyPrinter};
pub use journal::journal;
pub use mood::mood;

use clap_complete::Shell;

use crate::cli::args::OutputFormat;
use crate::error::SerenityError;
use crate::features::completions::{generate_completions, install_instructions};
use crate::features::home::HomeScreen;
use crate::features::mood::MoodLog;
use crate::output::format_home;
use crate::storage::KeyValueStore;

/// Execute home command
///
/// # Errors
///
/// Returns an error if the mood log cannot be read or output formatting fails.
pub fn home(store: &dyn KeyValueStore, format: OutputFormat) -> Result<String, SerenityError> {
    let moods = MoodLog::load(store)?;
    format_home(&HomeScreen::now(!moods.is_empty()), format)
}

/// Execute completions command
///
/// # Errors
///
/// Returns an error if the script cannot be generated.
pub fn completions(shell: Shell, install: bool) -> Result<String, SerenityError> {
    if install {
        Ok(install_instructions(shell))
    } else {
        generate_completions(shell)
    }
}
