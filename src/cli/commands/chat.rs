//! Chat command: a streaming conversation in the terminal.

use std::io::Write;

use colored::Colorize;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::cli::args::{ChatArgs, OutputFormat};
use crate::config::CompanionConfig;
use crate::error::SerenityError;
use crate::features::chat::{ChatCompanion, ChatUpdate, Role, SubmitOutcome};
use crate::llm::prompts::CRISIS_FOOTER;
use crate::llm::{ChatBackend, GeminiClient};
use crate::output::{format_reply_json, format_reply_pretty};

const EXIT_WORDS: [&str; 3] = ["exit", "quit", "bye"];

/// Execute chat command
///
/// # Errors
///
/// Returns an error if no API key is configured, the message is empty,
/// or the terminal cannot be read or written.
pub async fn chat(
    config: &CompanionConfig,
    args: ChatArgs,
    format: OutputFormat,
) -> Result<String, SerenityError> {
    let client = GeminiClient::from_config(config)?;
    let greeting = args.greeting.unwrap_or_else(|| config.greeting.clone());
    let companion = ChatCompanion::new(client, greeting);

    match args.once {
        Some(message) => once(&companion, &message, format).await,
        None => repl(companion).await,
    }
}

async fn once<B: ChatBackend>(
    companion: &ChatCompanion<B>,
    message: &str,
    format: OutputFormat,
) -> Result<String, SerenityError> {
    match companion.submit(message).await {
        SubmitOutcome::Rejected(_) => Err(SerenityError::InvalidInput(
            "message cannot be empty".to_string(),
        )),
        SubmitOutcome::Replied { reply, degraded } => match format {
            OutputFormat::Pretty => Ok(format_reply_pretty(&reply)),
            OutputFormat::Json => format_reply_json(&reply, degraded),
        },
    }
}

async fn repl<B: ChatBackend>(mut companion: ChatCompanion<B>) -> Result<String, SerenityError> {
    let mut updates = companion.subscribe();
    let mut printer = ReplyPrinter::default();

    for message in companion.messages().await {
        println!("{} {}", "Serenity:".cyan().bold(), message.text);
    }
    println!("{}", CRISIS_FOOTER.dimmed());
    println!("{}\n", "Type 'exit' or press Ctrl-D to leave.".dimmed());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        emit(&format!("{} ", "You:".bold()))?;
        let Some(line) = lines.next_line().await? else {
            break;
        };
        let trimmed = line.trim();
        if EXIT_WORDS.contains(&trimmed.to_lowercase().as_str()) {
            break;
        }
        if trimmed.is_empty() {
            continue;
        }

        let submit = companion.submit(&line);
        tokio::pin!(submit);
        loop {
            tokio::select! {
                outcome = &mut submit => {
                    if let SubmitOutcome::Rejected(reason) = outcome {
                        tracing::debug!(?reason, "message rejected");
                    }
                    break;
                }
                Some(update) = updates.recv() => {
                    if let Some(text) = printer.render(&update) {
                        emit(&text)?;
                    }
                }
            }
        }
        while let Ok(update) = updates.try_recv() {
            if let Some(text) = printer.render(&update) {
                emit(&text)?;
            }
        }
        println!();
    }

    Ok("Take care of yourself.".to_string())
}

fn emit(text: &str) -> Result<(), SerenityError> {
    let mut stdout = std::io::stdout();
    stdout.write_all(text.as_bytes())?;
    stdout.flush()?;
    Ok(())
}

/// Turns exchange updates into incremental terminal output.
///
/// Only the part of the reply not yet shown is written. If the reply text
/// stops extending what was shown, as when the fallback replaces a partial
/// reply, the full text is written on a new line.
#[derive(Debug, Default)]
pub struct ReplyPrinter {
    reply_id: Option<String>,
    shown: String,
}

impl ReplyPrinter {
    /// Text to write for `update`, if any.
    pub fn render(&mut self, update: &ChatUpdate) -> Option<String> {
        let message = update.message();
        if message.role != Role::Companion {
            return None;
        }

        match update {
            ChatUpdate::Appended(reply) if reply.is_streaming => {
                self.reply_id = Some(reply.id.clone());
                self.shown.clear();
                Some(format!("{} ", "Serenity:".cyan().bold()))
            }
            ChatUpdate::Updated(reply) if self.reply_id.as_deref() == Some(reply.id.as_str()) => {
                let mut out = match reply.text.strip_prefix(self.shown.as_str()) {
                    Some(rest) => rest.to_string(),
                    None => format!("\n{}", reply.text),
                };
                self.shown.clone_from(&reply.text);

                if !reply.is_streaming {
                    self.reply_id = None;
                    out.push('\n');
                }
                (!out.is_empty()).then_some(out)
            }
            _ => None,
        }
    }
}
