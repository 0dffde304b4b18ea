//! Guided breathing command.

use std::future::Future;

use crate::cli::args::{BreatheArgs, OutputFormat};
use crate::config::BreathingConfig;
use crate::error::SerenityError;
use crate::features::breathing::{Phase, SessionRunner, SessionSnapshot};
use crate::output::{format_session_json, format_session_pretty};

/// Execute breathe command
///
/// # Errors
///
/// Returns an error if the session length is zero or the terminal fails.
pub async fn breathe(
    config: &BreathingConfig,
    args: BreatheArgs,
    format: OutputFormat,
) -> Result<String, SerenityError> {
    let seconds = args.seconds.unwrap_or(config.session_seconds);
    if seconds == 0 {
        return Err(SerenityError::InvalidInput(
            "session length must be at least one second".to_string(),
        ));
    }

    let runner = SessionRunner::from(&BreathingConfig {
        session_seconds: seconds,
        ..config.clone()
    });

    if args.plain {
        return plain(runner, format).await;
    }

    let snapshot = crate::tui::run(runner).await?;
    Ok(match snapshot.phase {
        Phase::Complete => "Session complete. Well done.".to_string(),
        _ => String::new(),
    })
}

/// Run the session at once and print a line for every change.
async fn plain(runner: SessionRunner, format: OutputFormat) -> Result<String, SerenityError> {
    run_plain(runner, format, tokio::signal::ctrl_c()).await?;
    Ok(String::new())
}

/// Print a line per change until the session ends or `interrupted` resolves.
///
/// `interrupted` is polled across every iteration, so it fires even when it
/// resolves between two session changes.
async fn run_plain<F: Future>(
    mut runner: SessionRunner,
    format: OutputFormat,
    interrupted: F,
) -> Result<SessionSnapshot, SerenityError> {
    let length = runner.session().length();
    let line = |runner: &SessionRunner| match format {
        OutputFormat::Pretty => Ok(format_session_pretty(&runner.snapshot(), length)),
        OutputFormat::Json => format_session_json(&runner.snapshot()),
    };

    tokio::pin!(interrupted);

    runner.start();
    println!("{}", line(&runner)?);

    while runner.session().is_running() {
        tokio::select! {
            changed = runner.next_change() => {
                if changed | runner.drain_pending() {
                    println!("{}", line(&runner)?);
                }
            }
            _ = &mut interrupted => {
                runner.pause();
                break;
            }
        }
    }

    Ok(runner.snapshot())
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::features::breathing::{BreathingSession, Cadence};

    fn runner(seconds: u32) -> SessionRunner {
        SessionRunner::new(BreathingSession::new(seconds), Cadence::default())
    }

    #[tokio::test(start_paused = true)]
    async fn test_plain_runs_to_completion() {
        let snapshot = run_plain(runner(3), OutputFormat::Json, std::future::pending::<()>())
            .await
            .unwrap();

        assert_eq!(snapshot.phase, Phase::Complete);
        assert_eq!(snapshot.seconds_remaining, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_interrupt_between_changes_pauses() {
        // Fires half-way between the first two ticks, after the loop has
        // already gone round once.
        let interrupt = tokio::time::sleep(Duration::from_millis(1500));
        let snapshot = run_plain(runner(10), OutputFormat::Json, interrupt)
            .await
            .unwrap();

        assert!(!snapshot.running);
        assert_eq!(snapshot.seconds_remaining, 9);
        assert_eq!(snapshot.phase, Phase::Idle);
    }
}
