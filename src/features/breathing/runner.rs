//! Wall-clock driver for a breathing session.
//!
//! Two tokio tasks run while the session is running: a one-second countdown
//! and the inhale/exhale cadence. Both report back over a channel and are
//! aborted together whenever the session leaves the running state or the
//! runner is dropped. Every batch of tasks carries a generation number so
//! events still queued from aborted tasks are discarded.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

use super::phase::{Breath, Cadence};
use super::session::{BreathingSession, SessionSnapshot};

/// Event reported by a scheduled task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    /// One second elapsed.
    Tick {
        /// Generation of the task that sent it.
        generation: u64,
    },
    /// The cadence switched halves.
    Breath {
        /// Generation of the task that sent it.
        generation: u64,
        /// The half now in effect.
        breath: Breath,
    },
}

impl SessionEvent {
    const fn generation(&self) -> u64 {
        match self {
            Self::Tick { generation } | Self::Breath { generation, .. } => *generation,
        }
    }
}

/// The countdown and cadence tasks of one running stretch.
struct ScheduledTasks {
    countdown: JoinHandle<()>,
    cadence: JoinHandle<()>,
}

impl ScheduledTasks {
    fn spawn(generation: u64, cadence: Cadence, tx: &mpsc::UnboundedSender<SessionEvent>) -> Self {
        let countdown_tx = tx.clone();
        let countdown = tokio::spawn(async move {
            let second = Duration::from_secs(1);
            let mut ticker = time::interval_at(Instant::now() + second, second);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                if countdown_tx.send(SessionEvent::Tick { generation }).is_err() {
                    break;
                }
            }
        });

        let cadence_tx = tx.clone();
        let cadence = tokio::spawn(async move {
            let mut breath = Breath::Inhale;
            loop {
                time::sleep(cadence.duration_of(breath)).await;
                breath = breath.next();
                if cadence_tx
                    .send(SessionEvent::Breath { generation, breath })
                    .is_err()
                {
                    break;
                }
            }
        });

        Self { countdown, cadence }
    }
}

impl Drop for ScheduledTasks {
    fn drop(&mut self) {
        self.countdown.abort();
        self.cadence.abort();
    }
}

/// Drives a [`BreathingSession`] from real time.
pub struct SessionRunner {
    session: BreathingSession,
    cadence: Cadence,
    generation: u64,
    tasks: Option<ScheduledTasks>,
    tx: mpsc::UnboundedSender<SessionEvent>,
    rx: mpsc::UnboundedReceiver<SessionEvent>,
}

impl SessionRunner {
    /// Create a runner for an idle session.
    #[must_use]
    pub fn new(session: BreathingSession, cadence: Cadence) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            session,
            cadence,
            generation: 0,
            tasks: None,
            tx,
            rx,
        }
    }

    /// Start or resume. Must be called inside a tokio runtime.
    pub fn start(&mut self) {
        if self.session.start() {
            self.generation += 1;
            self.tasks = Some(ScheduledTasks::spawn(self.generation, self.cadence, &self.tx));
            tracing::debug!(
                generation = self.generation,
                remaining = self.session.seconds_remaining(),
                "breathing session started"
            );
        }
    }

    /// Pause, keeping the time remaining.
    pub fn pause(&mut self) {
        self.session.pause();
        self.cancel_tasks();
    }

    /// Start when stopped, pause when running.
    pub fn toggle(&mut self) {
        if self.session.is_running() {
            self.pause();
        } else {
            self.start();
        }
    }

    /// Stop and rewind to the full length.
    pub fn reset(&mut self) {
        self.session.reset();
        self.cancel_tasks();
    }

    /// Apply one event. Returns true if the session changed.
    pub fn apply(&mut self, event: SessionEvent) -> bool {
        if event.generation() != self.generation || self.tasks.is_none() {
            return false;
        }

        let before = self.session.snapshot();
        match event {
            SessionEvent::Tick { .. } => {
                if self.session.tick() {
                    tracing::debug!("breathing session complete");
                    self.cancel_tasks();
                }
            }
            SessionEvent::Breath { breath, .. } => self.session.set_breath(breath),
        }
        self.session.snapshot() != before
    }

    /// Wait for the next event and apply it.
    ///
    /// Returns true if the session changed. While stopped no events are
    /// produced, so this only resolves after a later `start`.
    pub async fn next_change(&mut self) -> bool {
        match self.rx.recv().await {
            Some(event) => self.apply(event),
            None => false,
        }
    }

    /// Apply every event already queued without waiting.
    ///
    /// Returns true if any of them changed the session.
    pub fn drain_pending(&mut self) -> bool {
        let mut changed = false;
        while let Ok(event) = self.rx.try_recv() {
            changed |= self.apply(event);
        }
        changed
    }

    /// The session being driven.
    #[must_use]
    pub const fn session(&self) -> &BreathingSession {
        &self.session
    }

    /// Capture the current state.
    #[must_use]
    pub const fn snapshot(&self) -> SessionSnapshot {
        self.session.snapshot()
    }

    /// Whether countdown and cadence tasks are live.
    #[cfg(test)]
    const fn has_scheduled_tasks(&self) -> bool {
        self.tasks.is_some()
    }

    fn cancel_tasks(&mut self) {
        if self.tasks.take().is_some() {
            // Invalidate anything the aborted tasks already queued.
            self.generation += 1;
        }
    }
}
