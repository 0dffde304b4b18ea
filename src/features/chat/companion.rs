//! Single-flight streaming conversation with the companion.
//!
//! A submitted message is appended to the exchange together with an empty
//! streaming reply. Fragments from the backend are accumulated into a buffer
//! and the reply text is replaced by the whole buffer after each one, so
//! observers always see a prefix of the final reply. Only one reply may be in
//! flight; a second submission is rejected rather than queued.

use std::sync::atomic::{AtomicBool, Ordering};

use futures::StreamExt;
use tokio::sync::{mpsc, Mutex};

use super::exchange::ChatExchange;
use super::message::{ChatMessage, Role};
use crate::error::SerenityError;
use crate::llm::ChatBackend;

/// Reply text used when the backend fails at any point.
pub const FALLBACK_REPLY: &str =
    "I'm having trouble connecting right now. Please try again in a moment.";

/// A change to the exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatUpdate {
    /// A message was added.
    Appended(ChatMessage),
    /// A message's text or streaming flag changed.
    Updated(ChatMessage),
}

impl ChatUpdate {
    /// The message after the change.
    #[must_use]
    pub const fn message(&self) -> &ChatMessage {
        match self {
            Self::Appended(message) | Self::Updated(message) => message,
        }
    }
}

/// Why a submission was not accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// The text was empty or whitespace.
    Empty,
    /// Another reply is still streaming.
    InFlight,
}

/// Result of [`ChatCompanion::submit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Nothing was appended.
    Rejected(Rejection),
    /// The reply finished streaming.
    Replied {
        /// The finished reply.
        reply: ChatMessage,
        /// Whether the backend failed and the fallback text was used.
        degraded: bool,
    },
}

/// Clears the in-flight flag when the submission ends, however it ends.
struct InFlightGuard<'a>(&'a AtomicBool);

impl<'a> InFlightGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// A conversation with the companion.
pub struct ChatCompanion<B> {
    backend: B,
    exchange: Mutex<ChatExchange>,
    in_flight: AtomicBool,
    updates: Option<mpsc::UnboundedSender<ChatUpdate>>,
}

impl<B: ChatBackend> ChatCompanion<B> {
    /// Start a conversation that opens with `greeting`.
    pub fn new(backend: B, greeting: impl Into<String>) -> Self {
        Self {
            backend,
            exchange: Mutex::new(ChatExchange::new(greeting)),
            in_flight: AtomicBool::new(false),
            updates: None,
        }
    }

    /// Receive every change made to the exchange from now on.
    ///
    /// Replaces any earlier subscription.
    pub fn subscribe(&mut self) -> mpsc::UnboundedReceiver<ChatUpdate> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.updates = Some(tx);
        rx
    }

    /// Copy of every message so far.
    pub async fn messages(&self) -> Vec<ChatMessage> {
        self.exchange.lock().await.messages().to_vec()
    }

    /// Send `text` and stream the companion's reply into the exchange.
    ///
    /// Empty text and submissions made while a reply is streaming are
    /// rejected without touching the exchange. Backend failures never
    /// escape: the reply is replaced with [`FALLBACK_REPLY`].
    pub async fn submit(&self, text: &str) -> SubmitOutcome {
        if text.trim().is_empty() {
            return SubmitOutcome::Rejected(Rejection::Empty);
        }
        let Some(_guard) = InFlightGuard::acquire(&self.in_flight) else {
            return SubmitOutcome::Rejected(Rejection::InFlight);
        };

        let (history, reply_id) = {
            let mut exchange = self.exchange.lock().await;
            let history = exchange.messages().to_vec();
            let user = exchange.push_user(text).clone();
            self.notify(ChatUpdate::Appended(user));
            let reply = exchange.push_placeholder().clone();
            let reply_id = reply.id.clone();
            self.notify(ChatUpdate::Appended(reply));
            (history, reply_id)
        };

        let degraded = match self.stream_into(&history, text, &reply_id).await {
            Ok(()) => false,
            Err(err) => {
                tracing::warn!(error = %err, "companion reply failed, using fallback");
                self.update(&reply_id, |exchange| {
                    exchange.replace_text(&reply_id, FALLBACK_REPLY)
                })
                .await;
                true
            }
        };

        let reply = self
            .update(&reply_id, |exchange| exchange.finish(&reply_id))
            .await
            .unwrap_or_else(|| ChatMessage {
                id: reply_id.clone(),
                role: Role::Companion,
                text: FALLBACK_REPLY.to_string(),
                is_streaming: false,
            });

        SubmitOutcome::Replied { reply, degraded }
    }

    async fn stream_into(
        &self,
        history: &[ChatMessage],
        text: &str,
        reply_id: &str,
    ) -> Result<(), SerenityError> {
        let mut fragments = self.backend.stream_reply(history, text).await?;
        let mut buffer = String::new();

        while let Some(fragment) = fragments.next().await {
            let fragment = fragment?;
            if fragment.is_empty() {
                continue;
            }
            buffer.push_str(&fragment);
            self.update(reply_id, |exchange| exchange.replace_text(reply_id, &buffer))
                .await;
        }

        tracing::debug!(chars = buffer.len(), "companion reply complete");
        Ok(())
    }

    async fn update<F>(&self, id: &str, change: F) -> Option<ChatMessage>
    where
        F: FnOnce(&mut ChatExchange) -> Option<&ChatMessage>,
    {
        let mut exchange = self.exchange.lock().await;
        let message = change(&mut *exchange).cloned();
        match &message {
            Some(message) => self.notify(ChatUpdate::Updated(message.clone())),
            None => tracing::warn!(id, "reply vanished from the exchange"),
        }
        message
    }

    fn notify(&self, update: ChatUpdate) {
        if let Some(tx) = &self.updates {
            // A dropped receiver just means nobody is watching.
            let _ = tx.send(update);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use futures::stream;
    use tokio::sync::Notify;

    use super::*;
    use crate::llm::FragmentStream;

    /// Replays fixed fragments, optionally failing after them.
    struct Scripted {
        fragments: Vec<&'static str>,
        fail_after: bool,
        seen: std::sync::Mutex<Vec<(usize, String)>>,
    }

    impl Scripted {
        fn new(fragments: Vec<&'static str>) -> Self {
            Self {
                fragments,
                fail_after: false,
                seen: std::sync::Mutex::new(Vec::new()),
            }
        }

        fn failing(fragments: Vec<&'static str>) -> Self {
            Self {
                fail_after: true,
                ..Self::new(fragments)
            }
        }
    }

    #[async_trait]
    impl ChatBackend for Scripted {
        async fn stream_reply(
            &self,
            history: &[ChatMessage],
            message: &str,
        ) -> Result<FragmentStream, SerenityError> {
            self.seen
                .lock()
                .unwrap()
                .push((history.len(), message.to_string()));

            let mut items: Vec<Result<String, SerenityError>> = self
                .fragments
                .iter()
                .map(|f| Ok((*f).to_string()))
                .collect();
            if self.fail_after {
                items.push(Err(SerenityError::Companion("connection reset".into())));
            }
            Ok(Box::pin(stream::iter(items)))
        }
    }

    struct Unreachable;

    #[async_trait]
    impl ChatBackend for Unreachable {
        async fn stream_reply(
            &self,
            _history: &[ChatMessage],
            _message: &str,
        ) -> Result<FragmentStream, SerenityError> {
            Err(SerenityError::Companion("503 UNAVAILABLE".into()))
        }
    }

    /// Holds its single fragment until released.
    struct Gated(Arc<Notify>);

    #[async_trait]
    impl ChatBackend for Gated {
        async fn stream_reply(
            &self,
            _history: &[ChatMessage],
            _message: &str,
        ) -> Result<FragmentStream, SerenityError> {
            let gate = Arc::clone(&self.0);
            Ok(Box::pin(stream::once(async move {
                gate.notified().await;
                Ok("done".to_string())
            })))
        }
    }

    fn drain(rx: &mut mpsc::UnboundedReceiver<ChatUpdate>) -> Vec<ChatUpdate> {
        let mut updates = Vec::new();
        while let Ok(update) = rx.try_recv() {
            updates.push(update);
        }
        updates
    }

    #[tokio::test]
    async fn test_reply_text_is_always_the_accumulated_prefix() {
        let mut companion = ChatCompanion::new(Scripted::new(vec!["Hel", "lo", " there"]), "Hi.");
        let mut rx = companion.subscribe();

        let outcome = companion.submit("I feel anxious").await;
        let SubmitOutcome::Replied { reply, degraded } = outcome else {
            panic!("expected a reply");
        };
        assert!(!degraded);
        assert_eq!(reply.text, "Hello there");
        assert!(!reply.is_streaming);

        let texts: Vec<(String, bool)> = drain(&mut rx)
            .into_iter()
            .map(|u| u.message().clone())
            .filter(|m| m.id == reply.id)
            .map(|m| (m.text, m.is_streaming))
            .collect();
        assert_eq!(
            texts,
            vec![
                (String::new(), true),
                ("Hel".to_string(), true),
                ("Hello".to_string(), true),
                ("Hello there".to_string(), true),
                ("Hello there".to_string(), false),
            ]
        );
    }

    #[tokio::test]
    async fn test_exchange_order_after_reply() {
        let companion = ChatCompanion::new(Scripted::new(vec!["Breathe."]), "Hi.");
        companion.submit("hello").await;

        let messages = companion.messages().await;
        let roles: Vec<Role> = messages.iter().map(|m| m.role).collect();
        assert_eq!(roles, vec![Role::Companion, Role::User, Role::Companion]);
        assert_eq!(messages[1].text, "hello");
        assert!(messages.iter().all(|m| !m.is_streaming));
    }

    #[tokio::test]
    async fn test_backend_sees_prior_exchange() {
        let companion = ChatCompanion::new(Scripted::new(vec!["ok"]), "Hi.");
        companion.submit("first").await;
        companion.submit("second").await;

        let seen = companion.backend.seen.lock().unwrap().clone();
        assert_eq!(seen, vec![(1, "first".to_string()), (3, "second".to_string())]);
    }

    #[tokio::test]
    async fn test_blank_submission_rejected() {
        let mut companion = ChatCompanion::new(Scripted::new(vec!["x"]), "Hi.");
        let mut rx = companion.subscribe();

        assert_eq!(
            companion.submit("   \n").await,
            SubmitOutcome::Rejected(Rejection::Empty)
        );
        assert_eq!(companion.messages().await.len(), 1);
        assert!(drain(&mut rx).is_empty());
    }

    #[tokio::test]
    async fn test_failure_mid_stream_uses_fallback() {
        let companion = ChatCompanion::new(Scripted::failing(vec!["Par"]), "Hi.");

        let SubmitOutcome::Replied { reply, degraded } = companion.submit("hello").await else {
            panic!("expected a reply");
        };
        assert!(degraded);
        assert_eq!(reply.text, FALLBACK_REPLY);
        assert!(!reply.is_streaming);

        // A failed reply still releases the flight.
        assert!(matches!(
            companion.submit("again").await,
            SubmitOutcome::Replied { .. }
        ));
    }

    #[tokio::test]
    async fn test_failure_before_first_fragment_uses_fallback() {
        let companion = ChatCompanion::new(Unreachable, "Hi.");

        let SubmitOutcome::Replied { reply, degraded } = companion.submit("hello").await else {
            panic!("expected a reply");
        };
        assert!(degraded);
        assert_eq!(reply.text, FALLBACK_REPLY);

        let messages = companion.messages().await;
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[2].text, FALLBACK_REPLY);
    }

    #[tokio::test]
    async fn test_second_submission_rejected_while_streaming() {
        let gate = Arc::new(Notify::new());
        let companion = ChatCompanion::new(Gated(Arc::clone(&gate)), "Hi.");

        let (first, second) = tokio::join!(companion.submit("one"), async {
            let outcome = companion.submit("two").await;
            gate.notify_one();
            outcome
        });

        assert_eq!(second, SubmitOutcome::Rejected(Rejection::InFlight));
        let SubmitOutcome::Replied { reply, .. } = first else {
            panic!("expected a reply");
        };
        assert_eq!(reply.text, "done");

        let messages = companion.messages().await;
        assert_eq!(messages.len(), 3);
        assert!(messages.iter().all(|m| m.text != "two"));

        // The flight is released once the first reply lands. The stored
        // permit lets the next reply through the gate.
        gate.notify_one();
        assert!(matches!(
            companion.submit("three").await,
            SubmitOutcome::Replied { .. }
        ));
    }
}
