//! Language model backends.
//!
//! Two seams are exposed:
//! - [`ChatBackend`]: streams a companion reply as text fragments
//! - [`Analyzer`]: turns a journal entry into a sentiment and reflection
//!
//! [`GeminiClient`] implements both against the Gemini REST API.

mod gemini;
pub mod prompts;
mod sse;

use std::pin::Pin;

use async_trait::async_trait;
use futures::Stream;

use crate::error::SerenityError;
use crate::features::chat::ChatMessage;
use crate::features::journal::Analysis;

pub use gemini::GeminiClient;
pub use sse::SseDecoder;

/// Ordered text fragments of one reply. Each item is a delta, not the text so far.
pub type FragmentStream = Pin<Box<dyn Stream<Item = Result<String, SerenityError>> + Send>>;

/// Something that can produce a streamed companion reply.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Start a reply to `message`, given every earlier message of the conversation.
    ///
    /// # Errors
    ///
    /// Returns an error if the request cannot be started. Failures after the
    /// first fragment arrive as `Err` items of the stream.
    async fn stream_reply(
        &self,
        history: &[ChatMessage],
        message: &str,
    ) -> Result<FragmentStream, SerenityError>;
}

/// Something that can analyse a journal entry.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Analyzer: Send + Sync {
    /// Determine sentiment and a short reflection for `content`.
    ///
    /// # Errors
    ///
    /// Returns an error if the service fails or its answer is unusable.
    async fn analyze(&self, content: &str) -> Result<Analysis, SerenityError>;
}
