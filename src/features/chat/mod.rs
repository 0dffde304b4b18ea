//! Conversation with the companion.
//!
//! - `message`: chat messages and roles
//! - `exchange`: the ordered message log
//! - `companion`: single-flight streaming replies

pub mod companion;
pub mod exchange;
pub mod message;

pub use companion::{ChatCompanion, ChatUpdate, Rejection, SubmitOutcome, FALLBACK_REPLY};
pub use exchange::ChatExchange;
pub use message::{ChatMessage, Role, GREETING_ID};
