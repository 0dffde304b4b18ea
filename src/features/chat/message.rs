//! Chat messages.

use serde::{Deserialize, Serialize};

/// Identifier of the opening companion message.
pub const GREETING_ID: &str = "welcome";

/// Who wrote a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    /// The person using the app
    #[serde(rename = "user")]
    User,
    /// Serenity
    #[serde(rename = "model")]
    Companion,
}

impl Role {
    /// Role name as the model API expects it.
    #[must_use]
    pub const fn as_api_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Companion => "model",
        }
    }
}

/// One message in a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    /// Unique identifier
    pub id: String,
    /// Author
    pub role: Role,
    /// Text so far
    pub text: String,
    /// Whether the reply is still arriving
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_streaming: bool,
}

impl ChatMessage {
    /// The companion's opening message.
    #[must_use]
    pub fn greeting(text: impl Into<String>) -> Self {
        Self {
            id: GREETING_ID.to_string(),
            role: Role::Companion,
            text: text.into(),
            is_streaming: false,
        }
    }

    /// A message from the user.
    #[must_use]
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            role: Role::User,
            text: text.into(),
            is_streaming: false,
        }
    }

    /// An empty companion reply that is about to stream in.
    #[must_use]
    pub fn placeholder() -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            role: Role::Companion,
            text: String::new(),
            is_streaming: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roles_serialize_like_the_api() {
        assert_eq!(serde_json::to_value(Role::User).unwrap(), "user");
        assert_eq!(serde_json::to_value(Role::Companion).unwrap(), "model");
        assert_eq!(Role::Companion.as_api_str(), "model");
    }

    #[test]
    fn test_placeholder_is_streaming_and_empty() {
        let msg = ChatMessage::placeholder();
        assert!(msg.is_streaming);
        assert!(msg.text.is_empty());
        assert_eq!(msg.role, Role::Companion);
    }

    #[test]
    fn test_streaming_flag_omitted_when_false() {
        let value = serde_json::to_value(ChatMessage::greeting("hi")).unwrap();
        assert_eq!(value["id"], GREETING_ID);
        assert!(value.get("isStreaming").is_none());

        let value = serde_json::to_value(ChatMessage::placeholder()).unwrap();
        assert_eq!(value["isStreaming"], true);
    }

    #[test]
    fn test_ids_are_unique() {
        assert_ne!(ChatMessage::user("a").id, ChatMessage::user("a").id);
    }
}
