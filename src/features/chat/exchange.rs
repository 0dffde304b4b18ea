//! The ordered message log of one conversation.

use super::message::ChatMessage;

/// Messages of a conversation in the order they were added.
///
/// At most one companion reply is streaming at a time.
#[derive(Debug, Clone)]
pub struct ChatExchange {
    messages: Vec<ChatMessage>,
}

impl ChatExchange {
    /// Start a conversation with the companion's greeting.
    #[must_use]
    pub fn new(greeting: impl Into<String>) -> Self {
        Self {
            messages: vec![ChatMessage::greeting(greeting)],
        }
    }

    /// All messages, oldest first.
    #[must_use]
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Append a user message and return it.
    pub fn push_user(&mut self, text: &str) -> &ChatMessage {
        self.push(ChatMessage::user(text))
    }

    /// Append an empty streaming reply and return it.
    pub fn push_placeholder(&mut self) -> &ChatMessage {
        for message in &mut self.messages {
            message.is_streaming = false;
        }
        self.push(ChatMessage::placeholder())
    }

    /// Replace the text of message `id`.
    pub fn replace_text(&mut self, id: &str, text: &str) -> Option<&ChatMessage> {
        let message = self.find_mut(id)?;
        text.clone_into(&mut message.text);
        Some(message)
    }

    /// Mark message `id` as no longer streaming.
    pub fn finish(&mut self, id: &str) -> Option<&ChatMessage> {
        let message = self.find_mut(id)?;
        message.is_streaming = false;
        Some(message)
    }

    fn push(&mut self, message: ChatMessage) -> &ChatMessage {
        self.messages.push(message);
        &self.messages[self.messages.len() - 1]
    }

    fn find_mut(&mut self, id: &str) -> Option<&mut ChatMessage> {
        self.messages.iter_mut().find(|m| m.id == id)
    }
}
