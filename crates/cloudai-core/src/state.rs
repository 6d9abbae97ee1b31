//! UI-agnostic conversation state
//!
//! This module holds the chat transcript, the input buffer and the
//! "assistant is composing" flag. It has no knowledge of the terminal or of
//! timers; the front end decides when a pending reply is completed.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::reply::select_reply;

pub const WELCOME_MESSAGE: &str =
    "Welcome to CloudAI Assistant. How can I help you with your cloud infrastructure today?";

/// A chat message in the conversation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

/// The role of a chat message sender
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    System,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            content: content.into(),
        }
    }
}

/// Proof that a submission was accepted and still owes a reply.
///
/// Not `Clone`: completing consumes it, so each submission
/// gets at most one reply.
#[derive(Debug, PartialEq, Eq)]
pub struct PendingReply {
    utterance: String,
}

impl PendingReply {
    pub fn utterance(&self) -> &str {
        &self.utterance
    }
}

#[derive(Debug, Clone)]
pub struct ChatSession {
    messages: Vec<ChatMessage>,
    input: String,
    composing: bool,
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatSession {
    pub fn new() -> Self {
        Self {
            messages: vec![ChatMessage::system(WELCOME_MESSAGE)],
            input: String::new(),
            composing: false,
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn last_message(&self) -> Option<&ChatMessage> {
        self.messages.last()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Never true in practice: the welcome message is always present.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn is_composing(&self) -> bool {
        self.composing
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut String {
        &mut self.input
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    pub fn clear_input(&mut self) {
        self.input.clear();
    }

    /// Whether a submit of the current input would be accepted.
    pub fn can_submit(&self) -> bool {
        !self.composing && !self.input.trim().is_empty()
    }

    /// Append a user message and start composing a reply.
    ///
    /// Blank text, or any text while a reply is still pending, is ignored and
    /// leaves the session untouched.
    pub fn submit(&mut self, text: &str) -> Option<PendingReply> {
        if text.trim().is_empty() {
            debug!("ignoring blank submission");
            return None;
        }
        if self.composing {
            debug!("ignoring submission while a reply is pending");
            return None;
        }

        self.messages.push(ChatMessage::user(text));
        self.input.clear();
        self.composing = true;

        Some(PendingReply {
            utterance: text.to_string(),
        })
    }

    pub fn submit_input(&mut self) -> Option<PendingReply> {
        let text = self.input.clone();
        self.submit(&text)
    }

    pub fn complete_reply(&mut self, pending: PendingReply) {
        let reply = select_reply(&pending.utterance);
        self.messages.push(ChatMessage::system(reply));
        self.composing = false;
    }

    /// Release the composing flag when the reply will never arrive.
    pub fn abandon_reply(&mut self) {
        if self.composing {
            debug!("abandoning pending reply");
        }
        self.composing = false;
    }
}
