//! Common types used throughout the relaybot.

use serde::{Deserialize, Serialize};

/// Role of a message in the conversation.
///
/// Maps to chat-completion API message roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// System prompt or instructions
    System,
    /// Message from the human user
    User,
    /// Message from the AI assistant
    Assistant,
}

/// Kind of Telegram chat a message arrived in, as far as admission cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatScope {
    /// One-to-one chat with the bot
    Private,
    /// Group or supergroup
    Group,
    /// Anything else (channels)
    Other,
}
