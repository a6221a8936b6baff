//! One relayed turn: history + new text in, reply out.

use log::debug;
use teloxide::types::Message as TelegramMessage;

use crate::completion::{CompletionClient, CompletionOptions, Message};
use crate::error::Result;
use crate::history::{ConversationKey, HistoryStore};

/// Sampling used for chat replies.
pub const REPLY_OPTIONS: CompletionOptions = CompletionOptions {
    temperature: 0.7,
    max_tokens: 700,
};

/// The history key for the sender of `msg` in its chat.
pub fn conversation_key(msg: &TelegramMessage) -> ConversationKey {
    ConversationKey::new(msg.chat.id.0, msg.from.as_ref().map(|user| user.id.0))
}

/// Asks the completion API for a reply to `text` and records the exchange on success.
///
/// The history for `key` is untouched when the call fails.
pub async fn respond(
    client: &CompletionClient,
    history: &HistoryStore,
    key: ConversationKey,
    system_prompt: &str,
    text: &str,
) -> Result<String> {
    let prior = history.snapshot(key).await;

    let mut messages = Vec::with_capacity(prior.len() + 2);
    messages.push(Message::system(system_prompt));
    messages.extend(prior);
    messages.push(Message::user(text));
    debug!("Conversation {key} has {} messages", messages.len());

    let reply = client.complete(&messages, REPLY_OPTIONS).await?;
    history.record_exchange(key, text, &reply).await;

    Ok(reply)
}
