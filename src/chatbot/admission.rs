//! Decides whether an inbound message is a command, a chat turn to relay, or noise.

use teloxide::types::{Message, MessageEntityKind};

use crate::types::ChatScope;

/// The parts of a Telegram message that admission looks at.
#[derive(Debug, Clone)]
pub struct Inbound<'a> {
    pub text: &'a str,
    pub scope: ChatScope,
    /// Username of the bot that wrote the message being replied to, if any.
    pub replied_bot_username: Option<&'a str>,
    /// Text of every `mention` entity, `@` included.
    pub mentions: Vec<&'a str>,
}

impl<'a> Inbound<'a> {
    /// Returns `None` for messages without text.
    pub fn from_message(msg: &'a Message) -> Option<Self> {
        let text = msg.text()?;

        let scope = if msg.chat.is_private() {
            ChatScope::Private
        } else if msg.chat.is_group() || msg.chat.is_supergroup() {
            ChatScope::Group
        } else {
            ChatScope::Other
        };

        let replied_bot_username = msg
            .reply_to_message()
            .and_then(|replied| replied.from.as_ref())
            .filter(|author| author.is_bot)
            .and_then(|author| author.username.as_deref());

        let mentions = msg
            .parse_entities()
            .unwrap_or_default()
            .into_iter()
            .filter(|entity| matches!(entity.kind(), MessageEntityKind::Mention))
            .map(|entity| entity.text())
            .collect();

        Some(Self {
            text,
            scope,
            replied_bot_username,
            mentions,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    /// Starts with `/`; try to run it as a command.
    Command,
    /// Forward to the completion API.
    Relay,
    /// Drop silently, with the reason for the debug log.
    Ignore(&'static str),
}

/// Applies the admission rules. `bot_username` is the configured name without `@`.
pub fn admit(inbound: &Inbound<'_>, bot_username: &str) -> Admission {
    if inbound.text.starts_with('/') {
        return Admission::Command;
    }

    if inbound.scope == ChatScope::Group
        && !replies_to_bot(inbound, bot_username)
        && !mentions_bot(inbound, bot_username)
    {
        return Admission::Ignore("group message does not address the bot");
    }

    Admission::Relay
}

fn replies_to_bot(inbound: &Inbound<'_>, bot_username: &str) -> bool {
    !bot_username.is_empty() && inbound.replied_bot_username == Some(bot_username)
}

fn mentions_bot(inbound: &Inbound<'_>, bot_username: &str) -> bool {
    if bot_username.is_empty() {
        return false;
    }

    let handle = format!("@{bot_username}");
    inbound.text.contains(&handle)
        || inbound
            .mentions
            .iter()
            .any(|mention| mention.eq_ignore_ascii_case(&handle))
}
