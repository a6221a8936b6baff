//! Slash commands: `/start`, `/help`, `/ping`, `/reset`.

use chrono::{DateTime, SecondsFormat, Utc};
use log::{debug, info};
use teloxide::{Bot, types::Message, utils::command::BotCommands};

use crate::bot::Data;
use crate::error::Result;

use super::conversation::conversation_key;
use super::response::send_plain_reply;

const RESET_REPLY: &str = "Your conversation history has been cleared.";

#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(rename_rule = "lowercase", description = "These commands are supported:")]
pub enum Command {
    #[command(description = "show what I can do")]
    Start,
    #[command(description = "show this help")]
    Help,
    #[command(description = "clear your conversation history with me")]
    Reset,
    #[command(description = "quick health check")]
    Ping,
}

/// Parses the first token of `text`; trailing words are ignored.
///
/// `bot_username` is the bot's own name, so `/help@OtherBot` is rejected.
pub fn parse_command(text: &str, bot_username: &str) -> Option<Command> {
    let head = text.split_whitespace().next()?;
    Command::parse(head, bot_username).ok()
}

pub fn help_text() -> String {
    [
        "Here’s what I can do:",
        "",
        "/help — Show this help",
        "/reset — Clear your conversation history with me",
        "/ping — Quick health check",
        "",
        "Just send a message to chat with me.",
        "",
        "Groups:",
        "- By default I reply only in private chats.",
        "- To enable group mentions, set BOT_USERNAME in your env and mention me (e.g., @YourBot) in the message.",
    ]
    .join("\n")
}

pub fn ping_text(now: DateTime<Utc>) -> String {
    format!(
        "pong ✅\n{}",
        now.to_rfc3339_opts(SecondsFormat::Millis, true)
    )
}

pub async fn handle_command(bot: &Bot, msg: &Message, command: Command, data: &Data) -> Result<()> {
    debug!("Running {command:?} in chat {}", msg.chat.id);

    let reply = match command {
        Command::Start | Command::Help => help_text(),
        Command::Ping => ping_text(Utc::now()),
        Command::Reset => {
            let key = conversation_key(msg);
            let existed = data.history().reset(key).await;
            info!("Cleared history for {key} (had history: {existed})");
            RESET_REPLY.to_string()
        }
    };

    send_plain_reply(bot, msg, &reply).await
}
