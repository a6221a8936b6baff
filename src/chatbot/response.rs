//! Sending replies back to Telegram.

use log::{debug, warn};
use teloxide::{
    ApiError, Bot, RequestError,
    payloads::SendMessageSetters,
    requests::Requester,
    types::{Message, ParseMode, ReplyParameters},
};

use crate::error::Result;

/// Shown to the user whenever a turn fails, whatever the cause.
pub const APOLOGY: &str = "Sorry, I ran into an error. Please try again in a moment.";

/// Sends `text` as a reply to `msg` without any formatting.
pub async fn send_plain_reply(bot: &Bot, msg: &Message, text: &str) -> Result<()> {
    bot.send_message(msg.chat.id, text)
        .reply_parameters(ReplyParameters::new(msg.id))
        .await?;
    Ok(())
}

/// Sends a model reply as Markdown, falling back to plain text if Telegram can't parse it.
pub async fn send_markdown_reply(bot: &Bot, msg: &Message, text: &str) -> Result<()> {
    let sent = bot
        .send_message(msg.chat.id, text)
        .reply_parameters(ReplyParameters::new(msg.id))
        .parse_mode(ParseMode::Markdown)
        .await;

    match sent {
        Ok(_) => Ok(()),
        Err(RequestError::Api(ApiError::CantParseEntities(reason))) => {
            warn!("Telegram rejected Markdown reply ({reason}), resending as plain text");
            send_plain_reply(bot, msg, text).await
        }
        Err(e) => Err(e.into()),
    }
}

/// Best-effort apology; delivery failures are only logged.
pub async fn send_apology(bot: &Bot, msg: &Message) {
    if let Err(e) = send_plain_reply(bot, msg, APOLOGY).await {
        debug!("Failed to deliver apology in chat {}: {e}", msg.chat.id);
    }
}
