//! Entry point for every inbound Telegram message.

use std::sync::Arc;

use log::{debug, error, info};
use teloxide::{
    Bot,
    requests::Requester,
    types::{ChatAction, Message},
};

use crate::bot::Data;
use crate::error::Result;

use super::admission::{Admission, Inbound, admit};
use super::commands::{handle_command, parse_command};
use super::conversation::{conversation_key, respond};
use super::response::{send_apology, send_markdown_reply};

/// Routes a message to a command, the relay, or nowhere.
pub async fn handle_message(bot: Bot, msg: Message, data: Arc<Data>) -> Result<()> {
    let Some(inbound) = Inbound::from_message(&msg) else {
        debug!("Ignoring non-text message in chat {}", msg.chat.id);
        return Ok(());
    };

    match admit(&inbound, data.bot_username()) {
        Admission::Command => match parse_command(inbound.text, data.command_username()) {
            Some(command) => handle_command(&bot, &msg, command, &data).await?,
            None => debug!("Ignoring unrecognized command in chat {}", msg.chat.id),
        },
        Admission::Ignore(reason) => debug!("Ignoring message in chat {}: {reason}", msg.chat.id),
        Admission::Relay => relay(&bot, &msg, inbound.text, &data).await,
    }

    Ok(())
}

async fn relay(bot: &Bot, msg: &Message, text: &str, data: &Data) {
    let sender = sender_label(msg);
    info!(
        "Received message from {sender} in chat {}: {text}",
        msg.chat.id
    );

    if let Err(e) = bot.send_chat_action(msg.chat.id, ChatAction::Typing).await {
        debug!("Failed to send typing indicator: {e}");
    }

    match answer(bot, msg, text, data).await {
        Ok(reply) => info!("Replied to {sender} in chat {}: {reply}", msg.chat.id),
        Err(e) => {
            error!(
                "Error handling message from {sender} in chat {}: {e}",
                msg.chat.id
            );
            send_apology(bot, msg).await;
        }
    }
}

async fn answer(bot: &Bot, msg: &Message, text: &str, data: &Data) -> Result<String> {
    let reply = respond(
        data.completion_client(),
        data.history(),
        conversation_key(msg),
        data.system_prompt(),
        text,
    )
    .await?;

    send_markdown_reply(bot, msg, &reply).await?;
    Ok(reply)
}

fn sender_label(msg: &Message) -> String {
    match msg.from.as_ref() {
        Some(user) => match &user.username {
            Some(username) => format!("@{username} ({})", user.id),
            None => format!("{} ({})", user.full_name(), user.id),
        },
        None => "unknown sender".to_string(),
    }
}
