//! Telegram messages and a mocked Bot API for handler tests.

use serde_json::{Value, json};
use teloxide::{Bot, types::Message};

pub const TOKEN: &str = "test_token";
pub const PRIVATE_CHAT_ID: i64 = 5;
pub const GROUP_CHAT_ID: i64 = -100;
pub const USER_ID: u64 = 42;
pub const MESSAGE_ID: i32 = 7;

/// A bot whose API calls go to `server`.
pub fn bot_for(server: &mockito::ServerGuard) -> Bot {
    let url = reqwest::Url::parse(&server.url()).expect("mock server url");
    Bot::new(TOKEN).set_api_url(url)
}

/// Request path teloxide uses for `method`.
pub fn method_path(method: &str) -> String {
    // teloxide sends method names in PascalCase (e.g. `SendMessage`).
    let mut chars = method.chars();
    let method: String = chars
        .next()
        .map(|c| c.to_ascii_uppercase())
        .into_iter()
        .chain(chars)
        .collect();
    format!("/bot{TOKEN}/{method}")
}

fn sender() -> Value {
    json!({ "id": USER_ID, "is_bot": false, "first_name": "Ada", "username": "ada" })
}

fn private_chat() -> Value {
    json!({ "id": PRIVATE_CHAT_ID, "type": "private", "first_name": "Ada" })
}

fn group_chat() -> Value {
    json!({ "id": GROUP_CHAT_ID, "type": "group", "title": "Friends" })
}

pub fn message(value: Value) -> Message {
    serde_json::from_value(value).expect("valid Telegram message")
}

pub fn private_text(text: &str) -> Message {
    message(json!({
        "message_id": MESSAGE_ID,
        "date": 1_760_000_000,
        "chat": private_chat(),
        "from": sender(),
        "text": text
    }))
}

/// Group text with the given `entities` array.
pub fn group_text(text: &str, entities: Value) -> Message {
    message(json!({
        "message_id": MESSAGE_ID,
        "date": 1_760_000_000,
        "chat": group_chat(),
        "from": sender(),
        "text": text,
        "entities": entities
    }))
}

/// Group text replying to a message written by the bot `bot_username`.
pub fn group_reply_to_bot(text: &str, bot_username: &str) -> Message {
    message(json!({
        "message_id": MESSAGE_ID,
        "date": 1_760_000_000,
        "chat": group_chat(),
        "from": sender(),
        "text": text,
        "reply_to_message": {
            "message_id": MESSAGE_ID - 1,
            "date": 1_759_999_990,
            "chat": group_chat(),
            "from": { "id": 999, "is_bot": true, "first_name": "Relay", "username": bot_username },
            "text": "earlier answer"
        }
    }))
}

pub fn private_sticker() -> Message {
    message(json!({
        "message_id": MESSAGE_ID,
        "date": 1_760_000_000,
        "chat": private_chat(),
        "from": sender(),
        "sticker": {
            "width": 512,
            "height": 512,
            "emoji": "😡",
            "is_animated": false,
            "is_video": false,
            "type": "regular",
            "file_id": "CAACAgIAAxkBAAESLdBjMImep",
            "file_unique_id": "AgADIwADsND4DA",
            "file_size": 16639
        }
    }))
}

/// Successful `sendMessage` response echoing `text`.
pub fn sent_message_body(chat_id: i64, text: &str) -> String {
    let chat = if chat_id == GROUP_CHAT_ID {
        group_chat()
    } else {
        private_chat()
    };
    json!({
        "ok": true,
        "result": {
            "message_id": MESSAGE_ID + 1,
            "date": 1_760_000_001,
            "chat": chat,
            "from": { "id": 999, "is_bot": true, "first_name": "Relay", "username": "RelayBot" },
            "text": text
        }
    })
    .to_string()
}

pub fn api_error_body(code: u16, description: &str) -> String {
    json!({ "ok": false, "error_code": code, "description": description }).to_string()
}
