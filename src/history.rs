//! In-memory conversation logs, one per user per chat.

use std::collections::HashMap;
use std::fmt;

use log::debug;
use tokio::sync::RwLock;

use crate::completion::Message;

/// Identifies one user's conversation inside one chat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConversationKey {
    pub chat_id: i64,
    /// `None` when Telegram does not report a sender.
    pub user_id: Option<u64>,
}

impl ConversationKey {
    pub fn new(chat_id: i64, user_id: Option<u64>) -> Self {
        Self { chat_id, user_id }
    }
}

impl fmt::Display for ConversationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.user_id {
            Some(user_id) => write!(f, "{}:{user_id}", self.chat_id),
            None => write!(f, "{}:anonymous", self.chat_id),
        }
    }
}

/// Conversation logs trimmed to the last `max_turns` user/assistant exchanges.
pub struct HistoryStore {
    max_turns: usize,
    logs: RwLock<HashMap<ConversationKey, Vec<Message>>>,
}

impl HistoryStore {
    pub fn new(max_turns: usize) -> Self {
        Self {
            max_turns,
            logs: RwLock::new(HashMap::new()),
        }
    }

    fn max_messages(&self) -> usize {
        self.max_turns * 2
    }

    /// Returns a copy of the log for `key`, empty if none exists.
    pub async fn snapshot(&self, key: ConversationKey) -> Vec<Message> {
        self.logs
            .read()
            .await
            .get(&key)
            .cloned()
            .unwrap_or_default()
    }

    /// Appends one completed exchange and drops the oldest messages past the window.
    pub async fn record_exchange(&self, key: ConversationKey, user_text: &str, reply: &str) {
        let max_messages = self.max_messages();
        let mut logs = self.logs.write().await;
        let log = logs.entry(key).or_default();

        log.push(Message::user(user_text));
        log.push(Message::assistant(reply));

        if log.len() > max_messages {
            let excess = log.len() - max_messages;
            log.drain(..excess);
        }
        debug!("History for {key} now holds {} messages", log.len());
    }

    /// Removes the log for `key`. Returns whether there was one.
    pub async fn reset(&self, key: ConversationKey) -> bool {
        self.logs.write().await.remove(&key).is_some()
    }
}
