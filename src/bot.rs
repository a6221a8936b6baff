//! Telegram bot wiring and dispatcher loop.

use std::sync::Arc;

use log::{debug, info, warn};
use teloxide::{prelude::*, utils::command::BotCommands};

use crate::chatbot::{Command, handle_message};
use crate::completion::CompletionClient;
use crate::config::Config;
use crate::error::{BotError, Result};
use crate::history::HistoryStore;

/// Exchanges kept per conversation.
const MAX_TURNS: usize = 6;

/// State shared by every handler invocation.
pub struct Data {
    completion_client: CompletionClient,
    history: HistoryStore,
    system_prompt: String,
    bot_username: String,
    command_username: String,
}

impl Data {
    pub fn new(
        completion_client: CompletionClient,
        history: HistoryStore,
        system_prompt: String,
        bot_username: String,
        command_username: String,
    ) -> Self {
        Self {
            completion_client,
            history,
            system_prompt,
            bot_username,
            command_username,
        }
    }

    pub fn completion_client(&self) -> &CompletionClient {
        &self.completion_client
    }

    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    pub fn system_prompt(&self) -> &str {
        &self.system_prompt
    }

    /// Configured username used for group mention gating. Empty when unset.
    pub fn bot_username(&self) -> &str {
        &self.bot_username
    }

    /// Username reported by Telegram, used to match `/command@name`.
    pub fn command_username(&self) -> &str {
        &self.command_username
    }
}

/// Run the Telegram bot.
pub async fn run() -> Result<()> {
    info!("Initializing bot");
    let config = Config::from_env()?;

    debug!("Initializing completion client");
    let completion_client = CompletionClient::new(&config.completion)?;

    debug!("Creating Telegram client");
    let mut bot = Bot::new(config.telegram_token.clone());
    if let Some(api_url) = &config.telegram_api_url {
        let url = reqwest::Url::parse(api_url)
            .map_err(|e| BotError::Config(format!("Invalid TELEGRAM_API_URL: {e}")))?;
        debug!("Using Telegram API at {url}");
        bot = bot.set_api_url(url);
    }

    let me = bot.get_me().await?;
    let command_username = me.user.username.clone().unwrap_or_default();
    info!("Connected to Telegram as @{command_username}");

    if !config.bot_username.is_empty() && config.bot_username != command_username {
        warn!(
            "BOT_USERNAME is {} but Telegram reports @{command_username}; group mentions use BOT_USERNAME",
            config.bot_username
        );
    }

    debug!("Registering commands");
    match bot.set_my_commands(Command::bot_commands()).await {
        Ok(_) => info!("Commands registered successfully"),
        Err(e) => warn!("Failed to register commands: {e}"),
    }

    let data = Arc::new(Data::new(
        completion_client,
        HistoryStore::new(MAX_TURNS),
        config.system_prompt,
        config.bot_username,
        command_username,
    ));

    let handler = Update::filter_message().endpoint(handle_message);

    info!("Bot is up. Listening for messages");
    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![data])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    info!("Shutdown signal received, dispatcher stopped");
    Ok(())
}
