use std::env::{self, VarError};
use std::path::Path;

use log::{debug, error, info};

use crate::error::{BotError, Result};

const DEFAULT_SYSTEM_PROMPT: &str =
    "You are a helpful assistant. Keep answers clear and concise unless asked for detail.";
const DEFAULT_SARVAM_BASE_URL: &str = "https://api.sarvam.ai";
const DEFAULT_SARVAM_CHAT_PATH: &str = "/v1/chat/completions";
const DEFAULT_SARVAM_MODEL: &str = "sarvam-m";

/// Env files checked in order; the first one present is loaded.
const ENV_FILES: [&str; 2] = ["file.env", ".env"];

#[derive(Debug, Clone)]
pub struct Config {
    pub telegram_token: String,
    pub telegram_api_url: Option<String>,
    /// Bot username without the leading `@`. Empty disables group mentions.
    pub bot_username: String,
    pub system_prompt: String,
    pub completion: CompletionSettings,
}

/// Where and how to reach the chat-completion provider.
#[derive(Debug, Clone)]
pub struct CompletionSettings {
    pub base_url: String,
    pub chat_path: String,
    pub model: String,
    pub api_key: Option<String>,
}

impl CompletionSettings {
    pub fn endpoint(&self) -> String {
        format!("{}{}", self.base_url, self.chat_path)
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        debug!("Loading configuration from environment");
        load_env_file();
        Self::from_vars(|key| env::var(key))
    }

    /// Builds the configuration from an arbitrary variable lookup.
    pub fn from_vars<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> std::result::Result<String, VarError>,
    {
        let optional = |key: &str| lookup(key).ok().filter(|value| !value.is_empty());

        let telegram_token = lookup("TELEGRAM_BOT_TOKEN").map_err(|e| {
            error!("Missing TELEGRAM_BOT_TOKEN. Add it to file.env or .env. ({e})");
            e
        })?;
        if telegram_token.trim().is_empty() {
            return Err(BotError::Config(
                "TELEGRAM_BOT_TOKEN is set but empty".to_string(),
            ));
        }

        let bot_username = optional("BOT_USERNAME")
            .map(|name| name.trim_start_matches('@').to_string())
            .unwrap_or_default();

        let completion = CompletionSettings {
            base_url: optional("SARVAM_BASE_URL")
                .unwrap_or_else(|| DEFAULT_SARVAM_BASE_URL.to_string()),
            chat_path: optional("SARVAM_CHAT_PATH")
                .unwrap_or_else(|| DEFAULT_SARVAM_CHAT_PATH.to_string()),
            model: optional("SARVAM_MODEL").unwrap_or_else(|| DEFAULT_SARVAM_MODEL.to_string()),
            api_key: optional("SARVAM_API_KEY"),
        };

        let config = Self {
            telegram_token,
            telegram_api_url: optional("TELEGRAM_API_URL"),
            bot_username,
            system_prompt: optional("SYSTEM_PROMPT")
                .unwrap_or_else(|| DEFAULT_SYSTEM_PROMPT.to_string()),
            completion,
        };

        info!("Configuration loaded successfully");
        debug!(
            "Telegram token length: {} characters",
            config.telegram_token.len()
        );
        debug!("Bot username: {:?}", config.bot_username);
        debug!("Completion endpoint: {}", config.completion.endpoint());
        debug!("Completion model: {}", config.completion.model);
        match &config.completion.api_key {
            Some(key) => debug!("Completion API key length: {} characters", key.len()),
            None => debug!("Completion API key not set"),
        }
        debug!(
            "System prompt length: {} characters",
            config.system_prompt.len()
        );

        Ok(config)
    }
}

fn load_env_file() {
    let Some(path) = ENV_FILES.iter().map(Path::new).find(|path| path.exists()) else {
        debug!("No env file found, using process environment only");
        return;
    };

    match dotenvy::from_path(path) {
        Ok(()) => debug!("Loaded environment from {}", path.display()),
        Err(e) => error!("Failed to load {}: {e}", path.display()),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(
        pairs: &[(&str, &str)],
    ) -> impl Fn(&str) -> std::result::Result<String, VarError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned().ok_or(VarError::NotPresent)
    }

    #[test]
    fn missing_token_is_an_env_var_error() {
        let result = Config::from_vars(lookup_from(&[("SARVAM_API_KEY", "k")]));
        assert!(matches!(
            result,
            Err(BotError::EnvVar(VarError::NotPresent))
        ));
    }

    #[test]
    fn blank_token_is_a_config_error() {
        let result = Config::from_vars(lookup_from(&[("TELEGRAM_BOT_TOKEN", "  ")]));
        assert!(matches!(result, Err(BotError::Config(_))));
    }

    #[test]
    fn defaults_apply_when_optional_vars_are_absent() -> Result<()> {
        let config = Config::from_vars(lookup_from(&[("TELEGRAM_BOT_TOKEN", "123:abc")]))?;

        assert_eq!(config.telegram_token, "123:abc");
        assert_eq!(config.bot_username, "");
        assert_eq!(config.system_prompt, DEFAULT_SYSTEM_PROMPT);
        assert_eq!(
            config.completion.endpoint(),
            "https://api.sarvam.ai/v1/chat/completions"
        );
        assert_eq!(config.completion.model, "sarvam-m");
        assert!(config.completion.api_key.is_none());
        assert!(config.telegram_api_url.is_none());
        Ok(())
    }

    #[test]
    fn overrides_and_username_normalization() -> Result<()> {
        let config = Config::from_vars(lookup_from(&[
            ("TELEGRAM_BOT_TOKEN", "123:abc"),
            ("BOT_USERNAME", "@RelayBot"),
            ("SYSTEM_PROMPT", "Be terse."),
            ("SARVAM_BASE_URL", "http://localhost:9000"),
            ("SARVAM_CHAT_PATH", "/chat"),
            ("SARVAM_MODEL", "sarvam-x"),
            ("SARVAM_API_KEY", "secret"),
            ("TELEGRAM_API_URL", "http://localhost:8081"),
        ]))?;

        assert_eq!(config.bot_username, "RelayBot");
        assert_eq!(config.system_prompt, "Be terse.");
        assert_eq!(config.completion.endpoint(), "http://localhost:9000/chat");
        assert_eq!(config.completion.model, "sarvam-x");
        assert_eq!(config.completion.api_key.as_deref(), Some("secret"));
        assert_eq!(
            config.telegram_api_url.as_deref(),
            Some("http://localhost:8081")
        );
        Ok(())
    }

    #[test]
    fn empty_optional_values_count_as_unset() -> Result<()> {
        let config = Config::from_vars(lookup_from(&[
            ("TELEGRAM_BOT_TOKEN", "123:abc"),
            ("SARVAM_API_KEY", ""),
            ("SYSTEM_PROMPT", ""),
        ]))?;

        assert!(config.completion.api_key.is_none());
        assert_eq!(config.system_prompt, DEFAULT_SYSTEM_PROMPT);
        Ok(())
    }
}
