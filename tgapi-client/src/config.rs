//! Minimal client configuration: bot token, API base URL and log file path.
//! Loaded from the BOT_TOKEN, TELEGRAM_API_URL and LOG_FILE environment variables.

use anyhow::Result;
use std::env;
use std::fmt;

use crate::client::mask_token;

pub struct TelegramConfig {
    pub bot_token: String,
    /// Base URL of the Bot API server; `None` means the public `https://api.telegram.org`.
    pub telegram_api_url: Option<String>,
    pub log_file: Option<String>,
}

impl TelegramConfig {
    /// Loads from the environment: BOT_TOKEN is required, TELEGRAM_API_URL (or the legacy
    /// TELOXIDE_API_URL) and LOG_FILE are optional.
    pub fn from_env() -> Result<Self> {
        Self::from_env_with_token(None)
    }

    /// Like [`Self::from_env`], but a given `token` replaces BOT_TOKEN. The optional
    /// variables are read either way.
    pub fn from_env_with_token(token: Option<String>) -> Result<Self> {
        let bot_token = match token {
            Some(token) => token,
            None => env::var("BOT_TOKEN").map_err(|_| anyhow::anyhow!("BOT_TOKEN not set"))?,
        };
        let telegram_api_url = env::var("TELEGRAM_API_URL")
            .or_else(|_| env::var("TELOXIDE_API_URL"))
            .ok();
        let log_file = env::var("LOG_FILE").ok();
        Ok(Self {
            bot_token,
            telegram_api_url,
            log_file,
        })
    }

    /// Builds a config with the given token and everything else unset.
    pub fn with_token(bot_token: String) -> Self {
        Self {
            bot_token,
            telegram_api_url: None,
            log_file: None,
        }
    }

    /// Rejects an empty token and an API URL that is not an absolute http(s) URL.
    pub fn validate(&self) -> Result<()> {
        if self.bot_token.trim().is_empty() {
            anyhow::bail!("BOT_TOKEN is empty");
        }
        if let Some(url) = &self.telegram_api_url {
            let parsed = reqwest::Url::parse(url)
                .map_err(|e| anyhow::anyhow!("Invalid TELEGRAM_API_URL {:?}: {}", url, e))?;
            if !matches!(parsed.scheme(), "http" | "https") {
                anyhow::bail!("TELEGRAM_API_URL must be http or https, got {:?}", url);
            }
        }
        Ok(())
    }
}

impl fmt::Debug for TelegramConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TelegramConfig")
            .field("bot_token", &mask_token(&self.bot_token))
            .field("telegram_api_url", &self.telegram_api_url)
            .field("log_file", &self.log_file)
            .finish()
    }
}
