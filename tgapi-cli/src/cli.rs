//! CLI parser, config loading and command dispatch.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde_json::Value;
use tgapi_client::{Telegram, TelegramConfig};
use tgapi_types::methods::{
    DeleteWebhook, GetChat, GetChatAdministrators, GetFile, GetUpdates, ParseMode, SendMessage,
    SetWebhook,
};
use tgapi_types::ChatId;

#[derive(Parser)]
#[command(name = "tgapi")]
#[command(about = "Call Telegram Bot API methods and print the result as JSON", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Bot token; overrides BOT_TOKEN.
    #[arg(short, long, global = true)]
    pub token: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Commands {
    /// getMe: basic information about the bot.
    Me,
    /// getWebhookInfo: current webhook status.
    WebhookInfo,
    /// setWebhook: deliver updates to an HTTPS URL.
    SetWebhook {
        #[arg(long)]
        url: String,
        #[arg(long)]
        drop_pending: bool,
        #[arg(long)]
        secret_token: Option<String>,
    },
    /// deleteWebhook: switch back to getUpdates.
    DeleteWebhook {
        #[arg(long)]
        drop_pending: bool,
    },
    /// sendMessage: send a text message.
    Send {
        /// Numeric chat id or @username.
        #[arg(long, allow_hyphen_values = true)]
        chat_id: String,
        #[arg(long)]
        text: String,
        #[arg(long, value_enum)]
        parse_mode: Option<ParseModeArg>,
    },
    /// getChat: up-to-date information about a chat.
    Chat {
        #[arg(long, allow_hyphen_values = true)]
        chat_id: String,
    },
    /// getChatAdministrators: administrators of a chat.
    Admins {
        #[arg(long, allow_hyphen_values = true)]
        chat_id: String,
    },
    /// getFile: print the download URL of a file.
    File {
        #[arg(long)]
        file_id: String,
    },
    /// getUpdates: fetch pending updates (long polling when --timeout > 0).
    Updates {
        #[arg(long)]
        offset: Option<i64>,
        #[arg(long)]
        limit: Option<i32>,
        #[arg(long)]
        timeout: Option<i32>,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ParseModeArg {
    #[value(name = "MarkdownV2")]
    MarkdownV2,
    #[value(name = "HTML")]
    Html,
    #[value(name = "Markdown")]
    Markdown,
}

impl From<ParseModeArg> for ParseMode {
    fn from(mode: ParseModeArg) -> Self {
        match mode {
            ParseModeArg::MarkdownV2 => ParseMode::MarkdownV2,
            ParseModeArg::Html => ParseMode::Html,
            ParseModeArg::Markdown => ParseMode::Markdown,
        }
    }
}

/// Load TelegramConfig from environment. If `token` is provided it overrides BOT_TOKEN.
pub fn load_config(token: Option<String>) -> Result<TelegramConfig> {
    let config = TelegramConfig::from_env_with_token(token)?;
    config.validate()?;
    Ok(config)
}

/// `-100123` is a numeric id, anything else a username.
pub fn parse_chat_id(raw: &str) -> ChatId {
    raw.parse::<i64>()
        .map(ChatId::Id)
        .unwrap_or_else(|_| ChatId::Username(raw.to_string()))
}

/// Runs one command and returns the JSON to print.
pub async fn run(bot: &Telegram, command: Commands) -> Result<Value> {
    let value = match command {
        Commands::Me => serde_json::to_value(bot.get_me().await.context("getMe")?)?,
        Commands::WebhookInfo => {
            serde_json::to_value(bot.get_webhook_info().await.context("getWebhookInfo")?)?
        }
        Commands::SetWebhook {
            url,
            drop_pending,
            secret_token,
        } => {
            let mut request = SetWebhook::new(url);
            if drop_pending {
                request = request.drop_pending();
            }
            if let Some(secret) = secret_token {
                request = request.with_secret_token(secret);
            }
            Value::Bool(bot.set_webhook(&request).await.context("setWebhook")?)
        }
        Commands::DeleteWebhook { drop_pending } => {
            let request = DeleteWebhook {
                drop_pending_updates: drop_pending.then_some(true),
            };
            Value::Bool(bot.delete_webhook(&request).await.context("deleteWebhook")?)
        }
        Commands::Send {
            chat_id,
            text,
            parse_mode,
        } => {
            let mut request = SendMessage::new(parse_chat_id(&chat_id), text);
            if let Some(mode) = parse_mode {
                request = request.with_parse_mode(mode.into());
            }
            serde_json::to_value(bot.send_message(&request).await.context("sendMessage")?)?
        }
        Commands::Chat { chat_id } => serde_json::to_value(
            bot.get_chat(&GetChat::new(parse_chat_id(&chat_id)))
                .await
                .context("getChat")?,
        )?,
        Commands::Admins { chat_id } => serde_json::to_value(
            bot.get_chat_administrators(&GetChatAdministrators::new(parse_chat_id(&chat_id)))
                .await
                .context("getChatAdministrators")?,
        )?,
        Commands::File { file_id } => {
            let file = bot.get_file(&GetFile::new(file_id)).await.context("getFile")?;
            let path = file
                .file_path
                .as_deref()
                .context("getFile returned no file_path (file too big or expired)")?;
            Value::String(bot.file_url(path))
        }
        Commands::Updates {
            offset,
            limit,
            timeout,
        } => {
            let request = GetUpdates {
                offset,
                limit,
                timeout,
                allowed_updates: None,
            };
            serde_json::to_value(bot.get_updates(&request).await.context("getUpdates")?)?
        }
    };
    Ok(value)
}
