//! [`Telegram`]: the HTTP client. One JSON POST per call to `{api_url}/bot<token>/<method>`.

use std::fmt;

use reqwest::header::CONTENT_TYPE;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tgapi_types::methods::*;
use tgapi_types::{ApiResponse, Chat, ChatMember, EditedMessage, File, Message, Update, User, WebhookInfo};
use tracing::{debug, warn};

use crate::config::TelegramConfig;
use crate::error::{Result, TelegramError};

/// Public Bot API server.
pub const DEFAULT_API_URL: &str = "https://api.telegram.org";

/// Masks a bot token for safe logging: first 7 chars + "***" + last 4 chars.
/// Tokens of 11 chars or fewer are fully masked as "***".
pub fn mask_token(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    let len = chars.len();
    if len <= 11 {
        return "***".to_string();
    }
    let head: String = chars[..7].iter().collect();
    let tail: String = chars[len - 4..].iter().collect();
    format!("{}***{}", head, tail)
}

/// Bot API client bound to one bot token.
///
/// Holds no mutable state; clones share the underlying connection pool, so one
/// instance can serve concurrent calls.
#[derive(Clone)]
pub struct Telegram {
    client: reqwest::Client,
    token: String,
    api_url: String,
}

impl fmt::Debug for Telegram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Telegram")
            .field("token", &mask_token(&self.token))
            .field("api_url", &self.api_url)
            .finish()
    }
}

impl Telegram {
    /// Builds a client for the public API server with a fresh `reqwest::Client`.
    pub fn new(token: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), token)
    }

    /// Builds a client reusing an existing `reqwest::Client` (proxy, timeouts, pool).
    pub fn with_client(client: reqwest::Client, token: impl Into<String>) -> Self {
        Self {
            client,
            token: token.into(),
            api_url: DEFAULT_API_URL.to_string(),
        }
    }

    /// Builds a client from config; `telegram_api_url` overrides the default server.
    pub fn from_config(config: &TelegramConfig) -> Self {
        let bot = Self::new(config.bot_token.clone());
        match &config.telegram_api_url {
            Some(url) => bot.with_api_url(url.clone()),
            None => bot,
        }
    }

    /// Points the client at another server (a local Bot API server, or a mock in tests).
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/bot{}/{}", self.api_url, self.token, method)
    }

    /// Download URL of a file path returned by `getFile`.
    pub fn file_url(&self, file_path: &str) -> String {
        format!("{}/file/bot{}/{}", self.api_url, self.token, file_path)
    }

    /// Sends one request and returns the decoded envelope as is.
    ///
    /// `ok` is not inspected: a 2xx response with `ok: false` comes back as
    /// `Ok(envelope)`. Non-2xx responses fail with [`TelegramError::Http`]
    /// carrying the raw body. `None` sends an empty body.
    pub async fn request_envelope<P, T>(
        &self,
        method: &str,
        payload: Option<&P>,
    ) -> Result<ApiResponse<T>>
    where
        P: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = match payload {
            Some(payload) => serde_json::to_vec(payload).map_err(|source| TelegramError::Encode {
                method: method.to_string(),
                source,
            })?,
            None => Vec::new(),
        };

        debug!(
            method = %method,
            token = %mask_token(&self.token),
            body_len = body.len(),
            "Telegram request"
        );

        let response = self
            .client
            .post(self.method_url(method))
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(|e| transport_error(method, e))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| transport_error(method, e))?;

        if !status.is_success() {
            warn!(
                method = %method,
                status = status.as_u16(),
                body = %text,
                "Telegram request failed"
            );
            return Err(TelegramError::Http {
                method: method.to_string(),
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or_default().to_string(),
                body: text,
            });
        }

        match serde_json::from_str::<ApiResponse<T>>(&text) {
            Ok(envelope) => {
                debug!(method = %method, ok = envelope.ok, "Telegram response");
                Ok(envelope)
            }
            Err(source) => {
                warn!(method = %method, error = %source, "Telegram response is not a valid envelope");
                Err(TelegramError::Decode {
                    method: method.to_string(),
                    source,
                    body: text,
                })
            }
        }
    }

    /// Calls `M` and returns its result, turning `ok: false` into [`TelegramError::Api`].
    pub async fn execute<M: Method>(&self, request: &M) -> Result<M::Response> {
        let payload = if M::PARAMETERLESS { None } else { Some(request) };
        let envelope = self
            .request_envelope::<M, M::Response>(M::NAME, payload)
            .await?;
        into_result(M::NAME, envelope)
    }

    pub async fn send_message(&self, request: &SendMessage) -> Result<Message> {
        self.execute(request).await
    }

    pub async fn forward_message(&self, request: &ForwardMessage) -> Result<Message> {
        self.execute(request).await
    }

    /// Returns the edited message, or [`EditedMessage::Inline`] for inline messages.
    pub async fn edit_message_text(&self, request: &EditMessageText) -> Result<EditedMessage> {
        self.execute(request).await
    }

    pub async fn get_me(&self) -> Result<User> {
        self.execute(&GetMe).await
    }

    pub async fn get_webhook_info(&self) -> Result<WebhookInfo> {
        self.execute(&GetWebhookInfo).await
    }

    pub async fn set_webhook(&self, request: &SetWebhook) -> Result<bool> {
        self.execute(request).await
    }

    pub async fn delete_webhook(&self, request: &DeleteWebhook) -> Result<bool> {
        self.execute(request).await
    }

    /// Long polling. Wait time is bounded only by `timeout` in the request and
    /// the underlying `reqwest::Client`.
    pub async fn get_updates(&self, request: &GetUpdates) -> Result<Vec<Update>> {
        self.execute(request).await
    }

    pub async fn set_my_commands(&self, request: &SetMyCommands) -> Result<bool> {
        self.execute(request).await
    }

    pub async fn get_chat(&self, request: &GetChat) -> Result<Chat> {
        self.execute(request).await
    }

    pub async fn get_file(&self, request: &GetFile) -> Result<File> {
        self.execute(request).await
    }

    pub async fn get_chat_administrators(
        &self,
        request: &GetChatAdministrators,
    ) -> Result<Vec<ChatMember>> {
        self.execute(request).await
    }

    pub async fn set_chat_administrator_custom_title(
        &self,
        request: &SetChatAdministratorCustomTitle,
    ) -> Result<bool> {
        self.execute(request).await
    }

    pub async fn promote_chat_member(&self, request: &PromoteChatMember) -> Result<bool> {
        self.execute(request).await
    }

    pub async fn set_chat_title(&self, request: &SetChatTitle) -> Result<bool> {
        self.execute(request).await
    }
}

/// reqwest errors embed the request URL, which contains the token.
fn transport_error(method: &str, error: reqwest::Error) -> TelegramError {
    let error = error.without_url();
    warn!(method = %method, error = %error, "Telegram transport error");
    TelegramError::Transport {
        method: method.to_string(),
        source: error,
    }
}

fn into_result<T>(method: &str, envelope: ApiResponse<T>) -> Result<T> {
    if !envelope.ok {
        let description = envelope.description.unwrap_or_default();
        let error_code = envelope.error_code.unwrap_or_default();
        warn!(
            method = %method,
            error_code = error_code,
            description = %description,
            "Telegram API error"
        );
        return Err(TelegramError::Api {
            method: method.to_string(),
            error_code,
            description,
            parameters: envelope.parameters,
        });
    }
    envelope.result.ok_or_else(|| TelegramError::MissingResult {
        method: method.to_string(),
    })
}
