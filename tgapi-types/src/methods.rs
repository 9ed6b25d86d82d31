//! Request payloads, one per supported API method.
//!
//! Each payload implements [`Method`], which ties it to the method's wire name
//! and to the type found in the `result` field of a successful response.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::chat::{Chat, ChatId};
use crate::chat_member::ChatMember;
use crate::commands::{BotCommand, BotCommandScope};
use crate::keyboard::{InlineKeyboardMarkup, ReplyMarkup, True};
use crate::media::{File, InputFile};
use crate::message::{Message, MessageEntity};
use crate::response::ApiResponse;
use crate::update::Update;
use crate::user::User;
use crate::webhook::WebhookInfo;

/// An API method: its name in the URL and the shape of its result.
pub trait Method: Serialize {
    /// Method name as it appears in `/bot<token>/<NAME>`.
    const NAME: &'static str;
    /// Methods without parameters are sent with an empty body.
    const PARAMETERLESS: bool = false;
    type Response: DeserializeOwned;
}

/// Text formatting mode for `parse_mode`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParseMode {
    MarkdownV2,
    #[serde(rename = "HTML")]
    Html,
    /// Legacy mode, kept for backward compatibility.
    Markdown,
}

/// `sendMessage`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SendMessage {
    pub chat_id: ChatId,
    /// 1-4096 characters after entities parsing.
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_thread_id: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parse_mode: Option<ParseMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entities: Option<Vec<MessageEntity>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disable_web_page_preview: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disable_notification: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protect_content: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_to_message_id: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_sending_without_reply: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_markup: Option<ReplyMarkup>,
}

impl SendMessage {
    pub fn new(chat_id: impl Into<ChatId>, text: impl Into<String>) -> Self {
        Self {
            chat_id: chat_id.into(),
            text: text.into(),
            message_thread_id: None,
            parse_mode: None,
            entities: None,
            disable_web_page_preview: None,
            disable_notification: None,
            protect_content: None,
            reply_to_message_id: None,
            allow_sending_without_reply: None,
            reply_markup: None,
        }
    }

    pub fn with_parse_mode(mut self, mode: ParseMode) -> Self {
        self.parse_mode = Some(mode);
        self
    }

    pub fn with_entities(mut self, entities: Vec<MessageEntity>) -> Self {
        self.entities = Some(entities);
        self
    }

    pub fn with_thread(mut self, message_thread_id: i32) -> Self {
        self.message_thread_id = Some(message_thread_id);
        self
    }

    pub fn with_reply_to(mut self, message_id: i32) -> Self {
        self.reply_to_message_id = Some(message_id);
        self
    }

    pub fn with_reply_markup(mut self, markup: impl Into<ReplyMarkup>) -> Self {
        self.reply_markup = Some(markup.into());
        self
    }

    /// Deliver without a notification sound.
    pub fn silent(mut self) -> Self {
        self.disable_notification = Some(true);
        self
    }
}

impl Method for SendMessage {
    const NAME: &'static str = "sendMessage";
    type Response = Message;
}

/// `forwardMessage`. Service messages cannot be forwarded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForwardMessage {
    pub chat_id: ChatId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_thread_id: Option<i32>,
    pub from_chat_id: ChatId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disable_notification: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protect_content: Option<bool>,
    pub message_id: i32,
}

impl ForwardMessage {
    pub fn new(chat_id: impl Into<ChatId>, from_chat_id: impl Into<ChatId>, message_id: i32) -> Self {
        Self {
            chat_id: chat_id.into(),
            message_thread_id: None,
            from_chat_id: from_chat_id.into(),
            disable_notification: None,
            protect_content: None,
            message_id,
        }
    }
}

impl Method for ForwardMessage {
    const NAME: &'static str = "forwardMessage";
    type Response = Message;
}

/// `editMessageText`. Either `chat_id` + `message_id` or `inline_message_id` must be set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditMessageText {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chat_id: Option<ChatId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_id: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inline_message_id: Option<String>,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parse_mode: Option<ParseMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entities: Option<Vec<MessageEntity>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disable_web_page_preview: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_markup: Option<InlineKeyboardMarkup>,
}

impl EditMessageText {
    /// Edit a message the bot sent to a chat.
    pub fn new(chat_id: impl Into<ChatId>, message_id: i32, text: impl Into<String>) -> Self {
        Self {
            chat_id: Some(chat_id.into()),
            message_id: Some(message_id),
            inline_message_id: None,
            text: text.into(),
            parse_mode: None,
            entities: None,
            disable_web_page_preview: None,
            reply_markup: None,
        }
    }

    /// Edit a message sent via inline mode.
    pub fn inline(inline_message_id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            chat_id: None,
            message_id: None,
            inline_message_id: Some(inline_message_id.into()),
            text: text.into(),
            parse_mode: None,
            entities: None,
            disable_web_page_preview: None,
            reply_markup: None,
        }
    }

    pub fn with_parse_mode(mut self, mode: ParseMode) -> Self {
        self.parse_mode = Some(mode);
        self
    }

    pub fn with_reply_markup(mut self, markup: InlineKeyboardMarkup) -> Self {
        self.reply_markup = Some(markup);
        self
    }
}

/// Result of `editMessageText`: the edited message, or `true` for inline messages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EditedMessage {
    Message(Box<Message>),
    Inline(True),
}

impl EditedMessage {
    pub fn message(&self) -> Option<&Message> {
        match self {
            Self::Message(m) => Some(&**m),
            Self::Inline(_) => None,
        }
    }
}

impl Method for EditMessageText {
    const NAME: &'static str = "editMessageText";
    type Response = EditedMessage;
}

/// `getMe`: no parameters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GetMe;

impl Method for GetMe {
    const NAME: &'static str = "getMe";
    const PARAMETERLESS: bool = true;
    type Response = User;
}

/// `getWebhookInfo`: no parameters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GetWebhookInfo;

impl Method for GetWebhookInfo {
    const NAME: &'static str = "getWebhookInfo";
    const PARAMETERLESS: bool = true;
    type Response = WebhookInfo;
}

/// `setWebhook`. An empty `url` removes the webhook.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetWebhook {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub certificate: Option<InputFile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,
    /// 1-100, defaults to 40.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_connections: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_updates: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub drop_pending_updates: Option<bool>,
    /// Sent back in the `X-Telegram-Bot-Api-Secret-Token` header of every webhook request.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret_token: Option<String>,
}

impl SetWebhook {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            certificate: None,
            ip_address: None,
            max_connections: None,
            allowed_updates: None,
            drop_pending_updates: None,
            secret_token: None,
        }
    }

    pub fn with_secret_token(mut self, token: impl Into<String>) -> Self {
        self.secret_token = Some(token.into());
        self
    }

    pub fn with_allowed_updates(mut self, updates: Vec<String>) -> Self {
        self.allowed_updates = Some(updates);
        self
    }

    pub fn drop_pending(mut self) -> Self {
        self.drop_pending_updates = Some(true);
        self
    }
}

impl Method for SetWebhook {
    const NAME: &'static str = "setWebhook";
    type Response = bool;
}

/// `deleteWebhook`: switch back to `getUpdates`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeleteWebhook {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub drop_pending_updates: Option<bool>,
}

impl Method for DeleteWebhook {
    const NAME: &'static str = "deleteWebhook";
    type Response = bool;
}

/// `getUpdates` (long polling). Does not work while a webhook is set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GetUpdates {
    /// First update to return; confirms every update with a lower id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<i64>,
    /// 1-100, defaults to 100.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<i32>,
    /// Long polling timeout in seconds; 0 means short polling.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_updates: Option<Vec<String>>,
}

impl GetUpdates {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_offset(mut self, offset: i64) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn with_limit(mut self, limit: i32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_timeout(mut self, timeout: i32) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

impl Method for GetUpdates {
    const NAME: &'static str = "getUpdates";
    type Response = Vec<Update>;
}

/// `setMyCommands`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetMyCommands {
    /// At most 100 commands.
    pub commands: Vec<BotCommand>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope: Option<BotCommandScope>,
    /// Two-letter ISO 639-1 code; empty applies to every language without dedicated commands.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language_code: Option<String>,
}

impl SetMyCommands {
    pub fn new(commands: Vec<BotCommand>) -> Self {
        Self {
            commands,
            scope: None,
            language_code: None,
        }
    }

    pub fn with_scope(mut self, scope: BotCommandScope) -> Self {
        self.scope = Some(scope);
        self
    }

    pub fn with_language_code(mut self, code: impl Into<String>) -> Self {
        self.language_code = Some(code.into());
        self
    }
}

impl Method for SetMyCommands {
    const NAME: &'static str = "setMyCommands";
    type Response = bool;
}

/// `getChat`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GetChat {
    pub chat_id: ChatId,
}

impl GetChat {
    pub fn new(chat_id: impl Into<ChatId>) -> Self {
        Self {
            chat_id: chat_id.into(),
        }
    }
}

impl Method for GetChat {
    const NAME: &'static str = "getChat";
    type Response = Chat;
}

/// `getFile`. Bots can download files of up to 20MB.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GetFile {
    pub file_id: String,
}

impl GetFile {
    pub fn new(file_id: impl Into<String>) -> Self {
        Self {
            file_id: file_id.into(),
        }
    }
}

impl Method for GetFile {
    const NAME: &'static str = "getFile";
    type Response = File;
}

/// `getChatAdministrators`: administrators that are not bots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GetChatAdministrators {
    pub chat_id: ChatId,
}

impl GetChatAdministrators {
    pub fn new(chat_id: impl Into<ChatId>) -> Self {
        Self {
            chat_id: chat_id.into(),
        }
    }
}

impl Method for GetChatAdministrators {
    const NAME: &'static str = "getChatAdministrators";
    type Response = Vec<ChatMember>;
}

/// `setChatAdministratorCustomTitle`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetChatAdministratorCustomTitle {
    pub chat_id: ChatId,
    pub user_id: i64,
    /// 0-16 characters, no emoji.
    pub custom_title: String,
}

impl SetChatAdministratorCustomTitle {
    pub fn new(chat_id: impl Into<ChatId>, user_id: i64, custom_title: impl Into<String>) -> Self {
        Self {
            chat_id: chat_id.into(),
            user_id,
            custom_title: custom_title.into(),
        }
    }
}

impl Method for SetChatAdministratorCustomTitle {
    const NAME: &'static str = "setChatAdministratorCustomTitle";
    type Response = bool;
}

/// `promoteChatMember`. Passing `false` for every right demotes the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromoteChatMember {
    pub chat_id: ChatId,
    pub user_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_anonymous: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub can_manage_chat: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub can_post_messages: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub can_edit_messages: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub can_delete_messages: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub can_manage_video_chats: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub can_restrict_members: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub can_promote_members: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub can_change_info: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub can_invite_users: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub can_pin_messages: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub can_manage_topics: Option<bool>,
}

impl PromoteChatMember {
    /// Request with no rights specified; set the ones to change.
    pub fn new(chat_id: impl Into<ChatId>, user_id: i64) -> Self {
        Self {
            chat_id: chat_id.into(),
            user_id,
            is_anonymous: None,
            can_manage_chat: None,
            can_post_messages: None,
            can_edit_messages: None,
            can_delete_messages: None,
            can_manage_video_chats: None,
            can_restrict_members: None,
            can_promote_members: None,
            can_change_info: None,
            can_invite_users: None,
            can_pin_messages: None,
            can_manage_topics: None,
        }
    }

    /// Request that explicitly revokes every right.
    pub fn demote(chat_id: impl Into<ChatId>, user_id: i64) -> Self {
        let off = Some(false);
        Self {
            is_anonymous: off,
            can_manage_chat: off,
            can_post_messages: off,
            can_edit_messages: off,
            can_delete_messages: off,
            can_manage_video_chats: off,
            can_restrict_members: off,
            can_promote_members: off,
            can_change_info: off,
            can_invite_users: off,
            can_pin_messages: off,
            can_manage_topics: off,
            ..Self::new(chat_id, user_id)
        }
    }
}

impl Method for PromoteChatMember {
    const NAME: &'static str = "promoteChatMember";
    type Response = bool;
}

/// `setChatTitle`. Not available for private chats.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetChatTitle {
    pub chat_id: ChatId,
    /// 1-128 characters.
    pub title: String,
}

impl SetChatTitle {
    pub fn new(chat_id: impl Into<ChatId>, title: impl Into<String>) -> Self {
        Self {
            chat_id: chat_id.into(),
            title: title.into(),
        }
    }
}

impl Method for SetChatTitle {
    const NAME: &'static str = "setChatTitle";
    type Response = bool;
}

pub type SendMessageResult = ApiResponse<Message>;
pub type ForwardMessageResult = ApiResponse<Message>;
pub type EditMessageTextResult = ApiResponse<EditedMessage>;
pub type GetMeResult = ApiResponse<User>;
pub type WebhookInfoResult = ApiResponse<WebhookInfo>;
pub type SetWebhookResult = ApiResponse<bool>;
pub type DeleteWebhookResult = ApiResponse<bool>;
pub type GetUpdatesResult = ApiResponse<Vec<Update>>;
pub type SetMyCommandsResult = ApiResponse<bool>;
pub type GetChatResult = ApiResponse<Chat>;
pub type GetFileResult = ApiResponse<File>;
pub type GetChatAdministratorsResult = ApiResponse<Vec<ChatMember>>;
pub type SetChatAdministratorCustomTitleResult = ApiResponse<bool>;
pub type PromoteChatMemberResult = ApiResponse<bool>;
pub type SetChatTitleResult = ApiResponse<bool>;
