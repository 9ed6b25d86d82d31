//! # tgapi-types
//!
//! Telegram Bot API data shapes: entities ([`Message`], [`Chat`], [`User`], [`Update`], ...),
//! the [`ApiResponse`] envelope, and one request payload per supported method (see [`methods`]).
//! Pure serde types with no I/O; used by tgapi-client and tgapi-cli.

pub mod chat;
pub mod chat_member;
pub mod commands;
pub mod keyboard;
pub mod media;
pub mod message;
pub mod methods;
pub mod payments;
pub mod response;
pub mod update;
pub mod user;
pub mod webhook;

pub use chat::{
    Chat, ChatAdministratorRights, ChatId, ChatInviteLink, ChatJoinRequest, ChatLocation,
    ChatPermissions, ChatPhoto, ChatShared, ChatType,
};
pub use chat_member::{
    ChatMember, ChatMemberAdministrator, ChatMemberBanned, ChatMemberLeft, ChatMemberMember,
    ChatMemberOwner, ChatMemberRestricted, ChatMemberStatus, ChatMemberUpdated,
};
pub use commands::{BotCommand, BotCommandScope};
pub use keyboard::{
    CallbackGame, ForceReply, InlineKeyboardButton, InlineKeyboardMarkup, KeyboardButton,
    KeyboardButtonPollType, KeyboardButtonRequestChat, KeyboardButtonRequestUser, LoginUrl,
    ReplyKeyboardMarkup, ReplyKeyboardRemove, ReplyMarkup, SwitchInlineQueryChosenChat, True,
    WebAppInfo,
};
pub use media::{
    Animation, Audio, Contact, Dice, Document, File, Game, InputFile, Location, MaskPosition,
    PhotoSize, Poll, PollAnswer, PollOption, PollType, Sticker, StickerType, Venue, Video,
    VideoNote, Voice,
};
pub use message::{
    Message, MessageAutoDeleteTimerChanged, MessageEntity, MessageEntityType, MessageKind,
    PassportData, WebAppData,
};
pub use methods::{EditedMessage, Method, ParseMode};
pub use payments::{
    Invoice, OrderInfo, PreCheckoutQuery, ShippingAddress, ShippingQuery, SuccessfulPayment,
};
pub use response::{ApiResponse, ResponseParameters};
pub use update::{CallbackQuery, ChosenInlineResult, InlineQuery, InlineQueryChatType, Update, UpdateKind};
pub use user::{User, UserShared};
pub use webhook::WebhookInfo;
