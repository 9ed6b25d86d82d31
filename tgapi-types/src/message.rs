//! Messages, text entities and service-message payloads.
//!
//! [`Message`] mirrors the wire format: one flat struct where exactly one of the
//! content or service fields is expected to be populated. [`Message::kind`]
//! narrows it to that field so callers do not have to check every option.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::chat::{Chat, ChatShared};
use crate::keyboard::InlineKeyboardMarkup;
use crate::media::{
    Animation, Audio, Contact, Dice, Document, Game, Location, PhotoSize, Poll, Sticker, Venue,
    Video, VideoNote, Voice,
};
use crate::payments::{Invoice, SuccessfulPayment};
use crate::user::{User, UserShared};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub message_id: i32,
    /// Forum supergroups only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_thread_id: Option<i32>,
    /// Empty for messages sent to channels.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<User>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sender_chat: Option<Chat>,
    /// Unix time.
    pub date: i64,
    pub chat: Chat,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub forward_from: Option<User>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub forward_from_chat: Option<Chat>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub forward_from_message_id: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub forward_signature: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub forward_sender_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub forward_date: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_topic_message: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_automatic_forward: Option<bool>,
    /// Only one level deep: the replied-to message never carries its own reply.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_to_message: Option<Box<Message>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub via_bot: Option<User>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edit_date: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_protected_content: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_group_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_signature: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entities: Option<Vec<MessageEntity>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub animation: Option<Animation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio: Option<Audio>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document: Option<Document>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo: Option<Vec<PhotoSize>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sticker: Option<Sticker>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video: Option<Video>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_note: Option<VideoNote>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voice: Option<Voice>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption_entities: Option<Vec<MessageEntity>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_media_spoiler: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact: Option<Contact>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dice: Option<Dice>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub game: Option<Game>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poll: Option<Poll>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub venue: Option<Venue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_chat_members: Option<Vec<User>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub left_chat_member: Option<User>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_chat_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_chat_photo: Option<Vec<PhotoSize>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delete_chat_photo: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_chat_created: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supergroup_chat_created: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel_chat_created: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_auto_delete_timer_changed: Option<MessageAutoDeleteTimerChanged>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub migrate_to_chat_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub migrate_from_chat_id: Option<i64>,
    /// Only one level deep, like `reply_to_message`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pinned_message: Option<Box<Message>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invoice: Option<Invoice>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub successful_payment: Option<SuccessfulPayment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_shared: Option<UserShared>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chat_shared: Option<ChatShared>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connected_website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub write_access_allowed: Option<WriteAccessAllowed>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub passport_data: Option<PassportData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proximity_alert_triggered: Option<ProximityAlertTriggered>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub forum_topic_created: Option<ForumTopicCreated>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub forum_topic_edited: Option<ForumTopicEdited>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub forum_topic_closed: Option<ForumTopicClosed>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub forum_topic_reopened: Option<ForumTopicReopened>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub general_forum_topic_hidden: Option<GeneralForumTopicHidden>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub general_forum_topic_unhidden: Option<GeneralForumTopicUnhidden>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_chat_scheduled: Option<VideoChatScheduled>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_chat_started: Option<VideoChatStarted>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_chat_ended: Option<VideoChatEnded>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_chat_participants_invited: Option<VideoChatParticipantsInvited>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub web_app_data: Option<WebAppData>,
    /// Login buttons are shown as ordinary url buttons.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_markup: Option<InlineKeyboardMarkup>,
}

/// The populated content of a [`Message`], borrowed from it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MessageKind<'a> {
    Text(&'a str),
    Animation(&'a Animation),
    Audio(&'a Audio),
    Document(&'a Document),
    Photo(&'a [PhotoSize]),
    Sticker(&'a Sticker),
    Video(&'a Video),
    VideoNote(&'a VideoNote),
    Voice(&'a Voice),
    Contact(&'a Contact),
    Dice(&'a Dice),
    Game(&'a Game),
    Poll(&'a Poll),
    Venue(&'a Venue),
    Location(&'a Location),
    Invoice(&'a Invoice),
    SuccessfulPayment(&'a SuccessfulPayment),
    NewChatMembers(&'a [User]),
    LeftChatMember(&'a User),
    NewChatTitle(&'a str),
    NewChatPhoto(&'a [PhotoSize]),
    DeleteChatPhoto,
    GroupChatCreated,
    SupergroupChatCreated,
    ChannelChatCreated,
    MessageAutoDeleteTimerChanged(&'a MessageAutoDeleteTimerChanged),
    MigrateToChatId(i64),
    MigrateFromChatId(i64),
    PinnedMessage(&'a Message),
    UserShared(&'a UserShared),
    ChatShared(&'a ChatShared),
    ConnectedWebsite(&'a str),
    WriteAccessAllowed(&'a WriteAccessAllowed),
    PassportData(&'a PassportData),
    ProximityAlertTriggered(&'a ProximityAlertTriggered),
    ForumTopicCreated(&'a ForumTopicCreated),
    ForumTopicEdited(&'a ForumTopicEdited),
    ForumTopicClosed,
    ForumTopicReopened,
    GeneralForumTopicHidden,
    GeneralForumTopicUnhidden,
    VideoChatScheduled(&'a VideoChatScheduled),
    VideoChatStarted,
    VideoChatEnded(&'a VideoChatEnded),
    VideoChatParticipantsInvited(&'a VideoChatParticipantsInvited),
    WebAppData(&'a WebAppData),
    /// None of the known fields is set (a newer API feature, most likely).
    Unknown,
}

impl MessageKind<'_> {
    /// Service messages announce chat events instead of carrying user content.
    pub fn is_service(&self) -> bool {
        !matches!(
            self,
            Self::Text(_)
                | Self::Animation(_)
                | Self::Audio(_)
                | Self::Document(_)
                | Self::Photo(_)
                | Self::Sticker(_)
                | Self::Video(_)
                | Self::VideoNote(_)
                | Self::Voice(_)
                | Self::Contact(_)
                | Self::Dice(_)
                | Self::Game(_)
                | Self::Poll(_)
                | Self::Venue(_)
                | Self::Location(_)
                | Self::Invoice(_)
                | Self::Unknown
        )
    }
}

impl Message {
    /// Classifies the message by its first populated field.
    ///
    /// Precedence: text, then content fields in API order, then payments, then
    /// service markers. `venue` is checked before `location` because venue
    /// messages carry both.
    pub fn kind(&self) -> MessageKind<'_> {
        if let Some(text) = &self.text {
            return MessageKind::Text(text);
        }
        if let Some(v) = &self.animation {
            return MessageKind::Animation(v);
        }
        if let Some(v) = &self.audio {
            return MessageKind::Audio(v);
        }
        if let Some(v) = &self.document {
            return MessageKind::Document(v);
        }
        if let Some(v) = &self.photo {
            return MessageKind::Photo(v);
        }
        if let Some(v) = &self.sticker {
            return MessageKind::Sticker(v);
        }
        if let Some(v) = &self.video {
            return MessageKind::Video(v);
        }
        if let Some(v) = &self.video_note {
            return MessageKind::VideoNote(v);
        }
        if let Some(v) = &self.voice {
            return MessageKind::Voice(v);
        }
        if let Some(v) = &self.contact {
            return MessageKind::Contact(v);
        }
        if let Some(v) = &self.dice {
            return MessageKind::Dice(v);
        }
        if let Some(v) = &self.game {
            return MessageKind::Game(v);
        }
        if let Some(v) = &self.poll {
            return MessageKind::Poll(v);
        }
        if let Some(v) = &self.venue {
            return MessageKind::Venue(v);
        }
        if let Some(v) = &self.location {
            return MessageKind::Location(v);
        }
        if let Some(v) = &self.invoice {
            return MessageKind::Invoice(v);
        }
        if let Some(v) = &self.successful_payment {
            return MessageKind::SuccessfulPayment(v);
        }
        self.service_kind()
    }

    fn service_kind(&self) -> MessageKind<'_> {
        if let Some(v) = &self.new_chat_members {
            return MessageKind::NewChatMembers(v);
        }
        if let Some(v) = &self.left_chat_member {
            return MessageKind::LeftChatMember(v);
        }
        if let Some(v) = &self.new_chat_title {
            return MessageKind::NewChatTitle(v);
        }
        if let Some(v) = &self.new_chat_photo {
            return MessageKind::NewChatPhoto(v);
        }
        if self.delete_chat_photo == Some(true) {
            return MessageKind::DeleteChatPhoto;
        }
        if self.group_chat_created == Some(true) {
            return MessageKind::GroupChatCreated;
        }
        if self.supergroup_chat_created == Some(true) {
            return MessageKind::SupergroupChatCreated;
        }
        if self.channel_chat_created == Some(true) {
            return MessageKind::ChannelChatCreated;
        }
        if let Some(v) = &self.message_auto_delete_timer_changed {
            return MessageKind::MessageAutoDeleteTimerChanged(v);
        }
        if let Some(id) = self.migrate_to_chat_id {
            return MessageKind::MigrateToChatId(id);
        }
        if let Some(id) = self.migrate_from_chat_id {
            return MessageKind::MigrateFromChatId(id);
        }
        if let Some(v) = &self.pinned_message {
            return MessageKind::PinnedMessage(v);
        }
        if let Some(v) = &self.user_shared {
            return MessageKind::UserShared(v);
        }
        if let Some(v) = &self.chat_shared {
            return MessageKind::ChatShared(v);
        }
        if let Some(v) = &self.connected_website {
            return MessageKind::ConnectedWebsite(v);
        }
        if let Some(v) = &self.write_access_allowed {
            return MessageKind::WriteAccessAllowed(v);
        }
        if let Some(v) = &self.passport_data {
            return MessageKind::PassportData(v);
        }
        if let Some(v) = &self.proximity_alert_triggered {
            return MessageKind::ProximityAlertTriggered(v);
        }
        if let Some(v) = &self.forum_topic_created {
            return MessageKind::ForumTopicCreated(v);
        }
        if let Some(v) = &self.forum_topic_edited {
            return MessageKind::ForumTopicEdited(v);
        }
        if self.forum_topic_closed.is_some() {
            return MessageKind::ForumTopicClosed;
        }
        if self.forum_topic_reopened.is_some() {
            return MessageKind::ForumTopicReopened;
        }
        if self.general_forum_topic_hidden.is_some() {
            return MessageKind::GeneralForumTopicHidden;
        }
        if self.general_forum_topic_unhidden.is_some() {
            return MessageKind::GeneralForumTopicUnhidden;
        }
        if let Some(v) = &self.video_chat_scheduled {
            return MessageKind::VideoChatScheduled(v);
        }
        if self.video_chat_started.is_some() {
            return MessageKind::VideoChatStarted;
        }
        if let Some(v) = &self.video_chat_ended {
            return MessageKind::VideoChatEnded(v);
        }
        if let Some(v) = &self.video_chat_participants_invited {
            return MessageKind::VideoChatParticipantsInvited(v);
        }
        if let Some(v) = &self.web_app_data {
            return MessageKind::WebAppData(v);
        }
        MessageKind::Unknown
    }

    pub fn is_service(&self) -> bool {
        self.kind().is_service()
    }

    /// Message text, or the caption of a media message.
    pub fn text_or_caption(&self) -> Option<&str> {
        self.text.as_deref().or(self.caption.as_deref())
    }

    pub fn date_time(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_opt(self.date, 0).single()
    }

    pub fn edit_date_time(&self) -> Option<DateTime<Utc>> {
        self.edit_date
            .and_then(|ts| Utc.timestamp_opt(ts, 0).single())
    }

    /// The first `/command` in the text, without the leading slash or an `@botname` suffix.
    pub fn bot_command(&self) -> Option<String> {
        let text = self.text.as_deref()?;
        let entity = self
            .entities
            .as_ref()?
            .iter()
            .find(|e| e.entity_type == MessageEntityType::BotCommand)?;
        let raw = entity.extract(text)?;
        let command = raw.trim_start_matches('/');
        let command = command.split('@').next().unwrap_or(command);
        Some(command.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageEntityType {
    Mention,
    Hashtag,
    Cashtag,
    BotCommand,
    Url,
    Email,
    PhoneNumber,
    Bold,
    Italic,
    Underline,
    Strikethrough,
    Spoiler,
    Code,
    Pre,
    TextLink,
    TextMention,
    CustomEmoji,
    #[serde(other)]
    Unknown,
}

/// A special entity in a text message (hashtag, link, formatting, ...).
///
/// `offset` and `length` count UTF-16 code units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageEntity {
    #[serde(rename = "type")]
    pub entity_type: MessageEntityType,
    pub offset: i32,
    pub length: i32,
    /// `text_link` only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// `text_mention` only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    /// `pre` only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    /// `custom_emoji` only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_emoji_id: Option<String>,
}

impl MessageEntity {
    pub fn new(entity_type: MessageEntityType, offset: i32, length: i32) -> Self {
        Self {
            entity_type,
            offset,
            length,
            url: None,
            user: None,
            language: None,
            custom_emoji_id: None,
        }
    }

    /// The part of `text` this entity covers, or `None` if it is out of range.
    pub fn extract(&self, text: &str) -> Option<String> {
        let start = usize::try_from(self.offset).ok()?;
        let len = usize::try_from(self.length).ok()?;
        let units: Vec<u16> = text.encode_utf16().collect();
        let slice = units.get(start..start.checked_add(len)?)?;
        String::from_utf16(slice).ok()
    }
}

/// Service payload: the auto-delete timer settings changed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageAutoDeleteTimerChanged {
    pub message_auto_delete_time: i32,
}

/// Service payload: the user allowed the bot to write messages.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WriteAccessAllowed {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub web_app_name: Option<String>,
}

/// Telegram Passport data shared with the bot. Kept as raw JSON; decryption is up to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PassportData {
    pub data: Vec<serde_json::Value>,
    pub credentials: serde_json::Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProximityAlertTriggered {
    pub traveler: User,
    pub watcher: User,
    /// Meters.
    pub distance: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForumTopicCreated {
    pub name: String,
    /// RGB color of the topic icon.
    pub icon_color: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_custom_emoji_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ForumTopicEdited {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Empty string if the icon was removed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_custom_emoji_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ForumTopicClosed {}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ForumTopicReopened {}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeneralForumTopicHidden {}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeneralForumTopicUnhidden {}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoChatScheduled {
    pub start_date: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VideoChatStarted {}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoChatEnded {
    /// Seconds.
    pub duration: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoChatParticipantsInvited {
    pub users: Vec<User>,
}

/// Data sent from a Web App to the bot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebAppData {
    pub data: String,
    pub button_text: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::ChatType;
    use serde_json::json;

    fn message(extra: serde_json::Value) -> Message {
        let mut base = json!({
            "message_id": 1,
            "date": 1700000000,
            "chat": {"id": 123, "type": "private"}
        });
        if let (Some(obj), Some(extra)) = (base.as_object_mut(), extra.as_object()) {
            obj.extend(extra.clone());
        }
        serde_json::from_value(base).unwrap()
    }

    #[test]
    fn test_minimal_text_message() {
        let msg = message(json!({"text": "hi"}));
        assert_eq!(msg.message_id, 1);
        assert_eq!(msg.chat.chat_type, ChatType::Private);
        assert_eq!(msg.kind(), MessageKind::Text("hi"));
        assert!(!msg.is_service());
        assert_eq!(msg.text_or_caption(), Some("hi"));
    }

    #[test]
    fn test_photo_with_caption() {
        let msg = message(json!({
            "photo": [{"file_id": "f", "file_unique_id": "u", "width": 90, "height": 90}],
            "caption": "look"
        }));
        assert!(matches!(msg.kind(), MessageKind::Photo(sizes) if sizes.len() == 1));
        assert_eq!(msg.text_or_caption(), Some("look"));
    }

    #[test]
    fn test_text_takes_precedence() {
        let msg = message(json!({
            "text": "hello",
            "dice": {"emoji": "🎲", "value": 3}
        }));
        assert_eq!(msg.kind(), MessageKind::Text("hello"));
    }

    #[test]
    fn test_venue_before_location() {
        let msg = message(json!({
            "location": {"longitude": 2.35, "latitude": 48.85},
            "venue": {
                "location": {"longitude": 2.35, "latitude": 48.85},
                "title": "Louvre",
                "address": "Rue de Rivoli"
            }
        }));
        assert!(matches!(msg.kind(), MessageKind::Venue(v) if v.title == "Louvre"));
    }

    #[test]
    fn test_service_messages() {
        let joined = message(json!({
            "new_chat_members": [{"id": 5, "is_bot": false, "first_name": "New"}]
        }));
        assert!(matches!(joined.kind(), MessageKind::NewChatMembers(users) if users[0].id == 5));
        assert!(joined.is_service());

        let closed = message(json!({"forum_topic_closed": {}}));
        assert_eq!(closed.kind(), MessageKind::ForumTopicClosed);

        let migrated = message(json!({"migrate_to_chat_id": -1001234567890_i64}));
        assert_eq!(migrated.kind(), MessageKind::MigrateToChatId(-1001234567890));

        let created = message(json!({"group_chat_created": true}));
        assert_eq!(created.kind(), MessageKind::GroupChatCreated);
    }

    #[test]
    fn test_unknown_kind() {
        let msg = message(json!({"story": {}}));
        assert_eq!(msg.kind(), MessageKind::Unknown);
        assert!(!msg.is_service());
    }

    #[test]
    fn test_reply_is_one_level() {
        let msg = message(json!({
            "text": "reply",
            "reply_to_message": {
                "message_id": 0,
                "date": 1699999999,
                "chat": {"id": 123, "type": "private"},
                "text": "original"
            }
        }));
        let parent = msg.reply_to_message.as_deref().unwrap();
        assert_eq!(parent.text.as_deref(), Some("original"));
        assert!(parent.reply_to_message.is_none());
    }

    #[test]
    fn test_date_time() {
        let msg = message(json!({"text": "t", "edit_date": 1700000060}));
        assert_eq!(msg.date_time().unwrap().timestamp(), 1700000000);
        assert_eq!(msg.edit_date_time().unwrap().timestamp(), 1700000060);
    }

    #[test]
    fn test_bot_command() {
        let msg = message(json!({
            "text": "/start@my_bot payload",
            "entities": [{"type": "bot_command", "offset": 0, "length": 13}]
        }));
        assert_eq!(msg.bot_command().as_deref(), Some("start"));

        let plain = message(json!({"text": "/start"}));
        assert!(plain.bot_command().is_none());
    }

    #[test]
    fn test_entity_extract_counts_utf16() {
        // "😀" is two UTF-16 code units.
        let text = "😀 #rust";
        let entity = MessageEntity::new(MessageEntityType::Hashtag, 3, 5);
        assert_eq!(entity.extract(text).as_deref(), Some("#rust"));
        let out_of_range = MessageEntity::new(MessageEntityType::Bold, 6, 10);
        assert!(out_of_range.extract(text).is_none());
    }

    #[test]
    fn test_unknown_entity_type_tolerated() {
        let entity: MessageEntity =
            serde_json::from_value(json!({"type": "blockquote", "offset": 0, "length": 1}))
                .unwrap();
        assert_eq!(entity.entity_type, MessageEntityType::Unknown);
    }
}
