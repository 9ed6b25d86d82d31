//! Incoming updates and the queries they can carry.
//!
//! An [`Update`] is what `getUpdates` returns and what a webhook receives as
//! its POST body.

use serde::{Deserialize, Serialize};

use crate::chat::{Chat, ChatJoinRequest};
use crate::chat_member::ChatMemberUpdated;
use crate::media::{Location, Poll, PollAnswer};
use crate::message::Message;
use crate::payments::{PreCheckoutQuery, ShippingQuery};
use crate::user::User;

/// One incoming event. At most one payload field is set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Update {
    /// Increases sequentially; used as the `offset` for the next `getUpdates`.
    pub update_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<Message>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edited_message: Option<Message>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel_post: Option<Message>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edited_channel_post: Option<Message>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inline_query: Option<InlineQuery>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chosen_inline_result: Option<ChosenInlineResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub callback_query: Option<CallbackQuery>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipping_query: Option<ShippingQuery>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pre_checkout_query: Option<PreCheckoutQuery>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poll: Option<Poll>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poll_answer: Option<PollAnswer>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub my_chat_member: Option<ChatMemberUpdated>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chat_member: Option<ChatMemberUpdated>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chat_join_request: Option<ChatJoinRequest>,
}

/// The populated payload of an [`Update`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UpdateKind<'a> {
    Message(&'a Message),
    EditedMessage(&'a Message),
    ChannelPost(&'a Message),
    EditedChannelPost(&'a Message),
    InlineQuery(&'a InlineQuery),
    ChosenInlineResult(&'a ChosenInlineResult),
    CallbackQuery(&'a CallbackQuery),
    ShippingQuery(&'a ShippingQuery),
    PreCheckoutQuery(&'a PreCheckoutQuery),
    Poll(&'a Poll),
    PollAnswer(&'a PollAnswer),
    MyChatMember(&'a ChatMemberUpdated),
    ChatMember(&'a ChatMemberUpdated),
    ChatJoinRequest(&'a ChatJoinRequest),
    Unknown,
}

impl UpdateKind<'_> {
    /// Wire name of the payload field, as used in `allowed_updates`. `Unknown` has none.
    pub fn name(&self) -> Option<&'static str> {
        let name = match self {
            Self::Message(_) => "message",
            Self::EditedMessage(_) => "edited_message",
            Self::ChannelPost(_) => "channel_post",
            Self::EditedChannelPost(_) => "edited_channel_post",
            Self::InlineQuery(_) => "inline_query",
            Self::ChosenInlineResult(_) => "chosen_inline_result",
            Self::CallbackQuery(_) => "callback_query",
            Self::ShippingQuery(_) => "shipping_query",
            Self::PreCheckoutQuery(_) => "pre_checkout_query",
            Self::Poll(_) => "poll",
            Self::PollAnswer(_) => "poll_answer",
            Self::MyChatMember(_) => "my_chat_member",
            Self::ChatMember(_) => "chat_member",
            Self::ChatJoinRequest(_) => "chat_join_request",
            Self::Unknown => return None,
        };
        Some(name)
    }
}

impl Update {
    /// Classifies the update by the first populated payload field, in API order.
    pub fn kind(&self) -> UpdateKind<'_> {
        if let Some(m) = &self.message {
            UpdateKind::Message(m)
        } else if let Some(m) = &self.edited_message {
            UpdateKind::EditedMessage(m)
        } else if let Some(m) = &self.channel_post {
            UpdateKind::ChannelPost(m)
        } else if let Some(m) = &self.edited_channel_post {
            UpdateKind::EditedChannelPost(m)
        } else if let Some(q) = &self.inline_query {
            UpdateKind::InlineQuery(q)
        } else if let Some(r) = &self.chosen_inline_result {
            UpdateKind::ChosenInlineResult(r)
        } else if let Some(q) = &self.callback_query {
            UpdateKind::CallbackQuery(q)
        } else if let Some(q) = &self.shipping_query {
            UpdateKind::ShippingQuery(q)
        } else if let Some(q) = &self.pre_checkout_query {
            UpdateKind::PreCheckoutQuery(q)
        } else if let Some(p) = &self.poll {
            UpdateKind::Poll(p)
        } else if let Some(a) = &self.poll_answer {
            UpdateKind::PollAnswer(a)
        } else if let Some(u) = &self.my_chat_member {
            UpdateKind::MyChatMember(u)
        } else if let Some(u) = &self.chat_member {
            UpdateKind::ChatMember(u)
        } else if let Some(r) = &self.chat_join_request {
            UpdateKind::ChatJoinRequest(r)
        } else {
            UpdateKind::Unknown
        }
    }

    /// Chat the update happened in, when the payload has one.
    pub fn chat(&self) -> Option<&Chat> {
        match self.kind() {
            UpdateKind::Message(m)
            | UpdateKind::EditedMessage(m)
            | UpdateKind::ChannelPost(m)
            | UpdateKind::EditedChannelPost(m) => Some(&m.chat),
            UpdateKind::CallbackQuery(q) => q.message.as_ref().map(|m| &m.chat),
            UpdateKind::MyChatMember(u) | UpdateKind::ChatMember(u) => Some(&u.chat),
            UpdateKind::ChatJoinRequest(r) => Some(&r.chat),
            _ => None,
        }
    }

    /// User that triggered the update, when the payload has one.
    pub fn sender(&self) -> Option<&User> {
        match self.kind() {
            UpdateKind::Message(m)
            | UpdateKind::EditedMessage(m)
            | UpdateKind::ChannelPost(m)
            | UpdateKind::EditedChannelPost(m) => m.from.as_ref(),
            UpdateKind::InlineQuery(q) => Some(&q.from),
            UpdateKind::ChosenInlineResult(r) => Some(&r.from),
            UpdateKind::CallbackQuery(q) => Some(&q.from),
            UpdateKind::ShippingQuery(q) => Some(&q.from),
            UpdateKind::PreCheckoutQuery(q) => Some(&q.from),
            UpdateKind::PollAnswer(a) => Some(&a.user),
            UpdateKind::MyChatMember(u) | UpdateKind::ChatMember(u) => Some(&u.from),
            UpdateKind::ChatJoinRequest(r) => Some(&r.from),
            UpdateKind::Poll(_) | UpdateKind::Unknown => None,
        }
    }
}

/// Type of the chat an inline query was sent from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InlineQueryChatType {
    /// Private chat with the inline query sender.
    Sender,
    Private,
    Group,
    Supergroup,
    Channel,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InlineQuery {
    pub id: String,
    pub from: User,
    pub query: String,
    pub offset: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chat_type: Option<InlineQueryChatType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
}

/// Result of an inline query chosen by a user and sent to their chat partner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChosenInlineResult {
    pub result_id: String,
    pub from: User,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inline_message_id: Option<String>,
    pub query: String,
}

/// Press of a callback button in an inline keyboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallbackQuery {
    pub id: String,
    pub from: User,
    /// Absent if the message is too old.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<Message>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inline_message_id: Option<String>,
    pub chat_instance: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub game_short_name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_message_update() {
        let update: Update = serde_json::from_value(json!({
            "update_id": 10,
            "message": {
                "message_id": 3,
                "date": 1700000000,
                "from": {"id": 7, "is_bot": false, "first_name": "Ann"},
                "chat": {"id": 7, "type": "private"},
                "text": "ping"
            }
        }))
        .unwrap();
        let kind = update.kind();
        assert_eq!(kind.name(), Some("message"));
        assert!(matches!(kind, UpdateKind::Message(m) if m.text.as_deref() == Some("ping")));
        assert_eq!(update.chat().map(|c| c.id), Some(7));
        assert_eq!(update.sender().map(|u| u.first_name.as_str()), Some("Ann"));
    }

    #[test]
    fn test_callback_query_update() {
        let update: Update = serde_json::from_value(json!({
            "update_id": 11,
            "callback_query": {
                "id": "cb1",
                "from": {"id": 8, "is_bot": false, "first_name": "Bo"},
                "chat_instance": "ci",
                "data": "vote:yes"
            }
        }))
        .unwrap();
        assert_eq!(update.kind().name(), Some("callback_query"));
        assert!(update.chat().is_none());
        assert_eq!(update.sender().map(|u| u.id), Some(8));
    }

    #[test]
    fn test_chat_member_update() {
        let user = json!({"id": 9, "is_bot": false, "first_name": "Cy"});
        let update: Update = serde_json::from_value(json!({
            "update_id": 12,
            "my_chat_member": {
                "chat": {"id": -5, "type": "group", "title": "g"},
                "from": user,
                "date": 1700000000,
                "old_chat_member": {"status": "left", "user": user},
                "new_chat_member": {"status": "member", "user": user}
            }
        }))
        .unwrap();
        let UpdateKind::MyChatMember(change) = update.kind() else {
            panic!("expected my_chat_member");
        };
        assert!(!change.old_chat_member.is_present());
        assert!(change.new_chat_member.is_present());
        assert_eq!(update.chat().map(|c| c.id), Some(-5));
    }

    #[test]
    fn test_empty_update_is_unknown() {
        let update: Update =
            serde_json::from_value(json!({"update_id": 13, "message_reaction": {}})).unwrap();
        assert_eq!(update.kind(), UpdateKind::Unknown);
        assert_eq!(update.kind().name(), None);
        assert!(update.sender().is_none());
    }
}
