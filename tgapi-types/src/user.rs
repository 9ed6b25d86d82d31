//! Users and bots.

use serde::{Deserialize, Serialize};

/// A Telegram user or bot.
///
/// `id` may need up to 52 significant bits, so it is always `i64`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub is_bot: bool,
    pub first_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// IETF language tag of the user's language.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_premium: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub added_to_attachment_menu: Option<bool>,
    /// Returned only in `getMe`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub can_join_groups: Option<bool>,
    /// Returned only in `getMe`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub can_read_all_group_messages: Option<bool>,
    /// Returned only in `getMe`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supports_inline_queries: Option<bool>,
}

impl User {
    /// Builds a user with only the required fields set.
    pub fn new(id: i64, is_bot: bool, first_name: impl Into<String>) -> Self {
        Self {
            id,
            is_bot,
            first_name: first_name.into(),
            last_name: None,
            username: None,
            language_code: None,
            is_premium: None,
            added_to_attachment_menu: None,
            can_join_groups: None,
            can_read_all_group_messages: None,
            supports_inline_queries: None,
        }
    }

    /// First and last name joined by a space (just the first name when there is no last name).
    pub fn full_name(&self) -> String {
        match &self.last_name {
            Some(last) => format!("{} {}", self.first_name, last),
            None => self.first_name.clone(),
        }
    }

    /// `@username` when the user has one.
    pub fn mention(&self) -> Option<String> {
        self.username.as_ref().map(|u| format!("@{}", u))
    }
}

/// Service payload: a user was shared with the bot via a `request_user` button.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserShared {
    pub request_id: i32,
    pub user_id: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_name() {
        let mut user = User::new(1, false, "Ada");
        assert_eq!(user.full_name(), "Ada");
        user.last_name = Some("Lovelace".to_string());
        assert_eq!(user.full_name(), "Ada Lovelace");
    }

    #[test]
    fn test_mention() {
        let mut user = User::new(1, false, "Ada");
        assert!(user.mention().is_none());
        user.username = Some("ada".to_string());
        assert_eq!(user.mention().as_deref(), Some("@ada"));
    }

    #[test]
    fn test_optional_fields_not_serialized() {
        let json = serde_json::to_value(User::new(7, true, "Bot")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"id": 7, "is_bot": true, "first_name": "Bot"})
        );
    }
}
