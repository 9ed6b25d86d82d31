//! The `{ ok, result }` envelope every API response is wrapped in.

use serde::{Deserialize, Serialize};

/// Universal response envelope.
///
/// Successful calls carry `ok: true` and `result`; failed ones carry
/// `ok: false`, `description`, usually `error_code` and sometimes `parameters`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<ResponseParameters>,
}

impl<T> ApiResponse<T> {
    /// Successful envelope around `result`.
    pub fn success(result: T) -> Self {
        Self {
            ok: true,
            result: Some(result),
            description: None,
            error_code: None,
            parameters: None,
        }
    }

    /// Failed envelope with an error code and description.
    pub fn failure(error_code: i64, description: impl Into<String>) -> Self {
        Self {
            ok: false,
            result: None,
            description: Some(description.into()),
            error_code: Some(error_code),
            parameters: None,
        }
    }
}

/// Hints on how a failed request can be retried.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResponseParameters {
    /// The group was migrated to a supergroup with this id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub migrate_to_chat_id: Option<i64>,
    /// Seconds to wait after flood control was exceeded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retry_after: Option<i32>,
}
