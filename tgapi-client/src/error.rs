use thiserror::Error;
use tgapi_types::ResponseParameters;

/// Failure of a single API call. Every variant carries the method name.
#[derive(Error, Debug)]
pub enum TelegramError {
    #[error("{method}: failed to encode request body: {source}")]
    Encode {
        method: String,
        source: serde_json::Error,
    },

    #[error("{method}: request failed: {source}")]
    Transport {
        method: String,
        source: reqwest::Error,
    },

    /// Non-2xx status. `body` is the raw response text, JSON or not.
    #[error("{method}: {status}: {status_text}, {body}")]
    Http {
        method: String,
        status: u16,
        status_text: String,
        body: String,
    },

    #[error("{method}: invalid response body: {source}")]
    Decode {
        method: String,
        source: serde_json::Error,
        body: String,
    },

    /// 2xx response whose envelope has `ok: false`.
    #[error("{method}: API error {error_code}: {description}")]
    Api {
        method: String,
        error_code: i64,
        description: String,
        parameters: Option<ResponseParameters>,
    },

    #[error("{method}: response has ok=true but no result")]
    MissingResult { method: String },
}

impl TelegramError {
    /// Name of the API method that failed.
    pub fn method(&self) -> &str {
        match self {
            Self::Encode { method, .. }
            | Self::Transport { method, .. }
            | Self::Http { method, .. }
            | Self::Decode { method, .. }
            | Self::Api { method, .. }
            | Self::MissingResult { method } => method,
        }
    }

    /// HTTP status for [`Self::Http`], error code for [`Self::Api`].
    pub fn status(&self) -> Option<i64> {
        match self {
            Self::Http { status, .. } => Some(i64::from(*status)),
            Self::Api { error_code, .. } => Some(*error_code),
            _ => None,
        }
    }

    /// Seconds to wait before retrying, when flood control was hit.
    pub fn retry_after(&self) -> Option<i32> {
        match self {
            Self::Api { parameters, .. } => parameters.as_ref().and_then(|p| p.retry_after),
            _ => None,
        }
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }
}

pub type Result<T> = std::result::Result<T, TelegramError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_error_display_keeps_body() {
        let err = TelegramError::Http {
            method: "sendMessage".to_string(),
            status: 429,
            status_text: "Too Many Requests".to_string(),
            body: "rate limited".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "sendMessage: 429: Too Many Requests, rate limited"
        );
        assert_eq!(err.status(), Some(429));
        assert_eq!(err.method(), "sendMessage");
        assert!(!err.is_transport());
    }

    #[test]
    fn test_api_error_retry_after() {
        let err = TelegramError::Api {
            method: "setChatTitle".to_string(),
            error_code: 429,
            description: "Too Many Requests: retry after 7".to_string(),
            parameters: Some(ResponseParameters {
                migrate_to_chat_id: None,
                retry_after: Some(7),
            }),
        };
        assert_eq!(err.retry_after(), Some(7));
        assert_eq!(err.status(), Some(429));
        assert!(err.to_string().contains("retry after 7"));
    }

    #[test]
    fn test_missing_result_has_no_status() {
        let err = TelegramError::MissingResult {
            method: "getMe".to_string(),
        };
        assert_eq!(err.status(), None);
        assert_eq!(err.retry_after(), None);
        assert_eq!(err.method(), "getMe");
    }
}
