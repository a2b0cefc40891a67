use thiserror::Error;

/// Top-level error type for Pigeon.
#[derive(Debug, Error)]
pub enum PigeonError {
    /// Network, timeout, or response decoding failure. Safe to retry.
    #[error("transport error: {0}")]
    Transport(String),

    /// The Bot API answered with `ok: false`.
    #[error("api error {code}: {description}")]
    Api {
        code: i64,
        description: String,
        /// Seconds to wait before retrying (flood control).
        retry_after: Option<u64>,
    },

    /// The bot token was rejected or is malformed.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Required request fields are missing; nothing was sent.
    #[error("required fields missing: {}", .0.join(", "))]
    Required(Vec<String>),

    /// A request field holds an invalid value; nothing was sent.
    #[error("invalid field {field}: {description}")]
    Validation { field: String, description: String },

    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),

    /// I/O error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl PigeonError {
    /// Build a `Required` error from field names.
    pub fn required(fields: &[&str]) -> Self {
        Self::Required(fields.iter().map(|f| f.to_string()).collect())
    }

    /// Build a `Validation` error.
    pub fn validation(field: &str, description: impl Into<String>) -> Self {
        Self::Validation {
            field: field.to_string(),
            description: description.into(),
        }
    }

    pub fn is_api(&self) -> bool {
        matches!(self, Self::Api { .. })
    }

    /// The bot was blocked by the user or kicked from the chat.
    pub fn is_forbidden(&self) -> bool {
        matches!(self, Self::Api { code: 403, .. })
    }

    pub fn is_required(&self) -> bool {
        matches!(self, Self::Required(_))
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized(_))
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }

    /// Whether repeating the same request later may succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(_) => true,
            Self::Api { code, .. } => *code == 429 || *code >= 500,
            _ => false,
        }
    }

    /// Server-requested delay before the next attempt, if any.
    pub fn retry_after(&self) -> Option<u64> {
        match self {
            Self::Api { retry_after, .. } => *retry_after,
            _ => None,
        }
    }
}

/// Check the `<bot id>:<secret>` shape of a bot token.
///
/// Only the format is checked; the server decides whether the token is live.
pub fn is_valid_token(token: &str) -> bool {
    let Some((id, secret)) = token.split_once(':') else {
        return false;
    };
    !id.is_empty()
        && id.bytes().all(|b| b.is_ascii_digit())
        && !secret.is_empty()
        && secret
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_token_shape() {
        assert!(is_valid_token("123456:ABC-DEF1234ghIkl-zyx57W2v1u123ew11"));
        assert!(is_valid_token("1:a_b"));
    }

    #[test]
    fn test_invalid_token_shape() {
        assert!(!is_valid_token(""));
        assert!(!is_valid_token("Put your bot token here!"));
        assert!(!is_valid_token(":secret"));
        assert!(!is_valid_token("123:"));
        assert!(!is_valid_token("12a:secret"));
        assert!(!is_valid_token("123:sec ret"));
    }

    #[test]
    fn test_error_predicates() {
        let forbidden = PigeonError::Api {
            code: 403,
            description: "Forbidden: bot was blocked by the user".into(),
            retry_after: None,
        };
        assert!(forbidden.is_api());
        assert!(forbidden.is_forbidden());
        assert!(!forbidden.is_transient());

        let flood = PigeonError::Api {
            code: 429,
            description: "Too Many Requests: retry after 3".into(),
            retry_after: Some(3),
        };
        assert!(flood.is_transient());
        assert_eq!(flood.retry_after(), Some(3));

        assert!(PigeonError::Transport("timed out".into()).is_transient());
        assert!(PigeonError::Unauthorized("401".into()).is_unauthorized());
        assert!(PigeonError::required(&["chat_id"]).is_required());
        assert!(PigeonError::validation("limit", "out of range").is_validation());
    }

    #[test]
    fn test_required_message_lists_fields() {
        let err = PigeonError::required(&["chat_id", "text"]);
        assert_eq!(err.to_string(), "required fields missing: chat_id, text");
    }
}
