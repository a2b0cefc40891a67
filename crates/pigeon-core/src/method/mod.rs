//! Bot API request methods.
//!
//! Each request is a plain value built from a few shared parts: a
//! [`ChatTarget`] (who receives it), [`MessageOptions`] (how an outgoing
//! message is delivered), and the per-method payload. Serializing a method
//! yields the JSON body the Bot API expects.

mod answer;
mod edit;
mod send;
mod updates;


pub use answer::*;
pub use edit::*;
pub use send::*;
pub use updates::*;

use crate::error::PigeonError;
use crate::types::ReplyMarkup;
use serde::de::DeserializeOwned;
use serde::{Serialize, Serializer};

/// A Bot API method: its name on the wire and the type of its `result`.
pub trait Method: Serialize + Send + Sync {
    /// Method name appended to the endpoint, e.g. `sendMessage`.
    const NAME: &'static str;

    /// Decoded `result` field of a successful response.
    type Response: DeserializeOwned + Send;

    /// Reject the request before it is sent.
    fn validate(&self) -> Result<(), PigeonError> {
        Ok(())
    }
}

/// Text formatting mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ParseMode {
    Markdown,
    MarkdownV2,
    #[serde(rename = "HTML")]
    Html,
}

/// Addressable chat: numeric id or `@channelusername`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatTarget {
    Id(i64),
    Username(String),
}

impl ChatTarget {
    pub(crate) fn is_empty(&self) -> bool {
        match self {
            Self::Id(id) => *id == 0,
            Self::Username(name) => name.trim_start_matches('@').is_empty(),
        }
    }
}

impl From<i64> for ChatTarget {
    fn from(id: i64) -> Self {
        Self::Id(id)
    }
}

impl From<i32> for ChatTarget {
    fn from(id: i32) -> Self {
        Self::Id(i64::from(id))
    }
}

impl From<&str> for ChatTarget {
    fn from(name: &str) -> Self {
        Self::Username(name.to_string())
    }
}

impl Serialize for ChatTarget {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Id(id) => serializer.serialize_i64(*id),
            Self::Username(name) if name.starts_with('@') => serializer.serialize_str(name),
            Self::Username(name) => serializer.serialize_str(&format!("@{name}")),
        }
    }
}

impl std::fmt::Display for ChatTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Id(id) => write!(f, "{id}"),
            Self::Username(name) => write!(f, "@{}", name.trim_start_matches('@')),
        }
    }
}

/// Delivery options shared by every method that creates a message.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MessageOptions {
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub disable_notification: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_to_message_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_markup: Option<ReplyMarkup>,
}

/// Chat id field name used in `Required` errors.
pub(crate) const CHAT_ID: &str = "chat_id";

fn check_target(target: &ChatTarget) -> Result<(), PigeonError> {
    if target.is_empty() {
        return Err(PigeonError::required(&[CHAT_ID]));
    }
    Ok(())
}
