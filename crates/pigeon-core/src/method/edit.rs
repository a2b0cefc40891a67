//! Editing messages in place.

use super::{ChatTarget, Method, ParseMode};
use crate::error::PigeonError;
use crate::types::{InlineKeyboardMarkup, Message};
use serde::{Deserialize, Serialize};

/// Which message to edit: one in a chat, or one sent via inline mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum EditTarget {
    Chat { chat_id: ChatTarget, message_id: i64 },
    Inline { inline_message_id: String },
}

impl EditTarget {
    pub fn chat(chat_id: impl Into<ChatTarget>, message_id: i64) -> Self {
        Self::Chat {
            chat_id: chat_id.into(),
            message_id,
        }
    }

    pub fn inline(inline_message_id: impl Into<String>) -> Self {
        Self::Inline {
            inline_message_id: inline_message_id.into(),
        }
    }

    fn validate(&self) -> Result<(), PigeonError> {
        match self {
            Self::Chat {
                chat_id,
                message_id,
            } => {
                let mut missing = Vec::new();
                if chat_id.is_empty() {
                    missing.push(super::CHAT_ID);
                }
                if *message_id == 0 {
                    missing.push("message_id");
                }
                if missing.is_empty() {
                    Ok(())
                } else {
                    Err(PigeonError::required(&missing))
                }
            }
            Self::Inline { inline_message_id } if inline_message_id.is_empty() => {
                Err(PigeonError::required(&["inline_message_id"]))
            }
            Self::Inline { .. } => Ok(()),
        }
    }
}

/// Result of an edit: the edited message, or `true` for inline messages.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum EditResult {
    Message(Box<Message>),
    Done(bool),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EditMessageText {
    #[serde(flatten)]
    pub target: EditTarget,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parse_mode: Option<ParseMode>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub disable_web_page_preview: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_markup: Option<InlineKeyboardMarkup>,
}

impl EditMessageText {
    pub fn new(target: EditTarget, text: impl Into<String>) -> Self {
        Self {
            target,
            text: text.into(),
            parse_mode: None,
            disable_web_page_preview: false,
            reply_markup: None,
        }
    }

    pub fn reply_markup(mut self, markup: InlineKeyboardMarkup) -> Self {
        self.reply_markup = Some(markup);
        self
    }
}

impl Method for EditMessageText {
    const NAME: &'static str = "editMessageText";
    type Response = EditResult;

    fn validate(&self) -> Result<(), PigeonError> {
        self.target.validate()?;
        if self.text.trim().is_empty() {
            return Err(PigeonError::required(&["text"]));
        }
        Ok(())
    }
}

/// Replace (or with `None`, remove) the inline keyboard of a message.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EditMessageReplyMarkup {
    #[serde(flatten)]
    pub target: EditTarget,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_markup: Option<InlineKeyboardMarkup>,
}

impl EditMessageReplyMarkup {
    pub fn new(target: EditTarget, reply_markup: Option<InlineKeyboardMarkup>) -> Self {
        Self {
            target,
            reply_markup,
        }
    }
}

impl Method for EditMessageReplyMarkup {
    const NAME: &'static str = "editMessageReplyMarkup";
    type Response = EditResult;

    fn validate(&self) -> Result<(), PigeonError> {
        self.target.validate()
    }
}
