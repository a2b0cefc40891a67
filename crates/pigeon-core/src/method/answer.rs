//! Acknowledging callback and inline queries, and the command menu.

use super::Method;
use crate::error::PigeonError;
use crate::types::InlineQueryResult;
use serde::Serialize;

/// Most results one `answerInlineQuery` call may carry.
pub const MAX_INLINE_RESULTS: usize = 50;

/// Acknowledge a callback query, optionally with a toast or alert.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnswerCallbackQuery {
    pub callback_query_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub show_alert: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache_time: Option<u32>,
}

impl AnswerCallbackQuery {
    pub fn new(callback_query_id: impl Into<String>) -> Self {
        Self {
            callback_query_id: callback_query_id.into(),
            text: None,
            show_alert: false,
            url: None,
            cache_time: None,
        }
    }

    /// Acknowledge with a short notification at the top of the chat.
    pub fn with_text(callback_query_id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::new(callback_query_id)
        }
    }

    /// Acknowledge with a modal alert instead of a notification.
    pub fn with_alert(callback_query_id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            show_alert: true,
            ..Self::with_text(callback_query_id, text)
        }
    }
}

impl Method for AnswerCallbackQuery {
    const NAME: &'static str = "answerCallbackQuery";
    type Response = bool;

    fn validate(&self) -> Result<(), PigeonError> {
        if self.callback_query_id.is_empty() {
            return Err(PigeonError::required(&["callback_query_id"]));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnswerInlineQuery {
    pub inline_query_id: String,
    pub results: Vec<InlineQueryResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache_time: Option<u32>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub is_personal: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_offset: Option<String>,
}

impl AnswerInlineQuery {
    pub fn new(inline_query_id: impl Into<String>, results: Vec<InlineQueryResult>) -> Self {
        Self {
            inline_query_id: inline_query_id.into(),
            results,
            cache_time: None,
            is_personal: false,
            next_offset: None,
        }
    }
}

impl Method for AnswerInlineQuery {
    const NAME: &'static str = "answerInlineQuery";
    type Response = bool;

    fn validate(&self) -> Result<(), PigeonError> {
        if self.inline_query_id.is_empty() {
            return Err(PigeonError::required(&["inline_query_id"]));
        }
        if self.results.len() > MAX_INLINE_RESULTS {
            return Err(PigeonError::validation(
                "results",
                format!("at most {MAX_INLINE_RESULTS} results are allowed"),
            ));
        }
        if let Some(r) = self.results.iter().find(|r| r.id().is_empty()) {
            return Err(PigeonError::validation(
                "results",
                format!("result without id: {r:?}"),
            ));
        }
        Ok(())
    }
}

/// Entry in the client's command menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BotCommand {
    pub command: String,
    pub description: String,
}

impl BotCommand {
    pub fn new(command: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            description: description.into(),
        }
    }
}

/// `setMyCommands`: replace the command menu shown to users.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SetMyCommands {
    pub commands: Vec<BotCommand>,
}

impl Method for SetMyCommands {
    const NAME: &'static str = "setMyCommands";
    type Response = bool;

    fn validate(&self) -> Result<(), PigeonError> {
        for cmd in &self.commands {
            let valid = !cmd.command.is_empty()
                && cmd.command.len() <= 32
                && cmd
                    .command
                    .bytes()
                    .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'_');
            if !valid {
                return Err(PigeonError::validation(
                    "commands",
                    format!("invalid command name '{}'", cmd.command),
                ));
            }
            if cmd.description.is_empty() {
                return Err(PigeonError::required(&["description"]));
            }
        }
        Ok(())
    }
}
