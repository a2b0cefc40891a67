//! Incoming updates.

use super::{Chat, Location, Message, User};
use serde::{Deserialize, Serialize};

/// Interaction with an inline keyboard button.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallbackQuery {
    pub id: String,
    pub from: User,
    /// The message carrying the button. Absent for inline-mode messages.
    pub message: Option<Message>,
    pub inline_message_id: Option<String>,
    #[serde(default)]
    pub chat_instance: String,
    /// Opaque data attached to the button.
    pub data: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InlineQuery {
    pub id: String,
    pub from: User,
    pub location: Option<Location>,
    pub query: String,
    #[serde(default)]
    pub offset: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChosenInlineResult {
    pub result_id: String,
    pub from: User,
    pub location: Option<Location>,
    pub inline_message_id: Option<String>,
    pub query: String,
}

/// The single payload carried by an update.
#[derive(Debug, Clone, PartialEq)]
pub enum UpdateKind {
    Message(Message),
    EditedMessage(Message),
    CallbackQuery(CallbackQuery),
    InlineQuery(InlineQuery),
    ChosenInlineResult(ChosenInlineResult),
    /// No known payload (new update type or empty object).
    Empty,
}

/// One unit of incoming activity.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "RawUpdate")]
pub struct Update {
    pub id: i64,
    pub kind: UpdateKind,
}

/// Flat wire shape: `update_id` plus at most one optional payload field.
#[derive(Deserialize)]
struct RawUpdate {
    update_id: i64,
    message: Option<Message>,
    edited_message: Option<Message>,
    callback_query: Option<CallbackQuery>,
    inline_query: Option<InlineQuery>,
    chosen_inline_result: Option<ChosenInlineResult>,
}

impl From<RawUpdate> for Update {
    fn from(raw: RawUpdate) -> Self {
        let kind = if let Some(m) = raw.message {
            UpdateKind::Message(m)
        } else if let Some(m) = raw.edited_message {
            UpdateKind::EditedMessage(m)
        } else if let Some(q) = raw.callback_query {
            UpdateKind::CallbackQuery(q)
        } else if let Some(q) = raw.inline_query {
            UpdateKind::InlineQuery(q)
        } else if let Some(r) = raw.chosen_inline_result {
            UpdateKind::ChosenInlineResult(r)
        } else {
            UpdateKind::Empty
        };
        Self {
            id: raw.update_id,
            kind,
        }
    }
}

impl Update {
    pub fn new(id: i64, kind: UpdateKind) -> Self {
        Self { id, kind }
    }

    /// The chat this update belongs to, if any.
    pub fn chat(&self) -> Option<&Chat> {
        match &self.kind {
            UpdateKind::Message(m) | UpdateKind::EditedMessage(m) => Some(&m.chat),
            UpdateKind::CallbackQuery(q) => q.message.as_ref().map(|m| &m.chat),
            _ => None,
        }
    }

    /// The user who caused this update, if any.
    pub fn from(&self) -> Option<&User> {
        match &self.kind {
            UpdateKind::Message(m) | UpdateKind::EditedMessage(m) => m.from.as_ref(),
            UpdateKind::CallbackQuery(q) => Some(&q.from),
            UpdateKind::InlineQuery(q) => Some(&q.from),
            UpdateKind::ChosenInlineResult(r) => Some(&r.from),
            UpdateKind::Empty => None,
        }
    }

    pub fn has_message(&self) -> bool {
        matches!(
            self.kind,
            UpdateKind::Message(_) | UpdateKind::EditedMessage(_)
        )
    }

    pub fn is_edited(&self) -> bool {
        matches!(self.kind, UpdateKind::EditedMessage(_))
    }

    /// Short name of the payload kind, for logs.
    pub fn kind_name(&self) -> &'static str {
        match self.kind {
            UpdateKind::Message(_) => "message",
            UpdateKind::EditedMessage(_) => "edited_message",
            UpdateKind::CallbackQuery(_) => "callback_query",
            UpdateKind::InlineQuery(_) => "inline_query",
            UpdateKind::ChosenInlineResult(_) => "chosen_inline_result",
            UpdateKind::Empty => "empty",
        }
    }
}
