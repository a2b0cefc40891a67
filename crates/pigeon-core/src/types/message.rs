//! Users, chats, and messages.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    #[serde(default)]
    pub is_bot: bool,
    pub first_name: String,
    pub last_name: Option<String>,
    pub username: Option<String>,
    pub language_code: Option<String>,
}

impl User {
    /// `@username` when set, otherwise the full name.
    pub fn display_name(&self) -> String {
        if let Some(ref un) = self.username {
            format!("@{un}")
        } else if let Some(ref ln) = self.last_name {
            format!("{} {ln}", self.first_name)
        } else {
            self.first_name.clone()
        }
    }
}

/// Chat type as reported by the server.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatKind {
    Private,
    Group,
    Supergroup,
    Channel,
    #[default]
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chat {
    pub id: i64,
    #[serde(default, rename = "type")]
    pub kind: ChatKind,
    pub title: Option<String>,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl Chat {
    pub fn is_group(&self) -> bool {
        matches!(self.kind, ChatKind::Group | ChatKind::Supergroup)
    }
}

/// A special span of text (command, mention, URL...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageEntity {
    #[serde(rename = "type")]
    pub kind: String,
    /// Offset in UTF-16 code units.
    pub offset: usize,
    /// Length in UTF-16 code units.
    pub length: usize,
    pub url: Option<String>,
    pub user: Option<User>,
}

pub const BOT_COMMAND_ENTITY: &str = "bot_command";

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    pub phone_number: String,
    pub first_name: String,
    pub last_name: Option<String>,
    pub user_id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub message_id: i64,
    pub from: Option<User>,
    #[serde(default)]
    pub date: i64,
    pub chat: Chat,
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub entities: Vec<MessageEntity>,
    pub caption: Option<String>,
    pub location: Option<Location>,
    pub contact: Option<Contact>,
    pub reply_to_message: Option<Box<Message>>,
    pub edit_date: Option<i64>,
}

impl Message {
    /// Command name and argument if the message starts with a bot command.
    ///
    /// `/start@my_bot  deep-link` yields `("start", "deep-link")`.
    pub fn command(&self) -> Option<(String, String)> {
        let text = self.text.as_deref()?;
        let has_entity = self
            .entities
            .iter()
            .any(|e| e.kind == BOT_COMMAND_ENTITY && e.offset == 0);
        if !has_entity && !(self.entities.is_empty() && text.starts_with('/')) {
            return None;
        }

        let rest = text.strip_prefix('/')?;
        let (head, arg) = match rest.find(char::is_whitespace) {
            Some(i) => (&rest[..i], rest[i..].trim()),
            None => (rest, ""),
        };
        // Strip @botname suffix (e.g. "help@pigeon_bot" → "help").
        let name = head.split('@').next().unwrap_or(head);
        if name.is_empty() {
            return None;
        }
        Some((name.to_string(), arg.to_string()))
    }

    pub fn is_command(&self) -> bool {
        self.command().is_some()
    }

    /// Send time, or `None` if the server omitted it.
    pub fn sent_at(&self) -> Option<DateTime<Utc>> {
        if self.date == 0 {
            return None;
        }
        DateTime::from_timestamp(self.date, 0)
    }
}
