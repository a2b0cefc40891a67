//! Reply markup: custom keyboards, inline keyboards, and their builders.

use serde::{Deserialize, Serialize};

/// Any markup that can accompany an outgoing message.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ReplyMarkup {
    Keyboard(ReplyKeyboardMarkup),
    Inline(InlineKeyboardMarkup),
    RemoveKeyboard(ReplyKeyboardRemove),
    ForceReply(ForceReply),
}

impl From<ReplyKeyboardMarkup> for ReplyMarkup {
    fn from(m: ReplyKeyboardMarkup) -> Self {
        Self::Keyboard(m)
    }
}

impl From<InlineKeyboardMarkup> for ReplyMarkup {
    fn from(m: InlineKeyboardMarkup) -> Self {
        Self::Inline(m)
    }
}

impl From<ReplyKeyboardRemove> for ReplyMarkup {
    fn from(m: ReplyKeyboardRemove) -> Self {
        Self::RemoveKeyboard(m)
    }
}

impl From<ForceReply> for ReplyMarkup {
    fn from(m: ForceReply) -> Self {
        Self::ForceReply(m)
    }
}

fn is_false(b: &bool) -> bool {
    !*b
}

/// A button on a custom keyboard. Its text is sent as a message when pressed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyboardButton {
    pub text: String,
    #[serde(default, skip_serializing_if = "is_false")]
    pub request_contact: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub request_location: bool,
}

impl KeyboardButton {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            request_contact: false,
            request_location: false,
        }
    }

    /// A button that shares the user's location when pressed.
    pub fn location(text: impl Into<String>) -> Self {
        Self {
            request_location: true,
            ..Self::text(text)
        }
    }

    /// A button that shares the user's phone contact when pressed.
    pub fn contact(text: impl Into<String>) -> Self {
        Self {
            request_contact: true,
            ..Self::text(text)
        }
    }
}

/// Custom keyboard shown in place of the system keyboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplyKeyboardMarkup {
    pub keyboard: Vec<Vec<KeyboardButton>>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub resize_keyboard: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub one_time_keyboard: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub selective: bool,
}

impl ReplyKeyboardMarkup {
    pub fn new(keyboard: Vec<Vec<KeyboardButton>>) -> Self {
        Self {
            keyboard,
            resize_keyboard: false,
            one_time_keyboard: false,
            selective: false,
        }
    }

    /// Single-row keyboard.
    pub fn row(buttons: Vec<KeyboardButton>) -> Self {
        Self::new(vec![buttons])
    }

    pub fn resized(mut self) -> Self {
        self.resize_keyboard = true;
        self
    }

    pub fn one_time(mut self) -> Self {
        self.one_time_keyboard = true;
        self
    }
}

/// Hides the current custom keyboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReplyKeyboardRemove {
    remove_keyboard: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub selective: bool,
}

impl Default for ReplyKeyboardRemove {
    fn default() -> Self {
        Self {
            remove_keyboard: true,
            selective: false,
        }
    }
}

impl ReplyKeyboardRemove {
    /// Only apply to mentioned users and the replied-to sender.
    pub fn selective(mut self) -> Self {
        self.selective = true;
        self
    }
}

/// Asks the client to show a reply interface for the sent message.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForceReply {
    force_reply: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub selective: bool,
}

impl Default for ForceReply {
    fn default() -> Self {
        Self {
            force_reply: true,
            selective: false,
        }
    }
}

impl ForceReply {
    /// Only apply to mentioned users and the replied-to sender.
    pub fn selective(mut self) -> Self {
        self.selective = true;
        self
    }
}

/// What an inline keyboard button does when pressed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InlineButtonAction {
    /// Open a URL.
    Url(String),
    /// Send a callback query carrying this data (1-64 bytes).
    CallbackData(String),
    /// Switch the user to inline mode in a chat of their choice.
    SwitchInlineQuery(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InlineKeyboardButton {
    pub text: String,
    #[serde(flatten)]
    pub action: InlineButtonAction,
}

impl InlineKeyboardButton {
    pub fn url(text: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            action: InlineButtonAction::Url(url.into()),
        }
    }

    pub fn callback(text: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            action: InlineButtonAction::CallbackData(data.into()),
        }
    }

    /// Callback data, if this is a callback button.
    pub fn callback_data(&self) -> Option<&str> {
        match &self.action {
            InlineButtonAction::CallbackData(d) => Some(d),
            _ => None,
        }
    }
}

/// Keyboard attached to a message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InlineKeyboardMarkup {
    pub inline_keyboard: Vec<Vec<InlineKeyboardButton>>,
}

impl InlineKeyboardMarkup {
    pub fn new(inline_keyboard: Vec<Vec<InlineKeyboardButton>>) -> Self {
        Self { inline_keyboard }
    }
}

/// Keyboard rows from a grid of labels.
pub fn new_keyboard(rows: &[&[&str]]) -> Vec<Vec<KeyboardButton>> {
    rows.iter()
        .map(|row| row.iter().map(|t| KeyboardButton::text(*t)).collect())
        .collect()
}

/// One row with all labels side by side.
pub fn new_h_keyboard(labels: &[&str]) -> Vec<Vec<KeyboardButton>> {
    vec![labels.iter().map(|t| KeyboardButton::text(*t)).collect()]
}

/// One row per label.
pub fn new_v_keyboard(labels: &[&str]) -> Vec<Vec<KeyboardButton>> {
    labels
        .iter()
        .map(|t| vec![KeyboardButton::text(*t)])
        .collect()
}

fn inline_buttons<'a>(
    prefix: &'a str,
    labels: &'a [impl AsRef<str>],
    data: &'a [impl AsRef<str>],
) -> impl Iterator<Item = InlineKeyboardButton> + 'a {
    labels.iter().zip(data.iter()).map(move |(label, d)| {
        InlineKeyboardButton::callback(label.as_ref(), format!("{prefix}{}", d.as_ref()))
    })
}

/// One row of callback buttons; each button's data is `prefix + data[i]`.
///
/// Extra labels or data entries without a partner are ignored.
pub fn new_h_inline_keyboard(
    prefix: &str,
    labels: &[impl AsRef<str>],
    data: &[impl AsRef<str>],
) -> Vec<Vec<InlineKeyboardButton>> {
    vec![inline_buttons(prefix, labels, data).collect()]
}

/// One callback button per row; each button's data is `prefix + data[i]`.
pub fn new_v_inline_keyboard(
    prefix: &str,
    labels: &[impl AsRef<str>],
    data: &[impl AsRef<str>],
) -> Vec<Vec<InlineKeyboardButton>> {
    inline_buttons(prefix, labels, data)
        .map(|b| vec![b])
        .collect()
}
