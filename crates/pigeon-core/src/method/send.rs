//! Methods that create messages.

use super::{check_target, ChatTarget, Method, MessageOptions, ParseMode};
use crate::error::PigeonError;
use crate::types::{Message, ReplyMarkup, User};
use serde::Serialize;

/// Longest text accepted by `sendMessage`, in characters.
pub const MAX_TEXT_LEN: usize = 4096;

/// `getMe`: the bot's own account. Used to check the token.
#[derive(Debug, Clone, Default, Serialize)]
pub struct GetMe {}

impl Method for GetMe {
    const NAME: &'static str = "getMe";
    type Response = User;
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SendMessage {
    pub chat_id: ChatTarget,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parse_mode: Option<ParseMode>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub disable_web_page_preview: bool,
    #[serde(flatten)]
    pub options: MessageOptions,
}

impl SendMessage {
    pub fn new(chat_id: impl Into<ChatTarget>, text: impl Into<String>) -> Self {
        Self {
            chat_id: chat_id.into(),
            text: text.into(),
            parse_mode: None,
            disable_web_page_preview: false,
            options: MessageOptions::default(),
        }
    }

    pub fn parse_mode(mut self, mode: ParseMode) -> Self {
        self.parse_mode = Some(mode);
        self
    }

    pub fn reply_to(mut self, message_id: i64) -> Self {
        self.options.reply_to_message_id = Some(message_id);
        self
    }

    pub fn reply_markup(mut self, markup: impl Into<ReplyMarkup>) -> Self {
        self.options.reply_markup = Some(markup.into());
        self
    }

    pub fn silent(mut self) -> Self {
        self.options.disable_notification = true;
        self
    }
}

impl Method for SendMessage {
    const NAME: &'static str = "sendMessage";
    type Response = Message;

    fn validate(&self) -> Result<(), PigeonError> {
        let mut missing = Vec::new();
        if self.chat_id.is_empty() {
            missing.push(super::CHAT_ID);
        }
        if self.text.trim().is_empty() {
            missing.push("text");
        }
        if !missing.is_empty() {
            return Err(PigeonError::required(&missing));
        }
        if self.text.chars().count() > MAX_TEXT_LEN {
            return Err(PigeonError::validation(
                "text",
                format!("longer than {MAX_TEXT_LEN} characters"),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForwardMessage {
    pub chat_id: ChatTarget,
    pub from_chat_id: ChatTarget,
    pub message_id: i64,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub disable_notification: bool,
}

impl ForwardMessage {
    pub fn new(
        chat_id: impl Into<ChatTarget>,
        from_chat_id: impl Into<ChatTarget>,
        message_id: i64,
    ) -> Self {
        Self {
            chat_id: chat_id.into(),
            from_chat_id: from_chat_id.into(),
            message_id,
            disable_notification: false,
        }
    }
}

impl Method for ForwardMessage {
    const NAME: &'static str = "forwardMessage";
    type Response = Message;

    fn validate(&self) -> Result<(), PigeonError> {
        let mut missing = Vec::new();
        if self.chat_id.is_empty() {
            missing.push(super::CHAT_ID);
        }
        if self.from_chat_id.is_empty() {
            missing.push("from_chat_id");
        }
        if self.message_id == 0 {
            missing.push("message_id");
        }
        if !missing.is_empty() {
            return Err(PigeonError::required(&missing));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SendLocation {
    pub chat_id: ChatTarget,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(flatten)]
    pub options: MessageOptions,
}

impl SendLocation {
    pub fn new(chat_id: impl Into<ChatTarget>, latitude: f64, longitude: f64) -> Self {
        Self {
            chat_id: chat_id.into(),
            latitude,
            longitude,
            options: MessageOptions::default(),
        }
    }
}

impl Method for SendLocation {
    const NAME: &'static str = "sendLocation";
    type Response = Message;

    fn validate(&self) -> Result<(), PigeonError> {
        check_target(&self.chat_id)?;
        if !(-90.0..=90.0).contains(&self.latitude) {
            return Err(PigeonError::validation("latitude", "must be within ±90"));
        }
        if !(-180.0..=180.0).contains(&self.longitude) {
            return Err(PigeonError::validation("longitude", "must be within ±180"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SendContact {
    pub chat_id: ChatTarget,
    pub phone_number: String,
    pub first_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(flatten)]
    pub options: MessageOptions,
}

impl SendContact {
    pub fn new(
        chat_id: impl Into<ChatTarget>,
        phone_number: impl Into<String>,
        first_name: impl Into<String>,
    ) -> Self {
        Self {
            chat_id: chat_id.into(),
            phone_number: phone_number.into(),
            first_name: first_name.into(),
            last_name: None,
            options: MessageOptions::default(),
        }
    }
}

impl Method for SendContact {
    const NAME: &'static str = "sendContact";
    type Response = Message;

    fn validate(&self) -> Result<(), PigeonError> {
        let mut missing = Vec::new();
        if self.chat_id.is_empty() {
            missing.push(super::CHAT_ID);
        }
        if self.phone_number.is_empty() {
            missing.push("phone_number");
        }
        if self.first_name.is_empty() {
            missing.push("first_name");
        }
        if !missing.is_empty() {
            return Err(PigeonError::required(&missing));
        }
        Ok(())
    }
}

/// Status shown in the chat header while the bot prepares a reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatAction {
    Typing,
    UploadPhoto,
    RecordVideo,
    UploadVideo,
    RecordAudio,
    UploadAudio,
    UploadDocument,
    FindLocation,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SendChatAction {
    pub chat_id: ChatTarget,
    pub action: ChatAction,
}

impl SendChatAction {
    pub fn new(chat_id: impl Into<ChatTarget>, action: ChatAction) -> Self {
        Self {
            chat_id: chat_id.into(),
            action,
        }
    }
}

impl Method for SendChatAction {
    const NAME: &'static str = "sendChatAction";
    type Response = bool;

    fn validate(&self) -> Result<(), PigeonError> {
        check_target(&self.chat_id)
    }
}
