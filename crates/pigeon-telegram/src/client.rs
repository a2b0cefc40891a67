//! reqwest-backed `BotApi`.

use crate::envelope::{decode, decode_updates};
use async_trait::async_trait;
use pigeon_core::{
    config::{mask_token, BotConfig},
    error::PigeonError,
    method::{
        AnswerCallbackQuery, AnswerInlineQuery, EditMessageReplyMarkup, EditMessageText,
        EditResult, ForwardMessage, GetMe, GetUpdates, Method, SendChatAction, SendContact,
        SendLocation, SendMessage, SetMyCommands,
    },
    traits::BotApi,
    types::{Message, Update, User},
};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// Client-side wait for calls that do not long-poll.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Telegram Bot API client. Cheap to clone.
#[derive(Clone)]
pub struct TelegramClient {
    client: reqwest::Client,
    /// `{api_url}/bot{token}`.
    base_url: String,
    token: String,
    debug: bool,
    /// Extra wait beyond the long-poll timeout before a poll counts as failed.
    poll_slack: Duration,
}

impl TelegramClient {
    /// Create a client from bot config.
    pub fn new(config: &BotConfig) -> Self {
        let api_url = config.api_url.trim_end_matches('/');
        Self {
            client: reqwest::Client::new(),
            base_url: format!("{api_url}/bot{}", config.token),
            token: config.token.clone(),
            debug: config.debug,
            poll_slack: Duration::from_secs(5),
        }
    }

    /// Set how long past the long-poll timeout a `getUpdates` call may take.
    pub fn with_poll_slack(mut self, slack: Duration) -> Self {
        self.poll_slack = slack;
        self
    }

    /// Endpoint for a method, e.g. `…/bot<token>/sendMessage`.
    pub fn method_url(&self, name: &str) -> String {
        format!("{}/{name}", self.base_url)
    }

    /// Validate, send, and decode one method call.
    pub async fn invoke<M: Method>(&self, method: &M) -> Result<M::Response, PigeonError> {
        let value = self.invoke_raw(method, REQUEST_TIMEOUT).await?;
        serde_json::from_value(value).map_err(|e| {
            PigeonError::Transport(format!("telegram {}: unexpected result: {e}", M::NAME))
        })
    }

    async fn invoke_raw<M: Method>(
        &self,
        method: &M,
        timeout: Duration,
    ) -> Result<Value, PigeonError> {
        method.validate()?;

        if self.debug {
            let body = serde_json::to_string(method)?;
            debug!(
                "telegram → {} {}: {body}",
                mask_token(&self.token),
                M::NAME
            );
        }

        let resp = self
            .client
            .post(self.method_url(M::NAME))
            .json(method)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| transport_error(M::NAME, "failed", e))?;

        let status = resp.status().as_u16();
        let body = resp
            .text()
            .await
            .map_err(|e| transport_error(M::NAME, "read failed", e))?;

        if self.debug {
            debug!("telegram ← {} ({status}): {body}", M::NAME);
        }

        decode(status, &body)
    }
}

/// reqwest puts the request URL, and with it the bot token, into its error
/// text. Strip it before the error reaches any log.
fn transport_error(method: &str, what: &str, e: reqwest::Error) -> PigeonError {
    PigeonError::Transport(format!("telegram {method} {what}: {}", e.without_url()))
}

#[async_trait]
impl BotApi for TelegramClient {
    async fn get_me(&self) -> Result<User, PigeonError> {
        self.invoke(&GetMe::default()).await
    }

    async fn get_updates(&self, request: &GetUpdates) -> Result<Vec<Update>, PigeonError> {
        let timeout = Duration::from_secs(request.timeout) + self.poll_slack;
        let result = self.invoke_raw(request, timeout).await?;
        decode_updates(result)
    }

    async fn send_message(&self, request: &SendMessage) -> Result<Message, PigeonError> {
        self.invoke(request).await
    }

    async fn forward_message(&self, request: &ForwardMessage) -> Result<Message, PigeonError> {
        self.invoke(request).await
    }

    async fn send_location(&self, request: &SendLocation) -> Result<Message, PigeonError> {
        self.invoke(request).await
    }

    async fn send_contact(&self, request: &SendContact) -> Result<Message, PigeonError> {
        self.invoke(request).await
    }

    async fn send_chat_action(&self, request: &SendChatAction) -> Result<bool, PigeonError> {
        self.invoke(request).await
    }

    async fn edit_message_text(
        &self,
        request: &EditMessageText,
    ) -> Result<EditResult, PigeonError> {
        self.invoke(request).await
    }

    async fn edit_message_reply_markup(
        &self,
        request: &EditMessageReplyMarkup,
    ) -> Result<EditResult, PigeonError> {
        self.invoke(request).await
    }

    async fn answer_callback_query(
        &self,
        request: &AnswerCallbackQuery,
    ) -> Result<bool, PigeonError> {
        self.invoke(request).await
    }

    async fn answer_inline_query(
        &self,
        request: &AnswerInlineQuery,
    ) -> Result<bool, PigeonError> {
        self.invoke(request).await
    }

    async fn set_my_commands(&self, request: &SetMyCommands) -> Result<bool, PigeonError> {
        self.invoke(request).await
    }
}
