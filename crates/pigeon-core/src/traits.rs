use crate::{
    error::PigeonError,
    method::{
        AnswerCallbackQuery, AnswerInlineQuery, EditMessageReplyMarkup, EditMessageText,
        EditResult, ForwardMessage, GetUpdates, SendChatAction, SendContact, SendLocation,
        SendMessage, SetMyCommands,
    },
    types::{Message, Update, User},
};
use async_trait::async_trait;

/// Bot API trait: the wire.
///
/// The HTTP client implements this against the real service; the poller and
/// the gateway only see this trait, so tests can script responses.
#[async_trait]
pub trait BotApi: Send + Sync {
    /// The bot's own account. Fails with `Unauthorized` on a bad token.
    async fn get_me(&self) -> Result<User, PigeonError>;

    /// Fetch the next batch of updates, oldest first.
    async fn get_updates(&self, request: &GetUpdates) -> Result<Vec<Update>, PigeonError>;

    async fn send_message(&self, request: &SendMessage) -> Result<Message, PigeonError>;

    async fn forward_message(&self, request: &ForwardMessage) -> Result<Message, PigeonError>;

    async fn send_location(&self, request: &SendLocation) -> Result<Message, PigeonError>;

    async fn send_contact(&self, request: &SendContact) -> Result<Message, PigeonError>;

    async fn send_chat_action(&self, request: &SendChatAction) -> Result<bool, PigeonError>;

    async fn edit_message_text(
        &self,
        request: &EditMessageText,
    ) -> Result<EditResult, PigeonError>;

    async fn edit_message_reply_markup(
        &self,
        request: &EditMessageReplyMarkup,
    ) -> Result<EditResult, PigeonError>;

    async fn answer_callback_query(
        &self,
        request: &AnswerCallbackQuery,
    ) -> Result<bool, PigeonError>;

    async fn answer_inline_query(&self, request: &AnswerInlineQuery)
        -> Result<bool, PigeonError>;

    /// Register the command menu.
    async fn set_my_commands(&self, request: &SetMyCommands) -> Result<bool, PigeonError>;
}
