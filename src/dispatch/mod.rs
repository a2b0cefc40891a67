//! Dispatcher: turns one update into the outbound calls that answer it.
//!
//! Planning is pure: `Dispatcher::plan` looks at which payload the update
//! carries and returns a list of actions without touching the network.
//! The gateway executes them.


use crate::commands::Command;
use pigeon_core::{
    config::{DispatchConfig, ReplyMode},
    error::PigeonError,
    method::{
        AnswerCallbackQuery, EditMessageText, EditTarget, Method, SendContact, SendLocation,
        SendMessage,
    },
    traits::BotApi,
    types::{
        new_v_inline_keyboard, CallbackQuery, InlineKeyboardMarkup, KeyboardButton, Message,
        ReplyKeyboardMarkup, Update, UpdateKind,
    },
};

/// One call back to the Bot API.
#[derive(Debug, Clone, PartialEq)]
pub enum OutboundAction {
    Send(SendMessage),
    SendLocation(SendLocation),
    SendContact(SendContact),
    Edit(EditMessageText),
    Answer(AnswerCallbackQuery),
}

impl OutboundAction {
    /// Bot API method name, for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Send(_) => SendMessage::NAME,
            Self::SendLocation(_) => SendLocation::NAME,
            Self::SendContact(_) => SendContact::NAME,
            Self::Edit(_) => EditMessageText::NAME,
            Self::Answer(_) => AnswerCallbackQuery::NAME,
        }
    }

    /// Submit the call. The response body is not needed.
    pub async fn execute(&self, api: &dyn BotApi) -> Result<(), PigeonError> {
        match self {
            Self::Send(req) => api.send_message(req).await.map(drop),
            Self::SendLocation(req) => api.send_location(req).await.map(drop),
            Self::SendContact(req) => api.send_contact(req).await.map(drop),
            Self::Edit(req) => api.edit_message_text(req).await.map(drop),
            Self::Answer(req) => api.answer_callback_query(req).await.map(drop),
        }
    }
}

/// Routes each update to the handler for its payload kind.
pub struct Dispatcher {
    config: DispatchConfig,
}

impl Dispatcher {
    pub fn new(config: DispatchConfig) -> Self {
        Self { config }
    }

    pub fn reply_mode(&self) -> ReplyMode {
        self.config.reply
    }

    /// Actions answering `update`. Empty means the update is skipped.
    pub fn plan(&self, update: &Update) -> Vec<OutboundAction> {
        match &update.kind {
            UpdateKind::Message(msg) => self.on_message(msg),
            UpdateKind::CallbackQuery(query) => self.on_callback(query),
            UpdateKind::EditedMessage(_)
            | UpdateKind::InlineQuery(_)
            | UpdateKind::ChosenInlineResult(_)
            | UpdateKind::Empty => Vec::new(),
        }
    }

    fn on_message(&self, msg: &Message) -> Vec<OutboundAction> {
        if self.config.commands {
            if let Some((name, arg)) = msg.command() {
                if let Some(cmd) = Command::parse(&name) {
                    let reply = SendMessage::new(msg.chat.id, cmd.reply(&arg));
                    return vec![OutboundAction::Send(reply)];
                }
            }
        }

        match self.config.reply {
            ReplyMode::Echo => echo(msg).into_iter().collect(),
            ReplyMode::Greeting => {
                let keyboard = ReplyKeyboardMarkup::row(vec![KeyboardButton::location(
                    &self.config.location_button,
                )]);
                let reply = SendMessage::new(msg.chat.id, &self.config.greeting)
                    .reply_markup(keyboard);
                vec![OutboundAction::Send(reply)]
            }
            ReplyMode::Survey => vec![OutboundAction::Send(self.prompt(msg.chat.id))],
        }
    }

    fn on_callback(&self, query: &CallbackQuery) -> Vec<OutboundAction> {
        let choice = query
            .data
            .as_deref()
            .and_then(|data| data.strip_prefix(self.config.choice_prefix.as_str()));

        let Some(value) = choice else {
            // Unrecognized data: ask again in the chat the button lives in.
            return match &query.message {
                Some(msg) => vec![OutboundAction::Send(self.prompt(msg.chat.id))],
                None => Vec::new(),
            };
        };

        let mut actions = Vec::with_capacity(2);
        let target = match (&query.message, &query.inline_message_id) {
            (Some(msg), _) => Some(EditTarget::chat(msg.chat.id, msg.message_id)),
            (None, Some(inline_id)) => Some(EditTarget::inline(inline_id.as_str())),
            (None, None) => None,
        };
        if let Some(target) = target {
            let text = self.config.choice_reply.replace("{choice}", value);
            actions.push(OutboundAction::Edit(EditMessageText::new(target, text)));
        }
        actions.push(OutboundAction::Answer(AnswerCallbackQuery::with_text(
            query.id.as_str(),
            self.config.ack_text.as_str(),
        )));
        actions
    }

    /// The prompt question with one inline button per configured choice.
    fn prompt(&self, chat_id: i64) -> SendMessage {
        let labels: Vec<&str> = self.config.choices.iter().map(|c| c.label.as_str()).collect();
        let data: Vec<&str> = self.config.choices.iter().map(|c| c.data.as_str()).collect();
        let keyboard = InlineKeyboardMarkup::new(new_v_inline_keyboard(
            &self.config.choice_prefix,
            &labels,
            &data,
        ));
        SendMessage::new(chat_id, &self.config.prompt).reply_markup(keyboard)
    }
}

/// Send the same content back: text, location, or contact.
fn echo(msg: &Message) -> Option<OutboundAction> {
    let chat_id = msg.chat.id;
    if let Some(text) = &msg.text {
        return Some(OutboundAction::Send(SendMessage::new(chat_id, text)));
    }
    if let Some(loc) = msg.location {
        return Some(OutboundAction::SendLocation(SendLocation::new(
            chat_id,
            loc.latitude,
            loc.longitude,
        )));
    }
    if let Some(contact) = &msg.contact {
        let mut req = SendContact::new(chat_id, &contact.phone_number, &contact.first_name);
        req.last_name = contact.last_name.clone();
        return Some(OutboundAction::SendContact(req));
    }
    None
}
