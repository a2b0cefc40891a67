use super::*;
use async_trait::async_trait;
use pigeon_core::{
    config::ReplyMode,
    error::PigeonError,
    method::{
        AnswerCallbackQuery, AnswerInlineQuery, EditMessageReplyMarkup, EditMessageText,
        EditResult, ForwardMessage, GetUpdates, SendChatAction, SendContact, SendLocation,
        SendMessage,
    },
    types::{Message, User},
};
use serde_json::json;
use std::collections::VecDeque;
use std::sync::Mutex;

/// Chat whose sends fail with a transport error.
const FAILING_CHAT: i64 = 500;
/// Chat whose sends panic inside the handler.
const PANICKING_CHAT: i64 = 666;

/// Serves scripted update batches, records every outbound call, and cancels
/// `done` once the script runs out.
struct FakeApi {
    batches: Mutex<VecDeque<Result<Vec<Update>, PigeonError>>>,
    calls: Mutex<Vec<String>>,
    offsets: Mutex<Vec<i64>>,
    fail_commands: bool,
    done: CancellationToken,
}

impl FakeApi {
    fn new(batches: Vec<Result<Vec<Update>, PigeonError>>, done: CancellationToken) -> Self {
        Self {
            batches: Mutex::new(batches.into()),
            calls: Mutex::new(Vec::new()),
            offsets: Mutex::new(Vec::new()),
            fail_commands: false,
            done,
        }
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// Offset of every `getUpdates` call, in order.
    fn offsets(&self) -> Vec<i64> {
        self.offsets.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

fn sent_message(chat_id: i64, text: &str) -> Message {
    serde_json::from_value(json!({
        "message_id": 1,
        "chat": {"id": chat_id, "type": "private"},
        "text": text
    }))
    .unwrap()
}

#[async_trait]
impl BotApi for FakeApi {
    async fn get_me(&self) -> Result<User, PigeonError> {
        unimplemented!("not used by the gateway")
    }

    async fn get_updates(&self, request: &GetUpdates) -> Result<Vec<Update>, PigeonError> {
        self.offsets.lock().unwrap().push(request.offset);
        let next = self.batches.lock().unwrap().pop_front();
        match next {
            Some(batch) => batch,
            None => {
                self.done.cancel();
                std::future::pending().await
            }
        }
    }

    async fn send_message(&self, request: &SendMessage) -> Result<Message, PigeonError> {
        let chat_id = match request.chat_id {
            pigeon_core::method::ChatTarget::Id(id) => id,
            _ => 0,
        };
        if chat_id == PANICKING_CHAT {
            panic!("handler blew up");
        }
        self.record(format!("sendMessage:{chat_id}:{}", request.text));
        if chat_id == FAILING_CHAT {
            return Err(PigeonError::Transport("connection reset".to_string()));
        }
        Ok(sent_message(chat_id, &request.text))
    }

    async fn forward_message(&self, _: &ForwardMessage) -> Result<Message, PigeonError> {
        unimplemented!("not used by the gateway")
    }

    async fn send_location(&self, _: &SendLocation) -> Result<Message, PigeonError> {
        unimplemented!("not used by the gateway")
    }

    async fn send_contact(&self, _: &SendContact) -> Result<Message, PigeonError> {
        unimplemented!("not used by the gateway")
    }

    async fn send_chat_action(&self, _: &SendChatAction) -> Result<bool, PigeonError> {
        unimplemented!("not used by the gateway")
    }

    async fn edit_message_text(&self, request: &EditMessageText) -> Result<EditResult, PigeonError> {
        self.record(format!("editMessageText:{}", request.text));
        Err(PigeonError::Api {
            code: 400,
            description: "Bad Request: message is not modified".to_string(),
            retry_after: None,
        })
    }

    async fn edit_message_reply_markup(
        &self,
        _: &EditMessageReplyMarkup,
    ) -> Result<EditResult, PigeonError> {
        unimplemented!("not used by the gateway")
    }

    async fn answer_callback_query(
        &self,
        request: &AnswerCallbackQuery,
    ) -> Result<bool, PigeonError> {
        self.record(format!("answerCallbackQuery:{}", request.callback_query_id));
        Ok(true)
    }

    async fn answer_inline_query(&self, _: &AnswerInlineQuery) -> Result<bool, PigeonError> {
        unimplemented!("not used by the gateway")
    }

    async fn set_my_commands(&self, request: &SetMyCommands) -> Result<bool, PigeonError> {
        self.record(format!("setMyCommands:{}", request.commands.len()));
        if self.fail_commands {
            return Err(PigeonError::Transport("timeout".to_string()));
        }
        Ok(true)
    }
}

fn text_update(id: i64, chat_id: i64, text: &str) -> Update {
    serde_json::from_value(json!({
        "update_id": id,
        "message": {
            "message_id": id,
            "chat": {"id": chat_id, "type": "private"},
            "from": {"id": chat_id, "first_name": "Ada"},
            "text": text
        }
    }))
    .unwrap()
}

fn choice_update(id: i64) -> Update {
    serde_json::from_value(json!({
        "update_id": id,
        "callback_query": {
            "id": "cbq",
            "from": {"id": 1, "first_name": "Ada"},
            "message": {"message_id": 3, "chat": {"id": 1, "type": "private"}, "text": "Your sex:"},
            "data": "sex:female"
        }
    }))
    .unwrap()
}

fn config(commands: bool) -> Config {
    let mut cfg = Config::default();
    cfg.dispatch.reply = ReplyMode::Echo;
    cfg.dispatch.commands = commands;
    cfg.polling.queue_capacity = 2;
    cfg
}

async fn run_gateway(api: Arc<FakeApi>, cfg: &Config, cancel: CancellationToken) -> anyhow::Result<()> {
    Gateway::new(api, cfg).run(cancel).await
}

#[tokio::test]
async fn test_updates_are_answered_in_order() {
    let cancel = CancellationToken::new();
    let api = Arc::new(FakeApi::new(
        vec![
            Ok(vec![text_update(1, 10, "one"), text_update(2, 10, "two")]),
            Ok(vec![text_update(3, 11, "three")]),
        ],
        cancel.clone(),
    ));

    run_gateway(api.clone(), &config(false), cancel).await.unwrap();
    assert_eq!(
        api.calls(),
        vec![
            "sendMessage:10:one",
            "sendMessage:10:two",
            "sendMessage:11:three",
        ]
    );
}

#[tokio::test]
async fn test_failed_send_does_not_stop_the_loop() {
    let cancel = CancellationToken::new();
    let api = Arc::new(FakeApi::new(
        vec![Ok(vec![
            text_update(1, FAILING_CHAT, "lost"),
            text_update(2, 10, "kept"),
        ])],
        cancel.clone(),
    ));

    run_gateway(api.clone(), &config(false), cancel).await.unwrap();
    assert_eq!(
        api.calls(),
        vec!["sendMessage:500:lost", "sendMessage:10:kept"]
    );
    // The failed update is still confirmed: the next poll starts past both.
    assert_eq!(api.offsets(), vec![0, 3]);
}

#[tokio::test]
async fn test_panicking_handler_is_isolated() {
    let cancel = CancellationToken::new();
    let api = Arc::new(FakeApi::new(
        vec![Ok(vec![
            text_update(1, PANICKING_CHAT, "boom"),
            text_update(2, 10, "after"),
        ])],
        cancel.clone(),
    ));

    run_gateway(api.clone(), &config(false), cancel).await.unwrap();
    assert_eq!(api.calls(), vec!["sendMessage:10:after"]);
}

#[tokio::test]
async fn test_failed_edit_still_answers_callback() {
    let cancel = CancellationToken::new();
    let api = Arc::new(FakeApi::new(vec![Ok(vec![choice_update(1)])], cancel.clone()));

    run_gateway(api.clone(), &config(false), cancel).await.unwrap();
    assert_eq!(
        api.calls(),
        vec![
            "editMessageText:Your choice: female",
            "answerCallbackQuery:cbq",
        ]
    );
}

#[tokio::test]
async fn test_commands_registered_best_effort() {
    let cancel = CancellationToken::new();
    let mut fake = FakeApi::new(
        vec![Ok(vec![text_update(1, 10, "/start go")])],
        cancel.clone(),
    );
    fake.fail_commands = true;
    let api = Arc::new(fake);

    run_gateway(api.clone(), &config(true), cancel).await.unwrap();
    assert_eq!(
        api.calls(),
        vec!["setMyCommands:2", "sendMessage:10:received start with arg go"]
    );
}

#[tokio::test]
async fn test_unauthorized_poll_ends_run_with_error() {
    let cancel = CancellationToken::new();
    let api = Arc::new(FakeApi::new(
        vec![
            Ok(vec![text_update(1, 10, "before")]),
            Err(PigeonError::Unauthorized("Unauthorized".to_string())),
        ],
        cancel.clone(),
    ));

    let err = run_gateway(api.clone(), &config(false), cancel)
        .await
        .unwrap_err();
    assert!(err.to_string().contains("unauthorized"));
    assert_eq!(api.calls(), vec!["sendMessage:10:before"]);
}

#[tokio::test]
async fn test_cancel_before_start_returns_cleanly() {
    let cancel = CancellationToken::new();
    cancel.cancel();
    let api = Arc::new(FakeApi::new(Vec::new(), cancel.clone()));

    run_gateway(api.clone(), &config(false), cancel).await.unwrap();
    assert!(api.calls().is_empty());
}
