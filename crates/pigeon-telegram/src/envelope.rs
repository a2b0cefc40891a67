//! Bot API response envelope and its mapping onto `PigeonError`.

use pigeon_core::{
    error::PigeonError,
    types::{Update, UpdateKind},
};
use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

#[derive(Debug, Deserialize)]
pub(crate) struct TgResponse {
    pub ok: bool,
    pub result: Option<Value>,
    pub description: Option<String>,
    pub error_code: Option<i64>,
    pub parameters: Option<TgResponseParameters>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TgResponseParameters {
    pub retry_after: Option<u64>,
    pub migrate_to_chat_id: Option<i64>,
}

/// Turn an HTTP status and body into the `result` value or an error.
pub(crate) fn decode(status: u16, body: &str) -> Result<Value, PigeonError> {
    if status == 401 {
        return Err(PigeonError::Unauthorized(format!(
            "server rejected the bot token: {}",
            body.trim()
        )));
    }

    let envelope: TgResponse = serde_json::from_str(body).map_err(|e| {
        PigeonError::Transport(format!("undecodable response (HTTP {status}): {e}"))
    })?;

    if envelope.ok {
        return Ok(envelope.result.unwrap_or(Value::Null));
    }

    let code = envelope.error_code.unwrap_or(i64::from(status));
    let mut description = envelope
        .description
        .unwrap_or_else(|| format!("HTTP {status}"));
    if code == 401 {
        return Err(PigeonError::Unauthorized(description));
    }
    let params = envelope.parameters;
    if let Some(chat_id) = params.as_ref().and_then(|p| p.migrate_to_chat_id) {
        description.push_str(&format!(" (migrated to chat {chat_id})"));
    }
    Err(PigeonError::Api {
        code,
        description,
        retry_after: params.and_then(|p| p.retry_after),
    })
}

/// Decode a `getUpdates` result one entry at a time.
///
/// An entry that does not match the known shapes still carries its
/// `update_id`; it becomes an `Empty` update so the cursor can move past it
/// instead of refetching the same batch forever.
pub(crate) fn decode_updates(result: Value) -> Result<Vec<Update>, PigeonError> {
    let entries: Vec<Value> = serde_json::from_value(result)
        .map_err(|e| PigeonError::Transport(format!("getUpdates result is not a list: {e}")))?;

    let mut updates = Vec::with_capacity(entries.len());
    for entry in entries {
        let id = entry.get("update_id").and_then(Value::as_i64);
        match serde_json::from_value::<Update>(entry) {
            Ok(update) => updates.push(update),
            Err(e) => match id {
                Some(id) => {
                    warn!("telegram: update {id} not understood, skipping: {e}");
                    updates.push(Update::new(id, UpdateKind::Empty));
                }
                None => warn!("telegram: dropping update without update_id: {e}"),
            },
        }
    }
    Ok(updates)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_ok() {
        let value = decode(200, r#"{"ok": true, "result": true}"#).unwrap();
        assert_eq!(value, json!(true));
    }

    #[test]
    fn test_decode_api_error() {
        let err = decode(
            400,
            r#"{"ok": false, "error_code": 400, "description": "Bad Request: chat not found"}"#,
        )
        .unwrap_err();
        match err {
            PigeonError::Api {
                code, description, ..
            } => {
                assert_eq!(code, 400);
                assert!(description.contains("chat not found"));
            }
            other => panic!("expected Api, got {other:?}"),
        }
    }

    #[test]
    fn test_decode_flood_control() {
        let err = decode(
            429,
            r#"{"ok": false, "error_code": 429, "description": "Too Many Requests: retry after 7", "parameters": {"retry_after": 7}}"#,
        )
        .unwrap_err();
        assert!(err.is_transient());
        assert_eq!(err.retry_after(), Some(7));
    }

    #[test]
    fn test_decode_migration_hint() {
        let err = decode(
            400,
            r#"{"ok": false, "error_code": 400, "description": "Bad Request: group chat was upgraded", "parameters": {"migrate_to_chat_id": -1001}}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("migrated to chat -1001"));
    }

    #[test]
    fn test_decode_unauthorized() {
        let err = decode(
            401,
            r#"{"ok": false, "error_code": 401, "description": "Unauthorized"}"#,
        )
        .unwrap_err();
        assert!(err.is_unauthorized());

        // Some proxies answer 200 with an error envelope.
        let err = decode(200, r#"{"ok": false, "error_code": 401, "description": "Unauthorized"}"#)
            .unwrap_err();
        assert!(err.is_unauthorized());
    }

    #[test]
    fn test_decode_garbage_is_transport() {
        let err = decode(502, "<html>Bad Gateway</html>").unwrap_err();
        assert!(matches!(err, PigeonError::Transport(_)));
        assert!(err.is_transient());
    }

    #[test]
    fn test_decode_updates_keeps_ids_of_odd_entries() {
        let result = json!([
            {"update_id": 1, "message": {"message_id": 1, "chat": {"id": 5}, "text": "hi"}},
            {"update_id": 2, "message": {"message_id": "not-a-number"}},
            {"no_id": true}
        ]);
        let updates = decode_updates(result).unwrap();
        assert_eq!(updates.len(), 2);
        assert!(updates[0].has_message());
        assert_eq!(updates[1].id, 2);
        assert_eq!(updates[1].kind, UpdateKind::Empty);
    }

    #[test]
    fn test_decode_updates_rejects_non_list() {
        assert!(decode_updates(json!({"update_id": 1})).is_err());
    }
}
