use crate::bot::dispatch_update;
use crate::state::AppState;
use axum::{body::Bytes, extract::State, Json};
use serde_json::{json, Value};
use teloxide::types::Update;
use tracing::{debug, warn};

/// Decodes a forwarded update. Bodies that are not updates are logged and dropped.
pub fn parse_update(body: &[u8]) -> Option<Update> {
    match serde_json::from_slice::<Update>(body) {
        Ok(update) => Some(update),
        Err(e) => {
            warn!("Dropping unparsable webhook body ({} bytes): {}", body.len(), e);
            None
        }
    }
}

/// Always answers 200 so the upstream proxy never redelivers.
pub async fn webhook(State(state): State<AppState>, body: Bytes) -> Json<Value> {
    if let Some(update) = parse_update(&body) {
        debug!("Webhook update {:?} received", update.id);
        tokio::spawn(dispatch_update(state.bot.clone(), state, update));
    }
    Json(json!({ "ok": true }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use teloxide::types::UpdateKind;

    #[test]
    fn message_update_is_parsed() {
        let body = br#"{
            "update_id": 10,
            "message": {
                "message_id": 5,
                "date": 1700000000,
                "chat": {"id": 42, "type": "private", "first_name": "Anna"},
                "from": {"id": 42, "is_bot": false, "first_name": "Anna"},
                "text": "/start"
            }
        }"#;
        let update = parse_update(body).unwrap();
        assert!(matches!(update.kind, UpdateKind::Message(_)));
    }

    #[test]
    fn garbage_is_dropped() {
        assert!(parse_update(b"not json").is_none());
        assert!(parse_update(b"").is_none());
    }
}
