use crate::state::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use giftloop_core::notify::{Messenger, NotificationDispatcher, NotifyRequest};
use serde_json::json;
use tracing::warn;

pub async fn notify(State(state): State<AppState>, Json(request): Json<NotifyRequest>) -> Response {
    handle_notify(&state.webhook_secret, state.notifications.as_ref(), request).await
}

pub async fn handle_notify<M: Messenger>(
    secret: &str,
    dispatcher: &NotificationDispatcher<M>,
    request: NotifyRequest,
) -> Response {
    if request.secret != secret {
        warn!("Rejected notify call with a bad secret");
        return StatusCode::UNAUTHORIZED.into_response();
    }
    dispatcher.dispatch(&request).await;
    Json(json!({ "ok": true })).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use giftloop_core::view::Screen;
    use serde_json::Value;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[derive(Clone, Default)]
    struct Counter(Arc<AtomicUsize>);

    #[async_trait]
    impl Messenger for Counter {
        async fn send(&self, _chat_id: i64, _screen: Screen) -> anyhow::Result<()> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    fn request(secret: &str, event_type: &str) -> NotifyRequest {
        NotifyRequest {
            secret: secret.into(),
            event_type: event_type.into(),
            telegram_id: Some(42),
            payload: Value::Null,
        }
    }

    #[tokio::test]
    async fn wrong_secret_is_unauthorized() {
        let sent = Counter::default();
        let dispatcher = NotificationDispatcher::new(sent.clone());
        let response = handle_notify("s3cret", &dispatcher, request("guess", "click")).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(sent.0.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn unknown_type_is_accepted_without_send() {
        let sent = Counter::default();
        let dispatcher = NotificationDispatcher::new(sent.clone());
        let response = handle_notify("s3cret", &dispatcher, request("s3cret", "refund")).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(sent.0.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn known_type_is_sent() {
        let sent = Counter::default();
        let dispatcher = NotificationDispatcher::new(sent.clone());
        let response = handle_notify("s3cret", &dispatcher, request("s3cret", "lead")).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(sent.0.load(Ordering::SeqCst), 1);
    }
}
