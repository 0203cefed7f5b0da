use crate::config::UpdateMode;
use crate::state::AppState;
use axum::{extract::State, Json};
use serde_json::{json, Value};

pub fn health_body(bot_username: &str, mode: UpdateMode) -> Value {
    json!({
        "status": "ok",
        "bot": bot_username,
        "version": env!("CARGO_PKG_VERSION"),
        "mode": mode.as_str(),
    })
}

pub async fn health_check(State(state): State<AppState>) -> Json<Value> {
    Json(health_body(&state.links.bot_username, state.update_mode))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_reports_bot_and_mode() {
        let body = health_body("gift_bot", UpdateMode::Proxy);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["bot"], "gift_bot");
        assert_eq!(body["mode"], "proxy");
        assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    }
}
