//! Templated server-to-server notifications to affiliates.

use crate::actions::Action;
use crate::view::{escape_html, format_amount, Keyboard, Screen};
use async_trait::async_trait;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::{debug, error, info};

/// Outbound channel to a chat.
#[async_trait]
pub trait Messenger: Send + Sync {
    async fn send(&self, chat_id: i64, screen: Screen) -> anyhow::Result<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationEvent {
    Click,
    Lead,
    Qualified,
    Conversion,
    LevelUp,
    Payout,
    WeeklyReport,
}

impl NotificationEvent {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "click" => Some(Self::Click),
            "lead" => Some(Self::Lead),
            "qualified" => Some(Self::Qualified),
            "conversion" => Some(Self::Conversion),
            "level_up" => Some(Self::LevelUp),
            "payout" => Some(Self::Payout),
            "weekly_report" => Some(Self::WeeklyReport),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct NotifyRequest {
    #[serde(default)]
    pub secret: String,
    #[serde(rename = "type", default)]
    pub event_type: String,
    #[serde(default, deserialize_with = "chat_id_or_none")]
    pub telegram_id: Option<i64>,
    #[serde(default)]
    pub payload: Value,
}

/// Accepts the recipient as a number or a numeric string; anything else
/// reads as no recipient.
fn chat_id_or_none<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(n)) => n.as_i64(),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}

fn text_or(payload: &Value, key: &str, fallback: &str) -> String {
    match payload.get(key) {
        Some(Value::String(s)) if !s.is_empty() => escape_html(s),
        _ => fallback.to_string(),
    }
}

fn number_or(payload: &Value, key: &str, fallback: f64) -> f64 {
    let value = match payload.get(key) {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    };
    match value {
        Some(v) if v != 0.0 && v.is_finite() => v,
        _ => fallback,
    }
}

fn notification_keyboard() -> Keyboard {
    Keyboard::new()
        .action("📊 Стата", Action::PartnerStats)
        .action("« Меню", Action::MainMenu)
}

/// Renders one event. Absent or empty payload fields fall back to defaults.
pub fn render(event: NotificationEvent, payload: &Value) -> Screen {
    let text = match event {
        NotificationEvent::Click => "👆 Новый переход!".to_string(),
        NotificationEvent::Lead => format!(
            "👤 <b>Новый лид!</b> {} оставил заявку.",
            text_or(payload, "name", "Кто-то")
        ),
        NotificationEvent::Qualified => format!(
            "✅ <b>Квалифицирован!</b> {} подтверждён.",
            text_or(payload, "name", "Лид")
        ),
        NotificationEvent::Conversion => format!(
            "💰 <b>Сделка!</b> Комиссия: <b>{}₽</b>",
            format_amount(number_or(payload, "commission", 0.0))
        ),
        NotificationEvent::LevelUp => format!(
            "🎉 <b>Уровень: {}!</b> {}%",
            text_or(payload, "level", "Партнёр"),
            format_amount(number_or(payload, "rate", 15.0))
        ),
        NotificationEvent::Payout => format!(
            "💸 <b>Выплата:</b> {}₽ ✅",
            format_amount(number_or(payload, "amount", 0.0))
        ),
        NotificationEvent::WeeklyReport => format!(
            "📊 <b>Неделя:</b> 👆{} 👤{} 💰{} 💵{}₽",
            format_amount(number_or(payload, "clicks", 0.0)),
            format_amount(number_or(payload, "leads", 0.0)),
            format_amount(number_or(payload, "conversions", 0.0)),
            format_amount(number_or(payload, "earned", 0.0))
        ),
    };
    Screen::new(text, notification_keyboard())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// Unknown event type or no recipient.
    Ignored,
    Sent,
    Failed,
}

pub struct NotificationDispatcher<M> {
    messenger: M,
}

impl<M: Messenger> NotificationDispatcher<M> {
    pub fn new(messenger: M) -> Self {
        Self { messenger }
    }

    /// Makes exactly one delivery attempt. Failures are logged, never retried.
    pub async fn dispatch(&self, request: &NotifyRequest) -> DispatchOutcome {
        let Some(chat_id) = request.telegram_id.filter(|id| *id != 0) else {
            debug!("Notification {:?} has no recipient", request.event_type);
            return DispatchOutcome::Ignored;
        };
        let Some(event) = NotificationEvent::parse(&request.event_type) else {
            debug!("Ignoring unknown notification type {:?}", request.event_type);
            return DispatchOutcome::Ignored;
        };

        let screen = render(event, &request.payload);
        match self.messenger.send(chat_id, screen).await {
            Ok(()) => {
                info!("Notification {:?} delivered to {}", event, chat_id);
                DispatchOutcome::Sent
            }
            Err(e) => {
                error!("Notification {:?} to {} failed: {:#}", event, chat_id, e);
                DispatchOutcome::Failed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Outbox {
        sent: Mutex<Vec<(i64, Screen)>>,
        fail: bool,
    }

    #[async_trait]
    impl Messenger for Outbox {
        async fn send(&self, chat_id: i64, screen: Screen) -> anyhow::Result<()> {
            if self.fail {
                anyhow::bail!("chat not found");
            }
            self.sent.lock().unwrap().push((chat_id, screen));
            Ok(())
        }
    }

    fn request(event_type: &str, telegram_id: Option<i64>, payload: Value) -> NotifyRequest {
        NotifyRequest {
            secret: "s".into(),
            event_type: event_type.into(),
            telegram_id,
            payload,
        }
    }

    #[test]
    fn recipient_may_arrive_as_string() {
        let decode = |body: Value| serde_json::from_value::<NotifyRequest>(body).unwrap();
        assert_eq!(decode(json!({"telegram_id": "123"})).telegram_id, Some(123));
        assert_eq!(decode(json!({"telegram_id": 123})).telegram_id, Some(123));
        assert_eq!(decode(json!({"telegram_id": "abc"})).telegram_id, None);
        assert_eq!(decode(json!({"telegram_id": null})).telegram_id, None);
        assert_eq!(decode(json!({})).telegram_id, None);
    }

    #[test]
    fn every_event_type_parses() {
        for name in [
            "click",
            "lead",
            "qualified",
            "conversion",
            "level_up",
            "payout",
            "weekly_report",
        ] {
            assert!(NotificationEvent::parse(name).is_some(), "{name}");
        }
        assert_eq!(NotificationEvent::parse("refund"), None);
    }

    #[test]
    fn defaults_fill_missing_payload_fields() {
        let lead = render(NotificationEvent::Lead, &Value::Null);
        assert!(lead.text.contains("Кто-то"));
        let level = render(NotificationEvent::LevelUp, &json!({}));
        assert!(level.text.contains("Уровень: Партнёр!</b> 15%"));
        let report = render(NotificationEvent::WeeklyReport, &json!({"clicks": 12}));
        assert!(report.text.contains("👆12 👤0 💰0 💵0₽"));
    }

    #[test]
    fn amounts_are_locale_formatted() {
        let screen = render(NotificationEvent::Conversion, &json!({"commission": 12500}));
        assert!(screen.text.contains("<b>12\u{a0}500₽</b>"));
        assert!(screen.keyboard.has_action(&Action::PartnerStats));
        assert!(screen.keyboard.has_action(&Action::MainMenu));
    }

    #[test]
    fn payload_names_are_escaped() {
        let screen = render(NotificationEvent::Qualified, &json!({"name": "<b>x</b>"}));
        assert!(screen.text.contains("&lt;b&gt;x&lt;/b&gt;"));
    }

    #[tokio::test]
    async fn unknown_type_sends_nothing() {
        let dispatcher = NotificationDispatcher::new(Outbox::default());
        let outcome = dispatcher.dispatch(&request("refund", Some(5), Value::Null)).await;
        assert_eq!(outcome, DispatchOutcome::Ignored);
        assert!(dispatcher.messenger.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn missing_recipient_sends_nothing() {
        let dispatcher = NotificationDispatcher::new(Outbox::default());
        let outcome = dispatcher.dispatch(&request("click", None, Value::Null)).await;
        assert_eq!(outcome, DispatchOutcome::Ignored);
        assert!(dispatcher.messenger.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn payout_is_sent_once() {
        let dispatcher = NotificationDispatcher::new(Outbox::default());
        let outcome = dispatcher
            .dispatch(&request("payout", Some(77), json!({"amount": 5000})))
            .await;
        assert_eq!(outcome, DispatchOutcome::Sent);
        let sent = dispatcher.messenger.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0, 77);
        assert!(sent[0].1.text.contains("5\u{a0}000₽ ✅"));
    }

    #[tokio::test]
    async fn send_failure_is_reported_not_retried() {
        let outbox = Outbox {
            fail: true,
            ..Default::default()
        };
        let dispatcher = NotificationDispatcher::new(outbox);
        let outcome = dispatcher.dispatch(&request("click", Some(3), Value::Null)).await;
        assert_eq!(outcome, DispatchOutcome::Failed);
    }
}
