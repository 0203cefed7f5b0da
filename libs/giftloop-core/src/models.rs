use crate::achievement::{AchievementTier, UnknownTier};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::str::FromStr;
use uuid::Uuid;

/// Reads a missing or `null` column as the type's default.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Reads a tier column owned by the datastore. Null, missing or unknown
/// spellings fall back to the lowest tier.
fn lenient_tier<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + FromStr,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw
        .as_ref()
        .and_then(Value::as_str)
        .and_then(|s| s.parse().ok())
        .unwrap_or_default())
}

/// The chat-platform user behind an update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TelegramIdentity {
    pub id: i64,
    pub first_name: String,
    pub last_name: Option<String>,
    pub username: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub telegram_id: i64,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_gifts: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_tickets: u32,
    #[serde(default, rename = "achievement_level", deserialize_with = "lenient_tier")]
    pub achievement_tier: AchievementTier,
}

/// Row inserted on first contact.
#[derive(Debug, Clone, Serialize)]
pub struct NewUserProfile<'a> {
    pub telegram_id: i64,
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub username: &'a str,
    pub total_gifts: u32,
    pub total_tickets: u32,
    pub achievement_level: AchievementTier,
}

impl<'a> NewUserProfile<'a> {
    pub fn for_identity(identity: &'a TelegramIdentity) -> Self {
        Self {
            telegram_id: identity.id,
            first_name: &identity.first_name,
            last_name: identity.last_name.as_deref().unwrap_or(""),
            username: identity.username.as_deref().unwrap_or(""),
            total_gifts: 0,
            total_tickets: 0,
            achievement_level: AchievementTier::Reader,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReferrerTier {
    #[default]
    Start,
    Partner,
    #[serde(rename = "VIP")]
    Vip,
}

impl ReferrerTier {
    pub fn commission_rate(self) -> f64 {
        match self {
            ReferrerTier::Start => 10.0,
            ReferrerTier::Partner => 15.0,
            ReferrerTier::Vip => 20.0,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ReferrerTier::Start => "Start",
            ReferrerTier::Partner => "Partner",
            ReferrerTier::Vip => "VIP",
        }
    }
}

impl FromStr for ReferrerTier {
    type Err = UnknownTier;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "start" | "старт" => Ok(ReferrerTier::Start),
            "partner" | "партнёр" | "партнер" => Ok(ReferrerTier::Partner),
            "vip" => Ok(ReferrerTier::Vip),
            _ => Err(UnknownTier(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Referrer {
    pub id: Uuid,
    pub telegram_id: i64,
    pub ref_code: String,
    #[serde(default, deserialize_with = "lenient_tier")]
    pub level: ReferrerTier,
    #[serde(default, deserialize_with = "null_as_default")]
    pub commission_rate: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_clicks: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_leads: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_conversions: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_earned: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub balance: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewReferrer {
    pub telegram_id: i64,
    pub ref_code: String,
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub level: ReferrerTier,
    pub commission_rate: f64,
    pub total_clicks: u64,
    pub total_leads: u64,
    pub total_conversions: u64,
    pub total_earned: f64,
    pub balance: f64,
}

impl NewReferrer {
    pub fn for_identity(identity: &TelegramIdentity, ref_code: String) -> Self {
        let level = ReferrerTier::Start;
        Self {
            telegram_id: identity.id,
            ref_code,
            first_name: identity.first_name.clone(),
            last_name: identity.last_name.clone().unwrap_or_default(),
            username: identity.username.clone().unwrap_or_default(),
            level,
            commission_rate: level.commission_rate(),
            total_clicks: 0,
            total_leads: 0,
            total_conversions: 0,
            total_earned: 0.0,
            balance: 0.0,
        }
    }
}

/// One successful subscription through a gift link.
#[derive(Debug, Clone, PartialEq)]
pub struct GiftEvent {
    pub gifter_id: i64,
    pub receiver_id: i64,
    pub book_id: String,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PayoutStatus {
    #[default]
    Pending,
    Paid,
    Rejected,
}

impl PayoutStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            PayoutStatus::Pending => "pending",
            PayoutStatus::Paid => "paid",
            PayoutStatus::Rejected => "rejected",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayoutRequest {
    pub referrer_id: Uuid,
    pub amount: f64,
    pub method: String,
    pub status: PayoutStatus,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct LeaderboardEntry {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_tier")]
    pub achievement_level: AchievementTier,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_gifts: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_tickets: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_tolerates_sparse_rows() {
        let profile: UserProfile =
            serde_json::from_str(r#"{"telegram_id": 7, "first_name": null}"#).unwrap();
        assert_eq!(profile.telegram_id, 7);
        assert_eq!(profile.total_tickets, 0);
        assert_eq!(profile.achievement_tier, AchievementTier::Reader);
    }

    #[test]
    fn leaderboard_nulls_read_as_zero() {
        let entry: LeaderboardEntry = serde_json::from_str(
            r#"{"first_name": "Anna", "achievement_level": null, "total_gifts": 6, "total_tickets": null}"#,
        )
        .unwrap();
        assert_eq!(entry.total_gifts, 6);
        assert_eq!(entry.total_tickets, 0);
        assert_eq!(entry.achievement_level, AchievementTier::Reader);
    }

    #[test]
    fn referrer_row_parses_vip_level() {
        let referrer: Referrer = serde_json::from_str(
            r#"{
                "id": "6f1c1d2e-6a4b-4b43-9f0c-2f5d7f1e9a10",
                "telegram_id": 99,
                "ref_code": "K7QP2Z",
                "level": "VIP",
                "commission_rate": 20,
                "balance": 5250.5
            }"#,
        )
        .unwrap();
        assert_eq!(referrer.level, ReferrerTier::Vip);
        assert_eq!(referrer.balance, 5250.5);
        assert_eq!(referrer.total_clicks, 0);
    }

    #[test]
    fn referrer_level_tolerates_null_and_russian_label() {
        let row = |level: &str| {
            format!(
                r#"{{"id": "6f1c1d2e-6a4b-4b43-9f0c-2f5d7f1e9a10", "telegram_id": 99, "ref_code": "K7QP2Z", "level": {level}}}"#
            )
        };
        let referrer: Referrer = serde_json::from_str(&row("null")).unwrap();
        assert_eq!(referrer.level, ReferrerTier::Start);
        let referrer: Referrer = serde_json::from_str(&row("\"Партнёр\"")).unwrap();
        assert_eq!(referrer.level, ReferrerTier::Partner);
        let referrer: Referrer = serde_json::from_str(&row("\"gold\"")).unwrap();
        assert_eq!(referrer.level, ReferrerTier::Start);
    }

    #[test]
    fn stored_achievement_level_is_read_leniently() {
        let profile: UserProfile = serde_json::from_str(
            r#"{"telegram_id": 7, "total_gifts": 7, "achievement_level": "Gifter"}"#,
        )
        .unwrap();
        assert_eq!(profile.achievement_tier, AchievementTier::Gifter);
        let profile: UserProfile =
            serde_json::from_str(r#"{"telegram_id": 7, "achievement_level": "platinum"}"#).unwrap();
        assert_eq!(profile.achievement_tier, AchievementTier::Reader);
    }

    #[test]
    fn new_referrer_starts_at_base_tier() {
        let identity = TelegramIdentity {
            id: 5,
            first_name: "Anna".into(),
            ..Default::default()
        };
        let row = NewReferrer::for_identity(&identity, "ABCDEF".into());
        assert_eq!(row.level, ReferrerTier::Start);
        assert_eq!(row.commission_rate, 10.0);
        assert_eq!(row.last_name, "");
    }
}
