use crate::api_client::SupabaseClient;
use async_trait::async_trait;
use giftloop_core::models::{GiftEvent, LeaderboardEntry};
use giftloop_core::store::{GiftLedger, LeaderboardSource, ReferralTracker, StoreResult};
use serde::{Deserialize, Serialize};
use serde_json::json;

/// Edge functions behind the gifting loop and the affiliate click counter.
#[derive(Clone)]
pub struct GiftService {
    api: SupabaseClient,
}

impl GiftService {
    pub fn new(api: SupabaseClient) -> Self {
        Self { api }
    }
}

#[derive(Serialize)]
struct GiftBookReq<'a> {
    gifter_telegram_id: i64,
    receiver_telegram_id: i64,
    book_id: &'a str,
}

#[derive(Serialize)]
struct TrackClickReq<'a> {
    ref_code: &'a str,
    source: &'a str,
}

#[derive(Deserialize)]
struct LeaderboardResp {
    #[serde(default)]
    leaderboard: Option<Vec<LeaderboardEntry>>,
}

#[async_trait]
impl GiftLedger for GiftService {
    async fn record_gift(&self, event: &GiftEvent) -> StoreResult<()> {
        self.api
            .invoke_unit(
                "gift-book",
                &GiftBookReq {
                    gifter_telegram_id: event.gifter_id,
                    receiver_telegram_id: event.receiver_id,
                    book_id: &event.book_id,
                },
            )
            .await
    }
}

#[async_trait]
impl ReferralTracker for GiftService {
    async fn track_click(&self, ref_code: &str, source: &str) -> StoreResult<()> {
        self.api
            .invoke_unit("track-click", &TrackClickReq { ref_code, source })
            .await
    }
}

#[async_trait]
impl LeaderboardSource for GiftService {
    async fn top_gifters(&self) -> StoreResult<Vec<LeaderboardEntry>> {
        let resp: LeaderboardResp = self
            .api
            .invoke("get-gifters-leaderboard", &json!({}))
            .await?;
        Ok(resp.leaderboard.unwrap_or_default())
    }
}
