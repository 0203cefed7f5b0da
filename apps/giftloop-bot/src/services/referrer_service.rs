use crate::api_client::SupabaseClient;
use async_trait::async_trait;
use giftloop_core::models::{NewReferrer, PayoutRequest, PayoutStatus, Referrer};
use giftloop_core::store::{PayoutStore, ReferrerStore, StoreResult};
use serde_json::Value;
use uuid::Uuid;

#[derive(Clone)]
pub struct ReferrerService {
    api: SupabaseClient,
}

impl ReferrerService {
    pub fn new(api: SupabaseClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl ReferrerStore for ReferrerService {
    async fn find_referrer(&self, telegram_id: i64) -> StoreResult<Option<Referrer>> {
        self.api
            .select_one("referrers", &[("telegram_id", format!("eq.{}", telegram_id))])
            .await
    }

    async fn create_referrer(&self, row: &NewReferrer) -> StoreResult<Referrer> {
        self.api.insert("referrers", row).await
    }
}

#[async_trait]
impl PayoutStore for ReferrerService {
    async fn has_pending_payout(&self, referrer_id: Uuid) -> StoreResult<bool> {
        let rows: Vec<Value> = self
            .api
            .select(
                "payouts",
                &[
                    ("referrer_id", format!("eq.{}", referrer_id)),
                    ("status", format!("eq.{}", PayoutStatus::Pending.as_str())),
                    ("limit", "1".to_string()),
                ],
            )
            .await?;
        Ok(!rows.is_empty())
    }

    async fn create_payout(&self, request: &PayoutRequest) -> StoreResult<PayoutRequest> {
        self.api.insert("payouts", request).await
    }
}
