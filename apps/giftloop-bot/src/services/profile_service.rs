use crate::api_client::SupabaseClient;
use async_trait::async_trait;
use giftloop_core::models::{NewUserProfile, TelegramIdentity, UserProfile};
use giftloop_core::store::{ProfileStore, StoreResult};
use tracing::info;

const TABLE: &str = "user_profiles";

#[derive(Clone)]
pub struct ProfileService {
    api: SupabaseClient,
}

impl ProfileService {
    pub fn new(api: SupabaseClient) -> Self {
        Self { api }
    }
}

#[async_trait]
impl ProfileStore for ProfileService {
    async fn find_profile(&self, telegram_id: i64) -> StoreResult<Option<UserProfile>> {
        self.api
            .select_one(TABLE, &[("telegram_id", format!("eq.{}", telegram_id))])
            .await
    }

    async fn create_profile(&self, identity: &TelegramIdentity) -> StoreResult<UserProfile> {
        let profile: UserProfile = self
            .api
            .insert(TABLE, &NewUserProfile::for_identity(identity))
            .await?;
        info!("Created profile for user {}", identity.id);
        Ok(profile)
    }
}
