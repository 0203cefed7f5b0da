//! Seams to the external datastore and serverless functions.

use crate::models::{
    GiftEvent, LeaderboardEntry, NewReferrer, PayoutRequest, Referrer, TelegramIdentity,
    UserProfile,
};
use async_trait::async_trait;
use uuid::Uuid;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A unique constraint rejected the write.
    #[error("row conflicts with an existing record")]
    Conflict,
    #[error("{resource} answered with status {status}")]
    Status { resource: String, status: u16 },
    #[error("{0} returned no rows")]
    Empty(String),
    #[error(transparent)]
    Transport(#[from] anyhow::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn find_profile(&self, telegram_id: i64) -> StoreResult<Option<UserProfile>>;
    async fn create_profile(&self, identity: &TelegramIdentity) -> StoreResult<UserProfile>;

    /// Reads the profile, creating it on first contact. A concurrent first
    /// contact that wins the insert is read back instead.
    async fn ensure_profile(&self, identity: &TelegramIdentity) -> StoreResult<UserProfile> {
        if let Some(profile) = self.find_profile(identity.id).await? {
            return Ok(profile);
        }
        match self.create_profile(identity).await {
            Err(StoreError::Conflict) => self
                .find_profile(identity.id)
                .await?
                .ok_or(StoreError::Conflict),
            created => created,
        }
    }
}

#[async_trait]
pub trait ReferrerStore: Send + Sync {
    async fn find_referrer(&self, telegram_id: i64) -> StoreResult<Option<Referrer>>;
    /// Fails with [`StoreError::Conflict`] when the code is already taken.
    async fn create_referrer(&self, row: &NewReferrer) -> StoreResult<Referrer>;
}

#[async_trait]
pub trait PayoutStore: Send + Sync {
    async fn has_pending_payout(&self, referrer_id: Uuid) -> StoreResult<bool>;
    async fn create_payout(&self, request: &PayoutRequest) -> StoreResult<PayoutRequest>;
}

/// Records gifts and increments the gifter's tickets atomically on the far side.
#[async_trait]
pub trait GiftLedger: Send + Sync {
    async fn record_gift(&self, event: &GiftEvent) -> StoreResult<()>;
}

#[async_trait]
pub trait ReferralTracker: Send + Sync {
    async fn track_click(&self, ref_code: &str, source: &str) -> StoreResult<()>;
}

#[async_trait]
pub trait LeaderboardSource: Send + Sync {
    async fn top_gifters(&self) -> StoreResult<Vec<LeaderboardEntry>>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Another update inserts the row between our read and our insert.
    #[derive(Default)]
    struct RacedProfiles {
        row: Mutex<Option<UserProfile>>,
        inserts: Mutex<u32>,
    }

    #[async_trait]
    impl ProfileStore for RacedProfiles {
        async fn find_profile(&self, _telegram_id: i64) -> StoreResult<Option<UserProfile>> {
            Ok(self.row.lock().unwrap().clone())
        }

        async fn create_profile(&self, identity: &TelegramIdentity) -> StoreResult<UserProfile> {
            *self.inserts.lock().unwrap() += 1;
            *self.row.lock().unwrap() = Some(UserProfile {
                telegram_id: identity.id,
                total_gifts: 2,
                ..Default::default()
            });
            Err(StoreError::Conflict)
        }
    }

    #[tokio::test]
    async fn racing_first_contact_reads_winner_row() {
        let store = RacedProfiles::default();
        let identity = TelegramIdentity {
            id: 42,
            first_name: "Anna".into(),
            ..Default::default()
        };
        let profile = store.ensure_profile(&identity).await.unwrap();
        assert_eq!(profile.telegram_id, 42);
        assert_eq!(profile.total_gifts, 2);
        assert_eq!(*store.inserts.lock().unwrap(), 1);
    }

    #[tokio::test]
    async fn conflict_without_row_is_still_an_error() {
        struct AlwaysConflict;

        #[async_trait]
        impl ProfileStore for AlwaysConflict {
            async fn find_profile(&self, _telegram_id: i64) -> StoreResult<Option<UserProfile>> {
                Ok(None)
            }

            async fn create_profile(&self, _identity: &TelegramIdentity) -> StoreResult<UserProfile> {
                Err(StoreError::Conflict)
            }
        }

        let err = AlwaysConflict
            .ensure_profile(&TelegramIdentity::default())
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Conflict));
    }
}
