use crate::models::{NewReferrer, PayoutRequest, PayoutStatus, Referrer, TelegramIdentity};
use crate::referral_code;
use crate::store::{PayoutStore, ReferrerStore, StoreError};
use tracing::{info, warn};

/// Smallest balance that can be withdrawn, in roubles.
pub const MIN_WITHDRAWAL: f64 = 5000.0;

pub const PAYOUT_METHOD: &str = "sbp";

/// Attempts at finding an unused referral code before giving up.
pub const CODE_ATTEMPTS: usize = 3;

#[derive(Debug, thiserror::Error)]
pub enum EnrollError {
    #[error("no free referral code after {0} attempts")]
    CodesExhausted(usize),
    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Debug, thiserror::Error)]
pub enum WithdrawalError {
    #[error("balance {balance} is below the withdrawal minimum (short by {shortfall})")]
    BelowMinimum { balance: f64, shortfall: f64 },
    #[error("a payout request is already pending")]
    AlreadyPending,
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Returns the existing referrer or enrolls the user with a fresh code.
pub async fn ensure_referrer(
    store: &dyn ReferrerStore,
    identity: &TelegramIdentity,
) -> Result<Referrer, EnrollError> {
    if let Some(existing) = store.find_referrer(identity.id).await? {
        return Ok(existing);
    }
    enroll(store, identity, referral_code::generate).await
}

/// Inserts a referrer, drawing a new code from `next_code` whenever the
/// store reports a conflict.
pub async fn enroll(
    store: &dyn ReferrerStore,
    identity: &TelegramIdentity,
    mut next_code: impl FnMut() -> String + Send,
) -> Result<Referrer, EnrollError> {
    for attempt in 1..=CODE_ATTEMPTS {
        let row = NewReferrer::for_identity(identity, next_code());
        match store.create_referrer(&row).await {
            Ok(referrer) => {
                info!("Enrolled referrer {} with code {}", identity.id, referrer.ref_code);
                return Ok(referrer);
            }
            Err(StoreError::Conflict) => {
                // The conflict may be on telegram_id if another update enrolled first.
                if let Some(existing) = store.find_referrer(identity.id).await? {
                    return Ok(existing);
                }
                warn!(
                    "Referral code {} already taken (attempt {}/{})",
                    row.ref_code, attempt, CODE_ATTEMPTS
                );
            }
            Err(e) => return Err(e.into()),
        }
    }
    Err(EnrollError::CodesExhausted(CODE_ATTEMPTS))
}

/// Amount that may be requested for `balance`: the whole balance once it
/// reaches the minimum.
pub fn withdrawable_amount(balance: f64) -> Result<f64, WithdrawalError> {
    if balance < MIN_WITHDRAWAL {
        return Err(WithdrawalError::BelowMinimum {
            balance,
            shortfall: MIN_WITHDRAWAL - balance,
        });
    }
    Ok(balance)
}

/// Queues a payout of the full balance. The balance itself is left untouched
/// here: it stays reserved by the pending request until the ledger settles it.
pub async fn request_withdrawal(
    payouts: &dyn PayoutStore,
    referrer: &Referrer,
) -> Result<PayoutRequest, WithdrawalError> {
    let amount = withdrawable_amount(referrer.balance)?;

    if payouts.has_pending_payout(referrer.id).await? {
        return Err(WithdrawalError::AlreadyPending);
    }

    let request = PayoutRequest {
        referrer_id: referrer.id,
        amount,
        method: PAYOUT_METHOD.to_string(),
        status: PayoutStatus::Pending,
    };
    let created = payouts.create_payout(&request).await?;
    info!(
        "Payout request of {} queued for referrer {}",
        created.amount, referrer.telegram_id
    );
    Ok(created)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ReferrerTier;
    use crate::store::StoreResult;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use uuid::Uuid;

    #[derive(Default)]
    struct MemoryPayouts {
        rows: Mutex<Vec<PayoutRequest>>,
    }

    #[async_trait]
    impl PayoutStore for MemoryPayouts {
        async fn has_pending_payout(&self, referrer_id: Uuid) -> StoreResult<bool> {
            Ok(self
                .rows
                .lock()
                .unwrap()
                .iter()
                .any(|r| r.referrer_id == referrer_id && r.status == PayoutStatus::Pending))
        }

        async fn create_payout(&self, request: &PayoutRequest) -> StoreResult<PayoutRequest> {
            self.rows.lock().unwrap().push(request.clone());
            Ok(request.clone())
        }
    }

    /// Rejects the first `taken` codes it sees with a conflict.
    struct CrowdedReferrers {
        taken: usize,
        attempts: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl ReferrerStore for CrowdedReferrers {
        async fn find_referrer(&self, _telegram_id: i64) -> StoreResult<Option<Referrer>> {
            Ok(None)
        }

        async fn create_referrer(&self, row: &NewReferrer) -> StoreResult<Referrer> {
            let mut attempts = self.attempts.lock().unwrap();
            attempts.push(row.ref_code.clone());
            if attempts.len() <= self.taken {
                return Err(StoreError::Conflict);
            }
            Ok(Referrer {
                id: Uuid::new_v4(),
                telegram_id: row.telegram_id,
                ref_code: row.ref_code.clone(),
                level: row.level,
                commission_rate: row.commission_rate,
                total_clicks: 0,
                total_leads: 0,
                total_conversions: 0,
                total_earned: 0.0,
                balance: 0.0,
            })
        }
    }

    fn referrer(balance: f64) -> Referrer {
        Referrer {
            id: Uuid::new_v4(),
            telegram_id: 10,
            ref_code: "ABCDEF".into(),
            level: ReferrerTier::Start,
            commission_rate: 10.0,
            total_clicks: 0,
            total_leads: 0,
            total_conversions: 0,
            total_earned: balance,
            balance,
        }
    }

    fn identity() -> TelegramIdentity {
        TelegramIdentity {
            id: 10,
            first_name: "Anna".into(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn balance_below_minimum_is_rejected_without_write() {
        let payouts = MemoryPayouts::default();
        let err = request_withdrawal(&payouts, &referrer(4999.0)).await.unwrap_err();
        match err {
            WithdrawalError::BelowMinimum { balance, shortfall } => {
                assert_eq!(balance, 4999.0);
                assert_eq!(shortfall, 1.0);
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(payouts.rows.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn minimum_balance_creates_one_pending_request() {
        let payouts = MemoryPayouts::default();
        let created = request_withdrawal(&payouts, &referrer(5000.0)).await.unwrap();
        assert_eq!(created.amount, 5000.0);
        assert_eq!(created.status, PayoutStatus::Pending);
        assert_eq!(created.method, "sbp");
        assert_eq!(payouts.rows.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn second_request_while_pending_is_refused() {
        let payouts = MemoryPayouts::default();
        let partner = referrer(7500.0);
        request_withdrawal(&payouts, &partner).await.unwrap();
        let err = request_withdrawal(&payouts, &partner).await.unwrap_err();
        assert!(matches!(err, WithdrawalError::AlreadyPending));
        assert_eq!(payouts.rows.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn conflicting_code_is_regenerated() {
        let store = CrowdedReferrers {
            taken: 2,
            attempts: Mutex::new(Vec::new()),
        };
        let mut codes = ["AAAAAA", "BBBBBB", "CCCCCC"].into_iter().map(String::from);
        let referrer = enroll(&store, &identity(), move || codes.next().unwrap_or_default())
            .await
            .unwrap();
        assert_eq!(referrer.ref_code, "CCCCCC");
        assert_eq!(store.attempts.lock().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn enrollment_gives_up_after_retry_budget() {
        let store = CrowdedReferrers {
            taken: usize::MAX,
            attempts: Mutex::new(Vec::new()),
        };
        let err = ensure_referrer(&store, &identity()).await.unwrap_err();
        assert!(matches!(err, EnrollError::CodesExhausted(CODE_ATTEMPTS)));
        let attempts = store.attempts.lock().unwrap();
        assert_eq!(attempts.len(), CODE_ATTEMPTS);
        assert!(attempts.iter().all(|c| referral_code::is_well_formed(c)));
    }
}
