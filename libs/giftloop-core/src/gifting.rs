//! The gift-a-book loop: landing, subscription and the gifter's reward notice.

use crate::catalog::{self, Book};
use crate::models::GiftEvent;
use crate::notify::Messenger;
use crate::screens;
use crate::store::{GiftLedger, ProfileStore};
use chrono::Utc;
use tracing::{error, info, warn};

/// What a gift link shows to the person who opened it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LandingDecision {
    /// The gifter opened their own link.
    Welcome,
    Preview { gifter_id: i64, book: &'static Book },
}

pub fn landing(viewer_id: i64, gifter_id: i64, book_id: &str) -> LandingDecision {
    if viewer_id == gifter_id {
        return LandingDecision::Welcome;
    }
    LandingDecision::Preview {
        gifter_id,
        book: catalog::find_or_default(book_id),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GiftNotice {
    pub gifter_id: i64,
    pub book_id: String,
    pub receiver_name: String,
}

/// Hands a notice off for delivery without waiting on it.
pub trait GifterNotifier: Send + Sync {
    fn submit(&self, notice: GiftNotice);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubscribeOutcome {
    SelfGift,
    Fulfilled {
        book: &'static Book,
        ledger_recorded: bool,
    },
}

/// Records the gift and queues the gifter's notice. Ledger failures are
/// logged and the subscription still completes.
pub async fn subscribe(
    ledger: &dyn GiftLedger,
    notifier: &dyn GifterNotifier,
    gifter_id: i64,
    receiver_id: i64,
    book_id: &str,
    receiver_name: &str,
) -> SubscribeOutcome {
    if gifter_id == receiver_id {
        info!("User {} tried to subscribe through their own gift link", receiver_id);
        return SubscribeOutcome::SelfGift;
    }

    let book = catalog::find_or_default(book_id);
    let event = GiftEvent {
        gifter_id,
        receiver_id,
        book_id: book.id.to_string(),
        occurred_at: Utc::now(),
    };
    let ledger_recorded = match ledger.record_gift(&event).await {
        Ok(()) => {
            info!("Gift of {} recorded: {} -> {}", book.id, gifter_id, receiver_id);
            true
        }
        Err(e) => {
            error!("Failed to record gift {} -> {}: {}", gifter_id, receiver_id, e);
            false
        }
    };

    notifier.submit(GiftNotice {
        gifter_id,
        book_id: book.id.to_string(),
        receiver_name: receiver_name.to_string(),
    });

    SubscribeOutcome::Fulfilled {
        book,
        ledger_recorded,
    }
}

/// Sends the "+1 ticket" message, reading the gifter's counters fresh.
pub async fn deliver_gift_notice(
    profiles: &dyn ProfileStore,
    messenger: &dyn Messenger,
    notice: &GiftNotice,
) -> anyhow::Result<()> {
    let profile = match profiles.find_profile(notice.gifter_id).await {
        Ok(profile) => profile,
        Err(e) => {
            warn!("Could not load gifter {} profile: {}", notice.gifter_id, e);
            None
        }
    };
    let book = catalog::find_or_default(&notice.book_id);
    let screen = screens::gifter_notice(profile.as_ref(), book, &notice.receiver_name);
    messenger.send(notice.gifter_id, screen).await
}
