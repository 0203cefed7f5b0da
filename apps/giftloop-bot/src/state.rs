use crate::config::UpdateMode;
use crate::services::gift_service::GiftService;
use crate::services::notification_service::{TelegramGiftNotifier, TelegramMessenger};
use crate::services::profile_service::ProfileService;
use crate::services::referrer_service::ReferrerService;
use giftloop_core::notify::NotificationDispatcher;
use giftloop_core::screens::Links;
use std::sync::Arc;
use teloxide::Bot;

#[derive(Clone)]
pub struct AppState {
    pub bot: Bot,
    pub links: Arc<Links>,
    pub update_mode: UpdateMode,
    pub webhook_secret: Arc<str>,
    pub profiles: ProfileService,
    pub referrers: ReferrerService,
    pub gifts: GiftService,
    pub gift_notifier: TelegramGiftNotifier,
    pub notifications: Arc<NotificationDispatcher<TelegramMessenger>>,
}
