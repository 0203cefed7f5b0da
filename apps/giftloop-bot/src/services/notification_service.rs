use crate::bot::utils::send_screen;
use crate::services::profile_service::ProfileService;
use async_trait::async_trait;
use giftloop_core::gifting::{self, GiftNotice, GifterNotifier};
use giftloop_core::notify::Messenger;
use giftloop_core::view::Screen;
use teloxide::prelude::*;
use tracing::{error, info};

#[derive(Clone)]
pub struct TelegramMessenger {
    bot: Bot,
}

impl TelegramMessenger {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }
}

#[async_trait]
impl Messenger for TelegramMessenger {
    async fn send(&self, chat_id: i64, screen: Screen) -> anyhow::Result<()> {
        send_screen(&self.bot, ChatId(chat_id), screen).await?;
        Ok(())
    }
}

/// Delivers gifter notices on their own task so the subscriber's reply
/// never waits on them.
#[derive(Clone)]
pub struct TelegramGiftNotifier {
    profiles: ProfileService,
    messenger: TelegramMessenger,
}

impl TelegramGiftNotifier {
    pub fn new(profiles: ProfileService, messenger: TelegramMessenger) -> Self {
        Self {
            profiles,
            messenger,
        }
    }
}

impl GifterNotifier for TelegramGiftNotifier {
    fn submit(&self, notice: GiftNotice) {
        let this = self.clone();
        tokio::spawn(async move {
            match gifting::deliver_gift_notice(&this.profiles, &this.messenger, &notice).await {
                Ok(()) => info!("Gifter {} notified about {}", notice.gifter_id, notice.book_id),
                Err(e) => error!("Failed to notify gifter {}: {}", notice.gifter_id, e),
            }
        });
    }
}
