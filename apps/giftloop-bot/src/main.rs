use anyhow::Context;
use dotenvy::dotenv;
use giftloop_core::notify::NotificationDispatcher;
use giftloop_core::screens::Links;
use std::sync::Arc;
use teloxide::prelude::*;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod api_client;
mod bot;
mod config;
mod server;
mod services;
mod state;

use crate::api_client::SupabaseClient;
use crate::config::{BotConfig, UpdateMode};
use crate::services::gift_service::GiftService;
use crate::services::notification_service::{TelegramGiftNotifier, TelegramMessenger};
use crate::services::profile_service::ProfileService;
use crate::services::referrer_service::ReferrerService;
use crate::state::AppState;

const DEFAULT_LOG_FILTER: &str = "giftloop_bot=info,giftloop_core=info,tower_http=info";

async fn resolve_bot_username(bot: &Bot, config: &BotConfig) -> anyhow::Result<String> {
    if let Some(username) = config.bot_username() {
        return Ok(username.to_string());
    }
    let me = bot
        .get_me()
        .await
        .context("Bot failed to connect to Telegram")?;
    me.user
        .username
        .clone()
        .context("Bot account has no username")
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    std::panic::set_hook(Box::new(|info| {
        error!("CRITICAL BOT PANIC: {}", info);
    }));

    info!("Starting giftloop bot...");
    let config = BotConfig::load()?;

    let bot = Bot::new(&config.telegram_bot_token);
    let bot_username = resolve_bot_username(&bot, &config).await?;
    info!("Bot connected as: @{}", bot_username);

    let api = SupabaseClient::new(config.supabase_url.clone(), config.supabase_service_key.clone());
    let profiles = ProfileService::new(api.clone());
    let messenger = TelegramMessenger::new(bot.clone());

    let state = AppState {
        bot: bot.clone(),
        links: Arc::new(Links::new(bot_username, config.webapp_url.clone())),
        update_mode: config.update_mode,
        webhook_secret: Arc::from(config.webhook_secret.as_str()),
        referrers: ReferrerService::new(api.clone()),
        gifts: GiftService::new(api),
        gift_notifier: TelegramGiftNotifier::new(profiles.clone(), messenger.clone()),
        notifications: Arc::new(NotificationDispatcher::new(messenger)),
        profiles,
    };

    let (shutdown_tx, _) = tokio::sync::broadcast::channel(1);

    let mut server = tokio::spawn(server::serve(
        state.clone(),
        config.port,
        shutdown_tx.subscribe(),
    ));

    let polling = match config.update_mode {
        UpdateMode::Polling => Some(tokio::spawn(bot::run_polling(
            bot,
            shutdown_tx.subscribe(),
            state,
        ))),
        UpdateMode::Proxy => {
            info!("Proxy mode: updates arrive on POST /webhook, webhook left untouched");
            None
        }
    };

    tokio::select! {
        result = &mut server => {
            result.context("HTTP server task failed")??;
            return Ok(());
        }
        signal = tokio::signal::ctrl_c() => {
            signal.context("Failed to listen for Ctrl-C")?;
            info!("Ctrl-C received, shutting down...");
        }
    }

    let _ = shutdown_tx.send(());
    server.await.context("HTTP server task failed")??;
    if let Some(polling) = polling {
        if let Err(e) = polling.await {
            error!("Polling task failed: {}", e);
        }
    }
    info!("Bye");
    Ok(())
}
