use crate::bot::utils::{identity_from, send_screen};
use crate::state::AppState;
use giftloop_core::actions::{parse_start_command, StartPayload};
use giftloop_core::gifting::{self, LandingDecision};
use giftloop_core::models::TelegramIdentity;
use giftloop_core::screens;
use giftloop_core::store::{ProfileStore, ReferralTracker};
use giftloop_core::view::Screen;
use teloxide::prelude::*;
use tracing::{error, info, warn};

pub async fn message_handler(
    bot: Bot,
    msg: Message,
    state: AppState,
) -> Result<(), teloxide::RequestError> {
    let (Some(text), Some(user)) = (msg.text(), msg.from.as_ref()) else {
        return Ok(());
    };
    let identity = identity_from(user);

    let screen = match parse_start_command(text) {
        Some(payload) => {
            info!("/start from {} with payload {:?}", identity.id, payload);
            start_screen(&state, &identity, payload).await
        }
        // Other commands have no handler.
        None if text.starts_with('/') => return Ok(()),
        None => screens::choose_action(&state.links),
    };

    if let Err(e) = send_screen(&bot, msg.chat.id, screen).await {
        error!("Failed to reply to {}: {}", identity.id, e);
    }
    Ok(())
}

async fn start_screen(state: &AppState, identity: &TelegramIdentity, payload: &str) -> Screen {
    if let Err(e) = state.profiles.ensure_profile(identity).await {
        error!("Failed to load profile for {}: {}", identity.id, e);
    }

    let first_name = Some(identity.first_name.as_str());
    match StartPayload::parse(payload) {
        StartPayload::Gift { gifter_id, book_id } => {
            match gifting::landing(identity.id, gifter_id, &book_id) {
                LandingDecision::Welcome => screens::welcome(&state.links, first_name),
                LandingDecision::Preview { gifter_id, book } => {
                    screens::gift_landing(first_name, gifter_id, book)
                }
            }
        }
        StartPayload::Referral(code) => {
            if let Err(e) = state.gifts.track_click(&code, "bot").await {
                warn!("Failed to track referral click {}: {}", code, e);
            }
            screens::welcome(&state.links, first_name)
        }
        StartPayload::FromGroup => screens::welcome_group(&state.links, first_name),
        StartPayload::Plain => screens::welcome(&state.links, first_name),
    }
}
