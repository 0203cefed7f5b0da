use crate::bot::utils::{ack, identity_from, reply_chat, safe_edit, send_screen};
use crate::state::AppState;
use giftloop_core::actions::Action;
use giftloop_core::affiliate::{self, WithdrawalError, MIN_WITHDRAWAL};
use giftloop_core::catalog;
use giftloop_core::gifting::{self, SubscribeOutcome};
use giftloop_core::models::{TelegramIdentity, UserProfile};
use giftloop_core::screens;
use giftloop_core::store::{LeaderboardSource, ProfileStore, ReferrerStore};
use giftloop_core::view::Screen;
use std::time::Duration;
use teloxide::prelude::*;
use teloxide::types::CallbackQuery;
use tracing::{debug, error, info, warn};

const CHECKLIST_FOLLOW_UP_DELAY: Duration = Duration::from_millis(1500);

/// How a screen reaches the user.
enum Delivery {
    /// Replace the pressed message.
    Edit(Screen),
    /// Send as a new message.
    Send(Screen),
}

fn ack_text(action: &Action) -> Option<&'static str> {
    match action {
        Action::Download(_) => Some("📥 Отправляем..."),
        Action::SendChecklist => Some("📋 Отправляем..."),
        Action::Subscribe { .. } => Some("🎉 Добро пожаловать!"),
        _ => None,
    }
}

pub async fn callback_handler(
    bot: Bot,
    q: CallbackQuery,
    state: AppState,
) -> Result<(), teloxide::RequestError> {
    let Some(action) = q.data.as_deref().and_then(Action::from_callback_data) else {
        debug!("Ignoring unknown callback {:?}", q.data);
        ack(&bot, &q, None).await;
        return Ok(());
    };
    info!("Callback {:?} from {}", action, q.from.id.0);
    ack(&bot, &q, ack_text(&action)).await;

    let identity = identity_from(&q.from);
    let follow_up_checklist = action == Action::SendChecklist;
    let delivery = route(&state, &identity, action).await;

    let sent = match delivery {
        Delivery::Edit(screen) => safe_edit(&bot, &q, screen).await,
        Delivery::Send(screen) => send_screen(&bot, reply_chat(&q), screen).await.map(|_| ()),
    };
    if let Err(e) = sent {
        error!("Failed to answer callback from {}: {}", identity.id, e);
        return Ok(());
    }

    if follow_up_checklist {
        let bot = bot.clone();
        let chat_id = reply_chat(&q);
        let screen = screens::checklist_follow_up(&state.links);
        tokio::spawn(async move {
            tokio::time::sleep(CHECKLIST_FOLLOW_UP_DELAY).await;
            if let Err(e) = send_screen(&bot, chat_id, screen).await {
                warn!("Failed to send checklist follow-up to {}: {}", chat_id.0, e);
            }
        });
    }
    Ok(())
}

async fn route(state: &AppState, identity: &TelegramIdentity, action: Action) -> Delivery {
    let links = &state.links;
    match action {
        Action::MainMenu => Delivery::Edit(screens::main_menu(links)),
        Action::GetBook => Delivery::Edit(screens::book_of_month(catalog::default_book())),
        Action::Download(book_id) => Delivery::Send(screens::download_pending(
            links,
            catalog::find_or_default(&book_id),
        )),
        Action::SendChecklist => Delivery::Send(screens::checklist()),
        Action::Gift(book_id) => Delivery::Edit(screens::gift_share(
            links,
            identity.id,
            catalog::find_or_default(&book_id),
        )),
        Action::BookList => Delivery::Edit(screens::library()),
        Action::MyTickets => {
            let profile = load_profile(state, identity).await;
            Delivery::Edit(screens::tickets(profile.as_ref()))
        }
        Action::MyProfile => {
            let profile = load_profile(state, identity).await;
            Delivery::Edit(screens::profile(
                &identity.first_name,
                identity.last_name.as_deref(),
                profile.as_ref(),
            ))
        }
        Action::Leaderboard => match state.gifts.top_gifters().await {
            Ok(entries) => Delivery::Edit(screens::leaderboard(Some(entries.as_slice()))),
            Err(e) => {
                warn!("Failed to fetch leaderboard: {}", e);
                Delivery::Edit(screens::leaderboard(None))
            }
        },
        Action::OpenRoulette => Delivery::Edit(screens::roulette(links)),
        Action::AboutBot => Delivery::Send(screens::about_bot()),
        Action::BecomePartner => match affiliate::ensure_referrer(&state.referrers, identity).await {
            Ok(referrer) => Delivery::Edit(screens::partner_program(links, &referrer)),
            Err(e) => {
                error!("Failed to enroll referrer {}: {}", identity.id, e);
                Delivery::Edit(screens::partner_error())
            }
        },
        Action::PartnerStats => match state.referrers.find_referrer(identity.id).await {
            Ok(Some(referrer)) => Delivery::Edit(screens::partner_stats(links, &referrer)),
            Ok(None) => Delivery::Send(screens::not_a_partner(true)),
            Err(e) => {
                error!("Failed to load referrer {}: {}", identity.id, e);
                Delivery::Edit(screens::partner_error())
            }
        },
        Action::PartnerBalance => match state.referrers.find_referrer(identity.id).await {
            Ok(Some(referrer)) => Delivery::Edit(screens::partner_balance(&referrer)),
            Ok(None) => Delivery::Send(screens::not_a_partner(false)),
            Err(e) => {
                error!("Failed to load referrer {}: {}", identity.id, e);
                Delivery::Edit(screens::partner_error())
            }
        },
        Action::PartnerWithdraw => Delivery::Edit(withdraw(state, identity).await),
        Action::Subscribe { gifter_id, book_id } => {
            let outcome = gifting::subscribe(
                &state.gifts,
                &state.gift_notifier,
                gifter_id,
                identity.id,
                &book_id,
                &identity.first_name,
            )
            .await;
            match outcome {
                SubscribeOutcome::SelfGift => {
                    Delivery::Edit(screens::welcome(links, Some(&identity.first_name)))
                }
                SubscribeOutcome::Fulfilled { book, .. } => {
                    Delivery::Edit(screens::subscription_fulfilled(links, book))
                }
            }
        }
    }
}

async fn load_profile(state: &AppState, identity: &TelegramIdentity) -> Option<UserProfile> {
    match state.profiles.ensure_profile(identity).await {
        Ok(profile) => Some(profile),
        Err(e) => {
            warn!("Failed to load profile for {}: {}", identity.id, e);
            None
        }
    }
}

async fn withdraw(state: &AppState, identity: &TelegramIdentity) -> Screen {
    let referrer = match state.referrers.find_referrer(identity.id).await {
        Ok(Some(referrer)) => referrer,
        Ok(None) => return screens::withdrawal_below_minimum(0.0, MIN_WITHDRAWAL),
        Err(e) => {
            error!("Failed to load referrer {}: {}", identity.id, e);
            return screens::withdrawal_failed();
        }
    };

    match affiliate::request_withdrawal(&state.referrers, &referrer).await {
        Ok(payout) => screens::withdrawal_created(&payout),
        Err(WithdrawalError::BelowMinimum { balance, shortfall }) => {
            screens::withdrawal_below_minimum(balance, shortfall)
        }
        Err(WithdrawalError::AlreadyPending) => screens::withdrawal_already_pending(),
        Err(WithdrawalError::Store(e)) => {
            error!("Failed to queue payout for {}: {}", identity.id, e);
            screens::withdrawal_failed()
        }
    }
}
