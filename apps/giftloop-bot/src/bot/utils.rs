use crate::bot::keyboards::inline_markup;
use giftloop_core::models::TelegramIdentity;
use giftloop_core::view::Screen;
use teloxide::prelude::*;
use teloxide::types::{CallbackQuery, MaybeInaccessibleMessage, ParseMode, User};
use teloxide::RequestError;
use tracing::{debug, warn};

pub fn identity_from(user: &User) -> TelegramIdentity {
    TelegramIdentity {
        id: user.id.0 as i64,
        first_name: user.first_name.clone(),
        last_name: user.last_name.clone(),
        username: user.username.clone(),
    }
}

/// Answers a callback query. Behind the proxy the query is often stale by the
/// time we answer; Telegram then rejects it, which is harmless.
pub async fn ack(bot: &Bot, q: &CallbackQuery, text: Option<&str>) {
    let mut request = bot.answer_callback_query(q.id.clone());
    if let Some(text) = text {
        request = request.text(text);
    }
    match request.await {
        Ok(_) => {}
        Err(RequestError::Api(e)) => debug!("Stale callback {} ignored: {}", q.id, e),
        Err(e) => warn!("Failed to answer callback {}: {}", q.id, e),
    }
}

pub async fn send_screen(bot: &Bot, chat_id: ChatId, screen: Screen) -> Result<Message, RequestError> {
    let request = bot
        .send_message(chat_id, screen.text)
        .parse_mode(ParseMode::Html);
    match inline_markup(&screen.keyboard) {
        Some(markup) => request.reply_markup(markup).await,
        None => request.await,
    }
}

/// Replaces the pressed message with `screen`, or sends it as a new message
/// when the edit is refused.
pub async fn safe_edit(bot: &Bot, q: &CallbackQuery, screen: Screen) -> Result<(), RequestError> {
    let Some(message) = q.message.as_ref() else {
        send_screen(bot, ChatId(q.from.id.0 as i64), screen).await?;
        return Ok(());
    };
    let chat_id = message.chat().id;

    if let MaybeInaccessibleMessage::Regular(_) = message {
        let mut edit = bot
            .edit_message_text(chat_id, message.id(), screen.text.clone())
            .parse_mode(ParseMode::Html);
        if let Some(markup) = inline_markup(&screen.keyboard) {
            edit = edit.reply_markup(markup);
        }
        match edit.await {
            Ok(_) => return Ok(()),
            Err(e) => debug!("Edit of message {} failed, sending instead: {}", message.id(), e),
        }
    }

    send_screen(bot, chat_id, screen).await?;
    Ok(())
}

/// Chat to reply into: the pressed message's chat, else the user's private chat.
pub fn reply_chat(q: &CallbackQuery) -> ChatId {
    q.message
        .as_ref()
        .map(|m| m.chat().id)
        .unwrap_or(ChatId(q.from.id.0 as i64))
}
