use giftloop_core::view::{Button, Keyboard};
use reqwest::Url;
use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup, WebAppInfo};
use tracing::warn;

fn parse_url(label: &str, raw: &str) -> Option<Url> {
    match Url::parse(raw) {
        Ok(url) => Some(url),
        Err(e) => {
            warn!("Dropping button {:?}: bad url {:?}: {}", label, raw, e);
            None
        }
    }
}

fn inline_button(button: &Button) -> Option<InlineKeyboardButton> {
    match button {
        Button::Action { label, action } => Some(InlineKeyboardButton::callback(
            label.clone(),
            action.to_callback_data(),
        )),
        Button::Url { label, url } => {
            parse_url(label, url).map(|url| InlineKeyboardButton::url(label.clone(), url))
        }
        Button::WebApp { label, url } => parse_url(label, url)
            .map(|url| InlineKeyboardButton::web_app(label.clone(), WebAppInfo { url })),
    }
}

/// `None` for a keyboard without buttons, so the message goes out bare.
pub fn inline_markup(keyboard: &Keyboard) -> Option<InlineKeyboardMarkup> {
    let rows: Vec<Vec<InlineKeyboardButton>> = keyboard
        .rows()
        .map(|row| row.iter().filter_map(inline_button).collect::<Vec<_>>())
        .filter(|row| !row.is_empty())
        .collect();
    if rows.is_empty() {
        None
    } else {
        Some(InlineKeyboardMarkup::new(rows))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use giftloop_core::Action;
    use teloxide::types::InlineKeyboardButtonKind;

    #[test]
    fn rows_keep_their_layout() {
        let keyboard = Keyboard::new()
            .action("a", Action::GetBook)
            .action("b", Action::OpenRoulette)
            .row()
            .web_app("c", "https://app.example.com?screen=roulette");
        let markup = inline_markup(&keyboard).unwrap();
        assert_eq!(markup.inline_keyboard.len(), 2);
        assert_eq!(markup.inline_keyboard[0].len(), 2);
        match &markup.inline_keyboard[0][0].kind {
            InlineKeyboardButtonKind::CallbackData(data) => assert_eq!(data, "get_book"),
            other => panic!("unexpected button: {other:?}"),
        }
        assert!(matches!(
            markup.inline_keyboard[1][0].kind,
            InlineKeyboardButtonKind::WebApp(_)
        ));
    }

    #[test]
    fn invalid_url_drops_only_that_button() {
        let keyboard = Keyboard::new()
            .url("broken", "not a url")
            .row()
            .action("menu", Action::MainMenu);
        let markup = inline_markup(&keyboard).unwrap();
        assert_eq!(markup.inline_keyboard.len(), 1);
    }

    #[test]
    fn empty_keyboard_has_no_markup() {
        assert!(inline_markup(&Keyboard::new()).is_none());
    }
}
