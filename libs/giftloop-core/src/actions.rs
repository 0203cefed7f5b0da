//! Inbound vocabulary: inline button payloads and `/start` deep-link payloads.
//!
//! Raw strings are decoded once at the edge; everything behind it matches on
//! [`Action`] and [`StartPayload`].

/// A button press, decoded from callback data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    MainMenu,
    GetBook,
    Download(String),
    SendChecklist,
    Gift(String),
    BookList,
    MyTickets,
    MyProfile,
    Leaderboard,
    OpenRoulette,
    AboutBot,
    BecomePartner,
    PartnerStats,
    PartnerBalance,
    PartnerWithdraw,
    Subscribe { gifter_id: i64, book_id: String },
}

impl Action {
    pub fn from_callback_data(data: &str) -> Option<Self> {
        let exact = match data {
            "main_menu" => Some(Action::MainMenu),
            "get_book" => Some(Action::GetBook),
            "send_checklist" => Some(Action::SendChecklist),
            "book_list" => Some(Action::BookList),
            "my_tickets" => Some(Action::MyTickets),
            "my_profile" => Some(Action::MyProfile),
            "leaderboard" => Some(Action::Leaderboard),
            "open_roulette" => Some(Action::OpenRoulette),
            "about_bot" => Some(Action::AboutBot),
            "become_partner" => Some(Action::BecomePartner),
            "partner_stats" => Some(Action::PartnerStats),
            "partner_balance" => Some(Action::PartnerBalance),
            "partner_withdraw" => Some(Action::PartnerWithdraw),
            _ => None,
        };
        if exact.is_some() {
            return exact;
        }

        if let Some(book) = data.strip_prefix("download_") {
            return non_empty(book).map(Action::Download);
        }
        if let Some(book) = data.strip_prefix("gift_") {
            return non_empty(book).map(Action::Gift);
        }
        if let Some(rest) = data.strip_prefix("sub:") {
            let (gifter, book) = rest.split_once(':')?;
            let gifter_id = parse_user_id(gifter)?;
            let book_id = non_empty(book)?;
            return Some(Action::Subscribe { gifter_id, book_id });
        }
        None
    }

    pub fn to_callback_data(&self) -> String {
        match self {
            Action::MainMenu => "main_menu".to_string(),
            Action::GetBook => "get_book".to_string(),
            Action::Download(book) => format!("download_{}", book),
            Action::SendChecklist => "send_checklist".to_string(),
            Action::Gift(book) => format!("gift_{}", book),
            Action::BookList => "book_list".to_string(),
            Action::MyTickets => "my_tickets".to_string(),
            Action::MyProfile => "my_profile".to_string(),
            Action::Leaderboard => "leaderboard".to_string(),
            Action::OpenRoulette => "open_roulette".to_string(),
            Action::AboutBot => "about_bot".to_string(),
            Action::BecomePartner => "become_partner".to_string(),
            Action::PartnerStats => "partner_stats".to_string(),
            Action::PartnerBalance => "partner_balance".to_string(),
            Action::PartnerWithdraw => "partner_withdraw".to_string(),
            Action::Subscribe { gifter_id, book_id } => format!("sub:{}:{}", gifter_id, book_id),
        }
    }
}

/// Parameter of the `/start` command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StartPayload {
    Gift { gifter_id: i64, book_id: String },
    Referral(String),
    FromGroup,
    /// No payload, or one that does not parse.
    Plain,
}

impl StartPayload {
    pub fn parse(payload: &str) -> Self {
        let payload = payload.trim();
        if let Some(rest) = payload.strip_prefix("gift_") {
            return rest
                .split_once('_')
                .and_then(|(gifter, book)| {
                    Some(StartPayload::Gift {
                        gifter_id: parse_user_id(gifter)?,
                        book_id: non_empty(book)?,
                    })
                })
                .unwrap_or(StartPayload::Plain);
        }
        if payload == "from_group" {
            return StartPayload::FromGroup;
        }
        if let Some(code) = payload.strip_prefix("ref_") {
            return non_empty(code)
                .map(StartPayload::Referral)
                .unwrap_or(StartPayload::Plain);
        }
        StartPayload::Plain
    }

    pub fn gift_link_payload(gifter_id: i64, book_id: &str) -> String {
        format!("gift_{}_{}", gifter_id, book_id)
    }
}

/// Returns the payload of a `/start` command (empty when absent), or `None`
/// when `text` is not `/start`. Accepts the `/start@bot_name` form.
pub fn parse_start_command(text: &str) -> Option<&str> {
    let rest = text.strip_prefix("/start")?;
    let rest = match rest.strip_prefix('@') {
        Some(addressed) => addressed
            .split_once(char::is_whitespace)
            .map(|(_, tail)| tail)
            .unwrap_or(""),
        None if rest.is_empty() || rest.starts_with(char::is_whitespace) => rest,
        None => return None,
    };
    Some(rest.trim())
}

fn non_empty(s: &str) -> Option<String> {
    (!s.is_empty()).then(|| s.to_string())
}

fn parse_user_id(s: &str) -> Option<i64> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}
