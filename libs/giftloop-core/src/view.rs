//! Platform-neutral rendering model. The bot turns a [`Screen`] into a
//! message with an inline keyboard.

use crate::actions::Action;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Button {
    Action { label: String, action: Action },
    Url { label: String, url: String },
    WebApp { label: String, url: String },
}

impl Button {
    pub fn label(&self) -> &str {
        match self {
            Button::Action { label, .. } | Button::Url { label, .. } | Button::WebApp { label, .. } => {
                label
            }
        }
    }
}

/// Rows of buttons, built left to right with `row()` starting a new line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Keyboard {
    rows: Vec<Vec<Button>>,
}

impl Keyboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn action(self, label: impl Into<String>, action: Action) -> Self {
        self.push(Button::Action {
            label: label.into(),
            action,
        })
    }

    pub fn url(self, label: impl Into<String>, url: impl Into<String>) -> Self {
        self.push(Button::Url {
            label: label.into(),
            url: url.into(),
        })
    }

    pub fn web_app(self, label: impl Into<String>, url: impl Into<String>) -> Self {
        self.push(Button::WebApp {
            label: label.into(),
            url: url.into(),
        })
    }

    pub fn row(mut self) -> Self {
        if self.rows.last().is_some_and(|r| !r.is_empty()) {
            self.rows.push(Vec::new());
        }
        self
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Button]> {
        self.rows.iter().map(Vec::as_slice).filter(|r| !r.is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.rows().next().is_none()
    }

    pub fn buttons(&self) -> impl Iterator<Item = &Button> {
        self.rows.iter().flatten()
    }

    pub fn has_action(&self, action: &Action) -> bool {
        self.buttons()
            .any(|b| matches!(b, Button::Action { action: a, .. } if a == action))
    }

    fn push(mut self, button: Button) -> Self {
        match self.rows.last_mut() {
            Some(row) => row.push(button),
            None => self.rows.push(vec![button]),
        }
        self
    }
}

/// HTML message text plus its keyboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Screen {
    pub text: String,
    pub keyboard: Keyboard,
}

impl Screen {
    pub fn new(text: impl Into<String>, keyboard: Keyboard) -> Self {
        Self {
            text: text.into(),
            keyboard,
        }
    }

    pub fn text_only(text: impl Into<String>) -> Self {
        Self::new(text, Keyboard::new())
    }
}

pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Formats an amount the way the Russian locale does: groups of three digits
/// split by a no-break space, comma before at most two decimals.
pub fn format_amount(amount: f64) -> String {
    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = cents / 100;
    let fraction = cents % 100;

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 * 2);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('\u{a0}');
        }
        grouped.push(ch);
    }

    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    match fraction {
        0 => format!("{}{}", sign, grouped),
        f if f % 10 == 0 => format!("{}{},{}", sign, grouped, f / 10),
        f => format!("{}{},{:02}", sign, grouped, f),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyboard_rows_split_on_row() {
        let kb = Keyboard::new()
            .action("a", Action::GetBook)
            .action("b", Action::OpenRoulette)
            .row()
            .url("c", "https://example.com")
            .row();
        let rows: Vec<_> = kb.rows().collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].len(), 2);
        assert_eq!(rows[1][0].label(), "c");
        assert!(kb.has_action(&Action::OpenRoulette));
        assert!(!kb.has_action(&Action::MainMenu));
    }

    #[test]
    fn empty_keyboard_reports_empty() {
        assert!(Keyboard::new().row().is_empty());
    }

    #[test]
    fn html_is_escaped() {
        assert_eq!(escape_html("<b>Tom & Jerry</b>"), "&lt;b&gt;Tom &amp; Jerry&lt;/b&gt;");
    }

    #[test]
    fn amounts_use_locale_grouping() {
        assert_eq!(format_amount(0.0), "0");
        assert_eq!(format_amount(999.0), "999");
        assert_eq!(format_amount(5000.0), "5\u{a0}000");
        assert_eq!(format_amount(1234567.0), "1\u{a0}234\u{a0}567");
        assert_eq!(format_amount(1234.5), "1\u{a0}234,5");
        assert_eq!(format_amount(10.25), "10,25");
        assert_eq!(format_amount(-1500.0), "-1\u{a0}500");
    }
}
