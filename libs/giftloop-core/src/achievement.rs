use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Tickets needed to enter the prize draw.
pub const TICKET_GOAL: u32 = 5;

const TICKET_FILLED: &str = "🎟";
const TICKET_EMPTY: &str = "⬜";

/// Achievement level earned by gifting books. Ordered from lowest to highest.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AchievementTier {
    #[default]
    Reader,
    Gifter,
    Ambassador,
    Legend,
}

impl AchievementTier {
    pub const ALL: [AchievementTier; 4] = [
        AchievementTier::Reader,
        AchievementTier::Gifter,
        AchievementTier::Ambassador,
        AchievementTier::Legend,
    ];

    /// Highest tier whose threshold `gifts` meets. Thresholds are inclusive.
    pub fn for_gifts(gifts: u32) -> Self {
        Self::ALL
            .iter()
            .rev()
            .copied()
            .find(|tier| gifts >= tier.min_gifts())
            .unwrap_or_default()
    }

    pub fn min_gifts(self) -> u32 {
        match self {
            AchievementTier::Reader => 0,
            AchievementTier::Gifter => 5,
            AchievementTier::Ambassador => 15,
            AchievementTier::Legend => 30,
        }
    }

    /// Bonus tickets granted by the ledger when the tier is reached.
    pub fn bonus_tickets(self) -> Option<u32> {
        match self {
            AchievementTier::Reader => None,
            AchievementTier::Gifter => Some(2),
            AchievementTier::Ambassador => Some(5),
            AchievementTier::Legend => Some(10),
        }
    }

    pub fn emoji(self) -> &'static str {
        match self {
            AchievementTier::Reader => "📚",
            AchievementTier::Gifter => "🎁",
            AchievementTier::Ambassador => "⭐",
            AchievementTier::Legend => "💎",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            AchievementTier::Reader => "Читатель",
            AchievementTier::Gifter => "Даритель",
            AchievementTier::Ambassador => "Амбассадор",
            AchievementTier::Legend => "Легенда",
        }
    }

    pub fn next(self) -> Option<Self> {
        match self {
            AchievementTier::Reader => Some(AchievementTier::Gifter),
            AchievementTier::Gifter => Some(AchievementTier::Ambassador),
            AchievementTier::Ambassador => Some(AchievementTier::Legend),
            AchievementTier::Legend => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AchievementTier::Reader => "reader",
            AchievementTier::Gifter => "gifter",
            AchievementTier::Ambassador => "ambassador",
            AchievementTier::Legend => "legend",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown tier {0:?}")]
pub struct UnknownTier(pub String);

/// Accepts the stored code in any case, or the Russian title.
impl FromStr for AchievementTier {
    type Err = UnknownTier;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim().to_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|tier| value == tier.as_str() || value == tier.title().to_lowercase())
            .ok_or_else(|| UnknownTier(s.to_string()))
    }
}

/// Returns the tier reached after a gift count change, or `None` when the
/// recomputed tier equals the one on record.
pub fn tier_transition(recorded: AchievementTier, gifts: u32) -> Option<AchievementTier> {
    let current = AchievementTier::for_gifts(gifts);
    (current != recorded).then_some(current)
}

/// Five-slot progress bar. Counts above the goal keep the bar full.
pub fn ticket_bar(tickets: u32) -> String {
    let filled = tickets.min(TICKET_GOAL) as usize;
    let empty = TICKET_GOAL as usize - filled;
    format!("{}{}", TICKET_FILLED.repeat(filled), TICKET_EMPTY.repeat(empty))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_boundaries_match_threshold_table() {
        assert_eq!(AchievementTier::for_gifts(0), AchievementTier::Reader);
        assert_eq!(AchievementTier::for_gifts(4), AchievementTier::Reader);
        assert_eq!(AchievementTier::for_gifts(5), AchievementTier::Gifter);
        assert_eq!(AchievementTier::for_gifts(14), AchievementTier::Gifter);
        assert_eq!(AchievementTier::for_gifts(15), AchievementTier::Ambassador);
        assert_eq!(AchievementTier::for_gifts(29), AchievementTier::Ambassador);
        assert_eq!(AchievementTier::for_gifts(30), AchievementTier::Legend);
        assert_eq!(AchievementTier::for_gifts(u32::MAX), AchievementTier::Legend);
    }

    #[test]
    fn tier_is_monotonic_in_gift_count() {
        let mut previous = AchievementTier::for_gifts(0);
        for gifts in 1..200 {
            let tier = AchievementTier::for_gifts(gifts);
            assert!(tier >= previous, "tier dropped at {gifts}");
            previous = tier;
        }
    }

    #[test]
    fn transition_reported_only_on_change() {
        assert_eq!(tier_transition(AchievementTier::Reader, 4), None);
        assert_eq!(
            tier_transition(AchievementTier::Reader, 5),
            Some(AchievementTier::Gifter)
        );
        assert_eq!(tier_transition(AchievementTier::Gifter, 6), None);
    }

    #[test]
    fn tier_deserializes_from_stored_level() {
        let tier: AchievementTier = serde_json::from_str("\"ambassador\"").unwrap();
        assert_eq!(tier, AchievementTier::Ambassador);
        assert_eq!(tier.as_str(), "ambassador");
    }

    #[test]
    fn tier_parses_any_case_and_title() {
        assert_eq!("Gifter".parse::<AchievementTier>(), Ok(AchievementTier::Gifter));
        assert_eq!(" LEGEND ".parse::<AchievementTier>(), Ok(AchievementTier::Legend));
        assert_eq!("Амбассадор".parse::<AchievementTier>(), Ok(AchievementTier::Ambassador));
        assert!("platinum".parse::<AchievementTier>().is_err());
    }

    #[test]
    fn ticket_bar_always_has_five_slots() {
        assert_eq!(ticket_bar(0), "⬜⬜⬜⬜⬜");
        assert_eq!(ticket_bar(3), "🎟🎟🎟⬜⬜");
        assert_eq!(ticket_bar(5), "🎟🎟🎟🎟🎟");
        assert_eq!(ticket_bar(9), "🎟🎟🎟🎟🎟");
    }
}
