use crate::board::CommunityCards;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A betting round in Texas Hold'em, ordered by when it occurs.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    /// Hole cards dealt, no board
    Preflop,
    /// Three community cards
    Flop,
    /// Fourth community card
    Turn,
    /// Fifth community card
    River,
}

impl Stage {
    pub const fn all() -> &'static [Stage] {
        &[Stage::Preflop, Stage::Flop, Stage::Turn, Stage::River]
    }

    /// Every round up to and including this one.
    pub fn elapsed(self) -> &'static [Stage] {
        let all = Self::all();
        &all[..=self as usize]
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Stage::Preflop => "preflop",
            Stage::Flop => "flop",
            Stage::Turn => "turn",
            Stage::River => "river",
        }
    }

    /// Capitalised name used as a section heading.
    pub const fn title(self) -> &'static str {
        match self {
            Stage::Preflop => "Preflop",
            Stage::Flop => "Flop",
            Stage::Turn => "Turn",
            Stage::River => "River",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Determines the active betting round from the community cards.
///
/// The flop is the primary signal: without it the hand is preflop no matter
/// what the turn or river slots hold. Every input maps to exactly one stage.
///
/// # Examples
///
/// ```
/// use seatread_engine::board::CommunityCards;
/// use seatread_engine::stage::{classify, Stage};
///
/// assert_eq!(classify(&CommunityCards::preflop()), Stage::Preflop);
///
/// let flop = CommunityCards::preflop().with_flop(["SA", "HK", "D7"]);
/// assert_eq!(classify(&flop), Stage::Flop);
/// ```
pub fn classify(cards: &CommunityCards) -> Stage {
    if cards.flop_cards().is_empty() {
        Stage::Preflop
    } else if cards.turn_card().is_none() {
        Stage::Flop
    } else if cards.river_card().is_none() {
        Stage::Turn
    } else {
        Stage::River
    }
}
