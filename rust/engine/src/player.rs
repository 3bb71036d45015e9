use crate::stage::Stage;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

/// Whether a seat is still contesting the hand.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerStatus {
    /// Still in the hand
    #[default]
    Active,
    /// Folded earlier in the hand
    Folded,
    /// Any other status reported by the table (sitting out, all-in, ...)
    #[serde(other)]
    Other,
}

/// Chips a seat has put in during each betting round.
///
/// The web form submits amounts as strings and leaves untouched rounds blank,
/// so every field accepts a number, a numeric string, an empty string, or null.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct StageBets {
    #[serde(default, deserialize_with = "chip_amount")]
    pub preflop: u32,
    #[serde(default, deserialize_with = "chip_amount")]
    pub flop: u32,
    #[serde(default, deserialize_with = "chip_amount")]
    pub turn: u32,
    #[serde(default, deserialize_with = "chip_amount")]
    pub river: u32,
}

impl StageBets {
    pub fn new(preflop: u32, flop: u32, turn: u32, river: u32) -> Self {
        Self {
            preflop,
            flop,
            turn,
            river,
        }
    }

    pub fn get(&self, stage: Stage) -> u32 {
        match stage {
            Stage::Preflop => self.preflop,
            Stage::Flop => self.flop,
            Stage::Turn => self.turn,
            Stage::River => self.river,
        }
    }

    pub fn set(&mut self, stage: Stage, amount: u32) {
        match stage {
            Stage::Preflop => self.preflop = amount,
            Stage::Flop => self.flop = amount,
            Stage::Turn => self.turn = amount,
            Stage::River => self.river = amount,
        }
    }

    /// Total contribution to the pot across all rounds.
    pub fn total(&self) -> u64 {
        Stage::all().iter().map(|&s| u64::from(self.get(s))).sum()
    }
}

fn chip_amount<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(u32),
        Text(String),
    }

    match Option::<Raw>::deserialize(deserializer)? {
        None => Ok(0),
        Some(Raw::Number(n)) => Ok(n),
        Some(Raw::Text(s)) => {
            let s = s.trim();
            if s.is_empty() {
                Ok(0)
            } else {
                s.parse()
                    .map_err(|_| D::Error::custom(format!("invalid chip amount `{s}`")))
            }
        }
    }
}

/// The viewer's two private cards, as card codes (e.g. `SA`, `♥K`, `Td`).
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct HoleCards {
    #[serde(default)]
    pub card1: String,
    #[serde(default)]
    pub card2: String,
}

impl HoleCards {
    pub fn new(card1: impl Into<String>, card2: impl Into<String>) -> Self {
        Self {
            card1: card1.into(),
            card2: card2.into(),
        }
    }

    /// Both slots hold a card code.
    pub fn is_complete(&self) -> bool {
        !self.card1.trim().is_empty() && !self.card2.trim().is_empty()
    }
}

/// One seat at the table as reported by the caller.
///
/// Field names follow the JSON the table client sends (`isDealer`,
/// `holeCards`, ...). `seat` is the 1-based table seat and is read from
/// `position` or `seatPosition`.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub name: String,
    pub chips: u32,
    #[serde(rename = "position", alias = "seatPosition", default)]
    pub seat: u32,
    #[serde(default)]
    pub is_dealer: bool,
    #[serde(default)]
    pub action: Option<String>,
    #[serde(default)]
    pub status: PlayerStatus,
    #[serde(default)]
    pub bets: StageBets,
    #[serde(default)]
    pub hole_cards: Option<HoleCards>,
    #[serde(default)]
    pub action_history: Vec<String>,
}

impl Player {
    pub fn new(name: impl Into<String>, chips: u32, seat: u32) -> Self {
        Self {
            name: name.into(),
            chips,
            seat,
            is_dealer: false,
            action: None,
            status: PlayerStatus::Active,
            bets: StageBets::default(),
            hole_cards: None,
            action_history: Vec::new(),
        }
    }

    pub fn dealer(mut self) -> Self {
        self.is_dealer = true;
        self
    }

    pub fn folded(mut self) -> Self {
        self.status = PlayerStatus::Folded;
        self
    }

    pub fn with_bet(mut self, stage: Stage, amount: u32) -> Self {
        self.bets.set(stage, amount);
        self
    }

    pub fn with_bets(mut self, bets: StageBets) -> Self {
        self.bets = bets;
        self
    }

    pub fn with_hole_cards(mut self, card1: &str, card2: &str) -> Self {
        self.hole_cards = Some(HoleCards::new(card1, card2));
        self
    }

    pub fn with_action(mut self, action: impl Into<String>) -> Self {
        let action = action.into();
        self.action_history.push(action.clone());
        self.action = Some(action);
        self
    }

    pub fn total_bet(&self) -> u64 {
        self.bets.total()
    }

    pub fn in_hand(&self) -> bool {
        self.status == PlayerStatus::Active
    }

    /// Hole cards, only when both codes are filled in.
    pub fn complete_hole_cards(&self) -> Option<&HoleCards> {
        self.hole_cards.as_ref().filter(|h| h.is_complete())
    }

    /// Declared action, ignoring blanks.
    pub fn declared_action(&self) -> Option<&str> {
        self.action
            .as_deref()
            .map(str::trim)
            .filter(|a| !a.is_empty())
    }
}
