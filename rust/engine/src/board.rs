use serde::{Deserialize, Serialize};

/// Community cards as reported by the table: up to three flop codes, then
/// an optional turn and river.
///
/// Blank codes count as absent. The table client always submits three flop
/// slots, filled or not.
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct CommunityCards {
    #[serde(default)]
    pub flop: Vec<String>,
    #[serde(default)]
    pub turn: Option<String>,
    #[serde(default)]
    pub river: Option<String>,
}

impl CommunityCards {
    /// No board yet.
    pub fn preflop() -> Self {
        Self::default()
    }

    pub fn with_flop(mut self, cards: [&str; 3]) -> Self {
        self.flop = cards.iter().map(|c| c.to_string()).collect();
        self
    }

    pub fn with_turn(mut self, card: &str) -> Self {
        self.turn = Some(card.to_string());
        self
    }

    pub fn with_river(mut self, card: &str) -> Self {
        self.river = Some(card.to_string());
        self
    }

    pub fn flop_cards(&self) -> Vec<&str> {
        self.flop
            .iter()
            .map(|c| c.trim())
            .filter(|c| !c.is_empty())
            .collect()
    }

    pub fn turn_card(&self) -> Option<&str> {
        present(&self.turn)
    }

    pub fn river_card(&self) -> Option<&str> {
        present(&self.river)
    }
}

fn present(card: &Option<String>) -> Option<&str> {
    card.as_deref().map(str::trim).filter(|c| !c.is_empty())
}
