//! Scene description rendering.
//!
//! A scene description is the text handed to an advice generator. The first
//! description of a hand carries a header (play style, the viewer's seat and
//! hole cards) and a closing list of questions; later descriptions in the
//! same hand drop both and only restate the table, board and betting.

use crate::board::CommunityCards;
use crate::errors::AdvisorError;
use crate::player::{Player, PlayerStatus};
use crate::position::{self, PositionLabel, SeatMap};
use crate::stage::{self, Stage};
use serde::{Deserialize, Serialize};
use std::fmt::Write;

/// Play-style line used when none is configured.
pub const DEFAULT_PLAY_STYLE: &str =
    "Play a solid tight-aggressive style and exploit obvious mistakes by opponents.";

const UNKNOWN_POSITION: &str = "unknown position";

const STRATEGY_REQUEST: &str = "Please give a detailed strategy recommendation covering:
1. How to play this hand from the current position
2. A sensible raise size given the other players' stack depths
3. The key things to watch out for in this spot
4. How to respond if you face a raise or re-raise
Finish with a concrete bet size.";

/// Where a hand is in its prompt sequence.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PromptPhase {
    /// No description rendered yet for this hand
    #[default]
    AwaitingFirstPrompt,
    /// At least one description rendered
    PromptsIssued,
}

impl PromptPhase {
    pub fn is_first(self) -> bool {
        self == PromptPhase::AwaitingFirstPrompt
    }
}

/// Output of [`SceneBuilder::render`].
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct RenderedScene {
    pub text: String,
    pub stage: Stage,
    /// Phase the hand is in after this render
    pub phase: PromptPhase,
}

/// Renders scene descriptions. Holds only presentation settings; the prompt
/// phase is passed in by the owner of the hand.
#[derive(Debug, Clone)]
pub struct SceneBuilder {
    play_style: String,
}

impl Default for SceneBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneBuilder {
    pub fn new() -> Self {
        Self::with_play_style(DEFAULT_PLAY_STYLE)
    }

    pub fn with_play_style(play_style: impl Into<String>) -> Self {
        Self {
            play_style: play_style.into(),
        }
    }

    pub fn play_style(&self) -> &str {
        &self.play_style
    }

    /// Renders the description for the current state of the hand.
    ///
    /// The first player in `players` is the viewer. Its position comes from
    /// the dealer-relative rotation like every other seat.
    ///
    /// # Errors
    ///
    /// - [`AdvisorError::MissingField`] for an empty table, or when the
    ///   header is due and the viewer has no hole cards
    /// - [`AdvisorError::NoDealer`] when no seat holds the button
    pub fn render(
        &self,
        players: &[Player],
        cards: &CommunityCards,
        phase: PromptPhase,
    ) -> Result<RenderedScene, AdvisorError> {
        let viewer = players
            .first()
            .ok_or_else(|| AdvisorError::MissingField("player list".into()))?;
        let stage = stage::classify(cards);
        let seats = position::resolve(players)?;

        let mut text = String::new();
        if phase.is_first() {
            self.write_header(&mut text, players.len(), viewer, seats.label_of(0))?;
        }
        write_roster(&mut text, players, &seats)?;
        write_board(&mut text, cards, stage)?;
        write_betting(&mut text, players, &seats, stage)?;
        write!(
            text,
            "\n{}, you are in {} on the {}. What is your action?",
            viewer.name,
            label_text(seats.label_of(0)),
            stage
        )?;
        if phase.is_first() {
            write!(text, "\n\n{STRATEGY_REQUEST}")?;
        }

        Ok(RenderedScene {
            text,
            stage,
            phase: PromptPhase::PromptsIssued,
        })
    }

    fn write_header(
        &self,
        text: &mut String,
        seat_count: usize,
        viewer: &Player,
        label: Option<PositionLabel>,
    ) -> Result<(), AdvisorError> {
        let hole = viewer
            .complete_hole_cards()
            .ok_or_else(|| AdvisorError::MissingField(format!("hole cards for {}", viewer.name)))?;
        writeln!(
            text,
            "You are playing a {seat_count}-handed No-Limit Texas Hold'em cash game."
        )?;
        writeln!(text, "{}", self.play_style)?;
        writeln!(text)?;
        writeln!(text, "Your seat:")?;
        writeln!(text, "- Name: {}", viewer.name)?;
        writeln!(text, "- Position: {}", label_text(label))?;
        writeln!(text, "- Chips: {}", viewer.chips)?;
        writeln!(
            text,
            "- Hole cards: {} {}",
            hole.card1.trim(),
            hole.card2.trim()
        )?;
        writeln!(text)?;
        Ok(())
    }
}

fn label_text(label: Option<PositionLabel>) -> &'static str {
    label.map_or(UNKNOWN_POSITION, |l| l.short_name())
}

fn write_roster(text: &mut String, players: &[Player], seats: &SeatMap) -> std::fmt::Result {
    writeln!(text, "Table (small blind first):")?;
    for seat in seats.seats() {
        let player = &players[seat.index];
        write!(text, "- {}: ", label_text(seat.label))?;
        if seat.index == 0 {
            write!(text, "you")?;
        } else {
            write!(text, "{}, {} chips", player.name, player.chips)?;
        }
        if player.is_dealer {
            write!(text, ", dealer")?;
        }
        if player.status == PlayerStatus::Folded {
            write!(text, ", folded")?;
        }
        if let Some(action) = player.declared_action() {
            write!(text, ", last action: {action}")?;
        }
        writeln!(text)?;
    }
    Ok(())
}

fn write_board(text: &mut String, cards: &CommunityCards, stage: Stage) -> std::fmt::Result {
    writeln!(text)?;
    writeln!(text, "Board:")?;
    if stage == Stage::Preflop {
        return writeln!(text, "- No community cards yet (preflop)");
    }
    let flop = cards.flop_cards();
    if !flop.is_empty() {
        writeln!(text, "- Flop: {}", flop.join(" "))?;
    }
    if let Some(turn) = cards.turn_card() {
        writeln!(text, "- Turn: {turn}")?;
    }
    if let Some(river) = cards.river_card() {
        writeln!(text, "- River: {river}")?;
    }
    Ok(())
}

// Stored amounts are rendered as-is; folded seats are not filtered.
fn write_betting(
    text: &mut String,
    players: &[Player],
    seats: &SeatMap,
    stage: Stage,
) -> std::fmt::Result {
    writeln!(text)?;
    writeln!(text, "Betting:")?;
    for &round in stage.elapsed() {
        writeln!(text, "{}:", round.title())?;
        for seat in seats.seats() {
            let player = &players[seat.index];
            writeln!(
                text,
                "- {} {}: {}",
                label_text(seat.label),
                player.name,
                player.bets.get(round)
            )?;
        }
    }
    let pot: u64 = players.iter().map(Player::total_bet).sum();
    writeln!(text, "Pot: {pot}")
}
