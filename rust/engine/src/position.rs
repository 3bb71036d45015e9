//! Seat positions relative to the dealer button.
//!
//! Labels are listed from the small blind to the button. The seat list is
//! rotated so the small blind comes first and label `i` goes to rotated
//! seat `i`.
//!
//! | Seats | Labels |
//! |-------|--------|
//! | 2 | BTN/SB, BB |
//! | 3 | SB, BB, BTN |
//! | 4 | SB, BB, UTG, BTN |
//! | 5 | SB, BB, UTG, CO, BTN |
//! | 6 | SB, BB, UTG, HJ, CO, BTN |
//! | 7 | SB, BB, UTG, MP, HJ, CO, BTN |
//! | 8 | SB, BB, UTG, UTG+1, MP, HJ, CO, BTN |
//! | 9 | SB, BB, UTG, UTG+1, UTG+2, MP, HJ, CO, BTN |
//!
//! Heads-up the button posts the small blind, so the rotation starts at the
//! dealer and the dealer is labelled `BTN/SB`.

use crate::errors::AdvisorError;
use crate::player::Player;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Smallest table the label table covers.
pub const MIN_SEATS: usize = 2;
/// Largest table the label table covers.
pub const MAX_SEATS: usize = 9;

/// Positional name of a seat for the current hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PositionLabel {
    /// Heads-up button, also posts the small blind
    #[serde(rename = "BTN/SB")]
    ButtonSmallBlind,
    #[serde(rename = "SB")]
    SmallBlind,
    #[serde(rename = "BB")]
    BigBlind,
    /// Under the gun, first to act preflop
    #[serde(rename = "UTG")]
    UnderTheGun,
    #[serde(rename = "UTG+1")]
    UnderTheGun1,
    #[serde(rename = "UTG+2")]
    UnderTheGun2,
    #[serde(rename = "MP")]
    Middle,
    #[serde(rename = "HJ")]
    Hijack,
    #[serde(rename = "CO")]
    Cutoff,
    #[serde(rename = "BTN")]
    Button,
}

impl PositionLabel {
    pub fn short_name(&self) -> &'static str {
        match self {
            PositionLabel::ButtonSmallBlind => "BTN/SB",
            PositionLabel::SmallBlind => "SB",
            PositionLabel::BigBlind => "BB",
            PositionLabel::UnderTheGun => "UTG",
            PositionLabel::UnderTheGun1 => "UTG+1",
            PositionLabel::UnderTheGun2 => "UTG+2",
            PositionLabel::Middle => "MP",
            PositionLabel::Hijack => "HJ",
            PositionLabel::Cutoff => "CO",
            PositionLabel::Button => "BTN",
        }
    }
}

impl fmt::Display for PositionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_name())
    }
}

/// Labels for a table of `seat_count` players, small blind first.
///
/// Returns an empty slice outside `MIN_SEATS..=MAX_SEATS`; callers treat that
/// as "position undeterminable".
pub fn labels_for(seat_count: usize) -> &'static [PositionLabel] {
    use PositionLabel::*;
    match seat_count {
        2 => &[ButtonSmallBlind, BigBlind],
        3 => &[SmallBlind, BigBlind, Button],
        4 => &[SmallBlind, BigBlind, UnderTheGun, Button],
        5 => &[SmallBlind, BigBlind, UnderTheGun, Cutoff, Button],
        6 => &[SmallBlind, BigBlind, UnderTheGun, Hijack, Cutoff, Button],
        7 => &[
            SmallBlind,
            BigBlind,
            UnderTheGun,
            Middle,
            Hijack,
            Cutoff,
            Button,
        ],
        8 => &[
            SmallBlind,
            BigBlind,
            UnderTheGun,
            UnderTheGun1,
            Middle,
            Hijack,
            Cutoff,
            Button,
        ],
        9 => &[
            SmallBlind,
            BigBlind,
            UnderTheGun,
            UnderTheGun1,
            UnderTheGun2,
            Middle,
            Hijack,
            Cutoff,
            Button,
        ],
        _ => &[],
    }
}

/// Index of the seat posting the small blind.
pub fn small_blind_index(seat_count: usize, dealer_index: usize) -> usize {
    match seat_count {
        0 => 0,
        2 => dealer_index % 2,
        n => (dealer_index + 1) % n,
    }
}

/// Cyclic rotation starting at `start`. Rotating by `seats.len()` is the
/// identity.
pub fn rotate<T: Clone>(seats: &[T], start: usize) -> Vec<T> {
    if seats.is_empty() {
        return Vec::new();
    }
    let start = start % seats.len();
    seats[start..]
        .iter()
        .chain(seats[..start].iter())
        .cloned()
        .collect()
}

/// First seat flagged as dealer.
pub fn find_dealer(players: &[Player]) -> Option<usize> {
    players.iter().position(|p| p.is_dealer)
}

/// A seat in betting order with its resolved label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResolvedSeat {
    /// Index into the caller's seat list
    pub index: usize,
    /// `None` when the seat count is outside the label table
    pub label: Option<PositionLabel>,
}

/// Seats rotated so the small blind acts first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeatMap {
    dealer_index: usize,
    seats: Vec<ResolvedSeat>,
}

impl SeatMap {
    pub fn dealer_index(&self) -> usize {
        self.dealer_index
    }

    /// Seats in small-blind-first order.
    pub fn seats(&self) -> &[ResolvedSeat] {
        &self.seats
    }

    pub fn len(&self) -> usize {
        self.seats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seats.is_empty()
    }

    pub fn label_of(&self, index: usize) -> Option<PositionLabel> {
        self.seats
            .iter()
            .find(|s| s.index == index)
            .and_then(|s| s.label)
    }

    /// Labels in rotated order; empty when undeterminable.
    pub fn labels(&self) -> Vec<PositionLabel> {
        self.seats.iter().filter_map(|s| s.label).collect()
    }

    pub fn is_determinable(&self) -> bool {
        !self.seats.is_empty() && self.seats.iter().all(|s| s.label.is_some())
    }
}

/// Rotates `seat_count` seats around `dealer_index` and assigns labels.
///
/// The map holds one entry per seat, so `seat_count` must come from a real
/// seat list or be bounded by the caller. Counts outside the label table
/// yield unlabelled seats.
pub fn resolve_from_dealer(seat_count: usize, dealer_index: usize) -> SeatMap {
    let order: Vec<usize> = (0..seat_count).collect();
    let labels = labels_for(seat_count);
    let seats = rotate(&order, small_blind_index(seat_count, dealer_index))
        .into_iter()
        .enumerate()
        .map(|(i, index)| ResolvedSeat {
            index,
            label: labels.get(i).copied(),
        })
        .collect();
    SeatMap {
        dealer_index,
        seats,
    }
}

/// Resolves every seat's position from the dealer flag.
///
/// If more than one seat claims the button the first one wins; setup
/// validation rejects such tables before they get here.
///
/// # Errors
///
/// [`AdvisorError::NoDealer`] when no seat is flagged as dealer.
///
/// # Examples
///
/// ```
/// use seatread_engine::player::Player;
/// use seatread_engine::position::{resolve, PositionLabel};
///
/// let players = vec![
///     Player::new("Ann", 100, 1),
///     Player::new("Ben", 100, 2).dealer(),
///     Player::new("Cat", 100, 3),
/// ];
/// let seats = resolve(&players).unwrap();
/// assert_eq!(seats.seats()[0].index, 2);
/// assert_eq!(seats.label_of(1), Some(PositionLabel::Button));
/// ```
pub fn resolve(players: &[Player]) -> Result<SeatMap, AdvisorError> {
    let dealer_index = find_dealer(players).ok_or(AdvisorError::NoDealer)?;
    Ok(resolve_from_dealer(players.len(), dealer_index))
}
