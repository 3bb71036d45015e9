use crate::errors::AdvisorError;
use crate::player::Player;
use crate::position::{MAX_SEATS, MIN_SEATS};
use serde::Serialize;

/// Overview of a table accepted by setup.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct TableSummary {
    pub total_players: usize,
    pub total_chips: u64,
    /// 1-based table seat of the button
    pub dealer_seat: u32,
}

/// Checks a table before a hand is created from it.
///
/// Checks run in order and the first failure is returned:
/// - the list is not empty
/// - `MIN_SEATS..=MAX_SEATS` players
/// - exactly one dealer
/// - every name is non-blank and every stack holds chips
///
/// # Examples
///
/// ```
/// use seatread_engine::errors::AdvisorError;
/// use seatread_engine::player::Player;
/// use seatread_engine::validation::validate_players;
///
/// let players = vec![Player::new("Ann", 100, 1).dealer(), Player::new("Ben", 100, 2).dealer()];
/// assert_eq!(
///     validate_players(&players),
///     Err(AdvisorError::DealerCount { found: 2 })
/// );
/// ```
pub fn validate_players(players: &[Player]) -> Result<(), AdvisorError> {
    if players.is_empty() {
        return Err(AdvisorError::EmptyTable);
    }

    let count = players.len();
    if !(MIN_SEATS..=MAX_SEATS).contains(&count) {
        return Err(AdvisorError::SeatCount {
            count,
            min: MIN_SEATS,
            max: MAX_SEATS,
        });
    }

    let dealers = players.iter().filter(|p| p.is_dealer).count();
    if dealers != 1 {
        return Err(AdvisorError::DealerCount { found: dealers });
    }

    for player in players {
        if player.name.trim().is_empty() {
            return Err(AdvisorError::BlankName { seat: player.seat });
        }
        if player.chips == 0 {
            return Err(AdvisorError::NoChips {
                name: player.name.clone(),
            });
        }
    }

    Ok(())
}

/// Validates and summarizes a table in one step.
pub fn summarize(players: &[Player]) -> Result<TableSummary, AdvisorError> {
    validate_players(players)?;
    let dealer_seat = players
        .iter()
        .find(|p| p.is_dealer)
        .map(|p| p.seat)
        .ok_or(AdvisorError::DealerCount { found: 0 })?;
    Ok(TableSummary {
        total_players: players.len(),
        total_chips: players.iter().map(|p| u64::from(p.chips)).sum(),
        dealer_seat,
    })
}
