//! `positions`: seat order and labels for a table size.
//!
//! ```text
//! $ seatread positions --seats 6 --dealer 3
//! Seat 4: SB
//! Seat 5: BB
//! Seat 6: UTG
//! Seat 1: HJ
//! Seat 2: CO
//! Seat 3: BTN (dealer)
//! ```

use crate::error::CliError;
use crate::ui;
use seatread_engine::position::{self, MAX_SEATS, MIN_SEATS};
use std::io::Write;

/// Largest table the command will list, labelled or not.
pub const MAX_LISTED_SEATS: usize = MAX_SEATS * 4;

pub fn handle_positions_command(
    seats: usize,
    dealer: usize,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    if seats == 0 || seats > MAX_LISTED_SEATS {
        return Err(CliError::InvalidInput(format!(
            "seats must be between 1 and {MAX_LISTED_SEATS}, got {seats}"
        )));
    }
    if dealer == 0 || dealer > seats {
        return Err(CliError::InvalidInput(format!(
            "dealer must be a seat between 1 and {seats}, got {dealer}"
        )));
    }

    let map = position::resolve_from_dealer(seats, dealer - 1);
    if !map.is_determinable() {
        ui::display_warning(
            err,
            &format!(
                "no position labels for {seats} seats (supported: {MIN_SEATS}-{MAX_SEATS})"
            ),
        )?;
    }

    for seat in map.seats() {
        let label = seat.label.map_or("?", |l| l.short_name());
        write!(out, "Seat {}: {}", seat.index + 1, label)?;
        if seat.index == map.dealer_index() {
            write!(out, " (dealer)")?;
        }
        writeln!(out)?;
    }
    Ok(())
}
