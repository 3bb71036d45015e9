use serde::Serialize;
use thiserror::Error;

/// Coarse classification of an [`AdvisorError`].
///
/// Collaborators map the kind to a response (HTTP status, exit code) without
/// matching on every variant.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Table rejected at setup; no session was created
    Validation,
    /// Dealer seat could not be located while resolving positions
    Resolution,
    /// A field the scene description needs is missing
    Render,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AdvisorError {
    #[error("No player data supplied")]
    EmptyTable,
    #[error("Table must seat between {min} and {max} players, got {count}")]
    SeatCount {
        count: usize,
        min: usize,
        max: usize,
    },
    #[error("Exactly one dealer is required, found {found}")]
    DealerCount { found: usize },
    #[error("Player {name} must have more than 0 chips")]
    NoChips { name: String },
    #[error("Player name at seat {seat} must not be blank")]
    BlankName { seat: u32 },
    #[error("Position unknown: no seat is marked as dealer")]
    NoDealer,
    #[error("Cannot render scene: missing {0}")]
    MissingField(String),
    #[error("Cannot render scene: {0}")]
    Format(#[from] std::fmt::Error),
}

impl AdvisorError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AdvisorError::EmptyTable
            | AdvisorError::SeatCount { .. }
            | AdvisorError::DealerCount { .. }
            | AdvisorError::NoChips { .. }
            | AdvisorError::BlankName { .. } => ErrorKind::Validation,
            AdvisorError::NoDealer => ErrorKind::Resolution,
            AdvisorError::MissingField(_) | AdvisorError::Format(_) => ErrorKind::Render,
        }
    }
}
