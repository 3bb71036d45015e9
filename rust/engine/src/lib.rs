//! # seatread-engine: Hold'em Scene Description Core
//!
//! Turns a snapshot of a live Texas Hold'em hand (seats, stacks, bets and
//! community cards) into a structured text description for an advice
//! generator. No I/O happens here apart from the optional prompt log writer.
//!
//! ## Core Modules
//!
//! - [`position`] - Seat labels relative to the button and small-blind-first rotation
//! - [`stage`] - Betting round classification from the board
//! - [`prompt`] - Scene description rendering and the per-hand prompt phase
//! - [`session`] - Per-table hand state: setup, advice, reset
//! - [`validation`] - Setup-time table checks
//! - [`player`] - Seat records as sent by the table client
//! - [`board`] - Community cards
//! - [`logger`] - JSONL prompt log
//! - [`errors`] - Error taxonomy (validation, resolution, render)
//!
//! ## Quick Start
//!
//! ```rust
//! use seatread_engine::board::CommunityCards;
//! use seatread_engine::player::Player;
//! use seatread_engine::session::HandAdvisor;
//! use seatread_engine::stage::Stage;
//!
//! let players = vec![
//!     Player::new("Hero", 500, 1).with_hole_cards("SA", "SK"),
//!     Player::new("Villain", 480, 2).dealer(),
//!     Player::new("Fish", 300, 3),
//! ];
//!
//! let mut advisor = HandAdvisor::new();
//! let summary = advisor.setup(players.clone()).expect("valid table");
//! assert_eq!(summary.total_players, 3);
//!
//! let board = CommunityCards::preflop().with_flop(["HA", "D7", "C2"]);
//! let advice = advisor.advise(players, &board).expect("render");
//! assert_eq!(advice.stage, Stage::Flop);
//! assert!(advice.prompt.contains("Flop: HA D7 C2"));
//! ```

pub mod board;
pub mod errors;
pub mod logger;
pub mod player;
pub mod position;
pub mod prompt;
pub mod session;
pub mod stage;
pub mod validation;
