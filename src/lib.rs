#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

pub mod ai;
pub mod autopilot;
mod bitboard;
mod board;
mod cell;
#[cfg(feature = "std")]
pub mod cli;
mod common;
mod config;
pub mod events;
mod game;
#[cfg(feature = "std")]
mod logging;
pub mod prelude;
mod ship;

pub use ai::{Mode, Targeting, Volley};
pub use autopilot::{Autopilot, AutoplaySummary};
pub use bitboard::{BitBoard, BitBoardError};
pub use board::*;
pub use cell::*;
pub use common::*;
pub use config::*;
pub use events::{EventLog, EventSink, GameEvent, NullSink, TurnIndicator};
pub use game::*;
#[cfg(feature = "std")]
pub use logging::{init_logging, parse_level, LOG_ENV};
pub use ship::*;
