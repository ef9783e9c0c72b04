//! Commonly used types and utilities for ease of import.

pub use crate::{
    Board, BoardConfig, Coord, EventLog, EventSink, FireReport, GameError, GameEvent, GameSession,
    Orientation, Outcome, Phase, SessionConfig, Ship, ShotResult, Side, Targeting, Turn,
};

#[cfg(feature = "std")]
pub use crate::cli::{parse_command, print_session, Command};
