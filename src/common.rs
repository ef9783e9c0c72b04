//! Common types for the engine: coordinates, shot results and errors.

use crate::bitboard::BitBoardError;
use crate::config::{BOARD_SIZE, MAX_SHIP_SIZE, MIN_SHIP_SIZE};

/// A position on a board. `x` is the column, `y` the row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "std", derive(serde::Serialize))]
pub struct Coord {
    pub x: usize,
    pub y: usize,
}

impl Coord {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Returns `true` if the coordinate lies on the board.
    pub fn in_bounds(&self) -> bool {
        self.x < BOARD_SIZE && self.y < BOARD_SIZE
    }

    /// In-bounds orthogonal neighbours, in the order left, right, up, down.
    pub fn neighbors(self) -> impl Iterator<Item = Coord> {
        let Coord { x, y } = self;
        [
            x.checked_sub(1).map(|nx| Coord::new(nx, y)),
            x.checked_add(1).map(|nx| Coord::new(nx, y)),
            y.checked_sub(1).map(|ny| Coord::new(x, ny)),
            y.checked_add(1).map(|ny| Coord::new(x, ny)),
        ]
        .into_iter()
        .flatten()
        .filter(Coord::in_bounds)
    }

    /// Iterator over every coordinate of the board in row-major order.
    pub fn all() -> impl Iterator<Item = Coord> {
        (0..BOARD_SIZE).flat_map(|y| (0..BOARD_SIZE).map(move |x| Coord::new(x, y)))
    }
}

impl From<(usize, usize)> for Coord {
    fn from((x, y): (usize, usize)) -> Self {
        Coord::new(x, y)
    }
}

/// Result of firing at a board position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize))]
pub enum ShotResult {
    /// Nothing occupied the cell.
    Miss,
    /// Hit a ship that is still afloat.
    Hit,
    /// Hit the last live segment of a ship.
    Sunk,
    /// The cell had already been fired on; nothing changed.
    AlreadyShot,
}

impl ShotResult {
    /// `true` for both `Hit` and `Sunk`.
    pub fn is_hit(&self) -> bool {
        matches!(self, ShotResult::Hit | ShotResult::Sunk)
    }
}

/// One of the two participants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize))]
pub enum Side {
    Player,
    Enemy,
}

/// Final result of a game, from the human player's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize))]
pub enum Outcome {
    Win,
    Lose,
}

impl Outcome {
    pub fn winner(&self) -> Side {
        match self {
            Outcome::Win => Side::Player,
            Outcome::Lose => Side::Enemy,
        }
    }
}

/// Errors returned by engine operations.
///
/// Ordinary gameplay outcomes such as an invalid placement or a repeated
/// shot are reported through return values, never through this type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    /// Underlying bitboard error.
    BitBoard(BitBoardError),
    /// Ship size outside the supported range.
    InvalidShipSize { size: usize },
    /// Unexpected fault while committing a validated placement.
    ShipPlacement { x: usize, y: usize },
    /// Cell access outside the board.
    IndexOutOfRange { x: usize, y: usize },
    /// Random placement could not fit the ship.
    UnableToPlaceShip { size: usize },
}

impl From<BitBoardError> for GameError {
    fn from(err: BitBoardError) -> Self {
        GameError::BitBoard(err)
    }
}

impl core::fmt::Display for GameError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            GameError::BitBoard(e) => write!(f, "BitBoard error: {}", e),
            GameError::InvalidShipSize { size } => {
                write!(
                    f,
                    "Invalid ship size {} (expected {} to {})",
                    size, MIN_SHIP_SIZE, MAX_SHIP_SIZE
                )
            }
            GameError::ShipPlacement { x, y } => {
                write!(f, "Error placing ship at ({}, {})", x, y)
            }
            GameError::IndexOutOfRange { x, y } => {
                write!(f, "Cell ({}, {}) is out of range", x, y)
            }
            GameError::UnableToPlaceShip { size } => {
                write!(f, "Unable to place ship of size {}", size)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for GameError {}
