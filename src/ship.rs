//! Ship definitions: size, orientation and remaining health.

use crate::common::{Coord, GameError};
use crate::config::{MAX_SHIP_SIZE, MIN_SHIP_SIZE};

/// Orientation of a ship on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize))]
pub enum Orientation {
    Horizontal,
    Vertical,
}

impl Orientation {
    /// Unit step along the ship's axis as `(dx, dy)`.
    pub fn step(&self) -> (usize, usize) {
        match self {
            Orientation::Horizontal => (1, 0),
            Orientation::Vertical => (0, 1),
        }
    }
}

/// Index of a placed ship within its board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShipId(pub usize);

/// A ship of fixed size. Health starts at the size and drops by one per hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ship {
    size: usize,
    orientation: Orientation,
    health: usize,
}

impl Ship {
    /// Create a ship at full health.
    pub fn new(size: usize, orientation: Orientation) -> Result<Self, GameError> {
        if !(MIN_SHIP_SIZE..=MAX_SHIP_SIZE).contains(&size) {
            return Err(GameError::InvalidShipSize { size });
        }
        Ok(Ship {
            size,
            orientation,
            health: size,
        })
    }

    /// Register a hit. Already sunk ships are left unchanged.
    pub fn hit(&mut self) {
        if self.is_alive() {
            self.health -= 1;
        }
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn health(&self) -> usize {
        self.health
    }

    /// Cells the ship would cover with its first segment at `origin`.
    ///
    /// Returns `None` if any segment falls off the board.
    pub fn span(&self, origin: Coord) -> Option<impl Iterator<Item = Coord>> {
        let (dx, dy) = self.orientation.step();
        let last = Coord::new(
            origin.x.checked_add(dx * (self.size - 1))?,
            origin.y.checked_add(dy * (self.size - 1))?,
        );
        if !origin.in_bounds() || !last.in_bounds() {
            return None;
        }
        Some((0..self.size).map(move |i| Coord::new(origin.x + i * dx, origin.y + i * dy)))
    }
}
