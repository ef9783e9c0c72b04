//! A single board position.

use crate::common::{Coord, ShotResult};
use crate::ship::{Ship, ShipId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    x: usize,
    y: usize,
    occupant: Option<ShipId>,
    was_shot: bool,
}

impl Cell {
    pub fn new(x: usize, y: usize) -> Self {
        Cell {
            x,
            y,
            occupant: None,
            was_shot: false,
        }
    }

    pub fn coord(&self) -> Coord {
        Coord::new(self.x, self.y)
    }

    /// The ship covering this cell, if any. The board owns the ship itself.
    pub fn occupant(&self) -> Option<ShipId> {
        self.occupant
    }

    pub fn is_occupied(&self) -> bool {
        self.occupant.is_some()
    }

    pub fn was_shot(&self) -> bool {
        self.was_shot
    }

    pub(crate) fn set_occupant(&mut self, ship: Option<ShipId>) {
        self.occupant = ship;
    }

    /// Fire at this cell, hitting the occupant in `ships` if present.
    ///
    /// The cell is marked as shot unconditionally and a repeat call hits the
    /// ship again, so callers check [`was_shot`](Self::was_shot) first.
    /// `Sunk` is only returned for the hit that takes the ship from alive to
    /// sunk.
    pub fn fire(&mut self, ships: &mut [Ship]) -> ShotResult {
        self.was_shot = true;
        let Some(ship) = self.occupant.and_then(|ShipId(i)| ships.get_mut(i)) else {
            log::debug!("no ship hit at ({}, {})", self.x, self.y);
            return ShotResult::Miss;
        };
        let was_alive = ship.is_alive();
        ship.hit();
        log::debug!("ship hit at ({}, {})", self.x, self.y);
        if was_alive && !ship.is_alive() {
            ShotResult::Sunk
        } else {
            ShotResult::Hit
        }
    }

    /// Forget the occupant and shot state.
    pub fn reset(&mut self) {
        self.occupant = None;
        self.was_shot = false;
    }
}
