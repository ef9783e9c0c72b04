//! Game board: a 10×10 grid of cells plus the ships placed on it.

use alloc::vec::Vec;
use core::fmt;
use rand::Rng;

use crate::bitboard::BitBoard;
use crate::cell::Cell;
use crate::common::{Coord, GameError, ShotResult};
use crate::config::{BoardConfig, BOARD_SIZE, FLEET_ATTEMPTS, PLACEMENT_ATTEMPTS};
use crate::ship::{Orientation, Ship, ShipId};

type BB = BitBoard<u128, BOARD_SIZE>;

/// Main board state: cells, placed ships and the live-ship counter.
pub struct Board {
    cells: [[Cell; BOARD_SIZE]; BOARD_SIZE],
    ships: Vec<Ship>,
    enemy: bool,
    fleet_size: usize,
    ships_remaining: usize,
}

impl Board {
    /// Create an empty board.
    pub fn new(config: BoardConfig) -> Self {
        let cells = core::array::from_fn(|y| core::array::from_fn(|x| Cell::new(x, y)));
        Board {
            cells,
            ships: Vec::with_capacity(config.fleet_size),
            enemy: config.enemy,
            fleet_size: config.fleet_size,
            ships_remaining: config.fleet_size,
        }
    }

    pub fn is_enemy(&self) -> bool {
        self.enemy
    }

    pub fn fleet_size(&self) -> usize {
        self.fleet_size
    }

    /// Number of ships not yet sunk. Starts at the fleet size, not at the
    /// number of ships actually placed.
    pub fn ships_remaining(&self) -> usize {
        self.ships_remaining
    }

    /// Ships placed so far, in placement order.
    pub fn ships(&self) -> &[Ship] {
        &self.ships
    }

    pub fn ship(&self, id: ShipId) -> Option<&Ship> {
        self.ships.get(id.0)
    }

    /// The cell at (`x`, `y`).
    pub fn cell(&self, x: usize, y: usize) -> Result<&Cell, GameError> {
        self.cells
            .get(y)
            .and_then(|row| row.get(x))
            .ok_or(GameError::IndexOutOfRange { x, y })
    }

    fn cell_mut(&mut self, x: usize, y: usize) -> Result<&mut Cell, GameError> {
        self.cells
            .get_mut(y)
            .and_then(|row| row.get_mut(x))
            .ok_or(GameError::IndexOutOfRange { x, y })
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter().flatten()
    }

    /// Mask of every occupied cell.
    pub fn occupancy(&self) -> BB {
        self.mask_where(Cell::is_occupied)
    }

    /// Mask of every cell that has been fired on.
    pub fn shots(&self) -> BB {
        self.mask_where(Cell::was_shot)
    }

    fn mask_where(&self, pred: impl Fn(&Cell) -> bool) -> BB {
        let mut mask = BB::new();
        for cell in self.cells().filter(|c| pred(c)) {
            // cell coordinates always lie on the board
            let _ = mask.set(cell.coord());
        }
        mask
    }

    fn occupied(&self, at: Coord) -> bool {
        self.cells[at.y][at.x].is_occupied()
    }

    /// Returns `true` if `ship` fits at (`x`, `y`): inside the board, on free
    /// cells, and not orthogonally touching another ship.
    pub fn can_place(&self, ship: &Ship, x: usize, y: usize) -> bool {
        let Some(mut span) = ship.span(Coord::new(x, y)) else {
            return false;
        };
        span.all(|at| !self.occupied(at) && at.neighbors().all(|n| !self.occupied(n)))
    }

    /// Place `ship` with its first segment at (`x`, `y`).
    ///
    /// Returns `Ok(false)` without touching the board if the placement is
    /// invalid. Errors only on an internal fault while committing.
    pub fn place_ship(&mut self, ship: Ship, x: usize, y: usize) -> Result<bool, GameError> {
        log::debug!(
            "attempting to place size {} {:?} ship at ({}, {})",
            ship.size(),
            ship.orientation(),
            x,
            y
        );
        if !self.can_place(&ship, x, y) {
            log::debug!("invalid ship placement at ({}, {})", x, y);
            return Ok(false);
        }
        // placed ships start undamaged whatever was done to the value passed in
        let ship = Ship::new(ship.size(), ship.orientation())?;
        let span: Vec<Coord> = ship
            .span(Coord::new(x, y))
            .ok_or(GameError::ShipPlacement { x, y })?
            .collect();
        let id = ShipId(self.ships.len());
        for at in span {
            self.cell_mut(at.x, at.y)
                .map_err(|_| GameError::ShipPlacement { x, y })?
                .set_occupant(Some(id));
        }
        self.ships.push(ship);
        log::info!("ship of size {} placed at ({}, {})", ship.size(), x, y);
        Ok(true)
    }

    /// Random valid (origin, orientation) for a ship of `size`, leaving the
    /// board untouched.
    pub fn random_placement<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        size: usize,
    ) -> Result<(Coord, Orientation), GameError> {
        // validates the size before sampling
        Ship::new(size, Orientation::Horizontal)?;
        for _ in 0..PLACEMENT_ATTEMPTS {
            let x = rng.random_range(0..BOARD_SIZE);
            let y = rng.random_range(0..BOARD_SIZE);
            let orientation = if rng.random() {
                Orientation::Vertical
            } else {
                Orientation::Horizontal
            };
            let ship = Ship::new(size, orientation)?;
            if self.can_place(&ship, x, y) {
                return Ok((Coord::new(x, y), orientation));
            }
        }
        Err(GameError::UnableToPlaceShip { size })
    }

    /// Place one ship of every size in `sizes` at random.
    ///
    /// The board is cleared first. If a layout gets stuck it is cleared
    /// again and the whole fleet is placed again. On error the board is left
    /// empty.
    pub fn place_fleet_randomly<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        sizes: &[usize],
    ) -> Result<(), GameError> {
        let mut stuck = None;
        for attempt in 0..FLEET_ATTEMPTS {
            if attempt > 0 {
                log::debug!("random fleet layout attempt {}", attempt + 1);
            }
            self.clear();
            match self.try_place_fleet(rng, sizes) {
                Ok(()) => return Ok(()),
                Err(GameError::UnableToPlaceShip { size }) => stuck = Some(size),
                Err(e) => {
                    self.clear();
                    return Err(e);
                }
            }
        }
        self.clear();
        log::warn!("gave up on random fleet layout after {} attempts", FLEET_ATTEMPTS);
        Err(GameError::UnableToPlaceShip {
            size: stuck.unwrap_or_default(),
        })
    }

    fn try_place_fleet<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        sizes: &[usize],
    ) -> Result<(), GameError> {
        for &size in sizes {
            let (at, orientation) = self.random_placement(rng, size)?;
            if !self.place_ship(Ship::new(size, orientation)?, at.x, at.y)? {
                return Err(GameError::ShipPlacement { x: at.x, y: at.y });
            }
        }
        Ok(())
    }

    /// Fire at (`x`, `y`). A cell that was already shot is left unchanged.
    pub fn fire(&mut self, x: usize, y: usize) -> Result<ShotResult, GameError> {
        let cell = self
            .cells
            .get_mut(y)
            .and_then(|row| row.get_mut(x))
            .ok_or(GameError::IndexOutOfRange { x, y })?;
        if cell.was_shot() {
            return Ok(ShotResult::AlreadyShot);
        }
        let result = cell.fire(&mut self.ships);
        if result == ShotResult::Sunk {
            self.ships_remaining = self.ships_remaining.saturating_sub(1);
            log::info!(
                "ship sunk at ({}, {}), {} remaining",
                x,
                y,
                self.ships_remaining
            );
        }
        Ok(result)
    }

    /// Remove every ship and shot, and reset the live-ship counter.
    pub fn clear(&mut self) {
        self.cells.iter_mut().flatten().for_each(Cell::reset);
        self.ships.clear();
        self.ships_remaining = self.fleet_size;
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Board {{\n  enemy: {},\n  ships_remaining: {},\n  occupancy: {:?},\n  shots: {:?},\n  ships: {:?}\n}}",
            self.enemy,
            self.ships_remaining,
            self.occupancy(),
            self.shots(),
            self.ships
        )
    }
}
