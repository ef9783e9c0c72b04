//! Hunt-and-kill targeting for the computer opponent.
//!
//! While no hit is waiting to be followed up, the engine hunts: it fires at a
//! uniformly random cell it has not fired on yet. Every hit is queued. While
//! the queue is non-empty it kills: the oldest queued hit is popped and its
//! orthogonal neighbours are fired on in turn, stopping at the first hit.
//! The remaining neighbours of that hit are not revisited.

use alloc::collections::VecDeque;
use alloc::vec::Vec;
use rand::seq::IndexedRandom;
use rand::Rng;

use crate::bitboard::BitBoard;
use crate::board::Board;
use crate::common::{Coord, GameError, ShotResult};
use crate::config::BOARD_SIZE;

type BB = BitBoard<u128, BOARD_SIZE>;

/// Which strategy produced a volley.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Hunt,
    Kill,
}

/// Shots fired by one targeting step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Volley {
    pub mode: Mode,
    /// The queued hit whose neighbours a kill volley searched.
    pub origin: Option<Coord>,
    pub shots: Vec<(Coord, ShotResult)>,
    /// Whether the enemy keeps firing after this step.
    pub keeps_turn: bool,
}

impl Volley {
    pub fn hits(&self) -> usize {
        self.shots.iter().filter(|(_, r)| r.is_hit()).count()
    }
}

/// Targeting state scoped to one opposing board.
#[derive(Debug, Clone, Default)]
pub struct Targeting {
    fired: BB,
    hunt_queue: VecDeque<Coord>,
    hit_cells: Vec<Coord>,
}

impl Targeting {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cells this engine has fired on.
    pub fn fired(&self) -> BB {
        self.fired
    }

    pub fn has_fired(&self, at: Coord) -> bool {
        self.fired.contains(at)
    }

    /// Hits waiting for their neighbours to be searched, oldest first.
    pub fn hunt_queue(&self) -> &VecDeque<Coord> {
        &self.hunt_queue
    }

    /// Every hit so far, in firing order.
    pub fn hit_cells(&self) -> &[Coord] {
        &self.hit_cells
    }

    pub fn mode(&self) -> Mode {
        if self.hunt_queue.is_empty() {
            Mode::Hunt
        } else {
            Mode::Kill
        }
    }

    /// Forget all targeting history.
    pub fn reset(&mut self) {
        self.fired.clear_all();
        self.hunt_queue.clear();
        self.hit_cells.clear();
    }

    /// Take one targeting step against `board`.
    pub fn step<R: Rng + ?Sized>(
        &mut self,
        board: &mut Board,
        rng: &mut R,
    ) -> Result<Volley, GameError> {
        match self.mode() {
            Mode::Hunt => self.hunt(board, rng),
            Mode::Kill => self.kill(board),
        }
    }

    fn hunt<R: Rng + ?Sized>(
        &mut self,
        board: &mut Board,
        rng: &mut R,
    ) -> Result<Volley, GameError> {
        let candidates: Vec<Coord> = Coord::all().filter(|c| !self.has_fired(*c)).collect();
        let Some(&target) = candidates.choose(rng) else {
            log::warn!("no unfired cells left to hunt");
            return Ok(Volley {
                mode: Mode::Hunt,
                origin: None,
                shots: Vec::new(),
                keeps_turn: false,
            });
        };
        let result = self.fire_at(board, target)?;
        log::debug!("hunt shot at ({}, {}): {:?}", target.x, target.y, result);
        Ok(Volley {
            mode: Mode::Hunt,
            origin: None,
            shots: alloc::vec![(target, result)],
            keeps_turn: result.is_hit(),
        })
    }

    fn kill(&mut self, board: &mut Board) -> Result<Volley, GameError> {
        let mut shots = Vec::new();
        let Some(origin) = self.hunt_queue.pop_front() else {
            return Ok(Volley {
                mode: Mode::Kill,
                origin: None,
                shots,
                keeps_turn: true,
            });
        };
        for next in origin.neighbors() {
            if self.has_fired(next) {
                continue;
            }
            let result = self.fire_at(board, next)?;
            log::debug!(
                "kill shot at ({}, {}) around ({}, {}): {:?}",
                next.x,
                next.y,
                origin.x,
                origin.y,
                result
            );
            shots.push((next, result));
            if result.is_hit() {
                break;
            }
        }
        // a volley with no shots leaves the turn with the enemy
        let keeps_turn = shots.last().map_or(true, |(_, r)| r.is_hit());
        Ok(Volley {
            mode: Mode::Kill,
            origin: Some(origin),
            shots,
            keeps_turn,
        })
    }

    fn fire_at(&mut self, board: &mut Board, at: Coord) -> Result<ShotResult, GameError> {
        self.fired.set(at)?;
        let result = board.fire(at.x, at.y)?;
        if result.is_hit() {
            self.hit_cells.push(at);
            self.hunt_queue.push_back(at);
        }
        Ok(result)
    }
}
