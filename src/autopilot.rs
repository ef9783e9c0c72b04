//! Random driver for the player's side of a session.
//!
//! Used by the simulator and the `watch` command to play full games without
//! input: the fleet is placed at random and shots go to random unshot cells.

use alloc::vec::Vec;
use rand::rngs::SmallRng;
use rand::seq::IndexedRandom;
use rand::SeedableRng;

use crate::common::{Coord, GameError, Outcome};
use crate::game::{FireReport, GameSession, Phase};

/// Totals for one automatically played game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize))]
pub struct AutoplaySummary {
    /// `None` if the game was left unfinished.
    pub outcome: Option<Outcome>,
    pub player_shots: usize,
    pub enemy_shots: usize,
}

pub struct Autopilot {
    rng: SmallRng,
}

impl Autopilot {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Place every pending player ship at a random valid position.
    pub fn place_fleet(&mut self, session: &mut GameSession) -> Result<(), GameError> {
        while let Some(size) = session.next_ship_size() {
            let (at, orientation) = session
                .player_board()
                .random_placement(&mut self.rng, size)?;
            if !session.place_player_ship(size, orientation, at.x, at.y)? {
                return Err(GameError::ShipPlacement { x: at.x, y: at.y });
            }
        }
        Ok(())
    }

    /// A random cell of the enemy board that has not been shot yet.
    pub fn pick_target(&mut self, session: &GameSession) -> Option<Coord> {
        let open: Vec<Coord> = session
            .enemy_board()
            .cells()
            .filter(|c| !c.was_shot())
            .map(|c| c.coord())
            .collect();
        open.choose(&mut self.rng).copied()
    }

    /// Play `session` from setup until it finishes or stops accepting shots.
    pub fn play_out(&mut self, session: &mut GameSession) -> Result<AutoplaySummary, GameError> {
        self.place_fleet(session)?;
        let mut player_shots = 0;
        let mut enemy_shots = 0;
        while session.phase() == Phase::Playing {
            let Some(target) = self.pick_target(session) else {
                break;
            };
            let Some(FireReport {
                enemy_shots: reply, ..
            }) = session.fire_at_enemy(target.x, target.y)?
            else {
                // paused sessions reject shots
                break;
            };
            player_shots += 1;
            enemy_shots += reply.len();
        }
        Ok(AutoplaySummary {
            outcome: session.outcome(),
            player_shots,
            enemy_shots,
        })
    }
}
