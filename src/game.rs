//! Game session: setup, turn order, win detection, pause and restart.

use alloc::boxed::Box;
use alloc::vec::Vec;
use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::ai::Targeting;
use crate::board::Board;
use crate::common::{Coord, GameError, Outcome, ShotResult, Side};
use crate::config::{BoardConfig, SessionConfig, FLEET, MAX_SHIP_SIZE, MIN_SHIP_SIZE};
use crate::events::{EventSink, GameEvent, NullSink, TurnIndicator};
use crate::ship::{Orientation, Ship};

/// Lifecycle of a session. Pausing is tracked separately and can overlay
/// any phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// The player is placing ships.
    Setup,
    Playing,
    Finished(Outcome),
}

/// Whose shot is next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Turn {
    Player,
    Enemy,
}

/// A shot the computer fired in response to a player miss.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize))]
pub struct EnemyShot {
    pub x: usize,
    pub y: usize,
    pub result: ShotResult,
}

/// Outcome of a player shot, including the enemy's reply.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(serde::Serialize))]
pub struct FireReport {
    pub hit: bool,
    pub ship_sunk: bool,
    pub game_over: bool,
    pub winner: Option<Side>,
    /// Shots taken by the enemy before the turn came back, in order.
    pub enemy_shots: Vec<EnemyShot>,
}

/// One game between the player and the computer.
pub struct GameSession {
    player_board: Board,
    enemy_board: Board,
    targeting: Targeting,
    rng: SmallRng,
    seed: Option<u64>,
    pending: Vec<usize>,
    phase: Phase,
    paused: bool,
    turn: Turn,
    sink: Box<dyn EventSink>,
}

fn make_rng(seed: Option<u64>) -> SmallRng {
    match seed {
        Some(s) => SmallRng::seed_from_u64(s),
        #[cfg(feature = "std")]
        None => SmallRng::from_rng(&mut rand::rng()),
        #[cfg(not(feature = "std"))]
        None => SmallRng::seed_from_u64(0),
    }
}

impl GameSession {
    /// New session in the setup phase with no event sink.
    pub fn new(config: SessionConfig) -> Self {
        Self::with_sink(config, Box::new(NullSink))
    }

    pub fn with_sink(config: SessionConfig, sink: Box<dyn EventSink>) -> Self {
        GameSession {
            player_board: Board::new(BoardConfig::player()),
            enemy_board: Board::new(BoardConfig::enemy()),
            targeting: Targeting::new(),
            rng: make_rng(config.seed),
            seed: config.seed,
            pending: FLEET.to_vec(),
            phase: Phase::Setup,
            paused: false,
            turn: Turn::Player,
            sink,
        }
    }

    /// Replace the event sink.
    pub fn set_sink(&mut self, sink: Box<dyn EventSink>) {
        self.sink = sink;
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn turn(&self) -> Turn {
        self.turn
    }

    pub fn outcome(&self) -> Option<Outcome> {
        match self.phase {
            Phase::Finished(outcome) => Some(outcome),
            _ => None,
        }
    }

    /// Seed the session RNG was created from, if one was fixed.
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Number of player ships still to place.
    pub fn ships_to_place(&self) -> usize {
        self.pending.len()
    }

    /// Sizes still to place, largest first.
    pub fn pending_sizes(&self) -> &[usize] {
        &self.pending
    }

    /// Size the next [`place_next_ship`](Self::place_next_ship) call uses.
    pub fn next_ship_size(&self) -> Option<usize> {
        self.pending.first().copied()
    }

    pub fn player_board(&self) -> &Board {
        &self.player_board
    }

    pub fn enemy_board(&self) -> &Board {
        &self.enemy_board
    }

    pub fn targeting(&self) -> &Targeting {
        &self.targeting
    }

    fn emit(&mut self, event: GameEvent) {
        self.sink.notify(&event);
    }

    fn indicator(&self) -> TurnIndicator {
        if self.paused {
            TurnIndicator::Paused
        } else {
            match self.turn {
                Turn::Player => TurnIndicator::Player,
                Turn::Enemy => TurnIndicator::Enemy,
            }
        }
    }

    fn set_turn(&mut self, turn: Turn) {
        self.turn = turn;
        let indicator = self.indicator();
        self.emit(GameEvent::TurnChanged(indicator));
    }

    /// Place a player ship of `size` during setup.
    ///
    /// Each fleet size can be placed once. Returns `Ok(false)` outside setup,
    /// while paused, for a size already placed, or for an invalid position.
    /// Placing the last ship lays out the enemy fleet and starts the game. If
    /// that layout fails the error is returned and setup is left unchanged.
    pub fn place_player_ship(
        &mut self,
        size: usize,
        orientation: Orientation,
        x: usize,
        y: usize,
    ) -> Result<bool, GameError> {
        if !(MIN_SHIP_SIZE..=MAX_SHIP_SIZE).contains(&size) {
            return Err(GameError::InvalidShipSize { size });
        }
        if self.phase != Phase::Setup || self.paused {
            return Ok(false);
        }
        let Some(slot) = self.pending.iter().position(|&s| s == size) else {
            log::debug!("ship of size {} already placed", size);
            return Ok(false);
        };
        let ship = Ship::new(size, orientation)?;
        if !self.player_board.can_place(&ship, x, y) {
            log::debug!("rejected size {} ship at ({}, {})", size, x, y);
            return Ok(false);
        }
        // the enemy fleet goes down before the last player ship so a failed
        // layout leaves setup exactly as it was
        let last = self.pending.len() == 1;
        if last {
            self.enemy_board.place_fleet_randomly(&mut self.rng, &FLEET)?;
        }
        if !self.player_board.place_ship(ship, x, y)? {
            self.enemy_board.clear();
            return Ok(false);
        }
        self.pending.remove(slot);
        self.emit(GameEvent::ShipPlaced {
            side: Side::Player,
            size,
            orientation,
            x,
            y,
        });
        if last {
            self.start_game();
        }
        Ok(true)
    }

    /// Place the largest pending ship.
    pub fn place_next_ship(
        &mut self,
        orientation: Orientation,
        x: usize,
        y: usize,
    ) -> Result<bool, GameError> {
        match self.next_ship_size() {
            Some(size) => self.place_player_ship(size, orientation, x, y),
            None => Ok(false),
        }
    }

    fn start_game(&mut self) {
        self.phase = Phase::Playing;
        log::info!("all ships placed, game started");
        self.emit(GameEvent::GameStarted);
        self.set_turn(Turn::Player);
    }

    /// Fire at the enemy board.
    ///
    /// Returns `Ok(None)` if the shot is not accepted: the game is not
    /// running, it is paused, it is not the player's turn, or the cell was
    /// already shot. A miss hands the turn to the computer, which fires until
    /// it misses or wins before this call returns.
    pub fn fire_at_enemy(&mut self, x: usize, y: usize) -> Result<Option<FireReport>, GameError> {
        if self.phase != Phase::Playing || self.paused || self.turn != Turn::Player {
            return Ok(None);
        }
        let result = self.enemy_board.fire(x, y)?;
        if result == ShotResult::AlreadyShot {
            return Ok(None);
        }
        log::info!("player fired at ({}, {}): {:?}", x, y, result);
        self.emit(GameEvent::CellChanged {
            side: Side::Enemy,
            x,
            y,
            hit: result.is_hit(),
            ship_sunk: result == ShotResult::Sunk,
        });

        let mut enemy_shots = Vec::new();
        if self.enemy_board.ships_remaining() == 0 {
            self.finish(Outcome::Win);
        } else if !result.is_hit() {
            self.set_turn(Turn::Enemy);
            enemy_shots = self.enemy_turn()?;
        }

        let outcome = self.outcome();
        Ok(Some(FireReport {
            hit: result.is_hit(),
            ship_sunk: result == ShotResult::Sunk,
            game_over: outcome.is_some(),
            winner: outcome.map(|o| o.winner()),
            enemy_shots,
        }))
    }

    /// Let the computer fire until it misses or sinks the last player ship.
    fn enemy_turn(&mut self) -> Result<Vec<EnemyShot>, GameError> {
        let mut shots = Vec::new();
        loop {
            let volley = self.targeting.step(&mut self.player_board, &mut self.rng)?;
            for &(at, result) in &volley.shots {
                self.record_enemy_shot(at, result);
                shots.push(EnemyShot {
                    x: at.x,
                    y: at.y,
                    result,
                });
            }
            if self.player_board.ships_remaining() == 0 {
                self.finish(Outcome::Lose);
                return Ok(shots);
            }
            if !volley.keeps_turn {
                break;
            }
        }
        self.set_turn(Turn::Player);
        Ok(shots)
    }

    fn record_enemy_shot(&mut self, at: Coord, result: ShotResult) {
        log::info!("enemy fired at ({}, {}): {:?}", at.x, at.y, result);
        self.emit(GameEvent::CellChanged {
            side: Side::Player,
            x: at.x,
            y: at.y,
            hit: result.is_hit(),
            ship_sunk: result == ShotResult::Sunk,
        });
    }

    fn finish(&mut self, outcome: Outcome) {
        self.phase = Phase::Finished(outcome);
        match outcome {
            Outcome::Win => log::info!("You Win!"),
            Outcome::Lose => log::info!("You Lose!"),
        }
        self.emit(GameEvent::GameEnded(outcome));
    }

    /// Freeze shot processing. Returns `false` if already paused.
    pub fn pause(&mut self) -> bool {
        if self.paused {
            return false;
        }
        self.paused = true;
        log::info!("game paused");
        self.emit(GameEvent::TurnChanged(TurnIndicator::Paused));
        true
    }

    /// Resume shot processing. Returns `false` if not paused.
    pub fn resume(&mut self) -> bool {
        if !self.paused {
            return false;
        }
        self.paused = false;
        log::info!("game resumed");
        let indicator = self.indicator();
        self.emit(GameEvent::TurnChanged(indicator));
        true
    }

    /// Flip the pause state and return the new value.
    pub fn toggle_pause(&mut self) -> bool {
        if self.paused {
            self.resume();
        } else {
            self.pause();
        }
        self.paused
    }

    /// Clear both boards and the targeting state and return to setup.
    pub fn restart(&mut self) {
        log::info!("restarting game");
        self.pending = FLEET.to_vec();
        self.phase = Phase::Setup;
        self.paused = false;
        self.turn = Turn::Player;
        self.targeting.reset();
        self.player_board.clear();
        self.enemy_board.clear();
        self.emit(GameEvent::Restarted);
        self.emit(GameEvent::TurnChanged(TurnIndicator::Player));
    }

    /// Restart with the RNG reseeded from `seed`.
    pub fn restart_with_seed(&mut self, seed: u64) {
        self.seed = Some(seed);
        self.rng = SmallRng::seed_from_u64(seed);
        self.restart();
    }
}
