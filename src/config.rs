//! Board dimensions, fleet composition and construction settings.

/// Width and height of every board.
pub const BOARD_SIZE: usize = 10;
/// Number of ships each side places.
pub const FLEET_SIZE: usize = 5;
pub const MIN_SHIP_SIZE: usize = 1;
pub const MAX_SHIP_SIZE: usize = 5;

/// Ship sizes in placement order. The largest pending ship goes first.
pub const FLEET: [usize; FLEET_SIZE] = [5, 4, 3, 2, 1];

/// Random origins tried for one ship before giving up on the current layout.
pub const PLACEMENT_ATTEMPTS: usize = 1_000;
/// Full fleet layouts tried before random placement reports failure.
pub const FLEET_ATTEMPTS: usize = 16;

/// Total number of cells covered by a full fleet.
pub const TOTAL_SHIP_CELLS: usize = fleet_cells(&FLEET);

const fn fleet_cells(sizes: &[usize]) -> usize {
    let mut total = 0;
    let mut i = 0;
    while i < sizes.len() {
        total += sizes[i];
        i += 1;
    }
    total
}

/// Settings for a single board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardConfig {
    /// Marks the opponent's board. Only affects presentation.
    pub enemy: bool,
    /// Live-ship count a cleared board starts from.
    pub fleet_size: usize,
}

impl BoardConfig {
    pub fn player() -> Self {
        Self {
            enemy: false,
            fleet_size: FLEET_SIZE,
        }
    }

    pub fn enemy() -> Self {
        Self {
            enemy: true,
            fleet_size: FLEET_SIZE,
        }
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self::player()
    }
}

/// Settings for a game session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionConfig {
    /// Fixed RNG seed for reproducible games. `None` draws a fresh seed.
    pub seed: Option<u64>,
}

impl SessionConfig {
    pub fn seeded(seed: u64) -> Self {
        Self { seed: Some(seed) }
    }
}
