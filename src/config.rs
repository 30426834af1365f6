//! Game settings shared by the binaries and the controller.
use crate::engine::{DEFAULT_SIZE, DEFAULT_TARGET, MIN_SIZE};
use crate::error::GameError;

/// Number of tiles placed on the board when a game starts.
pub const DEFAULT_START_TILES: usize = 2;

/// Settings for one game session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    /// Width and height of the board.
    pub size: usize,
    /// Tile value that wins the game.
    pub target: u32,
    /// Tiles spawned by `Game::start`.
    pub start_tiles: usize,
    /// Seed for tile spawns. `None` draws from system entropy.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            size: DEFAULT_SIZE,
            target: DEFAULT_TARGET,
            start_tiles: DEFAULT_START_TILES,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Checks that the board is at least `MIN_SIZE` wide and that the target is a
    /// tile value a merge can actually produce (a power of two of at least 4).
    pub fn validate(&self) -> Result<(), GameError> {
        if self.size < MIN_SIZE {
            return Err(GameError::InvalidSize {
                size: self.size,
                min: MIN_SIZE,
            });
        }
        if self.target < 4 || !self.target.is_power_of_two() {
            return Err(GameError::InvalidTarget(self.target));
        }
        Ok(())
    }
}
