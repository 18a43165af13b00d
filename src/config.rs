//! Game configuration: grid extents, fleet composition, and rule toggles.
//!
//! A `GameConfig` is handed to the fleets once at construction and never
//! changes afterwards. Horizontal coordinates are read as letters, so the
//! width must not exceed the alphabet; neither extent should be smaller
//! than 2.

use crate::common::GameError;

/// Ship class names by length, matching the traditional fleet roster.
pub const SHIP_CLASS_NAMES: [&str; 5] = [
    "Lord of War",
    "Destroyer",
    "Cruiser",
    "Battleship",
    "Carrier",
];

/// Name for a ship of the given length.
pub fn ship_class_name(length: usize) -> &'static str {
    match length {
        1..=5 => SHIP_CLASS_NAMES[length - 1],
        _ => "Man-of-war",
    }
}

/// Immutable rules for one game: grid size, fleet composition, placement
/// adjacency and the turn overrun multiplier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    pub width: u8,
    pub height: u8,
    /// Number of ships per length; index 0 holds the one-tile count.
    pub ship_counts: [u8; 5],
    /// Whether ships may touch side-by-side.
    pub allow_adjacent: bool,
    /// The game is aborted after `turn_limit_multiplier * width * height`
    /// full turns.
    pub turn_limit_multiplier: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            width: 10,
            height: 10,
            ship_counts: [0, 4, 3, 2, 1],
            allow_adjacent: false,
            turn_limit_multiplier: 10,
        }
    }
}

impl GameConfig {
    /// A default-rules config on a `width` x `height` grid.
    pub fn with_grid(width: u8, height: u8) -> Self {
        GameConfig {
            width,
            height,
            ..GameConfig::default()
        }
    }

    /// Checks the extents and fleet composition are playable.
    pub fn validate(&self) -> Result<(), GameError> {
        if self.width < 2 || self.height < 2 || self.width > 26 {
            return Err(GameError::InvalidFleetSetup(format!(
                "unplayable grid extents {}x{}",
                self.width, self.height
            )));
        }
        if self.ship_counts.iter().all(|&n| n == 0) {
            return Err(GameError::InvalidFleetSetup(
                "fleet composition contains no ships".into(),
            ));
        }
        Ok(())
    }

    /// True if the signed pair lies within the playing field.
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && x < self.width as i32 && y < self.height as i32
    }

    /// Total tiles occupied by a freshly placed fleet.
    pub fn starting_strength(&self) -> u32 {
        self.ship_counts
            .iter()
            .enumerate()
            .map(|(i, &count)| (i as u32 + 1) * count as u32)
            .sum()
    }

    /// Full turns allowed before the game is aborted as overrun.
    pub fn max_turns(&self) -> u32 {
        self.turn_limit_multiplier * self.width as u32 * self.height as u32
    }

    /// Number of cells in the grid.
    pub fn cell_count(&self) -> usize {
        self.width as usize * self.height as usize
    }
}
