//! Common types: game errors, shot outcomes and event payloads.

/// How a resolved shot is classified.
///
/// The `Repeat*` variants report shots at cells that cannot change state
/// any further; they never mutate the fleet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShotOutcome {
    /// Shot struck open water for the first time.
    Miss,
    /// Shot struck a live ship segment for the first time.
    Hit,
    /// Shot removed the last live segment of the ship with this id.
    Sunk(usize),
    /// Shot struck open water that was already fired upon.
    RepeatMiss,
    /// Shot struck an already-fired segment of a ship still afloat.
    RepeatHit,
    /// Shot struck any segment of a ship that is already sunk.
    RepeatSunk(usize),
}

impl ShotOutcome {
    /// True for the three outcomes that left the fleet unchanged.
    pub fn is_repeat(&self) -> bool {
        matches!(
            self,
            ShotOutcome::RepeatMiss | ShotOutcome::RepeatHit | ShotOutcome::RepeatSunk(_)
        )
    }
}

/// Identity of a ship as carried by event notifications. Beyond the outcome
/// classification this is all a shooter ever learns about the hidden fleet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShipInfo {
    pub name: &'static str,
    pub length: u8,
}

/// Errors returned by game operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    /// Coordinate pair lies outside the playing field.
    InvalidCoordinate { x: i32, y: i32 },
    /// Input token could not be read as a coordinate.
    IncomprehensibleCoordinate(String),
    /// Attempted to place a ship that is already placed.
    ShipAlreadyPlaced,
    /// Placement walked onto a cell that already holds a ship.
    TileAlreadyOccupied { x: u8, y: u8 },
    /// Random placement exhausted its attempt budget.
    UnableToPlaceShip,
    /// Fleet is not (or not correctly) set up for play.
    InvalidFleetSetup(String),
    /// Turn counter exceeded the configured limit.
    TurnOverrun { limit: u32 },
    /// Target search exhausted its attempt budget with no legal cell.
    NoFiringSolution,
}

impl core::fmt::Display for GameError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            GameError::InvalidCoordinate { x, y } => {
                write!(f, "coordinates ({}/{}) are outside the playing field", x, y)
            }
            GameError::IncomprehensibleCoordinate(input) => {
                write!(
                    f,
                    "cannot make sense of {:?}; use a letter combined with a number",
                    input
                )
            }
            GameError::ShipAlreadyPlaced => write!(f, "ship has already been placed"),
            GameError::TileAlreadyOccupied { x, y } => {
                write!(f, "tile ({}/{}) is already occupied", x, y)
            }
            GameError::UnableToPlaceShip => write!(f, "unable to place ship"),
            GameError::InvalidFleetSetup(reason) => {
                write!(f, "fleet is not set up correctly: {}", reason)
            }
            GameError::TurnOverrun { limit } => {
                write!(f, "maximum number of turns ({}) exceeded", limit)
            }
            GameError::NoFiringSolution => {
                write!(f, "attempts depleted, no firing solution found")
            }
        }
    }
}

impl std::error::Error for GameError {}

impl GameError {
    /// True for the coordinate errors a caller may retry; everything else
    /// terminates the current game.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            GameError::InvalidCoordinate { .. } | GameError::IncomprehensibleCoordinate(_)
        )
    }
}
