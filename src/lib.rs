mod ai;
mod common;
mod config;
mod coord;
mod fleet;
mod game;
mod logging;
mod observation;
mod player;
mod player_ai;
mod player_cli;
mod registry;
mod ship;

pub use ai::*;
pub use common::*;
pub use config::*;
pub use coord::*;
pub use fleet::*;
pub use game::*;
pub use logging::init_logging;
pub use observation::*;
pub use player::*;
pub use player_ai::*;
pub use player_cli::*;
pub use registry::*;
pub use ship::*;
