//! Name-to-factory registry for computer players.
//!
//! Strategies are registered once at startup and looked up by name when a
//! session is assembled, so a surrounding UI or tournament layer can pick
//! opponents from configuration without any runtime class loading.

use crate::player::Player;
use crate::player_ai::{HuntTargetPlayer, RandomPlayer};
use std::collections::HashMap;

/// Builds a player of one strategy, under the given display name.
pub type PlayerFactory = fn(name: &str) -> Box<dyn Player>;

/// Registry mapping strategy names to player factories.
pub struct StrategyRegistry {
    factories: HashMap<&'static str, PlayerFactory>,
}

impl StrategyRegistry {
    pub fn new() -> Self {
        StrategyRegistry {
            factories: HashMap::new(),
        }
    }

    /// Registry pre-populated with the built-in computer players.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register("hunt-target", |name| Box::new(HuntTargetPlayer::new(name)));
        registry.register("random", |name| Box::new(RandomPlayer::new(name)));
        registry
    }

    pub fn register(&mut self, strategy: &'static str, factory: PlayerFactory) {
        self.factories.insert(strategy, factory);
    }

    /// Instantiates the named strategy, or `None` for an unknown name.
    pub fn build(&self, strategy: &str, player_name: &str) -> Option<Box<dyn Player>> {
        self.factories.get(strategy).map(|f| f(player_name))
    }

    /// Registered strategy names, sorted for stable display.
    pub fn strategies(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = self.factories.keys().copied().collect();
        names.sort_unstable();
        names
    }
}

impl Default for StrategyRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
