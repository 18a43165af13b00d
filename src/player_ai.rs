//! Computer players. Both place their ships randomly and compute their
//! shots synchronously; they differ only in targeting.

use crate::ai;
use crate::common::GameError;
use crate::coord::Coord;
use crate::fleet::Fleet;
use crate::observation::ObservationGrid;
use crate::player::Player;
use rand::rngs::SmallRng;

/// Computer player using the hunt-and-target strategy: exploit live hits
/// by probing their neighbors, otherwise search one checkerboard parity
/// class at random.
pub struct HuntTargetPlayer {
    name: String,
}

impl HuntTargetPlayer {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Player for HuntTargetPlayer {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_ai(&self) -> bool {
        true
    }

    fn place_ships(&mut self, rng: &mut SmallRng, fleet: &mut Fleet) -> Result<(), GameError> {
        fleet.place_remaining_ships_randomly(rng)
    }

    fn request_shot(
        &mut self,
        rng: &mut SmallRng,
        observations: &ObservationGrid,
    ) -> Result<Coord, GameError> {
        ai::choose_target(observations, rng)
    }
}

/// Computer player firing uniformly at random among unexplored cells.
pub struct RandomPlayer {
    name: String,
}

impl RandomPlayer {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Player for RandomPlayer {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_ai(&self) -> bool {
        true
    }

    fn place_ships(&mut self, rng: &mut SmallRng, fleet: &mut Fleet) -> Result<(), GameError> {
        fleet.place_remaining_ships_randomly(rng)
    }

    fn request_shot(
        &mut self,
        rng: &mut SmallRng,
        observations: &ObservationGrid,
    ) -> Result<Coord, GameError> {
        ai::random_shot(observations, rng)
    }
}
