//! The capability interface implemented by every participant.
//!
//! One trait covers both human and computer players; the game session
//! selects a concrete variant at construction. Event notifications default
//! to no-ops so implementations only override what they care about. The
//! session invokes exactly one attacker-side and one defender-side event
//! per resolved shot, attacker first.

use crate::common::{GameError, ShipInfo};
use crate::coord::Coord;
use crate::fleet::Fleet;
use crate::observation::ObservationGrid;
use rand::rngs::SmallRng;

/// Interface implemented by different player types.
pub trait Player {
    fn name(&self) -> &str;

    /// True for players whose shots are computed without suspension.
    fn is_ai(&self) -> bool;

    /// Place all ships onto the provided fleet.
    fn place_ships(&mut self, rng: &mut SmallRng, fleet: &mut Fleet) -> Result<(), GameError>;

    /// Choose the next firing coordinate, given the player's own record of
    /// prior shots. Human implementations may fail with a recoverable
    /// coordinate error; computer implementations fail only with
    /// `NoFiringSolution`.
    fn request_shot(
        &mut self,
        rng: &mut SmallRng,
        observations: &ObservationGrid,
    ) -> Result<Coord, GameError>;

    /// Called when the player's turn begins, before the shot is requested.
    fn turn_begun(&mut self) {}

    // Attacker-side notifications.

    fn shot_missed(&mut self, _at: Coord) {}

    fn shot_hit(&mut self, _at: Coord) {}

    fn shot_sunk_ship(&mut self, _at: Coord, _ship: ShipInfo) {}

    fn repeat_at_sunk_ship(&mut self, _at: Coord, _ship: ShipInfo) {}

    fn repeat_at_same_hit(&mut self, _at: Coord) {}

    fn repeat_at_miss(&mut self, _at: Coord) {}

    // Defender-side notifications.

    fn been_missed(&mut self, _at: Coord) {}

    fn been_hit(&mut self, _at: Coord, _ship: ShipInfo) {}

    fn ship_sunk(&mut self, _at: Coord, _ship: ShipInfo) {}

    fn enemy_repeat_at_sunk(&mut self, _at: Coord, _ship: ShipInfo) {}

    fn enemy_repeat_at_same_hit(&mut self, _at: Coord, _ship: ShipInfo) {}

    fn enemy_repeat_at_miss(&mut self, _at: Coord) {}
}
