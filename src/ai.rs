//! Targeting logic for computer players, operating purely on the acting
//! player's own observation grid.
//!
//! Two modes are evaluated in priority order on every call, with no
//! persistent state: exploit a live hit by probing its neighbors, and
//! otherwise fall back to random search over one parity class of a
//! checkerboard, since every ship of length two or more covers at least
//! one such cell.

use crate::common::GameError;
use crate::coord::Coord;
use crate::observation::{Observation, ObservationGrid};
use rand::Rng;

/// Probe order around a hit: left, up, right, down.
const PROBE_STEPS: [(i32, i32); 4] = [(-1, 0), (0, -1), (1, 0), (0, 1)];
/// Index of the opposite direction for each probe step.
const OPPOSITE: [usize; 4] = [2, 3, 0, 1];

/// Multiplier for the random-search attempt budget, applied to the cell
/// count of the grid.
const SEARCH_ATTEMPT_MULTIPLIER: usize = 10;

/// Scans the grid in row-major order for a hit worth exploiting and
/// returns the next cell to fire at, if any.
///
/// For each neighbor of a hit, in probe order: out-of-bounds and known
/// misses are skipped; an unknown cell is fired at immediately. A
/// neighboring hit means the ship's run continues through the original
/// cell, so the cell on the opposite side is tried instead; if that is
/// not unknown either, the hit is abandoned and the scan moves on.
///
/// Hits belonging to sunk ships stop yielding targets on their own: the
/// sink side-effect reveals the surrounding cells as misses, and the
/// remaining neighbors are hits of the same run whose opposite sides are
/// resolved too.
pub fn hunt_around_hits(observations: &ObservationGrid) -> Option<Coord> {
    for y in 0..observations.height() as i32 {
        for x in 0..observations.width() as i32 {
            if observations.get_signed(x, y) != Some(Observation::Hit) {
                continue;
            }
            for (i, (dx, dy)) in PROBE_STEPS.iter().enumerate() {
                match observations.get_signed(x + dx, y + dy) {
                    None | Some(Observation::Miss) => continue,
                    Some(Observation::Unknown) => {
                        return Some(Coord {
                            x: (x + dx) as u8,
                            y: (y + dy) as u8,
                        });
                    }
                    Some(Observation::Hit) => {
                        let (ox, oy) = PROBE_STEPS[OPPOSITE[i]];
                        if observations.get_signed(x + ox, y + oy)
                            == Some(Observation::Unknown)
                        {
                            return Some(Coord {
                                x: (x + ox) as u8,
                                y: (y + oy) as u8,
                            });
                        }
                        // run already resolved on both sides; try the next hit
                        break;
                    }
                }
            }
        }
    }
    None
}

/// Draws random unknown cells restricted to the `(x + y) % 2 == 0`
/// checkerboard class, giving up with `NoFiringSolution` once the attempt
/// budget is depleted.
pub fn parity_search<R: Rng>(
    observations: &ObservationGrid,
    rng: &mut R,
) -> Result<Coord, GameError> {
    search(observations, rng, |at| (at.x as u32 + at.y as u32) % 2 == 0)
}

/// Draws random unknown cells anywhere on the grid. This is the default
/// behavior of the plain computer opponent, and the fallback shot taken
/// when a player keeps supplying unusable coordinates.
pub fn random_shot<R: Rng>(
    observations: &ObservationGrid,
    rng: &mut R,
) -> Result<Coord, GameError> {
    search(observations, rng, |_| true)
}

fn search<R: Rng>(
    observations: &ObservationGrid,
    rng: &mut R,
    accept: impl Fn(Coord) -> bool,
) -> Result<Coord, GameError> {
    let width = observations.width();
    let height = observations.height();
    let attempts = width as usize * height as usize * SEARCH_ATTEMPT_MULTIPLIER;
    for _ in 0..attempts {
        let candidate = Coord {
            x: rng.random_range(0..width),
            y: rng.random_range(0..height),
        };
        if observations.get(candidate) == Observation::Unknown && accept(candidate) {
            return Ok(candidate);
        }
    }
    Err(GameError::NoFiringSolution)
}

/// Chooses the next target: exploit a live hit when one exists, otherwise
/// search the parity class. Only unknown cells are ever selected.
pub fn choose_target<R: Rng>(
    observations: &ObservationGrid,
    rng: &mut R,
) -> Result<Coord, GameError> {
    match hunt_around_hits(observations) {
        Some(target) => Ok(target),
        None => parity_search(observations, rng),
    }
}
