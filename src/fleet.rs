//! Fleet state: the tile grid, ship placement and firing resolution.
//!
//! How to assemble a fleet: construct it (this creates the configured set
//! of unplaced ships), place every ship, then call
//! [`Fleet::fill_unoccupied_tiles`]. Firing assumes every cell holds a
//! tile, so the fill step is mandatory before play begins.

use crate::common::{GameError, ShotOutcome};
use crate::config::GameConfig;
use crate::coord::Coord;
use crate::ship::{Orientation, Ship, ShipId};
use rand::Rng;

/// Attempt budget for one ship's random placement.
const PLACEMENT_ATTEMPTS: u32 = 100;

/// The four axis-aligned neighbor offsets.
pub(crate) const NEIGHBOR_STEPS: [(i32, i32); 4] = [(-1, 0), (0, -1), (1, 0), (0, 1)];

/// One grid cell: whether it has been fired upon, and which ship occupies
/// it, if any. `fired` transitions false to true exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tile {
    ship: Option<ShipId>,
    fired: bool,
}

impl Tile {
    fn water() -> Self {
        Tile {
            ship: None,
            fired: false,
        }
    }

    fn occupied(ship: ShipId) -> Self {
        Tile {
            ship: Some(ship),
            fired: false,
        }
    }

    pub fn ship(&self) -> Option<ShipId> {
        self.ship
    }

    pub fn is_fired(&self) -> bool {
        self.fired
    }
}

/// All of one player's ships and their locations on the tile grid.
pub struct Fleet {
    config: GameConfig,
    tiles: Vec<Option<Tile>>,
    ships: Vec<Ship>,
}

impl Fleet {
    /// Creates an empty fleet with the configured set of unplaced ships.
    /// Longer ships come first so constrained grids fill large runs before
    /// the remaining space fragments.
    pub fn new(config: &GameConfig) -> Self {
        let mut ships = Vec::new();
        for length in (1..=5u8).rev() {
            for _ in 0..config.ship_counts[length as usize - 1] {
                ships.push(Ship::new(length));
            }
        }
        Fleet {
            config: *config,
            tiles: vec![None; config.cell_count()],
            ships,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn ships(&self) -> &[Ship] {
        &self.ships
    }

    pub fn ship(&self, id: ShipId) -> &Ship {
        &self.ships[id]
    }

    fn index(&self, at: Coord) -> usize {
        at.y as usize * self.config.width as usize + at.x as usize
    }

    /// The tile at `at`, or `None` while the cell is still unassigned.
    pub fn tile(&self, at: Coord) -> Option<Tile> {
        self.tiles[self.index(at)]
    }

    fn cell_is_free(&self, x: i32, y: i32) -> bool {
        match Coord::new(x, y, &self.config) {
            Ok(at) => self.tiles[self.index(at)].is_none(),
            Err(_) => false,
        }
    }

    /// Count of this ship's segments not yet struck.
    pub fn ship_strength(&self, id: ShipId) -> u32 {
        self.ships[id]
            .cells()
            .iter()
            .filter(|&&cell| !self.tiles[self.index(cell)].is_some_and(|t| t.fired))
            .count() as u32
    }

    pub fn ship_is_sunk(&self, id: ShipId) -> bool {
        self.ships[id].is_placed() && self.ship_strength(id) == 0
    }

    pub fn all_ships_placed(&self) -> bool {
        self.ships.iter().all(Ship::is_placed)
    }

    /// Walks `length` cells from `origin` along `orientation` and reports
    /// whether a ship may legally cover them: every cell inside the field
    /// and free, and, unless adjacent placement is allowed, no covered
    /// cell touching another ship side-by-side.
    pub fn placement_is_legal(
        &self,
        origin: Coord,
        length: u8,
        orientation: Orientation,
    ) -> bool {
        let (dx, dy) = orientation.step();
        let mut x = origin.x as i32;
        let mut y = origin.y as i32;
        for _ in 0..length {
            if !self.config.contains(x, y) || !self.cell_is_free(x, y) {
                return false;
            }
            if !self.config.allow_adjacent {
                let crowded = NEIGHBOR_STEPS.iter().any(|&(nx, ny)| {
                    self.config.contains(x + nx, y + ny) && !self.cell_is_free(x + nx, y + ny)
                });
                if crowded {
                    return false;
                }
            }
            x += dx;
            y += dy;
        }
        true
    }

    /// Places `ship` with its upper-left end at `origin`. Occupancy is
    /// re-checked cell by cell even after a legality check, so a defect in
    /// the caller surfaces as `TileAlreadyOccupied` instead of silently
    /// corrupting the grid.
    pub fn place_ship(
        &mut self,
        id: ShipId,
        origin: Coord,
        orientation: Orientation,
    ) -> Result<(), GameError> {
        if self.ships[id].is_placed() {
            return Err(GameError::ShipAlreadyPlaced);
        }
        let (dx, dy) = orientation.step();
        let length = self.ships[id].length();
        let mut covered = Vec::with_capacity(length as usize);
        for i in 0..length as i32 {
            let cell = Coord::new(
                origin.x as i32 + dx * i,
                origin.y as i32 + dy * i,
                &self.config,
            )?;
            if self.tiles[self.index(cell)].is_some() {
                return Err(GameError::TileAlreadyOccupied {
                    x: cell.x,
                    y: cell.y,
                });
            }
            covered.push(cell);
        }
        for cell in covered {
            let idx = self.index(cell);
            self.tiles[idx] = Some(Tile::occupied(id));
            self.ships[id].assign_cell(cell);
        }
        self.ships[id].mark_placed();
        Ok(())
    }

    /// Proposes a random legal origin and orientation for `id`, trying up
    /// to 100 draws before giving up with `UnableToPlaceShip`.
    pub fn random_placement<R: Rng>(
        &self,
        rng: &mut R,
        id: ShipId,
    ) -> Result<(Coord, Orientation), GameError> {
        let length = self.ships[id].length();
        for _ in 0..PLACEMENT_ATTEMPTS {
            let orientation = if rng.random() {
                Orientation::Horizontal
            } else {
                Orientation::Vertical
            };
            let (span_x, span_y) = match orientation {
                Orientation::Horizontal => (self.config.width.checked_sub(length), Some(self.config.height - 1)),
                Orientation::Vertical => (Some(self.config.width - 1), self.config.height.checked_sub(length)),
            };
            let (Some(max_x), Some(max_y)) = (span_x, span_y) else {
                // ship does not fit in this orientation at all
                continue;
            };
            let origin = Coord {
                x: rng.random_range(0..=max_x),
                y: rng.random_range(0..=max_y),
            };
            if self.placement_is_legal(origin, length, orientation) {
                return Ok((origin, orientation));
            }
        }
        Err(GameError::UnableToPlaceShip)
    }

    /// Places every still-unplaced ship at random positions.
    pub fn place_remaining_ships_randomly<R: Rng>(
        &mut self,
        rng: &mut R,
    ) -> Result<(), GameError> {
        for id in 0..self.ships.len() {
            if self.ships[id].is_placed() {
                continue;
            }
            let (origin, orientation) = self.random_placement(rng, id)?;
            self.place_ship(id, origin, orientation)?;
        }
        Ok(())
    }

    /// Fills every remaining empty cell with a plain water tile. Must be
    /// called after all ships are placed and before any firing.
    pub fn fill_unoccupied_tiles(&mut self) -> Result<(), GameError> {
        if let Some(ship) = self.ships.iter().find(|s| !s.is_placed()) {
            return Err(GameError::InvalidFleetSetup(format!(
                "{} has not been placed",
                ship
            )));
        }
        for tile in self.tiles.iter_mut() {
            if tile.is_none() {
                *tile = Some(Tile::water());
            }
        }
        Ok(())
    }

    /// Resolves a shot at `at` and classifies the outcome.
    ///
    /// A cell of an already-sunk ship always reports `RepeatSunk`, before
    /// the fired-state of the individual tile is even consulted; a sunk
    /// ship cannot be newly hit again. All `Repeat*` outcomes leave the
    /// tile untouched.
    pub fn receive_fire(&mut self, at: Coord) -> Result<ShotOutcome, GameError> {
        let idx = self.index(at);
        let tile = self.tiles[idx].ok_or_else(|| {
            GameError::InvalidFleetSetup("unoccupied tiles have not been filled".into())
        })?;
        match tile.ship {
            Some(ship) => {
                if self.ship_is_sunk(ship) {
                    Ok(ShotOutcome::RepeatSunk(ship))
                } else if tile.fired {
                    Ok(ShotOutcome::RepeatHit)
                } else {
                    self.tiles[idx] = Some(Tile {
                        fired: true,
                        ..tile
                    });
                    if self.ship_is_sunk(ship) {
                        Ok(ShotOutcome::Sunk(ship))
                    } else {
                        Ok(ShotOutcome::Hit)
                    }
                }
            }
            None => {
                if tile.fired {
                    Ok(ShotOutcome::RepeatMiss)
                } else {
                    self.tiles[idx] = Some(Tile {
                        fired: true,
                        ..tile
                    });
                    Ok(ShotOutcome::Miss)
                }
            }
        }
    }

    pub fn coordinates_have_been_shot_at(&self, at: Coord) -> bool {
        self.tiles[self.index(at)].is_some_and(|t| t.fired)
    }

    /// True once every ship has lost all of its segments.
    pub fn is_defeated(&self) -> bool {
        self.ships
            .iter()
            .enumerate()
            .all(|(id, _)| self.ship_is_sunk(id))
    }

    pub fn current_strength(&self) -> u32 {
        (0..self.ships.len()).map(|id| self.ship_strength(id)).sum()
    }

    pub fn original_strength(&self) -> u32 {
        self.config.starting_strength()
    }

    /// True while some cell of the grid is still unfired.
    pub fn has_unfired_tiles(&self) -> bool {
        self.tiles
            .iter()
            .any(|tile| !tile.is_some_and(|t| t.fired))
    }
}
