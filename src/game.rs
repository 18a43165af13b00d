//! The game session and its deterministic turn orchestrator.
//!
//! A session exclusively owns both fleets and both observation grids for
//! its duration; all mutation is serialized by the orchestrator's call
//! stack. Turns strictly alternate, the first side firing before the
//! second, and the second shot of a round is skipped when the first one
//! ends the game.

use crate::ai;
use crate::common::{GameError, ShipInfo, ShotOutcome};
use crate::config::GameConfig;
use crate::coord::Coord;
use crate::fleet::{Fleet, NEIGHBOR_STEPS};
use crate::observation::{Observation, ObservationGrid};
use crate::player::Player;
use rand::rngs::SmallRng;

/// How often a player may return an unusable coordinate before the
/// orchestrator falls back to a random legal shot.
const SHOT_RETRY_ATTEMPTS: u32 = 3;

/// Why a finished game ended without a winner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawReason {
    /// Both fleets were destroyed by the same resolved shot.
    MutualAnnihilation,
    /// Neither fleet has any unfired cells left to contest.
    Exhaustion,
}

/// Terminal result of a completed game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    /// Index of the side whose fleet survived.
    Winner(usize),
    Draw(DrawReason),
}

/// Per-player accuracy bookkeeping. Repeat shots change nothing here.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShotStats {
    pub shots_fired: u32,
    pub hits: u32,
    pub misses: u32,
}

impl ShotStats {
    /// Hit percentage rounded to whole percent; zero before any shot.
    pub fn accuracy_percent(&self) -> u32 {
        if self.shots_fired == 0 {
            return 0;
        }
        (self.hits as f64 / self.shots_fired as f64 * 100.0).round() as u32
    }
}

struct Side {
    player: Box<dyn Player>,
    fleet: Fleet,
    observations: ObservationGrid,
    stats: ShotStats,
}

/// Two fleets, two observation grids and a turn counter, driven to a
/// terminal outcome by [`GameSession::run`].
pub struct GameSession {
    config: GameConfig,
    sides: [Side; 2],
    turns_played: u32,
    outcome: Option<GameOutcome>,
}

impl GameSession {
    pub fn new(
        config: GameConfig,
        player_one: Box<dyn Player>,
        player_two: Box<dyn Player>,
    ) -> Result<Self, GameError> {
        config.validate()?;
        let make_side = |player: Box<dyn Player>| Side {
            player,
            fleet: Fleet::new(&config),
            observations: ObservationGrid::new(&config),
            stats: ShotStats::default(),
        };
        Ok(GameSession {
            config,
            sides: [make_side(player_one), make_side(player_two)],
            turns_played: 0,
            outcome: None,
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn fleet(&self, side: usize) -> &Fleet {
        &self.sides[side].fleet
    }

    pub fn observations(&self, side: usize) -> &ObservationGrid {
        &self.sides[side].observations
    }

    pub fn stats(&self, side: usize) -> ShotStats {
        self.sides[side].stats
    }

    pub fn player_name(&self, side: usize) -> &str {
        self.sides[side].player.name()
    }

    pub fn is_ai(&self, side: usize) -> bool {
        self.sides[side].player.is_ai()
    }

    /// Full rounds completed so far.
    pub fn turns_played(&self) -> u32 {
        self.turns_played
    }

    pub fn outcome(&self) -> Option<GameOutcome> {
        self.outcome
    }

    /// Lets both players place their ships and fills the remaining water
    /// tiles. Must succeed before [`GameSession::run`].
    pub fn place_fleets(&mut self, rng: &mut SmallRng) -> Result<(), GameError> {
        for side in self.sides.iter_mut() {
            side.player.place_ships(rng, &mut side.fleet)?;
            side.fleet.fill_unoccupied_tiles()?;
            log::debug!("{} has placed all ships", side.player.name());
        }
        Ok(())
    }

    /// Plays alternating turns until one fleet is destroyed or the game
    /// draws. A defective pairing that never progresses is cut off after
    /// the configured turn limit with `TurnOverrun`.
    pub fn run(&mut self, rng: &mut SmallRng) -> Result<GameOutcome, GameError> {
        let limit = self.config.max_turns();
        log::info!(
            "battle between {} and {} begins, {} turns allowed",
            self.player_name(0),
            self.player_name(1),
            limit
        );
        for _ in 0..limit {
            if let Some(outcome) = self.outcome {
                return Ok(outcome);
            }
            self.play_half_turn(0, rng)?;
            self.check_for_defeat();
            if self.outcome.is_none() {
                self.play_half_turn(1, rng)?;
                self.check_for_defeat();
            }
            self.check_for_exhaustion();
            self.turns_played += 1;
        }
        match self.outcome {
            Some(outcome) => Ok(outcome),
            None => Err(GameError::TurnOverrun { limit }),
        }
    }

    /// Convenience wrapper: placement followed by the full game.
    pub fn play(&mut self, rng: &mut SmallRng) -> Result<GameOutcome, GameError> {
        self.place_fleets(rng)?;
        self.run(rng)
    }

    fn play_half_turn(&mut self, attacker: usize, rng: &mut SmallRng) -> Result<(), GameError> {
        let shot = self.request_shot(attacker, rng)?;
        self.resolve_shot(attacker, shot)
    }

    /// Asks the attacker for a coordinate, re-prompting a bounded number
    /// of times on recoverable errors before falling back to a random
    /// legal shot. Structural failures are not retried.
    fn request_shot(&mut self, attacker: usize, rng: &mut SmallRng) -> Result<Coord, GameError> {
        let side = &mut self.sides[attacker];
        side.player.turn_begun();
        for _ in 0..SHOT_RETRY_ATTEMPTS {
            let Side {
                player,
                observations,
                ..
            } = &mut *side;
            match player.request_shot(rng, observations) {
                Ok(shot) => return Ok(shot),
                Err(err) if err.is_recoverable() => {
                    log::warn!("{}: {}", player.name(), err);
                }
                Err(err) => return Err(err),
            }
        }
        log::warn!(
            "{} supplied no usable coordinates, firing at random",
            side.player.name()
        );
        ai::random_shot(&side.observations, rng)
    }

    /// Resolves one shot against the defender's fleet, updates the
    /// attacker's observations and statistics, and dispatches the paired
    /// outcome events: the attacker's first, then the defender's, both
    /// before this returns.
    fn resolve_shot(&mut self, attacker: usize, at: Coord) -> Result<(), GameError> {
        let defender = 1 - attacker;
        let outcome = self.sides[defender].fleet.receive_fire(at)?;
        log::debug!(
            "{} fires at {}: {:?}",
            self.sides[attacker].player.name(),
            at,
            outcome
        );

        match outcome {
            ShotOutcome::Miss => {
                let side = &mut self.sides[attacker];
                side.observations.mark(at, Observation::Miss);
                side.stats.shots_fired += 1;
                side.stats.misses += 1;
            }
            ShotOutcome::Hit => {
                let side = &mut self.sides[attacker];
                side.observations.mark(at, Observation::Hit);
                side.stats.shots_fired += 1;
                side.stats.hits += 1;
            }
            ShotOutcome::Sunk(ship) => {
                let side = &mut self.sides[attacker];
                side.observations.mark(at, Observation::Hit);
                side.stats.shots_fired += 1;
                side.stats.hits += 1;
                self.reveal_around_sunk_ship(attacker, ship);
            }
            ShotOutcome::RepeatMiss | ShotOutcome::RepeatHit | ShotOutcome::RepeatSunk(_) => {}
        }

        self.dispatch_events(attacker, at, outcome);
        Ok(())
    }

    /// Under the no-adjacency rule a sunk ship cannot have neighbors, so
    /// every unfired cell around it is revealed as a miss in the shooter's
    /// observation grid. The defender's tiles are left untouched.
    fn reveal_around_sunk_ship(&mut self, attacker: usize, ship: usize) {
        let defender = 1 - attacker;
        let cells: Vec<Coord> = self.sides[defender].fleet.ship(ship).cells().to_vec();
        for cell in cells {
            for (dx, dy) in NEIGHBOR_STEPS {
                let Some(neighbor) = cell.offset(dx, dy, &self.config) else {
                    continue;
                };
                if !self.sides[defender]
                    .fleet
                    .coordinates_have_been_shot_at(neighbor)
                {
                    self.sides[attacker]
                        .observations
                        .mark_miss_if_unknown(neighbor);
                }
            }
        }
    }

    fn dispatch_events(&mut self, attacker: usize, at: Coord, outcome: ShotOutcome) {
        let defender = 1 - attacker;
        let ship_info = |session: &Self, ship: usize| session.sides[defender].fleet.ship(ship).info();
        // the ship occupying the struck cell, for hit-related events
        let struck_ship: Option<ShipInfo> = self.sides[defender]
            .fleet
            .tile(at)
            .and_then(|tile| tile.ship())
            .map(|ship| ship_info(self, ship));

        match outcome {
            ShotOutcome::Miss => {
                self.sides[attacker].player.shot_missed(at);
                self.sides[defender].player.been_missed(at);
            }
            ShotOutcome::Hit => {
                let info = struck_ship.unwrap_or(ShipInfo {
                    name: "Man-of-war",
                    length: 0,
                });
                self.sides[attacker].player.shot_hit(at);
                self.sides[defender].player.been_hit(at, info);
            }
            ShotOutcome::Sunk(ship) => {
                let info = ship_info(self, ship);
                self.sides[attacker].player.shot_sunk_ship(at, info);
                self.sides[defender].player.ship_sunk(at, info);
            }
            ShotOutcome::RepeatMiss => {
                self.sides[attacker].player.repeat_at_miss(at);
                self.sides[defender].player.enemy_repeat_at_miss(at);
            }
            ShotOutcome::RepeatHit => {
                let info = struck_ship.unwrap_or(ShipInfo {
                    name: "Man-of-war",
                    length: 0,
                });
                self.sides[attacker].player.repeat_at_same_hit(at);
                self.sides[defender].player.enemy_repeat_at_same_hit(at, info);
            }
            ShotOutcome::RepeatSunk(ship) => {
                let info = ship_info(self, ship);
                self.sides[attacker].player.repeat_at_sunk_ship(at, info);
                self.sides[defender].player.enemy_repeat_at_sunk(at, info);
            }
        }
    }

    fn check_for_defeat(&mut self) {
        if self.outcome.is_some() {
            return;
        }
        let one_down = self.sides[0].fleet.is_defeated();
        let two_down = self.sides[1].fleet.is_defeated();
        self.outcome = match (one_down, two_down) {
            (true, true) => Some(GameOutcome::Draw(DrawReason::MutualAnnihilation)),
            (true, false) => Some(GameOutcome::Winner(1)),
            (false, true) => Some(GameOutcome::Winner(0)),
            (false, false) => None,
        };
        if let Some(outcome) = self.outcome {
            log::info!("game over after {} turns: {:?}", self.turns_played, outcome);
        }
    }

    fn check_for_exhaustion(&mut self) {
        if self.outcome.is_none()
            && !self.sides[0].fleet.has_unfired_tiles()
            && !self.sides[1].fleet.has_unfired_tiles()
        {
            self.outcome = Some(GameOutcome::Draw(DrawReason::Exhaustion));
        }
    }
}
