use broadside::{
    Coord, DrawReason, Fleet, GameConfig, GameError, GameOutcome, GameSession, HuntTargetPlayer,
    Observation, ObservationGrid, Orientation, Player, RandomPlayer, ShipInfo,
};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use std::cell::RefCell;
use std::rc::Rc;

type EventLog = Rc<RefCell<Vec<String>>>;

fn at(x: u8, y: u8) -> Coord {
    Coord { x, y }
}

/// 3x3 field with a single one-tile ship per side.
fn skirmish_config() -> GameConfig {
    GameConfig {
        width: 3,
        height: 3,
        ship_counts: [1, 0, 0, 0, 0],
        ..GameConfig::default()
    }
}

/// Test player with a fixed berth for its single ship and a scripted shot
/// list; the last shot repeats once the script runs out. Every event is
/// appended to the shared log so ordering across both sides is visible.
struct ScriptedPlayer {
    name: &'static str,
    berth: Coord,
    shots: Vec<Coord>,
    next: usize,
    log: EventLog,
}

impl ScriptedPlayer {
    fn new(name: &'static str, berth: Coord, shots: Vec<Coord>, log: EventLog) -> Self {
        Self {
            name,
            berth,
            shots,
            next: 0,
            log,
        }
    }

    fn record(&self, event: &str, to: Coord) {
        self.log.borrow_mut().push(format!("{} {} {}", self.name, event, to));
    }
}

impl Player for ScriptedPlayer {
    fn name(&self) -> &str {
        self.name
    }

    fn is_ai(&self) -> bool {
        true
    }

    fn place_ships(&mut self, _rng: &mut SmallRng, fleet: &mut Fleet) -> Result<(), GameError> {
        fleet.place_ship(0, self.berth, Orientation::Horizontal)
    }

    fn request_shot(
        &mut self,
        _rng: &mut SmallRng,
        _observations: &ObservationGrid,
    ) -> Result<Coord, GameError> {
        let shot = self.shots[self.next.min(self.shots.len() - 1)];
        self.next += 1;
        Ok(shot)
    }

    fn shot_missed(&mut self, to: Coord) {
        self.record("miss", to);
    }

    fn shot_hit(&mut self, to: Coord) {
        self.record("hit", to);
    }

    fn shot_sunk_ship(&mut self, to: Coord, _ship: ShipInfo) {
        self.record("sunk", to);
    }

    fn repeat_at_miss(&mut self, to: Coord) {
        self.record("repeat-miss", to);
    }

    fn been_missed(&mut self, to: Coord) {
        self.record("been-missed", to);
    }

    fn been_hit(&mut self, to: Coord, _ship: ShipInfo) {
        self.record("been-hit", to);
    }

    fn ship_sunk(&mut self, to: Coord, _ship: ShipInfo) {
        self.record("ship-sunk", to);
    }

    fn enemy_repeat_at_miss(&mut self, to: Coord) {
        self.record("enemy-repeat-miss", to);
    }
}

/// Player that never manages to produce a usable coordinate.
struct FumblingPlayer;

impl Player for FumblingPlayer {
    fn name(&self) -> &str {
        "Fumbler"
    }

    fn is_ai(&self) -> bool {
        false
    }

    fn place_ships(&mut self, rng: &mut SmallRng, fleet: &mut Fleet) -> Result<(), GameError> {
        fleet.place_remaining_ships_randomly(rng)
    }

    fn request_shot(
        &mut self,
        _rng: &mut SmallRng,
        _observations: &ObservationGrid,
    ) -> Result<Coord, GameError> {
        Err(GameError::IncomprehensibleCoordinate("gibberish".into()))
    }
}

#[test]
fn test_events_are_paired_ordered_and_alternating() {
    let log: EventLog = Rc::new(RefCell::new(Vec::new()));
    let first = ScriptedPlayer::new("A", at(0, 0), vec![at(1, 1), at(2, 2)], log.clone());
    let second = ScriptedPlayer::new("B", at(2, 2), vec![at(1, 1)], log.clone());

    let mut session =
        GameSession::new(skirmish_config(), Box::new(first), Box::new(second)).unwrap();
    let mut rng = SmallRng::seed_from_u64(0);
    let outcome = session.play(&mut rng).unwrap();

    assert_eq!(outcome, GameOutcome::Winner(0));
    assert_eq!(session.turns_played(), 2);
    // one attacker event followed by one defender event per resolved
    // shot, sides strictly alternating, second shot of the last round
    // never taken
    assert_eq!(
        *log.borrow(),
        vec![
            "A miss B1",
            "B been-missed B1",
            "B miss B1",
            "A been-missed B1",
            "A sunk C2",
            "B ship-sunk C2",
        ]
    );
}

#[test]
fn test_sinking_reveals_the_collar_in_the_shooters_grid() {
    let log: EventLog = Rc::new(RefCell::new(Vec::new()));
    let config = GameConfig {
        ship_counts: [1, 0, 0, 0, 0],
        ..GameConfig::default()
    };
    let first = ScriptedPlayer::new("A", at(0, 0), vec![at(3, 3)], log.clone());
    let second = ScriptedPlayer::new("B", at(3, 3), vec![at(9, 9)], log.clone());

    let mut session = GameSession::new(config, Box::new(first), Box::new(second)).unwrap();
    let mut rng = SmallRng::seed_from_u64(0);
    assert_eq!(session.play(&mut rng).unwrap(), GameOutcome::Winner(0));

    let shooter = session.observations(0);
    assert_eq!(shooter.get(at(3, 3)), Observation::Hit);
    for cell in [at(2, 3), at(4, 3), at(3, 2), at(3, 4)] {
        assert_eq!(shooter.get(cell), Observation::Miss, "collar cell {}", cell);
        // only the shooter's memory was touched, not the defender's tiles
        assert!(!session.fleet(1).coordinates_have_been_shot_at(cell));
    }
    assert_eq!(shooter.count(Observation::Miss), 4);
}

#[test]
fn test_turn_overrun_guard_cuts_off_stuck_games() {
    let log: EventLog = Rc::new(RefCell::new(Vec::new()));
    let config = GameConfig {
        width: 2,
        height: 2,
        ship_counts: [1, 0, 0, 0, 0],
        ..GameConfig::default()
    };
    // both sides stubbornly shell the same empty cell forever
    let first = ScriptedPlayer::new("A", at(0, 0), vec![at(0, 1)], log.clone());
    let second = ScriptedPlayer::new("B", at(1, 1), vec![at(0, 1)], log.clone());

    let mut session = GameSession::new(config, Box::new(first), Box::new(second)).unwrap();
    let mut rng = SmallRng::seed_from_u64(0);
    assert_eq!(
        session.play(&mut rng),
        Err(GameError::TurnOverrun { limit: 40 })
    );
    assert_eq!(session.outcome(), None);
}

#[test]
fn test_full_game_between_the_builtin_players() {
    let config = GameConfig::default();
    let mut session = GameSession::new(
        config,
        Box::new(HuntTargetPlayer::new("Hunter")),
        Box::new(RandomPlayer::new("Scatter")),
    )
    .unwrap();
    let mut rng = SmallRng::seed_from_u64(2024);
    let outcome = session.play(&mut rng).unwrap();

    // neither computer player ever repeats a cell, so the game must end
    // in a victory well within the turn budget
    assert!(matches!(outcome, GameOutcome::Winner(_)));
    assert!(session.turns_played() <= config.max_turns());
    for side in 0..2 {
        let stats = session.stats(side);
        assert_eq!(stats.shots_fired, stats.hits + stats.misses);
        assert!(stats.shots_fired <= config.cell_count() as u32);
    }
    let GameOutcome::Winner(winner) = outcome else {
        unreachable!();
    };
    assert!(session.fleet(1 - winner).is_defeated());
    assert!(!session.fleet(winner).is_defeated());
}

#[test]
fn test_hunt_target_is_reproducible_with_a_seed() {
    let run = |seed: u64| {
        let mut session = GameSession::new(
            GameConfig::default(),
            Box::new(HuntTargetPlayer::new("One")),
            Box::new(HuntTargetPlayer::new("Two")),
        )
        .unwrap();
        let mut rng = SmallRng::seed_from_u64(seed);
        let outcome = session.play(&mut rng).unwrap();
        (outcome, session.turns_played(), session.stats(0), session.stats(1))
    };
    assert_eq!(run(7), run(7));
}

#[test]
fn test_unusable_coordinates_fall_back_to_random_shots() {
    let mut session = GameSession::new(
        skirmish_config(),
        Box::new(FumblingPlayer),
        Box::new(FumblingPlayer),
    )
    .unwrap();
    let mut rng = SmallRng::seed_from_u64(11);
    // the fallback fires random legal shots, so the game still finishes
    let outcome = session.play(&mut rng).unwrap();
    assert!(matches!(outcome, GameOutcome::Winner(_)));
    assert!(session.stats(0).shots_fired > 0);
}

#[test]
fn test_session_rejects_unplayable_configs() {
    let config = GameConfig::with_grid(1, 10);
    assert!(matches!(
        GameSession::new(
            config,
            Box::new(RandomPlayer::new("One")),
            Box::new(RandomPlayer::new("Two")),
        ),
        Err(GameError::InvalidFleetSetup(_))
    ));
}

#[test]
fn test_draw_reason_types_are_distinct() {
    assert_ne!(
        GameOutcome::Draw(DrawReason::MutualAnnihilation),
        GameOutcome::Draw(DrawReason::Exhaustion)
    );
}
