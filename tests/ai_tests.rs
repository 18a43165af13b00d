use broadside::{
    choose_target, hunt_around_hits, parity_search, random_shot, Coord, GameConfig, GameError,
    Observation, ObservationGrid,
};
use rand::rngs::SmallRng;
use rand::SeedableRng;

fn at(x: u8, y: u8) -> Coord {
    Coord { x, y }
}

fn empty_grid(width: u8, height: u8) -> ObservationGrid {
    ObservationGrid::new(&GameConfig::with_grid(width, height))
}

#[test]
fn test_hunt_probes_left_first() {
    let mut obs = empty_grid(10, 10);
    obs.mark(at(5, 5), Observation::Hit);
    assert_eq!(hunt_around_hits(&obs), Some(at(4, 5)));
}

#[test]
fn test_hunt_probe_order_skips_misses() {
    let mut obs = empty_grid(10, 10);
    obs.mark(at(5, 5), Observation::Hit);
    obs.mark(at(4, 5), Observation::Miss);
    // left is a known miss, so up comes next
    assert_eq!(hunt_around_hits(&obs), Some(at(5, 4)));
}

#[test]
fn test_hunt_skips_out_of_bounds_neighbors() {
    let mut obs = empty_grid(10, 10);
    obs.mark(at(0, 0), Observation::Hit);
    // left and up fall off the field; right is probed next
    assert_eq!(hunt_around_hits(&obs), Some(at(1, 0)));
}

#[test]
fn test_hunt_jumps_to_opposite_side_of_a_run() {
    let mut obs = empty_grid(10, 10);
    obs.mark(at(5, 5), Observation::Hit);
    obs.mark(at(6, 5), Observation::Hit);
    obs.mark(at(4, 5), Observation::Miss);
    obs.mark(at(5, 4), Observation::Miss);
    obs.mark(at(5, 6), Observation::Miss);
    // (5,5)'s free neighbors are exhausted and its right neighbor is part
    // of the same run, so the scan continues at (6,5) and extends the run
    // past it
    assert_eq!(hunt_around_hits(&obs), Some(at(7, 5)));
}

#[test]
fn test_hunt_ignores_fully_resolved_hits() {
    let mut obs = empty_grid(10, 10);
    // a sunk two-tile ship after the sink side-effect revealed its collar
    obs.mark(at(5, 5), Observation::Hit);
    obs.mark(at(6, 5), Observation::Hit);
    for (x, y) in [(4, 5), (7, 5), (5, 4), (6, 4), (5, 6), (6, 6)] {
        obs.mark(at(x, y), Observation::Miss);
    }
    assert_eq!(hunt_around_hits(&obs), None);
}

#[test]
fn test_search_restricted_to_checkerboard_parity() {
    // deliberately non-square so x/y mixups cannot cancel out
    let mut rng = SmallRng::seed_from_u64(99);
    let obs = empty_grid(5, 9);
    for _ in 0..200 {
        let shot = parity_search(&obs, &mut rng).unwrap();
        assert_eq!(
            (shot.x as u32 + shot.y as u32) % 2,
            0,
            "search left its parity class at {}",
            shot
        );
    }
}

#[test]
fn test_search_finds_the_last_parity_cell() {
    let mut obs = empty_grid(4, 4);
    for y in 0..4u8 {
        for x in 0..4u8 {
            if (x, y) != (2, 2) {
                obs.mark(at(x, y), Observation::Miss);
            }
        }
    }
    let mut rng = SmallRng::seed_from_u64(1);
    assert_eq!(parity_search(&obs, &mut rng).unwrap(), at(2, 2));
}

#[test]
fn test_search_fails_when_parity_class_is_spent() {
    let mut obs = empty_grid(6, 6);
    for y in 0..6u8 {
        for x in 0..6u8 {
            if (x as u32 + y as u32) % 2 == 0 {
                obs.mark(at(x, y), Observation::Miss);
            }
        }
    }
    let mut rng = SmallRng::seed_from_u64(3);
    assert_eq!(parity_search(&obs, &mut rng), Err(GameError::NoFiringSolution));
}

#[test]
fn test_random_shot_fails_on_exhausted_grid() {
    let mut obs = empty_grid(4, 4);
    for y in 0..4u8 {
        for x in 0..4u8 {
            obs.mark(at(x, y), Observation::Miss);
        }
    }
    let mut rng = SmallRng::seed_from_u64(5);
    assert_eq!(random_shot(&obs, &mut rng), Err(GameError::NoFiringSolution));
}

#[test]
fn test_target_choice_never_repeats_known_cells() {
    let mut rng = SmallRng::seed_from_u64(17);
    let mut obs = empty_grid(8, 8);
    // scatter some knowledge around, including a live hit
    obs.mark(at(3, 3), Observation::Hit);
    obs.mark(at(2, 3), Observation::Miss);
    obs.mark(at(4, 4), Observation::Miss);
    for _ in 0..100 {
        let shot = choose_target(&obs, &mut rng).unwrap();
        assert_eq!(
            obs.get(shot),
            Observation::Unknown,
            "selected an already-known cell {}",
            shot
        );
    }
}

#[test]
fn test_hunt_takes_priority_over_search() {
    let mut rng = SmallRng::seed_from_u64(23);
    let mut obs = empty_grid(10, 10);
    obs.mark(at(7, 2), Observation::Hit);
    // with a live hit on the board the choice is deterministic
    assert_eq!(choose_target(&obs, &mut rng).unwrap(), at(6, 2));
}
