//! Human player driven by console input, plus the rendering helpers the
//! binary uses to show fleets and observations.

use std::io::{self, Write};

use crate::common::{GameError, ShipInfo};
use crate::config::GameConfig;
use crate::coord::Coord;
use crate::fleet::Fleet;
use crate::game::GameSession;
use crate::observation::{Observation, ObservationGrid};
use crate::player::Player;
use crate::ship::Orientation;
use rand::rngs::SmallRng;

pub struct CliPlayer {
    name: String,
    config: GameConfig,
}

impl CliPlayer {
    pub fn new(name: impl Into<String>, config: GameConfig) -> Self {
        Self {
            name: name.into(),
            config,
        }
    }
}

fn read_trimmed_line() -> String {
    let mut line = String::new();
    io::stdin().read_line(&mut line).unwrap();
    line.trim().to_string()
}

/// Render one fleet. Unfired ship segments show as the ship's size digit
/// when `show_ships` is set, struck segments as `X`, fired water as `.`.
pub fn print_fleet(fleet: &Fleet, show_ships: bool) {
    let config = fleet.config();
    print!("   ");
    for x in 0..config.width {
        print!(" {}", (b'A' + x) as char);
    }
    println!();
    for y in 0..config.height {
        print!("{:2} ", y);
        for x in 0..config.width {
            let at = Coord { x, y };
            let ch = match fleet.tile(at) {
                Some(tile) if tile.is_fired() && tile.ship().is_some() => 'X',
                Some(tile) if tile.is_fired() => '.',
                Some(tile) => match tile.ship() {
                    Some(ship) if show_ships => {
                        char::from_digit(fleet.ship(ship).length() as u32, 10).unwrap_or('#')
                    }
                    _ => ' ',
                },
                None => ' ',
            };
            print!(" {}", ch);
        }
        println!();
    }
}

/// Render a player's memory of the opposing grid: `X` hit, `o` miss,
/// `.` unexplored.
pub fn print_observations(observations: &ObservationGrid) {
    print!("   ");
    for x in 0..observations.width() {
        print!(" {}", (b'A' + x) as char);
    }
    println!();
    for y in 0..observations.height() {
        print!("{:2} ", y);
        for x in 0..observations.width() {
            let ch = match observations.get(Coord { x, y }) {
                Observation::Hit => 'X',
                Observation::Miss => 'o',
                Observation::Unknown => '.',
            };
            print!(" {}", ch);
        }
        println!();
    }
}

/// Display the session from one side's point of view: the opponent grid
/// as observed on top, that side's own fleet below.
pub fn print_player_view(session: &GameSession, side: usize) {
    println!("Opponent waters:");
    print_observations(session.observations(side));
    println!("\nYour fleet:");
    print_fleet(session.fleet(side), true);
    let stats = session.stats(side);
    println!(
        "{} shots fired, {} hits, {} misses. Accuracy: {}%.",
        stats.shots_fired,
        stats.hits,
        stats.misses,
        stats.accuracy_percent()
    );
}

fn parse_orientation(token: &str) -> Orientation {
    if token.starts_with('v') || token.starts_with('V') {
        Orientation::Vertical
    } else {
        Orientation::Horizontal
    }
}

impl Player for CliPlayer {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_ai(&self) -> bool {
        false
    }

    fn place_ships(&mut self, rng: &mut SmallRng, fleet: &mut Fleet) -> Result<(), GameError> {
        println!(
            "{}: place your ships (e.g. B3 H). Press enter for random placement.",
            self.name
        );
        for id in 0..fleet.ships().len() {
            loop {
                print_fleet(fleet, true);
                let ship = fleet.ship(id);
                print!("Place {}: ", ship);
                io::stdout().flush().unwrap();
                let line = read_trimmed_line();
                if line.is_empty() {
                    let (origin, orientation) = fleet.random_placement(rng, id)?;
                    fleet.place_ship(id, origin, orientation)?;
                    break;
                }
                let mut parts = line.split_whitespace();
                let coord = parts
                    .next()
                    .map(|token| Coord::parse(token, fleet.config()));
                let orientation = parse_orientation(parts.next().unwrap_or("H"));
                match coord {
                    Some(Ok(origin)) => match fleet.place_ship(id, origin, orientation) {
                        Ok(()) => break,
                        Err(err) => println!("Error: {}", err),
                    },
                    Some(Err(err)) => println!("Error: {}", err),
                    None => println!("Invalid input"),
                }
            }
        }
        Ok(())
    }

    fn request_shot(
        &mut self,
        _rng: &mut SmallRng,
        observations: &ObservationGrid,
    ) -> Result<Coord, GameError> {
        println!("\n{}'s turn.", self.name);
        print_observations(observations);
        let last = Coord {
            x: observations.width() - 1,
            y: observations.height() - 1,
        };
        print!("Choose your target (A0 to {}): ", last);
        io::stdout().flush().unwrap();
        Coord::parse(&read_trimmed_line(), &self.config)
    }

    fn shot_missed(&mut self, at: Coord) {
        println!("Your shot at {} splashed into empty water.", at);
    }

    fn shot_hit(&mut self, at: Coord) {
        println!("Direct hit at {}!", at);
    }

    fn shot_sunk_ship(&mut self, at: Coord, ship: ShipInfo) {
        println!("You sank an enemy {} at {}!", ship.name, at);
    }

    fn repeat_at_sunk_ship(&mut self, at: Coord, ship: ShipInfo) {
        println!("The {} at {} is already sunk.", ship.name, at);
    }

    fn repeat_at_same_hit(&mut self, at: Coord) {
        println!("You already hit {}.", at);
    }

    fn repeat_at_miss(&mut self, at: Coord) {
        println!("You already fired at {}; still nothing there.", at);
    }

    fn been_missed(&mut self, at: Coord) {
        println!("The enemy missed at {}.", at);
    }

    fn been_hit(&mut self, at: Coord, ship: ShipInfo) {
        println!("Your {} has been hit at {}!", ship.name, at);
    }

    fn ship_sunk(&mut self, at: Coord, ship: ShipInfo) {
        println!("Your {} has been sunk at {}!", ship.name, at);
    }

    fn enemy_repeat_at_sunk(&mut self, at: Coord, ship: ShipInfo) {
        println!("The enemy keeps firing at your sunken {} ({}).", ship.name, at);
    }

    fn enemy_repeat_at_same_hit(&mut self, at: Coord, _ship: ShipInfo) {
        println!("The enemy keeps firing at the same hole ({}).", at);
    }

    fn enemy_repeat_at_miss(&mut self, at: Coord) {
        println!("The enemy keeps firing at nothing ({}).", at);
    }
}
