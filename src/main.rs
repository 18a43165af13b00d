use anyhow::Context;
use broadside::{
    init_logging, print_fleet, print_player_view, CliPlayer, DrawReason, GameConfig, GameOutcome,
    GameSession, Player, StrategyRegistry,
};
use clap::{Args, Parser, Subcommand};
use rand::rngs::SmallRng;
use rand::SeedableRng;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct GridArgs {
    #[arg(long, default_value_t = 10, help = "Playing field width (letters)")]
    width: u8,
    #[arg(long, default_value_t = 10, help = "Playing field height (numbers)")]
    height: u8,
    #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
    seed: Option<u64>,
}

#[derive(Subcommand)]
enum Commands {
    /// Watch two computer players battle each other.
    Watch {
        #[command(flatten)]
        grid: GridArgs,
        #[arg(long, default_value = "hunt-target", help = "Strategy for the first player")]
        first: String,
        #[arg(long, default_value = "hunt-target", help = "Strategy for the second player")]
        second: String,
    },
    /// Play against a computer opponent.
    Play {
        #[command(flatten)]
        grid: GridArgs,
        #[arg(long, default_value = "hunt-target", help = "Opponent strategy")]
        opponent: String,
    },
    /// Two humans sharing one keyboard.
    Hotseat {
        #[command(flatten)]
        grid: GridArgs,
    },
}

fn make_rng(seed: Option<u64>) -> SmallRng {
    match seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => {
            let mut seed_rng = rand::rng();
            SmallRng::from_rng(&mut seed_rng)
        }
    }
}

fn ai_player(
    registry: &StrategyRegistry,
    strategy: &str,
    player_name: &str,
) -> anyhow::Result<Box<dyn Player>> {
    registry.build(strategy, player_name).with_context(|| {
        format!(
            "unknown strategy {:?}; available: {}",
            strategy,
            registry.strategies().join(", ")
        )
    })
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();
    let registry = StrategyRegistry::with_defaults();

    let (config, mut rng, player_one, player_two): (GameConfig, SmallRng, Box<dyn Player>, Box<dyn Player>) =
        match cli.command {
            Commands::Watch {
                grid,
                first,
                second,
            } => {
                let config = GameConfig::with_grid(grid.width, grid.height);
                (
                    config,
                    make_rng(grid.seed),
                    ai_player(&registry, &first, "The Spanish Armada")?,
                    ai_player(&registry, &second, "Perfidious Albion")?,
                )
            }
            Commands::Play { grid, opponent } => {
                let config = GameConfig::with_grid(grid.width, grid.height);
                (
                    config,
                    make_rng(grid.seed),
                    Box::new(CliPlayer::new("You", config)),
                    ai_player(&registry, &opponent, "The Girls")?,
                )
            }
            Commands::Hotseat { grid } => {
                let config = GameConfig::with_grid(grid.width, grid.height);
                (
                    config,
                    make_rng(grid.seed),
                    Box::new(CliPlayer::new("Player 1", config)),
                    Box::new(CliPlayer::new("Player 2", config)),
                )
            }
        };

    let mut session = GameSession::new(config, player_one, player_two)?;
    println!(
        "The battle between {} and {} begins!",
        session.player_name(0),
        session.player_name(1)
    );
    let outcome = session.play(&mut rng)?;

    println!("\n================ GAME OVER ================\n");
    for side in 0..2 {
        println!(
            "{}: fleet strength {}/{}",
            session.player_name(side),
            session.fleet(side).current_strength(),
            session.fleet(side).original_strength()
        );
        print_fleet(session.fleet(side), true);
        let stats = session.stats(side);
        println!(
            "{} shots fired, {} hits, {} misses. Accuracy: {}%.\n",
            stats.shots_fired,
            stats.hits,
            stats.misses,
            stats.accuracy_percent()
        );
    }
    match outcome {
        GameOutcome::Winner(winner) => {
            if !session.is_ai(winner) {
                print_player_view(&session, winner);
            }
            println!(
                "RULE THE WAVES! {} has won the battle after {} turns!",
                session.player_name(winner),
                session.turns_played()
            );
        }
        GameOutcome::Draw(DrawReason::MutualAnnihilation) => {
            println!("Both fleets have been sunk. The fight is a draw!");
        }
        GameOutcome::Draw(DrawReason::Exhaustion) => {
            println!("Both fleets have depleted their munitions! The fight is a draw!");
        }
    }
    Ok(())
}
