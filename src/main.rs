#[cfg(not(feature = "std"))]
fn main() {}

#[cfg(feature = "std")]
use hitseeker::{
    init_logging, play_match, AiPlayer, AnalyzerOptions, CellStatus, GuessGrid, RectangularGrid,
    StrategyConfig, TargetBoard, SHIPS, STANDARD_GRID,
};

#[cfg(feature = "std")]
use clap::{Args, Parser};
#[cfg(feature = "std")]
use rand::rngs::SmallRng;
#[cfg(feature = "std")]
use rand::SeedableRng;
#[cfg(feature = "std")]
use serde_json::json;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[cfg(feature = "std")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Clone, Debug)]
#[cfg(feature = "std")]
struct EngineArgs {
    #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
    seed: Option<u64>,
    /// Rank the screening pattern above unfiltered targets.
    #[arg(long)]
    screening: bool,
    /// Do not attribute sunk runs to fleet ships.
    #[arg(long)]
    no_size_tracking: bool,
    /// Keep ships from touching each other on the target board.
    #[arg(long)]
    spaced: bool,
    /// Log every deduction step.
    #[arg(long, short)]
    verbose: bool,
}

#[cfg(feature = "std")]
impl EngineArgs {
    fn config(&self) -> StrategyConfig {
        StrategyConfig {
            screening: self.screening,
            analyzer: AnalyzerOptions {
                track_ship_sizes: !self.no_size_tracking,
            },
        }
    }

    fn rng(&self) -> SmallRng {
        match self.seed {
            Some(s) => SmallRng::seed_from_u64(s),
            None => {
                let mut seed_rng = rand::rng();
                SmallRng::from_rng(&mut seed_rng)
            }
        }
    }
}

#[derive(Parser)]
#[cfg(feature = "std")]
enum Commands {
    /// Let the AI play one game against a random layout and show the grid.
    Play {
        #[command(flatten)]
        engine: EngineArgs,
    },
    /// Play many games and print a JSON summary.
    Bench {
        #[command(flatten)]
        engine: EngineArgs,
        #[arg(long, default_value_t = 100)]
        games: usize,
    },
}

#[cfg(feature = "std")]
const MAX_TURNS: usize = 100;

#[cfg(feature = "std")]
fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Play { engine } => {
            init_logging(engine.verbose);
            if let Some(s) = engine.seed {
                println!("Using fixed seed: {} (game will be reproducible)", s);
            }
            let mut rng = engine.rng();
            let mut board = TargetBoard::random(STANDARD_GRID, &SHIPS, &mut rng, engine.spaced)
                .map_err(|e| anyhow::anyhow!(e))?;
            let mut player = AiPlayer::new(STANDARD_GRID, &SHIPS, engine.config());
            let report = play_match(&mut player, &mut board, &mut rng, MAX_TURNS)?;
            print_final_grid(&board, &player);
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Commands::Bench { engine, games } => {
            init_logging(engine.verbose);
            let mut rng = engine.rng();
            let mut turns = Vec::with_capacity(games);
            let mut failures = 0usize;
            for game in 0..games {
                let mut board =
                    TargetBoard::random(STANDARD_GRID, &SHIPS, &mut rng, engine.spaced)
                        .map_err(|e| anyhow::anyhow!(e))?;
                let mut player = AiPlayer::new(STANDARD_GRID, &SHIPS, engine.config());
                match play_match(&mut player, &mut board, &mut rng, MAX_TURNS) {
                    Ok(report) if report.won => turns.push(report.turns),
                    Ok(_) => failures += 1,
                    Err(e) => {
                        eprintln!("Game {} ended with an error: {}", game, e);
                        failures += 1;
                    }
                }
            }
            let won = turns.len();
            let mean = if won == 0 {
                0.0
            } else {
                turns.iter().sum::<usize>() as f64 / won as f64
            };
            let result = json!({
                "games": games,
                "won": won,
                "failed": failures,
                "mean_turns": mean,
                "min_turns": turns.iter().min(),
                "max_turns": turns.iter().max(),
                "screening": engine.screening,
                "size_tracking": !engine.no_size_tracking,
            });
            println!("{}", serde_json::to_string(&result)?);
        }
    }
    Ok(())
}

#[cfg(feature = "std")]
fn print_final_grid(board: &TargetBoard<RectangularGrid>, player: &AiPlayer<RectangularGrid>) {
    let mut grid = GuessGrid::new(STANDARD_GRID);
    for mv in player.strategy().analyzer().previous_moves().moves() {
        grid.record(mv.target, mv.result);
    }
    println!("{}", grid);
    for (ship, cells) in board.ships() {
        let sunk = cells.iter().all(|c| grid.status(*c) == Some(CellStatus::Hit));
        let label = if sunk { "sunk" } else { "afloat" };
        println!(
            "{:<10} {:<6} {}",
            ship.name(),
            label,
            cells.iter().map(|c| c.to_string()).collect::<Vec<_>>().join(" ")
        );
    }
}
