#![warn(clippy::pedantic)]

use std::{
    fs, io,
    path::{Path, PathBuf},
    time::Instant,
};

use clap::{Parser, Subcommand};
use color_eyre::eyre::eyre;
use cube::{Cube, CubieCube, Move};
use env_logger::TimestampPrecision;
use itertools::Itertools;
use log::{LevelFilter, info, warn};
use solver::search::DEFAULT_MAX_LENGTH;
use solver::service::{self, Reply};
use solver::{Tables, TwoPhaseSolver, persist};

/// Solves 3x3x3 cubes with the two-phase algorithm
#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Where to cache the solving tables between runs
    #[arg(long, short = 't', default_value = "tables.bin", value_name = "TABLES")]
    tables: PathBuf,

    /// Increase logging verbosity (can be repeated)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve a cube given as 54 face colors in up, left, front, right,
    /// back, down order
    Solve {
        /// The facelet string, nine colors per face
        cube: String,
        /// Upper bound on the number of moves
        #[arg(long, default_value_t = DEFAULT_MAX_LENGTH)]
        max_length: usize,
        /// Print the reply as JSON instead of plain text
        #[arg(long)]
        json: bool,
    },
    /// Generate the tables and write them to the cache, replacing any
    /// existing file
    Tables,
    /// Print a scrambled cube as a facelet string
    Scramble {
        /// Number of random moves to apply
        #[arg(long, default_value_t = 30)]
        moves: usize,
        /// Seed for a reproducible scramble
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Time batches of random solves at a few scramble lengths
    Benchmark {
        /// Number of cubes to solve per scramble length
        #[arg(long, default_value_t = 100)]
        trials: usize,
    },
}

/// Scramble lengths the benchmark sweeps, from barely-mixed to saturated.
const BENCHMARK_SHUFFLES: [usize; 3] = [10, 25, 40];

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(match cli.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        })
        .format_timestamp(Some(TimestampPrecision::Millis))
        .init();

    match cli.command {
        Commands::Solve {
            cube,
            max_length,
            json,
        } => {
            let tables = load_or_generate(&cli.tables)?;
            let reply = service::reply_for(&cube, &tables, max_length);
            if json {
                println!("{}", serde_json::to_string(&reply)?);
                return Ok(());
            }
            match reply {
                Reply::Solution(solution) => {
                    if solution.moves.is_empty() {
                        println!("already solved");
                    } else {
                        println!("{}", solution.moves);
                    }
                    info!("solved in {:.3}s", solution.time_to_solve);
                }
                Reply::Error(error) => return Err(eyre!(error.error)),
            }
        }
        Commands::Tables => {
            let tables = Tables::generate();
            fs::write(&cli.tables, persist::encode(&tables))?;
            println!("wrote {}", cli.tables.display());
        }
        Commands::Scramble { moves, seed } => {
            let mut rng = match seed {
                Some(seed) => fastrand::Rng::with_seed(seed),
                None => fastrand::Rng::new(),
            };
            let sequence = (0..moves)
                .map(|_| Move::ALL[rng.usize(..Move::COUNT)])
                .collect_vec();
            let mut cube = Cube::solved();
            for &mv in &sequence {
                cube.transform(mv);
            }
            println!("{cube}");
            info!("scramble: {}", sequence.iter().join(" "));
        }
        Commands::Benchmark { trials } => {
            let tables = load_or_generate(&cli.tables)?;
            let solver = TwoPhaseSolver::new(&tables);
            let mut rng = fastrand::Rng::new();
            println!(
                "{:>8}  {:>9}  {:>9}  {:>9}  {:>6}  {:>5}  {:>5}",
                "shuffles", "time", "min time", "max time", "moves", "min", "max"
            );
            for shuffles in BENCHMARK_SHUFFLES {
                let mut times = Vec::with_capacity(trials);
                let mut lengths = Vec::with_capacity(trials);
                for _ in 0..trials {
                    let mut cube = CubieCube::SOLVED;
                    for _ in 0..shuffles {
                        cube.apply_move(Move::ALL[rng.usize(..Move::COUNT)]);
                    }
                    let start = Instant::now();
                    let moves = solver.solve(&cube)?;
                    times.push(start.elapsed().as_secs_f64());
                    lengths.push(moves.len());
                    for mv in moves {
                        cube.apply_move(mv);
                    }
                    if !cube.is_solved() {
                        return Err(eyre!("a solution failed to solve its scramble"));
                    }
                }
                println!(
                    "{shuffles:>8}  {:>9.5}  {:>9.5}  {:>9.5}  {:>6.1}  {:>5}  {:>5}",
                    times.iter().sum::<f64>() / trials as f64,
                    times.iter().copied().fold(f64::INFINITY, f64::min),
                    times.iter().copied().fold(0.0, f64::max),
                    lengths.iter().sum::<usize>() as f64 / trials as f64,
                    lengths.iter().min().copied().unwrap_or(0),
                    lengths.iter().max().copied().unwrap_or(0),
                );
            }
        }
    }

    Ok(())
}

/// Reads the table cache, falling back to a fresh generation (and writing
/// the cache) when the file is missing or stale.
fn load_or_generate(path: &Path) -> color_eyre::Result<Tables> {
    match fs::read(path) {
        Ok(data) => match persist::decode(&data) {
            Ok(tables) => {
                info!("loaded tables from {}", path.display());
                return Ok(tables);
            }
            Err(error) => warn!("ignoring {}: {error}", path.display()),
        },
        Err(error) if error.kind() == io::ErrorKind::NotFound => {}
        Err(error) => return Err(error.into()),
    }
    let tables = Tables::generate();
    fs::write(path, persist::encode(&tables))?;
    info!("cached tables at {}", path.display());
    Ok(tables)
}
