//! Matrix Game Analyzer
//!
//! Loads a game from a JSON file or the built-in catalogue, prints every
//! analysis and optionally writes the report as JSON.
//!
//! ```text
//! analyze --game prisoners-dilemma
//! analyze game.json --output report.json --play 1000 --seed 42
//! RUST_LOG=debug analyze --game chicken
//! ```

use std::process;
use std::time::Instant;

use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rustc_hash::FxHashMap;

use bimatrix_solver::games::classic;
use bimatrix_solver::matrix::{play, Coordinate, GameError, GameFile, GameModel, SolverConfig};
use bimatrix_solver::Analysis;

#[derive(Parser, Debug)]
#[command(name = "analyze", about = "Analyze a two-player matrix game")]
struct Args {
    /// Game file in JSON format
    file: Option<String>,

    /// Name of a built-in game instead of a file
    #[arg(long, conflicts_with = "file")]
    game: Option<String>,

    /// List the built-in games and exit
    #[arg(long)]
    list: bool,

    /// Write the report to this path as JSON
    #[arg(short, long)]
    output: Option<String>,

    /// Sample this many rounds of play
    #[arg(long, default_value_t = 0)]
    play: u64,

    /// Seed for sampled play
    #[arg(long)]
    seed: Option<u64>,

    /// Tie tolerance (overrides the file's config)
    #[arg(long)]
    tolerance: Option<f64>,

    /// Exit with an error if the game has no pure Nash equilibrium
    #[arg(long)]
    require_equilibrium: bool,
}

fn load(args: &Args) -> Result<(String, GameModel, SolverConfig), GameError> {
    if let Some(name) = &args.game {
        let game = classic::find(name).ok_or_else(|| {
            GameError::Io(format!("unknown game '{}' (try --list)", name))
        })?;
        return Ok((game.name.to_string(), game.model()?, SolverConfig::default()));
    }
    match &args.file {
        Some(path) => {
            let file = GameFile::from_json_file(path)?;
            let name = if file.name.is_empty() { path.clone() } else { file.name.clone() };
            Ok((name, file.to_model()?, file.config.clone()))
        }
        None => Ok(("matching-pennies".to_string(), GameModel::default(), SolverConfig::default())),
    }
}

fn run(args: &Args) -> Result<(), GameError> {
    let (name, model, mut config) = load(args)?;
    if let Some(tolerance) = args.tolerance {
        config = config.with_tolerance(tolerance);
    }
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }
    config
        .validate()
        .map_err(|e| GameError::Io(format!("invalid config: {}", e)))?;

    let start = Instant::now();
    let analysis = Analysis::run(&name, &model, &config)?;
    log::info!("analysis finished in {:.3}ms", start.elapsed().as_secs_f64() * 1000.0);

    analysis.print_summary();

    if args.require_equilibrium && analysis.nash.is_none() {
        return Err(GameError::NoEquilibrium);
    }

    if args.play > 0 {
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let mut counts: FxHashMap<Coordinate, u64> = FxHashMap::default();
        let (mut total1, mut total2) = (0.0, 0.0);
        for _ in 0..args.play {
            let round = play(&model, &config, &mut rng)?;
            *counts.entry(round.coordinate).or_insert(0) += 1;
            total1 += round.payoffs.0;
            total2 += round.payoffs.1;
        }

        let mut ordered: Vec<_> = counts.into_iter().collect();
        ordered.sort();
        println!("\nSampled {} rounds:", args.play);
        for (coordinate, count) in ordered {
            println!("  {}: {:.1}%", coordinate, 100.0 * count as f64 / args.play as f64);
        }
        println!(
            "  Average payoffs: {:.4} / {:.4}",
            total1 / args.play as f64,
            total2 / args.play as f64
        );
    }

    if let Some(path) = &args.output {
        analysis.save_json(path)?;
        println!("Saved JSON: {}", path);
    }
    Ok(())
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    if args.list {
        for game in classic::catalogue() {
            println!("{:<22} {}", game.name, game.description);
        }
        return;
    }

    if let Err(e) = run(&args) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
