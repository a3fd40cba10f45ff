use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;
use route_brute_force::{register_defaults, NAME, PARALLEL_NAME};
use route_core::{Instance, Result, SolverConfig, StrategyRegistry};
use route_validation::logging::{init_logger, LogLevel};
use route_validation::{check_instance, check_sweep_bounds, random_instance, SweepRow};

/// Cross-checks the registered route strategies on seeded random instances and
/// writes one CSV row per (instance, strategy) to stdout.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Random instances per stop count
    #[arg(long, default_value_t = 5)]
    instances: usize,

    #[arg(long, default_value_t = 0)]
    min_stops: usize,

    #[arg(long, default_value_t = 8)]
    max_stops: usize,

    /// Base seed; instance seeds are drawn from it
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Coordinates are drawn from [-extent, extent]
    #[arg(long, default_value_t = 100.0)]
    extent: f64,

    /// Workers for the parallel strategy (0 = all cores)
    #[arg(long, default_value_t = 0)]
    workers: usize,

    /// Solver config as JSON; overrides --workers
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Check a single JSON instance instead of random ones
    #[arg(long, value_name = "FILE")]
    input: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    log_level: LogLevel,

    #[arg(long)]
    log_timestamp: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();
    if let Err(err) = init_logger(args.log_level, args.log_timestamp) {
        eprintln!("{err}");
        return ExitCode::FAILURE;
    }

    match run(&args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            log::error!("sweep: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<bool> {
    check_sweep_bounds(args.min_stops, args.max_stops, args.extent)?;
    let config = match &args.config {
        Some(path) => SolverConfig::from_json_str(&std::fs::read_to_string(path)?)?,
        None => SolverConfig::default()
            .with_workers(args.workers)
            .with_max_stops(args.max_stops.max(SolverConfig::default().max_stops)),
    };
    config.validate()?;

    let mut registry = StrategyRegistry::new();
    register_defaults(&mut registry, &config);
    let strategies = vec![NAME.to_string(), PARALLEL_NAME.to_string()];
    log::info!("sweep: strategies={registry:?} config={config:?}");

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    writeln!(out, "{}", SweepRow::CSV_HEADER)?;

    let mut rows = 0usize;
    let mut failures = 0usize;
    let mut emit = |batch: Vec<SweepRow>, out: &mut dyn Write| -> Result<()> {
        for row in batch {
            rows += 1;
            if !row.passed() {
                failures += 1;
            }
            writeln!(out, "{}", row.to_csv())?;
        }
        Ok(())
    };

    if let Some(path) = &args.input {
        let instance = Instance::from_json_str(&std::fs::read_to_string(path)?)?;
        emit(check_instance(0, &instance, &registry, &strategies)?, &mut out)?;
    } else {
        let mut seeds = Xoshiro256PlusPlus::seed_from_u64(args.seed);
        for stops in args.min_stops..=args.max_stops {
            for _ in 0..args.instances {
                let seed: u64 = seeds.gen();
                let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
                let instance = random_instance(&mut rng, stops, args.extent);
                emit(check_instance(seed, &instance, &registry, &strategies)?, &mut out)?;
            }
            log::info!("sweep: stops={stops} done");
        }
    }
    out.flush()?;

    log::info!("sweep: rows={rows} failures={failures}");
    Ok(failures == 0)
}
