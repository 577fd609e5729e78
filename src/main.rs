// Headless snake solver runner
//
// Usage:
//   cargo run -- [options]
//
// Options:
//   --policy <name>     Solver to run (default: random automatic solver)
//   --episodes <n>      Episodes to play (default: runner.episodes)
//   --config <path>     Path to Snake.toml (default: Snake.toml)
//   --seed <n>          Deterministic board and policy choice
//   --no-scores         Do not append to the score log
//   --list              List available solvers

use log::info;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::env;
use std::process;

use snake_solvers::config::Config;
use snake_solvers::environment::Environment;
use snake_solvers::runner::Runner;
use snake_solvers::scores::ScoreLogger;
use snake_solvers::solvers::{self, Solver};

fn print_usage() {
    eprintln!("Snake Solvers");
    eprintln!();
    eprintln!("USAGE:");
    eprintln!("  snake-solvers [OPTIONS]");
    eprintln!();
    eprintln!("OPTIONS:");
    eprintln!("  --policy <name>     Solver long name, short name or abbreviation");
    eprintln!("  --episodes <n>      Number of episodes (default: runner.episodes)");
    eprintln!("  --config <path>     Path to Snake.toml (default: Snake.toml)");
    eprintln!("  --seed <n>          Seed the board and policy choice");
    eprintln!("  --no-scores         Do not write the score log");
    eprintln!("  --list              List available solvers");
    eprintln!("  --help              Show this help message");
    eprintln!();
    eprintln!("EXAMPLES:");
    eprintln!("  # 100 games of the optimised Hamiltonian solver");
    eprintln!("  snake-solvers --policy hco --episodes 100");
    eprintln!();
    eprintln!("  # Reproducible run of a random solver");
    eprintln!("  snake-solvers --seed 7");
}

fn print_solvers(solvers: &[Box<dyn Solver>]) {
    println!("{:<6} {:<32} {}", "ABBR", "NAME", "SCORE FILE");
    for solver in solvers {
        let info = solver.info();
        println!(
            "{:<6} {:<32} {}.jsonl",
            info.abbreviation, info.long_name, info.short_name
        );
    }
}

fn option_value(args: &[String], i: usize, flag: &str) -> String {
    match args.get(i + 1) {
        Some(value) => value.clone(),
        None => {
            eprintln!("Error: {} requires an argument", flag);
            process::exit(1);
        }
    }
}

fn parse_number<T: std::str::FromStr>(value: &str, flag: &str) -> T
where
    T::Err: std::fmt::Display,
{
    value.parse::<T>().unwrap_or_else(|e| {
        eprintln!("Error: Invalid value '{}' for {}: {}", value, flag, e);
        process::exit(1);
    })
}

fn main() {
    // We default to 'info' level logging. But if the `RUST_LOG` environment variable is set,
    // we keep that value instead.
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info");
    }
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.contains(&"--help".to_string()) {
        print_usage();
        process::exit(0);
    }

    let mut config_path: Option<String> = None;
    let mut policy: Option<String> = None;
    let mut episodes: Option<usize> = None;
    let mut seed: Option<u64> = None;
    let mut scores_enabled = true;
    let mut list = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--policy" => {
                policy = Some(option_value(&args, i, "--policy"));
                i += 1;
            }
            "--episodes" => {
                episodes = Some(parse_number(&option_value(&args, i, "--episodes"), "--episodes"));
                i += 1;
            }
            "--config" => {
                config_path = Some(option_value(&args, i, "--config"));
                i += 1;
            }
            "--seed" => {
                seed = Some(parse_number(&option_value(&args, i, "--seed"), "--seed"));
                i += 1;
            }
            "--no-scores" => {
                scores_enabled = false;
            }
            "--list" => {
                list = true;
            }
            _ => {
                eprintln!("Error: Unknown option '{}'", args[i]);
                print_usage();
                process::exit(1);
            }
        }
        i += 1;
    }

    let config = match &config_path {
        Some(path) => Config::from_file(path).unwrap_or_else(|e| {
            eprintln!("Error: Could not load config from '{}': {}", path, e);
            process::exit(1);
        }),
        None => Config::load_or_default(),
    };
    if let Err(e) = config.validate() {
        eprintln!("Error: Invalid configuration: {}", e);
        process::exit(1);
    }

    if list {
        print_solvers(&solvers::all_solvers(&config.safety));
        return;
    }

    let seed = seed.or(config.runner.seed);
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let solver = match &policy {
        Some(name) => match solvers::by_name(name, &config.safety) {
            Some(solver) if solver.info().abbreviation == "hu" => {
                eprintln!("Error: The human solver needs keyboard input and cannot run headless");
                process::exit(1);
            }
            Some(solver) => solver,
            None => {
                eprintln!("Error: Unknown policy '{}'", name);
                print_solvers(&solvers::all_solvers(&config.safety));
                process::exit(1);
            }
        },
        None => {
            let mut automatic = solvers::automatic_solvers(&config.safety);
            let index = rng.random_range(0..automatic.len());
            automatic.swap_remove(index)
        }
    };

    let environment = match seed {
        Some(_) => Environment::with_seed(config.board.width, config.board.height, rng.random()),
        None => Environment::new(config.board.width, config.board.height),
    };

    let info = solver.info();
    let episodes = episodes.unwrap_or(config.runner.episodes);
    info!(
        "Running {} for {} episode(s) on a {}x{} board",
        info.long_name, episodes, config.board.width, config.board.height
    );

    let mut runner = Runner::new(environment, solver, config.runner.max_ticks_per_episode);
    if scores_enabled && config.scores.enabled {
        runner = runner.with_scores(ScoreLogger::new(&config.scores.directory));
    }

    let summary = runner.run_batch(episodes);

    println!();
    println!("Policy:      {} ({})", info.long_name, info.abbreviation);
    println!("Episodes:    {}", summary.episodes);
    println!(
        "Wins:        {} ({:.1}%)",
        summary.wins,
        summary.win_rate() * 100.0
    );
    println!("Deaths:      {}", summary.deaths);
    println!("Timeouts:    {}", summary.timeouts);
    println!("Mean score:  {:.2}", summary.mean_score);
    println!("Max score:   {}", summary.max_score);
    println!("Mean ticks:  {:.1}", summary.mean_ticks);
}
