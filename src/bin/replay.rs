// Standalone replay tool for analyzing Snake Battle debug logs
//
// Usage:
//   cargo run --bin replay -- <log_file> [options]
//
// Options:
//   --all                  Replay all ticks in order
//   --ticks <t1,t2>        Replay specific ticks (comma-separated)
//   --validate             Check recorded moves against expectations
//   --seed <n>             Seed for random tie-breaking (default: 0)
//   --verbose              Show detailed output for each tick
//   --config <path>        Path to Snake.toml (default: Snake.toml)

use std::env;
use std::process;

use snakebattle_client::config::Config;
use snakebattle_client::replay::ReplayEngine;
use snakebattle_client::types::Direction;

fn print_usage() {
    eprintln!("Snake Battle Replay Tool");
    eprintln!();
    eprintln!("USAGE:");
    eprintln!("  replay <log_file> [OPTIONS]");
    eprintln!();
    eprintln!("OPTIONS:");
    eprintln!("  --all                   Replay all ticks in the log");
    eprintln!("  --ticks <T1,T2,...>     Replay specific ticks (comma-separated)");
    eprintln!("  --validate <T:M,...>    Validate recorded moves (format: tick:move|move,...)");
    eprintln!("  --seed <N>              Seed for random tie-breaking (default: 0)");
    eprintln!("  --verbose               Show detailed output for each tick");
    eprintln!("  --config <path>         Path to Snake.toml (default: Snake.toml)");
    eprintln!("  --help                  Show this help message");
    eprintln!();
    eprintln!("EXAMPLES:");
    eprintln!("  replay snakebattle_debug.jsonl --all");
    eprintln!("  replay snakebattle_debug.jsonl --ticks 5,10,15 --seed 42");
    eprintln!("  replay snakebattle_debug.jsonl --validate 5:UP,10:LEFT|RIGHT");
}

fn parse_ticks(s: &str) -> Result<Vec<u64>, String> {
    s.split(',')
        .map(|t| {
            t.trim()
                .parse::<u64>()
                .map_err(|e| format!("Invalid tick number '{}': {}", t, e))
        })
        .collect()
}

fn parse_expected_moves(s: &str) -> Result<Vec<(u64, Vec<Direction>)>, String> {
    s.split(',')
        .map(|pair| {
            let parts: Vec<&str> = pair.trim().split(':').collect();
            if parts.len() != 2 {
                return Err(format!("Invalid format '{}'. Expected 'tick:move'", pair));
            }

            let tick = parts[0]
                .parse::<u64>()
                .map_err(|e| format!("Invalid tick number '{}': {}", parts[0], e))?;

            // Support multiple acceptable moves separated by '|'
            let moves: Result<Vec<Direction>, String> =
                parts[1].split('|').map(|m| m.parse::<Direction>()).collect();

            Ok((tick, moves?))
        })
        .collect()
}

enum Mode {
    All,
    Ticks(String),
    Validate(String),
}

fn option_value(args: &[String], i: usize, name: &str) -> String {
    match args.get(i + 1) {
        Some(value) => value.clone(),
        None => {
            eprintln!("Error: {} requires an argument", name);
            process::exit(1);
        }
    }
}

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 || args.contains(&"--help".to_string()) {
        print_usage();
        process::exit(if args.contains(&"--help".to_string()) {
            0
        } else {
            1
        });
    }

    let log_file = &args[1];
    let mut config_path = "Snake.toml".to_string();
    let mut verbose = false;
    let mut seed = 0u64;
    let mut mode = None;

    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "--all" => mode = Some(Mode::All),
            "--ticks" => {
                mode = Some(Mode::Ticks(option_value(&args, i, "--ticks")));
                i += 1;
            }
            "--validate" => {
                mode = Some(Mode::Validate(option_value(&args, i, "--validate")));
                i += 1;
            }
            "--config" => {
                config_path = option_value(&args, i, "--config");
                i += 1;
            }
            "--seed" => {
                let value = option_value(&args, i, "--seed");
                seed = value.parse().unwrap_or_else(|e| {
                    eprintln!("Error: Invalid seed '{}': {}", value, e);
                    process::exit(1);
                });
                i += 1;
            }
            "--verbose" => verbose = true,
            _ => {
                eprintln!("Error: Unknown option '{}'", args[i]);
                print_usage();
                process::exit(1);
            }
        }
        i += 1;
    }

    let mode = mode.unwrap_or_else(|| {
        eprintln!("Error: Must specify --all, --ticks, or --validate");
        print_usage();
        process::exit(1);
    });

    let config = Config::from_file(&config_path).unwrap_or_else(|e| {
        eprintln!("Warning: Could not load config from '{}': {}", config_path, e);
        eprintln!("Using default configuration");
        Config::default_hardcoded()
    });

    println!("Loaded configuration from: {}", config_path);
    println!("Replay log file: {}", log_file);
    println!();

    let engine = ReplayEngine::new(config, seed, verbose);

    let entries = match engine.load_log_file(log_file) {
        Ok(entries) => entries,
        Err(e) => {
            eprintln!("Error loading log file: {}", e);
            process::exit(1);
        }
    };

    if entries.is_empty() {
        eprintln!("Error: Log file is empty");
        process::exit(1);
    }

    println!("Loaded {} log entries\n", entries.len());

    match mode {
        Mode::All => {
            println!("Replaying all {} ticks...\n", entries.len());
            let results = engine.replay_all(&entries);
            engine.print_report(&results);
        }
        Mode::Ticks(arg) => {
            let ticks = parse_ticks(&arg).unwrap_or_else(|e| {
                eprintln!("Error parsing ticks: {}", e);
                process::exit(1);
            });

            println!("Replaying {} specific tick(s)...\n", ticks.len());
            match engine.replay_ticks(&entries, &ticks) {
                Ok(results) => engine.print_report(&results),
                Err(e) => {
                    eprintln!("Error during replay: {}", e);
                    process::exit(1);
                }
            }
        }
        Mode::Validate(arg) => {
            let expected = parse_expected_moves(&arg).unwrap_or_else(|e| {
                eprintln!("Error parsing expected moves: {}", e);
                process::exit(1);
            });

            println!("Validating {} expected move(s)...\n", expected.len());
            match engine.validate_expected_moves(&entries, &expected) {
                Ok(()) => println!("✓ All expected moves validated successfully!"),
                Err(e) => {
                    eprintln!("✗ Validation failed: {}", e);
                    process::exit(1);
                }
            }
        }
    }
}
