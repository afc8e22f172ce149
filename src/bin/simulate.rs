//! Balance simulator CLI.
//!
//! Plays the level catalog with scripted bots to check pacing and difficulty.
//!
//! Usage:
//!   cargo run --bin simulate -- [OPTIONS]
//!
//! Examples:
//!   cargo run --bin simulate                      # Default: 100 runs
//!   cargo run --bin simulate -- -n 20 -a 0.9      # 20 runs, sloppier tapping
//!   cargo run --bin simulate -- --seed 42         # Reproducible run

use realms::core::config::RealmsConfig;
use realms::simulator::{run_simulation, SimConfig};
use std::env;
use std::path::Path;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("realms=warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();
    let config = parse_args(&args);

    println!("╔═══════════════════════════════════════════════════════════════╗");
    println!("║              REALMS BALANCE SIMULATOR                         ║");
    println!("╚═══════════════════════════════════════════════════════════════╝");
    println!();
    println!("Configuration:");
    println!("  Runs:             {}", config.num_runs);
    println!("  Tap Accuracy:     {:.2}", config.tap_accuracy);
    println!("  Dodge Reliability:{:.2}", config.dodge_reliability);
    println!("  Frame:            {} ms", config.frame_ms);
    println!("  Max Rounds:       {}", config.max_rounds_per_run);
    println!(
        "  Watermark:        {:?}",
        config.progression.watermark_ordering
    );
    println!(
        "  Repeat Wins:      {:?}",
        config.progression.repeat_completion
    );
    if let Some(seed) = config.seed {
        println!("  Seed:             {}", seed);
    }
    println!();
    println!("Running simulation...");
    println!();

    let report = run_simulation(&config);

    println!("{}", report.to_text());

    if args.iter().any(|a| a == "--json") {
        let json = report.to_json();
        let filename = format!(
            "sim_report_{}.json",
            chrono::Utc::now().format("%Y%m%d_%H%M%S")
        );
        match std::fs::write(&filename, json) {
            Ok(()) => println!("JSON report saved to: {}", filename),
            Err(e) => {
                eprintln!("Failed to write JSON report: {}", e);
                std::process::exit(1);
            }
        }
    }
}

fn parse_args(args: &[String]) -> SimConfig {
    let mut config = SimConfig::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-n" | "--runs" => {
                if i + 1 < args.len() {
                    config.num_runs = args[i + 1].parse().unwrap_or(100);
                    i += 1;
                }
            }
            "-s" | "--seed" => {
                if i + 1 < args.len() {
                    config.seed = args[i + 1].parse().ok();
                    i += 1;
                }
            }
            "-a" | "--accuracy" => {
                if i + 1 < args.len() {
                    if let Ok(p) = args[i + 1].parse::<f64>() {
                        config.tap_accuracy = p.clamp(0.0, 1.0);
                    }
                    i += 1;
                }
            }
            "-d" | "--dodge" => {
                if i + 1 < args.len() {
                    if let Ok(p) = args[i + 1].parse::<f64>() {
                        config.dodge_reliability = p.clamp(0.0, 1.0);
                    }
                    i += 1;
                }
            }
            "-f" | "--frame" => {
                if i + 1 < args.len() {
                    config.frame_ms = args[i + 1].parse().unwrap_or(16);
                    i += 1;
                }
            }
            "-r" | "--rounds" => {
                if i + 1 < args.len() {
                    config.max_rounds_per_run = args[i + 1].parse().unwrap_or(2_000);
                    i += 1;
                }
            }
            "-c" | "--config" => {
                if i + 1 < args.len() {
                    match RealmsConfig::load(Path::new(&args[i + 1])) {
                        Ok(loaded) => config.progression = loaded.progression,
                        Err(e) => eprintln!("Ignoring config {}: {}", args[i + 1], e),
                    }
                    i += 1;
                }
            }
            "-v" | "--verbose" => {
                config.verbosity = 2;
            }
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            "--quick" => {
                config = SimConfig {
                    progression: config.progression,
                    ..SimConfig::quick()
                };
            }
            "--perfect" => {
                config = SimConfig {
                    progression: config.progression,
                    ..SimConfig::perfect_play()
                };
            }
            _ => {}
        }
        i += 1;
    }

    config
}

fn print_help() {
    println!("Realms Balance Simulator");
    println!();
    println!("USAGE:");
    println!("    cargo run --bin simulate -- [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    -n, --runs <N>        Number of playthroughs (default: 100)");
    println!("    -s, --seed <S>        Random seed for reproducibility");
    println!("    -a, --accuracy <P>    Chance of a correct tap, 0-1 (default: 0.97)");
    println!("    -d, --dodge <P>       Chance of dodging an obstacle, 0-1 (default: 0.98)");
    println!("    -f, --frame <MS>      Frame length in ms (default: 16)");
    println!("    -r, --rounds <N>      Max rounds per playthrough (default: 2000)");
    println!("    -c, --config <PATH>   Progression settings from a realms TOML config");
    println!("    -v, --verbose         Print every run");
    println!("    --json                Save JSON report");
    println!("    --quick               Quick test (10 runs)");
    println!("    --perfect             Bots never miss (10 runs)");
    println!("    -h, --help            Show this help");
    println!();
    println!("EXAMPLES:");
    println!("    cargo run --bin simulate                      # Default run");
    println!("    cargo run --bin simulate -- -n 20 -a 0.9      # Sloppier tapping");
    println!("    cargo run --bin simulate -- --seed 42         # Reproducible");
    println!("    cargo run --bin simulate -- --perfect         # Fastest possible clear");
}
