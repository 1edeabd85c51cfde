//! Balance simulator CLI.
//!
//! Runs a seeded headless session and reports progression statistics.
//!
//! Usage:
//!   cargo run --bin simulate -- [OPTIONS]
//!
//! Examples:
//!   cargo run --bin simulate                     # Default: one simulated hour
//!   cargo run --bin simulate -- -t 6000          # 10 simulated minutes
//!   cargo run --bin simulate -- --seed 42        # Reproducible run
//!   cargo run --bin simulate -- --json           # Also write a JSON report

use shardfall::simulator::{run_simulation, SimConfig};
use std::env;

fn main() {
    let args: Vec<String> = env::args().collect();
    let config = parse_args(&args);

    println!("╔═══════════════════════════════════════════════╗");
    println!("║         SHARDFALL BALANCE SIMULATOR           ║");
    println!("╚═══════════════════════════════════════════════╝");
    println!();
    println!("Configuration:");
    println!("  Ticks:       {}", config.ticks);
    println!("  Auto-spend:  {}", config.auto_spend);
    if let Some(seed) = config.seed {
        println!("  Seed:        {}", seed);
    }
    println!();
    println!("Running simulation...");
    println!();

    let report = run_simulation(&config);
    println!("{}", report.to_text());

    if args.iter().any(|a| a == "--json") {
        let filename = format!(
            "sim_report_{}.json",
            chrono::Utc::now().format("%Y%m%d_%H%M%S")
        );
        std::fs::write(&filename, report.to_json()).expect("Failed to write JSON report");
        println!("JSON report saved to: {}", filename);
    }
}

fn parse_args(args: &[String]) -> SimConfig {
    let mut config = SimConfig::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-t" | "--ticks" => {
                if i + 1 < args.len() {
                    config.ticks = args[i + 1].parse().unwrap_or(config.ticks);
                    i += 1;
                }
            }
            "--seed" => {
                if i + 1 < args.len() {
                    config.seed = args[i + 1].parse().ok();
                    i += 1;
                }
            }
            "--no-spend" => config.auto_spend = false,
            _ => {}
        }
        i += 1;
    }

    config
}
