//! Self-play match generation CLI.
//!
//! Plays matches via random legal self-play and outputs match records as
//! JSONL, one record per line.
//!
//! Usage:
//!   cargo run --release --bin selfplay -- [OPTIONS]
//!
//! Options:
//!   --matches N     Number of matches to play (default: 10)
//!   --turns N       Turns per match (default: 60)
//!   --seed N        Base random seed (default: 1)
//!   --output FILE   Output file path (default: stdout)
//!   --quiet         Suppress per-match progress output

use std::env;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::time::Instant;

use counterpress::selfplay::{run_self_play, SelfPlayConfig};

fn main() {
    let args: Vec<String> = env::args().collect();
    let mut config = SelfPlayConfig::default();
    let mut output_path: Option<String> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--matches" => {
                i += 1;
                config.num_matches = args[i].parse().expect("invalid --matches value");
            }
            "--turns" => {
                i += 1;
                config.max_turns = args[i].parse().expect("invalid --turns value");
            }
            "--seed" => {
                i += 1;
                config.seed = args[i].parse().expect("invalid --seed value");
            }
            "--output" => {
                i += 1;
                output_path = Some(args[i].clone());
            }
            "--quiet" => {
                config.quiet = true;
            }
            "--help" | "-h" => {
                print_usage();
                return;
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                print_usage();
                std::process::exit(1);
            }
        }
        i += 1;
    }

    if !config.quiet {
        eprintln!(
            "Self-play: {} matches, {} turns each, seed {}",
            config.num_matches, config.max_turns, config.seed
        );
    }

    let start = Instant::now();
    let records = run_self_play(&config);
    let elapsed = start.elapsed();

    let mut out: Box<dyn Write> = match output_path {
        Some(path) => Box::new(BufWriter::new(
            File::create(&path).expect("failed to create output file"),
        )),
        None => Box::new(BufWriter::new(io::stdout())),
    };

    for record in &records {
        let line = serde_json::to_string(record).expect("record serializes");
        writeln!(out, "{}", line).expect("write failed");
    }
    out.flush().expect("flush failed");

    if !config.quiet {
        let goals: u32 = records
            .iter()
            .map(|r| r.home_score as u32 + r.away_score as u32)
            .sum();
        eprintln!(
            "Played {} matches ({} goals) in {:.2}s",
            records.len(),
            goals,
            elapsed.as_secs_f64()
        );
    }
}

fn print_usage() {
    eprintln!("Usage: selfplay [--matches N] [--turns N] [--seed N] [--output FILE] [--quiet]");
}
