//! Batch simulation: play N games with the round planner and report the
//! score distribution. Optionally writes a JSON summary.

use dice_poker::simulation::simulate_batch;
use dice_poker::CategoryTable;

struct Args {
    num_games: usize,
    seed: u64,
    turns: Option<u8>,
    variant: String,
    output: Option<String>,
    threads: Option<usize>,
}

fn parse_args() -> Args {
    let args: Vec<String> = std::env::args().collect();
    let mut parsed = Args {
        num_games: 1000,
        seed: 42,
        turns: None,
        variant: "eight".to_string(),
        output: None,
        threads: None,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--games" => {
                i += 1;
                if i < args.len() {
                    parsed.num_games = args[i].parse().unwrap_or_else(|_| {
                        eprintln!("Invalid --games value: {}", args[i]);
                        std::process::exit(1);
                    });
                }
            }
            "--seed" => {
                i += 1;
                if i < args.len() {
                    parsed.seed = args[i].parse().unwrap_or_else(|_| {
                        eprintln!("Invalid --seed value: {}", args[i]);
                        std::process::exit(1);
                    });
                }
            }
            "--turns" => {
                i += 1;
                if i < args.len() {
                    parsed.turns = Some(args[i].parse().unwrap_or_else(|_| {
                        eprintln!("Invalid --turns value: {}", args[i]);
                        std::process::exit(1);
                    }));
                }
            }
            "--variant" => {
                i += 1;
                if i < args.len() {
                    parsed.variant = args[i].clone();
                }
            }
            "--output" => {
                i += 1;
                if i < args.len() {
                    parsed.output = Some(args[i].clone());
                }
            }
            "--threads" => {
                i += 1;
                if i < args.len() {
                    parsed.threads = args[i].parse().ok();
                }
            }
            "--help" | "-h" => {
                println!(
                    "Usage: simulate [--games N] [--seed N] [--turns N] \
                     [--variant eight|seven] [--threads N] [--output FILE]"
                );
                std::process::exit(0);
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                std::process::exit(1);
            }
        }
        i += 1;
    }
    parsed
}

fn main() {
    let args = parse_args();

    if let Some(threads) = args.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .unwrap_or_else(|e| {
                eprintln!("Failed to build thread pool: {}", e);
                std::process::exit(1);
            });
        println!("Rayon threads: {}", threads);
    }

    let table = match args.variant.as_str() {
        "eight" => CategoryTable::standard(),
        "seven" => CategoryTable::seven(),
        other => {
            eprintln!("Unknown variant: {} (expected eight|seven)", other);
            std::process::exit(1);
        }
    };
    let turns = args.turns.unwrap_or(table.len() as u8);

    println!(
        "Simulating {} games of {} turns ({} categories, seed {})...",
        args.num_games,
        turns,
        table.len(),
        args.seed
    );

    let result = simulate_batch(&table, args.num_games, turns, args.seed);

    println!(
        "Done in {:.2}s ({:.0} games/s)",
        result.elapsed.as_secs_f64(),
        args.num_games as f64 / result.elapsed.as_secs_f64().max(1e-9)
    );
    println!("  mean   {:.2}", result.mean);
    println!("  std    {:.2}", result.std_dev);
    println!("  min    {}", result.min);
    println!("  median {}", result.median);
    println!("  max    {}", result.max);

    if let Some(path) = args.output {
        let summary = result.summary(turns, args.seed);
        match serde_json::to_string_pretty(&summary) {
            Ok(json) => {
                if let Err(e) = std::fs::write(&path, json) {
                    eprintln!("Failed to write {}: {}", path, e);
                    std::process::exit(1);
                }
                println!("Wrote summary to {}", path);
            }
            Err(e) => {
                eprintln!("Failed to serialize summary: {}", e);
                std::process::exit(1);
            }
        }
    }
}
