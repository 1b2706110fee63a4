//! Play a single game, printing every roll and decision.
//!
//! Two policies:
//! - `greedy` (default): the adjusted-score round planner — fast at any
//!   horizon.
//! - `optimal`: the full-horizon memoized solver. Lookahead cost grows
//!   steeply with `--turns`; keep the horizon small (1-3) or pass
//!   `--cache` to reuse work across runs.

use rand::rngs::SmallRng;
use rand::SeedableRng;

use dice_poker::adjustment::{AdjustmentContext, RoundPlanner};
use dice_poker::constants::MAX_REROLLS;
use dice_poker::dice::{roll_hand, sample_reroll};
use dice_poker::solver::Solver;
use dice_poker::storage::{load_cache, save_cache};
use dice_poker::transition::{apply, deal};
use dice_poker::types::{Action, Scoreboard, State};
use dice_poker::CategoryTable;

struct Args {
    seed: u64,
    turns: Option<u8>,
    variant: String,
    policy: String,
    cache: Option<String>,
}

fn parse_args() -> Args {
    let args: Vec<String> = std::env::args().collect();
    let mut parsed = Args {
        seed: 42,
        turns: None,
        variant: "eight".to_string(),
        policy: "greedy".to_string(),
        cache: None,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
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
            "--policy" => {
                i += 1;
                if i < args.len() {
                    parsed.policy = args[i].clone();
                }
            }
            "--cache" => {
                i += 1;
                if i < args.len() {
                    parsed.cache = Some(args[i].clone());
                }
            }
            "--help" | "-h" => {
                println!(
                    "Usage: play [--seed N] [--turns N] [--variant eight|seven] \
                     [--policy greedy|optimal] [--cache FILE]"
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

fn format_hand(hand: &[u8; 5]) -> String {
    format!(
        "[{} {} {} {} {}]",
        hand[0], hand[1], hand[2], hand[3], hand[4]
    )
}

fn print_board(table: &CategoryTable, board: &Scoreboard) {
    println!("Final scoreboard:");
    for slot in 0..table.len() {
        match board.get(slot) {
            Some(score) => println!("  {:<16} {}", table.category(slot).name(), score),
            None => println!("  {:<16} -", table.category(slot).name()),
        }
    }
    println!("  {:<16} {}", "Total", board.total());
}

fn play_greedy(table: &CategoryTable, turns: u8, rng: &mut SmallRng) {
    let mut board = Scoreboard::new();
    for turn in 0..turns {
        println!("-- Turn {}/{} --", turn + 1, turns);
        let ctx = AdjustmentContext::new(table, board, turn);
        let mut planner = RoundPlanner::new(ctx);

        let mut hand = roll_hand(rng);
        let mut rolls_left = MAX_REROLLS;
        println!("Rolled {}", format_hand(&hand));
        loop {
            match planner.best_action(&hand, rolls_left) {
                Action::Keep(mask) => {
                    hand = sample_reroll(&hand, mask, rng);
                    rolls_left -= 1;
                    println!("Re-roll (keep mask {:#07b}) -> {}", mask, format_hand(&hand));
                }
                Action::Score(cat) => {
                    let score = cat.score(&hand);
                    let slot = table
                        .slot_of(cat)
                        .expect("planner action from its own table");
                    board = board.recorded(slot, score);
                    println!("Score {} for {}", cat.name(), score);
                    break;
                }
            }
        }
    }
    print_board(table, &board);
}

fn play_optimal(table: &CategoryTable, turns: u8, rng: &mut SmallRng, cache_path: Option<&str>) {
    let cache = cache_path
        .and_then(|path| load_cache(path, table))
        .unwrap_or_default();
    let mut solver = Solver::with_cache(table, cache);

    let mut state = State::fresh(turns);
    while !state.is_terminal() {
        if state.hand.is_none() {
            state = deal(&state, rng);
            println!(
                "-- Turn {}/{} --",
                turns - state.turns_left + 1,
                turns
            );
            println!("Rolled {}", format_hand(&state.hand.unwrap()));
        }

        let action = match solver.best_action(&state) {
            Some(a) => a,
            None => break,
        };
        match action {
            Action::Keep(mask) => {
                state = match apply(&state, action, table, rng) {
                    Ok(s) => s,
                    Err(e) => {
                        eprintln!("Transition failed: {}", e);
                        std::process::exit(1);
                    }
                };
                println!(
                    "Re-roll (keep mask {:#07b}) -> {}",
                    mask,
                    format_hand(&state.hand.unwrap())
                );
            }
            Action::Score(cat) => {
                let hand = state.hand.unwrap();
                let score = cat.score(&hand);
                state = match apply(&state, action, table, rng) {
                    Ok(s) => s,
                    Err(e) => {
                        eprintln!("Transition failed: {}", e);
                        std::process::exit(1);
                    }
                };
                println!("Score {} for {}", cat.name(), score);
            }
        }
    }

    print_board(table, &state.board);
    println!("Memo cache: {} entries", solver.cache().len());
    if let Some(path) = cache_path {
        if let Err(e) = save_cache(solver.cache(), table, path) {
            eprintln!("Failed to save cache: {}", e);
        }
    }
}

fn main() {
    let args = parse_args();

    let table = match args.variant.as_str() {
        "eight" => CategoryTable::standard(),
        "seven" => CategoryTable::seven(),
        other => {
            eprintln!("Unknown variant: {} (expected eight|seven)", other);
            std::process::exit(1);
        }
    };

    let mut rng = SmallRng::seed_from_u64(args.seed);

    match args.policy.as_str() {
        "greedy" => {
            let turns = args.turns.unwrap_or(table.len() as u8);
            println!(
                "Playing {} turns ({} categories, greedy planner, seed {})",
                turns,
                table.len(),
                args.seed
            );
            play_greedy(&table, turns, &mut rng);
        }
        "optimal" => {
            // Full lookahead: default to a short horizon.
            let turns = args.turns.unwrap_or(2);
            println!(
                "Playing {} turns ({} categories, optimal solver, seed {})",
                turns,
                table.len(),
                args.seed
            );
            play_optimal(&table, turns, &mut rng, args.cache.as_deref());
        }
        other => {
            eprintln!("Unknown policy: {} (expected greedy|optimal)", other);
            std::process::exit(1);
        }
    }
}
