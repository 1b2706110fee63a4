//! Batch game simulation: play N games and aggregate the score
//! distribution.
//!
//! Games are independent, so the batch fans out over rayon with one RNG
//! and one planner per game; nothing is shared mutably across workers.
//! The per-round policy is the adjusted-score [`RoundPlanner`] — the
//! full-horizon solver is far too expensive to drive whole games at scale,
//! and the planner is the designed substitute.

use rand::rngs::SmallRng;
use rand::SeedableRng;
use rayon::prelude::*;
use serde::Serialize;
use std::time::Instant;

use crate::adjustment::{AdjustmentContext, RoundPlanner};
use crate::config::CategoryTable;
use crate::constants::MAX_REROLLS;
use crate::dice::{roll_hand, sample_reroll};
use crate::types::{Action, Scoreboard};

/// Results of a batch simulation.
pub struct SimulationResult {
    pub scores: Vec<i32>,
    pub mean: f64,
    pub std_dev: f64,
    pub min: i32,
    pub max: i32,
    pub median: i32,
    pub elapsed: std::time::Duration,
}

/// JSON-serializable summary of a batch run.
#[derive(Serialize)]
pub struct ScoreSummary {
    pub num_games: usize,
    pub turns: u8,
    pub seed: u64,
    pub mean: f64,
    pub std_dev: f64,
    pub min: i32,
    pub max: i32,
    pub median: i32,
    /// Score counts in bins of 10, from 0 upward.
    pub histogram: Vec<HistogramBin>,
}

#[derive(Serialize)]
pub struct HistogramBin {
    pub lo: i32,
    pub hi: i32,
    pub count: usize,
}

/// Play one full game with the round planner, returning the final total.
pub fn play_game(table: &CategoryTable, turns: u8, rng: &mut SmallRng) -> i32 {
    let mut board = Scoreboard::new();
    for turn in 0..turns {
        let ctx = AdjustmentContext::new(table, board, turn);
        let mut planner = RoundPlanner::new(ctx);

        let mut hand = roll_hand(rng);
        let mut rolls_left = MAX_REROLLS;
        loop {
            match planner.best_action(&hand, rolls_left) {
                Action::Keep(mask) => {
                    hand = sample_reroll(&hand, mask, rng);
                    rolls_left -= 1;
                }
                Action::Score(cat) => {
                    let slot = table
                        .slot_of(cat)
                        .expect("planner action from its own table");
                    board = board.recorded(slot, cat.score(&hand));
                    break;
                }
            }
        }
    }
    board.total()
}

/// Simulate `num_games` games in parallel, one deterministic RNG stream
/// per game so results are reproducible for a given seed.
pub fn simulate_batch(
    table: &CategoryTable,
    num_games: usize,
    turns: u8,
    seed: u64,
) -> SimulationResult {
    let start_time = Instant::now();

    let mut scores: Vec<i32> = (0..num_games)
        .into_par_iter()
        .map(|i| {
            let mut rng =
                SmallRng::seed_from_u64(seed.wrapping_add(i as u64).wrapping_mul(0x9E3779B97F4A7C15));
            play_game(table, turns, &mut rng)
        })
        .collect();

    let elapsed = start_time.elapsed();

    let n = scores.len().max(1) as f64;
    let mean = scores.iter().map(|&s| s as f64).sum::<f64>() / n;
    let variance = scores.iter().map(|&s| (s as f64 - mean).powi(2)).sum::<f64>() / n;
    scores.sort_unstable();
    let median = scores.get(scores.len() / 2).copied().unwrap_or(0);

    SimulationResult {
        min: scores.first().copied().unwrap_or(0),
        max: scores.last().copied().unwrap_or(0),
        mean,
        std_dev: variance.sqrt(),
        median,
        elapsed,
        scores,
    }
}

impl SimulationResult {
    /// Build the serializable summary for a run.
    pub fn summary(&self, turns: u8, seed: u64) -> ScoreSummary {
        let mut histogram = Vec::new();
        if let (Some(&min), Some(&max)) = (self.scores.first(), self.scores.last()) {
            let lo_bin = (min / 10) * 10;
            let hi_bin = (max / 10) * 10;
            let mut lo = lo_bin;
            while lo <= hi_bin {
                let count = self
                    .scores
                    .iter()
                    .filter(|&&s| s >= lo && s < lo + 10)
                    .count();
                histogram.push(HistogramBin {
                    lo,
                    hi: lo + 10,
                    count,
                });
                lo += 10;
            }
        }
        ScoreSummary {
            num_games: self.scores.len(),
            turns,
            seed,
            mean: self.mean,
            std_dev: self.std_dev,
            min: self.min,
            max: self.max,
            median: self.median,
            histogram,
        }
    }
}
