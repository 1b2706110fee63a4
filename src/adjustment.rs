//! Score-adjustment heuristic: one-round planning without full lookahead.
//!
//! Full-horizon backward induction is infeasible for long games, so this
//! layer plans a single round against an *adjusted* immediate score:
//!
//! - the previously recorded score of a slot is subtracted (re-scoring is
//!   worth only its marginal improvement),
//! - a flat penalty lands whenever the adjusted value is non-positive
//!   (burning a turn for no gain),
//! - an open slot earns a rarity bonus that grows as the game progresses,
//!   weighted by how unlikely the category is to complete on a fresh roll
//!   (precomputed in the [`CategoryTable`]).
//!
//! The adjustment context is an explicit value over `(table, board,
//! turns_elapsed)` — pure given its inputs, with no captured hidden state,
//! so planner memo entries are keyed soundly.

use std::collections::HashMap;

use crate::config::CategoryTable;
use crate::constants::KEEP_ALL_MASK;
use crate::dice::{num_outcomes, possible_outcomes, reroll_count};
use crate::types::{Action, Hand, Scoreboard};

/// Penalty applied when a round would be committed for no marginal gain.
const WASTED_TURN_PENALTY: f64 = 10.0;

/// Weight of the per-turn rarity bonus for open, hard-to-complete slots.
const RARITY_WEIGHT: f64 = 1.5;

/// Everything the adjusted score depends on, made explicit.
pub struct AdjustmentContext<'a> {
    table: &'a CategoryTable,
    board: Scoreboard,
    turns_elapsed: u8,
}

impl<'a> AdjustmentContext<'a> {
    pub fn new(table: &'a CategoryTable, board: Scoreboard, turns_elapsed: u8) -> Self {
        AdjustmentContext {
            table,
            board,
            turns_elapsed,
        }
    }

    /// Adjusted immediate value of recording `raw` into `slot`.
    pub fn adjusted_score(&self, slot: usize, raw: i32) -> f64 {
        let prior = self.board.get(slot);
        let marginal = (raw - prior.unwrap_or(0)) as f64;
        if marginal <= 0.0 {
            return marginal - WASTED_TURN_PENALTY;
        }
        let mut adjusted = marginal;
        if prior.is_none() {
            // Rare categories get more attractive as open turns run out.
            let p = self.table.completion_probability(slot);
            adjusted += self.turns_elapsed as f64 * (1.0 - p) * RARITY_WEIGHT;
        }
        adjusted
    }

    /// Best slot and adjusted value for committing `hand` right now.
    pub fn best_slot(&self, hand: &Hand) -> (usize, f64) {
        let mut best = (0, f64::NEG_INFINITY);
        for slot in 0..self.table.len() {
            let raw = self.table.category(slot).score(hand);
            let adj = self.adjusted_score(slot, raw);
            if adj > best.1 {
                best = (slot, adj);
            }
        }
        best
    }
}

/// One-round expectimax over adjusted scores: the cheap substitute for the
/// full-horizon [`crate::solver::Solver`]. The scoreboard is frozen inside
/// the context for the duration of the round, so the memo key is just
/// `(hand, rolls_left)`.
pub struct RoundPlanner<'a> {
    ctx: AdjustmentContext<'a>,
    memo: HashMap<(Hand, u8), f64>,
}

impl<'a> RoundPlanner<'a> {
    pub fn new(ctx: AdjustmentContext<'a>) -> Self {
        RoundPlanner {
            ctx,
            memo: HashMap::new(),
        }
    }

    /// Adjusted expected value of the rest of the round.
    pub fn round_value(&mut self, hand: &Hand, rolls_left: u8) -> f64 {
        let key = (*hand, rolls_left);
        if let Some(&v) = self.memo.get(&key) {
            return v;
        }

        let mut best = self.ctx.best_slot(hand).1;
        if rolls_left > 0 {
            for mask in 0..KEEP_ALL_MASK {
                let v = self.keep_value(hand, mask, rolls_left);
                if v > best {
                    best = v;
                }
            }
        }

        self.memo.insert(key, best);
        best
    }

    /// Best decision for the current hand, in the same tie-breaking order
    /// as the exact policy (masks ascending, then slots in table order).
    pub fn best_action(&mut self, hand: &Hand, rolls_left: u8) -> Action {
        let mut best_action = None;
        let mut best = f64::NEG_INFINITY;

        if rolls_left > 0 {
            for mask in 0..KEEP_ALL_MASK {
                let v = self.keep_value(hand, mask, rolls_left);
                if v > best {
                    best = v;
                    best_action = Some(Action::Keep(mask));
                }
            }
        }
        for slot in 0..self.ctx.table.len() {
            let raw = self.ctx.table.category(slot).score(hand);
            let v = self.ctx.adjusted_score(slot, raw);
            if v > best {
                best = v;
                best_action = Some(Action::Score(self.ctx.table.category(slot)));
            }
        }

        // The table is non-empty, so a scoring action always exists.
        best_action.unwrap_or(Action::Score(self.ctx.table.category(0)))
    }

    fn keep_value(&mut self, hand: &Hand, mask: u8, rolls_left: u8) -> f64 {
        let k = reroll_count(mask);
        let sum: f64 = possible_outcomes(hand, mask)
            .map(|h| self.round_value(&h, rolls_left - 1))
            .sum();
        sum / num_outcomes(k) as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::Category;

    #[test]
    fn test_marginal_scoring() {
        let table = CategoryTable::standard();
        let board = Scoreboard::new().recorded(0, 8);
        let ctx = AdjustmentContext::new(&table, board, 0);

        // Slot 0 already holds 8: a raw 10 is worth its margin of 2.
        assert_eq!(ctx.adjusted_score(0, 10), 2.0);
        // An equal re-score is a wasted turn.
        assert_eq!(ctx.adjusted_score(0, 8), -WASTED_TURN_PENALTY);
        // A worse re-score is penalized on top of the loss.
        assert_eq!(ctx.adjusted_score(0, 3), -5.0 - WASTED_TURN_PENALTY);
    }

    #[test]
    fn test_rarity_bonus_grows_with_elapsed_turns() {
        let table = CategoryTable::standard();
        let slot = table.slot_of(Category::FiveOfAKind).unwrap();

        let early = AdjustmentContext::new(&table, Scoreboard::new(), 0);
        let late = AdjustmentContext::new(&table, Scoreboard::new(), 6);
        assert_eq!(early.adjusted_score(slot, 200), 200.0);
        assert!(late.adjusted_score(slot, 200) > 200.0);

        // The bonus favours rare patterns over common ones.
        let pair_slot = table.slot_of(Category::Pair).unwrap();
        let five_bonus = late.adjusted_score(slot, 10) - 10.0;
        let pair_bonus = late.adjusted_score(pair_slot, 10) - 10.0;
        assert!(five_bonus > pair_bonus);
    }

    #[test]
    fn test_no_bonus_on_occupied_slots() {
        let table = CategoryTable::standard();
        let slot = table.slot_of(Category::FiveOfAKind).unwrap();
        let board = Scoreboard::new().recorded(slot, 100);
        let ctx = AdjustmentContext::new(&table, board, 6);
        // Margin only: 200 - 100, no rarity bonus on a filled slot.
        assert_eq!(ctx.adjusted_score(slot, 200), 100.0);
    }

    #[test]
    fn test_planner_scores_a_made_hand() {
        let table = CategoryTable::standard();
        let ctx = AdjustmentContext::new(&table, Scoreboard::new(), 0);
        let mut planner = RoundPlanner::new(ctx);

        // No rolls left: forced to score, and Four of a Kind dominates.
        assert_eq!(
            planner.best_action(&[2, 2, 2, 2, 6], 0),
            Action::Score(Category::FourOfAKind)
        );
    }

    #[test]
    fn test_planner_chases_five_of_a_kind() {
        let table = CategoryTable::new(vec![Category::FiveOfAKind]);
        let ctx = AdjustmentContext::new(&table, Scoreboard::new(), 0);
        let mut planner = RoundPlanner::new(ctx);

        // Four sixes showing: keep them and re-roll the stray die rather
        // than settle for a zero.
        assert_eq!(planner.best_action(&[1, 6, 6, 6, 6], 2), Action::Keep(0b11110));
        assert!(planner.round_value(&[1, 6, 6, 6, 6], 2) > 0.0);
    }

    #[test]
    fn test_round_value_monotone_in_rolls() {
        let table = CategoryTable::standard();
        let ctx = AdjustmentContext::new(&table, Scoreboard::new(), 2);
        let mut planner = RoundPlanner::new(ctx);

        let hand = [1, 2, 3, 3, 5];
        let v0 = planner.round_value(&hand, 0);
        let v1 = planner.round_value(&hand, 1);
        let v2 = planner.round_value(&hand, 2);
        assert!(v1 >= v0);
        assert!(v2 >= v1);
    }
}
