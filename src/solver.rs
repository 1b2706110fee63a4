//! Expected-value solver and policy selector.
//!
//! Backward induction over the game tree: `value(S)` is the expected total
//! score from state `S` under optimal play, `action_value(S, a)` the value
//! of taking `a` in `S`. Results are memoized in a cache owned by the
//! [`Solver`] instance, keyed by the full state — a cold cache produces
//! identical results to a warm one, so the cache may be persisted between
//! runs ([`crate::storage`]) as a pure optimization.
//!
//! Recursion structure:
//! - terminal (`turns_left == 0`): sum of the scoreboard;
//! - chance node (no hand showing): mean of `value` over all 252 opening
//!   hands;
//! - decision node: max of `action_value` over the legal actions.
//!
//! A category action is deterministic — its value is the value of the
//! successor state. A keep action averages `value` over every
//! combinations-with-repetition outcome of the re-rolled dice, divided by
//! [`num_outcomes`]`(k)`. Termination: `turns_left` strictly decreases on
//! every scoring action and `rolls_left` on every re-roll, both bounded.
//!
//! Full lookahead from a fresh many-turn game is very large; bound runtime
//! by scoping `turns_left` or shrinking the table, not by time-boxing.

use std::collections::HashMap;

use crate::actions::legal_actions;
use crate::config::CategoryTable;
use crate::constants::DICE_COUNT;
use crate::dice::{all_hands, num_outcomes, possible_outcomes, reroll_count};
use crate::types::{Action, GameError, State};

/// Memoized backward-induction solver over a fixed category table.
///
/// The cache is explicit, owned state — not module-global — so its
/// lifetime and any concurrency discipline are the caller's to manage.
/// Each worker in a parallel driver owns its own solver.
pub struct Solver<'a> {
    table: &'a CategoryTable,
    cache: HashMap<State, f64>,
}

impl<'a> Solver<'a> {
    pub fn new(table: &'a CategoryTable) -> Self {
        Solver {
            table,
            cache: HashMap::new(),
        }
    }

    /// Start from a previously persisted cache. Correctness never depends
    /// on its contents; [`crate::storage::load_cache`] refuses files
    /// solved under a different table, so a warm start always agrees with
    /// a cold one.
    pub fn with_cache(table: &'a CategoryTable, cache: HashMap<State, f64>) -> Self {
        Solver { table, cache }
    }

    pub fn table(&self) -> &CategoryTable {
        self.table
    }

    pub fn cache(&self) -> &HashMap<State, f64> {
        &self.cache
    }

    pub fn into_cache(self) -> HashMap<State, f64> {
        self.cache
    }

    /// Expected total score from `state` under optimal play.
    pub fn value(&mut self, state: &State) -> f64 {
        if state.is_terminal() {
            return state.board.total() as f64;
        }
        if let Some(&v) = self.cache.get(state) {
            return v;
        }

        let v = match state.hand {
            // Chance node: average over the round's opening roll.
            None => {
                let sum: f64 = all_hands()
                    .map(|h| self.value(&state.opened(h)))
                    .sum();
                sum / num_outcomes(DICE_COUNT) as f64
            }
            // Decision node: optimal action.
            Some(_) => {
                let mut best = f64::NEG_INFINITY;
                for action in legal_actions(state, self.table) {
                    let av = self.eval_action(state, action);
                    if av > best {
                        best = av;
                    }
                }
                debug_assert!(best.is_finite(), "decision node with no legal actions");
                best
            }
        };

        self.cache.insert(*state, v);
        v
    }

    /// Expected total score from taking `action` in `state`.
    ///
    /// Rejects actions outside the legal surface: a keep-mask at zero rolls
    /// ([`GameError::OutOfRolls`]) or a category missing from the table
    /// ([`GameError::InvalidCategory`]).
    ///
    /// # Panics
    ///
    /// `state` must be a decision node. Chance nodes (no hand showing) have
    /// no actions to value; resolve them with [`crate::transition::deal`]
    /// or [`Solver::value`] first.
    pub fn action_value(&mut self, state: &State, action: Action) -> Result<f64, GameError> {
        match action {
            Action::Keep(_) if state.rolls_left == 0 => Err(GameError::OutOfRolls),
            Action::Score(cat) if self.table.slot_of(cat).is_none() => {
                Err(GameError::InvalidCategory(cat))
            }
            _ => Ok(self.eval_action(state, action)),
        }
    }

    /// The action maximizing expected value, or `None` at chance nodes and
    /// terminal states.
    ///
    /// Ties break to the earliest action in enumeration order (keep-masks
    /// ascending, then table categories in slot order), so the policy is
    /// deterministic and reproducible.
    pub fn best_action(&mut self, state: &State) -> Option<Action> {
        let mut best: Option<(Action, f64)> = None;
        for action in legal_actions(state, self.table) {
            let av = self.eval_action(state, action);
            if best.map_or(true, |(_, v)| av > v) {
                best = Some((action, av));
            }
        }
        best.map(|(a, _)| a)
    }

    /// Action evaluation for actions already known legal.
    fn eval_action(&mut self, state: &State, action: Action) -> f64 {
        let hand = state
            .hand
            .expect("action evaluation requires a hand showing");
        match action {
            Action::Score(cat) => {
                // Deterministic: the successor folds in the board update
                // and the turn decrement.
                let slot = self
                    .table
                    .slot_of(cat)
                    .expect("category validated against the table");
                let score = cat.score(&hand);
                self.value(&state.scored(slot, score))
            }
            Action::Keep(mask) => {
                let k = reroll_count(mask);
                let sum: f64 = possible_outcomes(&hand, mask)
                    .map(|h| self.value(&state.rerolled(h)))
                    .sum();
                sum / num_outcomes(k) as f64
            }
        }
    }
}
