//! # dice-poker — optimal-play solver for a poker-dice game
//!
//! Five six-sided dice, up to two re-rolls of any subset per round, and one
//! scoring category committed per round (Pair through Five of a Kind, each
//! usable once per game). The solver computes, for any reachable game state,
//! the re-roll mask or category that maximizes expected total score over the
//! remainder of the game, by **memoized backward induction**.
//!
//! ## Component map
//!
//! | Component | Module | Description |
//! |-----------|--------|-------------|
//! | Scoring engine | [`scoring`] | Pure hand → category → score rules |
//! | Outcome enumerator | [`dice`] | Combinations-with-repetition over re-rolled dice |
//! | Action space | [`actions`] | Legal keep-masks and categories per state |
//! | State transition | [`transition`] | Successor states (sampled or explicit-hand) |
//! | Expected-value solver | [`solver`] | Recursive `value`/`action_value`, memoized on state |
//! | Policy selector | [`solver`] | `best_action`: argmax with fixed tie-breaking |
//! | Score adjustment | [`adjustment`] | One-round heuristic planner (cheap substitute for full lookahead) |
//!
//! ## State representation
//!
//! A state is `(hand, rolls_left, scoreboard, turns_left)`. Hands are sorted
//! ascending — the sort collapses the 6^5 raw rolls into 252 canonical
//! multisets so permutation-equivalent hands share one memo entry. A state
//! with no hand is a chance node awaiting the round's opening roll.
//!
//! The category set is a [`config::CategoryTable`] supplied by the caller;
//! seven- and eight-category variants (and arbitrary subsets) are all valid
//! game configurations.
//!
//! Full-horizon lookahead from a fresh game start is very expensive; bound
//! runtime by scoping `turns_left` (or the table), not by time-boxing. The
//! [`adjustment::RoundPlanner`] is the cheap alternative for long games.

pub mod actions;
pub mod adjustment;
pub mod config;
pub mod constants;
pub mod dice;
pub mod scoring;
pub mod simulation;
pub mod solver;
pub mod storage;
pub mod transition;
pub mod types;

pub use config::CategoryTable;
pub use scoring::Category;
pub use solver::Solver;
pub use types::{Action, GameError, Hand, KeepMask, Scoreboard, State};
