//! Core game types: hands, scoreboards, states, actions, and errors.
//!
//! `State` is the memoization key: a plain `Copy` value with derived
//! `Hash`/`Eq`, never mutated in place — every transition builds a fresh
//! successor. A state with `hand == None` is a chance node: the round's
//! opening roll has not happened yet.

use thiserror::Error;

use crate::constants::{MAX_CATEGORIES, MAX_REROLLS};
use crate::scoring::Category;

/// Canonical sorted hand: five die faces, ascending, each in 1..=6.
pub type Hand = [u8; 5];

/// Keep-mask over the current sorted hand: bit i set = die i is kept,
/// cleared = die i is re-rolled. Only the low 5 bits are meaningful.
pub type KeepMask = u8;

/// One decision: either re-roll the unkept dice or commit the hand to a
/// category (ending the round).
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Action {
    Keep(KeepMask),
    Score(Category),
}

/// Errors at the driver/configuration boundary. The solver itself never
/// produces these: `legal_actions` excludes re-rolls at zero rolls, and
/// category actions are drawn from the configured table.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum GameError {
    /// Category is not in the configured table. A configuration error,
    /// never recoverable by retry.
    #[error("category {0} is not in the configured table")]
    InvalidCategory(Category),
    /// Re-roll requested with zero rolls remaining. A caller-side logic
    /// error in action selection.
    #[error("re-roll requested with no rolls remaining")]
    OutOfRolls,
}

/// Per-slot recorded scores, one slot per category of the configured table.
///
/// Slots are indexed by table position, not by `Category` discriminant, so
/// seven- and eight-category variants use the same layout. Unused trailing
/// slots stay `None` and do not affect equality between boards of the same
/// variant. Recording into an occupied slot overwrites it.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct Scoreboard {
    slots: [Option<i32>; MAX_CATEGORIES],
}

impl Scoreboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded score for a table slot, if any.
    #[inline(always)]
    pub fn get(&self, slot: usize) -> Option<i32> {
        self.slots[slot]
    }

    /// Successor board with `score` recorded at `slot` (overwriting).
    #[must_use]
    pub fn recorded(&self, slot: usize, score: i32) -> Self {
        let mut next = *self;
        next.slots[slot] = Some(score);
        next
    }

    /// Sum of all recorded entries (unset entries count as 0).
    pub fn total(&self) -> i32 {
        self.slots.iter().flatten().sum()
    }

    /// Number of slots with a recorded score.
    pub fn num_recorded(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }
}

/// Full game state and solver memoization key.
///
/// Lifecycle: a round opens as a chance node (`hand == None`, full re-roll
/// budget), becomes a decision state once the opening roll lands, and ends
/// when a category is scored — which starts the next round's chance node
/// with `turns_left` decremented. Terminal when `turns_left == 0`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct State {
    /// Current canonical hand; `None` before the round's opening roll.
    pub hand: Option<Hand>,
    /// Re-rolls remaining this round (0..=2).
    pub rolls_left: u8,
    /// Scores recorded so far.
    pub board: Scoreboard,
    /// Rounds remaining including the current one.
    pub turns_left: u8,
}

impl State {
    /// Game-start state: no hand rolled, empty board, `turns` rounds to play.
    pub fn fresh(turns: u8) -> Self {
        State {
            hand: None,
            rolls_left: MAX_REROLLS,
            board: Scoreboard::new(),
            turns_left: turns,
        }
    }

    #[inline(always)]
    pub fn is_terminal(&self) -> bool {
        self.turns_left == 0
    }

    /// Successor after the round's opening roll lands. Does not consume a
    /// re-roll: `rolls_left` counts re-rolls only.
    #[must_use]
    pub fn opened(&self, hand: Hand) -> Self {
        debug_assert!(self.hand.is_none(), "opening roll on an already-rolled hand");
        State {
            hand: Some(hand),
            ..*self
        }
    }

    /// Successor after a re-roll resolved to `hand`. Board and turns are
    /// unchanged; one re-roll is consumed.
    #[must_use]
    pub fn rerolled(&self, hand: Hand) -> Self {
        debug_assert!(self.rolls_left > 0, "re-roll with no rolls remaining");
        State {
            hand: Some(hand),
            rolls_left: self.rolls_left - 1,
            ..*self
        }
    }

    /// Successor after committing the round to a category: `score` recorded
    /// at `slot`, hand cleared for the next round's opening roll, re-roll
    /// budget reset, one turn consumed.
    #[must_use]
    pub fn scored(&self, slot: usize, score: i32) -> Self {
        debug_assert!(self.turns_left > 0, "scoring a terminal state");
        State {
            hand: None,
            rolls_left: MAX_REROLLS,
            board: self.board.recorded(slot, score),
            turns_left: self.turns_left - 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scoreboard_total() {
        let board = Scoreboard::new();
        assert_eq!(board.total(), 0);
        assert_eq!(board.num_recorded(), 0);

        let board = board.recorded(0, 6).recorded(3, 25);
        assert_eq!(board.total(), 31);
        assert_eq!(board.num_recorded(), 2);
        assert_eq!(board.get(0), Some(6));
        assert_eq!(board.get(1), None);
    }

    #[test]
    fn test_scoreboard_overwrite() {
        // Re-recording a slot replaces the entry, it never sums.
        let board = Scoreboard::new().recorded(2, 50).recorded(2, 50);
        assert_eq!(board.get(2), Some(50));
        assert_eq!(board.total(), 50);

        let board = board.recorded(2, 0);
        assert_eq!(board.get(2), Some(0));
        assert_eq!(board.total(), 0);
    }

    #[test]
    fn test_state_lifecycle() {
        let start = State::fresh(2);
        assert!(start.hand.is_none());
        assert_eq!(start.rolls_left, MAX_REROLLS);
        assert!(!start.is_terminal());

        let opened = start.opened([1, 2, 3, 4, 5]);
        assert_eq!(opened.rolls_left, MAX_REROLLS);

        let rerolled = opened.rerolled([1, 1, 3, 4, 5]);
        assert_eq!(rerolled.rolls_left, 1);
        assert_eq!(rerolled.turns_left, 2);

        let next_round = rerolled.scored(0, 2);
        assert!(next_round.hand.is_none());
        assert_eq!(next_round.rolls_left, MAX_REROLLS);
        assert_eq!(next_round.turns_left, 1);
        assert_eq!(next_round.board.get(0), Some(2));

        let done = next_round.opened([6, 6, 6, 6, 6]).scored(7, 240);
        assert!(done.is_terminal());
        assert_eq!(done.board.total(), 242);
    }

    #[test]
    fn test_states_are_value_types() {
        let s = State::fresh(3);
        let t = s.opened([2, 2, 3, 3, 4]);
        // The original is untouched by building a successor.
        assert!(s.hand.is_none());
        assert_eq!(s.turns_left, 3);
        assert_eq!(t.turns_left, 3);
    }
}
