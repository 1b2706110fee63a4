//! Legal action enumeration.
//!
//! The enumeration order is part of the contract: the policy breaks
//! expected-value ties by taking the first maximizer, so the order below is
//! fixed — keep-masks ascending 0..=30 (the keep-all mask 0b11111 is
//! excluded as degenerate), then table categories in slot order.
//!
//! Scoring is always legal while a hand is showing, even with re-rolls in
//! hand (it ends the round early), and already-recorded categories remain
//! legal: re-scoring overwrites, and the value function makes it
//! economically unattractive rather than the action space forbidding it.

use crate::config::CategoryTable;
use crate::constants::KEEP_ALL_MASK;
use crate::types::{Action, State};

/// All legal actions for `state`, in tie-breaking order.
///
/// Chance nodes (no hand showing) and terminal states have no agent
/// decision and yield an empty set.
pub fn legal_actions(state: &State, table: &CategoryTable) -> Vec<Action> {
    if state.is_terminal() || state.hand.is_none() {
        return Vec::new();
    }

    let mut actions = Vec::with_capacity(KEEP_ALL_MASK as usize + table.len());
    if state.rolls_left > 0 {
        for mask in 0..KEEP_ALL_MASK {
            actions.push(Action::Keep(mask));
        }
    }
    for &cat in table.categories() {
        actions.push(Action::Score(cat));
    }
    actions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::Category;

    #[test]
    fn test_actions_with_rolls_left() {
        let table = CategoryTable::standard();
        let state = State::fresh(3).opened([1, 2, 3, 4, 5]);
        let actions = legal_actions(&state, &table);

        assert_eq!(actions.len(), 31 + 8);
        assert_eq!(actions[0], Action::Keep(0));
        assert_eq!(actions[30], Action::Keep(30));
        assert_eq!(actions[31], Action::Score(Category::Pair));
        assert!(!actions.contains(&Action::Keep(KEEP_ALL_MASK)));
    }

    #[test]
    fn test_actions_out_of_rolls() {
        let table = CategoryTable::seven();
        let mut state = State::fresh(3).opened([1, 2, 3, 4, 5]);
        state.rolls_left = 0;
        let actions = legal_actions(&state, &table);

        assert_eq!(actions.len(), 7);
        assert!(actions.iter().all(|a| matches!(a, Action::Score(_))));
    }

    #[test]
    fn test_used_categories_stay_legal() {
        let table = CategoryTable::standard();
        let mut state = State::fresh(3).opened([1, 2, 3, 4, 5]);
        state.board = state.board.recorded(0, 10);
        let actions = legal_actions(&state, &table);
        assert!(actions.contains(&Action::Score(Category::Pair)));
    }

    #[test]
    fn test_no_actions_at_chance_or_terminal_nodes() {
        let table = CategoryTable::standard();
        assert!(legal_actions(&State::fresh(3), &table).is_empty());
        assert!(legal_actions(&State::fresh(0), &table).is_empty());
    }
}
