//! State transitions: apply an action to a state, producing the successor.
//!
//! Two entry points cover the two callers:
//! - [`apply`] samples re-rolls from an RNG — the driver path for playing
//!   actual games.
//! - [`apply_with_hand`] substitutes a caller-supplied resulting hand — the
//!   solver path used while enumerating all outcomes deterministically.
//!
//! Both reject a re-roll at zero rolls with [`GameError::OutOfRolls`]; the
//! policy never produces such an action, so hitting it indicates a caller
//! bug. Scoring an already-recorded category overwrites the slot.

use rand::rngs::SmallRng;

use crate::config::CategoryTable;
use crate::dice::{roll_hand, sample_reroll};
use crate::types::{Action, GameError, Hand, KeepMask, State};

/// Resolve a round's chance node: roll the five opening dice.
pub fn deal(state: &State, rng: &mut SmallRng) -> State {
    state.opened(roll_hand(rng))
}

/// Apply `action`, sampling any re-rolled dice from `rng`.
///
/// Panics if no hand is showing — drivers resolve the chance node with
/// [`deal`] before asking for decisions.
pub fn apply(
    state: &State,
    action: Action,
    table: &CategoryTable,
    rng: &mut SmallRng,
) -> Result<State, GameError> {
    let hand = showing_hand(state);
    match action {
        Action::Keep(mask) => {
            if state.rolls_left == 0 {
                return Err(GameError::OutOfRolls);
            }
            Ok(state.rerolled(sample_reroll(&hand, mask, rng)))
        }
        Action::Score(category) => {
            let slot = table
                .slot_of(category)
                .ok_or(GameError::InvalidCategory(category))?;
            Ok(state.scored(slot, category.score(&hand)))
        }
    }
}

/// Apply a keep-mask with an explicit resulting hand instead of sampling.
pub fn apply_with_hand(state: &State, _mask: KeepMask, hand: Hand) -> Result<State, GameError> {
    if state.rolls_left == 0 {
        return Err(GameError::OutOfRolls);
    }
    Ok(state.rerolled(hand))
}

fn showing_hand(state: &State) -> Hand {
    match state.hand {
        Some(h) => h,
        None => panic!("apply on a chance node; resolve the opening roll with deal() first"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::MAX_REROLLS;
    use crate::scoring::Category;
    use rand::SeedableRng;

    #[test]
    fn test_score_action() {
        let table = CategoryTable::standard();
        let mut rng = SmallRng::seed_from_u64(1);
        let state = State::fresh(2).opened([2, 2, 2, 2, 6]);

        let next = apply(&state, Action::Score(Category::FourOfAKind), &table, &mut rng).unwrap();
        assert!(next.hand.is_none());
        assert_eq!(next.rolls_left, MAX_REROLLS);
        assert_eq!(next.turns_left, 1);
        let slot = table.slot_of(Category::FourOfAKind).unwrap();
        assert_eq!(next.board.get(slot), Some(50));
    }

    #[test]
    fn test_rescore_overwrites() {
        let table = CategoryTable::standard();
        let mut rng = SmallRng::seed_from_u64(1);
        let slot = table.slot_of(Category::Straight).unwrap();
        let state = State::fresh(3).opened([1, 2, 3, 4, 5]);

        let once = apply(&state, Action::Score(Category::Straight), &table, &mut rng).unwrap();
        let again = apply(
            &once.opened([1, 2, 3, 4, 5]),
            Action::Score(Category::Straight),
            &table,
            &mut rng,
        )
        .unwrap();

        // Same hand scored twice into the same slot: latest value, not a sum.
        assert_eq!(again.board.get(slot), Some(25));
        assert_eq!(again.board.total(), 25);
    }

    #[test]
    fn test_out_of_rolls() {
        let table = CategoryTable::standard();
        let mut rng = SmallRng::seed_from_u64(1);
        let mut state = State::fresh(2).opened([1, 2, 3, 4, 5]);
        state.rolls_left = 0;

        assert_eq!(
            apply(&state, Action::Keep(0b00111), &table, &mut rng),
            Err(GameError::OutOfRolls)
        );
        assert_eq!(
            apply_with_hand(&state, 0b00111, [1, 2, 3, 4, 5]),
            Err(GameError::OutOfRolls)
        );
    }

    #[test]
    fn test_invalid_category() {
        let table = CategoryTable::seven();
        let mut rng = SmallRng::seed_from_u64(1);
        let state = State::fresh(2).opened([1, 1, 3, 3, 6]);

        assert_eq!(
            apply(&state, Action::Score(Category::Flush), &table, &mut rng),
            Err(GameError::InvalidCategory(Category::Flush))
        );
    }

    #[test]
    fn test_keep_action_consumes_a_roll() {
        let table = CategoryTable::standard();
        let mut rng = SmallRng::seed_from_u64(9);
        let state = State::fresh(2).opened([1, 2, 3, 3, 3]);

        let next = apply(&state, Action::Keep(0b11100), &table, &mut rng).unwrap();
        assert_eq!(next.rolls_left, state.rolls_left - 1);
        assert_eq!(next.turns_left, state.turns_left);
        assert_eq!(next.board, state.board);
        // The three kept threes survive the re-roll.
        let fc = crate::dice::count_faces(&next.hand.unwrap());
        assert!(fc[3] >= 3);
    }

    #[test]
    fn test_apply_with_hand() {
        let state = State::fresh(2).opened([1, 2, 3, 4, 5]);
        let next = apply_with_hand(&state, 0b01111, [1, 2, 3, 4, 4]).unwrap();
        assert_eq!(next.hand, Some([1, 2, 3, 4, 4]));
        assert_eq!(next.rolls_left, 1);
    }
}
