//! Category table: the configurable scoring surface of a game variant.
//!
//! The core hardwires no category list — a table is built from any ordered
//! subset of [`crate::scoring::ALL_CATEGORIES`] and supplies, per slot, the
//! scoring rule and a precomputed completion probability (the chance that a
//! single fresh roll already satisfies the pattern). Completion
//! probabilities feed the rarity bonus of the score-adjustment heuristic.
//!
//! Table order matters: the slot order is the category enumeration order
//! for legal actions, and therefore the policy's tie-breaking order.

use crate::constants::MAX_CATEGORIES;
use crate::dice::{all_hands, hand_probability};
use crate::scoring::{Category, ALL_CATEGORIES};
use crate::types::{GameError, Hand};

/// An ordered set of playable categories with per-slot completion
/// probabilities.
#[derive(Clone, Debug)]
pub struct CategoryTable {
    categories: Vec<Category>,
    completion: Vec<f64>,
}

impl CategoryTable {
    /// Build a table from an ordered category list. Completion
    /// probabilities are computed by sweeping all 252 canonical hands with
    /// their physical (multinomial) roll probabilities.
    ///
    /// Degenerate or partial tables are valid game variants; duplicates are
    /// dropped, keeping the first occurrence. Panics on an empty result —
    /// a game with no way to score is not a game.
    pub fn new(categories: Vec<Category>) -> Self {
        let mut seen = Vec::with_capacity(MAX_CATEGORIES);
        for cat in categories {
            if !seen.contains(&cat) {
                seen.push(cat);
            }
        }
        assert!(!seen.is_empty(), "category table must not be empty");

        let completion = seen
            .iter()
            .map(|cat| {
                all_hands()
                    .filter(|h| cat.score(h) > 0)
                    .map(|h| hand_probability(&h))
                    .sum()
            })
            .collect();

        CategoryTable {
            categories: seen,
            completion,
        }
    }

    /// The full eight-category game.
    pub fn standard() -> Self {
        Self::new(ALL_CATEGORIES.to_vec())
    }

    /// The seven-category variant (no Flush).
    pub fn seven() -> Self {
        Self::new(
            ALL_CATEGORIES
                .iter()
                .copied()
                .filter(|c| *c != Category::Flush)
                .collect(),
        )
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Categories in slot order.
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Category at a table slot.
    #[inline(always)]
    pub fn category(&self, slot: usize) -> Category {
        self.categories[slot]
    }

    /// Order-sensitive identity of this table, embedded in cache-file
    /// headers. Each slot contributes its category in 4 bits, so tables
    /// with the same categories in a different slot order fingerprint
    /// differently (slot indices key the scoreboard, so cached values are
    /// only meaningful under the exact slot assignment).
    pub fn fingerprint(&self) -> u64 {
        self.categories
            .iter()
            .fold(0u64, |fp, cat| (fp << 4) | (*cat as u64 + 1))
    }

    /// Table slot for a category, if it is part of this variant.
    pub fn slot_of(&self, category: Category) -> Option<usize> {
        self.categories.iter().position(|c| *c == category)
    }

    /// Score `hand` against `category`, rejecting categories outside the
    /// configured set.
    pub fn score(&self, hand: &Hand, category: Category) -> Result<i32, GameError> {
        if self.slot_of(category).is_none() {
            return Err(GameError::InvalidCategory(category));
        }
        Ok(category.score(hand))
    }

    /// P(a single fresh roll scores > 0 in the slot's category).
    #[inline(always)]
    pub fn completion_probability(&self, slot: usize) -> f64 {
        self.completion[slot]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variants() {
        let eight = CategoryTable::standard();
        assert_eq!(eight.len(), 8);
        assert_eq!(eight.category(0), Category::Pair);
        assert_eq!(eight.category(7), Category::FiveOfAKind);

        let seven = CategoryTable::seven();
        assert_eq!(seven.len(), 7);
        assert!(seven.slot_of(Category::Flush).is_none());
        assert_eq!(seven.slot_of(Category::Straight), Some(3));
    }

    #[test]
    fn test_duplicates_dropped() {
        let table = CategoryTable::new(vec![
            Category::Pair,
            Category::Straight,
            Category::Pair,
        ]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.category(1), Category::Straight);
    }

    #[test]
    fn test_fingerprint_identifies_variant_and_slot_order() {
        assert_ne!(
            CategoryTable::standard().fingerprint(),
            CategoryTable::seven().fingerprint()
        );

        // Same categories, different slot assignment.
        let ab = CategoryTable::new(vec![Category::Pair, Category::Straight]);
        let ba = CategoryTable::new(vec![Category::Straight, Category::Pair]);
        assert_ne!(ab.fingerprint(), ba.fingerprint());

        let ab2 = CategoryTable::new(vec![Category::Pair, Category::Straight]);
        assert_eq!(ab.fingerprint(), ab2.fingerprint());
    }

    #[test]
    fn test_invalid_category() {
        let seven = CategoryTable::seven();
        assert_eq!(
            seven.score(&[1, 1, 3, 3, 6], Category::Flush),
            Err(GameError::InvalidCategory(Category::Flush))
        );
        assert_eq!(seven.score(&[1, 2, 3, 4, 5], Category::Straight), Ok(25));
    }

    #[test]
    fn test_completion_probabilities() {
        let table = CategoryTable::standard();

        // P(at least one pair) = 1 - 6!/(6-5)! / 6^5 = 1 - 720/7776.
        let pair = table.completion_probability(0);
        assert!((pair - (1.0 - 720.0 / 7776.0)).abs() < 1e-9);

        // Straight: 2 runs x 5! orderings out of 6^5.
        let straight = table.completion_probability(table.slot_of(Category::Straight).unwrap());
        assert!((straight - 240.0 / 7776.0).abs() < 1e-9);

        // Flush: 3^5 raw rolls per face set, sets are disjoint.
        let flush = table.completion_probability(table.slot_of(Category::Flush).unwrap());
        assert!((flush - 486.0 / 7776.0).abs() < 1e-9);

        // Five of a kind: 6 raw rolls.
        let five = table.completion_probability(7);
        assert!((five - 6.0 / 7776.0).abs() < 1e-9);

        // Rarity ordering that the adjustment bonus relies on.
        assert!(pair > straight && straight > five);
    }
}
