//! Scoring rules: the closed `Category` enum and its pure scoring functions.
//!
//! Every rule is total and side-effect-free over the full hand domain,
//! returns 0 for non-qualifying hands, and is invariant under permutation
//! of the hand (all patterns are read off face counts, never positions).
//! Sixes carry special values throughout: they score more in every
//! category except Pair, where a pair of sixes is capped at 3.

use std::fmt;

use crate::dice::count_faces;
use crate::types::Hand;

/// A scoring pattern. The set actually playable in a game is configured by
/// a [`crate::config::CategoryTable`]; the enum itself is closed so scoring
/// is exhaustiveness-checked at compile time.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Category {
    Pair,
    TwoPair,
    ThreeOfAKind,
    Flush,
    Straight,
    FullHouse,
    FourOfAKind,
    FiveOfAKind,
}

/// All categories, in canonical (ascending-value) order. This is also the
/// tie-breaking enumeration order of the standard table.
pub const ALL_CATEGORIES: [Category; 8] = [
    Category::Pair,
    Category::TwoPair,
    Category::ThreeOfAKind,
    Category::Flush,
    Category::Straight,
    Category::FullHouse,
    Category::FourOfAKind,
    Category::FiveOfAKind,
];

impl Category {
    pub fn name(&self) -> &'static str {
        match self {
            Category::Pair => "Pair",
            Category::TwoPair => "Two Pair",
            Category::ThreeOfAKind => "Three of a Kind",
            Category::Flush => "Flush",
            Category::Straight => "Straight",
            Category::FullHouse => "Full House",
            Category::FourOfAKind => "Four of a Kind",
            Category::FiveOfAKind => "Five of a Kind",
        }
    }

    /// Score `hand` against this category.
    pub fn score(&self, hand: &Hand) -> i32 {
        let fc = count_faces(hand);
        match self {
            Category::Pair => {
                // Highest pair counts; a pair of sixes is capped at 3.
                for f in (1..=6usize).rev() {
                    if fc[f] >= 2 {
                        return if f == 6 { 3 } else { 2 * f as i32 };
                    }
                }
                0
            }
            Category::TwoPair => {
                // Four of a kind counts as two pairs of the same face.
                if let Some(f) = (1..=6usize).rev().find(|&f| fc[f] >= 4) {
                    return if f == 6 { 5 } else { 4 };
                }
                let pair_faces: Vec<usize> = (1..=6).rev().filter(|&f| fc[f] >= 2).collect();
                if pair_faces.len() >= 2 {
                    if pair_faces.contains(&6) {
                        5
                    } else {
                        4
                    }
                } else {
                    0
                }
            }
            Category::ThreeOfAKind => match (1..=6usize).rev().find(|&f| fc[f] >= 3) {
                Some(6) => 8,
                Some(_) => 6,
                None => 0,
            },
            Category::Flush => {
                // All five faces from {1,3,6}, or all from {2,4,5}.
                let in_136 = fc[2] + fc[4] + fc[5] == 0;
                let in_245 = fc[1] + fc[3] + fc[6] == 0;
                if in_136 || in_245 {
                    15
                } else {
                    0
                }
            }
            Category::Straight => {
                let low = (1..=5).all(|f| fc[f] == 1);
                let high = (2..=6).all(|f| fc[f] == 1);
                if low || high {
                    25
                } else {
                    0
                }
            }
            Category::FullHouse => {
                // 3+2 split, or five of a kind.
                if let Some(f) = (1..=6usize).find(|&f| fc[f] == 5) {
                    return if f == 6 { 30 } else { 25 };
                }
                let triple = (1..=6usize).find(|&f| fc[f] == 3);
                let pair = (1..=6usize).find(|&f| fc[f] == 2);
                match (triple, pair) {
                    (Some(6), Some(_)) => 30,
                    (Some(_), Some(_)) => 25,
                    _ => 0,
                }
            }
            Category::FourOfAKind => match (1..=6usize).rev().find(|&f| fc[f] >= 4) {
                Some(6) => 60,
                Some(_) => 50,
                None => 0,
            },
            Category::FiveOfAKind => match (1..=6usize).find(|&f| fc[f] == 5) {
                Some(6) => 240,
                Some(_) => 200,
                None => 0,
            },
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
