//! Dice mechanics: canonical hands, re-roll outcome enumeration, and the
//! physical probability of each canonical hand.
//!
//! A hand is always kept in canonical sorted-ascending form. Sorting is a
//! multiset canonicalization — it collapses the 6^5 = 7776 raw rolls into
//! 252 distinct hands so that permutation-equivalent rolls share a single
//! memoization entry in the solver.

use rand::rngs::SmallRng;
use rand::Rng;

use crate::constants::*;
use crate::types::{Hand, KeepMask};

/// Normalize a hand to canonical sorted form (ascending).
pub fn sort_hand(hand: &mut Hand) {
    for i in 0..DICE_COUNT - 1 {
        for j in (i + 1)..DICE_COUNT {
            if hand[j] < hand[i] {
                hand.swap(i, j);
            }
        }
    }
}

/// Count occurrences of each face (1-6). Index 0 is unused.
pub fn count_faces(hand: &Hand) -> [u8; 7] {
    let mut face_count = [0u8; 7];
    for &d in hand {
        face_count[d as usize] += 1;
    }
    face_count
}

/// Number of dice a keep-mask re-rolls (the unkept positions).
#[inline(always)]
pub fn reroll_count(mask: KeepMask) -> usize {
    DICE_COUNT - (mask & KEEP_ALL_MASK).count_ones() as usize
}

/// Number of multisets of size `k` drawn from 6 faces: C(k+5, 5).
///
/// This is the outcome count the solver divides by when averaging over
/// re-roll results: `num_outcomes(1) == 6`, `num_outcomes(2) == 21`,
/// `num_outcomes(5) == 252`.
pub fn num_outcomes(k: usize) -> usize {
    // C(k+5, 5) computed incrementally to stay exact in integer arithmetic.
    let mut c = 1usize;
    for i in 1..=DICE_COUNT {
        c = c * (k + i) / i;
    }
    c
}

/// Roll five fresh dice, returning a canonical hand.
pub fn roll_hand(rng: &mut SmallRng) -> Hand {
    let mut hand = [0u8; DICE_COUNT];
    for d in &mut hand {
        *d = rng.random_range(1..=NUM_FACES as u8);
    }
    sort_hand(&mut hand);
    hand
}

/// Re-roll the unkept dice of `hand` (bit i of `mask` set = keep die i),
/// returning the re-sorted successor hand.
pub fn sample_reroll(hand: &Hand, mask: KeepMask, rng: &mut SmallRng) -> Hand {
    let mut next = *hand;
    for (i, d) in next.iter_mut().enumerate() {
        if mask & (1 << i) == 0 {
            *d = rng.random_range(1..=NUM_FACES as u8);
        }
    }
    sort_hand(&mut next);
    next
}

/// P(fresh roll -> hand): multinomial(5; face counts) / 6^5.
///
/// Used to precompute per-category completion probabilities for the
/// score-adjustment heuristic.
pub fn hand_probability(hand: &Hand) -> f64 {
    const FACTORIAL: [f64; 6] = [1.0, 1.0, 2.0, 6.0, 24.0, 120.0];
    let face_count = count_faces(hand);
    let mut denominator = 1.0;
    for f in 1..=NUM_FACES {
        denominator *= FACTORIAL[face_count[f] as usize];
    }
    let permutations = FACTORIAL[DICE_COUNT] / denominator;
    permutations / (NUM_FACES as f64).powi(DICE_COUNT as i32)
}

/// Iterator over every canonical hand reachable from `hand` under `mask`.
///
/// The re-rolled dice are enumerated as combinations-with-repetition over
/// {1..6} (each multiset exactly once, in lexicographic order), concatenated
/// with the kept dice and re-sorted. The iterator yields exactly
/// [`num_outcomes`]`(k)` hands for `k` re-rolled dice; the degenerate
/// keep-all mask yields the canonicalized input hand once.
pub struct Outcomes {
    kept: [u8; DICE_COUNT],
    kept_len: usize,
    combo: [u8; DICE_COUNT],
    k: usize,
    done: bool,
}

/// Enumerate all re-roll outcomes for `hand` under `mask`.
pub fn possible_outcomes(hand: &Hand, mask: KeepMask) -> Outcomes {
    let mut kept = [0u8; DICE_COUNT];
    let mut kept_len = 0;
    for (i, &d) in hand.iter().enumerate() {
        if mask & (1 << i) != 0 {
            kept[kept_len] = d;
            kept_len += 1;
        }
    }
    Outcomes {
        kept,
        kept_len,
        combo: [1u8; DICE_COUNT],
        k: DICE_COUNT - kept_len,
        done: false,
    }
}

impl Iterator for Outcomes {
    type Item = Hand;

    fn next(&mut self) -> Option<Hand> {
        if self.done {
            return None;
        }

        let mut hand = [0u8; DICE_COUNT];
        hand[..self.kept_len].copy_from_slice(&self.kept[..self.kept_len]);
        hand[self.kept_len..].copy_from_slice(&self.combo[..self.k]);
        sort_hand(&mut hand);

        // Advance the non-decreasing odometer over the k re-rolled faces.
        let mut i = self.k;
        loop {
            if i == 0 {
                self.done = true;
                break;
            }
            i -= 1;
            if self.combo[i] < NUM_FACES as u8 {
                let v = self.combo[i] + 1;
                for c in &mut self.combo[i..self.k] {
                    *c = v;
                }
                break;
            }
        }

        Some(hand)
    }
}

/// Iterator over all 252 canonical hands (a full five-dice re-roll).
pub fn all_hands() -> Outcomes {
    possible_outcomes(&[1, 1, 1, 1, 1], 0)
}
