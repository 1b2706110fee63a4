//! Game constants and cache-file format identifiers.

/// Number of dice in a hand.
pub const DICE_COUNT: usize = 5;

/// Number of faces per die (values 1..=6).
pub const NUM_FACES: usize = 6;

/// Re-rolls available per round after the opening roll.
pub const MAX_REROLLS: u8 = 2;

/// Number of 5-bit keep-masks (including the degenerate keep-all mask).
pub const NUM_KEEP_MASKS: usize = 32;

/// The keep-all mask (0b11111): every die kept, nothing re-rolled.
/// Excluded from the legal action set — burning a re-roll on it is
/// dominated by scoring or by any other mask.
pub const KEEP_ALL_MASK: u8 = 0b11111;

/// Distinct sorted 5-dice multisets from {1..6}: C(10, 5) = 252.
pub const NUM_INITIAL_HANDS: usize = 252;

/// Upper bound on table size; scoreboards carry this many slots.
pub const MAX_CATEGORIES: usize = 8;

/// Cache file magic number: "DPKR" in little-endian byte order.
pub const CACHE_FILE_MAGIC: u32 = 0x524B5044;

/// Cache file format version.
pub const CACHE_FILE_VERSION: u32 = 1;
