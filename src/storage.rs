//! Binary I/O for the solver's memoization cache.
//!
//! Format: 24-byte header (magic "DPKR", version, category-table
//! fingerprint, entry count) followed by fixed 56-byte records — a 48-byte
//! state encoding plus the f64 value. Cached values are only meaningful
//! under the table they were solved for, so a file whose fingerprint does
//! not match the caller's table is rejected. Persistence is a pure
//! optimization: a missing, truncated, or mismatched file loads as "no
//! cache", never as an error, because a cold cache produces identical
//! results to a warm one.

use std::collections::HashMap;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use std::time::Instant;

use crate::config::CategoryTable;
use crate::constants::*;
use crate::types::{Scoreboard, State};

/// Bytes per serialized state: hand flag + 5 faces + rolls + turns +
/// 8 slots x (flag + i32 score).
const STATE_RECORD_BYTES: usize = 8 + MAX_CATEGORIES * 5;

/// Bytes per cache entry: state record + f64 value.
const ENTRY_BYTES: usize = STATE_RECORD_BYTES + 8;

const HEADER_BYTES: usize = 24;

/// Save the memo cache for `table`. Creates parent directories as needed.
pub fn save_cache(
    cache: &HashMap<State, f64>,
    table: &CategoryTable,
    filename: &str,
) -> std::io::Result<()> {
    let start_time = Instant::now();
    println!("Saving {} cache entries to {}...", cache.len(), filename);

    if let Some(parent) = Path::new(filename).parent() {
        fs::create_dir_all(parent)?;
    }

    let mut buf = Vec::with_capacity(HEADER_BYTES + cache.len() * ENTRY_BYTES);
    buf.extend_from_slice(&CACHE_FILE_MAGIC.to_le_bytes());
    buf.extend_from_slice(&CACHE_FILE_VERSION.to_le_bytes());
    buf.extend_from_slice(&table.fingerprint().to_le_bytes());
    buf.extend_from_slice(&(cache.len() as u64).to_le_bytes());
    for (state, value) in cache {
        encode_state(state, &mut buf);
        buf.extend_from_slice(&value.to_le_bytes());
    }

    let mut f = File::create(filename)?;
    f.write_all(&buf)?;

    let elapsed = start_time.elapsed().as_secs_f64() * 1000.0;
    println!("Saved {} entries in {:.2} ms", cache.len(), elapsed);
    Ok(())
}

/// Load a previously saved cache for `table`. Returns `None` (start cold)
/// on a missing, truncated, or format-mismatched file, or one solved
/// under a different category table.
pub fn load_cache(filename: &str, table: &CategoryTable) -> Option<HashMap<State, f64>> {
    let start_time = Instant::now();

    let data = match fs::read(filename) {
        Ok(d) => d,
        Err(_) => {
            println!("Cache file not found: {}", filename);
            return None;
        }
    };

    if data.len() < HEADER_BYTES {
        println!("Cache file too small: {}", filename);
        return None;
    }

    let magic = u32::from_le_bytes(data[0..4].try_into().ok()?);
    let version = u32::from_le_bytes(data[4..8].try_into().ok()?);
    if magic != CACHE_FILE_MAGIC || version != CACHE_FILE_VERSION {
        println!(
            "Invalid cache format (magic=0x{:08x} version={})",
            magic, version
        );
        return None;
    }

    let fingerprint = u64::from_le_bytes(data[8..16].try_into().ok()?);
    if fingerprint != table.fingerprint() {
        println!(
            "Cache built for a different category table (fingerprint 0x{:x}, expected 0x{:x}): {}",
            fingerprint,
            table.fingerprint(),
            filename
        );
        return None;
    }

    let count = u64::from_le_bytes(data[16..24].try_into().ok()?) as usize;
    if data.len() != HEADER_BYTES + count * ENTRY_BYTES {
        println!(
            "Cache file size mismatch: expected {}, got {}",
            HEADER_BYTES + count * ENTRY_BYTES,
            data.len()
        );
        return None;
    }

    let mut cache = HashMap::with_capacity(count);
    for i in 0..count {
        let off = HEADER_BYTES + i * ENTRY_BYTES;
        let state = decode_state(&data[off..off + STATE_RECORD_BYTES])?;
        let value = f64::from_le_bytes(
            data[off + STATE_RECORD_BYTES..off + ENTRY_BYTES]
                .try_into()
                .ok()?,
        );
        cache.insert(state, value);
    }

    let elapsed = start_time.elapsed().as_secs_f64() * 1000.0;
    println!(
        "Loaded {} cache entries from {} in {:.2} ms",
        cache.len(),
        filename,
        elapsed
    );
    Some(cache)
}

fn encode_state(state: &State, buf: &mut Vec<u8>) {
    match state.hand {
        Some(hand) => {
            buf.push(1);
            buf.extend_from_slice(&hand);
        }
        None => {
            buf.push(0);
            buf.extend_from_slice(&[0u8; DICE_COUNT]);
        }
    }
    buf.push(state.rolls_left);
    buf.push(state.turns_left);
    for slot in 0..MAX_CATEGORIES {
        match state.board.get(slot) {
            Some(score) => {
                buf.push(1);
                buf.extend_from_slice(&score.to_le_bytes());
            }
            None => {
                buf.push(0);
                buf.extend_from_slice(&0i32.to_le_bytes());
            }
        }
    }
}

fn decode_state(rec: &[u8]) -> Option<State> {
    let hand = match rec[0] {
        0 => None,
        1 => {
            let mut h = [0u8; DICE_COUNT];
            h.copy_from_slice(&rec[1..6]);
            if h.iter().any(|&d| !(1..=NUM_FACES as u8).contains(&d)) {
                return None;
            }
            Some(h)
        }
        _ => return None,
    };
    let rolls_left = rec[6];
    let turns_left = rec[7];
    if rolls_left > MAX_REROLLS {
        return None;
    }

    let mut board = Scoreboard::new();
    for slot in 0..MAX_CATEGORIES {
        let off = 8 + slot * 5;
        match rec[off] {
            0 => {}
            1 => {
                let score = i32::from_le_bytes(rec[off + 1..off + 5].try_into().ok()?);
                board = board.recorded(slot, score);
            }
            _ => return None,
        }
    }

    Some(State {
        hand,
        rolls_left,
        board,
        turns_left,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CategoryTable;
    use crate::scoring::Category;
    use crate::solver::Solver;

    #[test]
    fn test_round_trip() {
        let path = "/tmp/dice_poker_cache_round_trip.bin";
        let table = CategoryTable::new(vec![Category::Pair, Category::FiveOfAKind]);

        let mut solver = Solver::new(&table);
        let v = solver.value(&State::fresh(1));
        let cache = solver.into_cache();
        assert!(!cache.is_empty());

        save_cache(&cache, &table, path).unwrap();
        let loaded = load_cache(path, &table).unwrap();
        assert_eq!(loaded.len(), cache.len());
        for (state, value) in &cache {
            assert_eq!(loaded.get(state), Some(value));
        }

        // A solver warmed from disk agrees with the original run.
        let mut warm = Solver::with_cache(&table, loaded);
        assert_eq!(warm.value(&State::fresh(1)), v);

        let _ = fs::remove_file(path);
    }

    #[test]
    fn test_missing_file_starts_cold() {
        let table = CategoryTable::new(vec![Category::Pair]);
        assert!(load_cache("/tmp/dice_poker_cache_nonexistent.bin", &table).is_none());
    }

    #[test]
    fn test_corrupt_file_starts_cold() {
        let path = "/tmp/dice_poker_cache_corrupt.bin";
        let table = CategoryTable::new(vec![Category::Pair]);

        // Wrong magic.
        fs::write(path, [0u8; 32]).unwrap();
        assert!(load_cache(path, &table).is_none());

        // Right header, truncated body.
        let mut cache = HashMap::new();
        cache.insert(State::fresh(3), 12.5);
        save_cache(&cache, &table, path).unwrap();
        let data = fs::read(path).unwrap();
        fs::write(path, &data[..data.len() - 4]).unwrap();
        assert!(load_cache(path, &table).is_none());

        let _ = fs::remove_file(path);
    }

    #[test]
    fn test_cache_from_another_table_starts_cold() {
        let path = "/tmp/dice_poker_cache_variant.bin";
        let eight = CategoryTable::standard();
        let seven = CategoryTable::seven();

        let mut solver = Solver::new(&eight);
        let v = solver.value(&State::fresh(1));
        save_cache(solver.cache(), &eight, path).unwrap();

        // Eight-variant values would poison a seven-variant solve, so the
        // file is rejected and the seven-variant answer stays the cold one.
        assert!(load_cache(path, &seven).is_none());
        let warm = load_cache(path, &seven).unwrap_or_default();
        let mut seven_solver = Solver::with_cache(&seven, warm);
        let seven_v = seven_solver.value(&State::fresh(1));
        assert_eq!(seven_v, Solver::new(&seven).value(&State::fresh(1)));
        assert_ne!(seven_v, v);

        // The table the cache was built for still loads it.
        assert!(load_cache(path, &eight).is_some());

        let _ = fs::remove_file(path);
    }

    #[test]
    fn test_state_encoding_round_trip() {
        let mut state = State::fresh(5).opened([1, 3, 3, 5, 6]);
        state.rolls_left = 1;
        state.board = Scoreboard::new().recorded(0, 6).recorded(7, 240);

        let mut buf = Vec::new();
        encode_state(&state, &mut buf);
        assert_eq!(buf.len(), STATE_RECORD_BYTES);
        assert_eq!(decode_state(&buf), Some(state));
    }
}
