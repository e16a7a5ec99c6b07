//! Persistent key-value storage
//!
//! The game only ever touches storage through the small [`KvStore`] trait,
//! so the core stays decoupled from where scores actually live. The shipped
//! backend is a JSON file; tests use the in-memory store.

pub mod json;
pub mod memory;

pub use json::JsonFileStore;
pub use memory::MemoryStore;

use anyhow::Result;

/// Key the high score is stored under
pub const HIGH_SCORE_KEY: &str = "highScore";

/// Minimal key-value interface the game persists through
pub trait KvStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// Read the persisted high score. A missing or unparsable entry reads as
/// zero; absence is not an error.
pub fn load_high_score(store: &dyn KvStore) -> u32 {
    match store.get(HIGH_SCORE_KEY) {
        Ok(Some(raw)) => raw.trim().parse().unwrap_or(0),
        _ => 0,
    }
}

/// Persist `score` if it beats the stored high score. Returns whether a
/// write happened.
pub fn record_high_score(store: &mut dyn KvStore, score: u32) -> Result<bool> {
    if score > load_high_score(store) {
        store.set(HIGH_SCORE_KEY, &score.to_string())?;
        return Ok(true);
    }
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_high_score_reads_as_zero() {
        let store = MemoryStore::default();
        assert_eq!(load_high_score(&store), 0);
    }

    #[test]
    fn test_unparsable_high_score_reads_as_zero() {
        let mut store = MemoryStore::default();
        store.set(HIGH_SCORE_KEY, "not a number").unwrap();
        assert_eq!(load_high_score(&store), 0);
    }

    #[test]
    fn test_record_writes_only_on_new_max() {
        let mut store = MemoryStore::default();

        assert!(record_high_score(&mut store, 10).unwrap());
        assert_eq!(load_high_score(&store), 10);

        // Lower and equal scores leave the stored value alone.
        assert!(!record_high_score(&mut store, 5).unwrap());
        assert!(!record_high_score(&mut store, 10).unwrap());
        assert_eq!(load_high_score(&store), 10);

        assert!(record_high_score(&mut store, 15).unwrap());
        assert_eq!(load_high_score(&store), 15);
    }

    #[test]
    fn test_zero_score_is_never_written() {
        let mut store = MemoryStore::default();
        assert!(!record_high_score(&mut store, 0).unwrap());
        assert_eq!(store.get(HIGH_SCORE_KEY).unwrap(), None);
    }
}
