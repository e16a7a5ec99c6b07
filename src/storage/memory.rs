use std::collections::BTreeMap;

use anyhow::Result;

use super::KvStore;

/// In-memory key-value store; nothing survives the process. Used by tests
/// and anywhere persistence is unwanted.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KvStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_and_set() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get("highScore").unwrap(), None);

        store.set("highScore", "3").unwrap();
        assert_eq!(store.get("highScore").unwrap().as_deref(), Some("3"));

        store.set("highScore", "9").unwrap();
        assert_eq!(store.get("highScore").unwrap().as_deref(), Some("9"));
    }
}
