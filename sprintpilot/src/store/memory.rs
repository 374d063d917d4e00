//! In-process stage store.

use dashmap::DashMap;

use super::StageStore;
use crate::core::{is_truthy, StageOutput, StoreKey};
use crate::errors::Result;

/// A stage store kept in process memory.
#[derive(Debug, Default)]
pub struct InMemoryStageStore {
    entries: DashMap<StoreKey, StageOutput>,
}

impl InMemoryStageStore {
    /// Creates a new empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-seeded with one entry.
    #[must_use]
    pub fn with_entry(key: StoreKey, value: StageOutput) -> Self {
        let store = Self::new();
        store.entries.insert(key, value);
        store
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the store is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl StageStore for InMemoryStageStore {
    fn get(&self, key: StoreKey) -> Result<Option<StageOutput>> {
        Ok(self
            .entries
            .get(&key)
            .map(|entry| entry.value().clone())
            .filter(is_truthy))
    }

    fn put(&self, key: StoreKey, value: StageOutput) -> Result<()> {
        self.entries.insert(key, value);
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        self.entries.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_put_overwrites_without_merge() {
        let store = InMemoryStageStore::new();
        store.put(StoreKey::Fr01Out, json!({"a": 1, "b": 2})).unwrap();
        store.put(StoreKey::Fr01Out, json!({"c": 3})).unwrap();

        assert_eq!(store.get(StoreKey::Fr01Out).unwrap(), Some(json!({"c": 3})));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_falsy_values_read_as_absent() {
        for falsy in [serde_json::Value::Null, json!(false), json!(0), json!("")] {
            let store = InMemoryStageStore::with_entry(StoreKey::Fr02Out, falsy);
            assert_eq!(store.get(StoreKey::Fr02Out).unwrap(), None);
            assert!(!store.contains(StoreKey::Fr02Out).unwrap());
        }

        let store = InMemoryStageStore::with_entry(StoreKey::Fr02Out, json!([]));
        assert_eq!(store.get(StoreKey::Fr02Out).unwrap(), Some(json!([])));
    }

    #[test]
    fn test_keys_in_chain_order() {
        let store = InMemoryStageStore::new();
        store.put(StoreKey::Fr03Out, json!({})).unwrap();
        store.put(StoreKey::Fr01Out, json!({})).unwrap();

        assert_eq!(store.keys().unwrap(), vec![StoreKey::Fr01Out, StoreKey::Fr03Out]);

        store.clear().unwrap();
        assert!(store.is_empty());
    }
}
