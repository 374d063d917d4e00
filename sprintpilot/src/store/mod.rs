//! Stage store: the last successful output of each producing stage.
//!
//! Entries are overwritten on every successful run of the producing stage.
//! There is no history and no expiry. Stores are passed explicitly to the
//! pipeline so each stage can be exercised against an isolated store.

mod file;
mod memory;

pub use file::FileStageStore;
pub use memory::InMemoryStageStore;

use crate::core::{StageOutput, StoreKey};
use crate::errors::Result;

/// Synchronous key/value access to persisted stage outputs.
pub trait StageStore: Send + Sync {
    /// Returns the stored output for `key`, if any.
    ///
    /// A stored value that is falsy in the JavaScript sense (`null`,
    /// `false`, zero, `""`) reads as absent.
    fn get(&self, key: StoreKey) -> Result<Option<StageOutput>>;

    /// Replaces the stored output for `key`.
    fn put(&self, key: StoreKey, value: StageOutput) -> Result<()>;

    /// Removes every entry.
    fn clear(&self) -> Result<()>;

    /// Returns true if an output is stored for `key`.
    fn contains(&self, key: StoreKey) -> Result<bool> {
        Ok(self.get(key)?.is_some())
    }

    /// Returns the keys that currently hold an output, in chain order.
    fn keys(&self) -> Result<Vec<StoreKey>> {
        let mut present = Vec::new();
        for key in StoreKey::ALL {
            if self.contains(key)? {
                present.push(key);
            }
        }
        Ok(present)
    }
}
