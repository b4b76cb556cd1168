//! Thread-safe memoization of derived queries.
//!
//! Each key gets its own [`OnceLock`] cell. The map lock is held only long
//! enough to find or insert the cell, so computing one key never blocks
//! readers of another, and racing callers on the same key compute once.

use std::collections::HashMap;
use std::fmt;
use std::hash::{BuildHasher, Hash};
use std::sync::{Arc, OnceLock};

use parking_lot::RwLock;
use rustc_hash::FxBuildHasher;

/// A cache of `key → value` results of a pure computation.
pub struct Memoizer<K, V, S = FxBuildHasher> {
    cells: RwLock<HashMap<K, Arc<OnceLock<V>>, S>>,
}

impl<K, V, S> Memoizer<K, V, S>
where
    K: Eq + Hash + Clone,
    V: Clone,
    S: BuildHasher + Default,
{
    pub fn new() -> Self {
        Self {
            cells: RwLock::new(HashMap::with_hasher(S::default())),
        }
    }

    /// Return the cached value for `key`, computing it on first use.
    ///
    /// `compute` must be pure: the first caller to reach the cell runs it,
    /// and every caller observes that same result.
    pub fn evaluate(&self, key: K, compute: impl FnOnce(&K) -> V) -> V {
        let cell = self.cell(&key);
        cell.get_or_init(|| compute(&key)).clone()
    }

    /// The cached value, without computing.
    pub fn get(&self, key: &K) -> Option<V> {
        self.cells.read().get(key).and_then(|cell| cell.get().cloned())
    }

    pub fn len(&self) -> usize {
        self.cells.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.read().is_empty()
    }

    fn cell(&self, key: &K) -> Arc<OnceLock<V>> {
        if let Some(cell) = self.cells.read().get(key) {
            return Arc::clone(cell);
        }
        let mut cells = self.cells.write();
        // Another caller may have inserted between the two locks.
        Arc::clone(cells.entry(key.clone()).or_default())
    }
}

impl<K, V, S> Default for Memoizer<K, V, S>
where
    K: Eq + Hash + Clone,
    V: Clone,
    S: BuildHasher + Default,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, S> fmt::Debug for Memoizer<K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Memoizer")
            .field("entries", &self.cells.read().len())
            .finish()
    }
}
