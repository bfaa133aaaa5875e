//! Bounded per-session record cache.
//!
//! One entry per resource key, capped at a small fixed capacity. When full,
//! the oldest *inserted* key is evicted — insertion order is tracked
//! explicitly so eviction is deterministic. Updating an existing key
//! replaces its value but keeps its original queue position.
//!
//! The cache lives inside a single [`Resolver`](crate::pipeline::Resolver)
//! and is accessed from one logical task at a time; it is not synchronized
//! for concurrent callers.

use serde_json::Value;
use tracing::debug;

use crate::resource::Resource;

/// Default number of entries a cache holds before evicting.
pub const DEFAULT_CAPACITY: usize = 10;

/// An insertion-ordered, bounded map from resource key to normalized records.
///
/// # Examples
///
/// ```
/// use vitrine::cache::RecordCache;
/// use vitrine::resource::Resource;
///
/// let mut cache = RecordCache::new();
/// cache.insert(Resource::Marcas, vec![]);
/// assert!(cache.get(Resource::Marcas).is_some());
/// assert!(cache.get(Resource::Veiculos).is_none());
/// ```
#[derive(Debug, Clone)]
pub struct RecordCache {
    // Insertion order front-to-back; front is the eviction victim.
    entries: Vec<(Resource, Vec<Value>)>,
    capacity: usize,
}

impl RecordCache {
    /// Creates a cache with [`DEFAULT_CAPACITY`].
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Creates a cache bounded at `capacity` entries. A capacity of zero is
    /// clamped to one so inserts are never silently dropped.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::new(),
            capacity: capacity.max(1),
        }
    }

    /// Returns the cached records for `resource`, if present.
    pub fn get(&self, resource: Resource) -> Option<&[Value]> {
        self.entries
            .iter()
            .find(|(key, _)| *key == resource)
            .map(|(_, records)| records.as_slice())
    }

    /// Stores `records` under `resource`.
    ///
    /// A new key at capacity evicts the oldest inserted entry. Re-inserting
    /// an existing key overwrites its records in place.
    pub fn insert(&mut self, resource: Resource, records: Vec<Value>) {
        if let Some(entry) = self.entries.iter_mut().find(|(key, _)| *key == resource) {
            entry.1 = records;
            return;
        }
        if self.entries.len() >= self.capacity {
            let (evicted, _) = self.entries.remove(0);
            debug!(key = %evicted, "cache full — evicting oldest entry");
        }
        self.entries.push((resource, records));
    }

    /// Returns the number of cached entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drops every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl Default for RecordCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn get_miss_then_hit() {
        let mut cache = RecordCache::new();
        assert!(cache.get(Resource::Marcas).is_none());
        cache.insert(Resource::Marcas, vec![json!({ "nome": "Fiat" })]);
        assert_eq!(cache.get(Resource::Marcas).unwrap().len(), 1);
    }

    #[test]
    fn evicts_oldest_inserted_key() {
        let mut cache = RecordCache::with_capacity(1);
        cache.insert(Resource::Marcas, vec![]);
        cache.insert(Resource::Veiculos, vec![]);
        assert!(cache.get(Resource::Marcas).is_none());
        assert!(cache.get(Resource::Veiculos).is_some());
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn reinsert_overwrites_without_evicting() {
        let mut cache = RecordCache::with_capacity(2);
        cache.insert(Resource::Marcas, vec![json!(1)]);
        cache.insert(Resource::Veiculos, vec![]);
        cache.insert(Resource::Marcas, vec![json!(2)]);
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get(Resource::Marcas).unwrap(), &[json!(2)]);
        // Marcas kept its queue position: a third key would still evict it.
        assert!(cache.get(Resource::Veiculos).is_some());
    }

    #[test]
    fn zero_capacity_clamped_to_one() {
        let mut cache = RecordCache::with_capacity(0);
        cache.insert(Resource::Marcas, vec![]);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn clear_empties_the_cache() {
        let mut cache = RecordCache::new();
        cache.insert(Resource::Marcas, vec![]);
        cache.clear();
        assert!(cache.is_empty());
    }
}
