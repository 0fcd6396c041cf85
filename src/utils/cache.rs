//! Key-value caches injected into the market data service.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// A process-wide memo table for one operation
pub trait Cache<K, V>: Send + Sync {
    fn get(&self, key: &K) -> Option<V>;
    fn insert(&self, key: K, value: V);
    fn len(&self) -> usize;
}

struct Entry<V> {
    stored_at: Instant,
    value: V,
}

/// In-memory cache whose entries expire `ttl` after insertion.
/// With no ttl, entries live as long as the cache.
pub struct TtlCache<K, V> {
    entries: Mutex<HashMap<K, Entry<V>>>,
    ttl: Option<Duration>,
}

impl<K, V> TtlCache<K, V>
where
    K: Eq + Hash,
    V: Clone,
{
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            ttl: Some(ttl),
        }
    }

    /// Entries never expire
    pub fn session() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            ttl: None,
        }
    }

    fn get_at(&self, key: &K, now: Instant) -> Option<V> {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        let expired = match (entries.get(key), self.ttl) {
            (None, _) => return None,
            (Some(entry), Some(ttl)) => now.duration_since(entry.stored_at) >= ttl,
            (Some(_), None) => false,
        };

        if expired {
            entries.remove(key);
            None
        } else {
            entries.get(key).map(|entry| entry.value.clone())
        }
    }

    fn insert_at(&self, key: K, value: V, now: Instant) {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.insert(key, Entry { stored_at: now, value });
    }
}

impl<K, V> Cache<K, V> for TtlCache<K, V>
where
    K: Eq + Hash + Send,
    V: Clone + Send,
{
    fn get(&self, key: &K) -> Option<V> {
        self.get_at(key, Instant::now())
    }

    fn insert(&self, key: K, value: V) {
        self.insert_at(key, value, Instant::now())
    }

    fn len(&self) -> usize {
        self.entries.lock().unwrap_or_else(|e| e.into_inner()).len()
    }
}

/// Stores nothing; every lookup misses
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopCache;

impl<K, V> Cache<K, V> for NoopCache {
    fn get(&self, _key: &K) -> Option<V> {
        None
    }

    fn insert(&self, _key: K, _value: V) {}

    fn len(&self) -> usize {
        0
    }
}
