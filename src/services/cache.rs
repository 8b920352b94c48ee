use dashmap::DashMap;
use std::time::{Duration, Instant};

/// Per-symbol cache with a fixed time-to-live.
///
/// Keys are symbols and are matched case-insensitively.
pub struct SymbolCache<V> {
    data: DashMap<String, CacheEntry<V>>,
    ttl: Duration,
}

struct CacheEntry<V> {
    value: V,
    expires_at: Instant,
}

fn normalize(symbol: &str) -> String {
    symbol.trim().to_uppercase()
}

impl<V: Clone> SymbolCache<V> {
    pub fn new(ttl: Duration) -> Self {
        Self {
            data: DashMap::new(),
            ttl,
        }
    }

    /// Cached value for `symbol`, evicting it if expired.
    pub fn get(&self, symbol: &str) -> Option<V> {
        let key = normalize(symbol);
        let entry = self.data.get(&key)?;
        if entry.expires_at > Instant::now() {
            Some(entry.value.clone())
        } else {
            drop(entry);
            self.data.remove(&key);
            None
        }
    }

    pub fn insert(&self, symbol: &str, value: V) {
        self.data.insert(
            normalize(symbol),
            CacheEntry {
                value,
                expires_at: Instant::now() + self.ttl,
            },
        );
    }

    /// Drop every expired entry.
    pub fn purge_expired(&self) {
        let now = Instant::now();
        self.data.retain(|_, entry| entry.expires_at > now);
    }

    /// Number of entries, including expired ones not yet purged.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
