//! TTL-keyed article cache.

use super::*;

/// Keyed, TTL-aware store of fetched article lists.
///
/// The store knows nothing about topics or the provider protocol; keys are
/// built by callers (see [`preference_key`] and [`search_key`]). Staleness is
/// evaluated lazily when an entry is read. There is no background sweep and
/// no size bound.
pub struct CacheStore {
    entries: HashMap<String, CacheEntry>,
    default_ttl: Duration,
}

/// A single cached result set.
#[derive(Clone, Debug)]
struct CacheEntry {
    articles: Vec<Article>,
    cached_at: DateTime<Utc>,
    ttl: Duration,
}

impl CacheEntry {
    /// An entry is stale once its age strictly exceeds its ttl; it is still
    /// valid at exactly `age == ttl`.
    fn is_stale(&self, now: DateTime<Utc>) -> bool {
        now - self.cached_at > self.ttl
    }
}

impl CacheStore {
    pub fn new(default_ttl: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            default_ttl,
        }
    }

    /// Get the cached articles for `key`, if present and fresh.
    /// A stale entry is removed on the way out and reported as a miss.
    pub fn get(&mut self, key: &str) -> Option<Vec<Article>> {
        let now = Utc::now();
        let Some(entry) = self.entries.get(key) else {
            tracing::debug!("Cache miss for \"{}\".", key);
            return None;
        };
        let age = now - entry.cached_at;
        if age > entry.ttl {
            self.entries.remove(key);
            tracing::debug!(
                "Cache miss (stale) for \"{}\", age {}s.",
                key,
                age.num_seconds()
            );
            return None;
        }
        tracing::debug!("Cache hit for \"{}\", age {}s.", key, age.num_seconds());
        Some(entry.articles.clone())
    }

    /// Create or replace the entry for `key` with the store's default ttl,
    /// stamped at now.
    pub fn set(&mut self, key: impl Into<String>, articles: Vec<Article>) {
        let ttl = self.default_ttl;
        self.set_with_ttl(key, articles, ttl);
    }

    /// Create or replace the entry for `key` with an explicit ttl.
    pub fn set_with_ttl(
        &mut self,
        key: impl Into<String>,
        articles: Vec<Article>,
        ttl: Duration,
    ) {
        let key = key.into();
        tracing::debug!(
            "Cache set for \"{}\": {} article(s), ttl {}s.",
            key,
            articles.len(),
            ttl.num_seconds()
        );
        self.entries.insert(
            key,
            CacheEntry {
                articles,
                cached_at: Utc::now(),
                ttl,
            },
        );
    }

    /// Remove the entry for `key`, if present.
    pub fn invalidate(&mut self, key: &str) {
        if self.entries.remove(key).is_some() {
            tracing::debug!("Cache invalidated \"{}\".", key);
        }
    }

    /// Remove all entries.
    pub fn flush(&mut self) {
        self.entries.clear();
    }

    /// Read-only snapshot for observability.
    /// Stale entries are listed as-is; listing never evicts.
    pub fn stats(&self) -> Vec<CacheStats> {
        let now = Utc::now();
        self.entries
            .iter()
            .map(|(key, entry)| CacheStats {
                key: key.clone(),
                count: entry.articles.len(),
                age_seconds: (now - entry.cached_at).num_seconds(),
                ttl_seconds: entry.ttl.num_seconds(),
            })
            .collect()
    }

    /// Point-in-time copy of the live key set, safe to iterate while the
    /// store is concurrently mutated.
    pub fn keys(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Observability snapshot of a single cache entry.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheStats {
    pub key: String,
    pub count: usize,
    pub age_seconds: i64,
    pub ttl_seconds: i64,
}
