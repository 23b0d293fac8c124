//! Multi-topic fetch orchestration.

use super::*;

use tokio::sync::oneshot;

type Waiters = Vec<oneshot::Sender<Vec<Article>>>;
type InflightTable = std::sync::Mutex<HashMap<String, Waiters>>;

/// Cache-first news aggregator.
///
/// Consults the shared [`CacheStore`] for each request; on a miss it fans out
/// to the [`NewsProvider`], merges and deduplicates the per-topic results,
/// and repopulates the cache. Concurrent misses for the same preference key
/// coalesce into a single provider fetch.
pub struct Aggregator {
    provider: Arc<dyn NewsProvider>,
    cache: Arc<Mutex<CacheStore>>,
    search_ttl: Duration,
    /// Preference fetches currently in flight, with their waiters.
    inflight: InflightTable,
}

impl Aggregator {
    pub fn new(
        provider: Arc<dyn NewsProvider>,
        cache: Arc<Mutex<CacheStore>>,
        search_ttl: Duration,
    ) -> Self {
        Self {
            provider,
            cache,
            search_ttl,
            inflight: std::sync::Mutex::new(HashMap::new()),
        }
    }

    /// Handle to the shared cache store.
    pub fn cache(&self) -> Arc<Mutex<CacheStore>> {
        self.cache.clone()
    }

    /// Fetch merged news for a list of preferred topics.
    ///
    /// Served from cache when fresh. On a miss, one provider call is issued
    /// per topic, concurrently; a failed topic is logged and contributes
    /// nothing, so the merge itself cannot fail. An empty preference list
    /// queries top headlines instead, and that single call's failure does
    /// propagate.
    pub async fn fetch_by_preferences(
        &self,
        preferences: &[String],
    ) -> Result<Vec<Article>, ProviderError> {
        let key = preference_key(preferences);
        if let Some(articles) = self.cache.lock().await.get(&key) {
            return Ok(articles);
        }

        // Coalesce concurrent misses for the same key: the first caller
        // fetches, the rest wait on its result.
        let rx = {
            let mut inflight = lock_inflight(&self.inflight);
            match inflight.get_mut(&key) {
                Some(waiters) => {
                    let (tx, rx) = oneshot::channel();
                    waiters.push(tx);
                    Some(rx)
                }
                None => {
                    inflight.insert(key.clone(), Vec::new());
                    None
                }
            }
        };
        if let Some(rx) = rx {
            return match rx.await {
                Ok(articles) => Ok(articles),
                // The leading fetch failed or was dropped; fetch for
                // ourselves so the caller sees its own failure, if any.
                Err(_) => self.fetch_and_store(preferences, &key).await,
            };
        }

        let _guard = InflightGuard {
            table: &self.inflight,
            key: key.clone(),
        };
        let result = self.fetch_and_store(preferences, &key).await;
        let waiters = lock_inflight(&self.inflight)
            .remove(&key)
            .unwrap_or_default();
        if let Ok(articles) = &result {
            for waiter in waiters {
                waiter.send(articles.clone()).ok();
            }
        }
        // On error the senders are dropped above and the waiters retry.
        result
    }

    /// Fetch news matching a keyword, relevance-ranked.
    ///
    /// Served from cache when fresh; a miss issues a single provider call
    /// whose failure propagates unmodified. Results are cached raw under the
    /// search ttl, with no deduplication pass.
    pub async fn search_news(
        &self,
        keyword: &str,
    ) -> Result<Vec<Article>, ProviderError> {
        let key = search_key(keyword);
        if let Some(articles) = self.cache.lock().await.get(&key) {
            return Ok(articles);
        }
        tracing::debug!("Searching provider for \"{}\".", keyword);
        let articles = self.provider.fetch_by_keyword(keyword).await?;
        self.cache
            .lock()
            .await
            .set_with_ttl(key, articles.clone(), self.search_ttl);
        Ok(articles)
    }

    /// Force a re-fetch for an existing cache key, bypassing the cached
    /// read. On failure the entry is left untouched and keeps aging toward
    /// its own ttl. Returns the number of articles stored.
    pub async fn refresh_key(&self, key: &str) -> Result<usize, ProviderError> {
        let articles = match KeyKind::parse(key) {
            KeyKind::TopHeadlines => self.provider.fetch_top_headlines().await?,
            KeyKind::Preferences(topics) => self.fan_out(&topics).await,
            KeyKind::Search(keyword) => {
                let articles = self.provider.fetch_by_keyword(&keyword).await?;
                let count = articles.len();
                self.cache
                    .lock()
                    .await
                    .set_with_ttl(key, articles, self.search_ttl);
                return Ok(count);
            }
        };
        let count = articles.len();
        self.cache.lock().await.set(key, articles);
        Ok(count)
    }

    /// Fetch from the provider and repopulate the cache under `key`.
    async fn fetch_and_store(
        &self,
        preferences: &[String],
        key: &str,
    ) -> Result<Vec<Article>, ProviderError> {
        tracing::debug!("Fetching \"{}\" from provider.", key);
        let articles = if preferences.is_empty() {
            self.provider.fetch_top_headlines().await?
        } else {
            self.fan_out(preferences).await
        };
        self.cache.lock().await.set(key, articles.clone());
        Ok(articles)
    }

    /// Issue one provider call per topic, concurrently, preserving topic
    /// order in the merged output. Failed calls are logged and contribute
    /// nothing; the join itself cannot fail.
    async fn fan_out(&self, topics: &[String]) -> Vec<Article> {
        let fetches = topics.iter().map(|topic| async move {
            match self.provider.fetch_by_topic(topic).await {
                Ok(articles) => Some(articles),
                Err(e) => {
                    tracing::warn!("Fetch failed for topic \"{}\": {}.", topic, e);
                    None
                }
            }
        });
        let results = futures::future::join_all(fetches).await;
        if !results.is_empty() && results.iter().all(|r| r.is_none()) {
            tracing::warn!(
                "Every topic fetch failed; the merged result is empty."
            );
        }
        dedup_by_url(results.into_iter().map(Option::unwrap_or_default))
    }
}

/// Concatenate article lists in order, keeping the first article seen for
/// each url and dropping articles without one.
fn dedup_by_url(lists: impl IntoIterator<Item = Vec<Article>>) -> Vec<Article> {
    let mut seen = HashSet::new();
    lists
        .into_iter()
        .flatten()
        .filter(|article| {
            !article.url().is_empty() && seen.insert(article.url().clone())
        })
        .collect()
}

fn lock_inflight(
    table: &InflightTable,
) -> std::sync::MutexGuard<'_, HashMap<String, Waiters>> {
    table.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
}

/// Removes the in-flight entry when the leading fetch finishes or is dropped
/// mid-flight, so waiters never hang on an abandoned fetch.
struct InflightGuard<'a> {
    table: &'a InflightTable,
    key: String,
}

impl Drop for InflightGuard<'_> {
    fn drop(&mut self) {
        lock_inflight(self.table).remove(&self.key);
    }
}
