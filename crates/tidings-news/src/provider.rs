//! Upstream news provider seam.

use super::*;

/// Failure categories an upstream call can surface.
///
/// Classification happens in the provider implementation, around the actual
/// network call; the cache and merge logic never raise these themselves.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// The provider rejected the configured credentials.
    #[error("provider rejected credentials: {0}")]
    Auth(String),
    /// The provider throttled the request.
    #[error("provider rate limit exceeded")]
    RateLimited,
    /// Any other non-success provider status.
    #[error("provider error ({status}): {message}")]
    Upstream { status: u16, message: String },
    /// The call exceeded its fixed time bound.
    #[error("provider request timed out")]
    Timeout,
    /// The provider host could not be reached.
    #[error("unable to reach the provider: {0}")]
    Unreachable(String),
}

/// What defines an upstream news provider.
#[provider_trait]
pub trait NewsProvider: Send + Sync + 'static {
    /// Fetch the current top headlines.
    async fn fetch_top_headlines(&self) -> Result<Vec<Article>, ProviderError>;

    /// Fetch the latest articles for a single topic.
    async fn fetch_by_topic(&self, topic: &str)
    -> Result<Vec<Article>, ProviderError>;

    /// Fetch articles matching a keyword, relevance-ranked.
    async fn fetch_by_keyword(
        &self,
        keyword: &str,
    ) -> Result<Vec<Article>, ProviderError>;
}
