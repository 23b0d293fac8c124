//! NewsAPI-backed provider.

use super::*;

use news::{Article, ArticleBuilder, ProviderError};

/// Client for a NewsAPI-shaped provider.
///
/// Every request carries the configured api key and language and is bounded
/// by the configured timeout. Failures are classified into the
/// [`ProviderError`] taxonomy here, at the network seam.
pub struct NewsApi {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    language: String,
}

impl NewsApi {
    /// Build a client from provider configuration.
    pub fn new(config: &ProviderConfig, api_key: Option<String>) -> Result<Self> {
        let client = match reqwest::ClientBuilder::new()
            .timeout(config.timeout)
            .build()
        {
            Ok(client) => client,
            Err(e) => bail!("Unable to build http client: {}", e),
        };
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key,
            language: config.language.clone(),
        })
    }

    /// Fire a GET against an endpoint and return the article list.
    async fn fetch(
        &self,
        endpoint: &str,
        params: &[(&str, &str)],
    ) -> Result<Vec<Article>, ProviderError> {
        let url = format!("{}/{}", self.base_url, endpoint);
        let mut request = self.client.get(&url).query(params);
        if let Some(api_key) = &self.api_key {
            request = request.query(&[("apiKey", api_key.as_str())]);
        }
        let response = request.send().await.map_err(classify_transport)?;
        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<WireError>()
                .await
                .map(|e| e.message)
                .unwrap_or_else(|_| status.to_string());
            return Err(match status.as_u16() {
                401 => ProviderError::Auth(message),
                429 => ProviderError::RateLimited,
                code => ProviderError::Upstream {
                    status: code,
                    message,
                },
            });
        }
        let body: WireResponse =
            response.json().await.map_err(classify_transport)?;
        Ok(body
            .articles
            .into_iter()
            .map(WireArticle::into_article)
            .collect())
    }
}

#[news::provider_trait]
impl news::NewsProvider for NewsApi {
    async fn fetch_top_headlines(&self) -> Result<Vec<Article>, ProviderError> {
        self.fetch(
            "top-headlines",
            &[("language", self.language.as_str()), ("pageSize", "10")],
        )
        .await
    }

    async fn fetch_by_topic(
        &self,
        topic: &str,
    ) -> Result<Vec<Article>, ProviderError> {
        self.fetch(
            "everything",
            &[
                ("q", topic),
                ("language", self.language.as_str()),
                ("sortBy", "publishedAt"),
                ("pageSize", "5"),
            ],
        )
        .await
    }

    async fn fetch_by_keyword(
        &self,
        keyword: &str,
    ) -> Result<Vec<Article>, ProviderError> {
        self.fetch(
            "everything",
            &[
                ("q", keyword),
                ("language", self.language.as_str()),
                ("sortBy", "relevancy"),
                ("pageSize", "20"),
            ],
        )
        .await
    }
}

/// Map transport failures onto the provider taxonomy.
fn classify_transport(e: reqwest::Error) -> ProviderError {
    if e.is_timeout() {
        ProviderError::Timeout
    } else if e.is_connect() {
        ProviderError::Unreachable(e.to_string())
    } else {
        ProviderError::Upstream {
            status: e.status().map(|s| s.as_u16()).unwrap_or(0),
            message: e.to_string(),
        }
    }
}

/// Article record as returned on the wire.
#[derive(Debug, Deserialize)]
struct WireArticle {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    source: Option<WireSource>,
    #[serde(default, rename = "publishedAt")]
    published_at: Option<String>,
    #[serde(default, rename = "urlToImage")]
    image_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WireSource {
    #[serde(default)]
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WireResponse {
    #[serde(default)]
    articles: Vec<WireArticle>,
}

#[derive(Debug, Deserialize)]
struct WireError {
    #[serde(default)]
    message: String,
}

impl WireArticle {
    fn into_article(self) -> Article {
        let mut builder = ArticleBuilder::new();
        builder
            .title(self.title.unwrap_or_default())
            .description(self.description.unwrap_or_default())
            .url(self.url.unwrap_or_default())
            .source(
                self.source.and_then(|s| s.name).unwrap_or_default(),
            )
            .published_at(self.published_at.unwrap_or_default())
            .image_url(self.image_url.unwrap_or_default());
        builder.build()
    }
}
