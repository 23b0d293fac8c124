//! News article model.

use super::*;

/// An article from the upstream provider.
///
/// Articles are immutable once built. The url doubles as the identity used
/// for deduplication across topics.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    title: String,
    description: String,
    url: String,
    source: String,
    published_at: String,
    #[serde(rename = "urlToImage")]
    image_url: String,
}

impl Article {
    /// Get article title.
    pub fn title(&self) -> &String {
        &self.title
    }

    /// Get article description.
    pub fn description(&self) -> &String {
        &self.description
    }

    /// Get article url.
    pub fn url(&self) -> &String {
        &self.url
    }

    /// Get the name of the source that published the article.
    pub fn source(&self) -> &String {
        &self.source
    }

    /// Get the publication timestamp, as reported by the provider.
    pub fn published_at(&self) -> &String {
        &self.published_at
    }

    /// Get the article image url.
    pub fn image_url(&self) -> &String {
        &self.image_url
    }
}

/// Builder for [`Article`]. Missing fields become empty strings.
pub struct ArticleBuilder {
    title: Option<String>,
    description: Option<String>,
    url: Option<String>,
    source: Option<String>,
    published_at: Option<String>,
    image_url: Option<String>,
}

impl ArticleBuilder {
    pub fn new() -> Self {
        Self {
            title: None,
            description: None,
            url: None,
            source: None,
            published_at: None,
            image_url: None,
        }
    }

    pub fn title(&mut self, title: impl Into<String>) -> &mut Self {
        self.title = Some(title.into());
        self
    }

    pub fn description(&mut self, description: impl Into<String>) -> &mut Self {
        self.description = Some(description.into());
        self
    }

    pub fn url(&mut self, url: impl Into<String>) -> &mut Self {
        self.url = Some(url.into());
        self
    }

    pub fn source(&mut self, source: impl Into<String>) -> &mut Self {
        self.source = Some(source.into());
        self
    }

    pub fn published_at(&mut self, published_at: impl Into<String>) -> &mut Self {
        self.published_at = Some(published_at.into());
        self
    }

    pub fn image_url(&mut self, image_url: impl Into<String>) -> &mut Self {
        self.image_url = Some(image_url.into());
        self
    }

    pub fn build(&self) -> Article {
        Article {
            title: self.title.clone().unwrap_or_default(),
            description: self.description.clone().unwrap_or_default(),
            url: self.url.clone().unwrap_or_default(),
            source: self.source.clone().unwrap_or_default(),
            published_at: self.published_at.clone().unwrap_or_default(),
            image_url: self.image_url.clone().unwrap_or_default(),
        }
    }
}

impl Default for ArticleBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl From<ArticleBuilder> for Article {
    fn from(value: ArticleBuilder) -> Self {
        value.build()
    }
}
