//! Serve mode.

use super::*;

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

const MAX_KEYWORD_LEN: usize = 100;

/// Serve the news api over http.
pub async fn serve_cli(
    port: Option<u16>,
    config: Arc<Config>,
    aggregator: Arc<news::Aggregator>,
    cancel_token: CancellationToken,
) -> Result<()> {
    let app = axum::Router::new()
        .route("/news", axum::routing::get(get_news))
        .route("/news/search/{keyword}", axum::routing::get(get_search))
        .route("/news/cache/stats", axum::routing::get(get_cache_stats))
        .fallback(not_found)
        .with_state(Arc::new(AppState {
            aggregator,
            api_key_configured: config.provider.resolved_api_key().is_some(),
        }));
    let port = port.unwrap_or(config.port.unwrap_or(DEFAULT_PORT));
    let listener = match tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port))
        .await
    {
        Ok(listener) => listener,
        Err(e) => bail!("Unable to bind to port {}: {}", port, e),
    };

    tracing::info!("Serving news @ 0.0.0.0:{}.", port);

    let served = axum::serve(listener, app);
    let cancelled = cancel_token.cancelled();
    tokio::select! {
        served_res = served => {
            if let Err(e) = served_res {
                tracing::error!("Error serving: {}", e);
                cancel_token.cancel();
            }
        },
        _ = cancelled => {
            // Quit.
        },
    };

    Ok(())
}

struct AppState {
    aggregator: Arc<news::Aggregator>,
    api_key_configured: bool,
}
type StateType = State<Arc<AppState>>;

#[derive(Deserialize)]
struct NewsQuery {
    /// Comma-separated topic list.
    #[serde(default)]
    topics: Option<String>,
}

async fn get_news(
    State(state): StateType,
    Query(query): Query<NewsQuery>,
) -> Response {
    tracing::debug!("/news");
    if !state.api_key_configured {
        tracing::warn!(
            "News requested but no api key is configured; returning an empty feed."
        );
        return (
            StatusCode::OK,
            Json(json!({
                "news": [],
                "message": "No provider api key is configured; set NEWS_API_KEY to receive real articles.",
            })),
        )
            .into_response();
    }
    let preferences = parse_topics(query.topics.as_deref());
    match state.aggregator.fetch_by_preferences(&preferences).await {
        Ok(news) => {
            tracing::info!(
                "Fetched {} article(s) for topics {:?}.",
                news.len(),
                preferences
            );
            (StatusCode::OK, Json(json!({"count": news.len(), "news": news})))
                .into_response()
        }
        Err(e) => ApiError::from(e).into_response(),
    }
}

async fn get_search(
    State(state): StateType,
    Path(keyword): Path<String>,
) -> Response {
    tracing::debug!("/news/search/{}", keyword);
    if !state.api_key_configured {
        return ApiError::unavailable("No provider api key is configured.")
            .into_response();
    }
    let keyword = keyword.trim().to_string();
    if keyword.is_empty() {
        return ApiError::bad_request("keyword is required").into_response();
    }
    if keyword.len() > MAX_KEYWORD_LEN {
        return ApiError::bad_request("keyword must be 100 characters or fewer")
            .into_response();
    }
    match state.aggregator.search_news(&keyword).await {
        Ok(news) => {
            tracing::info!(
                "Search \"{}\" returned {} article(s).",
                keyword,
                news.len()
            );
            (
                StatusCode::OK,
                Json(json!({
                    "keyword": keyword,
                    "count": news.len(),
                    "news": news,
                })),
            )
                .into_response()
        }
        Err(e) => ApiError::from(e).into_response(),
    }
}

async fn get_cache_stats(State(state): StateType) -> Response {
    tracing::debug!("/news/cache/stats");
    let stats = state.aggregator.cache().lock().await.stats();
    (StatusCode::OK, Json(json!({"cache": stats}))).into_response()
}

async fn not_found(uri: axum::http::Uri) -> Response {
    tracing::debug!("404 for {}.", uri.path());
    ApiError::new(
        StatusCode::NOT_FOUND,
        format!("Route not found: {}", uri.path()),
    )
    .into_response()
}

/// Split a comma-separated topic list, dropping blanks.
pub(crate) fn parse_topics(topics: Option<&str>) -> Vec<String> {
    topics
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|topic| !topic.is_empty())
        .map(str::to_string)
        .collect()
}

/// Error body in the api's envelope shape.
pub(crate) struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    fn unavailable(message: impl Into<String>) -> Self {
        Self::new(StatusCode::SERVICE_UNAVAILABLE, message)
    }
}

impl From<news::ProviderError> for ApiError {
    /// Every provider failure category reads as service-unavailable to the
    /// caller; the category detail stays in the message.
    fn from(e: news::ProviderError) -> Self {
        Self::unavailable(e.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::warn!("{} -> {}.", self.message, self.status);
        (
            self.status,
            Json(json!({
                "status": self.status.as_u16(),
                "error": self.message,
                "timestamp": Utc::now().to_rfc3339(),
            })),
        )
            .into_response()
    }
}
