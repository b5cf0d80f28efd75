//! NewsAPI request construction and retrieval.
//!
//! # Architecture
//!
//! - [`Endpoint`]: fixed request parameters (base URL, start date, API key)
//! - [`QueryKey`]: a fully parameterized request URL, also used as the cache key
//! - [`Fetcher`]: async retrieval of one [`ArticlesPage`] for a key
//! - [`HttpFetcher`]: the `reqwest` implementation of [`Fetcher`]
//!
//! There is no retry policy: a failed request fails the action that issued it.

use crate::error::FetchError;
use crate::models::ArticlesPage;
use crate::utils::truncate_for_log;
use std::fmt;
use std::time::Instant;
use tracing::{debug, instrument, warn};
use url::Url;

/// Default NewsAPI search endpoint.
pub const DEFAULT_BASE_URL: &str = "https://newsapi.org/v2/everything";

/// Sort order sent with every query.
const SORT_BY: &str = "publishedAt";

/// The fully parameterized request identity.
///
/// Two keys are equal exactly when they would issue the same request, so the
/// key doubles as the cache key.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct QueryKey(Url);

impl QueryKey {
    pub fn url(&self) -> &Url {
        &self.0
    }

    /// The key with its `apiKey` parameter masked, for logs.
    pub fn redacted(&self) -> String {
        let mut url = self.0.clone();
        let pairs: Vec<(String, String)> = self
            .0
            .query_pairs()
            .map(|(k, v)| {
                let v = if k == "apiKey" { "***".into() } else { v.into_owned() };
                (k.into_owned(), v)
            })
            .collect();
        url.query_pairs_mut().clear().extend_pairs(pairs);
        url.to_string()
    }

    /// Value of a single query parameter.
    pub fn param(&self, name: &str) -> Option<String> {
        self.0
            .query_pairs()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.into_owned())
    }
}

impl fmt::Debug for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("QueryKey").field(&self.redacted()).finish()
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.redacted())
    }
}

/// Request parameters that never change during a session.
#[derive(Clone)]
pub struct Endpoint {
    base: Url,
    from: String,
    api_key: String,
}

impl Endpoint {
    /// Create an endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error if `base` is not an absolute URL.
    pub fn new(base: &str, from: impl Into<String>, api_key: impl Into<String>) -> Result<Self, url::ParseError> {
        Ok(Self {
            base: Url::parse(base)?,
            from: from.into(),
            api_key: api_key.into(),
        })
    }

    /// Build the key for `topic` at `page`.
    pub fn key(&self, topic: &str, page: u32, page_size: u32) -> QueryKey {
        let mut url = self.base.clone();
        url.query_pairs_mut()
            .clear()
            .append_pair("q", topic)
            .append_pair("from", &self.from)
            .append_pair("sortBy", SORT_BY)
            .append_pair("apiKey", &self.api_key)
            .append_pair("page", &page.to_string())
            .append_pair("pageSize", &page_size.to_string());
        QueryKey(url)
    }
}

impl fmt::Debug for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Endpoint")
            .field("base", &self.base.as_str())
            .field("from", &self.from)
            .finish_non_exhaustive()
    }
}

/// Async retrieval of one page of articles.
///
/// Implementors are cheap to clone; the session loop hands a clone to each
/// spawned request.
pub trait Fetcher: Clone + Send + Sync + 'static {
    /// Fetch the page identified by `key`.
    ///
    /// # Errors
    ///
    /// [`FetchError::Status`] for a non-success status, otherwise the
    /// transport or decode failure.
    fn fetch(&self, key: &QueryKey) -> impl Future<Output = Result<ArticlesPage, FetchError>> + Send;
}

/// [`Fetcher`] backed by a shared `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    /// Build the HTTP client. NewsAPI rejects requests without a user agent.
    pub fn new() -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }
}

impl Fetcher for HttpFetcher {
    #[instrument(level = "info", skip_all, fields(key = %key))]
    async fn fetch(&self, key: &QueryKey) -> Result<ArticlesPage, FetchError> {
        let t0 = Instant::now();
        let response = self.client.get(key.url().clone()).send().await?;
        let status = response.status();
        let body = response.bytes().await?;
        let dt = t0.elapsed();

        if !status.is_success() {
            let info = serde_json::from_slice(&body).unwrap_or_else(|_| {
                serde_json::Value::String(String::from_utf8_lossy(&body).into_owned())
            });
            warn!(
                status = status.as_u16(),
                elapsed_ms = dt.as_millis() as u64,
                body = %truncate_for_log(&String::from_utf8_lossy(&body), 300),
                "News API returned an error status"
            );
            return Err(FetchError::Status {
                status: status.as_u16(),
                info,
            });
        }

        let page: ArticlesPage = serde_json::from_slice(&body)?;
        debug!(
            articles = page.len(),
            total_results = page.total_results,
            elapsed_ms = dt.as_millis() as u64,
            "Fetched article page"
        );
        Ok(page)
    }
}
