//! Data models for NewsAPI responses.
//!
//! - [`Article`]: one news record as returned by the `everything` endpoint
//! - [`ArticlesPage`]: one page of results, the unit the cache stores
//!
//! Field names follow the API's camelCase JSON through `serde(rename_all)`.

use serde::{Deserialize, Serialize};

/// The publisher of an article.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Source {
    /// NewsAPI source identifier, absent for most long-tail publishers.
    #[serde(default)]
    pub id: Option<String>,
    /// Display name of the publisher.
    #[serde(default)]
    pub name: String,
}

/// A single news article.
///
/// Articles are immutable once received; the view only ever reads them.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub source: Source,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub url: String,
    #[serde(default)]
    pub url_to_image: Option<String>,
    /// ISO-8601 timestamp, kept as text and only parsed for display.
    #[serde(default)]
    pub published_at: String,
    #[serde(default)]
    pub content: Option<String>,
}

impl Article {
    /// Author name, treating an empty string the same as a missing one.
    pub fn author(&self) -> Option<&str> {
        non_empty(self.author.as_deref())
    }

    /// Image URL, treating an empty string the same as a missing one.
    pub fn image(&self) -> Option<&str> {
        non_empty(self.url_to_image.as_deref())
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.is_empty())
}

/// One page of search results.
///
/// A response without an `articles` array decodes as an empty page so the
/// view falls through to its "no articles" state.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticlesPage {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub total_results: u64,
    #[serde(default)]
    pub articles: Vec<Article>,
}

impl ArticlesPage {
    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }

    pub fn len(&self) -> usize {
        self.articles.len()
    }
}
