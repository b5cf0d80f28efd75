//! Page controller: interactive state, user handlers and view selection.
//!
//! [`NewsApp`] owns the current page, the search input and the [`QueryCache`].
//! Handlers never perform I/O; they return a [`FetchRequest`] describing the
//! request to run, and the session loop reports back through
//! [`NewsApp::complete`].
//!
//! # View precedence
//!
//! `error` → `loading` (in flight, no data yet) → `empty` → `populated`.

use crate::api::{Endpoint, QueryKey};
use crate::cache::{FetchTicket, QueryCache};
use crate::error::FetchError;
use crate::models::{Article, ArticlesPage};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, error, info};

/// Articles requested per page.
pub const PAGE_SIZE: u32 = 10;

/// Topic of the query key when nothing else is configured.
pub const DEFAULT_TOPIC: &str = "pakistan";

/// A fixed news category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Trending,
    Sports,
    Politics,
    Entertainment,
    Health,
    Education,
}

impl Category {
    /// Categories shown as buttons under the navbar. Trending lives in the navbar.
    pub const BUTTONS: [Category; 5] = [
        Category::Sports,
        Category::Politics,
        Category::Entertainment,
        Category::Health,
        Category::Education,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Trending => "Trending",
            Category::Sports => "Sports",
            Category::Politics => "Politics",
            Category::Entertainment => "Entertainment",
            Category::Health => "Health",
            Category::Education => "Education",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "trending" => Ok(Category::Trending),
            "sports" => Ok(Category::Sports),
            "politics" => Ok(Category::Politics),
            "entertainment" => Ok(Category::Entertainment),
            "health" => Ok(Category::Health),
            "education" => Ok(Category::Education),
            other => Err(format!("unknown category: {other}")),
        }
    }
}

/// Why a request was issued, which decides how its result is committed.
#[derive(Debug, Clone, PartialEq)]
pub enum Purpose {
    /// The cache's own fetch for the current key.
    Revalidate,
    /// A category or search fetch written over the current key; on failure
    /// the pre-attempt page is restored.
    Optimistic {
        topic: String,
        fallback: Option<ArticlesPage>,
    },
}

/// A request the session loop must run.
#[derive(Debug, Clone)]
pub struct FetchRequest {
    /// The URL to fetch.
    pub target: QueryKey,
    /// Where and under which sequence number the result may be written.
    pub ticket: FetchTicket,
    pub purpose: Purpose,
}

/// Pagination controls of the populated view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: u32,
    pub previous_enabled: bool,
    pub next_enabled: bool,
}

/// The four mutually exclusive views.
#[derive(Debug, Clone, PartialEq)]
pub enum View {
    Error,
    Loading,
    Empty,
    Populated {
        articles: Vec<Article>,
        pagination: Pagination,
    },
}

#[derive(Debug)]
pub struct NewsApp {
    endpoint: Endpoint,
    topic: String,
    page: u32,
    page_size: u32,
    search_input: String,
    cache: QueryCache,
    notice: Option<String>,
}

impl NewsApp {
    pub fn new(endpoint: Endpoint, topic: impl Into<String>, page_size: u32) -> Self {
        Self {
            endpoint,
            topic: topic.into(),
            page: 1,
            page_size,
            search_input: String::new(),
            cache: QueryCache::new(),
            notice: None,
        }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn search_input(&self) -> &str {
        &self.search_input
    }

    /// One-shot message about a reverted category or search attempt.
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// The cache key derived from the fixed topic and the current page.
    pub fn query_key(&self) -> QueryKey {
        self.endpoint.key(&self.topic, self.page, self.page_size)
    }

    /// Ask the cache for the current key, returning the fetch to run if the
    /// key is not cached yet.
    pub fn refresh(&mut self) -> Option<FetchRequest> {
        let key = self.query_key();
        let (_, ticket) = self.cache.use_query(&key);
        ticket.map(|ticket| FetchRequest {
            target: key,
            ticket,
            purpose: Purpose::Revalidate,
        })
    }

    /// Select the view from the current snapshot.
    pub fn view(&self) -> View {
        let snapshot = self.cache.peek(&self.query_key());
        if snapshot.error.is_some() {
            return View::Error;
        }
        match snapshot.data {
            None if snapshot.is_loading => View::Loading,
            None => View::Empty,
            Some(page) if page.is_empty() => View::Empty,
            Some(page) => {
                let pagination = Pagination {
                    page: self.page,
                    previous_enabled: self.page != 1,
                    next_enabled: page.len() >= self.page_size as usize && self.page.checked_add(1).is_some(),
                };
                View::Populated {
                    articles: page.articles,
                    pagination,
                }
            }
        }
    }

    /// Pagination controls, when the populated view is showing.
    pub fn pagination(&self) -> Option<Pagination> {
        match self.view() {
            View::Populated { pagination, .. } => Some(pagination),
            _ => None,
        }
    }

    /// Fetch `category` at the current page and show it in place of the
    /// current results.
    pub fn select_category(&mut self, category: Category) -> FetchRequest {
        self.notice = None;
        info!(%category, page = self.page, "Category selected");
        self.optimistic_fetch(category.as_str())
    }

    /// Record the search box contents. Surrounding whitespace is dropped.
    pub fn set_search_input(&mut self, text: &str) {
        self.search_input = text.trim().to_string();
    }

    /// Submit the search box. Blank input does nothing.
    pub fn submit_search(&mut self) -> Option<FetchRequest> {
        if self.search_input.is_empty() {
            debug!("Ignoring empty search");
            return None;
        }
        self.notice = None;
        let term = self.search_input.clone();
        info!(%term, page = self.page, "Search submitted");
        Some(self.optimistic_fetch(&term))
    }

    /// Move to `new_page` and let the cache fetch it if needed.
    pub fn change_page(&mut self, new_page: u32) -> Option<FetchRequest> {
        self.notice = None;
        debug!(from = self.page, to = new_page, "Page change");
        self.page = new_page;
        self.refresh()
    }

    /// "Next" button; ignored while disabled.
    pub fn next_page(&mut self) -> Option<FetchRequest> {
        self.notice = None;
        let next = self.page.checked_add(1);
        match (self.pagination(), next) {
            (Some(p), Some(next)) if p.next_enabled => self.change_page(next),
            _ => {
                debug!("Next is disabled");
                None
            }
        }
    }

    /// "Previous" button; ignored while disabled.
    pub fn previous_page(&mut self) -> Option<FetchRequest> {
        self.notice = None;
        let previous = self.page.checked_sub(1);
        match (self.pagination(), previous) {
            (Some(p), Some(previous)) if p.previous_enabled => self.change_page(previous),
            _ => {
                debug!("Previous is disabled");
                None
            }
        }
    }

    /// Drop the one-shot notice without touching anything else.
    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    /// "All News": re-apply the current page without revalidating.
    pub fn show_all(&mut self) {
        self.notice = None;
        let key = self.query_key();
        let current = self.cache.peek(&key).data;
        self.cache.mutate(&key, current, false);
    }

    /// Commit the outcome of a request issued by this controller. Returns
    /// `false` when the result was stale and dropped.
    pub fn complete(&mut self, request: FetchRequest, result: Result<ArticlesPage, FetchError>) -> bool {
        let FetchRequest {
            target,
            ticket,
            purpose,
        } = request;
        match purpose {
            Purpose::Revalidate => {
                if let Err(e) = &result {
                    error!(
                        key = %target,
                        status = ?e.status(),
                        info = ?e.info(),
                        error = %e,
                        "Error fetching data"
                    );
                }
                self.cache.complete(&ticket, result)
            }
            Purpose::Optimistic { topic, fallback } => match result {
                Ok(page) => {
                    info!(%topic, articles = page.len(), "Committing fetched results");
                    self.cache.mutate_ticketed(&ticket, Some(page))
                }
                Err(e) => {
                    error!(
                        %topic,
                        status = ?e.status(),
                        info = ?e.info(),
                        error = %e,
                        "Error fetching category data"
                    );
                    let reverted = self.cache.mutate_ticketed(&ticket, fallback);
                    if reverted {
                        self.notice = Some(format!("Could not load {topic} news; showing previous results"));
                    }
                    reverted
                }
            },
        }
    }

    fn optimistic_fetch(&mut self, topic: &str) -> FetchRequest {
        let key = self.query_key();
        let previous = self.cache.peek(&key).data;
        self.cache.mutate(&key, previous.clone(), false);
        let ticket = self.cache.reserve(&key);
        FetchRequest {
            target: self.endpoint.key(topic, self.page, self.page_size),
            ticket,
            purpose: Purpose::Optimistic {
                topic: topic.to_string(),
                fallback: previous,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fixtures::{article, page};
    use pretty_assertions::assert_eq;

    fn app() -> NewsApp {
        let endpoint = Endpoint::new("https://newsapi.org/v2/everything", "2025-01-25", "k").unwrap();
        NewsApp::new(endpoint, DEFAULT_TOPIC, PAGE_SIZE)
    }

    fn http_error() -> FetchError {
        FetchError::Status {
            status: 500,
            info: serde_json::json!({"status": "error", "message": "boom"}),
        }
    }

    fn loaded(count: usize) -> NewsApp {
        let mut app = app();
        let request = app.refresh().unwrap();
        app.complete(request, Ok(page(count)));
        app
    }

    fn titles(view: &View) -> Vec<String> {
        match view {
            View::Populated { articles, .. } => articles.iter().map(|a| a.title.clone()).collect(),
            other => panic!("expected populated view, got {other:?}"),
        }
    }

    #[test]
    fn test_initial_load_scenario() {
        let mut app = app();
        let request = app.refresh().unwrap();
        assert_eq!(request.purpose, Purpose::Revalidate);
        assert_eq!(request.target.param("q").as_deref(), Some("pakistan"));
        assert_eq!(request.target.param("page").as_deref(), Some("1"));
        assert_eq!(app.view(), View::Loading);
        assert!(app.refresh().is_none());

        assert!(app.complete(request, Ok(page(10))));
        match app.view() {
            View::Populated { articles, pagination } => {
                assert_eq!(articles.len(), 10);
                assert!(pagination.next_enabled);
                assert!(!pagination.previous_enabled);
            }
            other => panic!("unexpected view {other:?}"),
        }
    }

    #[test]
    fn test_error_wins_over_data() {
        let mut app = loaded(10);
        app.cache.mutate(&app.query_key(), Some(page(10)), true);
        let request = app.refresh().unwrap();
        app.complete(request, Err(http_error()));
        assert_eq!(app.view(), View::Error);
    }

    #[test]
    fn test_error_wins_over_loading() {
        let mut app = app();
        let request = app.refresh().unwrap();
        app.complete(request, Err(http_error()));
        app.cache.mutate(&app.query_key(), None, true);
        assert!(app.refresh().is_some());
        assert_eq!(app.view(), View::Error);
    }

    #[test]
    fn test_empty_result_is_empty_view() {
        let app = loaded(0);
        assert_eq!(app.view(), View::Empty);
    }

    #[test]
    fn test_next_disabled_below_page_size() {
        let app = loaded(7);
        assert!(!app.pagination().unwrap().next_enabled);
        let app = loaded(10);
        assert!(app.pagination().unwrap().next_enabled);
    }

    #[test]
    fn test_previous_disabled_only_on_first_page() {
        let mut app = loaded(10);
        assert!(!app.pagination().unwrap().previous_enabled);

        let request = app.next_page().unwrap();
        assert_eq!(request.target.param("page").as_deref(), Some("2"));
        assert_eq!(app.page(), 2);
        app.complete(request, Ok(page(10)));
        assert!(app.pagination().unwrap().previous_enabled);
    }

    #[test]
    fn test_disabled_buttons_are_ignored() {
        let mut app = loaded(3);
        assert!(app.previous_page().is_none());
        assert!(app.next_page().is_none());
        assert_eq!(app.page(), 1);
    }

    #[test]
    fn test_next_disabled_on_last_representable_page() {
        let mut app = app();
        let request = app.change_page(u32::MAX).unwrap();
        app.complete(request, Ok(page(10)));

        assert!(!app.pagination().unwrap().next_enabled);
        assert!(app.next_page().is_none());
        assert_eq!(app.page(), u32::MAX);
    }

    #[test]
    fn test_previous_from_page_zero_does_not_underflow() {
        let mut app = app();
        let request = app.change_page(0).unwrap();
        app.complete(request, Ok(page(10)));

        assert!(app.previous_page().is_none());
        assert_eq!(app.page(), 0);
    }

    #[test]
    fn test_ignored_buttons_still_clear_notice() {
        let mut app = loaded(3);
        let request = app.select_category(Category::Sports);
        app.complete(request, Err(http_error()));
        assert!(app.notice().is_some());

        assert!(app.next_page().is_none());
        assert!(app.notice().is_none());

        let request = app.select_category(Category::Sports);
        app.complete(request, Err(http_error()));
        assert!(app.previous_page().is_none());
        assert!(app.notice().is_none());
    }

    #[test]
    fn test_dismiss_notice_leaves_results() {
        let mut app = loaded(10);
        let before = app.view();
        let request = app.select_category(Category::Health);
        app.complete(request, Err(http_error()));

        app.dismiss_notice();
        assert!(app.notice().is_none());
        assert_eq!(app.view(), before);
    }

    #[test]
    fn test_returning_to_cached_page_does_not_fetch() {
        let mut app = loaded(10);
        let request = app.change_page(2).unwrap();
        app.complete(request, Ok(page(10)));
        assert!(app.previous_page().is_none());
        assert_eq!(app.page(), 1);
        assert_eq!(titles(&app.view()).len(), 10);
    }

    #[test]
    fn test_blank_search_is_a_no_op() {
        let mut app = loaded(10);
        let before = app.view();
        app.set_search_input("   \t ");
        assert!(app.submit_search().is_none());
        assert_eq!(app.view(), before);
        assert_eq!(app.page(), 1);
    }

    #[test]
    fn test_search_uses_trimmed_term() {
        let mut app = loaded(10);
        app.set_search_input("  cricket  ");
        let request = app.submit_search().unwrap();
        assert_eq!(request.target.param("q").as_deref(), Some("cricket"));
        assert_eq!(request.ticket.key, app.query_key());
    }

    #[test]
    fn test_category_success_replaces_results() {
        let mut app = loaded(10);
        let request = app.select_category(Category::Sports);
        assert_eq!(request.target.param("q").as_deref(), Some("Sports"));
        assert_eq!(request.target.param("page").as_deref(), Some("1"));
        assert_eq!(titles(&app.view()).len(), 10);

        let sports = ArticlesPage {
            articles: vec![article("Cup final"), article("Record run")],
            ..Default::default()
        };
        assert!(app.complete(request, Ok(sports)));
        assert_eq!(titles(&app.view()), vec!["Cup final", "Record run"]);
        assert!(app.notice().is_none());
    }

    #[test]
    fn test_category_failure_reverts_silently() {
        let mut app = loaded(10);
        let before = app.view();
        let request = app.select_category(Category::Sports);
        assert!(app.complete(request, Err(http_error())));
        assert_eq!(app.view(), before);
        assert!(app.notice().unwrap().contains("Sports"));

        app.show_all();
        assert!(app.notice().is_none());
        assert_eq!(app.view(), before);
    }

    #[test]
    fn test_slower_category_result_is_dropped() {
        let mut app = loaded(10);
        let sports = app.select_category(Category::Sports);
        let health = app.select_category(Category::Health);

        assert!(app.complete(health, Ok(ArticlesPage {
            articles: vec![article("Clinic opens")],
            ..Default::default()
        })));
        assert!(!app.complete(sports, Ok(ArticlesPage {
            articles: vec![article("Late score")],
            ..Default::default()
        })));
        assert_eq!(titles(&app.view()), vec!["Clinic opens"]);
    }

    #[test]
    fn test_category_during_initial_load_supersedes_it() {
        let mut app = app();
        let initial = app.refresh().unwrap();
        let trending = app.select_category(Category::Trending);
        assert!(app.complete(trending, Ok(page(4))));
        assert!(!app.complete(initial, Ok(page(10))));
        assert_eq!(titles(&app.view()).len(), 4);
    }

    #[test]
    fn test_show_all_keeps_topic_and_page() {
        let mut app = loaded(10);
        let key = app.query_key();
        app.show_all();
        assert_eq!(app.query_key(), key);
        assert!(app.refresh().is_none());
    }

    #[test]
    fn test_category_parsing() {
        assert_eq!("SPORTS".parse::<Category>(), Ok(Category::Sports));
        assert_eq!(" trending ".parse::<Category>(), Ok(Category::Trending));
        assert!("weather".parse::<Category>().is_err());
    }
}
