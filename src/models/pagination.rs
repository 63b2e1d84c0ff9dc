//! Paginated responses and the query-string state that drives them.

use serde::{Deserialize, Serialize};
use url::form_urlencoded;

use crate::models::PaginationConfig;

/// The `{count, next, previous, results}` envelope every list endpoint returns.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PaginatedList<T> {
    pub count: u64,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub previous: Option<String>,
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
}

impl<T> PaginatedList<T> {
    pub fn total_pages(&self, limit: u32) -> u32 {
        total_pages(self.count, limit)
    }
}

/// `limit`/`offset` pair sent to a list endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PageParams {
    pub limit: u32,
    pub offset: u64,
}

impl PageParams {
    /// Params for a 1-based page number.
    pub fn for_page(page: u32, limit: u32) -> Self {
        Self {
            limit,
            offset: u64::from(page.saturating_sub(1)) * u64::from(limit),
        }
    }

    /// Query pairs in the order the API documents them.
    pub fn as_query(&self) -> [(&'static str, String); 2] {
        [
            ("limit", self.limit.to_string()),
            ("offset", self.offset.to_string()),
        ]
    }
}

/// `ceil(count / limit)`, or 0 for an empty collection.
pub fn total_pages(count: u64, limit: u32) -> u32 {
    if limit == 0 {
        return 0;
    }
    let pages = count.div_ceil(u64::from(limit));
    u32::try_from(pages).unwrap_or(u32::MAX)
}

/// Query-string parameters of the current route, in insertion order.
///
/// Unknown keys are carried along untouched so navigation keeps them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchParams {
    pairs: Vec<(String, String)>,
}

impl SearchParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a raw query string, with or without the leading `?`.
    pub fn parse(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let mut params = Self::new();
        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            params.set(key.into_owned(), value.into_owned());
        }
        params
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Insert or replace a key, keeping its original position.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.pairs.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.pairs.push((key, value)),
        }
    }

    pub fn remove(&mut self, key: &str) {
        self.pairs.retain(|(k, _)| k != key);
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Requested page, or `default` when absent, non-numeric or below 1.
    pub fn page(&self, default: u32) -> u32 {
        self.positive("page").unwrap_or(default)
    }

    /// Requested page size, or `default` when absent, non-numeric or below 1.
    pub fn limit(&self, default: u32) -> u32 {
        self.positive("limit").unwrap_or(default)
    }

    fn positive(&self, key: &str) -> Option<u32> {
        self.get(key)
            .and_then(|v| v.trim().parse::<u32>().ok())
            .filter(|v| *v >= 1)
    }

    /// Copy with `page`/`limit` set, dropping whichever equals its default.
    pub fn with_pagination(&self, page: u32, limit: u32, defaults: PaginationConfig) -> Self {
        let mut cleaned = self.clone();
        if page == defaults.default_page {
            cleaned.remove("page");
        } else {
            cleaned.set("page", page.to_string());
        }
        if limit == defaults.default_limit {
            cleaned.remove("limit");
        } else {
            cleaned.set("limit", limit.to_string());
        }
        cleaned
    }

    /// `?k=v&...`, or an empty string when there is nothing to encode.
    pub fn to_query_string(&self) -> String {
        if self.pairs.is_empty() {
            return String::new();
        }
        let encoded = form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.pairs.iter())
            .finish();
        format!("?{encoded}")
    }
}
