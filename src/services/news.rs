// src/services/news.rs

//! List and detail queries over a [`NewsApi`].
//!
//! `NewsService::list` is the pagination model: page and limit come from the
//! route's search params (falling back to configured defaults), the offset is
//! `(page - 1) * limit`, and the page count is `ceil(count / limit)`.

use std::sync::Arc;

use crate::api::NewsApi;
use crate::error::{AppError, Result};
use crate::models::{
    Config, NewsItem, PageParams, PaginatedList, PaginationConfig, Resource, SearchParams,
};
use crate::routes::Route;
use crate::services::query::{QueryCache, QueryKey};

/// One rendered page of a list view.
#[derive(Debug, Clone)]
pub struct ListView {
    pub resource: Resource,
    pub page: u32,
    pub limit: u32,
    pub offset: u64,
    pub total_count: u64,
    pub total_pages: u32,
    pub items: Vec<NewsItem>,
    pub search: SearchParams,
    defaults: PaginationConfig,
}

impl ListView {
    /// Route to page `page` of this list, keeping unrelated search params.
    pub fn page_route(&self, page: u32) -> Route {
        Route::List {
            resource: self.resource,
            search: self.search.with_pagination(page, self.limit, self.defaults),
        }
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.total_pages > 0 && self.page < self.total_pages
    }

    pub fn prev_route(&self) -> Option<Route> {
        self.has_prev().then(|| self.page_route(self.page - 1))
    }

    pub fn next_route(&self) -> Option<Route> {
        self.has_next().then(|| self.page_route(self.page + 1))
    }

    /// Detail route for an item, remembering the current page.
    pub fn item_route(&self, id: u64) -> Route {
        Route::Detail {
            resource: self.resource,
            id: id.to_string(),
            search: self.search.with_pagination(self.page, self.limit, self.defaults),
        }
    }
}

/// Cached access to lists and single items.
pub struct NewsService {
    api: Arc<dyn NewsApi>,
    pagination: PaginationConfig,
    lists: QueryCache<PaginatedList<NewsItem>>,
    details: QueryCache<NewsItem>,
}

impl NewsService {
    pub fn new(api: Arc<dyn NewsApi>, config: &Config) -> Self {
        Self {
            api,
            pagination: config.pagination,
            lists: QueryCache::from_config(&config.query),
            details: QueryCache::from_config(&config.query),
        }
    }

    pub fn pagination(&self) -> PaginationConfig {
        self.pagination
    }

    /// Fetch one raw page.
    pub async fn page(
        &self,
        resource: Resource,
        params: PageParams,
    ) -> Result<PaginatedList<NewsItem>> {
        let key = QueryKey::List { resource, params };
        let api = &self.api;
        self.lists
            .fetch(key, move || api.get_paginated_list(resource, params))
            .await
    }

    /// Load the page the search params point at.
    pub async fn list(&self, resource: Resource, search: &SearchParams) -> Result<ListView> {
        let page = search.page(self.pagination.default_page);
        let limit = search.limit(self.pagination.default_limit);
        let params = PageParams::for_page(page, limit);

        log::debug!(
            "Listing {} page {} (limit {}, offset {})",
            resource,
            page,
            limit,
            params.offset
        );

        let data = self.page(resource, params).await?;
        Ok(ListView {
            resource,
            page,
            limit,
            offset: params.offset,
            total_count: data.count,
            total_pages: data.total_pages(limit),
            items: data.results,
            search: search.clone(),
            defaults: self.pagination,
        })
    }

    /// Fetch a single item. Blank and zero ids never reach the network.
    pub async fn detail(&self, resource: Resource, id: &str) -> Result<NewsItem> {
        let id = id.trim();
        if id.is_empty() || id == "0" {
            return Err(AppError::MissingId(resource.singular().to_string()));
        }

        let key = QueryKey::Detail {
            resource,
            id: id.to_string(),
        };
        let api = &self.api;
        self.details
            .fetch(key, move || api.get_by_id(resource, id))
            .await
    }

    /// Start an accumulating feed of `limit`-sized pages.
    pub fn feed(&self, resource: Resource, limit: u32) -> InfiniteList<'_> {
        InfiniteList {
            service: self,
            resource,
            limit: limit.max(1),
            pages: Vec::new(),
        }
    }
}

/// A list that grows one page at a time by following `next` links.
pub struct InfiniteList<'a> {
    service: &'a NewsService,
    resource: Resource,
    limit: u32,
    pages: Vec<PaginatedList<NewsItem>>,
}

impl InfiniteList<'_> {
    /// True before the first fetch and while the last page has a `next` link.
    pub fn has_next_page(&self) -> bool {
        self.pages.last().is_none_or(|page| page.next.is_some())
    }

    /// Fetch the following page. Returns `false` when there was nothing left.
    pub async fn fetch_next_page(&mut self) -> Result<bool> {
        if !self.has_next_page() {
            return Ok(false);
        }
        let params = PageParams {
            limit: self.limit,
            offset: self.pages.len() as u64 * u64::from(self.limit),
        };
        let page = self.service.page(self.resource, params).await?;
        self.pages.push(page);
        Ok(true)
    }

    pub fn items(&self) -> impl Iterator<Item = &NewsItem> {
        self.pages.iter().flat_map(|page| page.results.iter())
    }

    /// Count reported by the first page, 0 before any fetch.
    pub fn total_count(&self) -> u64 {
        self.pages.first().map_or(0, |page| page.count)
    }

    pub fn pages_loaded(&self) -> usize {
        self.pages.len()
    }

    pub fn resource(&self) -> Resource {
        self.resource
    }
}
