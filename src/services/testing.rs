//! In-memory `NewsApi` for unit tests.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::api::NewsApi;
use crate::error::{AppError, Result};
use crate::models::{NewsItem, PageParams, PaginatedList, Resource};

pub fn sample_item(id: u64) -> NewsItem {
    NewsItem {
        id,
        title: format!("Item {id}"),
        authors: Vec::new(),
        url: format!("https://example.com/news/{id}"),
        image_url: format!("https://example.com/news/{id}.jpg"),
        news_site: "Example Site".to_string(),
        summary: format!("Summary of item {id}."),
        published_at: "2024-01-01T00:00:00Z".to_string(),
        updated_at: "2024-01-01T00:00:00Z".to_string(),
        featured: false,
        launches: Vec::new(),
        events: Vec::new(),
    }
}

/// Serves items `1..=n` for every resource and records each call.
pub struct FakeApi {
    items: Vec<NewsItem>,
    lists: Mutex<Vec<(Resource, PageParams)>>,
    details: Mutex<Vec<(Resource, String)>>,
}

impl FakeApi {
    pub fn with_items(count: u64) -> Self {
        Self {
            items: (1..=count).map(sample_item).collect(),
            lists: Mutex::new(Vec::new()),
            details: Mutex::new(Vec::new()),
        }
    }

    pub fn list_calls(&self) -> Vec<(Resource, PageParams)> {
        self.lists.lock().unwrap().clone()
    }

    pub fn detail_calls(&self) -> Vec<(Resource, String)> {
        self.details.lock().unwrap().clone()
    }
}

#[async_trait]
impl NewsApi for FakeApi {
    async fn get_paginated_list(
        &self,
        resource: Resource,
        params: PageParams,
    ) -> Result<PaginatedList<NewsItem>> {
        self.lists.lock().unwrap().push((resource, params));

        let start = (params.offset as usize).min(self.items.len());
        let end = (start + params.limit as usize).min(self.items.len());
        let next = (end < self.items.len()).then(|| {
            format!(
                "https://example.com/{}/?limit={}&offset={}",
                resource, params.limit, end
            )
        });

        Ok(PaginatedList {
            count: self.items.len() as u64,
            next,
            previous: None,
            results: self.items[start..end].to_vec(),
        })
    }

    async fn get_by_id(&self, resource: Resource, id: &str) -> Result<NewsItem> {
        self.details
            .lock()
            .unwrap()
            .push((resource, id.to_string()));

        id.parse::<u64>()
            .ok()
            .and_then(|id| self.items.iter().find(|item| item.id == id))
            .cloned()
            .ok_or_else(|| AppError::api(404, "Not found."))
    }
}
