//! Access to the Spaceflight News REST API.
//!
//! `ApiClient` is a thin JSON GET client that normalizes failures into
//! [`AppError`]. The [`NewsApi`] trait is the seam the rest of the crate
//! fetches through, so views can be driven by other sources in tests.

mod client;

use async_trait::async_trait;

use crate::error::{AppError, Result};
use crate::models::{NewsItem, PageParams, PaginatedList, Resource};

pub use client::ApiClient;

/// Read operations against a news source.
#[async_trait]
pub trait NewsApi: Send + Sync {
    /// `GET /{resource}/?limit=&offset=`
    async fn get_paginated_list(
        &self,
        resource: Resource,
        params: PageParams,
    ) -> Result<PaginatedList<NewsItem>>;

    /// `GET /{resource}/{id}/` with `id` escaped as one path segment
    async fn get_by_id(&self, resource: Resource, id: &str) -> Result<NewsItem>;

    async fn get_article_by_id(&self, id: &str) -> Result<NewsItem> {
        self.get_by_id(Resource::Articles, id).await
    }

    async fn get_blog_by_id(&self, id: &str) -> Result<NewsItem> {
        self.get_by_id(Resource::Blogs, id).await
    }

    async fn get_report_by_id(&self, id: &str) -> Result<NewsItem> {
        self.get_by_id(Resource::Reports, id).await
    }
}

#[async_trait]
impl NewsApi for ApiClient {
    async fn get_paginated_list(
        &self,
        resource: Resource,
        params: PageParams,
    ) -> Result<PaginatedList<NewsItem>> {
        let path = format!("/{}/", resource.path());
        self.get(&path, &params.as_query()).await
    }

    async fn get_by_id(&self, resource: Resource, id: &str) -> Result<NewsItem> {
        let id = id.trim();
        if id.is_empty() {
            return Err(AppError::MissingId(resource.singular().to_string()));
        }
        let collection = format!("/{}/", resource.path());
        self.get_item(&collection, id).await
    }
}
