// src/models/mod.rs

//! Domain models for the news reader.

mod config;
mod news;
mod pagination;

// Re-export all public types
pub use config::{
    ApiConfig, Config, DisplayConfig, ENV_ACCESS_TOKEN, ENV_API_URL, PaginationConfig,
    QueryConfig,
};
pub use news::{
    Article, Author, AuthorSocials, Blog, EventInfo, LaunchInfo, NewsItem, Report, Resource,
};
pub use pagination::{PageParams, PaginatedList, SearchParams, total_pages};
