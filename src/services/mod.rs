//! Service layer for the news reader.
//!
//! - Cached queries with retries (`QueryCache`, `RetryPolicy`)
//! - List, detail and feed loading (`NewsService`)

mod news;
mod query;

#[cfg(test)]
pub(crate) mod testing;

pub use news::{InfiniteList, ListView, NewsService};
pub use query::{QueryCache, QueryKey, RetryPolicy};
