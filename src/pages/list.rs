// src/pages/list.rs

//! Paginated list page.

use std::io::Write;

use crate::error::Result;
use crate::models::{Config, Resource, SearchParams};
use crate::pages::ViewStatus;
use crate::render;
use crate::routes::Route;
use crate::services::NewsService;

/// Render the list page selected by `search`.
pub async fn run_list(
    config: &Config,
    news: &NewsService,
    resource: Resource,
    search: &SearchParams,
    out: &mut impl Write,
) -> Result<ViewStatus> {
    match news.list(resource, search).await {
        Ok(view) => {
            log::info!(
                "Loaded {} {} (page {}/{}, {} total)",
                view.items.len(),
                resource,
                view.page,
                view.total_pages,
                view.total_count
            );
            render::render_list(out, &view, &config.display)?;
            Ok(ViewStatus::Rendered)
        }
        Err(error) => {
            log::error!("Failed to load {}: {}", resource, error);
            let route = Route::List {
                resource,
                search: search.clone(),
            };
            render::render_error(out, &route, &error)?;
            Ok(ViewStatus::Failed)
        }
    }
}
