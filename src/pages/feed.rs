// src/pages/feed.rs

//! Continuous feed: several pages loaded back to back into one list.

use std::io::Write;

use crate::error::Result;
use crate::models::{Config, Resource};
use crate::pages::ViewStatus;
use crate::render;
use crate::routes::Route;
use crate::services::NewsService;

/// Load up to `max_pages` pages of `limit` items and render them as one list.
pub async fn run_feed(
    config: &Config,
    news: &NewsService,
    resource: Resource,
    limit: u32,
    max_pages: usize,
    out: &mut impl Write,
) -> Result<ViewStatus> {
    let mut feed = news.feed(resource, limit);
    let mut failure = None;

    while feed.pages_loaded() < max_pages && feed.has_next_page() {
        if let Err(error) = feed.fetch_next_page().await {
            failure = Some(error);
            break;
        }
        log::debug!("Feed page {} of {} loaded", feed.pages_loaded(), feed.resource());
    }

    let mut shown = 0usize;
    for item in feed.items() {
        let route = Route::detail(resource, item.id.to_string());
        render::render_card(out, item, &route, &config.display)?;
        writeln!(out)?;
        shown += 1;
    }

    if let Some(error) = failure {
        log::error!("Feed for {} stopped: {}", resource, error);
        render::render_error(out, &Route::list(resource), &error)?;
        return Ok(ViewStatus::Failed);
    }

    if shown == 0 {
        writeln!(out, "No {} to display.", resource.path())?;
    }
    writeln!(
        out,
        "Showing {} of {} {}{}",
        shown,
        feed.total_count(),
        resource.path(),
        if feed.has_next_page() { " (more available)" } else { "" }
    )?;
    Ok(ViewStatus::Rendered)
}
