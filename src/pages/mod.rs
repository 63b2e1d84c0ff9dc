//! Page entry points: resolve a route, load its data, render the view.
//!
//! - `run_route`: dispatch any route with the navigation bar on top
//! - `run_list`: one page of a resource list
//! - `run_detail`: a single item
//! - `run_feed`: consecutive pages merged into one list

pub mod detail;
pub mod feed;
pub mod list;

use std::io::Write;

use crate::error::Result;
use crate::models::Config;
use crate::render;
use crate::routes::Route;
use crate::services::NewsService;

pub use detail::run_detail;
pub use feed::run_feed;
pub use list::run_list;

/// Whether a page rendered its data or an error screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewStatus {
    Rendered,
    Failed,
}

impl ViewStatus {
    pub fn is_failed(&self) -> bool {
        matches!(self, ViewStatus::Failed)
    }
}

/// Render the view a route points at.
pub async fn run_route(
    config: &Config,
    news: &NewsService,
    route: &Route,
    out: &mut impl Write,
) -> Result<ViewStatus> {
    log::info!("Opening {}", route);
    render::render_nav(out, route)?;

    match route {
        Route::Home { search } => run_list(config, news, route.resource(), search, out).await,
        Route::List { resource, search } => run_list(config, news, *resource, search, out).await,
        Route::Detail { .. } => run_detail(config, news, route, out).await,
    }
}
