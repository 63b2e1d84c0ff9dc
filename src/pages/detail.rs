// src/pages/detail.rs

//! Single item page.

use std::io::Write;

use crate::error::{AppError, Result};
use crate::models::Config;
use crate::pages::ViewStatus;
use crate::render;
use crate::routes::Route;
use crate::services::NewsService;

/// Render the item a detail route points at.
pub async fn run_detail(
    config: &Config,
    news: &NewsService,
    route: &Route,
    out: &mut impl Write,
) -> Result<ViewStatus> {
    let Route::Detail { resource, id, .. } = route else {
        return Err(AppError::route(format!("{route} is not a detail route")));
    };

    match news.detail(*resource, id).await {
        Ok(item) => {
            log::info!("Loaded {} {}", resource.singular(), item.id);
            render::render_detail(out, &item, route, &config.display)?;
            Ok(ViewStatus::Rendered)
        }
        Err(error) => {
            log::error!("Failed to load {} {}: {}", resource.singular(), id, error);
            render::render_error(out, route, &error)?;
            Ok(ViewStatus::Failed)
        }
    }
}
