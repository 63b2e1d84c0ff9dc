// src/render.rs

//! Plain-text views for the terminal.
//!
//! Every renderer writes into an `io::Write`, so the CLI passes stdout and
//! tests pass a `Vec<u8>`.

use std::io::Write;

use crate::error::{AppError, Result};
use crate::models::{DisplayConfig, NewsItem, Resource};
use crate::routes::Route;
use crate::services::ListView;
use crate::utils::text::{clamp, format_timestamp};

const RULE_WIDTH: usize = 60;

/// Navigation bar with the active section marked.
pub fn render_nav(out: &mut impl Write, active: &Route) -> Result<()> {
    let active_resource = active.resource();
    let entries: Vec<String> = Resource::ALL
        .iter()
        .map(|resource| {
            if *resource == active_resource {
                format!("[{}]", resource.label())
            } else {
                resource.label().to_string()
            }
        })
        .collect();

    match active.back() {
        Some(back) => writeln!(out, "← {}   {}", back, entries.join("  "))?,
        None => writeln!(out, "{}", entries.join("  "))?,
    }
    writeln!(out, "{}", "─".repeat(RULE_WIDTH))?;
    Ok(())
}

/// One list entry: title, clamped summary, date and site, detail route.
pub fn render_card(
    out: &mut impl Write,
    item: &NewsItem,
    route: &Route,
    display: &DisplayConfig,
) -> Result<()> {
    let title = clamp(&item.title, display.title_max_chars);
    if item.featured {
        writeln!(out, "#{}  {} [Featured]", item.id, title)?;
    } else {
        writeln!(out, "#{}  {}", item.id, title)?;
    }

    let summary = clamp(&item.summary, display.summary_max_chars);
    if !summary.is_empty() {
        writeln!(out, "    {}", summary)?;
    }
    writeln!(
        out,
        "    {} · {}",
        format_timestamp(&item.published_at, &display.date_format),
        item.news_site
    )?;
    writeln!(out, "    → {}", route)?;
    Ok(())
}

/// A page of cards followed by pagination controls.
pub fn render_list(out: &mut impl Write, view: &ListView, display: &DisplayConfig) -> Result<()> {
    if view.items.is_empty() {
        writeln!(out, "No {} to display.", view.resource.path())?;
    }

    for item in &view.items {
        render_card(out, item, &view.item_route(item.id), display)?;
        writeln!(out)?;
    }

    render_pagination(out, view)
}

/// `‹ Prev  page / total  Next ›` with the routes behind each control.
pub fn render_pagination(out: &mut impl Write, view: &ListView) -> Result<()> {
    let prev = view.prev_route();
    let next = view.next_route();
    let total = view.total_pages.max(1);

    writeln!(
        out,
        "{}  {} / {}  {}",
        if prev.is_some() { "‹ Prev" } else { "  -   " },
        view.page,
        total,
        if next.is_some() { "Next ›" } else { "  -   " },
    )?;
    if let Some(route) = prev {
        writeln!(out, "    prev: {}", route)?;
    }
    if let Some(route) = next {
        writeln!(out, "    next: {}", route)?;
    }
    Ok(())
}

/// Full view of one item.
pub fn render_detail(
    out: &mut impl Write,
    item: &NewsItem,
    route: &Route,
    display: &DisplayConfig,
) -> Result<()> {
    writeln!(out, "{}", item.title.trim())?;
    if item.featured {
        writeln!(out, "[Featured]")?;
    }

    let mut meta = vec![
        format!(
            "Published: {}",
            format_timestamp(&item.published_at, &display.datetime_format)
        ),
        item.news_site.clone(),
    ];
    if item.was_updated() {
        meta.push(format!(
            "Updated: {}",
            format_timestamp(&item.updated_at, &display.datetime_format)
        ));
    }
    writeln!(out, "{}", meta.join(" · "))?;
    if !item.image_url.trim().is_empty() {
        writeln!(out, "Image: {}", item.image_url)?;
    }
    writeln!(out, "{}", "─".repeat(RULE_WIDTH))?;

    if !item.summary.trim().is_empty() {
        writeln!(out, "{}", item.summary.trim())?;
        writeln!(out)?;
    }

    if !item.authors.is_empty() {
        writeln!(out, "Authors")?;
        for author in &item.authors {
            writeln!(out, "  - {}", author.name)?;
            if let Some(socials) = &author.socials {
                for (label, url) in socials.links() {
                    writeln!(out, "      {}: {}", label, url)?;
                }
            }
        }
        writeln!(out)?;
    }

    if item.has_related() {
        writeln!(out, "Related")?;
        for launch in &item.launches {
            writeln!(
                out,
                "  - Launch ID: {} (provided by {})",
                launch.launch_id, launch.provider
            )?;
        }
        for event in &item.events {
            writeln!(
                out,
                "  - Event ID: {} (provided by {})",
                event.event_id, event.provider
            )?;
        }
        writeln!(out)?;
    }

    writeln!(out, "Read original: {}", item.url)?;
    if let Some(back) = route.back() {
        writeln!(out, "Back to list: {}", back)?;
    }
    Ok(())
}

/// Error screen for a failed list or detail load.
pub fn render_error(out: &mut impl Write, route: &Route, error: &AppError) -> Result<()> {
    let resource = route.resource();
    match route {
        Route::Detail { id, .. } => {
            writeln!(out, "{} not found", capitalize(resource.singular()))?;
            let fallback = "The requested item does not exist or a temporary error occurred.";
            writeln!(out, "{}", describe(error, fallback))?;
            writeln!(out, "    {}Id: {}", resource.singular(), id)?;
            if let Some(back) = route.back() {
                writeln!(out, "Back to {} list: {}", resource.singular(), back)?;
            }
        }
        _ => {
            writeln!(out, "Could not load {}", resource.path())?;
            writeln!(out, "{}", describe(error, "Check your network and try again."))?;
        }
    }
    Ok(())
}

fn describe(error: &AppError, fallback: &str) -> String {
    let message = error.to_string();
    if message.trim().is_empty() {
        fallback.to_string()
    } else {
        message
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
