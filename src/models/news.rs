//! News item data structures.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// The three resource collections the API serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Resource {
    Articles,
    Blogs,
    Reports,
}

impl Resource {
    /// Every resource, in menu order.
    pub const ALL: [Resource; 3] = [Resource::Articles, Resource::Blogs, Resource::Reports];

    /// Path segment used by both the API and routes.
    pub fn path(&self) -> &'static str {
        match self {
            Resource::Articles => "articles",
            Resource::Blogs => "blogs",
            Resource::Reports => "reports",
        }
    }

    /// Singular lowercase noun ("article").
    pub fn singular(&self) -> &'static str {
        match self {
            Resource::Articles => "article",
            Resource::Blogs => "blog",
            Resource::Reports => "report",
        }
    }

    /// Capitalised menu label ("Articles").
    pub fn label(&self) -> &'static str {
        match self {
            Resource::Articles => "Articles",
            Resource::Blogs => "Blogs",
            Resource::Reports => "Reports",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

impl FromStr for Resource {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "articles" | "article" => Ok(Resource::Articles),
            "blogs" | "blog" => Ok(Resource::Blogs),
            "reports" | "report" => Ok(Resource::Reports),
            other => Err(AppError::route(format!("unknown resource '{other}'"))),
        }
    }
}

/// Social profile links of an author. Any of them may be absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthorSocials {
    #[serde(default)]
    pub x: Option<String>,
    #[serde(default)]
    pub youtube: Option<String>,
    #[serde(default)]
    pub instagram: Option<String>,
    #[serde(default)]
    pub linkedin: Option<String>,
    #[serde(default)]
    pub mastodon: Option<String>,
    #[serde(default)]
    pub bluesky: Option<String>,
}

impl AuthorSocials {
    /// Present links as `(label, url)` pairs in display order.
    pub fn links(&self) -> Vec<(&'static str, &str)> {
        [
            ("X", &self.x),
            ("LinkedIn", &self.linkedin),
            ("Mastodon", &self.mastodon),
            ("Bluesky", &self.bluesky),
            ("YouTube", &self.youtube),
            ("Instagram", &self.instagram),
        ]
        .into_iter()
        .filter_map(|(label, url)| {
            url.as_deref()
                .filter(|u| !u.trim().is_empty())
                .map(|u| (label, u))
        })
        .collect()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Author {
    pub name: String,
    #[serde(default)]
    pub socials: Option<AuthorSocials>,
}

/// A launch referenced by a news item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LaunchInfo {
    pub launch_id: String,
    pub provider: String,
}

/// An event referenced by a news item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EventInfo {
    pub event_id: i64,
    pub provider: String,
}

/// A single article, blog post or report.
///
/// Reports come without `featured`, `launches` and `events`; those fields
/// deserialize to their empty values.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewsItem {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub authors: Vec<Author>,
    pub url: String,
    #[serde(default)]
    pub image_url: String,
    pub news_site: String,
    #[serde(default)]
    pub summary: String,
    pub published_at: String,
    pub updated_at: String,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub launches: Vec<LaunchInfo>,
    #[serde(default)]
    pub events: Vec<EventInfo>,
}

pub type Article = NewsItem;
pub type Blog = NewsItem;
pub type Report = NewsItem;

impl NewsItem {
    /// True when the item was modified after publication.
    pub fn was_updated(&self) -> bool {
        self.updated_at != self.published_at
    }

    /// True when the item references launches or events.
    pub fn has_related(&self) -> bool {
        !self.launches.is_empty() || !self.events.is_empty()
    }
}
