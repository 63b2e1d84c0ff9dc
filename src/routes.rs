// src/routes.rs

//! Path-based routing between list and detail views.
//!
//! Routes look like the paths of a web front end:
//!
//! ```text
//! /                          -> article list
//! /articles?page=2&limit=5   -> article list, page 2
//! /blogs/1234                -> blog detail
//! /reports/77?page=3         -> report detail, remembering the list page
//! ```

use std::fmt;
use std::str::FromStr;

use crate::error::{AppError, Result};
use crate::models::{Resource, SearchParams};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// Landing page; shows the article list.
    Home { search: SearchParams },
    List {
        resource: Resource,
        search: SearchParams,
    },
    Detail {
        resource: Resource,
        id: String,
        search: SearchParams,
    },
}

impl Route {
    pub fn home() -> Self {
        Route::Home {
            search: SearchParams::new(),
        }
    }

    pub fn list(resource: Resource) -> Self {
        Route::List {
            resource,
            search: SearchParams::new(),
        }
    }

    pub fn detail(resource: Resource, id: impl Into<String>) -> Self {
        Route::Detail {
            resource,
            id: id.into(),
            search: SearchParams::new(),
        }
    }

    /// Parse a path with optional query string and fragment.
    pub fn parse(input: &str) -> Result<Self> {
        let input = input.trim();
        let input = input.split('#').next().unwrap_or_default();
        let (path, query) = match input.split_once('?') {
            Some((path, query)) => (path, query),
            None => (input, ""),
        };
        let search = SearchParams::parse(query);

        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        match segments.as_slice() {
            [] | ["home"] => Ok(Route::Home { search }),
            [resource] => Ok(Route::List {
                resource: resource.parse()?,
                search,
            }),
            [resource, id] => Ok(Route::Detail {
                resource: resource.parse()?,
                id: (*id).to_string(),
                search,
            }),
            _ => Err(AppError::route(format!("no route matches '{path}'"))),
        }
    }

    /// Resource the route shows; the landing page shows articles.
    pub fn resource(&self) -> Resource {
        match self {
            Route::Home { .. } => Resource::Articles,
            Route::List { resource, .. } | Route::Detail { resource, .. } => *resource,
        }
    }

    /// Query string state of the route.
    pub fn search(&self) -> &SearchParams {
        match self {
            Route::Home { search }
            | Route::List { search, .. }
            | Route::Detail { search, .. } => search,
        }
    }

    /// The list a detail view came from, keeping its search params.
    pub fn back(&self) -> Option<Route> {
        match self {
            Route::Detail {
                resource, search, ..
            } => Some(Route::List {
                resource: *resource,
                search: search.clone(),
            }),
            _ => None,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Home { search } => write!(f, "/{}", search.to_query_string()),
            Route::List { resource, search } => {
                write!(f, "/{}{}", resource.path(), search.to_query_string())
            }
            Route::Detail {
                resource,
                id,
                search,
            } => write!(f, "/{}/{}{}", resource.path(), id, search.to_query_string()),
        }
    }
}

impl FromStr for Route {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        Route::parse(s)
    }
}
