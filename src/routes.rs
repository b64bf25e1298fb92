//! Build-time route enumeration.
//!
//! The generator only writes pages for routes returned by
//! [`enumerate_routes`]; there is no on-demand fallback. A request for any
//! other path gets the generic not-found page.
//!
//! Route pattern: `/tutorials/{category}/{slug}`.

use crate::store::ContentRepository;
use crate::types::Category;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use thiserror::Error;

/// First path segment shared by every tutorial route.
pub const ROUTE_PREFIX: &str = "tutorials";

#[derive(Error, Debug)]
pub enum RouteError {
    #[error("category {0:?} has no tutorials to publish")]
    EmptyCategory(String),
}

/// Composite route key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RouteKey {
    pub category: String,
    pub slug: String,
}

impl RouteKey {
    pub fn new(category: impl Into<String>, slug: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            slug: slug.into(),
        }
    }

    /// URL path, e.g. `/tutorials/gcp/cloud-run`.
    pub fn path(&self) -> String {
        format!("/{}/{}/{}", ROUTE_PREFIX, self.category, self.slug)
    }

    /// Output file relative to the site root.
    pub fn output_file(&self) -> String {
        format!("{}/{}/{}/index.html", ROUTE_PREFIX, self.category, self.slug)
    }

    /// Parse a request path back into a key.
    ///
    /// Accepts exactly `/tutorials/{category}/{slug}` with an optional
    /// trailing slash. Both segments must be non-empty.
    pub fn parse_path(path: &str) -> Option<Self> {
        let path = path.strip_prefix('/').unwrap_or(path);
        let path = path.strip_suffix('/').unwrap_or(path);
        let mut segments = path.split('/');
        let (prefix, category, slug) = (segments.next()?, segments.next()?, segments.next()?);
        if prefix != ROUTE_PREFIX || segments.next().is_some() {
            return None;
        }
        if category.is_empty() || slug.is_empty() {
            return None;
        }
        Some(Self::new(category, slug))
    }
}

impl fmt::Display for RouteKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Every route to pre-render, in store order, deduplicated.
///
/// Fails when a declared category ended up with no routes: the content tree
/// promised pages that would not exist.
pub fn enumerate_routes(
    repo: &impl ContentRepository,
    categories: &[Category],
) -> Result<Vec<RouteKey>, RouteError> {
    let mut seen = HashSet::new();
    let routes: Vec<RouteKey> = repo
        .tutorials()
        .iter()
        .map(|t| RouteKey::new(&t.category, &t.slug))
        .filter(|key| seen.insert(key.clone()))
        .collect();

    for category in categories {
        if !routes.iter().any(|r| r.category == category.key) {
            return Err(RouteError::EmptyCategory(category.key.clone()));
        }
    }

    tracing::debug!(count = routes.len(), "routes enumerated");
    Ok(routes)
}
