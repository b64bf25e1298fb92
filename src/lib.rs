//! # Tutorial Site
//!
//! A static site compiler for categorised tutorials. The content directory is
//! the data source: directories become categories, markdown files with TOML
//! front matter become tutorials, and every `(category, slug)` pair becomes a
//! pre-rendered page under `/tutorials/{category}/{slug}`.
//!
//! # Architecture: Two-Stage Pipeline
//!
//! ```text
//! 1. Scan      content/  →  manifest.json    (filesystem → tutorials + categories + config)
//! 2. Generate  manifest  →  dist/            (routes → page models → HTML)
//! ```
//!
//! The manifest is human-readable JSON, so each stage can be inspected or
//! rerun on its own.
//!
//! Inside the generate stage every page goes through the same chain:
//!
//! ```text
//! route → ContentResolver → SidebarGrouper → PageModel → HTML
//! ```
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`scan`] | Stage 1: walks the content directory and produces the manifest |
//! | [`generate`] | Stage 2: renders the site from the manifest using Maud |
//! | [`store`] | Immutable `(category, slug)`-indexed tutorial store ([`store::ContentRepository`]) |
//! | [`routes`] | Build-time route enumeration; nothing else is pre-rendered |
//! | [`resolve`] | `(category, slug)` → `Found` / `NotFound` |
//! | [`sidebar`] | Difficulty grouping with counts and the active marker |
//! | [`page`] | Resolution followed by grouping, short-circuiting on not found |
//! | [`config`] | `config.toml` loading, validation, merging and CSS generation |
//! | [`frontmatter`] | `+++`-fenced TOML front matter parser |
//! | [`types`] | Records shared between stages (`Tutorial`, `Category`, `Difficulty`) |
//! | [`naming`] | `NNN-name` filename convention parser |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Not Found Is a Value
//!
//! An unknown slug is an expected outcome, not a failure. The resolver and
//! assembler return tagged results ([`resolve::Resolution`],
//! [`page::PageOutcome`]); errors are reserved for broken content and I/O.
//!
//! ## No Fallback Rendering
//!
//! Only routes produced by [`routes::enumerate_routes`] are written. Any other
//! path is served the generic `404.html`, whether the category or the slug was
//! wrong.
//!
//! ## Maud Over Template Engines
//!
//! HTML is generated with [Maud](https://maud.lambda.xyz/). Malformed markup
//! is a compile error and all interpolation is auto-escaped.
//!
//! ## CSS-Only Sidebar Toggle
//!
//! The mobile sidebar opens through a checkbox and the `:checked` selector.
//! The generated site ships no JavaScript and the open state is never
//! persisted.

pub mod config;
pub mod frontmatter;
pub mod generate;
pub mod naming;
pub mod output;
pub mod page;
pub mod resolve;
pub mod routes;
pub mod scan;
pub mod sidebar;
pub mod store;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
