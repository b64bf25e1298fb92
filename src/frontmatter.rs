//! TOML front matter for tutorial files.
//!
//! A tutorial file opens with a `+++` fence, a TOML table of metadata, a
//! closing `+++` fence, and then the markdown body:
//!
//! ```text
//! +++
//! id = "gcp-001"
//! title = "Cloud Run Basics"
//! description = "Deploy your first container"
//! author = "Jane Doe"
//! read_time = "10 min"
//! difficulty = "Beginner"
//! published_at = "2024-01-15"
//! +++
//!
//! # Cloud Run Basics
//! ...
//! ```
//!
//! `slug` is optional and overrides the slug derived from the filename.
//! Unknown keys are rejected so a typo never silently drops metadata.

use crate::types::Difficulty;
use chrono::NaiveDate;
use serde::Deserialize;
use thiserror::Error;

const FENCE: &str = "+++";

#[derive(Error, Debug)]
pub enum FrontMatterError {
    #[error("file does not start with a +++ front matter block")]
    Missing,
    #[error("front matter block is not closed with +++")]
    Unterminated,
    #[error("invalid front matter: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("published_at must be a YYYY-MM-DD date, got {0:?}")]
    InvalidDate(String),
}

/// Metadata block at the top of a tutorial file.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FrontMatter {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub author: String,
    pub read_time: String,
    pub difficulty: Difficulty,
    pub published_at: String,
    #[serde(default)]
    pub slug: Option<String>,
}

impl FrontMatter {
    pub fn published_date(&self) -> Result<NaiveDate, FrontMatterError> {
        NaiveDate::parse_from_str(self.published_at.trim(), "%Y-%m-%d")
            .map_err(|_| FrontMatterError::InvalidDate(self.published_at.clone()))
    }
}

/// Split a document into its raw front matter and body.
///
/// Leading blank lines before the opening fence are tolerated. The body is
/// returned without the single newline that follows the closing fence.
pub fn split(source: &str) -> Result<(&str, &str), FrontMatterError> {
    let trimmed = source.trim_start_matches(['\n', '\r']);
    let after_open = trimmed
        .strip_prefix(FENCE)
        .ok_or(FrontMatterError::Missing)?;
    let after_open = after_open
        .strip_prefix("\r\n")
        .or_else(|| after_open.strip_prefix('\n'))
        .ok_or(FrontMatterError::Missing)?;

    let mut offset = 0;
    for line in after_open.split_inclusive('\n') {
        if line.trim_end() == FENCE {
            let meta = &after_open[..offset];
            let body = &after_open[offset + line.len()..];
            return Ok((meta, body));
        }
        offset += line.len();
    }
    Err(FrontMatterError::Unterminated)
}

/// Parse a tutorial document into front matter and markdown body.
pub fn parse(source: &str) -> Result<(FrontMatter, &str), FrontMatterError> {
    let (meta, body) = split(source)?;
    let front: FrontMatter = toml::from_str(meta)?;
    front.published_date()?;
    Ok((front, body))
}
