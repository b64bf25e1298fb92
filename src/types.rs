//! Shared data model used across both pipeline stages.
//!
//! These types are serialized into the scan manifest and read back by the
//! generate stage, so field names here are the on-disk contract. JSON field
//! names follow the content record shape (`readTime`, `publishedAt`).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Skill level a tutorial addresses.
///
/// Declaration order is the canonical severity order; `Ord` follows it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl Difficulty {
    /// All tiers in declaration order.
    pub const ALL: [Difficulty; 3] = [
        Difficulty::Beginner,
        Difficulty::Intermediate,
        Difficulty::Advanced,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Beginner => "Beginner",
            Difficulty::Intermediate => "Intermediate",
            Difficulty::Advanced => "Advanced",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One published tutorial.
///
/// `content` is an opaque markdown payload. Nothing in the resolution or
/// grouping path reads it; only the HTML renderer converts it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tutorial {
    /// Unique across the whole store. Carried for display only.
    pub id: String,
    pub title: String,
    pub description: String,
    pub content: String,
    /// Route segment; unique within the category.
    pub slug: String,
    /// Route segment of the owning category.
    pub category: String,
    pub author: String,
    pub read_time: String,
    pub difficulty: Difficulty,
    pub published_at: NaiveDate,
}

impl Tutorial {
    /// Lightweight projection used for navigation.
    pub fn summary(&self) -> TutorialSummary {
        TutorialSummary {
            id: self.id.clone(),
            title: self.title.clone(),
            slug: self.slug.clone(),
            category: self.category.clone(),
            difficulty: self.difficulty,
        }
    }
}

/// Navigation-facing view of a tutorial. Never carries the content payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TutorialSummary {
    pub id: String,
    pub title: String,
    pub slug: String,
    pub category: String,
    pub difficulty: Difficulty,
}

/// A content directory that groups tutorials.
///
/// Categories follow the `NNN-name` convention: the prefix orders them and
/// the remainder is the route segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    /// Route segment (directory name with the number prefix stripped)
    pub key: String,
    /// Display label (dashes → spaces)
    pub title: String,
    /// Contents of `info.txt`, if present and non-empty
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Sort key from number prefix (`u32::MAX` when unnumbered)
    pub sort_key: u32,
    /// Directory name relative to the content root
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub source_dir: String,
}
