//! Difficulty-grouped sidebar navigation.
//!
//! A category's summaries are partitioned in one pass: each summary is
//! appended to the bucket for its difficulty, and a bucket is created the
//! first time its difficulty shows up. Members keep their input order.
//!
//! Buckets are held in a `Vec` in creation order, so by default the sidebar
//! lists tiers in the order they first occur in the content, not
//! Beginner → Advanced. [`SidebarOrder::Difficulty`] opts into the canonical
//! order instead.

use crate::types::{Difficulty, TutorialSummary};
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

/// How buckets are ordered in the rendered sidebar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SidebarOrder {
    /// Order in which each difficulty first appears in the category.
    #[default]
    FirstSeen,
    /// Declaration order of [`Difficulty`].
    Difficulty,
}

/// A summary plus whether it is the page being rendered.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SidebarEntry {
    #[serde(flatten)]
    pub summary: TutorialSummary,
    #[serde(rename = "isActive")]
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SidebarGroup {
    pub difficulty: Difficulty,
    pub entries: Vec<SidebarEntry>,
}

impl SidebarGroup {
    pub fn count(&self) -> usize {
        self.entries.len()
    }

    pub fn slugs(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.summary.slug.as_str()).collect()
    }
}

/// Insertion-ordered difficulty → entries mapping.
///
/// Serializes as a JSON object whose keys appear in bucket order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SidebarGroups {
    groups: Vec<SidebarGroup>,
}

impl SidebarGroups {
    pub fn iter(&self) -> std::slice::Iter<'_, SidebarGroup> {
        self.groups.iter()
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn get(&self, difficulty: Difficulty) -> Option<&SidebarGroup> {
        self.groups.iter().find(|g| g.difficulty == difficulty)
    }

    pub fn difficulties(&self) -> Vec<Difficulty> {
        self.groups.iter().map(|g| g.difficulty).collect()
    }

    /// Number of entries across all buckets.
    pub fn total(&self) -> usize {
        self.groups.iter().map(SidebarGroup::count).sum()
    }

    pub fn active(&self) -> Option<&SidebarEntry> {
        self.groups
            .iter()
            .flat_map(|g| g.entries.iter())
            .find(|e| e.is_active)
    }
}

impl<'a> IntoIterator for &'a SidebarGroups {
    type Item = &'a SidebarGroup;
    type IntoIter = std::slice::Iter<'a, SidebarGroup>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.iter()
    }
}

impl Serialize for SidebarGroups {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.groups.len()))?;
        for group in &self.groups {
            map.serialize_entry(group.difficulty.as_str(), &group.entries)?;
        }
        map.end()
    }
}

/// Seam between page assembly and the grouping algorithm.
pub trait GroupTutorials {
    fn group(&self, summaries: Vec<TutorialSummary>, active_slug: Option<&str>) -> SidebarGroups;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SidebarGrouper {
    order: SidebarOrder,
}

impl SidebarGrouper {
    pub fn new(order: SidebarOrder) -> Self {
        Self { order }
    }
}

impl GroupTutorials for SidebarGrouper {
    fn group(&self, summaries: Vec<TutorialSummary>, active_slug: Option<&str>) -> SidebarGroups {
        let mut groups: Vec<SidebarGroup> = Vec::new();

        for summary in summaries {
            let difficulty = summary.difficulty;
            let entry = SidebarEntry {
                is_active: active_slug == Some(summary.slug.as_str()),
                summary,
            };
            match groups.iter_mut().find(|g| g.difficulty == difficulty) {
                Some(group) => group.entries.push(entry),
                None => groups.push(SidebarGroup {
                    difficulty,
                    entries: vec![entry],
                }),
            }
        }

        if self.order == SidebarOrder::Difficulty {
            groups.sort_by_key(|g| g.difficulty);
        }

        SidebarGroups { groups }
    }
}
