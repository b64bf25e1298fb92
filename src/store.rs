//! Immutable content store.
//!
//! [`ContentStore::load`] builds the lookup indexes once from the scanned
//! tutorials. After that nothing mutates it, so it can be shared freely across
//! rendering threads.
//!
//! A slug is unique within its category, so the primary key is
//! `(category, slug)`. The same slug may appear in two categories; slug-only
//! lookup ([`ContentRepository::find_slug`]) only answers when the slug names
//! exactly one tutorial.

use crate::types::{Tutorial, TutorialSummary};
use std::collections::HashMap;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("duplicate slug {slug:?} in category {category:?}")]
    DuplicateSlug { category: String, slug: String },
    #[error("duplicate tutorial id {0:?}")]
    DuplicateId(String),
}

/// Read access to the tutorial corpus.
///
/// Resolver, route enumeration and page assembly depend on this trait rather
/// than on a concrete store, so tests can hand them a handful of records.
pub trait ContentRepository {
    /// Look up a tutorial by its route key.
    fn get(&self, category: &str, slug: &str) -> Option<&Tutorial>;

    /// Look up a tutorial by slug alone. `None` when the slug is unknown or
    /// shared by several categories.
    fn find_slug(&self, slug: &str) -> Option<&Tutorial>;

    /// Every tutorial, in insertion order.
    fn tutorials(&self) -> &[Tutorial];

    /// Summaries of one category's tutorials, in insertion order.
    fn summaries_in(&self, category: &str) -> Vec<TutorialSummary> {
        self.tutorials()
            .iter()
            .filter(|t| t.category == category)
            .map(Tutorial::summary)
            .collect()
    }
}

#[derive(Debug, Default)]
pub struct ContentStore {
    tutorials: Vec<Tutorial>,
    by_key: HashMap<(String, String), usize>,
    by_slug: HashMap<String, Vec<usize>>,
}

impl ContentStore {
    /// Build the store, rejecting duplicate slugs within a category and
    /// duplicate ids anywhere.
    pub fn load(tutorials: Vec<Tutorial>) -> Result<Self, StoreError> {
        let mut by_key = HashMap::with_capacity(tutorials.len());
        let mut by_slug: HashMap<String, Vec<usize>> = HashMap::with_capacity(tutorials.len());
        let mut ids = HashMap::with_capacity(tutorials.len());

        for (idx, tutorial) in tutorials.iter().enumerate() {
            let key = (tutorial.category.clone(), tutorial.slug.clone());
            if by_key.insert(key, idx).is_some() {
                return Err(StoreError::DuplicateSlug {
                    category: tutorial.category.clone(),
                    slug: tutorial.slug.clone(),
                });
            }
            if ids.insert(tutorial.id.as_str(), idx).is_some() {
                return Err(StoreError::DuplicateId(tutorial.id.clone()));
            }
            by_slug.entry(tutorial.slug.clone()).or_default().push(idx);
        }

        tracing::debug!(count = tutorials.len(), "content store loaded");
        Ok(Self {
            tutorials,
            by_key,
            by_slug,
        })
    }

    pub fn len(&self) -> usize {
        self.tutorials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tutorials.is_empty()
    }

    /// Give the validated records back, in insertion order.
    pub fn into_tutorials(self) -> Vec<Tutorial> {
        self.tutorials
    }
}

impl ContentRepository for ContentStore {
    fn get(&self, category: &str, slug: &str) -> Option<&Tutorial> {
        self.by_key
            .get(&(category.to_string(), slug.to_string()))
            .map(|&idx| &self.tutorials[idx])
    }

    fn find_slug(&self, slug: &str) -> Option<&Tutorial> {
        match self.by_slug.get(slug).map(Vec::as_slice) {
            Some(&[idx]) => Some(&self.tutorials[idx]),
            _ => None,
        }
    }

    fn tutorials(&self) -> &[Tutorial] {
        &self.tutorials
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::tutorial;
    use crate::types::Difficulty;

    #[test]
    fn get_by_route_key() {
        let store = ContentStore::load(vec![
            tutorial("gcp", "run", Difficulty::Beginner),
            tutorial("aws", "lambda", Difficulty::Advanced),
        ])
        .unwrap();

        assert_eq!(store.len(), 2);
        assert_eq!(store.get("aws", "lambda").unwrap().id, "aws/lambda");
        assert!(store.get("gcp", "lambda").is_none());
        assert!(store.get("gcp", "missing").is_none());
    }

    #[test]
    fn lookup_is_case_sensitive() {
        let store = ContentStore::load(vec![tutorial("gcp", "run", Difficulty::Beginner)]).unwrap();
        assert!(store.get("gcp", "Run").is_none());
        assert!(store.find_slug("Run").is_none());
    }

    #[test]
    fn same_slug_in_two_categories_is_allowed() {
        let store = ContentStore::load(vec![
            tutorial("gcp", "intro", Difficulty::Beginner),
            tutorial("aws", "intro", Difficulty::Advanced),
        ])
        .unwrap();

        assert_eq!(store.get("gcp", "intro").unwrap().category, "gcp");
        assert_eq!(store.get("aws", "intro").unwrap().category, "aws");
    }

    #[test]
    fn find_slug_requires_single_owner() {
        let store = ContentStore::load(vec![
            tutorial("gcp", "intro", Difficulty::Beginner),
            tutorial("aws", "intro", Difficulty::Beginner),
            tutorial("aws", "lambda", Difficulty::Beginner),
        ])
        .unwrap();

        assert!(store.find_slug("intro").is_none());
        assert_eq!(store.find_slug("lambda").unwrap().category, "aws");
        assert!(store.find_slug("missing").is_none());
    }

    #[test]
    fn duplicate_slug_within_category_rejected() {
        let mut second = tutorial("gcp", "intro", Difficulty::Advanced);
        second.id = "gcp/intro-2".to_string();
        let result = ContentStore::load(vec![tutorial("gcp", "intro", Difficulty::Beginner), second]);
        match result {
            Err(StoreError::DuplicateSlug { category, slug }) => {
                assert_eq!(category, "gcp");
                assert_eq!(slug, "intro");
            }
            other => panic!("expected DuplicateSlug, got {other:?}"),
        }
    }

    #[test]
    fn duplicate_id_rejected() {
        let mut second = tutorial("gcp", "b", Difficulty::Beginner);
        second.id = "gcp/a".to_string();
        let result = ContentStore::load(vec![tutorial("gcp", "a", Difficulty::Beginner), second]);
        assert!(matches!(result, Err(StoreError::DuplicateId(id)) if id == "gcp/a"));
    }

    #[test]
    fn summaries_scoped_to_category_in_insertion_order() {
        let store = ContentStore::load(vec![
            tutorial("gcp", "c", Difficulty::Beginner),
            tutorial("aws", "x", Difficulty::Beginner),
            tutorial("gcp", "a", Difficulty::Advanced),
            tutorial("gcp", "b", Difficulty::Beginner),
        ])
        .unwrap();

        let slugs: Vec<String> = store
            .summaries_in("gcp")
            .into_iter()
            .map(|s| s.slug)
            .collect();
        assert_eq!(slugs, vec!["c", "a", "b"]);
        assert!(store.summaries_in("azure").is_empty());
    }

    #[test]
    fn empty_store() {
        let store = ContentStore::load(vec![]).unwrap();
        assert!(store.is_empty());
        assert!(store.tutorials().is_empty());
    }
}
