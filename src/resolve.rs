//! Route → tutorial resolution.
//!
//! With `match_category` enabled (the default in
//! [`crate::config::RoutingConfig`]) lookup uses the full `(category, slug)`
//! key. Disabled, an exact key still wins, and otherwise the slug alone is
//! used when it names exactly one tutorial, so `/tutorials/anything/{slug}`
//! reaches it.
//!
//! Unknown category and unknown slug collapse into the same
//! [`Resolution::NotFound`]; callers never learn which half was wrong.

use crate::routes::RouteKey;
use crate::store::ContentRepository;
use crate::types::Tutorial;

/// Outcome of a lookup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Resolution<'a> {
    Found(&'a Tutorial),
    NotFound,
}

impl<'a> Resolution<'a> {
    pub fn found(self) -> Option<&'a Tutorial> {
        match self {
            Resolution::Found(t) => Some(t),
            Resolution::NotFound => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Resolution::Found(_))
    }
}

pub struct ContentResolver<'a, R> {
    repo: &'a R,
    match_category: bool,
}

impl<'a, R: ContentRepository> ContentResolver<'a, R> {
    pub fn new(repo: &'a R, match_category: bool) -> Self {
        Self {
            repo,
            match_category,
        }
    }

    /// Resolve an untrusted `(category, slug)` pair.
    pub fn resolve(&self, category: &str, slug: &str) -> Resolution<'a> {
        if category.is_empty() || slug.is_empty() {
            return Resolution::NotFound;
        }
        if let Some(tutorial) = self.repo.get(category, slug) {
            return Resolution::Found(tutorial);
        }
        match self.repo.find_slug(slug) {
            Some(tutorial) if !self.match_category => Resolution::Found(tutorial),
            Some(tutorial) => {
                tracing::debug!(
                    slug,
                    requested = category,
                    stored = %tutorial.category,
                    "category mismatch"
                );
                Resolution::NotFound
            }
            None => Resolution::NotFound,
        }
    }

    pub fn resolve_key(&self, key: &RouteKey) -> Resolution<'a> {
        self.resolve(&key.category, &key.slug)
    }

    /// Resolve a full request path; malformed paths are not found.
    pub fn resolve_path(&self, path: &str) -> Resolution<'a> {
        match RouteKey::parse_path(path) {
            Some(key) => self.resolve_key(&key),
            None => Resolution::NotFound,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::ContentStore;
    use crate::test_helpers::tutorial;
    use crate::types::Difficulty;

    fn store() -> ContentStore {
        ContentStore::load(vec![
            tutorial("gcp", "cloud-run", Difficulty::Beginner),
            tutorial("aws", "lambda", Difficulty::Advanced),
        ])
        .unwrap()
    }

    #[test]
    fn found_when_slug_and_category_match() {
        let store = store();
        let resolver = ContentResolver::new(&store, true);
        let found = resolver.resolve("gcp", "cloud-run").found().unwrap();
        assert_eq!(found.slug, "cloud-run");
        assert_eq!(found.category, "gcp");
    }

    #[test]
    fn unknown_slug_not_found() {
        let store = store();
        let resolver = ContentResolver::new(&store, true);
        assert_eq!(
            resolver.resolve("gcp", "nonexistent-slug"),
            Resolution::NotFound
        );
    }

    #[test]
    fn category_mismatch_not_found_when_matching() {
        let store = store();
        let resolver = ContentResolver::new(&store, true);
        assert_eq!(resolver.resolve("aws", "cloud-run"), Resolution::NotFound);
        assert_eq!(resolver.resolve("GCP", "cloud-run"), Resolution::NotFound);
    }

    #[test]
    fn slug_only_lookup_ignores_category() {
        let store = store();
        let resolver = ContentResolver::new(&store, false);
        let found = resolver.resolve("whatever", "cloud-run").found().unwrap();
        assert_eq!(found.category, "gcp");
    }

    #[test]
    fn shared_slug_resolves_per_category() {
        let store = ContentStore::load(vec![
            tutorial("gcp", "intro", Difficulty::Beginner),
            tutorial("aws", "intro", Difficulty::Advanced),
        ])
        .unwrap();
        let resolver = ContentResolver::new(&store, true);

        let gcp = resolver.resolve("gcp", "intro").found().unwrap();
        let aws = resolver.resolve("aws", "intro").found().unwrap();
        assert_eq!(gcp.id, "gcp/intro");
        assert_eq!(aws.id, "aws/intro");
        assert_eq!(resolver.resolve("azure", "intro"), Resolution::NotFound);
    }

    #[test]
    fn slug_only_lookup_rejects_ambiguous_slug() {
        let store = ContentStore::load(vec![
            tutorial("gcp", "intro", Difficulty::Beginner),
            tutorial("aws", "intro", Difficulty::Advanced),
        ])
        .unwrap();
        let lenient = ContentResolver::new(&store, false);

        assert_eq!(lenient.resolve("azure", "intro"), Resolution::NotFound);
        assert_eq!(lenient.resolve("aws", "intro").found().unwrap().id, "aws/intro");
    }

    #[test]
    fn empty_segments_not_found() {
        let store = store();
        let lenient = ContentResolver::new(&store, false);
        assert_eq!(lenient.resolve("", "cloud-run"), Resolution::NotFound);
        assert_eq!(lenient.resolve("gcp", ""), Resolution::NotFound);
    }

    #[test]
    fn resolve_path_parses_route() {
        let store = store();
        let resolver = ContentResolver::new(&store, true);
        assert!(resolver.resolve_path("/tutorials/aws/lambda").is_found());
        assert!(resolver.resolve_path("/tutorials/aws/lambda/").is_found());
        assert!(!resolver.resolve_path("/tutorials/aws").is_found());
        assert!(!resolver.resolve_path("/blog/aws/lambda").is_found());
    }
}
