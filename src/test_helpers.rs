//! Shared test utilities.
//!
//! Record builders for store/resolver/sidebar tests, plus fixture setup and
//! lookup helpers for scan-phase tests.
//!
//! ```rust
//! let tmp = setup_fixtures();
//! let manifest = scan(tmp.path()).unwrap();
//!
//! assert_eq!(category_keys(&manifest), vec!["gcp", "aws"]);
//! let run = find_tutorial(&manifest, "cloud-run-basics");
//! ```

use chrono::NaiveDate;
use std::path::Path;
use tempfile::TempDir;

use crate::scan::Manifest;
use crate::types::{Category, Difficulty, Tutorial, TutorialSummary};

// =========================================================================
// Record builders
// =========================================================================

/// A tutorial with predictable metadata. The id is `{category}/{slug}`.
pub fn tutorial(category: &str, slug: &str, difficulty: Difficulty) -> Tutorial {
    Tutorial {
        id: format!("{category}/{slug}"),
        title: format!("Tutorial {slug}"),
        description: format!("About {slug}"),
        content: format!("# {slug}\n\nBody of {slug}."),
        slug: slug.to_string(),
        category: category.to_string(),
        author: "Test Author".to_string(),
        read_time: "5 min".to_string(),
        difficulty,
        published_at: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
    }
}

pub fn summary(category: &str, slug: &str, difficulty: Difficulty) -> TutorialSummary {
    tutorial(category, slug, difficulty).summary()
}

pub fn category(key: &str) -> Category {
    Category {
        key: key.to_string(),
        title: key.to_string(),
        description: None,
        sort_key: u32::MAX,
        source_dir: String::new(),
    }
}

/// Source text of a tutorial file with front matter.
pub fn tutorial_source(id: &str, difficulty: &str, slug: Option<&str>) -> String {
    let slug_line = slug
        .map(|s| format!("slug = \"{s}\"\n"))
        .unwrap_or_default();
    format!(
        "+++\nid = \"{id}\"\ntitle = \"Tutorial {id}\"\ndescription = \"About {id}\"\n\
         author = \"Test Author\"\nread_time = \"5 min\"\ndifficulty = \"{difficulty}\"\n\
         published_at = \"2024-03-01\"\n{slug_line}+++\n# Tutorial {id}\n\nBody.\n"
    )
}

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/content/` to a temp directory and return it.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/content");
    copy_dir_recursive(&fixtures, tmp.path()).unwrap();
    tmp
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            std::fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            std::fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

// =========================================================================
// Manifest lookups: panic with a clear message on miss
// =========================================================================

pub fn find_tutorial<'a>(manifest: &'a Manifest, slug: &str) -> &'a Tutorial {
    manifest
        .tutorials
        .iter()
        .find(|t| t.slug == slug)
        .unwrap_or_else(|| {
            let slugs: Vec<&str> = manifest.tutorials.iter().map(|t| t.slug.as_str()).collect();
            panic!("tutorial '{slug}' not found. Available: {slugs:?}")
        })
}

pub fn find_category<'a>(manifest: &'a Manifest, key: &str) -> &'a Category {
    manifest
        .categories
        .iter()
        .find(|c| c.key == key)
        .unwrap_or_else(|| {
            let keys = category_keys(manifest);
            panic!("category '{key}' not found. Available: {keys:?}")
        })
}

pub fn category_keys(manifest: &Manifest) -> Vec<&str> {
    manifest.categories.iter().map(|c| c.key.as_str()).collect()
}

/// Slugs of one category's tutorials in manifest order.
pub fn tutorial_slugs<'a>(manifest: &'a Manifest, category: &'a str) -> Vec<&'a str> {
    manifest
        .tutorials_in(category)
        .map(|t| t.slug.as_str())
        .collect()
}
