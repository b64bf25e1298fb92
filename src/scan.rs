//! Filesystem scanning and manifest generation.
//!
//! Stage 1 of the build pipeline. Walks the content root, parses every
//! tutorial's front matter, and produces a [`Manifest`] that the generate
//! stage consumes.
//!
//! ## Directory Structure
//!
//! ```text
//! content/                          # Content root
//! ├── config.toml                   # Site configuration (optional)
//! ├── assets/                       # Copied verbatim into the output root
//! ├── 010-gcp/                      # Category "gcp"
//! │   ├── info.txt                  # Category description (optional)
//! │   ├── 010-cloud-run-basics.md   # Tutorial "cloud-run-basics"
//! │   └── 020-iam-deep-dive.md
//! └── 020-aws/
//!     └── 010-lambda-intro.md
//! ```
//!
//! ## Ordering
//!
//! Categories and tutorials sort by their `NNN-` prefix, then by name;
//! unnumbered entries go last. The resulting tutorial order is the store's
//! insertion order, which the sidebar preserves.
//!
//! ## Validation
//!
//! - Every tutorial has well-formed front matter
//! - Slugs and category keys are non-empty and URL-safe
//! - Slugs are unique within their category; ids across the whole site

use crate::config::{self, SiteConfig};
use crate::frontmatter::{self, FrontMatterError};
use crate::naming::parse_entry_name;
use crate::store::{ContentStore, StoreError};
use crate::types::{Category, Tutorial};
use serde::{Deserialize, Serialize};
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Directory in the content root holding static files for the output root.
pub const ASSETS_DIR: &str = "assets";

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("{path}: {source}")]
    FrontMatter {
        path: PathBuf,
        source: FrontMatterError,
    },
    #[error("Content error: {0}")]
    Store(#[from] StoreError),
    #[error("Invalid slug {1:?} in {0}")]
    InvalidSlug(PathBuf, String),
    #[error("Category directory has no usable name: {0}")]
    InvalidCategory(PathBuf),
}

/// Manifest output from the scan stage.
#[derive(Debug, Serialize, Deserialize)]
pub struct Manifest {
    pub categories: Vec<Category>,
    pub tutorials: Vec<Tutorial>,
    pub config: SiteConfig,
}

impl Manifest {
    pub fn tutorials_in<'a>(&'a self, category: &'a str) -> impl Iterator<Item = &'a Tutorial> {
        self.tutorials.iter().filter(move |t| t.category == category)
    }
}

pub fn scan(root: &Path) -> Result<Manifest, ScanError> {
    let config = config::load_config(root)?;

    let mut categories = Vec::new();
    let mut tutorials = Vec::new();

    for dir in category_dirs(root)? {
        let category = build_category(&dir, root)?;
        let found = scan_category(&dir, &category.key)?;
        tracing::debug!(category = %category.key, tutorials = found.len(), "scanned category");
        tutorials.extend(found);
        categories.push(category);
    }

    // Loading validates slug/id uniqueness; hand the records back afterwards
    let tutorials = ContentStore::load(tutorials)?.into_tutorials();

    tracing::info!(
        categories = categories.len(),
        tutorials = tutorials.len(),
        "scan complete"
    );

    Ok(Manifest {
        categories,
        tutorials,
        config,
    })
}

/// Sort entries by number prefix, then by name.
fn sort_by_prefix(entries: &mut [PathBuf]) {
    entries.sort_by_key(|p| {
        let name = entry_stem(p);
        (parse_entry_name(&name).sort_key(), name)
    });
}

fn entry_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default()
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .map(|n| n.to_string_lossy().starts_with('.'))
        .unwrap_or(true)
}

fn category_dirs(root: &Path) -> Result<Vec<PathBuf>, ScanError> {
    let mut dirs: Vec<PathBuf> = fs::read_dir(root)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.is_dir() && !is_hidden(p))
        .filter(|p| p.file_name() != Some(OsStr::new(ASSETS_DIR)))
        .collect();
    sort_by_prefix(&mut dirs);
    Ok(dirs)
}

fn build_category(dir: &Path, root: &Path) -> Result<Category, ScanError> {
    let dir_name = dir
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    let parsed = parse_entry_name(&dir_name);
    if !is_url_safe(&parsed.name) {
        return Err(ScanError::InvalidCategory(dir.to_path_buf()));
    }

    let info_path = dir.join("info.txt");
    let description = if info_path.exists() {
        let content = fs::read_to_string(&info_path)?.trim().to_string();
        (!content.is_empty()).then_some(content)
    } else {
        None
    };

    let source_dir = dir
        .strip_prefix(root)
        .unwrap_or(dir)
        .to_string_lossy()
        .to_string();

    Ok(Category {
        sort_key: parsed.sort_key(),
        title: parsed.display_title,
        key: parsed.name,
        description,
        source_dir,
    })
}

fn scan_category(dir: &Path, category: &str) -> Result<Vec<Tutorial>, ScanError> {
    let mut files: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| !is_hidden(p))
        .filter(|p| {
            if p.is_dir() {
                tracing::warn!(path = %p.display(), "nested directories are ignored");
                return false;
            }
            p.extension()
                .map(|e| e.eq_ignore_ascii_case("md"))
                .unwrap_or(false)
        })
        .collect();
    sort_by_prefix(&mut files);

    files
        .iter()
        .map(|path| parse_tutorial(path, category))
        .collect()
}

fn parse_tutorial(path: &Path, category: &str) -> Result<Tutorial, ScanError> {
    let source = fs::read_to_string(path)?;
    let front_matter_err = |source| ScanError::FrontMatter {
        path: path.to_path_buf(),
        source,
    };
    let (front, body) = frontmatter::parse(&source).map_err(front_matter_err)?;
    let published_at = front.published_date().map_err(front_matter_err)?;

    let slug = match front.slug {
        Some(slug) => slug,
        None => parse_entry_name(&entry_stem(path)).name,
    };
    if !is_url_safe(&slug) {
        return Err(ScanError::InvalidSlug(path.to_path_buf(), slug));
    }

    Ok(Tutorial {
        id: front.id,
        title: front.title,
        description: front.description,
        content: body.to_string(),
        slug,
        category: category.to_string(),
        author: front.author,
        read_time: front.read_time,
        difficulty: front.difficulty,
        published_at,
    })
}

/// A route segment must be non-empty and free of separators and whitespace.
fn is_url_safe(segment: &str) -> bool {
    !segment.is_empty()
        && segment
            .chars()
            .all(|c| c.is_alphanumeric() || matches!(c, '-' | '_' | '.'))
        && segment != "."
        && segment != ".."
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;
    use crate::types::Difficulty;
    use tempfile::TempDir;

    fn write_tutorial(dir: &Path, file: &str, id: &str, difficulty: &str) {
        fs::create_dir_all(dir).unwrap();
        fs::write(dir.join(file), tutorial_source(id, difficulty, None)).unwrap();
    }

    #[test]
    fn scan_fixtures_finds_categories_in_order() {
        let tmp = setup_fixtures();
        let manifest = scan(tmp.path()).unwrap();

        assert_eq!(category_keys(&manifest), vec!["gcp", "aws"]);
        assert_eq!(manifest.config.site.title, "Cloud Tutorials");
    }

    #[test]
    fn scan_fixtures_tutorial_order_follows_prefix() {
        let tmp = setup_fixtures();
        let manifest = scan(tmp.path()).unwrap();

        assert_eq!(
            tutorial_slugs(&manifest, "gcp"),
            vec!["cloud-run-basics", "iam-deep-dive", "cloud-storage"]
        );
        assert_eq!(tutorial_slugs(&manifest, "aws"), vec!["lambda", "vpc-design"]);
    }

    #[test]
    fn scan_fixtures_reads_front_matter() {
        let tmp = setup_fixtures();
        let manifest = scan(tmp.path()).unwrap();

        let run = find_tutorial(&manifest, "cloud-run-basics");
        assert_eq!(run.category, "gcp");
        assert_eq!(run.difficulty, Difficulty::Beginner);
        assert_eq!(run.title, "Cloud Run Basics");
        assert!(run.content.contains("gcloud run deploy"));
        assert!(!run.content.contains("+++"));
    }

    #[test]
    fn front_matter_slug_overrides_filename() {
        let tmp = setup_fixtures();
        let manifest = scan(tmp.path()).unwrap();
        // 010-lambda-intro.md declares slug = "lambda"
        let lambda = find_tutorial(&manifest, "lambda");
        assert_eq!(lambda.category, "aws");
    }

    #[test]
    fn category_description_from_info_txt() {
        let tmp = setup_fixtures();
        let manifest = scan(tmp.path()).unwrap();

        let gcp = find_category(&manifest, "gcp");
        assert!(gcp.description.as_deref().unwrap().contains("Google Cloud"));
        let aws = find_category(&manifest, "aws");
        assert!(aws.description.is_none());
    }

    #[test]
    fn assets_dir_is_not_a_category() {
        let tmp = setup_fixtures();
        assert!(tmp.path().join(ASSETS_DIR).is_dir());
        let manifest = scan(tmp.path()).unwrap();
        assert!(!category_keys(&manifest).contains(&"assets"));
    }

    #[test]
    fn unnumbered_category_sorts_last() {
        let tmp = TempDir::new().unwrap();
        write_tutorial(&tmp.path().join("drafts"), "a.md", "d1", "Beginner");
        write_tutorial(&tmp.path().join("020-aws"), "a2.md", "a1", "Beginner");
        write_tutorial(&tmp.path().join("010-gcp"), "a3.md", "g1", "Beginner");

        let manifest = scan(tmp.path()).unwrap();
        assert_eq!(category_keys(&manifest), vec!["gcp", "aws", "drafts"]);
        assert_eq!(find_category(&manifest, "drafts").sort_key, u32::MAX);
    }

    #[test]
    fn non_markdown_files_ignored() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("010-gcp");
        write_tutorial(&dir, "010-run.md", "g1", "Beginner");
        fs::write(dir.join("notes.txt"), "scratch").unwrap();
        fs::write(dir.join(".hidden.md"), "not front matter").unwrap();

        let manifest = scan(tmp.path()).unwrap();
        assert_eq!(manifest.tutorials.len(), 1);
    }

    #[test]
    fn empty_category_is_kept() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("030-azure")).unwrap();
        write_tutorial(&tmp.path().join("010-gcp"), "010-run.md", "g1", "Beginner");

        let manifest = scan(tmp.path()).unwrap();
        assert_eq!(category_keys(&manifest), vec!["gcp", "azure"]);
        assert_eq!(manifest.tutorials_in("azure").count(), 0);
    }

    #[test]
    fn missing_front_matter_is_error() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("010-gcp");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("010-run.md"), "# No metadata\n").unwrap();

        let result = scan(tmp.path());
        assert!(matches!(
            result,
            Err(ScanError::FrontMatter {
                source: FrontMatterError::Missing,
                ..
            })
        ));
    }

    #[test]
    fn same_slug_in_two_categories_is_kept() {
        let tmp = TempDir::new().unwrap();
        write_tutorial(&tmp.path().join("010-gcp"), "010-intro.md", "g1", "Beginner");
        write_tutorial(&tmp.path().join("020-aws"), "010-intro.md", "a1", "Beginner");

        let manifest = scan(tmp.path()).unwrap();
        assert_eq!(tutorial_slugs(&manifest, "gcp"), vec!["intro"]);
        assert_eq!(tutorial_slugs(&manifest, "aws"), vec!["intro"]);
    }

    #[test]
    fn duplicate_slug_within_category_is_error() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("010-gcp");
        write_tutorial(&dir, "010-intro.md", "g1", "Beginner");
        write_tutorial(&dir, "020-intro.md", "g2", "Beginner");

        let result = scan(tmp.path());
        assert!(matches!(
            result,
            Err(ScanError::Store(StoreError::DuplicateSlug { category, .. })) if category == "gcp"
        ));
    }

    #[test]
    fn slug_with_whitespace_is_error() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("010-gcp");
        fs::create_dir_all(&dir).unwrap();
        fs::write(
            dir.join("010-run.md"),
            tutorial_source("g1", "Beginner", Some("bad slug")),
        )
        .unwrap();

        assert!(matches!(
            scan(tmp.path()),
            Err(ScanError::InvalidSlug(_, s)) if s == "bad slug"
        ));
    }

    #[test]
    fn number_only_category_is_error() {
        let tmp = TempDir::new().unwrap();
        write_tutorial(&tmp.path().join("010"), "010-run.md", "g1", "Beginner");
        assert!(matches!(
            scan(tmp.path()),
            Err(ScanError::InvalidCategory(_))
        ));
    }

    #[test]
    fn url_safe_segments() {
        assert!(is_url_safe("cloud-run_v2.1"));
        assert!(!is_url_safe(""));
        assert!(!is_url_safe(".."));
        assert!(!is_url_safe("a/b"));
        assert!(!is_url_safe("a b"));
        assert!(!is_url_safe("a?b"));
    }

    #[test]
    fn manifest_round_trips_through_json() {
        let tmp = setup_fixtures();
        let manifest = scan(tmp.path()).unwrap();
        let json = serde_json::to_string(&manifest).unwrap();
        let back: Manifest = serde_json::from_str(&json).unwrap();
        assert_eq!(back.tutorials, manifest.tutorials);
        assert_eq!(back.categories, manifest.categories);
    }
}
