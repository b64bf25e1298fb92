//! CLI output formatting for the pipeline stages.
//!
//! Output is **information-centric**: every entity leads with its positional
//! index and title, with filesystem paths and routes shown as indented
//! context lines.
//!
//! # Output Format
//!
//! ## Scan
//!
//! ```text
//! Categories
//! 001 gcp (3 tutorials)
//!     Source: 010-gcp/
//!     001 Cloud Run Basics [Beginner]
//!         Route: /tutorials/gcp/cloud-run-basics
//!
//! Config
//!     config.toml
//!     assets/
//! ```
//!
//! ## Generate
//!
//! ```text
//! Home → index.html
//! 001 gcp → tutorials/gcp/index.html
//!     001 Cloud Run Basics [Beginner] → tutorials/gcp/cloud-run-basics/index.html
//! Not found → 404.html
//! Routes → routes.json
//! Stylesheet → style.3f9a1c0b7e.css
//!
//! Generated 2 categories, 5 tutorial pages
//! ```
//!
//! Each stage has a `format_*` function (returns `Vec<String>`) and a
//! `print_*` wrapper that writes to stdout. Format functions do no I/O.

use crate::generate::GenerateReport;
use crate::page::PageModel;
use crate::routes::RouteKey;
use crate::scan::{ASSETS_DIR, Manifest};
use crate::sidebar::SidebarGroups;
use crate::types::Difficulty;
use std::path::Path;

// ============================================================================
// Shared entity display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn plural(n: usize, word: &str) -> String {
    if n == 1 {
        format!("{} {}", n, word)
    } else {
        format!("{} {}s", n, word)
    }
}

/// ```text
/// 001 Google Cloud (3 tutorials)
/// ```
fn category_header(index: usize, title: &str, count: usize) -> String {
    format!("{} {} ({})", format_index(index), title, plural(count, "tutorial"))
}

/// ```text
/// 002 IAM Deep Dive [Advanced]
/// ```
fn tutorial_line(index: usize, title: &str, difficulty: Difficulty) -> String {
    format!("{} {} [{}]", format_index(index), title, difficulty)
}

/// Truncate text to `max` characters, appending `...` if truncated.
fn truncate_desc(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

// ============================================================================
// Stage 1: Scan output
// ============================================================================

/// Format scan stage output: categories with their tutorials, then config.
pub fn format_scan_output(manifest: &Manifest, source_root: &Path) -> Vec<String> {
    let mut lines = vec!["Categories".to_string()];

    for (i, category) in manifest.categories.iter().enumerate() {
        let tutorials: Vec<_> = manifest.tutorials_in(&category.key).collect();
        lines.push(category_header(i + 1, &category.title, tutorials.len()));
        lines.push(format!("    Source: {}/", category.source_dir));
        if let Some(desc) = &category.description {
            lines.push(format!("    Description: {}", truncate_desc(desc, 60)));
        }
        for (j, tutorial) in tutorials.iter().enumerate() {
            lines.push(format!(
                "    {}",
                tutorial_line(j + 1, &tutorial.title, tutorial.difficulty)
            ));
            lines.push(format!(
                "        Route: {}",
                RouteKey::new(&tutorial.category, &tutorial.slug).path()
            ));
        }
    }

    let has_config = source_root.join("config.toml").is_file();
    let has_assets = source_root.join(ASSETS_DIR).is_dir();
    if has_config || has_assets {
        lines.push(String::new());
        lines.push("Config".to_string());
        if has_config {
            lines.push("    config.toml".to_string());
        }
        if has_assets {
            lines.push(format!("    {}/", ASSETS_DIR));
        }
    }

    lines
}

pub fn print_scan_output(manifest: &Manifest, source_root: &Path) {
    for line in format_scan_output(manifest, source_root) {
        println!("{}", line);
    }
}

// ============================================================================
// Stage 2: Generate output
// ============================================================================

/// Format generate stage output: every written page, grouped by category.
pub fn format_generate_output(report: &GenerateReport) -> Vec<String> {
    let mut lines = vec!["Home → index.html".to_string()];

    for (i, category) in report.categories.iter().enumerate() {
        lines.push(format!(
            "{} {} → tutorials/{}/index.html",
            format_index(i + 1),
            category.title,
            category.key
        ));
        let pages = report
            .pages
            .iter()
            .filter(|p| p.route.category == category.key);
        for (j, page) in pages.enumerate() {
            lines.push(format!(
                "{}{} → {}",
                indent(1),
                tutorial_line(j + 1, &page.title, page.difficulty),
                page.route.output_file()
            ));
        }
    }

    lines.push("Not found → 404.html".to_string());
    lines.push("Routes → routes.json".to_string());
    lines.push(format!("Stylesheet → {}", report.stylesheet));
    if report.assets_copied > 0 {
        lines.push(format!("Assets → {} copied", plural(report.assets_copied, "file")));
    }
    if report.page_models {
        lines.push("Page models → page.json beside each tutorial".to_string());
    }

    lines.push(String::new());
    let categories = match report.categories.len() {
        1 => "1 category".to_string(),
        n => format!("{} categories", n),
    };
    lines.push(format!(
        "Generated {}, {}",
        categories,
        plural(report.pages.len(), "tutorial page")
    ));
    lines
}

pub fn print_generate_output(report: &GenerateReport) {
    for line in format_generate_output(report) {
        println!("{}", line);
    }
}

// ============================================================================
// Routes and resolution
// ============================================================================

/// One route path per line, followed by the total.
pub fn format_routes(routes: &[RouteKey]) -> Vec<String> {
    let mut lines: Vec<String> = routes.iter().map(RouteKey::path).collect();
    lines.push(String::new());
    lines.push(plural(routes.len(), "route"));
    lines
}

pub fn print_routes(routes: &[RouteKey]) {
    for line in format_routes(routes) {
        println!("{}", line);
    }
}

/// Sidebar outline with the active entry marked by `*`.
///
/// ```text
/// Beginner (2)
///     cloud-run-basics
///     cloud-storage
/// Advanced (1)
///   * iam-deep-dive
/// ```
pub fn format_sidebar(groups: &SidebarGroups) -> Vec<String> {
    let mut lines = Vec::new();
    for group in groups {
        lines.push(format!("{} ({})", group.difficulty, group.count()));
        for entry in &group.entries {
            let marker = if entry.is_active { "  * " } else { "    " };
            lines.push(format!("{}{}", marker, entry.summary.slug));
        }
    }
    lines
}

/// Human-readable view of a resolved page: heading line, then the sidebar.
pub fn format_page_outline(model: &PageModel<'_>) -> Vec<String> {
    let tutorial = model.tutorial;
    let mut lines = vec![format!(
        "{} [{}] → {}",
        tutorial.title,
        tutorial.difficulty,
        RouteKey::new(&tutorial.category, &tutorial.slug).path()
    )];
    lines.extend(format_sidebar(&model.sidebar_groups).into_iter().map(|l| indent(1) + &l));
    lines
}

pub fn print_page_outline(model: &PageModel<'_>) {
    for line in format_page_outline(model) {
        println!("{}", line);
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generate::GeneratedPage;
    use crate::scan::scan;
    use crate::sidebar::{GroupTutorials, SidebarGrouper};
    use crate::test_helpers::*;

    #[test]
    fn format_index_pads_to_three() {
        assert_eq!(format_index(1), "001");
        assert_eq!(format_index(42), "042");
        assert_eq!(format_index(1000), "1000");
    }

    #[test]
    fn indent_levels() {
        assert_eq!(indent(0), "");
        assert_eq!(indent(2), "        ");
    }

    #[test]
    fn truncate_desc_short_and_long() {
        assert_eq!(truncate_desc("short", 10), "short");
        assert_eq!(truncate_desc("exactly10!", 10), "exactly10!");
        assert_eq!(truncate_desc("a longer description", 8), "a longer...");
    }

    #[test]
    fn truncate_desc_respects_char_boundaries() {
        assert_eq!(truncate_desc("ééééé", 2), "éé...");
    }

    #[test]
    fn category_header_pluralizes() {
        assert_eq!(category_header(1, "GCP", 1), "001 GCP (1 tutorial)");
        assert_eq!(category_header(2, "AWS", 3), "002 AWS (3 tutorials)");
    }

    #[test]
    fn scan_output_lists_categories_and_tutorials() {
        let tmp = setup_fixtures();
        let manifest = scan(tmp.path()).unwrap();
        let lines = format_scan_output(&manifest, tmp.path());

        assert_eq!(lines[0], "Categories");
        assert_eq!(lines[1], "001 gcp (3 tutorials)");
        assert_eq!(lines[2], "    Source: 010-gcp/");
        assert!(lines.contains(&"    001 Cloud Run Basics [Beginner]".to_string()));
        assert!(lines.contains(&"        Route: /tutorials/aws/lambda".to_string()));
        assert!(lines.contains(&"    config.toml".to_string()));
        assert!(lines.contains(&"    assets/".to_string()));
    }

    #[test]
    fn generate_output_lists_pages_by_category() {
        let mut gcp = category("gcp");
        gcp.title = "Google Cloud".to_string();
        let report = GenerateReport {
            categories: vec![gcp],
            pages: vec![GeneratedPage {
                route: RouteKey::new("gcp", "run"),
                title: "Cloud Run".to_string(),
                difficulty: Difficulty::Beginner,
            }],
            stylesheet: "style.abc.css".to_string(),
            assets_copied: 0,
            page_models: false,
        };
        let lines = format_generate_output(&report);

        assert_eq!(lines[0], "Home → index.html");
        assert_eq!(lines[1], "001 Google Cloud → tutorials/gcp/index.html");
        assert_eq!(
            lines[2],
            "    001 Cloud Run [Beginner] → tutorials/gcp/run/index.html"
        );
        assert!(lines.contains(&"Stylesheet → style.abc.css".to_string()));
        assert!(!lines.iter().any(|l| l.starts_with("Assets")));
        assert_eq!(lines.last().unwrap(), "Generated 1 category, 1 tutorial page");
    }

    #[test]
    fn routes_listing_ends_with_total() {
        let lines = format_routes(&[RouteKey::new("gcp", "a"), RouteKey::new("aws", "b")]);
        assert_eq!(lines, vec!["/tutorials/gcp/a", "/tutorials/aws/b", "", "2 routes"]);
    }

    #[test]
    fn sidebar_outline_marks_active() {
        let summaries = vec![
            summary("gcp", "a", Difficulty::Beginner),
            summary("gcp", "b", Difficulty::Advanced),
        ];
        let groups = SidebarGrouper::default().group(summaries, Some("b"));
        assert_eq!(
            format_sidebar(&groups),
            vec!["Beginner (1)", "    a", "Advanced (1)", "  * b"]
        );
    }

    #[test]
    fn page_outline_leads_with_route() {
        let t = tutorial("gcp", "b", Difficulty::Advanced);
        let groups = SidebarGrouper::default().group(vec![t.summary()], Some("b"));
        let model = PageModel {
            tutorial: &t,
            sidebar_groups: groups,
        };
        assert_eq!(
            format_page_outline(&model),
            vec![
                "Tutorial b [Advanced] → /tutorials/gcp/b",
                "    Advanced (1)",
                "      * b",
            ]
        );
    }
}
