//! HTML site generation.
//!
//! Stage 2 of the build pipeline. Loads the scan manifest into a
//! [`ContentStore`], enumerates routes, assembles one page model per route and
//! renders it with maud.
//!
//! ## Generated Pages
//!
//! - **Home** (`/index.html`): category cards with tutorial counts
//! - **Category** (`/tutorials/{category}/index.html`): tutorials grouped by difficulty
//! - **Tutorial** (`/tutorials/{category}/{slug}/index.html`): article + sidebar
//! - **Not found** (`/404.html`): served for every path outside the route list
//!
//! Only enumerated routes get a page; there is no on-demand fallback. Each
//! run first removes the previous `tutorials/` tree and stylesheets, so a
//! deleted tutorial's page does not survive a rebuild. Assets that would land
//! on generated paths are rejected.
//!
//! ## Output Structure
//!
//! ```text
//! dist/
//! ├── index.html
//! ├── 404.html
//! ├── routes.json                  # [{ "category", "slug" }, ...]
//! ├── style.3f9a1c0b7e.css         # Fingerprinted stylesheet
//! ├── logo.svg                     # Copied from content/assets/
//! └── tutorials/
//!     └── gcp/
//!         ├── index.html
//!         └── cloud-run-basics/
//!             ├── index.html
//!             └── page.json        # Only with build.emit_page_models
//! ```
//!
//! ## Sidebar Toggle
//!
//! On narrow screens the sidebar is hidden behind a checkbox toggle
//! (`#sidebar-toggle`) styled purely with CSS. The open/closed state lives in
//! the browser only and is never persisted.
//!
//! ## Parallelism
//!
//! Routes are independent and the store is read-only, so tutorial pages are
//! rendered with rayon's `par_iter`.

use crate::config::{self, SiteConfig};
use crate::page::{PageAssembler, PageModel, PageOutcome};
use crate::routes::{self, ROUTE_PREFIX, RouteError, RouteKey};
use crate::scan::{ASSETS_DIR, Manifest};
use crate::sidebar::{GroupTutorials, SidebarGrouper, SidebarGroups};
use crate::store::{ContentRepository, ContentStore, StoreError};
use crate::types::{Category, Difficulty, Tutorial};
use maud::{DOCTYPE, Markup, PreEscaped, html};
use pulldown_cmark::{Options, Parser, html as md_html};
use rayon::prelude::*;
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Asset copy failed: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("Content error: {0}")]
    Store(#[from] StoreError),
    #[error("Route error: {0}")]
    Route(#[from] RouteError),
    #[error("Enumerated route does not resolve: {0}")]
    Unresolved(RouteKey),
    #[error("Asset would overwrite generated output: {0}")]
    ReservedAsset(PathBuf),
}

const CSS_STATIC: &str = include_str!("../static/style.css");

/// Files the generator writes at the output root.
const GENERATED_FILES: &[&str] = &["index.html", "404.html", "routes.json"];

/// A written tutorial page.
#[derive(Debug, Clone)]
pub struct GeneratedPage {
    pub route: RouteKey,
    pub title: String,
    pub difficulty: Difficulty,
}

/// Summary of a generate run, used for CLI output.
#[derive(Debug)]
pub struct GenerateReport {
    pub categories: Vec<Category>,
    pub pages: Vec<GeneratedPage>,
    pub stylesheet: String,
    pub assets_copied: usize,
    pub page_models: bool,
}

/// Read a scan manifest from disk and generate the site.
pub fn generate(
    manifest_path: &Path,
    source_root: &Path,
    output_dir: &Path,
) -> Result<GenerateReport, GenerateError> {
    let manifest_content = fs::read_to_string(manifest_path)?;
    let manifest: Manifest = serde_json::from_str(&manifest_content)?;
    generate_site(manifest, source_root, output_dir)
}

pub fn generate_site(
    manifest: Manifest,
    source_root: &Path,
    output_dir: &Path,
) -> Result<GenerateReport, GenerateError> {
    let Manifest {
        categories,
        tutorials,
        config,
    } = manifest;

    let store = ContentStore::load(tutorials)?;
    let routes = routes::enumerate_routes(&store, &categories)?;
    let assets = collect_assets(source_root)?;

    fs::create_dir_all(output_dir)?;
    clear_generated(output_dir)?;
    let stylesheet = write_stylesheet(&config, output_dir)?;
    let assets_copied = copy_assets(&assets, output_dir)?;

    let ctx = RenderContext {
        config: &config,
        stylesheet: &stylesheet,
        categories: &categories,
    };
    let grouper = SidebarGrouper::new(config.sidebar.order);
    let assembler = PageAssembler::new(&store, config.routing.match_category, grouper);

    let pages = routes
        .par_iter()
        .map(|route| write_tutorial_page(&assembler, route, &ctx, output_dir))
        .collect::<Result<Vec<_>, _>>()?;

    for category in &categories {
        let groups = grouper.group(store.summaries_in(&category.key), None);
        let html = render_category_page(category, &groups, &ctx);
        let dir = output_dir.join(ROUTE_PREFIX).join(&category.key);
        fs::create_dir_all(&dir)?;
        fs::write(dir.join("index.html"), html.into_string())?;
    }

    fs::write(
        output_dir.join("index.html"),
        render_index(&store, &ctx).into_string(),
    )?;
    fs::write(
        output_dir.join("404.html"),
        render_not_found(&ctx).into_string(),
    )?;
    fs::write(
        output_dir.join("routes.json"),
        serde_json::to_string_pretty(&routes)?,
    )?;

    tracing::info!(pages = pages.len(), output = %output_dir.display(), "site generated");

    Ok(GenerateReport {
        categories,
        pages,
        stylesheet,
        assets_copied,
        page_models: config.build.emit_page_models,
    })
}

fn write_tutorial_page<R, G>(
    assembler: &PageAssembler<'_, R, G>,
    route: &RouteKey,
    ctx: &RenderContext<'_>,
    output_dir: &Path,
) -> Result<GeneratedPage, GenerateError>
where
    R: ContentRepository,
    G: GroupTutorials,
{
    let model = match assembler.assemble_route(route) {
        PageOutcome::Found(model) => model,
        PageOutcome::NotFound => return Err(GenerateError::Unresolved(route.clone())),
    };

    let dir = output_dir
        .join(ROUTE_PREFIX)
        .join(&route.category)
        .join(&route.slug);
    fs::create_dir_all(&dir)?;
    fs::write(
        dir.join("index.html"),
        render_tutorial_page(&model, ctx).into_string(),
    )?;
    if ctx.config.build.emit_page_models {
        fs::write(dir.join("page.json"), serde_json::to_string_pretty(&model)?)?;
    }
    tracing::debug!(route = %route, "rendered");

    Ok(GeneratedPage {
        route: route.clone(),
        title: model.tutorial.title.clone(),
        difficulty: model.tutorial.difficulty,
    })
}

/// Write the stylesheet under a content-hashed name and return its file name.
fn write_stylesheet(config: &SiteConfig, output_dir: &Path) -> Result<String, GenerateError> {
    let css = format!(
        "{}\n\n{}\n\n{}",
        config::generate_color_css(&config.colors),
        config::generate_theme_css(&config.theme),
        CSS_STATIC
    );
    let name = stylesheet_name(&css);
    fs::write(output_dir.join(&name), css)?;
    Ok(name)
}

fn stylesheet_name(css: &str) -> String {
    let digest = format!("{:x}", Sha256::digest(css.as_bytes()));
    format!("style.{}.css", &digest[..10])
}

fn is_stylesheet_name(name: &str) -> bool {
    name.starts_with("style.") && name.ends_with(".css")
}

/// Remove output from a previous run: the whole route tree and old
/// stylesheets. Pages for deleted tutorials must not outlive their route.
fn clear_generated(output_dir: &Path) -> Result<(), GenerateError> {
    let routes_dir = output_dir.join(ROUTE_PREFIX);
    if routes_dir.is_dir() {
        fs::remove_dir_all(&routes_dir)?;
    }
    for entry in fs::read_dir(output_dir)? {
        let entry = entry?;
        let name = entry.file_name();
        if entry.file_type()?.is_file() && is_stylesheet_name(&name.to_string_lossy()) {
            fs::remove_file(entry.path())?;
        }
    }
    Ok(())
}

/// True when an asset at `rel` would land on generator-owned output.
fn is_reserved_asset(rel: &Path) -> bool {
    let mut components = rel.components();
    let Some(first) = components.next() else {
        return false;
    };
    let first = first.as_os_str().to_string_lossy();
    if first == ROUTE_PREFIX {
        return true;
    }
    components.next().is_none()
        && (GENERATED_FILES.iter().any(|f| first == *f) || is_stylesheet_name(&first))
}

/// An entry under `content/assets/`, relative to that directory.
struct Asset {
    source: PathBuf,
    rel: PathBuf,
    is_dir: bool,
}

/// Walk `content/assets/`, rejecting anything that would shadow generated
/// output. Nothing is written here.
fn collect_assets(source_root: &Path) -> Result<Vec<Asset>, GenerateError> {
    let assets_dir = source_root.join(ASSETS_DIR);
    if !assets_dir.is_dir() {
        return Ok(Vec::new());
    }
    let mut assets = Vec::new();
    for entry in WalkDir::new(&assets_dir).min_depth(1) {
        let entry = entry?;
        let Ok(rel) = entry.path().strip_prefix(&assets_dir) else {
            continue;
        };
        if is_reserved_asset(rel) {
            return Err(GenerateError::ReservedAsset(entry.path().to_path_buf()));
        }
        assets.push(Asset {
            source: entry.path().to_path_buf(),
            rel: rel.to_path_buf(),
            is_dir: entry.file_type().is_dir(),
        });
    }
    Ok(assets)
}

/// Copy collected assets into the output root, preserving structure.
fn copy_assets(assets: &[Asset], output_dir: &Path) -> Result<usize, GenerateError> {
    let mut copied = 0;
    for asset in assets {
        let dst = output_dir.join(&asset.rel);
        if asset.is_dir {
            fs::create_dir_all(&dst)?;
        } else {
            if let Some(parent) = dst.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(&asset.source, &dst)?;
            copied += 1;
        }
    }
    Ok(copied)
}

// ============================================================================
// HTML Components
// ============================================================================

/// Shared inputs for every page renderer.
struct RenderContext<'a> {
    config: &'a SiteConfig,
    stylesheet: &'a str,
    categories: &'a [Category],
}

impl RenderContext<'_> {
    fn category_title<'c>(&'c self, key: &'c str) -> &'c str {
        self.categories
            .iter()
            .find(|c| c.key == key)
            .map(|c| c.title.as_str())
            .unwrap_or(key)
    }

    fn page_title(&self, title: &str) -> String {
        format!("{} · {}", title, self.config.site.title)
    }
}

fn category_href(key: &str) -> String {
    format!("/{}/{}/", ROUTE_PREFIX, key)
}

fn tutorial_href(category: &str, slug: &str) -> String {
    format!("{}/", RouteKey::new(category, slug).path())
}

fn difficulty_class(difficulty: Difficulty) -> String {
    format!("difficulty-{}", difficulty.as_str().to_lowercase())
}

/// Renders the base HTML document structure
fn base_document(title: &str, stylesheet: &str, body_class: Option<&str>, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                link rel="stylesheet" href={ "/" (stylesheet) };
            }
            body class=[body_class] {
                (content)
            }
        }
    }
}

/// Renders the site header with breadcrumb trail
fn site_header(site_title: &str, breadcrumb: Markup) -> Markup {
    html! {
        header.site-header {
            a.site-title href="/" { (site_title) }
            nav.breadcrumb {
                (breadcrumb)
            }
        }
    }
}

fn difficulty_badge(difficulty: Difficulty) -> Markup {
    html! {
        span class={ "badge " (difficulty_class(difficulty)) } { (difficulty.as_str()) }
    }
}

/// Renders the difficulty-grouped sidebar with its mobile toggle.
pub fn render_sidebar(groups: &SidebarGroups, category_title: &str) -> Markup {
    html! {
        input.sidebar-toggle type="checkbox" id="sidebar-toggle";
        label.sidebar-open for="sidebar-toggle" { "Contents" }
        aside.sidebar {
            label.sidebar-close for="sidebar-toggle" { "×" }
            p.sidebar-heading { (category_title) }
            nav {
                @for group in groups {
                    section class={ "sidebar-group " (difficulty_class(group.difficulty)) } {
                        h2 {
                            (group.difficulty.as_str())
                            " "
                            span.count { (group.count()) }
                        }
                        ul {
                            @for entry in &group.entries {
                                li class=[entry.is_active.then_some("active")] {
                                    a href=(tutorial_href(&entry.summary.category, &entry.summary.slug))
                                        aria-current=[entry.is_active.then_some("page")] {
                                        (entry.summary.title)
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

fn markdown_to_html(source: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    let parser = Parser::new_ext(source, options);
    let mut out = String::new();
    md_html::push_html(&mut out, parser);
    out
}

fn tutorial_meta(tutorial: &Tutorial) -> Markup {
    let date = tutorial.published_at.format("%Y-%m-%d").to_string();
    html! {
        p.meta {
            span.author { (tutorial.author) }
            " · "
            span.read-time { (tutorial.read_time) }
            " · "
            time datetime=(date) { (date) }
            " "
            (difficulty_badge(tutorial.difficulty))
        }
    }
}

// ============================================================================
// Page Renderers
// ============================================================================

fn render_tutorial_page(model: &PageModel<'_>, ctx: &RenderContext<'_>) -> Markup {
    let tutorial = model.tutorial;
    let category_title = ctx.category_title(&tutorial.category);

    let breadcrumb = html! {
        a href=(category_href(&tutorial.category)) { (category_title) }
        " › "
        (tutorial.title)
    };

    let content = html! {
        (site_header(&ctx.config.site.title, breadcrumb))
        div.layout {
            (render_sidebar(&model.sidebar_groups, category_title))
            main.tutorial-page {
                article {
                    header.tutorial-header {
                        h1 { (tutorial.title) }
                        @if !tutorial.description.is_empty() {
                            p.description { (tutorial.description) }
                        }
                        (tutorial_meta(tutorial))
                    }
                    div.tutorial-content {
                        (PreEscaped(markdown_to_html(&tutorial.content)))
                    }
                }
            }
        }
    };

    base_document(
        &ctx.page_title(&tutorial.title),
        ctx.stylesheet,
        Some("tutorial-view"),
        content,
    )
}

fn render_category_page(
    category: &Category,
    groups: &SidebarGroups,
    ctx: &RenderContext<'_>,
) -> Markup {
    let breadcrumb = html! { (category.title) };

    let content = html! {
        (site_header(&ctx.config.site.title, breadcrumb))
        main.category-page {
            header.category-header {
                h1 { (category.title) }
                @if let Some(desc) = &category.description {
                    p.category-description { (desc) }
                }
            }
            @for group in groups {
                section class={ "tutorial-group " (difficulty_class(group.difficulty)) } {
                    h2 { (group.difficulty.as_str()) " " span.count { (group.count()) } }
                    ul.tutorial-list {
                        @for entry in &group.entries {
                            li {
                                a href=(tutorial_href(&entry.summary.category, &entry.summary.slug)) {
                                    (entry.summary.title)
                                }
                            }
                        }
                    }
                }
            }
        }
    };

    base_document(&ctx.page_title(&category.title), ctx.stylesheet, None, content)
}

fn render_index(store: &impl ContentRepository, ctx: &RenderContext<'_>) -> Markup {
    let site = &ctx.config.site;
    let breadcrumb = html! {};

    let content = html! {
        (site_header(&site.title, breadcrumb))
        main.index-page {
            h1 { (site.title) }
            @if !site.tagline.is_empty() {
                p.tagline { (site.tagline) }
            }
            div.category-grid {
                @for category in ctx.categories {
                    @let count = store.summaries_in(&category.key).len();
                    a.category-card href=(category_href(&category.key)) {
                        span.category-title { (category.title) }
                        span.count { (count) " tutorials" }
                        @if let Some(desc) = &category.description {
                            p { (desc) }
                        }
                    }
                }
            }
        }
    };

    base_document(&site.title, ctx.stylesheet, None, content)
}

/// Generic not-found page; unknown categories and unknown slugs look the same.
fn render_not_found(ctx: &RenderContext<'_>) -> Markup {
    let breadcrumb = html! { "Not found" };

    let content = html! {
        (site_header(&ctx.config.site.title, breadcrumb))
        main.not-found-page {
            h1 { "Page not found" }
            p { "The tutorial you are looking for does not exist." }
            ul {
                @for category in ctx.categories {
                    li { a href=(category_href(&category.key)) { (category.title) } }
                }
            }
        }
    };

    base_document(&ctx.page_title("Not found"), ctx.stylesheet, None, content)
}

// ============================================================================
// Tests
// ============================================================================
