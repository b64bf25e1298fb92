//! Site configuration module.
//!
//! Handles loading, validating, and merging `config.toml`. Stock defaults are
//! serialized to a TOML table and the user's file is merged on top, so a
//! config file only needs the keys it wants to change.
//!
//! ## Config File Location
//!
//! ```text
//! content/
//! ├── config.toml              # Site config (optional)
//! ├── 010-gcp/
//! └── 020-aws/
//! ```
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [site]
//! title = "Tutorials"
//! tagline = ""
//!
//! [routing]
//! match_category = true     # stored category must equal the path segment
//!
//! [sidebar]
//! order = "first-seen"      # or "difficulty"
//!
//! [build]
//! emit_page_models = false  # write page.json beside each tutorial page
//!
//! [theme]
//! sidebar_width = "16rem"
//! content_width = "46rem"
//!
//! [colors.light]
//! background = "#ffffff"
//! text = "#1a1a1a"
//! text_muted = "#666666"
//! border = "#e0e0e0"
//! link = "#1f5fbf"
//! accent = "#e8f0fc"       # Active sidebar entry
//!
//! [colors.dark]
//! background = "#101214"
//! text = "#e8e8e8"
//! text_muted = "#9a9a9a"
//! border = "#2c2f33"
//! link = "#7fb0ff"
//! accent = "#1d2a3d"
//!
//! [processing]
//! max_processes = 4         # Max parallel render workers (omit for auto)
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::sidebar::SidebarOrder;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("TOML serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Site identity shown in the header and page titles.
    pub site: SiteSection,
    /// How request paths are matched against stored tutorials.
    pub routing: RoutingConfig,
    /// Sidebar grouping behaviour.
    pub sidebar: SidebarConfig,
    /// Extra build artifacts.
    pub build: BuildConfig,
    /// Layout dimensions.
    pub theme: ThemeConfig,
    /// Color schemes for light and dark modes.
    pub colors: ColorConfig,
    /// Parallel rendering settings.
    pub processing: ProcessingConfig,
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.site.title.trim().is_empty() {
            return Err(ConfigError::Validation(
                "site.title must not be empty".into(),
            ));
        }
        if self.processing.max_processes == Some(0) {
            return Err(ConfigError::Validation(
                "processing.max_processes must be at least 1".into(),
            ));
        }
        for (key, value) in [
            ("theme.sidebar_width", &self.theme.sidebar_width),
            ("theme.content_width", &self.theme.content_width),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::Validation(format!(
                    "{key} must not be empty"
                )));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteSection {
    pub title: String,
    /// Subtitle on the home page. Empty hides it.
    pub tagline: String,
}

impl Default for SiteSection {
    fn default() -> Self {
        Self {
            title: "Tutorials".to_string(),
            tagline: String::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RoutingConfig {
    /// Require the stored category to equal the requested path segment.
    /// When false, lookup is by slug alone.
    pub match_category: bool,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            match_category: true,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SidebarConfig {
    pub order: SidebarOrder,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BuildConfig {
    /// Write the render model as `page.json` next to each tutorial page.
    pub emit_page_models: bool,
}

/// Parallel rendering settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Maximum number of parallel render workers.
    /// When absent, defaults to the number of CPU cores.
    /// Values larger than the core count are clamped down.
    pub max_processes: Option<usize>,
}

/// Resolve the effective thread count from config.
///
/// - `None` → use all available cores
/// - `Some(n)` → use `min(n, cores)` (user can constrain down, not up)
pub fn effective_threads(config: &ProcessingConfig) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    config.max_processes.map(|n| n.min(cores)).unwrap_or(cores)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ThemeConfig {
    /// Width of the sidebar column on wide screens (CSS value).
    pub sidebar_width: String,
    /// Maximum width of the article column (CSS value).
    pub content_width: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            sidebar_width: "16rem".to_string(),
            content_width: "46rem".to_string(),
        }
    }
}

/// Color configuration for light and dark modes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorConfig {
    pub light: ColorScheme,
    pub dark: ColorScheme,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            light: ColorScheme::default_light(),
            dark: ColorScheme::default_dark(),
        }
    }
}

/// Individual color scheme (light or dark).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorScheme {
    pub background: String,
    pub text: String,
    /// Secondary text: metadata line, sidebar headings, counts.
    pub text_muted: String,
    pub border: String,
    pub link: String,
    /// Background of the active sidebar entry.
    pub accent: String,
}

impl ColorScheme {
    pub fn default_light() -> Self {
        Self {
            background: "#ffffff".to_string(),
            text: "#1a1a1a".to_string(),
            text_muted: "#666666".to_string(),
            border: "#e0e0e0".to_string(),
            link: "#1f5fbf".to_string(),
            accent: "#e8f0fc".to_string(),
        }
    }

    pub fn default_dark() -> Self {
        Self {
            background: "#101214".to_string(),
            text: "#e8e8e8".to_string(),
            text_muted: "#9a9a9a".to_string(),
            border: "#2c2f33".to_string(),
            link: "#7fb0ff".to_string(),
            accent: "#1d2a3d".to_string(),
        }
    }
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self::default_light()
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Stock defaults as a `toml::Value::Table`, the base layer for merging.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    Ok(toml::Value::try_from(SiteConfig::default())?)
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `config.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` when the file does not exist.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = path.join("config.toml");
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<SiteConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `config.toml` in the content root.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    let base = stock_defaults_value()?;
    let overlay = load_raw_config(root)?;
    resolve_config(base, overlay)
}

/// Fully-commented stock `config.toml`, printed by `gen-config`.
pub fn stock_config_toml() -> &'static str {
    r##"# Tutorial Site Configuration
# ===========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys cause an error.

# ---------------------------------------------------------------------------
# Site identity
# ---------------------------------------------------------------------------
[site]
title = "Tutorials"
# Subtitle shown on the home page. Empty hides it.
tagline = ""

# ---------------------------------------------------------------------------
# Routing
# ---------------------------------------------------------------------------
[routing]
# Require the tutorial's category to equal the {category} path segment.
# Set to false to look tutorials up by slug alone.
match_category = true

# ---------------------------------------------------------------------------
# Sidebar
# ---------------------------------------------------------------------------
[sidebar]
# "first-seen": difficulty groups appear in the order they first occur in
#               the category's content.
# "difficulty": Beginner, Intermediate, Advanced.
order = "first-seen"

# ---------------------------------------------------------------------------
# Build artifacts
# ---------------------------------------------------------------------------
[build]
# Write each page's render model as page.json next to its index.html.
emit_page_models = false

# ---------------------------------------------------------------------------
# Layout
# ---------------------------------------------------------------------------
[theme]
sidebar_width = "16rem"
content_width = "46rem"

# ---------------------------------------------------------------------------
# Colors - Light mode (prefers-color-scheme: light)
# ---------------------------------------------------------------------------
[colors.light]
background = "#ffffff"
text = "#1a1a1a"
text_muted = "#666666"    # Metadata, sidebar headings
border = "#e0e0e0"
link = "#1f5fbf"
accent = "#e8f0fc"        # Active sidebar entry

# ---------------------------------------------------------------------------
# Colors - Dark mode (prefers-color-scheme: dark)
# ---------------------------------------------------------------------------
[colors.dark]
background = "#101214"
text = "#e8e8e8"
text_muted = "#9a9a9a"
border = "#2c2f33"
link = "#7fb0ff"
accent = "#1d2a3d"

# ---------------------------------------------------------------------------
# Processing
# ---------------------------------------------------------------------------
[processing]
# Maximum parallel render workers.
# Omit or comment out to auto-detect (= number of CPU cores).
# max_processes = 4
"##
}

/// CSS custom properties for both color schemes.
pub fn generate_color_css(colors: &ColorConfig) -> String {
    let vars = |s: &ColorScheme, pad: &str| {
        format!(
            "{pad}--color-bg: {};\n{pad}--color-text: {};\n{pad}--color-text-muted: {};\n\
             {pad}--color-border: {};\n{pad}--color-link: {};\n{pad}--color-accent: {};\n",
            s.background, s.text, s.text_muted, s.border, s.link, s.accent,
        )
    };
    format!(
        ":root {{\n{}}}\n\n@media (prefers-color-scheme: dark) {{\n    :root {{\n{}    }}\n}}",
        vars(&colors.light, "    "),
        vars(&colors.dark, "        "),
    )
}

/// CSS custom properties for layout dimensions.
pub fn generate_theme_css(theme: &ThemeConfig) -> String {
    format!(
        ":root {{\n    --sidebar-width: {};\n    --content-width: {};\n}}",
        theme.sidebar_width, theme.content_width,
    )
}
