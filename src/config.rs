//! Site configuration module.
//!
//! Handles loading, validating, and merging `site.toml`. Stock defaults
//! describe the RedRocks site as it is laid out today; a `site.toml` in the
//! site root only needs the keys it wants to override.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! site_title = "RedRocks"
//! lang = "zh-CN"
//! excerpt_length = 140           # Max characters in catalog excerpts
//! reserved_dirs = ["assets"]     # Shared asset folders, never treated as categories
//!
//! [articles]
//! dir = "articles"
//! index = "articles.html"
//! categories = ["travel", "buddhism", "tap", "misc"]   # [] = discover subdirectories
//!
//! [gallery]
//! dir = "images"
//! index = "gallery.html"
//!
//! [[gallery.series]]
//! folder = "stillness"
//! name = "静观"
//! motto = "世界不要求回应，只要求被看见。"
//!
//! [sutras]
//! dir = "sutra_images"
//! output = "sutras.html"
//!
//! [banner]
//! dir = "banner"
//! output = "banner_list.js"
//! variable = "__RR_BANNERS__"
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// File name looked up in the site root when no explicit path is given.
pub const CONFIG_FILE: &str = "site.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("TOML serialize error: {0}")]
    TomlSer(#[from] toml::ser::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `site.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Site name shown in page titles and the footer.
    pub site_title: String,
    /// Value of the `<html lang>` attribute.
    pub lang: String,
    /// Maximum length (in characters) of catalog excerpts, ellipsis included.
    pub excerpt_length: usize,
    /// Directory names never treated as categories or albums.
    pub reserved_dirs: Vec<String>,
    pub articles: ArticlesConfig,
    pub gallery: GalleryConfig,
    pub sutras: SutrasConfig,
    pub banner: BannerConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            site_title: "RedRocks".to_string(),
            lang: "zh-CN".to_string(),
            excerpt_length: 140,
            reserved_dirs: vec!["assets".to_string()],
            articles: ArticlesConfig::default(),
            gallery: GalleryConfig::default(),
            sutras: SutrasConfig::default(),
            banner: BannerConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.site_title.trim().is_empty() {
            return Err(ConfigError::Validation(
                "site_title must not be empty".into(),
            ));
        }
        // Room for at least one character plus the ellipsis.
        if self.excerpt_length < 2 {
            return Err(ConfigError::Validation(
                "excerpt_length must be at least 2".into(),
            ));
        }
        if let Some(bad) = self
            .gallery
            .series
            .iter()
            .find(|s| s.folder.trim().is_empty() || s.folder.contains(['/', '\\']))
        {
            return Err(ConfigError::Validation(format!(
                "gallery.series folder {:?} must be a plain directory name",
                bad.folder
            )));
        }
        if self
            .articles
            .categories
            .iter()
            .any(|c| c.trim().is_empty() || c.contains(['/', '\\']))
        {
            return Err(ConfigError::Validation(
                "articles.categories entries must be plain directory names".into(),
            ));
        }
        Ok(())
    }
}

/// Markdown article generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ArticlesConfig {
    /// Directory (relative to the site root) holding one subdirectory per category.
    pub dir: String,
    /// Top-level index written to the site root.
    pub index: String,
    /// Fixed category list. Empty means "discover subdirectories".
    pub categories: Vec<String>,
}

impl Default for ArticlesConfig {
    fn default() -> Self {
        Self {
            dir: "articles".to_string(),
            index: "articles.html".to_string(),
            categories: ["travel", "buddhism", "tap", "misc"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

/// Photo series gallery settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GalleryConfig {
    /// Directory holding one subdirectory per series.
    pub dir: String,
    /// Overview page written to the site root.
    pub index: String,
    /// Fixed series list. Empty means "discover subdirectories".
    pub series: Vec<SeriesConfig>,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        let series = [
            ("stillness", "静观", "世界不要求回应，只要求被看见。"),
            ("walking", "行走", "身体在路上，心在当下。"),
            ("human", "人间", "世界不是风景，是众生。"),
            ("light", "微光", "光不是照亮世界，而是照见自己。"),
            (
                "bw",
                "黑白",
                "从三维世界到二维画面，从色彩缤纷到黑白灰，观察即抽象。",
            ),
        ]
        .into_iter()
        .map(|(folder, name, motto)| SeriesConfig {
            folder: folder.to_string(),
            name: Some(name.to_string()),
            motto: Some(motto.to_string()),
        })
        .collect();

        Self {
            dir: "images".to_string(),
            index: "gallery.html".to_string(),
            series,
        }
    }
}

/// One photo series: a folder under the gallery dir plus display text.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeriesConfig {
    pub folder: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub motto: Option<String>,
}

/// Hand-copied sutra gallery settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SutrasConfig {
    pub dir: String,
    pub output: String,
    pub title: String,
    pub description: String,
}

impl Default for SutrasConfig {
    fn default() -> Self {
        Self {
            dir: "sutra_images".to_string(),
            output: "sutras.html".to_string(),
            title: "佛经手书".to_string(),
            description: "居家的日子还是旅途中，每日黎明即起，沐手静书，在一笔一划间感受内心，忘却自我"
                .to_string(),
        }
    }
}

/// Home page banner list settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BannerConfig {
    pub dir: String,
    pub output: String,
    /// Global the generated script assigns the list to (`window.<variable>`).
    pub variable: String,
}

impl Default for BannerConfig {
    fn default() -> Self {
        Self {
            dir: "banner".to_string(),
            output: "banner_list.js".to_string(),
            variable: "__RR_BANNERS__".to_string(),
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    Ok(toml::Value::try_from(SiteConfig::default())?)
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values, arrays included, replace base values entirely.
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

/// Load a config file as a raw TOML value. `Ok(None)` if it doesn't exist.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Load `site.toml` from the site root, or from `explicit` when given.
///
/// Merges user values on top of stock defaults, rejects unknown keys,
/// and validates the result. A missing file means stock defaults; an
/// explicitly requested file that is missing is an error.
pub fn load_config(root: &Path, explicit: Option<&Path>) -> Result<SiteConfig, ConfigError> {
    let overlay = match explicit {
        Some(path) => Some(load_raw_config(path)?.ok_or_else(|| {
            ConfigError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("config file not found: {}", path.display()),
            ))
        })?),
        None => load_raw_config(&root.join(CONFIG_FILE))?,
    };

    let base = stock_defaults_value()?;
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Returns a fully-commented stock `site.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# RedRocks site configuration
# ===========================
# All settings are optional. Values shown below are the defaults.
# Unknown keys cause an error.

# Site name used in <title> and the footer.
site_title = "RedRocks"

# <html lang> attribute.
lang = "zh-CN"

# Maximum excerpt length on category pages, ellipsis included.
excerpt_length = 140

# Folders holding shared assets; never treated as categories or series.
reserved_dirs = ["assets"]

# ---------------------------------------------------------------------------
# Articles: articles/<category>/*.md -> detail pages + category indices
# ---------------------------------------------------------------------------
[articles]
dir = "articles"
index = "articles.html"
# Leave empty to use every subdirectory of `dir`.
categories = ["travel", "buddhism", "tap", "misc"]

# ---------------------------------------------------------------------------
# Gallery: images/<series>/* -> gallery.html + gallery-<series>.html
# ---------------------------------------------------------------------------
[gallery]
dir = "images"
index = "gallery.html"

# Remove every [[gallery.series]] block to use every subdirectory of `dir`.
[[gallery.series]]
folder = "stillness"
name = "静观"
motto = "世界不要求回应，只要求被看见。"

[[gallery.series]]
folder = "walking"
name = "行走"
motto = "身体在路上，心在当下。"

[[gallery.series]]
folder = "human"
name = "人间"
motto = "世界不是风景，是众生。"

[[gallery.series]]
folder = "light"
name = "微光"
motto = "光不是照亮世界，而是照见自己。"

[[gallery.series]]
folder = "bw"
name = "黑白"
motto = "从三维世界到二维画面，从色彩缤纷到黑白灰，观察即抽象。"

# ---------------------------------------------------------------------------
# Sutras: sutra_images/* -> sutras.html
# ---------------------------------------------------------------------------
[sutras]
dir = "sutra_images"
output = "sutras.html"
title = "佛经手书"
description = "居家的日子还是旅途中，每日黎明即起，沐手静书，在一笔一划间感受内心，忘却自我"

# ---------------------------------------------------------------------------
# Banner: banner/* -> banner_list.js (window.__RR_BANNERS__ = [...])
# ---------------------------------------------------------------------------
[banner]
dir = "banner"
output = "banner_list.js"
variable = "__RR_BANNERS__"
"##
}
