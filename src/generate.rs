//! Page generation for each site section.
//!
//! Each generator walks its source directory, builds [`ContentItem`]s and
//! [`Category`]s, renders pages through [`render_page`], and returns the
//! pending files as a [`BuildOutput`] plus a [`Report`] for the console.
//! Nothing is written here; see [`BuildOutput::write_all`].
//!
//! ## Sections
//!
//! ```text
//! articles/                      ← required, else MissingRoot
//! ├── travel/
//! │   ├── kyoto.md               → travel/kyoto.html   (detail page)
//! │   └── cover.jpg              (optional category cover)
//! ├── travel.html                ← category index
//! └── misc/                      (missing → warning, listed with 0 pages)
//! articles.html                  ← top-level index
//!
//! images/<series>/*.jpg          → gallery-<series>.html, gallery.html
//! sutra_images/*.jpg             → sutras.html
//! banner/*.jpg                   → banner_list.js (missing folder → empty list)
//! ```
//!
//! ## Failure policy
//!
//! A missing section root (`articles/`, `images/`, `sutra_images/`) is fatal
//! for that generator, as is discovering zero categories when no fixed list
//! is configured. A missing category directory is only a warning: the
//! category is rendered empty and still appears on the overview.

use crate::artifacts::BuildOutput;
use crate::catalog;
use crate::config::{SeriesConfig, SiteConfig};
use crate::markdown;
use crate::metadata;
use crate::render::{NavSection, PageModel, PageStyle, SiteContext, render_page};
use crate::scan::{
    self, IMAGE_EXTENSIONS, MARKDOWN_EXTENSIONS, ScanError, ScanOptions, SortOrder, SourceFile,
};
use crate::types::{Category, ContentItem};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Scan error: {0}")]
    Scan(#[from] ScanError),
    #[error("Required directory not found: {}", .0.display())]
    MissingRoot(PathBuf),
    #[error("No categories found in {}", .0.display())]
    NoCategories(PathBuf),
}

/// Which generator produced a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Articles,
    Gallery,
    Sutras,
    Banner,
}

impl Section {
    pub fn label(self) -> &'static str {
        match self {
            Section::Articles => "Articles",
            Section::Gallery => "Gallery",
            Section::Sutras => "Sutras",
            Section::Banner => "Banner",
        }
    }
}

/// Per-category outcome, for the console summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryReport {
    pub name: String,
    /// Detail pages (articles) or images (galleries, banner).
    pub count: usize,
    /// Site-relative path of the category's listing page.
    pub page: Option<String>,
    /// Set when the source directory was absent.
    pub missing: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct Report {
    pub section: Section,
    pub categories: Vec<CategoryReport>,
    /// Site-relative path of the section's top-level output.
    pub index: String,
}

/// What a generator hands back: files to write and what to tell the user.
#[derive(Debug)]
pub struct Generated {
    pub output: BuildOutput,
    /// One per section run.
    pub reports: Vec<Report>,
}

/// Inputs shared by all generators.
#[derive(Debug, Clone)]
pub struct BuildContext<'a> {
    pub root: &'a Path,
    pub config: &'a SiteConfig,
    pub site: SiteContext,
}

impl<'a> BuildContext<'a> {
    pub fn new(root: &'a Path, config: &'a SiteConfig, year: i32) -> Self {
        Self {
            root,
            config,
            site: SiteContext {
                title: config.site_title.clone(),
                lang: config.lang.clone(),
                year,
            },
        }
    }

    fn page(&self, title: String, nav: NavSection, style: PageStyle, body: maud::Markup) -> String {
        render_page(
            &PageModel {
                title,
                nav,
                style,
                body,
            },
            &self.site,
        )
    }
}

/// Run every generator, merging their outputs.
pub fn generate_all(ctx: &BuildContext<'_>) -> Result<Generated, GenerateError> {
    let mut output = BuildOutput::new();
    let mut reports = Vec::new();
    for generated in [
        generate_articles(ctx)?,
        generate_gallery(ctx)?,
        generate_sutras(ctx)?,
        generate_banner(ctx)?,
    ] {
        output.extend(generated.output);
        reports.extend(generated.reports);
    }
    Ok(Generated { output, reports })
}

// ============================================================================
// Articles
// ============================================================================

pub fn generate_articles(ctx: &BuildContext<'_>) -> Result<Generated, GenerateError> {
    let cfg = &ctx.config.articles;
    let articles_dir = ctx.root.join(&cfg.dir);
    if !articles_dir.is_dir() {
        return Err(GenerateError::MissingRoot(articles_dir));
    }

    let keys = category_keys(&articles_dir, &cfg.categories, &ctx.config.reserved_dirs)?;
    let base_url = url_path(&cfg.dir);
    let index_href = url_path(&cfg.index);

    let mut output = BuildOutput::new();
    let mut categories = Vec::new();
    for key in &keys {
        let category = collect_articles(ctx, &articles_dir, &base_url, key)?;

        for item in &category.items {
            let content_html = markdown::to_html(item.body.as_deref().unwrap_or_default());
            let page = ctx.page(
                item.title.clone(),
                NavSection::Articles,
                PageStyle::Articles,
                catalog::article_detail(item, &content_html, &index_href),
            );
            output.insert(
                articles_dir.join(key).join(format!("{}.html", item.id)),
                page,
            );
        }

        let index_page = ctx.page(
            format!("{} 随笔", category.name),
            NavSection::Articles,
            PageStyle::Articles,
            catalog::category_index(&category, &index_href),
        );
        output.insert(articles_dir.join(format!("{key}.html")), index_page);
        categories.push(category);
    }

    let overview = ctx.page(
        "随笔".to_string(),
        NavSection::Articles,
        PageStyle::Articles,
        catalog::articles_overview(&categories),
    );
    output.insert(ctx.root.join(&cfg.index), overview);

    Ok(Generated {
        output,
        reports: vec![Report {
            section: Section::Articles,
            categories: categories
                .iter()
                .map(|c| category_report(c, &articles_dir))
                .collect(),
            index: cfg.index.clone(),
        }],
    })
}

fn collect_articles(
    ctx: &BuildContext<'_>,
    articles_dir: &Path,
    base_url: &str,
    key: &str,
) -> Result<Category, GenerateError> {
    let dir = articles_dir.join(key);
    let category_url = format!("{base_url}/{key}");
    let options = ScanOptions {
        extensions: MARKDOWN_EXTENSIONS,
        order: SortOrder::NewestFirst,
        exclude: &[],
    };

    let (files, missing) = match scan::scan_sources(&dir, &options)? {
        Some(files) => (files, false),
        None => {
            log::warn!("Category directory missing: {}", dir.display());
            (Vec::new(), true)
        }
    };

    let mut items = Vec::with_capacity(files.len());
    for file in &files {
        items.push(article_item(file, &category_url, ctx.config.excerpt_length)?);
    }

    Ok(Category {
        key: key.to_string(),
        name: capitalize(key),
        motto: None,
        href: format!("{category_url}.html"),
        cover: catalog::resolve_cover(&dir, &category_url, &items),
        items,
        missing,
    })
}

fn article_item(
    file: &SourceFile,
    category_url: &str,
    excerpt_length: usize,
) -> Result<ContentItem, GenerateError> {
    let text = String::from_utf8_lossy(&fs::read(&file.path)?).into_owned();
    // Body without the title heading, so neither the detail page nor the
    // card excerpt repeats the title.
    let body = metadata::strip_first_h1(&text);
    Ok(ContentItem {
        id: file.stem.clone(),
        title: metadata::extract_title(&text, &file.stem),
        date: metadata::format_date(file.modified),
        href: format!("{category_url}/{}.html", file.stem),
        excerpt: Some(metadata::excerpt(&body, excerpt_length)),
        image: metadata::first_image(&text).map(|src| resolve_url(category_url, &src)),
        body: Some(body),
    })
}

// ============================================================================
// Gallery
// ============================================================================

pub fn generate_gallery(ctx: &BuildContext<'_>) -> Result<Generated, GenerateError> {
    let cfg = &ctx.config.gallery;
    let images_dir = ctx.root.join(&cfg.dir);
    if !images_dir.is_dir() {
        return Err(GenerateError::MissingRoot(images_dir));
    }

    let series_list: Vec<SeriesConfig> = if cfg.series.is_empty() {
        category_keys(&images_dir, &[], &ctx.config.reserved_dirs)?
            .into_iter()
            .map(|folder| SeriesConfig {
                folder,
                name: None,
                motto: None,
            })
            .collect()
    } else {
        cfg.series.clone()
    };

    let base_url = url_path(&cfg.dir);
    let index_href = url_path(&cfg.index);
    let exclude = catalog::cover_file_names();

    let mut output = BuildOutput::new();
    let mut all_series = Vec::new();
    for series in &series_list {
        let dir = images_dir.join(&series.folder);
        let folder_url = format!("{base_url}/{}", series.folder);
        let page_name = series_page_name(&series.folder);

        let (items, missing) = collect_images(&dir, &folder_url, &exclude)?;
        let category = Category {
            key: series.folder.clone(),
            name: series
                .name
                .clone()
                .unwrap_or_else(|| series.folder.clone()),
            motto: series.motto.clone(),
            href: url_path(&page_name),
            cover: catalog::resolve_cover(&dir, &folder_url, &items),
            items,
            missing,
        };

        let page = ctx.page(
            format!("{} · 摄影作品", category.name),
            NavSection::Gallery,
            PageStyle::Gallery,
            catalog::series_page(&category, &index_href),
        );
        output.insert(ctx.root.join(&page_name), page);
        all_series.push(category);
    }

    let overview = ctx.page(
        "摄影作品".to_string(),
        NavSection::Gallery,
        PageStyle::Gallery,
        catalog::gallery_overview(&all_series),
    );
    output.insert(ctx.root.join(&cfg.index), overview);

    Ok(Generated {
        output,
        reports: vec![Report {
            section: Section::Gallery,
            categories: all_series
                .iter()
                .map(|c| category_report(c, &images_dir))
                .collect(),
            index: cfg.index.clone(),
        }],
    })
}

/// File name of a series page, written to the site root.
pub fn series_page_name(folder: &str) -> String {
    format!("gallery-{folder}.html")
}

/// Photos of one folder, by name. A missing folder logs a warning and
/// yields no items.
fn collect_images(
    dir: &Path,
    folder_url: &str,
    exclude: &[String],
) -> Result<(Vec<ContentItem>, bool), GenerateError> {
    let options = ScanOptions {
        extensions: IMAGE_EXTENSIONS,
        order: SortOrder::ByName,
        exclude,
    };
    let Some(files) = scan::scan_sources(dir, &options)? else {
        log::warn!("Image directory missing: {}", dir.display());
        return Ok((Vec::new(), true));
    };

    let items = files
        .iter()
        .map(|file| {
            let url = format!("{folder_url}/{}", file.file_name);
            ContentItem {
                id: file.stem.clone(),
                title: file.file_name.clone(),
                date: metadata::format_date(file.modified),
                href: url.clone(),
                excerpt: None,
                image: Some(url),
                body: None,
            }
        })
        .collect();
    Ok((items, false))
}

// ============================================================================
// Sutras
// ============================================================================

pub fn generate_sutras(ctx: &BuildContext<'_>) -> Result<Generated, GenerateError> {
    let cfg = &ctx.config.sutras;
    let dir = ctx.root.join(&cfg.dir);
    if !dir.is_dir() {
        return Err(GenerateError::MissingRoot(dir));
    }

    let (items, _) = collect_images(&dir, &url_path(&cfg.dir), &[])?;
    let sutras = Category {
        key: cfg.dir.clone(),
        name: cfg.title.clone(),
        motto: Some(cfg.description.clone()).filter(|d| !d.trim().is_empty()),
        href: url_path(&cfg.output),
        cover: None,
        items,
        missing: false,
    };

    let mut output = BuildOutput::new();
    output.insert(
        ctx.root.join(&cfg.output),
        ctx.page(
            cfg.title.clone(),
            NavSection::Sutras,
            PageStyle::Gallery,
            catalog::sutra_page(&sutras),
        ),
    );

    Ok(Generated {
        output,
        reports: vec![Report {
            section: Section::Sutras,
            categories: vec![category_report(&sutras, ctx.root)],
            index: cfg.output.clone(),
        }],
    })
}

// ============================================================================
// Banner
// ============================================================================

/// Write the banner image list as a script assigning a global array.
///
/// Unlike the page generators, a missing banner folder is not fatal: the
/// home page still needs a valid (empty) list to load.
pub fn generate_banner(ctx: &BuildContext<'_>) -> Result<Generated, GenerateError> {
    let cfg = &ctx.config.banner;
    let dir = ctx.root.join(&cfg.dir);
    let (items, missing) = collect_images(&dir, &url_path(&cfg.dir), &[])?;
    if !missing && items.is_empty() {
        log::warn!("{} exists but contains no supported images", dir.display());
    }

    let urls: Vec<&str> = items.iter().map(|i| i.href.as_str()).collect();
    let mut output = BuildOutput::new();
    output.insert(
        ctx.root.join(&cfg.output),
        banner_script(&cfg.variable, &urls),
    );

    Ok(Generated {
        output,
        reports: vec![Report {
            section: Section::Banner,
            categories: vec![CategoryReport {
                name: cfg.dir.clone(),
                count: urls.len(),
                page: None,
                missing: missing.then(|| dir.clone()),
            }],
            index: cfg.output.clone(),
        }],
    })
}

/// `window.<variable> = [...];` followed by a newline.
pub fn banner_script(variable: &str, urls: &[&str]) -> String {
    format!(
        "window.{variable} = {};\n",
        catalog::image_list_json(urls)
    )
}

// ============================================================================
// Helpers
// ============================================================================

/// Fixed category list, or the subdirectories of `dir` when none is given.
fn category_keys(
    dir: &Path,
    configured: &[String],
    reserved: &[String],
) -> Result<Vec<String>, GenerateError> {
    if !configured.is_empty() {
        return Ok(configured.to_vec());
    }
    let keys = scan::list_categories(dir, reserved)?;
    if keys.is_empty() {
        return Err(GenerateError::NoCategories(dir.to_path_buf()));
    }
    Ok(keys)
}

fn category_report(category: &Category, parent: &Path) -> CategoryReport {
    CategoryReport {
        name: category.name.clone(),
        count: category.count(),
        page: Some(category.href.trim_start_matches('/').to_string()),
        missing: category.missing.then(|| parent.join(&category.key)),
    }
}

/// Root-relative URL for a site-relative path: `articles` → `/articles`.
fn url_path(relative: &str) -> String {
    format!("/{}", relative.trim_matches('/'))
}

/// Resolve an image reference found in an article against its category URL.
fn resolve_url(category_url: &str, src: &str) -> String {
    if src.starts_with('/') || src.contains("://") || src.starts_with("data:") {
        src.to_string()
    } else {
        format!("{category_url}/{}", src.trim_start_matches("./"))
    }
}

fn capitalize(key: &str) -> String {
    let mut chars = key.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
