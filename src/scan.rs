//! Source file discovery.
//!
//! Every generator starts by listing one directory: Markdown articles in a
//! category folder, photos in a series folder, banner images. The rules are
//! shared and deliberately flat (no recursion):
//!
//! - only regular files whose extension is in the allowed set (ASCII
//!   case-insensitive) are returned
//! - names starting with `.` are skipped, as are reserved names (shared asset
//!   folders) and any names the caller excludes (album cover files), both
//!   compared ASCII case-insensitively
//! - ordering is chosen by the caller, see [`SortOrder`]
//!
//! A missing directory is not an error at this level: [`scan_sources`]
//! returns `Ok(None)` and the caller decides whether that is fatal (site
//! roots) or just a warning (single categories).

use std::cmp::Ordering;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Walk error: {0}")]
    Walk(#[from] walkdir::Error),
}

pub const MARKDOWN_EXTENSIONS: &[&str] = &["md"];
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp"];

/// How scanned files are ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    /// Most recently modified first. Ties fall back to file name so output
    /// stays reproducible.
    NewestFirst,
    /// Case-insensitive file name, ascending.
    ByName,
}

/// What to collect from a directory.
#[derive(Debug, Clone)]
pub struct ScanOptions<'a> {
    pub extensions: &'a [&'a str],
    pub order: SortOrder,
    /// Names never returned, ignoring ASCII case (cover files, ...).
    pub exclude: &'a [String],
}

/// A file picked up by the scanner.
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub path: PathBuf,
    pub file_name: String,
    pub stem: String,
    pub modified: SystemTime,
}

/// List the matching files of `dir`, ordered per `options.order`.
///
/// Returns `Ok(None)` when `dir` does not exist or is not a directory.
pub fn scan_sources(
    dir: &Path,
    options: &ScanOptions<'_>,
) -> Result<Option<Vec<SourceFile>>, ScanError> {
    if !dir.is_dir() {
        return Ok(None);
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let file_name = entry.file_name().to_string_lossy().to_string();
        if is_hidden_or_excluded(&file_name, options.exclude) {
            continue;
        }
        if !has_extension(entry.path(), options.extensions) {
            continue;
        }

        let stem = entry
            .path()
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();
        let modified = fs::metadata(entry.path())?.modified()?;

        files.push(SourceFile {
            path: entry.path().to_path_buf(),
            file_name,
            stem,
            modified,
        });
    }

    sort_files(&mut files, options.order);
    Ok(Some(files))
}

/// List subdirectory names of `root`, skipping hidden and reserved ones.
///
/// Used when no fixed category/series list is configured.
pub fn list_categories(root: &Path, reserved: &[String]) -> Result<Vec<String>, ScanError> {
    let mut names = Vec::new();
    for entry in WalkDir::new(root).min_depth(1).max_depth(1) {
        let entry = entry?;
        if !entry.file_type().is_dir() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().to_string();
        if !is_hidden_or_excluded(&name, reserved) {
            names.push(name);
        }
    }
    names.sort();
    Ok(names)
}

fn is_hidden_or_excluded(name: &str, exclude: &[String]) -> bool {
    name.starts_with('.') || exclude.iter().any(|e| e.eq_ignore_ascii_case(name))
}

fn has_extension(path: &Path, extensions: &[&str]) -> bool {
    path.extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .is_some_and(|ext| extensions.contains(&ext.as_str()))
}

fn sort_files(files: &mut [SourceFile], order: SortOrder) {
    match order {
        SortOrder::NewestFirst => files.sort_by(|a, b| {
            b.modified
                .cmp(&a.modified)
                .then_with(|| a.file_name.cmp(&b.file_name))
        }),
        SortOrder::ByName => files.sort_by(|a, b| by_name(&a.file_name, &b.file_name)),
    }
}

fn by_name(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}
