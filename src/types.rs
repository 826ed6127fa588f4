//! Shared types passed between the scan, catalog and generate stages.
//!
//! Nothing here is persisted: items and categories are rebuilt from the
//! filesystem on every run and discarded once their pages are rendered.

/// One source document (a Markdown article) or one photo.
#[derive(Debug, Clone)]
pub struct ContentItem {
    /// Filename stem.
    pub id: String,
    pub title: String,
    /// `YYYY-MM-DD` from the source file's modification time.
    pub date: String,
    /// Root-relative link to the item's page (or the photo itself).
    pub href: String,
    pub excerpt: Option<String>,
    /// Image representing the item: the photo itself, or the first image an
    /// article references.
    pub image: Option<String>,
    /// Article Markdown with its title heading removed.
    pub body: Option<String>,
}

/// A directory grouping of items, rendered as one listing page.
#[derive(Debug, Clone)]
pub struct Category {
    /// Directory name.
    pub key: String,
    /// Display name.
    pub name: String,
    pub motto: Option<String>,
    /// Root-relative link to the category's listing page.
    pub href: String,
    pub items: Vec<ContentItem>,
    pub cover: Option<String>,
    /// The source directory was absent; the category renders as empty.
    pub missing: bool,
}

impl Category {
    pub fn count(&self) -> usize {
        self.items.len()
    }
}
