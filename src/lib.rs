//! # RedRocks Site
//!
//! Page generators for a small personal website. The filesystem is the data
//! source: Markdown files become articles, folders of photos become gallery
//! series, and a folder of calligraphy scans becomes the sutra page. Every
//! generated page shares one shell so the site-wide navigation attaches the
//! same way everywhere.
//!
//! # Pipeline
//!
//! Each generator runs the same three steps:
//!
//! ```text
//! 1. Scan      source dir  →  [SourceFile]        (filter, order)
//! 2. Collect   SourceFile  →  ContentItem/Category (title, date, excerpt, cover)
//! 3. Render    Category    →  BuildOutput          (full HTML documents)
//! ```
//!
//! Nothing is written until the caller applies the [`artifacts::BuildOutput`],
//! so a fatal error (missing `articles/`, say) leaves the site untouched.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`scan`] | Lists source files by extension, ordered newest-first or by name |
//! | [`metadata`] | Title, excerpt, first image, and date extraction from Markdown |
//! | [`markdown`] | Markdown → HTML with tables, footnotes and heading anchors |
//! | [`render`] | The shared page shell: nav mount, stylesheets, footer |
//! | [`catalog`] | Body fragments for listings, detail pages, galleries, lightbox |
//! | [`generate`] | The four generators: articles, gallery, sutras, banner |
//! | [`artifacts`] | Pending output files, written in one pass |
//! | [`config`] | `site.toml` loading over stock defaults, validation |
//! | [`types`] | `ContentItem` and `Category`, shared by collection and rendering |
//! | [`output`] | CLI summary formatting |
//!
//! # Design Decisions
//!
//! ## Escape by Default
//!
//! Pages are built with [Maud](https://maud.lambda.xyz/), so every title,
//! excerpt, date and path interpolated into HTML is escaped. The only raw
//! insertions are converted Markdown, the bundled CSS and lightbox script,
//! and the JSON image list (which has `<` escaped).
//!
//! ## Reproducible Output
//!
//! Dates come from file modification times, ties are broken by file name,
//! and the footer year is passed in. Running a generator twice over the same
//! sources produces identical files.

pub mod artifacts;
pub mod catalog;
pub mod config;
pub mod generate;
pub mod markdown;
pub mod metadata;
pub mod output;
pub mod render;
pub mod scan;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
