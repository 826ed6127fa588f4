//! CLI output formatting for every generator.
//!
//! Output is information-first: each category leads with its positional
//! index and display name, followed by `→` and the page it was written to.
//! Problems worth a second look (a category directory that does not exist)
//! are shown as indented context lines.
//!
//! ```text
//! Articles
//! 001 Travel (2 pages) → articles/travel.html
//! 002 Misc (0 pages) → articles/misc.html
//!     Missing: articles/misc
//! Index → articles.html
//!
//! Banner
//! 001 banner (2 images)
//! Index → banner_list.js
//!
//! Wrote 11 files
//! ```
//!
//! Each report has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout.

use crate::generate::{CategoryReport, Report, Section};
use std::path::Path;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// What a section counts, singular and plural.
fn unit(section: Section) -> (&'static str, &'static str) {
    match section {
        Section::Articles => ("page", "pages"),
        Section::Gallery => ("photo", "photos"),
        Section::Sutras | Section::Banner => ("image", "images"),
    }
}

fn entity_header(index: usize, category: &CategoryReport, section: Section) -> String {
    let (one, many) = unit(section);
    let noun = if category.count == 1 { one } else { many };
    let header = format!(
        "{} {} ({} {})",
        format_index(index),
        category.name,
        category.count,
        noun
    );
    match &category.page {
        Some(page) => format!("{header} \u{2192} {page}"),
        None => header,
    }
}

/// Show `path` relative to `root` when possible.
fn display_path(path: &Path, root: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .display()
        .to_string()
}

/// Format one generator's report.
pub fn format_report(report: &Report, root: &Path) -> Vec<String> {
    let mut lines = vec![report.section.label().to_string()];
    for (i, category) in report.categories.iter().enumerate() {
        lines.push(entity_header(i + 1, category, report.section));
        if let Some(missing) = &category.missing {
            lines.push(format!("    Missing: {}", display_path(missing, root)));
        }
    }
    lines.push(format!("Index \u{2192} {}", report.index));
    lines
}

/// Format all reports followed by the file total.
pub fn format_summary(reports: &[Report], root: &Path, written: usize) -> Vec<String> {
    let mut lines = Vec::new();
    for report in reports {
        lines.extend(format_report(report, root));
        lines.push(String::new());
    }
    let noun = if written == 1 { "file" } else { "files" };
    lines.push(format!("Wrote {written} {noun}"));
    lines
}

pub fn print_summary(reports: &[Report], root: &Path, written: usize) {
    for line in format_summary(reports, root, written) {
        println!("{}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn category(name: &str, count: usize, page: Option<&str>) -> CategoryReport {
        CategoryReport {
            name: name.to_string(),
            count,
            page: page.map(str::to_string),
            missing: None,
        }
    }

    fn articles_report() -> Report {
        let mut misc = category("Misc", 0, Some("articles/misc.html"));
        misc.missing = Some(PathBuf::from("/site/articles/misc"));
        Report {
            section: Section::Articles,
            categories: vec![category("Travel", 2, Some("articles/travel.html")), misc],
            index: "articles.html".to_string(),
        }
    }

    #[test]
    fn report_lists_categories_with_index_and_target() {
        let lines = format_report(&articles_report(), Path::new("/site"));
        assert_eq!(
            lines,
            vec![
                "Articles",
                "001 Travel (2 pages) \u{2192} articles/travel.html",
                "002 Misc (0 pages) \u{2192} articles/misc.html",
                "    Missing: articles/misc",
                "Index \u{2192} articles.html",
            ]
        );
    }

    #[test]
    fn singular_unit() {
        let report = Report {
            section: Section::Gallery,
            categories: vec![category("微光", 1, Some("gallery-light.html"))],
            index: "gallery.html".to_string(),
        };
        let lines = format_report(&report, Path::new("/"));
        assert_eq!(lines[1], "001 微光 (1 photo) \u{2192} gallery-light.html");
    }

    #[test]
    fn category_without_page_has_no_arrow() {
        let report = Report {
            section: Section::Banner,
            categories: vec![category("banner", 3, None)],
            index: "banner_list.js".to_string(),
        };
        let lines = format_report(&report, Path::new("/"));
        assert_eq!(lines[1], "001 banner (3 images)");
    }

    #[test]
    fn missing_outside_root_shown_as_is() {
        let mut report = articles_report();
        report.categories[1].missing = Some(PathBuf::from("/elsewhere/misc"));
        let lines = format_report(&report, Path::new("/site"));
        assert!(lines.contains(&"    Missing: /elsewhere/misc".to_string()));
    }

    #[test]
    fn summary_ends_with_total() {
        let lines = format_summary(&[articles_report()], Path::new("/site"), 5);
        assert_eq!(lines.last().unwrap(), "Wrote 5 files");
        assert!(lines.contains(&String::new()));
    }
}
