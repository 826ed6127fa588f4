//! Listing and detail fragments.
//!
//! Every function here returns a body [`Markup`] fragment for
//! [`crate::render::render_page`]; none of them touch the filesystem except
//! [`resolve_cover`], which only checks whether conventional cover files
//! exist.
//!
//! ## Fragments
//!
//! | Function | Page |
//! |----------|------|
//! | [`article_detail`] | `articles/<cat>/<stem>.html` |
//! | [`category_index`] | `articles/<cat>.html` |
//! | [`articles_overview`] | `articles.html` |
//! | [`gallery_overview`] | `gallery.html` |
//! | [`series_page`] | `gallery-<series>.html` |
//! | [`sutra_page`] | `sutras.html` |
//!
//! ## Covers
//!
//! Category cards show a cover picked by [`resolve_cover`]: an explicit
//! cover file in the category directory, else the first item (in listing
//! order) that has an image, else an empty placeholder box. A card is never
//! dropped for lack of a cover.

use crate::types::{Category, ContentItem};
use maud::{Markup, PreEscaped, html};
use std::fs;
use std::path::Path;

const LIGHTBOX_JS: &str = include_str!("../static/lightbox.js");

/// Conventional cover file names, checked in this order.
pub const COVER_FILES: &[&str] = &["cover.jpg", "cover.jpeg", "cover.png", "cover.webp"];

/// Cover files as owned names, for scanner exclusion lists.
pub fn cover_file_names() -> Vec<String> {
    COVER_FILES.iter().map(|s| s.to_string()).collect()
}

/// Pick a category cover.
///
/// `url_base` is the root-relative URL of `dir` (no trailing slash). Cover
/// file names match ignoring ASCII case, like the scanner's extensions.
pub fn resolve_cover(dir: &Path, url_base: &str, items: &[ContentItem]) -> Option<String> {
    cover_file(dir)
        .map(|name| format!("{url_base}/{name}"))
        .or_else(|| items.iter().find_map(|item| item.image.clone()))
}

/// Actual name of the first conventional cover file present in `dir`.
fn cover_file(dir: &Path) -> Option<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .ok()?
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_ok_and(|t| t.is_file()))
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    COVER_FILES.iter().find_map(|cover| {
        names
            .iter()
            .find(|name| name.eq_ignore_ascii_case(cover))
            .cloned()
    })
}

// ============================================================================
// Articles
// ============================================================================

/// Detail page body for one article. `content_html` is converted Markdown.
pub fn article_detail(item: &ContentItem, content_html: &str, back_href: &str) -> Markup {
    html! {
        article.article {
            h1 { (item.title) }
            div.subtle.article-date { (item.date) }
            (PreEscaped(content_html))
            div.backlink {
                a href=(back_href) { "← 返回随笔目录" }
            }
        }
    }
}

/// Listing of one article category, newest first.
pub fn category_index(category: &Category, back_href: &str) -> Markup {
    html! {
        h1 { (category.name) " 随笔" }
        @if category.items.is_empty() {
            div.subtle.empty { "暂无文章。" }
        } @else {
            div.subtle { "按最近发布顺序排列" }
            div.list-wrap {
                div.list-head {
                    div { "文章目录" }
                    div.subtle { (category.count()) " 篇" }
                }
                div.list {
                    @for item in &category.items {
                        (article_row(item))
                    }
                }
            }
        }
        div.backlink {
            a href=(back_href) { "← 返回随笔目录" }
        }
    }
}

fn article_row(item: &ContentItem) -> Markup {
    html! {
        div.item {
            div {
                div.title { a href=(item.href) { (item.title) } }
                @if let Some(excerpt) = item.excerpt.as_deref().filter(|e| !e.is_empty()) {
                    p.excerpt { (excerpt) }
                }
            }
            div.date { (item.date) }
        }
    }
}

/// Top-level article index: one card per category, empty ones included.
pub fn articles_overview(categories: &[Category]) -> Markup {
    html! {
        h1 { "随笔分类" }
        div.card-grid {
            @for category in categories {
                (category_card(category, "篇文章"))
            }
        }
    }
}

// ============================================================================
// Gallery
// ============================================================================

/// Gallery overview: one card per photo series.
pub fn gallery_overview(series: &[Category]) -> Markup {
    html! {
        h1 { "摄影作品" }
        div.subtle { "按观看方式分为若干系列。点击进入。" }
        div.card-grid {
            @for category in series {
                (category_card(category, "张"))
            }
        }
    }
}

fn category_card(category: &Category, unit: &str) -> Markup {
    html! {
        a.card href=(category.href) {
            @if let Some(cover) = &category.cover {
                img.cover src=(cover) alt=(category.name) loading="lazy";
            } @else {
                div.cover {}
            }
            div.card-meta {
                div.card-title { (category.name) }
                @if let Some(motto) = &category.motto {
                    div.subtle { (motto) }
                }
                div.subtle.count { (category.count()) " " (unit) }
            }
        }
    }
}

/// One photo series: grid of images opening in a lightbox.
pub fn series_page(series: &Category, back_href: &str) -> Markup {
    html! {
        h1 { (series.name) }
        @if let Some(motto) = &series.motto {
            div.subtle { (motto) }
        }
        div.backlink {
            a href=(back_href) { "← 返回系列目录" }
        }
        @if series.items.is_empty() {
            div.subtle.empty { "暂无作品。" }
        }
        div.gallery {
            @for (index, item) in series.items.iter().enumerate() {
                img src=(item.href) alt=(item.title) loading="lazy" data-lightbox-index=(index);
            }
        }
        (lightbox(&series.items))
    }
}

/// The sutra calligraphy page.
pub fn sutra_page(sutras: &Category) -> Markup {
    html! {
        h1 { (sutras.name) }
        @if let Some(description) = &sutras.motto {
            p.subtle.description { (description) }
        }
        @if sutras.items.is_empty() {
            div.subtle.empty { "暂无作品。" }
        }
        div.gallery.sutra-grid {
            @for (index, item) in sutras.items.iter().enumerate() {
                div.thumbnail {
                    img src=(item.href) alt=(item.title) loading="lazy" data-lightbox-index=(index);
                }
            }
        }
        (lightbox(&sutras.items))
    }
}

/// Lightbox overlay, its image list payload, and the behavior script.
fn lightbox(items: &[ContentItem]) -> Markup {
    let urls: Vec<&str> = items.iter().map(|i| i.href.as_str()).collect();
    html! {
        div #lightbox {
            span.close data-action="close" { "×" }
            span.nav-btn.prev data-action="prev" { "❮" }
            img #lightbox-img src="" alt="";
            span.nav-btn.next data-action="next" { "❯" }
        }
        script #rr-images type="application/json" { (PreEscaped(image_list_json(&urls))) }
        script { (PreEscaped(LIGHTBOX_JS)) }
    }
}

/// JSON array of URLs, safe to embed inside a `<script>` element.
pub fn image_list_json(urls: &[&str]) -> String {
    // `<` never appears unescaped, so `</script>` cannot close the element.
    serde_json::to_string(urls)
        .unwrap_or_else(|_| "[]".to_string())
        .replace('<', "\\u003c")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::write_file;
    use tempfile::TempDir;

    fn item(id: &str, title: &str) -> ContentItem {
        ContentItem {
            id: id.to_string(),
            title: title.to_string(),
            date: "2025-03-01".to_string(),
            href: format!("/articles/travel/{id}.html"),
            excerpt: Some(format!("About {title}")),
            image: None,
            body: None,
        }
    }

    fn photo(name: &str) -> ContentItem {
        ContentItem {
            id: name.to_string(),
            title: name.to_string(),
            date: "2025-03-01".to_string(),
            href: format!("/images/light/{name}"),
            excerpt: None,
            image: Some(format!("/images/light/{name}")),
            body: None,
        }
    }

    fn category(items: Vec<ContentItem>) -> Category {
        Category {
            key: "travel".to_string(),
            name: "Travel".to_string(),
            motto: None,
            href: "/articles/travel.html".to_string(),
            items,
            cover: None,
            missing: false,
        }
    }

    #[test]
    fn category_index_lists_items_in_order() {
        let cat = category(vec![item("b", "Second"), item("a", "First")]);
        let html = category_index(&cat, "/articles.html").into_string();

        let second = html.find("Second").unwrap();
        let first = html.find("First").unwrap();
        assert!(second < first);
        assert!(html.contains(r#"href="/articles/travel/b.html""#));
        assert!(html.contains("2 篇"));
        assert!(html.contains("About First"));
    }

    #[test]
    fn empty_category_has_indicator_and_back_link() {
        let cat = category(vec![]);
        let html = category_index(&cat, "/articles.html").into_string();
        assert!(html.contains("暂无文章。"));
        assert!(html.contains(r#"<a href="/articles.html">"#));
        assert!(!html.contains("list-wrap"));
    }

    #[test]
    fn category_index_escapes_titles() {
        let cat = category(vec![item("x", "A < B & C")]);
        let html = category_index(&cat, "/articles.html").into_string();
        assert!(html.contains("A &lt; B &amp; C"));
        assert!(!html.contains("A < B"));
    }

    #[test]
    fn missing_excerpt_is_omitted() {
        let mut it = item("x", "Plain");
        it.excerpt = None;
        let html = category_index(&category(vec![it]), "/articles.html").into_string();
        assert!(!html.contains("excerpt"));
    }

    #[test]
    fn article_detail_escapes_heading_and_keeps_html() {
        let it = item("x", "<script>");
        let html = article_detail(&it, "<p>body</p>", "/articles.html").into_string();
        assert!(html.contains("<h1>&lt;script&gt;</h1>"));
        assert!(html.contains("<p>body</p>"));
        assert!(html.contains("2025-03-01"));
    }

    #[test]
    fn overview_lists_empty_categories_with_zero_count() {
        let mut empty = category(vec![]);
        empty.key = "misc".to_string();
        empty.name = "Misc".to_string();
        empty.href = "/articles/misc.html".to_string();
        empty.missing = true;
        let cats = vec![category(vec![item("a", "A")]), empty];

        let html = articles_overview(&cats).into_string();
        assert!(html.contains("1 篇文章"));
        assert!(html.contains("0 篇文章"));
        assert!(html.contains(r#"href="/articles/misc.html""#));
    }

    #[test]
    fn card_without_cover_renders_placeholder() {
        let html = gallery_overview(&[category(vec![])]).into_string();
        assert!(html.contains(r#"<div class="cover"></div>"#));
    }

    #[test]
    fn card_with_cover_renders_image() {
        let mut cat = category(vec![photo("a.jpg")]);
        cat.cover = Some("/images/light/cover.jpg".to_string());
        let html = gallery_overview(&[cat]).into_string();
        assert!(html.contains(r#"src="/images/light/cover.jpg""#));
        assert!(html.contains("1 张"));
    }

    #[test]
    fn cover_file_wins_over_first_image() {
        let tmp = TempDir::new().unwrap();
        for name in ["cover.jpg", "a.jpg", "b.jpg", "c.jpg"] {
            write_file(&tmp.path().join(name), "img");
        }
        let items = vec![photo("a.jpg"), photo("b.jpg"), photo("c.jpg")];
        let cover = resolve_cover(tmp.path(), "/images/light", &items);
        assert_eq!(cover.as_deref(), Some("/images/light/cover.jpg"));
    }

    #[test]
    fn cover_file_matches_ignoring_case() {
        let tmp = TempDir::new().unwrap();
        write_file(&tmp.path().join("Cover.JPG"), "img");
        write_file(&tmp.path().join("a.jpg"), "img");
        let cover = resolve_cover(tmp.path(), "/images/light", &[photo("a.jpg")]);
        assert_eq!(cover.as_deref(), Some("/images/light/Cover.JPG"));
    }

    #[test]
    fn cover_order_prefers_jpg_over_png() {
        let tmp = TempDir::new().unwrap();
        write_file(&tmp.path().join("cover.png"), "img");
        write_file(&tmp.path().join("cover.jpg"), "img");
        let cover = resolve_cover(tmp.path(), "/x", &[]);
        assert_eq!(cover.as_deref(), Some("/x/cover.jpg"));
    }

    #[test]
    fn cover_falls_back_to_first_item_image() {
        let tmp = TempDir::new().unwrap();
        let mut no_image = item("t", "Text only");
        no_image.image = None;
        let items = vec![no_image, photo("b.jpg"), photo("c.jpg")];
        let cover = resolve_cover(tmp.path(), "/images/light", &items);
        assert_eq!(cover.as_deref(), Some("/images/light/b.jpg"));
    }

    #[test]
    fn cover_none_when_nothing_available() {
        let tmp = TempDir::new().unwrap();
        assert_eq!(resolve_cover(tmp.path(), "/x", &[]), None);
    }

    #[test]
    fn series_page_embeds_image_list() {
        let mut series = category(vec![photo("a.jpg"), photo("b.jpg")]);
        series.name = "微光".to_string();
        series.motto = Some("光".to_string());
        let html = series_page(&series, "/gallery.html").into_string();

        assert!(html.contains(r#"["/images/light/a.jpg","/images/light/b.jpg"]"#));
        assert!(html.contains(r#"data-lightbox-index="1""#));
        assert!(html.contains(r#"id="lightbox""#));
        assert!(html.contains(r#"<a href="/gallery.html">"#));
    }

    #[test]
    fn empty_series_page_still_renders() {
        let html = series_page(&category(vec![]), "/gallery.html").into_string();
        assert!(html.contains("暂无作品。"));
        assert!(html.contains("[]"));
    }

    #[test]
    fn sutra_page_has_description_and_thumbnails() {
        let mut sutras = category(vec![photo("heart.jpg")]);
        sutras.name = "佛经手书".to_string();
        sutras.motto = Some("沐手静书".to_string());
        let html = sutra_page(&sutras).into_string();
        assert!(html.contains("沐手静书"));
        assert!(html.contains(r#"class="thumbnail""#));
        assert!(html.contains("heart.jpg"));
    }

    #[test]
    fn image_list_json_cannot_close_script() {
        let json = image_list_json(&["/a</script>.jpg"]);
        assert!(!json.contains("</script>"));
        let parsed: Vec<String> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, vec!["/a</script>.jpg"]);
    }
}
