//! The shared page shell.
//!
//! Every generated HTML page goes through [`render_page`]: one typed
//! [`PageModel`] in, one complete document out. The shell carries what the
//! site-wide navigation needs to attach uniformly:
//!
//! - `<link rel="stylesheet" href="/nav.css">` in the head
//! - `<div id="rr-nav-mount" data-current="…">` as the first body element,
//!   where `data-current` names the active [`NavSection`]
//! - `<script src="/nav.js" defer>` at the end of the body
//!
//! Text fields are interpolated through maud and therefore escaped. The body
//! is already-rendered [`Markup`]; only converted Markdown and the bundled
//! CSS are inserted with `PreEscaped`.

use maud::{DOCTYPE, Markup, PreEscaped, html};

pub const NAV_CSS: &str = "/nav.css";
pub const NAV_JS: &str = "/nav.js";

const BASE_CSS: &str = include_str!("../static/base.css");
const ARTICLES_CSS: &str = include_str!("../static/articles.css");
const GALLERY_CSS: &str = include_str!("../static/gallery.css");

/// Top-level site section, highlighted by `nav.js`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavSection {
    Gallery,
    Sutras,
    Articles,
}

impl NavSection {
    /// The `data-key` value `nav.js` compares against.
    pub fn key(self) -> &'static str {
        match self {
            NavSection::Gallery => "gallery",
            NavSection::Sutras => "sutras",
            NavSection::Articles => "articles",
        }
    }
}

/// Page-specific stylesheet, appended after the base styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageStyle {
    Articles,
    Gallery,
}

impl PageStyle {
    fn css(self) -> &'static str {
        match self {
            PageStyle::Articles => ARTICLES_CSS,
            PageStyle::Gallery => GALLERY_CSS,
        }
    }
}

/// Site-wide values every page shares.
#[derive(Debug, Clone)]
pub struct SiteContext {
    pub title: String,
    pub lang: String,
    /// Year shown in the footer. Passed in so output stays reproducible.
    pub year: i32,
}

/// Everything that differs between pages.
#[derive(Debug, Clone)]
pub struct PageModel {
    pub title: String,
    pub nav: NavSection,
    pub style: PageStyle,
    pub body: Markup,
}

/// Render a complete HTML document.
pub fn render_page(page: &PageModel, site: &SiteContext) -> String {
    html! {
        (DOCTYPE)
        html lang=(site.lang) {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width,initial-scale=1";
                title { (page.title) " · " (site.title) }
                link rel="stylesheet" href=(NAV_CSS);
                style {
                    (PreEscaped(BASE_CSS))
                    (PreEscaped(page.style.css()))
                }
            }
            body {
                div #rr-nav-mount data-current=(page.nav.key()) {}
                main {
                    (page.body)
                    div.footer { "© " (site.year) " " (site.title) }
                }
                script src=(NAV_JS) defer {}
            }
        }
    }
    .into_string()
}
