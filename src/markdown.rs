//! Markdown → HTML conversion.
//!
//! A thin wrapper around `pulldown-cmark` with the extensions article pages
//! rely on: tables, footnotes, strikethrough, definition lists, and explicit
//! `{#id}` heading attributes. Headings without an explicit id get a
//! generated one so that in-page `#anchor` links and tables of contents work.
//!
//! Conversion is total: any input produces an HTML fragment.

use pulldown_cmark::{CowStr, Event, Options, Parser, Tag, TagEnd, html};
use std::collections::HashMap;

fn options() -> Options {
    Options::ENABLE_TABLES
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_DEFINITION_LIST
        | Options::ENABLE_HEADING_ATTRIBUTES
}

/// Convert Markdown to an HTML fragment.
pub fn to_html(markdown: &str) -> String {
    let events: Vec<Event<'_>> = Parser::new_ext(markdown, options()).collect();
    let events = with_heading_ids(events);

    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut out, events.into_iter());
    out
}

/// Give every heading an id, keeping explicit ones and de-duplicating
/// generated ones (`intro`, `intro_1`, `intro_2`, ...).
fn with_heading_ids(mut events: Vec<Event<'_>>) -> Vec<Event<'_>> {
    let mut seen: HashMap<String, usize> = HashMap::new();
    for event in &events {
        if let Event::Start(Tag::Heading { id: Some(id), .. }) = event {
            seen.insert(id.to_string(), 0);
        }
    }

    for i in 0..events.len() {
        if !matches!(events[i], Event::Start(Tag::Heading { id: None, .. })) {
            continue;
        }
        let slug = unique_slug(slugify(&heading_text(&events[i + 1..])), &mut seen);
        if let Event::Start(Tag::Heading { id, .. }) = &mut events[i] {
            *id = Some(CowStr::from(slug));
        }
    }
    events
}

fn heading_text(events: &[Event<'_>]) -> String {
    let mut text = String::new();
    for event in events {
        match event {
            Event::End(TagEnd::Heading(_)) => break,
            Event::Text(t) | Event::Code(t) => text.push_str(t),
            _ => {}
        }
    }
    text
}

/// Lowercase, keep letters/digits (any script), turn whitespace runs into `-`.
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_dash = false;
    for c in text.chars() {
        if c.is_alphanumeric() || c == '_' {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.extend(c.to_lowercase());
        } else if c.is_whitespace() || c == '-' {
            pending_dash = true;
        }
    }
    if slug.is_empty() {
        slug.push_str("section");
    }
    slug
}

fn unique_slug(base: String, seen: &mut HashMap<String, usize>) -> String {
    let Some(&used) = seen.get(&base) else {
        seen.insert(base.clone(), 0);
        return base;
    };
    let mut n = used;
    loop {
        n += 1;
        let candidate = format!("{base}_{n}");
        if !seen.contains_key(&candidate) {
            seen.insert(base, n);
            seen.insert(candidate.clone(), 0);
            return candidate;
        }
    }
}
