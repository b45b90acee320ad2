//! Markdown to safe-HTML rendering.
//!
//! Raw HTML embedded in the Markdown source is stripped at the event level
//! before HTML generation, and link/image destinations with active schemes
//! are dropped, so no attacker-controlled markup ever reaches a live view.
//! If parsing panics, the input is HTML-escaped and returned as plain text;
//! the raw source is never handed onward as if it were rendered output.

use pulldown_cmark::{CowStr, Event, Parser, Tag, html};
use std::panic::{AssertUnwindSafe, catch_unwind};

/// Render Markdown to a sanitized HTML fragment. Pure function of its
/// input; empty input yields empty output.
pub fn render_markdown(input: &str) -> String {
    if input.is_empty() {
        return String::new();
    }
    catch_unwind(AssertUnwindSafe(|| render_sanitized(input)))
        .unwrap_or_else(|_| escape_html(input))
}

fn render_sanitized(input: &str) -> String {
    let events = Parser::new(input).filter_map(sanitize_event);
    let mut out = String::new();
    html::push_html(&mut out, events);
    out
}

fn sanitize_event(event: Event<'_>) -> Option<Event<'_>> {
    match event {
        // Raw HTML would pass through push_html unescaped, so it is
        // dropped outright rather than trusted.
        Event::Html(_) | Event::InlineHtml(_) => None,
        Event::Start(Tag::Link { link_type, dest_url, title, id }) => {
            Some(Event::Start(Tag::Link {
                link_type,
                dest_url: sanitize_url(dest_url),
                title,
                id,
            }))
        }
        Event::Start(Tag::Image { link_type, dest_url, title, id }) => {
            Some(Event::Start(Tag::Image {
                link_type,
                dest_url: sanitize_url(dest_url),
                title,
                id,
            }))
        }
        other => Some(other),
    }
}

fn sanitize_url(url: CowStr<'_>) -> CowStr<'_> {
    if is_safe_url(&url) { url } else { CowStr::Borrowed("") }
}

/// Relative URLs and http/https/mailto are allowed; any other scheme
/// (javascript:, data:, vbscript:, ...) is rejected.
fn is_safe_url(url: &str) -> bool {
    let scheme_end = match url.find(':') {
        Some(idx) => idx,
        None => return true,
    };
    // A colon after a path/query/fragment delimiter is not a scheme.
    if url[..scheme_end].contains(['/', '?', '#']) {
        return true;
    }
    let scheme = url[..scheme_end].to_ascii_lowercase();
    matches!(scheme.as_str(), "http" | "https" | "mailto")
}

/// Escape the five HTML-reserved characters, returning the input as inert
/// plain text.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(c),
        }
    }
    out
}
