//! Main-content extraction from server-delivered HTML.
//!
//! Strategies are layered from most to least specific: known content
//! containers, heuristic containers, structured fallbacks (tables and
//! definition lists), paragraph concatenation, and finally filtered
//! whole-document text. Chrome elements (scripts, nav, footers, cookie
//! banners) are skipped during text collection because they never contain
//! policy prose and would dilute keyword density downstream.

use scraper::{ElementRef, Html, Node, Selector};
use url::Url;

/// Minimum text length for a container to win outright.
const MIN_CONTAINER_LEN: usize = 500;
/// Minimum length for the paragraph and whole-document fallbacks.
const MIN_FALLBACK_LEN: usize = 300;
/// Paragraphs shorter than this are navigation crumbs, not prose.
const MIN_PARAGRAPH_LEN: usize = 50;

/// Selectors that conventionally wrap a page's primary content, in priority
/// order.
const CONTENT_SELECTORS: &[&str] = &[
    "main",
    "article",
    "[role='main']",
    ".privacy-policy",
    ".policy-content",
    ".legal-content",
    "#content",
    "#main-content",
    ".main-content",
    ".page-content",
    ".entry-content",
    ".post-content",
    ".content",
];

const TITLE_SELECTORS: &[&str] = &[
    "title",
    "h1",
    ".page-title",
    ".entry-title",
    ".post-title",
    "h2",
];

/// Phrases whose presence marks a container as privacy prose even without a
/// telling class name.
const CONTENT_INDICATORS: &[&str] = &[
    "personal information",
    "we collect",
    "information we collect",
    "data protection",
    "your privacy",
];

/// Tags that never contain policy prose.
const CHROME_TAGS: &[&str] = &[
    "script", "style", "nav", "header", "footer", "aside", "noscript", "iframe", "svg", "form",
    "button", "select", "template",
];

/// Class/id fragments that mark an element as page chrome.
const CHROME_CLASS_HINTS: &[&str] = &[
    "cookie-banner",
    "cookie-consent",
    "cookie-notice",
    "advert",
    "-ads",
    "ad-",
    "promo",
    "sidebar",
    "menu",
    "breadcrumb",
    "social",
    "share",
    "newsletter",
    "popup",
    "modal",
];

/// Tokens dropped by the filtered whole-document fallback.
const CHROME_WORDS: &[&str] = &[
    "home",
    "menu",
    "login",
    "signin",
    "search",
    "subscribe",
    "copyright",
    "cart",
    "shop",
];

/// Text and title pulled out of one HTML document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedPage {
    pub title: String,
    pub text: String,
}

/// Extracts the most plausible main-content text and a title from `html`.
///
/// Always returns something — possibly an empty `text` for a contentless
/// document. Deciding whether the result reads like a privacy policy is
/// [`crate::validate`]'s job, not this module's.
#[must_use]
pub fn extract(html: &str, url: &Url) -> ExtractedPage {
    let document = Html::parse_document(html);
    let title = resolve_title(&document, url);
    let text = extract_text(&document);
    ExtractedPage { title, text }
}

fn extract_text(document: &Html) -> String {
    // Strategy 1: first known content container with enough text.
    for selector in CONTENT_SELECTORS {
        let Ok(sel) = Selector::parse(selector) else {
            continue;
        };
        if let Some(el) = document.select(&sel).next() {
            let text = clean_text(&element_text(el));
            if text.len() > MIN_CONTAINER_LEN {
                return text;
            }
        }
    }

    // Strategy 2: generic containers that look privacy-flavored, longest wins.
    if let Some(text) = heuristic_container_text(document) {
        return text;
    }

    // Strategy 3: structured fallbacks — long, privacy-flavored tables or
    // definition lists.
    if let Some(text) = structured_text(document) {
        return text;
    }

    // Strategy 4: concatenated substantial paragraphs.
    let paragraphs = paragraph_text(document);
    if paragraphs.len() > MIN_FALLBACK_LEN {
        return paragraphs;
    }

    // Strategy 5: filtered whole-document text as last resort.
    let body = filtered_document_text(document);
    if body.len() > MIN_FALLBACK_LEN {
        return body;
    }

    // Nothing qualified; hand back the longest of the two fallbacks so the
    // validator sees whatever prose exists.
    if paragraphs.len() >= body.len() {
        paragraphs
    } else {
        body
    }
}

fn heuristic_container_text(document: &Html) -> Option<String> {
    let sel = Selector::parse("div, section").ok()?;
    let mut best: Option<String> = None;
    for el in document.select(&sel) {
        let marker = format!(
            "{} {}",
            el.value().attr("class").unwrap_or(""),
            el.value().attr("id").unwrap_or("")
        )
        .to_lowercase();
        let named_like_policy = ["privacy", "legal", "policy", "terms"]
            .iter()
            .any(|kw| marker.contains(kw));

        let text = clean_text(&element_text(el));
        if text.len() <= MIN_CONTAINER_LEN {
            continue;
        }
        let lower = text.to_lowercase();
        let reads_like_policy = CONTENT_INDICATORS.iter().any(|kw| lower.contains(kw));
        if !named_like_policy && !reads_like_policy {
            continue;
        }
        if best.as_ref().is_none_or(|b| text.len() > b.len()) {
            best = Some(text);
        }
    }
    best
}

fn structured_text(document: &Html) -> Option<String> {
    let sel = Selector::parse("table, dl").ok()?;
    let combined = document
        .select(&sel)
        .map(|el| clean_text(&element_text(el)))
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    let lower = combined.to_lowercase();
    let flavored = CONTENT_INDICATORS.iter().any(|kw| lower.contains(kw))
        || lower.contains("cookie")
        || lower.contains("privacy");
    (combined.len() > MIN_CONTAINER_LEN && flavored).then_some(combined)
}

fn paragraph_text(document: &Html) -> String {
    let Ok(sel) = Selector::parse("p") else {
        return String::new();
    };
    document
        .select(&sel)
        .map(|el| clean_text(&element_text(el)))
        .filter(|t| t.len() > MIN_PARAGRAPH_LEN)
        .collect::<Vec<_>>()
        .join(" ")
}

fn filtered_document_text(document: &Html) -> String {
    let Ok(sel) = Selector::parse("body") else {
        return String::new();
    };
    let Some(body) = document.select(&sel).next() else {
        return String::new();
    };
    let raw = clean_text(&element_text(body));
    raw.split_whitespace()
        .filter(|word| !CHROME_WORDS.contains(&word.to_lowercase().as_str()))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Collects the text of `el` and its descendants, skipping chrome subtrees.
fn element_text(el: ElementRef<'_>) -> String {
    let mut out = String::new();
    collect_text(el, &mut out);
    out
}

fn collect_text(el: ElementRef<'_>, out: &mut String) {
    for child in el.children() {
        match child.value() {
            Node::Text(text) => {
                out.push_str(text);
                out.push(' ');
            }
            Node::Element(_) => {
                if let Some(child_el) = ElementRef::wrap(child) {
                    if !is_chrome(&child_el) {
                        collect_text(child_el, out);
                    }
                }
            }
            _ => {}
        }
    }
}

fn is_chrome(el: &ElementRef<'_>) -> bool {
    let tag = el.value().name();
    if CHROME_TAGS.contains(&tag) {
        return true;
    }
    let marker = format!(
        "{} {}",
        el.value().attr("class").unwrap_or(""),
        el.value().attr("id").unwrap_or("")
    )
    .to_lowercase();
    CHROME_CLASS_HINTS.iter().any(|hint| marker.contains(hint))
}

/// Collapses whitespace runs to single spaces and drops non-ASCII characters.
#[must_use]
pub fn clean_text(raw: &str) -> String {
    let ascii: String = raw.chars().filter(char::is_ascii).collect();
    ascii.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn resolve_title(document: &Html, url: &Url) -> String {
    for selector in TITLE_SELECTORS {
        let Ok(sel) = Selector::parse(selector) else {
            continue;
        };
        for el in document.select(&sel) {
            // Strip the site-name suffix before ASCII cleanup so en-dash
            // separators still match.
            let raw = el.text().collect::<String>();
            let title = clean_text(&strip_site_suffix(raw.trim()));
            if !title.is_empty() {
                return title;
            }
        }
    }
    title_from_path(url)
}

/// Drops trailing `" | Site Name"` / `" - Site Name"` segments.
fn strip_site_suffix(title: &str) -> String {
    for separator in [" | ", " – ", " - "] {
        if let Some(idx) = title.find(separator) {
            return title[..idx].trim().to_owned();
        }
    }
    title.trim().to_owned()
}

/// Path-derived guess when the document offers no usable title.
fn title_from_path(url: &Url) -> String {
    let path = url.path().to_lowercase();
    if path.contains("cookie") {
        "Cookie Policy".to_owned()
    } else if path.contains("terms") {
        "Terms of Service".to_owned()
    } else {
        "Privacy Policy".to_owned()
    }
}

#[cfg(test)]
#[path = "extract_test.rs"]
mod tests;
