//! URL normalization and candidate heuristics.
//!
//! These are deliberately cheap, pure functions: the permissive keyword match
//! trades precision for recall because [`crate::validate`] provides the
//! precision downstream. See [`crate::crawl`] for how they compose.

use url::Url;

/// Keywords that mark a link as a potential privacy-policy candidate.
///
/// Matched case-insensitively as substrings of the anchor text, href, title,
/// and aria-label; hrefs are additionally matched with `-`/`_` collapsed to
/// spaces so `/privacy-policy` matches `"privacy policy"`.
pub const PRIVACY_KEYWORDS: &[&str] = &[
    "privacy policy",
    "privacy notice",
    "privacy statement",
    "cookie policy",
    "data protection",
    "data privacy",
    "gdpr",
    "ccpa",
    "privacy",
    "datenschutz",
    "privacidad",
    "confidentialite",
];

/// Path segments that disqualify a URL as a policy candidate outright.
///
/// A blacklist, not a whitelist: it cheaply narrows false positives without
/// requiring a positive match elsewhere.
pub const EXCLUDED_PATH_SEGMENTS: &[&str] = &[
    "login",
    "signin",
    "signup",
    "register",
    "account",
    "cart",
    "checkout",
    "contact",
    "careers",
    "jobs",
    "blog",
    "news",
    "press",
    "investors",
    "events",
    "shop",
    "store",
    "product",
    "products",
    "search",
];

/// Route keywords that make a same-domain link worth crawling for policy
/// discovery (about/legal/help-flavored paths).
const CRAWL_ALLOW_SEGMENTS: &[&str] = &[
    "about", "legal", "help", "support", "terms", "policies", "policy", "privacy", "site",
    "company", "info", "footer", "compliance", "trust",
];

/// Route keywords that make a link pointless (or hostile) to crawl.
const CRAWL_DENY_SEGMENTS: &[&str] = &[
    "login", "signin", "signup", "register", "cart", "checkout", "api", "admin", "wp-admin",
    "account", "auth", "logout", "download", "cdn",
];

/// File extensions that identify asset URLs, never HTML pages.
const ASSET_EXTENSIONS: &[&str] = &[
    ".css", ".js", ".png", ".jpg", ".jpeg", ".gif", ".svg", ".ico", ".webp", ".woff", ".woff2",
    ".ttf", ".mp4", ".webm", ".zip", ".gz", ".json", ".xml", ".rss",
];

/// Resolves `href` against `base`, returning `None` for anything that cannot
/// become a fetchable http(s) URL. Never panics on malformed input.
///
/// Fragment-only, `javascript:`, `mailto:`, `tel:`, `data:` and empty hrefs
/// are rejected; fragments are stripped from resolved URLs so `/privacy` and
/// `/privacy#top` dedupe to the same target.
#[must_use]
pub fn normalize(href: &str, base: &Url) -> Option<Url> {
    let href = href.trim();
    if href.is_empty()
        || href.starts_with('#')
        || href.starts_with("javascript:")
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("data:")
        || href.starts_with("blob:")
    {
        return None;
    }

    let mut resolved = base.join(href).ok()?;
    if resolved.scheme() != "http" && resolved.scheme() != "https" {
        return None;
    }
    resolved.set_fragment(None);
    Some(resolved)
}

/// Returns `false` when any path segment sits on the exclusion blacklist.
#[must_use]
pub fn is_valid_candidate(url: &Url) -> bool {
    let Some(segments) = url.path_segments() else {
        return true;
    };
    for segment in segments {
        let segment = segment.to_lowercase();
        if EXCLUDED_PATH_SEGMENTS.contains(&segment.as_str()) {
            return false;
        }
    }
    true
}

/// Permissive privacy-link detector over the four signals a link carries.
///
/// True when any keyword appears in the concatenated anchor text, href,
/// title, and aria-label, or when the href matches a keyword after `-`/`_`
/// normalization.
#[must_use]
pub fn is_privacy_related(anchor_text: &str, href: &str, title: &str, aria_label: &str) -> bool {
    let haystack = format!("{anchor_text} {href} {title} {aria_label}").to_lowercase();
    if PRIVACY_KEYWORDS.iter().any(|kw| haystack.contains(kw)) {
        return true;
    }
    href_matches_keyword(href)
}

/// Matches a href against the keyword list with `-` and `_` collapsed to
/// spaces, so `/privacy-policy` and `/privacy_policy` both hit
/// `"privacy policy"`.
#[must_use]
pub fn href_matches_keyword(href: &str) -> bool {
    let normalized = href.to_lowercase().replace(['-', '_'], " ");
    PRIVACY_KEYWORDS.iter().any(|kw| normalized.contains(kw))
}

/// Exact host equality. Subdomains are treated as different hosts, so a crawl
/// of `example.com` never wanders into `legal.example.com`; widening this
/// would need a requirements change.
#[must_use]
pub fn same_host(a: &Url, b: &Url) -> bool {
    match (a.host_str(), b.host_str()) {
        (Some(ha), Some(hb)) => ha.eq_ignore_ascii_case(hb),
        _ => false,
    }
}

/// Allow/deny route filter for breadth-first link following.
///
/// Denied segments and asset extensions are rejected; everything else is
/// allowed, with [`crawl_priority`] ranking the allow-listed routes first.
#[must_use]
pub fn is_crawl_worthy(url: &Url) -> bool {
    let path = url.path().to_lowercase();
    if ASSET_EXTENSIONS.iter().any(|ext| path.ends_with(ext)) {
        return false;
    }
    if let Some(segments) = url.path_segments() {
        for segment in segments {
            let segment = segment.to_lowercase();
            if CRAWL_DENY_SEGMENTS.contains(&segment.as_str()) {
                return false;
            }
        }
    }
    true
}

/// Sort key for crawl candidates: links whose path carries an allow-listed
/// segment come first, everything else after, original order preserved.
#[must_use]
pub fn crawl_priority(url: &Url) -> usize {
    let path = url.path().to_lowercase();
    if CRAWL_ALLOW_SEGMENTS.iter().any(|seg| path.contains(seg)) {
        0
    } else {
        1
    }
}

#[cfg(test)]
#[path = "urls_test.rs"]
mod tests;
