//! Result records shared across the discovery strategies.

use serde::Serialize;
use url::Url;

/// Which strategy produced (or, when the hit is absent, exhausted last during)
/// a discovery attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DiscoveryMethod {
    Direct,
    Robots,
    Sitemap,
    Crawl,
    Fallback,
}

impl std::fmt::Display for DiscoveryMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            DiscoveryMethod::Direct => "direct",
            DiscoveryMethod::Robots => "robots",
            DiscoveryMethod::Sitemap => "sitemap",
            DiscoveryMethod::Crawl => "crawl",
            DiscoveryMethod::Fallback => "fallback",
        };
        f.write_str(s)
    }
}

/// Outcome of one discovery attempt against one base domain.
///
/// Invariant: when `privacy_policy_url` is `Some`, that URL also appears in
/// `found_urls` and its content has passed [`crate::validate::looks_like_policy`].
#[derive(Debug, Clone, Serialize)]
pub struct DiscoveryResult {
    pub privacy_policy_url: Option<Url>,
    /// Every candidate URL observed, in discovery order.
    pub found_urls: Vec<Url>,
    /// Pages fetched for content evaluation: candidate validations and crawl
    /// frontier pages. Infrastructure fetches (existence probes, robots.txt,
    /// sitemap documents) are not counted.
    pub crawled_pages: usize,
    pub method: DiscoveryMethod,
}

impl DiscoveryResult {
    /// An empty miss attributed to `method`.
    #[must_use]
    pub fn miss(method: DiscoveryMethod) -> Self {
        Self {
            privacy_policy_url: None,
            found_urls: Vec::new(),
            crawled_pages: 0,
            method,
        }
    }

    /// Records a candidate URL, preserving discovery order without duplicates.
    pub fn push_found(&mut self, url: Url) {
        if !self.found_urls.contains(&url) {
            self.found_urls.push(url);
        }
    }

    /// Folds the accumulated diagnostics of an exhausted strategy into this
    /// result, keeping this result's method and hit.
    pub fn absorb(&mut self, other: DiscoveryResult) {
        for url in other.found_urls {
            self.push_found(url);
        }
        self.crawled_pages += other.crawled_pages;
    }
}

/// Cleaned text and title of one fetched page.
#[derive(Debug, Clone, Serialize)]
pub struct ScrapedContent {
    pub url: Url,
    pub title: String,
    /// Whitespace-normalized, ASCII-only body text.
    pub text: String,
    /// Raw `Last-Modified` header value, when the origin sent one.
    pub last_modified: Option<String>,
}

/// Distinguishes a validated scrape from a best-effort one.
///
/// `Partial` means at least one request profile returned non-trivial text but
/// none of it read like a privacy policy; callers decide whether that is good
/// enough. A hard failure is a [`crate::ScrapeError`] instead.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "outcome", content = "content", rename_all = "lowercase")]
pub enum ScrapeOutcome {
    Full(ScrapedContent),
    Partial(ScrapedContent),
}

impl ScrapeOutcome {
    #[must_use]
    pub fn content(&self) -> &ScrapedContent {
        match self {
            ScrapeOutcome::Full(c) | ScrapeOutcome::Partial(c) => c,
        }
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        matches!(self, ScrapeOutcome::Full(_))
    }
}

/// Same-domain outbound links of a single page, bucketed by route keyword.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RelevantPages {
    pub privacy_pages: Vec<Url>,
    pub legal_pages: Vec<Url>,
    pub about_pages: Vec<Url>,
    pub support_pages: Vec<Url>,
    pub all_pages: Vec<Url>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn discovery_result_serializes_urls_and_method_tag() {
        let url = Url::parse("https://example.test/privacy-policy").unwrap();
        let mut result = DiscoveryResult::miss(DiscoveryMethod::Direct);
        result.push_found(url.clone());
        result.privacy_policy_url = Some(url);
        result.crawled_pages = 1;

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(
            json["privacy_policy_url"],
            "https://example.test/privacy-policy"
        );
        assert_eq!(json["found_urls"][0], "https://example.test/privacy-policy");
        assert_eq!(json["method"], "direct");
    }

    #[test]
    fn scrape_outcome_serializes_with_outcome_tag() {
        let outcome = ScrapeOutcome::Partial(ScrapedContent {
            url: Url::parse("https://example.test/privacy").unwrap(),
            title: "Privacy Policy".to_owned(),
            text: "best effort".to_owned(),
            last_modified: None,
        });
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["outcome"], "partial");
        assert_eq!(json["content"]["url"], "https://example.test/privacy");
    }
}
