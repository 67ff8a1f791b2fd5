//! Breadth-first crawl orchestration.
//!
//! One crawl run owns its frontier queue and visited set exclusively; both
//! are discarded when the run ends. Pages are fetched in strict FIFO enqueue
//! order, and privacy-candidate validation on a page happens before that
//! page's sibling links are enqueued, so a hit always short-circuits before
//! the next frontier page begins.
//!
//! Same-domain means exact host equality: subdomains such as
//! `legal.example.com` are out of scope for a crawl of `example.com`.

use std::collections::{HashSet, VecDeque};

use scraper::{Html, Selector};
use url::Url;

use crate::client::PolicyClient;
use crate::types::{DiscoveryMethod, DiscoveryResult};
use crate::{extract, urls, validate};

/// Budgets for one crawl run.
#[derive(Debug, Clone)]
pub struct CrawlLimits {
    /// Pages fetched before the run ends with [`CrawlEnd::BudgetReached`].
    pub max_pages: usize,
    /// Link depth beyond which targets are skipped, seed = 0.
    pub max_depth: usize,
    /// Fan-out cap: crawlable links enqueued per page.
    pub links_per_page: usize,
}

impl Default for CrawlLimits {
    fn default() -> Self {
        Self {
            max_pages: 50,
            max_depth: 3,
            links_per_page: 10,
        }
    }
}

impl CrawlLimits {
    #[must_use]
    pub fn from_config(config: &policyscout_core::AppConfig) -> Self {
        Self {
            max_pages: config.max_pages,
            max_depth: config.max_depth,
            links_per_page: config.links_per_page,
        }
    }
}

/// A URL awaiting fetch, paired with its distance from the seed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlTarget {
    pub url: Url,
    pub depth: usize,
}

/// Why a dequeued or discovered URL was not fetched (or fetched fruitlessly).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    AlreadyVisited,
    DepthExceeded,
    FetchFailed,
}

/// Terminal state of a crawl run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CrawlEnd {
    /// A candidate validated as a privacy policy.
    Hit(Url),
    /// Every reachable page was fetched without a hit.
    FrontierExhausted,
    /// The page budget ran out first.
    BudgetReached,
}

/// Full diagnostics of one crawl run.
#[derive(Debug)]
pub struct CrawlOutcome {
    pub end: CrawlEnd,
    /// Privacy-candidate URLs observed, in discovery order.
    pub found_urls: Vec<Url>,
    /// Pages actually fetched (frontier pages plus candidate validations).
    pub crawled_pages: usize,
    /// Skipped URLs with the reason, for diagnostics and tests.
    pub skipped: Vec<(Url, SkipReason)>,
}

impl CrawlOutcome {
    /// Collapses the run into the pipeline's result record.
    #[must_use]
    pub fn into_result(self) -> DiscoveryResult {
        let hit = match self.end {
            CrawlEnd::Hit(url) => Some(url),
            CrawlEnd::FrontierExhausted | CrawlEnd::BudgetReached => None,
        };
        DiscoveryResult {
            privacy_policy_url: hit,
            found_urls: self.found_urls,
            crawled_pages: self.crawled_pages,
            method: DiscoveryMethod::Crawl,
        }
    }
}

/// Breadth-first crawl of `base` looking for a page that validates as a
/// privacy policy.
///
/// Individual page failures (timeout, non-2xx, malformed HTML) are recorded
/// as skips and never abort the run; the crawl degrades page by page.
pub async fn crawl(client: &PolicyClient, base: &Url, limits: &CrawlLimits) -> CrawlOutcome {
    let mut frontier: VecDeque<CrawlTarget> = VecDeque::new();
    let mut enqueued: HashSet<Url> = HashSet::new();
    let mut visited: HashSet<Url> = HashSet::new();

    let mut outcome = CrawlOutcome {
        end: CrawlEnd::FrontierExhausted,
        found_urls: Vec::new(),
        crawled_pages: 0,
        skipped: Vec::new(),
    };

    frontier.push_back(CrawlTarget {
        url: base.clone(),
        depth: 0,
    });
    enqueued.insert(base.clone());

    while let Some(target) = frontier.pop_front() {
        if outcome.crawled_pages >= limits.max_pages {
            outcome.end = CrawlEnd::BudgetReached;
            return outcome;
        }
        if visited.contains(&target.url) {
            outcome.skipped.push((target.url, SkipReason::AlreadyVisited));
            continue;
        }
        if target.depth > limits.max_depth {
            outcome.skipped.push((target.url, SkipReason::DepthExceeded));
            continue;
        }

        visited.insert(target.url.clone());
        if outcome.crawled_pages > 0 {
            client.polite_delay().await;
        }
        outcome.crawled_pages += 1;

        let page = match client.fetch(&target.url).await {
            Ok(page) => page,
            Err(e) => {
                tracing::debug!(url = %target.url, error = %e, "crawl page fetch failed");
                outcome.skipped.push((target.url, SkipReason::FetchFailed));
                continue;
            }
        };

        let links = extract_page_links(&page.body, &target.url, base, limits.links_per_page);

        // Validate this page's privacy candidates before enqueuing siblings,
        // so a hit here short-circuits the rest of the crawl.
        for candidate in links.candidates {
            outcome.found_urls.push_unique(candidate.clone());
            if visited.contains(&candidate) {
                continue;
            }
            if outcome.crawled_pages >= limits.max_pages {
                outcome.end = CrawlEnd::BudgetReached;
                return outcome;
            }

            visited.insert(candidate.clone());
            client.polite_delay().await;
            outcome.crawled_pages += 1;

            let page = match client.fetch(&candidate).await {
                Ok(page) => page,
                Err(e) => {
                    tracing::debug!(url = %candidate, error = %e, "candidate fetch failed");
                    outcome.skipped.push((candidate, SkipReason::FetchFailed));
                    continue;
                }
            };
            let extracted = extract::extract(&page.body, &candidate);
            if validate::looks_like_policy(&extracted.text) {
                tracing::info!(url = %candidate, "validated policy via crawl");
                outcome.end = CrawlEnd::Hit(candidate);
                return outcome;
            }
        }

        if target.depth < limits.max_depth {
            for link in links.crawlable {
                if visited.contains(&link) || enqueued.contains(&link) {
                    continue;
                }
                enqueued.insert(link.clone());
                frontier.push_back(CrawlTarget {
                    url: link,
                    depth: target.depth + 1,
                });
            }
        }
    }

    outcome
}

/// Links pulled from one page, split by what they are for.
pub(crate) struct PageLinks {
    /// Privacy-flagged links, fetched and validated immediately.
    pub candidates: Vec<Url>,
    /// Same-host, crawl-worthy links for the frontier, allow-listed routes
    /// first, capped to the fan-out limit.
    pub crawlable: Vec<Url>,
}

/// Synchronous link extraction; the parsed document never crosses an await.
pub(crate) fn extract_page_links(
    html: &str,
    page_url: &Url,
    base: &Url,
    links_per_page: usize,
) -> PageLinks {
    let mut candidates: Vec<Url> = Vec::new();
    let mut crawlable: Vec<Url> = Vec::new();

    let document = Html::parse_document(html);
    let Ok(anchor_sel) = Selector::parse("a[href]") else {
        return PageLinks {
            candidates,
            crawlable,
        };
    };

    for el in document.select(&anchor_sel) {
        let Some(href) = el.value().attr("href") else {
            continue;
        };
        let Some(url) = urls::normalize(href, page_url) else {
            continue;
        };
        if url == *page_url {
            continue;
        }

        let anchor_text = el.text().collect::<String>();
        let title = el.value().attr("title").unwrap_or("");
        let aria_label = el.value().attr("aria-label").unwrap_or("");

        if urls::is_privacy_related(&anchor_text, href, title, aria_label)
            && urls::is_valid_candidate(&url)
        {
            if !candidates.contains(&url) {
                candidates.push(url);
            }
        } else if urls::same_host(&url, base)
            && urls::is_crawl_worthy(&url)
            && url != *base
            && !crawlable.contains(&url)
        {
            crawlable.push(url);
        }
    }

    crawlable.sort_by_key(urls::crawl_priority);
    crawlable.truncate(links_per_page);

    PageLinks {
        candidates,
        crawlable,
    }
}

/// Insertion-order dedup helper for found-URL accumulation.
trait PushUnique {
    fn push_unique(&mut self, url: Url);
}

impl PushUnique for Vec<Url> {
    fn push_unique(&mut self, url: Url) {
        if !self.contains(&url) {
            self.push(url);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://example.test/").unwrap()
    }

    #[test]
    fn page_links_flags_privacy_anchors_as_candidates() {
        let html = r#"<a href="/legal/privacy-policy">Privacy</a><a href="/about">About</a>"#;
        let links = extract_page_links(html, &base(), &base(), 10);
        assert_eq!(links.candidates.len(), 1);
        assert_eq!(
            links.candidates[0].as_str(),
            "https://example.test/legal/privacy-policy"
        );
        assert_eq!(links.crawlable.len(), 1);
    }

    #[test]
    fn page_links_excludes_off_host_crawlables() {
        let html = r#"<a href="https://other.test/about">About elsewhere</a>"#;
        let links = extract_page_links(html, &base(), &base(), 10);
        assert!(links.crawlable.is_empty());
    }

    #[test]
    fn page_links_keeps_off_host_privacy_candidates() {
        // Policies hosted on a vendor domain still deserve validation.
        let html = r#"<a href="https://legal.example.test/privacy-policy">Privacy</a>"#;
        let links = extract_page_links(html, &base(), &base(), 10);
        assert_eq!(links.candidates.len(), 1);
    }

    #[test]
    fn page_links_caps_fan_out() {
        let html: String = (0..30)
            .map(|i| format!(r#"<a href="/page-{i}">Page {i}</a>"#))
            .collect();
        let links = extract_page_links(&html, &base(), &base(), 10);
        assert_eq!(links.crawlable.len(), 10);
    }

    #[test]
    fn page_links_prioritizes_informational_routes() {
        let html = r#"<a href="/gallery">Gallery</a><a href="/about">About</a>"#;
        let links = extract_page_links(html, &base(), &base(), 1);
        assert_eq!(links.crawlable.len(), 1);
        assert_eq!(links.crawlable[0].as_str(), "https://example.test/about");
    }

    #[test]
    fn page_links_skips_denied_and_asset_routes() {
        let html =
            r#"<a href="/login">Log in</a><a href="/cart">Cart</a><a href="/logo.png">Logo</a>"#;
        let links = extract_page_links(html, &base(), &base(), 10);
        assert!(links.candidates.is_empty());
        assert!(links.crawlable.is_empty());
    }

    #[test]
    fn page_links_dedupes_repeated_hrefs() {
        let html = r#"<a href="/privacy">Privacy</a><a href="/privacy#top">Privacy (footer)</a>"#;
        let links = extract_page_links(html, &base(), &base(), 10);
        assert_eq!(links.candidates.len(), 1);
    }
}
