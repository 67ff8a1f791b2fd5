//! Strategy sequencing for one discovery attempt.
//!
//! Strategies run strictly cheapest-first: route probing, robots.txt,
//! sitemaps, breadth-first crawling, and finally a bot-profile fallback
//! probe. The first validated hit wins; diagnostics (candidate URLs, fetch
//! counts) accumulate across strategies either way.

use scraper::{Html, Selector};
use url::Url;

use crate::client::PolicyClient;
use crate::crawl::{self, CrawlLimits};
use crate::error::ScrapeError;
use crate::scrape_page::{self, ScrapeOptions};
use crate::types::{DiscoveryMethod, DiscoveryResult, RelevantPages, ScrapeOutcome};
use crate::{probe, robots, sitemap, urls};

/// Discovery entry point: owns the HTTP client and the crawl/scrape tunables
/// for a run. All heuristics live in free functions; this struct carries only
/// configuration and the client.
pub struct Discovery {
    client: PolicyClient,
    limits: CrawlLimits,
    scrape_options: ScrapeOptions,
    batch_size: usize,
    batch_delay_ms: u64,
}

impl Discovery {
    /// Creates a `Discovery` with default scrape options and batch sizing.
    #[must_use]
    pub fn new(client: PolicyClient, limits: CrawlLimits) -> Self {
        Self {
            client,
            limits,
            scrape_options: ScrapeOptions::default(),
            batch_size: 3,
            batch_delay_ms: 1000,
        }
    }

    /// Creates a fully configured `Discovery` from the application config.
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError::Http`] if the HTTP client cannot be built.
    pub fn from_config(config: &policyscout_core::AppConfig) -> Result<Self, ScrapeError> {
        let client = PolicyClient::from_config(config)?;
        let mut discovery = Self::new(client, CrawlLimits::from_config(config));
        discovery.scrape_options.stop_after_404s = config.stop_after_404s;
        discovery.batch_size = config.batch_size;
        discovery.batch_delay_ms = config.batch_delay_ms;
        Ok(discovery)
    }

    #[must_use]
    pub(crate) fn batch_size(&self) -> usize {
        self.batch_size
    }

    #[must_use]
    pub(crate) fn batch_delay_ms(&self) -> u64 {
        self.batch_delay_ms
    }

    /// Runs the full strategy sequence against `base_domain`.
    ///
    /// Strategy-internal failures degrade to misses; the attempt as a whole
    /// only errors on an unusable base domain.
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError::InvalidBaseUrl`] when `base_domain` cannot be
    /// parsed into an http(s) URL.
    pub async fn discover(&self, base_domain: &str) -> Result<DiscoveryResult, ScrapeError> {
        let base = parse_base(base_domain)?;
        tracing::info!(base = %base, "starting policy discovery");

        let mut accumulated = DiscoveryResult::miss(DiscoveryMethod::Fallback);

        let direct = probe::probe_routes(&self.client, &base).await;
        if let Some(result) = settle(&mut accumulated, direct) {
            return Ok(result);
        }

        let robots = robots::harvest_robots(&self.client, &base).await;
        if let Some(result) = settle(&mut accumulated, robots) {
            return Ok(result);
        }

        let sitemap = sitemap::harvest_sitemap(&self.client, &base).await;
        if let Some(result) = settle(&mut accumulated, sitemap) {
            return Ok(result);
        }

        let crawled = crawl::crawl(&self.client, &base, &self.limits)
            .await
            .into_result();
        if let Some(result) = settle(&mut accumulated, crawled) {
            return Ok(result);
        }

        let fallback = probe::probe_fallback(&self.client, &base).await;
        if let Some(result) = settle(&mut accumulated, fallback) {
            return Ok(result);
        }

        tracing::info!(base = %base, pages = accumulated.crawled_pages, "no policy found");
        Ok(accumulated)
    }

    /// Thin wrapper returning only the hit, for callers that don't need
    /// method or diagnostics. Errors read as "not found".
    pub async fn discover_simple(&self, base_domain: &str) -> Option<Url> {
        match self.discover(base_domain).await {
            Ok(result) => result.privacy_policy_url,
            Err(e) => {
                tracing::warn!(base_domain, error = %e, "discovery failed");
                None
            }
        }
    }

    /// Single-page scan of the homepage, bucketing same-domain links by
    /// route keyword — a broader page inventory without full crawling.
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError::InvalidBaseUrl`] for an unusable base domain,
    /// or the fetch error when the homepage itself cannot be retrieved.
    pub async fn discover_relevant_pages(
        &self,
        base_domain: &str,
    ) -> Result<RelevantPages, ScrapeError> {
        let base = parse_base(base_domain)?;
        let page = self.client.fetch(&base).await?;
        Ok(categorize_links(&page.body, &base))
    }

    /// Full-text scrape of a chosen URL; see [`scrape_page::scrape_with_profiles`].
    ///
    /// # Errors
    ///
    /// [`ScrapeError::InvalidBaseUrl`] for an unparseable URL, otherwise the
    /// profile-exhaustion errors of the scrape itself.
    pub async fn scrape(&self, url: &str) -> Result<ScrapeOutcome, ScrapeError> {
        let url = parse_base(url)?;
        scrape_page::scrape_with_profiles(&self.client, &url, &self.scrape_options).await
    }
}

/// Folds a strategy's diagnostics into the running accumulator; on a hit,
/// returns the final result carrying the full accumulated diagnostics and
/// the winning strategy's method tag.
fn settle(accumulated: &mut DiscoveryResult, outcome: DiscoveryResult) -> Option<DiscoveryResult> {
    let method = outcome.method;
    let hit = outcome.privacy_policy_url.clone();
    accumulated.absorb(outcome);
    let hit = hit?;
    Some(DiscoveryResult {
        privacy_policy_url: Some(hit),
        found_urls: accumulated.found_urls.clone(),
        crawled_pages: accumulated.crawled_pages,
        method,
    })
}

/// Parses a caller-supplied base domain, defaulting the scheme to https.
fn parse_base(base_domain: &str) -> Result<Url, ScrapeError> {
    let trimmed = base_domain.trim();
    if trimmed.is_empty() {
        return Err(ScrapeError::InvalidBaseUrl {
            input: base_domain.to_owned(),
            reason: "empty".to_owned(),
        });
    }
    let with_scheme = if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_owned()
    } else {
        format!("https://{trimmed}")
    };
    let url = Url::parse(&with_scheme).map_err(|e| ScrapeError::InvalidBaseUrl {
        input: base_domain.to_owned(),
        reason: e.to_string(),
    })?;
    if url.host_str().is_none() {
        return Err(ScrapeError::InvalidBaseUrl {
            input: base_domain.to_owned(),
            reason: "no host".to_owned(),
        });
    }
    Ok(url)
}

/// Buckets a page's same-host links by route keyword. Synchronous; the
/// parsed document never crosses an await.
fn categorize_links(html: &str, base: &Url) -> RelevantPages {
    let mut pages = RelevantPages::default();
    let document = Html::parse_document(html);
    let Ok(anchor_sel) = Selector::parse("a[href]") else {
        return pages;
    };

    for el in document.select(&anchor_sel) {
        let Some(href) = el.value().attr("href") else {
            continue;
        };
        let Some(url) = urls::normalize(href, base) else {
            continue;
        };
        if !urls::same_host(&url, base) || url == *base {
            continue;
        }
        if pages.all_pages.contains(&url) {
            continue;
        }
        pages.all_pages.push(url.clone());

        let anchor_text = el.text().collect::<String>().to_lowercase();
        let path = url.path().to_lowercase();
        let matches = |keywords: &[&str]| {
            keywords
                .iter()
                .any(|kw| path.contains(kw) || anchor_text.contains(kw))
        };

        if urls::is_privacy_related(&anchor_text, href, "", "") {
            pages.privacy_pages.push(url);
        } else if matches(&["legal", "terms", "conditions", "disclaimer", "imprint"]) {
            pages.legal_pages.push(url);
        } else if matches(&["about", "company", "team", "who-we-are", "mission"]) {
            pages.about_pages.push(url);
        } else if matches(&["help", "support", "faq", "contact"]) {
            pages.support_pages.push(url);
        }
    }

    pages
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_base_adds_https_scheme() {
        let url = parse_base("example.test").unwrap();
        assert_eq!(url.as_str(), "https://example.test/");
    }

    #[test]
    fn parse_base_keeps_explicit_scheme() {
        let url = parse_base("http://example.test").unwrap();
        assert_eq!(url.scheme(), "http");
    }

    #[test]
    fn parse_base_rejects_empty_and_garbage() {
        assert!(matches!(
            parse_base(""),
            Err(ScrapeError::InvalidBaseUrl { .. })
        ));
        assert!(matches!(
            parse_base("http://"),
            Err(ScrapeError::InvalidBaseUrl { .. })
        ));
    }

    #[test]
    fn categorize_links_buckets_by_keyword() {
        let base = Url::parse("https://example.test/").unwrap();
        let html = r#"
            <a href="/privacy-policy">Privacy</a>
            <a href="/legal/terms">Terms</a>
            <a href="/about">About us</a>
            <a href="/help/faq">FAQ</a>
            <a href="/gallery">Gallery</a>
            <a href="https://other.test/about">Elsewhere</a>
        "#;
        let pages = categorize_links(html, &base);
        assert_eq!(pages.privacy_pages.len(), 1);
        assert_eq!(pages.legal_pages.len(), 1);
        assert_eq!(pages.about_pages.len(), 1);
        assert_eq!(pages.support_pages.len(), 1);
        assert_eq!(pages.all_pages.len(), 5);
    }

    #[test]
    fn settle_merges_diagnostics_and_tags_winning_method() {
        let base = Url::parse("https://example.test/").unwrap();
        let mut accumulated = DiscoveryResult::miss(DiscoveryMethod::Fallback);

        let mut miss = DiscoveryResult::miss(DiscoveryMethod::Direct);
        miss.push_found(base.join("/legal").unwrap());
        miss.crawled_pages = 2;
        assert!(settle(&mut accumulated, miss).is_none());

        let hit_url = base.join("/privacy").unwrap();
        let mut hit = DiscoveryResult::miss(DiscoveryMethod::Robots);
        hit.push_found(hit_url.clone());
        hit.crawled_pages = 1;
        hit.privacy_policy_url = Some(hit_url.clone());

        let result = settle(&mut accumulated, hit).unwrap();
        assert_eq!(result.method, DiscoveryMethod::Robots);
        assert_eq!(result.privacy_policy_url, Some(hit_url));
        assert_eq!(result.crawled_pages, 3);
        assert_eq!(result.found_urls.len(), 2);
    }
}
