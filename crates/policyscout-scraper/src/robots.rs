//! Privacy-policy hints from `robots.txt`.
//!
//! This is not a robots.txt compliance parser: lines are scanned for
//! privacy/legal keywords and any URL or path token on a matching line
//! becomes a candidate. Sites frequently `Disallow: /privacy` exactly the
//! page we are looking for.

use std::sync::LazyLock;

use regex::Regex;
use url::Url;

use crate::client::PolicyClient;
use crate::types::{DiscoveryMethod, DiscoveryResult};
use crate::{extract, urls, validate};

/// Keywords that make a robots.txt line interesting.
const LINE_KEYWORDS: &[&str] = &["privacy", "legal", "terms", "policy", "gdpr", "datenschutz"];

/// Candidates validated per robots.txt before giving up.
const MAX_CANDIDATES: usize = 10;

static URL_OR_PATH: LazyLock<Regex> = LazyLock::new(|| {
    // Absolute URLs or rooted paths; trailing wildcards and '$' anchors are
    // robots syntax, not part of the path.
    Regex::new(r"(https?://[^\s*$]+|/[^\s*$]+)").expect("static regex is valid")
});

/// Scans `robots_txt` for privacy-flavored URL and path tokens, in line order.
#[must_use]
pub(crate) fn candidate_tokens(robots_txt: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    for line in robots_txt.lines() {
        let lower = line.to_lowercase();
        if !LINE_KEYWORDS.iter().any(|kw| lower.contains(kw)) {
            continue;
        }
        for capture in URL_OR_PATH.find_iter(line) {
            let token = capture.as_str().to_owned();
            if !tokens.contains(&token) {
                tokens.push(token);
            }
        }
    }
    tokens
}

/// Fetches `/robots.txt` and validates any privacy-flavored URLs found there.
///
/// Every failure — missing robots.txt, unfetchable candidate, content that
/// does not validate — degrades to a miss; nothing here aborts the pipeline.
pub async fn harvest_robots(client: &PolicyClient, base: &Url) -> DiscoveryResult {
    let mut result = DiscoveryResult::miss(DiscoveryMethod::Robots);

    let Ok(robots_url) = base.join("/robots.txt") else {
        return result;
    };
    let Ok(robots) = client.fetch(&robots_url).await else {
        tracing::debug!(url = %robots_url, "no robots.txt");
        return result;
    };

    for token in candidate_tokens(&robots.body).into_iter().take(MAX_CANDIDATES) {
        let Some(url) = urls::normalize(&token, base) else {
            continue;
        };
        if !urls::is_valid_candidate(&url) {
            continue;
        }
        result.push_found(url.clone());

        client.polite_delay().await;
        let Ok(page) = client.fetch(&url).await else {
            continue;
        };
        result.crawled_pages += 1;
        let extracted = extract::extract(&page.body, &url);
        if validate::looks_like_policy(&extracted.text) {
            tracing::info!(url = %url, "validated policy via robots.txt");
            result.privacy_policy_url = Some(url);
            return result;
        }
    }

    result
}
