//! Direct probing of conventional privacy-policy routes.
//!
//! Cheapest discovery strategy: most sites park their policy on one of a few
//! dozen conventional paths, so an existence check per path plus one full
//! fetch on a match usually beats crawling by an order of magnitude.

use url::Url;

use crate::client::PolicyClient;
use crate::profiles::MINIMAL;
use crate::types::{DiscoveryMethod, DiscoveryResult};
use crate::{extract, urls, validate};

/// Conventional policy paths, ordered by how often they hit in practice:
/// bare routes first, then CMS conventions, nested legal sections, localized
/// variants, and file-extension variants.
pub const ROUTE_CATALOG: &[&str] = &[
    "/privacy",
    "/privacy-policy",
    "/privacy_policy",
    "/privacypolicy",
    "/privacy-notice",
    "/privacy-statement",
    "/legal/privacy",
    "/legal/privacy-policy",
    "/legal/privacy-notice",
    "/policies/privacy",
    "/policies/privacy-policy",
    "/pages/privacy-policy",
    "/about/privacy",
    "/site/privacy",
    "/corporate/privacy",
    "/privacy-center",
    "/privacy/policy",
    "/cookie-policy",
    "/cookies",
    "/gdpr",
    "/data-protection",
    "/legal",
    "/en/privacy",
    "/en/privacy-policy",
    "/datenschutz",
    "/privacidad",
    "/confidentialite",
    "/privacy.html",
    "/privacy-policy.html",
    "/privacy.php",
    "/privacy.aspx",
];

/// Short list for the pipeline's last-resort probe with a bot-style profile.
const FALLBACK_PATHS: &[&str] = &[
    "/privacy",
    "/privacy-policy",
    "/legal/privacy",
    "/pages/privacy-policy",
    "/cookie-policy",
];

/// Walks the route catalog against `base`: existence-check each path, and on
/// a 2xx whose path looks privacy-related by name, fetch and validate.
///
/// Individual request failures (timeout, DNS, non-2xx) are silently skipped;
/// no failure here is fatal to the pipeline.
pub async fn probe_routes(client: &PolicyClient, base: &Url) -> DiscoveryResult {
    let mut result = DiscoveryResult::miss(DiscoveryMethod::Direct);
    let mut first_request = true;

    for path in ROUTE_CATALOG {
        let Ok(url) = base.join(path) else {
            continue;
        };

        if !first_request {
            client.polite_delay().await;
        }
        first_request = false;

        if !client.exists(&url).await {
            continue;
        }
        result.push_found(url.clone());

        // Paths like "/legal" exist on most sites without being a policy;
        // only spend a full fetch where the name itself is privacy-flavored.
        if !urls::href_matches_keyword(path) {
            continue;
        }

        let Ok(page) = client.fetch(&url).await else {
            continue;
        };
        result.crawled_pages += 1;
        let extracted = extract::extract(&page.body, &url);
        if validate::looks_like_policy(&extracted.text) {
            tracing::info!(url = %url, "validated policy via direct probe");
            result.privacy_policy_url = Some(url);
            return result;
        }
    }

    result
}

/// Last-resort probe: fetch a short path list outright with the minimal
/// bot-style profile, for origins that filter browser-like clients.
pub async fn probe_fallback(client: &PolicyClient, base: &Url) -> DiscoveryResult {
    let mut result = DiscoveryResult::miss(DiscoveryMethod::Fallback);
    let mut first_request = true;

    for path in FALLBACK_PATHS {
        let Ok(url) = base.join(path) else {
            continue;
        };

        if !first_request {
            client.polite_delay().await;
        }
        first_request = false;

        let Ok(page) = client.fetch_with_profile(&url, &MINIMAL).await else {
            continue;
        };
        result.push_found(url.clone());
        result.crawled_pages += 1;
        let extracted = extract::extract(&page.body, &url);
        if validate::looks_like_policy(&extracted.text) {
            tracing::info!(url = %url, "validated policy via fallback probe");
            result.privacy_policy_url = Some(url);
            return result;
        }
    }

    result
}
