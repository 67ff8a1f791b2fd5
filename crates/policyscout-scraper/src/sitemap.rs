//! Privacy-policy hints from XML sitemaps.

use quick_xml::events::Event;
use quick_xml::Reader;
use url::Url;

use crate::client::PolicyClient;
use crate::types::{DiscoveryMethod, DiscoveryResult};
use crate::{extract, urls, validate};

/// Conventional sitemap locations, tried in order.
const SITEMAP_PATHS: &[&str] = &[
    "/sitemap.xml",
    "/sitemap_index.xml",
    "/sitemap-index.xml",
    "/wp-sitemap.xml",
    "/sitemap/sitemap.xml",
];

/// Candidates validated per sitemap before giving up.
const MAX_CANDIDATES: usize = 10;

/// Pulls every `<loc>` value out of a sitemap document.
///
/// Tolerant of malformed XML: parse errors end the scan with whatever was
/// collected so far, and non-XML input simply yields nothing.
#[must_use]
pub(crate) fn extract_locs(xml: &str) -> Vec<String> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut locs = Vec::new();
    let mut in_loc = false;
    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) if e.name().as_ref() == b"loc" => in_loc = true,
            Ok(Event::End(e)) if e.name().as_ref() == b"loc" => in_loc = false,
            Ok(Event::Text(t)) if in_loc => {
                if let Ok(text) = t.unescape() {
                    locs.push(text.into_owned());
                }
            }
            Ok(Event::Eof) | Err(_) => break,
            _ => {}
        }
    }
    locs
}

/// Tries the conventional sitemap locations and validates any `<loc>` whose
/// path superficially looks privacy-related.
///
/// Missing or non-XML sitemaps are ordinary misses, never errors.
pub async fn harvest_sitemap(client: &PolicyClient, base: &Url) -> DiscoveryResult {
    let mut result = DiscoveryResult::miss(DiscoveryMethod::Sitemap);

    for path in SITEMAP_PATHS {
        let Ok(sitemap_url) = base.join(path) else {
            continue;
        };
        let Ok(sitemap) = client.fetch(&sitemap_url).await else {
            continue;
        };

        let candidates: Vec<String> = extract_locs(&sitemap.body)
            .into_iter()
            .filter(|loc| urls::href_matches_keyword(loc))
            .take(MAX_CANDIDATES)
            .collect();

        for loc in candidates {
            let Some(url) = urls::normalize(&loc, base) else {
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
                tracing::info!(url = %url, "validated policy via sitemap");
                result.privacy_policy_url = Some(url);
                return result;
            }
        }

        // A sitemap was fetched; other conventional locations would be
        // duplicates of the same inventory.
        break;
    }

    result
}
