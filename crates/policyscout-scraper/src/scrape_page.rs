//! Full-text retrieval of a chosen URL with request-profile retries.

use url::Url;

use crate::client::PolicyClient;
use crate::error::ScrapeError;
use crate::profiles::{RequestProfile, DEFAULT_PROFILES};
use crate::types::{ScrapeOutcome, ScrapedContent};
use crate::{extract, validate};

/// Tunables for one scrape attempt.
#[derive(Debug, Clone)]
pub struct ScrapeOptions {
    /// Profiles tried in order; stop on the first that yields validated text.
    pub profiles: Vec<RequestProfile>,
    /// Bodies at or below this length are noise, not content.
    pub min_text_len: usize,
    /// When true, a second consecutive 404 ends the attempt early instead of
    /// exhausting the remaining profiles. Off by default: blocking is often
    /// user-agent specific and so, occasionally, are 404s.
    pub stop_after_404s: bool,
}

impl Default for ScrapeOptions {
    fn default() -> Self {
        Self {
            profiles: DEFAULT_PROFILES.to_vec(),
            min_text_len: 200,
            stop_after_404s: false,
        }
    }
}

/// Fetches `url` trying each request profile in order, returning the first
/// result that is long enough and validates as policy text.
///
/// A profile that returns non-trivial text which never validates is kept as
/// the best partial; if no profile validates, the longest partial is
/// returned as [`ScrapeOutcome::Partial`].
///
/// # Errors
///
/// Only after every profile is exhausted (or the 404 shortcut fires):
///
/// - [`ScrapeError::Blocked`] — at least one profile got a 403 and nothing
///   usable came back; the caller should consider manual review.
/// - [`ScrapeError::NotFound`] — the page 404ed and nothing usable came back.
/// - [`ScrapeError::NoUsableContent`] — everything else (timeouts, empty or
///   trivial bodies).
pub async fn scrape_with_profiles(
    client: &PolicyClient,
    url: &Url,
    options: &ScrapeOptions,
) -> Result<ScrapeOutcome, ScrapeError> {
    let mut best_partial: Option<ScrapedContent> = None;
    let mut last_status: Option<u16> = None;
    let mut saw_blocked = false;
    let mut all_404 = true;
    let mut profiles_tried = 0usize;

    for (idx, profile) in options.profiles.iter().enumerate() {
        if idx > 0 {
            client.polite_delay().await;
        }
        profiles_tried += 1;

        match client.fetch_with_profile(url, profile).await {
            Ok(page) => {
                all_404 = false;
                last_status = Some(page.status);
                let extracted = extract::extract(&page.body, url);
                if extracted.text.len() <= options.min_text_len {
                    tracing::debug!(
                        url = %url,
                        profile = profile.name,
                        len = extracted.text.len(),
                        "profile returned trivial text"
                    );
                    continue;
                }
                let content = ScrapedContent {
                    url: page.url,
                    title: extracted.title,
                    text: extracted.text,
                    last_modified: page.last_modified,
                };
                if validate::looks_like_policy(&content.text) {
                    return Ok(ScrapeOutcome::Full(content));
                }
                let longer = best_partial
                    .as_ref()
                    .is_none_or(|b| content.text.len() > b.text.len());
                if longer {
                    best_partial = Some(content);
                }
            }
            Err(ScrapeError::NotFound { .. }) => {
                last_status = Some(404);
                // Two consecutive 404s are convincing enough when the
                // shortcut is enabled.
                if options.stop_after_404s && all_404 && idx >= 1 {
                    tracing::debug!(url = %url, "404 across profiles — shortcutting");
                    break;
                }
            }
            Err(ScrapeError::Blocked { status, .. }) => {
                all_404 = false;
                saw_blocked = true;
                last_status = Some(status);
                tracing::debug!(url = %url, profile = profile.name, "profile blocked");
            }
            Err(e) => {
                all_404 = false;
                tracing::debug!(url = %url, profile = profile.name, error = %e, "profile fetch failed");
            }
        }
    }

    if let Some(partial) = best_partial {
        return Ok(ScrapeOutcome::Partial(partial));
    }
    if saw_blocked {
        return Err(ScrapeError::Blocked {
            url: url.to_string(),
            status: 403,
        });
    }
    if last_status == Some(404) {
        return Err(ScrapeError::NotFound {
            url: url.to_string(),
        });
    }
    Err(ScrapeError::NoUsableContent {
        url: url.to_string(),
        last_status,
        profiles_tried,
    })
}
