use std::time::Duration;

use rand::Rng;
use reqwest::redirect::Policy;
use reqwest::Client;
use url::Url;

use crate::error::ScrapeError;
use crate::profiles::RequestProfile;

/// One fetched page, body and the headers the heuristics care about.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// Final URL after redirects.
    pub url: Url,
    pub status: u16,
    pub body: String,
    /// Raw `Last-Modified` header value, when present.
    pub last_modified: Option<String>,
}

/// HTTP client for discovery and scraping.
///
/// Holds two underlying `reqwest` clients with different timeouts: a short
/// one for existence probes (route catalog, robots, sitemaps) and a longer
/// one for full content fetches. Both follow at most 5 redirects.
///
/// Politeness is the caller's job via [`PolicyClient::polite_delay`], applied
/// between consecutive same-domain requests.
pub struct PolicyClient {
    content: Client,
    probe: Client,
    request_delay_ms: u64,
}

impl PolicyClient {
    /// Creates a `PolicyClient` with the given timeouts, default `User-Agent`,
    /// and inter-request politeness delay.
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError::Http`] if an underlying `reqwest::Client`
    /// cannot be constructed (e.g., invalid TLS config).
    pub fn new(
        request_timeout_secs: u64,
        probe_timeout_secs: u64,
        user_agent: &str,
        request_delay_ms: u64,
    ) -> Result<Self, ScrapeError> {
        let content = Client::builder()
            .timeout(Duration::from_secs(request_timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .redirect(Policy::limited(5))
            .user_agent(user_agent)
            .build()?;
        let probe = Client::builder()
            .timeout(Duration::from_secs(probe_timeout_secs))
            .connect_timeout(Duration::from_secs(5))
            .redirect(Policy::limited(5))
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            content,
            probe,
            request_delay_ms,
        })
    }

    /// Creates a client from the application configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError::Http`] if the client cannot be constructed.
    pub fn from_config(config: &policyscout_core::AppConfig) -> Result<Self, ScrapeError> {
        Self::new(
            config.request_timeout_secs,
            config.probe_timeout_secs,
            &config.user_agent,
            config.request_delay_ms,
        )
    }

    /// Fetches a page with the default headers.
    ///
    /// # Errors
    ///
    /// - [`ScrapeError::NotFound`] — HTTP 404.
    /// - [`ScrapeError::Blocked`] — HTTP 403.
    /// - [`ScrapeError::Http`] — network failure, timeout, or any other
    ///   non-2xx status (via `error_for_status`).
    pub async fn fetch(&self, url: &Url) -> Result<FetchedPage, ScrapeError> {
        self.fetch_inner(url, None).await
    }

    /// Fetches a page with the headers of a specific [`RequestProfile`].
    ///
    /// # Errors
    ///
    /// Same as [`PolicyClient::fetch`].
    pub async fn fetch_with_profile(
        &self,
        url: &Url,
        profile: &RequestProfile,
    ) -> Result<FetchedPage, ScrapeError> {
        self.fetch_inner(url, Some(profile)).await
    }

    async fn fetch_inner(
        &self,
        url: &Url,
        profile: Option<&RequestProfile>,
    ) -> Result<FetchedPage, ScrapeError> {
        let mut request = self.content.get(url.clone());
        if let Some(profile) = profile {
            request = request.headers(profile.headers());
        }
        let response = request.send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(ScrapeError::NotFound {
                url: url.to_string(),
            });
        }
        if status == reqwest::StatusCode::FORBIDDEN {
            return Err(ScrapeError::Blocked {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        let response = response.error_for_status()?;

        let last_modified = response
            .headers()
            .get(reqwest::header::LAST_MODIFIED)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        let final_url = response.url().clone();
        let body = response.text().await?;

        Ok(FetchedPage {
            url: final_url,
            status: status.as_u16(),
            body,
            last_modified,
        })
    }

    /// Lightweight existence check: `HEAD`, falling back to `GET` when the
    /// origin rejects `HEAD` with 405. Any failure reads as "does not exist".
    pub async fn exists(&self, url: &Url) -> bool {
        match self.probe.head(url.clone()).send().await {
            Ok(response) => {
                if response.status() == reqwest::StatusCode::METHOD_NOT_ALLOWED {
                    matches!(
                        self.probe.get(url.clone()).send().await,
                        Ok(r) if r.status().is_success()
                    )
                } else {
                    response.status().is_success()
                }
            }
            Err(_) => false,
        }
    }

    /// Sleeps the configured politeness delay with up to 20% added jitter.
    /// No-op when the delay is zero (tests).
    pub async fn polite_delay(&self) {
        if self.request_delay_ms == 0 {
            return;
        }
        let jitter = rand::rng().random_range(0..=self.request_delay_ms / 5);
        tokio::time::sleep(Duration::from_millis(self.request_delay_ms + jitter)).await;
    }
}
