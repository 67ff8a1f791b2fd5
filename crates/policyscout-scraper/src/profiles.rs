//! Named request profiles for retrying blocked or filtered fetches.
//!
//! Blocking is often user-agent specific: a site that 403s a desktop browser
//! UA may serve a search-engine bot, and vice versa. [`crate::scrape_page`]
//! walks this ordered list instead of an implicit attempt-number lookup so
//! the retry policy is inspectable and testable on its own.

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, USER_AGENT};

/// One named header set used for a fetch attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestProfile {
    pub name: &'static str,
    pub user_agent: &'static str,
    pub accept: &'static str,
    pub accept_language: Option<&'static str>,
}

impl RequestProfile {
    /// Builds the header map for this profile. Static values are known-valid,
    /// so construction cannot fail.
    #[must_use]
    pub fn headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(self.user_agent));
        headers.insert(ACCEPT, HeaderValue::from_static(self.accept));
        if let Some(lang) = self.accept_language {
            headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static(lang));
        }
        headers
    }
}

pub const DESKTOP: RequestProfile = RequestProfile {
    name: "desktop",
    user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36",
    accept: "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
    accept_language: Some("en-US,en;q=0.9"),
};

pub const MOBILE: RequestProfile = RequestProfile {
    name: "mobile",
    user_agent: "Mozilla/5.0 (iPhone; CPU iPhone OS 17_4 like Mac OS X) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.4 Mobile/15E148 Safari/604.1",
    accept: "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
    accept_language: Some("en-US,en;q=0.9"),
};

/// Minimal bot-style profile; also used by the pipeline's last-resort probe.
pub const MINIMAL: RequestProfile = RequestProfile {
    name: "minimal",
    user_agent: "policyscout/0.1 (privacy-policy discovery)",
    accept: "text/html",
    accept_language: None,
};

pub const SEARCH_BOT: RequestProfile = RequestProfile {
    name: "search-bot",
    user_agent: "Mozilla/5.0 (compatible; Googlebot/2.1; +http://www.google.com/bot.html)",
    accept: "text/html,application/xhtml+xml",
    accept_language: None,
};

/// Default retry order: most browser-like first, bot-like last.
pub const DEFAULT_PROFILES: &[RequestProfile] = &[DESKTOP, MOBILE, MINIMAL, SEARCH_BOT];
