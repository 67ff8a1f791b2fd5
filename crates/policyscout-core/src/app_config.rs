#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Process-wide configuration for the discovery toolkit.
///
/// Every knob has a default; nothing here is secret, so `Debug` derives
/// without redaction. The `*_timeout_secs` values are deliberately split:
/// existence probes should give up quickly while content scrapes may wait
/// out a slow origin.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    pub user_agent: String,
    /// Timeout for full-content fetches (crawl pages, content scrapes).
    pub request_timeout_secs: u64,
    /// Timeout for lightweight existence probes (route catalog, robots, sitemap).
    pub probe_timeout_secs: u64,
    /// Page budget for one crawl run.
    pub max_pages: usize,
    /// Depth budget for one crawl run.
    pub max_depth: usize,
    /// Fan-out cap: same-domain links enqueued per crawled page.
    pub links_per_page: usize,
    /// Politeness delay between same-domain requests.
    pub request_delay_ms: u64,
    /// Domains dispatched concurrently per batch group.
    pub batch_size: usize,
    /// Delay between batch groups.
    pub batch_delay_ms: u64,
    /// When true, `scrape` gives up after every profile so far has seen a 404.
    pub stop_after_404s: bool,
}
