mod batch;
pub mod client;
pub mod crawl;
pub mod error;
pub mod extract;
pub mod pipeline;
pub mod probe;
pub mod profiles;
pub mod robots;
pub mod scrape_page;
pub mod sitemap;
pub mod types;
pub mod urls;
pub mod validate;

pub use client::PolicyClient;
pub use crawl::{CrawlEnd, CrawlLimits, CrawlOutcome, SkipReason};
pub use error::ScrapeError;
pub use pipeline::Discovery;
pub use profiles::{RequestProfile, DEFAULT_PROFILES};
pub use scrape_page::ScrapeOptions;
pub use types::{DiscoveryMethod, DiscoveryResult, RelevantPages, ScrapeOutcome, ScrapedContent};
