use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid base URL \"{input}\": {reason}")]
    InvalidBaseUrl { input: String, reason: String },

    #[error("access denied ({status}) for {url}; the site blocks automated clients — consider manual review")]
    Blocked { url: String, status: u16 },

    #[error("page not found: {url}")]
    NotFound { url: String },

    #[error("no usable content from {url} after {profiles_tried} request profiles (last status: {})", last_status.map_or_else(|| "none".to_owned(), |s| s.to_string()))]
    NoUsableContent {
        url: String,
        last_status: Option<u16>,
        profiles_tried: usize,
    },
}
