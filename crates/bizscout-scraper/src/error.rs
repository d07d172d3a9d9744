use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("invalid URL \"{url}\": {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("invalid locator \"{locator}\": {reason}")]
    InvalidLocator { locator: String, reason: String },

    /// A structurally required element was missing from the page.
    #[error("extraction failed: {what}")]
    ExtractionFailed { what: String },

    /// The page had no value for a field and the API record lacks it too.
    #[error("API record has no `{field}` to substitute for the missing page value")]
    ApiFieldMissing { field: &'static str },

    #[error("browser automation failed during {step}: {reason}")]
    Browser { step: &'static str, reason: String },

    #[error("{step} timed out after {limit:?}")]
    Timeout {
        step: &'static str,
        limit: std::time::Duration,
    },

    #[error("blocking task failed: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}
