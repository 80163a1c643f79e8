use thiserror::Error;

/// Application-wide error types for the agency scraper.
#[derive(Error, Debug)]
pub enum AppError {
    /// The request carried no queries, or `queries` was absent.
    #[error("Missing or invalid queries array")]
    InvalidQueries,

    /// Network/connection error while loading a page.
    #[error("Network error: {0}")]
    NetworkError(String),

    /// The directory page or a profile page does not exist.
    #[error("Page not found: {0}")]
    PageNotFound(String),

    /// The target site served a bot challenge or an access-denied page.
    #[error("Blocked by target site: {0}")]
    Blocked(String),

    /// Navigation timed out.
    #[error("Request timed out after {0} seconds")]
    Timeout(u64),

    /// Headless browser failed to launch or lost its session.
    #[error("Browser error: {0}")]
    BrowserError(String),

    /// A page could not be parsed into a profile.
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Invalid or missing configuration.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Reading or writing a CSV file failed.
    #[error("CSV error: {0}")]
    CsvError(String),

    /// JSON serialization/deserialization failed.
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// Generic error.
    #[error("{0}")]
    Generic(String),
}

impl AppError {
    /// Returns true if the error was caused by the caller's input rather than
    /// by the scraper or the environment.
    pub fn is_client_error(&self) -> bool {
        matches!(self, AppError::InvalidQueries)
    }
}
