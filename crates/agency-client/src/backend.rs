use std::fmt;
use std::str::FromStr;

use agency_core::error::AppError;
use agency_core::models::{Query, QueryResult, ScrapeParams};
use agency_core::traits::AgencyScraper;

use crate::config::DesignRushConfig;
use crate::placeholder::PlaceholderScraper;

#[cfg(feature = "browser")]
use crate::browser::DesignRushScraper;

/// Which scraper implementation to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BackendKind {
    #[default]
    Placeholder,
    Browser,
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendKind::Placeholder => write!(f, "placeholder"),
            BackendKind::Browser => write!(f, "browser"),
        }
    }
}

impl FromStr for BackendKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "placeholder" => Ok(BackendKind::Placeholder),
            "browser" => Ok(BackendKind::Browser),
            other => Err(format!(
                "Unknown scraper backend '{other}' (expected placeholder or browser)"
            )),
        }
    }
}

/// Runtime-selected scraper, so binaries can pick a backend from config.
#[derive(Clone)]
pub enum ScraperBackend {
    Placeholder(PlaceholderScraper),
    #[cfg(feature = "browser")]
    Browser(DesignRushScraper),
}

impl ScraperBackend {
    /// Build the backend for `kind`. The browser backend launches Chromium.
    #[cfg_attr(not(feature = "browser"), allow(unused_variables))]
    pub async fn launch(kind: BackendKind, config: &DesignRushConfig) -> Result<Self, AppError> {
        match kind {
            BackendKind::Placeholder => Ok(Self::Placeholder(PlaceholderScraper::new())),
            #[cfg(feature = "browser")]
            BackendKind::Browser => Ok(Self::Browser(
                DesignRushScraper::launch(config.clone()).await?,
            )),
            #[cfg(not(feature = "browser"))]
            BackendKind::Browser => Err(AppError::ConfigError(
                "The browser backend requires building with the `browser` feature".into(),
            )),
        }
    }
}

impl AgencyScraper for ScraperBackend {
    async fn scrape(
        &self,
        queries: &[Query],
        params: ScrapeParams,
    ) -> Result<Vec<QueryResult>, AppError> {
        match self {
            Self::Placeholder(s) => s.scrape(queries, params).await,
            #[cfg(feature = "browser")]
            Self::Browser(s) => s.scrape(queries, params).await,
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Self::Placeholder(s) => s.name(),
            #[cfg(feature = "browser")]
            Self::Browser(s) => s.name(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_kind_parsing() {
        assert_eq!("placeholder".parse(), Ok(BackendKind::Placeholder));
        assert_eq!(" Browser ".parse(), Ok(BackendKind::Browser));
        assert!("selenium".parse::<BackendKind>().is_err());
        assert_eq!(BackendKind::default().to_string(), "placeholder");
    }

    #[tokio::test]
    async fn placeholder_backend_launches_without_browser() {
        let backend = ScraperBackend::launch(BackendKind::Placeholder, &DesignRushConfig::default())
            .await
            .unwrap();
        assert_eq!(backend.name(), "placeholder");

        let results = backend
            .scrape(&[Query::new("Acme", "Plumbing")], ScrapeParams::default())
            .await
            .unwrap();
        assert_eq!(results.len(), 1);
    }

    #[cfg(not(feature = "browser"))]
    #[tokio::test]
    async fn browser_backend_requires_feature() {
        let err = ScraperBackend::launch(BackendKind::Browser, &DesignRushConfig::default())
            .await
            .err()
            .unwrap();
        assert!(matches!(err, AppError::ConfigError(_)));
    }
}
