use agency_core::error::AppError;
use agency_core::models::{PLACEHOLDER_DATA, Query, QueryResult, ScrapeParams};
use agency_core::traits::AgencyScraper;

/// Scraper that fabricates one result per query without touching the network.
///
/// Every result echoes the query and the resolved limits, with
/// [`PLACEHOLDER_DATA`] as its `data`. This is the default backend.
#[derive(Debug, Clone, Default)]
pub struct PlaceholderScraper;

impl PlaceholderScraper {
    pub fn new() -> Self {
        Self
    }
}

impl AgencyScraper for PlaceholderScraper {
    async fn scrape(
        &self,
        queries: &[Query],
        params: ScrapeParams,
    ) -> Result<Vec<QueryResult>, AppError> {
        Ok(queries
            .iter()
            .map(|q| QueryResult::new(q, params, PLACEHOLDER_DATA.into()))
            .collect())
    }

    fn name(&self) -> &'static str {
        "placeholder"
    }
}
