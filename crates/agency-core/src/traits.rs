use std::future::Future;

use crate::error::AppError;
use crate::models::{Query, QueryResult, ScrapeParams};

/// Scrapes agency listings for a batch of (business, category) queries.
///
/// Implementations must return exactly one [`QueryResult`] per query, in the
/// order the queries were given. Any error aborts the whole batch.
pub trait AgencyScraper: Send + Sync + Clone {
    fn scrape(
        &self,
        queries: &[Query],
        params: ScrapeParams,
    ) -> impl Future<Output = Result<Vec<QueryResult>, AppError>> + Send;

    /// Short backend name, reported by the health endpoint.
    fn name(&self) -> &'static str;
}
