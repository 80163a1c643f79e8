//! Test utilities: mock implementations of [`AgencyScraper`].
//!
//! Mocks use `Arc<Mutex<_>>` for interior mutability so tests can assert on
//! recorded calls after handing a clone to the service.

use std::sync::{Arc, Mutex};

use crate::error::AppError;
use crate::models::{PLACEHOLDER_DATA, Query, QueryResult, ScrapeParams};
use crate::traits::AgencyScraper;

// ---------------------------------------------------------------------------
// EchoScraper
// ---------------------------------------------------------------------------

/// Echoes each query with the placeholder data and records every call.
#[derive(Clone, Default)]
pub struct EchoScraper {
    pub calls: Arc<Mutex<Vec<(Vec<Query>, ScrapeParams)>>>,
}

impl EchoScraper {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AgencyScraper for EchoScraper {
    async fn scrape(
        &self,
        queries: &[Query],
        params: ScrapeParams,
    ) -> Result<Vec<QueryResult>, AppError> {
        self.calls
            .lock()
            .unwrap()
            .push((queries.to_vec(), params));
        Ok(queries
            .iter()
            .map(|q| QueryResult::new(q, params, PLACEHOLDER_DATA.into()))
            .collect())
    }

    fn name(&self) -> &'static str {
        "echo"
    }
}

// ---------------------------------------------------------------------------
// FailingScraper
// ---------------------------------------------------------------------------

/// Fails the first call with the configured error, then echoes.
#[derive(Clone)]
pub struct FailingScraper {
    error: Arc<Mutex<Option<AppError>>>,
}

impl FailingScraper {
    pub fn new(error: AppError) -> Self {
        Self {
            error: Arc::new(Mutex::new(Some(error))),
        }
    }
}

impl AgencyScraper for FailingScraper {
    async fn scrape(
        &self,
        queries: &[Query],
        params: ScrapeParams,
    ) -> Result<Vec<QueryResult>, AppError> {
        let mut err = self.error.lock().unwrap();
        if let Some(e) = err.take() {
            return Err(e);
        }
        Ok(queries
            .iter()
            .map(|q| QueryResult::new(q, params, PLACEHOLDER_DATA.into()))
            .collect())
    }

    fn name(&self) -> &'static str {
        "failing"
    }
}

// ---------------------------------------------------------------------------
// TruncatingScraper
// ---------------------------------------------------------------------------

/// Returns a result for the first query only.
#[derive(Clone)]
pub struct TruncatingScraper;

impl AgencyScraper for TruncatingScraper {
    async fn scrape(
        &self,
        queries: &[Query],
        params: ScrapeParams,
    ) -> Result<Vec<QueryResult>, AppError> {
        Ok(queries
            .iter()
            .take(1)
            .map(|q| QueryResult::new(q, params, PLACEHOLDER_DATA.into()))
            .collect())
    }

    fn name(&self) -> &'static str {
        "truncating"
    }
}
