use crate::error::AppError;
use crate::models::{QueryResult, ScrapeBatch};
use crate::traits::AgencyScraper;

/// Runs a scrape batch: validate → apply defaults → delegate → check result count.
///
/// Generic over the scraper so that the HTTP server, the CLI and the tests
/// share the same pipeline with different backends.
#[derive(Clone)]
pub struct ScrapeService<S>
where
    S: AgencyScraper,
{
    scraper: S,
}

impl<S> ScrapeService<S>
where
    S: AgencyScraper,
{
    pub fn new(scraper: S) -> Self {
        Self { scraper }
    }

    pub fn scraper(&self) -> &S {
        &self.scraper
    }

    /// Validate the batch and scrape every query in it.
    ///
    /// Fails with [`AppError::InvalidQueries`] for a missing or empty batch,
    /// and with the scraper's own error for anything else. No partial results
    /// are returned.
    pub async fn run(&self, batch: ScrapeBatch) -> Result<Vec<QueryResult>, AppError> {
        let (queries, params) = batch.validate()?;

        tracing::info!(
            queries = queries.len(),
            max_pages = params.max_pages,
            max_items_per_page = params.max_items_per_page,
            scraper = self.scraper.name(),
            "Scraping batch"
        );

        let results = self.scraper.scrape(&queries, params).await?;

        if results.len() != queries.len() {
            return Err(AppError::Generic(format!(
                "Scraper returned {} results for {} queries",
                results.len(),
                queries.len()
            )));
        }

        tracing::info!(results = results.len(), "Batch complete");
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PLACEHOLDER_DATA, Query};
    use crate::testutil::*;

    fn acme_batch() -> ScrapeBatch {
        ScrapeBatch::new(vec![
            Query::new("Acme", "Plumbing"),
            Query::new("Globex", "Marketing"),
            Query::new("Initech", "Software"),
        ])
    }

    #[tokio::test]
    async fn happy_path_preserves_order() {
        let svc = ScrapeService::new(EchoScraper::new());

        let results = svc.run(acme_batch()).await.unwrap();

        let names: Vec<_> = results.iter().map(|r| r.business.as_str()).collect();
        assert_eq!(names, ["Acme", "Globex", "Initech"]);
        assert!(results.iter().all(|r| r.data == PLACEHOLDER_DATA));
    }

    #[tokio::test]
    async fn defaults_reach_the_scraper() {
        let scraper = EchoScraper::new();
        let svc = ScrapeService::new(scraper.clone());

        svc.run(acme_batch()).await.unwrap();

        let calls = scraper.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].1.max_pages, 1);
        assert_eq!(calls[0].1.max_items_per_page, 3);
    }

    #[tokio::test]
    async fn explicit_limits_are_echoed() {
        let svc = ScrapeService::new(EchoScraper::new());

        let results = svc
            .run(acme_batch().with_max_pages(2).with_max_items_per_page(5))
            .await
            .unwrap();

        assert!(
            results
                .iter()
                .all(|r| r.max_pages == 2 && r.max_items_per_page == 5)
        );
    }

    #[tokio::test]
    async fn empty_batch_never_reaches_the_scraper() {
        let scraper = EchoScraper::new();
        let svc = ScrapeService::new(scraper.clone());

        let err = svc.run(ScrapeBatch::new(vec![])).await.unwrap_err();

        assert!(matches!(err, AppError::InvalidQueries));
        assert!(scraper.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn scraper_error_propagates() {
        let svc = ScrapeService::new(FailingScraper::new(AppError::Blocked(
            "captcha page".into(),
        )));

        let err = svc.run(acme_batch()).await.unwrap_err();

        assert!(matches!(err, AppError::Blocked(_)));
    }

    #[tokio::test]
    async fn short_result_list_is_an_error() {
        let svc = ScrapeService::new(TruncatingScraper);

        let err = svc.run(acme_batch()).await.unwrap_err();

        assert_eq!(err.to_string(), "Scraper returned 1 results for 3 queries");
    }
}
