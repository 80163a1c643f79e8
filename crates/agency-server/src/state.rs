use agency_core::{AgencyScraper, ScrapeService};

/// Shared application state, available to all route handlers via `State<Arc<AppState<S>>>`.
pub struct AppState<S: AgencyScraper> {
    pub service: ScrapeService<S>,
    /// API key protecting `POST /scrape` (None = open access).
    pub api_key: Option<String>,
}

impl<S: AgencyScraper> AppState<S> {
    pub fn new(scraper: S, api_key: Option<String>) -> Self {
        Self {
            service: ScrapeService::new(scraper),
            api_key,
        }
    }
}
