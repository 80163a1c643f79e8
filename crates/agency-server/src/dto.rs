use serde::{Deserialize, Serialize};

use agency_core::models::{Query, QueryResult, ScrapeBatch};

// ---------------------------------------------------------------------------
// Scrape
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct QueryItem {
    /// Business (sub-category) to search for, e.g. "Web Design"
    pub business: String,
    /// Directory category containing the business, e.g. "Digital"
    pub category: String,
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct ScrapeRequest {
    /// Queries to scrape, in order (must be non-empty)
    #[serde(default)]
    pub queries: Option<Vec<QueryItem>>,
    /// Listing pages to walk per query (default: 1)
    #[serde(default)]
    pub max_pages: Option<i64>,
    /// Agencies to open per listing page (default: 3)
    #[serde(default)]
    pub max_items_per_page: Option<i64>,
}

impl From<ScrapeRequest> for ScrapeBatch {
    fn from(req: ScrapeRequest) -> Self {
        Self {
            queries: req.queries.map(|queries| {
                queries
                    .into_iter()
                    .map(|q| Query::new(q.business, q.category))
                    .collect()
            }),
            max_pages: req.max_pages,
            max_items_per_page: req.max_items_per_page,
        }
    }
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ResultItem {
    pub business: String,
    pub category: String,
    pub max_pages: i64,
    pub max_items_per_page: i64,
    /// "scraped data here" for the placeholder backend, agency profiles otherwise
    pub data: serde_json::Value,
}

impl From<QueryResult> for ResultItem {
    fn from(r: QueryResult) -> Self {
        Self {
            business: r.business,
            category: r.category,
            max_pages: r.max_pages,
            max_items_per_page: r.max_items_per_page,
            data: r.data,
        }
    }
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ScrapeResponse {
    pub results: Vec<ResultItem>,
}

// ---------------------------------------------------------------------------
// Health
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct HealthResponse {
    pub status: &'static str,
    pub scraper: &'static str,
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub detail: String,
}
