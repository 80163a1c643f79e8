use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Value placed in `QueryResult::data` by the placeholder scraper.
pub const PLACEHOLDER_DATA: &str = "scraped data here";

pub const DEFAULT_MAX_PAGES: i64 = 1;
pub const DEFAULT_MAX_ITEMS_PER_PAGE: i64 = 3;

/// One (business, category) search pair submitted by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Query {
    pub business: String,
    pub category: String,
}

impl Query {
    pub fn new(business: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            business: business.into(),
            category: category.into(),
        }
    }

    /// Label used as the first column of CSV exports.
    pub fn search_name(&self) -> String {
        format!("{} | {}", self.business, self.category)
    }
}

/// Pagination and item limits after defaults have been applied.
///
/// Values are carried through exactly as submitted and echoed in every
/// [`QueryResult`]; scrapers that walk pages decide how to treat values
/// below one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScrapeParams {
    pub max_pages: i64,
    pub max_items_per_page: i64,
}

impl Default for ScrapeParams {
    fn default() -> Self {
        Self {
            max_pages: DEFAULT_MAX_PAGES,
            max_items_per_page: DEFAULT_MAX_ITEMS_PER_PAGE,
        }
    }
}

/// A batch of queries plus optional limits, as submitted by a caller.
///
/// `queries` is optional so that an absent array and an empty one fail the
/// same way in [`ScrapeBatch::validate`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScrapeBatch {
    #[serde(default)]
    pub queries: Option<Vec<Query>>,
    #[serde(default)]
    pub max_pages: Option<i64>,
    #[serde(default)]
    pub max_items_per_page: Option<i64>,
}

impl ScrapeBatch {
    pub fn new(queries: Vec<Query>) -> Self {
        Self {
            queries: Some(queries),
            ..Self::default()
        }
    }

    pub fn with_max_pages(mut self, max_pages: i64) -> Self {
        self.max_pages = Some(max_pages);
        self
    }

    pub fn with_max_items_per_page(mut self, max_items_per_page: i64) -> Self {
        self.max_items_per_page = Some(max_items_per_page);
        self
    }

    /// Check the batch and substitute defaults for absent limits.
    pub fn validate(self) -> Result<(Vec<Query>, ScrapeParams), AppError> {
        let queries = match self.queries {
            Some(queries) if !queries.is_empty() => queries,
            _ => return Err(AppError::InvalidQueries),
        };

        Ok((
            queries,
            ScrapeParams {
                max_pages: self.max_pages.unwrap_or(DEFAULT_MAX_PAGES),
                max_items_per_page: self
                    .max_items_per_page
                    .unwrap_or(DEFAULT_MAX_ITEMS_PER_PAGE),
            },
        ))
    }
}

/// Per-query output returned to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryResult {
    pub business: String,
    pub category: String,
    pub max_pages: i64,
    pub max_items_per_page: i64,
    /// Placeholder string, or a JSON array of [`AgencyProfile`] for real scrapers.
    pub data: serde_json::Value,
}

impl QueryResult {
    pub fn new(query: &Query, params: ScrapeParams, data: serde_json::Value) -> Self {
        Self {
            business: query.business.clone(),
            category: query.category.clone(),
            max_pages: params.max_pages,
            max_items_per_page: params.max_items_per_page,
            data,
        }
    }

    /// Agency profiles carried in `data`, or an empty list when `data` holds
    /// anything else (e.g. the placeholder string).
    pub fn profiles(&self) -> Vec<AgencyProfile> {
        serde_json::from_value(self.data.clone()).unwrap_or_default()
    }
}

/// An agency profile scraped from a directory listing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AgencyProfile {
    pub title: String,
    pub address: String,
    pub website: String,
    pub employees: String,
    pub services: String,
    pub industries: String,
    pub client_types: String,
    pub review_rating: String,
    pub review_count: String,
    pub areas_of_expertise: String,
    pub reviews: Vec<AgencyReview>,
}

/// A client review shown on an agency profile.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AgencyReview {
    pub author_name: String,
    pub author_position: String,
    #[serde(rename = "reviewItemTitle")]
    pub item_title: String,
    pub review_type: String,
    #[serde(rename = "reviewDescription")]
    pub description: String,
}
