pub mod error;
pub mod models;
pub mod scrape;
pub mod traits;

#[cfg(any(test, feature = "testutil"))]
pub mod testutil;

pub use error::AppError;
pub use models::{
    AgencyProfile, AgencyReview, PLACEHOLDER_DATA, Query, QueryResult, ScrapeBatch, ScrapeParams,
};
pub use scrape::ScrapeService;
pub use traits::AgencyScraper;
