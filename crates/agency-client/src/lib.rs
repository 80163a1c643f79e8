pub mod backend;
pub mod config;
pub mod navigation;
pub mod placeholder;
pub mod profile;

#[cfg(feature = "browser")]
pub mod browser;

pub use backend::{BackendKind, ScraperBackend};
pub use config::DesignRushConfig;
pub use placeholder::PlaceholderScraper;
pub use profile::parse_profile;

#[cfg(feature = "browser")]
pub use browser::DesignRushScraper;
