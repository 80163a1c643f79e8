/// Smoke-test for `DesignRushScraper`.
///
/// Launches Chromium, scrapes one agency for a single query, and prints the
/// result. Override the query with `SMOKE_BUSINESS` / `SMOKE_CATEGORY`.
///
/// Run with:
///   cargo run --example browser_smoke --features browser
use agency_client::{DesignRushConfig, DesignRushScraper};
use agency_core::models::{Query, ScrapeParams};
use agency_core::traits::AgencyScraper;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    let business = std::env::var("SMOKE_BUSINESS").unwrap_or_else(|_| "Web Design".into());
    let category = std::env::var("SMOKE_CATEGORY").unwrap_or_else(|_| "Digital".into());

    println!("Launching browser…");
    let scraper = DesignRushScraper::launch(DesignRushConfig::from_env()?).await?;

    let params = ScrapeParams {
        max_pages: 1,
        max_items_per_page: 1,
    };
    println!("Scraping {business} | {category} …");
    let results = scraper
        .scrape(&[Query::new(business, category)], params)
        .await?;

    assert_eq!(results.len(), 1, "Expected exactly one result");
    let profiles = results[0].profiles();

    println!("OK — {} agency profile(s)", profiles.len());
    println!("{}", serde_json::to_string_pretty(&results)?);
    Ok(())
}
