use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use agency_core::error::AppError;
use agency_core::models::{AgencyProfile, Query, QueryResult, ScrapeParams};
use agency_core::traits::AgencyScraper;
use chromiumoxide::{Browser, BrowserConfig, Element, Page};
use futures::StreamExt;
use rand::Rng;
use rand::seq::SliceRandom;

use crate::config::DesignRushConfig;
use crate::navigation::{
    aborts_batch, check_page, find_label, resolve_href, selectors, walk_limits,
};
use crate::profile::parse_profile;

const USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.0 Safari/605.1.15",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:124.0) Gecko/20100101 Firefox/124.0",
];

/// Headless-Chromium scraper for the DesignRush agency directory.
///
/// For every query it opens the directory home page, picks the nav category
/// matching `category`, follows the sub-category link matching `business`,
/// then walks up to `max_pages` listing pages, opening up to
/// `max_items_per_page` agency profiles on each.
///
/// A single Chromium process is shared across all clones; each query and
/// each profile gets its own tab.
///
/// # Example
///
/// ```rust,no_run
/// use agency_client::{DesignRushConfig, DesignRushScraper};
/// use agency_core::models::{Query, ScrapeParams};
/// use agency_core::traits::AgencyScraper;
///
/// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
/// let scraper = DesignRushScraper::launch(DesignRushConfig::default()).await?;
/// let results = scraper
///     .scrape(&[Query::new("Web Design", "Digital")], ScrapeParams::default())
///     .await?;
/// println!("{}", serde_json::to_string_pretty(&results)?);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct DesignRushScraper {
    browser: Arc<Browser>,
    config: DesignRushConfig,
}

impl DesignRushScraper {
    /// Launches Chromium with a randomly chosen desktop user agent and window size.
    pub async fn launch(config: DesignRushConfig) -> Result<Self, AppError> {
        let (user_agent, width, height) = {
            let mut rng = rand::thread_rng();
            let user_agent = USER_AGENTS.choose(&mut rng).copied().unwrap_or(USER_AGENTS[0]);
            (user_agent, rng.gen_range(1200..=1600), rng.gen_range(700..=1000))
        };

        let mut builder = BrowserConfig::builder()
            .no_sandbox()
            .disable_default_args()
            .window_size(width, height);

        if let Some(bin) = find_chrome_binary() {
            tracing::info!("Using Chrome binary: {}", bin.display());
            builder = builder.chrome_executable(bin);
        }

        builder = builder
            .arg("--disable-gpu")
            .arg("--disable-dev-shm-usage")
            .arg("--disable-extensions")
            .arg("--disable-background-timer-throttling")
            .arg("--disable-renderer-backgrounding")
            .arg("--disable-features=TranslateUI")
            .arg("--disable-blink-features=AutomationControlled")
            .arg("--no-first-run")
            .arg(format!("--user-agent={user_agent}"));

        builder = if config.headless {
            builder.arg("--headless=new")
        } else {
            builder.with_head().arg("--start-maximized")
        };

        let browser_config = builder
            .build()
            .map_err(|e| AppError::BrowserError(format!("Browser config error: {e}")))?;

        let (browser, mut handler) = Browser::launch(browser_config)
            .await
            .map_err(|e| AppError::BrowserError(format!("Failed to launch browser: {e}")))?;

        // The CDP handler must be polled continuously for the connection to work.
        tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    tracing::warn!("Browser CDP handler error: {event:?}");
                    break;
                }
            }
        });

        tracing::info!(headless = config.headless, %user_agent, "Browser launched");

        Ok(Self {
            browser: Arc::new(browser),
            config,
        })
    }

    async fn scrape_query(
        &self,
        query: &Query,
        params: ScrapeParams,
    ) -> Result<Vec<AgencyProfile>, AppError> {
        let page = self.open(&self.config.base_url).await?;
        let result = self.walk_directory(&page, query, params).await;
        let _ = page.close().await;
        result
    }

    async fn walk_directory(
        &self,
        page: &Page,
        query: &Query,
        params: ScrapeParams,
    ) -> Result<Vec<AgencyProfile>, AppError> {
        self.pause().await;

        // 1. Main category in the nav reveals its section.
        let categories = page
            .find_elements(selectors::NAV_CATEGORY)
            .await
            .map_err(browser_err)?;
        let Some(category) = self.pick(&categories, &query.category).await? else {
            tracing::warn!(category = %query.category, "Category not found, skipping");
            return Ok(Vec::new());
        };
        category.click().await.map_err(browser_err)?;
        self.pause().await;

        // 2. Sub-category link inside the revealed section.
        let links = page
            .find_elements(selectors::SECTION_LINK)
            .await
            .map_err(browser_err)?;
        let Some(link) = self.pick(&links, &query.business).await? else {
            tracing::warn!(
                business = %query.business,
                category = %query.category,
                "Business not found in category, skipping"
            );
            return Ok(Vec::new());
        };
        match link.attribute("href").await.map_err(browser_err)? {
            Some(href) => {
                let url = resolve_href(&self.current_url(page).await?, &href)?;
                self.goto(page, &url).await?;
            }
            None => {
                link.click().await.map_err(browser_err)?;
                self.timed(async {
                    page.wait_for_navigation().await.map_err(browser_err)?;
                    Ok(())
                })
                .await?;
            }
        }
        self.pause().await;

        // 3. Listing pages.
        let (max_pages, max_items) = walk_limits(params);
        let mut profiles = Vec::new();
        for page_no in 1..=max_pages {
            let listing_url = self.current_url(page).await?;
            self.check_loaded(page, &listing_url).await?;
            tracing::debug!(page = page_no, url = %listing_url, "Scanning listing page");

            for index in 0..max_items {
                let buttons = page
                    .find_elements(selectors::AGENCY_BUTTON)
                    .await
                    .map_err(browser_err)?;
                let Some(button) = buttons.get(index) else {
                    tracing::debug!(index, "No more agency items");
                    break;
                };

                match self.scrape_item(page, button, &listing_url).await {
                    Ok(profile) => {
                        tracing::info!(title = %profile.title, "Scraped agency");
                        profiles.push(profile);
                    }
                    Err(e) if aborts_batch(&e) => return Err(e),
                    Err(e) => {
                        tracing::warn!(item = index + 1, "Skipping agency: {e}");
                    }
                }
                self.close_overlay(page).await;
            }

            if page_no == max_pages {
                break;
            }
            let next = page
                .find_elements(selectors::NEXT_PAGE)
                .await
                .map_err(browser_err)?;
            let next_href = match next.first() {
                Some(el) => el.attribute("href").await.map_err(browser_err)?,
                None => None,
            };
            let Some(href) = next_href else {
                tracing::debug!(page = page_no, "No further listing pages");
                break;
            };
            self.goto(page, &resolve_href(&listing_url, &href)?).await?;
            self.pause().await;
        }

        Ok(profiles)
    }

    /// Open one agency overlay, follow its profile link in a new tab and parse it.
    async fn scrape_item(
        &self,
        page: &Page,
        button: &Element,
        listing_url: &str,
    ) -> Result<AgencyProfile, AppError> {
        button.scroll_into_view().await.map_err(browser_err)?;
        self.pause_between(300, 600).await;
        button.click().await.map_err(browser_err)?;
        self.pause().await;

        let link = page
            .find_element(selectors::PROFILE_LINK)
            .await
            .map_err(|e| AppError::ParseError(format!("Profile link not found in overlay: {e}")))?;
        let href = link
            .attribute("href")
            .await
            .map_err(browser_err)?
            .ok_or_else(|| AppError::ParseError("Profile link has no href".into()))?;
        let profile_url = resolve_href(listing_url, &href)?;

        let profile_page = self.open(&profile_url).await?;
        self.pause().await;
        let html = profile_page.content().await.map_err(browser_err);
        let _ = profile_page.close().await;

        let mut profile = parse_profile(&html?)?;
        if !profile.website.is_empty() {
            profile.website =
                resolve_href(&profile_url, &profile.website).unwrap_or(profile.website);
        }
        Ok(profile)
    }

    /// Close the agency overlay: dedicated back button, generic close buttons, then Escape.
    async fn close_overlay(&self, page: &Page) {
        for css in [selectors::OVERLAY_BACK, selectors::OVERLAY_CLOSE] {
            if let Ok(button) = page.find_element(css).await {
                if button.click().await.is_ok() {
                    self.pause().await;
                    return;
                }
            }
        }
        if let Ok(body) = page.find_element("body").await {
            let _ = body.press_key("Escape").await;
        }
        self.pause().await;
    }

    /// The first element whose visible text contains `needle`.
    async fn pick<'a>(
        &self,
        elements: &'a [Element],
        needle: &str,
    ) -> Result<Option<&'a Element>, AppError> {
        let mut labels = Vec::with_capacity(elements.len());
        for el in elements {
            labels.push(el.inner_text().await.map_err(browser_err)?.unwrap_or_default());
        }
        Ok(find_label(labels.as_slice(), needle).map(|i| &elements[i]))
    }

    async fn open(&self, url: &str) -> Result<Page, AppError> {
        let page = self
            .timed(async {
                self.browser
                    .new_page(url)
                    .await
                    .map_err(|e| AppError::NetworkError(format!("Failed to navigate to {url}: {e}")))
            })
            .await?;
        if let Err(e) = self.check_loaded(&page, url).await {
            let _ = page.close().await;
            return Err(e);
        }
        Ok(page)
    }

    async fn goto(&self, page: &Page, url: &str) -> Result<(), AppError> {
        self.timed(async {
            page.goto(url)
                .await
                .map_err(|e| AppError::NetworkError(format!("Failed to navigate to {url}: {e}")))?;
            Ok(())
        })
        .await?;
        self.check_loaded(page, url).await
    }

    async fn check_loaded(&self, page: &Page, url: &str) -> Result<(), AppError> {
        let title = page
            .get_title()
            .await
            .map_err(browser_err)?
            .unwrap_or_default();
        check_page(url, &title)
    }

    async fn current_url(&self, page: &Page) -> Result<String, AppError> {
        Ok(page
            .url()
            .await
            .map_err(browser_err)?
            .unwrap_or_else(|| self.config.base_url.clone()))
    }

    async fn timed<T>(
        &self,
        fut: impl Future<Output = Result<T, AppError>>,
    ) -> Result<T, AppError> {
        let timeout = self.config.navigation_timeout;
        match tokio::time::timeout(timeout, fut).await {
            Ok(inner) => inner,
            Err(_) => Err(AppError::Timeout(timeout.as_secs())),
        }
    }

    async fn pause(&self) {
        self.pause_between(self.config.min_delay_ms, self.config.max_delay_ms)
            .await;
    }

    async fn pause_between(&self, min_ms: u64, max_ms: u64) {
        let ms = rand::thread_rng().gen_range(min_ms..=max_ms);
        tokio::time::sleep(Duration::from_millis(ms)).await;
    }
}

impl AgencyScraper for DesignRushScraper {
    async fn scrape(
        &self,
        queries: &[Query],
        params: ScrapeParams,
    ) -> Result<Vec<QueryResult>, AppError> {
        let mut results = Vec::with_capacity(queries.len());
        for query in queries {
            tracing::info!(
                business = %query.business,
                category = %query.category,
                "Processing query"
            );
            let profiles = self.scrape_query(query, params).await?;
            tracing::info!(agencies = profiles.len(), "Query complete");
            results.push(QueryResult::new(
                query,
                params,
                serde_json::to_value(&profiles)?,
            ));
            self.pause().await;
        }
        Ok(results)
    }

    fn name(&self) -> &'static str {
        "browser"
    }
}

fn browser_err(e: chromiumoxide::error::CdpError) -> AppError {
    AppError::BrowserError(e.to_string())
}

/// Locate a Chrome/Chromium binary: `CHROME_BIN` first, then well-known paths.
/// `None` lets `chromiumoxide` do its own lookup.
fn find_chrome_binary() -> Option<PathBuf> {
    if let Ok(p) = std::env::var("CHROME_BIN") {
        let path = PathBuf::from(p);
        if path.exists() {
            return Some(path);
        }
    }

    [
        // Snap wrapper strips headless flags; use the real binary inside.
        "/snap/chromium/current/usr/lib/chromium-browser/chrome",
        "/usr/bin/google-chrome-stable",
        "/usr/bin/google-chrome",
        "/usr/bin/chromium",
        "/usr/bin/chromium-browser",
    ]
    .iter()
    .map(PathBuf::from)
    .find(|p| p.exists())
}
