//! Browser-independent helpers for walking the agency directory.

use agency_core::{AppError, ScrapeParams};
use url::Url;

/// CSS selectors for the DesignRush directory pages.
pub mod selectors {
    pub const NAV_CATEGORY: &str = ".js-service-category-nav ul li";
    pub const SECTION_LINK: &str = ".section-item.active ul li a";
    pub const AGENCY_BUTTON: &str = "button.btn-view-portfolio.js-item-overlay-open";
    pub const PROFILE_LINK: &str = "a.view-profile.js--agency-profile-link";
    pub const OVERLAY_BACK: &str = ".item-overlay--close.js-item-overlay-close";
    pub const OVERLAY_CLOSE: &str = ".overlay-close, .modal-close, .js-overlay-close";
    pub const NEXT_PAGE: &str = "a[rel=\"next\"]";
}

/// Titles served by bot-protection layers instead of the requested page.
const BLOCK_MARKERS: &[&str] = &[
    "just a moment",
    "attention required",
    "access denied",
    "are you a robot",
    "captcha",
];

const NOT_FOUND_MARKERS: &[&str] = &["404", "page not found"];

/// Case-insensitive substring match between a link label and a query term.
pub fn label_matches(label: &str, needle: &str) -> bool {
    let needle = needle.trim();
    !needle.is_empty() && label.to_lowercase().contains(&needle.to_lowercase())
}

/// Index of the first label that matches `needle`.
pub fn find_label<S: AsRef<str>>(labels: &[S], needle: &str) -> Option<usize> {
    labels.iter().position(|l| label_matches(l.as_ref(), needle))
}

/// Classify a loaded page by its title.
///
/// Returns `Blocked` for bot challenges and `PageNotFound` for 404 pages.
pub fn check_page(url: &str, title: &str) -> Result<(), AppError> {
    let lower = title.to_lowercase();
    if BLOCK_MARKERS.iter().any(|m| lower.contains(m)) {
        return Err(AppError::Blocked(format!("{url} served \"{}\"", title.trim())));
    }
    if NOT_FOUND_MARKERS.iter().any(|m| lower.contains(m)) {
        return Err(AppError::PageNotFound(url.to_string()));
    }
    Ok(())
}

/// Page and item counts to walk for `params`.
///
/// Limits are echoed to callers as submitted; anything below one still walks
/// the first listing page and opens its first agency.
pub fn walk_limits(params: ScrapeParams) -> (i64, usize) {
    let pages = params.max_pages.max(1);
    let items = usize::try_from(params.max_items_per_page.max(1)).unwrap_or(usize::MAX);
    (pages, items)
}

/// Whether a failure while scraping a single agency should abort the batch.
///
/// Bot challenges and navigation failures mean the session is no longer
/// usable; anything else (missing overlay, unparseable profile) only loses
/// that agency.
pub fn aborts_batch(err: &AppError) -> bool {
    matches!(
        err,
        AppError::Blocked(_) | AppError::Timeout(_) | AppError::NetworkError(_)
    )
}

/// Resolve a possibly relative `href` against the page it was found on.
pub fn resolve_href(base: &str, href: &str) -> Result<String, AppError> {
    let base = Url::parse(base).map_err(|e| AppError::ParseError(format!("Invalid URL {base}: {e}")))?;
    base.join(href.trim())
        .map(|u| u.to_string())
        .map_err(|e| AppError::ParseError(format!("Invalid link '{href}': {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_matches_case_insensitive() {
        assert!(label_matches("Digital Marketing", "marketing"));
        assert!(label_matches("  WEB DESIGN ", "Web design"));
        assert!(!label_matches("Software Development", "Marketing"));
        assert!(!label_matches("Anything", "   "));
    }

    #[test]
    fn test_find_label_returns_first_match() {
        let labels = ["Branding", "Web Design", "Web Design Agencies"];
        assert_eq!(find_label(&labels[..], "web design"), Some(1));
        assert_eq!(find_label(&labels[..], "seo"), None);
    }

    #[test]
    fn test_check_page() {
        assert!(check_page("https://x.test", "Top Web Design Agencies").is_ok());
        assert!(matches!(
            check_page("https://x.test", "Just a moment..."),
            Err(AppError::Blocked(_))
        ));
        assert!(matches!(
            check_page("https://x.test", "Access Denied"),
            Err(AppError::Blocked(_))
        ));
        assert!(matches!(
            check_page("https://x.test/missing", "404 - Page Not Found"),
            Err(AppError::PageNotFound(_))
        ));
    }

    #[test]
    fn test_walk_limits_clamps_below_one() {
        let limits = |max_pages, max_items_per_page| {
            walk_limits(ScrapeParams {
                max_pages,
                max_items_per_page,
            })
        };
        assert_eq!(limits(3, 5), (3, 5));
        assert_eq!(limits(0, 0), (1, 1));
        assert_eq!(limits(-4, -1), (1, 1));
    }

    #[test]
    fn test_navigation_failures_abort_batch() {
        assert!(aborts_batch(&AppError::Blocked("captcha".into())));
        assert!(aborts_batch(&AppError::Timeout(30)));
        assert!(aborts_batch(&AppError::NetworkError("reset".into())));
        assert!(!aborts_batch(&AppError::ParseError("no title".into())));
        assert!(!aborts_batch(&AppError::BrowserError("click failed".into())));
    }

    #[test]
    fn test_resolve_href() {
        assert_eq!(
            resolve_href("https://www.designrush.com/agency/web-design", "/agency/profile/acme")
                .unwrap(),
            "https://www.designrush.com/agency/profile/acme"
        );
        assert_eq!(
            resolve_href("https://www.designrush.com/", "https://acme.test/").unwrap(),
            "https://acme.test/"
        );
        assert!(resolve_href("not a url", "/x").is_err());
    }
}
