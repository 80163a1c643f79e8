//! Parses a rendered agency profile page into an [`AgencyProfile`].
//!
//! Each field is read from a list of candidate selectors; the first one that
//! yields non-empty text wins. Missing fields come back as empty strings.

use agency_core::AppError;
use agency_core::models::{AgencyProfile, AgencyReview};
use scraper::{ElementRef, Html, Selector};

const TITLE: &[&str] = &[".company-title", "h1", ".agency-title", ".profile-title"];
const ADDRESS: &[&str] = &[".company-address", ".address", "[class*=\"address\"]"];
const SERVICES: &[&str] = &[".services-list li", ".services li", "[class*=\"service\"] li"];
const INDUSTRIES: &[&str] = &[
    ".industries-list li",
    ".industries li",
    "[class*=\"industry\"] li",
];
const CLIENT_TYPES: &[&str] = &[
    ".client-types-list li",
    ".clients li",
    "[class*=\"client\"] li",
];

/// Parse profile HTML into an [`AgencyProfile`].
pub fn parse_profile(html: &str) -> Result<AgencyProfile, AppError> {
    let doc = Html::parse_document(html);
    let root = doc.root_element();

    let website = match root.select(&selector(".profile-header--edit a.site")?).next() {
        Some(el) => el.value().attr("href").unwrap_or_default().trim().to_string(),
        None => String::new(),
    };

    let (review_rating, review_count) = parse_review_summary(root)?;

    Ok(AgencyProfile {
        title: first_text(root, TITLE)?,
        address: first_text(root, ADDRESS)?,
        website,
        employees: parse_employees(root)?,
        services: first_list(root, SERVICES)?,
        industries: first_list(root, INDUSTRIES)?,
        client_types: first_list(root, CLIENT_TYPES)?,
        review_rating,
        review_count,
        areas_of_expertise: joined(root, &selector(".aoe__tab-item.js-expertise-tab span")?),
        reviews: parse_reviews(root)?,
    })
}

/// Extract `N` from text such as `"(12 reviews)"` or `"(1 review)"`.
pub fn parse_review_count(text: &str) -> Option<String> {
    text.match_indices('(').find_map(|(start, _)| {
        let rest = &text[start + 1..];
        let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
        if digits.is_empty() {
            return None;
        }
        let tail = rest[digits.len()..].strip_prefix(" review")?;
        let tail = tail.strip_prefix('s').unwrap_or(tail);
        tail.starts_with(')').then_some(digits)
    })
}

fn selector(css: &str) -> Result<Selector, AppError> {
    Selector::parse(css).map_err(|e| AppError::ParseError(format!("Invalid selector '{css}': {e}")))
}

/// Element text with runs of whitespace collapsed.
fn text(el: ElementRef<'_>) -> String {
    el.text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

fn first_text(root: ElementRef<'_>, candidates: &[&str]) -> Result<String, AppError> {
    for css in candidates {
        if let Some(el) = root.select(&selector(css)?).next() {
            let t = text(el);
            if !t.is_empty() {
                return Ok(t);
            }
        }
    }
    Ok(String::new())
}

fn joined(root: ElementRef<'_>, sel: &Selector) -> String {
    root.select(sel)
        .map(text)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}

fn first_list(root: ElementRef<'_>, candidates: &[&str]) -> Result<String, AppError> {
    for css in candidates {
        let list = joined(root, &selector(css)?);
        if !list.is_empty() {
            return Ok(list);
        }
    }
    Ok(String::new())
}

fn parse_employees(root: ElementRef<'_>) -> Result<String, AppError> {
    let item_sel = selector(".overview-adds--item")?;
    let title_sel = selector(".overview-adds--title")?;
    let text_sel = selector(".overview-adds--text")?;

    let employees = root
        .select(&item_sel)
        .find(|item| {
            item.select(&title_sel)
                .next()
                .is_some_and(|t| text(t).to_lowercase().contains("number of employees"))
        })
        .and_then(|item| item.select(&text_sel).next())
        .map(text)
        .unwrap_or_default();

    Ok(employees)
}

fn field(item: ElementRef<'_>, sel: &Selector) -> String {
    item.select(sel).next().map(text).unwrap_or_default()
}

fn parse_review_summary(root: ElementRef<'_>) -> Result<(String, String), AppError> {
    let Some(block) = root.select(&selector(".profile-header--reviews")?).next() else {
        return Ok((String::new(), String::new()));
    };

    let rating = block
        .select(&selector(".review-rating")?)
        .next()
        .map(text)
        .unwrap_or_default();
    let count = block
        .select(&selector(".review-count")?)
        .next()
        .and_then(|el| parse_review_count(&text(el)))
        .unwrap_or_default();

    Ok((rating, count))
}

fn parse_reviews(root: ElementRef<'_>) -> Result<Vec<AgencyReview>, AppError> {
    let item_sel = selector(".review-list.js-review-list > .tab-review--list-item")?;
    let author_sel = selector(".review-author-name")?;
    let position_sel = selector(".review-author-position")?;
    let title_sel = selector(".item-title")?;
    let type_sel = selector(".item-type span")?;
    let desc_sel = selector(".tab-review--item-description.desktop")?;

    Ok(root
        .select(&item_sel)
        .map(|item| AgencyReview {
            author_name: field(item, &author_sel),
            author_position: field(item, &position_sel),
            item_title: field(item, &title_sel),
            review_type: field(item, &type_sel),
            description: field(item, &desc_sel),
        })
        .collect())
}
