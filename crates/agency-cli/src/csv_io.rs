//! CSV input of queries and CSV output of scraped agencies and reviews.

use std::fs::{File, OpenOptions};
use std::io::Read;
use std::path::Path;

use agency_core::AppError;
use agency_core::models::{Query, QueryResult};

pub const AGENCY_HEADERS: &[&str] = &[
    "Search Name",
    "Title",
    "Address",
    "Website",
    "Employees",
    "Services",
    "Industries",
    "Client Types",
    "Review Rating",
    "Review Count",
    "Areas of Expertise",
];

pub const REVIEW_HEADERS: &[&str] = &[
    "Search Name",
    "Agency Title",
    "Author Name",
    "Author Position",
    "Review Item Title",
    "Review Type",
    "Review Description",
];

/// How [`write_rows`] treated the target file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    /// File was missing or empty; headers were written first.
    Created,
    /// File already held data; rows were appended without headers.
    Appended,
}

fn csv_err(e: impl std::fmt::Display) -> AppError {
    AppError::CsvError(e.to_string())
}

/// Read `business, category` rows from a CSV file with a header row.
pub fn read_queries(path: &Path) -> Result<Vec<Query>, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::CsvError(format!("Failed to open {}: {e}", path.display())))?;
    read_queries_from(file)
}

/// Rows with fewer than two columns or a blank cell are skipped.
pub fn read_queries_from<R: Read>(reader: R) -> Result<Vec<Query>, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut queries = Vec::new();
    for record in reader.records() {
        let record = record.map_err(csv_err)?;
        match (record.get(0), record.get(1)) {
            (Some(business), Some(category)) if !business.is_empty() && !category.is_empty() => {
                queries.push(Query::new(business, category));
            }
            _ => tracing::debug!(?record, "Skipping incomplete row"),
        }
    }
    Ok(queries)
}

/// One row per scraped agency, in result order.
pub fn agency_rows(results: &[QueryResult]) -> Vec<Vec<String>> {
    results
        .iter()
        .flat_map(|r| {
            let search_name = search_name(r);
            r.profiles().into_iter().map(move |p| {
                vec![
                    search_name.clone(),
                    p.title,
                    p.address,
                    p.website,
                    p.employees,
                    p.services,
                    p.industries,
                    p.client_types,
                    p.review_rating,
                    p.review_count,
                    p.areas_of_expertise,
                ]
            })
        })
        .collect()
}

/// One row per review across all scraped agencies.
pub fn review_rows(results: &[QueryResult]) -> Vec<Vec<String>> {
    let mut rows = Vec::new();
    for result in results {
        let search_name = search_name(result);
        for profile in result.profiles() {
            for review in profile.reviews {
                rows.push(vec![
                    search_name.clone(),
                    profile.title.clone(),
                    review.author_name,
                    review.author_position,
                    review.item_title,
                    review.review_type,
                    review.description,
                ]);
            }
        }
    }
    rows
}

fn search_name(result: &QueryResult) -> String {
    Query::new(result.business.as_str(), result.category.as_str()).search_name()
}

/// Write rows to `path`, appending when the file already holds data.
pub fn write_rows(
    path: &Path,
    headers: &[&str],
    rows: &[Vec<String>],
) -> Result<WriteMode, AppError> {
    let has_data = std::fs::metadata(path).map(|m| m.len() > 0).unwrap_or(false);

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| AppError::CsvError(format!("Failed to open {}: {e}", path.display())))?;

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(file);

    let mode = if has_data {
        WriteMode::Appended
    } else {
        writer.write_record(headers).map_err(csv_err)?;
        WriteMode::Created
    };

    for row in rows {
        writer.write_record(row).map_err(csv_err)?;
    }
    writer.flush().map_err(csv_err)?;

    Ok(mode)
}
