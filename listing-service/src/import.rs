//! Bulk listing import from CSV
//!
//! The spreadsheet format is header-based and lenient: numeric columns that
//! do not parse become zero, and rows without a title or price are skipped
//! rather than failing the whole upload.

use std::io::Read;

use std::str::FromStr;

use common::decimal::Decimal;
use common::error::{Error, Result};
use common::model::listing::{Agent, ListingStatus, NewListing, PropertyType, MAX_LISTING_ID};
use serde::{Deserialize, Serialize};
use tracing::warn;
#[cfg(feature = "utoipa")]
use utoipa::ToSchema;

/// One spreadsheet row, every column optional
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct CsvListingRecord {
    id: Option<String>,
    title: Option<String>,
    description: Option<String>,
    price: Option<String>,
    location: Option<String>,
    address: Option<String>,
    images: Option<String>,
    image: Option<String>,
    beds: Option<String>,
    baths: Option<String>,
    sqft: Option<String>,
    lot_size: Option<String>,
    year_built: Option<String>,
    #[serde(rename = "type")]
    property_type: Option<String>,
    status: Option<String>,
    features: Option<String>,
    featured: Option<String>,
    agent_name: Option<String>,
    agent_phone: Option<String>,
    agent_email: Option<String>,
    agent_image: Option<String>,
}

/// A row that became a listing payload
#[derive(Debug, Clone)]
pub struct ImportedRow {
    /// 1-based line in the file
    pub line: u64,
    /// Explicit id from the `id` column, if numeric
    pub id: Option<i64>,
    pub listing: NewListing,
}

/// Why a row was rejected
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(ToSchema))]
pub struct RowError {
    pub line: u64,
    pub reason: String,
}

/// Rows parsed from a file, before anything is stored
#[derive(Debug, Default)]
pub struct ParsedImport {
    pub rows: Vec<ImportedRow>,
    /// Rows dropped for missing title or price
    pub incomplete: usize,
    pub errors: Vec<RowError>,
}

/// Outcome of an import
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(ToSchema))]
pub struct ImportReport {
    /// Listings created or overwritten
    pub imported: usize,
    /// Rows not imported, incomplete or rejected
    pub skipped: usize,
    /// Rejected rows with reasons
    pub errors: Vec<RowError>,
}

/// Parse a CSV document into listing payloads.
///
/// Fails only when the header row cannot be read or lacks the `title` and
/// `price` columns; per-row problems are collected in the result.
pub fn parse_listings_csv<R: Read>(reader: R) -> Result<ParsedImport> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader.headers()?.clone();
    for required in ["title", "price"] {
        if !headers.iter().any(|h| h == required) {
            return Err(Error::Import(format!("Missing required column: {}", required)));
        }
    }

    let mut parsed = ParsedImport::default();

    for (index, record) in reader.records().enumerate() {
        // Header occupies line 1
        let fallback_line = index as u64 + 2;
        let record = match record {
            Ok(record) => record,
            Err(e) => {
                let line = e.position().map(|p| p.line()).unwrap_or(fallback_line);
                parsed.errors.push(RowError { line, reason: e.to_string() });
                continue;
            }
        };
        let line = record.position().map(|p| p.line()).unwrap_or(fallback_line);

        let row: CsvListingRecord = match record.deserialize(Some(&headers)) {
            Ok(row) => row,
            Err(e) => {
                parsed.errors.push(RowError { line, reason: e.to_string() });
                continue;
            }
        };

        match convert_record(row) {
            Ok(Some((id, listing))) => parsed.rows.push(ImportedRow { line, id, listing }),
            Ok(None) => {
                warn!("Skipping CSV line {}: missing title or price", line);
                parsed.incomplete += 1;
            }
            Err(reason) => {
                warn!("Rejecting CSV line {}: {}", line, reason);
                parsed.errors.push(RowError { line, reason });
            }
        }
    }

    Ok(parsed)
}

fn convert_record(row: CsvListingRecord) -> std::result::Result<Option<(Option<i64>, NewListing)>, String> {
    let (Some(title), Some(price)) = (non_blank(row.title), non_blank(row.price)) else {
        return Ok(None);
    };

    let property_type = match non_blank(row.property_type) {
        Some(raw) => raw.parse::<PropertyType>().map_err(|e| e.to_string())?,
        None => PropertyType::House,
    };
    let status = match non_blank(row.status) {
        Some(raw) => raw.parse::<ListingStatus>().map_err(|e| e.to_string())?,
        None => ListingStatus::ForSale,
    };

    let mut images = split_list(row.images.as_deref());
    if let Some(cover) = non_blank(row.image) {
        if !images.contains(&cover) {
            images.insert(0, cover);
        }
    }

    let agent = non_blank(row.agent_name).map(|name| Agent {
        name,
        phone: row.agent_phone.unwrap_or_default(),
        email: row.agent_email.unwrap_or_default(),
        image: row.agent_image.unwrap_or_default(),
    });

    let listing = NewListing {
        title,
        description: row.description.unwrap_or_default(),
        price,
        images,
        location: row.location.unwrap_or_default(),
        address: non_blank(row.address),
        beds: lenient_count(row.beds.as_deref()),
        baths: lenient_decimal(row.baths.as_deref()),
        sqft: lenient_count(row.sqft.as_deref()),
        lot_size: non_blank(row.lot_size),
        year_built: row.year_built
            .as_deref()
            .and_then(leading_int)
            .filter(|year| *year > 0)
            .and_then(|year| i32::try_from(year).ok()),
        property_type,
        status,
        features: split_list(row.features.as_deref()),
        agent,
        featured: row.featured.as_deref().map(str::trim) == Some("true"),
    };

    let id = match row.id.as_deref().map(str::trim).filter(|raw| !raw.is_empty()) {
        Some(raw) => explicit_id(raw)?,
        None => None,
    };
    Ok(Some((id, listing)))
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

fn split_list(value: Option<&str>) -> Vec<String> {
    value.map(NewListing::features_from_csv).unwrap_or_default()
}

/// Integer value of the leading digits, e.g. `"3 beds"` -> 3
fn leading_int(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    let (negative, digits) = match raw.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, raw.strip_prefix('+').unwrap_or(raw)),
    };
    let end = digits.find(|c: char| !c.is_ascii_digit()).unwrap_or(digits.len());
    let value: i64 = digits[..end].parse().ok()?;
    Some(if negative { -value } else { value })
}

/// Id from the `id` column. Non-numeric and non-positive values leave the
/// row to be numbered by the store; numbers past [`MAX_LISTING_ID`] reject it.
fn explicit_id(raw: &str) -> std::result::Result<Option<i64>, String> {
    let digits = raw.strip_prefix('+').unwrap_or(raw);
    if !digits.starts_with(|c: char| c.is_ascii_digit()) {
        return Ok(None);
    }
    match leading_int(digits) {
        Some(id) if id > MAX_LISTING_ID => Err(format!("Listing id out of range: {}", raw)),
        Some(id) if id > 0 => Ok(Some(id)),
        Some(_) => Ok(None),
        None => Err(format!("Listing id out of range: {}", raw)),
    }
}

/// Decimal value of the leading number, e.g. `"2.5 baths"` -> 2.5
fn lenient_decimal(raw: Option<&str>) -> Decimal {
    let Some(raw) = raw.map(str::trim) else {
        return Decimal::ZERO;
    };
    let end = raw.find(|c: char| !c.is_ascii_digit() && c != '.').unwrap_or(raw.len());
    Decimal::from_str(raw[..end].trim_end_matches('.'))
        .ok()
        .filter(|value| *value >= Decimal::ZERO)
        .unwrap_or(Decimal::ZERO)
}

fn lenient_count(raw: Option<&str>) -> u32 {
    raw.and_then(leading_int)
        .and_then(|n| u32::try_from(n).ok())
        .unwrap_or(0)
}
