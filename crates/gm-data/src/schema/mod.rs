//! Column layout of the medal tables

use csv::StringRecord;

use crate::DataError;

/// Accepted header spellings per logical column, compared case-insensitively
const COUNTRY: &[&str] = &["country", "country_name"];
const COUNTRY_CODE: &[&str] = &["country_code", "code", "noc"];
const GOLD: &[&str] = &["gold", "gold medal"];
const SILVER: &[&str] = &["silver", "silver medal"];
const BRONZE: &[&str] = &["bronze", "bronze medal"];
const TOTAL: &[&str] = &["total", "total medals"];
const RANK: &[&str] = &["rank"];
const RANK_BY_TOTAL: &[&str] = &["rank by total", "rank_by_total"];

/// Positions of the medal columns within a CSV header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MedalColumns {
    pub country: usize,
    pub country_code: usize,
    pub gold: usize,
    pub silver: usize,
    pub bronze: usize,
    /// Derived from the three medal columns when absent
    pub total: Option<usize>,
    pub rank: Option<usize>,
    pub rank_by_total: Option<usize>,
}

impl MedalColumns {
    /// Resolve column positions from a header row
    pub fn detect(headers: &StringRecord, source_name: &str) -> Result<Self, DataError> {
        let required = |aliases: &[&str]| {
            find_column(headers, aliases).ok_or_else(|| DataError::MissingColumn {
                source_name: source_name.to_string(),
                column: aliases[0].to_string(),
            })
        };

        let columns = Self {
            country: required(COUNTRY)?,
            country_code: required(COUNTRY_CODE)?,
            gold: required(GOLD)?,
            silver: required(SILVER)?,
            bronze: required(BRONZE)?,
            total: find_column(headers, TOTAL),
            rank: find_column(headers, RANK),
            rank_by_total: find_column(headers, RANK_BY_TOTAL),
        };

        if columns.total.is_none() {
            tracing::debug!("{}: no total column, deriving totals", source_name);
        }
        Ok(columns)
    }
}

fn find_column(headers: &StringRecord, aliases: &[&str]) -> Option<usize> {
    headers.iter().position(|header| {
        let header = header.trim().trim_start_matches('\u{feff}');
        aliases.iter().any(|alias| header.eq_ignore_ascii_case(alias))
    })
}
