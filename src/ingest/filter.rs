// src/ingest/filter.rs

use once_cell::sync::Lazy;
use std::collections::HashSet;

use super::row::RawRow;

/// Earliest year the dataset covers consistently.
pub const MIN_YEAR: u16 = 1980;

/// The crude-rate unit string, exactly as it appears in the source.
pub const CRUDE_UNIT: &str = "Deaths per 100,000 resident population, crude";

/// Groupings that exist only as crude rates; crude rows for these are kept
/// even though crude rows are dropped everywhere else.
pub static CRUDE_ONLY_GROUPINGS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "Sex and age",
        "Sex, age and race",
        "Sex, age and race and Hispanic origin",
    ]
    .into_iter()
    .collect()
});

/// Row retention rule: the year must parse and be >= 1980, and crude-rate
/// rows are dropped unless their grouping has no age-adjusted counterpart.
pub fn retain(row: &RawRow) -> bool {
    let year = match row.year_value() {
        Some(y) => y,
        None => return false,
    };
    if year < MIN_YEAR {
        return false;
    }
    row.unit != CRUDE_UNIT || CRUDE_ONLY_GROUPINGS.contains(row.stub_name.as_str())
}
