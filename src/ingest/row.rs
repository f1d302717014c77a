// src/ingest/row.rs

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use tracing::{debug, warn};

/// Columns the source schema must carry. Extra columns are ignored.
pub const REQUIRED_COLUMNS: &[&str] = &["YEAR", "UNIT", "STUB_NAME", "STUB_LABEL", "ESTIMATE"];

/// One source record, verbatim. A row describes a single
/// (year, grouping, category) mortality estimate.
#[derive(Debug, Clone, Deserialize)]
pub struct RawRow {
    #[serde(rename = "YEAR")]
    pub year: String,
    #[serde(rename = "UNIT")]
    pub unit: String,
    #[serde(rename = "STUB_NAME")]
    pub stub_name: String,
    #[serde(rename = "STUB_LABEL")]
    pub stub_label: String,
    #[serde(rename = "ESTIMATE")]
    pub estimate: String,
}

impl RawRow {
    /// Year as an integer, if the field holds one.
    pub fn year_value(&self) -> Option<u16> {
        self.year.trim().parse().ok()
    }

    /// The estimate as a float. Suppressed or blank estimates come through
    /// as NaN and stay NaN all the way to consumers.
    pub fn estimate_value(&self) -> f64 {
        self.estimate.trim().parse().unwrap_or(f64::NAN)
    }
}

/// Parse the raw CSV text into rows. A missing required column fails the
/// whole load; an individual row that will not deserialize is skipped with
/// a warning and the pass continues.
pub fn parse_rows(text: &str) -> Result<Vec<RawRow>> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let headers = reader.headers().context("reading CSV header row")?.clone();
    for required in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == *required) {
            bail!("source is missing required column `{}`", required);
        }
    }

    let mut rows = Vec::new();
    let mut skipped = 0usize;
    for (idx, record) in reader.deserialize::<RawRow>().enumerate() {
        match record {
            Ok(row) => rows.push(row),
            Err(err) => {
                // header row is line 1, first record line 2
                warn!(line = idx + 2, error = %err, "skipping malformed row");
                skipped += 1;
            }
        }
    }

    debug!(rows = rows.len(), skipped, "parsed source CSV");
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_rows_and_ignores_extra_columns() -> Result<()> {
        let text = "INDICATOR,YEAR,UNIT,STUB_NAME,STUB_LABEL,ESTIMATE,FLAG\n\
                    Death rates,2018,\"Deaths per 100,000 resident population, crude\",Sex and age,Male: 15-24 years,19.2,\n";
        let rows = parse_rows(text)?;
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].year, "2018");
        assert_eq!(rows[0].unit, "Deaths per 100,000 resident population, crude");
        assert_eq!(rows[0].stub_name, "Sex and age");
        assert_eq!(rows[0].stub_label, "Male: 15-24 years");
        assert_eq!(rows[0].estimate_value(), 19.2);
        Ok(())
    }

    #[test]
    fn missing_required_column_fails_the_load() {
        let text = "YEAR,UNIT,STUB_NAME,STUB_LABEL\n2018,x,Total,Total\n";
        assert!(parse_rows(text).is_err());
    }

    #[test]
    fn short_row_is_skipped_not_fatal() -> Result<()> {
        let text = "YEAR,UNIT,STUB_NAME,STUB_LABEL,ESTIMATE\n\
                    2018,unit\n\
                    2018,unit,Total,Total,12.5\n";
        let rows = parse_rows(text)?;
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].stub_label, "Total");
        Ok(())
    }

    #[test]
    fn non_numeric_estimate_becomes_nan() -> Result<()> {
        let text = "YEAR,UNIT,STUB_NAME,STUB_LABEL,ESTIMATE\n\
                    2018,unit,Total,Total,\n\
                    2018,unit,Sex,Male,*\n";
        let rows = parse_rows(text)?;
        assert_eq!(rows.len(), 2);
        assert!(rows[0].estimate_value().is_nan());
        assert!(rows[1].estimate_value().is_nan());
        Ok(())
    }

    #[test]
    fn year_value_rejects_garbage() {
        let row = RawRow {
            year: "19x8".into(),
            unit: String::new(),
            stub_name: String::new(),
            stub_label: String::new(),
            estimate: String::new(),
        };
        assert_eq!(row.year_value(), None);
    }
}
