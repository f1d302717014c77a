// src/ingest/mod.rs

pub mod aggregate;
pub mod filter;
pub mod row;

pub use aggregate::{CategoryRecord, Dataset, Grouping, YearEntry};
pub use row::RawRow;

use anyhow::Result;
use tracing::info;

/// Full ingest pass: parse the raw CSV text, apply the retention rule and
/// fold what survives into the nested dataset. Single synchronous pass,
/// O(rows) time and space.
pub fn dataset_from_csv(text: &str) -> Result<Dataset> {
    let rows = row::parse_rows(text)?;
    let parsed = rows.len();

    let retained: Vec<RawRow> = rows.into_iter().filter(filter::retain).collect();
    info!(parsed, retained = retained.len(), "filtered source rows");

    Ok(Dataset::from_rows(retained))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_subscriber::{fmt, EnvFilter};

    fn init_logging() {
        let _ = fmt()
            .with_env_filter(EnvFilter::new("debug"))
            .with_target(false)
            .try_init();
    }

    #[test]
    fn end_to_end_filter_and_fold() -> Result<()> {
        init_logging();

        let text = "YEAR,UNIT,STUB_NAME,STUB_LABEL,ESTIMATE\n\
                    1979,\"Deaths per 100,000 resident population, age-adjusted\",Total,Total,12.1\n\
                    1980,\"Deaths per 100,000 resident population, age-adjusted\",Total,Total,12.5\n";
        let dataset = dataset_from_csv(text)?;

        // the 1979 row is excluded; exactly one year entry remains
        assert_eq!(dataset.years.len(), 1);
        let entry = dataset.year(1980).expect("1980 entry");
        let cats = entry.grouping("Total").expect("Total grouping");
        assert_eq!(cats.len(), 1);
        assert_eq!(cats[0].label, "Total");
        assert_eq!(cats[0].num_deaths, 12.5);
        Ok(())
    }

    #[test]
    fn crude_exempt_grouping_survives_ingest() -> Result<()> {
        init_logging();

        let text = "YEAR,UNIT,STUB_NAME,STUB_LABEL,ESTIMATE\n\
                    2018,\"Deaths per 100,000 resident population, crude\",Sex and age,Male: 15-24 years,19.2\n\
                    2018,\"Deaths per 100,000 resident population, crude\",Sex,Male,22.8\n";
        let dataset = dataset_from_csv(text)?;

        let entry = dataset.year(2018).expect("2018 entry");
        let cats = entry.grouping("Sex and age").expect("exempt grouping kept");
        assert_eq!(cats[0].label, "Male: 15-24 years");
        assert_eq!(cats[0].num_deaths, 19.2);

        // the non-exempt crude row is gone
        assert!(entry.grouping("Sex").is_none());
        Ok(())
    }
}
