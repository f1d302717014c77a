// src/views/mod.rs

pub mod catalog;

use anyhow::{bail, Result};
use serde::Serialize;

use crate::ingest::{CategoryRecord, Dataset};

/// Grouping that holds the single national total per year.
pub const TOTAL_GROUPING: &str = "Total";

/// One point of the total-per-year series.
#[derive(Debug, Clone, Serialize)]
pub struct YearTotal {
    pub year: u16,
    pub total: f64,
}

/// A label's trajectory across years within one grouping.
#[derive(Debug, Clone, Serialize)]
pub struct LabelSeries {
    pub label: String,
    pub points: Vec<SeriesPoint>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SeriesPoint {
    pub year: u16,
    pub value: f64,
}

/// The national total for every year, in dataset order. A year with zero
/// or multiple "Total" records is a hard error rather than a silently
/// broken point in the series.
pub fn totals_per_year(dataset: &Dataset) -> Result<Vec<YearTotal>> {
    dataset
        .years
        .iter()
        .map(|entry| {
            let cats = entry.grouping(TOTAL_GROUPING).unwrap_or(&[]);
            match cats {
                [only] => Ok(YearTotal {
                    year: entry.year,
                    total: only.num_deaths,
                }),
                [] => bail!("year {} has no Total record", entry.year),
                _ => bail!(
                    "year {} has {} Total records, expected exactly one",
                    entry.year,
                    cats.len()
                ),
            }
        })
        .collect()
}

/// One year's categories for a grouping. A missing year or grouping is a
/// valid "no data for this view" state and comes back empty.
pub fn grouping_for_year<'a>(dataset: &'a Dataset, year: u16, grouping: &str) -> &'a [CategoryRecord] {
    dataset
        .year(year)
        .and_then(|entry| entry.grouping(grouping))
        .unwrap_or(&[])
}

/// Categories whose label contains `token`. Case-sensitive, verbatim
/// source strings.
pub fn with_label(categories: &[CategoryRecord], token: &str) -> Vec<CategoryRecord> {
    categories
        .iter()
        .filter(|c| c.label.contains(token))
        .cloned()
        .collect()
}

/// Categories whose label does not contain `token`.
pub fn without_label(categories: &[CategoryRecord], token: &str) -> Vec<CategoryRecord> {
    categories
        .iter()
        .filter(|c| !c.label.contains(token))
        .cloned()
        .collect()
}

/// Flatten one grouping across all years into per-label time series,
/// points sorted by year. Years that lack the grouping contribute nothing.
pub fn series_by_label(dataset: &Dataset, grouping: &str) -> Vec<LabelSeries> {
    let mut series: Vec<LabelSeries> = Vec::new();

    for entry in &dataset.years {
        let cats = match entry.grouping(grouping) {
            Some(cats) => cats,
            None => continue,
        };
        for cat in cats {
            let idx = match series.iter().position(|s| s.label == cat.label) {
                Some(i) => i,
                None => {
                    series.push(LabelSeries {
                        label: cat.label.clone(),
                        points: Vec::new(),
                    });
                    series.len() - 1
                }
            };
            series[idx].points.push(SeriesPoint {
                year: entry.year,
                value: cat.num_deaths,
            });
        }
    }

    for s in &mut series {
        s.points.sort_by_key(|p| p.year);
    }
    series
}
