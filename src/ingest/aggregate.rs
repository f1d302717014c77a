// src/ingest/aggregate.rs

use serde::Serialize;
use tracing::debug;

use super::row::RawRow;

/// One category inside a grouping, e.g. "Male: 15-24 years" under
/// "Sex and age". `num_deaths` is NaN when the source estimate was
/// suppressed or blank.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryRecord {
    pub label: String,
    #[serde(rename = "numDeaths")]
    pub num_deaths: f64,
}

/// A named way of slicing one year's data ("Sex", "Sex and age", ...),
/// with its categories in source row order.
#[derive(Debug, Clone, Serialize)]
pub struct Grouping {
    pub name: String,
    pub categories: Vec<CategoryRecord>,
}

#[derive(Debug, Clone, Serialize)]
pub struct YearEntry {
    pub year: u16,
    pub groupings: Vec<Grouping>,
}

impl YearEntry {
    pub fn grouping(&self, name: &str) -> Option<&[CategoryRecord]> {
        self.groupings
            .iter()
            .find(|g| g.name == name)
            .map(|g| g.categories.as_slice())
    }
}

/// The aggregated dataset: year entries in first-appearance order, each
/// holding groupings in first-appearance order. Built once per load and
/// immutable afterwards; every view is a pure read over it.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Dataset {
    pub years: Vec<YearEntry>,
}

impl Dataset {
    pub fn year(&self, year: u16) -> Option<&YearEntry> {
        self.years.iter().find(|e| e.year == year)
    }

    /// Fold already-filtered rows into the nested structure. One linear
    /// pass; the first row to mention a year or grouping fixes its position
    /// and every category keeps source row order.
    pub fn from_rows(rows: impl IntoIterator<Item = RawRow>) -> Dataset {
        let mut years: Vec<YearEntry> = Vec::new();
        let mut total_rows = 0usize;

        for row in rows {
            // filtered rows always carry a parseable year
            let year = match row.year_value() {
                Some(y) => y,
                None => continue,
            };
            let num_deaths = row.estimate_value();

            let year_idx = match years.iter().position(|e| e.year == year) {
                Some(i) => i,
                None => {
                    years.push(YearEntry {
                        year,
                        groupings: Vec::new(),
                    });
                    years.len() - 1
                }
            };
            let entry = &mut years[year_idx];

            let grouping_idx = match entry.groupings.iter().position(|g| g.name == row.stub_name) {
                Some(i) => i,
                None => {
                    entry.groupings.push(Grouping {
                        name: row.stub_name.clone(),
                        categories: Vec::new(),
                    });
                    entry.groupings.len() - 1
                }
            };
            entry.groupings[grouping_idx].categories.push(CategoryRecord {
                label: row.stub_label,
                num_deaths,
            });
            total_rows += 1;
        }

        debug!(years = years.len(), rows = total_rows, "aggregated rows");
        Dataset { years }
    }
}
