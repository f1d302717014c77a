// src/views/catalog.rs
//
// The fixed set of views the presentation layer consumes, one per chart
// section. Each carries a display title and data in one of the three
// shapes sinks accept: a year series, a flat category list, or the full
// dataset for cross-grouping selection at render time.

use anyhow::Result;
use serde::Serialize;

use crate::ingest::{CategoryRecord, Dataset};
use crate::views::{self, YearTotal};

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ViewData<'a> {
    Series(Vec<YearTotal>),
    Categories(Vec<CategoryRecord>),
    Full(&'a Dataset),
}

#[derive(Debug, Serialize)]
pub struct View<'a> {
    /// Output file stem; not part of the consumer shape.
    #[serde(skip)]
    pub slug: &'static str,
    pub title: &'static str,
    pub data: ViewData<'a>,
}

/// Build every named view over one immutable dataset. Fails only if the
/// totals series is unbuildable; per-year slices that are absent simply
/// produce empty views.
pub fn build(dataset: &Dataset) -> Result<Vec<View<'_>>> {
    let by_sex_race = views::grouping_for_year(dataset, 2018, "Sex and race");
    let by_sex_race_hispanic =
        views::grouping_for_year(dataset, 2018, "Sex and race and Hispanic origin");

    // age breakdowns drop the open-ended "and over" buckets
    let by_sex_age =
        views::without_label(views::grouping_for_year(dataset, 2018, "Sex and age"), "and over");
    let by_sex_age_race = views::without_label(
        views::grouping_for_year(dataset, 2017, "Sex, age and race"),
        "and over",
    );
    let by_sex_age_race_hispanic = views::without_label(
        views::grouping_for_year(dataset, 2017, "Sex, age and race and Hispanic origin"),
        "and over",
    );

    Ok(vec![
        View {
            slug: "totals_per_year",
            title: "Suicide Rates per 100,000 Population Age Adjusted 1980-2018",
            data: ViewData::Series(views::totals_per_year(dataset)?),
        },
        View {
            slug: "by_sex_2018",
            title: "Suicide Composition by Sex Per 100,000 Population Age Adjusted - 2018",
            data: ViewData::Categories(views::grouping_for_year(dataset, 2018, "Sex").to_vec()),
        },
        View {
            slug: "by_race_female_2018",
            title: "Suicide Distribution by Race (Female) Per 100,000 Population Age Adjusted - 2018",
            data: ViewData::Categories(views::with_label(by_sex_race, "Female")),
        },
        View {
            slug: "by_race_male_2018",
            title: "Suicide Distribution by Race (Male) Per 100,000 Population Age Adjusted - 2018",
            data: ViewData::Categories(views::with_label(by_sex_race, "Male")),
        },
        View {
            slug: "by_race_hispanic_female_2018",
            title: "Suicide Distribution by Race, and Hispanic Origin (Female) Per 100,000 Population Age Adjusted - 2018",
            data: ViewData::Categories(views::with_label(by_sex_race_hispanic, "Female")),
        },
        View {
            slug: "by_race_hispanic_male_2018",
            title: "Suicide Distribution by Race, and Hispanic Origin (Male) Per 100,000 Population Age Adjusted - 2018",
            data: ViewData::Categories(views::with_label(by_sex_race_hispanic, "Male")),
        },
        View {
            slug: "by_sex_age_2018",
            title: "Suicide Distribution by Sex and Age Per 100,000 Population 2018",
            data: ViewData::Categories(by_sex_age),
        },
        View {
            slug: "by_sex_age_race_2017",
            title: "Suicide Distribution by Sex, Age, and Race Per 100,000 Population 2017",
            data: ViewData::Categories(by_sex_age_race),
        },
        View {
            slug: "by_sex_age_race_hispanic_2017",
            title: "Suicide Distribution by Sex, Age, Race, and Hispanic Origin Per 100,000 Population 2017",
            data: ViewData::Categories(by_sex_age_race_hispanic),
        },
        View {
            slug: "full_dataset",
            title: "Suicide Distribution by Sex, Age, Race, and Hispanic Origin 1980-2017",
            data: ViewData::Full(dataset),
        },
    ])
}
