//! Organization-wide distribution of risk labels across completed evaluations, overall and
//! split by each demographic field.

use std::collections::BTreeMap;

use serde::Serialize;

use super::catalog::DimensionCatalog;
use super::domain::{Classification, Demographics, DimensionId, RiskLabel, RiskResult};
use super::recommendations::general_guidance;
use super::summary::LabelCounts;

/// Percentages per label, rounded to one decimal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct LabelShares {
    #[serde(rename = "BAJO")]
    pub low: f64,
    #[serde(rename = "MEDIO")]
    pub medium: f64,
    #[serde(rename = "ALTO")]
    pub high: f64,
}

impl LabelShares {
    fn of(counts: &LabelCounts, population: usize) -> Self {
        Self {
            low: percentage(counts.low, population),
            medium: percentage(counts.medium, population),
            high: percentage(counts.high, population),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DimensionDistribution {
    pub dimension: DimensionId,
    pub name: String,
    pub counts: LabelCounts,
    pub percentages: LabelShares,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CohortOverview {
    pub period: Option<i32>,
    pub evaluations: usize,
    pub global_counts: LabelCounts,
    pub global_percentages: LabelShares,
    pub undefined: usize,
    pub predominant: Option<RiskLabel>,
    pub guidance: &'static [&'static str],
    pub dimensions: Vec<DimensionDistribution>,
    pub demographics: Vec<DemographicBreakdown>,
}

/// Descriptive field a cohort can be split by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DemographicField {
    Province,
    City,
    WorkArea,
    EducationLevel,
    ExperienceRange,
    AgeRange,
    Ethnicity,
    Gender,
}

impl DemographicField {
    pub fn all() -> [DemographicField; 8] {
        [
            DemographicField::Province,
            DemographicField::City,
            DemographicField::WorkArea,
            DemographicField::EducationLevel,
            DemographicField::ExperienceRange,
            DemographicField::AgeRange,
            DemographicField::Ethnicity,
            DemographicField::Gender,
        ]
    }

    /// Trimmed value of this field, or `None` when it was left blank.
    pub fn value_of<'a>(&self, demographics: &'a Demographics) -> Option<&'a str> {
        let value = match self {
            DemographicField::Province => &demographics.province,
            DemographicField::City => &demographics.city,
            DemographicField::WorkArea => &demographics.work_area,
            DemographicField::EducationLevel => &demographics.education_level,
            DemographicField::ExperienceRange => &demographics.experience_range,
            DemographicField::AgeRange => &demographics.age_range,
            DemographicField::Ethnicity => &demographics.ethnicity,
            DemographicField::Gender => &demographics.gender,
        };
        value.as_deref().map(str::trim).filter(|value| !value.is_empty())
    }
}

/// Label distribution of the evaluations sharing one value of a demographic field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DemographicGroup {
    pub value: String,
    pub evaluations: usize,
    pub global_counts: LabelCounts,
    pub global_percentages: LabelShares,
    pub undefined: usize,
    pub dimensions: Vec<DimensionDistribution>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DemographicBreakdown {
    pub field: DemographicField,
    pub groups: Vec<DemographicGroup>,
}

/// Per-evaluation input: its global classification, stored dimension results and demographics.
pub struct CohortMember<'a> {
    pub global: Classification,
    pub results: &'a [RiskResult],
    pub demographics: &'a Demographics,
}

#[derive(Default)]
struct Tally {
    evaluations: usize,
    global_counts: LabelCounts,
    undefined: usize,
    per_dimension: BTreeMap<DimensionId, LabelCounts>,
}

impl Tally {
    fn record(&mut self, member: &CohortMember<'_>) {
        self.evaluations += 1;
        match member.global.label() {
            Some(label) => self.global_counts.record(label),
            None => self.undefined += 1,
        }
        for result in member.results {
            self.per_dimension
                .entry(result.dimension)
                .or_default()
                .record(result.label);
        }
    }

    fn dimensions(&self, catalog: &dyn DimensionCatalog) -> Vec<DimensionDistribution> {
        catalog
            .dimensions()
            .iter()
            .map(|dimension| {
                let counts = self
                    .per_dimension
                    .get(&dimension.id)
                    .copied()
                    .unwrap_or_default();
                DimensionDistribution {
                    dimension: dimension.id,
                    name: dimension.name.clone(),
                    counts,
                    percentages: LabelShares::of(&counts, self.evaluations),
                }
            })
            .collect()
    }
}

impl CohortOverview {
    pub fn build<'a>(
        period: Option<i32>,
        members: impl IntoIterator<Item = CohortMember<'a>>,
        catalog: &dyn DimensionCatalog,
    ) -> Self {
        let mut overall = Tally::default();
        let mut groups: BTreeMap<(DemographicField, String), Tally> = BTreeMap::new();

        for member in members {
            overall.record(&member);
            for field in DemographicField::all() {
                if let Some(value) = field.value_of(member.demographics) {
                    groups
                        .entry((field, value.to_string()))
                        .or_default()
                        .record(&member);
                }
            }
        }

        let mut demographics: Vec<DemographicBreakdown> = Vec::new();
        for ((field, value), tally) in &groups {
            let group = DemographicGroup {
                value: value.clone(),
                evaluations: tally.evaluations,
                global_counts: tally.global_counts,
                global_percentages: LabelShares::of(&tally.global_counts, tally.evaluations),
                undefined: tally.undefined,
                dimensions: tally.dimensions(catalog),
            };
            match demographics.last_mut() {
                Some(breakdown) if breakdown.field == *field => breakdown.groups.push(group),
                _ => demographics.push(DemographicBreakdown {
                    field: *field,
                    groups: vec![group],
                }),
            }
        }

        let predominant = predominant(&overall.global_counts);
        Self {
            period,
            evaluations: overall.evaluations,
            global_counts: overall.global_counts,
            global_percentages: LabelShares::of(&overall.global_counts, overall.evaluations),
            undefined: overall.undefined,
            predominant,
            guidance: predominant.map(general_guidance).unwrap_or_default(),
            dimensions: overall.dimensions(catalog),
            demographics,
        }
    }
}

/// Most frequent label; ties favor the lower-risk label.
fn predominant(counts: &LabelCounts) -> Option<RiskLabel> {
    if counts.total() == 0 {
        return None;
    }
    let highest = RiskLabel::ordered()
        .into_iter()
        .map(|label| counts.get(label))
        .max()
        .unwrap_or(0);
    RiskLabel::ordered()
        .into_iter()
        .find(|label| counts.get(*label) == highest)
}

fn percentage(count: usize, population: usize) -> f64 {
    if population == 0 {
        return 0.0;
    }
    (count as f64 / population as f64 * 1000.0).round() / 10.0
}
