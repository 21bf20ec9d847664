use chrono::{DateTime, Utc};
use serde::Serialize;

use super::catalog::DimensionCatalog;
use super::domain::{
    Answer, Classification, Demographics, DimensionId, Evaluation, EvaluationId, EvaluationStatus,
    Response, RiskLabel, RiskResult, SubjectId,
};
use super::recommendations::{advice_for, Advice};
use super::scoring::{raw_total, GlobalThresholds};

/// Tally of dimension labels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LabelCounts {
    #[serde(rename = "BAJO")]
    pub low: usize,
    #[serde(rename = "MEDIO")]
    pub medium: usize,
    #[serde(rename = "ALTO")]
    pub high: usize,
}

impl LabelCounts {
    pub fn record(&mut self, label: RiskLabel) {
        match label {
            RiskLabel::Low => self.low += 1,
            RiskLabel::Medium => self.medium += 1,
            RiskLabel::High => self.high += 1,
        }
    }

    pub fn get(&self, label: RiskLabel) -> usize {
        match label {
            RiskLabel::Low => self.low,
            RiskLabel::Medium => self.medium,
            RiskLabel::High => self.high,
        }
    }

    pub fn total(&self) -> usize {
        self.low + self.medium + self.high
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DimensionSummary {
    pub dimension: DimensionId,
    pub name: String,
    pub score: u16,
    pub label: RiskLabel,
    pub question_count: usize,
    pub max_score: u16,
    pub recommendation: Advice,
}

/// Report-ready view of one evaluation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvaluationSummary {
    pub evaluation_id: EvaluationId,
    pub subject: SubjectId,
    pub period: i32,
    pub status: EvaluationStatus,
    pub completed_at: Option<DateTime<Utc>>,
    pub edit_count: u8,
    pub completion_percentage: f64,
    pub demographics: Demographics,
    pub dimensions: Vec<DimensionSummary>,
    pub label_counts: LabelCounts,
    pub global_score: u16,
    pub global_label: Classification,
}

/// Share of catalog questions answered, as a percentage.
pub fn completion_percentage(answered: usize, catalog: &dyn DimensionCatalog) -> f64 {
    let total = catalog.question_count();
    if total == 0 {
        return 0.0;
    }
    (answered.min(total) as f64 / total as f64) * 100.0
}

fn max_score(question_count: usize) -> u16 {
    u16::try_from(question_count)
        .unwrap_or(u16::MAX)
        .saturating_mul(u16::from(Answer::MAX))
}

/// Composes stored results into a summary. Pure; an evaluation without results yields an empty
/// dimension list.
pub fn build_summary(
    evaluation: &Evaluation,
    responses: &[Response],
    results: &[RiskResult],
    catalog: &dyn DimensionCatalog,
    thresholds: &GlobalThresholds,
) -> EvaluationSummary {
    let mut label_counts = LabelCounts::default();
    let mut dimensions: Vec<(u16, DimensionSummary)> = results
        .iter()
        .map(|result| {
            label_counts.record(result.label);
            let question_count = catalog.questions_for(result.dimension).len();
            let (order, name) = catalog
                .dimension(result.dimension)
                .map(|dimension| (dimension.order, dimension.name.clone()))
                .unwrap_or_else(|| (u16::MAX, format!("dimension {}", result.dimension)));
            (
                order,
                DimensionSummary {
                    dimension: result.dimension,
                    score: result.score,
                    label: result.label,
                    recommendation: advice_for(&name, result.label),
                    question_count,
                    max_score: max_score(question_count),
                    name,
                },
            )
        })
        .collect();
    dimensions.sort_by_key(|(order, summary)| (*order, summary.dimension));

    let global_score = raw_total(responses);

    EvaluationSummary {
        evaluation_id: evaluation.id.clone(),
        subject: evaluation.subject.clone(),
        period: evaluation.period,
        status: evaluation.status,
        completed_at: evaluation.completed_at,
        edit_count: evaluation.edit_count,
        completion_percentage: completion_percentage(responses.len(), catalog),
        demographics: evaluation.demographics.clone(),
        dimensions: dimensions.into_iter().map(|(_, summary)| summary).collect(),
        label_counts,
        global_score,
        global_label: thresholds.classify(global_score),
    }
}
