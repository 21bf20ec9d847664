mod classifier;
mod dimension;
mod global;

use std::collections::BTreeMap;
use std::sync::Arc;

pub use classifier::classify;
pub use dimension::score_dimension;
pub use global::{raw_total, reconcile, GlobalThresholds};

use super::catalog::{DimensionCatalog, RiskRanges};
use super::domain::{Answer, DimensionId, EvaluationId, QuestionNumber, Response, RiskResult};

/// Failures raised while turning answers into risk results.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScoringError {
    #[error(
        "missing responses{} for question(s) {}",
        scope(.dimension),
        join_numbers(.missing)
    )]
    MissingResponses {
        dimension: Option<String>,
        missing: Vec<QuestionNumber>,
    },
    #[error("dimension '{dimension}' scored 0; stored responses are missing or corrupt")]
    InvalidScore { dimension: String },
    #[error("score {score} for dimension '{dimension}' falls outside the configured ranges ({ranges})")]
    UnclassifiableScore {
        dimension: String,
        score: u16,
        ranges: RiskRanges,
    },
    #[error("global score {raw} disagrees with the dimension total {dimensions}")]
    GlobalScoreMismatch { raw: u16, dimensions: u16 },
    #[error("dimension {0} is not part of the catalog")]
    UnknownDimension(DimensionId),
}

fn scope(dimension: &Option<String>) -> String {
    match dimension {
        Some(name) => format!(" in dimension '{name}'"),
        None => String::new(),
    }
}

fn join_numbers(numbers: &[QuestionNumber]) -> String {
    numbers
        .iter()
        .map(|number| number.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Scores complete response sets against the injected catalog.
#[derive(Clone)]
pub struct ScoringEngine {
    catalog: Arc<dyn DimensionCatalog>,
    thresholds: GlobalThresholds,
}

/// Every dimension result of one evaluation plus the reconciled global figure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreSheet {
    pub results: Vec<RiskResult>,
    pub global_score: u16,
}

impl ScoringEngine {
    pub fn new(catalog: Arc<dyn DimensionCatalog>, thresholds: GlobalThresholds) -> Self {
        Self {
            catalog,
            thresholds,
        }
    }

    pub fn catalog(&self) -> &dyn DimensionCatalog {
        self.catalog.as_ref()
    }

    pub fn thresholds(&self) -> &GlobalThresholds {
        &self.thresholds
    }

    /// Scores one dimension; the catalog decides which answers belong to it.
    pub fn score_one(
        &self,
        evaluation_id: &EvaluationId,
        dimension_id: DimensionId,
        responses: &[Response],
    ) -> Result<RiskResult, ScoringError> {
        let dimension = self
            .catalog
            .dimension(dimension_id)
            .ok_or(ScoringError::UnknownDimension(dimension_id))?;
        let questions = self.catalog.questions_for(dimension_id);
        score_dimension(evaluation_id, dimension, &questions, &answer_map(responses))
    }

    /// Scores every catalog dimension as one unit: any failure discards the whole sheet.
    pub fn score_all(
        &self,
        evaluation_id: &EvaluationId,
        responses: &[Response],
    ) -> Result<ScoreSheet, ScoringError> {
        let answers = answer_map(responses);

        let missing: Vec<QuestionNumber> = self
            .catalog
            .questions()
            .iter()
            .map(|question| question.number)
            .filter(|number| !answers.contains_key(number))
            .collect();
        if !missing.is_empty() {
            return Err(ScoringError::MissingResponses {
                dimension: None,
                missing,
            });
        }

        let results = self
            .catalog
            .dimensions()
            .iter()
            .map(|dimension| {
                let questions = self.catalog.questions_for(dimension.id);
                score_dimension(evaluation_id, dimension, &questions, &answers)
            })
            .collect::<Result<Vec<_>, _>>()?;

        let global_score = reconcile(raw_total(responses), &results)?;

        Ok(ScoreSheet {
            results,
            global_score,
        })
    }
}

fn answer_map(responses: &[Response]) -> BTreeMap<QuestionNumber, Answer> {
    responses
        .iter()
        .map(|response| (response.question, response.answer))
        .collect()
}
