use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use tracing::{info, warn};

use super::catalog::DimensionCatalog;
use super::cohort::{CohortMember, CohortOverview};
use super::comparison::{self, ComparisonError, EvaluationComparison};
use super::domain::{
    Answer, Classification, Demographics, DimensionId, Evaluation, EvaluationId, InvalidAnswer,
    QuestionNumber, Response, RiskLabel, RiskResult, SubjectId,
};
use super::lifecycle::{EditGuard, LifecycleError, SubmissionKind};
use super::repository::{EvaluationRepository, EvaluationView, RepositoryError};
use super::scoring::{raw_total, reconcile, GlobalThresholds, ScoringEngine, ScoringError};
use super::summary::{build_summary, completion_percentage, EvaluationSummary};
use crate::config::AssessmentConfig;

/// Service composing the catalog, scoring engine, edit guard, and repository.
pub struct AssessmentService<R> {
    repository: Arc<R>,
    catalog: Arc<dyn DimensionCatalog>,
    engine: ScoringEngine,
    guard: EditGuard,
}

static EVALUATION_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_evaluation_id() -> EvaluationId {
    let id = EVALUATION_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    EvaluationId(format!("eval-{id:06}"))
}

/// Score and label of one dimension as returned by a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DimensionScore {
    pub score: u16,
    pub label: RiskLabel,
}

/// Result of a successful submit, keyed by dimension name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubmissionOutcome {
    pub evaluation_id: EvaluationId,
    pub edit_count: u8,
    pub resubmission: bool,
    pub global_score: u16,
    pub global_label: Classification,
    pub dimensions: BTreeMap<String, DimensionScore>,
}

/// Global figure for one evaluation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GlobalScore {
    pub evaluation_id: EvaluationId,
    pub score: u16,
    pub label: Classification,
}

impl<R> AssessmentService<R>
where
    R: EvaluationRepository + 'static,
{
    pub fn new(
        repository: Arc<R>,
        catalog: Arc<dyn DimensionCatalog>,
        config: &AssessmentConfig,
    ) -> Self {
        let engine = ScoringEngine::new(catalog.clone(), GlobalThresholds::mdt());
        Self {
            repository,
            catalog,
            engine,
            guard: EditGuard::new(config.max_edits),
        }
    }

    pub fn catalog(&self) -> &dyn DimensionCatalog {
        self.catalog.as_ref()
    }

    pub fn guard(&self) -> &EditGuard {
        &self.guard
    }

    /// Returns the subject's evaluation for the period, creating a draft on first access.
    pub fn start_evaluation(
        &self,
        subject: SubjectId,
        period: i32,
    ) -> Result<Evaluation, AssessmentServiceError> {
        if let Some(existing) = self.repository.find_by_period(&subject, period)? {
            return Ok(existing);
        }

        let evaluation = Evaluation::draft(next_evaluation_id(), subject, period, Utc::now());
        let stored = self.repository.insert(evaluation)?;
        info!(evaluation_id = %stored.id, subject = %stored.subject, period, "evaluation started");
        Ok(stored)
    }

    pub fn get(&self, evaluation_id: &EvaluationId) -> Result<Evaluation, AssessmentServiceError> {
        let evaluation = self
            .repository
            .fetch(evaluation_id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(evaluation)
    }

    /// Evaluation state plus answer progress for API responses.
    pub fn view(&self, evaluation_id: &EvaluationId) -> Result<EvaluationView, AssessmentServiceError> {
        let evaluation = self.get(evaluation_id)?;
        self.view_of(&evaluation)
    }

    /// Validates and upserts a batch of answers. Nothing is written unless every answer is valid.
    pub fn record_responses(
        &self,
        evaluation_id: &EvaluationId,
        answers: &BTreeMap<QuestionNumber, u8>,
    ) -> Result<EvaluationView, AssessmentServiceError> {
        let evaluation = self.get(evaluation_id)?;
        self.guard.ensure_writable(&evaluation)?;

        let responses = answers
            .iter()
            .map(|(&question, &value)| {
                if !self.catalog.contains_question(question) {
                    return Err(AssessmentServiceError::UnknownQuestion(question));
                }
                let answer = Answer::try_from(value)
                    .map_err(|source| AssessmentServiceError::InvalidAnswer { question, source })?;
                Ok(Response { question, answer })
            })
            .collect::<Result<Vec<_>, _>>()?;

        self.repository.upsert_responses(evaluation_id, &responses)?;
        self.view_of(&evaluation)
    }

    pub fn update_demographics(
        &self,
        evaluation_id: &EvaluationId,
        demographics: Demographics,
    ) -> Result<Evaluation, AssessmentServiceError> {
        let mut evaluation = self.get(evaluation_id)?;
        self.guard.ensure_writable(&evaluation)?;
        evaluation.demographics = demographics;
        self.repository.update(&evaluation)?;
        Ok(evaluation)
    }

    pub fn accept_confidentiality(
        &self,
        evaluation_id: &EvaluationId,
    ) -> Result<Evaluation, AssessmentServiceError> {
        let mut evaluation = self.get(evaluation_id)?;
        if !evaluation.confidentiality_accepted {
            evaluation.confidentiality_accepted = true;
            self.repository.update(&evaluation)?;
        }
        Ok(evaluation)
    }

    /// Completes (or re-completes) an evaluation.
    ///
    /// Every dimension is scored before anything is written; the status change and the full
    /// result set are then committed together, so a failure leaves the stored state untouched.
    pub fn submit_evaluation(
        &self,
        evaluation_id: &EvaluationId,
    ) -> Result<SubmissionOutcome, AssessmentServiceError> {
        let mut evaluation = self.get(evaluation_id)?;

        let kind = self.guard.plan_submission(&evaluation).map_err(|error| {
            warn!(evaluation_id = %evaluation.id, %error, "submission rejected");
            error
        })?;

        let responses = self.repository.responses(evaluation_id)?;
        let sheet = self
            .engine
            .score_all(evaluation_id, &responses)
            .map_err(|error| {
                warn!(evaluation_id = %evaluation.id, %error, "scoring failed");
                error
            })?;

        self.guard
            .apply_submission(&mut evaluation, kind, Utc::now());
        self.repository
            .commit_submission(&evaluation, &sheet.results)?;

        let global_label = self.engine.thresholds().classify(sheet.global_score);
        let resubmission = matches!(kind, SubmissionKind::Resubmission { .. });
        info!(
            evaluation_id = %evaluation.id,
            edit_count = evaluation.edit_count,
            global_score = sheet.global_score,
            global_label = %global_label,
            resubmission,
            "evaluation submitted"
        );

        let dimensions = sheet
            .results
            .iter()
            .filter_map(|result| {
                self.catalog.dimension(result.dimension).map(|dimension| {
                    (
                        dimension.name.clone(),
                        DimensionScore {
                            score: result.score,
                            label: result.label,
                        },
                    )
                })
            })
            .collect();

        Ok(SubmissionOutcome {
            evaluation_id: evaluation.id,
            edit_count: evaluation.edit_count,
            resubmission,
            global_score: sheet.global_score,
            global_label,
            dimensions,
        })
    }

    /// Opens edit mode on a completed evaluation; a no-op on drafts.
    pub fn request_edit(
        &self,
        evaluation_id: &EvaluationId,
    ) -> Result<Evaluation, AssessmentServiceError> {
        let mut evaluation = self.get(evaluation_id)?;
        let was_open = evaluation.edit_session.is_some();

        self.guard
            .request_edit(&mut evaluation, Utc::now())
            .map_err(|error| {
                warn!(evaluation_id = %evaluation.id, %error, "edit request rejected");
                error
            })?;

        if !was_open && evaluation.edit_session.is_some() {
            self.repository.update(&evaluation)?;
            info!(
                evaluation_id = %evaluation.id,
                edit_count = evaluation.edit_count,
                "edit session opened"
            );
        }
        Ok(evaluation)
    }

    /// Scores a single dimension of a completed evaluation and upserts its result.
    pub fn score_dimension(
        &self,
        evaluation_id: &EvaluationId,
        dimension: DimensionId,
    ) -> Result<RiskResult, AssessmentServiceError> {
        let evaluation = self.get(evaluation_id)?;
        if !evaluation.is_complete() {
            return Err(LifecycleError::NotCompleted(evaluation.id).into());
        }

        let responses = self.repository.responses(evaluation_id)?;
        let result = self
            .engine
            .score_one(evaluation_id, dimension, &responses)?;
        self.repository.upsert_risk_result(&result)?;
        Ok(result)
    }

    /// Raw sum of all stored answers.
    ///
    /// When a full result set from a settled submission exists it must agree with the raw sum; a
    /// divergence is reported as `GlobalScoreMismatch` instead of picking either figure.
    pub fn global_score(&self, evaluation_id: &EvaluationId) -> Result<u16, AssessmentServiceError> {
        let evaluation = self.get(evaluation_id)?;
        let responses = self.repository.responses(evaluation_id)?;
        let results = self.repository.risk_results(evaluation_id)?;
        self.settled_global(&evaluation, &responses, &results)
    }

    pub fn global_label(&self, score: u16) -> Classification {
        self.engine.thresholds().classify(score)
    }

    pub fn global(&self, evaluation_id: &EvaluationId) -> Result<GlobalScore, AssessmentServiceError> {
        let score = self.global_score(evaluation_id)?;
        Ok(GlobalScore {
            evaluation_id: evaluation_id.clone(),
            score,
            label: self.global_label(score),
        })
    }

    pub fn get_summary(
        &self,
        evaluation_id: &EvaluationId,
    ) -> Result<EvaluationSummary, AssessmentServiceError> {
        let evaluation = self.get(evaluation_id)?;
        let responses = self.repository.responses(evaluation_id)?;
        let results = self.repository.risk_results(evaluation_id)?;
        self.settled_global(&evaluation, &responses, &results)?;
        Ok(build_summary(
            &evaluation,
            &responses,
            &results,
            self.catalog.as_ref(),
            self.engine.thresholds(),
        ))
    }

    pub fn compare(
        &self,
        evaluation_a: &EvaluationId,
        evaluation_b: &EvaluationId,
    ) -> Result<EvaluationComparison, AssessmentServiceError> {
        let a = self.get(evaluation_a)?;
        let b = self.get(evaluation_b)?;
        let results_a = self.repository.risk_results(evaluation_a)?;
        let results_b = self.repository.risk_results(evaluation_b)?;
        let comparison =
            comparison::compare(&a, &results_a, &b, &results_b, self.catalog.as_ref())?;
        Ok(comparison)
    }

    /// Label distribution across completed evaluations, optionally for one period.
    pub fn cohort_overview(
        &self,
        period: Option<i32>,
    ) -> Result<CohortOverview, AssessmentServiceError> {
        let evaluations = self.repository.completed(period)?;
        let mut rows = Vec::with_capacity(evaluations.len());
        for evaluation in &evaluations {
            let responses = self.repository.responses(&evaluation.id)?;
            let results = self.repository.risk_results(&evaluation.id)?;
            let global = self.settled_global(evaluation, &responses, &results)?;
            rows.push((self.global_label(global), results));
        }

        let members = evaluations
            .iter()
            .zip(&rows)
            .map(|(evaluation, (global, results))| CohortMember {
                global: *global,
                results: results.as_slice(),
                demographics: &evaluation.demographics,
            });
        Ok(CohortOverview::build(period, members, self.catalog.as_ref()))
    }

    /// Raw answer total, cross-checked against the stored results only while they describe the
    /// current answers. During an open edit session the results belong to the previous submission
    /// and are re-derived on resubmit, so no check applies.
    fn settled_global(
        &self,
        evaluation: &Evaluation,
        responses: &[Response],
        results: &[RiskResult],
    ) -> Result<u16, AssessmentServiceError> {
        let raw = raw_total(responses);
        if evaluation.edit_session.is_some() || results.len() != self.catalog.dimensions().len() {
            return Ok(raw);
        }
        reconcile(raw, results).map_err(|error| {
            warn!(evaluation_id = %evaluation.id, %error, "global score integrity failure");
            AssessmentServiceError::from(error)
        })
    }

    fn view_of(&self, evaluation: &Evaluation) -> Result<EvaluationView, AssessmentServiceError> {
        let answered = self.repository.responses(&evaluation.id)?.len();
        Ok(EvaluationView::new(
            evaluation,
            completion_percentage(answered, self.catalog.as_ref()),
        ))
    }
}

/// Error raised by the assessment service.
#[derive(Debug, thiserror::Error)]
pub enum AssessmentServiceError {
    #[error(transparent)]
    Scoring(#[from] ScoringError),
    #[error(transparent)]
    Lifecycle(#[from] LifecycleError),
    #[error(transparent)]
    Comparison(#[from] ComparisonError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error("question {question}: {source}")]
    InvalidAnswer {
        question: QuestionNumber,
        source: InvalidAnswer,
    },
    #[error("question {0} is not part of the catalog")]
    UnknownQuestion(QuestionNumber),
}
