use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex, MutexGuard};

use serde::Serialize;

use super::domain::{
    DimensionId, Evaluation, EvaluationId, EvaluationStatus, QuestionNumber, Response, RiskResult,
    SubjectId,
};

/// Storage abstraction so the service can be exercised in isolation.
///
/// Responses are keyed by (evaluation, question) and risk results by (evaluation, dimension);
/// writes to an existing key overwrite it.
pub trait EvaluationRepository: Send + Sync {
    fn insert(&self, evaluation: Evaluation) -> Result<Evaluation, RepositoryError>;
    fn update(&self, evaluation: &Evaluation) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &EvaluationId) -> Result<Option<Evaluation>, RepositoryError>;
    fn find_by_period(
        &self,
        subject: &SubjectId,
        period: i32,
    ) -> Result<Option<Evaluation>, RepositoryError>;
    /// Completed evaluations, optionally restricted to one period.
    fn completed(&self, period: Option<i32>) -> Result<Vec<Evaluation>, RepositoryError>;
    fn responses(&self, id: &EvaluationId) -> Result<Vec<Response>, RepositoryError>;
    fn upsert_responses(
        &self,
        id: &EvaluationId,
        responses: &[Response],
    ) -> Result<(), RepositoryError>;
    fn risk_results(&self, id: &EvaluationId) -> Result<Vec<RiskResult>, RepositoryError>;
    fn upsert_risk_result(&self, result: &RiskResult) -> Result<(), RepositoryError>;
    /// Persists the evaluation and replaces its complete result set in one transaction.
    fn commit_submission(
        &self,
        evaluation: &Evaluation,
        results: &[RiskResult],
    ) -> Result<(), RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Sanitized evaluation state for API responses.
#[derive(Debug, Clone, Serialize)]
pub struct EvaluationView {
    pub evaluation_id: EvaluationId,
    pub subject: SubjectId,
    pub period: i32,
    pub status: EvaluationStatus,
    pub edit_count: u8,
    pub editing: bool,
    pub confidentiality_accepted: bool,
    pub completion_percentage: f64,
}

impl EvaluationView {
    pub fn new(evaluation: &Evaluation, completion_percentage: f64) -> Self {
        Self {
            evaluation_id: evaluation.id.clone(),
            subject: evaluation.subject.clone(),
            period: evaluation.period,
            status: evaluation.status,
            edit_count: evaluation.edit_count,
            editing: evaluation.edit_session.is_some(),
            confidentiality_accepted: evaluation.confidentiality_accepted,
            completion_percentage,
        }
    }
}

#[derive(Default)]
struct Tables {
    evaluations: HashMap<EvaluationId, Evaluation>,
    responses: HashMap<EvaluationId, BTreeMap<QuestionNumber, Response>>,
    results: HashMap<EvaluationId, BTreeMap<DimensionId, RiskResult>>,
}

/// Mutex-backed store; every trait call holds the single lock, so each call is atomic.
#[derive(Default, Clone)]
pub struct InMemoryEvaluationRepository {
    tables: Arc<Mutex<Tables>>,
}

impl InMemoryEvaluationRepository {
    fn lock(&self) -> Result<MutexGuard<'_, Tables>, RepositoryError> {
        self.tables
            .lock()
            .map_err(|_| RepositoryError::Unavailable("repository mutex poisoned".to_string()))
    }
}

impl EvaluationRepository for InMemoryEvaluationRepository {
    fn insert(&self, evaluation: Evaluation) -> Result<Evaluation, RepositoryError> {
        let mut tables = self.lock()?;
        if tables.evaluations.contains_key(&evaluation.id) {
            return Err(RepositoryError::Conflict);
        }
        tables
            .evaluations
            .insert(evaluation.id.clone(), evaluation.clone());
        Ok(evaluation)
    }

    fn update(&self, evaluation: &Evaluation) -> Result<(), RepositoryError> {
        let mut tables = self.lock()?;
        match tables.evaluations.get_mut(&evaluation.id) {
            Some(stored) => {
                *stored = evaluation.clone();
                Ok(())
            }
            None => Err(RepositoryError::NotFound),
        }
    }

    fn fetch(&self, id: &EvaluationId) -> Result<Option<Evaluation>, RepositoryError> {
        Ok(self.lock()?.evaluations.get(id).cloned())
    }

    fn find_by_period(
        &self,
        subject: &SubjectId,
        period: i32,
    ) -> Result<Option<Evaluation>, RepositoryError> {
        let tables = self.lock()?;
        Ok(tables
            .evaluations
            .values()
            .find(|evaluation| &evaluation.subject == subject && evaluation.period == period)
            .cloned())
    }

    fn completed(&self, period: Option<i32>) -> Result<Vec<Evaluation>, RepositoryError> {
        let tables = self.lock()?;
        let mut evaluations: Vec<Evaluation> = tables
            .evaluations
            .values()
            .filter(|evaluation| evaluation.status == EvaluationStatus::Completed)
            .filter(|evaluation| period.map_or(true, |period| evaluation.period == period))
            .cloned()
            .collect();
        evaluations.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(evaluations)
    }

    fn responses(&self, id: &EvaluationId) -> Result<Vec<Response>, RepositoryError> {
        let tables = self.lock()?;
        Ok(tables
            .responses
            .get(id)
            .map(|responses| responses.values().copied().collect())
            .unwrap_or_default())
    }

    fn upsert_responses(
        &self,
        id: &EvaluationId,
        responses: &[Response],
    ) -> Result<(), RepositoryError> {
        let mut tables = self.lock()?;
        if !tables.evaluations.contains_key(id) {
            return Err(RepositoryError::NotFound);
        }
        let stored = tables.responses.entry(id.clone()).or_default();
        for response in responses {
            stored.insert(response.question, *response);
        }
        Ok(())
    }

    fn risk_results(&self, id: &EvaluationId) -> Result<Vec<RiskResult>, RepositoryError> {
        let tables = self.lock()?;
        Ok(tables
            .results
            .get(id)
            .map(|results| results.values().cloned().collect())
            .unwrap_or_default())
    }

    fn upsert_risk_result(&self, result: &RiskResult) -> Result<(), RepositoryError> {
        let mut tables = self.lock()?;
        if !tables.evaluations.contains_key(&result.evaluation_id) {
            return Err(RepositoryError::NotFound);
        }
        tables
            .results
            .entry(result.evaluation_id.clone())
            .or_default()
            .insert(result.dimension, result.clone());
        Ok(())
    }

    fn commit_submission(
        &self,
        evaluation: &Evaluation,
        results: &[RiskResult],
    ) -> Result<(), RepositoryError> {
        let mut tables = self.lock()?;
        if !tables.evaluations.contains_key(&evaluation.id) {
            return Err(RepositoryError::NotFound);
        }
        let replacement = results
            .iter()
            .map(|result| (result.dimension, result.clone()))
            .collect();
        tables.results.insert(evaluation.id.clone(), replacement);
        tables
            .evaluations
            .insert(evaluation.id.clone(), evaluation.clone());
        Ok(())
    }
}
