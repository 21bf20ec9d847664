use std::collections::BTreeMap;
use std::sync::Arc;

use axum::response::Response;
use serde_json::Value;

use crate::assessment::catalog::{Dimension, Question, RiskRange, RiskRanges, StaticCatalog};
use crate::assessment::domain::{
    DimensionId, Evaluation, EvaluationId, QuestionNumber, Response as AnswerRow, RiskResult,
    SubjectId,
};
use crate::assessment::repository::{
    EvaluationRepository, InMemoryEvaluationRepository, RepositoryError,
};
use crate::assessment::{assessment_router, AssessmentService};
use crate::config::AssessmentConfig;

pub(super) type MemoryRepository = InMemoryEvaluationRepository;

pub(super) const QUESTION_COUNT: u16 = 58;

pub(super) fn assessment_config(max_edits: u8) -> AssessmentConfig {
    AssessmentConfig {
        max_edits,
        catalog_path: None,
    }
}

pub(super) fn build_service() -> (AssessmentService<MemoryRepository>, Arc<MemoryRepository>) {
    let repository = Arc::new(MemoryRepository::default());
    let service = AssessmentService::new(
        repository.clone(),
        Arc::new(StaticCatalog::standard()),
        &assessment_config(3),
    );
    (service, repository)
}

/// Every question of the standard catalog answered with the same value.
pub(super) fn uniform_answers(value: u8) -> BTreeMap<QuestionNumber, u8> {
    (1..=QUESTION_COUNT)
        .map(|number| (QuestionNumber(number), value))
        .collect()
}

/// Draft with confidentiality accepted and every question answered.
pub(super) fn answered_evaluation(
    service: &AssessmentService<MemoryRepository>,
    subject: &str,
    period: i32,
    value: u8,
) -> EvaluationId {
    let evaluation = service
        .start_evaluation(SubjectId(subject.to_string()), period)
        .expect("evaluation starts");
    service
        .accept_confidentiality(&evaluation.id)
        .expect("confidentiality accepted");
    service
        .record_responses(&evaluation.id, &uniform_answers(value))
        .expect("answers recorded");
    evaluation.id
}

pub(super) fn completed_evaluation(
    service: &AssessmentService<MemoryRepository>,
    subject: &str,
    period: i32,
    value: u8,
) -> EvaluationId {
    let id = answered_evaluation(service, subject, period, value);
    service.submit_evaluation(&id).expect("submission succeeds");
    id
}

/// Two dimensions over five questions.
pub(super) fn compact_catalog() -> StaticCatalog {
    let dimensions = vec![
        Dimension {
            id: DimensionId(10),
            name: "Workload".to_string(),
            order: 1,
            ranges: RiskRanges {
                low: RiskRange::new(7, 8),
                medium: RiskRange::new(5, 6),
                high: RiskRange::new(2, 4),
            },
        },
        Dimension {
            id: DimensionId(20),
            name: "Support".to_string(),
            order: 2,
            ranges: RiskRanges {
                low: RiskRange::new(10, 12),
                medium: RiskRange::new(6, 9),
                high: RiskRange::new(3, 5),
            },
        },
    ];
    let questions = [(1, 10), (2, 10), (3, 20), (4, 20), (5, 20)]
        .into_iter()
        .map(|(number, dimension)| Question {
            number: QuestionNumber(number),
            dimension: DimensionId(dimension),
        })
        .collect();
    StaticCatalog::new(dimensions, questions).expect("compact catalog is valid")
}

pub(super) struct UnavailableRepository;

fn offline<T>() -> Result<T, RepositoryError> {
    Err(RepositoryError::Unavailable("database offline".to_string()))
}

impl EvaluationRepository for UnavailableRepository {
    fn insert(&self, _evaluation: Evaluation) -> Result<Evaluation, RepositoryError> {
        offline()
    }

    fn update(&self, _evaluation: &Evaluation) -> Result<(), RepositoryError> {
        offline()
    }

    fn fetch(&self, _id: &EvaluationId) -> Result<Option<Evaluation>, RepositoryError> {
        offline()
    }

    fn find_by_period(
        &self,
        _subject: &SubjectId,
        _period: i32,
    ) -> Result<Option<Evaluation>, RepositoryError> {
        offline()
    }

    fn completed(&self, _period: Option<i32>) -> Result<Vec<Evaluation>, RepositoryError> {
        offline()
    }

    fn responses(&self, _id: &EvaluationId) -> Result<Vec<AnswerRow>, RepositoryError> {
        offline()
    }

    fn upsert_responses(
        &self,
        _id: &EvaluationId,
        _responses: &[AnswerRow],
    ) -> Result<(), RepositoryError> {
        offline()
    }

    fn risk_results(&self, _id: &EvaluationId) -> Result<Vec<RiskResult>, RepositoryError> {
        offline()
    }

    fn upsert_risk_result(&self, _result: &RiskResult) -> Result<(), RepositoryError> {
        offline()
    }

    fn commit_submission(
        &self,
        _evaluation: &Evaluation,
        _results: &[RiskResult],
    ) -> Result<(), RepositoryError> {
        offline()
    }
}

pub(super) fn unavailable_service() -> AssessmentService<UnavailableRepository> {
    AssessmentService::new(
        Arc::new(UnavailableRepository),
        Arc::new(StaticCatalog::standard()),
        &assessment_config(3),
    )
}

pub(super) fn router_with_service(service: AssessmentService<MemoryRepository>) -> axum::Router {
    assessment_router(Arc::new(service))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
