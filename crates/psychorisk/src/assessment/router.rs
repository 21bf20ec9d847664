use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::{Demographics, EvaluationId, QuestionNumber, SubjectId};
use super::repository::{EvaluationRepository, RepositoryError};
use super::scoring::ScoringError;
use super::service::{AssessmentService, AssessmentServiceError};

type SharedService<R> = State<Arc<AssessmentService<R>>>;

#[derive(Debug, Deserialize)]
pub struct StartEvaluationRequest {
    pub subject: String,
    pub period: i32,
}

#[derive(Debug, Deserialize)]
pub struct RecordResponsesRequest {
    pub answers: BTreeMap<QuestionNumber, u8>,
}

#[derive(Debug, Deserialize)]
pub struct ComparisonQuery {
    pub a: String,
    pub b: String,
}

#[derive(Debug, Deserialize)]
pub struct CohortQuery {
    pub period: Option<i32>,
}

/// Router builder exposing intake, lifecycle, and reporting endpoints.
pub fn assessment_router<R>(service: Arc<AssessmentService<R>>) -> Router
where
    R: EvaluationRepository + 'static,
{
    Router::new()
        .route("/api/v1/evaluations", post(start_handler::<R>))
        .route("/api/v1/evaluations/:evaluation_id", get(view_handler::<R>))
        .route(
            "/api/v1/evaluations/:evaluation_id/responses",
            put(responses_handler::<R>),
        )
        .route(
            "/api/v1/evaluations/:evaluation_id/demographics",
            put(demographics_handler::<R>),
        )
        .route(
            "/api/v1/evaluations/:evaluation_id/confidentiality",
            post(confidentiality_handler::<R>),
        )
        .route(
            "/api/v1/evaluations/:evaluation_id/submit",
            post(submit_handler::<R>),
        )
        .route(
            "/api/v1/evaluations/:evaluation_id/edit",
            post(edit_handler::<R>),
        )
        .route(
            "/api/v1/evaluations/:evaluation_id/summary",
            get(summary_handler::<R>),
        )
        .route(
            "/api/v1/evaluations/:evaluation_id/global",
            get(global_handler::<R>),
        )
        .route("/api/v1/comparisons", get(comparison_handler::<R>))
        .route("/api/v1/cohort", get(cohort_handler::<R>))
        .with_state(service)
}

pub(crate) async fn start_handler<R>(
    State(service): SharedService<R>,
    axum::Json(request): axum::Json<StartEvaluationRequest>,
) -> Response
where
    R: EvaluationRepository + 'static,
{
    let subject = request.subject.trim();
    if subject.is_empty() {
        let payload = json!({ "error": "subject is required" });
        return (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response();
    }

    match service
        .start_evaluation(SubjectId(subject.to_string()), request.period)
        .and_then(|evaluation| service.view(&evaluation.id))
    {
        Ok(view) => (StatusCode::CREATED, axum::Json(view)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn view_handler<R>(
    State(service): SharedService<R>,
    Path(evaluation_id): Path<String>,
) -> Response
where
    R: EvaluationRepository + 'static,
{
    match service.view(&EvaluationId(evaluation_id)) {
        Ok(view) => (StatusCode::OK, axum::Json(view)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn responses_handler<R>(
    State(service): SharedService<R>,
    Path(evaluation_id): Path<String>,
    axum::Json(request): axum::Json<RecordResponsesRequest>,
) -> Response
where
    R: EvaluationRepository + 'static,
{
    match service.record_responses(&EvaluationId(evaluation_id), &request.answers) {
        Ok(view) => (StatusCode::OK, axum::Json(view)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn demographics_handler<R>(
    State(service): SharedService<R>,
    Path(evaluation_id): Path<String>,
    axum::Json(demographics): axum::Json<Demographics>,
) -> Response
where
    R: EvaluationRepository + 'static,
{
    let id = EvaluationId(evaluation_id);
    match service
        .update_demographics(&id, demographics)
        .and_then(|evaluation| service.view(&evaluation.id))
    {
        Ok(view) => (StatusCode::OK, axum::Json(view)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn confidentiality_handler<R>(
    State(service): SharedService<R>,
    Path(evaluation_id): Path<String>,
) -> Response
where
    R: EvaluationRepository + 'static,
{
    let id = EvaluationId(evaluation_id);
    match service
        .accept_confidentiality(&id)
        .and_then(|evaluation| service.view(&evaluation.id))
    {
        Ok(view) => (StatusCode::OK, axum::Json(view)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn submit_handler<R>(
    State(service): SharedService<R>,
    Path(evaluation_id): Path<String>,
) -> Response
where
    R: EvaluationRepository + 'static,
{
    match service.submit_evaluation(&EvaluationId(evaluation_id)) {
        Ok(outcome) => (StatusCode::OK, axum::Json(outcome.dimensions)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn edit_handler<R>(
    State(service): SharedService<R>,
    Path(evaluation_id): Path<String>,
) -> Response
where
    R: EvaluationRepository + 'static,
{
    let id = EvaluationId(evaluation_id);
    match service
        .request_edit(&id)
        .and_then(|evaluation| service.view(&evaluation.id))
    {
        Ok(view) => (StatusCode::OK, axum::Json(view)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn summary_handler<R>(
    State(service): SharedService<R>,
    Path(evaluation_id): Path<String>,
) -> Response
where
    R: EvaluationRepository + 'static,
{
    match service.get_summary(&EvaluationId(evaluation_id)) {
        Ok(summary) => (StatusCode::OK, axum::Json(summary)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn global_handler<R>(
    State(service): SharedService<R>,
    Path(evaluation_id): Path<String>,
) -> Response
where
    R: EvaluationRepository + 'static,
{
    match service.global(&EvaluationId(evaluation_id)) {
        Ok(global) => (StatusCode::OK, axum::Json(global)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn comparison_handler<R>(
    State(service): SharedService<R>,
    Query(query): Query<ComparisonQuery>,
) -> Response
where
    R: EvaluationRepository + 'static,
{
    match service.compare(&EvaluationId(query.a), &EvaluationId(query.b)) {
        Ok(comparison) => (StatusCode::OK, axum::Json(comparison)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn cohort_handler<R>(
    State(service): SharedService<R>,
    Query(query): Query<CohortQuery>,
) -> Response
where
    R: EvaluationRepository + 'static,
{
    match service.cohort_overview(query.period) {
        Ok(overview) => (StatusCode::OK, axum::Json(overview)).into_response(),
        Err(error) => error_response(error),
    }
}

fn status_for(error: &AssessmentServiceError) -> StatusCode {
    match error {
        AssessmentServiceError::InvalidAnswer { .. }
        | AssessmentServiceError::UnknownQuestion(_)
        | AssessmentServiceError::Comparison(_)
        | AssessmentServiceError::Scoring(ScoringError::MissingResponses { .. })
        | AssessmentServiceError::Scoring(ScoringError::UnknownDimension(_)) => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        AssessmentServiceError::Lifecycle(_)
        | AssessmentServiceError::Repository(RepositoryError::Conflict) => StatusCode::CONFLICT,
        AssessmentServiceError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        AssessmentServiceError::Scoring(_)
        | AssessmentServiceError::Repository(RepositoryError::Unavailable(_)) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

fn error_response(error: AssessmentServiceError) -> Response {
    let payload = json!({
        "error": error.to_string(),
    });
    (status_for(&error), axum::Json(payload)).into_response()
}
