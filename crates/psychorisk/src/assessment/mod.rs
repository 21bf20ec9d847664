//! Psychosocial risk assessment: questionnaire intake, dimension scoring, global
//! classification, bounded re-editing, and longitudinal comparison.
//!
//! The catalog is injected behind [`DimensionCatalog`] and persistence behind
//! [`EvaluationRepository`], so the service can be exercised against synthetic catalogs and
//! in-memory storage.

pub mod catalog;
pub mod cohort;
pub mod comparison;
pub mod domain;
pub mod lifecycle;
pub mod recommendations;
pub mod repository;
pub mod router;
pub mod scoring;
pub mod service;
pub mod summary;

#[cfg(test)]
mod tests;

pub use catalog::{
    CatalogError, Dimension, DimensionCatalog, Question, RiskRange, RiskRanges, StaticCatalog,
};
pub use cohort::{
    CohortOverview, DemographicBreakdown, DemographicField, DemographicGroup, DimensionDistribution,
    LabelShares,
};
pub use comparison::{ComparisonError, DimensionDelta, EvaluationComparison};
pub use domain::{
    Answer, Classification, Demographics, DimensionId, EditSession, Evaluation, EvaluationId,
    EvaluationStatus, InvalidAnswer, QuestionNumber, Response, RiskLabel, RiskResult, SubjectId,
};
pub use lifecycle::{EditGuard, LifecycleError, SubmissionKind};
pub use recommendations::{advice_for, general_guidance, Advice};
pub use repository::{
    EvaluationRepository, EvaluationView, InMemoryEvaluationRepository, RepositoryError,
};
pub use router::assessment_router;
pub use scoring::{GlobalThresholds, ScoreSheet, ScoringEngine, ScoringError};
pub use service::{
    AssessmentService, AssessmentServiceError, DimensionScore, GlobalScore, SubmissionOutcome,
};
pub use summary::{DimensionSummary, EvaluationSummary, LabelCounts};
