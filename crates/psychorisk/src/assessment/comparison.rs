use std::collections::BTreeMap;

use serde::Serialize;

use super::catalog::DimensionCatalog;
use super::domain::{DimensionId, Evaluation, EvaluationId, RiskLabel, RiskResult, SubjectId};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ComparisonError {
    #[error("evaluations {a} and {b} cannot be compared: {reason}")]
    IncomparableEvaluations {
        a: EvaluationId,
        b: EvaluationId,
        reason: String,
    },
}

/// Change of one dimension between two evaluations. A higher score means lower risk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DimensionDelta {
    pub dimension: DimensionId,
    pub name: String,
    pub score_a: u16,
    pub label_a: RiskLabel,
    pub score_b: u16,
    pub label_b: RiskLabel,
    pub delta: i32,
    pub improved: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EvaluationComparison {
    pub subject: SubjectId,
    pub evaluation_a: EvaluationId,
    pub period_a: i32,
    pub evaluation_b: EvaluationId,
    pub period_b: i32,
    pub dimensions: Vec<DimensionDelta>,
}

/// Diffs the stored results of two completed evaluations of the same subject.
///
/// Only dimensions scored in both evaluations are reported, ordered by the catalog's display
/// order; dimensions the catalog no longer knows follow by id.
pub fn compare(
    evaluation_a: &Evaluation,
    results_a: &[RiskResult],
    evaluation_b: &Evaluation,
    results_b: &[RiskResult],
    catalog: &dyn DimensionCatalog,
) -> Result<EvaluationComparison, ComparisonError> {
    let incomparable = |reason: &str| ComparisonError::IncomparableEvaluations {
        a: evaluation_a.id.clone(),
        b: evaluation_b.id.clone(),
        reason: reason.to_string(),
    };
    if evaluation_a.subject != evaluation_b.subject {
        return Err(incomparable("they belong to different subjects"));
    }
    if !evaluation_a.is_complete() || !evaluation_b.is_complete() {
        return Err(incomparable("both evaluations must be completed"));
    }

    let by_dimension_b: BTreeMap<DimensionId, &RiskResult> = results_b
        .iter()
        .map(|result| (result.dimension, result))
        .collect();

    let mut dimensions: Vec<(u32, DimensionDelta)> = results_a
        .iter()
        .filter_map(|result_a| {
            let result_b = by_dimension_b.get(&result_a.dimension)?;
            let (sort_key, name) = match catalog.dimension(result_a.dimension) {
                Some(dimension) => (u32::from(dimension.order), dimension.name.clone()),
                None => (
                    u32::from(u16::MAX) + u32::from(result_a.dimension.0),
                    format!("dimension {}", result_a.dimension),
                ),
            };
            let delta = i32::from(result_b.score) - i32::from(result_a.score);
            Some((
                sort_key,
                DimensionDelta {
                    dimension: result_a.dimension,
                    name,
                    score_a: result_a.score,
                    label_a: result_a.label,
                    score_b: result_b.score,
                    label_b: result_b.label,
                    delta,
                    improved: result_b.score > result_a.score,
                },
            ))
        })
        .collect();
    dimensions.sort_by_key(|(sort_key, _)| *sort_key);

    Ok(EvaluationComparison {
        subject: evaluation_a.subject.clone(),
        evaluation_a: evaluation_a.id.clone(),
        period_a: evaluation_a.period,
        evaluation_b: evaluation_b.id.clone(),
        period_b: evaluation_b.period,
        dimensions: dimensions.into_iter().map(|(_, delta)| delta).collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessment::catalog::StaticCatalog;
    use crate::assessment::domain::{EvaluationStatus, SubjectId};
    use chrono::Utc;

    fn completed(id: &str, subject: &str, period: i32) -> Evaluation {
        let mut evaluation = Evaluation::draft(
            EvaluationId(id.to_string()),
            SubjectId(subject.to_string()),
            period,
            Utc::now(),
        );
        evaluation.status = EvaluationStatus::Completed;
        evaluation
    }

    fn result(id: &str, dimension: u16, score: u16, label: RiskLabel) -> RiskResult {
        RiskResult {
            evaluation_id: EvaluationId(id.to_string()),
            dimension: DimensionId(dimension),
            score,
            label,
        }
    }

    #[test]
    fn reports_shared_dimensions_with_signed_deltas() {
        let catalog = StaticCatalog::standard();
        let a = completed("eval-a", "subject", 2024);
        let b = completed("eval-b", "subject", 2025);
        let results_a = vec![
            result("eval-a", 3, 11, RiskLabel::High),
            result("eval-a", 1, 12, RiskLabel::Medium),
            result("eval-a", 5, 20, RiskLabel::Low),
        ];
        let results_b = vec![
            result("eval-b", 1, 14, RiskLabel::Low),
            result("eval-b", 3, 9, RiskLabel::High),
        ];

        let comparison = compare(&a, &results_a, &b, &results_b, &catalog)
            .expect("comparable evaluations");

        let names: Vec<_> = comparison
            .dimensions
            .iter()
            .map(|delta| delta.name.as_str())
            .collect();
        assert_eq!(names, vec!["Carga y ritmo de trabajo", "Liderazgo"]);
        assert_eq!(comparison.dimensions[0].delta, 2);
        assert!(comparison.dimensions[0].improved);
        assert_eq!(comparison.dimensions[1].delta, -2);
        assert!(!comparison.dimensions[1].improved);
    }

    #[test]
    fn swapping_the_pair_negates_every_delta() {
        let catalog = StaticCatalog::standard();
        let a = completed("eval-a", "subject", 2024);
        let b = completed("eval-b", "subject", 2025);
        let results_a = vec![
            result("eval-a", 1, 12, RiskLabel::Medium),
            result("eval-a", 2, 7, RiskLabel::High),
        ];
        let results_b = vec![
            result("eval-b", 1, 16, RiskLabel::Low),
            result("eval-b", 2, 7, RiskLabel::High),
        ];

        let forward = compare(&a, &results_a, &b, &results_b, &catalog).expect("forward");
        let backward = compare(&b, &results_b, &a, &results_a, &catalog).expect("backward");
        for (ab, ba) in forward.dimensions.iter().zip(&backward.dimensions) {
            assert_eq!(ab.dimension, ba.dimension);
            assert_eq!(ab.delta, -ba.delta);
        }
        assert!(!forward.dimensions[1].improved && !backward.dimensions[1].improved);
    }

    #[test]
    fn rejects_pairs_from_different_subjects() {
        let catalog = StaticCatalog::standard();
        let a = completed("eval-a", "first", 2024);
        let b = completed("eval-b", "second", 2025);
        assert!(matches!(
            compare(&a, &[], &b, &[], &catalog),
            Err(ComparisonError::IncomparableEvaluations { .. })
        ));
    }

    #[test]
    fn rejects_drafts() {
        let catalog = StaticCatalog::standard();
        let a = completed("eval-a", "subject", 2024);
        let mut b = completed("eval-b", "subject", 2025);
        b.status = EvaluationStatus::Draft;
        let error = compare(&a, &[], &b, &[], &catalog).expect_err("draft rejected");
        assert!(error.to_string().contains("completed"));
    }
}
