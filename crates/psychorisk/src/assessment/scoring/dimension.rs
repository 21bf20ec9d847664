use std::collections::BTreeMap;

use super::classifier::classify;
use super::ScoringError;
use crate::assessment::catalog::Dimension;
use crate::assessment::domain::{Answer, EvaluationId, QuestionNumber, RiskResult};

/// Sums one dimension's answers and classifies the total against its ranges.
///
/// Every question of the dimension must be answered exactly once; answers for other
/// dimensions are ignored.
pub fn score_dimension(
    evaluation_id: &EvaluationId,
    dimension: &Dimension,
    questions: &[QuestionNumber],
    answers: &BTreeMap<QuestionNumber, Answer>,
) -> Result<RiskResult, ScoringError> {
    let missing: Vec<QuestionNumber> = questions
        .iter()
        .filter(|number| !answers.contains_key(number))
        .copied()
        .collect();
    if !missing.is_empty() {
        return Err(ScoringError::MissingResponses {
            dimension: Some(dimension.name.clone()),
            missing,
        });
    }

    let score: u16 = questions
        .iter()
        .filter_map(|number| answers.get(number))
        .map(|answer| u16::from(answer.value()))
        .sum();
    if score == 0 {
        return Err(ScoringError::InvalidScore {
            dimension: dimension.name.clone(),
        });
    }

    let label = classify(score, &dimension.ranges).label().ok_or_else(|| {
        ScoringError::UnclassifiableScore {
            dimension: dimension.name.clone(),
            score,
            ranges: dimension.ranges,
        }
    })?;

    Ok(RiskResult {
        evaluation_id: evaluation_id.clone(),
        dimension: dimension.id,
        score,
        label,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessment::catalog::{RiskRange, RiskRanges};
    use crate::assessment::domain::{DimensionId, RiskLabel};

    fn dimension(ranges: RiskRanges) -> Dimension {
        Dimension {
            id: DimensionId(7),
            name: "Soporte y apoyo".to_string(),
            order: 7,
            ranges,
        }
    }

    fn example_ranges() -> RiskRanges {
        RiskRanges {
            low: RiskRange::new(3, 5),
            medium: RiskRange::new(6, 9),
            high: RiskRange::new(10, 12),
        }
    }

    fn answers(values: &[(u16, u8)]) -> BTreeMap<QuestionNumber, Answer> {
        values
            .iter()
            .map(|(number, value)| {
                (
                    QuestionNumber(*number),
                    Answer::try_from(*value).expect("valid answer"),
                )
            })
            .collect()
    }

    fn questions() -> Vec<QuestionNumber> {
        vec![QuestionNumber(1), QuestionNumber(2), QuestionNumber(3)]
    }

    #[test]
    fn sums_answers_and_classifies() {
        let id = EvaluationId("eval-1".to_string());
        let result = score_dimension(
            &id,
            &dimension(example_ranges()),
            &questions(),
            &answers(&[(1, 2), (2, 3), (3, 4)]),
        )
        .expect("dimension scores");
        assert_eq!(result.score, 9);
        assert_eq!(result.label, RiskLabel::Medium);
        assert_eq!(result.dimension, DimensionId(7));
    }

    #[test]
    fn ignores_answers_from_other_dimensions() {
        let id = EvaluationId("eval-1".to_string());
        let result = score_dimension(
            &id,
            &dimension(example_ranges()),
            &questions(),
            &answers(&[(1, 1), (2, 1), (3, 1), (4, 4), (5, 4)]),
        )
        .expect("dimension scores");
        assert_eq!(result.score, 3);
        assert_eq!(result.label, RiskLabel::Low);
    }

    #[test]
    fn reports_every_missing_question() {
        let id = EvaluationId("eval-1".to_string());
        let error = score_dimension(
            &id,
            &dimension(example_ranges()),
            &questions(),
            &answers(&[(2, 3)]),
        )
        .expect_err("incomplete dimension fails");
        match error {
            ScoringError::MissingResponses { dimension, missing } => {
                assert_eq!(dimension.as_deref(), Some("Soporte y apoyo"));
                assert_eq!(missing, vec![QuestionNumber(1), QuestionNumber(3)]);
            }
            other => panic!("expected missing responses, got {other:?}"),
        }
    }

    #[test]
    fn dimension_without_questions_is_a_zero_score() {
        let id = EvaluationId("eval-1".to_string());
        let error = score_dimension(
            &id,
            &dimension(example_ranges()),
            &[],
            &answers(&[(1, 3)]),
        )
        .expect_err("zero score rejected");
        assert!(matches!(error, ScoringError::InvalidScore { .. }));
    }

    #[test]
    fn misconfigured_ranges_name_score_and_bands() {
        let id = EvaluationId("eval-1".to_string());
        let gappy = RiskRanges {
            low: RiskRange::new(3, 5),
            medium: RiskRange::new(6, 8),
            high: RiskRange::new(10, 12),
        };
        let error = score_dimension(
            &id,
            &dimension(gappy),
            &questions(),
            &answers(&[(1, 2), (2, 3), (3, 4)]),
        )
        .expect_err("score 9 falls in the gap");
        let message = error.to_string();
        assert!(message.contains('9'), "{message}");
        assert!(message.contains("medium 6-8"), "{message}");
    }

    #[test]
    fn scores_stay_within_question_bounds() {
        let id = EvaluationId("eval-1".to_string());
        let standard = RiskRanges {
            low: RiskRange::new(10, 12),
            medium: RiskRange::new(6, 9),
            high: RiskRange::new(3, 5),
        };
        for first in 1..=4u8 {
            for second in 1..=4u8 {
                for third in 1..=4u8 {
                    let result = score_dimension(
                        &id,
                        &dimension(standard),
                        &questions(),
                        &answers(&[(1, first), (2, second), (3, third)]),
                    )
                    .expect("complete dimension scores");
                    assert!((3..=12).contains(&result.score));
                }
            }
        }
    }

    #[test]
    fn raising_every_answer_never_raises_risk() {
        let id = EvaluationId("eval-1".to_string());
        let standard = RiskRanges {
            low: RiskRange::new(10, 12),
            medium: RiskRange::new(6, 9),
            high: RiskRange::new(3, 5),
        };
        let mut previous: Option<RiskResult> = None;
        for value in 1..=4u8 {
            let result = score_dimension(
                &id,
                &dimension(standard),
                &questions(),
                &answers(&[(1, value), (2, value), (3, value)]),
            )
            .expect("dimension scores");
            if let Some(prior) = &previous {
                assert!(result.score >= prior.score);
                // RiskLabel orders Low < Medium < High.
                assert!(result.label <= prior.label);
            }
            previous = Some(result);
        }
    }
}
