use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize, Serializer};

/// Identifier wrapper for assessment instances.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EvaluationId(pub String);

impl fmt::Display for EvaluationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of the assessed person.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SubjectId(pub String);

impl fmt::Display for SubjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Catalog identity of a dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DimensionId(pub u16);

impl fmt::Display for DimensionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Questionnaire item sequence number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionNumber(pub u16);

impl fmt::Display for QuestionNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Risk band produced by classification. Higher scores mean lower risk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RiskLabel {
    #[serde(rename = "BAJO")]
    Low,
    #[serde(rename = "MEDIO")]
    Medium,
    #[serde(rename = "ALTO")]
    High,
}

impl RiskLabel {
    pub fn ordered() -> [RiskLabel; 3] {
        [RiskLabel::Low, RiskLabel::Medium, RiskLabel::High]
    }

    pub fn code(&self) -> &'static str {
        match self {
            RiskLabel::Low => "BAJO",
            RiskLabel::Medium => "MEDIO",
            RiskLabel::High => "ALTO",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RiskLabel::Low => "Low risk",
            RiskLabel::Medium => "Medium risk",
            RiskLabel::High => "High risk",
        }
    }
}

impl fmt::Display for RiskLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Outcome of matching a score against a range table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Classification {
    Classified(RiskLabel),
    Undefined,
}

impl Classification {
    pub fn label(&self) -> Option<RiskLabel> {
        match self {
            Classification::Classified(label) => Some(*label),
            Classification::Undefined => None,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Classification::Classified(label) => label.code(),
            Classification::Undefined => "INDEFINIDO",
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl Serialize for Classification {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}

/// Raised when an answer falls outside the four-point agreement scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("answer {0} is outside the {min}-{max} scale", min = Answer::MIN, max = Answer::MAX)]
pub struct InvalidAnswer(pub u8);

/// Single questionnaire answer on the 1 (disagree) to 4 (fully agree) scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Answer(u8);

impl Answer {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 4;

    pub fn value(&self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Answer {
    type Error = InvalidAnswer;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(InvalidAnswer(value))
        }
    }
}

impl From<Answer> for u8 {
    fn from(value: Answer) -> Self {
        value.0
    }
}

/// Lifecycle status of an evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EvaluationStatus {
    Draft,
    Completed,
}

impl EvaluationStatus {
    pub fn label(&self) -> &'static str {
        match self {
            EvaluationStatus::Draft => "Draft",
            EvaluationStatus::Completed => "Completed",
        }
    }
}

/// Open re-edit of a completed evaluation.
///
/// Persisted on the evaluation so that a resubmission increments from the count recorded when
/// the edit began, no matter how many times edit mode was re-entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditSession {
    pub opened_at: DateTime<Utc>,
    pub from_edit_count: u8,
}

/// Descriptive metadata captured with the questionnaire. Never used for scoring.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Demographics {
    #[serde(default)]
    pub evaluation_date: Option<NaiveDate>,
    #[serde(default)]
    pub province: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub work_area: Option<String>,
    #[serde(default)]
    pub education_level: Option<String>,
    #[serde(default)]
    pub experience_range: Option<String>,
    #[serde(default)]
    pub age_range: Option<String>,
    #[serde(default)]
    pub ethnicity: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
}

/// One assessment of one subject for one period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    pub id: EvaluationId,
    pub subject: SubjectId,
    pub period: i32,
    pub status: EvaluationStatus,
    pub edit_count: u8,
    pub started_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    pub last_edited_at: Option<DateTime<Utc>>,
    pub confidentiality_accepted: bool,
    pub edit_session: Option<EditSession>,
    pub demographics: Demographics,
}

impl Evaluation {
    pub fn draft(id: EvaluationId, subject: SubjectId, period: i32, now: DateTime<Utc>) -> Self {
        Self {
            id,
            subject,
            period,
            status: EvaluationStatus::Draft,
            edit_count: 0,
            started_at: now,
            completed_at: None,
            last_edited_at: None,
            confidentiality_accepted: false,
            edit_session: None,
            demographics: Demographics::default(),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.status == EvaluationStatus::Completed
    }
}

/// Answer to one question within one evaluation; unique per (evaluation, question).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    pub question: QuestionNumber,
    pub answer: Answer,
}

/// Derived outcome of scoring one dimension for one evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskResult {
    pub evaluation_id: EvaluationId,
    pub dimension: DimensionId,
    pub score: u16,
    pub label: RiskLabel,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn answers_outside_scale_are_rejected() {
        assert!(Answer::try_from(0).is_err());
        assert!(Answer::try_from(5).is_err());
        assert_eq!(Answer::try_from(4).map(|answer| answer.value()), Ok(4));
    }

    #[test]
    fn answers_deserialize_through_validation() {
        let parsed: Result<Answer, _> = serde_json::from_str("3");
        assert_eq!(parsed.expect("valid answer").value(), 3);
        let rejected: Result<Answer, _> = serde_json::from_str("7");
        assert!(rejected.is_err());
    }

    #[test]
    fn labels_serialize_with_domain_codes() {
        let json = serde_json::to_string(&RiskLabel::Medium).expect("serializes");
        assert_eq!(json, "\"MEDIO\"");
        let undefined = serde_json::to_string(&Classification::Undefined).expect("serializes");
        assert_eq!(undefined, "\"INDEFINIDO\"");
    }
}
