//! Dimension and question reference data.
//!
//! The catalog is read-only for the lifetime of the process. Range tables are validated once when
//! a catalog is built so that gaps surface at load time instead of as unclassifiable scores.

mod loader;
mod standard;

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use super::domain::{Answer, DimensionId, QuestionNumber};

/// Inclusive score range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskRange {
    pub min: u16,
    pub max: u16,
}

impl RiskRange {
    pub const fn new(min: u16, max: u16) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, score: u16) -> bool {
        self.min <= score && score <= self.max
    }
}

impl fmt::Display for RiskRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.min, self.max)
    }
}

/// The three configured bands of a dimension (or of the global table).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskRanges {
    pub low: RiskRange,
    pub medium: RiskRange,
    pub high: RiskRange,
}

impl fmt::Display for RiskRanges {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "low {}, medium {}, high {}",
            self.low, self.medium, self.high
        )
    }
}

/// One of the questionnaire's risk categories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimension {
    pub id: DimensionId,
    pub name: String,
    pub order: u16,
    pub ranges: RiskRanges,
}

/// Questionnaire item and the dimension it belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub number: QuestionNumber,
    pub dimension: DimensionId,
}

/// Read interface over the dimension/question configuration.
pub trait DimensionCatalog: Send + Sync {
    /// Dimensions in display order.
    fn dimensions(&self) -> &[Dimension];

    /// Questions in sequence order.
    fn questions(&self) -> &[Question];

    fn dimension(&self, id: DimensionId) -> Option<&Dimension> {
        self.dimensions().iter().find(|dimension| dimension.id == id)
    }

    fn questions_for(&self, id: DimensionId) -> Vec<QuestionNumber> {
        self.questions()
            .iter()
            .filter(|question| question.dimension == id)
            .map(|question| question.number)
            .collect()
    }

    fn contains_question(&self, number: QuestionNumber) -> bool {
        self.questions()
            .iter()
            .any(|question| question.number == number)
    }

    fn question_count(&self) -> usize {
        self.questions().len()
    }
}

/// Configuration errors detected while building a catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("catalog defines no dimensions")]
    Empty,
    #[error("dimension id {0} is declared more than once")]
    DuplicateDimensionId(DimensionId),
    #[error("dimension name '{0}' is declared more than once")]
    DuplicateDimensionName(String),
    #[error("display order {0} is used by more than one dimension")]
    DuplicateOrder(u16),
    #[error("question {0} is declared more than once")]
    DuplicateQuestion(QuestionNumber),
    #[error("question {question} references unknown dimension {dimension}")]
    UnknownDimension {
        question: QuestionNumber,
        dimension: DimensionId,
    },
    #[error("dimension '{0}' has no questions")]
    EmptyDimension(String),
    #[error(
        "ranges for dimension '{dimension}' ({ranges}) must partition {min}-{max} without gaps or overlaps"
    )]
    RangeGap {
        dimension: String,
        ranges: RiskRanges,
        min: u16,
        max: u16,
    },
    #[error("catalog declares {count} questions; at most {limit} are supported")]
    TooManyQuestions { count: usize, limit: usize },
    #[error("invalid question list '{0}'")]
    InvalidQuestionList(String),
    #[error("unable to read catalog: {0}")]
    Csv(#[from] csv::Error),
    #[error("unable to open catalog: {0}")]
    Io(#[from] std::io::Error),
}

/// In-process catalog validated at construction.
#[derive(Debug, Clone)]
pub struct StaticCatalog {
    dimensions: Vec<Dimension>,
    questions: Vec<Question>,
}

impl StaticCatalog {
    pub fn new(
        mut dimensions: Vec<Dimension>,
        mut questions: Vec<Question>,
    ) -> Result<Self, CatalogError> {
        dimensions.sort_by_key(|dimension| dimension.order);
        questions.sort_by_key(|question| question.number);
        validate(&dimensions, &questions)?;
        Ok(Self {
            dimensions,
            questions,
        })
    }

    /// Built-in 14-dimension, 58-question questionnaire.
    pub fn standard() -> Self {
        let (dimensions, questions) = standard::layout();
        Self {
            dimensions,
            questions,
        }
    }
}

impl DimensionCatalog for StaticCatalog {
    fn dimensions(&self) -> &[Dimension] {
        &self.dimensions
    }

    fn questions(&self) -> &[Question] {
        &self.questions
    }
}

/// Largest catalog whose all-maximum total still fits a `u16` score.
pub const MAX_QUESTIONS: usize = (u16::MAX / Answer::MAX as u16) as usize;

fn validate(dimensions: &[Dimension], questions: &[Question]) -> Result<(), CatalogError> {
    if dimensions.is_empty() {
        return Err(CatalogError::Empty);
    }
    if questions.len() > MAX_QUESTIONS {
        return Err(CatalogError::TooManyQuestions {
            count: questions.len(),
            limit: MAX_QUESTIONS,
        });
    }

    let mut ids = BTreeSet::new();
    let mut names = BTreeSet::new();
    let mut orders = BTreeSet::new();
    for dimension in dimensions {
        if !ids.insert(dimension.id) {
            return Err(CatalogError::DuplicateDimensionId(dimension.id));
        }
        if !names.insert(dimension.name.as_str()) {
            return Err(CatalogError::DuplicateDimensionName(dimension.name.clone()));
        }
        if !orders.insert(dimension.order) {
            return Err(CatalogError::DuplicateOrder(dimension.order));
        }
    }

    let mut numbers = BTreeSet::new();
    let mut per_dimension: BTreeMap<DimensionId, u16> = BTreeMap::new();
    for question in questions {
        if !numbers.insert(question.number) {
            return Err(CatalogError::DuplicateQuestion(question.number));
        }
        if !ids.contains(&question.dimension) {
            return Err(CatalogError::UnknownDimension {
                question: question.number,
                dimension: question.dimension,
            });
        }
        *per_dimension.entry(question.dimension).or_default() += 1;
    }

    for dimension in dimensions {
        let count = per_dimension.get(&dimension.id).copied().unwrap_or(0);
        if count == 0 {
            return Err(CatalogError::EmptyDimension(dimension.name.clone()));
        }
        validate_partition(dimension, count)?;
    }

    Ok(())
}

/// The three ranges must tile `[n * MIN, n * MAX]` exactly. `n` is bounded by [`MAX_QUESTIONS`].
fn validate_partition(dimension: &Dimension, question_count: u16) -> Result<(), CatalogError> {
    let floor = question_count * u16::from(Answer::MIN);
    let ceiling = question_count * u16::from(Answer::MAX);
    let ranges = dimension.ranges;
    let gap = || CatalogError::RangeGap {
        dimension: dimension.name.clone(),
        ranges,
        min: floor,
        max: ceiling,
    };

    let mut bands = [ranges.low, ranges.medium, ranges.high];
    if bands.iter().any(|band| band.min > band.max) {
        return Err(gap());
    }
    bands.sort_by_key(|band| band.min);

    let mut expected = floor;
    for band in bands {
        if band.min != expected {
            return Err(gap());
        }
        expected = band.max.checked_add(1).ok_or_else(gap)?;
    }
    if expected != ceiling + 1 {
        return Err(gap());
    }

    Ok(())
}
