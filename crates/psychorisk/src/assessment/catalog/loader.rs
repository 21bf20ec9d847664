use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use super::{CatalogError, Dimension, Question, RiskRange, RiskRanges, StaticCatalog};
use crate::assessment::domain::{DimensionId, QuestionNumber};

#[derive(Debug, Deserialize)]
struct CatalogRow {
    id: u16,
    name: String,
    order: u16,
    low_min: u16,
    low_max: u16,
    medium_min: u16,
    medium_max: u16,
    high_min: u16,
    high_max: u16,
    questions: String,
}

impl StaticCatalog {
    /// Reads a catalog CSV with the columns
    /// `id,name,order,low_min,low_max,medium_min,medium_max,high_min,high_max,questions`,
    /// where `questions` lists item numbers such as `1-4` or `35;36;40-41`.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self, CatalogError> {
        let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);

        let mut dimensions = Vec::new();
        let mut questions = Vec::new();
        for row in csv_reader.deserialize::<CatalogRow>() {
            let row = row?;
            let id = DimensionId(row.id);
            for number in parse_question_list(&row.questions)? {
                questions.push(Question {
                    number,
                    dimension: id,
                });
            }
            dimensions.push(Dimension {
                id,
                name: row.name,
                order: row.order,
                ranges: RiskRanges {
                    low: RiskRange::new(row.low_min, row.low_max),
                    medium: RiskRange::new(row.medium_min, row.medium_max),
                    high: RiskRange::new(row.high_min, row.high_max),
                },
            });
        }

        Self::new(dimensions, questions)
    }

    pub fn from_csv_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let file = File::open(path)?;
        Self::from_csv_reader(file)
    }
}

fn parse_question_list(raw: &str) -> Result<Vec<QuestionNumber>, CatalogError> {
    let invalid = || CatalogError::InvalidQuestionList(raw.to_string());
    let mut numbers = Vec::new();

    for part in raw.split(';').map(str::trim).filter(|part| !part.is_empty()) {
        match part.split_once('-') {
            Some((start, end)) => {
                let start: u16 = start.trim().parse().map_err(|_| invalid())?;
                let end: u16 = end.trim().parse().map_err(|_| invalid())?;
                if start > end {
                    return Err(invalid());
                }
                numbers.extend((start..=end).map(QuestionNumber));
            }
            None => numbers.push(QuestionNumber(part.parse().map_err(|_| invalid())?)),
        }
    }

    if numbers.is_empty() {
        return Err(invalid());
    }
    Ok(numbers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessment::catalog::DimensionCatalog;
    use std::io::Cursor;

    const CATALOG: &str = "\
id,name,order,low_min,low_max,medium_min,medium_max,high_min,high_max,questions
1,Leadership,2,10,12,6,9,3,5,1-3
2,Recovery,1,13,16,8,12,4,7,4;5;6-7
";

    #[test]
    fn loads_rows_in_display_order() {
        let catalog = StaticCatalog::from_csv_reader(Cursor::new(CATALOG)).expect("catalog loads");
        let names: Vec<_> = catalog
            .dimensions()
            .iter()
            .map(|dimension| dimension.name.as_str())
            .collect();
        assert_eq!(names, vec!["Recovery", "Leadership"]);
        assert_eq!(catalog.question_count(), 7);
        assert_eq!(
            catalog.questions_for(DimensionId(2)),
            vec![
                QuestionNumber(4),
                QuestionNumber(5),
                QuestionNumber(6),
                QuestionNumber(7)
            ]
        );
    }

    #[test]
    fn rejects_malformed_question_lists() {
        assert!(parse_question_list("4-2").is_err());
        assert!(parse_question_list("a;b").is_err());
        assert!(parse_question_list(" ").is_err());
        assert_eq!(
            parse_question_list("1; 3-4").expect("valid list"),
            vec![QuestionNumber(1), QuestionNumber(3), QuestionNumber(4)]
        );
    }

    #[test]
    fn surfaces_range_gaps_at_load_time() {
        let broken = CATALOG.replace("10,12,6,9,3,5", "10,12,6,8,3,5");
        let result = StaticCatalog::from_csv_reader(Cursor::new(broken));
        assert!(matches!(result, Err(CatalogError::RangeGap { .. })));
    }

    #[test]
    fn oversized_catalogs_are_rejected_instead_of_overflowing() {
        let oversized = "\
id,name,order,low_min,low_max,medium_min,medium_max,high_min,high_max,questions
1,Everything,1,60000,65535,40000,59999,20000,39999,1-20000
";
        let result = StaticCatalog::from_csv_reader(Cursor::new(oversized));
        match result {
            Err(CatalogError::TooManyQuestions { count, limit }) => {
                assert_eq!(count, 20_000);
                assert_eq!(limit, 16_383);
            }
            other => panic!("expected too many questions, got {other:?}"),
        }
    }
}
