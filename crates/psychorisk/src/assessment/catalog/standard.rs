use super::{Dimension, Question, RiskRange, RiskRanges};
use crate::assessment::domain::{DimensionId, QuestionNumber};

struct Row {
    name: &'static str,
    first: u16,
    last: u16,
    low: (u16, u16),
    medium: (u16, u16),
    high: (u16, u16),
}

// MDT questionnaire layout: higher totals mean lower risk.
const ROWS: [Row; 14] = [
    Row { name: "Carga y ritmo de trabajo", first: 1, last: 4, low: (13, 16), medium: (8, 12), high: (4, 7) },
    Row { name: "Desarrollo de competencias", first: 5, last: 8, low: (13, 16), medium: (8, 12), high: (4, 7) },
    Row { name: "Liderazgo", first: 9, last: 14, low: (19, 24), medium: (12, 18), high: (6, 11) },
    Row { name: "Margen de acción y control", first: 15, last: 18, low: (13, 16), medium: (8, 12), high: (4, 7) },
    Row { name: "Organización del trabajo", first: 19, last: 24, low: (19, 24), medium: (12, 18), high: (6, 11) },
    Row { name: "Recuperación", first: 25, last: 29, low: (16, 20), medium: (10, 15), high: (5, 9) },
    Row { name: "Soporte y apoyo", first: 30, last: 34, low: (16, 20), medium: (10, 15), high: (5, 9) },
    Row { name: "Otros puntos importantes", first: 35, last: 38, low: (13, 16), medium: (8, 12), high: (4, 7) },
    Row { name: "Ambiente físico", first: 39, last: 42, low: (13, 16), medium: (8, 12), high: (4, 7) },
    Row { name: "Reconocimiento y compensación", first: 43, last: 45, low: (10, 12), medium: (6, 9), high: (3, 5) },
    Row { name: "Claridad de rol", first: 46, last: 48, low: (10, 12), medium: (6, 9), high: (3, 5) },
    Row { name: "Doble presencia (laboral-familiar)", first: 49, last: 51, low: (10, 12), medium: (6, 9), high: (3, 5) },
    Row { name: "Estabilidad laboral percibida", first: 52, last: 54, low: (10, 12), medium: (6, 9), high: (3, 5) },
    Row { name: "Salud auto percibida", first: 55, last: 58, low: (13, 16), medium: (8, 12), high: (4, 7) },
];

pub(super) fn layout() -> (Vec<Dimension>, Vec<Question>) {
    let mut dimensions = Vec::with_capacity(ROWS.len());
    let mut questions = Vec::new();

    for (index, row) in ROWS.iter().enumerate() {
        let position = index as u16 + 1;
        let id = DimensionId(position);
        dimensions.push(Dimension {
            id,
            name: row.name.to_string(),
            order: position,
            ranges: RiskRanges {
                low: RiskRange::new(row.low.0, row.low.1),
                medium: RiskRange::new(row.medium.0, row.medium.1),
                high: RiskRange::new(row.high.0, row.high.1),
            },
        });
        questions.extend((row.first..=row.last).map(|number| Question {
            number: QuestionNumber(number),
            dimension: id,
        }));
    }

    (dimensions, questions)
}
