use super::classifier::classify;
use super::ScoringError;
use crate::assessment::catalog::{RiskRange, RiskRanges};
use crate::assessment::domain::{Classification, Response, RiskResult};

/// Fixed organization-wide bands over the full 58-232 total, independent of dimension ranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlobalThresholds {
    ranges: RiskRanges,
}

impl GlobalThresholds {
    /// MDT reference bands.
    pub const fn mdt() -> Self {
        Self {
            ranges: RiskRanges {
                low: RiskRange::new(175, 232),
                medium: RiskRange::new(117, 174),
                high: RiskRange::new(58, 116),
            },
        }
    }

    pub fn ranges(&self) -> &RiskRanges {
        &self.ranges
    }

    /// Totals outside the table classify as `Undefined`; nothing is clamped.
    pub fn classify(&self, total_score: u16) -> Classification {
        classify(total_score, &self.ranges)
    }
}

impl Default for GlobalThresholds {
    fn default() -> Self {
        Self::mdt()
    }
}

/// Authoritative global score: the raw sum of every recorded answer.
pub fn raw_total(responses: &[Response]) -> u16 {
    responses.iter().fold(0u16, |total, response| {
        total.saturating_add(u16::from(response.answer.value()))
    })
}

/// Cross-checks the raw total against the sum of per-dimension scores.
pub fn reconcile(raw: u16, results: &[RiskResult]) -> Result<u16, ScoringError> {
    let dimensions = results
        .iter()
        .fold(0u16, |total, result| total.saturating_add(result.score));
    if dimensions != raw {
        return Err(ScoringError::GlobalScoreMismatch { raw, dimensions });
    }
    Ok(raw)
}
