use crate::assessment::catalog::RiskRanges;
use crate::assessment::domain::{Classification, RiskLabel};

/// Maps a score onto the first inclusive band that contains it.
///
/// This is the only producer of [`Classification`]; a score outside every band is `Undefined`
/// and callers must treat it as a failure rather than pick a label.
pub fn classify(score: u16, ranges: &RiskRanges) -> Classification {
    if ranges.low.contains(score) {
        Classification::Classified(RiskLabel::Low)
    } else if ranges.medium.contains(score) {
        Classification::Classified(RiskLabel::Medium)
    } else if ranges.high.contains(score) {
        Classification::Classified(RiskLabel::High)
    } else {
        Classification::Undefined
    }
}
