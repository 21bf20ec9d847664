//! Psychosocial occupational risk assessment engine.
//!
//! Scores a fixed questionnaire into per-dimension and global risk classifications, guards the
//! bounded re-editing of completed evaluations, and compares evaluations over time.

pub mod assessment;
pub mod config;
pub mod error;
pub mod telemetry;
