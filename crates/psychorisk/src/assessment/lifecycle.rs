//! DRAFT -> COMPLETED state machine with a bounded number of re-submissions.

use chrono::{DateTime, Utc};

use super::domain::{EditSession, Evaluation, EvaluationId, EvaluationStatus};

/// Guard violations raised by lifecycle transitions.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LifecycleError {
    #[error("evaluation {id} already used {edit_count} of {limit} permitted edits")]
    EditLimitExceeded {
        id: EvaluationId,
        edit_count: u8,
        limit: u8,
    },
    #[error("evaluation {id} cannot be edited ({edit_count} of {limit} edits used)")]
    EditNotAllowed {
        id: EvaluationId,
        edit_count: u8,
        limit: u8,
    },
    #[error("confidentiality terms were not accepted for evaluation {0}")]
    ConfidentialityNotAccepted(EvaluationId),
    #[error("evaluation {0} has not been completed")]
    NotCompleted(EvaluationId),
    #[error("evaluation {0} is completed; request an edit before changing it")]
    ResponsesLocked(EvaluationId),
}

/// Transition a successful submission applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionKind {
    FirstCompletion,
    Resubmission { edit_count: u8 },
}

/// Enforces the edit ceiling on completed evaluations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditGuard {
    max_edits: u8,
}

impl EditGuard {
    pub fn new(max_edits: u8) -> Self {
        Self { max_edits }
    }

    pub fn max_edits(&self) -> u8 {
        self.max_edits
    }

    pub fn can_edit(&self, evaluation: &Evaluation) -> bool {
        match evaluation.status {
            EvaluationStatus::Draft => true,
            EvaluationStatus::Completed => evaluation.edit_count < self.max_edits,
        }
    }

    /// Opens edit mode. Re-entering an open session keeps its original baseline and never
    /// touches the edit counter.
    pub fn request_edit(
        &self,
        evaluation: &mut Evaluation,
        now: DateTime<Utc>,
    ) -> Result<(), LifecycleError> {
        if !self.can_edit(evaluation) {
            return Err(LifecycleError::EditNotAllowed {
                id: evaluation.id.clone(),
                edit_count: evaluation.edit_count,
                limit: self.max_edits,
            });
        }

        if evaluation.is_complete() && evaluation.edit_session.is_none() {
            evaluation.edit_session = Some(EditSession {
                opened_at: now,
                from_edit_count: evaluation.edit_count,
            });
        }
        Ok(())
    }

    /// Responses and demographics are writable while drafting or during an open edit.
    pub fn ensure_writable(&self, evaluation: &Evaluation) -> Result<(), LifecycleError> {
        match evaluation.status {
            EvaluationStatus::Draft => Ok(()),
            EvaluationStatus::Completed if evaluation.edit_session.is_some() => Ok(()),
            EvaluationStatus::Completed => Err(LifecycleError::ResponsesLocked(evaluation.id.clone())),
        }
    }

    /// Decides the transition for a submit without mutating anything.
    pub fn plan_submission(&self, evaluation: &Evaluation) -> Result<SubmissionKind, LifecycleError> {
        if !evaluation.confidentiality_accepted {
            return Err(LifecycleError::ConfidentialityNotAccepted(
                evaluation.id.clone(),
            ));
        }

        match evaluation.status {
            EvaluationStatus::Draft => Ok(SubmissionKind::FirstCompletion),
            EvaluationStatus::Completed => {
                let baseline = evaluation
                    .edit_session
                    .map(|session| session.from_edit_count)
                    .unwrap_or(evaluation.edit_count);
                if baseline >= self.max_edits {
                    return Err(LifecycleError::EditLimitExceeded {
                        id: evaluation.id.clone(),
                        edit_count: baseline,
                        limit: self.max_edits,
                    });
                }
                Ok(SubmissionKind::Resubmission {
                    edit_count: baseline + 1,
                })
            }
        }
    }

    pub fn apply_submission(
        &self,
        evaluation: &mut Evaluation,
        kind: SubmissionKind,
        now: DateTime<Utc>,
    ) {
        match kind {
            SubmissionKind::FirstCompletion => {
                evaluation.status = EvaluationStatus::Completed;
                evaluation.completed_at = Some(now);
                evaluation.edit_count = 0;
            }
            SubmissionKind::Resubmission { edit_count } => {
                evaluation.edit_count = edit_count;
                evaluation.last_edited_at = Some(now);
            }
        }
        evaluation.edit_session = None;
    }
}

impl Default for EditGuard {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_MAX_EDITS)
    }
}
