use thiserror::Error;

use crate::stage::FlowStage;

/// Precondition violations raised to the host.
///
/// Expected runtime conditions (wrong credential, lockout, confirm
/// mismatch, unreachable verifier) are reported through
/// `SubmitOutcome`; an `Err(FlowError)` always indicates a bug in the
/// calling code.
#[derive(Debug, Error)]
pub enum FlowError {
    #[error("cannot submit an incomplete credential: have {have} of {need} digits")]
    IncompleteCredential { have: usize, need: usize },

    #[error("stage {stage:?} does not accept a submission")]
    NotSubmittable { stage: FlowStage },

    #[error("cannot advance from {from:?} to {to:?}")]
    AdvanceNotAllowed { from: FlowStage, to: FlowStage },

    #[error("no captured credential to confirm against")]
    NothingToConfirm,

    #[error("invalid flow plan: {0}")]
    InvalidPlan(String),
}
