//! Flow outcomes returned to the host.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use natioid_types::Route;

use crate::stage::FlowStage;
use crate::verifier::VerifierError;

/// Terminal value of a flow.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlowResult {
    /// The flow completed; the host navigates to the route.
    Success(Route),
    /// The flow ended without success.
    Failure(FailureReason),
}

impl FlowResult {
    /// Whether this is the success arm.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }
}

/// Why a flow ended in failure.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FailureReason {
    /// Wrong-credential attempts were exhausted; the host routes to
    /// account recovery.
    Lockout,
    /// The host ended the flow (user cancelled, or the host gave up
    /// after repeated verifier failures).
    Aborted(String),
}

/// Directive to schedule the automatic submission of a just-filled buffer.
///
/// Returned by the append that lands the final digit. The host waits
/// `delay` so the UI can render that digit, then calls submit, provided
/// the buffer is still full.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AutoSubmit {
    /// How long to wait before submitting.
    pub delay: Duration,
}

/// What a submission did.
///
/// Every expected runtime condition lands here; an `Err` from submit is
/// reserved for caller bugs.
#[derive(Debug)]
pub enum SubmitOutcome {
    /// A terminal stage was reached.
    Complete(FlowResult),
    /// A multi-stage flow moved to its next input stage.
    Advanced { next: FlowStage },
    /// Wrong credential; the cleared stage is ready for re-entry.
    /// `remaining` carries the attempt count where a counter applies.
    Rejected { remaining: Option<u32> },
    /// Confirm-stage entry did not match the captured new credential;
    /// new-credential entry restarts from scratch.
    Mismatch { restart: FlowStage },
    /// The verifier could not be reached. Nothing was consumed: the
    /// buffer still holds the candidate and no attempt was counted.
    Unavailable { error: VerifierError },
}
