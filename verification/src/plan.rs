//! Per-flow transition plans.
//!
//! Every credential screen is the same machine with a different table:
//! each input stage maps to exactly one submit-time action, and the
//! retry regime is either an attempt counter (PIN flows) or a resend
//! window (one-time-code flows).

use natioid_types::{FlowKind, Route};

use crate::error::FlowError;
use crate::stage::FlowStage;

/// What submitting a full buffer does at a given stage.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StageAction {
    /// Send the entry to the verifier port.
    VerifyCredential {
        /// Where an accepted verdict leads.
        on_accept: StageExit,
    },
    /// Record the entry as the pending new credential. No backend call.
    CaptureNewCredential {
        /// The confirmation stage entered after capture.
        confirm_stage: FlowStage,
    },
    /// Compare the entry against the pending new credential.
    ConfirmNewCredential {
        /// Where a mismatch restarts new-credential entry.
        restart_stage: FlowStage,
    },
}

/// Where an accepted verification leads.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StageExit {
    /// Move to the next input stage of a multi-stage flow.
    AdvanceTo(FlowStage),
    /// Reach the terminal `Succeeded` stage.
    Finish,
}

/// Retry regime for rejected submissions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RetryPolicy {
    /// Wrong entries decrement a counter; exhausting it locks the flow.
    Attempts(u32),
    /// No lockout. Re-entry is open-ended and a countdown window gates
    /// requesting a fresh code.
    ResendWindow(u32),
}

/// The fixed transition table for one flow.
#[derive(Clone, Debug)]
pub struct FlowPlan {
    kind: FlowKind,
    initial_stage: FlowStage,
    actions: Vec<(FlowStage, StageAction)>,
    retry: RetryPolicy,
    success_route: Route,
}

impl FlowPlan {
    /// Assemble a plan. Consistency is checked when the engine is built.
    pub fn new(
        kind: FlowKind,
        initial_stage: FlowStage,
        actions: Vec<(FlowStage, StageAction)>,
        retry: RetryPolicy,
        success_route: Route,
    ) -> Self {
        Self {
            kind,
            initial_stage,
            actions,
            retry,
            success_route,
        }
    }

    /// Which screen this plan drives.
    pub fn kind(&self) -> FlowKind {
        self.kind
    }

    /// The stage a fresh engine starts in.
    pub fn initial_stage(&self) -> FlowStage {
        self.initial_stage
    }

    /// The retry regime for rejected submissions.
    pub fn retry(&self) -> RetryPolicy {
        self.retry
    }

    /// Route handed to the host when the flow succeeds.
    pub fn success_route(&self) -> &Route {
        &self.success_route
    }

    /// The submit-time action for a stage, if the plan knows it.
    pub fn action_for(&self, stage: FlowStage) -> Option<&StageAction> {
        self.actions
            .iter()
            .find(|(s, _)| *s == stage)
            .map(|(_, action)| action)
    }

    /// Check the table is usable: the initial stage and every stage a
    /// transition can land on must accept input and carry an action.
    pub(crate) fn validate(&self) -> Result<(), FlowError> {
        self.require_input_stage(self.initial_stage, "initial stage")?;

        for (stage, action) in &self.actions {
            if !stage.accepts_input() {
                return Err(FlowError::InvalidPlan(format!(
                    "action listed for non-input stage {}",
                    stage.as_str()
                )));
            }
            match action {
                StageAction::VerifyCredential {
                    on_accept: StageExit::AdvanceTo(next),
                } => self.require_input_stage(*next, "advance target")?,
                StageAction::VerifyCredential {
                    on_accept: StageExit::Finish,
                } => {}
                StageAction::CaptureNewCredential { confirm_stage } => {
                    self.require_input_stage(*confirm_stage, "confirm stage")?
                }
                StageAction::ConfirmNewCredential { restart_stage } => {
                    self.require_input_stage(*restart_stage, "restart stage")?
                }
            }
        }

        Ok(())
    }

    fn require_input_stage(&self, stage: FlowStage, role: &str) -> Result<(), FlowError> {
        if !stage.accepts_input() {
            return Err(FlowError::InvalidPlan(format!(
                "{role} {} does not accept input",
                stage.as_str()
            )));
        }
        if self.action_for(stage).is_none() {
            return Err(FlowError::InvalidPlan(format!(
                "{role} {} has no submit action",
                stage.as_str()
            )));
        }
        Ok(())
    }
}
