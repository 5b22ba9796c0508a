//! Verification flow engine: connects the entry buffer, transition plan,
//! retry bookkeeping, and verifier port into a single screen-facing machine.
//!
//! The engine owns all flow state and performs no I/O, navigation, or
//! scheduling of its own. Hosts feed it digits and ticks, schedule the
//! auto-submit delay it hands back, and render the events it queues.

use std::sync::Arc;
use std::time::Duration;

use natioid_types::{Credential, Digit, FlowKind, FlowParams, Route};

use crate::attempts::AttemptCounter;
use crate::buffer::CredentialBuffer;
use crate::error::FlowError;
use crate::outcomes::{AutoSubmit, FailureReason, FlowResult, SubmitOutcome};
use crate::plan::{FlowPlan, RetryPolicy, StageAction, StageExit};
use crate::resend::ResendTimer;
use crate::stage::FlowStage;
use crate::verifier::{CredentialVerifier, Verdict};

/// Events emitted by the engine for the host to render.
#[derive(Clone, Debug)]
pub enum FlowEvent {
    /// The flow moved between stages.
    StageChanged { from: FlowStage, to: FlowStage },
    /// The final digit landed. The host submits after `delay_ms` if the
    /// buffer is still full by then.
    AutoSubmitArmed { delay_ms: u64 },
    /// A full-length entry was rejected by the verifier. Hosts key the
    /// haptic cue off this.
    CredentialRejected { remaining: Option<u32> },
    /// The attempt counter changed.
    AttemptsChanged { remaining: u32 },
    /// Confirm entry did not match the captured new credential; entry
    /// restarts from the new-credential stage.
    ConfirmMismatch,
    /// One second elapsed on the resend window.
    ResendTimerTick { seconds_remaining: u32 },
    /// The resend window elapsed; a fresh code may now be requested.
    ResendAvailable,
    /// A fresh code was requested and the window restarted.
    CodeResent,
    /// The verifier could not be reached; nothing was consumed.
    VerifierUnavailable { detail: String },
    /// The flow reached a terminal stage.
    Completed { result: FlowResult },
}

/// State machine driving one credential-entry flow.
///
/// One instance per screen visit: a flow that ends (or a screen that is
/// left) discards the engine, and every counter and buffer with it.
pub struct VerificationFlowEngine {
    plan: FlowPlan,
    params: FlowParams,
    verifier: Arc<dyn CredentialVerifier>,
    stage: FlowStage,
    buffer: CredentialBuffer,
    pending_new: Option<Credential>,
    attempts: Option<AttemptCounter>,
    resend: Option<ResendTimer>,
    autosubmit_armed: bool,
    /// Pending events for the host to render.
    pending_events: Vec<FlowEvent>,
    result: Option<FlowResult>,
}

impl VerificationFlowEngine {
    /// Build an engine for one flow instance.
    ///
    /// Fails only when the plan's table is inconsistent, which is a bug
    /// in the host, never a user condition.
    pub fn new(
        plan: FlowPlan,
        params: FlowParams,
        verifier: Arc<dyn CredentialVerifier>,
    ) -> Result<Self, FlowError> {
        plan.validate()?;

        let (attempts, resend) = match plan.retry() {
            RetryPolicy::Attempts(max) => (Some(AttemptCounter::new(max)), None),
            RetryPolicy::ResendWindow(secs) => (None, Some(ResendTimer::new(secs))),
        };

        Ok(Self {
            stage: plan.initial_stage(),
            buffer: CredentialBuffer::new(params.credential_len),
            plan,
            params,
            verifier,
            pending_new: None,
            attempts,
            resend,
            autosubmit_armed: false,
            pending_events: Vec::new(),
            result: None,
        })
    }

    /// Append one digit of the active entry.
    ///
    /// No-op while submitting, after a terminal stage, or when the buffer
    /// is already full. The append that fills the buffer arms auto-submit
    /// and returns the scheduling directive, exactly once per fill.
    pub fn append_digit(&mut self, digit: Digit) -> Option<AutoSubmit> {
        if !self.stage.accepts_input() || self.buffer.is_full() {
            return None;
        }
        self.buffer.push(digit);

        if self.buffer.is_full() {
            self.autosubmit_armed = true;
            let delay_ms = self.params.autosubmit_delay_ms;
            self.pending_events
                .push(FlowEvent::AutoSubmitArmed { delay_ms });
            return Some(AutoSubmit {
                delay: Duration::from_millis(delay_ms),
            });
        }
        None
    }

    /// Remove the most recent digit. No-op on an empty buffer; never
    /// touches the attempt counter or timers. Removing a digit from a
    /// full buffer disarms the pending auto-submit.
    pub fn remove_last_digit(&mut self) {
        if !self.stage.accepts_input() {
            return;
        }
        if self.buffer.pop() {
            self.autosubmit_armed = false;
        }
    }

    /// Submit the full-length entry for the current stage.
    ///
    /// Expected conditions (wrong credential, lockout, confirm mismatch,
    /// unreachable verifier) are reported in [`SubmitOutcome`]; `Err`
    /// means the caller violated a precondition.
    pub async fn submit(&mut self) -> Result<SubmitOutcome, FlowError> {
        if !self.stage.accepts_input() {
            return Err(FlowError::NotSubmittable { stage: self.stage });
        }
        if !self.buffer.is_full() {
            return Err(FlowError::IncompleteCredential {
                have: self.buffer.len(),
                need: self.buffer.capacity(),
            });
        }

        let origin = self.stage;
        let action = self
            .plan
            .action_for(origin)
            .cloned()
            .ok_or_else(|| FlowError::NotSubmittable { stage: origin })?;
        self.autosubmit_armed = false;

        match action {
            StageAction::VerifyCredential { on_accept } => {
                // Input is frozen for the round trip.
                self.transition(FlowStage::Submitting);
                let candidate = self.buffer.to_credential();
                let verifier = Arc::clone(&self.verifier);
                match verifier.verify(&candidate).await {
                    Ok(Verdict::Accepted) => match on_accept {
                        StageExit::Finish => {
                            // The accepted entry stays in the buffer as
                            // evidence; terminal stages refuse input anyway.
                            let route = self.plan.success_route().clone();
                            let result =
                                self.finish(FlowStage::Succeeded, FlowResult::Success(route));
                            Ok(SubmitOutcome::Complete(result))
                        }
                        StageExit::AdvanceTo(next) => {
                            self.buffer.clear();
                            self.transition(next);
                            Ok(SubmitOutcome::Advanced { next })
                        }
                    },
                    Ok(Verdict::Rejected) => Ok(self.reject(origin)),
                    Err(error) => {
                        // Transport failure, not a wrong credential: the
                        // candidate stays in place and no attempt is counted.
                        self.pending_events.push(FlowEvent::VerifierUnavailable {
                            detail: error.to_string(),
                        });
                        self.transition(origin);
                        Ok(SubmitOutcome::Unavailable { error })
                    }
                }
            }

            StageAction::CaptureNewCredential { confirm_stage } => {
                self.pending_new = Some(self.buffer.take_credential());
                self.transition(confirm_stage);
                Ok(SubmitOutcome::Advanced {
                    next: confirm_stage,
                })
            }

            StageAction::ConfirmNewCredential { restart_stage } => {
                let Some(expected) = self.pending_new.as_ref() else {
                    return Err(FlowError::NothingToConfirm);
                };
                if self.buffer.to_credential() == *expected {
                    // A matching confirmation needs no backend round trip.
                    let route = self.plan.success_route().clone();
                    let result = self.finish(FlowStage::Succeeded, FlowResult::Success(route));
                    Ok(SubmitOutcome::Complete(result))
                } else {
                    self.pending_new = None;
                    self.buffer.clear();
                    self.pending_events.push(FlowEvent::ConfirmMismatch);
                    self.transition(restart_stage);
                    Ok(SubmitOutcome::Mismatch {
                        restart: restart_stage,
                    })
                }
            }
        }
    }

    /// Move a multi-stage flow to another planned input stage, clearing
    /// the buffer.
    ///
    /// The built-in plans advance on their own when a submission is
    /// accepted or captured; this is for hosts driving a custom plan.
    pub fn advance_stage(&mut self, next: FlowStage) -> Result<(), FlowError> {
        if !self.stage.accepts_input()
            || !next.accepts_input()
            || self.plan.action_for(next).is_none()
        {
            return Err(FlowError::AdvanceNotAllowed {
                from: self.stage,
                to: next,
            });
        }
        self.buffer.clear();
        self.autosubmit_armed = false;
        self.transition(next);
        Ok(())
    }

    /// Advance the resend window by one elapsed second.
    ///
    /// The host drives this once per wall-clock second while a code-entry
    /// stage is showing. Ignored for flows without a resend window, away
    /// from the code-entry stage, or once the window has already elapsed.
    pub fn tick_resend_timer(&mut self) {
        if self.stage != FlowStage::AwaitingOtp {
            return;
        }
        let Some(timer) = self.resend.as_mut() else {
            return;
        };
        if timer.can_resend() {
            return;
        }
        let seconds_remaining = timer.tick();
        self.pending_events
            .push(FlowEvent::ResendTimerTick { seconds_remaining });
        if seconds_remaining == 0 {
            self.pending_events.push(FlowEvent::ResendAvailable);
        }
    }

    /// Request a fresh one-time code once the resend window has elapsed.
    ///
    /// Returns `false` without side effects while the window is still
    /// counting down or the flow has no resend window. A granted resend
    /// restarts the window, discards any partial entry, and never touches
    /// the attempt counter.
    pub fn resend(&mut self) -> bool {
        if self.stage != FlowStage::AwaitingOtp {
            return false;
        }
        let Some(timer) = self.resend.as_mut() else {
            return false;
        };
        if !timer.can_resend() {
            return false;
        }
        timer.reset();
        self.buffer.clear();
        self.autosubmit_armed = false;
        self.pending_events.push(FlowEvent::CodeResent);
        true
    }

    /// End the flow from the host side (user cancelled, or the host gave
    /// up after repeated verifier failures).
    ///
    /// Aborting an already-terminal flow returns the recorded result
    /// unchanged.
    pub fn abort(&mut self, detail: impl Into<String>) -> FlowResult {
        if let Some(result) = &self.result {
            return result.clone();
        }
        self.buffer.clear();
        self.pending_new = None;
        self.autosubmit_armed = false;
        self.finish(
            FlowStage::Failed,
            FlowResult::Failure(FailureReason::Aborted(detail.into())),
        )
    }

    /// Drain pending events for the host to render.
    pub fn drain_events(&mut self) -> Vec<FlowEvent> {
        std::mem::take(&mut self.pending_events)
    }

    /// Which screen this engine drives.
    pub fn kind(&self) -> FlowKind {
        self.plan.kind()
    }

    /// The current stage.
    pub fn stage(&self) -> FlowStage {
        self.stage
    }

    /// Whether the flow has ended.
    pub fn is_terminal(&self) -> bool {
        self.stage.is_terminal()
    }

    /// Digits currently entered for the active stage.
    pub fn buffer_len(&self) -> usize {
        self.buffer.len()
    }

    /// Whether the entry has reached the fixed credential length.
    pub fn buffer_is_full(&self) -> bool {
        self.buffer.is_full()
    }

    /// Whether an auto-submit delay is outstanding for the current fill.
    pub fn autosubmit_armed(&self) -> bool {
        self.autosubmit_armed
    }

    /// Remaining wrong-credential submissions, where a counter applies.
    pub fn attempts_remaining(&self) -> Option<u32> {
        self.attempts.map(|counter| counter.remaining())
    }

    /// Seconds left on the resend window, where one applies.
    pub fn resend_seconds_remaining(&self) -> Option<u32> {
        self.resend.map(|timer| timer.seconds_remaining())
    }

    /// Whether a fresh one-time code may be requested right now.
    pub fn can_resend(&self) -> bool {
        self.stage == FlowStage::AwaitingOtp
            && self.resend.map(|timer| timer.can_resend()).unwrap_or(false)
    }

    /// The parameters this flow runs under.
    pub fn params(&self) -> &FlowParams {
        &self.params
    }

    /// Route the host navigates to when the flow succeeds.
    pub fn success_route(&self) -> &Route {
        self.plan.success_route()
    }

    /// The recorded terminal result, once the flow has ended.
    pub fn result(&self) -> Option<&FlowResult> {
        self.result.as_ref()
    }

    /// The accepted credential, available only in the `Succeeded` stage.
    ///
    /// Hosts that need the value (storing a newly created PIN, for
    /// example) read it here; it is gone once the engine is dropped.
    pub fn accepted_credential(&self) -> Option<Credential> {
        (self.stage == FlowStage::Succeeded).then(|| self.buffer.to_credential())
    }

    /// Record a rejected submission and either re-open the stage or lock
    /// the flow.
    fn reject(&mut self, origin: FlowStage) -> SubmitOutcome {
        self.buffer.clear();
        match self.attempts.as_mut() {
            Some(counter) => {
                let remaining = counter.record_rejection();
                self.pending_events.push(FlowEvent::CredentialRejected {
                    remaining: Some(remaining),
                });
                self.pending_events
                    .push(FlowEvent::AttemptsChanged { remaining });
                if counter.exhausted() {
                    let result = self.finish(
                        FlowStage::Locked,
                        FlowResult::Failure(FailureReason::Lockout),
                    );
                    SubmitOutcome::Complete(result)
                } else {
                    self.transition(origin);
                    SubmitOutcome::Rejected {
                        remaining: Some(remaining),
                    }
                }
            }
            None => {
                self.pending_events
                    .push(FlowEvent::CredentialRejected { remaining: None });
                self.transition(origin);
                SubmitOutcome::Rejected { remaining: None }
            }
        }
    }

    fn finish(&mut self, stage: FlowStage, result: FlowResult) -> FlowResult {
        self.transition(stage);
        self.result = Some(result.clone());
        self.pending_events.push(FlowEvent::Completed {
            result: result.clone(),
        });
        result
    }

    fn transition(&mut self, to: FlowStage) {
        if self.stage == to {
            return;
        }
        let from = self.stage;
        self.stage = to;
        self.pending_events.push(FlowEvent::StageChanged { from, to });
    }
}
