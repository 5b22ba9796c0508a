//! The flow catalog: one engine constructor per credential screen.
//!
//! Every screen of the app drives the same machine with a different
//! transition table. The catalog pins those tables down in one place so
//! screens cannot assemble an inconsistent plan: the host supplies only
//! the verifier port, the parameters, and where success navigates.

use std::sync::Arc;

use natioid_types::{FlowKind, FlowParams, Route};
use natioid_verification::{
    CredentialVerifier, FlowError, FlowPlan, FlowStage, RetryPolicy, StageAction, StageExit,
    VerificationFlowEngine,
};

/// Login with the existing device PIN.
///
/// One stage: the current PIN is verified and an accepted entry finishes
/// the flow at `dashboard`. Wrong entries count against the attempt
/// limit; exhausting it locks the flow.
pub fn login_flow(
    verifier: Arc<dyn CredentialVerifier>,
    params: FlowParams,
    dashboard: Route,
) -> Result<VerificationFlowEngine, FlowError> {
    let plan = FlowPlan::new(
        FlowKind::PinLogin,
        FlowStage::AwaitingCurrentCredential,
        vec![(
            FlowStage::AwaitingCurrentCredential,
            StageAction::VerifyCredential {
                on_accept: StageExit::Finish,
            },
        )],
        RetryPolicy::Attempts(params.max_attempts),
        dashboard,
    );
    VerificationFlowEngine::new(plan, params, verifier)
}

/// First-time PIN creation during enrollment.
///
/// Two stages: the new PIN is captured without any backend validation,
/// then confirmed by literal comparison. A mismatch restarts entry from
/// the new-PIN stage and never consumes an attempt; the counter exists
/// but no stage of this flow can decrement it.
pub fn create_pin_flow(
    verifier: Arc<dyn CredentialVerifier>,
    params: FlowParams,
    done: Route,
) -> Result<VerificationFlowEngine, FlowError> {
    let plan = FlowPlan::new(
        FlowKind::CreatePin,
        FlowStage::AwaitingNewCredential,
        vec![
            (
                FlowStage::AwaitingNewCredential,
                StageAction::CaptureNewCredential {
                    confirm_stage: FlowStage::AwaitingConfirmCredential,
                },
            ),
            (
                FlowStage::AwaitingConfirmCredential,
                StageAction::ConfirmNewCredential {
                    restart_stage: FlowStage::AwaitingNewCredential,
                },
            ),
        ],
        RetryPolicy::Attempts(params.max_attempts),
        done,
    );
    VerificationFlowEngine::new(plan, params, verifier)
}

/// Replace the current PIN with a new one.
///
/// Three stages: the current PIN is verified (the only stage that can
/// consume attempts), then the new PIN is captured and confirmed exactly
/// as in [`create_pin_flow`].
pub fn change_pin_flow(
    verifier: Arc<dyn CredentialVerifier>,
    params: FlowParams,
    done: Route,
) -> Result<VerificationFlowEngine, FlowError> {
    let plan = FlowPlan::new(
        FlowKind::ChangePin,
        FlowStage::AwaitingCurrentCredential,
        vec![
            (
                FlowStage::AwaitingCurrentCredential,
                StageAction::VerifyCredential {
                    on_accept: StageExit::AdvanceTo(FlowStage::AwaitingNewCredential),
                },
            ),
            (
                FlowStage::AwaitingNewCredential,
                StageAction::CaptureNewCredential {
                    confirm_stage: FlowStage::AwaitingConfirmCredential,
                },
            ),
            (
                FlowStage::AwaitingConfirmCredential,
                StageAction::ConfirmNewCredential {
                    restart_stage: FlowStage::AwaitingNewCredential,
                },
            ),
        ],
        RetryPolicy::Attempts(params.max_attempts),
        done,
    );
    VerificationFlowEngine::new(plan, params, verifier)
}

/// One-time-code entry during registration.
///
/// One stage with no lockout: wrong codes can be re-entered indefinitely
/// and a fresh code may be requested once the resend window elapses.
pub fn otp_flow(
    verifier: Arc<dyn CredentialVerifier>,
    params: FlowParams,
    verified: Route,
) -> Result<VerificationFlowEngine, FlowError> {
    let plan = FlowPlan::new(
        FlowKind::OtpVerification,
        FlowStage::AwaitingOtp,
        vec![(
            FlowStage::AwaitingOtp,
            StageAction::VerifyCredential {
                on_accept: StageExit::Finish,
            },
        )],
        RetryPolicy::ResendWindow(params.resend_window_secs),
        verified,
    );
    VerificationFlowEngine::new(plan, params, verifier)
}

/// One-time-code confirmation before casting a ballot.
///
/// Shaped like [`otp_flow`] (timer-gated resend, no lockout); success
/// hands back the ballot-receipt route.
pub fn vote_confirmation_flow(
    verifier: Arc<dyn CredentialVerifier>,
    params: FlowParams,
    receipt: Route,
) -> Result<VerificationFlowEngine, FlowError> {
    let plan = FlowPlan::new(
        FlowKind::VoteConfirmation,
        FlowStage::AwaitingOtp,
        vec![(
            FlowStage::AwaitingOtp,
            StageAction::VerifyCredential {
                on_accept: StageExit::Finish,
            },
        )],
        RetryPolicy::ResendWindow(params.resend_window_secs),
        receipt,
    );
    VerificationFlowEngine::new(plan, params, verifier)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::verifier::FixedCodeVerifier;
    use natioid_types::Credential;
    use natioid_verification::{FailureReason, FlowResult, SubmitOutcome};

    fn verifier(code: &str) -> Arc<FixedCodeVerifier> {
        Arc::new(FixedCodeVerifier::instant(code.parse().unwrap()))
    }

    fn params() -> FlowParams {
        FlowParams::natioid_defaults()
    }

    /// Type a code digit by digit.
    fn enter(engine: &mut VerificationFlowEngine, code: &str) {
        let credential: Credential = code.parse().unwrap();
        for digit in credential.digits() {
            engine.append_digit(*digit);
        }
    }

    // ── Catalog shapes ──────────────────────────────────────────────────

    #[test]
    fn login_flow_counts_attempts() {
        let engine = login_flow(verifier("123456"), params(), Route::new("/dashboard")).unwrap();
        assert_eq!(engine.kind(), FlowKind::PinLogin);
        assert_eq!(engine.stage(), FlowStage::AwaitingCurrentCredential);
        assert_eq!(engine.attempts_remaining(), Some(3));
        assert_eq!(engine.resend_seconds_remaining(), None);
    }

    #[test]
    fn otp_shaped_flows_carry_a_resend_window() {
        let otp = otp_flow(verifier("123456"), params(), Route::new("/register/complete"))
            .unwrap();
        assert_eq!(otp.kind(), FlowKind::OtpVerification);
        assert_eq!(otp.stage(), FlowStage::AwaitingOtp);
        assert_eq!(otp.attempts_remaining(), None);
        assert_eq!(otp.resend_seconds_remaining(), Some(120));

        let vote =
            vote_confirmation_flow(verifier("123456"), params(), Route::new("/vote/receipt"))
                .unwrap();
        assert_eq!(vote.kind(), FlowKind::VoteConfirmation);
        assert_eq!(vote.stage(), FlowStage::AwaitingOtp);
        assert_eq!(vote.attempts_remaining(), None);
        assert_eq!(vote.resend_seconds_remaining(), Some(120));
    }

    // ── End-to-end walks ────────────────────────────────────────────────

    #[tokio::test]
    async fn login_succeeds_with_the_demo_code() {
        let mut engine =
            login_flow(verifier("123456"), params(), Route::new("/dashboard")).unwrap();

        enter(&mut engine, "123456");
        let outcome = engine.submit().await.unwrap();
        match outcome {
            SubmitOutcome::Complete(FlowResult::Success(route)) => {
                assert_eq!(route.as_str(), "/dashboard");
            }
            other => panic!("expected success, got {other:?}"),
        }
        assert_eq!(engine.attempts_remaining(), Some(3));
    }

    #[tokio::test]
    async fn login_locks_after_max_attempts() {
        let mut engine =
            login_flow(verifier("123456"), params(), Route::new("/dashboard")).unwrap();

        for _ in 0..3 {
            enter(&mut engine, "000000");
            engine.submit().await.unwrap();
        }
        assert_eq!(engine.stage(), FlowStage::Locked);
        assert!(matches!(
            engine.result(),
            Some(FlowResult::Failure(FailureReason::Lockout))
        ));
    }

    #[tokio::test]
    async fn create_pin_never_calls_the_verifier() {
        // A verifier that would reject everything the user types; the
        // create flow must succeed without consulting it.
        let mut engine =
            create_pin_flow(verifier("999999"), params(), Route::new("/login")).unwrap();

        enter(&mut engine, "123456");
        engine.submit().await.unwrap();
        assert_eq!(engine.stage(), FlowStage::AwaitingConfirmCredential);

        enter(&mut engine, "123456");
        let outcome = engine.submit().await.unwrap();
        match outcome {
            SubmitOutcome::Complete(FlowResult::Success(route)) => {
                assert_eq!(route.as_str(), "/login");
            }
            other => panic!("expected success, got {other:?}"),
        }
        assert_eq!(engine.accepted_credential(), Some("123456".parse().unwrap()));
    }

    #[tokio::test]
    async fn create_pin_mismatch_restarts_without_consuming_attempts() {
        let mut engine =
            create_pin_flow(verifier("999999"), params(), Route::new("/login")).unwrap();

        enter(&mut engine, "123456");
        engine.submit().await.unwrap();
        enter(&mut engine, "654321");
        let outcome = engine.submit().await.unwrap();

        assert!(matches!(
            outcome,
            SubmitOutcome::Mismatch {
                restart: FlowStage::AwaitingNewCredential
            }
        ));
        assert_eq!(engine.attempts_remaining(), Some(3));
    }

    #[tokio::test]
    async fn change_pin_verifies_only_the_current_pin() {
        let mut engine =
            change_pin_flow(verifier("111111"), params(), Route::new("/settings/security"))
                .unwrap();

        // Wrong current PIN consumes an attempt.
        enter(&mut engine, "222222");
        let outcome = engine.submit().await.unwrap();
        assert!(matches!(
            outcome,
            SubmitOutcome::Rejected {
                remaining: Some(2)
            }
        ));

        // Right current PIN advances into new-PIN capture.
        enter(&mut engine, "111111");
        let outcome = engine.submit().await.unwrap();
        assert!(matches!(
            outcome,
            SubmitOutcome::Advanced {
                next: FlowStage::AwaitingNewCredential
            }
        ));

        enter(&mut engine, "787878");
        engine.submit().await.unwrap();
        enter(&mut engine, "787878");
        let outcome = engine.submit().await.unwrap();
        match outcome {
            SubmitOutcome::Complete(FlowResult::Success(route)) => {
                assert_eq!(route.as_str(), "/settings/security");
            }
            other => panic!("expected success, got {other:?}"),
        }
        assert_eq!(engine.attempts_remaining(), Some(2));
    }

    #[tokio::test]
    async fn vote_confirmation_hands_back_the_receipt_route() {
        let mut engine =
            vote_confirmation_flow(verifier("123456"), params(), Route::new("/vote/receipt"))
                .unwrap();

        // Wrong codes never lock a vote confirmation.
        enter(&mut engine, "000000");
        let outcome = engine.submit().await.unwrap();
        assert!(matches!(outcome, SubmitOutcome::Rejected { remaining: None }));

        enter(&mut engine, "123456");
        let outcome = engine.submit().await.unwrap();
        match outcome {
            SubmitOutcome::Complete(FlowResult::Success(route)) => {
                assert_eq!(route.as_str(), "/vote/receipt");
            }
            other => panic!("expected success, got {other:?}"),
        }
    }
}
