//! Scripted host loop: plays the part of the app's screens.
//!
//! Feeds scripted codes to a flow engine digit by digit, honours the
//! auto-submit delay it hands back, drives the one-second resend tick
//! while waiting out a scripted resend, and renders every drained
//! engine event through the log. The terminal bell stands in for the
//! phone's vibration cue on rejections.

use std::collections::VecDeque;
use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use natioid_client_core::{
    biometric_login, change_pin_flow, create_pin_flow, login_flow, otp_flow,
    vote_confirmation_flow, DemoBiometricGate, FixedCodeVerifier,
};
use natioid_types::{Credential, FlowKind, Route};
use natioid_verification::{FlowEvent, FlowResult, VerificationFlowEngine};

use crate::config::DemoConfig;

/// Assemble the engine for `kind` and drive it with the scripted entries.
pub async fn run_flow(
    config: &DemoConfig,
    kind: FlowKind,
    entries: Vec<Credential>,
    resend_at: Option<u32>,
) -> anyhow::Result<FlowResult> {
    let accept: Credential = config
        .accept_code
        .parse()
        .map_err(|e| anyhow::anyhow!("accept_code is not a valid code: {e}"))?;
    let verifier = Arc::new(FixedCodeVerifier::new(
        accept,
        Duration::from_millis(config.verify_latency_ms),
    ));
    let params = config.flow.clone();

    // Routes mirror the app's screens; the engine never interprets them.
    let mut engine = match kind {
        FlowKind::PinLogin => login_flow(verifier, params, Route::new("/dashboard"))?,
        FlowKind::CreatePin => create_pin_flow(verifier, params, Route::new("/login"))?,
        FlowKind::ChangePin => {
            change_pin_flow(verifier, params, Route::new("/settings/security"))?
        }
        FlowKind::OtpVerification => {
            otp_flow(verifier, params, Route::new("/register/complete"))?
        }
        FlowKind::VoteConfirmation => {
            vote_confirmation_flow(verifier, params, Route::new("/vote/receipt"))?
        }
    };

    tracing::info!(
        flow = kind.as_str(),
        stage = engine.stage().as_str(),
        entries = entries.len(),
        "flow started"
    );
    Ok(run_script(&mut engine, entries, resend_at).await)
}

/// Prompt the biometric gate the login screen offers next to PIN entry.
///
/// `approve` scripts the sensor's answer. Approval signs straight in and
/// returns the terminal result; refusal returns `None` and the caller
/// falls back to the scripted PIN entries.
pub async fn try_biometric_login(
    config: &DemoConfig,
    approve: bool,
) -> anyhow::Result<Option<FlowResult>> {
    let latency = Duration::from_millis(config.verify_latency_ms);
    let gate = if approve {
        DemoBiometricGate::approving(latency)
    } else {
        DemoBiometricGate::denying(latency)
    };

    tracing::info!("prompting the biometric gate");
    let outcome = biometric_login(&gate, Route::new("/dashboard")).await?;
    match &outcome {
        Some(FlowResult::Success(route)) => {
            tracing::info!(route = route.as_str(), "signed in via biometric gate");
        }
        _ => {
            tracing::info!("biometric refused, falling back to PIN entry");
        }
    }
    Ok(outcome)
}

/// Drive one engine to its terminal result.
///
/// One-time-code flows can script a single resend: the final entry is
/// held back until `resend_at` seconds have ticked by and a fresh code
/// has been requested. A script that runs out of entries before the
/// flow ends aborts it, the same as a user leaving the screen.
async fn run_script(
    engine: &mut VerificationFlowEngine,
    entries: Vec<Credential>,
    resend_at: Option<u32>,
) -> FlowResult {
    let mut entries: VecDeque<Credential> = entries.into();
    let mut scripted_resend = resend_at.filter(|_| engine.kind().is_otp_shaped());
    if resend_at.is_some() && scripted_resend.is_none() {
        tracing::warn!("--resend-at applies only to one-time-code flows, ignoring");
    }

    loop {
        if let Some(result) = engine.result() {
            return result.clone();
        }

        if entries.len() <= 1 {
            if let Some(at) = scripted_resend.take() {
                tick_until_resend(engine, at).await;
            }
        }

        let Some(code) = entries.pop_front() else {
            tracing::warn!("script exhausted before the flow ended, aborting");
            let result = engine.abort("script exhausted");
            render_events(engine);
            return result;
        };

        enter_code(engine, &code).await;
        render_events(engine);
    }
}

/// Type one code digit by digit, honouring the auto-submit delay.
async fn enter_code(engine: &mut VerificationFlowEngine, code: &Credential) {
    let expected = engine.params().credential_len;
    if code.len() != expected {
        tracing::warn!(
            have = code.len(),
            expected,
            "skipping scripted entry with the wrong length"
        );
        return;
    }

    let mut directive = None;
    for digit in code.digits() {
        if let Some(auto) = engine.append_digit(*digit) {
            directive = Some(auto);
        }
    }
    render_events(engine);

    let Some(auto) = directive else {
        // The entry never filled the buffer; nothing to submit.
        return;
    };

    // Let the "screen" render the final digit before validation runs.
    tokio::time::sleep(auto.delay).await;
    if !engine.buffer_is_full() {
        return;
    }
    if let Err(e) = engine.submit().await {
        tracing::error!("submit refused: {e}");
    }
}

/// Drive the one-second tick until `resend_at` seconds have elapsed,
/// then request a fresh code.
async fn tick_until_resend(engine: &mut VerificationFlowEngine, resend_at: u32) {
    tracing::info!(resend_at, "waiting out the resend window");

    let mut interval = tokio::time::interval(Duration::from_secs(1));
    // The first tick of a tokio interval completes immediately.
    interval.tick().await;
    for _ in 0..resend_at {
        interval.tick().await;
        engine.tick_resend_timer();
        render_events(engine);
    }

    if engine.resend() {
        tracing::info!("requested a fresh code");
    } else {
        tracing::warn!(
            seconds_remaining = ?engine.resend_seconds_remaining(),
            "resend refused, window still open"
        );
    }
    render_events(engine);
}

/// Render every drained engine event through the log.
fn render_events(engine: &mut VerificationFlowEngine) {
    for event in engine.drain_events() {
        render_event(event);
    }
}

fn render_event(event: FlowEvent) {
    match event {
        FlowEvent::StageChanged { from, to } => {
            tracing::info!(from = from.as_str(), to = to.as_str(), "stage changed");
        }
        FlowEvent::AutoSubmitArmed { delay_ms } => {
            tracing::debug!(delay_ms, "auto-submit armed");
        }
        FlowEvent::CredentialRejected { remaining } => {
            haptic_cue();
            match remaining {
                Some(remaining) => tracing::warn!(remaining, "credential rejected"),
                None => tracing::warn!("code rejected, re-enter or resend"),
            }
        }
        FlowEvent::AttemptsChanged { remaining } => {
            tracing::info!(remaining, "attempts remaining");
        }
        FlowEvent::ConfirmMismatch => {
            haptic_cue();
            tracing::warn!("entries do not match, start again with a new code");
        }
        FlowEvent::ResendTimerTick { seconds_remaining } => {
            tracing::debug!(seconds_remaining, "resend window");
        }
        FlowEvent::ResendAvailable => {
            tracing::info!("a fresh code may now be requested");
        }
        FlowEvent::CodeResent => {
            tracing::info!("code resent");
        }
        FlowEvent::VerifierUnavailable { detail } => {
            tracing::error!(%detail, "verifier unreachable, entry preserved");
        }
        FlowEvent::Completed { result } => match result {
            FlowResult::Success(route) => {
                tracing::info!(route = route.as_str(), "flow succeeded");
            }
            FlowResult::Failure(reason) => {
                tracing::warn!(?reason, "flow failed");
            }
        },
    }
}

/// Terminal stand-in for the app's brief vibration on a rejection.
fn haptic_cue() {
    print!("\x07");
    let _ = std::io::stdout().flush();
}
