//! Biometric gate offered next to PIN entry on the login screen.
//!
//! The client does not specify HOW a biometric check happens, only THAT
//! the device answered. No sensor integration exists here; the port is
//! the seam a platform build plugs its fingerprint or face API into.

use std::time::Duration;

use async_trait::async_trait;

use natioid_types::Route;
use natioid_verification::{FlowResult, Verdict, VerifierError};

/// A pluggable device biometric check.
///
/// Implementations might include:
/// - The demo gate below (scripted outcome)
/// - Android BiometricPrompt / iOS LocalAuthentication bridges
/// - A hardware-token presence check
#[async_trait]
pub trait BiometricGate: Send + Sync {
    /// Prompt the device sensor and report its verdict.
    async fn authenticate(&self) -> Result<Verdict, VerifierError>;
}

/// Demo gate with a scripted outcome and injected latency.
pub struct DemoBiometricGate {
    approve: bool,
    latency: Duration,
}

impl DemoBiometricGate {
    /// A gate that approves every prompt after `latency`.
    pub fn approving(latency: Duration) -> Self {
        Self {
            approve: true,
            latency,
        }
    }

    /// A gate that refuses every prompt after `latency`.
    pub fn denying(latency: Duration) -> Self {
        Self {
            approve: false,
            latency,
        }
    }
}

#[async_trait]
impl BiometricGate for DemoBiometricGate {
    async fn authenticate(&self) -> Result<Verdict, VerifierError> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        if self.approve {
            Ok(Verdict::Accepted)
        } else {
            Ok(Verdict::Rejected)
        }
    }
}

/// Try biometric login ahead of PIN entry.
///
/// Returns `Some(Success(dashboard))` on approval and `None` when the
/// sensor refuses, in which case the host falls back to the PIN flow.
/// Sensor or transport failure surfaces as `Err`; a refusal is not an
/// error.
pub async fn biometric_login(
    gate: &dyn BiometricGate,
    dashboard: Route,
) -> Result<Option<FlowResult>, VerifierError> {
    match gate.authenticate().await? {
        Verdict::Accepted => Ok(Some(FlowResult::Success(dashboard))),
        Verdict::Rejected => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Gate standing in for a broken sensor.
    struct BrokenGate;

    #[async_trait]
    impl BiometricGate for BrokenGate {
        async fn authenticate(&self) -> Result<Verdict, VerifierError> {
            Err(VerifierError::Unavailable("sensor offline".into()))
        }
    }

    #[tokio::test]
    async fn approval_logs_straight_in() {
        let gate = DemoBiometricGate::approving(Duration::ZERO);
        let result = biometric_login(&gate, Route::new("/dashboard"))
            .await
            .unwrap();
        match result {
            Some(FlowResult::Success(route)) => assert_eq!(route.as_str(), "/dashboard"),
            other => panic!("expected success, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn refusal_falls_back_to_pin_entry() {
        let gate = DemoBiometricGate::denying(Duration::ZERO);
        let result = biometric_login(&gate, Route::new("/dashboard"))
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn sensor_failure_is_an_error_not_a_refusal() {
        let result = biometric_login(&BrokenGate, Route::new("/dashboard")).await;
        assert!(matches!(result, Err(VerifierError::Unavailable(_))));
    }
}
