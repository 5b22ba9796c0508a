//! Demo credential verifier: a fixed code behind injected latency.

use std::time::Duration;

use async_trait::async_trait;

use natioid_types::Credential;
use natioid_verification::{CredentialVerifier, Verdict, VerifierError};

/// Accepts exactly one configured code after a simulated network delay.
///
/// This is the stand-in every concrete screen ships with while no
/// credential backend exists. A production build replaces it with an
/// API client behind the same [`CredentialVerifier`] port; nothing on
/// the engine side changes.
pub struct FixedCodeVerifier {
    code: Credential,
    latency: Duration,
}

impl FixedCodeVerifier {
    /// Accept `code`, answering after `latency`.
    pub fn new(code: Credential, latency: Duration) -> Self {
        Self { code, latency }
    }

    /// Accept `code` with no delay. For tests.
    pub fn instant(code: Credential) -> Self {
        Self::new(code, Duration::ZERO)
    }

    /// The simulated round-trip latency.
    pub fn latency(&self) -> Duration {
        self.latency
    }
}

#[async_trait]
impl CredentialVerifier for FixedCodeVerifier {
    async fn verify(&self, candidate: &Credential) -> Result<Verdict, VerifierError> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        if *candidate == self.code {
            Ok(Verdict::Accepted)
        } else {
            Ok(Verdict::Rejected)
        }
    }
}
