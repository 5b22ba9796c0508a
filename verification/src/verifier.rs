//! Pluggable credential verifier port.
//!
//! The engine does not specify HOW a credential is checked, only THAT a
//! full-length entry yields a verdict. Different screens plug in
//! different checks behind the same trait.

use async_trait::async_trait;
use thiserror::Error;

use natioid_types::Credential;

/// Binary outcome of a credential check.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verdict {
    /// The candidate matches the expected credential.
    Accepted,
    /// The candidate is wrong. Consumes an attempt where a counter applies.
    Rejected,
}

/// Transport or infrastructure failure while reaching the verifier.
///
/// Distinct from [`Verdict::Rejected`]: an unreachable verifier never
/// consumes an attempt, and the entered credential stays in the buffer
/// for a retry.
#[derive(Debug, Error)]
pub enum VerifierError {
    #[error("verifier unavailable: {0}")]
    Unavailable(String),

    #[error("verifier timed out after {after_ms}ms")]
    Timeout { after_ms: u64 },
}

/// A pluggable credential check.
///
/// Implementations might include:
/// - The fixed-code demo verifier
/// - A device-keystore PIN check
/// - A national identity provider's OTP endpoint
#[async_trait]
pub trait CredentialVerifier: Send + Sync {
    /// Check a full-length candidate credential.
    async fn verify(&self, candidate: &Credential) -> Result<Verdict, VerifierError>;
}
