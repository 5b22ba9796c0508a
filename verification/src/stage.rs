//! Flow stages: the named steps of a credential flow.

use serde::{Deserialize, Serialize};

/// The current step of a verification flow.
///
/// The four `Awaiting*` stages accept digit entry; `Submitting` freezes
/// the buffer while the verifier is in flight; the remaining three are
/// terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FlowStage {
    /// Entering the existing credential (login, change-PIN step one).
    AwaitingCurrentCredential,
    /// Entering a brand-new credential (create/change PIN).
    AwaitingNewCredential,
    /// Re-entering the new credential for confirmation.
    AwaitingConfirmCredential,
    /// Entering a one-time code.
    AwaitingOtp,
    /// A full-length entry is with the verifier; input is frozen.
    Submitting,
    /// Terminal: the flow completed successfully.
    Succeeded,
    /// Terminal: the host ended the flow.
    Failed,
    /// Terminal: wrong-credential attempts are exhausted.
    Locked,
}

impl FlowStage {
    /// Whether digits can currently be appended or removed.
    pub fn accepts_input(&self) -> bool {
        matches!(
            self,
            Self::AwaitingCurrentCredential
                | Self::AwaitingNewCredential
                | Self::AwaitingConfirmCredential
                | Self::AwaitingOtp
        )
    }

    /// Whether the flow has reached a terminal stage.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed | Self::Locked)
    }

    /// Human-readable name for logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AwaitingCurrentCredential => "awaiting-current-credential",
            Self::AwaitingNewCredential => "awaiting-new-credential",
            Self::AwaitingConfirmCredential => "awaiting-confirm-credential",
            Self::AwaitingOtp => "awaiting-otp",
            Self::Submitting => "submitting",
            Self::Succeeded => "succeeded",
            Self::Failed => "failed",
            Self::Locked => "locked",
        }
    }
}
