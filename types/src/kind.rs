//! Flow kind identifier.

use serde::{Deserialize, Serialize};

/// Identifies which credential screen a flow engine is driving.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FlowKind {
    /// Login with the existing device PIN.
    PinLogin,
    /// First-time PIN creation during enrollment.
    CreatePin,
    /// Replacing the current PIN with a new one.
    ChangePin,
    /// One-time-code entry during registration.
    OtpVerification,
    /// One-time-code confirmation before casting a ballot.
    VoteConfirmation,
}

impl FlowKind {
    /// Human-readable name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PinLogin => "pin-login",
            Self::CreatePin => "create-pin",
            Self::ChangePin => "change-pin",
            Self::OtpVerification => "otp-verification",
            Self::VoteConfirmation => "vote-confirmation",
        }
    }

    /// Whether retries are gated by a resend window rather than an
    /// attempt counter.
    pub fn is_otp_shaped(&self) -> bool {
        matches!(self, Self::OtpVerification | Self::VoteConfirmation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn otp_shapes() {
        assert!(FlowKind::OtpVerification.is_otp_shaped());
        assert!(FlowKind::VoteConfirmation.is_otp_shaped());
        assert!(!FlowKind::PinLogin.is_otp_shaped());
        assert!(!FlowKind::CreatePin.is_otp_shaped());
        assert!(!FlowKind::ChangePin.is_otp_shaped());
    }
}
