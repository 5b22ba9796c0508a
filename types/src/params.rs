//! Flow parameters — credential length, attempt limits, and timing.

use serde::{Deserialize, Serialize};

/// Tunable parameters for a credential flow.
///
/// Hosts construct one per engine; nothing is read from ambient state.
/// Every field defaults to the NatioID value when omitted from a
/// configuration file.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FlowParams {
    /// Fixed credential length for PIN and one-time-code entry.
    #[serde(default = "default_credential_len")]
    pub credential_len: usize,

    /// Wrong-credential submissions permitted before lockout.
    /// Applies to PIN flows only; one-time-code flows have no lockout.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Seconds a user must wait before requesting another one-time code.
    #[serde(default = "default_resend_window_secs")]
    pub resend_window_secs: u32,

    /// Delay in milliseconds between the final digit landing and the
    /// automatic submission, so the UI can render the last digit first.
    #[serde(default = "default_autosubmit_delay_ms")]
    pub autosubmit_delay_ms: u64,
}

impl FlowParams {
    /// NatioID defaults: 6-digit credentials, 3 attempts, 120-second
    /// resend window, 200ms auto-submit delay.
    pub fn natioid_defaults() -> Self {
        Self {
            credential_len: default_credential_len(),
            max_attempts: default_max_attempts(),
            resend_window_secs: default_resend_window_secs(),
            autosubmit_delay_ms: default_autosubmit_delay_ms(),
        }
    }
}

/// Default is the NatioID configuration.
impl Default for FlowParams {
    fn default() -> Self {
        Self::natioid_defaults()
    }
}

fn default_credential_len() -> usize {
    6
}

fn default_max_attempts() -> u32 {
    3
}

fn default_resend_window_secs() -> u32 {
    120
}

fn default_autosubmit_delay_ms() -> u64 {
    200
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn natioid_defaults_match_the_app() {
        let params = FlowParams::natioid_defaults();
        assert_eq!(params.credential_len, 6);
        assert_eq!(params.max_attempts, 3);
        assert_eq!(params.resend_window_secs, 120);
        assert_eq!(params.autosubmit_delay_ms, 200);
    }
}
