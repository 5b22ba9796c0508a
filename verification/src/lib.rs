//! Credential verification flow engine for the NatioID client.
//!
//! One state machine drives every credential-entry screen in the app:
//! PIN login, PIN creation, PIN change, registration one-time codes, and
//! the vote-confirmation code. Each screen supplies a transition plan
//! and an asynchronous [`CredentialVerifier`]; the engine owns the entry
//! buffer, the attempt counter or resend window, auto-submit arming, and
//! the terminal outcome, and reports progress through drainable
//! [`FlowEvent`]s.
//!
//! The engine schedules nothing itself. Auto-submit delays are handed
//! back to the host as directives, and the resend window advances only
//! through a host-driven once-per-second tick.

pub mod attempts;
pub mod buffer;
pub mod engine;
pub mod error;
pub mod outcomes;
pub mod plan;
pub mod resend;
pub mod stage;
pub mod verifier;

pub use attempts::AttemptCounter;
pub use buffer::CredentialBuffer;
pub use engine::{FlowEvent, VerificationFlowEngine};
pub use error::FlowError;
pub use outcomes::{AutoSubmit, FailureReason, FlowResult, SubmitOutcome};
pub use plan::{FlowPlan, RetryPolicy, StageAction, StageExit};
pub use resend::ResendTimer;
pub use stage::FlowStage;
pub use verifier::{CredentialVerifier, Verdict, VerifierError};
