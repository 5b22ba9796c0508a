//! Client layer for the NatioID citizen app.
//!
//! Provides everything a screen needs on top of the raw flow engine:
//! - The flow catalog: one ready-made engine constructor per credential
//!   screen (PIN login, PIN creation, PIN change, registration codes,
//!   vote confirmation)
//! - The demo verifier that stands in for the credential backend
//! - The biometric gate offered next to PIN entry on the login screen

pub mod biometric;
pub mod flows;
pub mod verifier;

pub use biometric::{biometric_login, BiometricGate, DemoBiometricGate};
pub use flows::{
    change_pin_flow, create_pin_flow, login_flow, otp_flow, vote_confirmation_flow,
};
pub use verifier::FixedCodeVerifier;
