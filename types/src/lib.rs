//! Fundamental types for the NatioID client.
//!
//! This crate defines the core types shared across every other crate in the workspace:
//! digits, credentials, flow kinds, navigation routes, and flow parameters.

pub mod credential;
pub mod digit;
pub mod error;
pub mod kind;
pub mod params;
pub mod route;

pub use credential::Credential;
pub use digit::Digit;
pub use error::ParseError;
pub use kind::FlowKind;
pub use params::FlowParams;
pub use route::Route;
