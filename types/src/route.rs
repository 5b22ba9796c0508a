//! Navigation route handed back to the host on flow success.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A navigation target supplied by the host when a flow is constructed.
///
/// The flow engine treats routes as opaque pass-through data and never
/// interprets them; only the hosting screen knows what they mean.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Route(String);

impl Route {
    /// Create a route from a raw path string.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Return the raw route string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for Route {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}
