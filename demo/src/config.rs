//! Demo host configuration with TOML file support.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use natioid_types::FlowParams;

/// Errors loading the demo configuration.
#[derive(Debug, Error)]
pub enum DemoError {
    #[error("config error: {0}")]
    Config(String),
}

/// Configuration for the demo host.
///
/// Can be loaded from a TOML file via [`DemoConfig::from_toml_file`] or
/// built programmatically (e.g. for tests). Every field has a default,
/// so partial files are fine; CLI flags and env vars override whatever
/// the file says.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DemoConfig {
    /// Code the demo verifier accepts. A demo stand-in, not a secret.
    #[serde(default = "default_accept_code")]
    pub accept_code: String,

    /// Simulated verifier round-trip latency in milliseconds.
    #[serde(default = "default_verify_latency_ms")]
    pub verify_latency_ms: u64,

    /// Flow parameters (credential length, attempts, resend window,
    /// auto-submit delay).
    #[serde(default)]
    pub flow: FlowParams,

    /// Log format: "human" or "json".
    #[serde(default = "default_log_format")]
    pub log_format: String,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_accept_code() -> String {
    // The literal every screen of the prototype accepts.
    "123456".to_string()
}

fn default_verify_latency_ms() -> u64 {
    // Matches the fake network delay the screens simulate.
    1500
}

fn default_log_format() -> String {
    "human".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

// ── Impl ───────────────────────────────────────────────────────────────

impl DemoConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: &str) -> Result<Self, DemoError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| DemoError::Config(e.to_string()))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, DemoError> {
        toml::from_str(s).map_err(|e| DemoError::Config(e.to_string()))
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> String {
        toml::to_string_pretty(self).expect("DemoConfig is always serializable to TOML")
    }
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            accept_code: default_accept_code(),
            verify_latency_ms: default_verify_latency_ms(),
            flow: FlowParams::natioid_defaults(),
            log_format: default_log_format(),
            log_level: default_log_level(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_config_round_trips_through_toml() {
        let config = DemoConfig::default();
        let toml_str = config.to_toml_string();
        let parsed = DemoConfig::from_toml_str(&toml_str).expect("should parse");
        assert_eq!(parsed.accept_code, config.accept_code);
        assert_eq!(parsed.verify_latency_ms, config.verify_latency_ms);
        assert_eq!(parsed.flow.credential_len, config.flow.credential_len);
    }

    #[test]
    fn minimal_toml_uses_defaults() {
        let config = DemoConfig::from_toml_str("").expect("empty toml should use defaults");
        assert_eq!(config.accept_code, "123456");
        assert_eq!(config.verify_latency_ms, 1500);
        assert_eq!(config.flow.max_attempts, 3);
        assert_eq!(config.log_format, "human");
    }

    #[test]
    fn partial_toml_overrides() {
        let toml = r#"
            verify_latency_ms = 0

            [flow]
            resend_window_secs = 5
        "#;
        let config = DemoConfig::from_toml_str(toml).expect("should parse");
        assert_eq!(config.verify_latency_ms, 0);
        assert_eq!(config.flow.resend_window_secs, 5);
        assert_eq!(config.flow.credential_len, 6); // default
        assert_eq!(config.accept_code, "123456"); // default
    }

    #[test]
    fn missing_file_returns_config_error() {
        let result = DemoConfig::from_toml_file("/nonexistent/natioid.toml");
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert!(matches!(err, DemoError::Config(_)));
    }

    #[test]
    fn config_file_on_disk_loads() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "accept_code = \"654321\"").unwrap();
        writeln!(file, "[flow]").unwrap();
        writeln!(file, "max_attempts = 5").unwrap();

        let config = DemoConfig::from_toml_file(file.path().to_str().unwrap()).unwrap();
        assert_eq!(config.accept_code, "654321");
        assert_eq!(config.flow.max_attempts, 5);
        assert_eq!(config.flow.resend_window_secs, 120); // default
    }
}
