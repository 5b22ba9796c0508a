//! NatioID demo — scripted terminal host for the credential flows.

mod config;
mod logging;
mod runner;

use clap::Parser;
use std::path::PathBuf;

use natioid_types::{Credential, FlowKind};

use crate::config::DemoConfig;
use crate::logging::LogFormat;

#[derive(Parser)]
#[command(name = "natioid-demo", about = "NatioID credential flow demo host")]
struct Cli {
    /// Flow to drive: "pin-login", "create-pin", "change-pin",
    /// "otp-verification", or "vote-confirmation".
    #[arg(long, default_value = "pin-login", env = "NATIOID_FLOW")]
    flow: String,

    /// Scripted entries, comma-separated codes fed in order
    /// (e.g. "111111,123456"). Defaults to the accepted code.
    #[arg(long, env = "NATIOID_ENTRIES", value_delimiter = ',')]
    entries: Vec<String>,

    /// Seconds into a one-time-code flow at which to request a resend;
    /// the final scripted entry is held back until then.
    #[arg(long, env = "NATIOID_RESEND_AT")]
    resend_at: Option<u32>,

    /// Script the login screen's biometric gate: "approve" signs straight
    /// in, "deny" falls back to the scripted PIN entries.
    #[arg(long, env = "NATIOID_BIOMETRIC")]
    biometric: Option<String>,

    /// Code the demo verifier accepts.
    #[arg(long, env = "NATIOID_ACCEPT_CODE")]
    accept_code: Option<String>,

    /// Simulated verifier latency in milliseconds.
    #[arg(long, env = "NATIOID_VERIFY_LATENCY_MS")]
    verify_latency_ms: Option<u64>,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, env = "NATIOID_LOG_LEVEL")]
    log_level: Option<String>,

    /// Path to a TOML configuration file. If provided, file settings
    /// are used as the base; CLI flags and env vars override them.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Subcommand.
    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Drive the selected flow to its terminal result.
    Run,
}

fn parse_flow_kind(s: &str) -> Option<FlowKind> {
    match s.to_lowercase().as_str() {
        "pin-login" | "login" => Some(FlowKind::PinLogin),
        "create-pin" => Some(FlowKind::CreatePin),
        "change-pin" => Some(FlowKind::ChangePin),
        "otp-verification" | "otp" => Some(FlowKind::OtpVerification),
        "vote-confirmation" | "vote" => Some(FlowKind::VoteConfirmation),
        _ => None,
    }
}

fn parse_biometric(s: &str) -> Option<bool> {
    match s.to_lowercase().as_str() {
        "approve" => Some(true),
        "deny" => Some(false),
        _ => None,
    }
}

fn parse_entries(raw: &[String]) -> anyhow::Result<Vec<Credential>> {
    raw.iter()
        .enumerate()
        .map(|(i, s)| {
            s.parse()
                .map_err(|e| anyhow::anyhow!("entry {} ({s:?}) is not a valid code: {e}", i + 1))
        })
        .collect()
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // File settings are the base; CLI flags and env vars override them.
    // Logging comes up only after the merge (the file carries the log
    // settings), so remember how the load went and say so once it is up.
    let mut load_ok = None;
    let mut load_warn = None;
    let file_config = match &cli.config {
        Some(path) => {
            let path = path.display().to_string();
            match DemoConfig::from_toml_file(&path) {
                Ok(cfg) => {
                    load_ok = Some(format!("loaded config from {path}"));
                    Some(cfg)
                }
                Err(e) => {
                    load_warn = Some(format!(
                        "failed to load config file {path}: {e}, using defaults"
                    ));
                    None
                }
            }
        }
        None => None,
    };

    let mut config = file_config.unwrap_or_default();
    if let Some(code) = cli.accept_code {
        config.accept_code = code;
    }
    if let Some(ms) = cli.verify_latency_ms {
        config.verify_latency_ms = ms;
    }
    if let Some(level) = cli.log_level {
        config.log_level = level;
    }

    logging::init_logging(LogFormat::parse(&config.log_format), &config.log_level);
    if let Some(note) = load_ok {
        tracing::info!("{note}");
    }
    if let Some(note) = load_warn {
        tracing::warn!("{note}");
    }

    let kind = parse_flow_kind(&cli.flow)
        .ok_or_else(|| anyhow::anyhow!("unknown flow kind: {:?}", cli.flow))?;

    let biometric = match &cli.biometric {
        Some(s) => Some(parse_biometric(s).ok_or_else(|| {
            anyhow::anyhow!("--biometric must be \"approve\" or \"deny\", got {s:?}")
        })?),
        None => None,
    };

    let entries = if cli.entries.is_empty() {
        tracing::info!("no entries scripted, entering the accepted code");
        let code = config
            .accept_code
            .parse()
            .map_err(|e| anyhow::anyhow!("accept_code is not a valid code: {e}"))?;
        vec![code]
    } else {
        parse_entries(&cli.entries)?
    };

    match cli.command {
        Command::Run => {
            if let Some(approve) = biometric {
                if kind != FlowKind::PinLogin {
                    tracing::warn!("--biometric applies only to pin-login, ignoring");
                } else if runner::try_biometric_login(&config, approve)
                    .await?
                    .is_some()
                {
                    return Ok(());
                }
            }

            let result = runner::run_flow(&config, kind, entries, cli.resend_at).await?;
            if !result.is_success() {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flow_kinds_parse_by_name_and_alias() {
        assert_eq!(parse_flow_kind("pin-login"), Some(FlowKind::PinLogin));
        assert_eq!(parse_flow_kind("LOGIN"), Some(FlowKind::PinLogin));
        assert_eq!(parse_flow_kind("create-pin"), Some(FlowKind::CreatePin));
        assert_eq!(parse_flow_kind("change-pin"), Some(FlowKind::ChangePin));
        assert_eq!(parse_flow_kind("otp"), Some(FlowKind::OtpVerification));
        assert_eq!(
            parse_flow_kind("vote-confirmation"),
            Some(FlowKind::VoteConfirmation)
        );
        assert_eq!(parse_flow_kind("enroll"), None);
    }

    #[test]
    fn biometric_answers_parse() {
        assert_eq!(parse_biometric("approve"), Some(true));
        assert_eq!(parse_biometric("DENY"), Some(false));
        assert_eq!(parse_biometric("maybe"), None);
    }

    #[test]
    fn entries_parse_in_order() {
        let raw = vec!["111111".to_string(), "123456".to_string()];
        let parsed = parse_entries(&raw).unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[1], "123456".parse().unwrap());
    }

    #[test]
    fn bad_entry_is_reported_with_its_position() {
        let raw = vec!["123456".to_string(), "12x456".to_string()];
        let err = parse_entries(&raw).unwrap_err();
        assert!(err.to_string().contains("entry 2"));
    }
}
