//! Command line and environment configuration

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::constants::{DEFAULT_API_VERSION, DEFAULT_LOG_FILE, DEFAULT_TIMEOUT_SECS};
use crate::storage::SettingsStore;

/// Log verbosity level
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub const fn to_tracing_level(self) -> tracing::Level {
        match self {
            Self::Trace => tracing::Level::TRACE,
            Self::Debug => tracing::Level::DEBUG,
            Self::Info => tracing::Level::INFO,
            Self::Warn => tracing::Level::WARN,
            Self::Error => tracing::Level::ERROR,
        }
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "accounts-tui",
    version,
    about = "Browse, create, edit and delete Dataverse accounts from the terminal",
    long_about = None
)]
pub struct CliArgs {
    /// Environment URL, e.g. https://contoso.crm.dynamics.com
    #[arg(long, env = "DATAVERSE_URL", value_name = "URL")]
    pub base_url: String,

    /// OAuth bearer token for the Web API.
    #[arg(long, env = "DATAVERSE_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Web API version.
    #[arg(long, default_value = DEFAULT_API_VERSION)]
    pub api_version: String,

    /// Per-request timeout in seconds.
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_secs: u64,

    /// Directory holding persisted settings.
    #[arg(long, value_name = "PATH")]
    pub settings_dir: Option<PathBuf>,

    /// Log file path.
    #[arg(long, value_name = "PATH", default_value = DEFAULT_LOG_FILE)]
    pub log_file: PathBuf,

    /// Log verbosity level.
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,
}

/// Resolved runtime configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub base_url: String,
    pub token: Option<String>,
    pub api_version: String,
    pub timeout: Duration,
    pub settings_dir: PathBuf,
    pub log_file: PathBuf,
    pub log_level: LogLevel,
}

impl From<CliArgs> for AppConfig {
    fn from(args: CliArgs) -> Self {
        AppConfig {
            base_url: args.base_url.trim_end_matches('/').to_string(),
            token: args.token.filter(|t| !t.trim().is_empty()),
            api_version: args.api_version.trim_start_matches('v').to_string(),
            timeout: Duration::from_secs(args.timeout_secs),
            settings_dir: args.settings_dir.unwrap_or_else(SettingsStore::default_dir),
            log_file: args.log_file,
            log_level: args.log_level,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_applied() {
        let argv = ["accounts-tui", "--base-url", "https://org.crm.dynamics.com/"];
        let args = CliArgs::try_parse_from(argv).unwrap();
        let config = AppConfig::from(args);
        assert_eq!(config.base_url, "https://org.crm.dynamics.com");
        assert_eq!(config.api_version, "9.2");
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.log_level, LogLevel::Info);
        assert_eq!(config.log_file, PathBuf::from("accounts-tui.log"));
    }

    #[test]
    fn test_blank_token_treated_as_missing() {
        let args = CliArgs::try_parse_from([
            "accounts-tui",
            "--base-url",
            "https://org.crm.dynamics.com",
            "--token",
            " ",
            "--api-version",
            "v9.1",
        ])
        .unwrap();
        let config = AppConfig::from(args);
        assert!(config.token.is_none());
        assert_eq!(config.api_version, "9.1");
    }
}
