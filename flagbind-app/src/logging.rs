//! Tracing setup for binaries.

use std::str::FromStr;

use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Verbosity of the log output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    Debug,
    #[default]
    Normal,
    Quiet,
}

impl LogLevel {
    /// Filter directives for this level.
    pub fn filter(self) -> &'static str {
        match self {
            LogLevel::Debug => "flagbind_core=trace,flagbind_app=debug",
            LogLevel::Normal => "flagbind_core=warn,flagbind_app=info",
            LogLevel::Quiet => "flagbind_core=error,flagbind_app=error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown log level {0:?}, expected debug, normal or quiet")]
pub struct ParseLogLevelError(String);

impl FromStr for LogLevel {
    type Err = ParseLogLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "debug" => Ok(LogLevel::Debug),
            "normal" => Ok(LogLevel::Normal),
            "quiet" => Ok(LogLevel::Quiet),
            other => Err(ParseLogLevelError(other.to_string())),
        }
    }
}

/// Install a stderr subscriber. `RUST_LOG` overrides `level` when set.
///
/// Does nothing if a global subscriber is already installed.
pub fn init(level: LogLevel) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.filter()));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
