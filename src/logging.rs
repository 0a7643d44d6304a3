//! Native log output for the CLI and embedding hosts.
//!
//! `RUST_LOG` selects levels (default `info`). `MINA_CONNECT_LOG_JSON=1`
//! switches to one JSON object per line. Output always goes to stderr so
//! command results on stdout stay machine-readable.

use crate::connector::parse_flag;
use crate::core::keys::env;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Json,
}

impl LogFormat {
    pub fn from_env() -> Self {
        let json = std::env::var(env::LOG_JSON)
            .ok()
            .as_deref()
            .and_then(parse_flag)
            .unwrap_or(false);
        if json { LogFormat::Json } else { LogFormat::Compact }
    }
}

/// Install the global subscriber. A second call is a no-op.
pub fn init_logging() {
    init_logging_with(LogFormat::from_env());
}

pub fn init_logging_with(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    let installed = match format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Compact => builder.compact().with_target(false).try_init(),
    };
    if installed.is_err() {
        tracing::debug!("log subscriber already installed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use once_cell::sync::Lazy;
    use std::sync::Mutex;

    static ENV_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

    #[test]
    fn format_follows_env_flag() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|p| p.into_inner());

        std::env::set_var(env::LOG_JSON, "1");
        assert_eq!(LogFormat::from_env(), LogFormat::Json);
        std::env::set_var(env::LOG_JSON, "off");
        assert_eq!(LogFormat::from_env(), LogFormat::Compact);
        std::env::remove_var(env::LOG_JSON);
        assert_eq!(LogFormat::from_env(), LogFormat::Compact);
    }

    #[test]
    fn repeated_init_is_harmless() {
        init_logging_with(LogFormat::Compact);
        init_logging_with(LogFormat::Json);
    }
}
