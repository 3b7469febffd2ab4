//! Shared configuration for the MyNet line shell server.
//!
//! Values are layered by `ortho_config`: built-in defaults, then an optional
//! configuration file (`--config-path` or `MYNET_CONFIG_PATH`), then
//! `MYNET_*` environment variables, and finally command-line flags.

mod defaults;
mod logging;
mod socket;

use std::time::Duration;

use camino::{Utf8Path, Utf8PathBuf};
use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};

pub use defaults::{
    DEFAULT_IDLE_TIMEOUT_SECS, DEFAULT_LOG_FILTER, DEFAULT_TCP_PORT, DEFAULT_USERS_ROOT,
    default_idle_timeout_secs, default_listen_endpoint, default_log_filter,
    default_log_filter_string, default_log_format, default_users_root,
};
pub use logging::{LogFormat, LogFormatParseError};
pub use socket::{SocketEndpoint, SocketParseError, SocketPreparationError};

/// Resolved server configuration.
#[derive(Debug, Clone, Deserialize, Serialize, OrthoConfig, PartialEq, Eq)]
#[ortho_config(prefix = "MYNET")]
pub struct Config {
    /// Endpoint the acceptor binds to.
    #[serde(default = "default_listen_endpoint")]
    pub listen: SocketEndpoint,
    /// Root directory of the sharded user registry.
    #[serde(default = "default_users_root")]
    pub users_root: Utf8PathBuf,
    /// Seconds a connection may stay silent before it is torn down.
    #[serde(default = "default_idle_timeout_secs")]
    pub idle_timeout_secs: u64,
    /// `tracing` filter expression for the operator log.
    #[serde(default = "default_log_filter_string")]
    pub log_filter: String,
    /// Output format of the operator log.
    #[serde(default = "default_log_format")]
    pub log_format: LogFormat,
    /// Include parsed command arguments in dispatch log events.
    #[serde(default)]
    pub log_arguments: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen: default_listen_endpoint(),
            users_root: default_users_root(),
            idle_timeout_secs: DEFAULT_IDLE_TIMEOUT_SECS,
            log_filter: default_log_filter_string(),
            log_format: default_log_format(),
            log_arguments: false,
        }
    }
}

impl Config {
    /// Endpoint the server listens on.
    #[must_use]
    pub fn listen(&self) -> &SocketEndpoint {
        &self.listen
    }

    /// Root directory holding user records.
    #[must_use]
    pub fn users_root(&self) -> &Utf8Path {
        self.users_root.as_path()
    }

    /// Inactivity bound applied to every connection read.
    ///
    /// A zero value would disable the timeout on most platforms, so it is
    /// clamped to one second.
    #[must_use]
    pub fn idle_timeout(&self) -> Duration {
        Duration::from_secs(self.idle_timeout_secs.max(1))
    }

    /// Filter expression for the log subscriber.
    #[must_use]
    pub fn log_filter(&self) -> &str {
        &self.log_filter
    }

    /// Output format for the log subscriber.
    #[must_use]
    pub fn log_format(&self) -> LogFormat {
        self.log_format
    }

    /// Whether dispatch events carry the argument list.
    #[must_use]
    pub fn log_arguments(&self) -> bool {
        self.log_arguments
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_published_constants() {
        let config = Config::default();
        assert_eq!(
            config.listen(),
            &SocketEndpoint::tcp("0.0.0.0", DEFAULT_TCP_PORT)
        );
        assert_eq!(config.users_root(), Utf8Path::new(DEFAULT_USERS_ROOT));
        assert_eq!(config.idle_timeout(), Duration::from_secs(300));
        assert_eq!(config.log_filter(), DEFAULT_LOG_FILTER);
        assert!(!config.log_arguments());
    }

    #[test]
    fn zero_idle_timeout_is_clamped() {
        let config = Config {
            idle_timeout_secs: 0,
            ..Config::default()
        };
        assert_eq!(config.idle_timeout(), Duration::from_secs(1));
    }
}
