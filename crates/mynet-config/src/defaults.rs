use camino::Utf8PathBuf;

use crate::socket::SocketEndpoint;

/// Port the acceptor binds to when no endpoint is configured.
pub const DEFAULT_TCP_PORT: u16 = 9777;

/// Directory, relative to the working directory, holding user records.
pub const DEFAULT_USERS_ROOT: &str = "database/users";

/// Five minutes of silence before a connection is dropped.
pub const DEFAULT_IDLE_TIMEOUT_SECS: u64 = 5 * 60;

/// Default log filter expression used by the server.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Default log filter expression used by the server.
#[must_use]
pub fn default_log_filter() -> &'static str {
    DEFAULT_LOG_FILTER
}

/// Owned log filter value used where allocation is required (e.g. serde).
#[must_use]
pub fn default_log_filter_string() -> String {
    DEFAULT_LOG_FILTER.to_owned()
}

/// Default logging format for the server.
#[must_use]
pub fn default_log_format() -> crate::logging::LogFormat {
    crate::logging::LogFormat::Json
}

/// Listens on every IPv4 interface, matching the historical deployment.
#[must_use]
pub fn default_listen_endpoint() -> SocketEndpoint {
    SocketEndpoint::tcp("0.0.0.0", DEFAULT_TCP_PORT)
}

/// Registry root used when none is configured.
#[must_use]
pub fn default_users_root() -> Utf8PathBuf {
    Utf8PathBuf::from(DEFAULT_USERS_ROOT)
}

/// Idle timeout in seconds used when none is configured.
#[must_use]
pub const fn default_idle_timeout_secs() -> u64 {
    DEFAULT_IDLE_TIMEOUT_SECS
}
