//! Error types for socket listener operations.

use std::io;

use thiserror::Error;

/// Errors surfaced while binding or running the acceptor.
#[derive(Debug, Error)]
pub enum ListenerError {
    /// The configured host name did not resolve.
    #[error("failed to resolve {endpoint}: {source}")]
    Resolve {
        endpoint: String,
        #[source]
        source: io::Error,
    },
    /// Resolution succeeded but produced no usable address.
    #[error("no addresses resolved for {endpoint}")]
    ResolveEmpty { endpoint: String },
    /// Binding the listening socket failed.
    #[error("failed to bind {endpoint}: {source}")]
    Bind {
        endpoint: String,
        #[source]
        source: io::Error,
    },
    /// Switching the listener to non-blocking accepts failed.
    #[error("failed to enable non-blocking listener: {source}")]
    NonBlocking {
        #[source]
        source: io::Error,
    },
    /// Unix endpoints were requested on a platform without them.
    #[error("unix sockets are unsupported for endpoint {endpoint}")]
    UnsupportedUnix { endpoint: String },
    /// Another live process is listening on the Unix socket.
    #[error("unix socket {path} is already in use")]
    UnixInUse { path: String },
    /// The Unix socket path exists but cannot be reclaimed.
    #[error("cannot reclaim unix socket path {path}: {source}")]
    UnixStale {
        path: String,
        #[source]
        source: io::Error,
    },
    /// The accept loop thread panicked.
    #[error("listener thread panicked")]
    ThreadPanic,
}
