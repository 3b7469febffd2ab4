//! Connection streams and the handler seam between acceptor and sessions.

use std::fmt;
use std::io::{self, Read, Write};
use std::net::{Shutdown, SocketAddr, TcpStream};
use std::time::Duration;

#[cfg(unix)]
use std::os::unix::net::UnixStream;

/// Stream types accepted by the listener.
#[derive(Debug)]
pub(crate) enum ConnectionStream {
    Tcp(TcpStream),
    #[cfg(unix)]
    Unix(UnixStream),
}

impl ConnectionStream {
    /// Remote address captured at accept time.
    pub(crate) fn peer(&self) -> PeerAddress {
        match self {
            Self::Tcp(stream) => PeerAddress(stream.peer_addr().ok()),
            #[cfg(unix)]
            Self::Unix(_) => PeerAddress(None),
        }
    }

    /// Bounds every subsequent blocking read.
    pub(crate) fn set_read_timeout(&self, timeout: Option<Duration>) -> io::Result<()> {
        match self {
            Self::Tcp(stream) => stream.set_read_timeout(timeout),
            #[cfg(unix)]
            Self::Unix(stream) => stream.set_read_timeout(timeout),
        }
    }

    /// Closes both directions; errors from an already dead peer are ignored.
    pub(crate) fn close(&self) {
        let _closed = match self {
            Self::Tcp(stream) => stream.shutdown(Shutdown::Both),
            #[cfg(unix)]
            Self::Unix(stream) => stream.shutdown(Shutdown::Both),
        };
    }
}

impl Read for ConnectionStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            Self::Tcp(stream) => stream.read(buf),
            #[cfg(unix)]
            Self::Unix(stream) => stream.read(buf),
        }
    }
}

impl Write for ConnectionStream {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Self::Tcp(stream) => stream.write(buf),
            #[cfg(unix)]
            Self::Unix(stream) => stream.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Self::Tcp(stream) => stream.flush(),
            #[cfg(unix)]
            Self::Unix(stream) => stream.flush(),
        }
    }
}

/// Remote end of a connection.
///
/// Unix socket peers have no address; they render as an empty string in the
/// operator log.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PeerAddress(Option<SocketAddr>);

impl PeerAddress {
    /// Wraps a known remote socket address.
    #[must_use]
    pub fn new(addr: SocketAddr) -> Self {
        Self(Some(addr))
    }

    /// Peer without a network address.
    #[must_use]
    pub fn unknown() -> Self {
        Self(None)
    }

    /// Remote address, when known.
    #[must_use]
    pub fn socket_addr(&self) -> Option<SocketAddr> {
        self.0
    }
}

impl fmt::Display for PeerAddress {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(addr) => write!(formatter, "{}:{}", addr.ip(), addr.port()),
            None => Ok(()),
        }
    }
}

/// Handles accepted socket connections.
pub(crate) trait ConnectionHandler: Send + Sync + 'static {
    /// Serves one connection until it closes. Runs on a dedicated worker
    /// thread; panics are caught by the acceptor.
    fn handle(&self, stream: ConnectionStream);
}
