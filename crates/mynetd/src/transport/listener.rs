//! Acceptor that hands every connection to its own worker thread.

use std::io;
use std::net::{SocketAddr, TcpListener, ToSocketAddrs};
use std::panic::{self, AssertUnwindSafe};
use std::sync::{
    Arc,
    atomic::{AtomicBool, AtomicU64, Ordering},
};
use std::thread;
use std::time::Duration;

use tracing::{debug, error, info, warn};

use mynet_config::SocketEndpoint;

use super::{ConnectionHandler, ConnectionStream, LISTENER_TARGET, ListenerError};

#[cfg(unix)]
use std::fs;
#[cfg(unix)]
use std::os::unix::fs::FileTypeExt;
#[cfg(unix)]
use std::os::unix::net::{UnixListener, UnixStream};
#[cfg(unix)]
use std::path::Path;

const ACCEPT_BACKOFF: Duration = Duration::from_millis(25);
const ERROR_BACKOFF: Duration = Duration::from_millis(150);

/// Listener bound to a socket endpoint but not yet accepting.
#[derive(Debug)]
pub(crate) struct SocketListener {
    endpoint: SocketEndpoint,
    listener: ListenerKind,
}

#[derive(Debug)]
enum ListenerKind {
    Tcp(TcpListener),
    #[cfg(unix)]
    Unix(UnixListener),
}

impl SocketListener {
    pub(crate) fn bind(endpoint: &SocketEndpoint) -> Result<Self, ListenerError> {
        let listener = match endpoint {
            SocketEndpoint::Tcp { host, port } => ListenerKind::Tcp(bind_tcp(host, *port)?),
            #[cfg(unix)]
            SocketEndpoint::Unix { path } => ListenerKind::Unix(bind_unix(path.as_std_path())?),
            #[cfg(not(unix))]
            SocketEndpoint::Unix { .. } => {
                return Err(ListenerError::UnsupportedUnix {
                    endpoint: endpoint.to_string(),
                });
            }
        };
        Ok(Self {
            endpoint: endpoint.clone(),
            listener,
        })
    }

    /// Address actually bound, useful when the configured port was zero.
    pub(crate) fn local_addr(&self) -> Option<SocketAddr> {
        match &self.listener {
            ListenerKind::Tcp(listener) => listener.local_addr().ok(),
            #[cfg(unix)]
            ListenerKind::Unix(_) => None,
        }
    }

    /// Starts the accept loop on a background thread.
    pub(crate) fn start(
        self,
        handler: Arc<dyn ConnectionHandler>,
    ) -> Result<ListenerHandle, ListenerError> {
        let shutdown = Arc::new(AtomicBool::new(false));
        if let Err(error) = match &self.listener {
            ListenerKind::Tcp(listener) => listener.set_nonblocking(true),
            #[cfg(unix)]
            ListenerKind::Unix(listener) => listener.set_nonblocking(true),
        } {
            #[cfg(unix)]
            cleanup_unix_socket(&self.endpoint);
            return Err(ListenerError::NonBlocking { source: error });
        }
        let shutdown_flag = Arc::clone(&shutdown);
        let handle = thread::spawn(move || run_accept_loop(&self, &shutdown_flag, &handler));
        Ok(ListenerHandle {
            shutdown,
            handle: Some(handle),
        })
    }
}

/// Handle to the background accept loop.
///
/// Shutting down stops new accepts only. Workers already serving a
/// connection are detached and are abandoned when the process exits.
pub(crate) struct ListenerHandle {
    shutdown: Arc<AtomicBool>,
    handle: Option<thread::JoinHandle<()>>,
}

impl ListenerHandle {
    pub(crate) fn shutdown(&self) {
        self.shutdown.store(true, Ordering::SeqCst);
    }

    pub(crate) fn join(mut self) -> Result<(), ListenerError> {
        match self.handle.take() {
            Some(handle) => handle.join().map_err(|_| ListenerError::ThreadPanic),
            None => Ok(()),
        }
    }
}

impl Drop for ListenerHandle {
    fn drop(&mut self) {
        self.shutdown.store(true, Ordering::SeqCst);
    }
}

fn run_accept_loop(
    listener: &SocketListener,
    shutdown: &AtomicBool,
    handler: &Arc<dyn ConnectionHandler>,
) {
    info!(
        target: LISTENER_TARGET,
        endpoint = %listener.endpoint,
        "socket listener active"
    );
    let connections = AtomicU64::new(0);
    let mut last_error = None::<io::ErrorKind>;
    while !shutdown.load(Ordering::SeqCst) {
        match accept_connection(listener) {
            Ok(Some(stream)) => {
                last_error = None;
                let id = connections.fetch_add(1, Ordering::Relaxed);
                spawn_worker(handler, stream, id);
            }
            Ok(None) => {
                thread::sleep(ACCEPT_BACKOFF);
            }
            Err(error) => {
                let kind = error.kind();
                if last_error != Some(kind) {
                    warn!(
                        target: LISTENER_TARGET,
                        error = %error,
                        "socket accept error"
                    );
                }
                last_error = Some(kind);
                thread::sleep(ERROR_BACKOFF);
            }
        }
    }

    info!(
        target: LISTENER_TARGET,
        endpoint = %listener.endpoint,
        accepted = connections.load(Ordering::Relaxed),
        "socket listener stopped"
    );
    #[cfg(unix)]
    cleanup_unix_socket(&listener.endpoint);
}

fn spawn_worker(handler: &Arc<dyn ConnectionHandler>, stream: ConnectionStream, id: u64) {
    let handler = Arc::clone(handler);
    let spawned = thread::Builder::new()
        .name(format!("mynetd-conn-{id}"))
        .spawn(move || {
            let peer = stream.peer();
            let outcome = panic::catch_unwind(AssertUnwindSafe(|| handler.handle(stream)));
            if outcome.is_err() {
                error!(
                    target: LISTENER_TARGET,
                    connection = id,
                    peer = %peer,
                    "connection worker panicked"
                );
            }
        });
    match spawned {
        Ok(_detached) => {
            debug!(target: LISTENER_TARGET, connection = id, "connection worker started");
        }
        Err(error) => {
            warn!(
                target: LISTENER_TARGET,
                connection = id,
                error = %error,
                "failed to spawn connection worker"
            );
        }
    }
}

fn accept_connection(listener: &SocketListener) -> Result<Option<ConnectionStream>, io::Error> {
    match &listener.listener {
        ListenerKind::Tcp(tcp) => match tcp.accept() {
            Ok((stream, _)) => {
                stream.set_nonblocking(false)?;
                Ok(Some(ConnectionStream::Tcp(stream)))
            }
            Err(error) if error.kind() == io::ErrorKind::WouldBlock => Ok(None),
            Err(error) => Err(error),
        },
        #[cfg(unix)]
        ListenerKind::Unix(unix) => match unix.accept() {
            Ok((stream, _)) => {
                stream.set_nonblocking(false)?;
                Ok(Some(ConnectionStream::Unix(stream)))
            }
            Err(error) if error.kind() == io::ErrorKind::WouldBlock => Ok(None),
            Err(error) => Err(error),
        },
    }
}

fn bind_tcp(host: &str, port: u16) -> Result<TcpListener, ListenerError> {
    let endpoint = || format!("tcp://{host}:{port}");
    let addr = (host, port)
        .to_socket_addrs()
        .map_err(|source| ListenerError::Resolve {
            endpoint: endpoint(),
            source,
        })?
        .next()
        .ok_or_else(|| ListenerError::ResolveEmpty {
            endpoint: endpoint(),
        })?;
    TcpListener::bind(addr).map_err(|source| ListenerError::Bind {
        endpoint: endpoint(),
        source,
    })
}

#[cfg(unix)]
fn bind_unix(path: &Path) -> Result<UnixListener, ListenerError> {
    if path.exists() {
        reclaim_stale_socket(path)?;
    }
    UnixListener::bind(path).map_err(|source| ListenerError::Bind {
        endpoint: format!("unix://{}", path.display()),
        source,
    })
}

/// Removes a socket file left behind by a dead server.
#[cfg(unix)]
fn reclaim_stale_socket(path: &Path) -> Result<(), ListenerError> {
    let stale = |source| ListenerError::UnixStale {
        path: path.display().to_string(),
        source,
    };
    let metadata = fs::symlink_metadata(path).map_err(stale)?;
    if !metadata.file_type().is_socket() {
        return Err(stale(io::Error::new(
            io::ErrorKind::AlreadyExists,
            "path exists and is not a socket",
        )));
    }
    match UnixStream::connect(path) {
        Ok(_live) => Err(ListenerError::UnixInUse {
            path: path.display().to_string(),
        }),
        Err(error)
            if matches!(
                error.kind(),
                io::ErrorKind::ConnectionRefused | io::ErrorKind::NotFound
            ) =>
        {
            fs::remove_file(path).map_err(stale)
        }
        Err(error) => Err(stale(error)),
    }
}

#[cfg(unix)]
fn cleanup_unix_socket(endpoint: &SocketEndpoint) {
    let SocketEndpoint::Unix { path } = endpoint else {
        return;
    };
    if let Err(error) = fs::remove_file(path.as_std_path())
        && error.kind() != io::ErrorKind::NotFound
    {
        warn!(
            target: LISTENER_TARGET,
            error = %error,
            path = %path,
            "failed to remove unix socket file"
        );
    }
}
