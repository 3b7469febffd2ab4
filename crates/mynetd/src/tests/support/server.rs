//! Server running on a background thread for end-to-end scenarios.

use std::net::SocketAddr;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crate::process::LaunchError;
use crate::process::launch::run_server_with;

use super::{RecordingHealthReporter, TestConfigLoader, TestShutdownSignal};

const READY_TIMEOUT: Duration = Duration::from_secs(5);

pub struct RunningServer {
    pub loader: TestConfigLoader,
    pub reporter: Arc<RecordingHealthReporter>,
    shutdown: TestShutdownSignal,
    handle: Option<JoinHandle<Result<(), LaunchError>>>,
    addr: SocketAddr,
}

impl RunningServer {
    /// Starts the server and waits until it reports its address.
    pub fn start(loader: TestConfigLoader) -> Self {
        let reporter = Arc::new(RecordingHealthReporter::default());
        let shutdown = TestShutdownSignal::new();
        let handle = {
            let loader = loader.clone();
            let reporter = Arc::clone(&reporter);
            let shutdown = shutdown.clone();
            thread::spawn(move || run_server_with(&loader, &*reporter, &shutdown))
        };
        let deadline = Instant::now() + READY_TIMEOUT;
        let addr = loop {
            if let Some(addr) = reporter.listening_on() {
                break addr;
            }
            assert!(
                Instant::now() < deadline && !handle.is_finished(),
                "server did not report a listening address: {:?}",
                reporter.events()
            );
            thread::sleep(Duration::from_millis(10));
        };
        Self {
            loader,
            reporter,
            shutdown,
            handle: Some(handle),
            addr,
        }
    }

    #[must_use]
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Triggers shutdown and waits for `run_server_with` to return.
    pub fn stop(&mut self) -> Option<Result<(), LaunchError>> {
        self.shutdown.trigger();
        self.handle
            .take()
            .map(|handle| handle.join().expect("server thread panicked"))
    }
}

impl Drop for RunningServer {
    fn drop(&mut self) {
        self.shutdown.trigger();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}
