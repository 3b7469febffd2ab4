//! In-memory client used by session and module tests.

use std::io::{self, Cursor, Read, Write};
use std::sync::{Arc, Mutex, PoisonError};

use camino::Utf8PathBuf;
use rstest::fixture;
use tempfile::TempDir;

use crate::auth::AuthStore;
use crate::dispatch::ModuleRegistry;
use crate::state::ServerState;
use crate::transport::PeerAddress;

use super::SessionContext;

/// Replays fixed input, then reports either end of stream or a read
/// timeout. Everything written is captured in a shared buffer.
pub(crate) struct ScriptedClient {
    input: Cursor<Vec<u8>>,
    output: Arc<Mutex<Vec<u8>>>,
    timeout_at_end: bool,
}

impl Read for ScriptedClient {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let read = self.input.read(buf)?;
        if read == 0 && self.timeout_at_end {
            return Err(io::Error::from(io::ErrorKind::WouldBlock));
        }
        Ok(read)
    }
}

impl Write for ScriptedClient {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.output
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

pub(crate) struct SessionHarness {
    _dir: TempDir,
    state: Arc<ServerState>,
    output: Arc<Mutex<Vec<u8>>>,
}

impl SessionHarness {
    pub(crate) fn new() -> Self {
        let dir = TempDir::new().expect("temp dir");
        let root = Utf8PathBuf::from_path_buf(dir.path().join("users")).expect("utf8 temp path");
        let registry = ModuleRegistry::with_builtins().expect("builtins");
        Self {
            _dir: dir,
            state: Arc::new(ServerState::new(AuthStore::new(root), registry)),
            output: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub(crate) fn state(&self) -> &Arc<ServerState> {
        &self.state
    }

    pub(crate) fn store(&self) -> &AuthStore {
        self.state.auth()
    }

    /// Session whose input ends with end of stream.
    pub(crate) fn context(&self, input: &[u8]) -> SessionContext {
        self.client(input, false)
    }

    /// Session whose input ends with a read timeout.
    pub(crate) fn idle_context(&self, input: &[u8]) -> SessionContext {
        self.client(input, true)
    }

    fn client(&self, input: &[u8], timeout_at_end: bool) -> SessionContext {
        let client = ScriptedClient {
            input: Cursor::new(input.to_vec()),
            output: Arc::clone(&self.output),
            timeout_at_end,
        };
        SessionContext::new(PeerAddress::unknown(), client, Arc::clone(&self.state))
    }

    /// Everything written to clients so far.
    pub(crate) fn output(&self) -> String {
        let bytes = self.output.lock().unwrap_or_else(PoisonError::into_inner);
        String::from_utf8_lossy(&bytes).into_owned()
    }

    pub(crate) fn clear_output(&self) {
        self.output
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

#[fixture]
pub(crate) fn harness() -> SessionHarness {
    SessionHarness::new()
}
