//! Configuration loaders for scenarios covering success and failure paths.

use std::ffi::OsString;
use std::sync::Arc;

use camino::Utf8PathBuf;
use ortho_config::{OrthoConfig, OrthoError};
use tempfile::TempDir;

use mynet_config::{Config, SocketEndpoint};

use crate::bootstrap::ConfigLoader;

/// Loader binding an ephemeral loopback port with a registry under a
/// temporary directory.
#[derive(Clone)]
pub struct TestConfigLoader {
    dir: Arc<TempDir>,
    idle_timeout_secs: u64,
}

impl TestConfigLoader {
    #[must_use]
    pub fn new() -> Self {
        Self {
            dir: Arc::new(TempDir::new().expect("temporary registry directory")),
            idle_timeout_secs: 30,
        }
    }

    /// Shortens the idle timeout applied to each connection.
    #[must_use]
    pub fn with_idle_timeout_secs(mut self, secs: u64) -> Self {
        self.idle_timeout_secs = secs;
        self
    }

    pub fn users_root(&self) -> Utf8PathBuf {
        Utf8PathBuf::from_path_buf(self.dir.path().join("users"))
            .expect("temporary path should be UTF-8")
    }
}

impl ConfigLoader for TestConfigLoader {
    fn load(&self) -> Result<Config, Arc<OrthoError>> {
        Ok(Config {
            listen: SocketEndpoint::tcp("127.0.0.1", 0),
            users_root: self.users_root(),
            idle_timeout_secs: self.idle_timeout_secs,
            log_filter: "off".into(),
            ..Config::default()
        })
    }
}

/// Loader that fails by passing an invalid listen endpoint on the command
/// line.
pub struct FailingConfigLoader;

impl ConfigLoader for FailingConfigLoader {
    fn load(&self) -> Result<Config, Arc<OrthoError>> {
        let args = vec![
            OsString::from("mynetd"),
            OsString::from("--listen"),
            OsString::from("udp://127.0.0.1:1"),
        ];
        Config::load_from_iter(args)
    }
}
