//! Server bootstrap orchestration.

use std::sync::Arc;

use ortho_config::{OrthoConfig, OrthoError};
use thiserror::Error;

use mynet_config::{Config, SocketPreparationError};

use crate::dispatch::RegistryError;
use crate::health::HealthReporter;
use crate::state::ServerState;
use crate::telemetry::{self, TelemetryError, TelemetryHandle};

/// Trait abstracting configuration loading for testability.
pub trait ConfigLoader: Send + Sync {
    /// Loads the server configuration.
    fn load(&self) -> Result<Config, Arc<OrthoError>>;
}

/// Loader that delegates to [`Config::load`].
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemConfigLoader;

impl ConfigLoader for SystemConfigLoader {
    fn load(&self) -> Result<Config, Arc<OrthoError>> {
        Config::load()
    }
}

/// Loader returning a fixed configuration.
#[derive(Debug, Clone)]
pub struct StaticConfigLoader {
    config: Config,
}

impl StaticConfigLoader {
    /// Wraps an already resolved configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self { config }
    }
}

impl ConfigLoader for StaticConfigLoader {
    fn load(&self) -> Result<Config, Arc<OrthoError>> {
        Ok(self.config.clone())
    }
}

/// Errors surfaced during bootstrap.
#[derive(Debug, Error)]
pub enum BootstrapError {
    /// Configuration failed to load.
    #[error("failed to load configuration: {source}")]
    Configuration {
        #[source]
        source: Arc<OrthoError>,
    },
    /// Telemetry initialisation failed.
    #[error("failed to initialise telemetry: {source}")]
    Telemetry {
        #[source]
        source: TelemetryError,
    },
    /// Socket preparation failed.
    #[error("failed to prepare listening socket: {source}")]
    Socket {
        #[source]
        source: SocketPreparationError,
    },
    /// The built-in module table was rejected.
    #[error("failed to build module registry: {source}")]
    Registry {
        #[source]
        source: RegistryError,
    },
}

/// A bootstrapped server, ready to bind its listener.
#[derive(Debug)]
pub struct Server {
    config: Config,
    state: Arc<ServerState>,
    telemetry: TelemetryHandle,
}

impl Server {
    /// Accessor for the resolved configuration.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// State shared with every connection.
    #[must_use]
    pub fn state(&self) -> &Arc<ServerState> {
        &self.state
    }

    #[must_use]
    pub fn telemetry(&self) -> TelemetryHandle {
        self.telemetry
    }
}

/// Loads configuration, starts telemetry and assembles the shared state.
///
/// # Errors
///
/// Any [`BootstrapError`]; the reporter is told about it before it is
/// returned.
pub fn bootstrap_with(
    loader: &dyn ConfigLoader,
    reporter: &dyn HealthReporter,
) -> Result<Server, BootstrapError> {
    reporter.bootstrap_starting();
    let result = assemble(loader);
    match &result {
        Ok(server) => reporter.bootstrap_succeeded(&server.config),
        Err(error) => reporter.bootstrap_failed(error),
    }
    result
}

fn assemble(loader: &dyn ConfigLoader) -> Result<Server, BootstrapError> {
    let config = loader
        .load()
        .map_err(|source| BootstrapError::Configuration { source })?;
    let telemetry =
        telemetry::initialise(&config).map_err(|source| BootstrapError::Telemetry { source })?;
    config
        .listen()
        .prepare_filesystem()
        .map_err(|source| BootstrapError::Socket { source })?;
    let state =
        ServerState::from_config(&config).map_err(|source| BootstrapError::Registry { source })?;
    Ok(Server {
        config,
        state: Arc::new(state),
        telemetry,
    })
}
