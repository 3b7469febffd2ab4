//! State shared by the acceptor and every connection worker.

use std::sync::Arc;
use std::time::Duration;

use mynet_config::{Config, DEFAULT_IDLE_TIMEOUT_SECS};

use crate::auth::{AuthStore, CredentialVerifier, StoredCredentialVerifier};
use crate::dispatch::{ModuleRegistry, RegistryError};

/// Everything a session needs besides its own connection.
///
/// Built once at startup and shared behind an `Arc`; nothing in here is
/// mutated per connection.
pub struct ServerState {
    auth: AuthStore,
    registry: ModuleRegistry,
    verifier: Arc<dyn CredentialVerifier>,
    idle_timeout: Duration,
    log_arguments: bool,
}

impl ServerState {
    /// Combines a registry and user store with default settings.
    #[must_use]
    pub fn new(auth: AuthStore, registry: ModuleRegistry) -> Self {
        Self {
            auth,
            registry,
            verifier: Arc::new(StoredCredentialVerifier),
            idle_timeout: Duration::from_secs(DEFAULT_IDLE_TIMEOUT_SECS),
            log_arguments: false,
        }
    }

    /// Builds the production state: built-in modules, the configured user
    /// registry root, timeout and logging flag.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] if the built-in bindings are rejected.
    pub fn from_config(config: &Config) -> Result<Self, RegistryError> {
        let state = Self::new(
            AuthStore::new(config.users_root()),
            ModuleRegistry::with_builtins()?,
        )
        .with_idle_timeout(config.idle_timeout())
        .with_log_arguments(config.log_arguments());
        Ok(state)
    }

    /// Replaces the credential verifier.
    #[must_use]
    pub fn with_verifier(mut self, verifier: Arc<dyn CredentialVerifier>) -> Self {
        self.verifier = verifier;
        self
    }

    /// Sets the per-read inactivity bound.
    #[must_use]
    pub fn with_idle_timeout(mut self, idle_timeout: Duration) -> Self {
        self.idle_timeout = idle_timeout;
        self
    }

    /// Enables or disables argument lists in dispatch log events.
    #[must_use]
    pub fn with_log_arguments(mut self, log_arguments: bool) -> Self {
        self.log_arguments = log_arguments;
        self
    }

    #[must_use]
    pub fn auth(&self) -> &AuthStore {
        &self.auth
    }

    #[must_use]
    pub fn registry(&self) -> &ModuleRegistry {
        &self.registry
    }

    #[must_use]
    pub fn verifier(&self) -> &dyn CredentialVerifier {
        self.verifier.as_ref()
    }

    #[must_use]
    pub fn idle_timeout(&self) -> Duration {
        self.idle_timeout
    }

    #[must_use]
    pub fn log_arguments(&self) -> bool {
        self.log_arguments
    }
}

impl std::fmt::Debug for ServerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerState")
            .field("users_root", &self.auth.root())
            .field("registry", &self.registry)
            .field("idle_timeout", &self.idle_timeout)
            .field("log_arguments", &self.log_arguments)
            .finish_non_exhaustive()
    }
}
