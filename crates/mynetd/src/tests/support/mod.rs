//! Shared doubles for the behavioural suites.

mod client;
mod config_loader;
mod reporter;
mod server;
mod shutdown;
mod world;

pub use client::TestClient;
pub use config_loader::{FailingConfigLoader, TestConfigLoader};
pub use reporter::{HealthEvent, RecordingHealthReporter};
pub use server::RunningServer;
pub use shutdown::TestShutdownSignal;
pub use world::{ServerWorld, unquote_step};
