//! MyNet line shell server.
//!
//! Clients connect over TCP (or a Unix socket), receive a banner and a
//! prompt, and type one command per line. Each command is resolved against
//! the permission group of the session's identity and handed to a module
//! from a statically built registry. Anonymous sessions use the `visitor`
//! group; registered users are created in `basic`.
//!
//! Every connection runs on its own worker thread with a read timeout.
//! Failures inside a module are contained to that command and answered with
//! a short message, while the detail goes to the operator log.

pub mod auth;
mod bootstrap;
pub mod command;
pub mod dispatch;
mod health;
pub mod modules;
mod process;
pub mod protocol;
pub mod session;
mod state;
mod telemetry;
mod transport;

pub use bootstrap::{
    BootstrapError, ConfigLoader, Server, StaticConfigLoader, SystemConfigLoader, bootstrap_with,
};
pub use health::{HealthReporter, StructuredHealthReporter};
pub use process::{LaunchError, ShutdownError, ShutdownSignal, SystemShutdownSignal, run_server};
pub use state::ServerState;
pub use telemetry::{TelemetryError, TelemetryHandle};
pub use transport::{ListenerError, PeerAddress};

#[cfg(test)]
mod tests;
