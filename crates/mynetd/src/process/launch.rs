//! Launch sequencing.

use std::sync::Arc;

use tracing::info;

use crate::bootstrap::{ConfigLoader, SystemConfigLoader, bootstrap_with};
use crate::health::{HealthReporter, StructuredHealthReporter};
use crate::session::SessionConnectionHandler;
use crate::transport::SocketListener;

use super::PROCESS_TARGET;
use super::errors::LaunchError;
use super::shutdown::{ShutdownSignal, SystemShutdownSignal};

/// Runs the server with production collaborators until a termination
/// signal arrives.
///
/// # Errors
///
/// Returns [`LaunchError`] when bootstrap, binding or signal installation
/// fails.
pub fn run_server() -> Result<(), LaunchError> {
    run_server_with(
        &SystemConfigLoader,
        &StructuredHealthReporter::new(),
        &SystemShutdownSignal,
    )
}

/// Runs the server with injected collaborators.
pub(crate) fn run_server_with(
    loader: &dyn ConfigLoader,
    reporter: &dyn HealthReporter,
    shutdown: &dyn ShutdownSignal,
) -> Result<(), LaunchError> {
    let server = bootstrap_with(loader, reporter)?;
    let endpoint = server.config().listen().clone();
    let listener = SocketListener::bind(&endpoint)?;
    let local_addr = listener.local_addr();
    let handler = Arc::new(SessionConnectionHandler::new(Arc::clone(server.state())));
    let handle = listener.start(handler)?;
    reporter.listener_ready(&endpoint, local_addr);

    let waited = shutdown.wait();
    reporter.shutdown_requested();
    handle.shutdown();
    handle.join()?;
    waited?;
    info!(target: PROCESS_TARGET, "shutdown sequence completed");
    Ok(())
}
