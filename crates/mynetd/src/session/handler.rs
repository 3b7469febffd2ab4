//! Connection handler running the interactive session loop.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::dispatch::{self, Flow};
use crate::protocol::{ProtocolError, ReadOutcome};
use crate::state::ServerState;
use crate::transport::{ConnectionHandler, ConnectionStream};

use super::{SESSION_TARGET, SessionContext};

/// First banner line, followed by the crate version.
pub const BANNER_TITLE: &str = "\u{27a4} MyNet";

/// Hint printed under the banner.
pub const BANNER_HINT: &str = "Type \"help\" for help or \"login\" to sign in.";

/// Why a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// The peer sent an empty line or closed the connection.
    PeerClosed,
    /// A module asked to close (for example `quit`).
    Requested,
    /// No line arrived within the idle timeout.
    IdleTimeout,
    /// Reading or writing failed.
    ProtocolFailure,
}

/// Serves one client per connection on the worker thread it is handed.
#[derive(Debug)]
pub(crate) struct SessionConnectionHandler {
    state: Arc<ServerState>,
}

impl SessionConnectionHandler {
    pub(crate) fn new(state: Arc<ServerState>) -> Self {
        Self { state }
    }
}

impl ConnectionHandler for SessionConnectionHandler {
    fn handle(&self, stream: ConnectionStream) {
        let peer = stream.peer();
        if let Err(error) = stream.set_read_timeout(Some(self.state.idle_timeout())) {
            warn!(
                target: SESSION_TARGET,
                peer = %peer,
                %error,
                "failed to set read timeout; closing connection"
            );
            stream.close();
            return;
        }
        let mut ctx = SessionContext::new(peer, stream, Arc::clone(&self.state));
        run_session(&mut ctx);
    }
}

/// Drives a session until it ends, entering its span for the duration.
pub fn run_session(ctx: &mut SessionContext) -> SessionEnd {
    let span = ctx.span().clone();
    let _entered = span.enter();
    info!(target: SESSION_TARGET, "session opened");
    let end = serve(ctx);
    info!(target: SESSION_TARGET, reason = ?end, "session closed");
    end
}

fn serve(ctx: &mut SessionContext) -> SessionEnd {
    if let Err(error) = send_banner(ctx) {
        return protocol_failure(&error);
    }
    loop {
        if let Err(error) = ctx.prompt() {
            return protocol_failure(&error);
        }
        let line = match ctx.read_line() {
            Ok(ReadOutcome::Line(line)) => line,
            Ok(ReadOutcome::EndOfStream) => {
                debug!(target: SESSION_TARGET, "peer closed the connection");
                return SessionEnd::PeerClosed;
            }
            Err(ProtocolError::Timeout) => {
                info!(
                    target: SESSION_TARGET,
                    timeout_secs = ctx.state().idle_timeout().as_secs(),
                    "session idle timeout"
                );
                return SessionEnd::IdleTimeout;
            }
            Err(error) => return protocol_failure(&error),
        };
        if line.is_empty() {
            debug!(target: SESSION_TARGET, "empty line ends the session");
            return SessionEnd::PeerClosed;
        }
        if line.trim().is_empty() {
            continue;
        }
        if dispatch::handle_line(ctx, &line) == Flow::Close {
            return SessionEnd::Requested;
        }
    }
}

fn send_banner(ctx: &mut SessionContext) -> Result<(), ProtocolError> {
    ctx.send(&format!("{BANNER_TITLE} {}", env!("CARGO_PKG_VERSION")))?;
    ctx.send(BANNER_HINT)
}

fn protocol_failure(error: &ProtocolError) -> SessionEnd {
    warn!(target: SESSION_TARGET, %error, "session protocol failure");
    SessionEnd::ProtocolFailure
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::session::test_support::{SessionHarness, harness};

    fn after_banner(output: &str) -> &str {
        output
            .split_once(&format!("{BANNER_HINT}\n"))
            .map_or(output, |(_, rest)| rest)
    }

    #[rstest]
    fn greets_then_prompts(harness: SessionHarness) {
        let mut ctx = harness.context(b"");
        assert_eq!(run_session(&mut ctx), SessionEnd::PeerClosed);
        let output = harness.output();
        assert!(output.starts_with(BANNER_TITLE));
        assert_eq!(after_banner(&output), "MyNet > ");
    }

    #[rstest]
    fn empty_line_ends_but_blank_line_reprompts(harness: SessionHarness) {
        let mut ctx = harness.context(b"   \n\nhelp\n");
        assert_eq!(run_session(&mut ctx), SessionEnd::PeerClosed);
        assert_eq!(after_banner(&harness.output()), "MyNet > MyNet > ");
    }

    #[rstest]
    fn quit_says_goodbye_and_closes(harness: SessionHarness) {
        let mut ctx = harness.context(b"quit\nhelp\n");
        assert_eq!(run_session(&mut ctx), SessionEnd::Requested);
        assert_eq!(after_banner(&harness.output()), "MyNet > Adios!\n");
    }

    #[rstest]
    fn idle_sessions_close_without_a_reply(harness: SessionHarness) {
        let mut ctx = harness.idle_context(b"");
        assert_eq!(run_session(&mut ctx), SessionEnd::IdleTimeout);
        assert_eq!(after_banner(&harness.output()), "MyNet > ");
    }

    #[rstest]
    fn syntax_errors_keep_the_session_open(harness: SessionHarness) {
        let mut ctx = harness.context(b"help \"unterminated\nquit\n");
        assert_eq!(run_session(&mut ctx), SessionEnd::Requested);
        let output = harness.output();
        let transcript = after_banner(&output);
        assert!(transcript.contains("syntax error"));
        assert!(transcript.ends_with("MyNet > Adios!\n"));
    }

    #[rstest]
    fn traversal_tokens_look_like_unknown_commands(harness: SessionHarness) {
        let mut ctx = harness.context(b"..help\nnope\n");
        run_session(&mut ctx);
        assert_eq!(
            after_banner(&harness.output()),
            "MyNet > No such command: ..help\nMyNet > No such command: nope\nMyNet > "
        );
    }
}
