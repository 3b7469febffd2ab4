//! Per-connection session state handed to modules.

use std::io::{Read, Write};
use std::sync::Arc;

use tracing::Span;

use crate::auth::UserRecord;
use crate::command::Arguments;
use crate::protocol::{LineChannel, ProtocolError, ReadOutcome};
use crate::state::ServerState;
use crate::transport::PeerAddress;

use super::{Identity, SESSION_TARGET};

/// Prompt suffix shown after the optional username.
pub const PROMPT_SUFFIX: &str = "MyNet > ";

/// Byte stream a session can run over.
pub trait SessionStream: Read + Write + Send {}

impl<T> SessionStream for T where T: Read + Write + Send {}

/// Mutable state of one connection.
///
/// Owned by exactly one worker thread; modules receive it by mutable
/// reference for the duration of a call.
pub struct SessionContext {
    peer: PeerAddress,
    identity: Identity,
    last_command: Option<String>,
    last_args: Arguments,
    channel: LineChannel<Box<dyn SessionStream>>,
    state: Arc<ServerState>,
    span: Span,
}

impl SessionContext {
    /// Starts an anonymous session over `stream`.
    pub fn new(peer: PeerAddress, stream: impl SessionStream + 'static, state: Arc<ServerState>) -> Self {
        let span = tracing::info_span!(
            target: SESSION_TARGET,
            "session",
            peer = %peer,
            user = tracing::field::Empty,
        );
        Self {
            peer,
            identity: Identity::Anonymous,
            last_command: None,
            last_args: Arguments::default(),
            channel: LineChannel::new(Box::new(stream)),
            state,
            span,
        }
    }

    #[must_use]
    pub fn peer(&self) -> PeerAddress {
        self.peer
    }

    #[must_use]
    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    #[must_use]
    pub fn state(&self) -> &Arc<ServerState> {
        &self.state
    }

    /// Span every event of this connection is recorded under.
    #[must_use]
    pub fn span(&self) -> &Span {
        &self.span
    }

    /// Most recently dispatched command, sanitised.
    #[must_use]
    pub fn last_command(&self) -> Option<&str> {
        self.last_command.as_deref()
    }

    /// Arguments of the most recently dispatched command.
    #[must_use]
    pub fn last_args(&self) -> &Arguments {
        &self.last_args
    }

    /// Writes one line to the peer.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::Io`] when the peer cannot be written to.
    pub fn send(&mut self, text: &str) -> Result<(), ProtocolError> {
        self.channel.write_line(text)
    }

    /// Writes the prompt for the current identity.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::Io`] when the peer cannot be written to.
    pub fn prompt(&mut self) -> Result<(), ProtocolError> {
        let text = self.prompt_text();
        self.channel.write_prompt(&text)
    }

    /// `MyNet > ` for visitors, `<user>@MyNet > ` once logged in.
    #[must_use]
    pub fn prompt_text(&self) -> String {
        match self.identity.username() {
            Some(username) => format!("{username}@{PROMPT_SUFFIX}"),
            None => PROMPT_SUFFIX.to_owned(),
        }
    }

    /// Waits for the next client line.
    ///
    /// # Errors
    ///
    /// See [`LineChannel::read_line`].
    pub fn read_line(&mut self) -> Result<ReadOutcome, ProtocolError> {
        self.channel.read_line()
    }

    /// Switches the session to `user` and its group.
    pub fn login(&mut self, user: &UserRecord) {
        self.span.record("user", user.username.as_str());
        self.identity = Identity::Authenticated {
            username: user.username.clone(),
            group: user.group.clone(),
        };
    }

    /// Returns to the anonymous visitor identity, yielding the previous
    /// username if there was one.
    pub fn logout(&mut self) -> Option<String> {
        match std::mem::take(&mut self.identity) {
            Identity::Authenticated { username, .. } => {
                self.span.record("user", "");
                Some(username)
            }
            Identity::Anonymous => None,
        }
    }

    /// Remembers the command being dispatched.
    pub fn record_command(&mut self, command: &str, args: &Arguments) {
        self.last_command = Some(command.to_owned());
        self.last_args = args.clone();
    }
}

impl std::fmt::Debug for SessionContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionContext")
            .field("peer", &self.peer)
            .field("identity", &self.identity)
            .field("last_command", &self.last_command)
            .finish_non_exhaustive()
    }
}
