//! Error types for the user registry.

use std::io;

use camino::Utf8PathBuf;
use thiserror::Error;

/// Reasons a registration was refused.
#[derive(Debug, Error)]
pub enum RegistrationError {
    /// Nothing remained after whitespace normalisation.
    #[error("username is empty")]
    EmptyName,
    /// The name contains characters outside `[0-9a-zA-Z_-]`.
    #[error("username '{name}' contains disallowed characters")]
    InvalidName { name: String },
    /// A user with this name is already registered.
    #[error("username '{name}' is already registered")]
    AlreadyExists { name: String },
    /// The registry could not be written.
    #[error(transparent)]
    Store(#[from] AuthStoreError),
}

/// Filesystem failures inside the registry.
#[derive(Debug, Error)]
pub enum AuthStoreError {
    /// Creating the user's shard directory failed.
    #[error("failed to create user directory '{path}': {source}")]
    CreateDirectory {
        path: Utf8PathBuf,
        #[source]
        source: io::Error,
    },
    /// Writing a user record failed.
    #[error("failed to write user record '{path}': {source}")]
    WriteRecord {
        path: Utf8PathBuf,
        #[source]
        source: io::Error,
    },
    /// Reading a user record failed.
    #[error("failed to read user record '{path}': {source}")]
    ReadRecord {
        path: Utf8PathBuf,
        #[source]
        source: io::Error,
    },
}
