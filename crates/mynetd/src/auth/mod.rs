//! Filesystem-backed user registry.
//!
//! Each user owns a directory under the registry root, reached by splitting
//! the lower-cased name into two-character segments (`alice` lives at
//! `al/ic/e/`). The directory holds a `password` record with opaque credential
//! bytes and a `group` record naming the user's permission group.

mod credential;
mod errors;
mod store;
mod username;

pub use self::credential::{CredentialVerifier, StoredCredentialVerifier};
pub use self::errors::{AuthStoreError, RegistrationError};
pub use self::store::{AuthStore, UserRecord};
pub use self::username::{normalize_username, shard_path, validate_username};

pub(crate) const AUTH_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::auth");
