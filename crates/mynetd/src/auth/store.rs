//! Registration and lookup of user records.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};

use camino::{Utf8Path, Utf8PathBuf};
use tracing::{debug, info};

use crate::dispatch::{DEFAULT_USER_GROUP, sanitize_name};

use super::username::{shard_path, validate_username};
use super::{AUTH_TARGET, AuthStoreError, RegistrationError};

const CREDENTIAL_FILE: &str = "password";
const GROUP_FILE: &str = "group";

/// A registered user as read back from the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    /// Normalised username. Registration keeps the case as typed; lookups
    /// return the lower-cased form the records are stored under.
    pub username: String,
    /// Permission group, restricted to `[0-9a-z_]`.
    pub group: String,
    /// Opaque credential bytes; empty until provisioned externally.
    pub credential: Vec<u8>,
}

/// Registry rooted at a directory. Safe to share between workers.
#[derive(Debug, Clone)]
pub struct AuthStore {
    root: Utf8PathBuf,
}

impl AuthStore {
    /// Opens a registry rooted at `root`. Nothing is created until the first
    /// registration.
    pub fn new(root: impl Into<Utf8PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Registry root directory.
    #[must_use]
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    /// Directory holding the records for an already validated name.
    #[must_use]
    pub fn user_dir(&self, name: &str) -> Utf8PathBuf {
        self.root.join(shard_path(name))
    }

    /// Registers a new user in the `basic` group with an empty credential.
    ///
    /// The user's directory is claimed with a single `create_dir`, so when
    /// two callers race on one name exactly one succeeds and the other sees
    /// [`RegistrationError::AlreadyExists`]. Any existing directory at the
    /// user's location counts as taken, including a shard that belongs to a
    /// longer name (`al` once `alice` exists). Existing records are never
    /// overwritten.
    ///
    /// # Errors
    ///
    /// `EmptyName` or `InvalidName` for rejected names (no filesystem state is
    /// touched), `AlreadyExists` when the location is taken, and `Store` for
    /// I/O failures.
    pub fn register(&self, raw: &str) -> Result<UserRecord, RegistrationError> {
        let username = validate_username(raw)?;
        let dir = self.user_dir(&username);
        if let Some(parent) = dir.parent() {
            fs::create_dir_all(parent).map_err(|source| AuthStoreError::CreateDirectory {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        match fs::create_dir(&dir) {
            Ok(()) => {}
            Err(error) if error.kind() == io::ErrorKind::AlreadyExists => {
                debug!(
                    target: AUTH_TARGET,
                    username = %username,
                    "registration refused: location taken"
                );
                return Err(RegistrationError::AlreadyExists { name: username });
            }
            Err(source) => {
                return Err(AuthStoreError::CreateDirectory { path: dir, source }.into());
            }
        }

        write_record(&dir.join(CREDENTIAL_FILE), b"")?;
        write_record(&dir.join(GROUP_FILE), DEFAULT_USER_GROUP.as_bytes())?;
        info!(
            target: AUTH_TARGET,
            username = %username,
            path = %dir,
            "user registered"
        );
        Ok(UserRecord {
            username,
            group: DEFAULT_USER_GROUP.to_owned(),
            credential: Vec::new(),
        })
    }

    /// Reads a user's records, or `None` when the name is unknown or invalid.
    ///
    /// Only directories holding a credential record are users; a bare shard
    /// directory (`al/` under `alice`) or a registration still in flight
    /// reads as unknown. A missing group record reads as the default group.
    ///
    /// # Errors
    ///
    /// Returns [`AuthStoreError::ReadRecord`] for I/O failures other than a
    /// missing record.
    pub fn lookup(&self, raw: &str) -> Result<Option<UserRecord>, AuthStoreError> {
        let Ok(username) = validate_username(raw) else {
            return Ok(None);
        };
        let dir = self.user_dir(&username);
        let Some(credential) = read_optional(&dir.join(CREDENTIAL_FILE))? else {
            return Ok(None);
        };
        let group = read_optional(&dir.join(GROUP_FILE))?
            .map(|bytes| sanitize_name(String::from_utf8_lossy(&bytes).trim()))
            .filter(|group| !group.is_empty())
            .unwrap_or_else(|| DEFAULT_USER_GROUP.to_owned());
        Ok(Some(UserRecord {
            username: username.to_ascii_lowercase(),
            group,
            credential,
        }))
    }

    /// Stores credential bytes for an existing user.
    ///
    /// This is the seam for an external provisioning collaborator; the store
    /// itself never derives or checks credential contents.
    ///
    /// # Errors
    ///
    /// Returns [`AuthStoreError::WriteRecord`] if the record cannot be
    /// written, including when the user does not exist.
    pub fn set_credential(&self, name: &str, credential: &[u8]) -> Result<(), AuthStoreError> {
        let path = self.user_dir(name).join(CREDENTIAL_FILE);
        let mut file = OpenOptions::new()
            .write(true)
            .truncate(true)
            .open(&path)
            .map_err(|source| AuthStoreError::WriteRecord {
                path: path.clone(),
                source,
            })?;
        file.write_all(credential)
            .map_err(|source| AuthStoreError::WriteRecord { path, source })
    }
}

fn write_record(path: &Utf8Path, contents: &[u8]) -> Result<(), AuthStoreError> {
    fs::write(path, contents).map_err(|source| AuthStoreError::WriteRecord {
        path: path.to_path_buf(),
        source,
    })
}

fn read_optional(path: &Utf8Path) -> Result<Option<Vec<u8>>, AuthStoreError> {
    match fs::read(path) {
        Ok(bytes) => Ok(Some(bytes)),
        Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(source) => Err(AuthStoreError::ReadRecord {
            path: path.to_path_buf(),
            source,
        }),
    }
}
