//! Credential checking seam.

use super::UserRecord;

/// Decides whether a presented secret matches a stored credential.
///
/// Credential bytes are opaque to the registry; the encoding and any hashing
/// belong to the implementation plugged in here.
pub trait CredentialVerifier: Send + Sync {
    /// Returns true when `presented` authenticates `user`.
    fn verify(&self, user: &UserRecord, presented: &[u8]) -> bool;
}

/// Compares the presented secret with the stored bytes verbatim.
///
/// Accounts whose credential has not been provisioned (still empty) never
/// authenticate.
#[derive(Debug, Default, Clone, Copy)]
pub struct StoredCredentialVerifier;

impl CredentialVerifier for StoredCredentialVerifier {
    fn verify(&self, user: &UserRecord, presented: &[u8]) -> bool {
        if user.credential.is_empty() || user.credential.len() != presented.len() {
            return false;
        }
        user.credential
            .iter()
            .zip(presented)
            .fold(0_u8, |diff, (stored, given)| diff | (stored ^ given))
            == 0
    }
}
