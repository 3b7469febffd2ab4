//! Username normalisation, validation and shard layout.

use camino::Utf8PathBuf;

use super::RegistrationError;

const SHARD_WIDTH: usize = 2;

/// Collapses whitespace runs to one space and trims both ends.
///
/// Stops lookalike names that differ only in invisible whitespace.
#[must_use]
pub fn normalize_username(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Normalises `raw` and checks it against `[0-9a-zA-Z_-]+`.
///
/// # Errors
///
/// [`RegistrationError::EmptyName`] when nothing is left after normalising,
/// [`RegistrationError::InvalidName`] when any other character remains.
pub fn validate_username(raw: &str) -> Result<String, RegistrationError> {
    let name = normalize_username(raw);
    if name.is_empty() {
        return Err(RegistrationError::EmptyName);
    }
    if !name.chars().all(is_username_char) {
        return Err(RegistrationError::InvalidName { name });
    }
    Ok(name)
}

fn is_username_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_' || ch == '-'
}

/// Relative directory for a validated username.
///
/// The lower-cased name is cut into consecutive two-character segments, one
/// path component each, so no directory fans out beyond a bounded number of
/// children.
#[must_use]
pub fn shard_path(name: &str) -> Utf8PathBuf {
    let lowered: Vec<char> = name.to_ascii_lowercase().chars().collect();
    lowered
        .chunks(SHARD_WIDTH)
        .map(|chunk| chunk.iter().collect::<String>())
        .collect()
}
