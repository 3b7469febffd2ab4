//! Command and group name hygiene.

/// Group assigned to sessions that have not logged in.
pub const VISITOR_GROUP: &str = "visitor";

/// Group given to newly registered users.
pub const DEFAULT_USER_GROUP: &str = "basic";

/// Drops every character outside `[0-9a-z_]`.
#[must_use]
pub fn sanitize_name(raw: &str) -> String {
    raw.chars().filter(|ch| is_name_char(*ch)).collect()
}

/// True when `raw` is non-empty and already in sanitised form.
#[must_use]
pub fn is_clean_name(raw: &str) -> bool {
    !raw.is_empty() && raw.chars().all(is_name_char)
}

fn is_name_char(ch: char) -> bool {
    ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '_'
}
