use crate::dispatch::VISITOR_GROUP;

/// Who the peer on a connection currently is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Identity {
    /// Not logged in; commands resolve in the visitor group.
    #[default]
    Anonymous,
    /// Logged in as a registered user.
    Authenticated { username: String, group: String },
}

impl Identity {
    /// Username when authenticated.
    #[must_use]
    pub fn username(&self) -> Option<&str> {
        match self {
            Self::Anonymous => None,
            Self::Authenticated { username, .. } => Some(username),
        }
    }

    /// Group used to resolve commands.
    #[must_use]
    pub fn group(&self) -> &str {
        match self {
            Self::Anonymous => VISITOR_GROUP,
            Self::Authenticated { group, .. } => group,
        }
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated { .. })
    }
}
