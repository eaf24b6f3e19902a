//! Authenticated identity

use serde::{Deserialize, Serialize};

use crate::roles::{normalize_role, KnownRole};

/// Identity of a signed-in user.
///
/// Built by the credential gateway at login and rebuilt from the session token
/// on every request. A role change requires signing in again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Opaque subject identifier
    pub id: String,

    /// Credential identifier used at login
    pub document: String,

    /// Role as issued; compare through [`Identity::normalized_role`]
    pub role: String,
}

impl Identity {
    pub fn new(id: impl Into<String>, document: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            document: document.into(),
            role: role.into(),
        }
    }

    /// Lowercase role used for every authorization decision
    pub fn normalized_role(&self) -> String {
        normalize_role(&self.role)
    }

    /// Parsed role, when it belongs to the known vocabulary
    pub fn known_role(&self) -> Option<KnownRole> {
        self.role.parse().ok()
    }
}
