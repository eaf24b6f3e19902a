//! Role vocabulary of the back office

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Section key of the manager role. Elevated roles reuse its menu.
pub const MANAGER_ROLE: &str = "gerente";

/// Normalize a role string for comparison and storage.
pub fn normalize_role(role: &str) -> String {
    role.trim().to_lowercase()
}

/// Roles the dashboard knows about.
///
/// Role strings arrive from the credential service with mixed case; parsing is
/// case-insensitive and [`KnownRole::as_str`] always yields the lowercase form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KnownRole {
    Gerente,
    Admin,
    Superadmin,
    Agente,
    Agent,
    Marketing,
}

impl KnownRole {
    pub const ALL: [KnownRole; 6] = [
        KnownRole::Gerente,
        KnownRole::Admin,
        KnownRole::Superadmin,
        KnownRole::Agente,
        KnownRole::Agent,
        KnownRole::Marketing,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            KnownRole::Gerente => "gerente",
            KnownRole::Admin => "admin",
            KnownRole::Superadmin => "superadmin",
            KnownRole::Agente => "agente",
            KnownRole::Agent => "agent",
            KnownRole::Marketing => "marketing",
        }
    }

    /// Roles that inherit every path granted to the manager section.
    pub fn is_elevated(&self) -> bool {
        matches!(
            self,
            KnownRole::Admin | KnownRole::Superadmin | KnownRole::Marketing
        )
    }

    /// Check whether a raw role string names a known role
    pub fn is_known(role: &str) -> bool {
        role.parse::<KnownRole>().is_ok()
    }
}

impl fmt::Display for KnownRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for KnownRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_role(s).as_str() {
            "gerente" => Ok(KnownRole::Gerente),
            "admin" => Ok(KnownRole::Admin),
            "superadmin" => Ok(KnownRole::Superadmin),
            "agente" => Ok(KnownRole::Agente),
            "agent" => Ok(KnownRole::Agent),
            "marketing" => Ok(KnownRole::Marketing),
            _ => Err(format!("Unknown role: {}", s)),
        }
    }
}
