//! First navigation target of a role

use tracing::debug;

use crate::aliases::RoleAliasTable;
use crate::navigation::{NavigationItem, NavigationModel, NavigationSection};

/// Path used when a navigation model offers nothing navigable
pub const DEFAULT_ROOT_PATH: &str = "/";

/// Computes where a role lands after sign-in and at `/`
#[derive(Debug, Clone)]
pub struct RoleLanding {
    model: NavigationModel,
    aliases: RoleAliasTable,
    default_path: String,
}

impl RoleLanding {
    pub fn new(model: NavigationModel, aliases: RoleAliasTable) -> Self {
        Self {
            model,
            aliases,
            default_path: DEFAULT_ROOT_PATH.to_string(),
        }
    }

    pub fn with_default_path(mut self, default_path: impl Into<String>) -> Self {
        self.default_path = default_path.into();
        self
    }

    pub fn default_path(&self) -> &str {
        &self.default_path
    }

    /// First path reachable by a role.
    ///
    /// Elevated roles land on the section they inherit from. Roles with no
    /// section fall back to the first declared section.
    pub fn first_path_for(&self, role: &str) -> String {
        let canonical = self.aliases.canonical_role(role);
        let section = match self.model.section(&canonical) {
            Some(section) => Some(section),
            None => {
                debug!("No navigation section for role '{}', using first section", role);
                self.model.first_section()
            }
        };

        section
            .and_then(first_href)
            .unwrap_or(self.default_path.as_str())
            .to_string()
    }
}

/// First navigable href in declaration order. Groups contribute their first
/// child; empty headers are skipped.
fn first_href(section: &NavigationSection) -> Option<&str> {
    section.items.iter().find_map(item_href)
}

fn item_href(item: &NavigationItem) -> Option<&str> {
    item.items
        .iter()
        .find_map(|nested| nested.href.as_deref())
        .or(item.href.as_deref())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn landing() -> RoleLanding {
        RoleLanding::new(NavigationModel::dashboard(), RoleAliasTable::default())
    }

    #[test]
    fn test_elevated_roles_land_like_manager() {
        let landing = landing();
        let manager = landing.first_path_for("gerente");
        assert_eq!(manager, "/dashboard/requests");
        assert_eq!(landing.first_path_for("SUPERADMIN"), manager);
        assert_eq!(landing.first_path_for("Admin"), manager);
        assert_eq!(landing.first_path_for("marketing"), manager);
    }

    #[test]
    fn test_agent_lands_on_own_section() {
        assert_eq!(landing().first_path_for("AGENTE"), "/dashboard/agent/requests");
    }

    #[test]
    fn test_unknown_role_falls_back_to_first_section() {
        assert_eq!(landing().first_path_for("unknown-role"), "/dashboard/requests");
    }

    #[test]
    fn test_group_header_descends_one_level() {
        let model = NavigationModel::new(vec![NavigationSection::new("agente", "Agente").item(
            NavigationItem::group(
                "work",
                "Trabajo",
                vec![NavigationItem::link("inbox", "Bandeja", "/dashboard/inbox")],
            ),
        )]);
        let landing = RoleLanding::new(model, RoleAliasTable::empty());
        assert_eq!(landing.first_path_for("agente"), "/dashboard/inbox");
    }

    #[test]
    fn test_empty_header_is_skipped() {
        let model = NavigationModel::new(vec![NavigationSection::new("agente", "Agente")
            .item(NavigationItem::group("hdr", "Encabezado", vec![]))
            .item(NavigationItem::link("inbox", "Bandeja", "/dashboard/inbox"))]);
        let landing = RoleLanding::new(model, RoleAliasTable::empty());
        assert_eq!(landing.first_path_for("agente"), "/dashboard/inbox");
    }

    #[test]
    fn test_nothing_navigable_uses_default_path() {
        let empty = RoleLanding::new(NavigationModel::new(vec![]), RoleAliasTable::default());
        assert_eq!(empty.first_path_for("gerente"), DEFAULT_ROOT_PATH);

        let headers_only = RoleLanding::new(
            NavigationModel::new(vec![NavigationSection::new("agente", "Agente")
                .item(NavigationItem::group("empty", "Vacío", vec![]))]),
            RoleAliasTable::empty(),
        )
        .with_default_path("/home");
        assert_eq!(headers_only.first_path_for("agente"), "/home");
    }
}
