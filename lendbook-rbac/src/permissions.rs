//! Path-prefix permission map and the compiler that derives it from navigation

use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

use crate::aliases::RoleAliasTable;
use crate::navigation::NavigationModel;
use crate::roles::normalize_role;

/// Mapping from protected path prefix to the lowercase roles allowed under it.
///
/// Built once at startup and never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PermissionMap {
    grants: BTreeMap<String, BTreeSet<String>>,
}

impl PermissionMap {
    /// Roles allowed under an exact prefix key
    pub fn allowed_roles(&self, prefix: &str) -> Option<&BTreeSet<String>> {
        self.grants.get(prefix)
    }

    pub fn prefixes(&self) -> impl Iterator<Item = &str> {
        self.grants.keys().map(String::as_str)
    }

    /// Every `(prefix, roles)` entry whose prefix the path starts with
    pub fn matching<'a>(
        &'a self,
        path: &'a str,
    ) -> impl Iterator<Item = (&'a str, &'a BTreeSet<String>)> + 'a {
        self.grants
            .iter()
            .filter(move |(prefix, _)| path.starts_with(prefix.as_str()))
            .map(|(prefix, roles)| (prefix.as_str(), roles))
    }

    /// Whether any prefix protects this path
    pub fn is_protected(&self, path: &str) -> bool {
        self.matching(path).next().is_some()
    }

    /// Whether a role may open a path.
    ///
    /// Every matching prefix must admit the role. Paths under no prefix are open.
    pub fn permits(&self, path: &str, role: &str) -> bool {
        let role = normalize_role(role);
        self.matching(path).all(|(_, roles)| roles.contains(&role))
    }

    /// First matching prefix that does not admit the role
    pub fn first_denial<'a>(&'a self, path: &'a str, role: &str) -> Option<&'a str> {
        let role = normalize_role(role);
        self.matching(path)
            .find(|(_, roles)| !roles.contains(&role))
            .map(|(prefix, _)| prefix)
    }

    pub fn len(&self) -> usize {
        self.grants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.grants.is_empty()
    }

    fn grant(&mut self, prefix: &str, roles: &BTreeSet<String>) {
        self.grants
            .entry(prefix.to_string())
            .or_default()
            .extend(roles.iter().cloned());
    }
}

/// Derives a [`PermissionMap`] from a [`NavigationModel`]
#[derive(Debug, Clone, Default)]
pub struct PermissionCompiler {
    aliases: RoleAliasTable,
}

impl PermissionCompiler {
    pub fn new(aliases: RoleAliasTable) -> Self {
        Self { aliases }
    }

    pub fn aliases(&self) -> &RoleAliasTable {
        &self.aliases
    }

    /// Compile the navigation model.
    ///
    /// Sections contributing to the same prefix accumulate their roles.
    /// Matchers without an href, or of an unknown type, are skipped.
    pub fn compile(&self, model: &NavigationModel) -> PermissionMap {
        let mut map = PermissionMap::default();

        for section in model.sections() {
            let admitted = self.aliases.admitted_roles(&section.key);
            let prefixes = section.protected_prefixes();
            if prefixes.is_empty() {
                debug!("Navigation section '{}' declares no protected prefixes", section.key);
                continue;
            }
            for prefix in prefixes {
                map.grant(prefix, &admitted);
            }
        }

        debug!("Compiled permission map with {} protected prefixes", map.len());
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigation::{Matcher, MatcherKind, NavigationItem, NavigationSection};

    fn roles(list: &[&str]) -> BTreeSet<String> {
        list.iter().map(|r| r.to_string()).collect()
    }

    fn requests_model() -> NavigationModel {
        NavigationModel::new(vec![NavigationSection::new("gerente", "Gerencia").item(
            NavigationItem::protected("requests", "Solicitudes", "/dashboard/requests"),
        )])
    }

    #[test]
    fn test_manager_section_grants_elevated_roles() {
        let map = PermissionCompiler::default().compile(&requests_model());
        assert_eq!(map.len(), 1);
        assert_eq!(
            map.allowed_roles("/dashboard/requests"),
            Some(&roles(&["gerente", "admin", "superadmin", "marketing"]))
        );
    }

    #[test]
    fn test_compilation_is_idempotent() {
        let compiler = PermissionCompiler::default();
        let model = NavigationModel::dashboard();
        assert_eq!(compiler.compile(&model), compiler.compile(&model));
    }

    #[test]
    fn test_elevation_closure() {
        let map = PermissionCompiler::default().compile(&NavigationModel::dashboard());
        for prefix in NavigationModel::dashboard()
            .section("gerente")
            .unwrap()
            .protected_prefixes()
        {
            let allowed = map.allowed_roles(prefix).unwrap();
            for role in ["gerente", "admin", "superadmin", "marketing"] {
                assert!(allowed.contains(role), "{} missing on {}", role, prefix);
            }
        }
    }

    #[test]
    fn test_shared_prefix_accumulates_roles() {
        let map = PermissionCompiler::default().compile(&NavigationModel::dashboard());
        let chat = map.allowed_roles("/dashboard/chat").unwrap();
        assert!(chat.contains("gerente"));
        assert!(chat.contains("agente"));
        assert!(chat.contains("admin"));
    }

    #[test]
    fn test_malformed_matchers_are_skipped() {
        let model = NavigationModel::new(vec![
            NavigationSection::new("agente", "Agente")
                .item(NavigationItem::link("a", "A", "/a").with_matcher(Matcher {
                    kind: MatcherKind::StartsWith,
                    href: None,
                }))
                .item(NavigationItem::link("b", "B", "/b").with_matcher(Matcher {
                    kind: MatcherKind::Unknown,
                    href: Some("/b".to_string()),
                })),
            NavigationSection::new("gerente", "Gerencia")
                .item(NavigationItem::link("privacy", "Privacidad", "/privacy")),
        ]);
        assert!(PermissionCompiler::default().compile(&model).is_empty());
    }

    #[test]
    fn test_every_role_set_contains_section_role() {
        let model = NavigationModel::dashboard();
        let map = PermissionCompiler::default().compile(&model);
        for section in model.sections() {
            for prefix in section.protected_prefixes() {
                assert!(map.allowed_roles(prefix).unwrap().contains(&section.role()));
            }
        }
    }

    #[test]
    fn test_permits_requires_every_matching_prefix() {
        let model = NavigationModel::new(vec![
            NavigationSection::new("agente", "Agente")
                .item(NavigationItem::protected("dash", "Panel", "/dashboard")),
            NavigationSection::new("gerente", "Gerencia")
                .item(NavigationItem::protected("dash", "Panel", "/dashboard"))
                .item(NavigationItem::protected("requests", "Solicitudes", "/dashboard/requests")),
        ]);
        let map = PermissionCompiler::default().compile(&model);

        assert!(map.permits("/dashboard", "agente"));
        assert!(!map.permits("/dashboard/requests/7", "agente"));
        assert_eq!(
            map.first_denial("/dashboard/requests/7", "agente"),
            Some("/dashboard/requests")
        );
        assert!(map.permits("/dashboard/requests/7", "Admin"));
        assert!(map.permits("/privacy", "anyone"));
        assert!(!map.is_protected("/privacy"));
    }

    #[test]
    fn test_custom_alias_table() {
        let compiler = PermissionCompiler::new(RoleAliasTable::empty().with_alias("auditor", "agente"));
        let map = compiler.compile(&NavigationModel::dashboard());
        assert!(map.permits("/dashboard/agent/requests", "auditor"));
        assert!(!map.permits("/dashboard/requests", "admin"));
    }
}
