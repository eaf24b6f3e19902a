//! Navigation model of the dashboard
//!
//! Each section is keyed by the role that sees it. Items carrying a
//! `startsWith` matcher declare a protected path prefix; items without one are
//! only presented in the menu.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

use crate::error::{RbacError, RbacResult};
use crate::roles::normalize_role;

/// Kind of path matcher attached to a navigation item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatcherKind {
    #[serde(rename = "startsWith")]
    StartsWith,
    /// Any matcher type this build does not understand. Skipped by the compiler.
    #[serde(other)]
    Unknown,
}

/// Path matcher declaring that an item's subtree requires authorization
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Matcher {
    #[serde(rename = "type")]
    pub kind: MatcherKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
}

impl Matcher {
    pub fn starts_with(href: impl Into<String>) -> Self {
        Self {
            kind: MatcherKind::StartsWith,
            href: Some(href.into()),
        }
    }

    /// The protected prefix, if this matcher is usable
    pub fn prefix(&self) -> Option<&str> {
        match (self.kind, self.href.as_deref()) {
            (MatcherKind::StartsWith, Some(href)) if !href.is_empty() => Some(href),
            _ => None,
        }
    }
}

/// Entry of a navigation section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationItem {
    pub key: String,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matcher: Option<Matcher>,
    /// Nested entries when this item is a group header
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<NavigationItem>,
}

impl NavigationItem {
    /// Plain link, visible in the menu but not access-controlled
    pub fn link(key: impl Into<String>, title: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            title: title.into(),
            href: Some(href.into()),
            matcher: None,
            items: Vec::new(),
        }
    }

    /// Link whose whole subtree is protected by a `startsWith` matcher on its href
    pub fn protected(key: impl Into<String>, title: impl Into<String>, href: impl Into<String>) -> Self {
        let href = href.into();
        Self {
            key: key.into(),
            title: title.into(),
            matcher: Some(Matcher::starts_with(href.clone())),
            href: Some(href),
            items: Vec::new(),
        }
    }

    /// Group header holding nested items
    pub fn group(key: impl Into<String>, title: impl Into<String>, items: Vec<NavigationItem>) -> Self {
        Self {
            key: key.into(),
            title: title.into(),
            href: None,
            matcher: None,
            items,
        }
    }

    pub fn with_matcher(mut self, matcher: Matcher) -> Self {
        self.matcher = Some(matcher);
        self
    }

    pub fn is_group(&self) -> bool {
        !self.items.is_empty()
    }

    /// Protected prefix declared by this item
    pub fn protected_prefix(&self) -> Option<&str> {
        self.matcher.as_ref().and_then(Matcher::prefix)
    }

    /// Visit this item and its nested items, depth first
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a NavigationItem)) {
        visit(self);
        for child in &self.items {
            child.walk(visit);
        }
    }
}

/// Navigation section shown to one role
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationSection {
    /// Role identifier, compared lowercase
    pub key: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub items: Vec<NavigationItem>,
}

impl NavigationSection {
    pub fn new(key: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            title: title.into(),
            items: Vec::new(),
        }
    }

    pub fn item(mut self, item: NavigationItem) -> Self {
        self.items.push(item);
        self
    }

    pub fn role(&self) -> String {
        normalize_role(&self.key)
    }

    /// All protected prefixes declared anywhere in this section, in declaration order
    pub fn protected_prefixes(&self) -> Vec<&str> {
        let mut prefixes = Vec::new();
        for item in &self.items {
            item.walk(&mut |it| {
                if let Some(prefix) = it.protected_prefix() {
                    prefixes.push(prefix);
                }
            });
        }
        prefixes
    }
}

/// Ordered list of navigation sections
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NavigationModel {
    sections: Vec<NavigationSection>,
}

impl NavigationModel {
    pub fn new(sections: Vec<NavigationSection>) -> Self {
        Self { sections }
    }

    pub fn sections(&self) -> &[NavigationSection] {
        &self.sections
    }

    pub fn first_section(&self) -> Option<&NavigationSection> {
        self.sections.first()
    }

    /// Look up a section by role key, case-insensitively
    pub fn section(&self, role: &str) -> Option<&NavigationSection> {
        let role = normalize_role(role);
        self.sections.iter().find(|section| section.role() == role)
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Check key uniqueness for sections and for items within each section
    pub fn validate(&self) -> RbacResult<()> {
        let mut section_keys = HashSet::new();
        for section in &self.sections {
            if !section_keys.insert(section.role()) {
                return Err(RbacError::DuplicateSection {
                    key: section.key.clone(),
                });
            }

            let mut item_keys = HashSet::new();
            let mut duplicate = None;
            for item in &section.items {
                item.walk(&mut |it| {
                    if !item_keys.insert(it.key.as_str()) && duplicate.is_none() {
                        duplicate = Some(it.key.clone());
                    }
                });
            }
            if let Some(item) = duplicate {
                return Err(RbacError::DuplicateItem {
                    section: section.key.clone(),
                    item,
                });
            }
        }
        Ok(())
    }

    /// Parse a navigation model from YAML (a list of sections) and validate it
    pub fn from_yaml_str(yaml: &str) -> RbacResult<Self> {
        let model: NavigationModel = serde_yaml::from_str(yaml)?;
        model.validate()?;
        Ok(model)
    }

    /// Load a navigation model from a YAML or JSON file
    pub fn from_file(path: impl AsRef<Path>) -> RbacResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let model: NavigationModel = if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::from_str(&content)?
        } else {
            serde_yaml::from_str(&content)?
        };
        model.validate()?;
        Ok(model)
    }

    /// Navigation of the loan back office dashboard
    pub fn dashboard() -> Self {
        Self::new(vec![
            NavigationSection::new("gerente", "Gerencia")
                .item(NavigationItem::protected("requests", "Solicitudes", "/dashboard/requests"))
                .item(NavigationItem::protected("customers", "Clientes", "/dashboard/customers"))
                .item(NavigationItem::protected("chat", "Chat", "/dashboard/chat"))
                .item(NavigationItem::protected("reports", "Reportes", "/dashboard/reports"))
                .item(NavigationItem::protected("payments", "Pagos", "/dashboard/payments"))
                .item(NavigationItem::group(
                    "settings",
                    "Configuración",
                    vec![
                        NavigationItem::protected("users", "Usuarios", "/dashboard/settings/users"),
                        NavigationItem::protected("cash-flow", "Flujo de caja", "/dashboard/settings/cash-flow"),
                    ],
                )),
            NavigationSection::new("agente", "Agente")
                .item(NavigationItem::protected("agent-requests", "Solicitudes", "/dashboard/agent/requests"))
                .item(NavigationItem::protected("agent-customers", "Clientes", "/dashboard/agent/customers"))
                .item(NavigationItem::protected("agent-chat", "Chat", "/dashboard/chat")),
        ])
    }
}

impl Default for NavigationModel {
    fn default() -> Self {
        Self::dashboard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dashboard_navigation_is_valid() {
        let model = NavigationModel::dashboard();
        assert!(model.validate().is_ok());
        assert_eq!(model.first_section().unwrap().key, "gerente");
        assert!(model.section("AGENTE").is_some());
    }

    #[test]
    fn test_protected_prefixes_include_nested_items() {
        let model = NavigationModel::dashboard();
        let prefixes = model.section("gerente").unwrap().protected_prefixes();
        assert!(prefixes.contains(&"/dashboard/requests"));
        assert!(prefixes.contains(&"/dashboard/settings/users"));
    }

    #[test]
    fn test_duplicate_section_rejected() {
        let model = NavigationModel::new(vec![
            NavigationSection::new("gerente", "A"),
            NavigationSection::new("Gerente", "B"),
        ]);
        assert!(matches!(
            model.validate(),
            Err(RbacError::DuplicateSection { .. })
        ));
    }

    #[test]
    fn test_duplicate_item_rejected() {
        let model = NavigationModel::new(vec![NavigationSection::new("agente", "Agente")
            .item(NavigationItem::link("home", "Inicio", "/dashboard"))
            .item(NavigationItem::group(
                "more",
                "Más",
                vec![NavigationItem::link("home", "Inicio", "/dashboard/home")],
            ))]);
        assert!(matches!(
            model.validate(),
            Err(RbacError::DuplicateItem { .. })
        ));
    }

    #[test]
    fn test_yaml_parsing_and_lenient_matchers() {
        let yaml = r#"
- key: GERENTE
  title: Gerencia
  items:
    - key: requests
      href: /dashboard/requests
      matcher:
        type: startsWith
        href: /dashboard/requests
    - key: broken
      href: /dashboard/broken
      matcher:
        type: startsWith
    - key: regex
      href: /dashboard/regex
      matcher:
        type: regex
        href: /dashboard/re.*
    - key: privacy
      href: /privacy
"#;
        let model = NavigationModel::from_yaml_str(yaml).unwrap();
        let section = model.section("gerente").unwrap();
        assert_eq!(section.items.len(), 4);
        assert_eq!(section.items[2].matcher.as_ref().unwrap().kind, MatcherKind::Unknown);
        assert_eq!(section.protected_prefixes(), vec!["/dashboard/requests"]);
    }
}
