//! Declarative role elevation table
//!
//! An entry `inheritor -> [parent, ...]` grants the inheritor every path
//! prefix granted to each parent section. Inheritance is transitive.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashSet};

use crate::error::{RbacError, RbacResult};
use crate::roles::{normalize_role, KnownRole, MANAGER_ROLE};

/// Role alias table keyed by the inheriting role
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<String, Vec<String>>", into = "BTreeMap<String, Vec<String>>")]
pub struct RoleAliasTable {
    inherits_from: BTreeMap<String, Vec<String>>,
}

impl RoleAliasTable {
    /// Empty table: every role only sees its own section
    pub fn empty() -> Self {
        Self {
            inherits_from: BTreeMap::new(),
        }
    }

    /// Add an inheritance edge. Duplicate edges are ignored.
    pub fn with_alias(mut self, inheritor: &str, parent: &str) -> Self {
        self.add_alias(inheritor, parent);
        self
    }

    pub fn add_alias(&mut self, inheritor: &str, parent: &str) {
        let parents = self
            .inherits_from
            .entry(normalize_role(inheritor))
            .or_default();
        let parent = normalize_role(parent);
        if !parents.contains(&parent) {
            parents.push(parent);
        }
    }

    /// Direct parents of a role
    pub fn parents(&self, role: &str) -> &[String] {
        self.inherits_from
            .get(&normalize_role(role))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.inherits_from.is_empty()
    }

    /// Every role the given role inherits from, directly or transitively
    pub fn ancestors(&self, role: &str) -> BTreeSet<String> {
        let mut found = BTreeSet::new();
        let mut pending: Vec<String> = self.parents(role).to_vec();
        while let Some(parent) = pending.pop() {
            if found.insert(parent.clone()) {
                pending.extend(self.parents(&parent).iter().cloned());
            }
        }
        found
    }

    /// The role itself plus every role that inherits from it
    pub fn admitted_roles(&self, role: &str) -> BTreeSet<String> {
        let role = normalize_role(role);
        let mut admitted: BTreeSet<String> = self
            .inherits_from
            .keys()
            .filter(|inheritor| self.ancestors(inheritor).contains(&role))
            .cloned()
            .collect();
        admitted.insert(role);
        admitted
    }

    /// Section a role borrows its menu and landing from.
    ///
    /// Follows the first parent of each entry until a role with no parent is
    /// reached. Roles without an entry map onto themselves.
    pub fn canonical_role(&self, role: &str) -> String {
        let mut current = normalize_role(role);
        let mut seen = HashSet::new();
        while let Some(parent) = self.parents(&current).first() {
            if !seen.insert(current.clone()) {
                break;
            }
            current = parent.clone();
        }
        current
    }

    /// Reject inheritance cycles
    pub fn validate(&self) -> RbacResult<()> {
        let mut visited = HashSet::new();
        for role in self.inherits_from.keys() {
            let mut stack = Vec::new();
            self.check_cycle(role, &mut visited, &mut stack)?;
        }
        Ok(())
    }

    fn check_cycle(
        &self,
        current_role: &str,
        visited: &mut HashSet<String>,
        stack: &mut Vec<String>,
    ) -> RbacResult<()> {
        if stack.iter().any(|r| r == current_role) {
            return Err(RbacError::CircularInheritance {
                role_name: current_role.to_string(),
            });
        }

        if visited.contains(current_role) {
            return Ok(());
        }

        visited.insert(current_role.to_string());
        stack.push(current_role.to_string());

        for parent in self.parents(current_role) {
            self.check_cycle(parent, visited, stack)?;
        }

        stack.pop();
        Ok(())
    }
}

impl Default for RoleAliasTable {
    /// admin, superadmin and marketing inherit the manager section
    fn default() -> Self {
        KnownRole::ALL
            .iter()
            .filter(|role| role.is_elevated())
            .fold(Self::empty(), |table, role| {
                table.with_alias(role.as_str(), MANAGER_ROLE)
            })
    }
}

impl From<BTreeMap<String, Vec<String>>> for RoleAliasTable {
    fn from(raw: BTreeMap<String, Vec<String>>) -> Self {
        let mut table = Self::empty();
        for (inheritor, parents) in raw {
            for parent in parents {
                table.add_alias(&inheritor, &parent);
            }
        }
        table
    }
}

impl From<RoleAliasTable> for BTreeMap<String, Vec<String>> {
    fn from(table: RoleAliasTable) -> Self {
        table.inherits_from
    }
}
