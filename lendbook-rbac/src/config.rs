//! Configuration for the RBAC system

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{info, warn};

use crate::aliases::RoleAliasTable;
use crate::error::{RbacError, RbacResult};
use crate::landing::{RoleLanding, DEFAULT_ROOT_PATH};
use crate::navigation::NavigationModel;
use crate::permissions::{PermissionCompiler, PermissionMap};
use crate::roles::KnownRole;

/// RBAC configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RbacConfig {
    /// Dashboard navigation, one section per role
    pub navigation: NavigationModel,

    /// Role elevation table
    pub aliases: RoleAliasTable,

    /// Landing path when nothing is navigable
    pub default_path: String,
}

impl Default for RbacConfig {
    fn default() -> Self {
        Self {
            navigation: NavigationModel::dashboard(),
            aliases: RoleAliasTable::default(),
            default_path: DEFAULT_ROOT_PATH.to_string(),
        }
    }
}

impl RbacConfig {
    /// Replace the navigation with one loaded from a file
    pub fn with_navigation_file(mut self, path: impl AsRef<Path>) -> RbacResult<Self> {
        self.navigation = NavigationModel::from_file(path)?;
        Ok(self)
    }

    pub fn validate(&self) -> RbacResult<()> {
        self.navigation.validate()?;
        self.aliases.validate()?;

        if !self.default_path.starts_with('/') {
            return Err(RbacError::invalid_config(format!(
                "default_path must be absolute, got '{}'",
                self.default_path
            )));
        }

        for section in self.navigation.sections() {
            if !KnownRole::is_known(&section.key) {
                warn!("Navigation section '{}' is not a known role", section.key);
            }
        }

        Ok(())
    }

    /// Validate and compile into the read-only policy shared by every request
    pub fn build_policy(&self) -> RbacResult<AccessPolicy> {
        self.validate()?;

        let permissions = PermissionCompiler::new(self.aliases.clone()).compile(&self.navigation);
        let landing = RoleLanding::new(self.navigation.clone(), self.aliases.clone())
            .with_default_path(self.default_path.clone());

        info!(
            "Access policy ready: {} sections, {} protected prefixes",
            self.navigation.sections().len(),
            permissions.len()
        );

        Ok(AccessPolicy {
            permissions,
            landing,
        })
    }
}

/// Compiled permissions plus landing rules
#[derive(Debug, Clone)]
pub struct AccessPolicy {
    pub permissions: PermissionMap,
    pub landing: RoleLanding,
}
