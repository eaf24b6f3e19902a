//! Read-only state shared by every request

use anyhow::{Context, Result};
use lendbook_config::{AccessConfig, LendbookConfig};
use lendbook_http::AuthGateway;
use lendbook_rbac::{NavigationModel, RbacConfig, RbacResult, RoleAliasTable, RoleLanding};
use lendbook_web::RequestAuthorizer;
use std::sync::Arc;

use crate::provider::build_gateway;

/// Compiled access policy plus the session and gateway collaborators
pub struct AccessState {
    pub authorizer: Arc<RequestAuthorizer>,
    pub landing: RoleLanding,
    pub gateway: Arc<dyn AuthGateway>,
}

impl AccessState {
    pub fn from_config(config: &LendbookConfig) -> Result<Self> {
        let gateway = build_gateway(&config.gateway).context("Failed to set up credential gateway")?;
        Self::with_gateway(config, gateway)
    }

    /// Same as [`AccessState::from_config`] with an explicit gateway
    pub fn with_gateway(config: &LendbookConfig, gateway: Arc<dyn AuthGateway>) -> Result<Self> {
        let policy = rbac_config(&config.access)
            .and_then(|rbac| rbac.build_policy())
            .context("Failed to build access policy")?;

        Ok(Self {
            authorizer: Arc::new(RequestAuthorizer::from_config(policy.permissions, config)),
            landing: policy.landing,
            gateway,
        })
    }

    /// Landing path for a role
    pub fn landing_for(&self, role: &str) -> String {
        self.landing.first_path_for(role)
    }
}

/// Navigation, aliases and default path from the access configuration
pub fn rbac_config(access: &AccessConfig) -> RbacResult<RbacConfig> {
    let mut rbac = RbacConfig {
        default_path: access.default_path.clone(),
        ..RbacConfig::default()
    };

    if let Some(ref navigation) = access.navigation {
        rbac.navigation = serde_json::from_value::<NavigationModel>(navigation.clone())?;
    } else if let Some(ref path) = access.navigation_file {
        rbac = rbac.with_navigation_file(path)?;
    }

    if let Some(ref aliases) = access.aliases {
        rbac.aliases = RoleAliasTable::from(aliases.clone());
    }

    Ok(rbac)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::BTreeMap;

    #[test]
    fn test_defaults_use_dashboard_navigation() {
        let rbac = rbac_config(&AccessConfig::default()).unwrap();
        assert_eq!(rbac.navigation, NavigationModel::dashboard());
    }

    #[test]
    fn test_inline_navigation_and_aliases() {
        let access = AccessConfig {
            navigation: Some(json!([
                {
                    "key": "cobrador",
                    "title": "Cobranzas",
                    "items": [{
                        "key": "collections",
                        "title": "Collections",
                        "href": "/dashboard/collections",
                        "matcher": { "type": "startsWith", "href": "/dashboard/collections" }
                    }]
                }
            ])),
            aliases: Some(BTreeMap::from([(
                "supervisor".to_string(),
                vec!["cobrador".to_string()],
            )])),
            ..AccessConfig::default()
        };

        let policy = rbac_config(&access).unwrap().build_policy().unwrap();
        assert!(policy.permissions.permits("/dashboard/collections/1", "SUPERVISOR"));
        assert!(!policy.permissions.permits("/dashboard/collections/1", "gerente"));
        assert_eq!(policy.landing.first_path_for("supervisor"), "/dashboard/collections");
    }

    #[test]
    fn test_missing_navigation_file_fails() {
        let access = AccessConfig {
            navigation_file: Some("/nonexistent/navigation.yaml".into()),
            ..AccessConfig::default()
        };
        assert!(rbac_config(&access).is_err());
    }
}
