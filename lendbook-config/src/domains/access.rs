//! Route access configuration: navigation source, role aliases and redirect targets

use crate::error::ConfigResult;
use crate::validation::{validate_site_path, Validatable};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Access configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AccessConfig {
    /// Inline navigation sections, in the same shape as a navigation file
    #[serde(skip_serializing_if = "Option::is_none")]
    pub navigation: Option<serde_json::Value>,

    /// YAML or JSON navigation file. The built-in dashboard navigation is used when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub navigation_file: Option<PathBuf>,

    /// Role elevation table (`inheritor: [parent, ...]`). Built-in table when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aliases: Option<BTreeMap<String, Vec<String>>>,

    /// Where anonymous callers of protected paths are sent
    #[serde(default = "default_sign_in_path")]
    pub sign_in_path: String,

    /// Where signed-in callers lacking the role are sent
    #[serde(default = "default_not_authorized_path")]
    pub not_authorized_path: String,

    /// Landing path when the navigation offers nothing navigable
    #[serde(default = "default_path")]
    pub default_path: String,
}

impl Default for AccessConfig {
    fn default() -> Self {
        Self {
            navigation: None,
            navigation_file: None,
            aliases: None,
            sign_in_path: default_sign_in_path(),
            not_authorized_path: default_not_authorized_path(),
            default_path: default_path(),
        }
    }
}

impl Validatable for AccessConfig {
    fn validate(&self) -> ConfigResult<()> {
        validate_site_path(&self.sign_in_path, "sign_in_path", self.domain_name())?;
        validate_site_path(&self.not_authorized_path, "not_authorized_path", self.domain_name())?;
        validate_site_path(&self.default_path, "default_path", self.domain_name())?;

        if self.sign_in_path == self.not_authorized_path {
            return Err(self.validation_error("sign_in_path and not_authorized_path must differ"));
        }

        if self.navigation.is_some() && self.navigation_file.is_some() {
            return Err(self.validation_error("set either navigation or navigation_file, not both"));
        }

        if let Some(ref path) = self.navigation_file {
            if path.as_os_str().is_empty() {
                return Err(self.validation_error("navigation_file cannot be empty"));
            }
        }

        Ok(())
    }

    fn domain_name(&self) -> &'static str {
        "access"
    }
}

fn default_sign_in_path() -> String {
    "/auth/sign-in".to_string()
}

fn default_not_authorized_path() -> String {
    "/not-authorized".to_string()
}

fn default_path() -> String {
    "/".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        let config = AccessConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.sign_in_path, "/auth/sign-in");
        assert_eq!(config.not_authorized_path, "/not-authorized");
    }

    #[test]
    fn test_redirect_targets_must_differ() {
        let config = AccessConfig {
            not_authorized_path: "/auth/sign-in".to_string(),
            ..AccessConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_inline_navigation_excludes_file() {
        let config = AccessConfig {
            navigation: Some(serde_json::json!([])),
            navigation_file: Some(PathBuf::from("navigation.yaml")),
            ..AccessConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
