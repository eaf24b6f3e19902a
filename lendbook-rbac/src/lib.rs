//! Role-based access control for the Lendbook dashboard
//!
//! This crate turns the dashboard navigation into route permissions:
//! - Navigation sections keyed by role, with `startsWith` path matchers
//! - A declarative role elevation table (admin, superadmin and marketing inherit the manager)
//! - A path-prefix to allowed-roles map compiled once at startup
//! - Role landing paths for sign-in and the root route

pub mod aliases;
pub mod auth;
pub mod config;
pub mod error;
pub mod landing;
pub mod navigation;
pub mod permissions;
pub mod roles;

pub use aliases::RoleAliasTable;
pub use auth::Identity;
pub use config::{AccessPolicy, RbacConfig};
pub use error::{RbacError, RbacResult};
pub use landing::RoleLanding;
pub use navigation::{Matcher, MatcherKind, NavigationItem, NavigationModel, NavigationSection};
pub use permissions::{PermissionCompiler, PermissionMap};
pub use roles::{normalize_role, KnownRole, MANAGER_ROLE};
