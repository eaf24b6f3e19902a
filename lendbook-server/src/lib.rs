//! Lendbook dashboard server
//!
//! Serves the sign-in flow and the role-aware root route, and puts every
//! dashboard path behind the navigation-derived permission map.

pub mod provider;
pub mod routes;
pub mod startup;
pub mod state;

pub use provider::build_gateway;
pub use startup::{build_app, Server};
pub use state::{rbac_config, AccessState};
