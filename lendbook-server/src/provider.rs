//! Credential gateway selection

use lendbook_config::{AuthProviderKind, GatewayConfig};
use lendbook_http::{AuthGateway, GatewayError, RemoteAuthGateway, StaticAuthGateway};
use std::sync::Arc;
use tracing::{info, warn};

/// Build the configured gateway. Resolved once at startup and shared by every sign-in.
pub fn build_gateway(config: &GatewayConfig) -> Result<Arc<dyn AuthGateway>, GatewayError> {
    match config.provider {
        AuthProviderKind::Remote => {
            let gateway = RemoteAuthGateway::new(config)?;
            info!("Signing in against {}", gateway.login_url());
            Ok(Arc::new(gateway))
        }
        AuthProviderKind::Static => {
            if config.static_users.is_empty() {
                return Err(GatewayError::ConfigError(
                    "static provider requires at least one user".to_string(),
                ));
            }
            warn!(
                "Signing in against {} static users; not for production",
                config.static_users.len()
            );
            Ok(Arc::new(StaticAuthGateway::new(config.static_users.clone())))
        }
    }
}
