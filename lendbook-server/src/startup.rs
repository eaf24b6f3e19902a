//! Server startup and shutdown logic

use anyhow::{Context, Result};
use axum::{middleware, Router};
use lendbook_config::LendbookConfig;
use lendbook_web::{authorize_middleware, request_id_middleware};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::routes;
use crate::state::AccessState;

/// Server application struct
pub struct Server {
    config: LendbookConfig,
    state: Arc<AccessState>,
}

impl Server {
    /// Initialize logging, then compile the access policy and resolve the gateway
    pub fn new(config: LendbookConfig) -> Result<Self> {
        lendbook_logging::init_logging_from_config(&config.logging)?;

        let state = Arc::new(AccessState::from_config(&config)?);
        Ok(Self { config, state })
    }

    pub fn state(&self) -> Arc<AccessState> {
        self.state.clone()
    }

    /// Build the complete application router
    pub fn build_app(&self) -> Router {
        build_app(self.state.clone(), &self.config)
    }

    /// Serve until Ctrl-C or SIGTERM
    pub async fn start(self) -> Result<()> {
        let app = self.build_app();
        let addr = self.config.server.listen_address();

        self.log_config_summary();

        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .with_context(|| format!("Failed to bind {}", addr))?;
        tracing::info!("Server listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }

    fn log_config_summary(&self) {
        let permissions = self.state.authorizer.permissions();
        tracing::info!("Environment: {}", self.config.server.environment);
        tracing::info!("Credential gateway: {}", self.state.gateway.name());
        tracing::info!("Protected prefixes: {}", permissions.len());
        for prefix in permissions.prefixes() {
            let roles = permissions
                .allowed_roles(prefix)
                .map(|roles| roles.iter().cloned().collect::<Vec<_>>().join(", "))
                .unwrap_or_default();
            tracing::debug!("  {} -> [{}]", prefix, roles);
        }
        tracing::info!("Session cookie: {}", self.state.authorizer.store().cookie_name());
        tracing::info!(
            "Request ID: {}",
            if self.config.server.enable_request_id { "Enabled" } else { "Disabled" }
        );
        tracing::info!(
            "Tracing: {}",
            if self.config.server.enable_tracing { "Enabled" } else { "Disabled" }
        );
    }
}

/// Routes wrapped in authorization, then tracing and request ids when enabled
pub fn build_app(state: Arc<AccessState>, config: &LendbookConfig) -> Router {
    let authorizer = state.authorizer.clone();

    let mut app = routes::router(state)
        .layer(middleware::from_fn_with_state(authorizer, authorize_middleware));

    if config.server.enable_tracing {
        app = app.layer(TraceLayer::new_for_http());
    }

    if config.server.enable_request_id {
        app = app.layer(middleware::from_fn(request_id_middleware));
    }

    app
}

/// Graceful shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown...");
}
