//! # Lendbook Web
//!
//! Axum building blocks for the access-controlled dashboard:
//!
//! - **Session**: signed session tokens and the `access_token` cookie
//! - **Middleware**: route authorization against the permission map, request ids
//! - **Errors**: JSON error responses
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use axum::{middleware, routing::get, Router};
//! use lendbook_config::LendbookConfig;
//! use lendbook_rbac::RbacConfig;
//! use lendbook_web::middleware::{authorize_middleware, request_id_middleware, RequestAuthorizer};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = LendbookConfig::default();
//! let policy = RbacConfig::default().build_policy()?;
//! let authorizer = Arc::new(RequestAuthorizer::from_config(policy.permissions, &config));
//!
//! let app: Router = Router::new()
//!     .route("/dashboard/requests", get(|| async { "requests" }))
//!     .layer(middleware::from_fn_with_state(authorizer, authorize_middleware))
//!     .layer(middleware::from_fn(request_id_middleware));
//! # Ok(())
//! # }
//! ```

pub mod errors;
pub mod middleware;
pub mod session;

pub use errors::{WebError, WebResult};
pub use middleware::{
    authorize_middleware, normalize_path, request_id_middleware, AuthorizationDecision, CurrentUser, Redirect,
    RedirectPaths, RequestAuthorizer, RequestContext, RequestId,
};
pub use session::{CookieJar, DecodeError, SessionCodec, SessionError, SessionStore};
