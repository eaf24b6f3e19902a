//! Route authorization
//!
//! Every request is checked against the compiled permission map before it
//! reaches a handler. Denials are redirects, never errors.

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{request::Parts, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Redirect as HttpRedirect, Response},
};
use lendbook_config::{AccessConfig, LendbookConfig};
use lendbook_rbac::{Identity, PermissionMap};
use std::convert::Infallible;
use std::sync::Arc;
use tracing::{debug, info};

use crate::session::{CookieJar, SessionCodec, SessionStore};

/// What the authorizer needs to know about a request
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// Request path after [`normalize_path`]
    pub path: String,
    pub cookies: CookieJar,
}

impl RequestContext {
    pub fn new(path: impl AsRef<str>, cookies: CookieJar) -> Self {
        Self {
            path: normalize_path(path.as_ref()),
            cookies,
        }
    }

    pub fn from_headers(path: impl AsRef<str>, headers: &HeaderMap) -> Self {
        Self::new(path, CookieJar::from_headers(headers))
    }
}

/// Canonical form of a request path for prefix matching.
///
/// Percent-escapes are decoded once, repeated slashes collapse, `.` segments
/// drop and `..` removes its parent. A trailing slash is kept.
pub fn normalize_path(raw: &str) -> String {
    let bytes = urlencoding::decode_binary(raw.as_bytes());
    let decoded = String::from_utf8_lossy(&bytes);

    let mut segments: Vec<&str> = Vec::new();
    for segment in decoded.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            segment => segments.push(segment),
        }
    }

    let mut path = format!("/{}", segments.join("/"));
    if !segments.is_empty() && decoded.ends_with('/') {
        path.push('/');
    }
    path
}

/// Where a denied request is sent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Redirect {
    SignIn,
    NotAuthorized,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthorizationDecision {
    Allow { identity: Option<Identity> },
    RedirectTo(Redirect),
}

impl AuthorizationDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, AuthorizationDecision::Allow { .. })
    }
}

/// Redirect target paths
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectPaths {
    pub sign_in: String,
    pub not_authorized: String,
}

impl Default for RedirectPaths {
    fn default() -> Self {
        Self::from(&AccessConfig::default())
    }
}

impl From<&AccessConfig> for RedirectPaths {
    fn from(config: &AccessConfig) -> Self {
        Self {
            sign_in: config.sign_in_path.clone(),
            not_authorized: config.not_authorized_path.clone(),
        }
    }
}

impl RedirectPaths {
    pub fn path(&self, redirect: Redirect) -> &str {
        match redirect {
            Redirect::SignIn => &self.sign_in,
            Redirect::NotAuthorized => &self.not_authorized,
        }
    }

    /// Redirect targets are always reachable
    fn is_target(&self, path: &str) -> bool {
        let path = match path.trim_end_matches('/') {
            "" => "/",
            trimmed => trimmed,
        };
        path == self.sign_in || path == self.not_authorized
    }
}

/// Decides, per request, whether the caller may open the path
#[derive(Debug)]
pub struct RequestAuthorizer {
    permissions: PermissionMap,
    codec: SessionCodec,
    store: SessionStore,
    redirects: RedirectPaths,
}

impl RequestAuthorizer {
    pub fn new(
        permissions: PermissionMap,
        codec: SessionCodec,
        store: SessionStore,
        redirects: RedirectPaths,
    ) -> Self {
        Self {
            permissions,
            codec,
            store,
            redirects,
        }
    }

    /// Build the codec, store and redirect paths from configuration
    pub fn from_config(permissions: PermissionMap, config: &LendbookConfig) -> Self {
        Self::new(
            permissions,
            SessionCodec::from_config(&config.session),
            SessionStore::from_config(&config.session, config.server.environment),
            RedirectPaths::from(&config.access),
        )
    }

    pub fn permissions(&self) -> &PermissionMap {
        &self.permissions
    }

    pub fn codec(&self) -> &SessionCodec {
        &self.codec
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    pub fn redirects(&self) -> &RedirectPaths {
        &self.redirects
    }

    /// Identity from the session cookie. Missing or invalid tokens mean anonymous.
    pub fn identify(&self, cookies: &CookieJar) -> Option<Identity> {
        let token = self.store.token(cookies)?;
        self.codec.decode(token).ok()
    }

    pub fn authorize(&self, context: &RequestContext) -> AuthorizationDecision {
        let identity = self.identify(&context.cookies);
        let path = context.path.as_str();

        if self.redirects.is_target(path) {
            return AuthorizationDecision::Allow { identity };
        }

        match identity {
            None if self.permissions.is_protected(path) => {
                debug!("Anonymous request for protected path {}", path);
                AuthorizationDecision::RedirectTo(Redirect::SignIn)
            }
            None => AuthorizationDecision::Allow { identity: None },
            Some(identity) => {
                let role = identity.normalized_role();
                match self.permissions.first_denial(path, &role) {
                    Some(prefix) => {
                        info!(
                            "Role {} denied {} (prefix {} requires another role)",
                            role, path, prefix
                        );
                        AuthorizationDecision::RedirectTo(Redirect::NotAuthorized)
                    }
                    None => AuthorizationDecision::Allow {
                        identity: Some(identity),
                    },
                }
            }
        }
    }
}

/// Authorization middleware.
///
/// Allowed requests carry a [`CurrentUser`] extension; denied ones get a
/// `303 See Other` to the sign-in or not-authorized page.
pub async fn authorize_middleware(
    State(authorizer): State<Arc<RequestAuthorizer>>,
    mut request: Request,
    next: Next,
) -> Response {
    let context = RequestContext::from_headers(request.uri().path(), request.headers());

    match authorizer.authorize(&context) {
        AuthorizationDecision::Allow { identity } => {
            request.extensions_mut().insert(CurrentUser(identity));
            next.run(request).await
        }
        AuthorizationDecision::RedirectTo(target) => {
            HttpRedirect::to(authorizer.redirects().path(target)).into_response()
        }
    }
}

/// Identity resolved by [`authorize_middleware`], `None` when anonymous
#[derive(Debug, Clone, Default)]
pub struct CurrentUser(pub Option<Identity>);

impl CurrentUser {
    pub fn identity(&self) -> Option<&Identity> {
        self.0.as_ref()
    }
}

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(parts.extensions.get::<CurrentUser>().cloned().unwrap_or_default())
    }
}
