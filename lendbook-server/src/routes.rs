//! Sign-in, sign-out and landing routes

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{HeaderMap, Uri},
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
    Json, Router,
};
use lendbook_http::Credentials;
use lendbook_web::{normalize_path, CurrentUser, WebError, WebResult};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{debug, info};

use crate::state::AccessState;

pub const SIGN_OUT_PATH: &str = "/auth/sign-out";
pub const SESSION_PATH: &str = "/auth/session";
pub const HEALTH_PATH: &str = "/health";

#[derive(Debug, Deserialize)]
pub struct SignInRequest {
    #[serde(default)]
    pub document: String,
    #[serde(default)]
    pub password: String,
}

/// Routes of the access surface. Everything else falls through to the dashboard placeholder.
pub fn router(state: Arc<AccessState>) -> Router {
    let redirects = state.authorizer.redirects().clone();

    Router::new()
        .route("/", get(root))
        .route(&redirects.sign_in, get(sign_in_page).post(sign_in))
        .route(&redirects.not_authorized, get(not_authorized_page))
        .route(SIGN_OUT_PATH, post(sign_out))
        .route(SESSION_PATH, get(session))
        .route(HEALTH_PATH, get(health))
        .fallback(dashboard_placeholder)
        .with_state(state)
}

/// Send signed-in users to their landing page, everyone else to sign-in
async fn root(State(state): State<Arc<AccessState>>, user: CurrentUser) -> Redirect {
    match user.identity() {
        Some(identity) => Redirect::to(&state.landing_for(&identity.role)),
        None => Redirect::to(&state.authorizer.redirects().sign_in),
    }
}

async fn sign_in_page(State(state): State<Arc<AccessState>>, user: CurrentUser) -> Response {
    match user.identity() {
        Some(identity) => Redirect::to(&state.landing_for(&identity.role)).into_response(),
        None => Json(json!({ "signIn": true })).into_response(),
    }
}

async fn sign_in(
    State(state): State<Arc<AccessState>>,
    payload: Result<Json<SignInRequest>, JsonRejection>,
) -> WebResult<(HeaderMap, Json<Value>)> {
    let Json(request) = payload.map_err(|e| WebError::bad_request(e.body_text()))?;

    let document = request.document.trim();
    if document.is_empty() || request.password.is_empty() {
        return Err(WebError::bad_request("document and password are required"));
    }

    let credentials = Credentials::new(document, request.password);
    let session = state.gateway.login(&credentials).await?;
    let identity = session.identity;

    let token = state.authorizer.codec().issue(&identity)?;
    let mut headers = HeaderMap::new();
    state.authorizer.store().write(&mut headers, &token)?;

    let landing = state.landing_for(&identity.role);
    info!(
        "Document {} signed in as {} via {} gateway, landing on {}",
        identity.document,
        identity.normalized_role(),
        state.gateway.name(),
        landing
    );

    Ok((headers, Json(json!({ "redirectTo": landing }))))
}

async fn sign_out(State(state): State<Arc<AccessState>>, user: CurrentUser) -> WebResult<Response> {
    let mut headers = HeaderMap::new();
    state.authorizer.store().clear(&mut headers)?;

    if let Some(identity) = user.identity() {
        info!("Document {} signed out", identity.document);
    }

    Ok((headers, Redirect::to(&state.authorizer.redirects().sign_in)).into_response())
}

async fn session(user: CurrentUser) -> WebResult<Json<Value>> {
    let identity = user
        .0
        .ok_or_else(|| WebError::unauthorized("Not signed in"))?;

    Ok(Json(json!({
        "id": identity.id,
        "document": identity.document,
        "role": identity.normalized_role(),
    })))
}

async fn not_authorized_page(State(state): State<Arc<AccessState>>, user: CurrentUser) -> Json<Value> {
    let home = match user.identity() {
        Some(identity) => state.landing_for(&identity.role),
        None => state.authorizer.redirects().sign_in.clone(),
    };
    Json(json!({ "notAuthorized": true, "home": home }))
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Dashboard pages are rendered elsewhere; name the route when the navigation knows it
async fn dashboard_placeholder(
    State(state): State<Arc<AccessState>>,
    user: CurrentUser,
    uri: Uri,
) -> WebResult<Json<Value>> {
    let path = normalize_path(uri.path());
    let prefix = state
        .authorizer
        .permissions()
        .matching(&path)
        .map(|(prefix, _)| prefix)
        .max_by_key(|prefix| prefix.len())
        .ok_or_else(|| WebError::not_found(format!("No route for {}", path)))?;

    debug!("Placeholder for {} under {}", path, prefix);
    Ok(Json(json!({
        "route": path,
        "section": prefix,
        "role": user.identity().map(|identity| identity.normalized_role()),
    })))
}
