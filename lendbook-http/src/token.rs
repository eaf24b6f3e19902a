//! Reading the identity out of an upstream token
//!
//! The credential service is reached over TLS and trusted, so its token payload
//! is read without checking the signature or expiry. The server issues its own
//! signed session token afterwards.

use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use lendbook_rbac::Identity;
use serde::Deserialize;
use serde_json::Value;

use crate::errors::GatewayError;

#[derive(Debug, Deserialize)]
struct UpstreamClaims {
    #[serde(default)]
    id: Option<Value>,
    #[serde(default)]
    sub: Option<Value>,
    #[serde(default)]
    document: Option<String>,
    #[serde(default)]
    role: Option<String>,
}

/// Build an identity from the upstream token payload.
///
/// The subject is taken from `id`, then `sub`. When the payload has no
/// `document`, the one used to log in is kept.
pub fn identity_from_token(token: &str, login_document: &str) -> Result<Identity, GatewayError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.validate_aud = false;
    validation.required_spec_claims.clear();

    let data = decode::<UpstreamClaims>(token, &DecodingKey::from_secret(&[]), &validation)?;
    let claims = data.claims;

    let id = claims
        .id
        .or(claims.sub)
        .and_then(|value| subject_string(&value))
        .ok_or_else(|| GatewayError::InvalidResponse("token carries no subject".to_string()))?;

    let role = claims
        .role
        .filter(|role| !role.trim().is_empty())
        .ok_or_else(|| GatewayError::InvalidResponse("token carries no role".to_string()))?;

    let document = claims
        .document
        .unwrap_or_else(|| login_document.to_string());

    Ok(Identity::new(id, document, role))
}

fn subject_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
