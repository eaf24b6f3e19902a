//! Session token encoding and verification

use chrono::{DateTime, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use lendbook_config::SessionConfig;
use lendbook_rbac::Identity;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// Claims carried by a session token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Subject (identity id)
    pub sub: String,
    pub document: String,
    pub role: String,
    /// Issued at
    pub iat: i64,
    /// Expiration time
    pub exp: i64,
    /// Issuer
    pub iss: String,
}

/// Failure to issue a session token
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Failed to sign session token: {0}")]
    Encoding(#[from] jsonwebtoken::errors::Error),

    #[error("Session cookie could not be written: {0}")]
    InvalidCookie(String),

    #[error("Session lifetime of {0:?} cannot be represented")]
    InvalidLifetime(Duration),
}

/// Why a token does not yield an identity. Either way the caller is anonymous.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("Malformed session token: {0}")]
    Malformed(String),

    #[error("Session token has expired")]
    Expired,
}

/// HS256 session token codec
pub struct SessionCodec {
    issuer: String,
    ttl: Duration,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl SessionCodec {
    pub fn new(secret: &str, issuer: impl Into<String>, ttl: Duration) -> Self {
        Self {
            issuer: issuer.into(),
            ttl,
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    pub fn from_config(config: &SessionConfig) -> Self {
        Self::new(&config.secret, config.issuer.clone(), config.ttl)
    }

    /// Configured token lifetime
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Sign a token for `identity` valid from `issued_at` for `ttl`
    pub fn encode(
        &self,
        identity: &Identity,
        issued_at: DateTime<Utc>,
        ttl: Duration,
    ) -> Result<String, SessionError> {
        let expires_at = chrono::Duration::from_std(ttl)
            .ok()
            .and_then(|lifetime| issued_at.checked_add_signed(lifetime))
            .ok_or(SessionError::InvalidLifetime(ttl))?;
        let claims = SessionClaims {
            sub: identity.id.clone(),
            document: identity.document.clone(),
            role: identity.role.clone(),
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
            iss: self.issuer.clone(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)?;
        debug!("Issued session token for {} until {}", claims.sub, claims.exp);
        Ok(token)
    }

    /// Sign a token valid from now for the configured lifetime
    pub fn issue(&self, identity: &Identity) -> Result<String, SessionError> {
        self.encode(identity, Utc::now(), self.ttl)
    }

    /// Verify signature, issuer and expiry, then rebuild the identity
    pub fn decode(&self, token: &str) -> Result<Identity, DecodeError> {
        if token.is_empty() {
            return Err(DecodeError::Malformed("empty token".to_string()));
        }

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&self.issuer]);
        validation.set_required_spec_claims(&["exp", "iss", "sub"]);
        validation.leeway = 0;

        let data = decode::<SessionClaims>(token, &self.decoding_key, &validation).map_err(|e| {
            debug!("Session token rejected: {}", e);
            match e.kind() {
                ErrorKind::ExpiredSignature => DecodeError::Expired,
                _ => DecodeError::Malformed(e.to_string()),
            }
        })?;

        let claims = data.claims;
        Ok(Identity::new(claims.sub, claims.document, claims.role))
    }
}

impl fmt::Debug for SessionCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionCodec")
            .field("issuer", &self.issuer)
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}
