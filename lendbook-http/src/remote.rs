//! Remote credential service client

use lendbook_config::GatewayConfig;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use tracing::{debug, info, warn};

use crate::errors::GatewayError;
use crate::gateway::{AuthGateway, Credentials, GatewaySession};
use crate::token::identity_from_token;

#[derive(Serialize)]
struct LoginRequest<'a> {
    document: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct LoginResponse {
    #[serde(alias = "accessToken", alias = "access_token")]
    token: String,
}

/// Posts credentials to the remote login endpoint
#[derive(Debug, Clone)]
pub struct RemoteAuthGateway {
    client: Client,
    login_url: String,
}

impl RemoteAuthGateway {
    pub fn new(config: &GatewayConfig) -> Result<Self, GatewayError> {
        debug!(
            "Creating credential gateway client with {}s timeout",
            config.timeout.as_secs()
        );

        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("lendbook/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| GatewayError::ConfigError(e.to_string()))?;

        Ok(Self {
            client,
            login_url: config.login_url(),
        })
    }

    pub fn login_url(&self) -> &str {
        &self.login_url
    }
}

#[async_trait::async_trait]
impl AuthGateway for RemoteAuthGateway {
    async fn login(&self, credentials: &Credentials) -> Result<GatewaySession, GatewayError> {
        debug!("POST {} for document {}", self.login_url, credentials.document);

        let response = self
            .client
            .post(&self.login_url)
            .json(&LoginRequest {
                document: &credentials.document,
                password: &credentials.password,
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.json::<JsonValue>().await.ok();
            let message = body
                .as_ref()
                .and_then(remote_message)
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("Login failed").to_string());

            warn!(
                "Credential service rejected document {}: {} {}",
                credentials.document,
                status.as_u16(),
                message
            );
            return Err(GatewayError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        let body: LoginResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::InvalidResponse(e.to_string()))?;
        let identity = identity_from_token(&body.token, &credentials.document)?;

        info!(
            "Credential service accepted document {} with role {}",
            identity.document,
            identity.normalized_role()
        );

        Ok(GatewaySession {
            identity,
            upstream_token: Some(body.token),
        })
    }

    fn name(&self) -> &'static str {
        "remote"
    }
}

/// Pick the human-readable reason out of an error body.
///
/// Accepts `message` or `error` as a string, or `message` as a list of strings.
fn remote_message(body: &JsonValue) -> Option<String> {
    match body.get("message") {
        Some(JsonValue::String(message)) if !message.is_empty() => return Some(message.clone()),
        Some(JsonValue::Array(parts)) => {
            let joined = parts
                .iter()
                .filter_map(JsonValue::as_str)
                .collect::<Vec<_>>()
                .join("; ");
            if !joined.is_empty() {
                return Some(joined);
            }
        }
        _ => {}
    }

    body.get("error")
        .and_then(JsonValue::as_str)
        .filter(|error| !error.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_remote_message_shapes() {
        assert_eq!(
            remote_message(&json!({ "message": "Invalid credentials" })).as_deref(),
            Some("Invalid credentials")
        );
        assert_eq!(
            remote_message(&json!({ "message": ["document must not be empty", "password too short"] }))
                .as_deref(),
            Some("document must not be empty; password too short")
        );
        assert_eq!(
            remote_message(&json!({ "statusCode": 401, "error": "Unauthorized" })).as_deref(),
            Some("Unauthorized")
        );
        assert_eq!(remote_message(&json!({ "statusCode": 500 })), None);
    }

    #[test]
    fn test_login_url_from_config() {
        let config = GatewayConfig {
            base_url: "https://api.example.com".to_string(),
            ..GatewayConfig::default()
        };
        let gateway = RemoteAuthGateway::new(&config).unwrap();
        assert_eq!(gateway.login_url(), "https://api.example.com/auth/login");
    }
}
