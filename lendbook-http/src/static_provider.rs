//! Fixed users from configuration, for local development and tests

use lendbook_config::StaticUser;
use lendbook_rbac::Identity;
use tracing::{debug, warn};

use crate::errors::GatewayError;
use crate::gateway::{AuthGateway, Credentials, GatewaySession};

#[derive(Debug, Clone)]
pub struct StaticAuthGateway {
    users: Vec<StaticUser>,
}

impl StaticAuthGateway {
    pub fn new(users: Vec<StaticUser>) -> Self {
        Self { users }
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

#[async_trait::async_trait]
impl AuthGateway for StaticAuthGateway {
    async fn login(&self, credentials: &Credentials) -> Result<GatewaySession, GatewayError> {
        let user = self
            .users
            .iter()
            .find(|user| user.document == credentials.document && user.password == credentials.password);

        match user {
            Some(user) => {
                debug!("Static user {} signed in", user.document);
                Ok(GatewaySession {
                    identity: Identity::new(&user.id, &user.document, &user.role),
                    upstream_token: None,
                })
            }
            None => {
                warn!("Static sign-in failed for document {}", credentials.document);
                Err(GatewayError::Rejected {
                    status: 401,
                    message: "Invalid document or password".to_string(),
                })
            }
        }
    }

    fn name(&self) -> &'static str {
        "static"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gateway() -> StaticAuthGateway {
        StaticAuthGateway::new(vec![StaticUser {
            id: "1".to_string(),
            document: "12345678".to_string(),
            password: "changeme".to_string(),
            role: "GERENTE".to_string(),
        }])
    }

    #[tokio::test]
    async fn test_known_user_signs_in() {
        let session = gateway()
            .login(&Credentials::new("12345678", "changeme"))
            .await
            .unwrap();

        assert_eq!(session.identity, Identity::new("1", "12345678", "GERENTE"));
        assert!(session.upstream_token.is_none());
    }

    #[tokio::test]
    async fn test_wrong_password_rejected() {
        let result = gateway().login(&Credentials::new("12345678", "nope")).await;
        assert!(matches!(result, Err(GatewayError::Rejected { status: 401, .. })));
    }
}
