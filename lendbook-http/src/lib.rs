//! Credential gateways for Lendbook sign-in
//!
//! An [`AuthGateway`] checks a document and password and returns the identity
//! they belong to. Two providers exist: the remote credential service reached
//! over HTTP, and fixed users from configuration.

pub mod errors;
pub mod gateway;
pub mod remote;
pub mod static_provider;
pub mod token;

pub use errors::GatewayError;
pub use gateway::{AuthGateway, Credentials, GatewaySession};
pub use remote::RemoteAuthGateway;
pub use static_provider::StaticAuthGateway;
pub use token::identity_from_token;
