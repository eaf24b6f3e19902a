//! Signed session tokens carried in the session cookie

pub mod codec;
pub mod store;

pub use codec::{DecodeError, SessionClaims, SessionCodec, SessionError};
pub use store::{CookieJar, SessionStore};
