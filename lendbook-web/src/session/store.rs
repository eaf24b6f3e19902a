//! Session cookie reading and writing

use axum::http::{
    header::{COOKIE, SET_COOKIE},
    HeaderMap, HeaderValue,
};
use lendbook_config::{Environment, SessionConfig};
use std::collections::BTreeMap;
use std::time::Duration;

use super::codec::SessionError;

/// Cookies sent with a request, by name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CookieJar {
    cookies: BTreeMap<String, String>,
}

impl CookieJar {
    /// Parse every `Cookie` header. The first occurrence of a name wins.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let mut cookies = BTreeMap::new();

        for header in headers.get_all(COOKIE) {
            let Ok(value) = header.to_str() else {
                continue;
            };
            for pair in value.split(';') {
                if let Some((name, value)) = pair.trim().split_once('=') {
                    cookies
                        .entry(name.trim().to_string())
                        .or_insert_with(|| value.trim().trim_matches('"').to_string());
                }
            }
        }

        Self { cookies }
    }

    pub fn with_cookie(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.cookies.insert(name.into(), value.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.cookies.get(name).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.cookies.is_empty()
    }
}

/// Reads and writes the session cookie
#[derive(Debug, Clone)]
pub struct SessionStore {
    cookie_name: String,
    max_age: Duration,
    secure: bool,
}

impl SessionStore {
    pub fn new(cookie_name: impl Into<String>, max_age: Duration, secure: bool) -> Self {
        Self {
            cookie_name: cookie_name.into(),
            max_age,
            secure,
        }
    }

    /// Cookie is marked `Secure` in production
    pub fn from_config(config: &SessionConfig, environment: Environment) -> Self {
        Self::new(config.cookie_name.clone(), config.ttl, environment.is_production())
    }

    pub fn cookie_name(&self) -> &str {
        &self.cookie_name
    }

    pub fn is_secure(&self) -> bool {
        self.secure
    }

    /// Session token from the request cookies. An empty value reads as absent.
    pub fn read(&self, headers: &HeaderMap) -> Option<String> {
        self.token(&CookieJar::from_headers(headers))
            .map(str::to_string)
    }

    pub fn token<'a>(&self, cookies: &'a CookieJar) -> Option<&'a str> {
        cookies.get(&self.cookie_name).filter(|token| !token.is_empty())
    }

    /// Append the `Set-Cookie` header carrying a new session token
    pub fn write(&self, headers: &mut HeaderMap, token: &str) -> Result<(), SessionError> {
        let cookie = self.cookie(token, self.max_age.as_secs());
        let value =
            HeaderValue::from_str(&cookie).map_err(|e| SessionError::InvalidCookie(e.to_string()))?;
        headers.append(SET_COOKIE, value);
        Ok(())
    }

    /// Append a `Set-Cookie` header that expires the session cookie
    pub fn clear(&self, headers: &mut HeaderMap) -> Result<(), SessionError> {
        let cookie = self.cookie("", 0);
        let value =
            HeaderValue::from_str(&cookie).map_err(|e| SessionError::InvalidCookie(e.to_string()))?;
        headers.append(SET_COOKIE, value);
        Ok(())
    }

    fn cookie(&self, value: &str, max_age: u64) -> String {
        let mut cookie = format!(
            "{}={}; HttpOnly; SameSite=Lax; Path=/; Max-Age={}",
            self.cookie_name, value, max_age
        );
        if self.secure {
            cookie.push_str("; Secure");
        }
        cookie
    }
}
