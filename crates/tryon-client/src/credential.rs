//! Bearer credential for the try-on API.

use std::fmt;

use crate::error::{ClientError, ClientResult};

/// Environment variable holding the API key.
pub const API_KEY_ENV: &str = "TRYON_API_KEY";

/// Opaque bearer token. Never displayed, logged or serialized.
#[derive(Clone)]
pub struct Credential(String);

impl Credential {
    pub fn new(token: impl Into<String>) -> ClientResult<Self> {
        let token = token.into().trim().to_string();
        if token.is_empty() {
            return Err(ClientError::config("API key is empty"));
        }
        Ok(Self(token))
    }

    /// Read the API key from the environment. Absence is an operator error.
    pub fn from_env() -> ClientResult<Self> {
        let token = std::env::var(API_KEY_ENV)
            .map_err(|_| ClientError::config(format!("{} not set", API_KEY_ENV)))?;
        Self::new(token)
    }

    /// Raw token, for the authorization header only.
    pub(crate) fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}
