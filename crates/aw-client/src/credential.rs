//! Per-call credentials.
//!
//! Credential values are redacted in Debug output.

use reqwest::header::HeaderValue;

use crate::error::{Error, ErrorKind, Result};

/// A credential attached to a single call.
#[derive(Clone, PartialEq, Eq)]
pub enum Credential {
    /// Session token obtained from a login, sent as `Authorization: Bearer <token>`.
    Bearer(String),
    /// Long-lived API key, sent verbatim as the whole `Authorization` value.
    ApiKey(String),
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Credential::Bearer(_) => f.debug_tuple("Bearer").field(&"[REDACTED]").finish(),
            Credential::ApiKey(_) => f.debug_tuple("ApiKey").field(&"[REDACTED]").finish(),
        }
    }
}

impl Credential {
    /// A bearer session token.
    pub fn bearer(token: impl Into<String>) -> Self {
        Credential::Bearer(token.into())
    }

    /// A raw API key.
    pub fn api_key(key: impl Into<String>) -> Self {
        Credential::ApiKey(key.into())
    }

    /// The raw token or key.
    pub fn secret(&self) -> &str {
        match self {
            Credential::Bearer(secret) | Credential::ApiKey(secret) => secret,
        }
    }

    /// Returns true for API keys.
    pub fn is_api_key(&self) -> bool {
        matches!(self, Credential::ApiKey(_))
    }

    /// The full `Authorization` header value for this credential.
    ///
    /// API keys are not checked for format, but they must still be
    /// representable as an HTTP header value.
    pub fn authorization_value(&self) -> Result<HeaderValue> {
        let raw = match self {
            Credential::Bearer(token) => format!("Bearer {token}"),
            Credential::ApiKey(key) => key.clone(),
        };

        let mut value = HeaderValue::from_str(&raw).map_err(|e| {
            Error::with_source(
                ErrorKind::InvalidArgument(
                    "credential contains characters not allowed in a header".to_string(),
                ),
                e,
            )
        })?;
        value.set_sensitive(true);
        Ok(value)
    }
}
