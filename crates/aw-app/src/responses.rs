//! Response envelopes for mutating calls.

use std::fmt;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use authware_client::ResponseStatus;

/// Status and message returned by calls that have no other result.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct BaseResponse {
    pub code: ResponseStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl fmt::Display for BaseResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.message {
            Some(message) => write!(f, "{}: {}", self.code, message),
            None => write!(f, "{}", self.code),
        }
    }
}

/// A status envelope carrying the record as it now exists on the server.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct UpdatedDataResponse<T> {
    pub code: ResponseStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub new_data: T,
}

/// Session token issued by a successful login.
#[derive(Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct AuthResponse {
    pub auth_token: String,
}

impl fmt::Debug for AuthResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthResponse")
            .field("auth_token", &"[REDACTED]")
            .finish()
    }
}

/// Result of executing one of the application's server-side APIs.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ApiResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub request_id: Uuid,
    /// Base64-encoded response body from the remote API.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<String>,
    pub is_success: bool,
}

impl ApiResponse {
    /// The response body as UTF-8 text, if it was sent and decodes.
    pub fn decoded_response(&self) -> Option<String> {
        let bytes = STANDARD.decode(self.response.as_deref()?).ok()?;
        String::from_utf8(bytes).ok()
    }

    /// Returns true if the API was configured to return its body.
    ///
    /// APIs that do not forward their body only report the upstream HTTP
    /// status code, which decodes to a bare integer.
    pub fn can_return_response(&self) -> bool {
        self.decoded_response()
            .is_some_and(|body| body.trim().parse::<i32>().is_err())
    }
}

impl fmt::Display for ApiResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.decoded_response().as_deref().unwrap_or_default())
    }
}
