//! Response handling: typed decoding and failure classification.
//!
//! Classification works on a fully buffered [`RawResponse`] so that every
//! rule can be exercised without a network round-trip.

use std::fmt;
use std::sync::OnceLock;
use std::time::Duration;

use chrono::{DateTime, Utc};
use reqwest::header::{HeaderMap, RETRY_AFTER};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{Error, ErrorKind, Result};
use crate::UPDATER_URL_HEADERS;

/// Status code carried in every Authware response envelope.
///
/// Codes not known to this SDK are preserved in [`ResponseStatus::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "i32", into = "i32")]
pub enum ResponseStatus {
    /// The operation succeeded.
    Success,
    /// A normal, user-facing error.
    Error,
    /// The calling application is out of date and must be updated.
    UpdateRequired,
    /// Any other code defined by the remote service.
    Other(i32),
}

impl ResponseStatus {
    /// The numeric wire value.
    pub fn code(self) -> i32 {
        match self {
            ResponseStatus::Success => 0,
            ResponseStatus::Error => 1,
            ResponseStatus::UpdateRequired => 7,
            ResponseStatus::Other(code) => code,
        }
    }
}

impl From<i32> for ResponseStatus {
    fn from(code: i32) -> Self {
        match code {
            0 => ResponseStatus::Success,
            1 => ResponseStatus::Error,
            7 => ResponseStatus::UpdateRequired,
            other => ResponseStatus::Other(other),
        }
    }
}

impl From<ResponseStatus> for i32 {
    fn from(status: ResponseStatus) -> Self {
        status.code()
    }
}

impl fmt::Display for ResponseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResponseStatus::Success => f.write_str("Success"),
            ResponseStatus::Error => f.write_str("Error"),
            ResponseStatus::UpdateRequired => f.write_str("UpdateRequired"),
            ResponseStatus::Other(code) => write!(f, "Status {code}"),
        }
    }
}

/// Error envelope returned by the Authware API on failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Machine-readable status.
    pub code: ResponseStatus,
    /// Human-readable message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Granular validation errors.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
    /// Server-side stack trace, only present on internal failures.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trace: Option<String>,
}

impl fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.message {
            Some(message) => write!(f, "{}: {}", self.code, message)?,
            None => write!(f, "{}", self.code)?,
        }
        if let Some(errors) = self.errors.as_ref().filter(|e| !e.is_empty()) {
            write!(f, " ({})", errors.join(", "))?;
        }
        Ok(())
    }
}

/// A fully buffered HTTP response.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub headers: HeaderMap,
    pub body: String,
}

impl RawResponse {
    /// Returns true if the response status is successful (2xx).
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Get a header value.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)?.to_str().ok()
    }

    /// Get the Retry-After header as a Duration.
    ///
    /// Accepts both the delta-seconds and the HTTP-date forms. A date in the
    /// past yields a zero duration.
    pub fn retry_after(&self) -> Option<Duration> {
        let value = self.header(RETRY_AFTER.as_str())?.trim();

        if let Ok(seconds) = value.parse::<u64>() {
            return Some(Duration::from_secs(seconds));
        }

        let at = DateTime::parse_from_rfc2822(value).ok()?.with_timezone(&Utc);
        Some((at - Utc::now()).to_std().unwrap_or(Duration::ZERO))
    }

    /// Get the updater URL sent alongside an update-required envelope.
    pub fn update_url(&self) -> Option<&str> {
        UPDATER_URL_HEADERS
            .iter()
            .filter_map(|name| self.header(name))
            .map(str::trim)
            .find(|url| !url.is_empty())
    }

    /// Decode a successful response, or classify the failure.
    pub fn into_result<T: DeserializeOwned>(self) -> Result<T> {
        if self.is_success() {
            self.decode()
        } else {
            Err(self.classify_failure())
        }
    }

    /// Decode the body as the requested type.
    ///
    /// A decode failure on a success status means the API contract changed
    /// and is reported as [`ErrorKind::UnexpectedResponse`].
    fn decode<T: DeserializeOwned>(self) -> Result<T> {
        let decoded = serde_json::from_str::<T>(&self.body);
        match decoded {
            Ok(value) => Ok(value),
            Err(err) => Err(Error::with_source(
                ErrorKind::UnexpectedResponse {
                    status: self.status,
                    body: self.body,
                },
                err,
            )),
        }
    }

    /// Map a non-success response to exactly one error kind.
    pub fn classify_failure(self) -> Error {
        if self.status == 429 {
            return self.classify_rate_limit();
        }

        let response = match self.parse_envelope() {
            Ok(response) => response,
            Err(err) => return err,
        };

        if response.code != ResponseStatus::UpdateRequired {
            return Error::new(ErrorKind::Api {
                status: self.status,
                response,
            });
        }

        match self.update_url() {
            Some(url) => Error::new(ErrorKind::UpdateRequired {
                update_url: url.to_string(),
                response,
            }),
            None => Error::new(ErrorKind::MissingHeader {
                status: self.status,
                header: UPDATER_URL_HEADERS[0].to_string(),
            }),
        }
    }

    fn classify_rate_limit(self) -> Error {
        let Some(retry_after) = self.retry_after() else {
            return Error::new(ErrorKind::MissingHeader {
                status: self.status,
                header: RETRY_AFTER.as_str().to_string(),
            });
        };

        // HTML error pages from the edge carry no envelope.
        if self.body.contains('<') {
            return Error::new(ErrorKind::RateLimited {
                retry_after,
                response: None,
            });
        }

        match self.parse_envelope() {
            Ok(response) => Error::new(ErrorKind::RateLimited {
                retry_after,
                response: Some(response),
            }),
            Err(err) => err,
        }
    }

    fn parse_envelope(&self) -> std::result::Result<ErrorResponse, Error> {
        let unparsable = || ErrorKind::UnparsableErrorResponse {
            status: self.status,
            body: self.body.clone(),
        };

        match serde_json::from_str::<Option<ErrorResponse>>(&self.body) {
            Ok(Some(response)) => Ok(response),
            Ok(None) => Err(Error::new(unparsable())),
            Err(err) => Err(Error::with_source(unparsable(), err)),
        }
    }
}

/// Sanitize an error message to prevent exposing sensitive data.
///
/// Redacts bearer tokens and GUID-shaped values (API keys, license tokens)
/// and truncates messages longer than 500 characters.
pub(crate) fn sanitize_error_message(message: &str) -> String {
    const MAX_LENGTH: usize = 500;

    static BEARER: OnceLock<Option<regex_lite::Regex>> = OnceLock::new();
    static GUID: OnceLock<Option<regex_lite::Regex>> = OnceLock::new();

    let mut sanitized = message.to_string();

    if let Some(pattern) = BEARER
        .get_or_init(|| regex_lite::Regex::new(r"(?i)bearer\s+[A-Za-z0-9\-._~+/]+=*").ok())
    {
        sanitized = pattern
            .replace_all(&sanitized, "Bearer [REDACTED]")
            .to_string();
    }

    if let Some(pattern) = GUID.get_or_init(|| {
        regex_lite::Regex::new(
            r"[0-9A-Fa-f]{8}-[0-9A-Fa-f]{4}-[0-9A-Fa-f]{4}-[0-9A-Fa-f]{4}-[0-9A-Fa-f]{12}",
        )
        .ok()
    }) {
        sanitized = pattern.replace_all(&sanitized, "[REDACTED]").to_string();
    }

    if sanitized.len() > MAX_LENGTH {
        let mut cut = MAX_LENGTH;
        while !sanitized.is_char_boundary(cut) {
            cut -= 1;
        }
        sanitized.truncate(cut);
        sanitized.push_str("...[truncated]");
    }

    sanitized
}
