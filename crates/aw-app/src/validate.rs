//! Argument checks run before any request is sent.
//!
//! Every failure is an [`ErrorKind::InvalidArgument`](authware_client::ErrorKind::InvalidArgument),
//! so callers can tell a rejected argument apart from a remote failure.
//!
//! ```rust
//! use authware_app::validate;
//!
//! assert!(validate::guid("license", "8b0e4c6d-5a5f-4f39-9a3e-3a1b0c9d7e21").is_ok());
//! assert!(validate::guid("license", "not-a-license").is_err());
//! assert!(validate::required("username", "").is_err());
//! ```

use uuid::Uuid;

use authware_client::{Error, ErrorKind, Result};

/// Reject empty or whitespace-only values.
pub fn required<'a>(name: &str, value: &'a str) -> Result<&'a str> {
    if value.trim().is_empty() {
        return Err(Error::invalid_argument(format!("{name} can not be empty")));
    }
    Ok(value)
}

/// Require a GUID-shaped value, e.g. an application id or license token.
pub fn guid(name: &str, value: &str) -> Result<Uuid> {
    required(name, value)?;
    Uuid::parse_str(value.trim()).map_err(|e| {
        Error::with_source(
            ErrorKind::InvalidArgument(format!("{name} is not a valid GUID")),
            e,
        )
    })
}
