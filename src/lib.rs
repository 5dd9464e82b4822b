//! # authware
//!
//! Rust SDK for the Authware licensing and authentication API.
//!
//! ## Security
//!
//! - Every connection pins the server certificate issuer and bypasses any
//!   system proxy
//! - Session tokens and API keys are redacted in Debug output
//! - Tracing skips credential and password parameters
//! - Error messages sanitize token-like data in response bodies
//!
//! ## Crates
//!
//! - **authware-client** - Core HTTP pipeline: pinned transport, typed decoding, error classification
//! - **authware-app** - Application API: registration, login, profiles, variables, API execution
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use authware::{AuthwareApplication, ErrorKind};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), authware::Error> {
//!     // AUTHWARE_APP_ID and AUTHWARE_APP_VERSION
//!     let app = AuthwareApplication::from_env()?;
//!     app.initialize_application().await?;
//!
//!     match app.login("alice", "hunter2").await {
//!         Ok((_, profile)) => println!("Welcome {profile}"),
//!         Err(err) => match &err.kind {
//!             ErrorKind::UpdateRequired { update_url, .. } => println!("Update at {update_url}"),
//!             ErrorKind::RateLimited { retry_after, .. } => println!("Retry in {retry_after:?}"),
//!             _ => return Err(err),
//!         },
//!     }
//!
//!     Ok(())
//! }
//! ```

// Re-export all crates for convenient access
#[cfg(feature = "app")]
pub use authware_app as app;
#[cfg(feature = "client")]
pub use authware_client as client;

// Re-export commonly used types at the top level
#[cfg(feature = "app")]
pub use authware_app::{AuthwareApplication, Profile};
#[cfg(feature = "client")]
pub use authware_client::{ClientConfig, Credential, Error, ErrorKind, Requester, Result};
