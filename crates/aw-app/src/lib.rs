//! # aw-app
//!
//! Typed client for an Authware application: registration, login, user
//! profiles, application and user variables, and server-side API execution.
//!
//! ## Example
//!
//! ```rust,ignore
//! use authware_app::AuthwareApplication;
//! use authware_client::{ClientConfig, Credential};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), authware_client::Error> {
//!     let config = ClientConfig::builder()
//!         .with_app_version(env!("CARGO_PKG_VERSION"))
//!         .build()?;
//!     let app = AuthwareApplication::with_config("11111111-1111-1111-1111-111111111111", config)?;
//!
//!     let info = app.initialize_application().await?;
//!     println!("{info}");
//!
//!     let (auth, profile) = app.login("alice", "hunter2").await?;
//!     let session = Credential::bearer(auth.auth_token);
//!     app.create_user_variable(&session, "theme", "dark", true).await?;
//!
//!     for claim in profile.claims() {
//!         println!("{}: {}", claim.kind.uri(), claim.value);
//!     }
//!
//!     Ok(())
//! }
//! ```

mod client;
mod profile;
mod responses;
mod types;
pub mod validate;

pub use client::AuthwareApplication;
pub use profile::{Claim, ClaimType, Profile};
pub use responses::{ApiResponse, AuthResponse, BaseResponse, UpdatedDataResponse};
pub use types::{Api, ApiRequest, Application, Role, Session, UserVariable, Variable};

// Re-export the pipeline types callers need to configure the client and
// match on failures.
pub use authware_client::{
    ClientConfig, ClientConfigBuilder, Credential, Error, ErrorKind, ErrorResponse, Requester,
    ResponseStatus, Result,
};
