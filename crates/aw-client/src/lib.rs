//! # aw-client
//!
//! Core HTTP pipeline for the Authware API.
//!
//! Every remote call made by the SDK passes through [`Requester`], which:
//! - Builds a fresh, single-use HTTP client per call with server certificate
//!   issuer pinning and no outbound proxy
//! - Attaches the app-version, request-timestamp and authorization headers
//! - Decodes successful responses into the caller's type
//! - Classifies every failure into exactly one [`ErrorKind`]
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    Application Layer                        │
//! │  (aw-app: AuthwareApplication endpoint methods)             │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                       Requester                             │
//! │  - Timestamp header, JSON body                              │
//! │  - Typed decode on success                                  │
//! │  - Rate limit / update required / API error classification │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                  TransportProvider                          │
//! │  - One reqwest::Client per call                             │
//! │  - Issuer pinning, no proxy, identifying headers            │
//! │  - Bearer or raw API key authorization                      │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust,ignore
//! use authware_client::{ClientConfig, Credential, Request, Requester};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), authware_client::Error> {
//!     let config = ClientConfig::builder()
//!         .with_app_version(env!("CARGO_PKG_VERSION"))
//!         .build()?;
//!     let requester = Requester::new(config)?;
//!
//!     let profile: serde_json::Value = requester
//!         .send(Request::get("user/profile").credential(Credential::bearer(token)))
//!         .await?;
//!
//!     Ok(())
//! }
//! ```

mod config;
mod credential;
mod error;
mod request;
mod requester;
mod response;
pub mod tls;
mod transport;

pub use config::{ClientConfig, ClientConfigBuilder};
pub use credential::Credential;
pub use error::{Error, ErrorKind, Result};
pub use request::{Request, RequestMethod};
pub use requester::Requester;
pub use response::{ErrorResponse, RawResponse, ResponseStatus};
pub use tls::{IssuerPinningVerifier, TrustedIssuers};
pub use transport::{PinnedTransport, TransportProvider};

/// Root URL of the Authware API.
pub const DEFAULT_BASE_URL: &str = "https://api.authware.org/";

/// User-Agent string for the client.
pub const USER_AGENT: &str = concat!("authware-rs/", env!("CARGO_PKG_VERSION"));

/// Header carrying the host application's version.
pub const APP_VERSION_HEADER: &str = "x-authware-app-version";

/// Header carrying the request wall-clock time in epoch milliseconds.
pub const REQUEST_TIMESTAMP_HEADER: &str = "x-request-datetime";

/// Response headers that may carry the updater URL, in lookup order.
pub const UPDATER_URL_HEADERS: [&str; 2] = ["X-Authware-Updater-URL", "X-Updater-URL"];
