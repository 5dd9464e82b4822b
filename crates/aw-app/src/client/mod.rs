//! The Authware application client.
//!
//! Endpoint methods are grouped by area in the submodules; each validates its
//! arguments locally, then hands one [`Request`](authware_client::Request)
//! to the shared [`Requester`].

use std::sync::Arc;

use tokio::sync::OnceCell;
use uuid::Uuid;

use authware_client::{ClientConfig, Error, ErrorKind, Requester, Result};

use crate::types::Application;
use crate::validate;

mod api;
mod app;
mod user;
mod variables;

/// Client for a single Authware application.
///
/// Cloning is cheap; clones share the requester and the cached
/// [`Application`] record.
///
/// # Example
///
/// ```rust,ignore
/// use authware_app::AuthwareApplication;
/// use authware_client::ClientConfig;
///
/// let config = ClientConfig::builder()
///     .with_app_version(env!("CARGO_PKG_VERSION"))
///     .build()?;
/// let app = AuthwareApplication::with_config("11111111-1111-1111-1111-111111111111", config)?;
///
/// let info = app.initialize_application().await?;
/// let (auth, profile) = app.login("alice", "hunter2").await?;
/// ```
#[derive(Debug, Clone)]
pub struct AuthwareApplication {
    app_id: Uuid,
    requester: Requester,
    application: Arc<OnceCell<Application>>,
}

impl AuthwareApplication {
    /// Create a client for `app_id` using an existing requester.
    ///
    /// Fails if `app_id` is not a GUID.
    pub fn new(app_id: &str, requester: Requester) -> Result<Self> {
        let app_id = validate::guid("application id", app_id)?;
        Ok(Self {
            app_id,
            requester,
            application: Arc::new(OnceCell::new()),
        })
    }

    /// Create a client for `app_id` with the default pinned transport.
    pub fn with_config(app_id: &str, config: ClientConfig) -> Result<Self> {
        Self::new(app_id, Requester::new(config)?)
    }

    /// Create a client from environment variables.
    ///
    /// Reads `AUTHWARE_APP_ID` in addition to the variables read by
    /// [`ClientConfig::from_env`].
    pub fn from_env() -> Result<Self> {
        let app_id = std::env::var("AUTHWARE_APP_ID")
            .map_err(|_| Error::new(ErrorKind::EnvVar("AUTHWARE_APP_ID".to_string())))?;
        Self::with_config(&app_id, ClientConfig::from_env()?)
    }

    /// The application id.
    pub fn app_id(&self) -> Uuid {
        self.app_id
    }

    /// The application record, once [`initialize_application`](Self::initialize_application)
    /// has succeeded.
    pub fn application(&self) -> Option<&Application> {
        self.application.get()
    }

    /// Get the underlying requester.
    pub fn requester(&self) -> &Requester {
        &self.requester
    }
}
