//! Client configuration.
//!
//! Configuration is fixed at construction and shared read-only by every call.

use url::Url;

use crate::error::{Error, ErrorKind, Result};
use crate::tls::TrustedIssuers;

/// Configuration for the Authware HTTP pipeline.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Root URL every relative request path is joined onto.
    pub base_url: Url,
    /// Version of the host application, sent as `X-Authware-App-Version`.
    pub app_version: String,
    /// User-Agent header value.
    pub user_agent: String,
    /// Issuer name fragments a server certificate must match.
    pub trusted_issuers: TrustedIssuers,
    /// Whether to enable request/response tracing.
    pub enable_tracing: bool,
}

impl ClientConfig {
    /// Create a new client config builder.
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }

    /// Load configuration from environment variables.
    ///
    /// Required:
    /// - `AUTHWARE_APP_VERSION`
    ///
    /// Optional:
    /// - `AUTHWARE_BASE_URL` (default: `https://api.authware.org/`)
    pub fn from_env() -> Result<Self> {
        let app_version = std::env::var("AUTHWARE_APP_VERSION")
            .map_err(|_| Error::new(ErrorKind::EnvVar("AUTHWARE_APP_VERSION".to_string())))?;

        let mut builder = Self::builder().with_app_version(app_version);
        if let Ok(base_url) = std::env::var("AUTHWARE_BASE_URL") {
            builder = builder.with_base_url(base_url);
        }
        builder.build()
    }
}

/// Builder for ClientConfig.
#[derive(Debug)]
pub struct ClientConfigBuilder {
    base_url: String,
    app_version: Option<String>,
    user_agent: String,
    trusted_issuers: TrustedIssuers,
    enable_tracing: bool,
}

impl Default for ClientConfigBuilder {
    fn default() -> Self {
        Self {
            base_url: crate::DEFAULT_BASE_URL.to_string(),
            app_version: None,
            user_agent: crate::USER_AGENT.to_string(),
            trusted_issuers: TrustedIssuers::default(),
            enable_tracing: true,
        }
    }
}

impl ClientConfigBuilder {
    /// Override the API root URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the host application's version (usually `env!("CARGO_PKG_VERSION")`).
    pub fn with_app_version(mut self, version: impl Into<String>) -> Self {
        self.app_version = Some(version.into());
        self
    }

    /// Set custom User-Agent.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Replace the accepted certificate issuers.
    pub fn with_trusted_issuers(mut self, issuers: TrustedIssuers) -> Self {
        self.trusted_issuers = issuers;
        self
    }

    /// Enable or disable request/response tracing.
    pub fn with_tracing(mut self, enabled: bool) -> Self {
        self.enable_tracing = enabled;
        self
    }

    /// Build the client configuration.
    ///
    /// Fails if the base URL does not parse or no app version was given.
    pub fn build(self) -> Result<ClientConfig> {
        let mut base_url = Url::parse(&self.base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(Error::new(ErrorKind::Config(format!(
                "{} cannot be used as a base URL",
                self.base_url
            ))));
        }
        // Relative paths join under the base only when it ends with '/'.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let app_version = self
            .app_version
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| Error::new(ErrorKind::Config("app version is required".to_string())))?;

        Ok(ClientConfig {
            base_url,
            app_version,
            user_agent: self.user_agent,
            trusted_issuers: self.trusted_issuers,
            enable_tracing: self.enable_tracing,
        })
    }
}
