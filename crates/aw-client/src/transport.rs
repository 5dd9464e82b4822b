//! Per-call HTTP client construction.
//!
//! A [`TransportProvider`] hands out a new `reqwest::Client` for every call.
//! Clients are never pooled across calls, so the certificate verifier and
//! authorization header of one call can not leak into another.

use std::sync::Arc;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION};
use rustls::crypto::CryptoProvider;

use crate::config::ClientConfig;
use crate::credential::Credential;
use crate::error::{Error, ErrorKind, Result};
use crate::tls::IssuerPinningVerifier;
use crate::APP_VERSION_HEADER;

/// Source of single-use HTTP clients.
pub trait TransportProvider: Send + Sync + std::fmt::Debug {
    /// Build a client carrying the identifying headers and, when given, the
    /// `Authorization` header for `credential`.
    fn client(&self, credential: Option<&Credential>) -> Result<reqwest::Client>;
}

/// Default transport: issuer-pinned rustls, no proxy, HTTP/1.1.
#[derive(Debug, Clone)]
pub struct PinnedTransport {
    verifier: Arc<IssuerPinningVerifier>,
    provider: Arc<CryptoProvider>,
    user_agent: String,
    app_version: HeaderValue,
}

impl PinnedTransport {
    /// Create a transport from the client configuration.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let provider = Arc::new(rustls::crypto::ring::default_provider());
        let verifier =
            IssuerPinningVerifier::new(config.trusted_issuers.clone(), Arc::clone(&provider))?;

        let app_version = HeaderValue::from_str(&config.app_version).map_err(|e| {
            Error::with_source(
                ErrorKind::Config(format!("invalid app version: {}", config.app_version)),
                e,
            )
        })?;

        Ok(Self {
            verifier: Arc::new(verifier),
            provider,
            user_agent: config.user_agent.clone(),
            app_version,
        })
    }

    pub(crate) fn tls_config(&self) -> Result<rustls::ClientConfig> {
        let mut tls = rustls::ClientConfig::builder_with_provider(Arc::clone(&self.provider))
            .with_safe_default_protocol_versions()
            .map_err(|e| {
                Error::with_source(
                    ErrorKind::Config("unsupported TLS configuration".to_string()),
                    e,
                )
            })?
            .dangerous()
            .with_custom_certificate_verifier(self.verifier.clone())
            .with_no_client_auth();
        tls.alpn_protocols = vec![b"http/1.1".to_vec()];
        Ok(tls)
    }

    fn default_headers(&self, credential: Option<&Credential>) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(
            HeaderName::from_static(APP_VERSION_HEADER),
            self.app_version.clone(),
        );
        if let Some(credential) = credential {
            headers.insert(AUTHORIZATION, credential.authorization_value()?);
        }
        Ok(headers)
    }
}

impl TransportProvider for PinnedTransport {
    fn client(&self, credential: Option<&Credential>) -> Result<reqwest::Client> {
        let client = reqwest::Client::builder()
            .use_preconfigured_tls(self.tls_config()?)
            .no_proxy()
            .user_agent(&self.user_agent)
            .default_headers(self.default_headers(credential)?)
            .build()
            .map_err(|e| Error::with_source(ErrorKind::Config(e.to_string()), e))?;
        Ok(client)
    }
}
