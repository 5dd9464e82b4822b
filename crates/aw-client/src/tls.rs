//! Server certificate issuer pinning.
//!
//! The Authware API is only reachable through certificates issued by a small
//! set of certificate authorities. [`IssuerPinningVerifier`] rejects any
//! end-entity certificate whose issuer name does not contain one of the
//! [`TrustedIssuers`] fragments, then runs the standard WebPKI chain and
//! hostname validation on the certificates it accepts.
//!
//! Issuer names are rendered most-specific attribute first, e.g.
//! `CN=R3, O=Let's Encrypt, C=US`, and matched by substring.
//!
//! ```rust
//! use authware_client::tls::TrustedIssuers;
//!
//! let issuers = TrustedIssuers::default();
//! assert!(issuers.matches("CN=R3, O=Let's Encrypt, C=US"));
//! assert!(!issuers.matches("CN=Example CA, O=Example Corp, C=US"));
//! ```

use std::sync::Arc;

use rustls::client::danger::{HandshakeSignatureValid, ServerCertVerified, ServerCertVerifier};
use rustls::client::WebPkiServerVerifier;
use rustls::crypto::CryptoProvider;
use rustls::pki_types::{CertificateDer, ServerName, UnixTime};
use rustls::{CertificateError, DigitallySignedStruct, RootCertStore, SignatureScheme};
use tracing::warn;
use x509_parser::prelude::{AttributeTypeAndValue, FromDer, X509Certificate, X509Name};

use crate::error::{Error, ErrorKind, Result};

/// Issuer of the Cloudflare edge certificates.
pub const CLOUDFLARE_ECC_CA3: &str = "CN=Cloudflare Inc ECC CA-3, O=Cloudflare, Inc., C=US";

/// Any Let's Encrypt intermediate.
pub const LETS_ENCRYPT: &str = ", O=Let's Encrypt, C=US";

/// Issuer name fragments a server certificate must match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrustedIssuers(Vec<String>);

impl Default for TrustedIssuers {
    fn default() -> Self {
        Self::new([CLOUDFLARE_ECC_CA3, LETS_ENCRYPT])
    }
}

impl TrustedIssuers {
    /// Trust certificates whose issuer contains any of `fragments`.
    pub fn new<I, S>(fragments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(fragments.into_iter().map(Into::into).collect())
    }

    /// Returns true if `issuer` contains one of the trusted fragments.
    pub fn matches(&self, issuer: &str) -> bool {
        self.0.iter().any(|fragment| issuer.contains(fragment.as_str()))
    }

    /// Number of trusted fragments.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if no issuer is trusted.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Check a DER-encoded certificate's issuer.
    pub fn check(
        &self,
        certificate: &CertificateDer<'_>,
    ) -> std::result::Result<(), rustls::Error> {
        let issuer = issuer_name(certificate.as_ref())
            .ok_or(rustls::Error::InvalidCertificate(CertificateError::BadEncoding))?;

        if self.matches(&issuer) {
            Ok(())
        } else {
            warn!(issuer = %issuer, "Rejecting server certificate from untrusted issuer");
            Err(rustls::Error::InvalidCertificate(
                CertificateError::ApplicationVerificationFailure,
            ))
        }
    }
}

/// Render the issuer of a DER-encoded certificate, most specific attribute
/// first. Returns `None` if the certificate does not parse.
pub fn issuer_name(der: &[u8]) -> Option<String> {
    let (_, certificate) = X509Certificate::from_der(der).ok()?;
    Some(render_name(certificate.issuer()))
}

fn render_name(name: &X509Name<'_>) -> String {
    let mut parts = Vec::new();
    let mut push = |label: &str, values: Vec<&str>| {
        parts.extend(values.into_iter().map(|v| format!("{label}={v}")));
    };

    push("CN", strs(name.iter_common_name()));
    push("OU", strs(name.iter_organizational_unit()));
    push("O", strs(name.iter_organization()));
    push("L", strs(name.iter_locality()));
    push("ST", strs(name.iter_state_or_province()));
    push("C", strs(name.iter_country()));

    parts.join(", ")
}

fn strs<'a, 'b: 'a>(attrs: impl Iterator<Item = &'a AttributeTypeAndValue<'b>>) -> Vec<&'a str> {
    attrs.filter_map(|a| a.as_str().ok()).collect()
}

/// Certificate verifier enforcing [`TrustedIssuers`] ahead of WebPKI
/// validation against the Mozilla root set.
#[derive(Debug)]
pub struct IssuerPinningVerifier {
    trusted: TrustedIssuers,
    inner: Arc<WebPkiServerVerifier>,
}

impl IssuerPinningVerifier {
    /// Build a verifier for the given issuers using `provider` for signatures.
    pub fn new(trusted: TrustedIssuers, provider: Arc<CryptoProvider>) -> Result<Self> {
        let roots = RootCertStore::from_iter(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());
        let inner = WebPkiServerVerifier::builder_with_provider(Arc::new(roots), provider)
            .build()
            .map_err(|e| {
                Error::with_source(
                    ErrorKind::Config("failed to build certificate verifier".to_string()),
                    e,
                )
            })?;

        Ok(Self { trusted, inner })
    }

    /// The issuers this verifier accepts.
    pub fn trusted_issuers(&self) -> &TrustedIssuers {
        &self.trusted
    }
}

impl ServerCertVerifier for IssuerPinningVerifier {
    fn verify_server_cert(
        &self,
        end_entity: &CertificateDer<'_>,
        intermediates: &[CertificateDer<'_>],
        server_name: &ServerName<'_>,
        ocsp_response: &[u8],
        now: UnixTime,
    ) -> std::result::Result<ServerCertVerified, rustls::Error> {
        self.trusted.check(end_entity)?;
        self.inner
            .verify_server_cert(end_entity, intermediates, server_name, ocsp_response, now)
    }

    fn verify_tls12_signature(
        &self,
        message: &[u8],
        cert: &CertificateDer<'_>,
        dss: &DigitallySignedStruct,
    ) -> std::result::Result<HandshakeSignatureValid, rustls::Error> {
        self.inner.verify_tls12_signature(message, cert, dss)
    }

    fn verify_tls13_signature(
        &self,
        message: &[u8],
        cert: &CertificateDer<'_>,
        dss: &DigitallySignedStruct,
    ) -> std::result::Result<HandshakeSignatureValid, rustls::Error> {
        self.inner.verify_tls13_signature(message, cert, dss)
    }

    fn supported_verify_schemes(&self) -> Vec<SignatureScheme> {
        self.inner.supported_verify_schemes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use x509_parser::pem::parse_x509_pem;

    const UNTRUSTED_PEM: &[u8] = include_bytes!("../tests/fixtures/untrusted.pem");
    const CLOUDFLARE_PEM: &[u8] = include_bytes!("../tests/fixtures/cloudflare.pem");
    const LETS_ENCRYPT_PEM: &[u8] = include_bytes!("../tests/fixtures/letsencrypt.pem");

    fn der(pem: &[u8]) -> CertificateDer<'static> {
        let (_, pem) = parse_x509_pem(pem).unwrap();
        CertificateDer::from(pem.contents)
    }

    fn verifier() -> IssuerPinningVerifier {
        IssuerPinningVerifier::new(
            TrustedIssuers::default(),
            Arc::new(rustls::crypto::ring::default_provider()),
        )
        .unwrap()
    }

    fn verify(
        cert: &CertificateDer<'static>,
    ) -> std::result::Result<ServerCertVerified, rustls::Error> {
        let server_name = ServerName::try_from("api.authware.org").unwrap();
        verifier().verify_server_cert(cert, &[], &server_name, &[], UnixTime::now())
    }

    #[test]
    fn test_issuer_name_rendering() {
        assert_eq!(
            issuer_name(der(CLOUDFLARE_PEM).as_ref()).unwrap(),
            "CN=Cloudflare Inc ECC CA-3, O=Cloudflare, Inc., C=US"
        );
        assert_eq!(
            issuer_name(der(LETS_ENCRYPT_PEM).as_ref()).unwrap(),
            "CN=R3, O=Let's Encrypt, C=US"
        );
        assert_eq!(
            issuer_name(der(UNTRUSTED_PEM).as_ref()).unwrap(),
            "CN=Example Untrusted CA, O=Example Corp, C=US"
        );
    }

    #[test]
    fn test_default_issuers() {
        let issuers = TrustedIssuers::default();
        assert!(issuers.matches("CN=Cloudflare Inc ECC CA-3, O=Cloudflare, Inc., C=US"));
        assert!(issuers.matches("CN=E5, O=Let's Encrypt, C=US"));
        assert!(!issuers.matches("CN=Cloudflare Inc ECC CA-2, O=Cloudflare, Inc., C=US"));
        assert!(!issuers.matches("O=Let's Encrypt, C=US"));
        assert!(!issuers.matches(""));
    }

    #[test]
    fn test_untrusted_issuer_is_rejected() {
        let err = verify(&der(UNTRUSTED_PEM)).unwrap_err();
        assert_eq!(
            err,
            rustls::Error::InvalidCertificate(CertificateError::ApplicationVerificationFailure)
        );
    }

    #[test]
    fn test_trusted_issuer_name_still_requires_valid_chain() {
        // Self-signed lookalikes pass the issuer check but not WebPKI.
        for pem in [CLOUDFLARE_PEM, LETS_ENCRYPT_PEM] {
            let err = verify(&der(pem)).unwrap_err();
            assert_ne!(
                err,
                rustls::Error::InvalidCertificate(CertificateError::ApplicationVerificationFailure)
            );
        }
    }

    #[test]
    fn test_garbage_certificate_is_bad_encoding() {
        let err = TrustedIssuers::default()
            .check(&CertificateDer::from(vec![0u8, 1, 2, 3]))
            .unwrap_err();
        assert_eq!(
            err,
            rustls::Error::InvalidCertificate(CertificateError::BadEncoding)
        );
    }

    #[test]
    fn test_empty_issuer_set_trusts_nothing() {
        let issuers = TrustedIssuers::new(Vec::<String>::new());
        assert!(issuers.is_empty());
        assert!(issuers.check(&der(LETS_ENCRYPT_PEM)).is_err());
    }
}
