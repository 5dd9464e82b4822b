//! Request descriptors.

use serde::Serialize;

use crate::credential::Credential;
use crate::error::Result;

/// HTTP request method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl RequestMethod {
    /// Convert to reqwest::Method.
    pub fn to_reqwest(&self) -> reqwest::Method {
        match self {
            RequestMethod::Get => reqwest::Method::GET,
            RequestMethod::Post => reqwest::Method::POST,
            RequestMethod::Put => reqwest::Method::PUT,
            RequestMethod::Patch => reqwest::Method::PATCH,
            RequestMethod::Delete => reqwest::Method::DELETE,
        }
    }
}

/// A single call to the Authware API.
///
/// The path is relative to the configured base URL. Leading slashes are
/// ignored so that a base URL with a path prefix is preserved.
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub(crate) method: RequestMethod,
    pub(crate) path: String,
    pub(crate) body: Option<serde_json::Value>,
    pub(crate) credential: Option<Credential>,
}

impl Request {
    /// Create a request with the given method and relative path.
    pub fn new(method: RequestMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            body: None,
            credential: None,
        }
    }

    /// A GET request.
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(RequestMethod::Get, path)
    }

    /// A POST request.
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(RequestMethod::Post, path)
    }

    /// A PUT request.
    pub fn put(path: impl Into<String>) -> Self {
        Self::new(RequestMethod::Put, path)
    }

    /// A DELETE request.
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(RequestMethod::Delete, path)
    }

    /// Attach a JSON body.
    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> Result<Self> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }

    /// Authenticate the call with `credential`.
    pub fn credential(mut self, credential: Credential) -> Self {
        self.credential = Some(credential);
        self
    }

    /// The HTTP method.
    pub fn method(&self) -> RequestMethod {
        self.method
    }

    /// The relative path, as given.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The JSON body, if any.
    pub fn body(&self) -> Option<&serde_json::Value> {
        self.body.as_ref()
    }

    /// The credential, if any.
    pub fn auth(&self) -> Option<&Credential> {
        self.credential.as_ref()
    }
}
