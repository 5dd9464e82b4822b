//! User profiles and the claims derived from them.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::{timestamp, ApiRequest, Role, Session, UserVariable};

/// An authenticated user's profile.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Profile {
    pub username: String,
    pub id: Uuid,
    pub email: String,
    #[serde(with = "timestamp")]
    pub date_created: DateTime<Utc>,
    /// When the user's plan expires.
    #[serde(with = "timestamp")]
    pub expiration: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sessions: Option<Vec<Session>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requests: Option<Vec<ApiRequest>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_variables: Option<Vec<UserVariable>>,
}

impl Profile {
    /// Returns true once the plan expiration has passed.
    pub fn is_expired(&self) -> bool {
        self.expiration <= Utc::now()
    }

    /// Identity claims for this user, in the order a host authorization
    /// layer would expect them. A role claim is only present when the user
    /// has a role.
    pub fn claims(&self) -> Vec<Claim> {
        let mut claims = vec![
            Claim::new(ClaimType::Email, &self.email),
            Claim::new(ClaimType::NameIdentifier, self.id.to_string()),
            Claim::new(ClaimType::Name, &self.username),
            Claim::new(ClaimType::AuthenticationMethod, "Authware"),
            Claim::new(ClaimType::Webpage, "https://authware.org"),
        ];
        if let Some(role) = &self.role {
            claims.push(Claim::new(ClaimType::Role, &role.name));
        }
        claims
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.username, self.id)
    }
}

/// Kind of identity claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClaimType {
    Email,
    NameIdentifier,
    Name,
    AuthenticationMethod,
    Webpage,
    Role,
}

impl ClaimType {
    /// The well-known claim type URI.
    pub fn uri(self) -> &'static str {
        match self {
            ClaimType::Email => {
                "http://schemas.xmlsoap.org/ws/2005/05/identity/claims/emailaddress"
            }
            ClaimType::NameIdentifier => {
                "http://schemas.xmlsoap.org/ws/2005/05/identity/claims/nameidentifier"
            }
            ClaimType::Name => "http://schemas.xmlsoap.org/ws/2005/05/identity/claims/name",
            ClaimType::AuthenticationMethod => {
                "http://schemas.microsoft.com/ws/2008/06/identity/claims/authenticationmethod"
            }
            ClaimType::Webpage => "http://schemas.xmlsoap.org/ws/2005/05/identity/claims/webpage",
            ClaimType::Role => "http://schemas.microsoft.com/ws/2008/06/identity/claims/role",
        }
    }
}

/// A single identity claim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Claim {
    pub kind: ClaimType,
    pub value: String,
}

impl Claim {
    pub fn new(kind: ClaimType, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
        }
    }
}
