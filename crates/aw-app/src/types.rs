//! Records returned by the Authware application API.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An Authware application.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Application {
    pub name: String,
    pub id: Uuid,
    pub version: String,
    #[serde(with = "timestamp")]
    pub date_created: DateTime<Utc>,
    /// Whether the application enforces hardware-id checks.
    pub is_hwid_checking_enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub apis: Option<Vec<Api>>,
    pub user_count: i32,
    pub request_count: i32,
}

impl fmt::Display for Application {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (v{})", self.name, self.version)
    }
}

/// A server-side API attached to an application.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Api {
    pub id: Uuid,
    pub name: String,
}

/// An application or role variable.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Variable {
    pub key: String,
    pub value: String,
}

impl Variable {
    /// Split into `(key, value)`.
    pub fn into_pair(self) -> (String, String) {
        (self.key, self.value)
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.key, self.value)
    }
}

/// A variable owned by a single user.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct UserVariable {
    pub key: String,
    pub value: String,
    /// Whether the user may change or delete this variable.
    pub can_user_edit: bool,
}

impl fmt::Display for UserVariable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.key, self.value)
    }
}

/// An active login session.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Session {
    pub id: Uuid,
    #[serde(with = "timestamp")]
    pub date_created: DateTime<Utc>,
}

impl fmt::Display for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}

/// The role assigned to a user.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Role {
    pub id: Uuid,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variables: Option<Vec<Variable>>,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.id)
    }
}

/// A past call to one of the application's APIs.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ApiRequest {
    pub id: Uuid,
    #[serde(with = "timestamp")]
    pub date_created: DateTime<Utc>,
}

/// Timestamps as sent by the API.
///
/// RFC 3339 values are accepted as is. Values without an offset are taken
/// to be UTC.
pub(crate) mod timestamp {
    use chrono::{DateTime, NaiveDateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        value: &DateTime<Utc>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_rfc3339())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {raw}")))
    }

    pub(crate) fn parse(raw: &str) -> Option<DateTime<Utc>> {
        if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
            return Some(parsed.with_timezone(&Utc));
        }
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
            .ok()
            .map(|naive| naive.and_utc())
    }
}
