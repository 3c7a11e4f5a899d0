//! Persisted login session and user roles.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Storage key holding the bearer token.
pub const TOKEN_KEY: &str = "token";

/// Storage key holding the role of the logged-in user.
pub const USER_ROLE_KEY: &str = "userRole";

/// Marketplace user roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// Books and pays for services
    Client,
    /// Offers services and accepts bookings
    Provider,
}

impl Role {
    pub const ALL: &'static [Role] = &[Role::Client, Role::Provider];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Client => "CLIENT",
            Role::Provider => "PROVIDER",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// Role names are case-sensitive on the wire.
impl FromStr for Role {
    type Err = RoleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CLIENT" => Ok(Role::Client),
            "PROVIDER" => Ok(Role::Provider),
            _ => Err(RoleParseError(s.to_string())),
        }
    }
}

#[derive(Debug, Error)]
#[error("Unknown role: {0}")]
pub struct RoleParseError(String);

/// The `{ token, userRole }` record written at login and cleared at logout.
///
/// There is no expiry tracking: a session stays valid until it is cleared
/// locally or the backend starts rejecting the token.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    #[serde(rename = "token", default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(rename = "userRole", default, skip_serializing_if = "Option::is_none")]
    pub user_role: Option<String>,
}

impl Session {
    pub fn new(token: impl Into<String>, user_role: Option<String>) -> Self {
        Self {
            token: Some(token.into()),
            user_role,
        }
    }

    /// Bearer token, treating an empty string as absent.
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref().filter(|t| !t.is_empty())
    }

    /// Parsed role. Unknown role strings yield `None`.
    pub fn role(&self) -> Option<Role> {
        self.user_role.as_deref().and_then(|r| r.parse().ok())
    }

    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_role_round_trip_names() {
        for role in Role::ALL {
            assert_eq!(role.as_str().parse::<Role>().unwrap(), *role);
        }
        assert!("provider".parse::<Role>().is_err());
        assert!("ADMIN".parse::<Role>().is_err());
    }

    #[test]
    fn test_session_uses_storage_keys() {
        let session = Session::new("abc", Some("CLIENT".into()));
        assert_eq!(
            serde_json::to_value(&session).unwrap(),
            json!({ TOKEN_KEY: "abc", USER_ROLE_KEY: "CLIENT" })
        );
    }

    #[test]
    fn test_empty_token_is_unauthenticated() {
        let session = Session {
            token: Some(String::new()),
            user_role: None,
        };
        assert!(!session.is_authenticated());
        assert_eq!(session.token(), None);
    }

    #[test]
    fn test_unknown_role_is_none() {
        let session = Session::new("t", Some("SUPERUSER".into()));
        assert_eq!(session.role(), None);
    }
}
