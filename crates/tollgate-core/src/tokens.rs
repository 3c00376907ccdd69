//! Credential token type.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An opaque credential token attached to outbound requests.
///
/// Tokens have no refresh or expiry protocol. An empty token is allowed and
/// marks an identity as "authenticated but untokened".
///
/// # Security
///
/// - Never logged or displayed in Debug output
/// - Treat as opaque; do not parse or inspect
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccessToken(String);

impl AccessToken {
    /// Create a new access token.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Returns the token value for use in authorization headers.
    ///
    /// # Security
    ///
    /// Use only when constructing HTTP authorization headers or persisting
    /// the identity record.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if the token carries no value.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the `Bearer <token>` authorization header value.
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

// Hide token value in Debug output
impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("AccessToken").field(&"[REDACTED]").finish()
    }
}
