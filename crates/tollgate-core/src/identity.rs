//! The identity record persisted for the current principal.

use serde::{Deserialize, Serialize};

use crate::tokens::AccessToken;
use crate::types::{UserId, Username};

/// The authenticated principal.
///
/// This is the strict schema for the value stored in the session slot.
/// Reads that fail to match it are treated as "no identity". Fields a user
/// directory may add (passwords, birth dates) are ignored on read and never
/// written back.
///
/// # Example
///
/// ```
/// use tollgate_core::{Identity, UserId, Username};
///
/// let identity = Identity::new(Username::new("alice").unwrap())
///     .with_id(UserId::from(1))
///     .with_token("T");
/// assert_eq!(identity.bearer_token().unwrap().as_str(), "T");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Identifier assigned by the user directory, if it assigned one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<UserId>,

    /// Login name.
    pub username: Username,

    /// Display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Credential token for outbound requests. May be absent or empty.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<AccessToken>,
}

impl Identity {
    /// Create an untokened identity without an identifier.
    pub fn new(username: Username) -> Self {
        Self {
            id: None,
            username,
            name: None,
            token: None,
        }
    }

    /// Set the identifier.
    pub fn with_id(mut self, id: UserId) -> Self {
        self.id = Some(id);
        self
    }

    /// Set the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the credential token.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(AccessToken::new(token));
        self
    }

    /// Returns the token to present to backends, if there is a non-empty one.
    pub fn bearer_token(&self) -> Option<&AccessToken> {
        self.token.as_ref().filter(|t| !t.is_empty())
    }

    /// Returns the display name, falling back to the username.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(self.username.as_str())
    }
}
