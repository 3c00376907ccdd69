//! User directory trait.

use async_trait::async_trait;
use std::fmt;

use crate::types::Username;
use crate::{Credentials, Identity, Result};

/// A registration request.
#[derive(Clone)]
pub struct NewAccount {
    /// Requested login name.
    pub username: Username,
    /// Plain-text password, handed to the directory once.
    pub password: String,
    /// Display name.
    pub name: Option<String>,
}

impl fmt::Debug for NewAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewAccount")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("name", &self.name)
            .finish()
    }
}

/// The user-lookup collaborator consulted by the login flow.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Return the identity whose credentials match, or `None` if nothing matches.
    async fn find(&self, credentials: &Credentials) -> Result<Option<Identity>>;

    /// Create a new user and return its identity.
    async fn register(&self, account: NewAccount) -> Result<Identity>;
}
