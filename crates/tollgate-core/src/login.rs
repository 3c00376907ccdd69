//! Login flow: check credentials against a directory, then open the session.

use std::sync::Arc;

use tracing::{info, instrument};

use crate::session::SessionService;
use crate::traits::UserDirectory;
use crate::{Credentials, Identity, Result};

/// Result of a login attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    /// Credentials matched; the identity is now stored.
    Authenticated(Identity),
    /// No user matched. The session was left untouched.
    Rejected,
}

impl LoginOutcome {
    /// Returns the identity on success.
    pub fn identity(&self) -> Option<&Identity> {
        match self {
            LoginOutcome::Authenticated(identity) => Some(identity),
            LoginOutcome::Rejected => None,
        }
    }
}

/// Wires a [`UserDirectory`] to a [`SessionService`].
#[derive(Clone)]
pub struct LoginFlow {
    directory: Arc<dyn UserDirectory>,
    session: SessionService,
}

impl LoginFlow {
    /// Create a login flow.
    pub fn new(directory: Arc<dyn UserDirectory>, session: SessionService) -> Self {
        Self { directory, session }
    }

    /// Returns the session service the flow writes to.
    pub fn session(&self) -> &SessionService {
        &self.session
    }

    /// Look `credentials` up and, on a match, store the identity.
    ///
    /// A mismatch is not an error; it yields [`LoginOutcome::Rejected`].
    ///
    /// # Errors
    ///
    /// Propagates directory and storage failures.
    #[instrument(skip(self, credentials), fields(username = %credentials.username()))]
    pub async fn login(&self, credentials: &Credentials) -> Result<LoginOutcome> {
        match self.directory.find(credentials).await? {
            Some(identity) => {
                self.session.login(&identity)?;
                info!(id = ?identity.id, "Login succeeded");
                Ok(LoginOutcome::Authenticated(identity))
            }
            None => {
                info!("Login rejected");
                Ok(LoginOutcome::Rejected)
            }
        }
    }
}
