//! Session service: the authentication predicate and login/logout transitions.

use std::fmt;
use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use crate::error::StorageError;
use crate::traits::SessionStore;
use crate::{Identity, Result};

/// Storage key holding the serialized identity record.
pub const SESSION_KEY: &str = "user";

/// Authentication state of the browser context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No identity record is stored.
    Anonymous,
    /// An identity record is stored (with or without a token).
    Authenticated,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionState::Anonymous => f.write_str("anonymous"),
            SessionState::Authenticated => f.write_str("authenticated"),
        }
    }
}

/// Owner of the identity slot in a [`SessionStore`].
///
/// This is the only component that writes the slot. Readers (the route guard
/// and the request interceptor) go through [`SessionService::current`], which
/// treats unreadable or malformed values as "no identity".
///
/// Cloning is cheap; clones share the same store.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use tollgate_core::{Identity, MemoryStore, SessionService, UserId, Username};
///
/// let session = SessionService::new(Arc::new(MemoryStore::new()));
/// assert!(!session.is_authenticated());
///
/// let alice = Identity::new(Username::new("alice").unwrap()).with_id(UserId::from(1));
/// session.login(&alice).unwrap();
/// assert!(session.is_authenticated());
///
/// session.logout().unwrap();
/// assert!(!session.is_authenticated());
/// ```
#[derive(Clone)]
pub struct SessionService {
    store: Arc<dyn SessionStore>,
}

impl SessionService {
    /// Create a session service over `store`.
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    /// Returns the underlying store.
    pub fn store(&self) -> &Arc<dyn SessionStore> {
        &self.store
    }

    /// True iff the store holds a valid identity record. Token presence is
    /// not required.
    pub fn is_authenticated(&self) -> bool {
        self.current().is_some()
    }

    /// The current authentication state.
    pub fn state(&self) -> SessionState {
        if self.is_authenticated() {
            SessionState::Authenticated
        } else {
            SessionState::Anonymous
        }
    }

    /// The stored identity record, if one exists and matches the schema.
    ///
    /// Never fails: read errors and malformed values are logged and read
    /// as `None`.
    pub fn current(&self) -> Option<Identity> {
        let raw = match self.store.get(SESSION_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                warn!(error = %e, "Failed to read session slot, treating as anonymous");
                return None;
            }
        };

        match serde_json::from_str::<Identity>(&raw) {
            Ok(identity) => Some(identity),
            Err(e) => {
                warn!(error = %e, "Stored identity is malformed, treating as anonymous");
                None
            }
        }
    }

    /// Store `identity`, replacing any previous record.
    ///
    /// No validation happens here; the caller must already have matched the
    /// credentials against a user directory.
    ///
    /// # Errors
    ///
    /// Propagates storage failures (medium unavailable, quota exceeded).
    #[instrument(skip(self, identity), fields(username = %identity.username))]
    pub fn login(&self, identity: &Identity) -> Result<()> {
        let json = serde_json::to_string(identity).map_err(|e| StorageError::Serialize {
            message: e.to_string(),
        })?;

        self.store.set(SESSION_KEY, &json)?;

        info!(tokened = identity.bearer_token().is_some(), "Session stored");
        Ok(())
    }

    /// Delete the identity slot. Calling this without a session is a no-op.
    ///
    /// # Errors
    ///
    /// Propagates storage failures.
    #[instrument(skip(self))]
    pub fn logout(&self) -> Result<()> {
        self.store.remove(SESSION_KEY)?;
        debug!("Session cleared");
        Ok(())
    }
}

impl fmt::Debug for SessionService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionService")
            .field("state", &self.state())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStore;
    use crate::types::{UserId, Username};

    fn identity(name: &str, token: Option<&str>) -> Identity {
        let identity = Identity::new(Username::new(name).unwrap()).with_id(UserId::from(1));
        match token {
            Some(t) => identity.with_token(t),
            None => identity,
        }
    }

    #[test]
    fn fresh_store_is_anonymous() {
        let session = SessionService::new(Arc::new(MemoryStore::new()));
        assert_eq!(session.state(), SessionState::Anonymous);
        assert!(session.current().is_none());
    }

    #[test]
    fn login_overwrites_previous_identity() {
        let session = SessionService::new(Arc::new(MemoryStore::new()));
        session.login(&identity("a", Some("T1"))).unwrap();
        session.login(&identity("b", None)).unwrap();

        let current = session.current().unwrap();
        assert_eq!(current.username.as_str(), "b");
        assert!(current.token.is_none());
        assert_eq!(session.state(), SessionState::Authenticated);
    }

    #[test]
    fn logout_is_idempotent() {
        let session = SessionService::new(Arc::new(MemoryStore::new()));
        session.logout().unwrap();
        session.login(&identity("a", None)).unwrap();
        session.logout().unwrap();
        session.logout().unwrap();
        assert!(!session.is_authenticated());
    }

    #[test]
    fn malformed_value_reads_as_anonymous() {
        for raw in ["not json", "null", "{}", "[]", "{\"id\":1}", "\"user\""] {
            let store = Arc::new(MemoryStore::with_entry(SESSION_KEY, raw));
            let session = SessionService::new(store);
            assert!(!session.is_authenticated(), "{raw} should be anonymous");
        }
    }

    #[test]
    fn login_propagates_storage_failure() {
        let session = SessionService::new(Arc::new(MemoryStore::with_quota(4)));
        let err = session.login(&identity("alice", Some("T"))).unwrap_err();
        assert!(matches!(err, crate::Error::Storage(_)));
        assert!(!session.is_authenticated());
    }
}
