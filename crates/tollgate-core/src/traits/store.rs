//! Session store trait.

use crate::Result;

/// Durable key/value storage scoped to one origin.
///
/// Values are opaque strings. Implementations must be safe to share between
/// the session service, the route guard and every in-flight request; reads
/// never mutate.
pub trait SessionStore: Send + Sync {
    /// Read the value stored under `key`, or `None` if the key is absent.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove `key`. Removing an absent key succeeds.
    fn remove(&self, key: &str) -> Result<()>;
}
