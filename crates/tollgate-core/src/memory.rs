//! In-memory session store.

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::Result;
use crate::error::StorageError;
use crate::traits::SessionStore;

/// A process-local [`SessionStore`].
///
/// Contents vanish with the process. An optional byte quota mimics the
/// "quota exceeded" failure of browser storage.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
    quota: Option<usize>,
}

impl MemoryStore {
    /// Create an empty store without a quota.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty store that holds at most `bytes` of keys plus values.
    pub fn with_quota(bytes: usize) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            quota: Some(bytes),
        }
    }

    /// Create a store pre-populated with one entry.
    pub fn with_entry(key: impl Into<String>, value: impl Into<String>) -> Self {
        let store = Self::new();
        if let Ok(mut entries) = store.entries.write() {
            entries.insert(key.into(), value.into());
        }
        store
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, HashMap<String, String>>> {
        self.entries.read().map_err(|_| {
            StorageError::Unavailable {
                message: "memory store lock poisoned".to_string(),
            }
            .into()
        })
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, HashMap<String, String>>> {
        self.entries.write().map_err(|_| {
            StorageError::Unavailable {
                message: "memory store lock poisoned".to_string(),
            }
            .into()
        })
    }
}

impl SessionStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.read()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.write()?;

        if let Some(quota) = self.quota {
            let used: usize = entries
                .iter()
                .filter(|(k, _)| k.as_str() != key)
                .map(|(k, v)| k.len() + v.len())
                .sum();
            if used + key.len() + value.len() > quota {
                return Err(StorageError::QuotaExceeded {
                    key: key.to_string(),
                }
                .into());
            }
        }

        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.write()?.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn set_get_remove() {
        let store = MemoryStore::new();
        assert_eq!(store.get("user").unwrap(), None);

        store.set("user", "a").unwrap();
        store.set("user", "b").unwrap();
        assert_eq!(store.get("user").unwrap().as_deref(), Some("b"));

        store.remove("user").unwrap();
        store.remove("user").unwrap();
        assert_eq!(store.get("user").unwrap(), None);
    }

    #[test]
    fn quota_rejects_oversized_values() {
        let store = MemoryStore::with_quota(8);
        store.set("user", "abcd").unwrap();
        // Replacing an entry only counts the new value.
        store.set("user", "wxyz").unwrap();

        let err = store.set("user", "too long for quota").unwrap_err();
        assert!(matches!(
            err,
            Error::Storage(StorageError::QuotaExceeded { .. })
        ));
        assert_eq!(store.get("user").unwrap().as_deref(), Some("wxyz"));
    }
}
