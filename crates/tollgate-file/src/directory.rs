//! Filesystem-backed user directory.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use bcrypt::{DEFAULT_COST, hash, verify};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};
use uuid::Uuid;

use tollgate_core::error::{AuthError, Error, InvalidInputError, StorageError};
use tollgate_core::{Credentials, Identity, NewAccount, Result, UserDirectory, UserId, Username};

use crate::store::{map_io, with_lock, write_atomic};

/// A user row in `users.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocalUser {
    /// Sequential identifier, starting at 1.
    pub id: u64,
    /// Login name.
    pub username: String,
    /// Display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Password hash (bcrypt).
    pub password_hash: String,
    /// Opaque token issued at registration.
    pub token: String,
    /// When the user registered (RFC 3339).
    pub created_at: String,
}

impl LocalUser {
    fn to_identity(&self) -> Result<Identity> {
        let mut identity = Identity::new(Username::new(&self.username)?)
            .with_id(UserId::from(self.id))
            .with_token(&self.token);
        identity.name = self.name.clone();
        Ok(identity)
    }
}

/// A user directory kept in a single JSON file.
///
/// Passwords are stored as bcrypt hashes. Each user is issued a random
/// opaque token at registration; logging in hands that token to the session.
#[derive(Debug, Clone)]
pub struct FileUserDirectory {
    root: PathBuf,
    cost: u32,
}

impl FileUserDirectory {
    /// Create a directory rooted at `root`.
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            cost: DEFAULT_COST,
        }
    }

    /// Override the bcrypt cost used for new passwords.
    pub fn with_cost(mut self, cost: u32) -> Self {
        self.cost = cost;
        self
    }

    /// Get the root directory path.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn users_path(&self) -> PathBuf {
        self.root.join("users.json")
    }

    fn lock_path(&self) -> PathBuf {
        self.root.join("users.lock")
    }

    /// All registered users.
    pub fn list_users(&self) -> Result<Vec<LocalUser>> {
        let content = match fs::read_to_string(self.users_path()) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(map_io(e)),
        };

        serde_json::from_str(&content).map_err(|e| {
            Error::InvalidInput(InvalidInputError::Other {
                message: format!("users.json is malformed: {}", e),
            })
        })
    }

    /// Find a user by username.
    pub fn find_user_by_username(&self, username: &str) -> Result<Option<LocalUser>> {
        let users = self.list_users()?;
        Ok(users.into_iter().find(|u| u.username == username))
    }

    fn save_users(&self, users: &[LocalUser]) -> Result<()> {
        let content = serde_json::to_string_pretty(users).map_err(|e| StorageError::Serialize {
            message: e.to_string(),
        })?;
        write_atomic(&self.users_path(), &content)
    }
}

#[async_trait]
impl UserDirectory for FileUserDirectory {
    #[instrument(skip(self, credentials), fields(username = %credentials.username()))]
    async fn find(&self, credentials: &Credentials) -> Result<Option<Identity>> {
        let Some(user) = self.find_user_by_username(credentials.username())? else {
            debug!("No such user");
            return Ok(None);
        };

        let ok = verify(credentials.password(), &user.password_hash).map_err(|e| {
            AuthError::Verification {
                message: e.to_string(),
            }
        })?;

        if !ok {
            debug!("Password mismatch");
            return Ok(None);
        }

        user.to_identity().map(Some)
    }

    #[instrument(skip(self, account), fields(username = %account.username))]
    async fn register(&self, account: NewAccount) -> Result<Identity> {
        if account.password.is_empty() {
            return Err(InvalidInputError::Other {
                message: "password must not be empty".to_string(),
            }
            .into());
        }

        let password_hash = hash(&account.password, self.cost).map_err(|e| {
            AuthError::Verification {
                message: e.to_string(),
            }
        })?;

        let user = with_lock(&self.lock_path(), || {
            let mut users = self.list_users()?;

            if users.iter().any(|u| u.username == account.username.as_str()) {
                return Err(AuthError::UsernameTaken {
                    username: account.username.to_string(),
                }
                .into());
            }

            let user = LocalUser {
                id: users.iter().map(|u| u.id).max().unwrap_or(0) + 1,
                username: account.username.to_string(),
                name: account.name.clone(),
                password_hash,
                token: Uuid::new_v4().simple().to_string(),
                created_at: Utc::now().to_rfc3339(),
            };

            users.push(user.clone());
            self.save_users(&users)?;
            Ok(user)
        })?;

        debug!(id = user.id, "Registered local user");
        user.to_identity()
    }
}
