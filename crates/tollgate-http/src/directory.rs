//! User directory backed by the REST `users` collection.

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, instrument, warn};

use tollgate_core::{Credentials, Identity, NewAccount, Result, UserDirectory};

use crate::client::ApiClient;

/// Collection holding user rows.
const USERS: &str = "users";

/// Request body for registration.
#[derive(Serialize)]
struct RegisterRequest<'a> {
    username: &'a str,
    password: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
    token: &'a str,
}

/// A directory that lists `GET {api}/users` and matches credentials
/// client-side.
///
/// Rows are matched on exact username and password. A matching row that
/// does not fit the identity schema is skipped. Passwords in the rows are
/// never carried into the returned [`Identity`].
#[derive(Debug, Clone)]
pub struct HttpUserDirectory {
    client: ApiClient,
}

impl HttpUserDirectory {
    /// Create a directory using `client`.
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Returns the underlying API client.
    pub fn client(&self) -> &ApiClient {
        &self.client
    }
}

fn matches(row: &Value, credentials: &Credentials) -> bool {
    row.get("username").and_then(Value::as_str) == Some(credentials.username())
        && row.get("password").and_then(Value::as_str) == Some(credentials.password())
}

#[async_trait]
impl UserDirectory for HttpUserDirectory {
    #[instrument(skip(self, credentials), fields(username = %credentials.username()))]
    async fn find(&self, credentials: &Credentials) -> Result<Option<Identity>> {
        let rows: Vec<Value> = self.client.get_json(USERS).await?;
        debug!(rows = rows.len(), "Fetched user rows");

        for row in rows.into_iter().filter(|r| matches(r, credentials)) {
            match serde_json::from_value::<Identity>(row) {
                Ok(identity) => return Ok(Some(identity)),
                Err(e) => warn!(error = %e, "Skipping malformed user row"),
            }
        }

        Ok(None)
    }

    #[instrument(skip(self, account), fields(username = %account.username))]
    async fn register(&self, account: NewAccount) -> Result<Identity> {
        let request = RegisterRequest {
            username: account.username.as_str(),
            password: &account.password,
            name: account.name.as_deref(),
            token: "",
        };

        let identity: Identity = self.client.post_json(USERS, &request).await?;
        debug!(id = ?identity.id, "Registered remote user");
        Ok(identity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn matching_requires_both_fields() {
        let credentials = Credentials::new("alice", "pw");

        assert!(matches(&json!({"username": "alice", "password": "pw"}), &credentials));
        assert!(!matches(&json!({"username": "alice", "password": "PW"}), &credentials));
        assert!(!matches(&json!({"username": "Alice", "password": "pw"}), &credentials));
        assert!(!matches(&json!({"username": "alice"}), &credentials));
        assert!(!matches(&json!({"username": "alice", "password": 1}), &credentials));
    }
}
