//! Origin type scoping the session store.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use url::Url;

use crate::error::{Error, InvalidInputError};

/// A web origin (`scheme://host[:port]`).
///
/// Session stores are scoped to an origin: two applications served from
/// different origins never see each other's identity record.
///
/// # Example
///
/// ```
/// use tollgate_core::Origin;
///
/// let origin = Origin::new("http://localhost:4200/login").unwrap();
/// assert_eq!(origin.as_str(), "http://localhost:4200");
/// assert_eq!(origin.dir_name(), "http_localhost_4200");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Origin(String);

impl Origin {
    /// Parse the origin out of a URL, discarding path, query and fragment.
    pub fn new(s: impl AsRef<str>) -> Result<Self, Error> {
        let s = s.as_ref();
        let url = Url::parse(s).map_err(|e| InvalidInputError::Origin {
            value: s.to_string(),
            reason: e.to_string(),
        })?;

        let origin = url.origin();
        if !origin.is_tuple() {
            return Err(InvalidInputError::Origin {
                value: s.to_string(),
                reason: "must be an http(s) URL with a host".to_string(),
            }
            .into());
        }

        Ok(Self(origin.ascii_serialization()))
    }

    /// Returns the serialized origin.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns a filesystem-safe directory name for this origin.
    pub fn dir_name(&self) -> String {
        // Windows does not allow ':' in path segments.
        self.0
            .replace("://", "_")
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '.' || c == '-' { c } else { '_' })
            .collect()
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Origin {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for Origin {
    type Error = Error;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<Origin> for String {
    fn from(origin: Origin) -> Self {
        origin.0
    }
}
