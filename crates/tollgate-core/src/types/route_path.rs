//! Navigable route path type.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, InvalidInputError};

/// A normalized in-app route path such as `/dashboard`.
///
/// Normalization drops any query string or fragment, collapses repeated
/// slashes, and removes a trailing slash (except for the root `/`), so
/// `/login/?next=x` and `/login` name the same route.
///
/// # Example
///
/// ```
/// use tollgate_core::RoutePath;
///
/// let path = RoutePath::new("/layout//profile/?tab=1").unwrap();
/// assert_eq!(path.as_str(), "/layout/profile");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RoutePath(String);

impl RoutePath {
    /// Create a new route path, validating and normalizing it.
    ///
    /// # Errors
    ///
    /// Returns an error if the path is not absolute or contains whitespace.
    pub fn new(s: impl AsRef<str>) -> Result<Self, Error> {
        let raw = s.as_ref();
        let path = raw
            .split(['?', '#'])
            .next()
            .unwrap_or_default();

        if !path.starts_with('/') {
            return Err(InvalidInputError::RoutePath {
                value: raw.to_string(),
                reason: "must start with '/'".to_string(),
            }
            .into());
        }

        if path.chars().any(char::is_whitespace) {
            return Err(InvalidInputError::RoutePath {
                value: raw.to_string(),
                reason: "must not contain whitespace".to_string(),
            }
            .into());
        }

        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        Ok(Self(format!("/{}", segments.join("/"))))
    }

    /// The root route `/`.
    pub fn root() -> Self {
        Self("/".to_string())
    }

    /// Wrap a path literal that is already in normalized form.
    pub(crate) fn from_normalized(s: &str) -> Self {
        debug_assert!(s.starts_with('/') && (s == "/" || !s.ends_with('/')));
        Self(s.to_string())
    }

    /// Returns the path string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the non-empty path segments.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('/').filter(|s| !s.is_empty())
    }

    /// Returns true if `prefix` is this path or one of its ancestors.
    ///
    /// Matching is segment-aware: `/layout` is a prefix of `/layout/profile`
    /// but not of `/layouts`.
    pub fn starts_with(&self, prefix: &RoutePath) -> bool {
        let mut own = self.segments();
        prefix.segments().all(|p| own.next() == Some(p))
    }
}

impl fmt::Display for RoutePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for RoutePath {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for RoutePath {
    type Error = Error;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<RoutePath> for String {
    fn from(path: RoutePath) -> Self {
        path.0
    }
}

impl AsRef<str> for RoutePath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_query_fragment_and_slashes() {
        assert_eq!(RoutePath::new("/login?next=/x").unwrap().as_str(), "/login");
        assert_eq!(RoutePath::new("/login#top").unwrap().as_str(), "/login");
        assert_eq!(RoutePath::new("/dashboard/").unwrap().as_str(), "/dashboard");
        assert_eq!(RoutePath::new("//a///b").unwrap().as_str(), "/a/b");
    }

    #[test]
    fn root_stays_root() {
        assert_eq!(RoutePath::new("/").unwrap(), RoutePath::root());
        assert_eq!(RoutePath::new("/?q=1").unwrap(), RoutePath::root());
    }

    #[test]
    fn invalid_relative_path() {
        assert!(RoutePath::new("dashboard").is_err());
        assert!(RoutePath::new("").is_err());
    }

    #[test]
    fn invalid_whitespace() {
        assert!(RoutePath::new("/dash board").is_err());
    }

    #[test]
    fn segment_aware_prefix() {
        let layout = RoutePath::new("/layout").unwrap();
        assert!(RoutePath::new("/layout").unwrap().starts_with(&layout));
        assert!(RoutePath::new("/layout/profile").unwrap().starts_with(&layout));
        assert!(!RoutePath::new("/layouts").unwrap().starts_with(&layout));
        assert!(!RoutePath::root().starts_with(&layout));
        assert!(layout.starts_with(&RoutePath::root()));
    }
}
