//! Static route classification table.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, InvalidInputError};
use crate::types::RoutePath;

/// How a navigable path is gated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RouteClass {
    /// Only reachable without a session (login, register).
    PublicUnauthenticatedOnly,
    /// Requires a session.
    Protected,
    /// Reachable by everyone.
    Public,
}

impl fmt::Display for RouteClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteClass::PublicUnauthenticatedOnly => f.write_str("public-unauthenticated-only"),
            RouteClass::Protected => f.write_str("protected"),
            RouteClass::Public => f.write_str("public"),
        }
    }
}

/// A path pattern in the classification table.
///
/// `/profile` matches exactly; `/layout*` matches `/layout` and every path
/// below it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum RoutePattern {
    /// Matches one path.
    Exact(RoutePath),
    /// Matches a path and all of its descendants.
    Prefix(RoutePath),
}

impl RoutePattern {
    /// Parse a pattern; a trailing `*` makes it a prefix pattern.
    pub fn new(s: impl AsRef<str>) -> Result<Self, Error> {
        let s = s.as_ref();
        let invalid = |reason: &str| -> Error {
            InvalidInputError::RoutePattern {
                value: s.to_string(),
                reason: reason.to_string(),
            }
            .into()
        };

        if s.contains(['?', '#']) {
            return Err(invalid("must not contain a query or fragment"));
        }

        match s.strip_suffix('*') {
            Some(prefix) if prefix.contains('*') => Err(invalid("only one trailing '*' is allowed")),
            Some(prefix) => RoutePath::new(prefix)
                .map(RoutePattern::Prefix)
                .map_err(|_| invalid("must start with '/'")),
            None if s.contains('*') => Err(invalid("'*' is only allowed at the end")),
            None => RoutePath::new(s)
                .map(RoutePattern::Exact)
                .map_err(|_| invalid("must start with '/'")),
        }
    }

    /// Returns true if `path` is matched by this pattern.
    pub fn matches(&self, path: &RoutePath) -> bool {
        match self {
            RoutePattern::Exact(p) => p == path,
            RoutePattern::Prefix(p) => path.starts_with(p),
        }
    }

    fn exact(s: &str) -> Self {
        RoutePattern::Exact(RoutePath::from_normalized(s))
    }

    fn prefix(s: &str) -> Self {
        RoutePattern::Prefix(RoutePath::from_normalized(s))
    }
}

impl fmt::Display for RoutePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoutePattern::Exact(p) => write!(f, "{}", p),
            RoutePattern::Prefix(p) if p.as_str() == "/" => f.write_str("/*"),
            RoutePattern::Prefix(p) => write!(f, "{}*", p),
        }
    }
}

impl FromStr for RoutePattern {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for RoutePattern {
    type Error = Error;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<RoutePattern> for String {
    fn from(pattern: RoutePattern) -> Self {
        pattern.to_string()
    }
}

/// One row of the classification table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteRule {
    /// Path pattern.
    pub path: RoutePattern,
    /// Classification applied to matching paths.
    pub class: RouteClass,
}

/// Maps navigable paths to their [`RouteClass`].
///
/// Exact patterns win over prefix patterns; among prefixes the longest wins.
/// Paths matched by nothing are [`RouteClass::Public`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RouteTable {
    rules: Vec<RouteRule>,
}

impl RouteTable {
    /// Create a table from explicit rules.
    pub fn new(rules: Vec<RouteRule>) -> Self {
        Self { rules }
    }

    /// Create a table with no rules; everything is public.
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    /// Add a rule.
    pub fn with(mut self, path: RoutePattern, class: RouteClass) -> Self {
        self.rules.push(RouteRule { path, class });
        self
    }

    /// Returns the rules in insertion order.
    pub fn rules(&self) -> &[RouteRule] {
        &self.rules
    }

    /// Classify `path`.
    pub fn classify(&self, path: &RoutePath) -> RouteClass {
        let exact = self.rules.iter().find(|rule| {
            matches!(rule.path, RoutePattern::Exact(_)) && rule.path.matches(path)
        });

        if let Some(rule) = exact {
            return rule.class;
        }

        self.rules
            .iter()
            .filter_map(|rule| match &rule.path {
                RoutePattern::Prefix(prefix) if path.starts_with(prefix) => {
                    Some((prefix.segments().count(), rule.class))
                }
                _ => None,
            })
            .max_by_key(|(depth, _)| *depth)
            .map(|(_, class)| class)
            .unwrap_or(RouteClass::Public)
    }
}

impl Default for RouteTable {
    /// The application's route table:
    ///
    /// | path | classification |
    /// |---|---|
    /// | `/login`, `/register` | public-unauthenticated-only |
    /// | `/`, `/mainpage` | public |
    /// | `/layout*`, `/profile`, `/dashboard`, `/weather` | protected |
    fn default() -> Self {
        Self::empty()
            .with(RoutePattern::exact("/login"), RouteClass::PublicUnauthenticatedOnly)
            .with(RoutePattern::exact("/register"), RouteClass::PublicUnauthenticatedOnly)
            .with(RoutePattern::exact("/"), RouteClass::Public)
            .with(RoutePattern::exact("/mainpage"), RouteClass::Public)
            .with(RoutePattern::prefix("/layout"), RouteClass::Protected)
            .with(RoutePattern::exact("/profile"), RouteClass::Protected)
            .with(RoutePattern::exact("/dashboard"), RouteClass::Protected)
            .with(RoutePattern::exact("/weather"), RouteClass::Protected)
    }
}
