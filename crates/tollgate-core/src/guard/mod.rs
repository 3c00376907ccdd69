//! Route guard.
//!
//! The guard is split in two: [`RouteGuard::decide`] is a pure function of
//! the target path and the authentication predicate, and
//! [`RouteGuard::can_activate`] applies that decision through a
//! [`Navigator`].

mod table;

pub use table::{RouteClass, RoutePattern, RouteRule, RouteTable};

use tracing::{debug, instrument};

use crate::session::SessionService;
use crate::traits::Navigator;
use crate::types::RoutePath;

/// Outcome of a guard evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    /// Commit the navigation unchanged.
    Allow,
    /// Refuse the navigation and go to the given route instead.
    Redirect(RoutePath),
}

impl GuardDecision {
    /// Returns true if the navigation may proceed.
    pub fn is_allowed(&self) -> bool {
        matches!(self, GuardDecision::Allow)
    }

    /// Returns the redirect target on a deny.
    pub fn redirect(&self) -> Option<&RoutePath> {
        match self {
            GuardDecision::Allow => None,
            GuardDecision::Redirect(to) => Some(to),
        }
    }
}

/// Decides whether a navigation may proceed.
///
/// Holds no per-navigation state; every call re-evaluates from scratch.
#[derive(Debug, Clone)]
pub struct RouteGuard {
    table: RouteTable,
    landing: RoutePath,
    login: RoutePath,
}

impl RouteGuard {
    /// Create a guard over `table`, redirecting to `/dashboard` and `/login`.
    pub fn new(table: RouteTable) -> Self {
        Self {
            table,
            landing: RoutePath::from_normalized("/dashboard"),
            login: RoutePath::from_normalized("/login"),
        }
    }

    /// Set the protected landing route used when a signed-in user hits a
    /// login-only page.
    pub fn with_landing(mut self, landing: RoutePath) -> Self {
        self.landing = landing;
        self
    }

    /// Set the login route used when an anonymous user hits protected content.
    pub fn with_login(mut self, login: RoutePath) -> Self {
        self.login = login;
        self
    }

    /// Returns the classification table.
    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    /// Returns the landing route.
    pub fn landing(&self) -> &RoutePath {
        &self.landing
    }

    /// Returns the login route.
    pub fn login(&self) -> &RoutePath {
        &self.login
    }

    /// Pure decision for `target` given the authentication predicate.
    pub fn decide(&self, target: &RoutePath, authenticated: bool) -> GuardDecision {
        match (authenticated, self.table.classify(target)) {
            (true, RouteClass::PublicUnauthenticatedOnly) => {
                GuardDecision::Redirect(self.landing.clone())
            }
            (false, RouteClass::Protected) => GuardDecision::Redirect(self.login.clone()),
            _ => GuardDecision::Allow,
        }
    }

    /// Decide for `target` using the current session state.
    pub fn check(&self, session: &SessionService, target: &RoutePath) -> GuardDecision {
        self.decide(target, session.is_authenticated())
    }

    /// Evaluate a navigation from `current` to `target`, redirecting through
    /// `navigator` when it is denied.
    ///
    /// Returns whether the navigation to `target` may be committed. On a deny
    /// the redirect is issued before returning, so the target is never
    /// rendered.
    #[instrument(skip(self, session, navigator), fields(%target))]
    pub fn can_activate(
        &self,
        session: &SessionService,
        target: &RoutePath,
        current: Option<&RoutePath>,
        navigator: &mut dyn Navigator,
    ) -> bool {
        let decision = self.check(session, target);

        match &decision {
            GuardDecision::Allow => {
                debug!(from = ?current.map(RoutePath::as_str), "Navigation allowed");
                true
            }
            GuardDecision::Redirect(to) => {
                debug!(from = ?current.map(RoutePath::as_str), redirect = %to, "Navigation denied");
                navigator.navigate(to);
                false
            }
        }
    }
}

impl Default for RouteGuard {
    fn default() -> Self {
        Self::new(RouteTable::default())
    }
}
