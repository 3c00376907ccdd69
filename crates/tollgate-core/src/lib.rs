//! tollgate-core - Session, route guard and request interceptor.
//!
//! The session subsystem of a small multi-page client application:
//!
//! - [`SessionService`] owns the identity slot in a [`SessionStore`] and
//!   answers "is anyone signed in?".
//! - [`RouteGuard`] decides whether a navigation may proceed, redirecting
//!   anonymous users away from protected views and signed-in users away
//!   from login pages.
//! - [`AuthInterceptor`] is the first stage of every [`Pipeline`] and adds
//!   `Authorization: Bearer <token>` from the stored identity.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use tollgate_core::{
//!     GuardDecision, Identity, MemoryStore, RouteGuard, RoutePath, SessionService, UserId,
//!     Username,
//! };
//!
//! let session = SessionService::new(Arc::new(MemoryStore::new()));
//! let guard = RouteGuard::default();
//! let dashboard = RoutePath::new("/dashboard").unwrap();
//!
//! assert_eq!(
//!     guard.check(&session, &dashboard),
//!     GuardDecision::Redirect(RoutePath::new("/login").unwrap())
//! );
//!
//! let alice = Identity::new(Username::new("alice").unwrap())
//!     .with_id(UserId::from(1))
//!     .with_token("T");
//! session.login(&alice).unwrap();
//! assert!(guard.check(&session, &dashboard).is_allowed());
//! ```

pub mod credentials;
pub mod error;
pub mod guard;
pub mod identity;
pub mod interceptor;
pub mod login;
pub mod memory;
pub mod pipeline;
pub mod request;
pub mod session;
pub mod tokens;
pub mod traits;
pub mod types;

pub use credentials::Credentials;
pub use error::Error;
pub use guard::{GuardDecision, RouteClass, RouteGuard, RoutePattern, RouteRule, RouteTable};
pub use identity::Identity;
pub use interceptor::AuthInterceptor;
pub use login::{LoginFlow, LoginOutcome};
pub use memory::MemoryStore;
pub use pipeline::{Next, Pipeline, PipelineBuilder};
pub use request::{IncomingResponse, OutgoingRequest};
pub use session::{SESSION_KEY, SessionService, SessionState};
pub use tokens::AccessToken;
pub use traits::{
    Middleware, Navigator, NewAccount, RecordingNavigator, SessionStore, Transport,
    UserDirectory,
};
pub use types::{ApiUrl, Origin, RoutePath, UserId, Username};

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
