//! Core traits for the collaborators the session subsystem talks to.

mod directory;
mod navigator;
mod store;
mod transport;

pub use directory::{NewAccount, UserDirectory};
pub use navigator::{Navigator, RecordingNavigator};
pub use store::SessionStore;
pub use transport::{Middleware, Transport};
