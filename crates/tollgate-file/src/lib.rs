//! tollgate-file - Filesystem-backed session store and user directory.

mod directory;
mod store;

pub use directory::{FileUserDirectory, LocalUser};
pub use store::FileSessionStore;
