//! tollgate-http - HTTP transport and user directory.

mod client;
mod directory;
mod transport;

pub use client::ApiClient;
pub use directory::HttpUserDirectory;
pub use transport::ReqwestTransport;
