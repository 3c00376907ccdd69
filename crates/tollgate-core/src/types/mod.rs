//! Core tollgate types.
//!
//! These types enforce their invariants at construction time,
//! ensuring invalid states are unrepresentable.

mod api_url;
mod origin;
mod route_path;
mod user_id;
mod username;

pub use api_url::ApiUrl;
pub use origin::Origin;
pub use route_path::RoutePath;
pub use user_id::UserId;
pub use username::Username;
