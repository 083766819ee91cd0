//! Value objects representing immutable domain concepts.

pub mod auth_response;
pub mod user_name;

// Re-export commonly used types
pub use auth_response::{AuthResponse, UserProfile};
pub use user_name::UserName;
