//! Domain entities representing core business objects.

pub mod token;
pub mod user;

// Re-export commonly used types
pub use token::{AccessClaims, IssuedTokens, RefreshToken};
pub use user::{Role, User};
