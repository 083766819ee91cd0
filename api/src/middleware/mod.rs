pub mod auth;
pub mod cors;

pub use auth::{AuthContext, JwtAuth, TokenVerifier};
pub use cors::create_cors;
