//! # MiniCommerce Core
//!
//! Domain layer for the MiniCommerce authentication backend: entities,
//! repository interfaces, the token lifecycle and the auth use cases.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::entities::{AccessClaims, IssuedTokens, RefreshToken, Role, User};
pub use domain::value_objects::{AuthResponse, UserName, UserProfile};
pub use errors::{AuthError, DomainError, DomainResult, TokenError};
pub use repositories::{TokenRepository, UserRepository};
pub use services::{
    AuthService, LoginCommand, PasswordHasher, RefreshTokenCommand, RegisterCommand,
    TokenService, TokenServiceConfig,
};
