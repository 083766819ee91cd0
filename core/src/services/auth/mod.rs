//! Authentication service module
//!
//! Registration, login, refresh-token exchange and profile lookup.

mod commands;
mod password;
mod service;


pub use commands::{LoginCommand, RefreshTokenCommand, RegisterCommand};
pub use password::PasswordHasher;
pub use service::AuthService;
