//! Token service module for JWT management
//!
//! Issues access/refresh token pairs, rotates refresh tokens on use and
//! validates access tokens.

mod config;
mod service;


pub use config::TokenServiceConfig;
pub use service::TokenService;
