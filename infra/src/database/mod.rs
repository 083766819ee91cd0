//! Database module - MySQL implementations using SQLx
//!
//! Connection pool management, schema migrations and the repository
//! implementations for users and refresh tokens.

pub mod connection;
pub mod mysql;

// Re-export commonly used types
pub use connection::{DatabasePool, PoolStatistics};
pub use mysql::{MySqlTokenRepository, MySqlUserRepository};
