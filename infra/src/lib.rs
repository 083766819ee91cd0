//! # Infrastructure Layer
//!
//! Concrete adapters for the MiniCommerce core:
//! - **Database**: MySQL connection pool, migrations and repository
//!   implementations using SQLx
//! - **Security**: bcrypt password hashing

/// Database module - MySQL implementations using SQLx
pub mod database;

/// Password hashing
pub mod security;

pub use database::{DatabasePool, MySqlTokenRepository, MySqlUserRepository};
pub use security::BcryptPasswordHasher;

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Schema migration failure
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
