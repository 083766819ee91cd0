//! Password hashing capability

use crate::errors::DomainError;

/// One-way password hashing used by registration and login
///
/// Implementations live outside the domain (bcrypt in infrastructure).
pub trait PasswordHasher: Send + Sync {
    /// Hash a plaintext password
    fn hash(&self, password: &str) -> Result<String, DomainError>;

    /// Check a plaintext password against a stored hash
    ///
    /// Returns `Ok(false)` on mismatch; errors are reserved for unusable hashes
    /// or backend failures.
    fn verify(&self, password: &str, hash: &str) -> Result<bool, DomainError>;
}
