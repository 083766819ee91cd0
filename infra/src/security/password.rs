//! bcrypt-backed password hashing

use mc_core::errors::DomainError;
use mc_core::services::PasswordHasher;

/// `PasswordHasher` implementation using bcrypt
#[derive(Debug, Clone)]
pub struct BcryptPasswordHasher {
    cost: u32,
}

impl BcryptPasswordHasher {
    /// Create a hasher with an explicit work factor (4..=31)
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }
}

impl Default for BcryptPasswordHasher {
    fn default() -> Self {
        Self::new(bcrypt::DEFAULT_COST)
    }
}

impl PasswordHasher for BcryptPasswordHasher {
    fn hash(&self, password: &str) -> Result<String, DomainError> {
        bcrypt::hash(password, self.cost).map_err(|e| {
            tracing::error!(error = %e, "Password hashing failed");
            DomainError::Internal {
                message: format!("Password hashing failed: {}", e),
            }
        })
    }

    fn verify(&self, password: &str, hash: &str) -> Result<bool, DomainError> {
        bcrypt::verify(password, hash).map_err(|e| {
            tracing::error!(error = %e, "Password verification failed");
            DomainError::Internal {
                message: format!("Password verification failed: {}", e),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hasher = BcryptPasswordHasher::new(4);
        let hash = hasher.hash("correct-horse").unwrap();

        assert_ne!(hash, "correct-horse");
        assert!(hasher.verify("correct-horse", &hash).unwrap());
        assert!(!hasher.verify("battery-staple", &hash).unwrap());
    }

    #[test]
    fn test_hashes_are_salted() {
        let hasher = BcryptPasswordHasher::new(4);
        let a = hasher.hash("same-password").unwrap();
        let b = hasher.hash("same-password").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_invalid_cost_is_an_error() {
        let hasher = BcryptPasswordHasher::new(2);
        assert!(matches!(
            hasher.hash("password1"),
            Err(DomainError::Internal { .. })
        ));
    }

    #[test]
    fn test_garbage_hash_is_an_error() {
        let hasher = BcryptPasswordHasher::default();
        assert_eq!(hasher.cost(), bcrypt::DEFAULT_COST);
        assert!(hasher.verify("password1", "not-a-bcrypt-hash").is_err());
    }
}
