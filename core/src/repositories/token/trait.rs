//! Token repository trait defining the interface for refresh token persistence.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::token::RefreshToken;
use crate::errors::DomainError;

/// Repository trait for RefreshToken persistence
///
/// Rows are never deleted; revocation only flips `is_revoked` to `true`.
/// Implementations must make `rotate_user_tokens` atomic per user so that two
/// concurrent issuances for the same owner cannot both leave a live token.
#[async_trait]
pub trait TokenRepository: Send + Sync {
    /// Save a new refresh token
    ///
    /// # Returns
    /// * `Ok(RefreshToken)` - The stored token
    /// * `Err(DomainError)` - Save failed (e.g., duplicate token value)
    async fn save_refresh_token(&self, token: RefreshToken) -> Result<RefreshToken, DomainError>;

    /// Find a refresh token by its exact value
    ///
    /// Revoked and expired rows are returned too; callers decide validity.
    ///
    /// # Example
    /// ```no_run
    /// # use mc_core::repositories::TokenRepository;
    /// # async fn example(repo: &impl TokenRepository) -> Result<(), Box<dyn std::error::Error>> {
    /// match repo.find_by_token("base64-token").await? {
    ///     Some(token) if token.is_valid() => println!("live token for {}", token.user_id),
    ///     Some(_) => println!("revoked or expired"),
    ///     None => println!("unknown token"),
    /// }
    /// # Ok(())
    /// # }
    /// ```
    async fn find_by_token(&self, token: &str) -> Result<Option<RefreshToken>, DomainError>;

    /// Find all non-revoked, non-expired tokens of a user
    async fn find_valid_by_user(&self, user_id: Uuid) -> Result<Vec<RefreshToken>, DomainError>;

    /// Revoke every non-revoked token of a user
    ///
    /// Idempotent. Returns the number of rows that changed state.
    async fn revoke_all_user_tokens(&self, user_id: Uuid) -> Result<usize, DomainError>;

    /// Revoke all tokens of `token.user_id` and store `token`, as one step
    ///
    /// When `presented` is given it must still be a live token of the same
    /// owner at the moment of rotation, otherwise nothing changes and
    /// `AuthError::TokenExpiredOrRevoked` is returned. This makes a refresh
    /// token single-use even under concurrent exchanges.
    ///
    /// After success the stored token is the owner's only live token.
    async fn rotate_user_tokens(
        &self,
        presented: Option<&str>,
        token: RefreshToken,
    ) -> Result<RefreshToken, DomainError>;

    /// Check if a token exists and is neither revoked nor expired
    async fn is_token_valid(&self, token: &str) -> Result<bool, DomainError> {
        match self.find_by_token(token).await? {
            Some(token) => Ok(token.is_valid()),
            None => Ok(false),
        }
    }
}
