//! In-memory implementation of TokenRepository for tests

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::token::RefreshToken;
use crate::errors::{AuthError, DomainError};

use super::r#trait::TokenRepository;

/// Mock token repository keyed by token value
///
/// Every mutation takes the single write lock, which makes
/// `rotate_user_tokens` atomic.
#[derive(Clone)]
pub struct MockTokenRepository {
    tokens: Arc<RwLock<HashMap<String, RefreshToken>>>,
}

impl MockTokenRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self {
            tokens: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Total number of stored rows, revoked ones included
    pub async fn len(&self) -> usize {
        self.tokens.read().await.len()
    }

    /// Overwrite a stored row, used to age tokens in tests
    pub async fn replace(&self, token: RefreshToken) {
        self.tokens.write().await.insert(token.token.clone(), token);
    }
}

impl Default for MockTokenRepository {
    fn default() -> Self {
        Self::new()
    }
}

fn insert_unique(
    tokens: &mut HashMap<String, RefreshToken>,
    token: RefreshToken,
) -> Result<RefreshToken, DomainError> {
    if tokens.contains_key(&token.token) {
        return Err(DomainError::storage("Duplicate refresh token"));
    }

    tokens.insert(token.token.clone(), token.clone());
    Ok(token)
}

fn revoke_all(tokens: &mut HashMap<String, RefreshToken>, user_id: Uuid) -> usize {
    let mut count = 0;
    for token in tokens.values_mut() {
        if token.user_id == user_id && !token.is_revoked {
            token.revoke();
            count += 1;
        }
    }
    count
}

#[async_trait]
impl TokenRepository for MockTokenRepository {
    async fn save_refresh_token(&self, token: RefreshToken) -> Result<RefreshToken, DomainError> {
        let mut tokens = self.tokens.write().await;
        insert_unique(&mut tokens, token)
    }

    async fn find_by_token(&self, token: &str) -> Result<Option<RefreshToken>, DomainError> {
        let tokens = self.tokens.read().await;
        Ok(tokens.get(token).cloned())
    }

    async fn find_valid_by_user(&self, user_id: Uuid) -> Result<Vec<RefreshToken>, DomainError> {
        let tokens = self.tokens.read().await;
        Ok(tokens
            .values()
            .filter(|t| t.user_id == user_id && t.is_valid())
            .cloned()
            .collect())
    }

    async fn revoke_all_user_tokens(&self, user_id: Uuid) -> Result<usize, DomainError> {
        let mut tokens = self.tokens.write().await;
        Ok(revoke_all(&mut tokens, user_id))
    }

    async fn rotate_user_tokens(
        &self,
        presented: Option<&str>,
        token: RefreshToken,
    ) -> Result<RefreshToken, DomainError> {
        let mut tokens = self.tokens.write().await;
        if let Some(presented) = presented {
            match tokens.get(presented) {
                Some(current) if current.user_id == token.user_id && current.is_valid() => {}
                _ => return Err(AuthError::TokenExpiredOrRevoked.into()),
            }
        }
        if tokens.contains_key(&token.token) {
            return Err(DomainError::storage("Duplicate refresh token"));
        }
        revoke_all(&mut tokens, token.user_id);
        insert_unique(&mut tokens, token)
    }
}
