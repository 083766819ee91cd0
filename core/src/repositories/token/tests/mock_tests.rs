//! Unit tests for the in-memory token repository

use chrono::{Duration, Utc};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::token::RefreshToken;
use crate::errors::{AuthError, DomainError};
use crate::repositories::token::{MockTokenRepository, TokenRepository};

fn token_for(user_id: Uuid, value: &str) -> RefreshToken {
    RefreshToken::new(user_id, value.to_string(), Duration::days(7))
}

#[tokio::test]
async fn test_save_and_find_refresh_token() {
    let repo = MockTokenRepository::new();
    let token = token_for(Uuid::new_v4(), "value-1");

    let saved = repo.save_refresh_token(token.clone()).await.unwrap();
    assert_eq!(saved.id, token.id);

    let found = repo.find_by_token("value-1").await.unwrap().unwrap();
    assert_eq!(found, token);

    assert!(repo.find_by_token("missing").await.unwrap().is_none());
}

#[tokio::test]
async fn test_duplicate_token_is_rejected() {
    let repo = MockTokenRepository::new();
    let user_id = Uuid::new_v4();

    repo.save_refresh_token(token_for(user_id, "same")).await.unwrap();
    let result = repo.save_refresh_token(token_for(user_id, "same")).await;

    assert!(matches!(result, Err(DomainError::Storage { .. })));
    assert_eq!(repo.len().await, 1);
}

#[tokio::test]
async fn test_find_by_token_returns_revoked_rows() {
    let repo = MockTokenRepository::new();
    let user_id = Uuid::new_v4();
    repo.save_refresh_token(token_for(user_id, "value")).await.unwrap();

    repo.revoke_all_user_tokens(user_id).await.unwrap();

    let found = repo.find_by_token("value").await.unwrap().unwrap();
    assert!(found.is_revoked);
    assert!(!repo.is_token_valid("value").await.unwrap());
}

#[tokio::test]
async fn test_revoke_all_user_tokens_is_idempotent_and_scoped() {
    let repo = MockTokenRepository::new();
    let alice = Uuid::new_v4();
    let bob = Uuid::new_v4();

    repo.save_refresh_token(token_for(alice, "a1")).await.unwrap();
    repo.save_refresh_token(token_for(alice, "a2")).await.unwrap();
    repo.save_refresh_token(token_for(bob, "b1")).await.unwrap();

    assert_eq!(repo.revoke_all_user_tokens(alice).await.unwrap(), 2);
    assert_eq!(repo.revoke_all_user_tokens(alice).await.unwrap(), 0);
    assert_eq!(repo.revoke_all_user_tokens(Uuid::new_v4()).await.unwrap(), 0);

    assert!(repo.find_valid_by_user(alice).await.unwrap().is_empty());
    assert_eq!(repo.find_valid_by_user(bob).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_find_valid_by_user_skips_expired() {
    let repo = MockTokenRepository::new();
    let user_id = Uuid::new_v4();

    let mut expired = token_for(user_id, "old");
    expired.expires_at = Utc::now() - Duration::minutes(1);
    repo.save_refresh_token(expired).await.unwrap();
    repo.save_refresh_token(token_for(user_id, "new")).await.unwrap();

    let valid = repo.find_valid_by_user(user_id).await.unwrap();
    assert_eq!(valid.len(), 1);
    assert_eq!(valid[0].token, "new");
}

#[tokio::test]
async fn test_rotate_leaves_single_live_token() {
    let repo = MockTokenRepository::new();
    let user_id = Uuid::new_v4();

    repo.save_refresh_token(token_for(user_id, "first")).await.unwrap();
    repo.rotate_user_tokens(None, token_for(user_id, "second")).await.unwrap();

    let valid = repo.find_valid_by_user(user_id).await.unwrap();
    assert_eq!(valid.len(), 1);
    assert_eq!(valid[0].token, "second");
    assert!(repo.find_by_token("first").await.unwrap().unwrap().is_revoked);
}

#[tokio::test]
async fn test_rotate_rejects_duplicate_without_revoking() {
    let repo = MockTokenRepository::new();
    let user_id = Uuid::new_v4();
    repo.save_refresh_token(token_for(user_id, "live")).await.unwrap();

    let result = repo.rotate_user_tokens(None, token_for(user_id, "live")).await;

    assert!(result.is_err());
    assert!(repo.is_token_valid("live").await.unwrap());
}

#[tokio::test]
async fn test_rotate_consumes_presented_token_once() {
    let repo = MockTokenRepository::new();
    let user_id = Uuid::new_v4();
    repo.save_refresh_token(token_for(user_id, "current")).await.unwrap();

    repo.rotate_user_tokens(Some("current"), token_for(user_id, "next"))
        .await
        .unwrap();
    let reuse = repo
        .rotate_user_tokens(Some("current"), token_for(user_id, "other"))
        .await;

    assert!(matches!(
        reuse,
        Err(DomainError::Auth(AuthError::TokenExpiredOrRevoked))
    ));
    assert!(repo.find_by_token("other").await.unwrap().is_none());
    assert!(repo.is_token_valid("next").await.unwrap());
}

#[tokio::test]
async fn test_rotate_rejects_presented_token_of_other_user() {
    let repo = MockTokenRepository::new();
    let alice = Uuid::new_v4();
    let bob = Uuid::new_v4();
    repo.save_refresh_token(token_for(alice, "alice-token")).await.unwrap();

    let result = repo
        .rotate_user_tokens(Some("alice-token"), token_for(bob, "bob-token"))
        .await;

    assert!(matches!(
        result,
        Err(DomainError::Auth(AuthError::TokenExpiredOrRevoked))
    ));
    assert!(repo.is_token_valid("alice-token").await.unwrap());
}

#[tokio::test]
async fn test_concurrent_rotations_keep_one_live_token() {
    let repo = Arc::new(MockTokenRepository::new());
    let user_id = Uuid::new_v4();

    let handles: Vec<_> = (0..20)
        .map(|i| {
            let repo = Arc::clone(&repo);
            tokio::spawn(async move {
                repo.rotate_user_tokens(None, token_for(user_id, &format!("t{}", i)))
                    .await
                    .unwrap();
            })
        })
        .collect();

    for handle in handles {
        handle.await.unwrap();
    }

    assert_eq!(repo.len().await, 20);
    assert_eq!(repo.find_valid_by_user(user_id).await.unwrap().len(), 1);
}
