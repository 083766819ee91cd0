//! Unit tests for mock user repository implementation

use uuid::Uuid;

use crate::domain::entities::user::User;
use crate::domain::value_objects::UserName;
use crate::errors::DomainError;
use crate::repositories::user::{MockUserRepository, UserRepository};

fn user(email: &str) -> User {
    User::new(
        email.to_string(),
        "hash".to_string(),
        UserName::new("Test", "User").unwrap(),
        None,
    )
}

#[tokio::test]
async fn test_create_and_find_user() {
    let repo = MockUserRepository::new();
    let created = repo.create(user("a@example.com")).await.unwrap();

    let by_email = repo.find_by_email("a@example.com").await.unwrap().unwrap();
    let by_id = repo.find_by_id(created.id).await.unwrap().unwrap();

    assert_eq!(by_email.id, created.id);
    assert_eq!(by_id.email, "a@example.com");
    assert!(repo.exists_by_email("a@example.com").await.unwrap());
    assert!(!repo.exists_by_email("b@example.com").await.unwrap());
}

#[tokio::test]
async fn test_duplicate_email_is_rejected() {
    let repo = MockUserRepository::new();
    repo.create(user("dup@example.com")).await.unwrap();

    let result = repo.create(user("dup@example.com")).await;
    assert!(matches!(result, Err(DomainError::BusinessRule { .. })));
}

#[tokio::test]
async fn test_update_user() {
    let repo = MockUserRepository::new();
    let mut created = repo.create(user("u@example.com")).await.unwrap();

    created.change_password_hash("rehashed".to_string());
    repo.update(created.clone()).await.unwrap();

    let stored = repo.find_by_id(created.id).await.unwrap().unwrap();
    assert_eq!(stored.password_hash, "rehashed");

    let missing = repo.update(user("ghost@example.com")).await;
    assert!(matches!(missing, Err(DomainError::NotFound { .. })));
    assert!(repo.find_by_id(Uuid::new_v4()).await.unwrap().is_none());
}
