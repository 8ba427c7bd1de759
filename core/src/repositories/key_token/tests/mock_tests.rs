//! Unit tests for mock key-token repository implementation

use crate::domain::entities::key_token::KeyToken;
use crate::errors::DomainError;
use crate::repositories::key_token::{KeyTokenRepository, MockKeyTokenRepository};

#[tokio::test]
async fn test_save_and_find_by_public_key() {
    let repo = MockKeyTokenRepository::new();
    let record = KeyToken::new("u1".to_string(), "pem-a".to_string(), "rt-1".to_string());

    let saved = repo.save(record.clone()).await.unwrap();
    assert_eq!(saved, record);

    let found = repo.find_by_public_key("pem-a").await.unwrap();
    assert_eq!(found, Some(record));
    assert!(repo.find_by_public_key("pem-b").await.unwrap().is_none());
}

#[tokio::test]
async fn test_save_same_public_key_replaces_tokens() {
    let repo = MockKeyTokenRepository::new();
    let first = KeyToken::new("u1".to_string(), "pem-a".to_string(), "rt-1".to_string());
    let first_id = first.id;
    repo.save(first).await.unwrap();

    let second = KeyToken::new("u1".to_string(), "pem-a".to_string(), "rt-2".to_string());
    let stored = repo.save(second).await.unwrap();

    assert_eq!(stored.id, first_id);
    assert_eq!(stored.refresh_tokens, vec!["rt-2".to_string()]);
    assert_eq!(repo.len().await, 1);
}

#[tokio::test]
async fn test_find_by_user_id() {
    let repo = MockKeyTokenRepository::new();
    repo.save(KeyToken::new("u1".to_string(), "pem-a".to_string(), "rt-1".to_string()))
        .await
        .unwrap();
    repo.save(KeyToken::new("u1".to_string(), "pem-b".to_string(), "rt-2".to_string()))
        .await
        .unwrap();
    repo.save(KeyToken::new("u2".to_string(), "pem-c".to_string(), "rt-3".to_string()))
        .await
        .unwrap();

    let records = repo.find_by_user_id("u1").await.unwrap();
    assert_eq!(records.len(), 2);
    assert!(records.iter().all(|r| r.user_id == "u1"));

    assert_eq!(repo.count_user_records("u2").await.unwrap(), 1);
    assert!(repo.find_by_user_id("nobody").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_find_by_refresh_token() {
    let repo = MockKeyTokenRepository::new();
    repo.save(KeyToken::new("u1".to_string(), "pem-a".to_string(), "rt-1".to_string()))
        .await
        .unwrap();

    let found = repo.find_by_refresh_token("rt-1").await.unwrap().unwrap();
    assert_eq!(found.public_key, "pem-a");
    assert!(repo.find_by_refresh_token("rt-404").await.unwrap().is_none());
}

#[tokio::test]
async fn test_failing_writes() {
    let repo = MockKeyTokenRepository::new();
    repo.fail_writes(true);

    let result = repo
        .save(KeyToken::new("u1".to_string(), "pem-a".to_string(), "rt-1".to_string()))
        .await;

    assert!(matches!(result, Err(DomainError::Persistence { .. })));
    assert_eq!(repo.len().await, 0);
}
