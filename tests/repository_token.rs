mod common;

use sqlx::PgPool;
use std::sync::Arc;
use lms_catalog::domain::repositories::TokenRepository;
use lms_catalog::infrastructure::persistence::PgTokenRepository;

#[sqlx::test]
async fn test_create_token(pool: PgPool) {
    let user = common::create_test_user(&pool, "t@example.com", "Token Owner").await;
    let repo = PgTokenRepository::new(Arc::new(pool));

    let token = repo.create_token("test-token", "hash123", user).await.unwrap();

    assert_eq!(token.name, "test-token");
    assert_eq!(token.token_hash, "hash123");
    assert_eq!(token.user_id, user);
    assert!(token.revoked_at.is_none());
}

#[sqlx::test]
async fn test_find_owner_valid(pool: PgPool) {
    let user = common::create_test_user(&pool, "t@example.com", "Token Owner").await;
    let repo = PgTokenRepository::new(Arc::new(pool));

    repo.create_token("valid-token", "validhash", user).await.unwrap();

    assert_eq!(repo.find_owner("validhash").await.unwrap(), Some(user));
}

#[sqlx::test]
async fn test_find_owner_unknown(pool: PgPool) {
    let repo = PgTokenRepository::new(Arc::new(pool));

    assert_eq!(repo.find_owner("nonexistent").await.unwrap(), None);
}

#[sqlx::test]
async fn test_find_owner_revoked(pool: PgPool) {
    let user = common::create_test_user(&pool, "t@example.com", "Token Owner").await;
    let repo = PgTokenRepository::new(Arc::new(pool));

    let token = repo
        .create_token("revoked-token", "revokedhash", user)
        .await
        .unwrap();
    repo.revoke_token(token.id).await.unwrap();

    assert_eq!(repo.find_owner("revokedhash").await.unwrap(), None);
}

#[sqlx::test]
async fn test_update_last_used(pool: PgPool) {
    let user = common::create_test_user(&pool, "t@example.com", "Token Owner").await;
    let repo = PgTokenRepository::new(Arc::new(pool.clone()));

    let token = repo
        .create_token("update-token", "updatehash", user)
        .await
        .unwrap();

    repo.update_last_used("updatehash").await.unwrap();

    let stored = repo.find_by_id(token.id).await.unwrap().unwrap();
    assert!(stored.last_used_at.is_some());
}

#[sqlx::test]
async fn test_find_by_name(pool: PgPool) {
    let user = common::create_test_user(&pool, "t@example.com", "Token Owner").await;
    let repo = PgTokenRepository::new(Arc::new(pool));

    repo.create_token("unique-name", "namehash", user).await.unwrap();

    let token = repo.find_by_name("unique-name").await.unwrap();
    assert_eq!(token.unwrap().name, "unique-name");
}

#[sqlx::test]
async fn test_revoke_already_revoked(pool: PgPool) {
    let user = common::create_test_user(&pool, "t@example.com", "Token Owner").await;
    let repo = PgTokenRepository::new(Arc::new(pool));

    let token = repo
        .create_token("double-revoke", "doublehash", user)
        .await
        .unwrap();

    repo.revoke_token(token.id).await.unwrap();
    let result = repo.revoke_token(token.id).await;

    assert!(matches!(
        result,
        Err(lms_catalog::AppError::NotFound { .. })
    ));
}

#[sqlx::test]
async fn test_issued_token_authenticates_as_owner(pool: PgPool) {
    let user = common::create_test_user(&pool, "t@example.com", "Token Owner").await;
    let raw = common::create_test_token(&pool, "issued", user).await;
    let state = common::create_test_state(pool);

    let actor = state.auth_service.authenticate(&raw).await.unwrap();
    assert_eq!(actor.user_id, user);

    let rejected = state.auth_service.authenticate("wrong").await;
    assert!(matches!(
        rejected,
        Err(lms_catalog::AppError::Unauthorized { .. })
    ));
}
