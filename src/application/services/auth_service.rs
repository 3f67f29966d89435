//! Authentication service resolving bearer tokens to actors.

use hmac::{Hmac, Mac};
use rand::Rng;
use sha2::Sha256;
use std::sync::Arc;

use crate::domain::Actor;
use crate::domain::repositories::{ApiToken, TokenRepository};
use crate::error::AppError;
use serde_json::json;

type HmacSha256 = Hmac<Sha256>;

const TOKEN_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";
const TOKEN_LEN: usize = 48;

/// Service for authenticating API requests via Bearer tokens.
///
/// Tokens are hashed with HMAC-SHA256 (keyed by `signing_secret`) before storage
/// and comparison. A valid token resolves to the [`Actor`] that owns it.
pub struct AuthService<R: TokenRepository> {
    repository: Arc<R>,
    signing_secret: String,
}

impl<R: TokenRepository> AuthService<R> {
    /// Creates a new authentication service.
    ///
    /// # Arguments
    ///
    /// - `repository` - token repository for DB operations
    /// - `signing_secret` - HMAC key; must match the value used when tokens were created
    pub fn new(repository: Arc<R>, signing_secret: String) -> Self {
        Self {
            repository,
            signing_secret,
        }
    }

    /// Hashes a raw token with HMAC-SHA256 using the server signing secret.
    ///
    /// Returns a 64-character lowercase hex-encoded MAC.
    pub fn hash_token(&self, token: &str) -> Result<String, AppError> {
        let mut mac = HmacSha256::new_from_slice(self.signing_secret.as_bytes()).map_err(|_| {
            AppError::internal("Token signing secret is unusable", json!({}))
        })?;
        mac.update(token.as_bytes());
        Ok(hex::encode(mac.finalize().into_bytes()))
    }

    /// Authenticates a raw token and returns the actor it belongs to.
    ///
    /// On success the token's `last_used_at` is refreshed; a failure to do so
    /// does not fail the request.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] if the token is unknown or revoked.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn authenticate(&self, token: &str) -> Result<Actor, AppError> {
        let token_hash = self.hash_token(token)?;

        let Some(user_id) = self.repository.find_owner(&token_hash).await? else {
            return Err(AppError::unauthorized(
                "Unauthorized",
                json!({"reason": "Invalid or revoked token"}),
            ));
        };

        if let Err(e) = self.repository.update_last_used(&token_hash).await {
            tracing::warn!(error = %e, "Failed to record token usage");
        }

        Ok(Actor::new(user_id))
    }

    /// Generates a new token for `user_id` and stores its hash.
    ///
    /// Returns the stored record and the raw token, which cannot be recovered later.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the name is already used.
    pub async fn issue_token(
        &self,
        name: &str,
        user_id: i64,
    ) -> Result<(ApiToken, String), AppError> {
        let raw = generate_token();
        let token_hash = self.hash_token(&raw)?;
        let token = self
            .repository
            .create_token(name, &token_hash, user_id)
            .await?;
        Ok((token, raw))
    }
}

/// Generates a random 48-character alphanumeric token.
fn generate_token() -> String {
    let mut rng = rand::rng();

    (0..TOKEN_LEN)
        .map(|_| {
            let idx = rng.random_range(0..TOKEN_CHARSET.len());
            char::from(TOKEN_CHARSET[idx])
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockTokenRepository;
    use chrono::Utc;

    fn test_secret() -> String {
        "test-signing-secret".to_string()
    }

    #[tokio::test]
    async fn test_authenticate_resolves_actor() {
        let mut mock_repo = MockTokenRepository::new();

        let expected_hash = AuthService::new(Arc::new(MockTokenRepository::new()), test_secret())
            .hash_token("valid-token")
            .unwrap();

        mock_repo
            .expect_find_owner()
            .withf(move |hash| hash == expected_hash)
            .times(1)
            .returning(|_| Ok(Some(17)));
        mock_repo
            .expect_update_last_used()
            .times(1)
            .returning(|_| Ok(()));

        let service = AuthService::new(Arc::new(mock_repo), test_secret());

        let actor = service.authenticate("valid-token").await.unwrap();

        assert_eq!(actor, Actor::new(17));
    }

    #[tokio::test]
    async fn test_authenticate_invalid_token() {
        let mut mock_repo = MockTokenRepository::new();

        mock_repo
            .expect_find_owner()
            .times(1)
            .returning(|_| Ok(None));
        mock_repo.expect_update_last_used().never();

        let service = AuthService::new(Arc::new(mock_repo), test_secret());

        let result = service.authenticate("invalid-token").await;

        assert!(matches!(result.unwrap_err(), AppError::Unauthorized { .. }));
    }

    #[tokio::test]
    async fn test_authenticate_survives_last_used_failure() {
        let mut mock_repo = MockTokenRepository::new();

        mock_repo.expect_find_owner().returning(|_| Ok(Some(3)));
        mock_repo
            .expect_update_last_used()
            .returning(|_| Err(AppError::internal("Database error", json!({}))));

        let service = AuthService::new(Arc::new(mock_repo), test_secret());

        assert!(service.authenticate("token").await.is_ok());
    }

    #[test]
    fn test_hash_token_consistency() {
        let service = AuthService::new(Arc::new(MockTokenRepository::new()), test_secret());

        let hash1 = service.hash_token("test-token").unwrap();
        let hash2 = service.hash_token("test-token").unwrap();

        assert_eq!(hash1, hash2);
        assert_eq!(hash1.len(), 64);
    }

    #[test]
    fn test_hash_token_secret_matters() {
        let svc1 = AuthService::new(Arc::new(MockTokenRepository::new()), "secret-a".to_string());
        let svc2 = AuthService::new(Arc::new(MockTokenRepository::new()), "secret-b".to_string());

        assert_ne!(
            svc1.hash_token("token").unwrap(),
            svc2.hash_token("token").unwrap()
        );
    }

    #[tokio::test]
    async fn test_issue_token_stores_hash_not_raw() {
        let mut mock_repo = MockTokenRepository::new();

        mock_repo
            .expect_create_token()
            .withf(|name, hash, user_id| name == "ci" && hash.len() == 64 && *user_id == 9)
            .times(1)
            .returning(|name, hash, user_id| {
                Ok(ApiToken {
                    id: 1,
                    name: name.to_string(),
                    user_id,
                    token_hash: hash.to_string(),
                    created_at: Utc::now(),
                    last_used_at: None,
                    revoked_at: None,
                })
            });

        let service = AuthService::new(Arc::new(mock_repo), test_secret());

        let (token, raw) = service.issue_token("ci", 9).await.unwrap();

        assert_eq!(raw.len(), TOKEN_LEN);
        assert!(raw.chars().all(|c| c.is_ascii_alphanumeric()));
        assert_ne!(token.token_hash, raw);
        assert_eq!(token.token_hash, service.hash_token(&raw).unwrap());
    }
}
