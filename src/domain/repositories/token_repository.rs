//! Repository trait for API token authentication.

use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// API token entity with metadata.
///
/// Tokens are stored as HMAC-SHA256 hashes and each one belongs to a user,
/// who becomes the request's actor when the token is presented.
#[derive(Debug, Clone)]
pub struct ApiToken {
    pub id: i64,
    pub name: String,
    pub user_id: i64,
    pub token_hash: String,
    pub created_at: DateTime<Utc>,
    pub last_used_at: Option<DateTime<Utc>>,
    pub revoked_at: Option<DateTime<Utc>>,
}

/// Repository interface for API token management.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgTokenRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TokenRepository: Send + Sync {
    /// Resolves a token hash to the ID of the user that owns it.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(user_id))` if the token exists and is not revoked
    /// - `Ok(None)` otherwise
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_owner(&self, token_hash: &str) -> Result<Option<i64>, AppError>;

    /// Updates the `last_used_at` timestamp for a token.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn update_last_used(&self, token_hash: &str) -> Result<(), AppError>;

    /// Stores a new token hash for `user_id`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the name or hash is already used.
    /// Returns [`AppError::Internal`] on database errors.
    async fn create_token(
        &self,
        name: &str,
        token_hash: &str,
        user_id: i64,
    ) -> Result<ApiToken, AppError>;

    /// Lists all tokens, revoked ones included.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list_tokens(&self) -> Result<Vec<ApiToken>, AppError>;

    /// Finds a token by ID.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_id(&self, id: i64) -> Result<Option<ApiToken>, AppError>;

    /// Finds a token by name.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_name(&self, name: &str) -> Result<Option<ApiToken>, AppError>;

    /// Marks a token as revoked.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the token does not exist or is already revoked.
    async fn revoke_token(&self, id: i64) -> Result<(), AppError>;
}
