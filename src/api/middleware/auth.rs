//! Bearer token authentication middleware.
//!
//! Authentication here only identifies the actor behind a request. Requests
//! without an `Authorization` header pass through anonymously; operations
//! that need an actor reject anonymous calls themselves.

use std::convert::Infallible;

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts},
    middleware::Next,
    response::Response,
};
use axum_auth::AuthBearer;

use crate::{domain::Actor, error::AppError, state::AppState};

/// Resolves the request's actor from a Bearer token.
///
/// # Header Format
///
/// ```text
/// Authorization: Bearer <token>
/// ```
///
/// On success the [`Actor`] is stored in the request extensions, where
/// [`CurrentActor`] picks it up.
///
/// # Errors
///
/// Returns `401 Unauthorized` if the header is present but malformed, or the
/// token is unknown or revoked. A missing header is not an error.
pub async fn layer(
    State(st): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    if !req.headers().contains_key(header::AUTHORIZATION) {
        return Ok(next.run(req).await);
    }

    let (mut parts, body) = req.into_parts();

    let AuthBearer(token) = AuthBearer::from_request_parts(&mut parts, &())
        .await
        .map_err(|_| {
            AppError::unauthorized(
                "Unauthorized",
                serde_json::json!({"reason": "Authorization header is invalid"}),
            )
        })?;

    let actor = st.auth_service.authenticate(&token).await?;
    tracing::debug!(user_id = actor.user_id, "Request authenticated");

    parts.extensions.insert(actor);
    let req = Request::from_parts(parts, body);

    Ok(next.run(req).await)
}

/// Extractor for the actor resolved by [`layer`], if any.
///
/// ```rust,ignore
/// async fn handler(CurrentActor(actor): CurrentActor) {
///     let actor: Option<Actor> = actor;
/// }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct CurrentActor(pub Option<Actor>);

impl CurrentActor {
    pub fn actor(&self) -> Option<&Actor> {
        self.0.as_ref()
    }
}

impl<S: Send + Sync> FromRequestParts<S> for CurrentActor {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(parts.extensions.get::<Actor>().copied()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request as HttpRequest;

    #[tokio::test]
    async fn test_current_actor_reads_extension() {
        let (mut parts, _) = HttpRequest::builder()
            .uri("/")
            .body(())
            .unwrap()
            .into_parts();
        parts.extensions.insert(Actor::new(7));

        let CurrentActor(actor) = CurrentActor::from_request_parts(&mut parts, &())
            .await
            .unwrap();

        assert_eq!(actor, Some(Actor::new(7)));
    }

    #[tokio::test]
    async fn test_current_actor_absent_is_anonymous() {
        let (mut parts, _) = HttpRequest::builder()
            .uri("/")
            .body(())
            .unwrap()
            .into_parts();

        let CurrentActor(actor) = CurrentActor::from_request_parts(&mut parts, &())
            .await
            .unwrap();

        assert_eq!(actor, None);
    }
}
