//! The authenticated actor behind a request.

/// The user an incoming request acts on behalf of.
///
/// Resolved from the bearer token by [`crate::api::middleware::auth`] and
/// passed explicitly into service calls that need a "current user" default.
/// Anonymous requests carry no actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    pub user_id: i64,
}

impl Actor {
    pub fn new(user_id: i64) -> Self {
        Self { user_id }
    }
}
