//! HTTP middleware for request processing.
//!
//! Provides actor resolution and observability middleware.

pub mod auth;
pub mod tracing;

pub use auth::CurrentActor;
