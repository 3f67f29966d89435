//! Domain layer containing catalog entities and data-access contracts.
//!
//! Nothing here depends on HTTP or on PostgreSQL. Repository traits are the
//! data-access interface the services are written against; the
//! infrastructure layer provides the concrete implementations.
//!
//! # Architecture
//!
//! - [`entities`] - Users, categories, courses and enrollments
//! - [`repositories`] - Data access trait definitions
//! - [`actor`] - The authenticated user a request acts for

pub mod actor;
pub mod entities;
pub mod repositories;

pub use actor::Actor;
