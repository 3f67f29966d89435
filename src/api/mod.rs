//! REST API layer for HTTP request/response handling.
//!
//! This layer translates HTTP requests into service calls and formats
//! responses through the representers in [`dto`].
//!
//! # Modules
//!
//! - [`dto`] - Read and write representations of catalog records
//! - [`handlers`] - HTTP request handlers
//! - [`middleware`] - Actor resolution and request tracing
//! - [`routes`] - Route configuration and composition

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
