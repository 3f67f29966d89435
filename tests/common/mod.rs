#![allow(dead_code)]

use axum::{Router, middleware};
use axum_test::TestServer;
use lms_catalog::api::middleware::auth;
use lms_catalog::api::routes::api_routes;
use lms_catalog::state::AppState;
use sqlx::PgPool;
use std::sync::Arc;

pub const TEST_SIGNING_SECRET: &str = "test-signing-secret";

pub fn create_test_state(pool: PgPool) -> AppState {
    AppState::new(Arc::new(pool), TEST_SIGNING_SECRET.to_string())
}

/// The `/api` router with actor resolution, as mounted by the server.
pub fn make_server(pool: PgPool) -> TestServer {
    let state = create_test_state(pool);
    let api = api_routes().route_layer(middleware::from_fn_with_state(state.clone(), auth::layer));
    let app = Router::new().nest("/api", api).with_state(state);
    TestServer::new(app).unwrap()
}

pub async fn create_test_user(pool: &PgPool, email: &str, full_name: &str) -> i64 {
    sqlx::query_scalar("INSERT INTO users (email, full_name) VALUES ($1, $2) RETURNING id")
        .bind(email)
        .bind(full_name)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn create_test_category(pool: &PgPool, name: &str) -> i64 {
    sqlx::query_scalar("INSERT INTO categories (name) VALUES ($1) RETURNING id")
        .bind(name)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn create_test_course(
    pool: &PgPool,
    title: &str,
    category_id: Option<i64>,
    instructor_id: Option<i64>,
) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO courses (title, category_id, instructor_id) VALUES ($1, $2, $3) RETURNING id",
    )
    .bind(title)
    .bind(category_id)
    .bind(instructor_id)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn create_test_enrollment(pool: &PgPool, student_id: i64, course_id: i64) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO enrollments (student_id, course_id) VALUES ($1, $2) RETURNING id",
    )
    .bind(student_id)
    .bind(course_id)
    .fetch_one(pool)
    .await
    .unwrap()
}

/// Issues a bearer token acting as `user_id` and returns the raw value.
pub async fn create_test_token(pool: &PgPool, name: &str, user_id: i64) -> String {
    let state = create_test_state(pool.clone());
    let (_, raw) = state.auth_service.issue_token(name, user_id).await.unwrap();
    raw
}

pub async fn count_enrollments(pool: &PgPool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM enrollments")
        .fetch_one(pool)
        .await
        .unwrap()
}
