//! API route configuration.
//!
//! Every route runs behind [`crate::api::middleware::auth::layer`], which
//! resolves the optional actor for the request.

use crate::api::handlers::{
    create_category_handler, create_course_handler, create_enrollment_handler,
    delete_category_handler, delete_course_handler, delete_enrollment_handler,
    get_category_handler, get_course_handler, get_enrollment_handler, list_categories_handler,
    list_courses_handler, list_enrollments_handler, replace_category_handler,
    replace_course_handler, replace_enrollment_handler, update_category_handler,
    update_course_handler, update_enrollment_handler,
};
use crate::state::AppState;
use axum::{Router, routing::get};

/// All catalog routes.
///
/// # Endpoints
///
/// - `GET/POST             /categories`
/// - `GET/PUT/PATCH/DELETE /categories/{id}`
/// - `GET/POST             /courses`
/// - `GET/PUT/PATCH/DELETE /courses/{id}`
/// - `GET/POST             /enrollments`
/// - `GET/PUT/PATCH/DELETE /enrollments/{id}`
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/categories",
            get(list_categories_handler).post(create_category_handler),
        )
        .route(
            "/categories/{id}",
            get(get_category_handler)
                .put(replace_category_handler)
                .patch(update_category_handler)
                .delete(delete_category_handler),
        )
        .route(
            "/courses",
            get(list_courses_handler).post(create_course_handler),
        )
        .route(
            "/courses/{id}",
            get(get_course_handler)
                .put(replace_course_handler)
                .patch(update_course_handler)
                .delete(delete_course_handler),
        )
        .route(
            "/enrollments",
            get(list_enrollments_handler).post(create_enrollment_handler),
        )
        .route(
            "/enrollments/{id}",
            get(get_enrollment_handler)
                .put(replace_enrollment_handler)
                .patch(update_enrollment_handler)
                .delete(delete_enrollment_handler),
        )
}
