//! Shared application state injected into every handler.

use sqlx::PgPool;
use std::sync::Arc;

use crate::application::services::{
    AuthService, CategoryService, CourseService, EnrollmentService,
};
use crate::infrastructure::persistence::{
    PgCategoryRepository, PgCourseRepository, PgEnrollmentRepository, PgTokenRepository,
    PgUserRepository,
};

/// Application state. Cheap to clone: every field is reference-counted.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<PgPool>,
    pub auth_service: Arc<AuthService<PgTokenRepository>>,
    pub category_service: Arc<CategoryService<PgCategoryRepository>>,
    pub course_service: Arc<CourseService<PgCourseRepository, PgCategoryRepository>>,
    pub enrollment_service:
        Arc<EnrollmentService<PgEnrollmentRepository, PgCourseRepository, PgUserRepository>>,
}

impl AppState {
    /// Wires the PostgreSQL repositories into the services.
    ///
    /// `token_signing_secret` must match the secret used when tokens were issued.
    pub fn new(db: Arc<PgPool>, token_signing_secret: String) -> Self {
        let users = Arc::new(PgUserRepository::new(db.clone()));
        let categories = Arc::new(PgCategoryRepository::new(db.clone()));
        let courses = Arc::new(PgCourseRepository::new(db.clone()));
        let enrollments = Arc::new(PgEnrollmentRepository::new(db.clone()));
        let tokens = Arc::new(PgTokenRepository::new(db.clone()));

        Self {
            auth_service: Arc::new(AuthService::new(tokens, token_signing_secret)),
            category_service: Arc::new(CategoryService::new(categories.clone())),
            course_service: Arc::new(CourseService::new(courses.clone(), categories)),
            enrollment_service: Arc::new(EnrollmentService::new(enrollments, courses, users)),
            db,
        }
    }
}
