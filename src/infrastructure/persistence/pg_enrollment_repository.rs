//! PostgreSQL implementation of the enrollment repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{
    ALREADY_ENROLLED, AnnotatedEnrollment, Enrollment, EnrollmentPatch, NewEnrollment,
};
use crate::domain::repositories::EnrollmentRepository;
use crate::error::AppError;
use crate::utils::db_error::is_unique_violation_on;

/// Unique constraint on `(student_id, course_id)`.
const PAIR_CONSTRAINT: &str = "enrollments_student_course_key";

const ANNOTATED_SELECT: &str = r#"
    SELECT e.id, e.student_id, e.course_id, e.enrolled_at, e.progress, e.completed,
           c.title     AS course_title,
           u.full_name AS student_name
    FROM enrollments e
    JOIN courses c ON c.id = e.course_id
    JOIN users u   ON u.id = e.student_id
"#;

#[derive(sqlx::FromRow)]
struct EnrollmentRow {
    id: i64,
    student_id: i64,
    course_id: i64,
    enrolled_at: DateTime<Utc>,
    progress: f64,
    completed: bool,
}

impl From<EnrollmentRow> for Enrollment {
    fn from(r: EnrollmentRow) -> Self {
        Enrollment {
            id: r.id,
            student_id: r.student_id,
            course_id: r.course_id,
            enrolled_at: r.enrolled_at,
            progress: r.progress,
            completed: r.completed,
        }
    }
}

#[derive(sqlx::FromRow)]
struct AnnotatedEnrollmentRow {
    #[sqlx(flatten)]
    enrollment: EnrollmentRow,
    course_title: String,
    student_name: String,
}

impl From<AnnotatedEnrollmentRow> for AnnotatedEnrollment {
    fn from(r: AnnotatedEnrollmentRow) -> Self {
        AnnotatedEnrollment {
            enrollment: r.enrollment.into(),
            course_title: r.course_title,
            student_name: r.student_name,
        }
    }
}

/// Translates a pair-constraint violation into the duplicate-enrollment error.
///
/// This covers two requests racing past the service-level existence check.
fn map_write_error(e: sqlx::Error) -> AppError {
    if is_unique_violation_on(&e, PAIR_CONSTRAINT) {
        tracing::debug!("Duplicate enrollment rejected by storage constraint");
        return AppError::non_field(ALREADY_ENROLLED);
    }
    e.into()
}

/// PostgreSQL repository for enrollments.
pub struct PgEnrollmentRepository {
    pool: Arc<PgPool>,
}

impl PgEnrollmentRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EnrollmentRepository for PgEnrollmentRepository {
    async fn create(&self, new_enrollment: NewEnrollment) -> Result<Enrollment, AppError> {
        let row = sqlx::query_as::<_, EnrollmentRow>(
            r#"
            INSERT INTO enrollments (student_id, course_id, progress, completed)
            VALUES ($1, $2, $3, $4)
            RETURNING id, student_id, course_id, enrolled_at, progress, completed
            "#,
        )
        .bind(new_enrollment.student_id)
        .bind(new_enrollment.course_id)
        .bind(new_enrollment.progress)
        .bind(new_enrollment.completed)
        .fetch_one(self.pool.as_ref())
        .await
        .map_err(map_write_error)?;

        Ok(row.into())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Enrollment>, AppError> {
        let row = sqlx::query_as::<_, EnrollmentRow>(
            r#"
            SELECT id, student_id, course_id, enrolled_at, progress, completed
            FROM enrollments
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Enrollment::from))
    }

    async fn find_annotated(&self, id: i64) -> Result<Option<AnnotatedEnrollment>, AppError> {
        let sql = format!("{ANNOTATED_SELECT} WHERE e.id = $1");

        let row = sqlx::query_as::<_, AnnotatedEnrollmentRow>(&sql)
            .bind(id)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(row.map(AnnotatedEnrollment::from))
    }

    async fn list_annotated(&self) -> Result<Vec<AnnotatedEnrollment>, AppError> {
        let sql = format!("{ANNOTATED_SELECT} ORDER BY e.enrolled_at DESC, e.id DESC");

        let rows = sqlx::query_as::<_, AnnotatedEnrollmentRow>(&sql)
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(rows.into_iter().map(AnnotatedEnrollment::from).collect())
    }

    async fn exists_for(
        &self,
        student_id: i64,
        course_id: i64,
        exclude_id: Option<i64>,
    ) -> Result<bool, AppError> {
        let exists = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM enrollments
                WHERE student_id = $1
                  AND course_id = $2
                  AND ($3::BIGINT IS NULL OR id <> $3)
            )
            "#,
        )
        .bind(student_id)
        .bind(course_id)
        .bind(exclude_id)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(exists)
    }

    async fn update(&self, id: i64, patch: EnrollmentPatch) -> Result<Enrollment, AppError> {
        let row = sqlx::query_as::<_, EnrollmentRow>(
            r#"
            UPDATE enrollments SET
                student_id = COALESCE($2::BIGINT, student_id),
                course_id  = COALESCE($3::BIGINT, course_id),
                progress   = COALESCE($4::DOUBLE PRECISION, progress),
                completed  = COALESCE($5::BOOLEAN, completed)
            WHERE id = $1
            RETURNING id, student_id, course_id, enrolled_at, progress, completed
            "#,
        )
        .bind(id)
        .bind(patch.student_id)
        .bind(patch.course_id)
        .bind(patch.progress)
        .bind(patch.completed)
        .fetch_optional(self.pool.as_ref())
        .await
        .map_err(map_write_error)?;

        row.map(Enrollment::from)
            .ok_or_else(|| AppError::not_found("Enrollment not found", json!({"id": id})))
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM enrollments WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
