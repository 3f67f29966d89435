//! PostgreSQL implementation of the course repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{AnnotatedCourse, Course, CoursePatch, NewCourse};
use crate::domain::repositories::CourseRepository;
use crate::error::AppError;

const COURSE_COLUMNS: &str = "id, title, description, category_id, instructor_id, thumbnail, \
     duration_hours, is_published, created_at, updated_at";

/// Course columns plus the one-hop names and the enrollment aggregate.
const ANNOTATED_SELECT: &str = r#"
    SELECT c.id, c.title, c.description, c.category_id, c.instructor_id, c.thumbnail,
           c.duration_hours, c.is_published, c.created_at, c.updated_at,
           u.full_name AS instructor_name,
           cat.name    AS category_name,
           (SELECT COUNT(*) FROM enrollments e WHERE e.course_id = c.id) AS enrollment_count
    FROM courses c
    LEFT JOIN users u        ON u.id = c.instructor_id
    LEFT JOIN categories cat ON cat.id = c.category_id
"#;

#[derive(sqlx::FromRow)]
struct CourseRow {
    id: i64,
    title: String,
    description: String,
    category_id: Option<i64>,
    instructor_id: Option<i64>,
    thumbnail: Option<String>,
    duration_hours: i32,
    is_published: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<CourseRow> for Course {
    fn from(r: CourseRow) -> Self {
        Course {
            id: r.id,
            title: r.title,
            description: r.description,
            category_id: r.category_id,
            instructor_id: r.instructor_id,
            thumbnail: r.thumbnail,
            duration_hours: r.duration_hours,
            is_published: r.is_published,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct AnnotatedCourseRow {
    #[sqlx(flatten)]
    course: CourseRow,
    instructor_name: Option<String>,
    category_name: Option<String>,
    enrollment_count: i64,
}

impl From<AnnotatedCourseRow> for AnnotatedCourse {
    fn from(r: AnnotatedCourseRow) -> Self {
        AnnotatedCourse {
            course: r.course.into(),
            instructor_name: r.instructor_name,
            category_name: r.category_name,
            enrollment_count: r.enrollment_count,
        }
    }
}

/// PostgreSQL repository for courses.
pub struct PgCourseRepository {
    pool: Arc<PgPool>,
}

impl PgCourseRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CourseRepository for PgCourseRepository {
    async fn create(&self, new_course: NewCourse) -> Result<Course, AppError> {
        let sql = format!(
            r#"
            INSERT INTO courses
                (title, description, category_id, instructor_id, thumbnail, duration_hours, is_published)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {COURSE_COLUMNS}
            "#
        );

        let row = sqlx::query_as::<_, CourseRow>(&sql)
            .bind(new_course.title)
            .bind(new_course.description)
            .bind(new_course.category_id)
            .bind(new_course.instructor_id)
            .bind(new_course.thumbnail)
            .bind(new_course.duration_hours)
            .bind(new_course.is_published)
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(row.into())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Course>, AppError> {
        let sql = format!("SELECT {COURSE_COLUMNS} FROM courses WHERE id = $1");

        let row = sqlx::query_as::<_, CourseRow>(&sql)
            .bind(id)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(row.map(Course::from))
    }

    async fn find_annotated(&self, id: i64) -> Result<Option<AnnotatedCourse>, AppError> {
        let sql = format!("{ANNOTATED_SELECT} WHERE c.id = $1");

        let row = sqlx::query_as::<_, AnnotatedCourseRow>(&sql)
            .bind(id)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(row.map(AnnotatedCourse::from))
    }

    async fn list_annotated(&self) -> Result<Vec<AnnotatedCourse>, AppError> {
        let sql = format!("{ANNOTATED_SELECT} ORDER BY c.created_at DESC, c.id DESC");

        let rows = sqlx::query_as::<_, AnnotatedCourseRow>(&sql)
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(rows.into_iter().map(AnnotatedCourse::from).collect())
    }

    async fn update(&self, id: i64, patch: CoursePatch) -> Result<Course, AppError> {
        let update_category = patch.category_id.is_some();
        let new_category = patch.category_id.flatten();
        let update_thumbnail = patch.thumbnail.is_some();
        let new_thumbnail = patch.thumbnail.flatten();

        let sql = format!(
            r#"
            UPDATE courses SET
                title          = COALESCE($2::VARCHAR, title),
                description    = COALESCE($3::TEXT, description),
                category_id    = CASE WHEN $4 THEN $5::BIGINT ELSE category_id END,
                thumbnail      = CASE WHEN $6 THEN $7::TEXT ELSE thumbnail END,
                duration_hours = COALESCE($8::INTEGER, duration_hours),
                is_published   = COALESCE($9::BOOLEAN, is_published),
                updated_at     = NOW()
            WHERE id = $1
            RETURNING {COURSE_COLUMNS}
            "#
        );

        let row = sqlx::query_as::<_, CourseRow>(&sql)
            .bind(id)
            .bind(patch.title)
            .bind(patch.description)
            .bind(update_category)
            .bind(new_category)
            .bind(update_thumbnail)
            .bind(new_thumbnail)
            .bind(patch.duration_hours)
            .bind(patch.is_published)
            .fetch_optional(self.pool.as_ref())
            .await?;

        row.map(Course::from)
            .ok_or_else(|| AppError::not_found("Course not found", json!({"id": id})))
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM courses WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
