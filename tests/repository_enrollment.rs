mod common;

use lms_catalog::domain::entities::{EnrollmentPatch, NewEnrollment};
use lms_catalog::domain::repositories::EnrollmentRepository;
use lms_catalog::infrastructure::persistence::PgEnrollmentRepository;
use lms_catalog::AppError;
use sqlx::PgPool;
use std::sync::Arc;

fn new_enrollment(student_id: i64, course_id: i64) -> NewEnrollment {
    NewEnrollment {
        student_id,
        course_id,
        progress: 0.0,
        completed: false,
    }
}

#[sqlx::test]
async fn test_exists_for_pair(pool: PgPool) {
    let student = common::create_test_user(&pool, "s@example.com", "Student").await;
    let course = common::create_test_course(&pool, "Rust 101", None, None).await;
    let other = common::create_test_course(&pool, "Rust 201", None, None).await;
    let id = common::create_test_enrollment(&pool, student, course).await;
    let repo = PgEnrollmentRepository::new(Arc::new(pool));

    assert!(repo.exists_for(student, course, None).await.unwrap());
    assert!(!repo.exists_for(student, other, None).await.unwrap());
    assert!(!repo.exists_for(student, course, Some(id)).await.unwrap());
}

#[sqlx::test]
async fn test_storage_constraint_reports_already_enrolled(pool: PgPool) {
    let student = common::create_test_user(&pool, "s@example.com", "Student").await;
    let course = common::create_test_course(&pool, "Rust 101", None, None).await;
    let repo = PgEnrollmentRepository::new(Arc::new(pool));

    repo.create(new_enrollment(student, course)).await.unwrap();
    let err = repo
        .create(new_enrollment(student, course))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Validation { .. }));
    assert_eq!(
        err.messages_for("non_field_errors"),
        vec!["Already enrolled in this course"]
    );
}

#[sqlx::test]
async fn test_update_into_taken_pair_reports_already_enrolled(pool: PgPool) {
    let student = common::create_test_user(&pool, "s@example.com", "Student").await;
    let course = common::create_test_course(&pool, "Rust 101", None, None).await;
    let other = common::create_test_course(&pool, "Rust 201", None, None).await;
    common::create_test_enrollment(&pool, student, course).await;
    let id = common::create_test_enrollment(&pool, student, other).await;
    let repo = PgEnrollmentRepository::new(Arc::new(pool));

    let err = repo
        .update(
            id,
            EnrollmentPatch {
                course_id: Some(course),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();

    assert_eq!(
        err.messages_for("non_field_errors"),
        vec!["Already enrolled in this course"]
    );
}

#[sqlx::test]
async fn test_find_annotated_joins_names(pool: PgPool) {
    let student = common::create_test_user(&pool, "s@example.com", "Student Name").await;
    let course = common::create_test_course(&pool, "Course Title", None, None).await;
    let id = common::create_test_enrollment(&pool, student, course).await;
    let repo = PgEnrollmentRepository::new(Arc::new(pool));

    let annotated = repo.find_annotated(id).await.unwrap().unwrap();

    assert_eq!(annotated.enrollment.id, id);
    assert_eq!(annotated.course_title, "Course Title");
    assert_eq!(annotated.student_name, "Student Name");
}

#[sqlx::test]
async fn test_update_progress(pool: PgPool) {
    let student = common::create_test_user(&pool, "s@example.com", "Student").await;
    let course = common::create_test_course(&pool, "Rust 101", None, None).await;
    let id = common::create_test_enrollment(&pool, student, course).await;
    let repo = PgEnrollmentRepository::new(Arc::new(pool));

    let updated = repo
        .update(
            id,
            EnrollmentPatch {
                progress: Some(55.5),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.progress, 55.5);
    assert_eq!(updated.course_id, course);
    assert!(!updated.completed);
}

#[sqlx::test]
async fn test_delete_missing_returns_false(pool: PgPool) {
    let repo = PgEnrollmentRepository::new(Arc::new(pool));

    assert!(!repo.delete(999_999).await.unwrap());
}
