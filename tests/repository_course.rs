mod common;

use lms_catalog::domain::entities::{CoursePatch, NewCourse};
use lms_catalog::domain::repositories::CourseRepository;
use lms_catalog::infrastructure::persistence::PgCourseRepository;
use sqlx::PgPool;
use std::sync::Arc;

#[sqlx::test]
async fn test_create_and_annotate(pool: PgPool) {
    let instructor = common::create_test_user(&pool, "i@example.com", "Instructor").await;
    let category = common::create_test_category(&pool, "Systems").await;
    let repo = PgCourseRepository::new(Arc::new(pool));

    let course = repo
        .create(NewCourse {
            title: "Operating Systems".to_string(),
            description: String::new(),
            category_id: Some(category),
            instructor_id: instructor,
            thumbnail: None,
            duration_hours: 40,
            is_published: false,
        })
        .await
        .unwrap();

    let annotated = repo.find_annotated(course.id).await.unwrap().unwrap();
    assert_eq!(annotated.instructor_name.as_deref(), Some("Instructor"));
    assert_eq!(annotated.category_name.as_deref(), Some("Systems"));
    assert_eq!(annotated.enrollment_count, 0);
}

#[sqlx::test]
async fn test_deleted_instructor_leaves_null_reference(pool: PgPool) {
    let instructor = common::create_test_user(&pool, "i@example.com", "Instructor").await;
    let course = common::create_test_course(&pool, "Rust", None, Some(instructor)).await;
    sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(instructor)
        .execute(&pool)
        .await
        .unwrap();
    let repo = PgCourseRepository::new(Arc::new(pool));

    let annotated = repo.find_annotated(course).await.unwrap().unwrap();

    assert_eq!(annotated.course.instructor_id, None);
    assert_eq!(annotated.instructor_name, None);
}

#[sqlx::test]
async fn test_enrollment_count_aggregates(pool: PgPool) {
    let course = common::create_test_course(&pool, "Rust", None, None).await;
    for i in 0..4 {
        let s = common::create_test_user(&pool, &format!("s{i}@example.com"), "S").await;
        common::create_test_enrollment(&pool, s, course).await;
    }
    let repo = PgCourseRepository::new(Arc::new(pool));

    let annotated = repo.find_annotated(course).await.unwrap().unwrap();
    assert_eq!(annotated.enrollment_count, 4);
}

#[sqlx::test]
async fn test_update_clears_thumbnail(pool: PgPool) {
    let course = common::create_test_course(&pool, "Rust", None, None).await;
    let repo = PgCourseRepository::new(Arc::new(pool));

    repo.update(
        course,
        CoursePatch {
            thumbnail: Some(Some("https://cdn.example.com/a.png".to_string())),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    let cleared = repo
        .update(
            course,
            CoursePatch {
                thumbnail: Some(None),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(cleared.thumbnail, None);
    assert_eq!(cleared.title, "Rust");
}
