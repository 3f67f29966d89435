//! Core domain entities of the course catalog.
//!
//! # Entity Types
//!
//! - [`User`] - A person who can teach or take courses
//! - [`Category`] - A grouping of courses
//! - [`Course`] - A course, optionally annotated with derived fields as [`AnnotatedCourse`]
//! - [`Enrollment`] - A student's participation in a course, annotated as [`AnnotatedEnrollment`]
//!
//! # Design Pattern
//!
//! Each entity has companion structs for writes:
//! - `NewUser`, `NewCategory`, `NewCourse`, `NewEnrollment` - For creating records
//! - `CategoryPatch`, `CoursePatch`, `EnrollmentPatch` - For partial updates
//! - `CourseDraft`, `EnrollmentDraft` - Client input before server-side defaults are applied

pub mod category;
pub mod course;
pub mod enrollment;
pub mod user;

pub use category::{Category, CategoryPatch, NewCategory};
pub use course::{AnnotatedCourse, Course, CourseDraft, CoursePatch, NewCourse};
pub use enrollment::{
    ALREADY_ENROLLED, AnnotatedEnrollment, Enrollment, EnrollmentDraft, EnrollmentPatch,
    NewEnrollment,
};
pub use user::{NewUser, User};
