//! User entity referenced by courses (as instructor) and enrollments (as student).

use chrono::{DateTime, Utc};

/// A registered user.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub full_name: String,
    pub created_at: DateTime<Utc>,
}

/// Input data for creating a new user.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub full_name: String,
}
