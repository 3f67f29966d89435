//! Helpers for classifying database errors.

/// Returns true if `e` is a unique violation of the named constraint.
pub fn is_unique_violation_on(e: &sqlx::Error, constraint: &str) -> bool {
    let Some(db_err) = e.as_database_error() else {
        return false;
    };

    if !db_err.is_unique_violation() {
        return false;
    }

    db_err.constraint() == Some(constraint)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_database_error_is_not_unique_violation() {
        assert!(!is_unique_violation_on(
            &sqlx::Error::RowNotFound,
            "enrollments_student_course_key"
        ));
    }
}
