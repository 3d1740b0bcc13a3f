use crate::{
    auth::Claims,
    errors::{AppError, AppResult},
    models::domain::{course::Course, user::UserRole},
};

pub fn require_admin(claims: &Claims) -> AppResult<()> {
    if claims.role != UserRole::Admin {
        return Err(AppError::Forbidden(
            "Only admins can perform this action".to_string(),
        ));
    }
    Ok(())
}

/// Content authoring is limited to the course's own instructor; admins may
/// act on any course.
pub fn require_course_instructor(claims: &Claims, course: &Course) -> AppResult<()> {
    if claims.role == UserRole::Admin {
        return Ok(());
    }
    if course.instructor_id != claims.sub {
        return Err(AppError::Forbidden(
            "Only the course instructor can modify course content".to_string(),
        ));
    }
    Ok(())
}

/// User-management routes are keyed by username, so ownership is checked
/// against the claims' username rather than the subject id.
pub fn require_self_or_admin(claims: &Claims, username: &str) -> AppResult<()> {
    if claims.role != UserRole::Admin && claims.username != username {
        return Err(AppError::Forbidden(
            "You can only access your own resources".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_admin_success() {
        let claims = Claims::test_claims("admin", UserRole::Admin);
        assert!(require_admin(&claims).is_ok());
    }

    #[test]
    fn test_require_admin_failure() {
        let claims = Claims::test_claims("user", UserRole::Student);
        assert!(require_admin(&claims).is_err());
    }

    #[test]
    fn test_require_course_instructor_as_owner() {
        let claims = Claims::test_claims("teacher-1", UserRole::Instructor);
        let course = Course::new("Course", None, "teacher-1");
        assert!(require_course_instructor(&claims, &course).is_ok());
    }

    #[test]
    fn test_require_course_instructor_as_other_instructor() {
        let claims = Claims::test_claims("teacher-2", UserRole::Instructor);
        let course = Course::new("Course", None, "teacher-1");
        let result = require_course_instructor(&claims, &course);
        assert!(matches!(result, Err(AppError::Forbidden(_))));
    }

    #[test]
    fn test_require_course_instructor_as_admin() {
        let claims = Claims::test_claims("admin", UserRole::Admin);
        let course = Course::new("Course", None, "teacher-1");
        assert!(require_course_instructor(&claims, &course).is_ok());
    }

    #[test]
    fn test_require_self_or_admin_as_self() {
        let claims = Claims::test_claims("john", UserRole::Student);
        assert!(require_self_or_admin(&claims, "john").is_ok());
    }

    #[test]
    fn test_require_self_or_admin_failure() {
        let claims = Claims::test_claims("john", UserRole::Student);
        assert!(require_self_or_admin(&claims, "jane").is_err());
    }

    #[test]
    fn test_require_self_or_admin_as_admin() {
        let claims = Claims::test_claims("admin", UserRole::Admin);
        assert!(require_self_or_admin(&claims, "jane").is_ok());
    }
}
