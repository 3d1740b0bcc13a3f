use std::sync::Arc;

use crate::{
    auth::Claims,
    errors::{AppError, AppResult},
    models::domain::Certificate,
    repositories::{CertificateRepository, CourseRepository, UserRepository},
};

/// Issues completion certificates and serves the per-user list. Completion
/// is checked client-side against the progress tracker before the issue
/// call is offered; the server records what it is asked to.
pub struct CertificateService {
    certificates: Arc<dyn CertificateRepository>,
    courses: Arc<dyn CourseRepository>,
    users: Arc<dyn UserRepository>,
}

impl CertificateService {
    pub fn new(
        certificates: Arc<dyn CertificateRepository>,
        courses: Arc<dyn CourseRepository>,
        users: Arc<dyn UserRepository>,
    ) -> Self {
        Self {
            certificates,
            courses,
            users,
        }
    }

    /// Always inserts a fresh row; re-issuing for the same course is
    /// allowed, retrieval keeps the newest.
    pub async fn issue(&self, claims: &Claims, course_id: &str) -> AppResult<Certificate> {
        let course = self
            .courses
            .find_by_id(course_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Course with id '{}' not found", course_id)))?;

        let user_name = match self.users.find_by_id(&claims.sub).await? {
            Some(user) => user.full_name(),
            None => claims.username.clone(),
        };

        let certificate = Certificate::new(&claims.sub, course_id, &course.name, &user_name);
        log::info!(
            "issuing certificate for user '{}' on course '{}'",
            claims.sub,
            course_id
        );
        self.certificates.create(certificate).await
    }

    /// One certificate per course, most recent `issued_at` wins.
    pub async fn list_for_user(&self, claims: &Claims) -> AppResult<Vec<Certificate>> {
        let mut certificates = self.certificates.list_by_user(&claims.sub).await?;
        certificates.sort_by(|a, b| b.issued_at.cmp(&a.issued_at));
        Ok(dedupe_latest(certificates))
    }
}

/// Keeps the first row per course id. Input must be sorted newest first.
fn dedupe_latest(certificates: Vec<Certificate>) -> Vec<Certificate> {
    let mut seen = std::collections::HashSet::new();
    certificates
        .into_iter()
        .filter(|c| seen.insert(c.course_id.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::domain::{Course, User, UserRole};
    use crate::repositories::certificate_repository::MockCertificateRepository;
    use crate::repositories::course_repository::MockCourseRepository;
    use crate::repositories::user_repository::MockUserRepository;
    use chrono::{Duration, Utc};

    fn cert(course_id: &str, age_hours: i64) -> Certificate {
        let mut certificate = Certificate::new("user-1", course_id, "Course", "Test User");
        certificate.issued_at = Utc::now() - Duration::hours(age_hours);
        certificate
    }

    #[test]
    fn dedupe_keeps_newest_per_course() {
        let newest = cert("c1", 0);
        let older = cert("c1", 5);
        let other = cert("c2", 2);

        let result = dedupe_latest(vec![newest.clone(), other.clone(), older]);
        assert_eq!(result.len(), 2);
        assert_eq!(result[0].id, newest.id);
        assert_eq!(result[1].id, other.id);
    }

    #[actix_rt::test]
    async fn issue_records_course_and_user_names() {
        let mut courses = MockCourseRepository::new();
        courses
            .expect_find_by_id()
            .returning(|id| Ok(Some(Course::new("Rust Basics", None, "teacher-1").clone_with_id(id))));

        let mut users = MockUserRepository::new();
        users
            .expect_find_by_id()
            .returning(|_| Ok(Some(User::test_user("johndoe", UserRole::Student))));

        let mut certificates = MockCertificateRepository::new();
        certificates.expect_create().returning(Ok);

        let service = CertificateService::new(
            Arc::new(certificates),
            Arc::new(courses),
            Arc::new(users),
        );
        let claims = Claims::test_claims("user-1", UserRole::Student);

        let certificate = service.issue(&claims, "course-1").await.unwrap();
        assert_eq!(certificate.course_name, "Rust Basics");
        assert_eq!(certificate.user_name, "Test User");
        assert_eq!(certificate.user_id, "user-1");
    }

    #[actix_rt::test]
    async fn issue_fails_for_missing_course() {
        let mut courses = MockCourseRepository::new();
        courses.expect_find_by_id().returning(|_| Ok(None));

        let service = CertificateService::new(
            Arc::new(MockCertificateRepository::new()),
            Arc::new(courses),
            Arc::new(MockUserRepository::new()),
        );
        let claims = Claims::test_claims("user-1", UserRole::Student);

        let result = service.issue(&claims, "missing").await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[actix_rt::test]
    async fn list_for_user_deduplicates_reissues() {
        let mut certificates = MockCertificateRepository::new();
        certificates
            .expect_list_by_user()
            .returning(|_| Ok(vec![cert("c1", 5), cert("c1", 0), cert("c2", 1)]));

        let service = CertificateService::new(
            Arc::new(certificates),
            Arc::new(MockCourseRepository::new()),
            Arc::new(MockUserRepository::new()),
        );
        let claims = Claims::test_claims("user-1", UserRole::Student);

        let result = service.list_for_user(&claims).await.unwrap();
        assert_eq!(result.len(), 2);
        // newest first after dedupe
        assert!(result[0].issued_at > result[1].issued_at);
    }
}
