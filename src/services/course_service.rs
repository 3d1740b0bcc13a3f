use std::sync::Arc;

use validator::Validate;

use crate::{
    auth::{require_course_instructor, Claims},
    errors::{AppError, AppResult},
    models::domain::{Course, Enrollment, UserRole},
    models::dto::request::CreateCourseRequest,
    repositories::{CourseRepository, EnrollmentRepository},
};

pub struct CourseService {
    courses: Arc<dyn CourseRepository>,
    enrollments: Arc<dyn EnrollmentRepository>,
}

impl CourseService {
    pub fn new(
        courses: Arc<dyn CourseRepository>,
        enrollments: Arc<dyn EnrollmentRepository>,
    ) -> Self {
        Self {
            courses,
            enrollments,
        }
    }

    pub async fn create_course(
        &self,
        claims: &Claims,
        request: CreateCourseRequest,
    ) -> AppResult<Course> {
        request.validate()?;

        if claims.role == UserRole::Student {
            return Err(AppError::Forbidden(
                "Only instructors can create courses".to_string(),
            ));
        }

        let course = Course::new(&request.name, request.description, &claims.sub);
        self.courses.create(course).await
    }

    pub async fn get_course(&self, course_id: &str) -> AppResult<Course> {
        self.courses
            .find_by_id(course_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Course with id '{}' not found", course_id)))
    }

    pub async fn list_courses(&self, offset: i64, limit: i64) -> AppResult<(Vec<Course>, i64)> {
        self.courses.list(offset, limit).await
    }

    /// Removes the course together with its enrollments and content nodes,
    /// all in one transaction.
    pub async fn delete_course(&self, claims: &Claims, course_id: &str) -> AppResult<()> {
        let course = self.get_course(course_id).await?;
        require_course_instructor(claims, &course)?;

        self.courses.delete_cascade(course_id).await
    }

    pub async fn enroll(&self, claims: &Claims, course_id: &str) -> AppResult<Enrollment> {
        self.get_course(course_id).await?;

        if self
            .enrollments
            .find(&claims.sub, course_id)
            .await?
            .is_some()
        {
            return Err(AppError::AlreadyExists(
                "Already enrolled in this course".to_string(),
            ));
        }

        self.enrollments
            .create(Enrollment::new(&claims.sub, course_id))
            .await
    }
}
