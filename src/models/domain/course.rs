use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Course {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub instructor_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified_at: Option<DateTime<Utc>>,
}

impl Course {
    pub fn new(name: &str, description: Option<String>, instructor_id: &str) -> Self {
        Course {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            description,
            instructor_id: instructor_id.to_string(),
            created_at: Some(Utc::now()),
            modified_at: Some(Utc::now()),
        }
    }
}

#[cfg(test)]
impl Course {
    pub fn clone_with_id(mut self, id: &str) -> Self {
        self.id = id.to_string();
        self
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Enrollment {
    pub id: String,
    pub user_id: String,
    pub course_id: String,
    pub enrolled_at: DateTime<Utc>,
}

impl Enrollment {
    pub fn new(user_id: &str, course_id: &str) -> Self {
        Enrollment {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            course_id: course_id.to_string(),
            enrolled_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_course_creation() {
        let course = Course::new("Rust Basics", Some("Intro course".to_string()), "instructor-1");
        assert_eq!(course.name, "Rust Basics");
        assert_eq!(course.instructor_id, "instructor-1");
        assert!(!course.id.is_empty());
    }

    #[test]
    fn test_enrollment_links_user_and_course() {
        let enrollment = Enrollment::new("user-1", "course-1");
        assert_eq!(enrollment.user_id, "user-1");
        assert_eq!(enrollment.course_id, "course-1");
    }
}
