use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::dto::request::CreateUserRequest;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct User {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub email: String,
    pub role: UserRole,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, Copy)]
pub enum UserRole {
    Admin,
    Instructor,
    Student,
}

impl User {
    pub fn new(first_name: &str, last_name: &str, username: &str, email: &str, role: UserRole) -> Self {
        User {
            id: Uuid::new_v4().to_string(),
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            username: username.to_string(),
            email: email.to_string(),
            role,
            created_at: Some(Utc::now()),
        }
    }

    pub fn from_request(request: CreateUserRequest) -> Self {
        User {
            id: Uuid::new_v4().to_string(),
            first_name: request.first_name,
            last_name: request.last_name,
            username: request.username,
            email: request.email,
            role: request.role.unwrap_or(UserRole::Student),
            created_at: Some(Utc::now()),
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[cfg(test)]
impl User {
    pub fn test_user(username: &str, role: UserRole) -> Self {
        User::new(
            "Test",
            "User",
            username,
            &format!("{}@example.com", username),
            role,
        )
    }

    pub fn test_student(username: &str) -> Self {
        User::test_user(username, UserRole::Student)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_creation() {
        let user = User::new("John", "Doe", "johndoe", "john@example.com", UserRole::Instructor);
        assert_eq!(user.username, "johndoe");
        assert_eq!(user.role, UserRole::Instructor);
        assert_eq!(user.full_name(), "John Doe");
        assert!(user.created_at.is_some());
        assert!(!user.id.is_empty());
    }

    #[test]
    fn test_user_from_request_defaults_to_student() {
        let request = CreateUserRequest {
            first_name: "Jane".to_string(),
            last_name: "Smith".to_string(),
            username: "janesmith".to_string(),
            email: "jane@example.com".to_string(),
            role: None,
        };

        let user = User::from_request(request);
        assert_eq!(user.username, "janesmith");
        assert_eq!(user.role, UserRole::Student);
    }
}
