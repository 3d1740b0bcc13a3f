use serde::Deserialize;
use validator::Validate;

use crate::models::domain::content_node::ContentKind;
use crate::models::domain::user::UserRole;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(length(min = 1, max = 100))]
    pub first_name: String,

    #[validate(length(min = 1, max = 100))]
    pub last_name: String,

    #[validate(length(min = 3, max = 50))]
    pub username: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    pub role: Option<UserRole>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[validate(length(min = 1, max = 100))]
    pub first_name: Option<String>,

    #[validate(length(min = 1, max = 100))]
    pub last_name: Option<String>,

    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,

    pub role: Option<UserRole>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateCourseRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: String,

    #[validate(length(max = 2000))]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateContentRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: String,

    #[serde(rename = "type")]
    pub kind: ContentKind,

    pub content: String,

    /// None creates a main topic, Some a sub-topic of that main topic.
    pub parent_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateContentRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,

    #[serde(rename = "type")]
    pub kind: Option<ContentKind>,

    pub content: Option<String>,

    #[validate(range(min = 1))]
    pub order: Option<i32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReorderRequest {
    pub direction: MoveDirection,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveDirection {
    Up,
    Down,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PaginationParams {
    #[validate(range(min = 0))]
    pub offset: Option<i64>,

    #[validate(range(min = 1, max = 100))]
    pub limit: Option<i64>,
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            offset: Some(0),
            limit: Some(20),
        }
    }
}

impl PaginationParams {
    pub fn offset(&self) -> i64 {
        self.offset.unwrap_or(0)
    }

    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(20).min(100)
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct DevTokenRequest {
    #[validate(length(min = 3, max = 50))]
    pub username: String,
}
