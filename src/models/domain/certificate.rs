use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Completion record. Issuing again for the same user and course inserts a
/// new row; retrieval keeps only the most recent per `(user_id, course_id)`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Certificate {
    pub id: String,
    pub user_id: String,
    pub course_id: String,
    pub course_name: String,
    pub user_name: String,
    pub issued_at: DateTime<Utc>,
}

impl Certificate {
    pub fn new(user_id: &str, course_id: &str, course_name: &str, user_name: &str) -> Self {
        Certificate {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            course_id: course_id.to_string(),
            course_name: course_name.to_string(),
            user_name: user_name.to_string(),
            issued_at: Utc::now(),
        }
    }
}
