use crate::models::domain::{ContentNode, User, UserRole};

#[cfg(test)]
pub mod fixtures {
    use super::*;

    /// Creates a standard test instructor
    pub fn test_instructor() -> User {
        User::test_user("instructor", UserRole::Instructor)
    }

    /// Creates a test student with custom username
    pub fn test_student_with_username(username: &str) -> User {
        User::test_user(username, UserRole::Student)
    }

    /// A small course tree: 2 main topics, the first with 2 sub-topics
    pub fn test_course_tree(course_id: &str) -> Vec<ContentNode> {
        let topic_a = ContentNode::test_topic(course_id, "Getting started", 1);
        let topic_b = ContentNode::test_topic(course_id, "Going deeper", 2);
        let sub_a1 = ContentNode::test_sub_topic(course_id, &topic_a.id, "Install", 1);
        let sub_a2 = ContentNode::test_sub_topic(course_id, &topic_a.id, "First steps", 2);
        vec![topic_a, topic_b, sub_a1, sub_a2]
    }
}

#[cfg(test)]
pub mod test_helpers {
    use actix_web::http::StatusCode;

    /// Asserts that a status code represents an error (4xx or 5xx)
    pub fn assert_error_status(status: StatusCode) {
        assert!(
            status.is_client_error() || status.is_server_error(),
            "Expected error status, got: {}",
            status
        );
    }

    /// Asserts that a status code represents success (2xx)
    pub fn assert_success_status(status: StatusCode) {
        assert!(
            status.is_success(),
            "Expected success status, got: {}",
            status
        );
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;

    #[test]
    fn test_fixtures_instructor_role() {
        let user = test_instructor();
        assert_eq!(user.username, "instructor");
    }

    #[test]
    fn test_fixtures_course_tree_shape() {
        let nodes = test_course_tree("c1");
        assert_eq!(nodes.len(), 4);
        assert_eq!(nodes.iter().filter(|n| n.is_main_topic()).count(), 2);
    }
}
