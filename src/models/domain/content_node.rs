use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One node of a course's two-level content tree. A node with no parent is
/// a main topic; a node with a parent is a sub-topic of that main topic.
/// Sub-topics may not have children of their own.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct ContentNode {
    pub id: String,
    pub course_id: String,
    /// None marks a main topic.
    pub parent_id: Option<String>,
    pub title: String,
    pub kind: ContentKind,
    /// Opaque payload column: HTML, URL, embed id, or quiz JSON depending
    /// on `kind`. Interpreted by `services::payload`.
    pub content: String,
    /// Position within the sibling group `(course_id, parent_id)`. Dense
    /// from 1 and unique per group.
    pub order: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified_at: Option<DateTime<Utc>>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, Copy)]
pub enum ContentKind {
    #[serde(rename = "TEXT")]
    Text,
    #[serde(rename = "VIDEO")]
    Video,
    #[serde(rename = "AUDIO")]
    Audio,
    #[serde(rename = "H5P")]
    H5p,
    #[serde(rename = "QUIZ")]
    Quiz,
}

impl ContentNode {
    pub fn new(
        course_id: &str,
        parent_id: Option<String>,
        title: &str,
        kind: ContentKind,
        content: &str,
        order: i32,
    ) -> Self {
        ContentNode {
            id: Uuid::new_v4().to_string(),
            course_id: course_id.to_string(),
            parent_id,
            title: title.to_string(),
            kind,
            content: content.to_string(),
            order,
            created_at: Some(Utc::now()),
            modified_at: Some(Utc::now()),
        }
    }

    pub fn is_main_topic(&self) -> bool {
        self.parent_id.is_none()
    }
}

#[cfg(test)]
impl ContentNode {
    pub fn test_topic(course_id: &str, title: &str, order: i32) -> Self {
        ContentNode::new(course_id, None, title, ContentKind::Text, "<p>topic</p>", order)
    }

    pub fn test_sub_topic(course_id: &str, parent_id: &str, title: &str, order: i32) -> Self {
        ContentNode::new(
            course_id,
            Some(parent_id.to_string()),
            title,
            ContentKind::Text,
            "<p>sub topic</p>",
            order,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_kind_serializes_to_legacy_tags() {
        assert_eq!(serde_json::to_string(&ContentKind::Text).unwrap(), "\"TEXT\"");
        assert_eq!(serde_json::to_string(&ContentKind::H5p).unwrap(), "\"H5P\"");
        assert_eq!(serde_json::to_string(&ContentKind::Quiz).unwrap(), "\"QUIZ\"");
    }

    #[test]
    fn content_kind_rejects_unknown_tag() {
        let parsed = serde_json::from_str::<ContentKind>("\"PODCAST\"");
        assert!(parsed.is_err());
    }

    #[test]
    fn main_topic_has_no_parent() {
        let topic = ContentNode::test_topic("course-1", "Intro", 1);
        assert!(topic.is_main_topic());

        let sub = ContentNode::test_sub_topic("course-1", &topic.id, "Details", 1);
        assert!(!sub.is_main_topic());
        assert_eq!(sub.parent_id.as_deref(), Some(topic.id.as_str()));
    }
}
