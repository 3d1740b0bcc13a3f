use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::domain::{ContentKind, ContentNode, User};

#[derive(Debug, Clone, Serialize)]
pub struct UserDto {
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub role: crate::models::domain::UserRole,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        UserDto {
            username: user.username,
            email: user.email,
            full_name: format!("{} {}", user.first_name, user.last_name),
            role: user.role,
            created_at: user.created_at,
        }
    }
}

/// Content node with its sub-topics nested, as the course page consumes it.
#[derive(Debug, Clone, Serialize)]
pub struct ContentNodeDto {
    pub id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: ContentKind,
    pub content: String,
    pub order: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    pub sub_contents: Vec<ContentNodeDto>,
}

impl From<ContentNode> for ContentNodeDto {
    fn from(node: ContentNode) -> Self {
        ContentNodeDto::leaf(node)
    }
}

impl ContentNodeDto {
    fn leaf(node: ContentNode) -> Self {
        ContentNodeDto {
            id: node.id,
            title: node.title,
            kind: node.kind,
            content: node.content,
            order: node.order,
            parent_id: node.parent_id,
            sub_contents: Vec::new(),
        }
    }

    /// Rebuilds the two-level tree from a flat, order-sorted node list.
    /// Sub-topics whose parent is missing from the list are dropped.
    pub fn nest(nodes: Vec<ContentNode>) -> Vec<ContentNodeDto> {
        let (mains, subs): (Vec<_>, Vec<_>) = nodes.into_iter().partition(|n| n.is_main_topic());

        let mut tree: Vec<ContentNodeDto> = mains.into_iter().map(ContentNodeDto::leaf).collect();
        for sub in subs {
            let parent_id = sub.parent_id.clone();
            if let Some(parent) = tree
                .iter_mut()
                .find(|t| Some(t.id.as_str()) == parent_id.as_deref())
            {
                parent.sub_contents.push(ContentNodeDto::leaf(sub));
            }
        }
        tree
    }
}

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub message: String,
    pub deleted_count: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_dto_full_name() {
        let user = User::test_user("johndoe", crate::models::domain::UserRole::Student);
        let dto: UserDto = user.into();
        assert_eq!(dto.full_name, "Test User");
        assert_eq!(dto.username, "johndoe");
    }

    #[test]
    fn test_nest_groups_sub_topics_under_parent() {
        let topic_a = ContentNode::test_topic("c1", "A", 1);
        let topic_b = ContentNode::test_topic("c1", "B", 2);
        let sub_a1 = ContentNode::test_sub_topic("c1", &topic_a.id, "A.1", 1);
        let sub_a2 = ContentNode::test_sub_topic("c1", &topic_a.id, "A.2", 2);

        let tree = ContentNodeDto::nest(vec![
            topic_a.clone(),
            topic_b.clone(),
            sub_a1.clone(),
            sub_a2.clone(),
        ]);

        assert_eq!(tree.len(), 2);
        assert_eq!(tree[0].id, topic_a.id);
        assert_eq!(tree[0].sub_contents.len(), 2);
        assert_eq!(tree[0].sub_contents[0].title, "A.1");
        assert!(tree[1].sub_contents.is_empty());
    }

    #[test]
    fn test_nest_drops_orphan_sub_topics() {
        let sub = ContentNode::test_sub_topic("c1", "missing-parent", "orphan", 1);
        let tree = ContentNodeDto::nest(vec![sub]);
        assert!(tree.is_empty());
    }

    #[test]
    fn test_content_dto_serializes_type_field() {
        let node = ContentNode::test_topic("c1", "Intro", 1);
        let dto = ContentNodeDto::nest(vec![node]).remove(0);
        let json = serde_json::to_string(&dto).unwrap();
        assert!(json.contains("\"type\":\"TEXT\""));
    }

    #[test]
    fn test_single_node_dto_uses_same_field_names_as_list() {
        // Create/update/reorder responses and the list response must agree
        // on the discriminator key, or a client re-rendering from a write
        // response reads the wrong field.
        let node = ContentNode::test_topic("c1", "Intro", 1);

        let single = serde_json::to_value(ContentNodeDto::from(node.clone())).unwrap();
        let listed = serde_json::to_value(ContentNodeDto::nest(vec![node]).remove(0)).unwrap();

        assert_eq!(single["type"], listed["type"]);
        assert!(single.get("kind").is_none());
        assert!(listed.get("kind").is_none());
    }
}
