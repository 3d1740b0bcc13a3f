use std::sync::Arc;

use chrono::Utc;
use validator::Validate;

use crate::{
    auth::{require_course_instructor, Claims},
    errors::{AppError, AppResult},
    models::domain::{ContentKind, ContentNode, Course},
    models::dto::request::{CreateContentRequest, MoveDirection, UpdateContentRequest},
    repositories::{ContentNodeRepository, CourseRepository},
    services::payload,
};

/// Course content tree: node CRUD plus sibling ordering.
pub struct ContentService {
    contents: Arc<dyn ContentNodeRepository>,
    courses: Arc<dyn CourseRepository>,
}

impl ContentService {
    pub fn new(
        contents: Arc<dyn ContentNodeRepository>,
        courses: Arc<dyn CourseRepository>,
    ) -> Self {
        Self { contents, courses }
    }

    async fn course(&self, course_id: &str) -> AppResult<Course> {
        self.courses
            .find_by_id(course_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Course with id '{}' not found", course_id)))
    }

    async fn course_for_edit(&self, claims: &Claims, course_id: &str) -> AppResult<Course> {
        let course = self.course(course_id).await?;
        require_course_instructor(claims, &course)?;
        Ok(course)
    }

    async fn node_in_course(&self, course_id: &str, content_id: &str) -> AppResult<ContentNode> {
        let node = self
            .contents
            .find_by_id(content_id)
            .await?
            .filter(|n| n.course_id == course_id)
            .ok_or_else(|| {
                AppError::NotFound(format!("Content node with id '{}' not found", content_id))
            })?;
        Ok(node)
    }

    /// All nodes of a course, order ascending. The handler nests sub-topics
    /// under their parents.
    pub async fn list_by_course(&self, course_id: &str) -> AppResult<Vec<ContentNode>> {
        self.course(course_id).await?;
        self.contents.list_by_course(course_id).await
    }

    pub async fn create(
        &self,
        claims: &Claims,
        course_id: &str,
        request: CreateContentRequest,
    ) -> AppResult<ContentNode> {
        request.validate()?;
        self.course_for_edit(claims, course_id).await?;

        if let Some(parent_id) = request.parent_id.as_deref() {
            let parent = self.node_in_course(course_id, parent_id).await?;
            // Exactly two tree levels: a sub-topic cannot parent anything.
            if !parent.is_main_topic() {
                return Err(AppError::ValidationError(
                    "Sub-topics cannot have children of their own".to_string(),
                ));
            }
        }

        // Quiz blobs must parse before they hit the store.
        if request.kind == ContentKind::Quiz {
            payload::decode(ContentKind::Quiz, &request.content)?;
        }

        let order = self
            .contents
            .count_siblings(course_id, request.parent_id.as_deref())
            .await? as i32
            + 1;

        let node = ContentNode::new(
            course_id,
            request.parent_id,
            &request.title,
            request.kind,
            &request.content,
            order,
        );
        self.contents.create(node).await
    }

    pub async fn update(
        &self,
        claims: &Claims,
        course_id: &str,
        content_id: &str,
        request: UpdateContentRequest,
    ) -> AppResult<ContentNode> {
        request.validate()?;
        self.course_for_edit(claims, course_id).await?;

        let mut node = self.node_in_course(course_id, content_id).await?;

        if let Some(title) = request.title {
            node.title = title;
        }
        if let Some(kind) = request.kind {
            node.kind = kind;
        }
        if let Some(content) = request.content {
            node.content = content;
        }
        if let Some(order) = request.order {
            node.order = order;
        }

        if node.kind == ContentKind::Quiz {
            payload::decode(ContentKind::Quiz, &node.content)?;
        }

        node.modified_at = Some(Utc::now());
        self.contents.update(node).await
    }

    /// Deleting a main topic removes all of its sub-topics with it; deleting
    /// a sub-topic removes just that node. Returns the removed-node count.
    pub async fn delete(
        &self,
        claims: &Claims,
        course_id: &str,
        content_id: &str,
    ) -> AppResult<u64> {
        self.course_for_edit(claims, course_id).await?;
        let node = self.node_in_course(course_id, content_id).await?;

        if node.is_main_topic() {
            self.contents.delete_with_children(&node.id).await
        } else {
            self.contents.delete(&node.id).await?;
            Ok(1)
        }
    }

    /// Swaps the node's `order` with its neighbor in the given direction.
    /// Returns the refreshed sibling list so the client can re-sync instead
    /// of updating optimistically.
    pub async fn reorder(
        &self,
        claims: &Claims,
        course_id: &str,
        content_id: &str,
        direction: MoveDirection,
    ) -> AppResult<Vec<ContentNode>> {
        self.course_for_edit(claims, course_id).await?;
        let node = self.node_in_course(course_id, content_id).await?;

        let siblings = self
            .contents
            .list_siblings(course_id, node.parent_id.as_deref())
            .await?;

        let position = siblings
            .iter()
            .position(|n| n.id == node.id)
            .ok_or_else(|| {
                AppError::InternalError(format!(
                    "Content node '{}' missing from its own sibling group",
                    node.id
                ))
            })?;

        let neighbor_position = match direction {
            MoveDirection::Up => {
                if position == 0 {
                    return Err(AppError::InvalidMove(
                        "Content is already first in its group".to_string(),
                    ));
                }
                position - 1
            }
            MoveDirection::Down => {
                if position + 1 >= siblings.len() {
                    return Err(AppError::InvalidMove(
                        "Content is already last in its group".to_string(),
                    ));
                }
                position + 1
            }
        };

        self.contents
            .swap_order(&siblings[position], &siblings[neighbor_position])
            .await?;

        self.contents
            .list_siblings(course_id, node.parent_id.as_deref())
            .await
    }
}
