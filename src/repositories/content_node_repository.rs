use async_trait::async_trait;
use chrono::Utc;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, Bson},
    options::{FindOptions, IndexOptions},
    Collection, IndexModel,
};

use crate::{
    db::Database,
    errors::{AppError, AppResult},
    models::domain::ContentNode,
};

#[async_trait]
pub trait ContentNodeRepository: Send + Sync {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<ContentNode>>;
    /// All nodes of a course, sorted by `order` ascending.
    async fn list_by_course(&self, course_id: &str) -> AppResult<Vec<ContentNode>>;
    /// One sibling group `(course_id, parent_id)`, sorted by `order`.
    async fn list_siblings(
        &self,
        course_id: &str,
        parent_id: Option<&str>,
    ) -> AppResult<Vec<ContentNode>>;
    async fn count_siblings(&self, course_id: &str, parent_id: Option<&str>) -> AppResult<i64>;
    async fn create(&self, node: ContentNode) -> AppResult<ContentNode>;
    async fn update(&self, node: ContentNode) -> AppResult<ContentNode>;
    async fn delete(&self, id: &str) -> AppResult<()>;
    /// Deletes a main topic and all of its sub-topics as one transaction.
    /// Returns the number of removed nodes.
    async fn delete_with_children(&self, id: &str) -> AppResult<u64>;
    /// Exchanges the `order` values of two siblings. Both writes commit or
    /// neither does; a partial write would leave duplicate orders in the
    /// sibling group.
    async fn swap_order(&self, a: &ContentNode, b: &ContentNode) -> AppResult<()>;
}

pub struct MongoContentNodeRepository {
    collection: Collection<ContentNode>,
    db: Database,
}

impl MongoContentNodeRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection("content_nodes");
        Self {
            collection,
            db: db.clone(),
        }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        let id_index = IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("id_unique".to_string())
                    .build(),
            )
            .build();
        self.collection.create_index(id_index).await?;

        // Not unique on order: a swap transiently duplicates values inside
        // its transaction. Uniqueness is enforced by the ordering service.
        let sibling_index = IndexModel::builder()
            .keys(doc! { "course_id": 1, "parent_id": 1, "order": 1 })
            .options(
                IndexOptions::builder()
                    .name("sibling_order".to_string())
                    .build(),
            )
            .build();
        self.collection.create_index(sibling_index).await?;

        log::info!("Created indexes for content_nodes collection");
        Ok(())
    }

    fn sibling_filter(course_id: &str, parent_id: Option<&str>) -> mongodb::bson::Document {
        match parent_id {
            Some(parent) => doc! { "course_id": course_id, "parent_id": parent },
            None => doc! { "course_id": course_id, "parent_id": Bson::Null },
        }
    }
}

#[async_trait]
impl ContentNodeRepository for MongoContentNodeRepository {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<ContentNode>> {
        let node = self.collection.find_one(doc! { "id": id }).await?;
        Ok(node)
    }

    async fn list_by_course(&self, course_id: &str) -> AppResult<Vec<ContentNode>> {
        let find_options = FindOptions::builder().sort(doc! { "order": 1 }).build();
        let cursor = self
            .collection
            .find(doc! { "course_id": course_id })
            .with_options(find_options)
            .await?;
        let nodes: Vec<ContentNode> = cursor.try_collect().await?;
        Ok(nodes)
    }

    async fn list_siblings(
        &self,
        course_id: &str,
        parent_id: Option<&str>,
    ) -> AppResult<Vec<ContentNode>> {
        let find_options = FindOptions::builder().sort(doc! { "order": 1 }).build();
        let cursor = self
            .collection
            .find(Self::sibling_filter(course_id, parent_id))
            .with_options(find_options)
            .await?;
        let nodes: Vec<ContentNode> = cursor.try_collect().await?;
        Ok(nodes)
    }

    async fn count_siblings(&self, course_id: &str, parent_id: Option<&str>) -> AppResult<i64> {
        let count = self
            .collection
            .count_documents(Self::sibling_filter(course_id, parent_id))
            .await?;
        Ok(count as i64)
    }

    async fn create(&self, node: ContentNode) -> AppResult<ContentNode> {
        self.collection.insert_one(&node).await?;
        Ok(node)
    }

    async fn update(&self, node: ContentNode) -> AppResult<ContentNode> {
        let result = self
            .collection
            .replace_one(doc! { "id": &node.id }, &node)
            .await?;

        if result.matched_count == 0 {
            return Err(AppError::NotFound(format!(
                "Content node with id '{}' not found",
                node.id
            )));
        }

        Ok(node)
    }

    async fn delete(&self, id: &str) -> AppResult<()> {
        let result = self.collection.delete_one(doc! { "id": id }).await?;

        if result.deleted_count == 0 {
            return Err(AppError::NotFound(format!(
                "Content node with id '{}' not found",
                id
            )));
        }

        Ok(())
    }

    async fn delete_with_children(&self, id: &str) -> AppResult<u64> {
        let mut session = self.db.start_session().await?;
        session.start_transaction().await?;

        let result = self
            .collection
            .delete_many(doc! { "$or": [ { "id": id }, { "parent_id": id } ] })
            .session(&mut session)
            .await;

        match result {
            Ok(outcome) if outcome.deleted_count > 0 => {
                session.commit_transaction().await?;
                Ok(outcome.deleted_count)
            }
            Ok(_) => {
                session.abort_transaction().await?;
                Err(AppError::NotFound(format!(
                    "Content node with id '{}' not found",
                    id
                )))
            }
            Err(err) => {
                let _ = session.abort_transaction().await;
                Err(err.into())
            }
        }
    }

    async fn swap_order(&self, a: &ContentNode, b: &ContentNode) -> AppResult<()> {
        let mut session = self.db.start_session().await?;
        session.start_transaction().await?;

        let now = Utc::now().to_rfc3339();

        let first = self
            .collection
            .update_one(
                doc! { "id": &a.id },
                doc! { "$set": { "order": b.order, "modified_at": &now } },
            )
            .session(&mut session)
            .await;

        let second = match first {
            Ok(_) => {
                self.collection
                    .update_one(
                        doc! { "id": &b.id },
                        doc! { "$set": { "order": a.order, "modified_at": &now } },
                    )
                    .session(&mut session)
                    .await
            }
            Err(err) => Err(err),
        };

        match second {
            Ok(_) => {
                session.commit_transaction().await?;
                Ok(())
            }
            Err(err) => {
                let _ = session.abort_transaction().await;
                Err(err.into())
            }
        }
    }
}
