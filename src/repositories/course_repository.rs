use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::doc,
    options::{FindOptions, IndexOptions},
    Collection, IndexModel,
};

use crate::{
    db::Database,
    errors::{AppError, AppResult},
    models::domain::{ContentNode, Course, Enrollment},
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CourseRepository: Send + Sync {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Course>>;
    async fn list(&self, offset: i64, limit: i64) -> AppResult<(Vec<Course>, i64)>;
    async fn create(&self, course: Course) -> AppResult<Course>;
    /// Drops enrollments, content nodes and the course row in one
    /// transaction.
    async fn delete_cascade(&self, id: &str) -> AppResult<()>;
}

pub struct MongoCourseRepository {
    courses: Collection<Course>,
    enrollments: Collection<Enrollment>,
    content_nodes: Collection<ContentNode>,
    db: Database,
}

impl MongoCourseRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            courses: db.get_collection("courses"),
            enrollments: db.get_collection("enrollments"),
            content_nodes: db.get_collection("content_nodes"),
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
        self.courses.create_index(id_index).await?;

        log::info!("Created indexes for courses collection");
        Ok(())
    }
}

#[async_trait]
impl CourseRepository for MongoCourseRepository {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Course>> {
        let course = self.courses.find_one(doc! { "id": id }).await?;
        Ok(course)
    }

    async fn list(&self, offset: i64, limit: i64) -> AppResult<(Vec<Course>, i64)> {
        let total = self.courses.count_documents(doc! {}).await? as i64;

        let find_options = FindOptions::builder()
            .sort(doc! { "name": 1 })
            .skip(Some(offset.max(0) as u64))
            .limit(Some(limit))
            .build();

        let cursor = self
            .courses
            .find(doc! {})
            .with_options(find_options)
            .await?;
        let items: Vec<Course> = cursor.try_collect().await?;

        Ok((items, total))
    }

    async fn create(&self, course: Course) -> AppResult<Course> {
        self.courses.insert_one(&course).await?;
        Ok(course)
    }

    async fn delete_cascade(&self, id: &str) -> AppResult<()> {
        let mut session = self.db.start_session().await?;
        session.start_transaction().await?;

        let result: Result<u64, mongodb::error::Error> = async {
            self.enrollments
                .delete_many(doc! { "course_id": id })
                .session(&mut session)
                .await?;
            self.content_nodes
                .delete_many(doc! { "course_id": id })
                .session(&mut session)
                .await?;
            let course = self
                .courses
                .delete_one(doc! { "id": id })
                .session(&mut session)
                .await?;
            Ok(course.deleted_count)
        }
        .await;

        match result {
            Ok(0) => {
                session.abort_transaction().await?;
                Err(AppError::NotFound(format!(
                    "Course with id '{}' not found",
                    id
                )))
            }
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
