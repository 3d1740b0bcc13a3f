use async_trait::async_trait;
use mongodb::{bson::doc, options::IndexOptions, Collection, IndexModel};

use crate::{db::Database, errors::AppResult, models::domain::Enrollment};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EnrollmentRepository: Send + Sync {
    async fn create(&self, enrollment: Enrollment) -> AppResult<Enrollment>;
    async fn find(&self, user_id: &str, course_id: &str) -> AppResult<Option<Enrollment>>;
}

pub struct MongoEnrollmentRepository {
    collection: Collection<Enrollment>,
}

impl MongoEnrollmentRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection("enrollments");
        Self { collection }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        let options = IndexOptions::builder()
            .unique(true)
            .name("user_course_unique".to_string())
            .build();
        let model = IndexModel::builder()
            .keys(doc! { "user_id": 1, "course_id": 1 })
            .options(options)
            .build();

        self.collection.create_index(model).await?;
        log::info!("Created indexes for enrollments collection");
        Ok(())
    }
}

#[async_trait]
impl EnrollmentRepository for MongoEnrollmentRepository {
    async fn create(&self, enrollment: Enrollment) -> AppResult<Enrollment> {
        self.collection.insert_one(&enrollment).await?;
        Ok(enrollment)
    }

    async fn find(&self, user_id: &str, course_id: &str) -> AppResult<Option<Enrollment>> {
        let enrollment = self
            .collection
            .find_one(doc! { "user_id": user_id, "course_id": course_id })
            .await?;
        Ok(enrollment)
    }
}
