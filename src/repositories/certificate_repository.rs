use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::doc,
    options::{FindOptions, IndexOptions},
    Collection, IndexModel,
};

use crate::{db::Database, errors::AppResult, models::domain::Certificate};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CertificateRepository: Send + Sync {
    async fn create(&self, certificate: Certificate) -> AppResult<Certificate>;
    /// All rows for a user, newest first. Duplicate rows per course are
    /// expected; deduplication happens in the service.
    async fn list_by_user(&self, user_id: &str) -> AppResult<Vec<Certificate>>;
}

pub struct MongoCertificateRepository {
    collection: Collection<Certificate>,
}

impl MongoCertificateRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection("certificates");
        Self { collection }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        let user_index = IndexModel::builder()
            .keys(doc! { "user_id": 1, "issued_at": -1 })
            .options(
                IndexOptions::builder()
                    .name("user_issued_at".to_string())
                    .build(),
            )
            .build();

        self.collection.create_index(user_index).await?;
        log::info!("Created indexes for certificates collection");
        Ok(())
    }
}

#[async_trait]
impl CertificateRepository for MongoCertificateRepository {
    async fn create(&self, certificate: Certificate) -> AppResult<Certificate> {
        self.collection.insert_one(&certificate).await?;
        Ok(certificate)
    }

    async fn list_by_user(&self, user_id: &str) -> AppResult<Vec<Certificate>> {
        let find_options = FindOptions::builder()
            .sort(doc! { "issued_at": -1 })
            .build();

        let cursor = self
            .collection
            .find(doc! { "user_id": user_id })
            .with_options(find_options)
            .await?;
        let certificates: Vec<Certificate> = cursor.try_collect().await?;

        Ok(certificates)
    }
}
