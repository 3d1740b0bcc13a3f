use std::sync::Arc;

use crate::{
    config::Config,
    db::Database,
    errors::AppResult,
    repositories::{
        MongoCertificateRepository, MongoContentNodeRepository, MongoCourseRepository,
        MongoEnrollmentRepository, MongoUserRepository,
    },
    services::{CertificateService, ContentService, CourseService, UserService},
};

#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<UserService>,
    pub course_service: Arc<CourseService>,
    pub content_service: Arc<ContentService>,
    pub certificate_service: Arc<CertificateService>,
    pub config: Arc<Config>,
    pub db: Database,
}

impl AppState {
    pub async fn new(config: Config) -> AppResult<Self> {
        let db = Database::connect(&config).await?;

        let user_repository = Arc::new(MongoUserRepository::new(&db));
        user_repository.ensure_indexes().await?;

        let course_repository = Arc::new(MongoCourseRepository::new(&db));
        course_repository.ensure_indexes().await?;

        let content_repository = Arc::new(MongoContentNodeRepository::new(&db));
        content_repository.ensure_indexes().await?;

        let enrollment_repository = Arc::new(MongoEnrollmentRepository::new(&db));
        enrollment_repository.ensure_indexes().await?;

        let certificate_repository = Arc::new(MongoCertificateRepository::new(&db));
        certificate_repository.ensure_indexes().await?;

        let user_service = Arc::new(UserService::new(user_repository.clone()));
        let course_service = Arc::new(CourseService::new(
            course_repository.clone(),
            enrollment_repository,
        ));
        let content_service = Arc::new(ContentService::new(
            content_repository,
            course_repository.clone(),
        ));
        let certificate_service = Arc::new(CertificateService::new(
            certificate_repository,
            course_repository,
            user_repository,
        ));

        Ok(Self {
            user_service,
            course_service,
            content_service,
            certificate_service,
            config: Arc::new(config),
            db,
        })
    }
}
