pub mod certificate_repository;
pub mod content_node_repository;
pub mod course_repository;
pub mod enrollment_repository;
pub mod user_repository;

pub use certificate_repository::{CertificateRepository, MongoCertificateRepository};
pub use content_node_repository::{ContentNodeRepository, MongoContentNodeRepository};
pub use course_repository::{CourseRepository, MongoCourseRepository};
pub use enrollment_repository::{EnrollmentRepository, MongoEnrollmentRepository};
pub use user_repository::{MongoUserRepository, UserRepository};
