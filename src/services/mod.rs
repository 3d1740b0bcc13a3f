pub mod certificate_service;
pub mod content_service;
pub mod course_service;
pub mod payload;
pub mod progress;
pub mod quiz_runtime;
pub mod user_service;

pub use certificate_service::CertificateService;
pub use content_service::ContentService;
pub use course_service::CourseService;
pub use progress::ProgressTracker;
pub use quiz_runtime::QuizRuntime;
pub use user_service::UserService;
