pub mod auth_handler;
pub mod certificate_handler;
pub mod content_handler;
pub mod course_handler;
pub mod user_handler;

pub use auth_handler::dev_token;
pub use certificate_handler::{issue_certificate, list_certificates};
pub use content_handler::{
    create_content, delete_content, list_contents, reorder_content, update_content,
};
pub use course_handler::{create_course, delete_course, enroll, get_course, list_courses};
pub use user_handler::{
    create_user, delete_user, get_all_users, get_user, health_check, health_check_live,
    health_check_ready, update_user,
};
