pub mod certificate;
pub mod content_node;
pub mod course;
pub mod quiz;
pub mod user;

pub use certificate::Certificate;
pub use content_node::{ContentKind, ContentNode};
pub use course::{Course, Enrollment};
pub use quiz::{MatchPair, QuestionBody, QuizPayload, QuizQuestion};
pub use user::{User, UserRole};
