use kurso_server::{
    auth::JwtService,
    models::domain::{QuestionBody, QuizPayload, User, UserRole},
    models::dto::response::UserDto,
    services::payload::{self, ContentPayload},
};
use secrecy::SecretString;

#[actix_web::test]
async fn test_user_dto_serialization_shape() {
    let user = User::new("Ada", "Lovelace", "ada", "ada@example.com", UserRole::Instructor);
    let dto: UserDto = user.into();

    let value = serde_json::to_value(&dto).unwrap();
    assert_eq!(value["username"], "ada");
    assert_eq!(value["full_name"], "Ada Lovelace");
    assert_eq!(value["role"], "Instructor");
}

#[actix_web::test]
async fn test_jwt_round_trip() {
    let secret = SecretString::from("an-integration-test-secret-long-enough");
    let jwt = JwtService::new(&secret, 1);

    let user = User::new("Grace", "Hopper", "grace", "grace@example.com", UserRole::Admin);
    let token = jwt.create_token(&user).unwrap();
    let claims = jwt.validate_token(&token).unwrap();

    assert_eq!(claims.sub, user.id);
    assert_eq!(claims.username, "grace");
    assert_eq!(claims.role, UserRole::Admin);
}

#[actix_web::test]
async fn test_quiz_payload_wire_format() {
    // The exact JSON the authoring frontend stores.
    let raw = r#"{
        "questions": [
            {
                "id": "q1",
                "question": "Pick one",
                "type": "SINGLE_CHOICE",
                "options": ["a", "b"],
                "correctAnswers": [1]
            },
            {
                "id": "q2",
                "question": "Fill it",
                "type": "FILL_BLANKS",
                "text": "Rust is ___",
                "answers": ["fast"]
            }
        ],
        "shuffleQuestions": true,
        "passingScore": 80
    }"#;

    let decoded = payload::decode(
        kurso_server::models::domain::ContentKind::Quiz,
        raw,
    )
    .unwrap();

    let ContentPayload::Quiz(quiz) = decoded else {
        panic!("quiz content must decode to the quiz variant");
    };
    assert!(quiz.shuffle_questions);
    assert_eq!(quiz.passing_score, 80);
    assert_eq!(quiz.questions.len(), 2);
    assert!(matches!(
        quiz.questions[0].body,
        QuestionBody::SingleChoice { .. }
    ));
    assert!(matches!(
        quiz.questions[1].body,
        QuestionBody::FillBlanks { .. }
    ));
}

#[actix_web::test]
async fn test_passing_score_defaults_when_absent() {
    let raw = r#"{"questions": []}"#;
    let quiz: QuizPayload = serde_json::from_str(raw).unwrap();
    assert_eq!(quiz.passing_score, 70);
    assert!(!quiz.shuffle_questions);
}

#[cfg(test)]
mod sync_tests {
    use kurso_server::models::domain::ContentNode;

    #[test]
    fn test_content_node_struct_size() {
        use std::mem;
        // ContentNode is cloned freely in the service layer; keep it a
        // plain bundle of Strings.
        let size = mem::size_of::<ContentNode>();
        assert!(size <= 300, "ContentNode is {} bytes, which seems too large", size);
    }
}
