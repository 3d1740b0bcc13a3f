use serde::{Deserialize, Serialize};

/// The quiz blob stored in a QUIZ node's `content` column. The JSON wire
/// format is camelCase because the stored blobs were written by the web
/// editor; serde attributes pin that shape.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizPayload {
    pub questions: Vec<QuizQuestion>,
    #[serde(default)]
    pub shuffle_questions: bool,
    #[serde(default = "default_passing_score")]
    pub passing_score: u8,
}

pub const DEFAULT_PASSING_SCORE: u8 = 70;

fn default_passing_score() -> u8 {
    DEFAULT_PASSING_SCORE
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestion {
    pub id: String,
    /// Prompt text.
    pub question: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
    #[serde(flatten)]
    pub body: QuestionBody,
}

/// Per-variant question data, tagged by the editor's `type` field.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(
    tag = "type",
    rename_all = "SCREAMING_SNAKE_CASE",
    rename_all_fields = "camelCase"
)]
pub enum QuestionBody {
    SingleChoice {
        options: Vec<String>,
        /// Exactly one index into `options`.
        correct_answers: Vec<usize>,
    },
    MultipleChoice {
        options: Vec<String>,
        /// One or more indices into `options`.
        correct_answers: Vec<usize>,
    },
    TrueFalse {
        options: Vec<String>,
        correct_answers: Vec<usize>,
    },
    TextInput {
        correct_answer: String,
        #[serde(default)]
        case_sensitive: bool,
    },
    Matching {
        pairs: Vec<MatchPair>,
    },
    FillBlanks {
        /// Prompt with bracket-delimited blanks.
        text: String,
        /// One expected answer per blank, in order.
        answers: Vec<String>,
    },
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct MatchPair {
    pub left: String,
    pub right: String,
}

impl QuizPayload {
    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }
}

#[cfg(test)]
impl QuizQuestion {
    pub fn test_single_choice(id: &str, correct: usize) -> Self {
        QuizQuestion {
            id: id.to_string(),
            question: format!("Question {}", id),
            explanation: None,
            body: QuestionBody::SingleChoice {
                options: vec!["a".into(), "b".into(), "c".into()],
                correct_answers: vec![correct],
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiz_payload_parses_editor_json() {
        let raw = r#"{
            "questions": [
                {
                    "id": "q1",
                    "question": "Is water wet?",
                    "type": "TRUE_FALSE",
                    "options": ["True", "False"],
                    "correctAnswers": [0]
                },
                {
                    "id": "q2",
                    "question": "Capital of France?",
                    "type": "TEXT_INPUT",
                    "correctAnswer": "Paris",
                    "caseSensitive": false,
                    "explanation": "Geography basics"
                }
            ],
            "shuffleQuestions": true,
            "passingScore": 80
        }"#;

        let payload: QuizPayload = serde_json::from_str(raw).unwrap();
        assert_eq!(payload.total_questions(), 2);
        assert!(payload.shuffle_questions);
        assert_eq!(payload.passing_score, 80);

        match &payload.questions[1].body {
            QuestionBody::TextInput {
                correct_answer,
                case_sensitive,
            } => {
                assert_eq!(correct_answer, "Paris");
                assert!(!case_sensitive);
            }
            other => panic!("expected TextInput, got {:?}", other),
        }
    }

    #[test]
    fn quiz_payload_defaults() {
        let raw = r#"{"questions": []}"#;
        let payload: QuizPayload = serde_json::from_str(raw).unwrap();
        assert!(!payload.shuffle_questions);
        assert_eq!(payload.passing_score, DEFAULT_PASSING_SCORE);
    }

    #[test]
    fn question_serializes_with_type_tag() {
        let question = QuizQuestion {
            id: "q1".to_string(),
            question: "Match them".to_string(),
            explanation: None,
            body: QuestionBody::Matching {
                pairs: vec![MatchPair {
                    left: "1".to_string(),
                    right: "one".to_string(),
                }],
            },
        };

        let json = serde_json::to_string(&question).unwrap();
        assert!(json.contains("\"type\":\"MATCHING\""));
        assert!(json.contains("\"pairs\""));

        let parsed: QuizQuestion = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, question);
    }

    #[test]
    fn question_rejects_unknown_type_tag() {
        let raw = r#"{"id": "q1", "question": "?", "type": "ESSAY"}"#;
        assert!(serde_json::from_str::<QuizQuestion>(raw).is_err());
    }
}
