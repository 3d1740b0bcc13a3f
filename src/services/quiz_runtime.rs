//! Client-style quiz state machine: Presenting -> Feedback -> ... ->
//! Results, with retry looping back to the start. Kept free of server
//! state so the flow is unit-testable.

use rand::seq::SliceRandom;
use rand::thread_rng;

use crate::errors::{AppError, AppResult};
use crate::models::domain::quiz::{MatchPair, QuestionBody, QuizPayload, QuizQuestion};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RuntimeState {
    Presenting(usize),
    Feedback(usize),
    Results,
}

/// A recorded answer, one shape per question family.
#[derive(Clone, Debug, PartialEq)]
pub enum Answer {
    /// Selected option indices (single choice, multiple choice, true/false).
    Choices(Vec<usize>),
    Text(String),
    /// Chosen left/right matches.
    Matches(Vec<MatchPair>),
    /// One entry per blank, in order.
    Blanks(Vec<String>),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuestionFeedback {
    pub correct: bool,
    pub explanation: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizResults {
    pub correct: usize,
    pub total: usize,
    pub score: u32,
    pub passed: bool,
}

pub struct QuizRuntime {
    questions: Vec<QuizQuestion>,
    passing_score: u8,
    shuffle: bool,
    answers: Vec<Option<Answer>>,
    state: RuntimeState,
}

impl QuizRuntime {
    /// Starts a new attempt. Shuffling happens once here, not per question.
    pub fn start(payload: &QuizPayload) -> Self {
        let mut questions = payload.questions.clone();
        if payload.shuffle_questions {
            questions.shuffle(&mut thread_rng());
        }

        let state = if questions.is_empty() {
            RuntimeState::Results
        } else {
            RuntimeState::Presenting(0)
        };

        Self {
            answers: vec![None; questions.len()],
            questions,
            passing_score: payload.passing_score,
            shuffle: payload.shuffle_questions,
            state,
        }
    }

    pub fn state(&self) -> &RuntimeState {
        &self.state
    }

    pub fn current_question(&self) -> Option<&QuizQuestion> {
        match self.state {
            RuntimeState::Presenting(i) | RuntimeState::Feedback(i) => self.questions.get(i),
            RuntimeState::Results => None,
        }
    }

    /// Records the answer for the current question and moves to Feedback.
    pub fn submit_answer(&mut self, answer: Answer) -> AppResult<()> {
        match self.state {
            RuntimeState::Presenting(i) => {
                self.answers[i] = Some(answer);
                self.state = RuntimeState::Feedback(i);
                Ok(())
            }
            _ => Err(AppError::ValidationError(
                "No question is awaiting an answer".to_string(),
            )),
        }
    }

    /// Feedback for the answer just submitted.
    pub fn feedback(&self) -> Option<QuestionFeedback> {
        let RuntimeState::Feedback(i) = self.state else {
            return None;
        };
        let question = self.questions.get(i)?;
        let answer = self.answers.get(i)?.as_ref()?;

        Some(QuestionFeedback {
            correct: grade_question(question, answer),
            explanation: question.explanation.clone(),
        })
    }

    /// Advances past Feedback, to the next question or to Results.
    pub fn next(&mut self) -> AppResult<()> {
        match self.state {
            RuntimeState::Feedback(i) => {
                self.state = if i + 1 >= self.questions.len() {
                    RuntimeState::Results
                } else {
                    RuntimeState::Presenting(i + 1)
                };
                Ok(())
            }
            _ => Err(AppError::ValidationError(
                "Submit an answer before advancing".to_string(),
            )),
        }
    }

    /// From Results, restarts the attempt with empty answers. A new attempt
    /// gets its own shuffle.
    pub fn retry(&mut self) -> AppResult<()> {
        if self.state != RuntimeState::Results {
            return Err(AppError::ValidationError(
                "Retry is only available from the results screen".to_string(),
            ));
        }

        if self.shuffle {
            self.questions.shuffle(&mut thread_rng());
        }
        self.answers = vec![None; self.questions.len()];
        self.state = if self.questions.is_empty() {
            RuntimeState::Results
        } else {
            RuntimeState::Presenting(0)
        };
        Ok(())
    }

    /// Only available in the Results state.
    pub fn results(&self) -> Option<QuizResults> {
        if self.state != RuntimeState::Results {
            return None;
        }

        let total = self.questions.len();
        let correct = self
            .questions
            .iter()
            .zip(self.answers.iter())
            .filter(|(question, answer)| {
                answer
                    .as_ref()
                    .map(|a| grade_question(question, a))
                    .unwrap_or(false)
            })
            .count();

        let score = if total == 0 {
            0
        } else {
            (correct as f64 / total as f64 * 100.0).round() as u32
        };

        Some(QuizResults {
            correct,
            total,
            score,
            passed: score >= self.passing_score as u32,
        })
    }
}

/// One grading rule per question variant. An answer of the wrong shape for
/// the variant is simply incorrect.
pub fn grade_question(question: &QuizQuestion, answer: &Answer) -> bool {
    match (&question.body, answer) {
        (
            QuestionBody::SingleChoice {
                correct_answers, ..
            }
            | QuestionBody::MultipleChoice {
                correct_answers, ..
            }
            | QuestionBody::TrueFalse {
                correct_answers, ..
            },
            Answer::Choices(selected),
        ) => index_set_eq(selected, correct_answers),
        (
            QuestionBody::TextInput {
                correct_answer,
                case_sensitive,
            },
            Answer::Text(given),
        ) => {
            let given = given.trim();
            let expected = correct_answer.trim();
            if *case_sensitive {
                given == expected
            } else {
                given.eq_ignore_ascii_case(expected)
            }
        }
        (QuestionBody::Matching { pairs }, Answer::Matches(chosen)) => {
            chosen.len() == pairs.len()
                && pairs.iter().all(|p| chosen.contains(p))
                && chosen.iter().all(|c| pairs.contains(c))
        }
        (QuestionBody::FillBlanks { answers, .. }, Answer::Blanks(given)) => {
            given.len() == answers.len()
                && given
                    .iter()
                    .zip(answers.iter())
                    .all(|(g, e)| g.trim().eq_ignore_ascii_case(e.trim()))
        }
        _ => false,
    }
}

fn index_set_eq(selected: &[usize], correct: &[usize]) -> bool {
    let mut selected: Vec<usize> = selected.to_vec();
    let mut correct: Vec<usize> = correct.to_vec();
    selected.sort_unstable();
    selected.dedup();
    correct.sort_unstable();
    correct.dedup();
    selected == correct
}

#[cfg(test)]
mod tests {
    use super::*;

    fn four_question_quiz(passing_score: u8) -> QuizPayload {
        QuizPayload {
            questions: (0..4)
                .map(|i| QuizQuestion::test_single_choice(&format!("q{}", i), 1))
                .collect(),
            shuffle_questions: false,
            passing_score,
        }
    }

    fn run_attempt(runtime: &mut QuizRuntime, correct_count: usize) {
        for i in 0..4 {
            let choice = if i < correct_count { 1 } else { 2 };
            runtime.submit_answer(Answer::Choices(vec![choice])).unwrap();
            runtime.next().unwrap();
        }
    }

    #[test]
    fn three_of_four_passes_at_seventy() {
        let mut runtime = QuizRuntime::start(&four_question_quiz(70));
        run_attempt(&mut runtime, 3);

        let results = runtime.results().unwrap();
        assert_eq!(results.score, 75);
        assert_eq!(results.correct, 3);
        assert!(results.passed);
    }

    #[test]
    fn two_of_four_fails_at_seventy() {
        let mut runtime = QuizRuntime::start(&four_question_quiz(70));
        run_attempt(&mut runtime, 2);

        let results = runtime.results().unwrap();
        assert_eq!(results.score, 50);
        assert!(!results.passed);
    }

    #[test]
    fn transitions_follow_presenting_feedback_cycle() {
        let mut runtime = QuizRuntime::start(&four_question_quiz(70));
        assert_eq!(*runtime.state(), RuntimeState::Presenting(0));

        // next() before an answer is a reported error, not a crash
        assert!(runtime.next().is_err());

        runtime.submit_answer(Answer::Choices(vec![1])).unwrap();
        assert_eq!(*runtime.state(), RuntimeState::Feedback(0));

        // double submit is rejected
        assert!(runtime.submit_answer(Answer::Choices(vec![1])).is_err());

        runtime.next().unwrap();
        assert_eq!(*runtime.state(), RuntimeState::Presenting(1));
    }

    #[test]
    fn feedback_reports_correctness_and_explanation() {
        let mut payload = four_question_quiz(70);
        payload.questions[0].explanation = Some("because".to_string());

        let mut runtime = QuizRuntime::start(&payload);
        runtime.submit_answer(Answer::Choices(vec![1])).unwrap();

        let feedback = runtime.feedback().unwrap();
        assert!(feedback.correct);
        assert_eq!(feedback.explanation.as_deref(), Some("because"));
    }

    #[test]
    fn retry_resets_to_start_with_empty_answers() {
        let mut runtime = QuizRuntime::start(&four_question_quiz(70));

        // retry is not available mid-attempt
        assert!(runtime.retry().is_err());

        run_attempt(&mut runtime, 4);
        assert_eq!(*runtime.state(), RuntimeState::Results);

        runtime.retry().unwrap();
        assert_eq!(*runtime.state(), RuntimeState::Presenting(0));
        assert!(runtime.results().is_none());

        run_attempt(&mut runtime, 0);
        let results = runtime.results().unwrap();
        assert_eq!(results.correct, 0);
    }

    #[test]
    fn shuffle_preserves_the_question_set() {
        let mut payload = four_question_quiz(70);
        payload.shuffle_questions = true;

        let runtime = QuizRuntime::start(&payload);
        let mut ids: Vec<String> = runtime.questions.iter().map(|q| q.id.clone()).collect();
        ids.sort();
        assert_eq!(ids, vec!["q0", "q1", "q2", "q3"]);
    }

    #[test]
    fn empty_quiz_goes_straight_to_results() {
        let payload = QuizPayload {
            questions: vec![],
            shuffle_questions: false,
            passing_score: 70,
        };
        let runtime = QuizRuntime::start(&payload);
        assert_eq!(*runtime.state(), RuntimeState::Results);

        let results = runtime.results().unwrap();
        assert_eq!(results.score, 0);
        assert!(!results.passed);
    }

    #[test]
    fn multiple_choice_requires_set_equality() {
        let question = QuizQuestion {
            id: "q".to_string(),
            question: "pick two".to_string(),
            explanation: None,
            body: QuestionBody::MultipleChoice {
                options: vec!["a".into(), "b".into(), "c".into()],
                correct_answers: vec![0, 2],
            },
        };

        assert!(grade_question(&question, &Answer::Choices(vec![2, 0])));
        assert!(!grade_question(&question, &Answer::Choices(vec![0])));
        assert!(!grade_question(&question, &Answer::Choices(vec![0, 1, 2])));
    }

    #[test]
    fn text_input_respects_case_sensitivity() {
        let question = QuizQuestion {
            id: "q".to_string(),
            question: "capital of France".to_string(),
            explanation: None,
            body: QuestionBody::TextInput {
                correct_answer: "Paris".to_string(),
                case_sensitive: false,
            },
        };
        assert!(grade_question(&question, &Answer::Text(" paris ".to_string())));

        let question = QuizQuestion {
            body: QuestionBody::TextInput {
                correct_answer: "Paris".to_string(),
                case_sensitive: true,
            },
            ..question
        };
        assert!(!grade_question(&question, &Answer::Text("paris".to_string())));
        assert!(grade_question(&question, &Answer::Text("Paris".to_string())));
    }

    #[test]
    fn matching_is_order_independent() {
        let pairs = vec![
            MatchPair {
                left: "1".to_string(),
                right: "one".to_string(),
            },
            MatchPair {
                left: "2".to_string(),
                right: "two".to_string(),
            },
        ];
        let question = QuizQuestion {
            id: "q".to_string(),
            question: "match".to_string(),
            explanation: None,
            body: QuestionBody::Matching {
                pairs: pairs.clone(),
            },
        };

        let mut reversed = pairs.clone();
        reversed.reverse();
        assert!(grade_question(&question, &Answer::Matches(reversed)));

        let crossed = vec![
            MatchPair {
                left: "1".to_string(),
                right: "two".to_string(),
            },
            MatchPair {
                left: "2".to_string(),
                right: "one".to_string(),
            },
        ];
        assert!(!grade_question(&question, &Answer::Matches(crossed)));
    }

    #[test]
    fn fill_blanks_checks_every_blank_in_order() {
        let question = QuizQuestion {
            id: "q".to_string(),
            question: "blanks".to_string(),
            explanation: None,
            body: QuestionBody::FillBlanks {
                text: "The [quick] brown [fox]".to_string(),
                answers: vec!["quick".to_string(), "fox".to_string()],
            },
        };

        assert!(grade_question(
            &question,
            &Answer::Blanks(vec!["Quick ".to_string(), "fox".to_string()])
        ));
        assert!(!grade_question(
            &question,
            &Answer::Blanks(vec!["fox".to_string(), "quick".to_string()])
        ));
        assert!(!grade_question(
            &question,
            &Answer::Blanks(vec!["quick".to_string()])
        ));
    }

    #[test]
    fn mismatched_answer_shape_is_incorrect() {
        let question = QuizQuestion::test_single_choice("q", 0);
        assert!(!grade_question(&question, &Answer::Text("a".to_string())));
    }
}
