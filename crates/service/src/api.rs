//! Public DTOs - the logical wire contract of the service.
//!
//! These are the only shapes the client layer sees. Notably,
//! [`QuestionPublic`] carries no correct-answer index.

use serde::{Deserialize, Serialize};
use pathway_core::{Answer, Question, QuestionId, QuizAttempt};

/// A question as shown to the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionPublic {
    /// Question id, echoed back in submissions
    pub id: QuestionId,

    /// Question text
    pub text: String,

    /// Answer options, in presentation order
    pub options: Vec<String>,
}

impl From<&Question> for QuestionPublic {
    fn from(q: &Question) -> Self {
        Self {
            id: q.id,
            text: q.text.clone(),
            options: q.options.clone(),
        }
    }
}

/// One submitted answer in a quiz submission payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerSubmit {
    /// Which question is being answered
    pub question_id: QuestionId,

    /// Selected option index; absent means unanswered
    pub selected_option_index: Option<usize>,
}

impl From<AnswerSubmit> for Answer {
    fn from(a: AnswerSubmit) -> Self {
        Self {
            question_id: a.question_id,
            selected_index: a.selected_option_index,
        }
    }
}

/// What the caller gets back from a quiz submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitOutcome {
    /// Whether the attempt passed
    pub passed: bool,

    /// Human-readable outcome text
    pub message: String,
}

impl From<&QuizAttempt> for SubmitOutcome {
    fn from(attempt: &QuizAttempt) -> Self {
        Self {
            passed: attempt.passed,
            message: attempt.message.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_question_drops_the_correct_index() {
        let q = Question {
            id: QuestionId::new(),
            text: "What moves on assignment?".into(),
            options: vec!["ownership".into(), "nothing".into()],
            correct_index: 0,
            explanation: "Assignment moves ownership.".into(),
        };
        let public = QuestionPublic::from(&q);
        let json = serde_json::to_value(&public).unwrap();
        assert_eq!(json["text"], "What moves on assignment?");
        assert!(json.get("correct_index").is_none());
        assert!(json.get("explanation").is_none());
    }

    #[test]
    fn submission_payload_maps_to_domain_answer() {
        let submit = AnswerSubmit {
            question_id: QuestionId::new(),
            selected_option_index: Some(2),
        };
        let answer: Answer = submit.clone().into();
        assert_eq!(answer.question_id, submit.question_id);
        assert_eq!(answer.selected_index, Some(2));

        let unanswered: Answer = AnswerSubmit {
            question_id: QuestionId::new(),
            selected_option_index: None,
        }
        .into();
        assert_eq!(unanswered.selected_index, None);
    }
}
