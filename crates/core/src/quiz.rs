//! Quiz questions and attempts.

use serde::{Deserialize, Serialize};
use crate::id::{AttemptId, NodeId, QuestionId};
use crate::Time;

/// A multiple-choice question owned by a node.
///
/// `correct_index` never leaves the backend; the public view of a question
/// lives in the service's API layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    /// Unique identifier
    pub id: QuestionId,

    /// Question text
    pub text: String,

    /// Answer options, in presentation order
    pub options: Vec<String>,

    /// Index into `options` of the correct answer
    pub correct_index: usize,

    /// Why the correct option is right (and the others wrong)
    pub explanation: String,
}

/// One submitted answer: which option the caller picked for a question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    /// The question being answered
    pub question_id: QuestionId,

    /// Selected option index; `None` means left unanswered
    pub selected_index: Option<usize>,
}

/// The scored outcome of a quiz submission.
///
/// Attempts exist to produce a status transition and an outcome message;
/// they are recorded as events, not persisted as entities.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizAttempt {
    /// Unique identifier
    pub id: AttemptId,

    /// Node the quiz belongs to
    pub node_id: NodeId,

    /// Correctly answered questions
    pub correct: usize,

    /// Questions in the node's quiz
    pub total: usize,

    /// Score as a whole percentage of `total`
    pub score_percent: u32,

    /// Whether the attempt met the pass threshold
    pub passed: bool,

    /// Human-readable outcome text
    pub message: String,

    /// When the attempt was evaluated
    pub evaluated_at: Time,
}
