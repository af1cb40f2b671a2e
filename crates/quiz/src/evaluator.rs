//! Quiz evaluation - scores a submission against a node's question set.

use std::collections::HashMap;

use pathway_core::{Answer, AttemptId, NodeId, Question, QuestionId, QuizAttempt};
use tracing::debug;

use crate::policy::QuizPolicy;

/// Scores submissions. Pure: never touches node status; the service
/// consumes the returned attempt and drives the state machine.
#[derive(Debug, Clone, Default)]
pub struct QuizEvaluator {
    policy: QuizPolicy,
}

impl QuizEvaluator {
    /// Create an evaluator with the given policy.
    pub fn new(policy: QuizPolicy) -> Self {
        Self { policy }
    }

    /// The active pass policy.
    pub fn policy(&self) -> &QuizPolicy {
        &self.policy
    }

    /// Score `answers` against `questions`.
    ///
    /// Duplicate question ids in the submission: last occurrence wins.
    /// Answers for questions not in `questions` are ignored and do not
    /// count toward the denominator. Unanswered or out-of-range indices
    /// count as incorrect. A node with zero questions auto-passes with a
    /// score of 100.
    pub fn evaluate(&self, node_id: NodeId, questions: &[Question], answers: &[Answer]) -> QuizAttempt {
        let total = questions.len();

        if total == 0 {
            debug!(%node_id, "no questions on node, auto-pass");
            return self.attempt(node_id, 0, 0, true);
        }

        // Last occurrence wins
        let chosen: HashMap<QuestionId, Option<usize>> = answers
            .iter()
            .map(|a| (a.question_id, a.selected_index))
            .collect();

        let correct = questions
            .iter()
            .filter(|q| {
                chosen
                    .get(&q.id)
                    .copied()
                    .flatten()
                    .filter(|i| *i < q.options.len())
                    == Some(q.correct_index)
            })
            .count();

        let required = self.policy.required_correct(total);
        let passed = correct >= required;

        debug!(%node_id, correct, total, required, passed, "quiz evaluated");

        self.attempt(node_id, correct, total, passed)
    }

    fn attempt(&self, node_id: NodeId, correct: usize, total: usize, passed: bool) -> QuizAttempt {
        let score_percent = if total == 0 {
            100
        } else {
            (correct * 100 / total) as u32
        };

        let message = if !passed {
            format!(
                "You got {}/{} correct ({}%). Need {}% to pass.",
                correct, total, score_percent, self.policy.pass_threshold_percent
            )
        } else if score_percent == 100 && total > 0 {
            "Perfect score! You are a master!".to_string()
        } else {
            "Great job! Next lesson unlocked.".to_string()
        };

        QuizAttempt {
            id: AttemptId::new(),
            node_id,
            correct,
            total,
            score_percent,
            passed,
            message,
            evaluated_at: chrono::Utc::now(),
        }
    }
}
