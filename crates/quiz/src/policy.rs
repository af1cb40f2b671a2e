//! Pass policy for quiz attempts.

use serde::{Deserialize, Serialize};

/// Configurable pass policy.
///
/// The required-correct count floors: with 9 questions at 70% the caller
/// needs 6 correct, not 7.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct QuizPolicy {
    /// Minimum score, as a whole percentage of the question count
    pub pass_threshold_percent: u32,
}

impl Default for QuizPolicy {
    fn default() -> Self {
        Self {
            pass_threshold_percent: 70,
        }
    }
}

impl QuizPolicy {
    /// How many correct answers a quiz of `total` questions requires.
    pub fn required_correct(&self, total: usize) -> usize {
        total * self.pass_threshold_percent as usize / 100
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_correct_floors() {
        let policy = QuizPolicy::default();
        assert_eq!(policy.required_correct(10), 7);
        assert_eq!(policy.required_correct(9), 6);
        assert_eq!(policy.required_correct(5), 3);
        assert_eq!(policy.required_correct(0), 0);
    }

    #[test]
    fn custom_threshold() {
        let policy = QuizPolicy {
            pass_threshold_percent: 50,
        };
        assert_eq!(policy.required_correct(10), 5);
        assert_eq!(policy.required_correct(3), 1);
    }
}
