//! Quiz evaluation for Pathway.
//!
//! Scores submitted answers against a node's question set and decides
//! pass/fail according to a configurable threshold policy.

#![warn(missing_docs)]

mod evaluator;
mod policy;

pub use evaluator::QuizEvaluator;
pub use policy::QuizPolicy;
