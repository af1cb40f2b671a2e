//! Pathway core data models.
//!
//! This crate defines the fundamental data structures that power the
//! learning-roadmap progression backend: roadmaps, nodes and their state
//! machine, quiz questions and attempts, and the domain error taxonomy.

#![warn(missing_docs)]

// Core identities
mod id;

// Roadmap and node progression
mod roadmap;

// Quizzing
mod quiz;

// Generation request
mod spec;

// Errors and timeline
mod error;
mod event;

// Re-exports
pub use id::*;

pub use roadmap::{Milestone, Node, NodeStatus, Resource, Roadmap};
pub use quiz::{Answer, Question, QuizAttempt};
pub use spec::GenerationSpec;
pub use error::DomainError;
pub use event::{Event, EventKind};

/// Timestamp type
pub type Time = chrono::DateTime<chrono::Utc>;
