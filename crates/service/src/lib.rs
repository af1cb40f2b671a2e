//! The Pathway roadmap service.
//!
//! Orchestrates generation, retrieval, start, and quiz-gated progression.
//! This is the only crate the external client layer touches; everything
//! below it (evaluator, unlock engine, storage, generator) is wired here.

#![warn(missing_docs)]

mod api;
mod assemble;
mod auth;
mod error;
mod guard;
mod ratelimit;
mod service;

pub use api::{AnswerSubmit, QuestionPublic, SubmitOutcome};
pub use auth::TokenRegistry;
pub use error::{Result, ServiceError};
pub use ratelimit::RateLimiter;
pub use service::RoadmapService;
