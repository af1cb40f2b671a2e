//! Generation spec - what the caller wants a roadmap for.

use serde::{Deserialize, Serialize};
use crate::error::DomainError;

/// Request shape for roadmap generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationSpec {
    /// Target role, e.g. "Rust Backend Developer"
    pub role: String,

    /// What the caller already knows (skipped by the generator)
    #[serde(default)]
    pub current_stack: String,

    /// Concrete goal, e.g. "land a job in 3 months"
    pub goal: String,

    /// Weekly time budget
    pub hours_per_week: u32,

    /// Preferred learning style (video-heavy, docs-first, project-based, mixed)
    #[serde(default = "default_learning_style")]
    pub learning_style: String,

    /// Focus of the plan
    #[serde(default = "default_focus")]
    pub focus: String,

    /// Constraints such as "free-only" or "low-spec laptop"
    #[serde(default)]
    pub constraints: String,
}

fn default_learning_style() -> String {
    "mixed".to_string()
}

fn default_focus() -> String {
    "job-ready".to_string()
}

impl GenerationSpec {
    /// Reject specs the generator cannot work with.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.role.trim().is_empty() {
            return Err(DomainError::Validation("role must not be empty".into()));
        }
        if self.goal.trim().is_empty() {
            return Err(DomainError::Validation("goal must not be empty".into()));
        }
        if self.hours_per_week == 0 {
            return Err(DomainError::Validation(
                "hours_per_week must be at least 1".into(),
            ));
        }
        Ok(())
    }
}
