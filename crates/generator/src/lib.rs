//! Content generation for Pathway.
//!
//! The roadmap service treats content synthesis as an external
//! collaborator behind the [`RoadmapGenerator`] trait. Two implementations
//! ship here: an HTTP client for a remote generation backend, and a
//! deterministic outline used offline and in tests.

#![warn(missing_docs)]

mod http;
mod outline;
mod output;
mod prompt;

use async_trait::async_trait;
use pathway_core::GenerationSpec;

pub use http::{parse_roadmap_text, HttpGenerator};
pub use outline::OutlineGenerator;
pub use output::{
    GeneratedMeta, GeneratedMilestone, GeneratedModule, GeneratedQuestion, GeneratedResource,
    GeneratedRoadmap,
};
pub use prompt::build_prompt;

/// Errors the generation collaborator can produce.
#[derive(Debug, thiserror::Error)]
pub enum GeneratorError {
    /// Transport failure reaching the backend
    #[error("generation request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Backend answered with a non-success status
    #[error("generation backend error (status {status}): {body}")]
    Backend {
        /// HTTP status code
        status: u16,
        /// Response body, for diagnostics
        body: String,
    },

    /// Backend output was not valid JSON
    #[error("could not parse generator output: {0}")]
    Parse(#[from] serde_json::Error),

    /// Backend output parsed but is unusable
    #[error("malformed generator output: {0}")]
    Malformed(String),
}

/// External content-synthesis collaborator.
#[async_trait]
pub trait RoadmapGenerator: Send + Sync {
    /// Produce roadmap content for a generation spec.
    async fn generate(&self, spec: &GenerationSpec) -> Result<GeneratedRoadmap, GeneratorError>;
}
