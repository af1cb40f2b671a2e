//! Wire schema of generator output.
//!
//! Mirrors the JSON the content-synthesis backend produces: roadmap meta
//! plus modules with symbolic ids and `depends_on` references. The service
//! layer translates this into real `Node` entities with ULID ids.

use serde::{Deserialize, Serialize};

/// A complete generated roadmap, pre-assembly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedRoadmap {
    /// Roadmap-wide metadata
    pub roadmap_meta: GeneratedMeta,

    /// Modules in recommended order
    #[serde(default)]
    pub modules: Vec<GeneratedModule>,
}

/// Roadmap-level metadata from the generator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedMeta {
    /// Roadmap title
    pub title: String,

    /// Overview text
    #[serde(default)]
    pub description: String,

    /// Difficulty label
    #[serde(default = "default_difficulty")]
    pub difficulty: String,

    /// Sum of module hour estimates
    #[serde(default)]
    pub total_estimated_hours: u32,

    /// Calendar weeks at the requested pace
    #[serde(default)]
    pub total_weeks: u32,

    /// Focus of the plan
    #[serde(default)]
    pub focus: String,

    /// Milestone groupings, referencing module ids
    #[serde(default)]
    pub milestones: Vec<GeneratedMilestone>,
}

fn default_difficulty() -> String {
    "Intermediate".to_string()
}

/// A milestone over symbolic module ids.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedMilestone {
    /// Milestone name
    pub name: String,

    /// Symbolic module ids ("M1", "M2", ...)
    #[serde(default)]
    pub modules: Vec<String>,

    /// What the learner can do afterwards
    #[serde(default)]
    pub outcome: String,
}

/// One module of generated content.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedModule {
    /// Symbolic id, unique within the roadmap ("M1")
    pub module_id: String,

    /// Symbolic ids of prerequisite modules
    #[serde(default)]
    pub depends_on: Vec<String>,

    /// Module topic, becomes the node title
    pub topic: String,

    /// What the module teaches, becomes the node summary
    #[serde(default)]
    pub goal: String,

    /// Lesson content
    #[serde(default)]
    pub content: String,

    /// Effort estimate
    #[serde(default)]
    pub estimated_hours: u32,

    /// Learning resources
    #[serde(default)]
    pub resources: Vec<GeneratedResource>,

    /// Quiz questions gating completion
    #[serde(default)]
    pub quiz: Vec<GeneratedQuestion>,
}

/// A learning resource suggestion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedResource {
    /// Resource title
    pub title: String,

    /// Kind of material (docs, video, tutorial, repo, ...)
    #[serde(rename = "type", default)]
    pub kind: String,

    /// Link to the material
    #[serde(default)]
    pub url: String,

    /// Difficulty level
    #[serde(default)]
    pub level: String,

    /// Why this resource was picked
    #[serde(rename = "why_this", default)]
    pub rationale: String,

    /// Estimated hours to work through it
    #[serde(default)]
    pub time_estimate_hours: u32,
}

/// A generated multiple-choice question.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedQuestion {
    /// Question text
    pub question: String,

    /// Answer options
    pub options: Vec<String>,

    /// Index of the correct option
    pub correct_index: usize,

    /// Why the correct option is right
    #[serde(default)]
    pub explanation: String,
}
