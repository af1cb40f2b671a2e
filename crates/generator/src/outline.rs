//! Deterministic outline generator.
//!
//! Used when no generation backend is configured, and by tests. Produces a
//! linear outline sized by the caller's weekly hours. Outline modules carry
//! no quiz, so each node auto-passes once it becomes available.

use pathway_core::GenerationSpec;
use tracing::debug;

use crate::output::{
    GeneratedMeta, GeneratedMilestone, GeneratedModule, GeneratedResource, GeneratedRoadmap,
};
use crate::{GeneratorError, RoadmapGenerator};

const STAGES: &[(&str, &str, u32)] = &[
    ("Foundations", "Install the toolchain and learn the basic syntax", 10),
    ("Core concepts", "Work through the core language concepts in depth", 16),
    ("Ecosystem and tooling", "Learn the standard tooling and key libraries", 12),
    ("Guided project", "Build one small end-to-end project", 14),
    ("Portfolio piece", "Design and ship a project worth showing", 20),
];

/// Generates the same outline for the same spec, offline.
#[derive(Debug, Clone, Copy, Default)]
pub struct OutlineGenerator;

impl OutlineGenerator {
    /// Create a new outline generator.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait::async_trait]
impl RoadmapGenerator for OutlineGenerator {
    async fn generate(&self, spec: &GenerationSpec) -> Result<GeneratedRoadmap, GeneratorError> {
        debug!(role = %spec.role, "building outline roadmap");

        let modules: Vec<GeneratedModule> = STAGES
            .iter()
            .enumerate()
            .map(|(i, (stage, goal, hours))| GeneratedModule {
                module_id: format!("M{}", i + 1),
                depends_on: if i == 0 {
                    Vec::new()
                } else {
                    vec![format!("M{}", i)]
                },
                topic: format!("{}: {}", stage, spec.role),
                goal: goal.to_string(),
                content: format!(
                    "{} for the {} track, keeping \"{}\" in mind.",
                    goal, spec.role, spec.goal
                ),
                estimated_hours: *hours,
                resources: vec![GeneratedResource {
                    title: format!("{} — {}", stage, spec.role),
                    kind: "search".into(),
                    url: format!(
                        "https://duckduckgo.com/?q={}+{}",
                        slug(stage),
                        slug(&spec.role)
                    ),
                    level: "mixed".into(),
                    rationale: "Starting point until a generation backend is configured".into(),
                    time_estimate_hours: hours / 2,
                }],
                quiz: Vec::new(),
            })
            .collect();

        let total_estimated_hours: u32 = modules.iter().map(|m| m.estimated_hours).sum();
        let total_weeks = total_estimated_hours.div_ceil(spec.hours_per_week.max(1));

        Ok(GeneratedRoadmap {
            roadmap_meta: GeneratedMeta {
                title: format!("{} outline", spec.role),
                description: format!("A fixed outline toward: {}", spec.goal),
                difficulty: "Beginner".into(),
                total_estimated_hours,
                total_weeks,
                focus: spec.focus.clone(),
                milestones: vec![
                    GeneratedMilestone {
                        name: "Learn".into(),
                        modules: vec!["M1".into(), "M2".into(), "M3".into()],
                        outcome: "Comfortable with the language and tooling".into(),
                    },
                    GeneratedMilestone {
                        name: "Build".into(),
                        modules: vec!["M4".into(), "M5".into()],
                        outcome: "Two projects to talk about".into(),
                    },
                ],
            },
            modules,
        })
    }
}

fn slug(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join("+")
}
