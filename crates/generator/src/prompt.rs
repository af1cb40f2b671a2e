//! Prompt construction for the remote generation backend.

use pathway_core::GenerationSpec;

/// Build the generation prompt from a caller's spec.
///
/// The contract with the backend: return strict JSON matching the
/// `GeneratedRoadmap` schema, no markdown fences, no commentary. Fences are
/// still stripped on the way back because models add them anyway.
pub fn build_prompt(spec: &GenerationSpec) -> String {
    format!(
        r#"Act as a senior mentor and curriculum designer. Create a custom learning roadmap.

User profile:
- Role: "{role}"
- Current stack/skills: "{stack}" (skip what they already know)
- Goal: "{goal}"
- Available time: {hours} hours/week
- Learning style: "{style}"
- Focus: "{focus}"
- Constraints: "{constraints}"

Requirements:
1) Analyze the gap between current skills and the goal.
2) Break the plan into 4-8 modules. Each module has: module_id ("M1", "M2", ...),
   depends_on (list of module_ids), topic, goal, content, estimated_hours,
   resources (3, diverse: at least one official docs, one video/course, one
   hands-on), quiz (5 multiple-choice questions with 4 options each,
   correct_index, explanation).
3) total_estimated_hours must equal the sum of module estimates;
   total_weeks = ceil(total_estimated_hours / hours_per_week).
4) Group modules into milestones with a concrete outcome each.

Return ONLY valid JSON with top-level keys "roadmap_meta" and "modules".
Use double quotes. No trailing commas. No markdown."#,
        role = spec.role,
        stack = spec.current_stack,
        goal = spec.goal,
        hours = spec.hours_per_week,
        style = spec.learning_style,
        focus = spec.focus,
        constraints = spec.constraints,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_carries_the_spec_fields() {
        let spec = GenerationSpec {
            role: "Rust Backend Developer".into(),
            current_stack: "Python".into(),
            goal: "ship a service".into(),
            hours_per_week: 8,
            learning_style: "docs-first".into(),
            focus: "job-ready".into(),
            constraints: "free-only".into(),
        };
        let prompt = build_prompt(&spec);
        assert!(prompt.contains("Rust Backend Developer"));
        assert!(prompt.contains("8 hours/week"));
        assert!(prompt.contains("free-only"));
    }
}
