//! Assembly of generator output into a persisted roadmap.
//!
//! The generator speaks in symbolic module ids ("M1"); assembly resolves
//! them into real `NodeId`s, validates the prerequisite graph, and leaves
//! every node Locked.

use std::collections::HashMap;

use pathway_core::{
    AccountId, DomainError, Milestone, Node, NodeId, NodeStatus, Question, QuestionId, Resource,
    Roadmap, RoadmapId,
};
use pathway_generator::{GeneratedModule, GeneratedQuestion, GeneratedRoadmap};
use pathway_progress::PrereqGraph;
use tracing::warn;

/// Turn generator output into a roadmap owned by `owner`.
///
/// Fails with `Validation` for unusable content (duplicate module ids,
/// broken questions) and `Configuration` for a broken prerequisite graph
/// (unknown references, self-edges, cycles).
pub fn assemble(owner: AccountId, generated: GeneratedRoadmap) -> Result<Roadmap, DomainError> {
    let mut ids: HashMap<String, NodeId> = HashMap::new();
    for module in &generated.modules {
        if ids.insert(module.module_id.clone(), NodeId::new()).is_some() {
            return Err(DomainError::Validation(format!(
                "duplicate module id '{}' in generated roadmap",
                module.module_id
            )));
        }
    }

    let mut nodes = Vec::with_capacity(generated.modules.len());
    for module in &generated.modules {
        nodes.push(build_node(module, &ids)?);
    }

    // Creation-time acyclicity check; the unlock engine relies on it.
    PrereqGraph::build(&nodes)?;

    let meta = generated.roadmap_meta;
    let milestones = meta
        .milestones
        .into_iter()
        .map(|m| Milestone {
            nodes: m
                .modules
                .iter()
                .filter_map(|module_id| {
                    let id = ids.get(module_id).copied();
                    if id.is_none() {
                        warn!(milestone = %m.name, %module_id, "milestone references unknown module");
                    }
                    id
                })
                .collect(),
            name: m.name,
            outcome: m.outcome,
        })
        .collect();

    Ok(Roadmap {
        id: RoadmapId::new(),
        title: meta.title,
        description: meta.description,
        owner,
        difficulty: meta.difficulty,
        total_estimated_hours: meta.total_estimated_hours,
        total_weeks: meta.total_weeks,
        focus: meta.focus,
        milestones,
        nodes,
        started: false,
        created_at: chrono::Utc::now(),
    })
}

fn build_node(
    module: &GeneratedModule,
    ids: &HashMap<String, NodeId>,
) -> Result<Node, DomainError> {
    let mut prerequisites = Vec::with_capacity(module.depends_on.len());
    for dep in &module.depends_on {
        let id = ids.get(dep).ok_or_else(|| {
            DomainError::Configuration(format!(
                "module '{}' depends on unknown module '{}'",
                module.module_id, dep
            ))
        })?;
        prerequisites.push(*id);
    }

    let questions = module
        .quiz
        .iter()
        .map(|q| build_question(&module.module_id, q))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Node {
        id: ids[&module.module_id],
        title: module.topic.clone(),
        description: module.content.clone(),
        summary: module.goal.clone(),
        estimated_hours: module.estimated_hours,
        resources: module
            .resources
            .iter()
            .map(|r| Resource {
                url: r.url.clone(),
                title: r.title.clone(),
                kind: r.kind.clone(),
                level: r.level.clone(),
                rationale: r.rationale.clone(),
                time_estimate_hours: r.time_estimate_hours,
            })
            .collect(),
        prerequisites,
        questions,
        status: NodeStatus::Locked,
    })
}

fn build_question(module_id: &str, q: &GeneratedQuestion) -> Result<Question, DomainError> {
    if q.options.is_empty() {
        return Err(DomainError::Validation(format!(
            "question in module '{}' has no options",
            module_id
        )));
    }
    if q.correct_index >= q.options.len() {
        return Err(DomainError::Validation(format!(
            "question in module '{}' has correct_index {} but only {} options",
            module_id,
            q.correct_index,
            q.options.len()
        )));
    }
    Ok(Question {
        id: QuestionId::new(),
        text: q.question.clone(),
        options: q.options.clone(),
        correct_index: q.correct_index,
        explanation: q.explanation.clone(),
    })
}
