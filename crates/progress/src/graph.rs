//! Prerequisite graph validation and ordering.

use std::collections::{HashMap, HashSet};

use pathway_core::{DomainError, Node, NodeId};

/// The prerequisite edges of one roadmap, validated at construction.
///
/// Acyclicity is checked here, at roadmap-creation time. The unlock engine
/// assumes it as a precondition and never re-checks.
#[derive(Debug)]
pub struct PrereqGraph {
    /// node -> [prerequisites]
    edges: HashMap<NodeId, Vec<NodeId>>,
    /// node -> [dependents]
    reverse: HashMap<NodeId, Vec<NodeId>>,
    order: Vec<NodeId>,
}

impl PrereqGraph {
    /// Build and validate the graph over a roadmap's node set.
    ///
    /// Rejects edges to unknown nodes, self-edges, and cycles with a
    /// `Configuration` error.
    pub fn build(nodes: &[Node]) -> Result<Self, DomainError> {
        let known: HashSet<NodeId> = nodes.iter().map(|n| n.id).collect();

        let mut edges: HashMap<NodeId, Vec<NodeId>> = HashMap::new();
        let mut reverse: HashMap<NodeId, Vec<NodeId>> = HashMap::new();

        for node in nodes {
            for prereq in &node.prerequisites {
                if !known.contains(prereq) {
                    return Err(DomainError::Configuration(format!(
                        "node '{}' requires unknown node {}",
                        node.title, prereq
                    )));
                }
                if *prereq == node.id {
                    return Err(DomainError::Configuration(format!(
                        "node '{}' requires itself",
                        node.title
                    )));
                }
                // Duplicate depends_on entries collapse to one edge.
                let entry = edges.entry(node.id).or_default();
                if !entry.contains(prereq) {
                    entry.push(*prereq);
                    reverse.entry(*prereq).or_default().push(node.id);
                }
            }
        }

        let order = topological_order(nodes, &edges)?;

        Ok(Self { edges, reverse, order })
    }

    /// Node ids in dependency order: prerequisites before dependents.
    pub fn order(&self) -> &[NodeId] {
        &self.order
    }

    /// Direct prerequisites of a node.
    pub fn prerequisites(&self, id: NodeId) -> &[NodeId] {
        self.edges.get(&id).map(|v| v.as_slice()).unwrap_or(&[])
    }

    /// Nodes that list `id` as a prerequisite.
    pub fn dependents(&self, id: NodeId) -> &[NodeId] {
        self.reverse.get(&id).map(|v| v.as_slice()).unwrap_or(&[])
    }
}

/// Kahn's algorithm; a leftover node means a cycle.
fn topological_order(
    nodes: &[Node],
    edges: &HashMap<NodeId, Vec<NodeId>>,
) -> Result<Vec<NodeId>, DomainError> {
    let mut pending: HashMap<NodeId, usize> = nodes
        .iter()
        .map(|n| (n.id, edges.get(&n.id).map(|e| e.len()).unwrap_or(0)))
        .collect();

    let mut sorted = Vec::with_capacity(nodes.len());
    let mut ready: Vec<NodeId> = nodes
        .iter()
        .filter(|n| pending[&n.id] == 0)
        .map(|n| n.id)
        .collect();

    while let Some(id) = ready.pop() {
        sorted.push(id);
        for node in nodes {
            if edges.get(&node.id).map(|e| e.contains(&id)).unwrap_or(false) {
                if let Some(count) = pending.get_mut(&node.id) {
                    *count -= 1;
                    if *count == 0 {
                        ready.push(node.id);
                    }
                }
            }
        }
    }

    if sorted.len() != nodes.len() {
        let remaining: Vec<String> = nodes
            .iter()
            .filter(|n| !sorted.contains(&n.id))
            .map(|n| n.title.clone())
            .collect();
        return Err(DomainError::Configuration(format!(
            "prerequisite cycle involving: {}",
            remaining.join(", ")
        )));
    }

    Ok(sorted)
}
