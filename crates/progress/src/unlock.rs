//! Roadmap unlock engine.
//!
//! Recomputes node availability over the whole node set. A full-set pass,
//! rather than per-edge updates, is what makes diamond dependencies safe: a
//! node with two prerequisites only unlocks once both are Completed, no
//! matter which completion arrived last.

use std::collections::HashMap;

use pathway_core::{NodeId, NodeStatus, Roadmap};
use tracing::{debug, info};

/// What prompted a recomputation. Informational only; the recompute always
/// covers the full node set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnlockSignal {
    /// The roadmap was just started
    Started,
    /// A node was just completed
    NodeCompleted(NodeId),
}

/// Recomputes Locked -> Available transitions.
///
/// Precondition: the prerequisite graph is acyclic. `PrereqGraph::build`
/// enforces this at roadmap creation, so the engine itself cannot fail.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnlockEngine;

impl UnlockEngine {
    /// Create a new engine.
    pub fn new() -> Self {
        Self
    }

    /// Mark every Locked node whose prerequisites are all Completed as
    /// Available. Returns the newly unlocked node ids. Idempotent: a
    /// second call with no intervening completion changes nothing.
    pub fn recompute(&self, roadmap: &mut Roadmap, signal: UnlockSignal) -> Vec<NodeId> {
        debug!(roadmap = %roadmap.id, ?signal, "recomputing unlocks");

        // Snapshot statuses first so the pass observes one consistent set.
        let statuses: HashMap<NodeId, NodeStatus> =
            roadmap.nodes.iter().map(|n| (n.id, n.status)).collect();

        let mut unlocked = Vec::new();
        for node in &mut roadmap.nodes {
            if node.status != NodeStatus::Locked {
                continue;
            }
            let satisfied = node
                .prerequisites
                .iter()
                .all(|p| statuses.get(p) == Some(&NodeStatus::Completed));
            if satisfied {
                // Snapshot says Locked, so this cannot fail.
                if node.mark_available().is_ok() {
                    unlocked.push(node.id);
                }
            }
        }

        if !unlocked.is_empty() {
            info!(
                roadmap = %roadmap.id,
                count = unlocked.len(),
                "nodes unlocked"
            );
        }

        unlocked
    }
}
