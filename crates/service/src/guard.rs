//! Single-writer-per-node submission guard.
//!
//! Two near-simultaneous passing attempts on the same node must not
//! double-trigger unlock propagation. The second concurrent submission is
//! rejected with `Conflict`, not queued.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use pathway_core::{DomainError, NodeId};

/// Tracks which nodes have a submission in flight.
#[derive(Clone, Default)]
pub struct InFlightNodes {
    inner: Arc<Mutex<HashSet<NodeId>>>,
}

impl InFlightNodes {
    /// Create an empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim `node` for the current submission. Fails with `Conflict` if
    /// another submission already holds it. The claim is released when the
    /// returned lease drops, on every exit path.
    pub fn acquire(&self, node: NodeId) -> Result<NodeLease, DomainError> {
        let mut held = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        if !held.insert(node) {
            return Err(DomainError::Conflict(format!(
                "a quiz submission for node {} is already in flight",
                node
            )));
        }
        Ok(NodeLease {
            set: Arc::clone(&self.inner),
            node,
        })
    }
}

/// Exclusive claim on one node, released on drop.
pub struct NodeLease {
    set: Arc<Mutex<HashSet<NodeId>>>,
    node: NodeId,
}

impl Drop for NodeLease {
    fn drop(&mut self) {
        self.set
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .remove(&self.node);
    }
}
