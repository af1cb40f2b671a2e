//! Event model - atoms of the progression timeline.

use crate::id::{AccountId, EventId, NodeId, RoadmapId};
use crate::Time;
use serde::{Deserialize, Serialize};

/// An event is an atomic unit that happened at a specific time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    /// Unique identifier
    pub id: EventId,

    /// When it happened
    pub timestamp: Time,

    /// Account that triggered the action
    pub actor: AccountId,

    /// Roadmap the event belongs to
    pub roadmap_id: RoadmapId,

    /// What happened
    pub kind: EventKind,

    /// Human-readable detail
    pub detail: String,
}

impl Event {
    /// Create a new event.
    pub fn new(
        actor: AccountId,
        roadmap_id: RoadmapId,
        kind: EventKind,
        detail: impl Into<String>,
    ) -> Self {
        Self {
            id: EventId::new(),
            timestamp: chrono::Utc::now(),
            actor,
            roadmap_id,
            kind,
            detail: detail.into(),
        }
    }
}

/// The kinds of progression events the service records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventKind {
    /// A roadmap was generated and persisted
    RoadmapGenerated,

    /// A roadmap was started for the first time
    RoadmapStarted,

    /// A node moved Locked -> Available
    NodeUnlocked(NodeId),

    /// A quiz was submitted (pass or fail)
    QuizSubmitted {
        /// Node quizzed
        node_id: NodeId,
        /// Whether the attempt passed
        passed: bool,
    },

    /// A node moved Available -> Completed
    NodeCompleted(NodeId),
}
