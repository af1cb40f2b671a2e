//! Roadmap and node models - the core units of progression.

use serde::{Deserialize, Serialize};
use crate::error::DomainError;
use crate::id::{AccountId, NodeId, RoadmapId};
use crate::quiz::Question;
use crate::Time;

/// A learning roadmap owned by a single account.
///
/// Structure is immutable after creation; only node statuses and the
/// `started` flag change over the roadmap's lifetime.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Roadmap {
    /// Unique identifier
    pub id: RoadmapId,

    /// Roadmap title
    pub title: String,

    /// Overview text
    pub description: String,

    /// Owning account; all operations are scoped to the owner
    pub owner: AccountId,

    /// Difficulty label produced by the generator
    pub difficulty: String,

    /// Total estimated effort across all nodes
    pub total_estimated_hours: u32,

    /// Calendar estimate given the caller's hours per week
    pub total_weeks: u32,

    /// Focus of the plan (portfolio, interview, job-ready)
    pub focus: String,

    /// Milestone groupings over the nodes
    pub milestones: Vec<Milestone>,

    /// Nodes in generator order
    pub nodes: Vec<Node>,

    /// Set exactly once by `start`; triggers the initial unlock pass
    pub started: bool,

    /// Creation timestamp
    pub created_at: Time,
}

impl Roadmap {
    /// Look up a node by id.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Look up a node mutably by id.
    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.iter_mut().find(|n| n.id == id)
    }

    /// Whether every prerequisite of `node` is completed.
    pub fn prerequisites_completed(&self, node: &Node) -> bool {
        node.prerequisites.iter().all(|p| {
            self.node(*p)
                .map(|n| n.status == NodeStatus::Completed)
                .unwrap_or(false)
        })
    }
}

/// A milestone groups nodes toward a demonstrable outcome.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Milestone {
    /// Milestone name
    pub name: String,

    /// Nodes this milestone covers
    pub nodes: Vec<NodeId>,

    /// What the learner can do after this milestone
    pub outcome: String,
}

/// A single lesson node within a roadmap.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    /// Unique identifier
    pub id: NodeId,

    /// Node title
    pub title: String,

    /// Lesson content
    pub description: String,

    /// One-line summary shown in listings
    pub summary: String,

    /// Estimated effort for this node
    pub estimated_hours: u32,

    /// Learning resources, in recommended order
    pub resources: Vec<Resource>,

    /// Prerequisite nodes within the same roadmap
    pub prerequisites: Vec<NodeId>,

    /// Quiz questions gating completion
    pub questions: Vec<Question>,

    /// Progression status
    pub status: NodeStatus,
}

impl Node {
    /// Transition Locked -> Available. Only the unlock engine calls this.
    pub fn mark_available(&mut self) -> Result<(), DomainError> {
        match self.status {
            NodeStatus::Locked => {
                self.status = NodeStatus::Available;
                Ok(())
            }
            status => Err(DomainError::InvalidState {
                reason: format!("cannot unlock node '{}'", self.title),
                status,
            }),
        }
    }

    /// Transition Available -> Completed. Only a passing quiz attempt
    /// drives this.
    pub fn mark_completed(&mut self) -> Result<(), DomainError> {
        match self.status {
            NodeStatus::Available => {
                self.status = NodeStatus::Completed;
                Ok(())
            }
            status => Err(DomainError::InvalidState {
                reason: format!("cannot complete node '{}'", self.title),
                status,
            }),
        }
    }

    /// Whether a quiz may be taken on this node right now.
    pub fn can_take_quiz(&self) -> bool {
        self.status == NodeStatus::Available
    }
}

/// Node progression status.
///
/// Locked is the initial state; Completed is terminal. No transition moves
/// backward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeStatus {
    /// Prerequisites not yet completed
    Locked,
    /// Open for study and quizzing
    Available,
    /// Quiz passed (or auto-passed for question-less nodes)
    Completed,
}

/// A learning resource attached to a node. Immutable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Resource {
    /// Link to the material
    pub url: String,

    /// Resource title
    pub title: String,

    /// Kind of material (docs, video, tutorial, repo, ...)
    pub kind: String,

    /// Difficulty level of the material
    pub level: String,

    /// Why the generator picked this resource
    pub rationale: String,

    /// Estimated time to work through it
    pub time_estimate_hours: u32,
}
