//! Storage trait abstraction.

use async_trait::async_trait;
use pathway_core::{AccountId, Event, NodeId, Roadmap, RoadmapId};

/// Error type for storage operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// Errors that can occur during storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Item not found
    #[error("not found: {0}")]
    NotFound(String),

    /// Other error
    #[error("{0}")]
    Other(String),
}

/// Storage abstraction for Pathway data.
///
/// Roadmaps are stored as whole aggregates: one save covers the roadmap and
/// every node status inside it, which is what keeps unlock recomputation
/// atomic from a reader's point of view. Methods take `&self`; backends use
/// interior mutability so one storage handle can be shared across
/// concurrent service calls.
#[async_trait]
pub trait Storage: Send + Sync {
    // === Roadmap operations ===

    /// Save a roadmap aggregate (create or update).
    async fn save_roadmap(&self, roadmap: &Roadmap) -> Result<()>;

    /// Load a roadmap by ID.
    async fn load_roadmap(&self, id: RoadmapId) -> Result<Option<Roadmap>>;

    /// List roadmaps owned by an account.
    async fn list_roadmaps(&self, owner: AccountId) -> Result<Vec<Roadmap>>;

    /// Find the roadmap that owns a node.
    async fn find_by_node(&self, node_id: NodeId) -> Result<Option<Roadmap>>;

    /// Delete a roadmap.
    async fn delete_roadmap(&self, id: RoadmapId) -> Result<()>;

    // === Event operations ===

    /// Append a progression event.
    async fn save_event(&self, event: &Event) -> Result<()>;

    /// List events for a roadmap, oldest first.
    async fn list_events(&self, roadmap_id: RoadmapId) -> Result<Vec<Event>>;
}
