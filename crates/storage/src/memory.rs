//! In-memory storage backend.
//!
//! Backs the service tests and any embedded use where persistence across
//! restarts does not matter.

use std::collections::HashMap;

use pathway_core::{AccountId, Event, NodeId, Roadmap, RoadmapId};
use tokio::sync::RwLock;

use super::{Result, Storage};

/// Map-backed storage. Cheap to create, never touches disk.
#[derive(Default)]
pub struct MemoryStorage {
    roadmaps: RwLock<HashMap<RoadmapId, Roadmap>>,
    events: RwLock<Vec<Event>>,
}

impl MemoryStorage {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl Storage for MemoryStorage {
    async fn save_roadmap(&self, roadmap: &Roadmap) -> Result<()> {
        self.roadmaps
            .write()
            .await
            .insert(roadmap.id, roadmap.clone());
        Ok(())
    }

    async fn load_roadmap(&self, id: RoadmapId) -> Result<Option<Roadmap>> {
        Ok(self.roadmaps.read().await.get(&id).cloned())
    }

    async fn list_roadmaps(&self, owner: AccountId) -> Result<Vec<Roadmap>> {
        let mut roadmaps: Vec<Roadmap> = self
            .roadmaps
            .read()
            .await
            .values()
            .filter(|r| r.owner == owner)
            .cloned()
            .collect();
        roadmaps.sort_by_key(|r| r.created_at);
        Ok(roadmaps)
    }

    async fn find_by_node(&self, node_id: NodeId) -> Result<Option<Roadmap>> {
        Ok(self
            .roadmaps
            .read()
            .await
            .values()
            .find(|r| r.node(node_id).is_some())
            .cloned())
    }

    async fn delete_roadmap(&self, id: RoadmapId) -> Result<()> {
        self.roadmaps.write().await.remove(&id);
        Ok(())
    }

    async fn save_event(&self, event: &Event) -> Result<()> {
        self.events.write().await.push(event.clone());
        Ok(())
    }

    async fn list_events(&self, roadmap_id: RoadmapId) -> Result<Vec<Event>> {
        Ok(self
            .events
            .read()
            .await
            .iter()
            .filter(|e| e.roadmap_id == roadmap_id)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pathway_core::EventKind;

    fn roadmap(owner: AccountId) -> Roadmap {
        Roadmap {
            id: RoadmapId::new(),
            title: "Rust".into(),
            description: String::new(),
            owner,
            difficulty: "Beginner".into(),
            total_estimated_hours: 40,
            total_weeks: 4,
            focus: "job-ready".into(),
            milestones: Vec::new(),
            nodes: Vec::new(),
            started: false,
            created_at: chrono::Utc::now(),
        }
    }

    #[tokio::test]
    async fn save_and_load_round_trip() {
        let storage = MemoryStorage::new();
        let r = roadmap(AccountId::new());
        storage.save_roadmap(&r).await.unwrap();

        let loaded = storage.load_roadmap(r.id).await.unwrap().unwrap();
        assert_eq!(loaded.title, "Rust");
    }

    #[tokio::test]
    async fn list_is_scoped_to_owner() {
        let storage = MemoryStorage::new();
        let owner = AccountId::new();
        storage.save_roadmap(&roadmap(owner)).await.unwrap();
        storage.save_roadmap(&roadmap(AccountId::new())).await.unwrap();

        assert_eq!(storage.list_roadmaps(owner).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn events_filter_by_roadmap() {
        let storage = MemoryStorage::new();
        let owner = AccountId::new();
        let r = roadmap(owner);
        storage
            .save_event(&Event::new(owner, r.id, EventKind::RoadmapGenerated, "gen"))
            .await
            .unwrap();
        storage
            .save_event(&Event::new(
                owner,
                RoadmapId::new(),
                EventKind::RoadmapStarted,
                "other",
            ))
            .await
            .unwrap();

        let events = storage.list_events(r.id).await.unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind, EventKind::RoadmapGenerated);
    }
}
