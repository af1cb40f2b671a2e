//! JSON file storage implementation.
//!
//! Stores each roadmap aggregate as one pretty-printed JSON file under a
//! data directory, with events appended beside them. One file per roadmap
//! keeps the whole-aggregate write atomic at the file level.

use std::path::Path;

use pathway_core::{AccountId, Event, NodeId, Roadmap, RoadmapId};
use tokio::fs;
use tracing::debug;

use super::{Result, Storage, StorageError};

/// File-based JSON storage backend.
pub struct JsonStorage {
    root: std::path::PathBuf,
}

impl JsonStorage {
    /// Create storage rooted at `root`, creating the `roadmaps/` and
    /// `events/` subdirectories as needed.
    pub async fn new(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(root.join("roadmaps")).await?;
        fs::create_dir_all(root.join("events")).await?;
        Ok(Self { root })
    }

    fn roadmap_path(&self, id: RoadmapId) -> std::path::PathBuf {
        self.root.join("roadmaps").join(format!("{}.json", id))
    }

    fn event_path(&self, event: &Event) -> std::path::PathBuf {
        self.root.join("events").join(format!("{}.json", event.id))
    }

    async fn all_roadmaps(&self) -> Result<Vec<Roadmap>> {
        list_dir(&self.root.join("roadmaps")).await
    }
}

#[async_trait::async_trait]
impl Storage for JsonStorage {
    async fn save_roadmap(&self, roadmap: &Roadmap) -> Result<()> {
        let path = self.roadmap_path(roadmap.id);
        let json = serde_json::to_string_pretty(roadmap)?;

        // Write to a sibling temp file, then rename over the target, so a
        // reader never observes a partially written aggregate.
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, json.as_bytes()).await?;
        fs::rename(&tmp, &path).await?;

        debug!(roadmap = %roadmap.id, "saved roadmap");
        Ok(())
    }

    async fn load_roadmap(&self, id: RoadmapId) -> Result<Option<Roadmap>> {
        read_json(&self.roadmap_path(id)).await
    }

    async fn list_roadmaps(&self, owner: AccountId) -> Result<Vec<Roadmap>> {
        let mut roadmaps: Vec<Roadmap> = self
            .all_roadmaps()
            .await?
            .into_iter()
            .filter(|r| r.owner == owner)
            .collect();
        roadmaps.sort_by_key(|r| r.created_at);
        Ok(roadmaps)
    }

    async fn find_by_node(&self, node_id: NodeId) -> Result<Option<Roadmap>> {
        Ok(self
            .all_roadmaps()
            .await?
            .into_iter()
            .find(|r| r.node(node_id).is_some()))
    }

    async fn delete_roadmap(&self, id: RoadmapId) -> Result<()> {
        let path = self.roadmap_path(id);
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(StorageError::NotFound(id.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn save_event(&self, event: &Event) -> Result<()> {
        let json = serde_json::to_string_pretty(event)?;
        fs::write(self.event_path(event), json.as_bytes()).await?;
        Ok(())
    }

    async fn list_events(&self, roadmap_id: RoadmapId) -> Result<Vec<Event>> {
        let mut events: Vec<Event> = list_dir::<Event>(&self.root.join("events"))
            .await?
            .into_iter()
            .filter(|e| e.roadmap_id == roadmap_id)
            .collect();
        events.sort_by_key(|e| e.timestamp);
        Ok(events)
    }
}

async fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    match fs::read_to_string(path).await {
        Ok(s) => Ok(Some(serde_json::from_str(&s)?)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

async fn list_dir<T: serde::de::DeserializeOwned>(dir: &Path) -> Result<Vec<T>> {
    let mut out = Vec::new();
    let mut entries = fs::read_dir(dir).await?;
    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some("json") {
            continue;
        }
        let s = fs::read_to_string(&path).await?;
        out.push(serde_json::from_str(&s)?);
    }
    Ok(out)
}
