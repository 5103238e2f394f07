//! JSON-file episode store.
//!
//! Persists assembled episodes keyed by id and serves newest-first
//! listings. Lives outside the core engine: the orchestrator never reads
//! this store back into a running episode.

use std::collections::BTreeMap;
use std::io;
use std::path::PathBuf;

use roundtable_core::Episode;

pub struct EpisodeStore {
    path: PathBuf,
}

impl EpisodeStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Persist a new episode.
    pub fn add(&self, episode: &Episode) -> io::Result<()> {
        let mut episodes = self.load();
        episodes.insert(episode.id.clone(), episode.clone());
        let json = serde_json::to_string_pretty(&episodes)?;
        std::fs::write(&self.path, json)
    }

    /// All episodes, newest first.
    pub fn list(&self) -> Vec<Episode> {
        let mut episodes: Vec<Episode> = self.load().into_values().collect();
        episodes.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        episodes
    }

    /// Look up one episode by id.
    pub fn get(&self, id: &str) -> Option<Episode> {
        self.load().remove(id)
    }

    /// A missing or corrupt store file reads as empty.
    fn load(&self) -> BTreeMap<String, Episode> {
        std::fs::read_to_string(&self.path)
            .ok()
            .and_then(|content| serde_json::from_str(&content).ok())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roundtable_core::Transcript;

    fn temp_store() -> EpisodeStore {
        let path = std::env::temp_dir().join(format!(
            "roundtable-store-test-{}-{:?}.json",
            std::process::id(),
            std::thread::current().id()
        ));
        let _ = std::fs::remove_file(&path);
        EpisodeStore::new(path)
    }

    fn episode(topic: &str) -> Episode {
        roundtable_core::episode::assemble(Transcript {
            topic: topic.to_string(),
            turns: vec![],
        })
    }

    #[test]
    fn test_missing_file_lists_empty() {
        let store = temp_store();
        assert!(store.list().is_empty());
    }

    #[test]
    fn test_add_then_get_and_list_newest_first() {
        let store = temp_store();
        let first = episode("Government Jobs and Exams in India");
        let second = episode("Our Favorite Travel Destinations");

        store.add(&first).unwrap();
        store.add(&second).unwrap();

        assert_eq!(store.get(&first.id).unwrap().topic, first.topic);

        let listed = store.list();
        assert_eq!(listed.len(), 2);
        assert!(listed[0].created_at >= listed[1].created_at);

        let _ = std::fs::remove_file(&store.path);
    }
}
