//! File-backed event store with mtime-based cache invalidation.

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use tracing::error;

use crate::error::{CyberEventsError, CyberEventsResult};
use crate::event::{self, Evento};

/// In-memory cache over the externally-edited events file.
///
/// The store retains its last-loaded snapshot together with the file's
/// last-observed modification time and reloads only when that time has
/// advanced. The cache is an optimization: a reload racing a concurrent
/// external edit may observe a torn snapshot, which the next access heals.
/// There is no internal locking because the process has no writer of its
/// own.
#[derive(Debug)]
pub struct EventStore {
    path: PathBuf,
    eventos: Vec<Evento>,
    last_modified: Option<SystemTime>,
}

impl EventStore {
    /// Create a store over the given data file without touching the
    /// filesystem; the first access performs the initial load.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        EventStore {
            path: path.into(),
            eventos: Vec::new(),
            last_modified: None,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reload the snapshot if the file's mtime has advanced past the cached
    /// one. Load failures are absorbed: the error is logged and the empty
    /// collection takes the snapshot's place until the file changes again.
    pub async fn refresh_if_stale(&mut self) {
        if let Err(err) = self.try_refresh().await {
            error!(path = %self.path.display(), %err, "failed to load eventos");
            self.eventos = Vec::new();
        }
    }

    async fn try_refresh(&mut self) -> CyberEventsResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let metadata = match tokio::fs::metadata(&self.path).await {
            Ok(m) => m,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                // Seed an empty collection so external editors have a file
                // to append to.
                tokio::fs::write(&self.path, "[]\n").await?;
                self.eventos = Vec::new();
                self.last_modified = tokio::fs::metadata(&self.path).await?.modified().ok();
                return Ok(());
            }
            Err(err) => return Err(err.into()),
        };

        let modified = metadata.modified().ok();
        if modified.is_some() && modified == self.last_modified {
            return Ok(());
        }

        let data = tokio::fs::read_to_string(&self.path).await?;
        let eventos: Vec<Evento> = serde_json::from_str(&data)
            .map_err(|e| CyberEventsError::DataUnavailable(e.to_string()))?;
        event::validate_collection(&eventos)?;

        self.eventos = eventos;
        self.last_modified = modified;
        Ok(())
    }

    /// All known events, in source order.
    pub async fn get_all(&mut self) -> Vec<Evento> {
        self.refresh_if_stale().await;
        self.eventos.clone()
    }

    /// The event with the given id, if any.
    pub async fn get_by_id(&mut self, id: &str) -> Option<Evento> {
        self.refresh_if_stale().await;
        self.eventos.iter().find(|e| e.id == id).cloned()
    }

    /// The event promoted for hero-banner display, if one is flagged.
    pub async fn destacado(&mut self) -> Option<Evento> {
        self.refresh_if_stale().await;
        self.eventos
            .iter()
            .find(|e| e.destacado == Some(true))
            .cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn eventos_json() -> serde_json::Value {
        json!([
            {
                "id": "1",
                "titulo": "Ekoparty 2025",
                "descripcion": "Conferencia de seguridad",
                "fecha_inicio": "2025-09-01",
                "hora": "09:00",
                "pais": "Argentina",
                "ciudad": "Buenos Aires",
                "modalidad": "Presencial",
                "enlace": "https://www.ekoparty.org/",
                "organizador": "Ekoparty",
                "nivel": "Intermedio",
                "tags": ["Conferencia"],
                "destacado": true
            },
            {
                "id": "2",
                "titulo": "PicoCTF 2025",
                "descripcion": "Competencia CTF para estudiantes",
                "fecha_inicio": "2025-10-15",
                "hora": "00:00",
                "pais": "Global",
                "ciudad": "Online",
                "modalidad": "Online",
                "enlace": "https://picoctf.org/",
                "organizador": "Carnegie Mellon",
                "nivel": "Básico",
                "tags": ["CTF", "Estudiantes"]
            }
        ])
    }

    fn write_events(path: &Path, value: &serde_json::Value) {
        std::fs::write(path, serde_json::to_string_pretty(value).unwrap()).unwrap();
    }

    #[tokio::test]
    async fn test_missing_file_is_created_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data").join("eventos.json");

        let mut store = EventStore::new(&path);
        assert!(store.get_all().await.is_empty());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "[]\n");
    }

    #[tokio::test]
    async fn test_get_all_and_get_by_id() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("eventos.json");
        write_events(&path, &eventos_json());

        let mut store = EventStore::new(&path);
        let all = store.get_all().await;
        assert_eq!(all.len(), 2);
        // Source order preserved
        assert_eq!(all[0].id, "1");
        assert_eq!(all[1].id, "2");

        let hit = store.get_by_id("2").await.unwrap();
        assert_eq!(hit.titulo, "PicoCTF 2025");
        assert!(store.get_by_id("999").await.is_none());
    }

    #[tokio::test]
    async fn test_destacado_returns_flagged_event() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("eventos.json");
        write_events(&path, &eventos_json());

        let mut store = EventStore::new(&path);
        let featured = store.destacado().await.unwrap();
        assert_eq!(featured.id, "1");
    }

    #[tokio::test]
    async fn test_malformed_file_recovers_as_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("eventos.json");
        std::fs::write(&path, "{ not json").unwrap();

        let mut store = EventStore::new(&path);
        assert!(store.get_all().await.is_empty());

        // A failed load leaves the cached mtime untouched, so fixing the
        // file is picked up on the next access.
        write_events(&path, &eventos_json());
        assert_eq!(store.get_all().await.len(), 2);
    }

    #[tokio::test]
    async fn test_unknown_enum_value_rejects_the_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("eventos.json");
        let mut value = eventos_json();
        value[0]["modalidad"] = json!("Metaverso");
        write_events(&path, &value);

        let mut store = EventStore::new(&path);
        assert!(store.get_all().await.is_empty());
    }

    #[tokio::test]
    async fn test_end_before_start_rejects_the_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("eventos.json");
        let mut value = eventos_json();
        value[0]["fecha_fin"] = json!("2025-08-31");
        write_events(&path, &value);

        let mut store = EventStore::new(&path);
        assert!(store.get_all().await.is_empty());
    }

    #[tokio::test]
    async fn test_reload_when_mtime_advances() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("eventos.json");
        write_events(&path, &eventos_json());

        let mut store = EventStore::new(&path);
        assert_eq!(store.get_all().await.len(), 2);

        // Repeated access without a file change serves the cache.
        assert_eq!(store.get_all().await.len(), 2);

        std::thread::sleep(std::time::Duration::from_millis(20));
        let mut value = eventos_json();
        value.as_array_mut().unwrap().pop();
        write_events(&path, &value);

        assert_eq!(store.get_all().await.len(), 1);
    }
}
