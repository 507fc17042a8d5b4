use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use service_core::error::AppError;
use tokio::sync::Mutex;

/// Whole-file JSON record store.
///
/// The entire id -> document mapping lives in one JSON object on disk, and
/// every operation is a full load -> mutate -> save cycle. One mutex
/// serializes those cycles within this process; separate processes sharing
/// the file are still last-writer-wins at whole-file granularity.
pub struct RecordStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl RecordStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the snapshot. A missing, unreadable, or corrupt file degrades
    /// to an empty mapping rather than an error.
    fn read_snapshot(&self) -> Map<String, Value> {
        let data = match fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(_) => return Map::new(),
        };

        match serde_json::from_str::<Value>(&data) {
            Ok(Value::Object(map)) => map,
            Ok(_) => {
                tracing::warn!(
                    path = %self.path.display(),
                    "snapshot is not a JSON object, treating as empty"
                );
                Map::new()
            }
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "failed to parse snapshot, treating as empty"
                );
                Map::new()
            }
        }
    }

    fn write_snapshot(&self, map: &Map<String, Value>) -> Result<(), AppError> {
        let serialized = serde_json::to_string_pretty(map).map_err(|e| {
            AppError::InternalError(anyhow::anyhow!("failed to serialize snapshot: {}", e))
        })?;
        fs::write(&self.path, serialized)?;
        Ok(())
    }

    pub async fn get(&self, person_id: i64) -> Option<Value> {
        let _guard = self.lock.lock().await;
        self.read_snapshot().get(&person_id.to_string()).cloned()
    }

    /// The whole mapping in one load, for the aggregation path.
    pub async fn load_all(&self) -> Map<String, Value> {
        let _guard = self.lock.lock().await;
        self.read_snapshot()
    }

    /// Insert or overwrite a document wholesale. No partial merge.
    pub async fn put(&self, person_id: i64, document: Value) -> Result<(), AppError> {
        let _guard = self.lock.lock().await;
        let mut map = self.read_snapshot();
        map.insert(person_id.to_string(), document);
        self.write_snapshot(&map)
    }

    /// Remove a record, returning whether one was present. The file is only
    /// rewritten when something was actually removed.
    pub async fn delete(&self, person_id: i64) -> Result<bool, AppError> {
        let _guard = self.lock.lock().await;
        let mut map = self.read_snapshot();
        if map.remove(&person_id.to_string()).is_some() {
            self.write_snapshot(&map)?;
            return Ok(true);
        }
        Ok(false)
    }
}
