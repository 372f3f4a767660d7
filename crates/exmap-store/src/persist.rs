//! Versioned JSON persistence with atomic writes.

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::error::{Result, StoreError};

pub const CURRENT_STORE_VERSION: u32 = 1;

/// Envelope written around every store file so future format changes
/// are detectable instead of silently misread.
#[derive(Debug, Serialize, Deserialize)]
pub struct StoreFile<T> {
    pub version: u32,
    /// RFC 3339 timestamp of the last save.
    pub saved_at: String,
    pub data: T,
}

impl<T> StoreFile<T> {
    /// Parsed save timestamp, when the stored string is valid RFC 3339.
    pub fn saved_at(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.saved_at)
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
    }
}

/// Load a store file, treating an absent or empty file as an empty
/// store. A present file with bad JSON or a wrong version is an error.
pub fn load_or_default<T>(path: &Path) -> Result<T>
where
    T: DeserializeOwned + Default,
{
    if !path.exists() {
        return Ok(T::default());
    }
    let text = fs::read_to_string(path).map_err(|e| StoreError::Io {
        operation: "read",
        path: path.to_path_buf(),
        source: e,
    })?;
    if text.trim().is_empty() {
        return Ok(T::default());
    }
    let file: StoreFile<T> = serde_json::from_str(&text).map_err(|e| StoreError::Json {
        path: path.to_path_buf(),
        source: e,
    })?;
    if file.version != CURRENT_STORE_VERSION {
        return Err(StoreError::UnsupportedVersion {
            path: path.to_path_buf(),
            found: file.version,
            expected: CURRENT_STORE_VERSION,
        });
    }
    Ok(file.data)
}

/// Write a store file atomically: serialize to a temp file next to the
/// target, fsync, then rename over it so a crash never leaves a
/// half-written store.
pub fn save<T: Serialize>(data: &T, path: &Path) -> Result<()> {
    let envelope = StoreFile {
        version: CURRENT_STORE_VERSION,
        saved_at: Utc::now().to_rfc3339(),
        data,
    };
    let text = serde_json::to_string_pretty(&envelope).map_err(|e| StoreError::Json {
        path: path.to_path_buf(),
        source: e,
    })?;

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| StoreError::Io {
            operation: "create directory",
            path: parent.to_path_buf(),
            source: e,
        })?;
    }

    let temp_path = path.with_extension("json.tmp");
    let mut file = File::create(&temp_path).map_err(|e| StoreError::Io {
        operation: "create",
        path: temp_path.clone(),
        source: e,
    })?;
    file.write_all(text.as_bytes()).map_err(|e| StoreError::Io {
        operation: "write",
        path: temp_path.clone(),
        source: e,
    })?;
    file.sync_all().map_err(|e| StoreError::Io {
        operation: "sync",
        path: temp_path.clone(),
        source: e,
    })?;
    fs::rename(&temp_path, path).map_err(|e| StoreError::AtomicWriteFailed {
        temp_path: temp_path.clone(),
        target_path: path.to_path_buf(),
        source: e,
    })?;

    tracing::debug!(path = %path.display(), "store saved");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use tempfile::tempdir;

    type Map = BTreeMap<String, String>;

    #[test]
    fn absent_file_loads_as_default() {
        let dir = tempdir().unwrap();
        let map: Map = load_or_default(&dir.path().join("missing.json")).unwrap();
        assert!(map.is_empty());
    }

    #[test]
    fn empty_file_loads_as_default() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("store.json");
        fs::write(&path, "  \n").unwrap();
        let map: Map = load_or_default(&path).unwrap();
        assert!(map.is_empty());
    }

    #[test]
    fn round_trips_through_the_envelope() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("store.json");
        let mut map = Map::new();
        map.insert("goblet squat".into(), "Goblet Squat".into());
        save(&map, &path).unwrap();
        let loaded: Map = load_or_default(&path).unwrap();
        assert_eq!(loaded, map);
        // No temp file left behind.
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn wrong_version_is_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("store.json");
        fs::write(
            &path,
            r#"{"version": 99, "saved_at": "2026-01-01T00:00:00Z", "data": {}}"#,
        )
        .unwrap();
        let result: Result<Map> = load_or_default(&path);
        assert!(matches!(result, Err(StoreError::UnsupportedVersion { .. })));
    }

    #[test]
    fn corrupt_file_is_an_error_not_a_reset() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("store.json");
        fs::write(&path, "{broken").unwrap();
        let result: Result<Map> = load_or_default(&path);
        assert!(matches!(result, Err(StoreError::Json { .. })));
    }
}
