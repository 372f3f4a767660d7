//! Per-user explicit mapping overrides.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::RwLock;

use exmap_model::NormalizedKey;
use tracing::info;

use crate::error::{Result, StoreError};
use crate::persist;

type Mappings = BTreeMap<NormalizedKey, String>;

/// Mutable store of user-confirmed mappings, keyed by normalized
/// exercise name. Writes persist to disk before the in-memory map is
/// updated, so a failed write leaves the store unchanged.
#[derive(Debug)]
pub struct UserMappingStore {
    path: PathBuf,
    mappings: RwLock<Mappings>,
}

impl UserMappingStore {
    /// Open the store, loading existing mappings. An absent file is an
    /// empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let mappings = persist::load_or_default(&path)?;
        Ok(Self {
            path,
            mappings: RwLock::new(mappings),
        })
    }

    /// In-memory store that never touches disk, for tests and
    /// one-shot runs.
    pub fn ephemeral() -> Self {
        Self {
            path: PathBuf::new(),
            mappings: RwLock::new(Mappings::new()),
        }
    }

    fn persistent(&self) -> bool {
        !self.path.as_os_str().is_empty()
    }

    pub fn get(&self, key: &NormalizedKey) -> Option<String> {
        self.read().get(key).cloned()
    }

    pub fn contains(&self, key: &NormalizedKey) -> bool {
        self.read().contains_key(key)
    }

    /// Add or replace a mapping. Returns the previous target, if any.
    pub fn set(&self, key: NormalizedKey, target: impl Into<String>) -> Result<Option<String>> {
        let target = target.into();
        if target.trim().is_empty() {
            return Err(StoreError::EmptyTarget);
        }
        let mut guard = self.write();
        let mut next = guard.clone();
        let previous = next.insert(key.clone(), target.clone());
        if self.persistent() {
            persist::save(&next, &self.path)?;
        }
        *guard = next;
        info!(key = %key, target = %target, "user mapping saved");
        Ok(previous)
    }

    /// Remove a mapping. Returns the removed target, if any.
    pub fn remove(&self, key: &NormalizedKey) -> Result<Option<String>> {
        let mut guard = self.write();
        let mut next = guard.clone();
        let removed = next.remove(key);
        if removed.is_some() && self.persistent() {
            persist::save(&next, &self.path)?;
        }
        *guard = next;
        Ok(removed)
    }

    /// Drop every mapping. Returns how many were removed.
    pub fn clear(&self) -> Result<usize> {
        let mut guard = self.write();
        let count = guard.len();
        if count > 0 && self.persistent() {
            persist::save(&Mappings::new(), &self.path)?;
        }
        guard.clear();
        Ok(count)
    }

    /// Snapshot of all mappings in key order.
    pub fn list_all(&self) -> Vec<(NormalizedKey, String)> {
        self.read()
            .iter()
            .map(|(key, target)| (key.clone(), target.clone()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Mappings> {
        self.mappings.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Mappings> {
        self.mappings.write().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn key(s: &str) -> NormalizedKey {
        NormalizedKey::new(s)
    }

    #[test]
    fn set_get_remove_round_trip() {
        let store = UserMappingStore::ephemeral();
        assert_eq!(store.set(key("goblet squat"), "Goblet Squat").unwrap(), None);
        assert_eq!(store.get(&key("goblet squat")).as_deref(), Some("Goblet Squat"));
        assert_eq!(
            store.set(key("goblet squat"), "Air Squat").unwrap().as_deref(),
            Some("Goblet Squat")
        );
        assert_eq!(
            store.remove(&key("goblet squat")).unwrap().as_deref(),
            Some("Air Squat")
        );
        assert!(store.is_empty());
    }

    #[test]
    fn empty_target_is_rejected() {
        let store = UserMappingStore::ephemeral();
        assert!(matches!(
            store.set(key("squat"), "  "),
            Err(StoreError::EmptyTarget)
        ));
    }

    #[test]
    fn mappings_survive_reopen() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("user_mappings.json");
        {
            let store = UserMappingStore::open(&path).unwrap();
            store.set(key("ski"), "Ski Moguls").unwrap();
        }
        let reopened = UserMappingStore::open(&path).unwrap();
        assert_eq!(reopened.get(&key("ski")).as_deref(), Some("Ski Moguls"));
    }

    #[test]
    fn failed_persist_leaves_memory_unchanged() {
        let dir = tempdir().unwrap();
        // A directory at the store path makes every save fail.
        let path = dir.path().join("store.json");
        std::fs::create_dir(&path).unwrap();
        let store = UserMappingStore {
            path: path.clone(),
            mappings: RwLock::new(Mappings::new()),
        };
        assert!(store.set(key("squat"), "Air Squat").is_err());
        assert!(store.is_empty());
    }

    #[test]
    fn clear_removes_everything() {
        let store = UserMappingStore::ephemeral();
        store.set(key("a"), "A").unwrap();
        store.set(key("b"), "B").unwrap();
        assert_eq!(store.clear().unwrap(), 2);
        assert!(store.list_all().is_empty());
    }
}
