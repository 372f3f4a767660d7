//! Aggregated mapping-choice counts across all users.

use std::cmp::Reverse;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::RwLock;

use exmap_model::{NormalizedKey, PopularEntry, PopularityStats};
use tracing::debug;

use crate::error::{Result, StoreError};
use crate::persist;

/// normalized key -> garmin name -> times chosen
type Counts = BTreeMap<NormalizedKey, BTreeMap<String, u64>>;

const MOST_POPULAR_LIMIT: usize = 10;

/// Counts how often each Garmin name was chosen for a normalized
/// exercise key. Like [`crate::UserMappingStore`], disk state is
/// written before memory so failures never fork the two.
#[derive(Debug)]
pub struct PopularityStore {
    path: PathBuf,
    counts: RwLock<Counts>,
}

impl PopularityStore {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let counts = persist::load_or_default(&path)?;
        Ok(Self {
            path,
            counts: RwLock::new(counts),
        })
    }

    pub fn ephemeral() -> Self {
        Self {
            path: PathBuf::new(),
            counts: RwLock::new(Counts::new()),
        }
    }

    fn persistent(&self) -> bool {
        !self.path.as_os_str().is_empty()
    }

    /// Record one choice of `target` for `key`. Returns the new count.
    pub fn record(&self, key: &NormalizedKey, target: &str) -> Result<u64> {
        if target.trim().is_empty() {
            return Err(StoreError::EmptyTarget);
        }
        let mut guard = self.write();
        let mut next = guard.clone();
        let count = *next
            .entry(key.clone())
            .or_default()
            .entry(target.to_string())
            .and_modify(|count| *count += 1)
            .or_insert(1);
        if self.persistent() {
            persist::save(&next, &self.path)?;
        }
        *guard = next;
        debug!(key = %key, target, count, "popularity recorded");
        Ok(count)
    }

    /// Choices for one key, most chosen first; ties break
    /// alphabetically so ordering is stable.
    pub fn choices_for(&self, key: &NormalizedKey) -> Vec<PopularEntry> {
        let guard = self.read();
        let Some(targets) = guard.get(key) else {
            return Vec::new();
        };
        let mut entries: Vec<PopularEntry> = targets
            .iter()
            .map(|(target, &count)| PopularEntry {
                exercise: key.clone(),
                garmin_name: target.clone(),
                count,
            })
            .collect();
        entries.sort_by(|a, b| {
            Reverse(a.count)
                .cmp(&Reverse(b.count))
                .then_with(|| a.garmin_name.cmp(&b.garmin_name))
        });
        entries
    }

    /// The single most chosen target for a key, if any were recorded.
    pub fn top_choice(&self, key: &NormalizedKey) -> Option<PopularEntry> {
        self.choices_for(key).into_iter().next()
    }

    /// Count for one specific (key, target) pair.
    pub fn count(&self, key: &NormalizedKey, target: &str) -> u64 {
        self.read()
            .get(key)
            .and_then(|targets| targets.get(target))
            .copied()
            .unwrap_or(0)
    }

    pub fn stats(&self) -> PopularityStats {
        let guard = self.read();
        let total_choices = guard.values().flat_map(BTreeMap::values).sum();
        let unique_mappings = guard.values().map(BTreeMap::len).sum();
        let mut all: Vec<PopularEntry> = guard
            .iter()
            .flat_map(|(key, targets)| {
                targets.iter().map(|(target, &count)| PopularEntry {
                    exercise: key.clone(),
                    garmin_name: target.clone(),
                    count,
                })
            })
            .collect();
        all.sort_by(|a, b| {
            Reverse(a.count)
                .cmp(&Reverse(b.count))
                .then_with(|| a.exercise.cmp(&b.exercise))
                .then_with(|| a.garmin_name.cmp(&b.garmin_name))
        });
        all.truncate(MOST_POPULAR_LIMIT);
        PopularityStats {
            total_choices,
            unique_exercises: guard.len(),
            unique_mappings,
            most_popular: all,
        }
    }

    pub fn clear(&self) -> Result<usize> {
        let mut guard = self.write();
        let count = guard.len();
        if count > 0 && self.persistent() {
            persist::save(&Counts::new(), &self.path)?;
        }
        guard.clear();
        Ok(count)
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Counts> {
        self.counts.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Counts> {
        self.counts.write().unwrap_or_else(|e| e.into_inner())
    }
}
