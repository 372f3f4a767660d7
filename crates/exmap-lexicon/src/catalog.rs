//! The device exercise catalog the fuzzy matcher scans.

use std::collections::BTreeMap;

use exmap_model::{GarminCatalogEntry, NormalizedKey};

use crate::error::{LexiconError, Result};
use crate::normalize::Normalizer;

/// Read-only index over the Garmin exercise names. Entries keep their
/// display casing; lookups go through normalized keys.
#[derive(Debug, Clone)]
pub struct GarminCatalog {
    entries: Vec<GarminCatalogEntry>,
    by_key: BTreeMap<NormalizedKey, usize>,
}

impl GarminCatalog {
    pub fn build(normalizer: &Normalizer, entries: Vec<GarminCatalogEntry>) -> Result<Self> {
        let mut by_key = BTreeMap::new();
        for (index, entry) in entries.iter().enumerate() {
            if entry.name.trim().is_empty() {
                return Err(LexiconError::EmptyField {
                    name: format!("catalog entry #{index}"),
                    field: "name".to_string(),
                });
            }
            let key = normalizer.normalize(&entry.name);
            if by_key.insert(key, index).is_some() {
                return Err(LexiconError::DuplicateCatalogEntry {
                    name: entry.name.clone(),
                });
            }
        }
        Ok(Self { entries, by_key })
    }

    /// Exact lookup by normalized key.
    pub fn get(&self, key: &NormalizedKey) -> Option<&GarminCatalogEntry> {
        self.by_key.get(key).map(|&index| &self.entries[index])
    }

    pub fn contains(&self, key: &NormalizedKey) -> bool {
        self.by_key.contains_key(key)
    }

    /// All entries with their normalized keys, in key order. The
    /// scorer iterates this to rank candidates.
    pub fn keyed_entries(&self) -> impl Iterator<Item = (&NormalizedKey, &GarminCatalogEntry)> {
        self.by_key.iter().map(|(key, &index)| (key, &self.entries[index]))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defaults::builtin_catalog;

    #[test]
    fn normalized_lookup_finds_display_names() {
        let normalizer = Normalizer::default();
        let catalog = GarminCatalog::build(&normalizer, builtin_catalog()).unwrap();
        let entry = catalog.get(&normalizer.normalize("dumbbell bench press")).unwrap();
        assert_eq!(entry.name, "Dumbbell Bench Press");
        assert!(catalog.contains(&normalizer.normalize("Farmer's Carry")));
    }

    #[test]
    fn duplicate_normalized_name_is_fatal() {
        let normalizer = Normalizer::default();
        let entries = vec![
            GarminCatalogEntry::new("Push Up"),
            GarminCatalogEntry::new("push-ups"),
        ];
        let result = GarminCatalog::build(&normalizer, entries);
        assert!(matches!(
            result,
            Err(LexiconError::DuplicateCatalogEntry { .. })
        ));
    }
}
