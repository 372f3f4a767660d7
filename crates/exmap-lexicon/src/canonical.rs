//! Canonical exercise registry with normalized lookup indexes.

use std::collections::BTreeMap;

use exmap_model::{CanonicalExercise, NormalizedKey};

use crate::error::{LexiconError, Result};
use crate::normalize::Normalizer;

/// Read-only index over the canonical exercise dictionary. Both
/// canonical names and synonyms resolve through the same normalized
/// key space, so lookups accept anything the normalizer produces.
#[derive(Debug, Clone)]
pub struct CanonicalRegistry {
    entries: Vec<CanonicalExercise>,
    /// normalized name or synonym -> index into `entries`
    by_key: BTreeMap<NormalizedKey, usize>,
    /// category -> indexes into `entries`
    by_category: BTreeMap<String, Vec<usize>>,
}

impl CanonicalRegistry {
    /// Build the registry, failing on duplicate canonical names or a
    /// synonym that resolves to two different exercises. Both are
    /// dictionary defects and fatal at load.
    pub fn build(normalizer: &Normalizer, entries: Vec<CanonicalExercise>) -> Result<Self> {
        let mut by_key: BTreeMap<NormalizedKey, usize> = BTreeMap::new();
        let mut by_category: BTreeMap<String, Vec<usize>> = BTreeMap::new();

        for (index, entry) in entries.iter().enumerate() {
            if entry.name.trim().is_empty() {
                return Err(LexiconError::EmptyField {
                    name: format!("canonical entry #{index}"),
                    field: "name".to_string(),
                });
            }
            let name_key = normalizer.normalize(&entry.name);
            if let Some(&existing) = by_key.get(&name_key) {
                return Err(LexiconError::DuplicateCanonical {
                    name: entries[existing].name.clone(),
                });
            }
            by_key.insert(name_key, index);
            by_category
                .entry(entry.category.clone())
                .or_default()
                .push(index);
        }

        // Synonyms are indexed after all names so a synonym shadowing
        // another entry's canonical name is reported as ambiguous.
        for (index, entry) in entries.iter().enumerate() {
            for synonym in &entry.synonyms {
                let key = normalizer.normalize(synonym);
                match by_key.get(&key) {
                    Some(&existing) if existing != index => {
                        return Err(LexiconError::AmbiguousSynonym {
                            synonym: synonym.clone(),
                            first: entries[existing].name.clone(),
                            second: entry.name.clone(),
                        });
                    }
                    Some(_) => {}
                    None => {
                        by_key.insert(key, index);
                    }
                }
            }
        }

        Ok(Self {
            entries,
            by_key,
            by_category,
        })
    }

    pub fn lookup_canonical(&self, key: &NormalizedKey) -> Option<&CanonicalExercise> {
        self.by_key.get(key).map(|&index| &self.entries[index])
    }

    pub fn category_of(&self, key: &NormalizedKey) -> Option<&str> {
        self.lookup_canonical(key).map(|entry| entry.category.as_str())
    }

    pub fn entries_in_category(&self, category: &str) -> impl Iterator<Item = &CanonicalExercise> {
        self.by_category
            .get(category)
            .into_iter()
            .flatten()
            .map(|&index| &self.entries[index])
    }

    pub fn all_entries(&self) -> &[CanonicalExercise] {
        &self.entries
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
    use crate::defaults::builtin_canonical;

    fn registry() -> CanonicalRegistry {
        CanonicalRegistry::build(&Normalizer::default(), builtin_canonical()).unwrap()
    }

    #[test]
    fn resolves_canonical_names_and_synonyms() {
        let registry = registry();
        let normalizer = Normalizer::default();

        let direct = registry
            .lookup_canonical(&normalizer.normalize("Barbell Back Squat"))
            .unwrap();
        assert_eq!(direct.name, "Barbell Back Squat");

        let via_synonym = registry
            .lookup_canonical(&normalizer.normalize("Military Press"))
            .unwrap();
        assert_eq!(via_synonym.name, "Barbell Overhead Press");
    }

    #[test]
    fn category_index_groups_entries() {
        let registry = registry();
        let squats: Vec<_> = registry
            .entries_in_category("SQUAT")
            .map(|entry| entry.name.as_str())
            .collect();
        assert!(squats.contains(&"Goblet Squat"));
        assert!(squats.contains(&"Air Squat"));
    }

    #[test]
    fn ambiguous_synonym_is_fatal() {
        let entries = vec![
            CanonicalExercise::new("Barbell Row", "ROW").with_synonyms(["heavy row"]),
            CanonicalExercise::new("Cable Row", "ROW").with_synonyms(["heavy row"]),
        ];
        let result = CanonicalRegistry::build(&Normalizer::default(), entries);
        assert!(matches!(result, Err(LexiconError::AmbiguousSynonym { .. })));
    }

    #[test]
    fn duplicate_canonical_name_is_fatal() {
        let entries = vec![
            CanonicalExercise::new("Plank", "PLANK"),
            CanonicalExercise::new("plank", "CORE"),
        ];
        let result = CanonicalRegistry::build(&Normalizer::default(), entries);
        assert!(matches!(result, Err(LexiconError::DuplicateCanonical { .. })));
    }
}
