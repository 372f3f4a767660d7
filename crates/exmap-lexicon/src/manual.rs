//! Manual override table for names fuzzy matching handles poorly.

use std::collections::BTreeMap;

use exmap_model::NormalizedKey;

use crate::error::{LexiconError, Result};
use crate::normalize::Normalizer;

/// Curated mappings checked after user and popularity mappings but
/// before fuzzy matching. Keys are normalized at build time so lookup
/// and storage share one key space.
#[derive(Debug, Clone, Default)]
pub struct ManualOverrides {
    by_key: BTreeMap<NormalizedKey, String>,
}

impl ManualOverrides {
    pub fn build<K, V>(
        normalizer: &Normalizer,
        entries: impl IntoIterator<Item = (K, V)>,
    ) -> Result<Self>
    where
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut by_key = BTreeMap::new();
        for (raw_key, target) in entries {
            let raw_key = raw_key.as_ref();
            let target = target.into();
            if target.trim().is_empty() {
                return Err(LexiconError::InvalidOverride {
                    key: raw_key.to_string(),
                    message: "target name must be non-empty".to_string(),
                });
            }
            let key = normalizer.normalize(raw_key);
            if key.is_empty() {
                return Err(LexiconError::InvalidOverride {
                    key: raw_key.to_string(),
                    message: "key normalizes to nothing".to_string(),
                });
            }
            if let Some(existing) = by_key.get(&key) {
                if *existing != target {
                    return Err(LexiconError::InvalidOverride {
                        key: raw_key.to_string(),
                        message: format!(
                            "normalized key '{key}' already maps to '{existing}'"
                        ),
                    });
                }
                continue;
            }
            by_key.insert(key, target);
        }
        Ok(Self { by_key })
    }

    /// Exact match on the normalized key.
    pub fn get(&self, key: &NormalizedKey) -> Option<&str> {
        self.by_key.get(key).map(String::as_str)
    }

    /// Longest override key contained in the query, used when no exact
    /// override applies. Containment is token-boundary aware so "ski"
    /// does not fire inside "skierg".
    pub fn longest_contained(&self, key: &NormalizedKey) -> Option<&str> {
        let query_tokens: Vec<&str> = key.as_str().split_whitespace().collect();
        let mut best: Option<(&str, usize)> = None;
        for (candidate, target) in &self.by_key {
            let candidate_tokens: Vec<&str> =
                candidate.as_str().split_whitespace().collect();
            if candidate_tokens.is_empty() || candidate_tokens.len() > query_tokens.len() {
                continue;
            }
            let contained = query_tokens
                .windows(candidate_tokens.len())
                .any(|window| window == candidate_tokens.as_slice());
            if contained {
                let length = candidate.as_str().len();
                if best.is_none_or(|(_, best_len)| length > best_len) {
                    best = Some((target.as_str(), length));
                }
            }
        }
        best.map(|(target, _)| target)
    }

    pub fn len(&self) -> usize {
        self.by_key.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&NormalizedKey, &str)> {
        self.by_key.iter().map(|(key, target)| (key, target.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defaults::builtin_overrides;

    fn overrides() -> (Normalizer, ManualOverrides) {
        let normalizer = Normalizer::default();
        let overrides = ManualOverrides::build(&normalizer, builtin_overrides()).unwrap();
        (normalizer, overrides)
    }

    #[test]
    fn exact_lookup_uses_normalized_keys() {
        let (normalizer, overrides) = overrides();
        let key = normalizer.normalize("DB Push Press");
        assert_eq!(overrides.get(&key), Some("Dumbbell Push Press"));
    }

    #[test]
    fn substring_lookup_prefers_longest_key() {
        let (normalizer, overrides) = overrides();
        // Contains both "sled drag" and "backward sled drag" keys.
        let key = normalizer.normalize("heavy backward sled drag");
        assert_eq!(overrides.longest_contained(&key), Some("Sled Backward Drag"));
    }

    #[test]
    fn substring_lookup_is_token_aligned() {
        let (normalizer, overrides) = overrides();
        let key = normalizer.normalize("skill work");
        // "ski" must not fire inside the token "skill".
        assert_eq!(overrides.longest_contained(&key), None);
    }

    #[test]
    fn conflicting_targets_for_one_key_are_fatal() {
        let normalizer = Normalizer::default();
        let result = ManualOverrides::build(
            &normalizer,
            [("front squats", "Dumbbell Front Squat"), ("front squat", "Barbell Front Squat")],
        );
        assert!(matches!(result, Err(LexiconError::InvalidOverride { .. })));
    }
}
