use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// A controlled-vocabulary exercise, independent of any vendor's naming.
///
/// Owned by the lexicon and immutable after load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanonicalExercise {
    /// Canonical name (e.g., "bench press").
    pub name: String,
    /// Alternative names that classify into this exercise.
    #[serde(default)]
    pub synonyms: BTreeSet<String>,
    /// Movement category (e.g., "press", "squat").
    pub category: String,
    /// Equipment variants this exercise is performed with.
    #[serde(default)]
    pub equipment: BTreeSet<String>,
    /// Recognized modifiers (e.g., "incline", "single arm").
    #[serde(default)]
    pub modifiers: BTreeSet<String>,
}

impl CanonicalExercise {
    pub fn new(name: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            synonyms: BTreeSet::new(),
            category: category.into(),
            equipment: BTreeSet::new(),
            modifiers: BTreeSet::new(),
        }
    }

    pub fn with_synonyms<I, S>(mut self, synonyms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.synonyms.extend(synonyms.into_iter().map(Into::into));
        self
    }

    pub fn with_equipment<I, S>(mut self, equipment: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.equipment.extend(equipment.into_iter().map(Into::into));
        self
    }
}

/// A vendor exercise name that canonical exercises map onto for export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GarminCatalogEntry {
    /// Official catalog name (e.g., "Dumbbell Bench Press").
    pub name: String,
    /// Optional modifiers attached to the catalog entry.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub modifiers: Vec<String>,
}

impl GarminCatalogEntry {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            modifiers: Vec::new(),
        }
    }
}
