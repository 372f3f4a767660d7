//! Static dictionaries and normalization for exercise name resolution.
//!
//! The [`Lexicon`] bundles everything that is immutable at runtime:
//! the normalizer and its rule tables, the canonical exercise
//! registry, the Garmin catalog, the manual override table, and the
//! category keyword table. It is loaded once at startup and shared by
//! reference; all reads are lock-free.

#![deny(unsafe_code)]

pub mod canonical;
pub mod catalog;
pub mod categories;
pub mod defaults;
pub mod error;
pub mod loader;
pub mod manual;
pub mod normalize;
pub mod rules;

use std::path::Path;

use tracing::info;

pub use crate::canonical::CanonicalRegistry;
pub use crate::catalog::GarminCatalog;
pub use crate::categories::CategoryTable;
pub use crate::error::{LexiconError, Result};
pub use crate::manual::ManualOverrides;
pub use crate::normalize::Normalizer;
pub use crate::rules::{NormalizerRules, PluralRule, RulesFile};

/// The full static dictionary set.
#[derive(Debug, Clone)]
pub struct Lexicon {
    pub normalizer: Normalizer,
    pub canonical: CanonicalRegistry,
    pub catalog: GarminCatalog,
    pub overrides: ManualOverrides,
    pub categories: CategoryTable,
}

impl Lexicon {
    /// Build the lexicon from the built-in dictionaries.
    pub fn builtin() -> Result<Self> {
        let normalizer = Normalizer::new(NormalizerRules::builtin());
        let canonical = CanonicalRegistry::build(&normalizer, defaults::builtin_canonical())?;
        let catalog = GarminCatalog::build(&normalizer, defaults::builtin_catalog())?;
        let overrides = ManualOverrides::build(&normalizer, defaults::builtin_overrides())?;
        Ok(Self {
            normalizer,
            canonical,
            catalog,
            overrides,
            categories: CategoryTable::builtin(),
        })
    }

    /// Build the lexicon from a data directory, falling back to the
    /// built-in dictionaries for any absent file. Malformed files fail
    /// the whole load.
    pub fn load_dir(dir: &Path) -> Result<Self> {
        let rules = match loader::load_rules(dir)? {
            Some(file) => NormalizerRules::from_file(file)?,
            None => NormalizerRules::builtin(),
        };
        let normalizer = Normalizer::new(rules);

        let canonical_entries =
            loader::load_canonical(dir)?.unwrap_or_else(defaults::builtin_canonical);
        let catalog_entries = loader::load_catalog(dir)?.unwrap_or_else(defaults::builtin_catalog);
        let override_entries = loader::load_overrides(dir)?.map_or_else(
            || {
                defaults::builtin_overrides()
                    .into_iter()
                    .map(|(key, value)| (key.to_string(), value.to_string()))
                    .collect()
            },
            |entries| entries,
        );

        let canonical = CanonicalRegistry::build(&normalizer, canonical_entries)?;
        let catalog = GarminCatalog::build(&normalizer, catalog_entries)?;
        let overrides = ManualOverrides::build(&normalizer, override_entries)?;

        info!(
            dir = %dir.display(),
            canonical = canonical.len(),
            catalog = catalog.len(),
            overrides = overrides.len(),
            "lexicon loaded"
        );
        Ok(Self {
            normalizer,
            canonical,
            catalog,
            overrides,
            categories: CategoryTable::builtin(),
        })
    }
}
