//! Exercise name resolution: normalization, fuzzy scoring, and the
//! multi-source priority chain.
//!
//! [`ExerciseMapper`] is the facade collaborators use: it owns the
//! lexicon and both mutable stores and exposes resolution,
//! suggestions, popularity recording, and user-mapping maintenance.

#![deny(unsafe_code)]

pub mod error;
pub mod resolver;
pub mod score;
pub mod suggest;
pub mod workflow;

use exmap_lexicon::Lexicon;
use exmap_model::{
    BatchReport, MatchResult, NormalizedKey, PopularEntry, PopularityStats, SuggestionResult,
};
use exmap_store::{PopularityStore, UserMappingStore};
use tracing::warn;

pub use crate::error::{MatchError, Result};
pub use crate::resolver::{ResolveContext, ResolveRule, Resolver, ResolverConfig};
pub use crate::score::Scorer;
pub use crate::suggest::SuggestionEngine;
pub use crate::workflow::{BatchItem, validate_batch};

/// The full pipeline behind one facade.
pub struct ExerciseMapper {
    lexicon: Lexicon,
    user: UserMappingStore,
    popularity: PopularityStore,
    resolver: Resolver,
    suggestions: SuggestionEngine,
}

impl ExerciseMapper {
    pub fn new(
        lexicon: Lexicon,
        user: UserMappingStore,
        popularity: PopularityStore,
        config: ResolverConfig,
    ) -> Self {
        let suggestions = SuggestionEngine::new(config.thresholds);
        Self {
            lexicon,
            user,
            popularity,
            resolver: Resolver::new(config),
            suggestions,
        }
    }

    /// Built-in lexicon, in-memory stores, default thresholds.
    pub fn in_memory() -> exmap_lexicon::Result<Self> {
        Ok(Self::new(
            Lexicon::builtin()?,
            UserMappingStore::ephemeral(),
            PopularityStore::ephemeral(),
            ResolverConfig::default(),
        ))
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    pub fn normalize(&self, raw: &str) -> NormalizedKey {
        self.lexicon.normalizer.normalize(raw)
    }

    /// Resolve one exercise name. Total; never fails.
    pub fn resolve(&self, raw: &str, hint: Option<&str>) -> MatchResult {
        self.resolver
            .resolve(&self.lexicon, &self.user, &self.popularity, raw, hint)
    }

    /// Alternatives for human review. Total; never fails.
    pub fn suggest(&self, raw: &str, include_similar_types: bool) -> SuggestionResult {
        self.suggestions
            .suggest(&self.lexicon, &self.popularity, raw, include_similar_types)
    }

    /// Resolve a whole workout and partition by status.
    pub fn validate_batch(&self, items: &[BatchItem]) -> BatchReport {
        validate_batch(&self.resolver, &self.lexicon, &self.user, &self.popularity, items)
    }

    /// Record a crowd-signal choice without saving a personal mapping.
    pub fn record_popularity(&self, raw: &str, garmin_name: &str) -> Result<u64> {
        let key = self.require_key(raw)?;
        Ok(self.popularity.record(&key, garmin_name)?)
    }

    /// Save a personal mapping. Also records the choice in the
    /// popularity table; if that second write fails, the user mapping
    /// is rolled back so the two stores never disagree about what was
    /// committed.
    pub fn add_user_mapping(&self, raw: &str, garmin_name: &str) -> Result<()> {
        let key = self.require_key(raw)?;
        let previous = self.user.set(key.clone(), garmin_name)?;
        if let Err(error) = self.popularity.record(&key, garmin_name) {
            warn!(key = %key, %error, "popularity write failed, rolling back user mapping");
            let rollback = match previous {
                Some(previous) => self.user.set(key, previous).map(|_| ()),
                None => self.user.remove(&key).map(|_| ()),
            };
            if let Err(rollback_error) = rollback {
                warn!(%rollback_error, "rollback of user mapping also failed");
            }
            return Err(error.into());
        }
        Ok(())
    }

    pub fn remove_user_mapping(&self, raw: &str) -> Result<Option<String>> {
        let key = self.require_key(raw)?;
        Ok(self.user.remove(&key)?)
    }

    pub fn list_user_mappings(&self) -> Vec<(NormalizedKey, String)> {
        self.user.list_all()
    }

    pub fn clear_user_mappings(&self) -> Result<usize> {
        Ok(self.user.clear()?)
    }

    /// Recorded choices for one name, most chosen first.
    pub fn popularity_for(&self, raw: &str) -> Vec<PopularEntry> {
        self.popularity.choices_for(&self.normalize(raw))
    }

    pub fn popularity_stats(&self) -> PopularityStats {
        self.popularity.stats()
    }

    /// Admin reset of the popularity table.
    pub fn clear_popularity(&self) -> Result<usize> {
        Ok(self.popularity.clear()?)
    }

    fn require_key(&self, raw: &str) -> Result<NormalizedKey> {
        let key = self.normalize(raw);
        if key.is_empty() {
            return Err(MatchError::EmptyName);
        }
        Ok(key)
    }
}
