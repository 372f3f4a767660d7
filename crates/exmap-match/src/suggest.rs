//! Alternatives view for human review of uncertain mappings.

use exmap_lexicon::Lexicon;
use exmap_model::{MatchThresholds, NormalizedKey, SuggestedExercise, SuggestionResult};
use exmap_store::PopularityStore;

use crate::score::{Scorer, rank_order};

/// How many alternatives each list carries.
const SUGGESTION_LIMIT: usize = 8;

/// Builds [`SuggestionResult`]s. Stateless apart from its thresholds;
/// never fails, degenerating to an empty view with
/// `needs_user_search` set.
#[derive(Debug, Clone, Copy)]
pub struct SuggestionEngine {
    thresholds: MatchThresholds,
    scorer: Scorer,
}

impl SuggestionEngine {
    pub fn new(thresholds: MatchThresholds) -> Self {
        Self {
            thresholds,
            scorer: Scorer,
        }
    }

    pub fn suggest(
        &self,
        lexicon: &Lexicon,
        popularity: &PopularityStore,
        raw: &str,
        include_similar_types: bool,
    ) -> SuggestionResult {
        let key = lexicon.normalizer.normalize(raw);
        let scored = self.score_catalog(lexicon, popularity, &key);

        let best_match = scored
            .iter()
            .max_by(|a, b| {
                rank_order(
                    (b.score, b.popularity, b.name.as_str()),
                    (a.score, a.popularity, a.name.as_str()),
                )
            })
            .filter(|best| best.score >= self.thresholds.needs_review)
            .cloned();
        let needs_user_search = best_match.is_none();

        // Popular choices lead the list so the crowd's answer is seen
        // before raw string similarity.
        let mut similar_exercises: Vec<SuggestedExercise> = scored
            .iter()
            .filter(|entry| entry.is_popular() || entry.score >= self.thresholds.needs_review)
            .cloned()
            .collect();
        similar_exercises.sort_by(|a, b| {
            b.popularity
                .cmp(&a.popularity)
                .then_with(|| rank_order((a.score, 0, a.name.as_str()), (b.score, 0, b.name.as_str())))
        });
        similar_exercises.truncate(SUGGESTION_LIMIT);

        let category = lexicon.categories.detect(&key).map(str::to_string);
        let exercises_by_type = match (&category, include_similar_types) {
            (Some(category), true) => {
                let mut in_category: Vec<SuggestedExercise> = scored
                    .iter()
                    .filter(|entry| {
                        let entry_key = lexicon.normalizer.normalize(&entry.name);
                        lexicon.categories.detect(&entry_key) == Some(category.as_str())
                    })
                    .cloned()
                    .collect();
                in_category.sort_by(|a, b| {
                    rank_order(
                        (a.score, a.popularity, a.name.as_str()),
                        (b.score, b.popularity, b.name.as_str()),
                    )
                });
                in_category.truncate(SUGGESTION_LIMIT);
                in_category
            }
            _ => Vec::new(),
        };

        SuggestionResult {
            input: raw.to_string(),
            best_match,
            similar_exercises,
            exercises_by_type,
            category,
            needs_user_search,
        }
    }

    fn score_catalog(
        &self,
        lexicon: &Lexicon,
        popularity: &PopularityStore,
        key: &NormalizedKey,
    ) -> Vec<SuggestedExercise> {
        lexicon
            .catalog
            .keyed_entries()
            .map(|(entry_key, entry)| SuggestedExercise {
                name: entry.name.clone(),
                score: self.scorer.score(key, entry_key),
                popularity: popularity.count(key, &entry.name),
            })
            .collect()
    }
}

impl Default for SuggestionEngine {
    fn default() -> Self {
        Self::new(MatchThresholds::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> (Lexicon, PopularityStore, SuggestionEngine) {
        (
            Lexicon::builtin().unwrap(),
            PopularityStore::ephemeral(),
            SuggestionEngine::default(),
        )
    }

    #[test]
    fn exact_name_is_the_best_match() {
        let (lexicon, popularity, engine) = fixture();
        let result = engine.suggest(&lexicon, &popularity, "Goblet Squat", false);
        let best = result.best_match.unwrap();
        assert_eq!(best.name, "Goblet Squat");
        assert_eq!(best.score, 1.0);
        assert!(!result.needs_user_search);
    }

    #[test]
    fn popular_choices_lead_the_similar_list() {
        let (lexicon, popularity, engine) = fixture();
        let key = lexicon.normalizer.normalize("squats");
        popularity.record(&key, "Air Squat").unwrap();
        popularity.record(&key, "Air Squat").unwrap();

        let result = engine.suggest(&lexicon, &popularity, "squats", false);
        assert_eq!(result.similar_exercises[0].name, "Air Squat");
        assert!(result.similar_exercises[0].is_popular());
    }

    #[test]
    fn category_filter_returns_same_type_entries() {
        let (lexicon, popularity, engine) = fixture();
        let result = engine.suggest(&lexicon, &popularity, "front squats", true);
        assert_eq!(result.category.as_deref(), Some("SQUAT"));
        assert!(!result.exercises_by_type.is_empty());
        assert!(
            result
                .exercises_by_type
                .iter()
                .all(|entry| entry.name.to_lowercase().contains("squat"))
        );
    }

    #[test]
    fn similar_types_are_skipped_when_not_requested() {
        let (lexicon, popularity, engine) = fixture();
        let result = engine.suggest(&lexicon, &popularity, "front squats", false);
        assert!(result.exercises_by_type.is_empty());
        // Category detection still runs.
        assert_eq!(result.category.as_deref(), Some("SQUAT"));
    }

    #[test]
    fn garbage_input_degenerates_to_user_search() {
        let (lexicon, popularity, engine) = fixture();
        let result = engine.suggest(&lexicon, &popularity, "zzzz qqqq wwww", false);
        assert!(result.needs_user_search);
        assert!(result.best_match.is_none());
    }
}
